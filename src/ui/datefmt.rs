/// Locale-aware date display
///
/// Dates are shown in the viewer's short date format (`%x` of their
/// locale), e.g. `01/31/2024` for en-US or `31.01.2024` for de-DE.

use chrono::format::StrftimeItems;
use chrono::{Locale, NaiveDate};

const FALLBACK_LOCALE: Locale = Locale::en_US;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateFormatter {
    locale: Locale,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

impl DateFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Formatter for the system locale, falling back to en_US
    pub fn detect() -> Self {
        let tag = sys_locale::get_locale();
        let locale = tag.as_deref().and_then(parse_locale_tag);

        match locale {
            Some(locale) => Self::new(locale),
            None => {
                tracing::debug!("No usable system locale ({:?}), using en_US dates", tag);
                Self::default()
            }
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let items = StrftimeItems::new_with_locale("%x", self.locale);
        date.format_with_items(items).to_string()
    }
}

/// Map a BCP 47 tag such as `en-US` or `de_DE.UTF-8` to a chrono locale
pub fn parse_locale_tag(tag: &str) -> Option<Locale> {
    let base = tag.split(|c: char| c == '.' || c == '@').next()?.replace('-', "_");
    Locale::try_from(base.as_str()).ok()
}
