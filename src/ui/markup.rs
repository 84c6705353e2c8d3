/// HTML rendering of the gallery container
///
/// Produces the same content as the window for a given `ViewState`, as
/// HTML. Used by "Export HTML". All interpolated text and URLs are escaped.

use std::borrow::Cow;

use crate::apod::{ImageryEntry, MediaKind};
use crate::state::view::ViewState;
use crate::ui::datefmt::DateFormatter;

pub const IDLE_MESSAGE: &str = "Select a date range and press Get Space Images.";
pub const LOADING_MESSAGE: &str = "Loading space photos...";
pub const EMPTY_MESSAGE: &str = "No space images found for the selected date range.";
pub const ERROR_MESSAGE: &str = "Error loading space images. Please try again later.";

/// Escape text for use in element content and quoted attribute values
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Markup of the gallery container for `state`
pub fn container(state: &ViewState, dates: &DateFormatter) -> String {
    match state {
        ViewState::Idle => placeholder("🔭", IDLE_MESSAGE, None),
        ViewState::Loading => format!(
            "<div class=\"loading\"><div class=\"loading-icon\">🔄</div><p>{}</p></div>",
            LOADING_MESSAGE
        ),
        ViewState::Empty => placeholder("😔", EMPTY_MESSAGE, None),
        ViewState::Error(message) => placeholder("❌", ERROR_MESSAGE, Some(message.as_str())),
        ViewState::Populated(entries) => entries
            .iter()
            .map(|entry| gallery_item(entry, dates))
            .collect(),
    }
}

fn placeholder(icon: &str, message: &str, details: Option<&str>) -> String {
    let (class, details) = match details {
        Some(details) => (
            "placeholder error",
            format!("<p class=\"error-details\">{}</p>", escape(details)),
        ),
        None => ("placeholder", String::new()),
    };
    format!(
        "<div class=\"{}\"><div class=\"placeholder-icon\">{}</div><p>{}</p>{}</div>",
        class,
        icon,
        escape(message),
        details
    )
}

/// One gallery item; the template is chosen by media kind
pub fn gallery_item(entry: &ImageryEntry, dates: &DateFormatter) -> String {
    let title = escape(&entry.title);
    let explanation = escape(&entry.explanation);
    let url = escape(&entry.primary_url);
    let date = entry.date.format("%Y-%m-%d");
    let shown_date = escape(&dates.format(entry.date)).into_owned();

    match entry.media_kind {
        MediaKind::Video => format!(
            concat!(
                "<div class=\"gallery-item video-item\" data-explanation=\"{explanation}\" data-title=\"{title}\" data-date=\"{date}\">",
                "<div class=\"video-placeholder\"><div class=\"video-icon\">🎥</div><p><strong>Video Content</strong></p></div>",
                "<div class=\"item-info\"><h3>{title}</h3><p class=\"date\">{shown_date}</p>",
                "<a href=\"{url}\" target=\"_blank\" class=\"video-link\">Watch Video</a></div>",
                "</div>"
            ),
            explanation = explanation,
            title = title,
            date = date,
            shown_date = shown_date,
            url = url,
        ),
        MediaKind::Image => format!(
            concat!(
                "<div class=\"gallery-item image-item\" data-explanation=\"{explanation}\" data-title=\"{title}\" data-date=\"{date}\" data-url=\"{url}\">",
                "<img src=\"{src}\" alt=\"{title}\" loading=\"lazy\" />",
                "<div class=\"item-info\"><h3>{title}</h3><p class=\"date\">{shown_date}</p></div>",
                "</div>"
            ),
            explanation = explanation,
            title = title,
            date = date,
            url = url,
            src = escape(entry.display_url()),
            shown_date = shown_date,
        ),
    }
}

/// A standalone HTML page wrapping the container markup
pub fn document(state: &ViewState, dates: &DateFormatter, fact: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n",
            "<title>Space Explorer: NASA APOD Gallery</title>\n<style>{style}</style>\n</head>\n<body>\n",
            "<div class=\"container\">\n<h1>Space Explorer</h1>\n",
            "<div class=\"space-fact\"><p><strong>{fact}</strong></p></div>\n",
            "<div id=\"gallery\" class=\"gallery\">{gallery}</div>\n</div>\n</body>\n</html>\n"
        ),
        style = STYLE,
        fact = escape(fact),
        gallery = container(state, dates),
    )
}

const STYLE: &str = "body{font-family:sans-serif;background:#0b0d17;color:#eee}\
.gallery{display:flex;flex-wrap:wrap;gap:16px}\
.gallery-item{width:256px;background:#1b1e2b;border-radius:6px;overflow:hidden}\
.gallery-item img{width:100%}\
.item-info{padding:8px}\
.placeholder,.loading{text-align:center;width:100%}\
.error-details{color:#f88}";
