/// Gallery view state
///
/// A single `ViewState` decides what the gallery container shows.
/// Every submission takes a fresh `RequestToken`; a completion carrying an
/// older token is stale and is dropped instead of overwriting newer state.

use crate::apod::{FetchError, ImageryEntry};

/// Monotonically increasing request generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the gallery container currently displays
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Populated(Vec<ImageryEntry>),
    Empty,
    Error(String),
}

impl ViewState {
    pub fn entries(&self) -> &[ImageryEntry] {
        match self {
            ViewState::Populated(entries) => entries,
            _ => &[],
        }
    }
}

/// Owner of the single `ViewState`
#[derive(Debug, Default)]
pub struct ViewStateController {
    state: ViewState,
    generation: u64,
}

impl ViewStateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The token of the most recently issued request
    pub fn current(&self) -> RequestToken {
        RequestToken(self.generation)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Enter Loading for a new submission, superseding any request in flight
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = ViewState::Loading;
        RequestToken(self.generation)
    }

    /// Apply a fetch outcome.
    ///
    /// Returns `false` (and leaves the state untouched) when `token` is not
    /// the latest request.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<ImageryEntry>, FetchError>,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                "🗑️  Dropping stale response for request #{} (current #{})",
                token.0,
                self.current().0
            );
            return false;
        }

        self.state = match outcome {
            Ok(entries) if entries.is_empty() => ViewState::Empty,
            Ok(entries) => ViewState::Populated(entries),
            Err(err) => {
                tracing::warn!("❌ Error loading space images: {}", err);
                ViewState::Error(err.describe())
            }
        };

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apod::MediaKind;
    use chrono::NaiveDate;

    fn entry(title: &str) -> ImageryEntry {
        ImageryEntry {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            media_kind: MediaKind::Image,
            primary_url: "https://example.test/a.jpg".to_string(),
            thumbnail_url: None,
            explanation: String::new(),
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller = ViewStateController::new();
        assert_eq!(controller.state(), &ViewState::Idle);
    }

    #[test]
    fn test_begin_enters_loading() {
        let mut controller = ViewStateController::new();
        controller.begin();
        assert_eq!(controller.state(), &ViewState::Loading);
    }

    #[test]
    fn test_success_with_entries_is_populated() {
        let mut controller = ViewStateController::new();
        let token = controller.begin();
        assert!(controller.complete(token, Ok(vec![entry("A")])));
        assert_eq!(controller.state().entries().len(), 1);
    }

    #[test]
    fn test_success_with_no_entries_is_empty() {
        let mut controller = ViewStateController::new();
        let token = controller.begin();
        controller.complete(token, Ok(Vec::new()));
        assert_eq!(controller.state(), &ViewState::Empty);
    }

    #[test]
    fn test_http_and_transport_errors_read_differently() {
        let mut controller = ViewStateController::new();
        let token = controller.begin();
        controller.complete(token, Err(FetchError::Http { status: 403 }));
        let http_message = match controller.state() {
            ViewState::Error(message) => message.clone(),
            other => panic!("expected error, got {:?}", other),
        };

        let token = controller.begin();
        controller.complete(token, Err(FetchError::transport("connection refused")));
        let transport_message = match controller.state() {
            ViewState::Error(message) => message.clone(),
            other => panic!("expected error, got {:?}", other),
        };

        assert!(http_message.contains("403"));
        assert!(transport_message.contains("connection refused"));
        assert_ne!(http_message, transport_message);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut controller = ViewStateController::new();
        let first = controller.begin();
        let second = controller.begin();

        assert!(controller.complete(second, Ok(vec![entry("newer")])));
        assert!(!controller.complete(first, Ok(vec![entry("older")])));

        assert_eq!(controller.state().entries()[0].title, "newer");
    }

    #[test]
    fn test_stale_completion_does_not_end_loading() {
        let mut controller = ViewStateController::new();
        let first = controller.begin();
        let _second = controller.begin();

        assert!(!controller.complete(first, Err(FetchError::Http { status: 500 })));
        assert_eq!(controller.state(), &ViewState::Loading);
    }

    #[test]
    fn test_every_state_is_reenterable() {
        let mut controller = ViewStateController::new();
        let token = controller.begin();
        controller.complete(token, Err(FetchError::Http { status: 503 }));
        controller.begin();
        assert_eq!(controller.state(), &ViewState::Loading);
    }
}
