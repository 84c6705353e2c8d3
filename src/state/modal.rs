/// Detail overlay lifecycle
///
/// At most one overlay is live. Opening acquires the cancel-key listener,
/// closing releases it; the app only subscribes to key presses while a
/// listener is held, so repeated open/close cycles never accumulate
/// listeners. Opening while already open replaces the displayed entry and
/// keeps the existing listener.

use iced::widget::image::Handle;

use crate::apod::ImageryEntry;

/// What dismissed the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseControl,
    Backdrop,
    CancelKey,
    /// A new fetch replaced the batch the shown entry came from
    NewSubmission,
}

/// Loading state of the full-size image shown in the overlay
#[derive(Debug, Clone)]
pub enum FullImage {
    Loading,
    Ready(Handle),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        entry: ImageryEntry,
        image: FullImage,
    },
}

/// Scoped registration of the global cancel-key listener.
/// Held only while the overlay is open.
#[derive(Debug)]
struct KeyListener {
    id: u64,
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    listener: Option<KeyListener>,
    next_listener_id: u64,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn entry(&self) -> Option<&ImageryEntry> {
        match &self.state {
            ModalState::Open { entry, .. } => Some(entry),
            ModalState::Closed => None,
        }
    }

    /// Whether the cancel-key listener is currently registered
    pub fn listens_for_cancel_key(&self) -> bool {
        self.key_listener_count() > 0
    }

    /// Number of live key listeners (0 or 1)
    pub fn key_listener_count(&self) -> usize {
        usize::from(self.listener.is_some())
    }

    /// Show `entry` in the overlay, replacing any entry already shown
    pub fn open(&mut self, entry: ImageryEntry) {
        if self.listener.is_none() {
            self.next_listener_id += 1;
            self.listener = Some(KeyListener {
                id: self.next_listener_id,
            });
        }

        if let Some(previous) = self.entry() {
            tracing::debug!("Replacing open detail for {}", previous.title);
        }

        tracing::debug!("🔭 Opening detail for {} ({})", entry.title, entry.date);
        self.state = ModalState::Open {
            entry,
            image: FullImage::Loading,
        };
    }

    /// Remove the overlay and release the key listener. No-op when closed.
    pub fn close(&mut self, trigger: CloseTrigger) {
        if !self.is_open() {
            return;
        }

        if let Some(listener) = self.listener.take() {
            tracing::debug!(
                "Closing detail via {:?}, released key listener #{}",
                trigger,
                listener.id
            );
        }
        self.state = ModalState::Closed;
    }

    /// Attach a finished full-image load.
    ///
    /// Ignored unless the overlay is still showing the entry whose
    /// `primary_url` the load was for.
    pub fn attach_image(&mut self, url: &str, result: Result<Handle, String>) -> bool {
        match &mut self.state {
            ModalState::Open { entry, image } if entry.primary_url == url => {
                *image = match result {
                    Ok(handle) => FullImage::Ready(handle),
                    Err(err) => FullImage::Failed(err),
                };
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apod::MediaKind;
    use chrono::NaiveDate;

    fn entry(title: &str, url: &str) -> ImageryEntry {
        ImageryEntry {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            media_kind: MediaKind::Image,
            primary_url: url.to_string(),
            thumbnail_url: None,
            explanation: "Stars.".to_string(),
        }
    }

    #[test]
    fn test_open_acquires_listener() {
        let mut modal = ModalController::new();
        modal.open(entry("A", "a"));
        assert!(modal.is_open());
        assert!(modal.listens_for_cancel_key());
        assert_eq!(modal.entry().unwrap().title, "A");
    }

    #[test]
    fn test_each_close_trigger_removes_overlay_and_listener() {
        for trigger in [
            CloseTrigger::CloseControl,
            CloseTrigger::Backdrop,
            CloseTrigger::CancelKey,
            CloseTrigger::NewSubmission,
        ] {
            let mut modal = ModalController::new();
            modal.open(entry("A", "a"));
            modal.close(trigger);
            assert!(!modal.is_open());
            assert!(!modal.listens_for_cancel_key());
        }
    }

    #[test]
    fn test_listeners_do_not_accumulate() {
        let mut modal = ModalController::new();
        for _ in 0..10 {
            modal.open(entry("A", "a"));
            assert_eq!(modal.key_listener_count(), 1);
            modal.close(CloseTrigger::CancelKey);
            assert_eq!(modal.key_listener_count(), 0);
        }
    }

    #[test]
    fn test_double_open_replaces_entry() {
        let mut modal = ModalController::new();
        modal.open(entry("A", "a"));
        modal.open(entry("B", "b"));
        assert_eq!(modal.entry().unwrap().title, "B");
        assert_eq!(modal.key_listener_count(), 1);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut modal = ModalController::new();
        modal.close(CloseTrigger::Backdrop);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_image_for_other_entry_is_ignored() {
        let mut modal = ModalController::new();
        modal.open(entry("A", "a"));
        modal.open(entry("B", "b"));
        assert!(!modal.attach_image("a", Err("late".to_string())));
        assert!(matches!(
            modal.state(),
            ModalState::Open { image: FullImage::Loading, .. }
        ));
        assert!(modal.attach_image("b", Err("404".to_string())));
        assert!(matches!(
            modal.state(),
            ModalState::Open { image: FullImage::Failed(_), .. }
        ));
    }

    #[test]
    fn test_image_after_close_is_ignored() {
        let mut modal = ModalController::new();
        modal.open(entry("A", "a"));
        modal.close(CloseTrigger::CloseControl);
        assert!(!modal.attach_image("a", Err("late".to_string())));
    }
}
