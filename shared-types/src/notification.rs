use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// The single transient status banner.
///
/// A new event replaces the whole value. It stops being visible after an
/// explicit dismissal or once the auto-hide timeout has elapsed since
/// `shown_at` (unix milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub visible: bool,
    pub text: String,
    pub level: NotificationLevel,
    pub shown_at: i64,
}

impl Notification {
    pub fn new(level: NotificationLevel, text: impl Into<String>, shown_at: i64) -> Self {
        Self {
            visible: true,
            text: text.into(),
            level,
            shown_at,
        }
    }

    pub fn is_visible_at(&self, now: i64, timeout_ms: i64) -> bool {
        self.visible && now.saturating_sub(self.shown_at) < timeout_ms
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NotificationResponse {
    pub notification: Option<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serialization() {
        let json = serde_json::to_string(&NotificationLevel::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_visibility_window() {
        let note = Notification::new(NotificationLevel::Success, "done", 1_000);
        assert!(note.is_visible_at(1_000, 6_000));
        assert!(note.is_visible_at(6_999, 6_000));
        assert!(!note.is_visible_at(7_000, 6_000));
    }

    #[test]
    fn test_dismiss_hides_immediately() {
        let mut note = Notification::new(NotificationLevel::Error, "boom", 0);
        note.dismiss();
        assert!(!note.is_visible_at(0, 6_000));
    }
}
