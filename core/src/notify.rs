//! Notification capability.
//!
//! Controllers report outcomes through the [`Notifier`] trait instead of
//! touching any display directly, so they can be exercised in tests with a
//! recording stub. The contract mirrors the banner semantics: one notice at
//! a time, last call wins, dismissed automatically after [`NOTICE_TTL`].

use std::time::Duration;

/// How long a notice stays visible before auto-dismissal.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Capability for surfacing transient success/error banners.
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, text: &str);

    fn success(&mut self, text: &str) {
        self.notify(NoticeKind::Success, text);
    }

    fn error(&mut self, text: &str) {
        self.notify(NoticeKind::Error, text);
    }
}

/// Test double that records every notice. Also used by the integration
/// suite, hence not `#[cfg(test)]`.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, kind: NoticeKind, text: &str) {
        self.notices.push(Notice {
            kind,
            text: text.to_string(),
        });
    }
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}
