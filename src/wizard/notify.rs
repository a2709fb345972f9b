
/// Severity of a transient user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Non-blocking message surfaced to the user (a toast in graphical front-ends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            description: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Receives the notifications emitted by the wizard.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps every notification in memory; useful for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    entries: Vec<Notification>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}
