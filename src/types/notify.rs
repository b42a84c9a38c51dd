/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Info,
}

/// Collaborator that renders mutation outcomes to the user.
///
/// The implementor decides how the message is shown (in-page toast, system
/// notification fallback on restricted pages); the core only reports what
/// happened and on which tab.
pub trait Notifier {
    fn notify(&self, tab_id: i64, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, tab_id: i64, message: &str, severity: Severity) {
        (**self).notify(tab_id, message, severity);
    }
}

/// Notifier that drops everything. Used in tests and headless surfaces.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _tab_id: i64, _message: &str, _severity: Severity) {}
}
