//! Status Notifier
//!
//! One transient message per page. Each `show` starts a new generation;
//! a scheduled clear only applies to the generation it was scheduled for.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    pub fn class(&self) -> &'static str {
        match self {
            StatusKind::Info => "status status-info",
            StatusKind::Error => "status status-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    current: Option<StatusMessage>,
    generation: u64,
}

impl Notifier {
    /// Replace the current message; returns the generation to clear later
    pub fn show(&mut self, text: impl Into<String>, is_error: bool) -> u64 {
        let kind = if is_error { StatusKind::Error } else { StatusKind::Info };
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
        });
        self.generation += 1;
        self.generation
    }

    /// Clear only if nothing newer has been shown since `generation`
    pub fn clear_if(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_clear_keeps_newer_message() {
        let mut notifier = Notifier::default();
        let first = notifier.show("Saved.", false);
        let second = notifier.show("Delete failed.", true);

        assert!(!notifier.clear_if(first));
        assert_eq!(notifier.current().map(|m| m.text.as_str()), Some("Delete failed."));
        assert_eq!(notifier.current().map(|m| m.kind), Some(StatusKind::Error));

        assert!(notifier.clear_if(second));
        assert_eq!(notifier.current(), None);
    }

    #[test]
    fn test_clear_twice_is_noop() {
        let mut notifier = Notifier::default();
        let generation = notifier.show("Hi", false);
        assert!(notifier.clear_if(generation));
        assert!(!notifier.clear_if(generation));
    }
}
