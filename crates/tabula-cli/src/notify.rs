//! Short-lived status notifications printed to stderr

use colored::Colorize;
use std::fmt;

/// How prominent a notification is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Confirmation or minor validation message
    Short,
    /// Failure the user should read
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub urgency: Urgency,
    pub message: String,
}

impl Notification {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            urgency: Urgency::Short,
            message: message.into(),
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            urgency: Urgency::Long,
            message: message.into(),
        }
    }

    /// Print the notification. Best effort; nothing is kept.
    pub fn show(&self) {
        eprintln!("{self}");
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.urgency {
            Urgency::Short => write!(f, "{} {}", "ℹ".blue(), self.message),
            Urgency::Long => write!(f, "{} {}", "✗".red(), self.message.as_str().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_marks_urgency() {
        // Both cases in one test: the color override is process-wide
        colored::control::set_override(false);
        assert_eq!(Notification::short("ok").to_string(), "ℹ ok");
        assert_eq!(Notification::long("bad").to_string(), "✗ bad");

        colored::control::set_override(true);
        let rendered = Notification::long("bad").to_string();
        colored::control::unset_override();
        assert!(rendered.contains("\u{1b}[31m"), "{rendered:?}");
    }
}
