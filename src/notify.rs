//! User-facing notices for PCForge
//!
//! Workflow and session components report outcomes through a [`Notifier`]
//! rather than printing directly, so command handlers and tests can decide
//! how notices are rendered.

use colored::Colorize;
use std::sync::Mutex;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information ("session expired, please log in")
    Info,
    /// Successful outcome ("build saved")
    Success,
    /// Something went wrong but the flow continues
    Warn,
    /// Operation failed
    Error,
}

/// Sink for user-facing notices
///
/// One notifier instance is shared by the session manager and the workflow
/// controller so every component reports through the same channel.
pub trait Notifier: Send + Sync {
    /// Emit a notice at the given level
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Emit an informational notice
    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    /// Emit a success notice
    fn success(&self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    /// Emit a warning notice
    fn warn(&self, message: &str) {
        self.notify(NoticeLevel::Warn, message);
    }

    /// Emit an error notice
    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Notifier that renders notices to the terminal with color
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => println!("{}", message.cyan()),
            NoticeLevel::Success => println!("{}", message.green()),
            NoticeLevel::Warn => println!("{}", message.yellow()),
            NoticeLevel::Error => eprintln!("{}", message.red()),
        }
    }
}

/// Notifier that records notices in memory
///
/// This is primarily useful for tests that assert on which notices a flow
/// produced (for example that no "session expired" notice fires after an
/// explicit logout).
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl MemoryNotifier {
    /// Create a new recording notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notices recorded so far
    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.notices.lock().expect("notifier lock poisoned").clone()
    }

    /// True if any recorded notice contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .any(|(_, m)| m.contains(needle))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices
            .lock()
            .expect("notifier lock poisoned")
            .push((level, message.to_string()));
    }
}
