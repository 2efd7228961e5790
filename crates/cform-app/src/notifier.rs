//! User-facing notifications
//!
//! Components that report success or failure take a `&mut dyn Notifier`
//! instead of reaching for a global. The TUI keeps a [`StatusLine`] in
//! state and draws its latest notice in the footer.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{error, info};

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
    shown: Instant,
}

pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: &str);

    fn info(&mut self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.notify(NoticeLevel::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Latest notice, shown until it expires or is replaced
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    current: Option<Notice>,
}

impl StatusLine {
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Drop the notice once it has been visible for [`NOTICE_TTL`]
    pub fn expire(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown) >= NOTICE_TTL)
        {
            self.current = None;
        }
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => error!("{}", message),
            _ => info!("{}", message),
        }
        self.current = Some(Notice {
            level,
            message: message.to_string(),
            at: Local::now(),
            shown: Instant::now(),
        });
    }
}
