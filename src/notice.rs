//! Transient user-facing notices
//!
//! A [`NoticeBoard`] shows at most one [`Notice`] at a time. Posting a notice
//! replaces the current one and arms a fixed-duration dismiss timer; a timer
//! only clears the notice it was armed for.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::Colorize;

use crate::generation::Generation;

/// Oldest entries are dropped from the posted log beyond this many.
const POSTED_LOG_LIMIT: usize = 64;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    Warning,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match self.kind {
            NoticeKind::Success => format!("✓ {}", self.message).green(),
            NoticeKind::Error => format!("✗ {}", self.message).red(),
            NoticeKind::Info => format!("i {}", self.message).blue(),
            NoticeKind::Warning => format!("! {}", self.message).yellow(),
        };
        write!(f, "{}", line)
    }
}

/// Holds the currently visible notice and a bounded log of what was posted.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Arc<Mutex<Option<Notice>>>,
    history: Arc<Mutex<Vec<Notice>>>,
    generation: Generation,
    duration: Duration,
}

impl NoticeBoard {
    /// Notices auto-dismiss after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(Vec::new())),
            generation: Generation::new(),
            duration,
        }
    }

    /// Shows `notice`, replacing any visible one.
    ///
    /// Must be called from within a Tokio runtime; the dismiss timer is a
    /// spawned task.
    pub fn post(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error | NoticeKind::Warning => {
                tracing::warn!(message = %notice.message, "Notice posted")
            }
            _ => tracing::info!(message = %notice.message, "Notice posted"),
        }

        let ticket = self.generation.begin();
        if let Ok(mut current) = self.current.lock() {
            *current = Some(notice.clone());
        }
        if let Ok(mut history) = self.history.lock() {
            if history.len() >= POSTED_LOG_LIMIT {
                history.remove(0);
            }
            history.push(notice);
        }

        let current = Arc::clone(&self.current);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if ticket.is_current() {
                if let Ok(mut current) = current.lock() {
                    *current = None;
                }
            }
        });
    }

    /// Dismisses the visible notice immediately.
    pub fn dismiss(&self) {
        self.generation.invalidate();
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
    }

    /// The visible notice, if any.
    pub fn current(&self) -> Option<Notice> {
        self.current.lock().ok().and_then(|n| n.clone())
    }

    /// The most recently posted notices, oldest first.
    pub fn posted(&self) -> Vec<Notice> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// Drains the posted log.
    pub fn take_posted(&self) -> Vec<Notice> {
        self.history
            .lock()
            .map(|mut h| std::mem::take(&mut *h))
            .unwrap_or_default()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notice_auto_dismisses() {
        let board = NoticeBoard::new(Duration::from_millis(3000));
        board.post(Notice::success("Saved"));
        assert_eq!(board.current(), Some(Notice::success("Saved")));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(board.current().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_clear_newer_notice() {
        let board = NoticeBoard::new(Duration::from_millis(3000));
        board.post(Notice::info("first"));
        tokio::time::sleep(Duration::from_millis(2000)).await;
        board.post(Notice::error("second"));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(board.current(), Some(Notice::error("second")));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(board.current().is_none());
    }

    #[tokio::test]
    async fn test_dismiss_and_history() {
        let board = NoticeBoard::default();
        board.post(Notice::warning("careful"));
        board.dismiss();
        assert!(board.current().is_none());
        assert_eq!(board.posted(), vec![Notice::warning("careful")]);
        assert_eq!(board.take_posted().len(), 1);
        assert!(board.posted().is_empty());
    }

    #[tokio::test]
    async fn test_posted_log_is_bounded() {
        let board = NoticeBoard::default();
        for i in 0..POSTED_LOG_LIMIT + 5 {
            board.post(Notice::info(format!("notice {}", i)));
        }

        let posted = board.posted();
        assert_eq!(posted.len(), POSTED_LOG_LIMIT);
        assert_eq!(posted[0], Notice::info("notice 5"));
        assert_eq!(
            posted.last(),
            Some(&Notice::info(format!("notice {}", POSTED_LOG_LIMIT + 4)))
        );
    }
}
