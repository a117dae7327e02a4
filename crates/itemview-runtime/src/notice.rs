use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A failure reported to the user without interrupting what they were doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn error(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: Some(detail.to_string()),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            detail: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

/// Pending notices, drained by whoever displays them.
#[derive(Debug, Default)]
pub(crate) struct NoticeLog {
    pending: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::error!(detail = ?notice.detail, "{}", notice.message),
            NoticeLevel::Warning => tracing::warn!(detail = ?notice.detail, "{}", notice.message),
            NoticeLevel::Info => tracing::info!("{}", notice.message),
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notice);
        }
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.pending
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_log() {
        let log = NoticeLog::default();
        log.push(Notice::error("Failed to update display type", "status 500"));
        log.push(Notice::info("Column order reset"));

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(
            drained[0].to_string(),
            "Failed to update display type: status 500"
        );
        assert!(log.drain().is_empty());
    }
}
