// src/application/page_state.rs
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::warn;

use crate::domain::DomainError;

/// Lifecycle of one page action: idle, then loading, then ready or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl PageState {
    /// While loading, the triggering action is disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A failed page action: the text shown to the user plus the underlying cause.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ViewError {
    pub message: String,
    pub source: DomainError,
}

impl ViewError {
    /// Convert `err` into a displayed message, log it and record it in `state`.
    pub fn record(state: &mut PageState, err: DomainError, fallback: &str) -> Self {
        let message = err.user_message(fallback);
        warn!(error = %err, %message, "Page action failed");
        *state = PageState::Failed(message.clone());
        Self {
            message,
            source: err,
        }
    }
}

/// Strictly increasing millisecond-timestamp identifiers for records that
/// only exist locally.
#[derive(Debug, Default)]
pub struct LocalIds {
    last: u64,
}

impl LocalIds {
    pub fn next(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last = millis.max(self.last + 1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GatewayError;

    #[test]
    fn given_gateway_failure_when_recording_then_state_holds_server_message() {
        // Arrange
        let mut state = PageState::Loading;
        let err = DomainError::from(GatewayError::Service {
            status: 500,
            message: Some("db down".to_string()),
        });

        // Act
        let view_error = ViewError::record(&mut state, err, "Failed to load notes");

        // Assert
        assert_eq!(view_error.to_string(), "db down");
        assert_eq!(state.error(), Some("db down"));
        assert!(!state.is_busy());
    }

    #[test]
    fn given_same_instant_when_generating_ids_then_they_still_increase() {
        let mut ids = LocalIds::default();
        let now = Utc::now();

        let first = ids.next(now);
        let second = ids.next(now);

        assert_eq!(first, now.timestamp_millis() as u64);
        assert_eq!(second, first + 1);
    }
}
