// src/domain/error.rs
use thiserror::Error;

/// Failures raised by a remote gateway call.
///
/// `message` is whatever text the service put in its error body, if any.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Authentication rejected{}", suffix(.message))]
    Auth { message: Option<String> },
    #[error("Invalid registration{}", suffix(.message))]
    Validation { message: Option<String> },
    #[error("Service unreachable: {0}")]
    Transport(String),
    #[error("Service returned {status}{}", suffix(.message))]
    Service { status: u16, message: Option<String> },
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl GatewayError {
    /// Server-supplied message, if the failing response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Auth { message }
            | GatewayError::Validation { message }
            | GatewayError::Service { message, .. } => message.as_deref(),
            GatewayError::Transport(_) | GatewayError::Decode(_) => None,
        }
    }

    /// Text to show the user: the server's message when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No authentication token found. Please log in.")]
    NotAuthenticated,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("A note needs a title")]
    MissingTitle,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Session storage failed: {0}")]
    SessionStorage(String),
    #[error("Nothing to send: input is empty")]
    EmptyInput,
    #[error("No flashcards could be parsed from the response. Please try again.")]
    NoFlashcardsParsed,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl DomainError {
    /// Message for the user; gateway failures prefer the server text over `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            DomainError::Gateway(e) => e.user_message(fallback),
            other => other.to_string(),
        }
    }
}
