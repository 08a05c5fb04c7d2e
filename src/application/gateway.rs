// src/application/gateway.rs
//
// Remote service boundary. Every protected call takes the session explicitly.
use std::future::Future;

use crate::domain::{Credentials, GatewayError, Note, NoteDraft, Profile, Session};

pub trait AuthGateway {
    /// Exchange credentials for a bearer token.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Session, GatewayError>> + Send;

    /// Create an account. Returns the service's confirmation text, if any.
    fn register(
        &self,
        profile: &Profile,
    ) -> impl Future<Output = Result<Option<String>, GatewayError>> + Send;
}

pub trait NotesGateway {
    fn list_notes(
        &self,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Note>, GatewayError>> + Send;

    fn create_note(
        &self,
        session: &Session,
        draft: &NoteDraft,
    ) -> impl Future<Output = Result<Note, GatewayError>> + Send;

    /// Replace the whole record stored under `id` with `note`.
    fn update_note(
        &self,
        session: &Session,
        id: &str,
        note: &Note,
    ) -> impl Future<Output = Result<Note, GatewayError>> + Send;

    fn delete_note(
        &self,
        session: &Session,
        id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

pub trait AiGateway {
    fn summarize(
        &self,
        session: &Session,
        text: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Raw generated text, to be fed to the flashcard parser.
    fn generate_flashcards(
        &self,
        session: &Session,
        text: &str,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}
