// src/util/testing.rs

use anyhow::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{AiGateway, AuthGateway, NotesGateway};
use crate::constants::{PASSWORD_ENV_VAR, SERVER_ENV_VAR, TOKEN_ENV_VAR};
use crate::domain::{Credentials, GatewayError, Note, NoteDraft, Profile, Session};

/// Variables that would leak a developer's own server or login into tests.
const CLIENT_ENV_VARS: [&str; 3] = [SERVER_ENV_VAR, TOKEN_ENV_VAR, PASSWORD_ENV_VAR];

/// Gateway operations, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Authenticate,
    Register,
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
    Summarize,
    GenerateFlashcards,
}

struct User {
    password: String,
    token: String,
}

#[derive(Default)]
struct MockState {
    users: HashMap<String, User>,
    tokens: Vec<String>,
    notes: Vec<Note>,
    next_id: u64,
    summary: String,
    flashcards: String,
    failures: HashMap<Operation, GatewayError>,
    calls: HashMap<Operation, usize>,
}

/// In-memory stand-in for the remote service, implementing every gateway trait.
///
/// Clones share state, so a test can keep a handle after moving one into a page.
/// Protected calls require a token registered with `with_token` or `with_user`.
///
/// # Examples
///
/// ```
/// use smartnotes::util::testing::{MockGateway, Operation};
/// use smartnotes::domain::GatewayError;
///
/// let gateway = MockGateway::builder()
///     .with_user("ada@example.com", "secret", "token-1")
///     .with_summary("Short version")
///     .with_failure(Operation::DeleteNote, GatewayError::Transport("offline".into()))
///     .build();
/// assert_eq!(gateway.calls(Operation::Summarize), 0);
/// ```
#[derive(Clone)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn builder() -> MockGatewayBuilder {
        MockGatewayBuilder::new()
    }

    /// How many times `op` was invoked, including calls that failed.
    pub fn calls(&self, op: Operation) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Snapshot of the notes held by the fake service.
    pub fn stored_notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count the call, then return the injected failure or check the token.
    fn enter(
        &self,
        op: Operation,
        session: Option<&Session>,
    ) -> Result<MutexGuard<'_, MockState>, GatewayError> {
        let mut state = self.lock();
        *state.calls.entry(op).or_insert(0) += 1;
        if let Some(err) = state.failures.get(&op) {
            return Err(err.clone());
        }
        if let Some(session) = session {
            if !state.tokens.iter().any(|t| t == session.token()) {
                return Err(GatewayError::Service {
                    status: 401,
                    message: Some("Token is not valid".to_string()),
                });
            }
        }
        Ok(state)
    }
}

impl AuthGateway for MockGateway {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let state = self.enter(Operation::Authenticate, None)?;
        match state.users.get(&credentials.email) {
            Some(user) if user.password == credentials.password => Ok(Session::new(&user.token)),
            _ => Err(GatewayError::Auth {
                message: Some("Invalid credentials".to_string()),
            }),
        }
    }

    async fn register(&self, profile: &Profile) -> Result<Option<String>, GatewayError> {
        let mut state = self.enter(Operation::Register, None)?;
        if state.users.contains_key(&profile.email) {
            return Err(GatewayError::Validation {
                message: Some("User already exists".to_string()),
            });
        }
        let token = format!("token-{}", profile.username);
        state.tokens.push(token.clone());
        state.users.insert(
            profile.email.clone(),
            User {
                password: profile.password.clone(),
                token,
            },
        );
        Ok(Some("User registered successfully".to_string()))
    }
}

impl NotesGateway for MockGateway {
    async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, GatewayError> {
        let state = self.enter(Operation::ListNotes, Some(session))?;
        Ok(state.notes.clone())
    }

    async fn create_note(
        &self,
        session: &Session,
        draft: &NoteDraft,
    ) -> Result<Note, GatewayError> {
        let mut state = self.enter(Operation::CreateNote, Some(session))?;
        state.next_id += 1;
        let now = Utc::now();
        let note = Note {
            id: format!("note-{}", state.next_id),
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: draft.tags.clone(),
            created_at: Some(now),
            updated_at: Some(now),
            extra: Default::default(),
        };
        state.notes.insert(0, note.clone());
        Ok(note)
    }

    async fn update_note(
        &self,
        session: &Session,
        id: &str,
        note: &Note,
    ) -> Result<Note, GatewayError> {
        let mut state = self.enter(Operation::UpdateNote, Some(session))?;
        let stored = state
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GatewayError::Service {
                status: 404,
                message: Some("Note not found".to_string()),
            })?;
        *stored = Note {
            id: id.to_string(),
            updated_at: Some(Utc::now()),
            ..note.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_note(&self, session: &Session, id: &str) -> Result<(), GatewayError> {
        let mut state = self.enter(Operation::DeleteNote, Some(session))?;
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        if before == state.notes.len() {
            return Err(GatewayError::Service {
                status: 404,
                message: Some("Note not found".to_string()),
            });
        }
        Ok(())
    }
}

impl AiGateway for MockGateway {
    async fn summarize(&self, session: &Session, _text: &str) -> Result<String, GatewayError> {
        let state = self.enter(Operation::Summarize, Some(session))?;
        Ok(state.summary.clone())
    }

    async fn generate_flashcards(
        &self,
        session: &Session,
        _text: &str,
    ) -> Result<String, GatewayError> {
        let state = self.enter(Operation::GenerateFlashcards, Some(session))?;
        Ok(state.flashcards.clone())
    }
}

/// Builder for MockGateway
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockGatewayBuilder {
    state: MockState,
}

impl MockGatewayBuilder {
    pub fn new() -> Self {
        Self {
            state: MockState::default(),
        }
    }

    /// Register an account that `authenticate` accepts.
    pub fn with_user(mut self, email: &str, password: &str, token: &str) -> Self {
        self.state.tokens.push(token.to_string());
        self.state.users.insert(
            email.to_string(),
            User {
                password: password.to_string(),
                token: token.to_string(),
            },
        );
        self
    }

    /// Accept `token` on protected calls without a matching user.
    pub fn with_token(mut self, token: &str) -> Self {
        self.state.tokens.push(token.to_string());
        self
    }

    /// Seed a stored note; notes are listed in the order they were added.
    pub fn with_note(mut self, note: Note) -> Self {
        self.state.notes.push(note);
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.state.summary = summary.to_string();
        self
    }

    /// Raw text returned by `generate_flashcards`.
    pub fn with_flashcards(mut self, raw: &str) -> Self {
        self.state.flashcards = raw.to_string();
        self
    }

    /// Make every call to `op` fail with `err`.
    pub fn with_failure(mut self, op: Operation, err: GatewayError) -> Self {
        self.state.failures.insert(op, err);
        self
    }

    pub fn build(self) -> MockGateway {
        MockGateway {
            state: Arc::new(Mutex::new(self.state)),
        }
    }
}

impl Default for MockGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Once-per-binary test setup: scrub client variables from the environment
/// and install a stderr subscriber.
pub fn init_test_setup() -> Result<()> {
    for var in CLIENT_ENV_VARS {
        if env::var_os(var).is_some() {
            env::remove_var(var);
        }
    }
    setup_test_logging();

    info!("Test setup complete");
    Ok(())
}

fn setup_test_logging() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "smartnotes=trace");
    }

    // HTTP plumbing logs every connection
    let noisy_modules = ["hyper", "hyper_util", "reqwest", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}
