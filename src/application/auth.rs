// src/application/auth.rs
use tracing::{info, instrument};

use crate::application::page_state::{PageState, ViewError};
use crate::application::router::Route;
use crate::application::session::{SessionManager, SessionStore};
use crate::application::AuthGateway;
use crate::domain::{Credentials, DomainError, Profile};

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const LOGOUT_FAILED: &str = "Logout failed";

pub const REGISTERED: &str = "Registration successful! You can now log in.";

/// Login, registration and logout flows.
pub struct Authenticator<G> {
    gateway: G,
    state: PageState,
}

impl<G: AuthGateway> Authenticator<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: PageState::Idle,
        }
    }

    /// Authenticate and start the session. On success the notes view is next.
    #[instrument(level = "debug", skip_all, fields(email = %credentials.email))]
    pub async fn login<S: SessionStore>(
        &mut self,
        sessions: &mut SessionManager<S>,
        credentials: &Credentials,
    ) -> Result<Route, ViewError> {
        if let Err(e) = require(&credentials.email, "Email")
            .and_then(|_| require(&credentials.password, "Password"))
        {
            return Err(ViewError::record(&mut self.state, e, LOGIN_FAILED));
        }
        self.state = PageState::Loading;
        let session = self
            .gateway
            .authenticate(credentials)
            .await
            .map_err(|e| ViewError::record(&mut self.state, e.into(), LOGIN_FAILED))?;
        sessions.begin(session).map_err(|e| {
            ViewError::record(
                &mut self.state,
                DomainError::SessionStorage(format!("{e:#}")),
                LOGIN_FAILED,
            )
        })?;
        info!("Logged in");
        self.state = PageState::Ready;
        Ok(Route::Notes)
    }

    /// Create an account; the returned text confirms it.
    #[instrument(level = "debug", skip_all, fields(username = %profile.username))]
    pub async fn register(&mut self, profile: &Profile) -> Result<&'static str, ViewError> {
        if let Err(e) = require(&profile.username, "Username")
            .and_then(|_| require(&profile.email, "Email"))
            .and_then(|_| require(&profile.password, "Password"))
        {
            return Err(ViewError::record(&mut self.state, e, REGISTER_FAILED));
        }
        self.state = PageState::Loading;
        self.gateway
            .register(profile)
            .await
            .map_err(|e| ViewError::record(&mut self.state, e.into(), REGISTER_FAILED))?;
        info!("Registered");
        self.state = PageState::Ready;
        Ok(REGISTERED)
    }

    /// Drop the session; the login view is next.
    pub fn logout<S: SessionStore>(
        &mut self,
        sessions: &mut SessionManager<S>,
    ) -> Result<Route, ViewError> {
        sessions.clear().map_err(|e| {
            ViewError::record(
                &mut self.state,
                DomainError::SessionStorage(format!("{e:#}")),
                LOGOUT_FAILED,
            )
        })?;
        self.state = PageState::Idle;
        Ok(Route::Login)
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }
}

fn require(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(())
    }
}
