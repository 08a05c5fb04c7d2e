// src/application/session.rs
use anyhow::Result;
use tracing::{debug, info};

use crate::domain::{DomainError, Session};

/// Where the single session lives between commands.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&mut self, session: &Session) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn load(&self) -> Result<Option<Session>> {
        (**self).load()
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        (**self).save(session)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// Owns the one session of this client. Set by login, cleared by logout,
/// read by every protected call.
pub struct SessionManager<S: SessionStore> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Pick up a session left by an earlier login, if any.
    pub fn init(&mut self) -> Result<()> {
        self.current = self.store.load()?;
        debug!(authenticated = self.current.is_some(), "Session initialised");
        Ok(())
    }

    pub fn begin(&mut self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        self.current = Some(session);
        info!("Session started");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        self.current = None;
        info!("Session cleared");
        Ok(())
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn require(&self) -> Result<&Session, DomainError> {
        self.current.as_ref().ok_or(DomainError::NotAuthenticated)
    }
}
