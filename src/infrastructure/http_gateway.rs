// src/infrastructure/http_gateway.rs
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::application::{AiGateway, AuthGateway, NotesGateway};
use crate::constants::AUTH_HEADER;
use crate::domain::{Credentials, GatewayError, Note, NoteDraft, Profile, Session};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Error bodies carry the reason as `message` or `msg`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
}

/// Summaries arrive wrapped (`{"summary": ...}`) or as a bare JSON string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Wrapped { summary: String },
    Bare(String),
}

#[derive(Debug, Deserialize)]
struct FlashcardsResponse {
    flashcards: String,
}

#[derive(Debug, serde::Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

/// Talks to the remote notes service over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// `timeout` of `None` leaves the transport default in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.header(AUTH_HEADER, session.token())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Pass 2xx responses through; turn anything else into a service error.
    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(response).await;
        debug!(status = status.as_u16(), ?message, "Service rejected request");
        Err(GatewayError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

async fn error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    body.message.or(body.msg).or_else(|| {
        let trimmed = text.trim();
        // Plain-text bodies are shown as-is; HTML error pages are not.
        (!trimmed.is_empty() && !trimmed.starts_with('<') && !trimmed.starts_with('{'))
            .then(|| trimmed.to_string())
    })
}

/// Rejections of login or registration become auth/validation errors; server
/// faults stay service errors.
fn reclassify(
    err: GatewayError,
    as_client_error: fn(Option<String>) -> GatewayError,
) -> GatewayError {
    match err {
        GatewayError::Service { status, message }
            if StatusCode::from_u16(status).is_ok_and(|s| s.is_client_error()) =>
        {
            as_client_error(message)
        }
        other => other,
    }
}

impl AuthGateway for HttpGateway {
    #[instrument(level = "debug", skip_all, fields(email = %credentials.email))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let request = self.client.post(self.url("/api/auth/login")).json(credentials);
        let response = Self::check(self.send(request).await?)
            .await
            .map_err(|e| reclassify(e, |message| GatewayError::Auth { message }))?;
        let body: TokenResponse = Self::decode(response).await?;
        Ok(Session::new(body.token))
    }

    #[instrument(level = "debug", skip_all, fields(username = %profile.username))]
    async fn register(&self, profile: &Profile) -> Result<Option<String>, GatewayError> {
        let request = self.client.post(self.url("/api/auth/register")).json(profile);
        let response = Self::check(self.send(request).await?)
            .await
            .map_err(|e| reclassify(e, |message| GatewayError::Validation { message }))?;
        let body: ErrorBody = response.json().await.unwrap_or_default();
        Ok(body.message.or(body.msg))
    }
}

impl NotesGateway for HttpGateway {
    #[instrument(level = "debug", skip_all)]
    async fn list_notes(&self, session: &Session) -> Result<Vec<Note>, GatewayError> {
        let request = self.authed(self.client.get(self.url("/api/notes")), session);
        let response = Self::check(self.send(request).await?).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip_all, fields(title = %draft.title))]
    async fn create_note(
        &self,
        session: &Session,
        draft: &NoteDraft,
    ) -> Result<Note, GatewayError> {
        let request = self.authed(self.client.post(self.url("/api/notes")), session).json(draft);
        let response = Self::check(self.send(request).await?).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip_all, fields(id = %id))]
    async fn update_note(
        &self,
        session: &Session,
        id: &str,
        note: &Note,
    ) -> Result<Note, GatewayError> {
        let request = self
            .authed(self.client.put(self.url(&format!("/api/notes/{id}"))), session)
            .json(note);
        let response = Self::check(self.send(request).await?).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip_all, fields(id = %id))]
    async fn delete_note(&self, session: &Session, id: &str) -> Result<(), GatewayError> {
        let request = self.authed(
            self.client.delete(self.url(&format!("/api/notes/{id}"))),
            session,
        );
        Self::check(self.send(request).await?).await?;
        Ok(())
    }
}

impl AiGateway for HttpGateway {
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    async fn summarize(&self, session: &Session, text: &str) -> Result<String, GatewayError> {
        let request = self
            .authed(self.client.post(self.url("/api/ai/summarize")), session)
            .json(&TextRequest { text });
        let response = Self::check(self.send(request).await?).await?;
        match Self::decode::<SummaryResponse>(response).await? {
            SummaryResponse::Wrapped { summary } | SummaryResponse::Bare(summary) => Ok(summary),
        }
    }

    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    async fn generate_flashcards(
        &self,
        session: &Session,
        text: &str,
    ) -> Result<String, GatewayError> {
        let request = self
            .authed(self.client.post(self.url("/api/ai/flashcards")), session)
            .json(&TextRequest { text });
        let response = Self::check(self.send(request).await?).await?;
        let body: FlashcardsResponse = Self::decode(response).await?;
        Ok(body.flashcards)
    }
}
