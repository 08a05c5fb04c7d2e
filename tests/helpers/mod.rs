use anyhow::{Context, Result};
use serde_json::{json, Value};
use smartnotes::domain::Session;
use smartnotes::infrastructure::HttpGateway;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

/// Test fixture pairing a mock notes service with a gateway pointed at it
#[allow(dead_code)]
pub struct TestService {
    pub server: MockServer,
    pub gateway: HttpGateway,
}

impl TestService {
    pub async fn start() -> Result<Self> {
        let server = MockServer::start().await;
        let gateway = HttpGateway::new(&server.uri(), None)
            .context("Failed to build gateway for mock server")?;
        Ok(Self { server, gateway })
    }

    /// Session whose token the mocks expect in the auth header
    pub fn session(&self) -> Session {
        Session::new(test_data::TOKEN)
    }
}

/// Temporary directory holding a session file
#[allow(dead_code)]
pub struct TestSessionDir {
    _temp_dir: TempDir,
    pub session_path: PathBuf,
}

#[allow(dead_code)]
impl TestSessionDir {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let session_path = temp_dir.path().join("session.json");
        Ok(Self {
            _temp_dir: temp_dir,
            session_path,
        })
    }
}

/// JSON for a stored note as the service returns it
#[allow(dead_code)]
pub fn note_json(id: &str, title: &str, content: &str, tags: &[&str]) -> Value {
    json!({
        "_id": id,
        "title": title,
        "content": content,
        "tags": tags,
        "user": "u1",
        "createdAt": "2024-06-12T10:00:00.000Z",
        "updatedAt": "2024-06-12T11:30:00.000Z",
        "__v": 0
    })
}

/// Known values shared by the service mocks
#[allow(dead_code)]
pub mod test_data {
    pub const TOKEN: &str = "jwt-token-123";
    pub const EMAIL: &str = "ada@example.com";
    pub const PASSWORD: &str = "analytical";

    /// Model output in the labelled layout the service usually returns
    pub const FLASHCARD_TEXT: &str = "Here are your flashcards:\n\n\
        **Flashcard 1**\n\
        * **Front:** What does ownership guarantee?\n\
        * **Back:** Memory safety without a garbage collector.\n\n\
        **Flashcard 2**\n\
        * **Front (Question):** What is a borrow?\n\
        * **Back (Answer):** A reference that does not take ownership.\n";
}
