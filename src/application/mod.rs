// src/application/mod.rs
pub mod auth;
pub mod flashcards_page;
pub mod gateway;
pub mod note_filter;
pub mod note_list;
pub mod notes_page;
pub mod page_state;
pub mod router;
pub mod session;
pub mod summaries_page;

pub use auth::Authenticator;
pub use flashcards_page::{FlashcardViewer, FlashcardsPage};
pub use gateway::{AiGateway, AuthGateway, NotesGateway};
pub use note_filter::{NoteFilter, TagFilter};
pub use note_list::{NoteAction, NoteList};
pub use notes_page::NotesPage;
pub use page_state::{PageState, ViewError};
pub use router::{resolve, Route};
pub use session::{SessionManager, SessionStore};
pub use summaries_page::SummariesPage;
