// src/domain/mod.rs
pub mod error;
pub mod flashcard;
pub mod note;
pub mod session;
pub mod summary;

pub use error::{DomainError, GatewayError};
pub use flashcard::{Flashcard, FlashcardSet};
pub use note::{Note, NoteDraft, NoteEdit};
pub use session::{Credentials, Profile, Session};
pub use summary::SummaryRecord;
