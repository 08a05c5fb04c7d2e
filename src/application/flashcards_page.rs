// src/application/flashcards_page.rs
use chrono::Utc;
use tracing::{error, info, instrument};

use crate::application::page_state::{LocalIds, PageState, ViewError};
use crate::application::AiGateway;
use crate::domain::{DomainError, Flashcard, FlashcardSet, Session};
use crate::infrastructure::flashcard_parser::parse_flashcards;

const GENERATE_FAILED: &str = "Failed to generate flashcards. Please try again.";

/// Flashcard sets generated in this session, newest first, plus the set
/// currently being studied.
pub struct FlashcardsPage<G> {
    gateway: G,
    sets: Vec<FlashcardSet>,
    ids: LocalIds,
    viewer: Option<FlashcardViewer>,
    state: PageState,
}

impl<G: AiGateway> FlashcardsPage<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            sets: Vec::new(),
            ids: LocalIds::default(),
            viewer: None,
            state: PageState::Idle,
        }
    }

    /// Ask the service for flashcards about `text` and parse the reply.
    ///
    /// A reply that yields no cards is a failure the user should retry.
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub async fn generate(
        &mut self,
        session: &Session,
        text: &str,
    ) -> Result<&FlashcardSet, ViewError> {
        if text.trim().is_empty() {
            return Err(ViewError::record(
                &mut self.state,
                DomainError::EmptyInput,
                GENERATE_FAILED,
            ));
        }
        self.state = PageState::Loading;
        let raw = self
            .gateway
            .generate_flashcards(session, text)
            .await
            .map_err(|e| ViewError::record(&mut self.state, e.into(), GENERATE_FAILED))?;

        let cards = parse_flashcards(&raw);
        if cards.is_empty() {
            error!(response = %raw, "Failed to parse flashcards");
            return Err(ViewError::record(
                &mut self.state,
                DomainError::NoFlashcardsParsed,
                GENERATE_FAILED,
            ));
        }

        let now = Utc::now();
        let set = FlashcardSet {
            id: self.ids.next(now),
            original_text: text.to_string(),
            cards,
            created_at: now,
        };
        info!(id = set.id, cards = set.cards.len(), "Flashcard set created");
        self.sets.insert(0, set);
        self.state = PageState::Ready;
        Ok(&self.sets[0])
    }

    /// Remove a set; studying it stops as well. Returns whether it existed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.sets.len();
        self.sets.retain(|s| s.id != id);
        if self.viewer.as_ref().is_some_and(|v| v.set_id() == id) {
            self.viewer = None;
        }
        before != self.sets.len()
    }

    pub fn start_viewing(&mut self, id: u64) -> Option<&mut FlashcardViewer> {
        let set = self.sets.iter().find(|s| s.id == id)?;
        self.viewer = FlashcardViewer::new(set.clone());
        self.viewer.as_mut()
    }

    pub fn stop_viewing(&mut self) {
        self.viewer = None;
    }

    pub fn viewer(&self) -> Option<&FlashcardViewer> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut FlashcardViewer> {
        self.viewer.as_mut()
    }

    pub fn sets(&self) -> &[FlashcardSet] {
        &self.sets
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }
}

/// Study cursor over one set: one card at a time, front or back showing.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardViewer {
    set: FlashcardSet,
    index: usize,
    flipped: bool,
}

impl FlashcardViewer {
    /// `None` for a set without cards.
    pub fn new(set: FlashcardSet) -> Option<Self> {
        if set.cards.is_empty() {
            return None;
        }
        Some(Self {
            set,
            index: 0,
            flipped: false,
        })
    }

    pub fn set_id(&self) -> u64 {
        self.set.id
    }

    pub fn current(&self) -> &Flashcard {
        &self.set.cards[self.index]
    }

    /// 1-based position and total, for "Card 2 of 5".
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.set.cards.len())
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The side currently showing.
    pub fn visible_text(&self) -> &str {
        if self.flipped {
            self.current().answer()
        } else {
            self.current().question()
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Move forward; stays on the last card. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.set.cards.len() {
            self.index += 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// Move back; stays on the first card. Returns whether it moved.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }
}
