// src/application/notes_page.rs
use tracing::{debug, info, instrument};

use crate::application::note_filter::{NoteFilter, TagFilter};
use crate::application::note_list::{NoteAction, NoteList};
use crate::application::page_state::{PageState, ViewError};
use crate::application::{AiGateway, NotesGateway};
use crate::domain::{DomainError, Note, NoteDraft, NoteEdit, Session};

const LOAD_FAILED: &str = "Failed to load notes. Please try again.";
const CREATE_FAILED: &str = "Failed to create note";
const UPDATE_FAILED: &str = "Failed to update note";
const DELETE_FAILED: &str = "Failed to delete note";
const SUMMARY_FAILED: &str = "Failed to generate summary";

/// State behind the notes view: the local note list, search, selection and
/// the summary of the selected note.
pub struct NotesPage<G> {
    gateway: G,
    notes: NoteList,
    filter: NoteFilter,
    selected: Option<String>,
    state: PageState,
    summary_state: PageState,
    summary: Option<String>,
}

impl<G: NotesGateway + AiGateway> NotesPage<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            notes: NoteList::default(),
            filter: NoteFilter::default(),
            selected: None,
            state: PageState::Idle,
            summary_state: PageState::Idle,
            summary: None,
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub async fn load(&mut self, session: &Session) -> Result<(), ViewError> {
        self.state = PageState::Loading;
        match self.gateway.list_notes(session).await {
            Ok(notes) => {
                info!(count = notes.len(), "Loaded notes");
                self.apply(NoteAction::Loaded(notes));
                self.state = PageState::Ready;
                Ok(())
            }
            Err(e) => Err(ViewError::record(&mut self.state, e.into(), LOAD_FAILED)),
        }
    }

    /// Create a note; it is prepended locally and becomes the selection.
    #[instrument(level = "debug", skip_all, fields(title = %draft.title))]
    pub async fn create(&mut self, session: &Session, draft: NoteDraft) -> Result<Note, ViewError> {
        if draft.title.trim().is_empty() {
            return Err(ViewError::record(
                &mut self.state,
                DomainError::MissingTitle,
                CREATE_FAILED,
            ));
        }
        self.state = PageState::Loading;
        match self.gateway.create_note(session, &draft).await {
            Ok(created) => {
                info!(id = %created.id, "Created note");
                self.apply(NoteAction::Created(created.clone()));
                self.selected = Some(created.id.clone());
                self.state = PageState::Ready;
                Ok(created)
            }
            Err(e) => Err(ViewError::record(&mut self.state, e.into(), CREATE_FAILED)),
        }
    }

    /// Apply `edit` to the locally known note and send the whole record back.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub async fn update(
        &mut self,
        session: &Session,
        id: &str,
        edit: &NoteEdit,
    ) -> Result<Note, ViewError> {
        let Some(current) = self.notes.get(id) else {
            return Err(ViewError::record(
                &mut self.state,
                DomainError::NoteNotFound(id.to_string()),
                UPDATE_FAILED,
            ));
        };
        let replacement = edit.apply(current);
        self.state = PageState::Loading;
        match self.gateway.update_note(session, id, &replacement).await {
            Ok(updated) => {
                info!(id = %updated.id, "Updated note");
                self.apply(NoteAction::Updated(updated.clone()));
                self.selected = Some(updated.id.clone());
                self.state = PageState::Ready;
                Ok(updated)
            }
            Err(e) => Err(ViewError::record(&mut self.state, e.into(), UPDATE_FAILED)),
        }
    }

    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub async fn delete(&mut self, session: &Session, id: &str) -> Result<(), ViewError> {
        match self.gateway.delete_note(session, id).await {
            Ok(()) => {
                info!(id, "Deleted note");
                self.apply(NoteAction::Deleted(id.to_string()));
                if self.selected.as_deref() == Some(id) {
                    self.selected = None;
                }
                Ok(())
            }
            Err(e) => Err(ViewError::record(&mut self.state, e.into(), DELETE_FAILED)),
        }
    }

    /// Summarise the selected note's content.
    #[instrument(level = "debug", skip_all)]
    pub async fn summarize_selected(&mut self, session: &Session) -> Result<String, ViewError> {
        let content = self.selected_note().map(|note| note.content.clone());
        let content = match content {
            Some(content) if !content.trim().is_empty() => content,
            Some(_) => {
                return Err(ViewError::record(
                    &mut self.summary_state,
                    DomainError::EmptyInput,
                    SUMMARY_FAILED,
                ))
            }
            None => {
                return Err(ViewError::record(
                    &mut self.summary_state,
                    DomainError::NoteNotFound(self.selected.clone().unwrap_or_default()),
                    SUMMARY_FAILED,
                ))
            }
        };
        self.summary_state = PageState::Loading;
        match self.gateway.summarize(session, &content).await {
            Ok(summary) => {
                self.summary = Some(summary.clone());
                self.summary_state = PageState::Ready;
                Ok(summary)
            }
            Err(e) => Err(ViewError::record(&mut self.summary_state, e.into(), SUMMARY_FAILED)),
        }
    }

    fn apply(&mut self, action: NoteAction) {
        self.notes = self.notes.reduce(action);
        debug!(count = self.notes.len(), "Note list updated");
    }

    pub fn select(&mut self, id: &str) -> Result<&Note, DomainError> {
        if self.notes.get(id).is_none() {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        self.selected = Some(id.to_string());
        self.summary = None;
        self.notes
            .get(id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.summary = None;
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.notes.get(id))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn set_tag_filter(&mut self, tag: TagFilter) {
        self.filter.set_tag(tag);
    }

    /// Notes passing the current search and tag filter, in list order.
    pub fn visible(&self) -> Vec<&Note> {
        self.filter.apply(self.notes.as_slice())
    }

    pub fn notes(&self) -> &NoteList {
        &self.notes
    }

    pub fn tags(&self) -> Vec<String> {
        self.notes.all_tags()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn summary_state(&self) -> &PageState {
        &self.summary_state
    }

    /// Leave the error screen ("Try Again").
    pub fn dismiss_error(&mut self) {
        self.state = PageState::Idle;
        self.summary_state = PageState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GatewayError;
    use crate::util::testing::{MockGateway, Operation};

    const TOKEN: &str = "valid-token";

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: vec![],
            created_at: None,
            updated_at: None,
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn given_remote_notes_when_loading_then_list_is_ready() {
        // Arrange
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "First", "a"))
            .with_note(note("2", "Second", "b"))
            .build();
        let mut page = NotesPage::new(gateway);

        // Act
        page.load(&Session::new(TOKEN)).await.unwrap();

        // Assert
        assert_eq!(page.notes().len(), 2);
        assert_eq!(page.state(), &PageState::Ready);
    }

    #[tokio::test]
    async fn given_failing_list_when_loading_then_shows_generic_message() {
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_failure(Operation::ListNotes, GatewayError::Transport("down".into()))
            .build();
        let mut page = NotesPage::new(gateway);

        let err = page.load(&Session::new(TOKEN)).await.unwrap_err();

        assert_eq!(err.message, "Failed to load notes. Please try again.");
        assert_eq!(page.state().error(), Some(err.message.as_str()));
    }

    #[tokio::test]
    async fn given_blank_title_when_creating_then_no_request_is_sent() {
        let gateway = MockGateway::builder().with_token(TOKEN).build();
        let mut page = NotesPage::new(gateway.clone());

        let err = page
            .create(&Session::new(TOKEN), NoteDraft::new("   ", "body"))
            .await
            .unwrap_err();

        assert_eq!(err.source, DomainError::MissingTitle);
        assert_eq!(gateway.calls(Operation::CreateNote), 0);
    }

    #[tokio::test]
    async fn given_new_note_when_creating_then_prepended_and_selected() {
        // Arrange
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "Existing", ""))
            .build();
        let mut page = NotesPage::new(gateway);
        let session = Session::new(TOKEN);
        page.load(&session).await.unwrap();

        // Act
        let created = page
            .create(&session, NoteDraft::new("Fresh", "text").with_tag_input("a, b"))
            .await
            .unwrap();

        // Assert
        assert_eq!(page.notes().as_slice()[0].id, created.id);
        assert_eq!(page.selected_note().map(|n| n.title.as_str()), Some("Fresh"));
        assert_eq!(created.tags, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn given_edit_when_updating_then_replaces_local_entry() {
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "Old", "content"))
            .build();
        let mut page = NotesPage::new(gateway);
        let session = Session::new(TOKEN);
        page.load(&session).await.unwrap();
        let edit = NoteEdit {
            title: Some("New".to_string()),
            ..Default::default()
        };

        let updated = page.update(&session, "1", &edit).await.unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "content");
        assert_eq!(page.notes().get("1").unwrap().title, "New");
    }

    #[tokio::test]
    async fn given_unknown_id_when_updating_then_not_found() {
        let gateway = MockGateway::builder().with_token(TOKEN).build();
        let mut page = NotesPage::new(gateway);

        let err = page
            .update(&Session::new(TOKEN), "missing", &NoteEdit::default())
            .await
            .unwrap_err();

        assert_eq!(err.source, DomainError::NoteNotFound("missing".into()));
    }

    #[tokio::test]
    async fn given_selected_note_when_deleting_then_selection_is_cleared() {
        // Arrange
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "Doomed", ""))
            .with_note(note("2", "Kept", ""))
            .build();
        let mut page = NotesPage::new(gateway);
        let session = Session::new(TOKEN);
        page.load(&session).await.unwrap();
        page.select("1").unwrap();

        // Act
        page.delete(&session, "1").await.unwrap();

        // Assert
        assert!(page.selected_note().is_none());
        assert!(page.notes().get("1").is_none());
        assert_eq!(page.notes().len(), 1);
    }

    #[tokio::test]
    async fn given_search_and_tag_when_listing_visible_then_filters() {
        let mut tagged = note("1", "Rust tips", "");
        tagged.tags = vec!["dev".to_string()];
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(tagged)
            .with_note(note("2", "rust shopping", ""))
            .build();
        let mut page = NotesPage::new(gateway);
        page.load(&Session::new(TOKEN)).await.unwrap();

        page.set_query("RUST");
        assert_eq!(page.visible().len(), 2);

        page.set_tag_filter(TagFilter::Tag("dev".into()));
        let visible = page.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[tokio::test]
    async fn given_selected_note_with_content_when_summarizing_then_stores_summary() {
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "Long", "Lots of words"))
            .with_summary("Short.")
            .build();
        let mut page = NotesPage::new(gateway);
        let session = Session::new(TOKEN);
        page.load(&session).await.unwrap();
        page.select("1").unwrap();

        let summary = page.summarize_selected(&session).await.unwrap();

        assert_eq!(summary, "Short.");
        assert_eq!(page.summary(), Some("Short."));
    }

    #[tokio::test]
    async fn given_selected_note_without_content_when_summarizing_then_skips_request() {
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_note(note("1", "Empty", "  "))
            .build();
        let mut page = NotesPage::new(gateway.clone());
        let session = Session::new(TOKEN);
        page.load(&session).await.unwrap();
        page.select("1").unwrap();

        let err = page.summarize_selected(&session).await.unwrap_err();

        assert_eq!(err.source, DomainError::EmptyInput);
        assert_eq!(gateway.calls(Operation::Summarize), 0);
    }
}
