// src/application/summaries_page.rs
use chrono::Utc;
use tracing::{info, instrument};

use crate::application::page_state::{LocalIds, PageState, ViewError};
use crate::application::AiGateway;
use crate::domain::{DomainError, Session, SummaryRecord};

const SUMMARIZE_FAILED: &str = "Failed to summarize text. Please try again.";

/// Summaries produced in this session, newest first. Nothing here is persisted.
pub struct SummariesPage<G> {
    gateway: G,
    summaries: Vec<SummaryRecord>,
    ids: LocalIds,
    state: PageState,
}

impl<G: AiGateway> SummariesPage<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            summaries: Vec::new(),
            ids: LocalIds::default(),
            state: PageState::Idle,
        }
    }

    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub async fn summarize(
        &mut self,
        session: &Session,
        text: &str,
    ) -> Result<&SummaryRecord, ViewError> {
        if text.trim().is_empty() {
            return Err(ViewError::record(
                &mut self.state,
                DomainError::EmptyInput,
                SUMMARIZE_FAILED,
            ));
        }
        self.state = PageState::Loading;
        let summary = self
            .gateway
            .summarize(session, text)
            .await
            .map_err(|e| ViewError::record(&mut self.state, e.into(), SUMMARIZE_FAILED))?;

        let now = Utc::now();
        let record = SummaryRecord {
            id: self.ids.next(now),
            original_text: text.to_string(),
            summary,
            created_at: now,
        };
        info!(id = record.id, "Summary created");
        self.summaries.insert(0, record);
        self.state = PageState::Ready;
        Ok(&self.summaries[0])
    }

    /// Returns whether a summary with `id` existed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.summaries.len();
        self.summaries.retain(|s| s.id != id);
        before != self.summaries.len()
    }

    pub fn summaries(&self) -> &[SummaryRecord] {
        &self.summaries
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GatewayError;
    use crate::util::testing::{MockGateway, Operation};

    const TOKEN: &str = "t";

    #[tokio::test]
    async fn given_text_when_summarizing_then_newest_summary_comes_first() {
        // Arrange
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_summary("gist")
            .build();
        let mut page = SummariesPage::new(gateway);
        let session = Session::new(TOKEN);

        // Act
        let first = page.summarize(&session, "first text").await.unwrap().id;
        let second = page.summarize(&session, "second text").await.unwrap().id;

        // Assert
        let ids: Vec<u64> = page.summaries().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(page.summaries()[0].original_text, "second text");
        assert_eq!(page.summaries()[0].summary, "gist");
    }

    #[tokio::test]
    async fn given_blank_text_when_summarizing_then_no_request_is_sent() {
        let gateway = MockGateway::builder().with_token(TOKEN).build();
        let mut page = SummariesPage::new(gateway.clone());

        let result = page.summarize(&Session::new(TOKEN), " \n ").await;

        assert!(result.is_err());
        assert_eq!(gateway.calls(Operation::Summarize), 0);
        assert!(page.summaries().is_empty());
    }

    #[tokio::test]
    async fn given_service_failure_when_summarizing_then_state_shows_fallback() {
        let gateway = MockGateway::builder()
            .with_token(TOKEN)
            .with_failure(
                Operation::Summarize,
                GatewayError::Service {
                    status: 502,
                    message: None,
                },
            )
            .build();
        let mut page = SummariesPage::new(gateway);

        let err = page.summarize(&Session::new(TOKEN), "text").await.unwrap_err();

        assert_eq!(err.message, "Failed to summarize text. Please try again.");
        assert!(page.summaries().is_empty());
    }

    #[tokio::test]
    async fn given_existing_summary_when_deleting_then_removed() {
        let gateway = MockGateway::builder().with_token(TOKEN).with_summary("s").build();
        let mut page = SummariesPage::new(gateway);
        let id = page.summarize(&Session::new(TOKEN), "x").await.unwrap().id;

        assert!(page.delete(id));
        assert!(!page.delete(id));
        assert!(page.summaries().is_empty());
    }
}
