use std::sync::{Arc, PoisonError, RwLock};

use api_types::loan::LoanRecord;
use chrono::{DateTime, Local};

use crate::client::Client;

/// The records last fetched from the backend.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub records: Arc<[LoanRecord]>,
    pub fetched_at: Option<DateTime<Local>>,
}

/// Owns the loan record snapshot.
///
/// Clones share the same snapshot, so a refresh running on a background task
/// is visible to the renderer. Each refresh swaps the whole snapshot under the
/// write lock; readers get either the previous list or the new one.
#[derive(Debug, Clone)]
pub struct DashboardController {
    client: Client,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl DashboardController {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn records(&self) -> Arc<[LoanRecord]> {
        self.snapshot().records
    }

    /// Re-fetches the list. On failure the current snapshot is kept and the
    /// error is logged. Returns whether the snapshot was replaced.
    pub async fn refresh(&self) -> bool {
        match self.client.list_loans().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "loan list refreshed");
                let next = Snapshot {
                    records: records.into(),
                    fetched_at: Some(Local::now()),
                };
                *self
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = next;
                true
            }
            Err(err) => {
                tracing::warn!(%err, "error fetching loans");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{MockBackend, unreachable_base_url};

    #[tokio::test]
    async fn starts_empty() {
        let client = Client::new(&unreachable_base_url().await).unwrap();
        let dashboard = DashboardController::new(client);
        assert!(dashboard.records().is_empty());
        assert!(dashboard.snapshot().fetched_at.is_none());
    }

    #[tokio::test]
    async fn refresh_replaces_whole_snapshot() {
        let backend = MockBackend::start().await;
        backend.set_records(vec![json!({ "id": 1 }), json!({ "id": 2 })]);
        let dashboard = DashboardController::new(Client::new(&backend.base_url()).unwrap());

        assert!(dashboard.refresh().await);
        assert_eq!(dashboard.records().len(), 2);

        backend.set_records(vec![json!({ "id": 9, "applicant_name": "Ann Lee" })]);
        assert!(dashboard.refresh().await);

        let records = dashboard.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].applicant_name.as_deref(), Some("Ann Lee"));
        assert!(dashboard.snapshot().fetched_at.is_some());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_last_good_snapshot() {
        let backend = MockBackend::start().await;
        backend.set_records(vec![json!({ "id": 1 })]);
        let dashboard = DashboardController::new(Client::new(&backend.base_url()).unwrap());
        dashboard.refresh().await;
        let before = dashboard.snapshot();

        backend.fail_list(true);
        assert!(!dashboard.refresh().await);

        let after = dashboard.snapshot();
        assert_eq!(after.records.len(), 1);
        assert_eq!(after.fetched_at, before.fetched_at);
    }

    #[tokio::test]
    async fn clones_share_the_snapshot() {
        let backend = MockBackend::start().await;
        backend.set_records(vec![json!({ "id": 1 })]);
        let dashboard = DashboardController::new(Client::new(&backend.base_url()).unwrap());
        let background = dashboard.clone();

        background.refresh().await;
        assert_eq!(dashboard.records().len(), 1);
    }
}
