use api_types::loan::LoanApplicationPayload;
use reqwest::StatusCode;
use thiserror::Error;

use crate::{
    app::dashboard::DashboardController,
    client::{Client, ClientError, CreateOutcome},
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Network(#[from] ClientError),
    #[error("application rejected with status {status}: {message}")]
    Application { status: StatusCode, message: String },
}

/// Creates the application, then refreshes the dashboard.
///
/// Steps run one after the other. Nothing is refreshed unless the backend
/// accepted the application. A failed refresh does not fail the submission.
pub async fn submit_application(
    client: &Client,
    dashboard: &DashboardController,
    payload: &LoanApplicationPayload,
) -> Result<(), SubmitError> {
    match client.create_loan(payload).await? {
        CreateOutcome::Accepted => {}
        CreateOutcome::Rejected { status, message } => {
            return Err(SubmitError::Application { status, message });
        }
    }

    tracing::info!(applicant = %payload.applicant_name, "loan application submitted");
    dashboard.refresh().await;
    Ok(())
}
