use api_types::loan::{LoanApplicationPayload, LoanRecord};
use reqwest::{StatusCode, Url};

use crate::error::{AppError, Result};

const LOANS_PATH: &str = "api/v1/loans";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

/// Result of a create call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Accepted,
    Rejected { status: StatusCode, message: String },
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(LOANS_PATH)
            .map_err(|err| ClientError::Endpoint(err.to_string()))
    }

    /// `GET /api/v1/loans`. Any non-success status or malformed body is a
    /// network error.
    pub async fn list_loans(&self) -> std::result::Result<Vec<LoanRecord>, ClientError> {
        let endpoint = self.endpoint()?;
        tracing::debug!(%endpoint, "listing loans");

        let res = self
            .http
            .get(endpoint)
            .send()
            .await?
            .error_for_status()?;

        Ok(res.json::<Vec<LoanRecord>>().await?)
    }

    /// `POST /api/v1/loans`. A non-success status is reported as
    /// [`CreateOutcome::Rejected`], not as an error. The success body is not
    /// read.
    pub async fn create_loan(
        &self,
        payload: &LoanApplicationPayload,
    ) -> std::result::Result<CreateOutcome, ClientError> {
        let endpoint = self.endpoint()?;
        tracing::debug!(%endpoint, applicant = %payload.applicant_name, "creating loan");

        let res = self.http.post(endpoint).json(payload).send().await?;

        let status = res.status();
        if status.is_success() {
            return Ok(CreateOutcome::Accepted);
        }

        let message = res
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Ok(CreateOutcome::Rejected { status, message })
    }
}
