use std::sync::Arc;

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::domain::{Candidate, CandidateId, EvaluationStatus};
use super::mapping::{status_payload, to_backend_payload, to_internal, MappingError};
use super::notify::{Notification, Notifier};

/// Failure reported by the candidate backend client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("candidate {0} not found")]
    NotFound(CandidateId),
    #[error("candidate backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("candidate backend responded with status {status}")]
    Rejected { status: u16 },
    #[error("candidate backend returned an unreadable record: {0}")]
    Decode(String),
    #[error("invalid candidate backend url: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<MappingError> for StoreError {
    fn from(value: MappingError) -> Self {
        StoreError::Decode(value.to_string())
    }
}

/// HTTP client for the candidate backend.
///
/// Every operation that can fail emits exactly one user-facing notification. `list`
/// swallows its error and returns an empty list; the single-record operations notify and
/// then hand the error back to the caller.
#[derive(Clone)]
pub struct CandidateStore {
    http: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl CandidateStore {
    pub fn new(base_url: impl Into<String>, notifier: Arc<dyn Notifier>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            notifier,
        }
    }

    /// Fetch every candidate. Failures degrade to an empty list.
    pub async fn list(&self) -> Vec<Candidate> {
        match self.fetch_all().await {
            Ok(candidates) => {
                debug!(count = candidates.len(), "fetched candidate list");
                candidates
            }
            Err(err) => {
                // Hides backend outages from callers; the notification is the only signal.
                warn!(error = %err, "candidate list unavailable, showing empty list");
                self.notifier
                    .notify(Notification::error("Failed to fetch candidates."));
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &CandidateId) -> Result<Candidate, StoreError> {
        match self.fetch_one(id).await {
            Ok(candidate) => Ok(candidate),
            Err(err) => {
                warn!(%id, error = %err, "candidate lookup failed");
                let message = match &err {
                    StoreError::NotFound(_) => "Candidate not found".to_string(),
                    other => format!("Failed to load candidate: {other}"),
                };
                self.notifier.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    /// Full-replace update. The returned record always carries `id`, whatever the caller
    /// put in `candidate.id`.
    pub async fn update(
        &self,
        id: &CandidateId,
        candidate: &Candidate,
    ) -> Result<Candidate, StoreError> {
        let payload = to_backend_payload(candidate);
        let updated = self.put(id, payload).await;
        self.report_write(id, updated, |candidate| {
            format!("{}'s information updated", candidate.name)
        })
    }

    pub async fn update_status(
        &self,
        id: &CandidateId,
        status: &EvaluationStatus,
    ) -> Result<Candidate, StoreError> {
        let payload = status_payload(status);
        let updated = self.put(id, payload).await;
        self.report_write(id, updated, |candidate| {
            format!("{}'s status updated to {}", candidate.name, status)
        })
    }

    async fn fetch_all(&self) -> Result<Vec<Candidate>, StoreError> {
        let response = self
            .http
            .get(self.url("/candidates/"))
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let records: Vec<Value> = accept(response, None)?
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;

        records
            .iter()
            .map(|record| to_internal(record).map_err(StoreError::from))
            .collect()
    }

    async fn fetch_one(&self, id: &CandidateId) -> Result<Candidate, StoreError> {
        let response = self
            .http
            .get(self.record_url(id)?)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let record: Value = accept(response, Some(id))?
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        Ok(to_internal(&record)?)
    }

    async fn put(
        &self,
        id: &CandidateId,
        payload: Map<String, Value>,
    ) -> Result<Candidate, StoreError> {
        let response = self
            .http
            .put(self.record_url(id)?)
            .json(&payload)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        let record: Value = accept(response, Some(id))?
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        Ok(to_internal(&record)?)
    }

    fn report_write(
        &self,
        id: &CandidateId,
        result: Result<Candidate, StoreError>,
        success_message: impl FnOnce(&Candidate) -> String,
    ) -> Result<Candidate, StoreError> {
        match result {
            Ok(mut candidate) => {
                if candidate.id != *id {
                    warn!(%id, returned = %candidate.id, "backend echoed a different id, keeping target id");
                    candidate.id = id.clone();
                }
                self.notifier
                    .notify(Notification::success(success_message(&candidate)));
                Ok(candidate)
            }
            Err(err) => {
                warn!(%id, error = %err, "candidate update failed");
                let message = match &err {
                    StoreError::NotFound(_) => "Candidate not found".to_string(),
                    other => format!("Failed to update candidate: {other}"),
                };
                self.notifier.notify(Notification::error(message));
                Err(err)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/candidates/{id}` with the id percent-encoded as a single path segment.
    fn record_url(&self, id: &CandidateId) -> Result<Url, StoreError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| StoreError::InvalidUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["candidates", id.as_str()]);
        Ok(url)
    }
}

fn accept(response: Response, id: Option<&CandidateId>) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound(id.clone())),
        _ => Err(StoreError::Rejected {
            status: status.as_u16(),
        }),
    }
}
