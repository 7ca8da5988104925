use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Candidate, CandidateId};
use super::notify::{Notification, Notifier};

/// Strip everything except ASCII digits and `+` so the number can be dialled.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '+')
        .collect()
}

/// Persona and limits used to script the screening call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallScript {
    pub interviewer_name: String,
    pub company_name: String,
    pub max_questions: u8,
    pub max_minutes: u8,
}

impl Default for CallScript {
    fn default() -> Self {
        Self {
            interviewer_name: "Stuart".to_string(),
            company_name: "VoiceCo".to_string(),
            max_questions: 3,
            max_minutes: 10,
        }
    }
}

impl CallScript {
    pub fn prompt(&self, position: &str) -> String {
        format!(
            "You are {interviewer}, an interviewer for the {position} position. Conduct a \
             professional interview with no more than {questions} questions, for a maximum of \
             {minutes} minutes. Try to keep all responses short and concise, and sound as much \
             like a human as possible.",
            interviewer = self.interviewer_name,
            questions = self.max_questions,
            minutes = self.max_minutes,
        )
    }

    pub fn first_message(&self, first_name: &str, position: &str) -> String {
        format!(
            "Hello {first_name}, I'm {interviewer} from {company} and I'm calling you regarding \
             the {position} role. Do you have a moment for a quick phone screening?",
            interviewer = self.interviewer_name,
            company = self.company_name,
        )
    }
}

/// Body of `POST /outbound-call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundCallRequest {
    pub prompt: String,
    pub first_message: String,
    pub number: String,
    pub candidate_id: CandidateId,
}

impl OutboundCallRequest {
    pub fn for_candidate(candidate: &Candidate, script: &CallScript) -> Self {
        Self {
            prompt: script.prompt(&candidate.job_applied_for),
            first_message: script.first_message(candidate.first_name(), &candidate.job_applied_for),
            number: normalize_phone(&candidate.phone),
            candidate_id: candidate.id.clone(),
        }
    }
}

/// Result of a fire-and-forget outreach action. Errors never escape the initiator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutreachOutcome {
    Accepted,
    Failed { reason: String },
}

impl OutreachOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, OutreachOutcome::Accepted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("scheduling service unavailable: {0}")]
    Unavailable(String),
}

/// Extension point for a real calendar integration.
#[async_trait]
pub trait InterviewScheduler: Send + Sync {
    async fn schedule(&self, candidate: &Candidate) -> Result<(), ScheduleError>;
}

/// Placeholder scheduler: waits a fixed delay and always succeeds. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct StubScheduler {
    delay: Duration,
}

impl StubScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl InterviewScheduler for StubScheduler {
    async fn schedule(&self, candidate: &Candidate) -> Result<(), ScheduleError> {
        tokio::time::sleep(self.delay).await;
        debug!(id = %candidate.id, "stub interview scheduled");
        Ok(())
    }
}

/// Triggers screening calls and interview scheduling for a single candidate.
///
/// Neither action changes candidate status or the cached list.
#[derive(Clone)]
pub struct Initiator {
    http: Client,
    call_url: String,
    script: CallScript,
    scheduler: Arc<dyn InterviewScheduler>,
    notifier: Arc<dyn Notifier>,
}

impl Initiator {
    pub fn new(
        call_url: impl Into<String>,
        script: CallScript,
        scheduler: Arc<dyn InterviewScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            http: Client::new(),
            call_url: call_url.into(),
            script,
            scheduler,
            notifier,
        }
    }

    pub async fn initiate_call(&self, candidate: &Candidate) -> OutreachOutcome {
        let request = OutboundCallRequest::for_candidate(candidate, &self.script);
        debug!(id = %candidate.id, number = %request.number, "sending outbound call request");

        let outcome = match self.http.post(&self.call_url).json(&request).send().await {
            Ok(response) if response.status().is_success() => OutreachOutcome::Accepted,
            Ok(response) => OutreachOutcome::Failed {
                reason: format!("HTTP error, status {}", response.status().as_u16()),
            },
            Err(err) => OutreachOutcome::Failed {
                reason: err.to_string(),
            },
        };

        match &outcome {
            OutreachOutcome::Accepted => {
                info!(id = %candidate.id, "outbound call accepted");
                self.notifier.notify(Notification::success(format!(
                    "Call request to {} sent successfully",
                    candidate.name
                )));
            }
            OutreachOutcome::Failed { reason } => {
                warn!(id = %candidate.id, %reason, "outbound call failed");
                self.notifier.notify(Notification::error(format!(
                    "Failed to connect call: {reason}"
                )));
            }
        }

        outcome
    }

    pub async fn schedule_interview(&self, candidate: &Candidate) -> OutreachOutcome {
        match self.scheduler.schedule(candidate).await {
            Ok(()) => {
                self.notifier.notify(Notification::success(format!(
                    "Interview scheduling initiated for {}",
                    candidate.name
                )));
                OutreachOutcome::Accepted
            }
            Err(err) => {
                warn!(id = %candidate.id, error = %err, "interview scheduling failed");
                self.notifier.notify(Notification::error(format!(
                    "Failed to schedule interview: {err}"
                )));
                OutreachOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
