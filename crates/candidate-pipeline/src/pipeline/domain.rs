use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for backend candidates. Always string-typed on this side of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Screening outcome recorded against a candidate.
///
/// The backend is not trusted to stay inside the enumerated set, so any other value is
/// carried verbatim in `Other` and rendered as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    Pass,
    Fail,
    Other(String),
}

impl EvaluationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire value understood by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Other(raw) => raw,
        }
    }

    /// Human facing badge text.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for EvaluationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EvaluationStatus> for String {
    fn from(value: EvaluationStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal candidate model shared by the dashboard, detail form, and outreach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub summary: String,
    pub job_applied_for: String,
    pub status: EvaluationStatus,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub transcript: String,
}

impl Candidate {
    /// First token of the display name, used when greeting the candidate on a call.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: EvaluationStatus = serde_json::from_str("\"on_hold\"").expect("decodes");
        assert_eq!(status, EvaluationStatus::Other("on_hold".to_string()));
        assert_eq!(status.label(), "on_hold");
        assert_eq!(serde_json::to_string(&status).expect("encodes"), "\"on_hold\"");
    }

    #[test]
    fn labels_follow_badge_text() {
        assert_eq!(EvaluationStatus::Pending.label(), "Pending");
        assert_eq!(EvaluationStatus::Pass.label(), "Pass");
        assert_eq!(EvaluationStatus::Fail.label(), "Fail");
    }

    #[test]
    fn candidate_serializes_with_internal_field_names() {
        let candidate = Candidate {
            id: CandidateId::new("7"),
            name: "Ada Lovelace".to_string(),
            job_applied_for: "Backend Developer".to_string(),
            status: EvaluationStatus::Pass,
            ..Candidate::default()
        };

        let value = serde_json::to_value(&candidate).expect("encodes");
        assert_eq!(value["id"], "7");
        assert_eq!(value["jobAppliedFor"], "Backend Developer");
        assert_eq!(value["status"], "pass");
        assert_eq!(candidate.first_name(), "Ada");
    }
}
