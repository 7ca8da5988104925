use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::domain::{Candidate, CandidateId, EvaluationStatus};

/// One row of the backend/internal field translation table.
#[derive(Clone, Copy)]
pub struct FieldMapping {
    pub internal: &'static str,
    pub backend: &'static str,
    /// Whether the backend accepts this field on `PUT /candidates/{id}`.
    pub outbound: bool,
    read: fn(&Candidate) -> String,
    write: fn(&mut Candidate, String),
}

impl fmt::Debug for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("internal", &self.internal)
            .field("backend", &self.backend)
            .field("outbound", &self.outbound)
            .finish()
    }
}

/// Translation table for every mutable or displayed candidate field. `id` is handled
/// separately because the backend sends it as a number.
pub const FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        internal: "name",
        backend: "name",
        outbound: true,
        read: |c| c.name.clone(),
        write: |c, v| c.name = v,
    },
    FieldMapping {
        internal: "summary",
        backend: "summary",
        outbound: true,
        read: |c| c.summary.clone(),
        write: |c, v| c.summary = v,
    },
    FieldMapping {
        internal: "jobAppliedFor",
        backend: "position",
        outbound: true,
        read: |c| c.job_applied_for.clone(),
        write: |c, v| c.job_applied_for = v,
    },
    FieldMapping {
        internal: "phone",
        backend: "phone_number",
        outbound: true,
        read: |c| c.phone.clone(),
        write: |c, v| c.phone = v,
    },
    FieldMapping {
        internal: "status",
        backend: "status",
        outbound: true,
        read: |c| c.status.as_str().to_string(),
        write: |c, v| c.status = EvaluationStatus::from(v),
    },
    FieldMapping {
        internal: "email",
        backend: "email",
        outbound: false,
        read: |c| c.email.clone(),
        write: |c, v| c.email = v,
    },
    FieldMapping {
        internal: "transcript",
        backend: "call_transcript",
        outbound: false,
        read: |c| c.transcript.clone(),
        write: |c, v| c.transcript = v,
    },
];

const BACKEND_ID_FIELD: &str = "id";

static BACKEND_BY_INTERNAL: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static INTERNAL_BY_BACKEND: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Backend field name for an internal field, if the field crosses the boundary.
pub fn backend_field(internal: &str) -> Option<&'static str> {
    BACKEND_BY_INTERNAL
        .get_or_init(|| {
            FIELD_MAPPINGS
                .iter()
                .map(|mapping| (mapping.internal, mapping.backend))
                .collect()
        })
        .get(internal)
        .copied()
}

/// Internal field name for a backend field.
pub fn internal_field(backend: &str) -> Option<&'static str> {
    INTERNAL_BY_BACKEND
        .get_or_init(|| {
            FIELD_MAPPINGS
                .iter()
                .map(|mapping| (mapping.backend, mapping.internal))
                .collect()
        })
        .get(backend)
        .copied()
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("backend candidate record must be a JSON object")]
    NotAnObject,
    #[error("backend candidate record has no usable id")]
    MissingId,
}

/// Translate a backend record into the internal model.
///
/// Absent or null fields become empty strings. Values are not validated, so an
/// unexpected status string survives as [`EvaluationStatus::Other`].
pub fn to_internal(raw: &Value) -> Result<Candidate, MappingError> {
    let record = raw.as_object().ok_or(MappingError::NotAnObject)?;
    let id = record
        .get(BACKEND_ID_FIELD)
        .and_then(scalar_to_string)
        .filter(|id| !id.is_empty())
        .ok_or(MappingError::MissingId)?;

    let mut candidate = Candidate {
        id: CandidateId(id),
        ..Candidate::default()
    };
    for mapping in FIELD_MAPPINGS {
        let value = record
            .get(mapping.backend)
            .and_then(scalar_to_string)
            .unwrap_or_default();
        (mapping.write)(&mut candidate, value);
    }

    Ok(candidate)
}

/// Build the full-replace body for `PUT /candidates/{id}`. Only fields the backend
/// accepts are emitted; `id` travels in the path.
pub fn to_backend_payload(candidate: &Candidate) -> Map<String, Value> {
    FIELD_MAPPINGS
        .iter()
        .filter(|mapping| mapping.outbound)
        .map(|mapping| {
            (
                mapping.backend.to_string(),
                Value::String((mapping.read)(candidate)),
            )
        })
        .collect()
}

/// Body for a status-only update.
pub fn status_payload(status: &EvaluationStatus) -> Map<String, Value> {
    let key = backend_field("status").unwrap_or("status");
    let mut payload = Map::new();
    payload.insert(key.to_string(), Value::String(status.as_str().to_string()));
    payload
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
