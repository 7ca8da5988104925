//! Candidate screening pipeline: backend field mapping, the candidate store client,
//! outreach (calls and interview scheduling), and the dashboard filter/aggregation engine.

pub mod board;
pub mod domain;
pub mod form;
pub mod mapping;
pub mod notify;
pub mod outreach;
pub mod store;

pub use board::{
    aggregate, filter_candidates, job_options, CandidateAction, CandidateBoard, CandidateRow,
    DashboardView, FilterParseError, JobFilter, PipelineStats, StatusFilter,
};
pub use domain::{Candidate, CandidateId, EvaluationStatus};
pub use form::{validate, CandidateEdit, ValidationError};
pub use mapping::{to_backend_payload, to_internal, MappingError, FIELD_MAPPINGS};
pub use notify::{
    Notification, NotificationLevel, Notifier, RecordingNotifier,
};
pub use outreach::{
    normalize_phone, CallScript, Initiator, InterviewScheduler, OutboundCallRequest,
    OutreachOutcome, ScheduleError, StubScheduler,
};
pub use store::{CandidateStore, StoreError};
