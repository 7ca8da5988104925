use candidate_pipeline::config::AppConfig;
use candidate_pipeline::pipeline::{
    CandidateBoard, CandidateStore, Initiator, RecordingNotifier, StubScheduler,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Collaborators shared by every dashboard request.
#[derive(Clone)]
pub(crate) struct DashboardContext {
    pub(crate) store: CandidateStore,
    pub(crate) initiator: Initiator,
    pub(crate) board: Arc<RwLock<CandidateBoard>>,
    pub(crate) notifications: RecordingNotifier,
}

impl DashboardContext {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        let notifications = RecordingNotifier::new();
        let store = CandidateStore::new(
            config.backend.candidate_api_url.clone(),
            Arc::new(notifications.clone()),
        );
        let initiator = Initiator::new(
            config.outreach.call_url.clone(),
            config.outreach.call_script(),
            Arc::new(StubScheduler::new(config.outreach.schedule_delay())),
            Arc::new(notifications.clone()),
        );

        Self {
            store,
            initiator,
            board: Arc::new(RwLock::new(CandidateBoard::default())),
            notifications,
        }
    }
}
