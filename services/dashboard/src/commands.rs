use crate::infra::DashboardContext;
use candidate_pipeline::config::AppConfig;
use candidate_pipeline::error::AppError;
use candidate_pipeline::pipeline::{
    CandidateBoard, CandidateId, DashboardView, JobFilter, Notification, OutreachOutcome,
    StatusFilter, StoreError,
};
use candidate_pipeline::telemetry::{self, LogSink};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Status tab to show: all, pending, pass, or fail
    #[arg(long, default_value = "all")]
    pub(crate) status: String,
    /// Exact position to show, or "all"
    #[arg(long, default_value = "all")]
    pub(crate) job: String,
    /// Override the candidate backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CandidateArgs {
    /// Candidate identifier as known by the backend
    pub(crate) id: String,
    /// Override the candidate backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

fn prepare(backend_url: Option<String>) -> Result<DashboardContext, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = backend_url {
        config.backend.candidate_api_url = url;
    }
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(DashboardContext::from_config(&config))
}

pub(crate) async fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        status,
        job,
        backend_url,
    } = args;
    let status = status.parse::<StatusFilter>()?;
    let context = prepare(backend_url)?;

    let mut board = CandidateBoard::new(context.store.list().await);
    board.set_filters(status, JobFilter::from(job.as_str()));

    render_dashboard(&board.view());
    render_notifications(&context.notifications.drain());
    Ok(())
}

pub(crate) async fn run_call(args: CandidateArgs) -> Result<(), AppError> {
    let context = prepare(args.backend_url)?;
    let result = context.store.get_by_id(&CandidateId(args.id)).await;
    let outcome = match result {
        Ok(candidate) => Ok(context.initiator.initiate_call(&candidate).await),
        Err(err) => Err(err),
    };
    finish(&context, outcome)
}

pub(crate) async fn run_schedule(args: CandidateArgs) -> Result<(), AppError> {
    let context = prepare(args.backend_url)?;
    let result = context.store.get_by_id(&CandidateId(args.id)).await;
    let outcome = match result {
        Ok(candidate) => Ok(context.initiator.schedule_interview(&candidate).await),
        Err(err) => Err(err),
    };
    finish(&context, outcome)
}

/// Print queued notifications before surfacing any lookup error.
fn finish(
    context: &DashboardContext,
    outcome: Result<OutreachOutcome, StoreError>,
) -> Result<(), AppError> {
    render_notifications(&context.notifications.drain());
    outcome.map(|_| ()).map_err(AppError::from)
}

fn render_dashboard(view: &DashboardView) {
    println!("Candidate dashboard");
    println!(
        "Total {} | Pending {} | Passed {} | Failed {}",
        view.stats.total, view.stats.pending, view.stats.passed, view.stats.failed
    );
    println!(
        "Showing: {} / {}",
        view.status_filter.label(),
        if view.job_filter == JobFilter::All {
            "All Positions"
        } else {
            view.job_filter.as_str()
        }
    );
    println!(
        "Positions: {}",
        view.job_options.get(1..).unwrap_or_default().join(", ")
    );

    if view.rows.is_empty() {
        println!("\nNo candidates found matching the current filters.");
        return;
    }

    println!();
    for row in &view.rows {
        let action = match row.action {
            Some(action) => format!(" [{}]", action.label()),
            None => String::new(),
        };
        println!(
            "- {} | {} | {} | {}{}",
            row.candidate.id,
            row.candidate.name,
            row.candidate.job_applied_for,
            row.status_label,
            action
        );
    }
}

fn render_notifications(notifications: &[Notification]) {
    for notification in notifications {
        println!("[{}] {}", notification.level.label(), notification.message);
    }
}
