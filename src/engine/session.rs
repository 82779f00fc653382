//! The analysis session: every piece of application state plus the
//! submit / poll / fetch-results state machine.
//!
//! The session never performs I/O. It queues [`SessionCommand`]s for the
//! engine to execute and consumes the replies through the `on_*` methods.
//! Time is passed in explicitly, so the poll deadline can be driven from
//! tests without sleeping.

use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::{Display, EnumIter};

use crate::config::{API, ApiSettings};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{ApiError, SubmittedJob};
use crate::domain::{
    AnalysisForm, AnalysisRequest, AnalysisResults, Job, JobId, JobSnapshot, JobStatus,
    TickerGroups,
};
use crate::utils::app_time::AppInstant;

/// The three mutually exclusive tabs of the analysis page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ActiveView {
    #[strum(to_string = "Configuration")]
    Form,
    #[strum(to_string = "Process Status")]
    Status,
    #[strum(to_string = "Analysis Results")]
    Results,
}

/// Work the engine must carry out on behalf of the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    FetchTickers,
    Submit(AnalysisRequest),
    FetchStatus(JobId),
    FetchResults(JobId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing message, shown as a transient toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    NotRequested,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub poll_interval: Duration,
    pub max_consecutive_poll_errors: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: ApiSettings::poll_interval(),
            max_consecutive_poll_errors: API.polling.max_consecutive_errors,
        }
    }
}

/// The one and only status poll. Replacing it is how a new job
/// takes over from an old one.
#[derive(Debug, Clone)]
struct PollSchedule {
    job_id: JobId,
    next_due: AppInstant,
    in_flight: bool,
    consecutive_errors: u32,
}

pub struct AnalysisSession {
    config: SessionConfig,

    /// Form inputs, bound directly to the widgets
    pub form: AnalysisForm,

    tickers: TickerGroups,
    catalog_state: CatalogState,

    /// Create call in flight
    submitting: bool,
    /// Request being submitted, promoted to `submitted` on success
    pending_submission: Option<AnalysisRequest>,
    /// Request behind the current job, used by the results summary
    submitted: Option<AnalysisRequest>,

    job: Option<Job>,
    poll: Option<PollSchedule>,
    /// Set when repeated transport errors stopped the poll
    polling_halted: bool,

    /// Job whose results have been requested (at most once per job)
    results_requested_for: Option<JobId>,
    results: Option<Arc<AnalysisResults>>,

    active_view: ActiveView,

    commands: VecDeque<SessionCommand>,
    notices: Vec<Notice>,
}

impl AnalysisSession {
    pub fn new(config: SessionConfig, today: NaiveDate) -> Self {
        Self {
            config,
            form: AnalysisForm::new(today),
            tickers: TickerGroups::default(),
            catalog_state: CatalogState::NotRequested,
            submitting: false,
            pending_submission: None,
            submitted: None,
            job: None,
            poll: None,
            polling_halted: false,
            results_requested_for: None,
            results: None,
            active_view: ActiveView::Form,
            commands: VecDeque::new(),
            notices: Vec::new(),
        }
    }

    // --- ACCESSORS ---

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn ticker_groups(&self) -> &TickerGroups {
        &self.tickers
    }

    /// Form for editing alongside the (read-only) ticker catalog
    pub fn edit_form(&mut self) -> (&mut AnalysisForm, &TickerGroups) {
        (&mut self.form, &self.tickers)
    }

    pub fn catalog_state(&self) -> CatalogState {
        self.catalog_state
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn current_job_id(&self) -> Option<&JobId> {
        self.job.as_ref().map(|job| &job.id)
    }

    pub fn results(&self) -> Option<&Arc<AnalysisResults>> {
        self.results.as_ref()
    }

    pub fn submitted_request(&self) -> Option<&AnalysisRequest> {
        self.submitted.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// A status poll is scheduled or in flight
    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    pub fn polling_halted(&self) -> bool {
        self.polling_halted
    }

    pub fn is_awaiting_results(&self) -> bool {
        self.results.is_none()
            && self.results_requested_for.is_some()
            && self.results_requested_for.as_ref() == self.current_job_id()
    }

    /// Anything the user is still waiting on
    pub fn is_loading(&self) -> bool {
        self.submitting || self.poll.is_some() || self.is_awaiting_results()
    }

    pub fn can_view(&self, view: ActiveView) -> bool {
        match view {
            ActiveView::Form => true,
            ActiveView::Status => self.job.is_some(),
            ActiveView::Results => self.results.is_some(),
        }
    }

    /// Switch tabs. Refused (and ignored) when the target has nothing to show.
    pub fn set_active_view(&mut self, view: ActiveView) -> bool {
        if !self.can_view(view) {
            return false;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && self.active_view != view {
            log::info!("[view] {} -> {}", self.active_view, view);
        }

        self.active_view = view;
        true
    }

    pub fn take_commands(&mut self) -> Vec<SessionCommand> {
        self.commands.drain(..).collect()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Surface a message that did not originate in the state machine
    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice::new(level, text));
    }

    // --- TICKER CATALOG ---

    /// Request the ticker universe. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.catalog_state != CatalogState::NotRequested {
            return;
        }
        self.catalog_state = CatalogState::Loading;
        self.commands.push_back(SessionCommand::FetchTickers);
    }

    pub fn on_tickers(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(available) => {
                self.tickers = TickerGroups::partition(&available);
                self.catalog_state = CatalogState::Ready;
                log::info!("Loaded {} available tickers", available.len());
            }
            Err(e) => {
                log::error!("Error fetching tickers: {}", e);
                self.tickers = TickerGroups::default();
                self.catalog_state = CatalogState::Failed;
                self.notify(NoticeLevel::Error, "Failed to load the available tickers");
            }
        }
    }

    // --- SUBMISSION ---

    /// Validate the form and queue the create call.
    /// Returns false when nothing was sent.
    pub fn submit(&mut self, today: NaiveDate) -> bool {
        if self.submitting {
            return false;
        }

        let request = match self.form.to_request(today) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Submission refused locally: {}", e);
                self.notify(NoticeLevel::Error, e.to_string());
                return false;
            }
        };

        self.submitting = true;
        self.discard_results();
        // The old job is superseded: late status replies for it are ignored from here on
        self.poll = None;
        self.pending_submission = Some(request.clone());
        self.commands.push_back(SessionCommand::Submit(request));
        true
    }

    pub fn on_submitted(&mut self, result: Result<SubmittedJob, ApiError>, now: AppInstant) {
        self.submitting = false;
        let request = self.pending_submission.take();

        match result {
            Ok(SubmittedJob { id, snapshot }) => {
                log::info!("🚀 Analysis {} created ({})", id, snapshot.status);

                // Replaces any previous job together with its poll schedule
                self.job = Some(Job::new(id, snapshot));
                self.submitted = request;
                self.discard_results();
                self.poll = None;
                self.polling_halted = false;
                self.active_view = ActiveView::Status;
                self.notify(NoticeLevel::Info, "Analysis started");
                self.after_snapshot(now);
            }
            Err(e) => {
                log::error!("Error submitting analysis: {}", e);
                self.notify(
                    NoticeLevel::Error,
                    format!("Failed to start the analysis: {}", e),
                );
                self.restore_poll(now);
            }
        }
    }

    fn discard_results(&mut self) {
        self.results = None;
        self.results_requested_for = None;
        if self.active_view == ActiveView::Results {
            self.active_view = ActiveView::Form;
        }
    }

    /// Pick the previous job back up after its replacement was rejected
    fn restore_poll(&mut self, now: AppInstant) {
        let Some(job) = self.job.as_ref() else {
            return;
        };
        if self.polling_halted || !job.status().is_active() || self.poll.is_some() {
            return;
        }
        self.poll = Some(PollSchedule {
            job_id: job.id.clone(),
            next_due: now,
            in_flight: false,
            consecutive_errors: 0,
        });
    }

    // --- POLLING ---

    /// Fire the status request when the deadline has passed.
    /// Returns the time left until the next deadline, if one is pending.
    pub fn tick(&mut self, now: AppInstant) -> Option<Duration> {
        let poll = self.poll.as_mut()?;
        if poll.in_flight {
            return None;
        }

        if now >= poll.next_due {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_poll_ticks {
                log::debug!("[poll] status check for {}", poll.job_id);
            }

            poll.in_flight = true;
            self.commands
                .push_back(SessionCommand::FetchStatus(poll.job_id.clone()));
            None
        } else {
            Some(poll.next_due - now)
        }
    }

    pub fn on_status(
        &mut self,
        job_id: &JobId,
        result: Result<JobSnapshot, ApiError>,
        now: AppInstant,
    ) {
        let expected = self
            .poll
            .as_ref()
            .map(|poll| poll.in_flight && &poll.job_id == job_id)
            .unwrap_or(false);
        if !expected {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_stale_replies {
                log::debug!("Ignoring status reply for stale job {}", job_id);
            }
            return;
        }

        match result {
            Ok(snapshot) => {
                if let Some(poll) = self.poll.as_mut() {
                    poll.in_flight = false;
                    poll.consecutive_errors = 0;
                }
                if let Some(job) = self.job.as_mut() {
                    job.apply(snapshot);
                }
                self.after_snapshot(now);
            }
            Err(e) => {
                // Transport trouble: retry on the next tick, up to the cap
                log::warn!("Error checking status of {}: {}", job_id, e);

                let max_errors = self.config.max_consecutive_poll_errors;
                let interval = self.config.poll_interval;
                let halt = match self.poll.as_mut() {
                    Some(poll) => {
                        poll.in_flight = false;
                        poll.consecutive_errors += 1;
                        poll.next_due = now + interval;
                        max_errors > 0 && poll.consecutive_errors >= max_errors
                    }
                    None => false,
                };

                if halt {
                    log::error!(
                        "Polling for {} halted after {} consecutive errors (last: {})",
                        job_id,
                        max_errors,
                        e
                    );
                    self.poll = None;
                    self.polling_halted = true;
                    self.notify(NoticeLevel::Error, "Lost contact with the analysis service");
                }
            }
        }
    }

    /// Restart a poll that was halted by transport errors. The first check is immediate.
    pub fn resume_polling(&mut self, now: AppInstant) -> bool {
        let Some(job) = self.job.as_ref() else {
            return false;
        };
        if !self.polling_halted || !job.status().is_active() {
            return false;
        }

        log::info!("Resuming status polling for {}", job.id);
        self.poll = Some(PollSchedule {
            job_id: job.id.clone(),
            next_due: now,
            in_flight: false,
            consecutive_errors: 0,
        });
        self.polling_halted = false;
        true
    }

    /// React to the job's latest status: keep polling, fetch results, or stop.
    fn after_snapshot(&mut self, now: AppInstant) {
        let Some(job) = self.job.as_ref() else {
            return;
        };
        let job_id = job.id.clone();
        let status = job.status();

        match status {
            JobStatus::Pending | JobStatus::Running => {
                let next_due = now + self.config.poll_interval;
                match self.poll.as_mut() {
                    Some(poll) if poll.job_id == job_id => {
                        poll.next_due = next_due;
                        poll.in_flight = false;
                    }
                    _ => {
                        self.poll = Some(PollSchedule {
                            job_id,
                            next_due,
                            in_flight: false,
                            consecutive_errors: 0,
                        });
                    }
                }
            }
            JobStatus::Completed => {
                self.poll = None;
                if self.results_requested_for.as_ref() != Some(&job_id) {
                    log::info!("✅ Analysis {} completed, fetching results", job_id);
                    self.notify(NoticeLevel::Success, "Analysis completed successfully");
                    self.results_requested_for = Some(job_id.clone());
                    self.commands.push_back(SessionCommand::FetchResults(job_id));
                }
            }
            JobStatus::Failed => {
                self.poll = None;
                let message = job.snapshot.message_or_empty().to_string();
                log::error!("❌ Analysis {} failed: {}", job_id, message);
                self.notify(NoticeLevel::Error, format!("Analysis failed: {}", message));
            }
        }
    }

    // --- RESULTS ---

    pub fn on_results(&mut self, job_id: &JobId, result: Result<AnalysisResults, ApiError>) {
        let expected = self.results_requested_for.as_ref() == Some(job_id)
            && self.current_job_id() == Some(job_id);
        if !expected {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_stale_replies {
                log::debug!("Ignoring results for stale job {}", job_id);
            }
            return;
        }

        match result {
            Ok(results) => {
                let metrics = &results.optimal_metrics;
                if !metrics.weights_are_normalized() {
                    log::warn!(
                        "Weights for {} sum to {:.4}, expected 1.0",
                        job_id,
                        metrics.weight_sum()
                    );
                }
                self.results = Some(Arc::new(results));
                self.active_view = ActiveView::Results;
            }
            Err(e) => {
                log::error!("Error fetching results for {}: {}", job_id, e);
                self.notify(NoticeLevel::Error, format!("Failed to load the results: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OptimalMetrics;
    use crate::utils::app_time::now;
    use std::collections::BTreeMap;

    const INTERVAL: Duration = Duration::from_secs(2);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn session() -> AnalysisSession {
        let config = SessionConfig {
            poll_interval: INTERVAL,
            max_consecutive_poll_errors: 3,
        };
        let mut session = AnalysisSession::new(config, today());
        session.form.toggle_ticker("AAPL");
        session.form.toggle_ticker("MSFT");
        session.form.start_date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        session.form.end_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        session
    }

    fn snapshot(status: JobStatus, progress: f64) -> JobSnapshot {
        JobSnapshot {
            status,
            progress,
            message: Some(format!("{} at {}", status, progress)),
        }
    }

    fn accepted(id: &str) -> Result<SubmittedJob, ApiError> {
        Ok(SubmittedJob {
            id: JobId::new(id),
            snapshot: JobSnapshot {
                status: JobStatus::Pending,
                progress: 0.0,
                message: None,
            },
        })
    }

    fn results(weights: &[(&str, f64)]) -> AnalysisResults {
        AnalysisResults {
            optimal_metrics: OptimalMetrics {
                expected_return: Some(12.0),
                volatility: Some(18.0),
                sharpe_ratio: Some(0.66),
                final_value: Some(1_200_000.0),
                return_on_investment: Some(20.0),
                weights: weights.iter().map(|(t, w)| (t.to_string(), *w)).collect(),
            },
            initial_investment: Some(1_000_000.0),
            plot_paths: BTreeMap::new(),
        }
    }

    fn network_error() -> ApiError {
        ApiError::Network("connection refused".to_string())
    }

    /// Submit, accept as job `id`, and drain the queued commands
    fn submitted_session(id: &str, t0: AppInstant) -> AnalysisSession {
        let mut s = session();
        assert!(s.submit(today()));
        s.take_commands();
        s.on_submitted(accepted(id), t0);
        s.take_notices();
        s
    }

    #[test]
    fn fewer_than_two_tickers_never_reaches_the_network() {
        let mut s = session();
        s.form.toggle_ticker("MSFT");

        assert!(!s.submit(today()));
        assert!(s.take_commands().is_empty());
        assert!(!s.is_submitting());

        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].text, "Select at least 2 tickers for the analysis");
    }

    #[test]
    fn start_requests_tickers_once() {
        let mut s = session();
        s.start();
        s.start();
        assert_eq!(s.take_commands(), vec![SessionCommand::FetchTickers]);
        assert_eq!(s.catalog_state(), CatalogState::Loading);
    }

    #[test]
    fn ticker_failure_leaves_empty_catalog_and_one_notice() {
        let mut s = session();
        s.start();
        s.take_commands();
        s.on_tickers(Err(network_error()));

        assert!(s.ticker_groups().is_empty());
        assert_eq!(s.catalog_state(), CatalogState::Failed);
        assert_eq!(s.take_notices().len(), 1);
        assert_eq!(s.active_view(), ActiveView::Form);
    }

    #[test]
    fn submit_failure_reenables_the_form() {
        let mut s = session();
        assert!(s.submit(today()));
        assert!(!s.submit(today()), "second submit while the first is in flight");
        s.take_commands();

        s.on_submitted(
            Err(ApiError::Server {
                status: 400,
                detail: Some("No data for ticker".to_string()),
            }),
            now(),
        );

        assert!(!s.is_submitting());
        assert!(s.job().is_none());
        assert_eq!(s.active_view(), ActiveView::Form);
        let notices = s.take_notices();
        assert_eq!(notices[0].text, "Failed to start the analysis: No data for ticker");
    }

    #[test]
    fn successful_submit_switches_to_status_and_schedules_polling() {
        let t0 = now();
        let mut s = session();
        assert!(s.submit(today()));
        assert!(matches!(
            s.take_commands().as_slice(),
            [SessionCommand::Submit(request)] if request.tickers == vec!["AAPL", "MSFT"]
        ));

        s.on_submitted(accepted("abc123"), t0);

        assert_eq!(s.active_view(), ActiveView::Status);
        assert_eq!(s.current_job_id(), Some(&JobId::new("abc123")));
        assert!(s.is_polling());
        assert_eq!(s.submitted_request().map(|r| r.sim_runs), Some(100));

        // Nothing is due until a full interval has passed
        assert_eq!(s.tick(t0), Some(INTERVAL));
        assert!(s.take_commands().is_empty());
        assert_eq!(s.tick(t0 + INTERVAL), None);
        assert_eq!(
            s.take_commands(),
            vec![SessionCommand::FetchStatus(JobId::new("abc123"))]
        );
    }

    #[test]
    fn only_one_status_request_is_in_flight() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);

        s.tick(t0 + INTERVAL);
        s.tick(t0 + INTERVAL * 2);
        s.tick(t0 + INTERVAL * 3);
        assert_eq!(s.take_commands().len(), 1);
    }

    #[test]
    fn polling_continues_until_terminal_status() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        let mut t = t0;
        for (status, progress) in [(JobStatus::Pending, 0.0), (JobStatus::Running, 40.0)] {
            t += INTERVAL;
            s.tick(t);
            assert_eq!(s.take_commands(), vec![SessionCommand::FetchStatus(id.clone())]);
            s.on_status(&id, Ok(snapshot(status, progress)), t);
            assert!(s.is_polling(), "still polling while {}", status);
        }

        t += INTERVAL;
        s.tick(t);
        s.take_commands();
        s.on_status(&id, Ok(snapshot(JobStatus::Completed, 100.0)), t);

        assert!(!s.is_polling());
        assert_eq!(s.take_commands(), vec![SessionCommand::FetchResults(id.clone())]);
        assert_eq!(s.tick(t + INTERVAL * 10), None);
        assert!(s.take_commands().is_empty());
    }

    #[test]
    fn results_switch_view_only_once_available() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        s.tick(t0 + INTERVAL);
        s.take_commands();
        s.on_status(&id, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);

        assert_eq!(s.active_view(), ActiveView::Status);
        assert!(!s.set_active_view(ActiveView::Results));
        assert!(s.is_awaiting_results());

        s.on_results(&id, Ok(results(&[("AAPL", 0.6), ("MSFT", 0.4)])));
        assert_eq!(s.active_view(), ActiveView::Results);
        assert!(!s.is_loading());
        let weights = &s.results().unwrap().optimal_metrics.weights;
        assert_eq!(weights.get("AAPL"), Some(&0.6));
    }

    #[test]
    fn results_are_requested_once_per_job() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        s.tick(t0 + INTERVAL);
        s.take_commands();
        s.on_status(&id, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);
        // A duplicated completed reply must not trigger a second fetch
        s.on_status(&id, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);
        s.on_results(&id, Err(network_error()));

        let fetches = s
            .take_commands()
            .into_iter()
            .filter(|c| matches!(c, SessionCommand::FetchResults(_)))
            .count();
        assert_eq!(fetches, 1);
        assert!(s.results().is_none());
        assert_eq!(s.active_view(), ActiveView::Status);
    }

    #[test]
    fn failed_status_stops_polling_and_reports_message() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        s.tick(t0 + INTERVAL);
        s.take_commands();
        s.on_status(
            &id,
            Ok(JobSnapshot {
                status: JobStatus::Failed,
                progress: 30.0,
                message: Some("Not enough price history".to_string()),
            }),
            t0 + INTERVAL,
        );

        assert!(!s.is_polling());
        assert!(!s.is_loading());
        assert!(s.take_commands().is_empty());
        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].text, "Analysis failed: Not enough price history");
    }

    #[test]
    fn transient_poll_errors_retry_then_halt_at_cap() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        let mut t = t0;
        for attempt in 1..=3 {
            t += INTERVAL;
            s.tick(t);
            assert_eq!(s.take_commands().len(), 1, "attempt {}", attempt);
            s.on_status(&id, Err(network_error()), t);
        }

        assert!(!s.is_polling());
        assert!(s.polling_halted());
        assert_eq!(s.take_notices().len(), 1);

        assert!(s.resume_polling(t));
        s.tick(t);
        assert_eq!(s.take_commands(), vec![SessionCommand::FetchStatus(id)]);
    }

    #[test]
    fn a_good_reply_resets_the_error_count() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");

        let mut t = t0;
        for reply in [
            Err(network_error()),
            Err(network_error()),
            Ok(snapshot(JobStatus::Running, 10.0)),
            Err(network_error()),
            Err(network_error()),
        ] {
            t += INTERVAL;
            s.tick(t);
            s.take_commands();
            s.on_status(&id, reply, t);
        }

        assert!(s.is_polling());
        assert!(!s.polling_halted());
    }

    #[test]
    fn resubmission_replaces_the_poll_and_ignores_stale_replies() {
        let t0 = now();
        let mut s = submitted_session("old", t0);
        let old = JobId::new("old");

        // Old status request goes out, user returns to the form and resubmits
        s.tick(t0 + INTERVAL);
        s.take_commands();
        assert!(s.set_active_view(ActiveView::Form));
        assert!(s.submit(today()));
        s.take_commands();
        s.on_submitted(accepted("new"), t0 + INTERVAL);
        let new = JobId::new("new");

        // The late reply for the old job changes nothing
        s.on_status(&old, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);
        assert_eq!(s.job().map(|j| j.status()), Some(JobStatus::Pending));
        assert!(s.take_commands().is_empty());

        // Exactly one schedule, and it targets the new job
        s.tick(t0 + INTERVAL * 2);
        s.tick(t0 + INTERVAL * 2);
        assert_eq!(s.take_commands(), vec![SessionCommand::FetchStatus(new)]);
    }

    #[test]
    fn view_gating_follows_job_and_results() {
        let mut s = session();
        assert!(!s.set_active_view(ActiveView::Status));
        assert!(!s.set_active_view(ActiveView::Results));
        assert_eq!(s.active_view(), ActiveView::Form);

        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        assert!(s.set_active_view(ActiveView::Form));
        assert!(s.set_active_view(ActiveView::Status));
        assert!(!s.set_active_view(ActiveView::Results));
    }

    #[test]
    fn new_submission_clears_previous_results() {
        let t0 = now();
        let mut s = submitted_session("abc123", t0);
        let id = JobId::new("abc123");
        s.tick(t0 + INTERVAL);
        s.take_commands();
        s.on_status(&id, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);
        s.on_results(&id, Ok(results(&[("AAPL", 0.5), ("MSFT", 0.5)])));
        assert_eq!(s.active_view(), ActiveView::Results);

        assert!(s.submit(today()));
        assert!(s.results().is_none());
        assert_eq!(s.active_view(), ActiveView::Form);
    }

    #[test]
    fn old_job_completing_during_resubmit_leaves_no_results_behind() {
        let t0 = now();
        let mut s = submitted_session("old", t0);
        let old = JobId::new("old");

        s.tick(t0 + INTERVAL);
        s.take_commands();
        assert!(s.set_active_view(ActiveView::Form));
        assert!(s.submit(today()));
        s.take_commands();

        // The old job finishes while the create call is still out
        s.on_status(&old, Ok(snapshot(JobStatus::Completed, 100.0)), t0 + INTERVAL);
        assert!(s.take_commands().is_empty());
        s.on_results(&old, Ok(results(&[("OLD1", 0.5), ("OLD2", 0.5)])));
        assert!(s.results().is_none());
        assert_eq!(s.active_view(), ActiveView::Form);

        s.on_submitted(accepted("new"), t0 + INTERVAL);
        assert_eq!(s.current_job_id(), Some(&JobId::new("new")));
        assert!(s.results().is_none());
        assert!(!s.can_view(ActiveView::Results));
        assert_eq!(s.active_view(), ActiveView::Status);
    }

    #[test]
    fn rejected_resubmit_resumes_the_previous_poll() {
        let t0 = now();
        let mut s = submitted_session("old", t0);

        assert!(s.set_active_view(ActiveView::Form));
        assert!(s.submit(today()));
        s.take_commands();
        assert!(!s.is_polling());

        let t1 = t0 + Duration::from_millis(500);
        s.on_submitted(Err(network_error()), t1);
        assert!(s.is_polling());
        assert_eq!(s.current_job_id(), Some(&JobId::new("old")));

        assert_eq!(s.tick(t1), None);
        assert_eq!(
            s.take_commands(),
            vec![SessionCommand::FetchStatus(JobId::new("old"))]
        );
    }
}
