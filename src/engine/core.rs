use eframe::egui;
use poll_promise::Promise;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::PortfolioApi;
use crate::domain::JobId;
use crate::utils::app_time::AppInstant;

use super::messages::ApiReply;
use super::session::{AnalysisSession, SessionCommand, SessionConfig};

/// What the UI should do about repainting after an engine update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineActivity {
    /// Calls are in flight. Completion wakes the UI, a pending status check does not.
    Busy(Option<Duration>),
    /// Nothing in flight; the next status check is due after this long
    WaitingFor(Duration),
    Idle,
}

impl EngineActivity {
    /// Deadline the UI must wake up for on its own
    pub fn wake_after(self) -> Option<Duration> {
        match self {
            EngineActivity::Busy(wait) => wait,
            EngineActivity::WaitingFor(wait) => Some(wait),
            EngineActivity::Idle => None,
        }
    }
}

struct PendingCall {
    /// Job the call belongs to. Dropped once that job is no longer current.
    job_id: Option<JobId>,
    promise: Promise<ApiReply>,
}

pub struct AnalysisEngine {
    session: AnalysisSession,
    api: Arc<dyn PortfolioApi>,
    pending: Vec<PendingCall>,
    /// Woken when a call completes
    repaint: Option<egui::Context>,
}

impl AnalysisEngine {
    pub fn new(api: Arc<dyn PortfolioApi>, today: NaiveDate) -> Self {
        Self {
            session: AnalysisSession::new(SessionConfig::default(), today),
            api,
            pending: Vec::new(),
            repaint: None,
        }
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AnalysisSession {
        &mut self.session
    }

    pub fn asset_url(&self, relative_path: &str) -> String {
        self.api.asset_url(relative_path)
    }

    pub fn in_flight_calls(&self) -> usize {
        self.pending.len()
    }

    /// Kick off the initial ticker load
    pub fn start(&mut self) {
        self.session.start();
        self.dispatch_commands();
    }

    /// THE LOOP.
    /// Delivers finished calls, fires due polls and dispatches queued work.
    pub fn update(&mut self, now: AppInstant) -> EngineActivity {
        // 1. Deliver finished calls
        for call in std::mem::take(&mut self.pending) {
            let PendingCall { job_id, promise } = call;
            match promise.try_take() {
                Ok(reply) => self.deliver(reply, now),
                Err(promise) => self.pending.push(PendingCall { job_id, promise }),
            }
        }

        // 2. Poll deadline
        let wait = self.session.tick(now);

        // 3. Dispatch
        self.dispatch_commands();

        // 4. Anything tied to a replaced job is cancelled by dropping its promise
        self.drop_stale_calls();

        if !self.pending.is_empty() {
            EngineActivity::Busy(wait)
        } else if let Some(wait) = wait {
            EngineActivity::WaitingFor(wait)
        } else {
            EngineActivity::Idle
        }
    }

    /// Abandon every outstanding call
    pub fn shutdown(&mut self) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Dropping {} in-flight calls", self.pending.len());
        }
        self.pending.clear();
    }

    fn deliver(&mut self, reply: ApiReply, now: AppInstant) {
        match reply {
            ApiReply::Tickers(result) => self.session.on_tickers(result),
            ApiReply::Submitted(result) => self.session.on_submitted(result, now),
            ApiReply::Status { job_id, result } => self.session.on_status(&job_id, result, now),
            ApiReply::Results { job_id, result } => self.session.on_results(&job_id, result),
        }
    }

    fn dispatch_commands(&mut self) {
        for command in self.session.take_commands() {
            let call = self.spawn_call(command);
            self.pending.push(call);
        }
    }

    fn spawn_call(&self, command: SessionCommand) -> PendingCall {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_api_calls {
            log::info!("[engine] dispatch {:?}", command);
        }

        let api = Arc::clone(&self.api);
        let repaint = self.repaint.clone();

        match command {
            SessionCommand::FetchTickers => PendingCall {
                job_id: None,
                promise: spawn_reply(repaint, async move {
                    ApiReply::Tickers(api.list_tickers().await)
                }),
            },
            SessionCommand::Submit(request) => PendingCall {
                job_id: None,
                promise: spawn_reply(repaint, async move {
                    ApiReply::Submitted(api.submit_analysis(&request).await)
                }),
            },
            SessionCommand::FetchStatus(job_id) => {
                let id = job_id.clone();
                PendingCall {
                    job_id: Some(job_id),
                    promise: spawn_reply(repaint, async move {
                        let result = api.job_status(&id).await;
                        ApiReply::Status { job_id: id, result }
                    }),
                }
            }
            SessionCommand::FetchResults(job_id) => {
                let id = job_id.clone();
                PendingCall {
                    job_id: Some(job_id),
                    promise: spawn_reply(repaint, async move {
                        let result = api.job_results(&id).await;
                        ApiReply::Results { job_id: id, result }
                    }),
                }
            }
        }
    }

    fn drop_stale_calls(&mut self) {
        let current = self.session.current_job_id().cloned();
        self.pending.retain(|call| match &call.job_id {
            None => true,
            Some(id) => {
                let keep = Some(id) == current.as_ref();
                #[cfg(debug_assertions)]
                if !keep && DEBUG_FLAGS.print_stale_replies {
                    log::info!("Cancelling call for replaced job {}", id);
                }
                keep
            }
        });
    }
}

async fn with_repaint<F>(repaint: Option<egui::Context>, call: F) -> ApiReply
where
    F: Future<Output = ApiReply>,
{
    let reply = call.await;
    if let Some(ctx) = repaint {
        ctx.request_repaint();
    }
    reply
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_reply<F>(repaint: Option<egui::Context>, call: F) -> Promise<ApiReply>
where
    F: Future<Output = ApiReply> + Send + 'static,
{
    Promise::spawn_async(with_repaint(repaint, call))
}

#[cfg(target_arch = "wasm32")]
fn spawn_reply<F>(repaint: Option<egui::Context>, call: F) -> Promise<ApiReply>
where
    F: Future<Output = ApiReply> + 'static,
{
    Promise::spawn_local(with_repaint(repaint, call))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::data::{ApiError, SubmittedJob};
    use crate::domain::{
        AnalysisRequest, AnalysisResults, JobSnapshot, JobStatus, OptimalMetrics, weight_label,
    };
    use crate::engine::{ActiveView, CatalogState};
    use crate::utils::app_time::now;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const INTERVAL: Duration = Duration::from_secs(2);

    #[derive(Default)]
    struct FakeApi {
        tickers_fail: bool,
        statuses: Mutex<VecDeque<JobSnapshot>>,
        /// Status calls for this job never finish in time
        slow_job: Option<String>,
        slow_tickers: bool,
        submit_calls: AtomicUsize,
        status_calls: AtomicUsize,
        results_calls: AtomicUsize,
    }

    impl FakeApi {
        fn with_statuses(statuses: &[(JobStatus, f64)]) -> Self {
            Self {
                statuses: Mutex::new(
                    statuses
                        .iter()
                        .map(|(status, progress)| JobSnapshot {
                            status: *status,
                            progress: *progress,
                            message: None,
                        })
                        .collect(),
                ),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PortfolioApi for FakeApi {
        async fn list_tickers(&self) -> Result<Vec<String>, ApiError> {
            if self.tickers_fail {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            if self.slow_tickers {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Ok(["AAPL", "MSFT", "KO", "ZTS"].iter().map(|t| t.to_string()).collect())
        }

        async fn submit_analysis(
            &self,
            request: &AnalysisRequest,
        ) -> Result<SubmittedJob, ApiError> {
            assert!(request.tickers.len() >= 2);
            let n = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SubmittedJob {
                id: JobId::new(format!("job-{}", n)),
                snapshot: JobSnapshot {
                    status: JobStatus::Pending,
                    progress: 0.0,
                    message: Some("Queued".to_string()),
                },
            })
        }

        async fn job_status(&self, id: &JobId) -> Result<JobSnapshot, ApiError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            if self.slow_job.as_deref() == Some(id.as_str()) {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            let next = self.statuses.lock().unwrap().pop_front();
            Ok(next.unwrap_or(JobSnapshot {
                status: JobStatus::Completed,
                progress: 100.0,
                message: None,
            }))
        }

        async fn job_results(&self, _id: &JobId) -> Result<AnalysisResults, ApiError> {
            self.results_calls.fetch_add(1, Ordering::SeqCst);
            Ok(AnalysisResults {
                optimal_metrics: OptimalMetrics {
                    expected_return: Some(14.2),
                    volatility: Some(21.0),
                    sharpe_ratio: Some(0.68),
                    final_value: Some(1_450_000.0),
                    return_on_investment: Some(45.0),
                    weights: BTreeMap::from([("AAPL".to_string(), 0.6), ("MSFT".to_string(), 0.4)]),
                },
                initial_investment: Some(1_000_000.0),
                plot_paths: BTreeMap::from([(
                    "plot_efficient_frontier".to_string(),
                    "job-1/efficient_frontier.png".to_string(),
                )]),
            })
        }

        fn asset_url(&self, relative_path: &str) -> String {
            format!("http://test/static/{}", relative_path)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn engine(api: &Arc<FakeApi>) -> AnalysisEngine {
        let api: Arc<dyn PortfolioApi> = api.clone();
        let mut engine = AnalysisEngine::new(api, today());
        engine.session_mut().form.toggle_ticker("AAPL");
        engine.session_mut().form.toggle_ticker("MSFT");
        engine
    }

    /// Run updates at a fixed instant until `done` holds
    fn pump(
        engine: &mut AnalysisEngine,
        at: AppInstant,
        done: impl Fn(&AnalysisEngine) -> bool,
    ) -> bool {
        for _ in 0..1_000 {
            engine.update(at);
            if done(engine) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn full_analysis_round_trip() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let api = Arc::new(FakeApi::with_statuses(&[
            (JobStatus::Running, 50.0),
            (JobStatus::Completed, 100.0),
        ]));
        let mut engine = engine(&api);
        let t0 = now();

        engine.start();
        assert!(pump(&mut engine, t0, |e| {
            e.session().catalog_state() == CatalogState::Ready
        }));
        // 16 fixed popular symbols plus ZTS
        assert_eq!(engine.session().ticker_groups().total(), 17);

        assert!(engine.session_mut().submit(today()));
        assert!(pump(&mut engine, t0, |e| e.session().job().is_some()));
        assert_eq!(engine.session().active_view(), ActiveView::Status);
        assert_eq!(engine.update(t0), EngineActivity::WaitingFor(INTERVAL));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 0);

        let t1 = t0 + INTERVAL;
        assert!(pump(&mut engine, t1, |e| {
            e.session().job().map(|j| j.status()) == Some(JobStatus::Running)
        }));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 1);

        let t2 = t1 + INTERVAL;
        assert!(pump(&mut engine, t2, |e| e.session().results().is_some()));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.results_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.session().active_view(), ActiveView::Results);

        let labels: Vec<String> = engine
            .session()
            .results()
            .unwrap()
            .optimal_metrics
            .weights_by_size()
            .into_iter()
            .map(|(_, w)| weight_label(w))
            .collect();
        assert_eq!(labels, vec!["60.00%", "40.00%"]);

        // Terminal: no further calls however long we wait
        let t3 = t2 + INTERVAL * 10;
        for _ in 0..10 {
            assert_eq!(engine.update(t3), EngineActivity::Idle);
        }
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.results_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn too_few_tickers_sends_nothing() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let api = Arc::new(FakeApi::default());
        let mut engine = engine(&api);
        engine.session_mut().form.toggle_ticker("MSFT");

        assert!(!engine.session_mut().submit(today()));
        assert_eq!(engine.update(now()), EngineActivity::Idle);
        assert_eq!(engine.in_flight_calls(), 0);
        assert_eq!(api.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ticker_failure_yields_empty_list_and_single_notice() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let api = Arc::new(FakeApi {
            tickers_fail: true,
            ..FakeApi::default()
        });
        let mut engine = engine(&api);
        engine.start();
        assert!(pump(&mut engine, now(), |e| {
            e.session().catalog_state() == CatalogState::Failed
        }));

        assert!(engine.session().ticker_groups().is_empty());
        assert_eq!(engine.session_mut().take_notices().len(), 1);
    }

    #[test]
    fn resubmission_cancels_the_old_jobs_poll() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let api = Arc::new(FakeApi {
            slow_job: Some("job-1".to_string()),
            ..FakeApi::default()
        });
        let mut engine = engine(&api);
        let t0 = now();

        assert!(engine.session_mut().submit(today()));
        assert!(pump(&mut engine, t0, |e| e.session().job().is_some()));

        // job-1's status check hangs
        let t1 = t0 + INTERVAL;
        assert_eq!(engine.update(t1), EngineActivity::Busy(None));
        assert_eq!(engine.in_flight_calls(), 1);

        assert!(engine.session_mut().set_active_view(ActiveView::Form));
        assert!(engine.session_mut().submit(today()));
        assert!(pump(&mut engine, t1, |e| {
            e.session().current_job_id() == Some(&JobId::new("job-2"))
        }));

        // The hanging call was dropped along with its job
        assert_eq!(engine.in_flight_calls(), 0);
        assert_eq!(engine.session().active_view(), ActiveView::Status);
        assert_eq!(engine.update(t1), EngineActivity::WaitingFor(INTERVAL));
    }

    #[test]
    fn poll_deadline_survives_a_slow_call() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let api = Arc::new(FakeApi {
            slow_tickers: true,
            ..FakeApi::default()
        });
        let mut engine = engine(&api);
        let t0 = now();

        assert!(engine.session_mut().submit(today()));
        assert!(pump(&mut engine, t0, |e| e.session().job().is_some()));

        // Ticker list hangs while the first status check is still ahead
        engine.start();
        let activity = engine.update(t0 + Duration::from_millis(500));
        assert_eq!(activity, EngineActivity::Busy(Some(Duration::from_millis(1500))));
        assert_eq!(activity.wake_after(), Some(Duration::from_millis(1500)));
        assert_eq!(api.status_calls.load(Ordering::SeqCst), 0);
    }
}
