use crate::data::{ApiError, SubmittedJob};
use crate::domain::{AnalysisResults, JobId, JobSnapshot};

/// The outcome of one backend call, as delivered back to the session
#[derive(Debug)]
pub enum ApiReply {
    Tickers(Result<Vec<String>, ApiError>),
    Submitted(Result<SubmittedJob, ApiError>),
    Status {
        job_id: JobId,
        result: Result<JobSnapshot, ApiError>,
    },
    Results {
        job_id: JobId,
        result: Result<AnalysisResults, ApiError>,
    },
}
