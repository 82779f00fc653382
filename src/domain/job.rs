use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Opaque identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Pending and running jobs still need polling
    pub fn is_active(self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Running)
    }
}

/// Status as last reported by the backend. Never edited locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub status: JobStatus,
    /// 0..=100
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: Option<String>,
}

impl JobSnapshot {
    pub fn progress_fraction(&self) -> f32 {
        (self.progress / 100.0).clamp(0.0, 1.0) as f32
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// A submitted analysis job
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub snapshot: JobSnapshot,
}

impl Job {
    pub fn new(id: JobId, snapshot: JobSnapshot) -> Self {
        Self { id, snapshot }
    }

    pub fn status(&self) -> JobStatus {
        self.snapshot.status
    }

    /// Replace the snapshot wholesale with a fresh backend reply
    pub fn apply(&mut self, snapshot: JobSnapshot) {
        self.snapshot = snapshot;
    }
}
