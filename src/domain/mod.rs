// Domain types and value objects
pub mod charts;
pub mod job;
pub mod request;
pub mod results;
pub mod ticker;

// Re-export commonly used types
pub use charts::{ChartEmbed, ChartKind, chart_title, split_chart_paths};
pub use job::{Job, JobId, JobSnapshot, JobStatus};
pub use request::{AnalysisForm, AnalysisRequest, RequestError};
pub use results::{AnalysisResults, OptimalMetrics, weight_label};
pub use ticker::{TickerGroup, TickerGroups};
