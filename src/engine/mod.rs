pub mod core;
pub mod messages;
pub mod session;

// Re-export key components
pub use core::{AnalysisEngine, EngineActivity};
pub use messages::ApiReply;
pub use session::{
    ActiveView, AnalysisSession, CatalogState, Notice, NoticeLevel, SessionCommand, SessionConfig,
};
