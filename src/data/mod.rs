// Backend access: the API trait, its HTTP implementation and the wire types
pub mod api_client;

// Re-export commonly used types
pub use api_client::{ApiError, HttpPortfolioApi, MaybeSend, PortfolioApi, SubmittedJob};
