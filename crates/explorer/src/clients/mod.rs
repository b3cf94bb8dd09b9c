pub mod api;

pub use api::{AnalysisResponse, ApiClient};
