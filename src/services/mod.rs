//! Business logic: prompt and payload construction, and upstream forwarding.

pub mod forwarder;
pub mod prompt;
pub mod schema;
pub mod upstream;

pub use forwarder::Forwarder;
pub use prompt::{build_prompt, join_coins, Language};
pub use schema::{build_analysis_request, coin_analysis_schema, GenerateContentRequest};
pub use upstream::GeminiClient;
