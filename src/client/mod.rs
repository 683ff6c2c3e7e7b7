//! Backend client
//!
//! An explicit [`Session`] and a blocking REST client over it.

pub mod api;
pub mod session;
pub mod types;

pub use api::ApiClient;
pub use session::Session;
pub use types::AIAnalysis;
