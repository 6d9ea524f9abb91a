//! HTTP protocol layer module
//!
//! Provides HTTP response builders decoupled from specific business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_health_response,
    build_options_response, build_text_response,
};
