//! HTTP middleware: CORS and the error normalizer.

pub mod cors;
pub mod error_handler;

pub use cors::create_cors;
pub use error_handler::ErrorNormalizer;
