//! Hosted Gemini API access

mod client;
mod wire;

pub use client::{AnalysisClient, AnalysisError, ServiceError};
