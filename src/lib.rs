//! Heuristic URL risk scoring.
//!
//! [`evaluate`] maps one URL to a score in `0..=100` plus the findings that
//! produced it. The rest of the crate is the terminal and HTTP surface
//! around that function.

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod rules;
pub mod server;

pub use error::ValidationError;
pub use evaluator::{AnalysisRequest, Finding, MAX_SCORE, ScoreResult, evaluate};
