//! quizrace-core: question loading, timed exam sessions, and scoring.
//!
//! This crate holds the data model, the CSV loader, the race between the
//! answer-collection loop and the time limit, and the scorer that the
//! `quizrace` binary builds on.

pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod parser;
pub mod race;
pub mod report;
pub mod scoring;
pub mod traits;
