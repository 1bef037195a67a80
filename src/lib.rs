//! Diet-quality index scoring.
//!
//! A [`scoring::ScoreEngine`] turns per-record nutrient and food-group
//! intakes into per-component sub-scores and a total, using a validated rule
//! table of piecewise-linear scoring curves. The other modules load rule
//! tables, read CSV input and render results.

pub mod config;
pub mod error;
pub mod indices;
pub mod input;
pub mod output;
pub mod scoring;
pub mod telemetry;
