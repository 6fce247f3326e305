//! Logic Module - Business Logic & Engines
//!
//! Chứa rule configuration, risk engine và export.
//!
//! ## Layout
//! - `rules/` - Immutable thresholds, weights, bonuses (leaf)
//! - `risk/` - Scoring, intent, enforcement ladder, audit log
//! - `export/` - Sample loading and result export (downstream only)

pub mod rules;
pub mod risk;
pub mod export;
