//! Rules Module
//!
//! Rule Configuration: thresholds, weights, bonuses, decision boundaries.
//! Chỉ là data - không có logic đánh giá.
//!
//! ## Structure
//! - `defaults`: Canonical constants
//! - `config`: `RuleConfig` (validated, immutable) + `RuleConfigBuilder`
//! - `error`: `ConfigError`
//! - `resolve`: Pick config source (path / env / preset)
//!
//! ## Usage
//! ```ignore
//! use enforcement_engine::logic::rules::{RuleConfig, Signal};
//!
//! let config = RuleConfig::builder()
//!     .weight(Signal::Pivots, 25)
//!     .block_score(110)
//!     .build()?;
//! ```

pub mod defaults;
pub mod config;
pub mod error;
pub mod resolve;

pub use config::{RuleConfig, RuleConfigBuilder, Signal, SignalWeights};

pub use error::{ConfigError, ConfigResult};

pub use resolve::{resolve_config, resolve_config_with};
