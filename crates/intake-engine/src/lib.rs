//! Intake Resolution Engine
//!
//! Reconciles free text, form fields and research notes into one record per
//! field, and runs the confirmation workflow on top of those records.
//!
//! # Example
//!
//! ```
//! use intake_engine::{Engine, Input};
//!
//! let mut engine = Engine::with_defaults().unwrap();
//! engine
//!     .resolve(Input::NaturalLanguage(
//!         "Build a new mobile app by Q3 2025 with a budget of $250k".to_string(),
//!     ))
//!     .unwrap();
//!
//! let budget = engine.record("budget").unwrap();
//! assert_eq!(budget.value, "$250k");
//! assert!(budget.confirmed);
//!
//! // 0.67 is under the auto-confirm threshold
//! assert!(!engine.record("goal").unwrap().confirmed);
//! engine.set_confirmed("goal", true).unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod metrics;
mod review;
mod source;
mod table;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use metrics::EngineMetrics;
pub use source::{Input, Proposal};
pub use table::FieldRow;
