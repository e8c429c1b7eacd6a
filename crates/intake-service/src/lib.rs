//! Intake Model Service Layer
//!
//! Clients for the model computation backend that turns a reconciled
//! assumption set into financial outputs.
//!
//! # Architecture
//!
//! This crate provides implementations of the `ModelService` trait from
//! `intake-domain`. The engine never talks HTTP itself.
//!
//! # Services
//!
//! - `MockModelService`: Deterministic mock for testing
//! - `HttpModelService`: JSON over HTTP (`POST /api/model`)
//!
//! # Examples
//!
//! ```
//! use intake_domain::traits::ModelService;
//! use intake_domain::{AssumptionSet, SubmissionId};
//! use intake_service::MockModelService;
//!
//! let service = MockModelService::with_metrics([("irr", 0.15)]);
//! let set = AssumptionSet { id: SubmissionId::new(), values: Vec::new() };
//! let outputs = tokio::runtime::Runtime::new()
//!     .unwrap()
//!     .block_on(service.compute(&set))
//!     .unwrap();
//! assert_eq!(outputs.metric("irr"), Some(0.15));
//! ```

#![warn(missing_docs)]

mod error;
pub mod http;
mod mock;
pub mod wire;

pub use error::ServiceError;
pub use http::HttpModelService;
pub use mock::MockModelService;
pub use wire::KPI_NAMES;
