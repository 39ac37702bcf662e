//! Aggregates the health of every fleet member into one composite status.
//!
//! This crate provides:
//! - [`inspect`], classifying members by the reasons on their conditions
//! - [`StatusBuilder`], accumulating the Progressing/Degraded/Available conditions
//! - [`StatusWriter`], persisting the composite status only when it changed
//! - [`Aggregator`], one full pass from member listing to status write
//! - [`AggregatorService`], re-running the aggregator on change notifications
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod aggregator;
mod builder;
mod config;
mod error;
mod inspector;
mod service;
mod writer;

pub use aggregator::{
    Aggregator, MESSAGE_ALL_HEALTHY, REASON_ALL_HEALTHY, REASON_MEMBER_FAILING,
    REASON_NO_MEMBERS, Verdict,
};
pub use builder::StatusBuilder;
pub use config::{AggregatorConfig, DEFAULT_TARGET_NAME};
pub use error::{Error, Result};
pub use inspector::{FailureReport, inspect};
pub use service::{AggregatorService, Trigger};
pub use writer::{StatusWriter, WriteOutcome};
