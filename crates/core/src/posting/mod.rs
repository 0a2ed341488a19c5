//! The ledger posting engine.
//!
//! This module turns business events into atomic write plans:
//! - Posting events and funding sources
//! - The read-only context seam to storage
//! - Write plans (ordered inserts and increments)
//! - The engine itself: validate, compute, plan
//! - Error types for posting operations

pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod plan;

#[cfg(test)]
mod engine_tests;

pub use context::PostingContext;
pub use engine::{Posting, PostingEngine};
pub use error::PostingError;
pub use event::{
    CategoryTarget, FundingSource, PostingEvent, ProductTarget, ResolvedFunding, SaleLineInput,
    SettleTarget,
};
pub use plan::{Collection, Delta, Document, WriteOp, WritePlan};
