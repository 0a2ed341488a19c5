//! Document store and repositories for Munim.
//!
//! This crate implements the storage collaborators the core posting engine
//! relies on:
//! - an in-process, owner-scoped document store,
//! - the atomic writer that applies write plans all-or-nothing,
//! - repositories for the single-document CRUD the rest of the system needs,
//! - the posting service wiring reads, the engine, and the writer together.

pub mod repositories;
pub mod store;

pub use repositories::books::BooksRepository;
pub use repositories::inventory::{ProductRepository, ProductUpdate};
pub use repositories::ledger::LedgerRepository;
pub use repositories::party::{
    CreditorRepository, CreditorUpdate, CustomerRepository, CustomerUpdate,
};
pub use repositories::posting::{PostError, PostingService};
pub use store::{CommitError, Store, StoreError};
