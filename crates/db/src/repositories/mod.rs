//! Owner-scoped repositories over the document store.

pub mod books;
pub mod inventory;
pub mod ledger;
pub mod party;
pub mod posting;
