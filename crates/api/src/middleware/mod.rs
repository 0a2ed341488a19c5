//! Request middleware and extractors.

pub mod caller;

pub use caller::Caller;
