//! Business documents.
//!
//! Each posting event creates one primary document here; the posting engine
//! computes every derived field (totals, interest) server-side and the
//! documents are immutable once written.

pub mod capital;
pub mod spending;
pub mod trade;

pub use capital::{Asset, Liability, simple_interest};
pub use spending::{Drawing, DrawingKind, Expense, ExpenseCategory};
pub use trade::{PaymentMethod, Purchase, PurchaseReturn, Sale, SaleLine, SalesReturn};
