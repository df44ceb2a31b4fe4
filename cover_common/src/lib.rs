//!
//! Vehicle insurance quote flow shared by every front end.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` used across the workspace.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `vehicle`: enumerated form inputs (body type, duration, coverage) and field names.
//! - `request`: the editable `QuoteRequest` form and its validation.
//! - `quote`: priced `Quote` and `PurchaseRecord` values.
//! - `pricing`: `PricingEngine`, the premium tables and rounding.
//! - `flow`: `QuoteFlowController`, the landing/form/quote/purchase state machine.
//! - `view`: serializable `ViewSnapshot` of the current stage.
//! - `countdown`: cancellable one-second ticker for the purchase countdown.
//! - `session`: controller and ticker wired together for an interactive front end.
#![warn(missing_docs)]
pub mod countdown;
pub mod error;
pub mod flow;
pub mod pricing;
pub mod quote;
pub mod request;
pub mod result;
pub mod session;
pub mod vehicle;
pub mod view;

pub use error::QuoteError;
pub use flow::{QuoteFlowController, Stage, TickOutcome};
pub use pricing::PricingEngine;
pub use quote::{PurchaseRecord, Quote};
pub use request::{QuoteRequest, RawQuoteRequest};
pub use result::Result;
pub use session::{FlowAction, QuoteSession};
pub use view::ViewSnapshot;
