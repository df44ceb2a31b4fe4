//! Priced quotes and purchase confirmations.
//!
//! A `Quote` is the immutable result of pricing a `QuoteRequest`; it can only
//! be built by [`PricingEngine`](crate::pricing::PricingEngine). Accepting a
//! quote turns it into a `PurchaseRecord`, which keeps just what the
//! confirmation view shows.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::request::QuoteRequest;
use crate::vehicle::{BodyType, CoverageType, PolicyDuration};

/// Currency prefix used when rendering premiums.
pub const CURRENCY_PREFIX: &str = "K";

/// Render a premium the way the quote and confirmation views show it, e.g. `K1800.00`.
pub fn format_price(price: Decimal) -> String {
    format!("{}{:.2}", CURRENCY_PREFIX, price)
}

/// A priced snapshot of a vehicle insurance request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(flatten)]
    request: QuoteRequest,
    price: Decimal,
}

impl Quote {
    pub(crate) fn new(request: QuoteRequest, price: Decimal) -> Self {
        Self { request, price }
    }

    /// The vehicle details the quote was computed for.
    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// Premium, always carrying two fraction digits.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Body type of the quoted vehicle.
    pub fn body_type(&self) -> BodyType {
        self.request.body_type
    }

    /// Coverage tier of the quote.
    pub fn coverage_type(&self) -> CoverageType {
        self.request.coverage_type
    }

    /// Policy period of the quote.
    pub fn duration(&self) -> PolicyDuration {
        self.request.duration
    }

    /// Premium with currency prefix.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Confirmation artifact created when a quote is accepted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    coverage_type: CoverageType,
    body_type: BodyType,
    price: Decimal,
}

impl PurchaseRecord {
    /// Coverage tier that was bought.
    pub fn coverage_type(&self) -> CoverageType {
        self.coverage_type
    }

    /// Body type of the insured vehicle.
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Amount paid.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Amount paid with currency prefix.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    /// Sentence shown on the confirmation view.
    pub fn summary(&self) -> String {
        format!(
            "You've purchased {} coverage for your {}.",
            self.coverage_type, self.body_type
        )
    }
}

impl From<Quote> for PurchaseRecord {
    fn from(quote: Quote) -> Self {
        Self {
            coverage_type: quote.request.coverage_type,
            body_type: quote.request.body_type,
            price: quote.price,
        }
    }
}
