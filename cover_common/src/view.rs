//! Render-ready snapshots of the quote flow.
//!
//! A `ViewSnapshot` is the state tag plus exactly the data the presentation
//! layer needs for that stage. It serializes to JSON with a `state` tag, e.g.
//! `{"state":"purchaseConfirmed","purchase":{...},"countdown":7,...}`.
use std::collections::BTreeSet;

use serde::Serialize;

use crate::flow::Stage;
use crate::quote::{PurchaseRecord, Quote};
use crate::request::QuoteRequest;
use crate::vehicle::Field;

/// Brand shown on the landing view.
pub const BRAND_NAME: &str = "ShieldCover Insurance";
/// Motto shown under the brand.
pub const BRAND_MOTTO: &str = "Drive with Confidence, We've Got You Covered";

#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ViewSnapshot {
    Landing {
        brand: &'static str,
        motto: &'static str,
    },
    FormEntry {
        request: QuoteRequest,
        invalid_fields: Vec<Field>,
    },
    QuoteShown {
        quote: Quote,
        display_price: String,
    },
    PurchaseConfirmed {
        purchase: PurchaseRecord,
        summary: String,
        display_price: String,
        countdown: u32,
        countdown_message: String,
    },
}

impl ViewSnapshot {
    pub(crate) fn landing() -> Self {
        ViewSnapshot::Landing {
            brand: BRAND_NAME,
            motto: BRAND_MOTTO,
        }
    }

    pub(crate) fn form(request: &QuoteRequest, invalid: &BTreeSet<Field>) -> Self {
        ViewSnapshot::FormEntry {
            request: request.clone(),
            invalid_fields: invalid.iter().copied().collect(),
        }
    }

    pub(crate) fn quote(quote: &Quote) -> Self {
        ViewSnapshot::QuoteShown {
            quote: quote.clone(),
            display_price: quote.display_price(),
        }
    }

    pub(crate) fn purchase(record: &PurchaseRecord, countdown: u32) -> Self {
        ViewSnapshot::PurchaseConfirmed {
            purchase: record.clone(),
            summary: record.summary(),
            display_price: record.display_price(),
            countdown,
            countdown_message: countdown_message(countdown),
        }
    }

    /// Stage this snapshot was taken in.
    pub fn stage(&self) -> Stage {
        match self {
            ViewSnapshot::Landing { .. } => Stage::Landing,
            ViewSnapshot::FormEntry { .. } => Stage::FormEntry,
            ViewSnapshot::QuoteShown { .. } => Stage::QuoteShown,
            ViewSnapshot::PurchaseConfirmed { .. } => Stage::PurchaseConfirmed,
        }
    }
}

/// Line shown under the purchase confirmation.
pub fn countdown_message(seconds: u32) -> String {
    format!("Returning to homepage in {} seconds...", seconds)
}
