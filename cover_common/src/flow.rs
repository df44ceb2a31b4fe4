//! Quote flow state machine.
//!
//! `QuoteFlowController` owns the in-progress `QuoteRequest` and the current
//! stage of the flow:
//!
//! - `Landing`: nothing in progress; `start_quote` opens the form.
//! - `FormEntry`: fields are edited with `update_field`; `submit_form` prices the
//!   request, `cancel_form` returns to landing.
//! - `QuoteShown`: a priced `Quote` is live; `confirm_purchase` buys it,
//!   `request_another_quote` discards it.
//! - `PurchaseConfirmed`: a `PurchaseRecord` is live and a countdown runs;
//!   `tick_countdown` decrements it and returns home at zero.
//!
//! `return_home` is valid from every stage. Stage data lives inside the stage
//! variant, so a quote and a purchase record can never be live together.
//! Transitions not listed above fail with `QuoteError::InvalidState`.
//!
//! The controller never schedules anything itself: the countdown advances only
//! when a caller invokes `tick_countdown`, and `countdown_active` tells that
//! caller whether ticks are wanted.

use std::collections::BTreeSet;
use std::mem;

use log::{debug, info, warn};
use strum_macros::Display;

use crate::error::QuoteError;
use crate::pricing::PricingEngine;
use crate::quote::{PurchaseRecord, Quote};
use crate::request::QuoteRequest;
use crate::result::Result;
use crate::vehicle::Field;
use crate::view::ViewSnapshot;

/// Seconds shown on the confirmation view before returning home.
pub const COUNTDOWN_SECS: u32 = 10;

/// Coarse position in the flow, without stage data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stage {
    /// Brand page with the "get a quote" call to action.
    Landing,
    /// Quote form is open.
    FormEntry,
    /// Priced quote is displayed.
    QuoteShown,
    /// Purchase succeeded; countdown running.
    PurchaseConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    Landing,
    FormEntry { invalid: BTreeSet<Field> },
    QuoteShown(Quote),
    PurchaseConfirmed { record: PurchaseRecord, countdown: u32 },
}

impl FlowState {
    fn stage(&self) -> Stage {
        match self {
            FlowState::Landing => Stage::Landing,
            FlowState::FormEntry { .. } => Stage::FormEntry,
            FlowState::QuoteShown(_) => Stage::QuoteShown,
            FlowState::PurchaseConfirmed { .. } => Stage::PurchaseConfirmed,
        }
    }
}

/// Result of delivering one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown decremented; this many seconds remain.
    Remaining(u32),
    /// Countdown reached zero and the flow returned to landing.
    Expired,
    /// No countdown was running; the tick changed nothing.
    Ignored,
}

/// Owner of the quote flow state.
#[derive(Debug, Clone)]
pub struct QuoteFlowController {
    state: FlowState,
    request: QuoteRequest,
    countdown_start: u32,
}

impl Default for QuoteFlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteFlowController {
    /// Controller at the landing stage with a blank form.
    pub fn new() -> Self {
        Self::with_countdown(COUNTDOWN_SECS)
    }

    /// Controller whose purchase countdown starts at `seconds`, at least 1.
    pub fn with_countdown(seconds: u32) -> Self {
        Self {
            state: FlowState::Landing,
            request: QuoteRequest::default(),
            countdown_start: seconds.max(1),
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    /// The in-progress form. Always present; blank after any reset.
    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// The live quote, if the flow is showing one.
    pub fn quote(&self) -> Option<&Quote> {
        match &self.state {
            FlowState::QuoteShown(quote) => Some(quote),
            _ => None,
        }
    }

    /// The live purchase record, if a purchase was just confirmed.
    pub fn purchase(&self) -> Option<&PurchaseRecord> {
        match &self.state {
            FlowState::PurchaseConfirmed { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Seconds left before returning home, while a countdown runs.
    pub fn countdown(&self) -> Option<u32> {
        match &self.state {
            FlowState::PurchaseConfirmed { countdown, .. } => Some(*countdown),
            _ => None,
        }
    }

    /// `true` while the controller wants countdown ticks delivered.
    pub fn countdown_active(&self) -> bool {
        matches!(self.state, FlowState::PurchaseConfirmed { .. })
    }

    /// Fields flagged by the last failed submit.
    pub fn invalid_fields(&self) -> Option<&BTreeSet<Field>> {
        match &self.state {
            FlowState::FormEntry { invalid } => Some(invalid),
            _ => None,
        }
    }

    /// Open the quote form.
    pub fn start_quote(&mut self) -> Result<()> {
        self.expect_stage(Stage::Landing, "start quote")?;
        self.state = FlowState::FormEntry {
            invalid: BTreeSet::new(),
        };
        info!("Quote form opened");
        Ok(())
    }

    /// Edit a form field by its wire name, e.g. `("bodyType", "suv")`.
    pub fn update_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.expect_stage(Stage::FormEntry, "update field")?;
        let field: Field = name
            .trim()
            .parse()
            .map_err(|_| QuoteError::UnknownField(name.to_string()))?;
        self.set_field(field, value)
    }

    /// Edit a form field.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<()> {
        self.expect_stage(Stage::FormEntry, "update field")?;
        self.request.set_field(field, value)?;
        debug!("Field {} set to {:?}", field, value);
        if let FlowState::FormEntry { invalid } = &mut self.state {
            if !value.trim().is_empty() {
                invalid.remove(&field);
            }
        }
        Ok(())
    }

    /// Validate and price `request`.
    ///
    /// On success the flow moves to `QuoteShown` and the new quote is returned.
    /// On failure the flow stays in `FormEntry`, keeps `request` as the form
    /// contents and returns `QuoteError::Validation` naming the blank fields.
    pub fn submit_form(&mut self, request: QuoteRequest) -> Result<Quote> {
        self.expect_stage(Stage::FormEntry, "submit form")?;
        self.request = request;

        if let Err(err) = self.request.validate() {
            if let Some(fields) = err.invalid_fields() {
                warn!("Quote form rejected: {}", err);
                self.state = FlowState::FormEntry {
                    invalid: fields.clone(),
                };
            }
            return Err(err);
        }

        let quote = PricingEngine::calculate(self.request.clone());
        info!(
            "Quote calculated: {} {} {} -> {}",
            quote.body_type(),
            quote.coverage_type(),
            quote.duration(),
            quote.display_price()
        );
        self.state = FlowState::QuoteShown(quote.clone());
        Ok(quote)
    }

    /// Submit the form as currently edited.
    pub fn submit_current(&mut self) -> Result<Quote> {
        let request = self.request.clone();
        self.submit_form(request)
    }

    /// Close the form without pricing, discarding what was entered.
    pub fn cancel_form(&mut self) -> Result<()> {
        self.expect_stage(Stage::FormEntry, "cancel form")?;
        self.reset();
        info!("Quote form cancelled");
        Ok(())
    }

    /// Discard the shown quote and start over from landing.
    pub fn request_another_quote(&mut self) -> Result<()> {
        self.expect_stage(Stage::QuoteShown, "request another quote")?;
        self.reset();
        info!("Quote discarded, back to landing");
        Ok(())
    }

    /// Buy the shown quote. Starts the countdown at its initial value.
    pub fn confirm_purchase(&mut self) -> Result<PurchaseRecord> {
        let quote = match mem::replace(&mut self.state, FlowState::Landing) {
            FlowState::QuoteShown(quote) => quote,
            other => {
                let stage = other.stage();
                self.state = other;
                return Err(QuoteError::InvalidState {
                    action: "confirm purchase",
                    stage,
                });
            }
        };
        let record = PurchaseRecord::from(quote);
        info!(
            "Purchase confirmed: {} for {} at {}",
            record.coverage_type(),
            record.body_type(),
            record.display_price()
        );
        self.state = FlowState::PurchaseConfirmed {
            record: record.clone(),
            countdown: self.countdown_start,
        };
        Ok(record)
    }

    /// Advance the purchase countdown by one second.
    pub fn tick_countdown(&mut self) -> TickOutcome {
        let stage = self.stage();
        let FlowState::PurchaseConfirmed { countdown, .. } = &mut self.state else {
            debug!("Countdown tick ignored in stage {}", stage);
            return TickOutcome::Ignored;
        };

        *countdown = countdown.saturating_sub(1);
        let remaining = *countdown;
        if remaining == 0 {
            info!("Countdown expired");
            self.return_home();
            TickOutcome::Expired
        } else {
            debug!("Countdown: {} seconds remaining", remaining);
            TickOutcome::Remaining(remaining)
        }
    }

    /// Go back to landing from any stage, clearing all flow data.
    pub fn return_home(&mut self) {
        if self.state == FlowState::Landing {
            return;
        }
        let from = self.stage();
        self.reset();
        info!("Returned home from {}", from);
    }

    /// Render-ready view of the current stage.
    pub fn snapshot(&self) -> ViewSnapshot {
        match &self.state {
            FlowState::Landing => ViewSnapshot::landing(),
            FlowState::FormEntry { invalid } => ViewSnapshot::form(&self.request, invalid),
            FlowState::QuoteShown(quote) => ViewSnapshot::quote(quote),
            FlowState::PurchaseConfirmed { record, countdown } => {
                ViewSnapshot::purchase(record, *countdown)
            }
        }
    }

    fn reset(&mut self) {
        self.state = FlowState::Landing;
        self.request = QuoteRequest::default();
    }

    fn expect_stage(&self, expected: Stage, action: &'static str) -> Result<()> {
        let stage = self.stage();
        if stage == expected {
            Ok(())
        } else {
            Err(QuoteError::InvalidState { action, stage })
        }
    }
}
