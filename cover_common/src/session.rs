//! Controller plus countdown scheduling for one interactive user.
//!
//! `QuoteSession` owns a `QuoteFlowController` and starts or cancels a
//! `CountdownTimer` after every action so that ticks are delivered exactly while
//! the controller is in `PurchaseConfirmed`. Ticks from a cancelled timer that
//! were already queued are recognised by id and dropped before they reach the
//! controller.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use crate::countdown::{CountdownTick, CountdownTimer, TICK_INTERVAL};
use crate::flow::{QuoteFlowController, TickOutcome};
use crate::request::QuoteRequest;
use crate::result::Result;
use crate::view::ViewSnapshot;

/// User action forwarded from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// "Get Your Quote Now".
    StartQuote,
    /// A form field changed.
    UpdateField {
        /// Wire name of the field, e.g. `chassisNo`.
        name: String,
        /// New value as typed or selected.
        value: String,
    },
    /// Submit the form as currently edited.
    Submit,
    /// Submit a complete form in one step.
    SubmitRequest(QuoteRequest),
    /// "Cancel" on the form.
    Cancel,
    /// "Get Another Quote".
    AnotherQuote,
    /// "Purchase Now".
    Purchase,
    /// "Return Home Now".
    ReturnHome,
}

/// A controller together with the ticker that drives its countdown.
pub struct QuoteSession {
    controller: QuoteFlowController,
    timer: Option<CountdownTimer>,
    next_timer_id: u64,
    interval: Duration,
    ticks_tx: Sender<CountdownTick>,
    ticks_rx: Receiver<CountdownTick>,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(QuoteFlowController::new(), TICK_INTERVAL)
    }
}

impl QuoteSession {
    /// Wrap `controller`, ticking its countdown every `interval`.
    pub fn new(controller: QuoteFlowController, interval: Duration) -> Self {
        let (ticks_tx, ticks_rx) = unbounded();
        let mut session = Self {
            controller,
            timer: None,
            next_timer_id: 0,
            interval,
            ticks_tx,
            ticks_rx,
        };
        session.sync_timer();
        session
    }

    /// Read access to the flow state.
    pub fn controller(&self) -> &QuoteFlowController {
        &self.controller
    }

    /// Channel to `select!` on for countdown ticks.
    pub fn ticks(&self) -> &Receiver<CountdownTick> {
        &self.ticks_rx
    }

    /// `true` while a countdown timer is running.
    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Current view of the flow.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.controller.snapshot()
    }

    /// Apply a user action, then start or stop the countdown as needed.
    ///
    /// The timer is re-synced whether or not the action succeeds.
    pub fn apply(&mut self, action: FlowAction) -> Result<()> {
        let result = self.dispatch(action);
        self.sync_timer();
        result
    }

    /// Deliver a tick received from [`ticks`](Self::ticks).
    pub fn on_tick(&mut self, tick: CountdownTick) -> TickOutcome {
        let current = self.timer.as_ref().map(CountdownTimer::id);
        if current != Some(tick.timer_id) {
            debug!("Dropping stale tick from timer {}", tick.timer_id);
            return TickOutcome::Ignored;
        }
        let outcome = self.controller.tick_countdown();
        self.sync_timer();
        outcome
    }

    fn dispatch(&mut self, action: FlowAction) -> Result<()> {
        let flow = &mut self.controller;
        match action {
            FlowAction::StartQuote => flow.start_quote(),
            FlowAction::UpdateField { name, value } => flow.update_field(&name, &value),
            FlowAction::Submit => flow.submit_current().map(|_| ()),
            FlowAction::SubmitRequest(request) => flow.submit_form(request).map(|_| ()),
            FlowAction::Cancel => flow.cancel_form(),
            FlowAction::AnotherQuote => flow.request_another_quote(),
            FlowAction::Purchase => flow.confirm_purchase().map(|_| ()),
            FlowAction::ReturnHome => {
                flow.return_home();
                Ok(())
            }
        }
    }

    fn sync_timer(&mut self) {
        match (self.controller.countdown_active(), self.timer.is_some()) {
            (true, false) => {
                self.next_timer_id += 1;
                let timer = CountdownTimer::start(
                    self.next_timer_id,
                    self.interval,
                    self.ticks_tx.clone(),
                );
                self.timer = Some(timer);
            }
            (false, true) => self.stop_timer(),
            _ => {}
        }
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("Cancelling countdown timer {}", timer.id());
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Stage;

    fn filled() -> QuoteRequest {
        QuoteRequest {
            car_make: "Toyota".into(),
            vehicle_registration: "ALD 300".into(),
            color: "Red".into(),
            chassis_no: "KUN25".into(),
            ..Default::default()
        }
    }

    fn purchased(interval: Duration) -> QuoteSession {
        let mut session = QuoteSession::new(QuoteFlowController::new(), interval);
        session.apply(FlowAction::StartQuote).unwrap();
        session.apply(FlowAction::SubmitRequest(filled())).unwrap();
        session.apply(FlowAction::Purchase).unwrap();
        session
    }

    #[test]
    fn timer_runs_only_while_purchase_is_confirmed() {
        let mut session = QuoteSession::new(QuoteFlowController::new(), Duration::from_secs(60));
        assert!(!session.timer_running());
        session.apply(FlowAction::StartQuote).unwrap();
        session.apply(FlowAction::SubmitRequest(filled())).unwrap();
        assert!(!session.timer_running());
        session.apply(FlowAction::Purchase).unwrap();
        assert!(session.timer_running());
        session.apply(FlowAction::ReturnHome).unwrap();
        assert!(!session.timer_running());
        assert_eq!(session.controller().stage(), Stage::Landing);
    }

    #[test]
    fn ticks_from_a_cancelled_timer_are_dropped() {
        let mut session = purchased(Duration::from_secs(60));
        let stale = CountdownTick { timer_id: 1 };
        session.apply(FlowAction::ReturnHome).unwrap();
        session.apply(FlowAction::StartQuote).unwrap();
        session.apply(FlowAction::SubmitRequest(filled())).unwrap();
        session.apply(FlowAction::Purchase).unwrap();

        assert_eq!(session.on_tick(stale), TickOutcome::Ignored);
        assert_eq!(session.controller().countdown(), Some(10));
        assert_eq!(session.on_tick(CountdownTick { timer_id: 2 }), TickOutcome::Remaining(9));
    }

    #[test]
    fn failed_action_keeps_state_and_reports_error() {
        let mut session = QuoteSession::default();
        assert!(session.apply(FlowAction::Purchase).is_err());
        assert!(session.apply(FlowAction::Submit).is_err());
        assert_eq!(session.controller().stage(), Stage::Landing);
        assert!(!session.timer_running());
    }

    #[test]
    fn real_ticks_count_down_to_landing() {
        let mut session = purchased(Duration::from_millis(2));
        let mut outcome = TickOutcome::Ignored;
        for _ in 0..10 {
            let tick = session
                .ticks()
                .recv_timeout(Duration::from_secs(2))
                .unwrap();
            outcome = session.on_tick(tick);
        }
        assert_eq!(outcome, TickOutcome::Expired);
        assert_eq!(session.controller().stage(), Stage::Landing);
        assert!(!session.timer_running());

        while let Ok(tick) = session.ticks().try_recv() {
            assert_eq!(session.on_tick(tick), TickOutcome::Ignored);
        }
        assert_eq!(session.controller().request(), &QuoteRequest::default());
    }
}
