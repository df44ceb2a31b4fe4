//! Background one-second ticker for the purchase countdown.
//!
//! `CountdownTimer::start` spawns a thread that pushes a `CountdownTick` into the
//! supplied channel at every interval until the timer is cancelled or dropped.
//! Each tick carries the id of the timer that produced it, so a consumer can
//! discard ticks that were already queued when their timer was cancelled.
//!
//! Cancellation is synchronous: once `cancel` (or `drop`) returns, the thread has
//! exited and no further tick from this timer will be sent.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, select, tick};
use log::{debug, error};

/// Default spacing between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One elapsed countdown interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownTick {
    /// Id of the timer that emitted this tick.
    pub timer_id: u64,
}

/// Handle to a running ticker thread.
pub struct CountdownTimer {
    id: u64,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Start emitting ticks for timer `id` every `interval` into `ticks_tx`.
    pub fn start(id: u64, interval: Duration, ticks_tx: Sender<CountdownTick>) -> Self {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let handle = thread::spawn(move || {
            let ticker = tick(interval);
            debug!("Countdown timer {} started ({:?} interval)", id, interval);
            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        if ticks_tx.send(CountdownTick { timer_id: id }).is_err() {
                            debug!("Countdown timer {}: receiver dropped", id);
                            break;
                        }
                    }
                }
            }
            debug!("Countdown timer {} stopped", id);
        });

        Self {
            id,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Id stamped on every tick from this timer.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects `stop_rx`, which wakes the select.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Countdown timer {} thread panicked", self.id);
            }
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
