use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{trace, warn};

use crate::error::ChartResult;

static NEXT_CLOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Receiver of display refresh ticks.
pub trait FrameListener {
    /// Called once per frame with the clock timestamp in seconds.
    fn on_frame(&mut self, timestamp: f64) -> ChartResult<()>;
}

impl<L: FrameListener + ?Sized> FrameListener for Box<L> {
    fn on_frame(&mut self, timestamp: f64) -> ChartResult<()> {
        (**self).on_frame(timestamp)
    }
}

/// Handle returned by [`FrameClock::register`].
///
/// It is the only way to reach or release the listener, so dropping it
/// without calling [`FrameClock::unregister`] keeps the listener ticking.
#[must_use = "dropping the registration makes the listener impossible to unregister"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ClockRegistration {
    clock_id: u64,
    slot: u64,
}

/// Shared per-frame clock ticking listeners in registration order.
///
/// Owned explicitly by the host: create it once, feed it display refresh
/// timestamps through [`FrameClock::tick`] and release listeners
/// deterministically when their owner goes away.
#[derive(Debug)]
pub struct FrameClock<L: FrameListener> {
    id: u64,
    next_slot: u64,
    listeners: Vec<(u64, L)>,
    last_timestamp: Option<f64>,
}

impl<L: FrameListener> FrameClock<L> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_CLOCK_ID.fetch_add(1, Ordering::Relaxed),
            next_slot: 0,
            listeners: Vec::new(),
            last_timestamp: None,
        }
    }

    pub fn register(&mut self, listener: L) -> ClockRegistration {
        let slot = self.next_slot;
        self.next_slot += 1;
        self.listeners.push((slot, listener));
        trace!(clock = self.id, slot, "frame listener registered");
        ClockRegistration {
            clock_id: self.id,
            slot,
        }
    }

    /// Removes the listener and hands it back. Handles of other clocks yield `None`.
    pub fn unregister(&mut self, registration: ClockRegistration) -> Option<L> {
        let position = self.position(&registration)?;
        let (_, listener) = self.listeners.remove(position);
        trace!(clock = self.id, slot = registration.slot, "frame listener unregistered");
        Some(listener)
    }

    #[must_use]
    pub fn get(&self, registration: &ClockRegistration) -> Option<&L> {
        let position = self.position(registration)?;
        Some(&self.listeners[position].1)
    }

    pub fn get_mut(&mut self, registration: &ClockRegistration) -> Option<&mut L> {
        let position = self.position(registration)?;
        Some(&mut self.listeners[position].1)
    }

    /// Delivers one frame to every listener.
    ///
    /// Failing listeners are logged and skipped; the rest still tick.
    /// Returns the number of listeners that failed.
    pub fn tick(&mut self, timestamp: f64) -> usize {
        self.last_timestamp = Some(timestamp);
        let mut failures = 0;
        for (slot, listener) in &mut self.listeners {
            if let Err(err) = listener.on_frame(timestamp) {
                failures += 1;
                warn!(error = %err, clock = self.id, slot = *slot, "frame listener failed");
            }
        }
        failures
    }

    /// Releases every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Timestamp of the most recent tick.
    #[must_use]
    pub fn current_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    fn position(&self, registration: &ClockRegistration) -> Option<usize> {
        if registration.clock_id != self.id {
            return None;
        }
        self.listeners
            .binary_search_by_key(&registration.slot, |(slot, _)| *slot)
            .ok()
    }
}

impl<L: FrameListener> Default for FrameClock<L> {
    fn default() -> Self {
        Self::new()
    }
}
