//! Timed state node.
//!
//! [`TimedState`] decorates a node in a hierarchical state machine with a
//! wall-clock deadline: entering the state arms a timer, every tick checks
//! it, and once the deadline passes the registered timeout callbacks run and
//! the parent composite state is asked to advance to its next sub-state.

use std::cell::RefCell;
use std::rc::Weak;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error};

use crate::clock::{Clock, SystemClock};
use crate::state::{CompositeState, StateNode};
use crate::time_format;

/// Callback invoked with the expired state once its deadline passes.
pub type TimeoutCallback = Box<dyn Fn(&TimedState) -> Result<()>>;

/// State-machine node that expires after a configured wall-clock duration.
///
/// The node holds no thread of control of its own: the external driver calls
/// the [`StateNode`] hooks and everything here runs synchronously inside
/// them. Callbacks receive `&TimedState`, so registering further callbacks or
/// re-arming from inside a timeout handler does not compile; re-arm on the
/// next enter or via [`TimedState::reset_timer`] instead.
pub struct TimedState {
    duration_secs: f64,
    deadline: Option<DateTime<Utc>>,
    callbacks: Vec<TimeoutCallback>,
    parent: Option<Weak<RefCell<dyn CompositeState>>>,
    clock: Box<dyn Clock>,
    active: bool,
    fired: bool,
}

impl std::fmt::Debug for TimedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedState")
            .field("duration_secs", &self.duration_secs)
            .field("deadline", &self.deadline)
            .field("callbacks", &self.callbacks.len())
            .field("parent", &self.parent.is_some())
            .field("active", &self.active)
            .field("fired", &self.fired)
            .finish()
    }
}

impl TimedState {
    /// Create a timed state with the given duration in seconds, backed by
    /// the system clock.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            deadline: None,
            callbacks: Vec::new(),
            parent: None,
            clock: Box::new(SystemClock),
            active: false,
            fired: false,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Attach the enclosing composite state advanced on expiry.
    ///
    /// The handle is weak: the parent owns its children, never the reverse.
    pub fn with_parent(mut self, parent: Weak<RefCell<dyn CompositeState>>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Register a callback invoked when the deadline passes.
    ///
    /// Callbacks run in registration order; duplicates are allowed. A failing
    /// callback is logged and does not stop the rest of the timeout sequence.
    pub fn on_timeout<F>(&mut self, callback: F)
    where
        F: Fn(&TimedState) -> Result<()> + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Set the duration, re-arming immediately if the state is running.
    ///
    /// A negative duration arms a deadline already in the past, so the state
    /// expires on the next tick; NaN behaves like zero, and durations beyond
    /// chrono's representable range saturate. While inactive the new duration
    /// has no effect until the next arming.
    pub fn reset_duration(&mut self, duration_secs: f64) {
        self.duration_secs = duration_secs;
        if self.active {
            self.reset_timer();
        }
    }

    /// Arm the timer: the deadline becomes now + duration.
    ///
    /// Callable at any time, independent of whether the state is running.
    pub fn reset_timer(&mut self) {
        let now = self.clock.now();
        debug!(now = %now, duration_secs = self.duration_secs, "timer armed");
        self.deadline = Some(saturating_deadline(now, self.duration_secs));
        self.fired = false;
    }

    /// Whether the state is currently active (entered and not yet exited).
    pub fn is_running(&self) -> bool {
        self.active
    }

    /// Configured duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Raw deadline; `None` until the timer has been armed once.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Seconds until the deadline; negative once expired.
    pub fn seconds_left(&self) -> Option<f64> {
        self.deadline
            .map(|deadline| delta_secs(deadline - self.clock.now()))
    }

    /// Seconds elapsed since the last arming.
    pub fn seconds_passed(&self) -> Option<f64> {
        self.seconds_left().map(|left| self.duration_secs - left)
    }

    /// Remaining time as `HH:MM:SS` / `MM:SS`, clamped to zero once expired.
    pub fn formatted_time_left(&self) -> Option<String> {
        self.seconds_left().map(time_format::clock)
    }

    /// Remaining time with a `.mmm` milliseconds suffix.
    pub fn formatted_time_left_millis(&self) -> Option<String> {
        self.seconds_left().map(time_format::clock_millis)
    }

    fn fire_timeout(&self) {
        debug!("running timeout sequence");
        for (index, callback) in self.callbacks.iter().enumerate() {
            if let Err(err) = callback(self) {
                error!(index, error = %err, "timeout callback failed");
            }
        }
        let Some(parent) = self.parent.as_ref().and_then(|p| p.upgrade()) else {
            debug!("no parent state to advance");
            return;
        };
        debug!("advancing parent to next sub-state");
        let borrow = parent.try_borrow_mut();
        match borrow {
            Ok(mut parent) => {
                if let Err(err) = parent.next_sub_state() {
                    error!(error = %err, "parent transition failed");
                }
            }
            Err(_) => error!("parent state unavailable for transition"),
        }
    }
}

impl StateNode for TimedState {
    fn on_enter(&mut self) {
        self.active = true;
        self.reset_timer();
    }

    fn on_tick(&mut self) {
        if !self.active || self.fired {
            return;
        }
        let Some(deadline) = self.deadline else {
            return;
        };
        let now = self.clock.now();
        // non-strict comparison: a tie counts as expired, never as "not yet"
        if now >= deadline {
            debug!(
                now = %now,
                deadline = %deadline,
                overshoot_secs = delta_secs(now - deadline),
                "timed state expired"
            );
            self.fired = true;
            self.fire_timeout();
        }
    }

    fn on_exit(&mut self) {
        self.active = false;
    }
}

fn delta_secs(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1000.0
}

fn saturating_deadline(now: DateTime<Utc>, duration_secs: f64) -> DateTime<Utc> {
    // f64 -> i64 saturates at the bounds and maps NaN to zero
    let delta = TimeDelta::milliseconds((duration_secs * 1000.0).round() as i64);
    now.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
