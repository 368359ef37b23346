//! Tick governors: how the driver burns off whatever is left of a tick after the physics is done.
//! A governor only ever affects wall-clock pacing; the integration step stays the configured dt whatever it does.

use std::{
    hint, thread,
    time::{Duration, Instant},
};

use serde::Deserialize;

/// Paces a fixed-rate loop.
pub trait TickGovernor {
    /// Returns once at least `dt` has elapsed since `tick_start`. Returns immediately if the tick already overran.
    fn hold(&mut self, tick_start: Instant, dt: Duration);
}

/// Which governor the driver runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum GovernorKind {
    /// busy-poll the clock. Burns a core, but holds a 100 us tick where sleeping can't.
    #[default]
    Spin,
    /// sleep most of the remainder, spin the tail.
    Sleep,
}

/// Polls the clock until the deadline without yielding or sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinGovernor;

impl TickGovernor for SpinGovernor {
    fn hold(&mut self, tick_start: Instant, dt: Duration) {
        while tick_start.elapsed() < dt {
            hint::spin_loop();
        }
    }
}

/// Sleeps until `spin_margin` before the deadline, then spins the rest.
/// Sleep overshoot is platform dependent, so the margin should cover the OS timer slack.
#[derive(Debug, Clone, Copy)]
pub struct SleepGovernor {
    /// the tail of each tick that is spun rather than slept.
    pub spin_margin: Duration,
}

impl TickGovernor for SleepGovernor {
    fn hold(&mut self, tick_start: Instant, dt: Duration) {
        let deadline = tick_start + dt;
        let sleep_until = deadline.checked_sub(self.spin_margin).unwrap_or(tick_start);
        let now = Instant::now();
        if sleep_until > now {
            thread::sleep(sleep_until - now);
        }
        SpinGovernor.hold(tick_start, dt);
    }
}

impl GovernorKind {
    /// Builds the selected governor.
    pub fn build(self, spin_margin: Duration) -> Box<dyn TickGovernor + Send> {
        match self {
            GovernorKind::Spin => Box::new(SpinGovernor),
            GovernorKind::Sleep => Box::new(SleepGovernor { spin_margin }),
        }
    }
}

impl<G: TickGovernor + ?Sized> TickGovernor for Box<G> {
    fn hold(&mut self, tick_start: Instant, dt: Duration) {
        (**self).hold(tick_start, dt)
    }
}
