//! The real-time physics loop. One `Driver` owns the authoritative state, advances it by a fixed dt every tick,
//! publishes a whole copy of it, then waits out the rest of the tick.

use std::time::{Duration, Instant};

use hyperion_physics::{Propagator, State};
use thiserror::Error;
use tracing::info;

use crate::{
    governor::TickGovernor,
    shared::{SnapshotPublisher, StopSignal},
};

/// Wall-clock length of a tick of `dt` seconds, or `None` if dt is not positive or won't fit a `Duration`.
pub fn tick_length(dt: f64) -> Option<Duration> {
    if dt.is_finite() && dt > 0.0 {
        Duration::try_from_secs_f64(dt).ok()
    } else {
        None
    }
}

/// Lifecycle of a [`Driver`]. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// ticking.
    Running,
    /// stop observed; the tick in flight is being finished.
    Stopping,
    /// loop has returned. Nothing is published after this.
    Stopped,
}

/// Errors building a [`Driver`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DriverError {
    /// dt is not positive and finite, or is too long to be a wall-clock tick.
    #[error("time step must be a positive, finite number of seconds that fits a Duration, got {0}")]
    BadTimeStep(f64),
}

/// Producer side of the simulation.
pub struct Driver {
    state: State,
    propagator: Propagator,
    dt: f64,
    tick_length: Duration,
    publisher: SnapshotPublisher,
    stop: StopSignal,
    phase: DriverPhase,
    ticks: u64,
}

impl Driver {
    /// `dt` is both the integration step (s) and the wall-clock tick length.
    pub fn new(
        initial: State,
        propagator: Propagator,
        dt: f64,
        publisher: SnapshotPublisher,
        stop: StopSignal,
    ) -> Result<Self, DriverError> {
        let tick_length = tick_length(dt).ok_or(DriverError::BadTimeStep(dt))?;
        Ok(Driver {
            state: initial,
            propagator,
            dt,
            tick_length,
            publisher,
            stop,
            phase: DriverPhase::Running,
            ticks: 0,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// The authoritative (unpublished) state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One tick of work without the timing: propagate by dt, then publish the result.
    pub fn tick(&mut self) {
        self.propagator.step_in_place(&mut self.state, self.dt);
        self.publisher.publish(&self.state);
        self.ticks += 1;
    }

    /// Runs until the stop signal is seen, returning the number of ticks completed.
    /// The flag is checked once per tick, before the tick starts; a started tick always completes.
    pub fn run<G: TickGovernor + ?Sized>(&mut self, governor: &mut G) -> u64 {
        info!(
            "physics thread initialising @ {:.0} Hz (dt = {} s)",
            1.0 / self.dt,
            self.dt
        );

        while self.phase == DriverPhase::Running {
            if self.stop.is_raised() {
                self.phase = DriverPhase::Stopping;
                break;
            }

            let tick_start = Instant::now();
            self.tick();
            governor.hold(tick_start, self.tick_length);
        }

        self.phase = DriverPhase::Stopped;
        info!(
            "physics thread stopping after {} ticks at T+{:.4}s",
            self.ticks, self.state.time
        );
        self.ticks
    }
}
