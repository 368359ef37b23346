//! Offline (not real-time) propagation, for checking trajectories and integrator drift without the driver.
use thiserror::Error;
use tracing::info;

use crate::{gravity::specific_energy, propagator::Propagator, state::State};

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("time step must be positive and finite, got {0}")]
    BadTimeStep(f64),

    #[error("print interval must be at least 1")]
    BadPrintInterval,
}

/// What came out of an offline run.
#[derive(Debug, Clone, Copy)]
pub struct OrbitSummary {
    pub final_state: State,
    pub initial_energy: f64,
    pub final_energy: f64,
}

impl OrbitSummary {
    pub fn energy_drift(&self) -> f64 {
        //! relative change in specific energy over the run.
        (self.final_energy - self.initial_energy) / self.initial_energy.abs()
    }
}

pub fn simulate(
    start: State,
    propagator: &Propagator,
    dt: f64,
    steps: usize,
    print_interval: usize,
) -> Result<OrbitSummary, SimulationError> {
    //! runs `steps` fixed steps of dt from `start`. Every `print_interval` steps a `T, x, y, z` row goes to stdout.
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimulationError::BadTimeStep(dt));
    }
    if print_interval == 0 {
        return Err(SimulationError::BadPrintInterval);
    }

    let body = &propagator.body;
    let mut state = start;
    let initial_energy = specific_energy(body, &state.position, &state.velocity);

    for step in 0..steps {
        if step % print_interval == 0 {
            let energy = specific_energy(body, &state.position, &state.velocity);
            println!(
                "{:.3}, {}, {}, {}",
                state.time, state.position.0, state.position.1, state.position.2
            );
            if step > 0 {
                info!(
                    "T+{:.1}s energy: {:.6e} ({:+.2e} relative)",
                    state.time,
                    energy,
                    (energy - initial_energy) / initial_energy.abs()
                );
            }
        }
        propagator.step_in_place(&mut state, dt);
    }

    Ok(OrbitSummary {
        final_state: state,
        initial_energy,
        final_energy: specific_energy(body, &state.position, &state.velocity),
    })
}
