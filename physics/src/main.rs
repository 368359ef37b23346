//! Propagates the default LEO start offline for one day at a coarse step, printing the track as CSV.
use hyperion_physics::{simulate, Propagator, SimulationError, State, EARTH};
use hyperion_utils::Vec3D;
use tracing::info;

const TIME_STEP: f64 = 1.0;
const SIM_TIME: f64 = 86400.0;
const STEPS: usize = (SIM_TIME / TIME_STEP) as usize;

fn main() -> Result<(), SimulationError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // keep stdout for the CSV rows
        .init();

    let start = State::circular_leo(&EARTH, 400_000.0, 7660.0, Vec3D(0.01, 0.05, 0.001));
    let summary = simulate(start, &Propagator::new(EARTH), TIME_STEP, STEPS, 60)?;

    info!(
        "done: T+{}s, alt {:.3} km, energy drift {:+.3e}",
        summary.final_state.time,
        summary.final_state.altitude(&EARTH) / 1000.0,
        summary.energy_drift()
    );
    Ok(())
}
