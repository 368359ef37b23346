//! Orbital and attitude physics for a single rigid body about an oblate central body.
pub mod bodies;
pub mod gravity;
pub mod orbit;
pub mod propagator;
pub mod state;

pub use bodies::{Body, EARTH};
pub use orbit::{simulate, OrbitSummary, SimulationError};
pub use propagator::Propagator;
pub use state::State;
