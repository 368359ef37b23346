//! Real-time 6-DOF propagation: a fixed-rate physics thread publishing whole-state snapshots that a
//! slower telemetry thread streams out over UDP.

pub mod config;
pub mod driver;
pub mod governor;
pub mod shared;
pub mod telemetry;

pub use config::{ConfigError, SimConfig};
pub use driver::{Driver, DriverError, DriverPhase};
pub use governor::{GovernorKind, SleepGovernor, SpinGovernor, TickGovernor};
pub use shared::{snapshot_slot, SnapshotPublisher, SnapshotReader, StopSignal};
pub use telemetry::{TelemetryError, TelemetryPacket, UdpSender, PACKET_SIZE};

/// Installs the process-wide fmt subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // only fails if a subscriber is already set, which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init();
}
