//! Runs the physics and telemetry threads until ENTER is pressed on stdin.
//! Always exits successfully: configuration problems fall back to defaults, telemetry problems stay in the telemetry thread.
use std::{io, thread, time::Duration};

use hyperion_physics::{Propagator, EARTH};
use hyperion_sim::{
    config::SimConfig, driver::Driver, init_tracing, shared::snapshot_slot, telemetry, StopSignal,
};
use tracing::{error, info};

fn main() {
    init_tracing();

    info!("==========================================");
    info!("   HYPERION 6-DOF SIMULATION ENGINE       ");
    info!("==========================================");

    let config = SimConfig::from_env().unwrap_or_else(|e| {
        error!("{}; running with defaults", e);
        SimConfig::default()
    });

    let initial = config.initial_state(&EARTH);
    let (publisher, reader) = snapshot_slot(initial);
    let stop = StopSignal::new();

    let physics = {
        let stop = stop.clone();
        let mut governor = config
            .governor
            .build(Duration::from_micros(config.sleep_spin_margin_us));
        match Driver::new(initial, Propagator::new(EARTH), config.physics_dt, publisher, stop) {
            Ok(mut driver) => thread::Builder::new()
                .name("physics".into())
                .spawn(move || driver.run(&mut governor))
                .map_err(|e| error!("failed to start physics thread: {}", e))
                .ok(),
            Err(e) => {
                error!("physics disabled: {}", e);
                None
            }
        }
    };

    let comms = {
        let stop = stop.clone();
        let config = config.clone();
        thread::Builder::new()
            .name("telemetry".into())
            .spawn(move || telemetry::consumer_thread(reader, stop, config, EARTH))
    };

    info!("Press ENTER to abort simulation...");
    let mut line = String::new();
    if let Err(e) = io::stdin().read_line(&mut line) {
        error!("stdin unavailable ({}), stopping", e);
    }

    stop.raise();

    if let Some(handle) = physics {
        match handle.join() {
            Ok(ticks) => info!("physics joined after {} ticks", ticks),
            Err(_) => error!("physics thread panicked"),
        }
    }
    match comms {
        Ok(handle) => {
            if handle.join().is_err() {
                error!("telemetry thread panicked");
            }
        }
        Err(e) => error!("failed to start telemetry thread: {}", e),
    }
}
