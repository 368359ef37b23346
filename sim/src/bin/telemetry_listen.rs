//! Ground-side listener for the telemetry stream. Decodes each packet and tracks specific energy drift,
//! which is the quickest way to see whether the integrator is behaving. Stop it with Ctrl-C.
use std::net::UdpSocket;

use hyperion_physics::{gravity::specific_energy, EARTH};
use hyperion_sim::{init_tracing, SimConfig, TelemetryError, TelemetryPacket, PACKET_SIZE};
use hyperion_utils::Vec3D;
use tracing::{error, info, warn};

fn main() {
    init_tracing();

    let config = SimConfig::from_env().unwrap_or_else(|e| {
        error!("{}; listening with defaults", e);
        SimConfig::default()
    });

    if let Err(e) = listen(&config) {
        error!("{}", e);
    }
}

fn listen(config: &SimConfig) -> Result<(), TelemetryError> {
    let socket = UdpSocket::bind(config.telemetry_target).map_err(TelemetryError::Bind)?;
    info!("listening for telemetry on {}...", config.telemetry_target);

    let mut buf = [0u8; 1024];
    let mut first_energy: Option<f64> = None;
    let mut received: u64 = 0;

    loop {
        let (len, from) = match socket.recv_from(&mut buf) {
            Ok(r) => r,
            Err(e) => {
                warn!("receive failed: {}", e);
                continue;
            }
        };
        let Some(packet) = buf.get(..len).and_then(TelemetryPacket::from_bytes) else {
            warn!("ignoring {} byte datagram from {} (expected {})", len, from, PACKET_SIZE);
            continue;
        };

        let position = Vec3D(packet.pos_x, packet.pos_y, packet.pos_z);
        let velocity = Vec3D(packet.vel_x, packet.vel_y, packet.vel_z);
        let energy = specific_energy(&EARTH, &position, &velocity);
        let initial = *first_energy.get_or_insert(energy);

        if received % u64::from(config.status_every.max(1)) == 0 {
            info!(
                "T+{:.2}s | ALT: {:.3} km | E: {:.6e} J/kg | drift {:+.3e}",
                packet.timestamp,
                (position.magnitude() - EARTH.radius) / 1000.0,
                energy,
                (energy - initial) / initial.abs()
            );
        }
        received += 1;
    }
}
