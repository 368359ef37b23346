//! Telemetry out: the 88-byte state packet, a fire-and-forget UDP sender, and the consumer loop that feeds it.
//!
//! Wire layout, 11 little-endian f64s with no header or padding:
//! time | pos x y z | vel x y z | att w x y z

use std::{
    io,
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket},
    thread,
    time::Instant,
};

use bytemuck::{Pod, Zeroable};
use hyperion_physics::{gravity::specific_energy, Body, State};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    config::SimConfig,
    shared::{SnapshotReader, StopSignal},
};

/// Size of one packet on the wire.
pub const PACKET_SIZE: usize = 88;
const FIELDS: usize = 11;

/// Errors that end the telemetry side. None of them reach the physics thread.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// no local socket could be opened.
    #[error("failed to bind telemetry socket: {0}")]
    Bind(#[source] io::Error),
}

/// One state snapshot in wire order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TelemetryPacket {
    /// mission time, s.
    pub timestamp: f64,
    /// position x, m.
    pub pos_x: f64,
    /// position y, m.
    pub pos_y: f64,
    /// position z, m.
    pub pos_z: f64,
    /// velocity x, m/s.
    pub vel_x: f64,
    /// velocity y, m/s.
    pub vel_y: f64,
    /// velocity z, m/s.
    pub vel_z: f64,
    /// attitude scalar part.
    pub q_w: f64,
    /// attitude x.
    pub q_x: f64,
    /// attitude y.
    pub q_y: f64,
    /// attitude z.
    pub q_z: f64,
}

impl TelemetryPacket {
    /// Packs the fields the ground side cares about. Angular rate is not sent.
    pub fn from_state(state: &State) -> Self {
        let [q_w, q_x, q_y, q_z] = state.attitude.to_array();
        TelemetryPacket {
            timestamp: state.time,
            pos_x: state.position.0,
            pos_y: state.position.1,
            pos_z: state.position.2,
            vel_x: state.velocity.0,
            vel_y: state.velocity.1,
            vel_z: state.velocity.2,
            q_w,
            q_x,
            q_y,
            q_z,
        }
    }

    /// Little-endian wire bytes.
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let fields: [f64; FIELDS] = bytemuck::cast(*self);
        bytemuck::cast(fields.map(|f| f.to_bits().to_le()))
    }

    /// Decodes a datagram. Anything other than exactly [`PACKET_SIZE`] bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; PACKET_SIZE] = bytes.try_into().ok()?;
        let words: [u64; FIELDS] = bytemuck::cast(raw);
        Some(bytemuck::cast(words.map(|w| f64::from_bits(u64::from_le(w)))))
    }
}

/// Best-effort datagram sender. Nothing is acknowledged or retried.
#[derive(Debug)]
pub struct UdpSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSender {
    /// Opens an ephemeral local socket for sending to `target`.
    pub fn bind(target: SocketAddr) -> Result<Self, TelemetryError> {
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local).map_err(TelemetryError::Bind)?;
        Ok(UdpSender { socket, target })
    }

    /// Where packets go.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Sends one packet. Failures are logged at debug level and otherwise dropped.
    pub fn send_state(&self, state: &State) {
        let packet = TelemetryPacket::from_state(state).to_bytes();
        if let Err(e) = self.socket.send_to(&packet, self.target) {
            debug!("telemetry send to {} failed: {}", self.target, e);
        }
    }
}

/// One status line's worth of numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    /// mission time, s.
    pub time: f64,
    /// height above the body radius, km.
    pub altitude_km: f64,
    /// m/s.
    pub speed: f64,
    /// specific mechanical energy, J/kg.
    pub energy: f64,
}

impl Status {
    /// Derives the status numbers from a snapshot.
    pub fn of(state: &State, body: &Body) -> Self {
        Status {
            time: state.time,
            altitude_km: state.altitude(body) / 1000.0,
            speed: state.speed(),
            energy: specific_energy(body, &state.position, &state.velocity),
        }
    }
}

/// Consumer loop: every interval, copy the latest snapshot out of the slot and send it.
/// Runs until `stop` is raised; a bind failure ends this loop (and only this loop) early.
pub fn run_consumer(
    reader: SnapshotReader,
    stop: StopSignal,
    config: &SimConfig,
    body: &Body,
) -> Result<u64, TelemetryError> {
    let sender = UdpSender::bind(config.telemetry_target)?;
    info!("UDP stream target: {}", sender.target());

    let interval = config.telemetry_interval();
    let status_every = u64::from(config.status_every.max(1));
    let mut sent: u64 = 0;

    while !stop.is_raised() {
        let started = Instant::now();
        let snapshot = reader.latest();

        sender.send_state(&snapshot);

        if sent % status_every == 0 {
            let status = Status::of(&snapshot, body);
            info!(
                "T+{:.2}s | ALT: {:.3} km | V: {:.3} m/s | E: {:.6e} J/kg",
                status.time, status.altitude_km, status.speed, status.energy
            );
        }
        sent += 1;

        if let Some(rest) = interval.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    info!("telemetry thread stopping after {} packets", sent);
    Ok(sent)
}

/// Thread entry point wrapping [`run_consumer`]: errors are logged, never propagated.
pub fn consumer_thread(reader: SnapshotReader, stop: StopSignal, config: SimConfig, body: Body) {
    if let Err(e) = run_consumer(reader, stop, &config, &body) {
        error!("telemetry disabled: {}", e);
    }
}
