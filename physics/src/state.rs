//! The full 6-DOF state of the propagated body.

use crate::bodies::Body;
use hyperion_utils::{Quaternion, Vec3D};

/// Everything the propagator advances. It is a plain value: the real-time driver keeps one
/// authoritative copy and publishes whole copies of it, never references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub position: Vec3D,     // body-fixed Cartesian, m
    pub velocity: Vec3D,     // m/s
    pub attitude: Quaternion,
    pub angular_rate: Vec3D, // rad/s, held constant; there is no torque model
    pub time: f64,           // mission elapsed time, s
}

impl State {
    pub fn new(
        position: Vec3D,
        velocity: Vec3D,
        attitude: Quaternion,
        angular_rate: Vec3D,
    ) -> Self {
        State {
            position,
            velocity,
            attitude,
            angular_rate,
            time: 0.0,
        }
    }

    pub fn circular_leo(body: &Body, altitude: f64, speed: f64, angular_rate: Vec3D) -> Self {
        //! starts over the equator on +x, moving along +y, with identity attitude.
        //! `speed` is taken as given; pass sqrt(mu/r) for a truly circular orbit.
        State::new(
            Vec3D(body.radius + altitude, 0.0, 0.0),
            Vec3D(0.0, speed, 0.0),
            Quaternion::identity(),
            angular_rate,
        )
    }

    pub fn altitude(&self, body: &Body) -> f64 {
        self.position.magnitude() - body.radius
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}
