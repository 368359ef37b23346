//! Fixed-step propagation of a full `State`.
//! Translation is classical RK4 over (position, velocity) with the gravity model supplying dv/dt.
//! Attitude takes a single first-order quaternion step with the same dt and a constant body rate.

use crate::{bodies::Body, gravity, state::State};
use hyperion_utils::Vec3D;

#[derive(Debug, Clone, Copy)]
pub struct Propagator {
    pub body: Body,
}

impl Propagator {
    pub const fn new(body: Body) -> Self {
        Propagator { body }
    }

    pub fn step(&self, state: &State, dt: f64) -> State {
        //! returns `state` advanced by exactly dt seconds. dt must be positive and finite.
        let mut next = *state;
        self.step_in_place(&mut next, dt);
        next
    }

    pub fn step_in_place(&self, s: &mut State, dt: f64) {
        let half_dt = 0.5 * dt;
        let accel = |position: Vec3D| gravity::acceleration(&self.body, &position);

        // k1
        let v1 = s.velocity;
        let a1 = accel(s.position);

        // k2, from k1
        let v2 = s.velocity.add(&a1.scale(half_dt));
        let a2 = accel(s.position.add(&v1.scale(half_dt)));

        // k3, from k2
        let v3 = s.velocity.add(&a2.scale(half_dt));
        let a3 = accel(s.position.add(&v2.scale(half_dt)));

        // k4, from k3 over the full step
        let v4 = s.velocity.add(&a3.scale(dt));
        let a4 = accel(s.position.add(&v3.scale(dt)));

        let sixth = dt / 6.0;
        let d_pos = v1.add(&v2.scale(2.0)).add(&v3.scale(2.0)).add(&v4);
        let d_vel = a1.add(&a2.scale(2.0)).add(&a3.scale(2.0)).add(&a4);

        s.position = s.position.add(&d_pos.scale(sixth));
        s.velocity = s.velocity.add(&d_vel.scale(sixth));
        s.attitude.integrate_in_place(&s.angular_rate, dt);
        s.time += dt;
    }
}
