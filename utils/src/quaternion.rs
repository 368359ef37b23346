use thiserror::Error;

use crate::vec3d::Vec3D;

/// the unit quaternion (1, 0, 0, 0) is defined herein as pointing in the postive x direction, with a roll such that the body's secondary axis is +z.
/// to provide a human example, the human oriented (1, 0, 0, 0) would be lying down with their head on the +x end, looking upwards.
///
/// Components are stored as (w, x, y, z). Anything that advances an attitude renormalizes before handing it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion(f64, f64, f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuaternionError {
    #[error("quaternion magnitude {magnitude} is not unit")]
    NotUnit { magnitude: f64 },

    #[error("quaternion has a non-finite component")]
    NonFinite,
}

/// tolerance on |q| - 1 for a quaternion to count as a rotation.
pub const UNIT_EPSILON: f64 = 1e-6;

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn identity() -> Self {
        Quaternion(1.0, 0.0, 0.0, 0.0)
    }

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Result<Quaternion, QuaternionError> {
        //! creates a new Quaternion; checking the values provided produce a unit quaternion.
        if ![w, x, y, z].iter().all(|c| c.is_finite()) {
            return Err(QuaternionError::NonFinite);
        }
        let q = Quaternion(w, x, y, z);
        let magnitude = q.magnitude();
        if (magnitude - 1.0).abs() < UNIT_EPSILON {
            Ok(q)
        } else {
            Err(QuaternionError::NotUnit { magnitude })
        }
    }

    pub fn from_vector(vector: &Vec3D) -> Self {
        //! pure quaternion (0, v). Not a rotation; used as an operand in products.
        Quaternion(0.0, vector.0, vector.1, vector.2)
    }

    pub fn mult(&self, other: &Self) -> Self {
        //! produces self * other (Hamilton product). Remember that order matters.
        Self(
            self.0 * other.0 - self.1 * other.1 - self.2 * other.2 - self.3 * other.3,
            self.0 * other.1 + self.1 * other.0 + self.2 * other.3 - self.3 * other.2,
            self.0 * other.2 - self.1 * other.3 + self.2 * other.0 + self.3 * other.1,
            self.0 * other.3 + self.1 * other.2 - self.2 * other.1 + self.3 * other.0,
        )
    }

    pub fn conjugated(&self) -> Self {
        //! returns the conjugate pair of self.
        Self(self.0, -self.1, -self.2, -self.3)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(
            self.0 + other.0,
            self.1 + other.1,
            self.2 + other.2,
            self.3 + other.3,
        )
    }

    pub fn scale(&self, scale_factor: f64) -> Self {
        Self(
            self.0 * scale_factor,
            self.1 * scale_factor,
            self.2 * scale_factor,
            self.3 * scale_factor,
        )
    }

    pub fn magnitude(&self) -> f64 {
        (self.0 * self.0 + self.1 * self.1 + self.2 * self.2 + self.3 * self.3).sqrt()
    }

    pub fn normalize(&mut self) {
        //! rescales self to unit length in place.
        *self = self.normalized();
    }

    pub fn normalized(&self) -> Self {
        self.scale(1.0 / self.magnitude())
    }

    pub fn is_unit(&self) -> bool {
        (self.magnitude() - 1.0).abs() < UNIT_EPSILON
    }

    pub fn integrate(&self, omega: &Vec3D, dt: f64) -> Self {
        //! advances the attitude by dt under body rate omega (rad/s), following dq/dt = 0.5 * q * omega.
        //! This is a single explicit Euler step followed by renormalization, so it is first order
        //! only; the translational integrator is RK4. Keep the two separate if this ever gets upgraded.
        let rate = self.mult(&Self::from_vector(omega)).scale(0.5 * dt);
        self.add(&rate).normalized()
    }

    pub fn integrate_in_place(&mut self, omega: &Vec3D, dt: f64) {
        *self = self.integrate(omega, dt);
    }

    pub fn to_array(&self) -> [f64; 4] {
        //! components in (w, x, y, z) order.
        [self.0, self.1, self.2, self.3]
    }

    #[cfg(test)]
    fn equal_within_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        // return true if all fields values are within epsilon.
        (self.0 - other.0).abs() < epsilon
            && (self.1 - other.1).abs() < epsilon
            && (self.2 - other.2).abs() < epsilon
            && (self.3 - other.3).abs() < epsilon
    }
}

#[cfg(test)]
mod quaternion_tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::vec3d::Vec3D;

    use super::{Quaternion, QuaternionError};

    #[test]
    fn test_new_valid() {
        // this creation passes validation because its magnitude is 1
        let ff = Quaternion::new(0.0, 0.6, 0.8, 0.0);
        assert_eq!(ff, Ok(Quaternion(0.0, 0.6, 0.8, 0.0)))
    }

    #[test]
    fn test_new_invalid() {
        // magnitude too far from 1, fail
        assert_eq!(
            Quaternion::new(1.0, 1.0, 0.0, 0.0),
            Err(QuaternionError::NotUnit {
                magnitude: 2.0f64.sqrt()
            })
        );

        assert_eq!(
            Quaternion::new(f64::NAN, 0.0, 0.0, 0.0),
            Err(QuaternionError::NonFinite)
        )
    }

    #[test]
    fn test_mult() {
        // multiply two quaternions together, validate output is correct against external calculation.
        let multed = Quaternion(0.3, 0.6, 0.5, 0.547722558).mult(&Quaternion(
            0.8,
            0.1,
            0.5,
            0.316227766,
        ));
        let result = Quaternion(-0.2432050809041, 0.394252604, 0.4150355962, 0.7830463762);
        assert!(multed.equal_within_epsilon(&result, 1e-6), "{multed:?}\n{result:?}")
    }

    #[test]
    fn test_mult_matches_nalgebra() {
        let (a, b) = (Quaternion(0.3, 0.6, 0.5, 0.2), Quaternion(0.8, -0.1, 0.5, 0.4));
        let na = nalgebra::Quaternion::new(a.0, a.1, a.2, a.3)
            * nalgebra::Quaternion::new(b.0, b.1, b.2, b.3);
        let ours = a.mult(&b);
        assert!(ours.equal_within_epsilon(&Quaternion(na.w, na.i, na.j, na.k), 1e-15))
    }

    #[test]
    fn test_conjugate() {
        let quat_test = Quaternion::new(0.0, 0.6, 0.8, 0.0).unwrap();
        assert_eq!(
            quat_test.conjugated(),
            Quaternion::new(0.0, -0.6, -0.8, -0.0).unwrap()
        );
    }

    #[test]
    fn test_from_vector() {
        let test_vector = Vec3D(0.6, 0.8, 0.0);
        assert_eq!(
            Quaternion::from_vector(&test_vector),
            Quaternion::new(0.0, 0.6, 0.8, 0.0).unwrap()
        )
    }

    #[test]
    fn integrate_without_rate_is_identity() {
        let q = Quaternion::new(0.0, 0.6, 0.8, 0.0).unwrap();
        assert!(q
            .integrate(&Vec3D::new(), 0.01)
            .equal_within_epsilon(&q, 1e-15));
    }

    #[test]
    fn integrate_stays_unit() {
        // random attitudes, rates and small steps: every result must come back normalized.
        let mut rng = StdRng::seed_from_u64(0x4859_5045);
        for _ in 0..10_000 {
            let mut q = Quaternion(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if q.magnitude() < 1e-3 {
                continue;
            }
            q.normalize();
            let omega = Vec3D(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            );
            let dt = rng.gen_range(1e-6..1e-2);
            let next = q.integrate(&omega, dt);
            assert!((next.magnitude() - 1.0).abs() < 1e-12, "{next:?}");
        }
    }

    #[test]
    fn integrate_about_fixed_axis() {
        // constant spin about z for 1 rad total; the half-angle form should come out.
        let omega = Vec3D(0.0, 0.0, 0.1);
        let dt = 1e-3;
        let mut q = Quaternion::identity();
        for _ in 0..10_000 {
            q.integrate_in_place(&omega, dt);
        }
        let expected = Quaternion(0.5f64.cos(), 0.0, 0.0, 0.5f64.sin());
        assert!(q.equal_within_epsilon(&expected, 1e-6), "{q:?} vs {expected:?}");
        assert!(q.is_unit());
    }
}
