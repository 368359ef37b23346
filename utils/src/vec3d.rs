//! basic 3D vector. Used for positions, velocities, accelerations and angular rates.
//! All components are in the same Earth-centred Cartesian frame; the type itself doesn't care which.

/// below this magnitude a vector is treated as having no direction.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

#[derive(Debug, PartialEq, PartialOrd, Copy, Clone)]
pub struct Vec3D(pub f64, pub f64, pub f64);

impl Default for Vec3D {
    fn default() -> Self {
        Self::new()
    }
}

impl Vec3D {
    pub const fn new() -> Self {
        Self(0.0, 0.0, 0.0)
    }

    pub fn add(&self, other: &Self) -> Self {
        //! composes two vectors.
        Self(self.0 + other.0, self.1 + other.1, self.2 + other.2)
    }

    pub fn sub(&self, other: &Self) -> Self {
        //! subtract other from self.
        Self(self.0 - other.0, self.1 - other.1, self.2 - other.2)
    }

    pub fn scale(&self, scale_factor: f64) -> Self {
        //! scales the vector by a given magnitude.
        Self(
            self.0 * scale_factor,
            self.1 * scale_factor,
            self.2 * scale_factor,
        )
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0 * other.0 + self.1 * other.1 + self.2 * other.2
    }

    pub fn cross(&self, other: &Self) -> Self {
        //! right-handed cross product, self x other.
        Self(
            self.1 * other.2 - self.2 * other.1,
            self.2 * other.0 - self.0 * other.2,
            self.0 * other.1 - self.1 * other.0,
        )
    }

    pub fn magnitude(&self) -> f64 {
        //! returns the magnitude of the current vector e.g Vec3D(3, 4, 0).magnitude() == 5.
        self.dot(self).sqrt()
    }

    pub fn normalized(&self) -> Self {
        //! unit vector in the direction of self. Degenerate (near-zero) input gives the zero vector instead of NaNs.
        let mag = self.magnitude();
        if mag < NORMALIZE_EPSILON {
            return Self::new();
        }
        self.scale(1.0 / mag)
    }
}
