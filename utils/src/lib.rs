//! Value types shared by the physics and simulation crates: a plain f64 3-vector and the attitude quaternion.
mod quaternion;
mod vec3d;

pub use quaternion::{Quaternion, QuaternionError, UNIT_EPSILON};
pub use vec3d::{Vec3D, NORMALIZE_EPSILON};
