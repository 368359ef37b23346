//! Central body constants. Read-only for the whole process; the gravity model is the only consumer.

/// A central, oblate body. `mu` is G*M in m^3/s^2, `radius` is the equatorial radius in m,
/// `j2` is the dimensionless first zonal harmonic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub name: &'static str,
    pub mu: f64,
    pub radius: f64,
    pub j2: f64,
}

impl Body {
    pub const fn without_oblateness(self) -> Self {
        //! same body with the equatorial bulge removed, i.e. a pure point mass.
        Body { j2: 0.0, ..self }
    }
}

pub const EARTH: Body = Body {
    name: "Earth",
    mu: 3.986004418e14,
    radius: 6378137.0,
    j2: 1.08262668e-3,
};
