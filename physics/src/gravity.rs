//! Instantaneous gravitational acceleration about a central body: point mass plus the J2 oblateness term.
//! Positions are body-centred; nothing here guards against r -> 0, callers must keep well clear of the origin.

use crate::bodies::Body;
use hyperion_utils::Vec3D;

pub fn acceleration(body: &Body, position: &Vec3D) -> Vec3D {
    //! total acceleration felt at `position`.
    point_mass(body, position).add(&j2_correction(body, position))
}

pub fn point_mass(body: &Body, position: &Vec3D) -> Vec3D {
    //! monopole term, -mu/r^3 * r_vec.
    let r_sq = position.dot(position);
    let r_mag = r_sq.sqrt();
    position.scale(-body.mu / (r_sq * r_mag))
}

pub fn j2_correction(body: &Body, position: &Vec3D) -> Vec3D {
    //! first zonal harmonic. The x/y terms use (5z^2/r^2 - 1), the polar z term (5z^2/r^2 - 3).
    let r_sq = position.dot(position);
    let r_mag = r_sq.sqrt();
    let z_ratio = 5.0 * position.2 * position.2 / r_sq;

    let factor = 1.5 * body.j2 * body.mu * body.radius * body.radius / (r_sq * r_sq);

    Vec3D(
        factor * position.0 / r_mag * (z_ratio - 1.0),
        factor * position.1 / r_mag * (z_ratio - 1.0),
        factor * position.2 / r_mag * (z_ratio - 3.0),
    )
}

pub fn specific_energy(body: &Body, position: &Vec3D, velocity: &Vec3D) -> f64 {
    //! specific mechanical energy v^2/2 - mu/r (J/kg) against the point mass only.
    //! Not conserved exactly once J2 is on, but drift in it is still the quickest integrator sanity check.
    velocity.dot(velocity) / 2.0 - body.mu / position.magnitude()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::EARTH;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const LEO_RADIUS: f64 = 6778137.0;

    fn j2_factor(r: f64) -> f64 {
        1.5 * EARTH.j2 * EARTH.mu * EARTH.radius * EARTH.radius / r.powi(4)
    }

    #[test]
    fn point_mass_points_at_origin() {
        let position = Vec3D(4.0e6, -3.0e6, 5.0e6);
        let accel = point_mass(&EARTH, &position);

        let expected_mag = EARTH.mu / position.dot(&position);
        assert!((accel.magnitude() - expected_mag).abs() / expected_mag < 1e-12);
        // anti-parallel to the position vector
        let alignment = accel.normalized().dot(&position.normalized());
        assert!((alignment + 1.0).abs() < 1e-12, "alignment was {alignment}");
    }

    #[test]
    fn leo_equatorial_magnitude() {
        // 400 km up on the equator: ~8.676 monopole plus ~0.0125 of bulge, both pointing inward.
        let accel = acceleration(&EARTH, &Vec3D(LEO_RADIUS, 0.0, 0.0));
        assert!(accel.0 < -8.67 && accel.0 > -8.70, "ax = {}", accel.0);
        assert_eq!(accel.1, 0.0);
        assert_eq!(accel.2, 0.0);

        let bulge = j2_correction(&EARTH, &Vec3D(LEO_RADIUS, 0.0, 0.0));
        assert!(bulge.magnitude() < 0.02 && bulge.magnitude() > 0.01);
    }

    #[test]
    fn equator_pole_asymmetry() {
        // same radius, different latitude: the difference is the J2 term and only the J2 term.
        let equator = Vec3D(LEO_RADIUS, 0.0, 0.0);
        let pole = Vec3D(0.0, 0.0, LEO_RADIUS);
        let point = EARTH.without_oblateness();
        let factor = j2_factor(LEO_RADIUS);

        let eq_extra = acceleration(&EARTH, &equator).sub(&acceleration(&point, &equator));
        let pole_extra = acceleration(&EARTH, &pole).sub(&acceleration(&point, &pole));

        // equator: x term with (0 - 1), pulls further inward
        assert!((eq_extra.0 + factor).abs() < 1e-12, "{eq_extra:?}");
        // pole: z term with (5 - 3), pushes outward
        assert!((pole_extra.2 - 2.0 * factor).abs() < 1e-12, "{pole_extra:?}");

        let eq_mag = acceleration(&EARTH, &equator).magnitude();
        let pole_mag = acceleration(&EARTH, &pole).magnitude();
        assert!(((eq_mag - pole_mag) - 3.0 * factor).abs() < 1e-12);
    }

    #[test]
    fn j2_depends_on_latitude_only() {
        // along the radius the bulge term is factor * (3 sin^2(lat) - 1), and spinning the point
        // about the polar axis leaves its size unchanged.
        let mut rng = StdRng::seed_from_u64(0x4a32);
        for _ in 0..5_000 {
            let r = rng.gen_range(6.6e6..4.2e7);
            let sin_lat: f64 = rng.gen_range(-1.0..1.0);
            let cos_lat = (1.0 - sin_lat * sin_lat).sqrt();
            let lon: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let position = Vec3D(r * cos_lat * lon.cos(), r * cos_lat * lon.sin(), r * sin_lat);

            let factor = j2_factor(r);
            let bulge = j2_correction(&EARTH, &position);
            let radial = bulge.dot(&position.normalized());
            let expected = factor * (3.0 * sin_lat * sin_lat - 1.0);
            assert!((radial - expected).abs() < 1e-9 * factor, "lat {sin_lat}, lon {lon}");

            let spun = Vec3D(r * cos_lat * (lon + 1.0).cos(), r * cos_lat * (lon + 1.0).sin(), r * sin_lat);
            let spun_mag = j2_correction(&EARTH, &spun).magnitude();
            assert!((spun_mag - bulge.magnitude()).abs() < 1e-9 * factor);
        }
    }

    #[test]
    fn no_oblateness_no_correction() {
        let position = Vec3D(3.0e6, 4.0e6, 5.0e6);
        let point = EARTH.without_oblateness();
        assert_eq!(j2_correction(&point, &position), Vec3D(0.0, 0.0, 0.0));
        assert_eq!(acceleration(&point, &position), point_mass(&EARTH, &position));
    }

    #[test]
    fn circular_orbit_energy() {
        // for a circular orbit v^2 = mu/r, so E = -mu/2r.
        let speed = (EARTH.mu / LEO_RADIUS).sqrt();
        let energy = specific_energy(
            &EARTH,
            &Vec3D(LEO_RADIUS, 0.0, 0.0),
            &Vec3D(0.0, speed, 0.0),
        );
        let expected = -EARTH.mu / (2.0 * LEO_RADIUS);
        assert!((energy - expected).abs() / expected.abs() < 1e-12);
    }
}
