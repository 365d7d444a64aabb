//! Outgoing ray direction after an ideal thin lens/mirror, or its
//! phase-hologram variant.
//!
//! The transverse deflection law: the outgoing in-plane direction component
//! is the incoming one minus `power * (hit - principal)`. The normal
//! component is rebuilt with magnitude 1 (ideal mode) or so the whole vector
//! has unit length (hologram mode), with its sign flipped relative to the
//! lens convention to realise reflective behaviour.

use resonator::geometry::Vec3;

/// +1 would make a transmissive element; every element here reflects.
const REFLECTION_FACTOR: f32 = -1.0;

/// Pure deflection at a hit point. `normal` must be unit length and
/// `direction` must have a nonzero component along it (guaranteed for any
/// direction that produced a plane hit).
///
/// In ideal mode the result is deliberately not unit length: the normal
/// component always has magnitude 1 and downstream code re-derives metric
/// quantities from it.
pub fn deflect(
    direction: Vec3,
    hit_point: Vec3,
    principal_point: Vec3,
    normal: Vec3,
    power: f32,
    cylindrical: bool,
    phase_hologram: bool,
) -> Vec3 {
    let mut displacement = hit_point - principal_point;
    if cylindrical {
        // focusing restricted to the horizontal transverse axis
        displacement.1 = 0.0;
    }

    let dn = Vec3::dot(direction, normal);
    debug_assert!(dn != 0.0, "deflecting a ray parallel to the element plane");

    if phase_hologram {
        let d1 = Vec3::normalized(direction);
        let d1n = Vec3::dot(d1, normal);
        let transverse_out = (d1 - normal * d1n) - displacement * power;
        // rebuild the normal component so the outgoing direction is unit
        // length; clamp so grazing outputs cannot produce NaN
        let normal_sq = (1.0 - Vec3::dot(transverse_out, transverse_out)).max(0.0);
        transverse_out + normal * (REFLECTION_FACTOR * d1n.signum() * normal_sq.sqrt())
    } else {
        // rescale so the normal component has magnitude 1
        let d1 = direction / dn.abs();
        let d1n = Vec3::dot(d1, normal);
        let transverse_out = (d1 - normal * d1n) - displacement * power;
        transverse_out + normal * (REFLECTION_FACTOR * d1n.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X_HAT: Vec3 = Vec3(1.0, 0.0, 0.0);

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn flat_mirror_is_pure_specular_reflection() {
        let out = deflect(
            Vec3(1.0, 0.2, -0.4),
            Vec3(2.0, 0.3, 0.1),
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            0.0,
            false,
            false,
        );
        // normal component flips sign with equal magnitude, transverse
        // components pass through unchanged
        assert_close(out, Vec3(-1.0, 0.2, -0.4));
    }

    #[test]
    fn specular_law_holds_for_non_unit_normal_component() {
        let incoming = Vec3(0.5, 0.1, 0.0);
        let out = deflect(
            incoming,
            Vec3(2.0, 0.7, 0.0),
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            0.0,
            false,
            false,
        );
        // compare as directions: the ideal law rescales the magnitude
        let expected = Vec3(-incoming.x(), incoming.y(), incoming.z());
        assert_close(Vec3::normalized(out), Vec3::normalized(expected));
    }

    #[test]
    fn powered_element_at_principal_point_reflects_like_a_flat_mirror() {
        for power in [-3.0, 0.5, 8.0] {
            let out = deflect(
                Vec3(1.0, 0.25, 0.5),
                Vec3(2.0, 0.0, 0.0),
                Vec3(2.0, 0.0, 0.0), // hit exactly at the principal point
                X_HAT,
                power,
                false,
                false,
            );
            assert_close(out, Vec3(-1.0, 0.25, 0.5));
        }
    }

    #[test]
    fn focusing_term_scales_with_displacement() {
        let out = deflect(
            Vec3(1.0, 0.0, 0.0),
            Vec3(2.0, 0.0, 0.5), // displaced 0.5 along z from the principal point
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            2.0,
            false,
            false,
        );
        assert_close(out, Vec3(-1.0, 0.0, -1.0));
    }

    #[test]
    fn cylindrical_mode_ignores_vertical_displacement() {
        let out = deflect(
            Vec3(1.0, 0.0, 0.0),
            Vec3(2.0, 0.4, 0.0), // displacement purely vertical
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            2.0,
            true,
            false,
        );
        // with the vertical component zeroed, the element acts flat
        assert_close(out, Vec3(-1.0, 0.0, 0.0));

        let out = deflect(
            Vec3(1.0, 0.0, 0.0),
            Vec3(2.0, 0.4, 0.5),
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            2.0,
            true,
            false,
        );
        // the horizontal transverse displacement still focusses
        assert_close(out, Vec3(-1.0, 0.0, -1.0));
    }

    #[test]
    fn phase_hologram_output_is_unit_length() {
        let out = deflect(
            Vec3(2.0, 0.6, -0.3),
            Vec3(2.0, 0.2, 0.1),
            Vec3(2.0, 0.0, 0.0),
            X_HAT,
            1.5,
            false,
            true,
        );
        assert!((out.length() - 1.0).abs() < 1e-5);
        // still a reflection: normal component sign flips
        assert!(out.x() < 0.0);
    }
}
