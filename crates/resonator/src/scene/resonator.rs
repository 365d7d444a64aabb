//! Derives the full mirror geometry from a resonator topology and a handful
//! of scalar parameters. Runs once per frame, before the tracer sweep starts;
//! the result is a pure function of its inputs, so identical parameters
//! always yield bit-identical catalogs.

use tracing::warn;

use crate::geometry::Vec3;
use crate::scene::mirrors::{GeometryModel, MarkerSphere, MirrorCatalog};

/// Fixed half-height of the cavity cross-section: mirrors span
/// `[-0.5, 0.5]` vertically (plus the vertical offset) regardless of the
/// configured spans.
const SECTION_HALF: f32 = 0.5;

/// Penrose outer mirrors sit `2 / |power|` beyond the canonical span, so the
/// curved mirror's focal geometry matches the cavity.
const PENROSE_MARGIN: f32 = 2.0;

/// Resonator topology. Selecting a variant determines which catalogs are
/// populated and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResonatorKind {
    /// No mirrors at all; every ray goes straight to the background.
    Empty,
    /// Two mirrors facing each other along the x axis.
    Canonical,
    /// Two mirror pairs, one along x and one along z.
    CrossedCanonical,
    /// Four mirrors per horizontal axis: flat inner mirrors at the canonical
    /// spans, powered outer mirrors beyond them.
    PenroseCavity,
}

/// Scalar parameters shared by all topologies.
///
/// By convention `span_1 < 0 < span_2` (not enforced). `power_a*` applies to
/// the x-axis mirror pair, `power_b*` to the z-axis pair where one exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResonatorParams {
    pub span_1: f32,
    pub span_2: f32,
    pub power_a1: f32,
    pub power_a2: f32,
    pub power_b1: f32,
    pub power_b2: f32,
    pub vertical_offset: f32,
}

impl Default for ResonatorParams {
    fn default() -> Self {
        ResonatorParams {
            span_1: -0.5,
            span_2: 0.5,
            power_a1: 0.0,
            power_a2: 0.0,
            power_b1: 0.0,
            power_b2: 0.0,
            vertical_offset: 0.0,
        }
    }
}

/// Rebuilds the geometry model for `kind`. The marker sphere passes through
/// unchanged; only the mirror catalogs are derived.
pub fn configure(
    kind: ResonatorKind,
    params: &ResonatorParams,
    sphere: MarkerSphere,
) -> GeometryModel {
    let mut geometry = GeometryModel {
        sphere,
        ..GeometryModel::default()
    };

    let dy = params.vertical_offset;
    let y_extent = (-SECTION_HALF + dy, SECTION_HALF + dy);
    let s1 = params.span_1;
    let s2 = params.span_2;

    match kind {
        ResonatorKind::Empty => {}
        ResonatorKind::Canonical => {
            let x = &mut geometry.x_mirrors;
            let z_extent = (-SECTION_HALF, SECTION_HALF);
            x.push(s1, y_extent, z_extent, Vec3(s1, dy, 0.0), params.power_a1);
            x.push(s2, y_extent, z_extent, Vec3(s2, dy, 0.0), params.power_a2);
        }
        ResonatorKind::CrossedCanonical => {
            let x = &mut geometry.x_mirrors;
            x.push(s1, y_extent, (s1, s2), Vec3(s1, dy, 0.0), params.power_a1);
            x.push(s2, y_extent, (s1, s2), Vec3(s2, dy, 0.0), params.power_a2);

            let z = &mut geometry.z_mirrors;
            z.push(s1, (s1, s2), y_extent, Vec3(0.0, dy, s1), params.power_b1);
            z.push(s2, (s1, s2), y_extent, Vec3(0.0, dy, s2), params.power_b2);
        }
        ResonatorKind::PenroseCavity => {
            // The outer mirror placement divides by |power|, so the power
            // magnitude is clamped away from zero on every configuration,
            // not just on topology entry.
            let pa1 = clamp_penrose_power(params.power_a1);
            let pa2 = clamp_penrose_power(params.power_a2);
            let pb1 = clamp_penrose_power(params.power_b1);
            let pb2 = clamp_penrose_power(params.power_b2);

            let xo1 = s1 - PENROSE_MARGIN / pa1.abs();
            let xo2 = s2 + PENROSE_MARGIN / pa2.abs();
            let zo1 = s1 - PENROSE_MARGIN / pb1.abs();
            let zo2 = s2 + PENROSE_MARGIN / pb2.abs();

            // Outer mirrors carry the configured power and span the extended
            // cavity; inner mirrors are flat and span the canonical cavity.
            // Insertion is in ascending plane order, preserving the sorted
            // catalog contract.
            let x = &mut geometry.x_mirrors;
            x.push(xo1, y_extent, (zo1, zo2), Vec3(xo1, dy, 0.0), pa1);
            x.push(s1, y_extent, (s1, s2), Vec3(s1, dy, 0.0), 0.0);
            x.push(s2, y_extent, (s1, s2), Vec3(s2, dy, 0.0), 0.0);
            x.push(xo2, y_extent, (zo1, zo2), Vec3(xo2, dy, 0.0), pa2);

            let z = &mut geometry.z_mirrors;
            z.push(zo1, (xo1, xo2), y_extent, Vec3(0.0, dy, zo1), pb1);
            z.push(s1, (s1, s2), y_extent, Vec3(0.0, dy, s1), 0.0);
            z.push(s2, (s1, s2), y_extent, Vec3(0.0, dy, s2), 0.0);
            z.push(zo2, (xo1, xo2), y_extent, Vec3(0.0, dy, zo2), pb2);
        }
    }

    geometry
}

/// Clamps an optical power to magnitude >= 1, keeping its sign; zero (which
/// has no usable sign) becomes +1.
fn clamp_penrose_power(power: f32) -> f32 {
    if power.abs() >= 1.0 {
        power
    } else {
        warn!(power, "clamping Penrose optical power magnitude to 1");
        if power < 0.0 {
            -1.0
        } else {
            1.0
        }
    }
}
