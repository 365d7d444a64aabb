//! The geometry model read by the tracer: three fixed-capacity catalogs of
//! axis-aligned rectangular mirror/lens elements (one catalog per principal
//! axis) plus an optional marker sphere.
//!
//! The layout deliberately mirrors a GPU uniform buffer: parallel
//! fixed-size arrays with a separate live count. Slots at indices >= `count`
//! hold stale/default values and must never be read; `count` gates every
//! consumer.

use crate::geometry::{Axis, Vec3};

/// Capacity of each per-axis catalog.
pub const MIRRORS_CAP: usize = 4;

/// All mirror elements whose planes are perpendicular to one principal axis.
///
/// For each active element `i`:
/// - `plane[i]` is the fixed coordinate of the plane along the catalog axis;
/// - `(t1_min[i], t1_max[i])` and `(t2_min[i], t2_max[i])` bound the
///   rectangle along the two transverse axes, in `Axis::transverse` order;
/// - `principal[i]` anchors the thin-element deflection law;
/// - `power[i]` is the optical power, 0 for a plain flat mirror.
///
/// Producers insert elements in non-decreasing `plane` order. The
/// intersection engine does not rely on this (it tests every active
/// element), but it remains the documented catalog contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MirrorCatalog {
    pub count: usize,
    pub plane: [f32; MIRRORS_CAP],
    pub t1_min: [f32; MIRRORS_CAP],
    pub t1_max: [f32; MIRRORS_CAP],
    pub t2_min: [f32; MIRRORS_CAP],
    pub t2_max: [f32; MIRRORS_CAP],
    pub principal: [Vec3; MIRRORS_CAP],
    pub power: [f32; MIRRORS_CAP],
}

impl MirrorCatalog {
    pub fn empty() -> MirrorCatalog {
        MirrorCatalog::default()
    }

    /// Appends an element into the next free slot.
    ///
    /// Panics if the catalog is full. Extent validity (`min <= max`) is a
    /// producer responsibility, asserted in debug builds only; the engine
    /// does not re-validate per ray, and an inverted extent merely makes
    /// the element unhittable in release builds.
    pub fn push(
        &mut self,
        plane: f32,
        t1: (f32, f32),
        t2: (f32, f32),
        principal: Vec3,
        power: f32,
    ) {
        assert!(self.count < MIRRORS_CAP, "mirror catalog full");
        debug_assert!(t1.0 <= t1.1 && t2.0 <= t2.1, "inverted mirror extents");

        let i = self.count;
        self.plane[i] = plane;
        self.t1_min[i] = t1.0;
        self.t1_max[i] = t1.1;
        self.t2_min[i] = t2.0;
        self.t2_max[i] = t2.1;
        self.principal[i] = principal;
        self.power[i] = power;
        self.count = i + 1;
    }
}

/// Opaque calibration marker. Intersected like any other object, but a hit
/// terminates the path with a fixed colour instead of deflecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSphere {
    pub centre: Vec3,
    pub radius: f32,
    pub visible: bool,
}

impl Default for MarkerSphere {
    fn default() -> Self {
        MarkerSphere {
            centre: Vec3(0.75, 0.0, 0.25),
            radius: 0.1,
            visible: false,
        }
    }
}

/// Frame-frozen scene geometry. Rebuilt whole by the resonator configurator;
/// the tracer has read-only access for the duration of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryModel {
    pub x_mirrors: MirrorCatalog,
    pub y_mirrors: MirrorCatalog,
    pub z_mirrors: MirrorCatalog,
    pub sphere: MarkerSphere,
}

impl GeometryModel {
    pub fn catalog(&self, axis: Axis) -> &MirrorCatalog {
        match axis {
            Axis::X => &self.x_mirrors,
            Axis::Y => &self.y_mirrors,
            Axis::Z => &self.z_mirrors,
        }
    }
}
