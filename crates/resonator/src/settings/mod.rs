use crate::geometry::Vec4;

/// Per-frame tracing parameters, independent of scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerSettings {
    /// Hard upper bound on intersect-then-deflect iterations per ray.
    pub max_bounces: u32,
    /// Restrict every element's focusing power to the horizontal transverse
    /// axis, simulating cylindrical rather than spherical elements.
    pub cylindrical_elements: bool,
    /// Fraction of brightness surviving each reflection, in [0, 1].
    pub reflection_coefficient: f32,
    /// Use the phase-hologram deflection law (unit-length renormalisation)
    /// instead of the ideal thin-element law.
    pub phase_holograms: bool,
}

impl TracerSettings {
    /// Per-bounce brightness tint. The blue channel loses a tenth of what
    /// red and green lose, giving repeated reflections a slight blue shift.
    pub fn attenuation(&self) -> Vec4 {
        let r = self.reflection_coefficient;
        Vec4(r, r, 1.0 - (1.0 - r) * 0.1, 1.0)
    }
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_bounces: 50,
            cylindrical_elements: true,
            reflection_coefficient: 0.9,
            phase_holograms: false,
        }
    }
}
