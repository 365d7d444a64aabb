use resonator::geometry::Vec3;

/// A ray mid-trace. The direction is not necessarily unit length: the ideal
/// deflection law rescales it so the normal component has magnitude 1, and
/// the intersection engine re-derives metric distances itself.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
