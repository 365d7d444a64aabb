//! Wide-aperture virtual camera. Pose and raster parameters come from the
//! host application; this module derives the per-pixel primary directions,
//! the aperture basis and the focus plane used for depth of field.

use crate::geometry::Vec3;

pub const WORLD_UP: Vec3 = Vec3(0.0, 1.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit-length view direction.
    pub view_direction: Vec3,
    /// Horizontal field of view in radians.
    pub horizontal_fov: f32,
    /// Radius of the circular aperture in world units; 0 collapses to a
    /// pinhole camera.
    pub aperture_radius: f32,
    /// Arctangent-compressed focus distance control, in (0, pi/2). The
    /// actual focus distance is `tan` of this, which makes a practically
    /// infinite range addressable through a bounded control value.
    pub atan_focus_distance: f32,
    /// Aperture sample rays per pixel.
    pub ray_count: usize,
    pub raster_width: usize,
    pub raster_height: usize,
}

impl Camera {
    /// Camera at `position` looking along `view_direction` (normalised here).
    pub fn look_along(
        position: Vec3,
        view_direction: Vec3,
        horizontal_fov: f32,
        raster_width: usize,
        raster_height: usize,
    ) -> Camera {
        Camera {
            position,
            view_direction: Vec3::normalized(view_direction),
            horizontal_fov,
            aperture_radius: 0.0,
            atan_focus_distance: f32::atan(10.0),
            ray_count: 1,
            raster_width,
            raster_height,
        }
    }

    pub fn focus_distance(&self) -> f32 {
        self.atan_focus_distance.tan()
    }

    /// Two orthonormal basis vectors spanning the aperture plane, derived
    /// from world-up. Falls back to a z-axis reference when the view
    /// direction is (anti)parallel to world-up, where the usual cross
    /// product degenerates.
    pub fn aperture_basis(&self) -> (Vec3, Vec3) {
        let mut right = Vec3::cross(self.view_direction, WORLD_UP);
        if right.near_zero() {
            right = Vec3::cross(self.view_direction, Vec3(0.0, 0.0, 1.0));
        }
        let right = Vec3::normalized(right);
        let up = Vec3::normalized(Vec3::cross(right, self.view_direction));
        (right, up)
    }

    /// Unit direction from the aperture centre through pixel `(x, y)`.
    pub fn pixel_direction(&self, x: usize, y: usize) -> Vec3 {
        let (right, up) = self.aperture_basis();
        let w = self.raster_width as f32;
        let h = self.raster_height as f32;
        let tan_half = (self.horizontal_fov * 0.5).tan();

        let ndc_x = 2.0 * ((x as f32 + 0.5) / w) - 1.0;
        let ndc_y = 1.0 - 2.0 * ((y as f32 + 0.5) / h);

        Vec3::normalized(
            self.view_direction
                + right * (ndc_x * tan_half)
                + up * (ndc_y * tan_half * h / w),
        )
    }

    /// The point this pixel is focussed on: along the pixel direction at the
    /// focus distance, scaled by the obliquity factor so that the locus of
    /// focus positions is the plane perpendicular to the view direction.
    pub fn focus_position(&self, pixel_direction: Vec3) -> Vec3 {
        let obliquity = Vec3::dot(pixel_direction, self.view_direction).abs();
        self.position + pixel_direction * (self.focus_distance() / obliquity)
    }
}
