//! Equirectangular environment backdrop. Rays that escape the resonator are
//! resolved against this by direction alone.

use std::path::Path;

use anyhow::Context;
use image::Rgb32FImage;

use crate::geometry::{Vec3, Vec4};

pub enum Background {
    /// Equirectangular panorama: longitude maps to u with wraparound,
    /// latitude to v.
    Equirect(Rgb32FImage),
    /// Flat colour, mainly for tests and headless runs.
    Solid(Vec3),
}

impl Background {
    pub fn from_file(path: &Path) -> anyhow::Result<Background> {
        let image = image::open(path)
            .with_context(|| format!("failed to load background image {}", path.display()))?
            .to_rgb32f();
        anyhow::ensure!(
            image.width() > 0 && image.height() > 0,
            "background image {} is empty",
            path.display()
        );
        Ok(Background::Equirect(image))
    }

    /// Colour seen along `direction` (need not be unit length).
    pub fn sample(&self, direction: Vec3) -> Vec4 {
        match self {
            Background::Solid(rgb) => Vec4::opaque(*rgb),
            Background::Equirect(image) => {
                let l = direction.length();
                if l == 0.0 {
                    return Vec4(0.0, 0.0, 0.0, 1.0);
                }

                let phi = f32::atan2(direction.z(), direction.x()) + std::f32::consts::PI;
                let theta = f32::acos(direction.y() / l);

                let u = (phi / (2.0 * std::f32::consts::PI)).rem_euclid(1.0);
                let v = 1.0 - theta / std::f32::consts::PI;

                Vec4::opaque(sample_bilinear(image, u, v))
            }
        }
    }
}

/// Bilinear lookup with wraparound in u (longitude) and clamping in v.
fn sample_bilinear(image: &Rgb32FImage, u: f32, v: f32) -> Vec3 {
    let w = image.width() as i64;
    let h = image.height() as i64;

    let px = u * w as f32 - 0.5;
    let py = (1.0 - v) * h as f32 - 0.5;

    let x0 = px.floor();
    let y0 = py.floor();
    let fx = px - x0;
    let fy = py - y0;

    let texel = |x: i64, y: i64| -> Vec3 {
        let x = x.rem_euclid(w);
        let y = y.clamp(0, h - 1);
        let p = image.get_pixel(x as u32, y as u32);
        Vec3(p.0[0], p.0[1], p.0[2])
    };

    let x0i = x0 as i64;
    let y0i = y0 as i64;
    let top = texel(x0i, y0i) * (1.0 - fx) + texel(x0i + 1, y0i) * fx;
    let bottom = texel(x0i, y0i + 1) * (1.0 - fx) + texel(x0i + 1, y0i + 1) * fx;
    top * (1.0 - fy) + bottom * fy
}
