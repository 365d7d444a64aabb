//! CPU backend: drives the per-pixel bounce loop over the frame-frozen
//! scene. Pixels are independent pure functions of the scene, so the frame
//! sweep is split into row bands across worker threads with no shared
//! mutable state.

use std::time::Instant;

use tracing::info;

use resonator::geometry::Vec4;
use resonator::sampling::APERTURE_SAMPLE_COUNT;
use resonator::scene::Scene;
use resonator::settings::TracerSettings;

use crate::deflect::deflect;
use crate::intersect::{Surface, find_nearest};
use crate::ray::Ray;

pub mod deflect;
pub mod intersect;
pub mod ray;
pub mod utils;


const SPHERE_COLOR: Vec4 = Vec4(1.0, 0.0, 0.0, 1.0);
const EXHAUSTED_COLOR: Vec4 = Vec4(0.0, 0.0, 0.0, 1.0);

#[derive(Debug, Clone, Copy)]
pub struct CpuBackendSettings {
    pub num_threads: usize,
}

impl Default for CpuBackendSettings {
    fn default() -> Self {
        CpuBackendSettings {
            num_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// How a ray sample's path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// No further intersection: the ray left the resonator and sampled the
    /// background.
    Escaped,
    /// Terminated on the marker sphere's fixed colour.
    SphereHit,
    /// The bounce budget ran out before the ray escaped.
    BouncesExhausted,
}

#[derive(Debug, Clone, Copy)]
pub struct TraceResult {
    pub color: Vec4,
    pub outcome: TraceOutcome,
    /// Number of deflections performed before termination.
    pub bounces: u32,
}

/// Follows one ray through the resonator: intersect, deflect, attenuate,
/// until the bounce budget runs out, the marker sphere is hit, or the ray
/// escapes to the background.
pub fn trace_ray(scene: &Scene, settings: &TracerSettings, ray: Ray) -> TraceResult {
    let mut ray = ray;
    let mut brightness = Vec4(1.0, 1.0, 1.0, 1.0);
    let attenuation = settings.attenuation();

    // the element the ray most recently departed from
    let mut exclude: Option<Surface> = None;

    let mut bounces = 0;
    while bounces < settings.max_bounces {
        let hit = match find_nearest(ray, &scene.geometry, exclude) {
            Some(hit) => hit,
            None => {
                return TraceResult {
                    color: brightness * scene.background.sample(ray.direction),
                    outcome: TraceOutcome::Escaped,
                    bounces,
                };
            }
        };

        if hit.surface == Surface::Sphere {
            return TraceResult {
                color: brightness * SPHERE_COLOR,
                outcome: TraceOutcome::SphereHit,
                bounces,
            };
        }

        let direction = deflect(
            ray.direction,
            hit.position,
            hit.principal,
            hit.normal,
            hit.power,
            settings.cylindrical_elements,
            settings.phase_holograms,
        );
        brightness *= attenuation;
        exclude = Some(hit.surface);
        ray = Ray {
            origin: hit.position,
            direction,
        };
        bounces += 1;
    }

    TraceResult {
        color: EXHAUSTED_COLOR,
        outcome: TraceOutcome::BouncesExhausted,
        bounces,
    }
}

fn generate_ray(scene: &Scene, x: usize, y: usize, sample_index: usize) -> Ray {
    let camera = &scene.camera;
    let (right, up) = camera.aperture_basis();

    let pixel_direction = camera.pixel_direction(x, y);
    let focus_position = camera.focus_position(pixel_direction);

    let offset = scene.aperture_samples.get(sample_index);
    let origin = camera.position
        + right * (camera.aperture_radius * offset.x())
        + up * (camera.aperture_radius * offset.y());

    // aimed through the focus position, so all aperture samples of this
    // pixel converge exactly at the focus plane
    Ray {
        origin,
        direction: focus_position - origin,
    }
}

/// Renders a single pixel: averages the configured number of aperture
/// sample rays.
pub fn render_single_pixel(
    scene: &Scene,
    settings: &TracerSettings,
    x: usize,
    y: usize,
) -> Vec4 {
    let ray_count = scene.camera.ray_count.clamp(1, APERTURE_SAMPLE_COUNT);

    let mut color = Vec4::zero();
    for i in 0..ray_count {
        let ray = generate_ray(scene, x, y, i);
        color += trace_ray(scene, settings, ray).color;
    }
    color / ray_count as f32
}

/// Renders a full frame into a row-major RGBA buffer in [0, 1].
pub fn render(
    scene: &Scene,
    settings: &TracerSettings,
    backend_settings: CpuBackendSettings,
) -> Vec<Vec4> {
    let width = scene.camera.raster_width;
    let height = scene.camera.raster_height;

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let start = Instant::now();
    let mut buffer = vec![Vec4::zero(); width * height];

    let num_threads = backend_settings.num_threads.clamp(1, height.max(1));
    let band_rows = height.div_ceil(num_threads);

    std::thread::scope(|s| {
        for (band_index, band) in buffer.chunks_mut(band_rows * width).enumerate() {
            let first_row = band_index * band_rows;
            s.spawn(move || {
                for (row_offset, row) in band.chunks_mut(width).enumerate() {
                    let y = first_row + row_offset;
                    for (x, pixel) in row.iter_mut().enumerate() {
                        *pixel = render_single_pixel(scene, settings, x, y);
                    }
                }
            });
        }
    });

    info!(
        width,
        height,
        num_threads,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "frame rendered"
    );

    buffer
}
