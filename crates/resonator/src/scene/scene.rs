use crate::sampling::ApertureSamples;
use crate::scene::background::Background;
use crate::scene::camera::Camera;
use crate::scene::mirrors::{GeometryModel, MarkerSphere};
use crate::scene::resonator::{configure, ResonatorKind, ResonatorParams};
use crate::settings::TracerSettings;

/// The full per-frame configuration record supplied by the host application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub resonator: ResonatorKind,
    pub params: ResonatorParams,
    pub sphere: MarkerSphere,
    pub camera: Camera,
    pub tracer: TracerSettings,
}

/// Everything the tracer reads during a frame sweep. The geometry model is
/// derived from the resonator configuration when the scene is built or
/// reconfigured, never mutated mid-frame: the single writer finishes before
/// the many parallel readers start.
pub struct Scene {
    pub camera: Camera,
    pub geometry: GeometryModel,
    pub background: Background,
    pub aperture_samples: ApertureSamples,
}

impl Scene {
    pub fn from_config(config: &FrameConfig, background: Background) -> Scene {
        Scene {
            camera: config.camera,
            geometry: configure(config.resonator, &config.params, config.sphere),
            background,
            aperture_samples: ApertureSamples::default(),
        }
    }

    /// Applies a new frame configuration, rebuilding the mirror catalogs.
    /// Must complete before the next render sweep is dispatched.
    pub fn reconfigure(&mut self, config: &FrameConfig) {
        self.camera = config.camera;
        self.geometry = configure(config.resonator, &config.params, config.sphere);
    }
}
