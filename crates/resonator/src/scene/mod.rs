mod background;
mod camera;
mod mirrors;
mod resonator;
mod scene;

pub use background::Background;
pub use camera::Camera;
pub use camera::WORLD_UP;
pub use mirrors::{GeometryModel, MarkerSphere, MirrorCatalog, MIRRORS_CAP};
pub use resonator::{configure, ResonatorKind, ResonatorParams};
pub use scene::{FrameConfig, Scene};
