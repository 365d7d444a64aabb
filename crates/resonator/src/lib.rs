//! Device-independent model for rendering the interior view of idealized
//! optical resonators: mirror catalog geometry, resonator topologies, the
//! wide-aperture camera and the environment backdrop. The actual per-pixel
//! tracing lives in the backend crates (see `resonator-cpu`).

pub mod geometry;
pub mod sampling;
pub mod scene;
pub mod settings;
