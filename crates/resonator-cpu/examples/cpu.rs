use std::path::PathBuf;

use clap::Parser;

use resonator::geometry::Vec3;
use resonator::scene::{
    Background, Camera, FrameConfig, MarkerSphere, ResonatorKind, ResonatorParams, Scene,
};
use resonator::settings::TracerSettings;
use resonator_cpu::CpuBackendSettings;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Topology {
    Empty,
    Canonical,
    Crossed,
    Penrose,
}

impl From<Topology> for ResonatorKind {
    fn from(value: Topology) -> ResonatorKind {
        match value {
            Topology::Empty => ResonatorKind::Empty,
            Topology::Canonical => ResonatorKind::Canonical,
            Topology::Crossed => ResonatorKind::CrossedCanonical,
            Topology::Penrose => ResonatorKind::PenroseCavity,
        }
    }
}

#[derive(Debug, clap::Parser)]
struct CommandLineArguments {
    /// Equirectangular background image; a flat grey backdrop is used when
    /// omitted.
    #[arg(long)]
    background: Option<PathBuf>,

    #[arg(short, long, default_value = "resonator.png")]
    output: PathBuf,

    #[arg(long, value_enum, default_value = "crossed")]
    topology: Topology,

    #[arg(long, default_value_t = -0.5)]
    span_1: f32,
    #[arg(long, default_value_t = 0.5)]
    span_2: f32,
    #[arg(long, default_value_t = 0.0)]
    power_a1: f32,
    #[arg(long, default_value_t = 0.0)]
    power_a2: f32,
    #[arg(long, default_value_t = 0.0)]
    power_b1: f32,
    #[arg(long, default_value_t = 0.0)]
    power_b2: f32,

    #[arg(long, default_value_t = 800)]
    width: usize,
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 68.0)]
    fov: f32,
    #[arg(long, default_value_t = 0.0)]
    aperture_radius: f32,
    #[arg(long, default_value_t = 10.0)]
    focus_distance: f32,
    /// Aperture sample rays per pixel (1..=100).
    #[arg(short, long, default_value_t = 1)]
    rays: usize,

    #[arg(short = 'b', long, default_value_t = 50)]
    max_bounces: u32,
    #[arg(long, default_value_t = 0.9)]
    reflection_coefficient: f32,
    #[arg(long)]
    spherical_elements: bool,
    #[arg(long)]
    phase_holograms: bool,
    #[arg(long)]
    show_sphere: bool,

    #[arg(short = 't', long)]
    num_threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli_args = CommandLineArguments::parse();

    let background = match &cli_args.background {
        Some(path) => Background::from_file(path)?,
        None => Background::Solid(Vec3(0.5, 0.5, 0.5)),
    };

    let mut camera = Camera::look_along(
        Vec3(0.0, 0.0, 0.4),
        Vec3(0.0, 0.0, -1.0),
        cli_args.fov.to_radians(),
        cli_args.width,
        cli_args.height,
    );
    camera.aperture_radius = cli_args.aperture_radius;
    camera.atan_focus_distance = cli_args.focus_distance.atan();
    camera.ray_count = cli_args.rays;

    let config = FrameConfig {
        resonator: cli_args.topology.into(),
        params: ResonatorParams {
            span_1: cli_args.span_1,
            span_2: cli_args.span_2,
            power_a1: cli_args.power_a1,
            power_a2: cli_args.power_a2,
            power_b1: cli_args.power_b1,
            power_b2: cli_args.power_b2,
            vertical_offset: 0.0,
        },
        sphere: MarkerSphere {
            visible: cli_args.show_sphere,
            ..MarkerSphere::default()
        },
        camera,
        tracer: TracerSettings {
            max_bounces: cli_args.max_bounces,
            cylindrical_elements: !cli_args.spherical_elements,
            reflection_coefficient: cli_args.reflection_coefficient,
            phase_holograms: cli_args.phase_holograms,
        },
    };

    let mut backend_settings = CpuBackendSettings::default();
    if let Some(num_threads) = cli_args.num_threads {
        backend_settings.num_threads = num_threads;
    }

    let scene = Scene::from_config(&config, background);
    let pixels = resonator_cpu::render(&scene, &config.tracer, backend_settings);

    resonator_cpu::utils::save_png(&pixels, cli_args.width, cli_args.height, &cli_args.output);
    Ok(())
}
