//! I/O utilities for rendered output, shared between the command-line driver
//! and test code.

use std::{fs::File, path::Path};

use resonator::geometry::Vec4;

pub fn save_png(pixels: &[Vec4], width: usize, height: usize, output_path: &Path) {
    assert_eq!(pixels.len(), width * height);

    let file = File::create(output_path).expect("failed to create output file");
    let mut encoder = png::Encoder::new(file, width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0));

    let mut writer = encoder
        .write_header()
        .expect("failed to write PNG header");

    let image_data: Vec<u8> = pixels.iter().flat_map(|v| {
        let r = (v.r() * 255.0).clamp(0.0, 255.0) as u8;
        let g = (v.g() * 255.0).clamp(0.0, 255.0) as u8;
        let b = (v.b() * 255.0).clamp(0.0, 255.0) as u8;
        let a = (v.a() * 255.0).clamp(0.0, 255.0) as u8;
        [r, g, b, a]
    }).collect();

    writer.write_image_data(&image_data).expect("failed to write PNG data");
}
