//! Test fixtures: small images and config files written to temp dirs.

use std::path::{Path, PathBuf};

use inkframe::image_io;
use palette_dither::{Image, Pixel};

/// Horizontal gray ramp with a red-to-blue vertical tint.
pub fn gradient(width: usize, height: usize) -> Image {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let v = (x * 255 / width.max(1)) as u8;
                let t = (y * 255 / height.max(1)) as u8;
                Pixel::new(v.saturating_add(t / 4), v, v.saturating_sub(t / 4))
            })
        })
        .collect();
    Image::new(width, height, pixels).unwrap()
}

/// Write `image` as an RGB PNG at `dir/name` and return the path.
pub fn write_input(dir: &Path, name: &str, image: &Image) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, image_io::encode_rgb_png(image).unwrap()).unwrap();
    path
}

/// Write a YAML config at `dir/name` and return the path.
pub fn write_config(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}
