//! End-to-end conversion through the library: PNG in, dithered PNG out.

mod common;

use common::fixtures;
use inkframe::config::AppConfig;
use inkframe::image_io::{self, WriteOptions};
use inkframe::pipeline::{convert, ConvertOptions};
use inkframe::settings::{Overrides, Settings};
use palette_dither::{Pixel, TieBreak};
use pretty_assertions::assert_eq;

fn default_settings() -> Settings {
    Settings::resolve(&Overrides::default(), &AppConfig::default()).unwrap()
}

#[test]
fn test_rgb_output_uses_only_palette_colors() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_input(dir.path(), "in.png", &fixtures::gradient(40, 24));
    let output = dir.path().join("out.png");
    let settings = default_settings();

    let stats = convert(&input, &output, &settings, ConvertOptions::default()).unwrap();

    common::assert_png_file(&output);
    let result = image_io::read_png(&output).unwrap();
    assert_eq!((result.width(), result.height()), (40, 24));
    common::assert_palette_only(&result, &settings.palette);
    assert_eq!(stats.pixels, 40 * 24);
    assert_eq!(stats.usage.iter().sum::<usize>(), 40 * 24);
}

#[test]
fn test_indexed_optimized_output_matches_rgb_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_input(dir.path(), "in.png", &fixtures::gradient(33, 17));
    let rgb_out = dir.path().join("rgb.png");
    let indexed_out = dir.path().join("indexed.png");
    let settings = default_settings();

    convert(&input, &rgb_out, &settings, ConvertOptions::default()).unwrap();
    convert(
        &input,
        &indexed_out,
        &settings,
        ConvertOptions {
            write: WriteOptions {
                indexed: true,
                optimize: true,
            },
            progress: true,
        },
    )
    .unwrap();

    assert_eq!(
        image_io::read_png(&rgb_out).unwrap(),
        image_io::read_png(&indexed_out).unwrap(),
        "indexed, optimized and observed runs must produce the same pixels"
    );
}

#[test]
fn test_config_file_palette_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_input(dir.path(), "in.png", &fixtures::gradient(16, 16));
    let output = dir.path().join("out.png");
    let config_path = fixtures::write_config(
        dir.path(),
        "inkframe.yaml",
        "palette: [black, white]\nkernel: floyd-steinberg\nnorm: l2\n",
    );

    let config = AppConfig::load(&config_path).unwrap();
    let settings = Settings::resolve(&Overrides::default(), &config).unwrap();
    convert(&input, &output, &settings, ConvertOptions::default()).unwrap();

    let result = image_io::read_png(&output).unwrap();
    assert!(result
        .pixels()
        .iter()
        .all(|p| *p == Pixel::new(0, 0, 0) || *p == Pixel::new(255, 255, 255)));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_input(dir.path(), "in.png", &fixtures::gradient(20, 20));
    let flags = Overrides {
        seed: Some(99),
        ..Default::default()
    };
    let settings = Settings::resolve(&flags, &AppConfig::default()).unwrap();
    assert_eq!(settings.options.tie_break, TieBreak::Shuffled { seed: 99 });

    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    convert(&input, &a, &settings, ConvertOptions::default()).unwrap();
    convert(&input, &b, &settings, ConvertOptions::default()).unwrap();

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn test_missing_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");
    let err = convert(
        &missing,
        &dir.path().join("out.png"),
        &default_settings(),
        ConvertOptions::default(),
    )
    .unwrap_err();

    assert!(
        format!("{err:#}").contains("missing.png"),
        "error should name the input: {err:#}"
    );
    assert!(!dir.path().join("out.png").exists());
}
