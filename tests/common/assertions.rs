//! Assertion helpers for tests.

use std::path::Path;

use palette_dither::{Image, Palette};

/// Assert every pixel of `image` is a member of `palette`.
pub fn assert_palette_only(image: &Image, palette: &Palette) {
    for (i, pixel) in image.pixels().iter().enumerate() {
        assert!(
            palette.contains(*pixel),
            "Pixel {i} is {pixel}, which is not in the palette {:?}",
            palette.colors()
        );
    }
}

/// Assert the file at `path` starts with the PNG signature.
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
