//! PNG reading and writing.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use palette_dither::{Image, Palette, Pixel};

use crate::error::ImageIoError;

/// How the output PNG is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Write palette indices with a PLTE chunk instead of RGB triples
    pub indexed: bool,
    /// Recompress with oxipng
    pub optimize: bool,
}

/// Read a PNG file into an RGB image.
pub fn read_png(path: &Path) -> Result<Image, ImageIoError> {
    let bytes = std::fs::read(path).map_err(|source| ImageIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(&bytes)
}

/// Decode PNG bytes into an RGB image.
///
/// Gray, gray+alpha, RGB, RGBA and indexed inputs are accepted. Indexed
/// images are expanded, 16-bit samples are reduced to 8 bits and alpha is
/// dropped.
pub fn decode_png(bytes: &[u8]) -> Result<Image, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageIoError::UnsupportedFormat(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }

    let width = info.width as usize;
    let height = info.height as usize;
    let stride = info.line_size;
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(ImageIoError::UnsupportedFormat(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    let mut pixels = Vec::with_capacity(width * height);
    for row in buf[..info.buffer_size()].chunks(stride).take(height) {
        for px in row[..width * channels].chunks_exact(channels) {
            pixels.push(match channels {
                1 | 2 => Pixel::new(px[0], px[0], px[0]),
                _ => Pixel::new(px[0], px[1], px[2]),
            });
        }
    }

    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(Image::new(width, height, pixels)?)
}

/// Encode an image as an 8-bit RGB PNG.
pub fn encode_rgb_png(image: &Image) -> Result<Vec<u8>, ImageIoError> {
    encode_png(
        image,
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        &image.to_rgb8(),
    )
}

/// Encode an image whose pixels are all members of `palette` as an indexed
/// PNG, using the smallest bit depth that fits the palette.
pub fn encode_indexed_png(image: &Image, palette: &Palette) -> Result<Vec<u8>, ImageIoError> {
    if palette.len() > 256 {
        return Err(ImageIoError::UnsupportedFormat(format!(
            "{} colors do not fit an indexed PNG",
            palette.len()
        )));
    }

    let lookup: HashMap<Pixel, u8> = palette
        .iter()
        .enumerate()
        .map(|(i, c)| (c, i as u8))
        .collect();
    let indices = image
        .pixels()
        .iter()
        .map(|p| {
            lookup.get(p).copied().ok_or_else(|| {
                ImageIoError::UnsupportedFormat(format!("pixel {p} is not a palette color"))
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let (depth, bits) = match palette.len() {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    };
    let plte: Vec<u8> = palette.iter().flat_map(|c| c.to_bytes()).collect();
    let packed = if bits == 8 {
        indices
    } else {
        pack_nbits(&indices, image.width(), bits)
    };

    encode_png(image, png::ColorType::Indexed, depth, Some(&plte), &packed)
}

fn encode_png(
    image: &Image,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ImageIoError> {
    let width = u32::try_from(image.width())
        .map_err(|_| ImageIoError::UnsupportedFormat("width exceeds u32".to_string()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ImageIoError::UnsupportedFormat("height exceeds u32".to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices into 1, 2 or 4 bits per pixel, rows padded to a
/// whole byte.
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    let per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(width.div_ceil(per_byte) * (indices.len() / width));

    for row in indices.chunks(width) {
        for group in row.chunks(per_byte) {
            let mut byte = 0u8;
            for (i, &idx) in group.iter().enumerate() {
                byte |= (idx & mask) << (8 - bits - i as u8 * bits);
            }
            packed.push(byte);
        }
    }
    packed
}

/// Recompress PNG bytes with oxipng, falling back to the input on failure.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before, after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// Encode `image` and write it to `path`.
///
/// `palette` is required for indexed output.
pub fn write_png(
    path: &Path,
    image: &Image,
    palette: &Palette,
    options: WriteOptions,
) -> Result<(), ImageIoError> {
    let mut bytes = if options.indexed {
        encode_indexed_png(image, palette)?
    } else {
        encode_rgb_png(image)?
    };
    if options.optimize {
        bytes = optimize_png(bytes);
    }
    std::fs::write(path, &bytes).map_err(|source| ImageIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}
