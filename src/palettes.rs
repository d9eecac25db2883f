//! Named colors and palette parsing for the CLI.

use palette_dither::{Palette, Pixel};

use crate::error::SettingsError;

/// Colors that can be referred to by name in `--palette` and config files.
pub const NAMED_COLORS: [(&str, Pixel); 7] = [
    ("black", Pixel::new(0, 0, 0)),
    ("white", Pixel::new(255, 255, 255)),
    ("green", Pixel::new(0, 255, 0)),
    ("blue", Pixel::new(0, 0, 255)),
    ("red", Pixel::new(255, 0, 0)),
    ("yellow", Pixel::new(255, 255, 0)),
    ("orange", Pixel::new(255, 128, 0)),
];

/// The seven-color ACeP e-ink panel palette, in panel index order.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "black", "white", "green", "blue", "red", "yellow", "orange",
];

/// Look up a color name, case-insensitive.
pub fn named_color(name: &str) -> Option<Pixel> {
    let name = name.trim();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

/// Parse one color: a name from [`NAMED_COLORS`] or a hex value.
pub fn parse_color(token: &str) -> Result<Pixel, SettingsError> {
    if let Some(color) = named_color(token) {
        return Ok(color);
    }
    token
        .parse::<Pixel>()
        .map_err(|_| SettingsError::UnknownColor(token.trim().to_string()))
}

/// Build a palette from color tokens, in the given order.
pub fn parse_palette<S: AsRef<str>>(tokens: &[S]) -> Result<Palette, SettingsError> {
    let colors = tokens
        .iter()
        .map(|t| parse_color(t.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Palette::new(&colors)?)
}

/// Parse a comma-separated list such as `black,white,#ff0000`.
pub fn parse_palette_list(list: &str) -> Result<Palette, SettingsError> {
    let tokens: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    parse_palette(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_dither::{DitherError, PaletteError};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_palette_order() {
        let palette = parse_palette(&DEFAULT_PALETTE[..]).unwrap();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette[0], Pixel::new(0, 0, 0));
        assert_eq!(palette[6], Pixel::new(255, 128, 0));
    }

    #[test]
    fn test_named_color_case_insensitive() {
        assert_eq!(named_color("Red"), Some(Pixel::new(255, 0, 0)));
        assert_eq!(named_color(" ORANGE "), Some(Pixel::new(255, 128, 0)));
        assert_eq!(named_color("mauve"), None);
    }

    #[test]
    fn test_mixed_list() {
        let palette = parse_palette_list("black, white,#00f, 808080").unwrap();
        assert_eq!(
            palette.colors(),
            &[
                Pixel::new(0, 0, 0),
                Pixel::new(255, 255, 255),
                Pixel::new(0, 0, 255),
                Pixel::new(128, 128, 128),
            ]
        );
    }

    #[test]
    fn test_unknown_token() {
        assert!(matches!(
            parse_palette_list("black,mauve"),
            Err(SettingsError::UnknownColor(t)) if t == "mauve"
        ));
    }

    #[test]
    fn test_empty_list() {
        assert!(matches!(
            parse_palette_list(" , "),
            Err(SettingsError::Dither(DitherError::Palette(PaletteError::EmptyPalette)))
        ));
    }

    #[test]
    fn test_name_and_hex_duplicate() {
        assert!(matches!(
            parse_palette_list("white,#fff"),
            Err(SettingsError::Dither(DitherError::Palette(
                PaletteError::DuplicateColor { index: 1, .. }
            )))
        ));
    }
}
