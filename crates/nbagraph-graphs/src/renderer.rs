//! Shared styling and drawing helpers for the PNG renderers.

use image::imageops::FilterType;
use image::RgbaImage;
use nbagraph_common::{parse_hex_color, Result};
use nbagraph_config::GraphConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Drawing surface every renderer paints on.
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Height of the title band above every graph.
pub const HEADER_HEIGHT: u32 = 110;

/// Resolved colors and font shared by all renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStyle {
    pub background: RGBColor,
    pub plot_background: RGBColor,
    pub grid: RGBColor,
    pub text: RGBColor,
    pub muted_text: RGBColor,
    pub zero_line: RGBColor,
    pub font_family: String,
    pub logo_dir: PathBuf,
}

impl GraphStyle {
    /// Parse the configured hex colors.
    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        Ok(Self {
            background: parse_color(&config.background)?,
            plot_background: parse_color(&config.plot_background)?,
            grid: parse_color(&config.grid)?,
            text: parse_color(&config.text)?,
            muted_text: parse_color(&config.muted_text)?,
            zero_line: parse_color(&config.zero_line)?,
            font_family: config.font_family.clone(),
            logo_dir: config.logo_dir.clone(),
        })
    }

    /// Regular text in `color`.
    pub fn text_style(&self, size: f64, color: &RGBColor) -> TextStyle<'_> {
        (self.font_family.as_str(), size).into_font().color(color)
    }

    /// Bold text in `color`.
    pub fn bold_style(&self, size: f64, color: &RGBColor) -> TextStyle<'_> {
        (self.font_family.as_str(), size, FontStyle::Bold)
            .into_font()
            .color(color)
    }

    /// `{logo_dir}/{name}.png` scaled to fit a `size` square, or `None` when
    /// the file is absent or unreadable.
    pub fn logo(&self, name: &str, size: u32) -> Option<Logo> {
        let path = self.logo_dir.join(format!("{name}.png"));
        if size == 0 || !path.is_file() {
            return None;
        }
        match image::open(&path) {
            Ok(image) => {
                let scaled = image.resize(size, size, FilterType::Triangle).to_rgba8();
                debug!(path = %path.display(), size, "Loaded logo");
                Some(Logo::flatten(&scaled, self.background))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable logo, drawing fallback");
                None
            }
        }
    }
}

/// Opaque RGB pixels of a logo, ready to blit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Logo {
    /// Composite `image` over `background`; the bitmap backend has no alpha.
    pub fn flatten(image: &RgbaImage, background: RGBColor) -> Self {
        let blend = |fg: u8, bg: u8, alpha: u16| {
            ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        let pixels = image
            .pixels()
            .flat_map(|p| {
                let [r, g, b, a] = p.0;
                let alpha = u16::from(a);
                [
                    blend(r, background.0, alpha),
                    blend(g, background.1, alpha),
                    blend(b, background.2, alpha),
                ]
            })
            .collect();
        Self {
            pixels,
            width: image.width(),
            height: image.height(),
        }
    }

    /// Element drawing the logo centered in the `size` square whose top-left
    /// corner is `corner`.
    pub fn element(&self, corner: (i32, i32), size: u32) -> Option<BitMapElement<'_, (i32, i32)>> {
        let x = corner.0 + (size.saturating_sub(self.width) / 2) as i32;
        let y = corner.1 + (size.saturating_sub(self.height) / 2) as i32;
        BitMapElement::with_ref((x, y), (self.width, self.height), &self.pixels)
    }
}

/// Draw `logo` centered in the `size` square at `corner`, if there is one.
/// Returns whether anything was drawn.
pub fn draw_logo(
    area: &Canvas<'_>,
    logo: Option<&Logo>,
    corner: (i32, i32),
    size: u32,
) -> Result<bool> {
    match logo.and_then(|l| l.element(corner, size)) {
        Some(element) => {
            area.draw(&element)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Parse a `#RRGGBB` string into a plotters color.
pub fn parse_color(hex: &str) -> Result<RGBColor> {
    let (r, g, b) = parse_hex_color(hex)?;
    Ok(RGBColor(r, g, b))
}

/// Create the parent directory of `path` if needed.
pub fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Fill the background, draw a centered title and subtitle, and return the
/// area below them.
pub fn draw_header<'a>(
    root: &Canvas<'a>,
    style: &GraphStyle,
    title: &str,
    subtitle: &str,
) -> Result<Canvas<'a>> {
    root.fill(&style.background)?;
    let (header, body) = root.split_vertically(HEADER_HEIGHT);
    let (width, _) = header.dim_in_pixel();
    let center = width as i32 / 2;

    header.draw(&Text::new(
        title.to_string(),
        (center, 48),
        style
            .bold_style(36.0, &style.text)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    header.draw(&Text::new(
        subtitle.to_string(),
        (center, 88),
        style
            .text_style(20.0, &style.muted_text)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    Ok(body)
}

/// Centered "No games yet" note for an empty dataset.
pub fn draw_empty_notice(area: &Canvas<'_>, style: &GraphStyle) -> Result<()> {
    area.fill(&style.plot_background)?;
    let (width, height) = area.dim_in_pixel();
    area.draw(&Text::new(
        "No games yet",
        (width as i32 / 2, height as i32 / 2),
        style
            .text_style(28.0, &style.muted_text)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::write_logo;
    use super::*;
    use image::Rgba;
    use nbagraph_common::test_utils::create_temp_dir;

    #[test]
    fn test_style_from_default_config() {
        let style = GraphStyle::from_config(&GraphConfig::default()).unwrap();
        assert_eq!(style.background, RGBColor(255, 255, 255));
        assert_eq!(style.text, RGBColor(0x1f, 0x29, 0x37));
        assert_eq!(style.font_family, "sans-serif");
        assert_eq!(style.logo_dir, PathBuf::from("img/logos"));
    }

    #[test]
    fn test_logo_is_scaled_to_fit() {
        let dir = create_temp_dir();
        write_logo(dir.path(), "bos", [0x00, 0x7a, 0x33], 64);
        let style = GraphStyle {
            logo_dir: dir.path().to_path_buf(),
            ..GraphStyle::from_config(&GraphConfig::default()).unwrap()
        };

        let logo = style.logo("bos", 24).unwrap();

        assert_eq!((logo.width, logo.height), (24, 24));
        assert_eq!(&logo.pixels[..3], &[0x00, 0x7a, 0x33]);
        assert!(style.logo("ny", 24).is_none());
        assert!(style.logo("bos", 0).is_none());
    }

    #[test]
    fn test_unreadable_logo_falls_back() {
        let dir = create_temp_dir();
        std::fs::write(dir.path().join("lal.png"), b"not a png").unwrap();
        let style = GraphStyle {
            logo_dir: dir.path().to_path_buf(),
            ..GraphStyle::from_config(&GraphConfig::default()).unwrap()
        };
        assert!(style.logo("lal", 24).is_none());
    }

    #[test]
    fn test_flatten_blends_alpha_over_background() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([200, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let logo = Logo::flatten(&image, RGBColor(10, 20, 30));

        assert_eq!(logo.pixels, vec![200, 0, 0, 10, 20, 30]);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let config = GraphConfig {
            grid: "grey".to_string(),
            ..GraphConfig::default()
        };
        assert!(GraphStyle::from_config(&config).is_err());
        assert_eq!(parse_color("#2563eb").unwrap(), RGBColor(0x25, 0x63, 0xeb));
    }

    #[test]
    fn test_prepare_output_creates_parent() {
        let dir = create_temp_dir();
        let path = dir.path().join(".standings").join("east_standings.png");
        prepare_output(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
        prepare_output(Path::new("bare.png")).unwrap();
    }
}
