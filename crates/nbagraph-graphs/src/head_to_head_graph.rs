//! Head-to-head heatmap.

use crate::head_to_head::{HeadToHead, MatchupCell};
use crate::renderer::{draw_empty_notice, draw_header, draw_logo, prepare_output, GraphStyle};
use crate::traits::GraphRenderer;
use chrono::NaiveDate;
use nbagraph_common::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{info, instrument};

const EVEN: RGBColor = RGBColor(0xf0, 0xf0, 0xf0);
const UNPLAYED: RGBColor = RGBColor(0x1a, 0x1a, 0x1a);
const DIAGONAL: RGBColor = RGBColor(0xd1, 0xd5, 0xdb);
const CELL_BORDER: RGBColor = RGBColor(0xe0, 0xe0, 0xe0);
const ROW_LABEL_WIDTH: i32 = 70;
const COLUMN_LABEL_HEIGHT: i32 = 40;
const MARGIN: i32 = 20;
/// Axis logos never grow past the label band.
const MAX_LOGO_SIZE: i32 = 32;
/// Below this a logo is unrecognizable, so codes are drawn instead.
const MIN_LOGO_SIZE: i32 = 10;

/// Differential at which cell color stops getting stronger.
const SATURATION: f64 = 3.0;

/// Fill color of one matrix cell.
pub fn cell_color(cell: MatchupCell) -> RGBColor {
    match cell {
        MatchupCell::Diagonal => DIAGONAL,
        MatchupCell::Unplayed => UNPLAYED,
        MatchupCell::Played { .. } => {
            let diff = cell.differential();
            let intensity = (f64::from(diff.unsigned_abs()) / SATURATION).min(1.0);
            let channel = |base: f64, span: f64| (base - span * intensity).round() as u8;
            match diff.signum() {
                1 => RGBColor(channel(240.0, 180.0), channel(250.0, 60.0), channel(240.0, 180.0)),
                -1 => RGBColor(channel(250.0, 30.0), channel(240.0, 160.0), channel(240.0, 160.0)),
                _ => EVEN,
            }
        }
    }
}

/// Whether a cell needs light text to stay readable.
pub fn needs_light_text(cell: MatchupCell) -> bool {
    cell.differential().abs() >= 2
}

/// Every team against every other team, ordered by total wins.
#[derive(Debug, Clone)]
pub struct HeadToHeadGraph {
    style: GraphStyle,
    size: u32,
    season: String,
    as_of: NaiveDate,
}

impl HeadToHeadGraph {
    pub fn new(style: GraphStyle, size: u32, season: impl Into<String>, as_of: NaiveDate) -> Self {
        Self {
            style,
            size,
            season: season.into(),
            as_of,
        }
    }

    fn subtitle(&self) -> String {
        format!("{} Season · {}", self.season, self.as_of.format("%B %d, %Y"))
    }
}

impl GraphRenderer for HeadToHeadGraph {
    type Data = HeadToHead;

    #[instrument(skip(self, data))]
    fn render_to_file(&self, data: &HeadToHead, path: &Path) -> Result<()> {
        prepare_output(path)?;
        let style = &self.style;

        let root = BitMapBackend::new(path, (self.size, self.size)).into_drawing_area();
        let body = draw_header(&root, style, "Head-to-Head", &self.subtitle())?;

        if data.is_empty() {
            draw_empty_notice(&body, style)?;
            root.present()?;
            info!(path = %path.display(), "Rendered empty head-to-head graph");
            return Ok(());
        }

        let teams = data.ordering();
        let n = teams.len() as i32;
        let (width, height) = body.dim_in_pixel();
        let grid = (width as i32 - ROW_LABEL_WIDTH - MARGIN)
            .min(height as i32 - COLUMN_LABEL_HEIGHT - MARGIN);
        let cell = (grid / n).max(1);
        let font_size = (f64::from(cell) * 0.34).clamp(7.0, 16.0);
        let x0 = ROW_LABEL_WIDTH;
        let y0 = COLUMN_LABEL_HEIGHT;

        let logo_size = (cell - 4).min(MAX_LOGO_SIZE);
        let logos: Vec<_> = teams
            .iter()
            .map(|team| {
                (logo_size >= MIN_LOGO_SIZE)
                    .then(|| style.logo(team.code, logo_size as u32))
                    .flatten()
            })
            .collect();

        for (col, team) in teams.iter().enumerate() {
            let left = x0 + col as i32 * cell;
            let corner = (left + (cell - logo_size) / 2, y0 - 4 - logo_size);
            if !draw_logo(&body, logos[col].as_ref(), corner, logo_size as u32)? {
                body.draw(&Text::new(
                    team.code.to_uppercase(),
                    (left + cell / 2, y0 - 8),
                    style
                        .bold_style(font_size, &style.text)
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                ))?;
            }
        }

        for (row, team) in teams.iter().enumerate() {
            let top = y0 + row as i32 * cell;
            let corner = (x0 - 4 - logo_size, top + (cell - logo_size) / 2);
            if !draw_logo(&body, logos[row].as_ref(), corner, logo_size as u32)? {
                body.draw(&Text::new(
                    team.code.to_uppercase(),
                    (x0 - 8, top + cell / 2),
                    style
                        .bold_style(font_size, &style.text)
                        .pos(Pos::new(HPos::Right, VPos::Center)),
                ))?;
            }

            for (col, opponent) in teams.iter().enumerate() {
                let left = x0 + col as i32 * cell;
                let matchup = data.cell(team.code, opponent.code);
                let corners = [(left, top), (left + cell, top + cell)];

                body.draw(&Rectangle::new(corners, cell_color(matchup).filled()))?;
                body.draw(&Rectangle::new(corners, CELL_BORDER.stroke_width(1)))?;

                if let Some(label) = matchup.label() {
                    let color = if needs_light_text(matchup) {
                        WHITE
                    } else {
                        style.text
                    };
                    body.draw(&Text::new(
                        label,
                        (left + cell / 2, top + cell / 2),
                        style
                            .text_style(font_size, &color)
                            .pos(Pos::new(HPos::Center, VPos::Center)),
                    ))?;
                }
            }
        }

        root.present()?;
        info!(path = %path.display(), games = data.total_games(), "Rendered head-to-head graph");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "head-to-head"
    }

    fn description(&self) -> &'static str {
        "Win-loss record of every team against every other team"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{count_pixels, write_logo};
    use nbagraph_common::test_utils::{create_temp_dir, date, game_fixtures::*};
    use nbagraph_config::GraphConfig;

    fn graph(size: u32) -> HeadToHeadGraph {
        let style = GraphStyle::from_config(&GraphConfig::default()).unwrap();
        HeadToHeadGraph::new(style, size, "2025-26", date(2025, 12, 1))
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(cell_color(MatchupCell::Diagonal), DIAGONAL);
        assert_eq!(cell_color(MatchupCell::Unplayed), UNPLAYED);
        assert_eq!(cell_color(MatchupCell::Played { wins: 1, losses: 1 }), EVEN);
        assert_eq!(
            cell_color(MatchupCell::Played { wins: 3, losses: 0 }),
            RGBColor(60, 190, 60)
        );
        assert_eq!(
            cell_color(MatchupCell::Played { wins: 0, losses: 4 }),
            RGBColor(220, 80, 80)
        );
        assert_eq!(
            cell_color(MatchupCell::Played { wins: 0, losses: 3 }),
            cell_color(MatchupCell::Played { wins: 1, losses: 4 })
        );
    }

    #[test]
    fn test_light_text_threshold() {
        assert!(!needs_light_text(MatchupCell::Played { wins: 1, losses: 0 }));
        assert!(needs_light_text(MatchupCell::Played { wins: 0, losses: 2 }));
        assert!(!needs_light_text(MatchupCell::Unplayed));
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(graph(600).subtitle(), "2025-26 Season · December 01, 2025");
    }

    #[test]
    fn test_render_writes_square_png() {
        let dir = create_temp_dir();
        let path = dir.path().join(".head_to_head").join("head_to_head.png");
        let h2h = HeadToHead::compute(&opening_week());

        graph(800).render_to_file(&h2h, &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (800, 800));
    }

    #[test]
    fn test_logos_replace_codes_on_both_axes() {
        const MARK: [u8; 3] = [0x0b, 0xad, 0x1d];
        let dir = create_temp_dir();
        let logos = dir.path().join("logos");
        std::fs::create_dir_all(&logos).unwrap();
        write_logo(&logos, "bos", MARK, 100);
        let h2h = HeadToHead::compute(&opening_week());

        let mut with_logos = graph(1000);
        with_logos.style.logo_dir = logos;
        let path = dir.path().join("head_to_head.png");
        with_logos.render_to_file(&h2h, &path).unwrap();

        // 1000px: 830px grid, 27px cells, 23px logos
        assert_eq!(count_pixels(&path, MARK), 2 * 23 * 23);

        let tiny = dir.path().join("tiny.png");
        let mut small = graph(300);
        small.style.logo_dir = dir.path().join("logos");
        small.render_to_file(&h2h, &tiny).unwrap();
        assert_eq!(count_pixels(&tiny, MARK), 0);
    }

    #[test]
    fn test_render_empty_matrix() {
        let dir = create_temp_dir();
        let path = dir.path().join("head_to_head.png");

        graph(600).render_to_file(&HeadToHead::default(), &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (600, 600));
    }
}
