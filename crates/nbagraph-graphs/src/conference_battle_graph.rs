//! East vs West cumulative wins chart.

use crate::conference_battle::ConferenceBattle;
use crate::renderer::{
    draw_empty_notice, draw_header, draw_logo, prepare_output, Canvas, GraphStyle,
};
use crate::traits::GraphRenderer;
use crate::utils::count_ceiling;
use chrono::{Duration, NaiveDate};
use nbagraph_common::{Conference, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, instrument};

pub const EAST_COLOR: RGBColor = RGBColor(0x25, 0x63, 0xeb);
pub const WEST_COLOR: RGBColor = RGBColor(0xef, 0x44, 0x44);

const TITLE: &str = "East vs West";
const TITLE_LOGO_SIZE: u32 = 56;
const TITLE_LOGO_GAP: i32 = 16;

/// Cumulative East and West wins in cross-conference games.
#[derive(Debug, Clone)]
pub struct ConferenceBattleGraph {
    style: GraphStyle,
    width: u32,
    height: u32,
    season: String,
}

impl ConferenceBattleGraph {
    pub fn new(style: GraphStyle, width: u32, height: u32, season: impl Into<String>) -> Self {
        Self {
            style,
            width,
            height,
            season: season.into(),
        }
    }

    /// Running score line, e.g. "East 41–37 West".
    pub fn headline(battle: &ConferenceBattle) -> String {
        let (east, west) = battle.totals();
        format!("East {east}–{west} West")
    }

    /// East logo left of the title and West logo right of it, with a
    /// colored dot standing in for a missing logo.
    fn draw_conference_marks(&self, root: &Canvas<'_>) -> Result<()> {
        let style = &self.style;
        let (title_width, _) = root.estimate_text_size(TITLE, &style.bold_style(36.0, &style.text))?;
        let center = self.width as i32 / 2;
        let half = title_width as i32 / 2 + TITLE_LOGO_GAP;
        let size = TITLE_LOGO_SIZE as i32;
        let top = 48 - size / 2;

        for (conference, left, color) in [
            (Conference::East, center - half - size, EAST_COLOR),
            (Conference::West, center + half, WEST_COLOR),
        ] {
            let logo = style.logo(&conference.to_string(), TITLE_LOGO_SIZE);
            if !draw_logo(root, logo.as_ref(), (left, top), TITLE_LOGO_SIZE)? {
                root.draw(&Circle::new((left + size / 2, 48), 10, color.filled()))?;
            }
        }
        Ok(())
    }

    /// `(days since start, east wins)` and `(days since start, west wins)`.
    fn series(battle: &ConferenceBattle, start: NaiveDate) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        battle
            .points
            .iter()
            .map(|p| {
                let day = (p.date - start).num_days() as f64;
                ((day, f64::from(p.east_wins)), (day, f64::from(p.west_wins)))
            })
            .unzip()
    }
}

impl GraphRenderer for ConferenceBattleGraph {
    type Data = ConferenceBattle;

    #[instrument(skip(self, data))]
    fn render_to_file(&self, data: &ConferenceBattle, path: &Path) -> Result<()> {
        prepare_output(path)?;
        let style = &self.style;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        let subtitle = format!("{} Season · {}", self.season, Self::headline(data));
        let body = draw_header(&root, style, TITLE, &subtitle)?;
        self.draw_conference_marks(&root)?;

        let Some((start, end)) = data.date_range() else {
            draw_empty_notice(&body, style)?;
            root.present()?;
            info!(path = %path.display(), "Rendered empty conference battle graph");
            return Ok(());
        };

        body.fill(&style.plot_background)?;
        let span = (end - start).num_days().max(1) as f64;
        let (east, west) = data.totals();
        let y_max = f64::from(count_ceiling(east.max(west), 5));

        let mut chart = ChartBuilder::on(&body)
            .margin(24)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..span, 0f64..y_max)?;

        let date_label = |x: &f64| {
            (start + Duration::days(x.round() as i64))
                .format("%b %d")
                .to_string()
        };
        chart
            .configure_mesh()
            .y_desc("Cumulative Wins")
            .light_line_style(style.grid)
            .bold_line_style(style.grid)
            .axis_style(style.muted_text)
            .label_style(style.text_style(14.0, &style.muted_text))
            .axis_desc_style(style.text_style(16.0, &style.text))
            .x_labels(8)
            .x_label_formatter(&date_label)
            .y_label_formatter(&|v: &f64| format!("{:.0}", v))
            .draw()?;

        let (east_points, west_points) = Self::series(data, start);
        chart
            .draw_series(LineSeries::new(east_points.iter().copied(), EAST_COLOR.stroke_width(3)))?
            .label("East")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], EAST_COLOR.stroke_width(3)));
        chart
            .draw_series(LineSeries::new(west_points.iter().copied(), WEST_COLOR.stroke_width(3)))?
            .label("West")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], WEST_COLOR.stroke_width(3)));

        for (points, color) in [(&east_points, EAST_COLOR), (&west_points, WEST_COLOR)] {
            if let Some(&last) = points.last() {
                chart.draw_series(std::iter::once(Circle::new(last, 5, color.filled())))?;
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(style.background.mix(0.9))
            .border_style(style.grid)
            .label_font(style.text_style(16.0, &style.text))
            .draw()?;

        root.present()?;
        info!(
            path = %path.display(),
            east,
            west,
            leader = ?data.leader(),
            "Rendered conference battle graph"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "conference-battle"
    }

    fn description(&self) -> &'static str {
        "Cumulative East and West wins in cross-conference games"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{count_pixels, write_logo};
    use nbagraph_common::test_utils::{create_temp_dir, date, game_fixtures::*};
    use nbagraph_config::GraphConfig;

    fn graph() -> ConferenceBattleGraph {
        let style = GraphStyle::from_config(&GraphConfig::default()).unwrap();
        ConferenceBattleGraph::new(style, 900, 450, "2025-26")
    }

    #[test]
    fn test_headline() {
        let battle = ConferenceBattle::compute(&opening_week());
        assert_eq!(ConferenceBattleGraph::headline(&battle), "East 2–0 West");
        assert_eq!(ConferenceBattleGraph::headline(&ConferenceBattle::default()), "East 0–0 West");
    }

    #[test]
    fn test_series_uses_day_offsets() {
        let battle = ConferenceBattle::compute(&opening_week());
        let (east, west) = ConferenceBattleGraph::series(&battle, date(2025, 10, 24));
        assert_eq!(east, vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(west, vec![(0.0, 0.0), (1.0, 0.0)]);
    }

    #[test]
    fn test_render_writes_png() {
        let dir = create_temp_dir();
        let path = dir.path().join(".conference_battle").join("conference_battle.png");
        let games = vec![
            home_win(date(2025, 10, 22), "lal", "bos"),
            away_win(date(2025, 11, 2), "mia", "gs"),
            home_win(date(2025, 11, 20), "okc", "ny"),
        ];

        graph()
            .render_to_file(&ConferenceBattle::compute(&games), &path)
            .unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (900, 450));
    }

    #[test]
    fn test_conference_logos_flank_title() {
        const EAST_MARK: [u8; 3] = [0x01, 0x02, 0xfe];
        const WEST_MARK: [u8; 3] = [0xfe, 0x02, 0x01];
        let dir = create_temp_dir();
        let logos = dir.path().join("logos");
        std::fs::create_dir_all(&logos).unwrap();
        write_logo(&logos, "east", EAST_MARK, 120);
        write_logo(&logos, "west", WEST_MARK, 120);
        let battle = ConferenceBattle::compute(&opening_week());
        let area = (TITLE_LOGO_SIZE * TITLE_LOGO_SIZE) as usize;

        let mut with_logos = graph();
        with_logos.style.logo_dir = logos;
        let path = dir.path().join("battle.png");
        with_logos.render_to_file(&battle, &path).unwrap();
        assert_eq!(count_pixels(&path, EAST_MARK), area);
        assert_eq!(count_pixels(&path, WEST_MARK), area);

        let empty = dir.path().join("empty.png");
        with_logos
            .render_to_file(&ConferenceBattle::default(), &empty)
            .unwrap();
        assert_eq!(count_pixels(&empty, EAST_MARK), area);
    }

    #[test]
    fn test_render_single_day() {
        let dir = create_temp_dir();
        let path = dir.path().join("battle.png");
        let games = vec![home_win(date(2025, 10, 22), "lal", "bos")];

        graph()
            .render_to_file(&ConferenceBattle::compute(&games), &path)
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_render_without_cross_conference_games() {
        let dir = create_temp_dir();
        let path = dir.path().join("battle.png");
        let games = vec![home_win(date(2025, 10, 22), "bos", "ny")];

        graph()
            .render_to_file(&ConferenceBattle::compute(&games), &path)
            .unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (900, 450));
    }
}
