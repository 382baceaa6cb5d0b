//! Conference standings line chart.

use crate::renderer::{
    draw_empty_notice, draw_header, draw_logo, parse_color, prepare_output, Canvas, GraphStyle,
};
use crate::standings::{ConferenceStandings, TeamStandings};
use crate::traits::GraphRenderer;
use crate::utils::symmetric_bounds;
use nbagraph_common::{format_signed, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{info, instrument};

const POSITIVE: RGBColor = RGBColor(0x05, 0x96, 0x69);
const NEGATIVE: RGBColor = RGBColor(0xdc, 0x26, 0x26);
const LEGEND_WIDTH: u32 = 260;
const LEGEND_ROW_HEIGHT: i32 = 34;
const LEGEND_LOGO_SIZE: u32 = 28;

/// Games over .500 against games played, one line per team.
#[derive(Debug, Clone)]
pub struct StandingsGraph {
    style: GraphStyle,
    width: u32,
    height: u32,
    season: String,
}

impl StandingsGraph {
    pub fn new(style: GraphStyle, width: u32, height: u32, season: impl Into<String>) -> Self {
        Self {
            style,
            width,
            height,
            season: season.into(),
        }
    }

    /// `(games played, games over .500)` starting from the origin.
    pub fn line_points(team: &TeamStandings) -> Vec<(f64, f64)> {
        std::iter::once((0.0, 0.0))
            .chain(
                team.points
                    .iter()
                    .map(|p| (p.games_played() as f64, p.games_over_500() as f64)),
            )
            .collect()
    }

    /// Legend value color for a final games-over-.500 figure.
    pub fn value_color(&self, games_over_500: i32) -> RGBColor {
        match games_over_500.signum() {
            1 => POSITIVE,
            -1 => NEGATIVE,
            _ => self.style.muted_text,
        }
    }

    fn title(data: &ConferenceStandings) -> String {
        format!("NBA {} Conference", data.conference.long_name())
    }

    fn draw_legend(&self, area: &Canvas<'_>, ranking: &[&TeamStandings]) -> Result<()> {
        let style = &self.style;
        for (row, standing) in ranking.iter().enumerate() {
            let y = 40 + row as i32 * LEGEND_ROW_HEIGHT;
            let logo = style.logo(standing.team.code, LEGEND_LOGO_SIZE);
            let corner = (14, y - LEGEND_LOGO_SIZE as i32 / 2);
            if !draw_logo(area, logo.as_ref(), corner, LEGEND_LOGO_SIZE)? {
                let color = parse_color(standing.team.color)?;
                let outline = parse_color(standing.team.color2)?;
                area.draw(&Rectangle::new([(16, y - 8), (40, y + 8)], color.filled()))?;
                area.draw(&Rectangle::new([(16, y - 8), (40, y + 8)], outline.stroke_width(2)))?;
            }
            area.draw(&Text::new(
                standing.team.name,
                (52, y),
                style
                    .text_style(18.0, &style.text)
                    .pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;

            let value = standing.games_over_500();
            area.draw(&Text::new(
                format_signed(value),
                (LEGEND_WIDTH as i32 - 20, y),
                style
                    .bold_style(18.0, &self.value_color(value))
                    .pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
        }
        Ok(())
    }
}

impl GraphRenderer for StandingsGraph {
    type Data = ConferenceStandings;

    #[instrument(skip(self, data), fields(conference = %data.conference))]
    fn render_to_file(&self, data: &ConferenceStandings, path: &Path) -> Result<()> {
        prepare_output(path)?;
        let style = &self.style;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        let subtitle = format!("{} Season · Cumulative Record", self.season);
        let body = draw_header(&root, style, &Self::title(data), &subtitle)?;

        if data.is_empty() {
            draw_empty_notice(&body, style)?;
            root.present()?;
            info!(path = %path.display(), "Rendered empty standings graph");
            return Ok(());
        }

        let (body_width, _) = body.dim_in_pixel();
        let (plot_area, legend_area) = body.split_horizontally(body_width.saturating_sub(LEGEND_WIDTH));
        plot_area.fill(&style.plot_background)?;

        let max_x = data.max_games_played().max(1) as f64;
        let (lo, hi) = data.games_over_500_extent();
        let (y_min, y_max) = symmetric_bounds(lo, hi, 2);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..max_x, y_min as f64..y_max as f64)?;

        let tick_label = |v: &f64| format!("{:.0}", v);
        chart
            .configure_mesh()
            .x_desc("Games Played")
            .y_desc("Games Over .500")
            .light_line_style(style.grid)
            .bold_line_style(style.grid)
            .axis_style(style.muted_text)
            .label_style(style.text_style(14.0, &style.muted_text))
            .axis_desc_style(style.text_style(16.0, &style.text))
            .x_label_formatter(&tick_label)
            .y_label_formatter(&|v: &f64| format_signed(v.round() as i32))
            .draw()?;

        chart.draw_series(LineSeries::new(
            [(0.0, 0.0), (max_x, 0.0)],
            style.zero_line.stroke_width(2),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            ".500",
            (max_x, 0.0),
            style
                .text_style(14.0, &style.muted_text)
                .pos(Pos::new(HPos::Right, VPos::Bottom)),
        )))?;

        let ranking = data.ranking();
        // Worst first so the leaders end up on top.
        for standing in ranking.iter().rev() {
            let points = Self::line_points(standing);
            let color = parse_color(standing.team.color)?;
            let outline = parse_color(standing.team.color2)?;

            chart.draw_series(LineSeries::new(points.iter().copied(), outline.stroke_width(5)))?;
            chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))?;
            if let Some(&end) = points.last() {
                chart.draw_series(std::iter::once(Circle::new(end, 6, outline.filled())))?;
                chart.draw_series(std::iter::once(Circle::new(end, 4, color.filled())))?;
            }
        }

        self.draw_legend(&legend_area, &ranking)?;

        root.present()?;
        info!(
            path = %path.display(),
            teams = data.teams.len(),
            games = max_x,
            "Rendered standings graph"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "standings"
    }

    fn description(&self) -> &'static str {
        "Cumulative games over .500 for every team in a conference"
    }
}
