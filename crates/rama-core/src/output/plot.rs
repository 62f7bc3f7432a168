//! SVG rendering of the Ramachandran plot.
//!
//! The canvas is split into the chart (left three quarters) and a column of
//! boxed per-region percentages (right quarter). Text is emitted as SVG text
//! elements, so no fonts have to be installed to render.

use super::density::{DensityGrid, band_color};
use crate::analysis::region::Region;
use crate::analysis::summary::{ClassifiedSample, RegionSummary};
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const TITLE: &str = "Ramachandran Plot";
const PHI_LABEL: &str = "Φ (phi) Angles";
const PSI_LABEL: &str = "Ψ (psi) Angles";
const FONT_FAMILY: &str = "sans-serif";
const DENSITY_OPACITY: f64 = 0.6;
const POINTS_PER_INCH: f64 = 72.0;

type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to draw plot '{path}': {message}")]
    Drawing { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotConfig {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width_inches: 10.0,
            height_inches: 8.0,
            dpi: 300,
        }
    }
}

impl PlotConfig {
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_inches * dpi).round().max(1.0) as u32,
            (self.height_inches * dpi).round().max(1.0) as u32,
        )
    }

    /// Converts a size in typographic points to pixels at the configured DPI.
    fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }
}

pub fn region_color(region: Region) -> RGBColor {
    match region {
        Region::MostFavorable => RGBColor(0, 255, 0),
        Region::Favorable => RGBColor(255, 215, 0),
        Region::Allowed => RGBColor(30, 144, 255),
        Region::Disallowed => RGBColor(255, 0, 0),
    }
}

/// Renders the plot to an SVG string.
///
/// `density` is drawn underneath the scatter points when present. Region
/// shares are recomputed from `samples`.
pub fn render_plot_svg(
    samples: &[ClassifiedSample],
    density: Option<&DensityGrid>,
    config: &PlotConfig,
) -> DrawResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, config.pixel_size()).into_drawing_area();
        root.fill(&WHITE)?;

        let (width, _) = config.pixel_size();
        let (plot_area, label_area) = root.split_horizontally(width * 3 / 4);

        draw_chart(&plot_area, samples, density, config)?;
        if let Ok(summary) = RegionSummary::from_classified(samples) {
            draw_share_labels(&label_area, &summary, config)?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// Renders the plot and writes it to `path`, replacing any existing file.
pub fn render_plot(
    path: &Path,
    samples: &[ClassifiedSample],
    density: Option<&DensityGrid>,
    config: &PlotConfig,
) -> Result<(), PlotError> {
    let svg = render_plot_svg(samples, density, config).map_err(|e| PlotError::Drawing {
        path: path.to_string_lossy().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, svg).map_err(|e| PlotError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    debug!("Wrote plot to '{}'.", path.display());
    Ok(())
}

fn draw_chart<DB: DrawingBackend<ErrorType = std::io::Error>>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    samples: &[ClassifiedSample],
    density: Option<&DensityGrid>,
    config: &PlotConfig,
) -> DrawResult<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(TITLE, (FONT_FAMILY, config.px(16.0)))
        .margin(config.px(10.0) as u32)
        .x_label_area_size(config.px(36.0) as u32)
        .y_label_area_size(config.px(44.0) as u32)
        .build_cartesian_2d(-180.0..180.0, -180.0..180.0)?;

    chart
        .configure_mesh()
        .x_labels(9)
        .y_labels(9)
        .x_desc(PHI_LABEL)
        .y_desc(PSI_LABEL)
        .label_style((FONT_FAMILY, config.px(10.0)))
        .axis_desc_style((FONT_FAMILY, config.px(12.0)))
        .bold_line_style(RGBColor(200, 200, 200).mix(0.7))
        .light_line_style(RGBColor(230, 230, 230).mix(0.5))
        .draw()?;

    if let Some(grid) = density {
        chart.draw_series(grid.visible_cells().map(|cell| {
            let (r, g, b) = band_color(cell.band);
            Rectangle::new(
                [(cell.phi.0, cell.psi.0), (cell.phi.1, cell.psi.1)],
                RGBColor(r, g, b).mix(DENSITY_OPACITY).filled(),
            )
        }))?;
    }

    let radius = config.px(1.6).round().max(1.0) as i32;
    let edge = config.px(0.25).round().max(1.0) as u32;
    for region in Region::ALL {
        let points: Vec<(f64, f64)> = samples
            .iter()
            .filter(|s| s.region == region)
            .map(|s| (s.sample.phi, s.sample.psi))
            .collect();
        if points.is_empty() {
            continue;
        }

        let color = region_color(region);
        chart
            .draw_series(points.into_iter().map(|point| {
                EmptyElement::at(point)
                    + Circle::new((0, 0), radius, color.filled())
                    + Circle::new((0, 0), radius, BLACK.stroke_width(edge))
            }))?
            .label(region.label())
            .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT_FAMILY, config.px(10.0)))
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_share_labels<DB: DrawingBackend<ErrorType = std::io::Error>>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    summary: &RegionSummary,
    config: &PlotConfig,
) -> DrawResult<()> {
    let font_size = config.px(11.0);
    let padding = config.px(6.0) as i32;
    let box_height = font_size as i32 + 2 * padding;
    let spacing = box_height + padding * 2;
    let (width, height) = area.dim_in_pixel();
    let left = padding;
    let right = width as i32 - padding;
    let top = height as i32 / 2 - (spacing * summary.entries().len() as i32) / 2;

    for (i, share) in summary.in_region_order().enumerate() {
        let y = top + i as i32 * spacing;
        let corners = [(left, y), (right, y + box_height)];
        area.draw(&Rectangle::new(corners, WHITE.filled()))?;
        area.draw(&Rectangle::new(
            corners,
            region_color(share.region).stroke_width(edge_width(config)),
        ))?;
        area.draw(&Text::new(
            format!("{}: {}", share.region, share.formatted_percentage()),
            (left + padding, y + padding),
            (FONT_FAMILY, font_size).into_font().color(&BLACK),
        ))?;
    }
    Ok(())
}

fn edge_width(config: &PlotConfig) -> u32 {
    config.px(1.0).round().max(1.0) as u32
}
