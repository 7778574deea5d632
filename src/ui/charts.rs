use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Corner, GridMark, HLine, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint,
    PlotPoints, Points, Text, VLine,
};

use crate::color::{self, value_range, ColorScale};
use crate::data::binning::BinPoint;
use crate::data::charts::{QuadrantSplit, ScatterPoint};

// ---------------------------------------------------------------------------
// Shared configuration
// ---------------------------------------------------------------------------

/// Plot area scale factor for bubble markers: marker area grows with the size
/// value divided by this.
pub const BUBBLE_SIZE_REF: f64 = 2.0;

/// Title, axis labels and height of one chart.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub height: f32,
}

impl ChartConfig {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        ChartConfig {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            height: 320.0,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

/// A labelled point with a size value.
#[derive(Debug, Clone, Copy)]
pub struct Bubble<'a> {
    pub label: &'a str,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// A labelled point.
#[derive(Debug, Clone, Copy)]
pub struct Labeled<'a> {
    pub label: &'a str,
    pub x: f64,
    pub y: f64,
}

/// One category with two bar values.
#[derive(Debug, Clone, Copy)]
pub struct BarPair<'a> {
    pub category: &'a str,
    pub first: f64,
    pub second: f64,
}

/// One horizontal bar coloured by a second value.
#[derive(Debug, Clone, Copy)]
pub struct HeatBar<'a> {
    pub category: &'a str,
    pub value: f64,
    pub heat: f64,
}

/// Marker radius in points for a bubble of `size` (area mode).
pub fn bubble_radius(size: f64) -> f32 {
    let diameter = (size.max(0.0) / BUBBLE_SIZE_REF).sqrt();
    (diameter as f32 / 2.0).max(2.0)
}

/// Category label for an axis mark; only marks on integer positions get a name.
pub fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn chart_title(ui: &mut Ui, config: &ChartConfig) {
    ui.label(RichText::new(&config.title).size(18.0).color(color::TITLE));
}

fn base_plot(target: &str, config: &ChartConfig) -> Plot<'static> {
    Plot::new(target.to_string())
        .height(config.height)
        .x_axis_label(config.x_label.clone())
        .y_axis_label(config.y_label.clone())
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("x: {:.1}\ny: {:.1}", value.x, value.y)
            } else {
                format!("{name}\nx: {:.1}\ny: {:.1}", value.x, value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
}

/// Horizontal colour legend for a continuous scale.
fn color_bar(ui: &mut Ui, scale: ColorScale, min: f64, max: f64, title: &str) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(title).small().color(color::SLATE_300));
        ui.label(RichText::new(format!("{min:.1}")).small());
        let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 10.0), egui::Sense::hover());
        let steps = 32;
        let step_w = rect.width() / steps as f32;
        for i in 0..steps {
            let t = i as f32 / (steps - 1) as f32;
            let x0 = rect.left() + i as f32 * step_w;
            let cell = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step_w + 0.5, rect.bottom()),
            );
            ui.painter().rect_filled(cell, 0.0, scale.at(t));
        }
        ui.label(RichText::new(format!("{max:.1}")).small());
    });
}

// ---------------------------------------------------------------------------
// Chart 1 – bubble
// ---------------------------------------------------------------------------

/// Bubbles at `(x, y)` with area from `size` and colour from `x`.
pub fn bubble_chart(ui: &mut Ui, target: &str, data: &[Bubble<'_>], config: &ChartConfig) {
    chart_title(ui, config);
    let (min, max) = value_range(data.iter().map(|b| b.x));

    base_plot(target, config).show(ui, |plot_ui| {
        for b in data {
            let name = format!("{}\nRev: {:.1}%", b.label, b.size);
            plot_ui.points(
                Points::new(PlotPoints::from(vec![[b.x, b.y]]))
                    .name(name)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(bubble_radius(b.size))
                    .color(color::VIRIDIS.map(b.x, min, max)),
            );
        }
    });
    color_bar(ui, color::VIRIDIS, min, max, &config.x_label);
}

// ---------------------------------------------------------------------------
// Chart 2 – quadrant
// ---------------------------------------------------------------------------

/// Scatter with dashed lines at the mean of each axis.
pub fn quadrant_chart(
    ui: &mut Ui,
    target: &str,
    data: &[Labeled<'_>],
    split: Option<QuadrantSplit>,
    config: &ChartConfig,
) {
    chart_title(ui, config);
    base_plot(target, config).show(ui, |plot_ui| {
        for p in data {
            plot_ui.points(
                Points::new(PlotPoints::from(vec![[p.x, p.y]]))
                    .name(p.label)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0)
                    .color(color::SKY),
            );
        }
        if let Some(split) = split {
            plot_ui.vline(
                VLine::new(split.x_mean)
                    .color(color::SLATE_400)
                    .width(1.0)
                    .style(LineStyle::dashed_dense()),
            );
            plot_ui.hline(
                HLine::new(split.y_mean)
                    .color(color::SLATE_400)
                    .width(1.0)
                    .style(LineStyle::dashed_dense()),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Chart 3 – grouped bars
// ---------------------------------------------------------------------------

/// Two bar series side by side per category.
pub fn grouped_bar_chart(
    ui: &mut Ui,
    target: &str,
    data: &[BarPair<'_>],
    series_names: (&str, &str),
    config: &ChartConfig,
) {
    chart_title(ui, config);
    let labels: Vec<String> = data.iter().map(|d| d.category.to_string()).collect();
    let bar_width = 0.38;

    let first: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, d)| Bar::new(i as f64 - bar_width / 2.0, d.first).width(bar_width).name(d.category))
        .collect();
    let second: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, d)| Bar::new(i as f64 + bar_width / 2.0, d.second).width(bar_width).name(d.category))
        .collect();

    base_plot(target, config)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(first).name(series_names.0).color(color::EMERALD));
            plot_ui.bar_chart(BarChart::new(second).name(series_names.1).color(color::INDIGO));
        });
}

// ---------------------------------------------------------------------------
// Charts 4 and 5 – scatter with trend
// ---------------------------------------------------------------------------

/// Faint per-row scatter plus the binned mean as a thick line.
pub fn trend_scatter_chart(
    ui: &mut Ui,
    target: &str,
    scatter: &[ScatterPoint],
    trend: &[BinPoint],
    config: &ChartConfig,
) {
    chart_title(ui, config);
    let scatter_points: PlotPoints = scatter.iter().map(|p| [p.x, p.y]).collect();
    let trend_points: PlotPoints = trend.iter().map(|p| [p.x, p.y]).collect();

    base_plot(target, config)
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(scatter_points)
                    .name("Data points")
                    .radius(3.0)
                    .color(color::SLATE_600.gamma_multiply(0.4)),
            );
            plot_ui.line(
                Line::new(trend_points)
                    .name("Mean trend")
                    .color(color::TREND_RED)
                    .width(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Chart 6 – heatmap bars
// ---------------------------------------------------------------------------

/// Horizontal bars of `value` coloured by `heat` on a reversed RdYlGn scale.
pub fn heatmap_bar_chart(ui: &mut Ui, target: &str, data: &[HeatBar<'_>], heat_title: &str, config: &ChartConfig) {
    chart_title(ui, config);
    let scale = color::RD_YL_GN.reversed();
    let (min, max) = value_range(data.iter().map(|d| d.heat));
    let labels: Vec<String> = data.iter().map(|d| d.category.to_string()).collect();

    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let fill = scale.map(d.heat, min, max);
            Bar::new(i as f64, d.value)
                .width(0.7)
                .name(d.category)
                .fill(fill)
                .stroke(Stroke::new(1.0, fill))
        })
        .collect();
    let texts: Vec<(PlotPoint, String)> = data
        .iter()
        .enumerate()
        .map(|(i, d)| (PlotPoint::new(d.value, i as f64), format!("Loss: {:.1}%", d.heat)))
        .collect();

    base_plot(target, config)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
            for (pos, text) in texts {
                plot_ui.text(
                    Text::new(pos, RichText::new(text).color(Color32::BLACK).small())
                        .anchor(Align2::RIGHT_CENTER),
                );
            }
        });
    color_bar(ui, scale, min, max, heat_title);
}
