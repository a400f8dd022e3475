//! SVG rendering of the allocation glide path.
//!
//! Two stacked panels: the full bucket allocation as stacked areas, then the
//! stock and bond split with the weighted expense ratio on a secondary axis.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::allocation::AssetBucket;
use crate::domain::error::RothkitError;
use crate::domain::glide_path::{GlidePath, MAX_CHART_AGE, MIN_CHART_AGE};
use crate::ports::chart_port::ChartPort;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 1000.0;
const LEFT: f64 = 80.0;
const PLOT_WIDTH: f64 = 780.0;
const PLOT_HEIGHT: f64 = 360.0;
const TOP_PANEL_Y: f64 = 90.0;
const BOTTOM_PANEL_Y: f64 = 570.0;

const BUCKET_COLORS: [&str; 7] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#17becf",
];
const STOCK_COLOR: &str = "#1f4fd6";
const BOND_COLOR: &str = "#ff8c00";
const EXPENSE_COLOR: &str = "#2ca02c";
const MARKER_COLOR: &str = "#d62728";

const MILESTONES: [(u32, f64, &str, &str); 3] = [
    (25, 95.0, "Aggressive Growth (Young Investor)", "#add8e6"),
    (45, 75.0, "Balanced Approach (Middle Age)", "#ffb6c1"),
    (65, 35.0, "Conservative (Near Retirement)", "#ffffe0"),
];

pub struct SvgChartAdapter;

impl ChartPort for SvgChartAdapter {
    fn write_allocation_chart(&self, path: &GlidePath, out: &Path) -> Result<(), RothkitError> {
        let svg = render_allocation_svg(path);
        fs::write(out, svg).map_err(|e| RothkitError::Chart {
            reason: format!("failed to write {}: {}", out.display(), e),
        })?;
        debug!(path = %out.display(), points = path.points.len(), "wrote allocation chart");
        Ok(())
    }
}

/// Horizontal mapping from age to pixels for one glide path.
struct AgeAxis {
    first: u32,
    span: f64,
}

impl AgeAxis {
    fn x(&self, age: u32) -> f64 {
        LEFT + f64::from(age - self.first) / self.span * PLOT_WIDTH
    }

    fn contains(&self, age: u32) -> bool {
        age >= self.first && f64::from(age - self.first) <= self.span
    }
}

fn y_pct(panel_top: f64, pct: f64) -> f64 {
    panel_top + PLOT_HEIGHT - pct / 100.0 * PLOT_HEIGHT
}

/// An empty glide path still renders both panels with bare axes.
pub fn render_allocation_svg(path: &GlidePath) -> String {
    let axis = match (path.points.first(), path.points.last()) {
        (Some(first), Some(last)) => AgeAxis {
            first: first.age,
            span: f64::from((last.age - first.age).max(1)),
        },
        _ => AgeAxis {
            first: MIN_CHART_AGE,
            span: f64::from(MAX_CHART_AGE - MIN_CHART_AGE),
        },
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"white\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"40\" font-size=\"22\" font-weight=\"bold\" \
         text-anchor=\"middle\">Fidelity Portfolio Allocation Strategy by Age</text>\n",
        WIDTH / 2.0
    ));

    render_allocation_panel(&mut svg, path, &axis);
    render_trend_panel(&mut svg, path, &axis);

    svg.push_str("</svg>\n");
    svg
}

fn render_allocation_panel(svg: &mut String, path: &GlidePath, axis: &AgeAxis) {
    let top = TOP_PANEL_Y;
    render_frame(svg, path, axis, top, "Complete Portfolio Allocation Over Time");

    let mut lower = vec![0.0_f64; path.points.len()];
    for (i, bucket) in AssetBucket::ALL.iter().enumerate() {
        let upper: Vec<f64> = path
            .points
            .iter()
            .zip(&lower)
            .map(|(p, base)| base + f64::from(p.allocation.percentage(*bucket)))
            .collect();

        let mut coords: Vec<String> = path
            .points
            .iter()
            .zip(&upper)
            .map(|(p, v)| format!("{:.1},{:.1}", axis.x(p.age), y_pct(top, *v)))
            .collect();
        coords.extend(
            path.points
                .iter()
                .zip(&lower)
                .rev()
                .map(|(p, v)| format!("{:.1},{:.1}", axis.x(p.age), y_pct(top, *v))),
        );
        if !coords.is_empty() {
            svg.push_str(&format!(
                "<polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.8\"/>\n",
                coords.join(" "),
                BUCKET_COLORS[i]
            ));
        }

        let legend_y = top + 14.0 + i as f64 * 22.0;
        let legend_x = LEFT + PLOT_WIDTH + 30.0;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"14\" height=\"14\" fill=\"{}\"/>\n",
            legend_x,
            legend_y - 11.0,
            BUCKET_COLORS[i]
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\">{}</text>\n",
            legend_x + 20.0,
            legend_y,
            escape(&bucket.to_string())
        ));

        lower = upper;
    }

    if path.contains_current_age() {
        let x = axis.x(path.current_age);
        render_age_marker(svg, x, top);
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"14\" font-weight=\"bold\" fill=\"{MARKER_COLOR}\" \
             transform=\"rotate(-90 {x:.1} {:.1})\" text-anchor=\"end\" dx=\"-8\" dy=\"-6\">Your Age: {}</text>\n",
            y_pct(top, 95.0),
            y_pct(top, 95.0),
            path.current_age
        ));
    }
}

fn render_trend_panel(svg: &mut String, path: &GlidePath, axis: &AgeAxis) {
    let top = BOTTOM_PANEL_Y;
    render_frame(svg, path, axis, top, "Stock vs Bond Allocation + Expense Ratio Trend");

    let polyline = |values: Vec<(u32, f64)>, style: &str| -> String {
        if values.is_empty() {
            return String::new();
        }
        let points = values
            .iter()
            .map(|(age, v)| format!("{:.1},{:.1}", axis.x(*age), y_pct(top, *v)))
            .collect::<Vec<_>>()
            .join(" ");
        format!("<polyline points=\"{points}\" fill=\"none\" {style}/>\n")
    };

    let stocks: Vec<(u32, f64)> = path
        .points
        .iter()
        .map(|p| (p.age, f64::from(p.stock_percentage)))
        .collect();
    let bonds: Vec<(u32, f64)> = path
        .points
        .iter()
        .map(|p| (p.age, f64::from(p.bond_percentage)))
        .collect();

    svg.push_str(&polyline(
        stocks,
        &format!("stroke=\"{STOCK_COLOR}\" stroke-width=\"3\""),
    ));
    svg.push_str(&polyline(
        bonds,
        &format!("stroke=\"{BOND_COLOR}\" stroke-width=\"3\""),
    ));
    for p in &path.points {
        svg.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{STOCK_COLOR}\"/>\n",
            axis.x(p.age),
            y_pct(top, f64::from(p.stock_percentage))
        ));
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"6\" height=\"6\" fill=\"{BOND_COLOR}\"/>\n",
            axis.x(p.age) - 3.0,
            y_pct(top, f64::from(p.bond_percentage)) - 3.0
        ));
    }

    // Secondary axis: expense ratio in percent, scaled to the path's maximum.
    let max_expense_pct = path
        .points
        .iter()
        .map(|p| p.weighted_expense_ratio * 100.0)
        .fold(0.0_f64, f64::max);
    let expense_scale = if max_expense_pct > 0.0 {
        max_expense_pct * 1.1
    } else {
        1.0
    };
    let expense: Vec<(u32, f64)> = path
        .points
        .iter()
        .map(|p| (p.age, p.weighted_expense_ratio * 100.0 / expense_scale * 100.0))
        .collect();
    svg.push_str(&polyline(
        expense,
        &format!(
            "stroke=\"{EXPENSE_COLOR}\" stroke-width=\"2\" stroke-dasharray=\"8 5\" stroke-opacity=\"0.7\""
        ),
    ));

    let right = LEFT + PLOT_WIDTH;
    for step in 0..=5 {
        let frac = f64::from(step) / 5.0;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"{EXPENSE_COLOR}\">{:.3}</text>\n",
            right + 8.0,
            y_pct(top, frac * 100.0) + 4.0,
            frac * expense_scale
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" fill=\"{EXPENSE_COLOR}\" \
         transform=\"rotate(90 {:.1} {:.1})\" text-anchor=\"middle\">Expense Ratio (%)</text>\n",
        right + 60.0,
        top + PLOT_HEIGHT / 2.0,
        right + 60.0,
        top + PLOT_HEIGHT / 2.0
    ));

    let legend_x = right + 110.0;
    for (i, (label, color)) in [
        ("Stock Allocation", STOCK_COLOR),
        ("Bond Allocation", BOND_COLOR),
        ("Expense Ratio", EXPENSE_COLOR),
    ]
    .iter()
    .enumerate()
    {
        let y = top + 14.0 + i as f64 * 22.0;
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"3\"/>\n",
            legend_x,
            y - 5.0,
            legend_x + 20.0,
            y - 5.0,
            color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\">{}</text>\n",
            legend_x + 26.0,
            y,
            label
        ));
    }

    for (age, pct, label, fill) in MILESTONES {
        if path.points.is_empty() || !axis.contains(age) {
            continue;
        }
        let x = axis.x(age);
        let y = y_pct(top, pct);
        svg.push_str(&format!(
            "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"none\" stroke=\"#555\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" style=\"paint-order: stroke\" \
             stroke=\"{fill}\" stroke-width=\"6\">{}</text>\n",
            x + 8.0,
            y + 18.0,
            escape(label)
        ));
    }

    if path.contains_current_age() {
        render_age_marker(svg, axis.x(path.current_age), top);
    }
}

/// Panel title, axes, percentage grid and age ticks.
fn render_frame(svg: &mut String, path: &GlidePath, axis: &AgeAxis, top: f64, title: &str) {
    let bottom = top + PLOT_HEIGHT;
    let right = LEFT + PLOT_WIDTH;

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
        LEFT + PLOT_WIDTH / 2.0,
        top - 14.0,
        escape(title)
    ));

    for pct in (0..=100).step_by(20) {
        let y = y_pct(top, f64::from(pct));
        svg.push_str(&format!(
            "<line x1=\"{LEFT:.1}\" y1=\"{y:.1}\" x2=\"{right:.1}\" y2=\"{y:.1}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{pct}</text>\n",
            LEFT - 8.0,
            y + 4.0
        ));
    }

    for age in path.ages().filter(|age| age % 5 == 0) {
        let x = axis.x(age);
        svg.push_str(&format!(
            "<line x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" stroke=\"#e5e5e5\" stroke-width=\"1\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{age}</text>\n",
            bottom + 18.0
        ));
    }

    svg.push_str(&format!(
        "<rect x=\"{LEFT:.1}\" y=\"{top:.1}\" width=\"{PLOT_WIDTH:.1}\" height=\"{PLOT_HEIGHT:.1}\" \
         fill=\"none\" stroke=\"#333\" stroke-width=\"1\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"middle\">Age</text>\n",
        LEFT + PLOT_WIDTH / 2.0,
        bottom + 40.0
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"middle\" \
         transform=\"rotate(-90 {:.1} {:.1})\">Allocation Percentage (%)</text>\n",
        LEFT - 45.0,
        top + PLOT_HEIGHT / 2.0,
        LEFT - 45.0,
        top + PLOT_HEIGHT / 2.0
    ));
}

fn render_age_marker(svg: &mut String, x: f64, top: f64) {
    svg.push_str(&format!(
        "<line class=\"current-age\" x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" \
         stroke=\"{MARKER_COLOR}\" stroke-width=\"2\" stroke-dasharray=\"6 4\" stroke-opacity=\"0.7\"/>\n",
        top + PLOT_HEIGHT
    ));
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
