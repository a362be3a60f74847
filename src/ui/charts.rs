use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, Corner, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Polygon, Text,
};

use crate::color::{teal_scale, ColorMap, DENSITY_LINE, HISTOGRAM_FILL};
use crate::report::{format, DonutSlice, FrequencyReport};

/// Angular resolution of donut slices (radians per polygon segment).
const DONUT_STEP: f64 = TAU / 240.0;

/// Slices thinner than this get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.03;

// ---------------------------------------------------------------------------
// Age histogram with density overlay
// ---------------------------------------------------------------------------

pub fn age_histogram(ui: &mut Ui, report: &FrequencyReport) {
    let bars: Vec<Bar> = report
        .age_bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.0} to {:.0}", bin.start, bin.end))
                .fill(HISTOGRAM_FILL)
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    Plot::new("age_histogram")
        .height(340.0)
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Number of Customers")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if !bars.is_empty() {
                plot_ui.bar_chart(BarChart::new(bars).name("Customers"));
            }
            if !report.age_density.is_empty() {
                let line = Line::new(PlotPoints::from(report.age_density.clone()))
                    .name("Density")
                    .color(DENSITY_LINE)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal "top items" bar chart
// ---------------------------------------------------------------------------

/// `items` must already be in display order, smallest first.
pub fn top_items_chart(ui: &mut Ui, items: &[(String, usize)]) {
    let min = items.iter().map(|(_, n)| *n).min().unwrap_or(0);
    let max = items.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let shade = |count: usize| {
        if max > min {
            (count - min) as f64 / (max - min) as f64
        } else {
            1.0
        }
    };

    let bars: Vec<Bar> = items
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .name(label)
                .fill(teal_scale(shade(*count)))
        })
        .collect();

    let labels: Vec<String> = items.iter().map(|(label, _)| label.clone()).collect();
    let axis_label = move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
        category_label(&labels, mark.value)
    };

    Plot::new("top_items")
        .height(360.0)
        .x_axis_label("Count")
        .y_axis_formatter(axis_label)
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_min_width(110.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            if !bars.is_empty() {
                let chart = BarChart::new(bars)
                    .horizontal()
                    .name("Count")
                    .element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                        format!("{}: {}", bar.name, bar.value)
                    }));
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label for a tick on the category axis; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Donut chart
// ---------------------------------------------------------------------------

pub fn donut_chart(ui: &mut Ui, slices: &[DonutSlice], colors: &ColorMap, hole: f64) {
    Plot::new("item_donut")
        .height(420.0)
        .data_aspect(1.0)
        .legend(Legend::default().position(Corner::RightTop))
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for slice in slices {
                let color = colors.color_for(&slice.label);
                for segment in annulus_segments(slice.start_angle, slice.end_angle, hole, 1.0) {
                    let polygon = Polygon::new(PlotPoints::from(segment))
                        .fill_color(color)
                        .stroke(Stroke::new(0.5, color))
                        .name(&slice.label);
                    plot_ui.polygon(polygon);
                }

                if slice.fraction >= MIN_LABELLED_FRACTION {
                    let radius = (1.0 + hole) / 2.0;
                    let angle = slice.mid_angle();
                    let position = PlotPoint::new(radius * angle.cos(), radius * angle.sin());
                    let text = RichText::new(format::percent(slice.fraction))
                        .color(Color32::WHITE)
                        .strong();
                    plot_ui.text(Text::new(position, text));
                }
            }
        });
}

/// Split the ring sector between `start` and `end` (radians, either
/// direction) into convex quads, since polygons are filled as convex shapes.
fn annulus_segments(start: f64, end: f64, inner: f64, outer: f64) -> Vec<Vec<[f64; 2]>> {
    let sweep = end - start;
    // The epsilon keeps a whole turn at exactly TAU / DONUT_STEP segments.
    let steps = ((sweep.abs() / DONUT_STEP - 1e-9).ceil() as usize).max(1);
    let point = |r: f64, a: f64| [r * a.cos(), r * a.sin()];

    (0..steps)
        .map(|i| {
            let a0 = start + sweep * i as f64 / steps as f64;
            let a1 = start + sweep * (i + 1) as f64 / steps as f64;
            vec![point(outer, a0), point(outer, a1), point(inner, a1), point(inner, a0)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn category_labels_only_on_whole_ticks() {
        let labels = vec!["Hat".to_string(), "Coat".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Hat");
        assert_eq!(category_label(&labels, 1.0), "Coat");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn full_ring_is_split_into_small_quads() {
        let segments = annulus_segments(FRAC_PI_2, FRAC_PI_2 - TAU, 0.4, 1.0);
        assert_eq!(segments.len(), 240);
        assert!(segments.iter().all(|s| s.len() == 4));

        let first = &segments[0];
        assert!((first[0][0]).abs() < 1e-12);
        assert!((first[0][1] - 1.0).abs() < 1e-12);
        assert!((first[3][1] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn tiny_slice_still_gets_a_segment() {
        assert_eq!(annulus_segments(1.0, 1.0 - 1e-4, 0.4, 1.0).len(), 1);
    }
}
