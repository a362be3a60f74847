//! Aggregations over a filtered view. Every function here is total: empty
//! input yields an empty/zero/`None` result, never NaN.

use std::collections::HashMap;

/// Sum of the values; `0.0` for no values.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, `None` when there are no values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Occurrence counts, highest first. Equal counts keep first-seen order.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    // label -> position in `counts`, which stays in first-seen order
    let mut index: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let slot = *index.entry(value).or_insert_with(|| {
            counts.push((value.to_string(), 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bin `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram spanning the data range. A single distinct value
/// gets a range of ±0.5 around it.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = min_max(values);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Number of points the density curve is evaluated at.
pub const KDE_GRID_POINTS: usize = 200;

/// Gaussian KDE with Scott's bandwidth, evaluated across the data range.
///
/// Returns `(x, density)` pairs; empty when fewer than two values or when
/// all values are equal.
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Vec<(f64, f64)> {
    let Some(std) = sample_std(values) else {
        return Vec::new();
    };
    if std <= 0.0 || grid_points < 2 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    let (lo, hi) = min_max(values);
    let step = (hi - lo) / (grid_points - 1) as f64;
    (0..grid_points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregates_are_defined() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(mean(&[]), None);
        assert!(value_counts(std::iter::empty()).is_empty());
        assert!(histogram(&[], 10).is_empty());
        assert!(gaussian_kde(&[], KDE_GRID_POINTS).is_empty());
    }

    #[test]
    fn mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        let s = sample_std(&v).unwrap();
        assert!((s - 2.138_089_935).abs() < 1e-6);
    }

    #[test]
    fn value_counts_sorted_with_stable_ties() {
        let items = ["Hat", "Coat", "Blouse", "Coat", "Hat", "Scarf"];
        let counts = value_counts(items);
        assert_eq!(
            counts,
            vec![
                ("Hat".to_string(), 2),
                ("Coat".to_string(), 2),
                ("Blouse".to_string(), 1),
                ("Scarf".to_string(), 1),
            ]
        );
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), items.len());
    }

    #[test]
    fn value_counts_over_many_distinct_labels() {
        let labels: Vec<String> = (0..5_000).map(|i| format!("item-{i}")).collect();
        let values: Vec<&str> = labels
            .iter()
            .map(String::as_str)
            .chain(["item-4999", "item-7", "item-4999"])
            .collect();
        let counts = value_counts(values.iter().copied());
        assert_eq!(counts.len(), 5_000);
        assert_eq!(counts[0], ("item-4999".to_string(), 3));
        assert_eq!(counts[1], ("item-7".to_string(), 2));
        // the rest tie at 1 and keep first-seen order
        assert_eq!(counts[2].0, "item-0");
        assert_eq!(counts[4_999].0, "item-4998");
    }

    #[test]
    fn histogram_covers_every_value() {
        let ages: Vec<f64> = (18..=70).map(f64::from).collect();
        let bins = histogram(&ages, 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), ages.len());
        assert_eq!(bins[0].start, 18.0);
        assert_eq!(bins[9].end, 70.0);
        // max value lands in the last bin
        assert!(bins[9].count >= 1);
    }

    #[test]
    fn histogram_of_single_value_is_centered() {
        let bins = histogram(&[30.0, 30.0], 10);
        assert_eq!(bins.first().map(|b| b.start), Some(29.5));
        assert_eq!(bins.last().map(|b| b.end), Some(30.5));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn kde_integrates_to_roughly_one() {
        let values: Vec<f64> = (0..100).map(|i| (i % 17) as f64 + (i % 5) as f64 * 0.3).collect();
        let curve = gaussian_kde(&values, KDE_GRID_POINTS);
        assert_eq!(curve.len(), KDE_GRID_POINTS);
        assert!(curve.iter().all(|(_, d)| d.is_finite() && *d >= 0.0));
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
        // Truncated to the data range, so somewhat below 1.
        assert!(area > 0.8 && area < 1.05, "area {area}");
    }

    #[test]
    fn kde_needs_spread() {
        assert!(gaussian_kde(&[40.0], KDE_GRID_POINTS).is_empty());
        assert!(gaussian_kde(&[40.0, 40.0, 40.0], KDE_GRID_POINTS).is_empty());
    }
}
