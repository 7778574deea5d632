use serde::Serialize;

use super::model::{CellValue, Row};

/// Number of bins along x.
pub const BIN_COUNT: usize = 10;
/// Width of every bin; bins cover `[0, 100)`.
pub const BIN_WIDTH: f64 = 10.0;

/// One bin of a trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinPoint {
    /// Bin midpoint (lower edge + 5), not the mean x of its members.
    pub x: f64,
    /// Mean y of the bin's members, or 0 when the bin is empty.
    pub y: f64,
    /// Number of rows that fell in the bin.
    pub count: usize,
}

/// Bin index for `x`: `floor(x / 10)` clamped to `0..=9`.
///
/// Out-of-range values saturate into the boundary bins instead of being
/// dropped, so outliers below 0 or at/above 100 are merged into bins 0 and 9.
pub fn bin_index(x: f64) -> usize {
    let idx = (x / BIN_WIDTH).floor();
    if idx.is_nan() || idx < 0.0 {
        0
    } else if idx >= (BIN_COUNT - 1) as f64 {
        BIN_COUNT - 1
    } else {
        idx as usize
    }
}

/// Lower edge of bin `index`.
pub fn bin_lower_edge(index: usize) -> f64 {
    index as f64 * BIN_WIDTH
}

/// Bucket rows by `x_field` and average `y_field` within each bucket.
///
/// Always returns [`BIN_COUNT`] points with midpoints 5, 15, …, 95.
pub fn bin_and_average<F>(rows: &[Row], x_field: &str, y_field: &str, parse: F) -> Vec<BinPoint>
where
    F: Fn(Option<&CellValue>) -> f64,
{
    let mut sums = [0.0f64; BIN_COUNT];
    let mut counts = [0usize; BIN_COUNT];

    for row in rows {
        let x = parse(row.get(x_field));
        let y = parse(row.get(y_field));
        let idx = bin_index(x);
        sums[idx] += y;
        counts[idx] += 1;
    }

    (0..BIN_COUNT)
        .map(|i| BinPoint {
            x: bin_lower_edge(i) + BIN_WIDTH / 2.0,
            y: if counts[i] > 0 {
                sums[i] / counts[i] as f64
            } else {
                0.0
            },
            count: counts[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::parse_numeric;

    fn xy(pairs: &[(f64, f64)]) -> Vec<Row> {
        pairs
            .iter()
            .map(|&(x, y)| Row::from_pairs([("x", x), ("y", y)]))
            .collect()
    }

    #[test]
    fn always_ten_midpoints() {
        let out = bin_and_average(&xy(&[(42.0, 1.0)]), "x", "y", parse_numeric);
        let mids: Vec<f64> = out.iter().map(|p| p.x).collect();
        assert_eq!(mids, [5.0, 15.0, 25.0, 35.0, 45.0, 55.0, 65.0, 75.0, 85.0, 95.0]);

        let empty = bin_and_average(&[], "x", "y", parse_numeric);
        assert_eq!(empty.len(), BIN_COUNT);
        assert!(empty.iter().all(|p| p.y == 0.0 && p.count == 0));
    }

    #[test]
    fn averages_within_bins() {
        let out = bin_and_average(&xy(&[(5.0, 10.0), (5.0, 20.0), (35.0, 40.0)]), "x", "y", parse_numeric);
        assert_eq!(out[0].x, 5.0);
        assert_eq!(out[0].y, 15.0);
        assert_eq!(out[0].count, 2);
        assert_eq!(out[3].x, 35.0);
        assert_eq!(out[3].y, 40.0);
        for (i, p) in out.iter().enumerate() {
            if i != 0 && i != 3 {
                assert_eq!(p.y, 0.0, "bin {i}");
                assert_eq!(p.count, 0, "bin {i}");
            }
        }
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(bin_index(150.0), 9);
        assert_eq!(bin_index(100.0), 9);
        assert_eq!(bin_index(99.99), 9);
        assert_eq!(bin_index(-5.0), 0);
        assert_eq!(bin_index(-0.1), 0);
        assert_eq!(bin_index(f64::INFINITY), 9);
        assert_eq!(bin_index(f64::NEG_INFINITY), 0);

        let out = bin_and_average(&xy(&[(150.0, 8.0), (-5.0, 2.0)]), "x", "y", parse_numeric);
        assert_eq!(out[9].x, 95.0);
        assert_eq!(out[9].y, 8.0);
        assert_eq!(out[0].x, 5.0);
        assert_eq!(out[0].y, 2.0);
    }

    #[test]
    fn bin_edges_are_half_open() {
        assert_eq!(bin_index(0.0), 0);
        assert_eq!(bin_index(9.999), 0);
        assert_eq!(bin_index(10.0), 1);
        assert_eq!(bin_index(30.0), 3);
        assert_eq!(bin_index(39.9), 3);
    }

    #[test]
    fn empty_bin_is_zero_but_zero_mean_has_count() {
        let out = bin_and_average(&xy(&[(12.0, 0.0), (55.0, 3.0)]), "x", "y", parse_numeric);
        assert_eq!(out[3].y, 0.0);
        assert_eq!(out[3].count, 0);
        assert_eq!(out[1].y, 0.0);
        assert_eq!(out[1].count, 1);
    }

    #[test]
    fn parses_percent_columns() {
        let rows = vec![
            Row::from_pairs([("Adoption", "25%"), ("Loss", "10%")]),
            Row::from_pairs([("Adoption", "27%"), ("Loss", "n/a")]),
        ];
        let out = bin_and_average(&rows, "Adoption", "Loss", parse_numeric);
        assert_eq!(out[2].count, 2);
        assert_eq!(out[2].y, 5.0);
    }

    #[test]
    fn binning_is_idempotent() {
        let rows = xy(&[(1.0, 2.0), (91.0, 3.0), (47.0, 7.5)]);
        assert_eq!(
            bin_and_average(&rows, "x", "y", parse_numeric),
            bin_and_average(&rows, "x", "y", parse_numeric)
        );
    }
}
