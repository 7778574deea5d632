use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::model::Row;

// ---------------------------------------------------------------------------
// Reducers
// ---------------------------------------------------------------------------

/// A statistic computed over every row of one group.
#[derive(Debug, Clone, PartialEq)]
pub enum Reducer {
    /// Sum of the parsed numeric field (0 for an empty group).
    Sum(String),
    /// Arithmetic mean of the parsed numeric field.
    Mean(String),
    /// Number of rows in the group.
    Count,
}

impl Reducer {
    pub fn sum(field: &str) -> Self {
        Reducer::Sum(field.to_string())
    }

    pub fn mean(field: &str) -> Self {
        Reducer::Mean(field.to_string())
    }

    /// Apply to a group. Groups built by [`aggregate`] are never empty; an
    /// empty slice yields 0 for every reducer.
    pub fn apply(&self, group: &[&Row]) -> f64 {
        match self {
            Reducer::Sum(field) => group.iter().map(|r| r.numeric(field)).sum(),
            Reducer::Mean(field) => {
                let values: Vec<f64> = group.iter().map(|r| r.numeric(field)).collect();
                mean_of(&values).unwrap_or(0.0)
            }
            Reducer::Count => group.len() as f64,
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// ---------------------------------------------------------------------------
// AggregateRecord
// ---------------------------------------------------------------------------

/// One reduced group: the key plus each named statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    pub key: String,
    pub stats: BTreeMap<String, f64>,
}

impl AggregateRecord {
    /// Value of statistic `name`, 0 when absent.
    pub fn stat(&self, name: &str) -> f64 {
        self.stats.get(name).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

/// Partition `rows` by the exact key in `group_by` and reduce each partition.
///
/// Records come out in first-seen key order. Output names in `reducers`
/// become the keys of [`AggregateRecord::stats`].
pub fn aggregate(rows: &[Row], group_by: &str, reducers: &[(&str, Reducer)]) -> Vec<AggregateRecord> {
    let mut groups: IndexMap<String, Vec<&Row>> = IndexMap::new();
    for row in rows {
        groups.entry(row.group_key(group_by)).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let stats = reducers
                .iter()
                .map(|(name, reducer)| (name.to_string(), reducer.apply(&members)))
                .collect();
            AggregateRecord { key, stats }
        })
        .collect()
}

/// Sort records by one statistic. Stable, NaN-safe (`total_cmp`).
pub fn sort_by_stat(records: &mut [AggregateRecord], name: &str, order: SortOrder) {
    records.sort_by(|a, b| {
        let ord: Ordering = a.stat(name).total_cmp(&b.stat(name));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::from_pairs([("Country", "A"), ("Vol", "10%")]),
            Row::from_pairs([("Country", "A"), ("Vol", "20%")]),
            Row::from_pairs([("Country", "B"), ("Vol", "5%")]),
        ]
    }

    #[test]
    fn sums_per_country() {
        let out = aggregate(&rows(), "Country", &[("sum", Reducer::sum("Vol"))]);
        let got: HashSet<(String, u64)> = out
            .iter()
            .map(|r| (r.key.clone(), r.stat("sum").to_bits()))
            .collect();
        let want: HashSet<(String, u64)> = [("A".to_string(), 30.0f64.to_bits()), ("B".to_string(), 5.0f64.to_bits())]
            .into_iter()
            .collect();
        assert_eq!(got, want);
    }

    #[test]
    fn one_record_per_distinct_key() {
        let mut data = rows();
        data.push(Row::from_pairs([("Country", "a"), ("Vol", "1")]));
        data.push(Row::from_pairs([("Country", "A "), ("Vol", "1")]));
        let out = aggregate(&data, "Country", &[("n", Reducer::Count)]);
        assert_eq!(out.len(), 4);
        let keys: Vec<&str> = out.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "a", "A "]);
        assert_eq!(out[0].stat("n"), 2.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let out = aggregate(&[], "Country", &[("sum", Reducer::sum("Vol"))]);
        assert!(out.is_empty());
    }

    #[test]
    fn sum_of_missing_field_is_zero() {
        let out = aggregate(&rows(), "Country", &[("sum", Reducer::sum("Absent"))]);
        assert!(out.iter().all(|r| r.stat("sum") == 0.0));
        assert_eq!(Reducer::sum("Vol").apply(&[]), 0.0);
    }

    #[test]
    fn mean_of_single_row_is_its_value() {
        let out = aggregate(&rows(), "Country", &[("mean", Reducer::mean("Vol"))]);
        let b = out.iter().find(|r| r.key == "B").unwrap();
        assert_eq!(b.stat("mean"), 5.0);
        let a = out.iter().find(|r| r.key == "A").unwrap();
        assert_eq!(a.stat("mean"), 15.0);
    }

    #[test]
    fn several_reducers_share_a_group() {
        let out = aggregate(
            &rows(),
            "Country",
            &[("total", Reducer::sum("Vol")), ("avg", Reducer::mean("Vol")), ("n", Reducer::Count)],
        );
        let a = &out[0];
        assert_eq!(a.stats.len(), 3);
        assert_eq!(a.stat("total"), 30.0);
        assert_eq!(a.stat("avg"), 15.0);
        assert_eq!(a.stat("n"), 2.0);
    }

    #[test]
    fn missing_group_column_groups_under_empty_key() {
        let out = aggregate(&rows(), "Industry", &[("n", Reducer::Count)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, "");
        assert_eq!(out[0].stat("n"), 3.0);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let data = rows();
        let reducers = [("sum", Reducer::sum("Vol")), ("mean", Reducer::mean("Vol"))];
        assert_eq!(
            aggregate(&data, "Country", &reducers),
            aggregate(&data, "Country", &reducers)
        );
    }

    #[test]
    fn sorts_by_statistic() {
        let mut out = aggregate(&rows(), "Country", &[("sum", Reducer::sum("Vol"))]);
        sort_by_stat(&mut out, "sum", SortOrder::Ascending);
        assert_eq!(out[0].key, "B");
        sort_by_stat(&mut out, "sum", SortOrder::Descending);
        assert_eq!(out[0].key, "A");
    }

    #[test]
    fn mean_of_handles_empty() {
        assert_eq!(mean_of(&[]), None);
        assert_eq!(mean_of(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
