use std::collections::{BTreeMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as produced by the loaders.
///
/// Percentages such as `"42%"` stay `String`; they are only interpreted as
/// numbers by [`parse_numeric`] when a statistic needs them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// The exact text used to partition rows by this cell.
    ///
    /// No trimming or case folding: `"France"` and `"france "` are distinct keys.
    /// Missing values group under the empty string.
    pub fn group_key(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric parsing
// ---------------------------------------------------------------------------

/// Interpret a cell as a number. Total: never fails and never returns NaN.
///
/// * missing, null, bool → `0`
/// * integers and floats → themselves
/// * strings → the first `%` is dropped, then the longest leading decimal
///   number is parsed (`"12.5 TB"` → `12.5`); no numeric prefix → `0`
pub fn parse_numeric(value: Option<&CellValue>) -> f64 {
    let parsed = match value {
        Some(CellValue::Integer(i)) => *i as f64,
        Some(CellValue::Float(v)) => *v,
        Some(CellValue::String(s)) => parse_numeric_str(s),
        Some(CellValue::Bool(_)) | Some(CellValue::Null) | None => 0.0,
    };
    if parsed.is_nan() || parsed == 0.0 {
        0.0
    } else {
        parsed
    }
}

/// String half of [`parse_numeric`].
pub fn parse_numeric_str(s: &str) -> f64 {
    let stripped = s.replacen('%', "", 1);
    leading_number(stripped.trim_start()).unwrap_or(0.0)
}

/// Parse the longest prefix of `s` that reads as a decimal number.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    let sign = match bytes.first() {
        Some(b'-') => {
            end = 1;
            -1.0
        }
        Some(b'+') => {
            end = 1;
            1.0
        }
        _ => 1.0,
    };

    if s[end..].starts_with("Infinity") {
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Row – one record of the source table
// ---------------------------------------------------------------------------

/// One dataset record: column header → cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(cells: BTreeMap<String, CellValue>) -> Self {
        Row { cells }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Row {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Numeric value of `column`, see [`parse_numeric`].
    pub fn numeric(&self, column: &str) -> f64 {
        parse_numeric(self.get(column))
    }

    /// Grouping key of `column`; missing columns yield the empty key.
    pub fn group_key(&self, column: &str) -> String {
        self.get(column)
            .map(CellValue::group_key)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in file order.
    pub rows: Vec<Row>,
    /// Column headers, in file order.
    pub column_names: Vec<String>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>, column_names: Vec<String>) -> Self {
        Dataset { rows, column_names }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Number of distinct group keys in `column`.
    pub fn distinct_count(&self, column: &str) -> usize {
        self.rows
            .iter()
            .map(|r| r.group_key(column))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::from(v)
    }

    #[test]
    fn parses_percent_strings() {
        assert_eq!(parse_numeric(Some(&s("42%"))), 42.0);
        assert_eq!(parse_numeric(Some(&s("12.5%"))), 12.5);
        assert_eq!(parse_numeric(Some(&s(" 7.25"))), 7.25);
    }

    #[test]
    fn non_numeric_is_zero() {
        assert_eq!(parse_numeric(Some(&s("not a number"))), 0.0);
        assert_eq!(parse_numeric(Some(&s(""))), 0.0);
        assert_eq!(parse_numeric(Some(&s("%"))), 0.0);
        assert_eq!(parse_numeric(Some(&s("NaN"))), 0.0);
        assert_eq!(parse_numeric(Some(&CellValue::Bool(true))), 0.0);
    }

    #[test]
    fn missing_and_null_are_zero() {
        assert_eq!(parse_numeric(None), 0.0);
        assert_eq!(parse_numeric(Some(&CellValue::Null)), 0.0);
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(parse_numeric(Some(&CellValue::Integer(7))), 7.0);
        assert_eq!(parse_numeric(Some(&CellValue::Float(-3.5))), -3.5);
        assert_eq!(parse_numeric(Some(&CellValue::Float(f64::NAN))), 0.0);
    }

    #[test]
    fn parses_leading_numeric_prefix() {
        assert_eq!(parse_numeric_str("12.5 TB"), 12.5);
        assert_eq!(parse_numeric_str("-4e2x"), -400.0);
        assert_eq!(parse_numeric_str("3e"), 3.0);
        assert_eq!(parse_numeric_str(".5"), 0.5);
        assert_eq!(parse_numeric_str("5."), 5.0);
        assert_eq!(parse_numeric_str("."), 0.0);
        assert_eq!(parse_numeric_str("-"), 0.0);
        assert_eq!(parse_numeric_str("Infinity"), f64::INFINITY);
        assert_eq!(parse_numeric_str("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn only_first_percent_is_removed() {
        assert_eq!(parse_numeric_str("1%0"), 10.0);
        assert_eq!(parse_numeric_str("10%%"), 10.0);
    }

    #[test]
    fn group_keys_are_exact() {
        assert_eq!(s("France").group_key(), "France");
        assert_ne!(s("France").group_key(), s("france").group_key());
        assert_ne!(s("France").group_key(), s("France ").group_key());
        assert_eq!(CellValue::Null.group_key(), "");
        assert_eq!(CellValue::Integer(2024).group_key(), "2024");
    }

    #[test]
    fn row_lookups() {
        let row = Row::from_pairs([("Country", s("A")), ("Vol", s("10%"))]);
        assert_eq!(row.numeric("Vol"), 10.0);
        assert_eq!(row.numeric("Missing"), 0.0);
        assert_eq!(row.group_key("Country"), "A");
        assert_eq!(row.group_key("Missing"), "");
    }

    #[test]
    fn distinct_count_counts_keys() {
        let ds = Dataset::new(
            vec![
                Row::from_pairs([("Country", "A")]),
                Row::from_pairs([("Country", "B")]),
                Row::from_pairs([("Country", "A")]),
            ],
            vec!["Country".to_string()],
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.distinct_count("Country"), 2);
        assert!(ds.has_column("Country"));
        assert!(!ds.has_column("Industry"));
    }
}
