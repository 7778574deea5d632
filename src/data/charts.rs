use serde::Serialize;

use super::aggregate::{aggregate, mean_of, sort_by_stat, AggregateRecord, Reducer, SortOrder};
use super::binning::{bin_and_average, BinPoint};
use super::model::{parse_numeric, Dataset, Row};

/// Column headers of the AI content impact dataset.
pub mod columns {
    pub const COUNTRY: &str = "Country";
    pub const INDUSTRY: &str = "Industry";
    pub const TOP_TOOL: &str = "Top AI Tools Used";
    pub const ADOPTION: &str = "AI Adoption Rate (%)";
    pub const CONTENT_VOLUME: &str = "AI-Generated Content Volume (TBs per year)";
    pub const JOB_LOSS: &str = "Job Loss Due to AI (%)";
    pub const REVENUE: &str = "Revenue Increase Due to AI (%)";
    pub const COLLABORATION: &str = "Human-AI Collaboration Rate (%)";
    pub const MARKET_SHARE: &str = "Market Share of AI Companies (%)";

    /// Every column the six charts read.
    pub const REQUIRED: [&str; 9] = [
        COUNTRY,
        INDUSTRY,
        TOP_TOOL,
        ADOPTION,
        CONTENT_VOLUME,
        JOB_LOSS,
        REVENUE,
        COLLABORATION,
        MARKET_SHARE,
    ];
}

use columns::*;

// ---------------------------------------------------------------------------
// Chart-ready records
// ---------------------------------------------------------------------------

/// Chart 1: content volume vs market share, sized by revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDominance {
    pub country: String,
    pub volume: f64,
    pub market_share: f64,
    pub revenue: f64,
}

/// Chart 2: adoption vs content volume per country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProductivity {
    pub country: String,
    pub adoption: f64,
    pub volume: f64,
}

/// Quadrant split lines at the mean of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadrantSplit {
    pub x_mean: f64,
    pub y_mean: f64,
}

/// Chart 3: revenue impact vs popularity per tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolPerformance {
    pub tool: String,
    pub revenue: f64,
    pub market_share: f64,
}

/// A raw (unbinned) scatter point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// Charts 4 and 5: per-row scatter plus binned trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub scatter: Vec<ScatterPoint>,
    pub trend: Vec<BinPoint>,
}

/// Chart 6: collaboration and job loss per industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryResilience {
    pub industry: String,
    pub collaboration: f64,
    pub job_loss: f64,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn country_dominance(rows: &[Row]) -> Vec<CountryDominance> {
    aggregate(
        rows,
        COUNTRY,
        &[
            ("volume", Reducer::sum(CONTENT_VOLUME)),
            ("market_share", Reducer::mean(MARKET_SHARE)),
            ("revenue", Reducer::mean(REVENUE)),
        ],
    )
    .into_iter()
    .map(|r| CountryDominance {
        volume: r.stat("volume"),
        market_share: r.stat("market_share"),
        revenue: r.stat("revenue"),
        country: r.key,
    })
    .collect()
}

pub fn country_productivity(rows: &[Row]) -> Vec<CountryProductivity> {
    aggregate(
        rows,
        COUNTRY,
        &[
            ("adoption", Reducer::mean(ADOPTION)),
            ("volume", Reducer::sum(CONTENT_VOLUME)),
        ],
    )
    .into_iter()
    .map(|r| CountryProductivity {
        adoption: r.stat("adoption"),
        volume: r.stat("volume"),
        country: r.key,
    })
    .collect()
}

/// Mean adoption and mean volume across countries; `None` without countries.
pub fn quadrant_split(points: &[CountryProductivity]) -> Option<QuadrantSplit> {
    let xs: Vec<f64> = points.iter().map(|p| p.adoption).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.volume).collect();
    Some(QuadrantSplit {
        x_mean: mean_of(&xs)?,
        y_mean: mean_of(&ys)?,
    })
}

/// Tools ordered by mean revenue increase, highest first.
pub fn tool_performance(rows: &[Row]) -> Vec<ToolPerformance> {
    let mut records = aggregate(
        rows,
        TOP_TOOL,
        &[
            ("revenue", Reducer::mean(REVENUE)),
            ("market_share", Reducer::mean(MARKET_SHARE)),
        ],
    );
    sort_by_stat(&mut records, "revenue", SortOrder::Descending);
    records
        .into_iter()
        .map(|r| ToolPerformance {
            revenue: r.stat("revenue"),
            market_share: r.stat("market_share"),
            tool: r.key,
        })
        .collect()
}

/// One scatter point per row plus the binned mean of `y_field` along `x_field`.
pub fn trend_series(rows: &[Row], x_field: &str, y_field: &str, label_field: &str) -> TrendSeries {
    let scatter = rows
        .iter()
        .map(|r| ScatterPoint {
            x: r.numeric(x_field),
            y: r.numeric(y_field),
            label: r.group_key(label_field),
        })
        .collect();
    TrendSeries {
        scatter,
        trend: bin_and_average(rows, x_field, y_field, parse_numeric),
    }
}

/// Industries ordered by mean collaboration rate, lowest first.
pub fn industry_resilience(rows: &[Row]) -> Vec<IndustryResilience> {
    let mut records = aggregate(
        rows,
        INDUSTRY,
        &[
            ("collaboration", Reducer::mean(COLLABORATION)),
            ("job_loss", Reducer::mean(JOB_LOSS)),
        ],
    );
    sort_by_stat(&mut records, "collaboration", SortOrder::Ascending);
    records
        .into_iter()
        .map(|r| IndustryResilience {
            collaboration: r.stat("collaboration"),
            job_loss: r.stat("job_loss"),
            industry: r.key,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChartSet – everything the dashboard draws
// ---------------------------------------------------------------------------

/// All chart data derived from one dataset. Built once per load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub dominance: Vec<CountryDominance>,
    pub productivity: Vec<CountryProductivity>,
    pub quadrant: Option<QuadrantSplit>,
    pub tools: Vec<ToolPerformance>,
    pub job_loss_vs_adoption: TrendSeries,
    pub job_loss_vs_collaboration: TrendSeries,
    pub industries: Vec<IndustryResilience>,
}

impl ChartSet {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        for col in REQUIRED {
            if !dataset.has_column(col) {
                log::warn!("Dataset has no '{col}' column; its values count as 0");
            }
        }

        let rows = &dataset.rows;
        let productivity = country_productivity(rows);
        let quadrant = quadrant_split(&productivity);
        let set = ChartSet {
            dominance: country_dominance(rows),
            productivity,
            quadrant,
            tools: tool_performance(rows),
            job_loss_vs_adoption: trend_series(rows, ADOPTION, JOB_LOSS, COUNTRY),
            job_loss_vs_collaboration: trend_series(rows, COLLABORATION, JOB_LOSS, INDUSTRY),
            industries: industry_resilience(rows),
        };
        log::debug!(
            "Chart set: {} countries, {} tools, {} industries",
            set.dominance.len(),
            set.tools.len(),
            set.industries.len()
        );
        set
    }
}

/// Generic aggregate table for one grouping column, used by the data table view.
pub fn summary_table(rows: &[Row], group_by: &str) -> Vec<AggregateRecord> {
    let mut records = aggregate(
        rows,
        group_by,
        &[
            ("rows", Reducer::Count),
            ("adoption", Reducer::mean(ADOPTION)),
            ("volume", Reducer::sum(CONTENT_VOLUME)),
            ("revenue", Reducer::mean(REVENUE)),
            ("job_loss", Reducer::mean(JOB_LOSS)),
            ("collaboration", Reducer::mean(COLLABORATION)),
            ("market_share", Reducer::mean(MARKET_SHARE)),
        ],
    );
    sort_by_stat(&mut records, "rows", SortOrder::Descending);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, industry: &str, tool: &str, vals: [&str; 6]) -> Row {
        Row::from_pairs([
            (COUNTRY, country),
            (INDUSTRY, industry),
            (TOP_TOOL, tool),
            (ADOPTION, vals[0]),
            (CONTENT_VOLUME, vals[1]),
            (JOB_LOSS, vals[2]),
            (REVENUE, vals[3]),
            (COLLABORATION, vals[4]),
            (MARKET_SHARE, vals[5]),
        ])
    }

    fn sample() -> Dataset {
        let rows = vec![
            row("USA", "Media", "ChatGPT", ["40", "80", "10", "20", "50", "30"]),
            row("USA", "Finance", "Claude", ["60", "20", "20", "40", "35", "10"]),
            row("France", "Media", "ChatGPT", ["20", "10", "30", "10", "52", "20"]),
            row("Japan", "Retail", "Midjourney", ["95", "5", "4", "60", "15", "5"]),
        ];
        Dataset::new(rows, REQUIRED.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn dominance_sums_volume_and_averages_shares() {
        let ds = sample();
        let out = country_dominance(&ds.rows);
        assert_eq!(out.len(), 3);
        let usa = out.iter().find(|c| c.country == "USA").unwrap();
        assert_eq!(usa.volume, 100.0);
        assert_eq!(usa.market_share, 20.0);
        assert_eq!(usa.revenue, 30.0);
    }

    #[test]
    fn quadrant_lines_sit_at_country_means() {
        let ds = sample();
        let prod = country_productivity(&ds.rows);
        let split = quadrant_split(&prod).unwrap();
        // USA 50 / 100, France 20 / 10, Japan 95 / 5
        assert!((split.x_mean - 55.0).abs() < 1e-9);
        assert!((split.y_mean - 115.0 / 3.0).abs() < 1e-9);
        assert_eq!(quadrant_split(&[]), None);
    }

    #[test]
    fn tools_sorted_by_revenue_descending() {
        let ds = sample();
        let tools = tool_performance(&ds.rows);
        let names: Vec<&str> = tools.iter().map(|t| t.tool.as_str()).collect();
        assert_eq!(names, ["Midjourney", "Claude", "ChatGPT"]);
        assert_eq!(tools[2].revenue, 15.0);
        assert_eq!(tools[2].market_share, 25.0);
    }

    #[test]
    fn industries_sorted_by_collaboration_ascending() {
        let ds = sample();
        let inds = industry_resilience(&ds.rows);
        let names: Vec<&str> = inds.iter().map(|i| i.industry.as_str()).collect();
        assert_eq!(names, ["Retail", "Finance", "Media"]);
        assert_eq!(inds[2].collaboration, 51.0);
        assert_eq!(inds[2].job_loss, 20.0);
    }

    #[test]
    fn trend_series_keeps_every_row_and_ten_bins() {
        let ds = sample();
        let series = trend_series(&ds.rows, ADOPTION, JOB_LOSS, COUNTRY);
        assert_eq!(series.scatter.len(), 4);
        assert_eq!(series.scatter[3].label, "Japan");
        assert_eq!(series.trend.len(), 10);
        assert_eq!(series.trend[9].y, 4.0);
        assert_eq!(series.trend[4].y, 10.0);
        assert_eq!(series.trend[0].count, 0);
    }

    #[test]
    fn chart_set_on_empty_dataset() {
        let set = ChartSet::from_dataset(&Dataset::default());
        assert!(set.dominance.is_empty());
        assert!(set.tools.is_empty());
        assert!(set.industries.is_empty());
        assert_eq!(set.quadrant, None);
        assert_eq!(set.job_loss_vs_adoption.trend.len(), 10);
        assert!(set.job_loss_vs_collaboration.trend.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn chart_set_is_deterministic() {
        let ds = sample();
        assert_eq!(ChartSet::from_dataset(&ds), ChartSet::from_dataset(&ds));
    }

    #[test]
    fn records_serialize_with_field_names() {
        let tools = tool_performance(&sample().rows);
        let json = serde_json::to_value(&tools[0]).unwrap();
        assert_eq!(json["tool"], "Midjourney");
        assert_eq!(json["revenue"], 60.0);
        assert_eq!(json["market_share"], 5.0);

        let set = serde_json::to_value(ChartSet::from_dataset(&sample())).unwrap();
        assert_eq!(set["job_loss_vs_adoption"]["trend"].as_array().map(Vec::len), Some(10));
    }

    #[test]
    fn summary_table_counts_rows() {
        let ds = sample();
        let table = summary_table(&ds.rows, COUNTRY);
        assert_eq!(table[0].key, "USA");
        assert_eq!(table[0].stat("rows"), 2.0);
        assert_eq!(table.len(), 3);
    }
}
