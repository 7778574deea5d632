use eframe::egui::{ScrollArea, Ui};

use crate::data::charts::ChartSet;
use crate::state::{AppState, View};
use crate::ui::charts::{
    self, BarPair, Bubble, ChartConfig, HeatBar, Labeled,
};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the central panel: the six charts or the aggregate table.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(chart_set) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view the dashboard  (File → Open…)");
        });
        return;
    };

    match state.view {
        View::Charts => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| chart_grid(ui, chart_set, state.chart_height));
        }
        View::Table => {
            ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                table::aggregate_table(ui, state.table_group.label(), &state.table);
            });
        }
    }
}

/// Two charts per row, three rows.
fn chart_grid(ui: &mut Ui, set: &ChartSet, height: f32) {
    ui.columns(2, |cols| {
        dominance(&mut cols[0], set, height);
        productivity(&mut cols[1], set, height);
    });
    ui.add_space(16.0);
    ui.columns(2, |cols| {
        tools(&mut cols[0], set, height);
        industries(&mut cols[1], set, height);
    });
    ui.add_space(16.0);
    ui.columns(2, |cols| {
        let adoption = ChartConfig::new(
            "Job loss vs adoption",
            "Adoption rate (%)",
            "Job loss (%)",
        )
        .height(height);
        charts::trend_scatter_chart(
            &mut cols[0],
            "chart_job_loss_adoption",
            &set.job_loss_vs_adoption.scatter,
            &set.job_loss_vs_adoption.trend,
            &adoption,
        );

        let collaboration = ChartConfig::new(
            "Job loss vs collaboration",
            "Collaboration rate (%)",
            "Job loss (%)",
        )
        .height(height);
        charts::trend_scatter_chart(
            &mut cols[1],
            "chart_job_loss_collaboration",
            &set.job_loss_vs_collaboration.scatter,
            &set.job_loss_vs_collaboration.trend,
            &collaboration,
        );
    });
}

fn dominance(ui: &mut Ui, set: &ChartSet, height: f32) {
    let bubbles: Vec<Bubble> = set
        .dominance
        .iter()
        .map(|c| Bubble {
            label: &c.country,
            x: c.volume,
            y: c.market_share,
            size: c.revenue,
        })
        .collect();
    let config = ChartConfig::new(
        "AI dominance: volume vs market share vs revenue",
        "Volume (TB/year)",
        "Market share (%)",
    )
    .height(height);
    charts::bubble_chart(ui, "chart_dominance", &bubbles, &config);
}

fn productivity(ui: &mut Ui, set: &ChartSet, height: f32) {
    let points: Vec<Labeled> = set
        .productivity
        .iter()
        .map(|c| Labeled {
            label: &c.country,
            x: c.adoption,
            y: c.volume,
        })
        .collect();
    let config = ChartConfig::new(
        "Productivity matrix: adoption vs output",
        "Adoption rate (%)",
        "Content volume (TB/year)",
    )
    .height(height);
    charts::quadrant_chart(ui, "chart_productivity", &points, set.quadrant, &config);
}

fn tools(ui: &mut Ui, set: &ChartSet, height: f32) {
    let bars: Vec<BarPair> = set
        .tools
        .iter()
        .map(|t| BarPair {
            category: &t.tool,
            first: t.revenue,
            second: t.market_share,
        })
        .collect();
    let config = ChartConfig::new(
        "Top tools: revenue impact vs popularity",
        "Tool",
        "Percent",
    )
    .height(height);
    charts::grouped_bar_chart(
        ui,
        "chart_tools",
        &bars,
        ("Revenue increase (%)", "Market share (%)"),
        &config,
    );
}

fn industries(ui: &mut Ui, set: &ChartSet, height: f32) {
    let bars: Vec<HeatBar> = set
        .industries
        .iter()
        .map(|i| HeatBar {
            category: &i.industry,
            value: i.collaboration,
            heat: i.job_loss,
        })
        .collect();
    let config = ChartConfig::new(
        "Resilience by industry: collaborative safety zones",
        "Collaboration rate (%)",
        "",
    )
    .height(height);
    charts::heatmap_bar_chart(ui, "chart_industries", &bars, "Job loss %", &config);
}
