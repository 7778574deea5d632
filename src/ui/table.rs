use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::AggregateRecord;

// ---------------------------------------------------------------------------
// Aggregate table (central panel, table view)
// ---------------------------------------------------------------------------

/// Render aggregate records as a table: one row per group, one column per
/// statistic (taken from the first record).
pub fn aggregate_table(ui: &mut Ui, key_header: &str, records: &[AggregateRecord]) {
    let Some(first) = records.first() else {
        ui.label("No rows to aggregate.");
        return;
    };
    let stat_names: Vec<String> = first.stats.keys().cloned().collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(90.0), stat_names.len())
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong(key_header);
            });
            for name in &stat_names {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for record in records {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(display_key(&record.key));
                    });
                    for name in &stat_names {
                        row.col(|ui: &mut Ui| {
                            ui.label(format_stat(record.stat(name)));
                        });
                    }
                });
            }
        });
}

fn display_key(key: &str) -> RichText {
    if key.is_empty() {
        RichText::new("<missing>").italics()
    } else {
        RichText::new(key)
    }
}

/// Two decimals, integers without a fractional part.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_counts_and_means() {
        assert_eq!(format_stat(12.0), "12");
        assert_eq!(format_stat(12.346), "12.35");
        assert_eq!(format_stat(-0.5), "-0.50");
    }
}
