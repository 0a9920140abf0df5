//! Output formatting for `dipladder` commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{Schedule, ScheduleRow};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl From<bool> for OutputMode {
    /// `--json` selects JSON, otherwise tables
    fn from(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// Colored status line printed around a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Summary,
    Warning,
    Error,
}

impl Notice {
    fn color(self) -> &'static str {
        match self {
            Notice::Summary => "32",
            Notice::Warning => "33",
            Notice::Error => "31",
        }
    }
}

/// Table row for one schedule level, money rounded to cents.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleTableRow {
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Shares Purchased")]
    pub shares: u64,
    #[tabled(rename = "Average Purchase Price")]
    pub average: String,
    #[tabled(rename = "% Diff (Current vs. Avg)")]
    pub pct_diff: String,
    #[tabled(rename = "Cost of Purchase")]
    pub cost: String,
    #[tabled(rename = "Cumulative Investment")]
    pub cumulative_cost: String,
    #[tabled(rename = "Cumulative Shares")]
    pub cumulative_shares: u64,
    #[tabled(rename = "Remaining Budget")]
    pub remaining: String,
    #[tabled(rename = "Within Tolerance")]
    pub within: String,
}

impl From<&ScheduleRow> for ScheduleTableRow {
    fn from(row: &ScheduleRow) -> Self {
        Self {
            price: money(row.price_level),
            shares: row.shares_bought,
            average: money(row.running_average_cost),
            pct_diff: money(row.pct_diff_vs_average),
            cost: money(row.purchase_cost),
            cumulative_cost: money(row.cumulative_cost),
            cumulative_shares: row.cumulative_shares,
            remaining: money(row.remaining_budget),
            within: if row.within_tolerance { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Table row for the `levels` command.
#[derive(Debug, Serialize, Tabled)]
pub struct LevelRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Price")]
    pub price: String,
}

/// Format an amount to two decimal places.
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Render rows as a rounded table or a pretty JSON array.
pub fn render_rows<T: Tabled + Serialize>(rows: &[T], mode: OutputMode) -> anyhow::Result<String> {
    Ok(match mode {
        OutputMode::Table if rows.is_empty() => "(empty ladder)".to_string(),
        OutputMode::Table => Table::new(rows).with(Style::rounded()).to_string(),
        OutputMode::Json => serde_json::to_string_pretty(rows)?,
    })
}

pub fn print_rows<T: Tabled + Serialize>(rows: &[T], mode: OutputMode) -> anyhow::Result<()> {
    println!("{}", render_rows(rows, mode)?);
    Ok(())
}

/// Print a full schedule: table plus summary, or the raw schedule as JSON.
pub fn print_schedule(schedule: &Schedule, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            let rows: Vec<ScheduleTableRow> = schedule.rows.iter().map(Into::into).collect();
            print_rows(&rows, mode)?;
            println!();
            notice(Notice::Summary, &format!(
                "Total spent: ${} | Shares: {} | Average cost: ${} | Remaining: ${}",
                money(schedule.total_spent()),
                schedule.total_shares(),
                money(schedule.final_average_cost()),
                money(schedule.remaining_budget()),
            ));
            let skipped = schedule.rows.iter().filter(|r| !r.within_tolerance).count();
            if skipped > 0 {
                notice(Notice::Warning, &format!(
                    "{skipped} level(s) end above the tolerance ceiling"
                ));
            }
        }
        OutputMode::Json => {
            println!("{}", schedule.to_json_pretty()?);
        }
    }
    Ok(())
}

/// Print a colored status line; warnings and errors go to stderr so
/// stdout stays parseable.
pub fn notice(kind: Notice, msg: &str) {
    let line = format!("\x1b[{}m{msg}\x1b[0m", kind.color());
    match kind {
        Notice::Summary => println!("{line}"),
        Notice::Warning | Notice::Error => eprintln!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(dec!(59.049)), "59.05");
        assert_eq!(money(dec!(90)), "90.00");
    }

    #[test]
    fn test_table_row_from_schedule_row() {
        let row = ScheduleRow {
            price_level: dec!(90),
            shares_bought: 8,
            purchase_cost: dec!(720),
            cumulative_shares: 10,
            cumulative_cost: dec!(920),
            running_average_cost: dec!(92),
            pct_diff_vs_average: dec!(-2.173913),
            remaining_budget: dec!(80),
            within_tolerance: true,
        };
        let table_row = ScheduleTableRow::from(&row);

        assert_eq!(table_row.price, "90.00");
        assert_eq!(table_row.average, "92.00");
        assert_eq!(table_row.pct_diff, "-2.17");
        assert_eq!(table_row.within, "yes");
    }

    #[test]
    fn test_output_mode_from_flag() {
        assert_eq!(OutputMode::from(true), OutputMode::Json);
        assert_eq!(OutputMode::from(false), OutputMode::Table);
    }

    #[test]
    fn test_render_level_rows() {
        let rows = vec![
            LevelRow { index: 1, price: money(dec!(100)) },
            LevelRow { index: 2, price: money(dec!(90)) },
        ];

        let table = render_rows(&rows, OutputMode::Table).unwrap();
        assert!(table.contains("Price"));
        assert!(table.contains("90.00"));

        let json = render_rows(&rows, OutputMode::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["price"], "90.00");

        let empty: Vec<LevelRow> = Vec::new();
        assert_eq!(render_rows(&empty, OutputMode::Table).unwrap(), "(empty ladder)");
    }
}
