use std::io::{self, Write};

use itertools::Itertools;
use rust_decimal::Decimal;

use crate::domain::kpi::KpiRecord;

const TABLE_COLUMNS: [&str; 8] = [
    "month",
    "revenue",
    "gross_margin_pct",
    "ebitda_margin_pct",
    "revenue_mom_growth_pct",
    "burn",
    "cash_balance",
    "runway_months",
];

/// Print the latest month as a labelled summary block.
///
/// The month-over-month section only appears when a prior month exists.
pub fn write_summary(out: &mut impl Write, kpis: &[KpiRecord]) -> io::Result<()> {
    let Some(latest) = kpis.last() else {
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "===== KPI SUMMARY (latest month) =====")?;
    writeln!(out, "Month:            {}", latest.month.format("%Y-%m"))?;
    writeln!(out, "Revenue:          {} €", thousands(latest.revenue))?;
    writeln!(out, "Gross margin:     {} %", pct(latest.gross_margin_pct))?;
    writeln!(out, "EBITDA margin:    {} %", pct(latest.ebitda_margin_pct))?;
    match latest.runway_months {
        Some(runway) => writeln!(out, "Runway:           {:>4.1} months", runway.round_dp(1))?,
        None => writeln!(out, "Runway:           n/a (no burn)")?,
    }

    if kpis.len() >= 2 {
        writeln!(out)?;
        writeln!(out, "Compared to previous month:")?;
        writeln!(
            out,
            "Revenue MoM:      {} %",
            pct(latest.revenue_mom_growth_pct)
        )?;
    }

    Ok(())
}

/// Print every month as a right-aligned table, one decimal per numeric cell.
pub fn write_table(out: &mut impl Write, kpis: &[KpiRecord]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== FULL TABLE =====")?;

    let rows: Vec<[String; 8]> = kpis.iter().map(table_row).collect();
    let widths: Vec<usize> = TABLE_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .map(|row| row[index].len())
                .fold(header.len(), usize::max)
        })
        .collect();

    let header = TABLE_COLUMNS
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{column:>width$}"))
        .join("  ");
    writeln!(out, "{header}")?;

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:>width$}"))
            .join("  ");
        writeln!(out, "{line}")?;
    }

    Ok(())
}

fn table_row(kpi: &KpiRecord) -> [String; 8] {
    [
        kpi.month.format("%Y-%m-%d").to_string(),
        cell(Some(kpi.revenue)),
        cell(kpi.gross_margin_pct),
        cell(kpi.ebitda_margin_pct),
        cell(kpi.revenue_mom_growth_pct),
        cell(Some(kpi.burn)),
        cell(Some(kpi.cash_balance)),
        cell(kpi.runway_months),
    ]
}

/// Numeric table cell, rounded to one decimal; undefined values mark as NaN.
fn cell(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:.1}", value.round_dp(1)),
        None => "NaN".to_string(),
    }
}

/// Summary percentage, width 5 with one decimal, `n/a` when undefined.
fn pct(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!("{:>5.1}", value.round_dp(1)),
        None => format!("{:>5}", "n/a"),
    }
}

/// Thousands-separated rendering with no decimals, e.g. `120,000`.
fn thousands(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().to_string();

    let mut grouped = String::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}
