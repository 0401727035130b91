use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::record::FinancialRecord;

/// Derived metrics for one ledger month.
///
/// Metrics that can be undefined (divisions by zero, growth without a prior
/// month, runway without burn) are `Option` rather than a NaN sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRecord {
    pub month: NaiveDate,
    pub revenue: Decimal,
    pub cash_balance: Decimal,
    pub gross_profit: Decimal,
    pub gross_margin_pct: Option<Decimal>,
    pub ebitda: Decimal,
    pub ebitda_margin_pct: Option<Decimal>,
    pub revenue_mom_growth_pct: Option<Decimal>,
    pub burn: Decimal,
    pub runway_months: Option<Decimal>,
}

/// Derive one [`KpiRecord`] per input record, in the same order.
///
/// Expects records already sorted by month ascending; month-over-month growth
/// compares each record against its predecessor in the slice.
pub fn compute(records: &[FinancialRecord]) -> Vec<KpiRecord> {
    let previous_revenues =
        std::iter::once(None).chain(records.iter().map(|record| Some(record.revenue)));

    records
        .iter()
        .zip(previous_revenues)
        .map(|(record, previous_revenue)| derive(record, previous_revenue))
        .collect()
}

fn derive(record: &FinancialRecord, previous_revenue: Option<Decimal>) -> KpiRecord {
    let gross_profit = record.revenue - record.cogs;
    let ebitda = gross_profit - record.opex;
    let burn = if ebitda < Decimal::ZERO {
        -ebitda
    } else {
        Decimal::ZERO
    };

    KpiRecord {
        month: record.month,
        revenue: record.revenue,
        cash_balance: record.cash_balance,
        gross_profit,
        gross_margin_pct: percent_of(gross_profit, record.revenue),
        ebitda,
        ebitda_margin_pct: percent_of(ebitda, record.revenue),
        revenue_mom_growth_pct: previous_revenue
            .and_then(|previous| percent_of(record.revenue - previous, previous)),
        burn,
        runway_months: if burn > Decimal::ZERO {
            record.cash_balance.checked_div(burn)
        } else {
            None
        },
    }
}

/// `part / whole` as a percentage; undefined when `whole` is zero.
fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
}
