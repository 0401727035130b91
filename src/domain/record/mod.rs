use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One month of raw financials, as read from the ledger file.
///
/// `month` keeps a full calendar date; inputs without a day component are
/// pinned to the first of the month by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub month: NaiveDate,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub opex: Decimal,
    pub cash_balance: Decimal,
}
