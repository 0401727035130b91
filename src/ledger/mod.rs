use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::Reader;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    domain::record::FinancialRecord,
    error::{Error, Result},
};

pub const REQUIRED_COLUMNS: [&str; 5] = ["month", "revenue", "cogs", "opex", "cash_balance"];

/// A ledger row as it appears in the file, month still unparsed.
#[derive(Debug, Deserialize)]
struct RawRecord {
    month: String,
    revenue: Decimal,
    cogs: Decimal,
    opex: Decimal,
    cash_balance: Decimal,
}

/// Load the monthly ledger at `path`, sorted by month ascending.
pub fn load(path: &Path) -> Result<Vec<FinancialRecord>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    read(File::open(path)?)
}

/// Parse [`FinancialRecord`]s from a reader.
///
/// The header row is checked for the required columns up front so a missing
/// column fails as a schema error rather than a row-level deserialize error.
/// Column order is irrelevant and extra columns pass through unread. Repeated
/// months are kept as-is; the sort is stable, so they stay in file order.
pub fn read(reader: impl Read) -> Result<Vec<FinancialRecord>> {
    let mut reader = Reader::from_reader(reader);

    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(Error::MissingColumn(column));
        }
    }

    let mut records = reader
        .into_deserialize::<RawRecord>()
        .map(|row| row.map_err(Error::from).and_then(into_record))
        .collect::<Result<Vec<_>>>()?;

    if records.is_empty() {
        return Err(Error::EmptyLedger);
    }

    records.sort_by_key(|record| record.month);
    Ok(records)
}

fn into_record(raw: RawRecord) -> Result<FinancialRecord> {
    Ok(FinancialRecord {
        month: parse_month(&raw.month)?,
        revenue: raw.revenue,
        cogs: raw.cogs,
        opex: raw.opex,
        cash_balance: raw.cash_balance,
    })
}

/// Months may carry a day component ("2024-01-15") or not ("2024-01"); the
/// short form pins to the first of the month.
fn parse_month(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .map_err(|_| Error::InvalidMonth(value.to_string()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn sorts_rows_by_month_ascending() {
        let data = "\
month,revenue,cogs,opex,cash_balance
2024-03,110000,46000,70000,160000
2024-01,100000,40000,50000,200000
2024-02,120000,45000,55000,180000
";

        let records = read(data.as_bytes()).unwrap();
        let months: Vec<String> = records
            .iter()
            .map(|record| record.month.format("%Y-%m").to_string())
            .collect();
        assert_eq!(months, ["2024-01", "2024-02", "2024-03"]);
        assert_eq!(records[0].revenue, dec!(100000));
    }

    #[test]
    fn repeated_months_keep_file_order() {
        let data = "\
month,revenue,cogs,opex,cash_balance
2024-02,1,0,0,0
2024-02,2,0,0,0
2024-01,3,0,0,0
";

        let records = read(data.as_bytes()).unwrap();
        let revenues: Vec<Decimal> = records.iter().map(|record| record.revenue).collect();
        assert_eq!(revenues, [dec!(3), dec!(1), dec!(2)]);
    }

    #[test]
    fn accepts_months_with_and_without_day() {
        let data = "\
month,revenue,cogs,opex,cash_balance
2024-01-15,100,0,0,0
2024-02,200,0,0,0
";

        let records = read(data.as_bytes()).unwrap();
        assert_eq!(
            records[0].month,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(records[1].month, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn column_order_is_irrelevant() {
        let data = "\
cash_balance,opex,cogs,revenue,month
200000,50000,40000,100000,2024-01
";

        let records = read(data.as_bytes()).unwrap();
        assert_eq!(records[0].revenue, dec!(100000));
        assert_eq!(records[0].cash_balance, dec!(200000));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let data = "\
month,revenue,cogs,cash_balance
2024-01,100000,40000,200000
";

        let err = read(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn("opex")));
    }

    #[test]
    fn unparseable_month_is_reported_with_its_value() {
        let data = "\
month,revenue,cogs,opex,cash_balance
January 2024,100000,40000,50000,200000
";

        let err = read(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidMonth(value) if value == "January 2024"));
    }

    #[test]
    fn non_numeric_amount_is_a_csv_error() {
        let data = "\
month,revenue,cogs,opex,cash_balance
2024-01,lots,40000,50000,200000
";

        let err = read(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn header_only_input_is_an_empty_ledger() {
        let data = "month,revenue,cogs,opex,cash_balance\n";

        let err = read(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::EmptyLedger));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
