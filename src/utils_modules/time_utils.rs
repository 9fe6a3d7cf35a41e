use crate::common::*;

#[doc = "Textual date format of the transaction `Date` column (day/month/year)"]
pub const TRANSACTION_DATE_FORMAT: &str = "%d/%m/%Y";

#[doc = "Parses a transaction date. Strict: no fallback formats."]
pub fn parse_transaction_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, TRANSACTION_DATE_FORMAT).map_err(|e| {
        anyhow!(
            "time data '{}' does not match format '{}': {}",
            value,
            TRANSACTION_DATE_FORMAT,
            e
        )
    })
}

#[doc = "Last calendar day of the month `date` falls in"]
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[doc = "Month-end of the month following the one `date` falls in"]
pub fn next_month_end(date: NaiveDate) -> NaiveDate {
    month_end(month_end(date).succ_opt().unwrap_or(NaiveDate::MAX))
}

#[doc = "Every month-end from the month of `first` to the month of `last`, inclusive"]
pub fn month_ends_between(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let last_end: NaiveDate = month_end(last);
    let mut cursor: NaiveDate = month_end(first);
    let mut month_ends: Vec<NaiveDate> = Vec::new();

    while cursor <= last_end {
        month_ends.push(cursor);
        if cursor == NaiveDate::MAX {
            break;
        }
        cursor = next_month_end(cursor);
    }

    month_ends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_day_month_year() {
        assert_eq!(parse_transaction_date("31/01/2020").unwrap(), ymd(2020, 1, 31));
        assert_eq!(parse_transaction_date("1/2/2021").unwrap(), ymd(2021, 2, 1));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_transaction_date("2020-01-31").is_err());
        assert!(parse_transaction_date("01/31/2020").is_err());
        assert!(parse_transaction_date("").is_err());
    }

    #[test]
    fn month_end_handles_leap_years_and_december() {
        assert_eq!(month_end(ymd(2020, 2, 3)), ymd(2020, 2, 29));
        assert_eq!(month_end(ymd(2021, 2, 28)), ymd(2021, 2, 28));
        assert_eq!(month_end(ymd(2021, 12, 1)), ymd(2021, 12, 31));
        assert_eq!(month_end(ymd(2021, 4, 30)), ymd(2021, 4, 30));
    }

    #[test]
    fn month_ends_between_is_inclusive_and_contiguous() {
        let ends = month_ends_between(ymd(2020, 11, 15), ymd(2021, 2, 1));
        assert_eq!(
            ends,
            vec![
                ymd(2020, 11, 30),
                ymd(2020, 12, 31),
                ymd(2021, 1, 31),
                ymd(2021, 2, 28)
            ]
        );

        assert_eq!(
            month_ends_between(ymd(2020, 5, 2), ymd(2020, 5, 30)),
            vec![ymd(2020, 5, 31)]
        );
    }
}
