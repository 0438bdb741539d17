use chrono::{Datelike, Days, Duration, Local, NaiveDate};

/// Today's date in the local timezone of the running process.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the date as "YYYY-MM-DD".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First calendar day of `today`'s month.
pub fn current_month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

/// Last calendar day of the month following `today`'s month.
pub fn end_of_next_month(today: NaiveDate) -> NaiveDate {
    // First day two months ahead, minus one day.
    let (year, month) = match today.month() {
        11 => (today.year() + 1, 1),
        12 => (today.year() + 1, 2),
        m => (today.year(), m + 2),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(today)
}

/// `today` minus `days` days, or `None` when that falls outside the supported date range.
pub fn lookback_start(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(u64::from(days)))
}
