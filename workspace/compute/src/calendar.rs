use chrono::{Datelike, Months, NaiveDate};

/// First day of the month `date` falls in.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("the first of an existing month is a valid date")
}

/// Half-open `[first day, first day of next month)` bounds for (year, month).
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("the first of an existing month is a valid date");
    (start, start + Months::new(1))
}

/// Start of an n-month history window ending today: the first day of the
/// month `months` months before `today`. History queries are `date >= start`
/// with no upper bound, so today's partial month is included.
pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    month_floor(today - Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_floor_keeps_year_and_month() {
        assert_eq!(month_floor(ymd(2024, 7, 19)), ymd(2024, 7, 1));
        assert_eq!(month_floor(ymd(2024, 1, 1)), ymd(2024, 1, 1));
    }

    #[test]
    fn month_bounds_cover_december() {
        let (start, end) = month_bounds(2024, 12);
        assert_eq!(start, ymd(2024, 12, 1));
        assert_eq!(end, ymd(2025, 1, 1));
    }

    #[test]
    fn window_start_crosses_year_boundaries() {
        assert_eq!(window_start(ymd(2024, 3, 15), 6), ymd(2023, 9, 1));
        assert_eq!(window_start(ymd(2024, 3, 15), 36), ymd(2021, 3, 1));
    }

    #[test]
    fn window_start_ignores_the_day_of_month() {
        assert_eq!(window_start(ymd(2024, 3, 31), 1), ymd(2024, 2, 1));
        assert_eq!(window_start(ymd(2024, 3, 1), 1), ymd(2024, 2, 1));
    }
}
