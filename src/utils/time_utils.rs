use chrono::{Datelike, Local, Months, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    /// Format used in the results summary
    pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Same calendar day `years` years earlier. Feb 29 falls back to Feb 28.
    pub fn years_before(date: NaiveDate, years: i32) -> NaiveDate {
        let months = u32::try_from(years.max(0)).unwrap_or(0) * 12;
        date.checked_sub_months(Months::new(months))
            .unwrap_or(date)
    }

    pub fn to_display_date(date: NaiveDate) -> String {
        date.format(Self::DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn current_year() -> i32 {
        Self::today().year()
    }
}
