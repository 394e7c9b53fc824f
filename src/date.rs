// Date line printed above the task table

use chrono::{Datelike, Local, NaiveDate};

/// Format as D/MM/YYYY: unpadded day, two-digit month
pub fn header_date(date: NaiveDate) -> String {
    format!("{}/{:02}/{:02}", date.day(), date.month(), date.year())
}

pub fn today_header() -> String {
    header_date(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_date_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(header_date(date), "7/03/2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(header_date(date), "25/12/2023");
    }

    #[test]
    fn test_today_header_shape() {
        let header = today_header();
        assert_eq!(header.split('/').count(), 3);
    }
}
