use time::Date;
use time::macros::format_description;

time::serde::format_description!(pub day_format, Date, "[year]-[month]-[day]");

/// Parses a calendar day written as `YYYY-MM-DD`.
pub fn parse_day(value: &str) -> crate::Result<Date> {
    Ok(Date::parse(value, format_description!("[year]-[month]-[day]"))?)
}
