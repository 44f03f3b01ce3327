//! Human-readable rendering of dates and terms for audit reasoning.

use chrono::NaiveDate;

/// Formats a date as `dd/mm/yyyy`.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::format_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
/// assert_eq!(format_date(date), "01/07/2022");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Describes a month count in years and months, in Italian.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::describe_months;
///
/// assert_eq!(describe_months(90), "7 anni e 6 mesi");
/// assert_eq!(describe_months(12), "1 anno");
/// assert_eq!(describe_months(1), "1 mese");
/// ```
pub fn describe_months(months: u32) -> String {
    let years = months / 12;
    let remainder = months % 12;

    let years_part = match years {
        1 => "1 anno".to_string(),
        n => format!("{} anni", n),
    };
    let months_part = match remainder {
        1 => "1 mese".to_string(),
        n => format!("{} mesi", n),
    };

    match (years, remainder) {
        (0, _) => months_part,
        (_, 0) => years_part,
        _ => format!("{} e {}", years_part, months_part),
    }
}

/// Describes a day count, in Italian.
///
/// # Example
///
/// ```
/// use prescrizione_engine::calculation::describe_days;
///
/// assert_eq!(describe_days(1), "1 giorno");
/// assert_eq!(describe_days(548), "548 giorni");
/// ```
pub fn describe_days(days: u32) -> String {
    match days {
        1 => "1 giorno".to_string(),
        n => format!("{} giorni", n),
    }
}
