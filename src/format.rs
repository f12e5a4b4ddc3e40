use chrono::NaiveDate;

use crate::config::AppSettings;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(separator);
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// `1234.5` → `1.234,50` with `('.', ',')`.
pub fn format_amount(amount: f64, thousands: char, decimal: char) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_digits(cents / 100, thousands);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}{:02}", sign, whole, decimal, cents % 100)
}

pub fn format_currency(amount: f64, settings: &AppSettings) -> String {
    let (thousands, decimal) = settings.separators();
    let body = format_amount(amount.abs(), thousands, decimal);
    if amount < 0.0 && body != format_amount(0.0, thousands, decimal) {
        format!("-{} {}", settings.currency_symbol, body)
    } else {
        format!("{} {}", settings.currency_symbol, body)
    }
}

/// Income/expense style: always signed.
pub fn format_signed(amount: f64, settings: &AppSettings) -> String {
    if amount < 0.0 {
        format_currency(amount, settings)
    } else {
        format!("+{}", format_currency(amount, settings))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Reads a user-typed amount with the separators of the active currency.
///
/// The decimal separator may be left out. A lone thousands separator
/// followed by exactly three digits groups (`1.200` is 1200 for BRL);
/// followed by anything else it is read as the decimal point, so `1234.56`
/// still works on keyboards that only offer a dot. Malformed grouping is
/// rejected instead of guessed.
pub fn parse_amount_input(raw: &str, settings: &AppSettings) -> Option<f64> {
    let (thousands, decimal) = settings.separators();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let grouping: Vec<usize> = trimmed.match_indices(thousands).map(|(at, _)| at).collect();
    let (whole, fraction) = match (trimmed.rfind(decimal), grouping.as_slice()) {
        (Some(at), _) => (&trimmed[..at], Some(&trimmed[at + decimal.len_utf8()..])),
        (None, &[at]) if trimmed.len() - at - thousands.len_utf8() != 3 => {
            (&trimmed[..at], Some(&trimmed[at + thousands.len_utf8()..]))
        }
        (None, _) => (trimmed, None),
    };

    let whole = ungroup(whole, thousands)?;
    let fraction = match fraction {
        None => "0",
        Some(f) if all_digits(f) => f,
        Some(_) => return None,
    };
    format!("{}.{}", whole, fraction)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// `-1.234.567` → `-1234567`. Every group after the first must hold three
/// digits.
fn ungroup(whole: &str, thousands: char) -> Option<String> {
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };
    let groups: Vec<&str> = digits.split(thousands).collect();
    let well_formed = match groups.as_slice() {
        [single] => all_digits(single),
        [first, rest @ ..] => {
            first.len() <= 3
                && all_digits(first)
                && rest.iter().all(|g| g.len() == 3 && all_digits(g))
        }
        [] => false,
    };
    well_formed.then(|| format!("{}{}", sign, groups.concat()))
}

fn all_digits(group: &str) -> bool {
    !group.is_empty() && group.chars().all(|c| c.is_ascii_digit())
}

pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(1234567.891, '.', ','), "1.234.567,89");
        assert_eq!(format_amount(999.0, ',', '.'), "999.00");
        assert_eq!(format_amount(-0.004, ',', '.'), "0.00");
        assert_eq!(format_amount(-12.5, ',', '.'), "-12.50");
    }

    #[test]
    fn currency_prefix_and_sign() {
        let brl = AppSettings::default();
        assert_eq!(format_currency(5000.0, &brl), "R$ 5.000,00");
        assert_eq!(format_currency(-180.0, &brl), "-R$ 180,00");
        assert_eq!(format_signed(250.0, &brl), "+R$ 250,00");

        let usd = AppSettings::for_currency("USD");
        assert_eq!(format_currency(1500.25, &usd), "$ 1,500.25");
    }

    #[test]
    fn parses_amounts_with_local_separators() {
        let brl = AppSettings::default();
        assert_eq!(parse_amount_input("1234.56", &brl), Some(1234.56));
        assert_eq!(parse_amount_input("1234,56", &brl), Some(1234.56));
        assert_eq!(parse_amount_input("1.234,56", &brl), Some(1234.56));
        assert_eq!(parse_amount_input("1.200", &brl), Some(1200.0));
        assert_eq!(parse_amount_input("1.234.567", &brl), Some(1234567.0));
        assert_eq!(parse_amount_input("-12,5", &brl), Some(-12.5));
        assert_eq!(parse_amount_input("", &brl), None);
        assert_eq!(parse_amount_input("abc", &brl), None);

        let usd = AppSettings::for_currency("USD");
        assert_eq!(parse_amount_input("1,234.56", &usd), Some(1234.56));
        assert_eq!(parse_amount_input("1,200", &usd), Some(1200.0));
        assert_eq!(parse_amount_input("1234.5", &usd), Some(1234.5));
    }

    #[test]
    fn malformed_grouping_is_rejected() {
        let brl = AppSettings::default();
        assert_eq!(parse_amount_input("1.2.3", &brl), None);
        assert_eq!(parse_amount_input("12.34,5", &brl), None);
        assert_eq!(parse_amount_input("1,2,3", &AppSettings::for_currency("USD")), None);
        assert_eq!(parse_amount_input("10,", &brl), None);
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }
}
