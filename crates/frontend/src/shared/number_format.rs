//! Форматирование чисел в стиле uk-UA: неразрывный пробел между тысячами,
//! запятая перед дробной частью.

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_MARK: char = ',';

/// Вставляет разделитель каждые 3 цифры с конца
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(GROUP_SEPARATOR);
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Число с фиксированным количеством знаков после запятой
///
/// # Примеры
///
/// ```
/// use frontend::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1\u{a0}234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (formatted.as_str(), None),
    };

    // -0,00 не показываем
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match decimal_part {
        Some(d) => format!(
            "{}{}{}{}",
            sign,
            group_thousands(integer_part),
            DECIMAL_MARK,
            d
        ),
        None => format!("{}{}", sign, group_thousands(integer_part)),
    }
}

/// До `max_decimals` знаков, хвостовые нули отбрасываются
pub fn format_number_trimmed(value: f64, max_decimals: u8) -> String {
    let formatted = format_number_with_decimals(value, max_decimals);
    if !formatted.contains(DECIMAL_MARK) {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches(DECIMAL_MARK)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_number_with_decimals(1234.56, 2), "1\u{a0}234,56");
        assert_eq!(format_number_with_decimals(1234567.89, 2), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_number_with_decimals(15000.0, 2), "15\u{a0}000,00");
        assert_eq!(format_number_with_decimals(0.0, 2), "0,00");
        assert_eq!(format_number_with_decimals(-1234.56, 2), "-1\u{a0}234,56");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0,00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1\u{a0}235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1\u{a0}234,6");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1\u{a0}234,567");
        assert_eq!(format_number_with_decimals(f64::NAN, 2), "0");
    }

    #[test]
    fn test_format_number_trimmed() {
        assert_eq!(format_number_trimmed(15000.0, 3), "15\u{a0}000");
        assert_eq!(format_number_trimmed(1234.5, 3), "1\u{a0}234,5");
        assert_eq!(format_number_trimmed(0.1234, 3), "0,123");
        assert_eq!(format_number_trimmed(100.0, 0), "100");
    }
}
