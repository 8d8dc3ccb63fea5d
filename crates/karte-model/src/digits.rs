//! ASCII and full-width (`０`-`９`) decimal digits.
//!
//! Charts pasted from Japanese systems may carry either width. Values are
//! never rewritten in output; folding is only used to interpret them.

/// Digit width of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitWidth {
    Ascii,
    FullWidth,
}

const FULL_WIDTH_ZERO: u32 = '０' as u32;

pub fn digit_width(c: char) -> Option<DigitWidth> {
    if c.is_ascii_digit() {
        Some(DigitWidth::Ascii)
    } else if ('０'..='９').contains(&c) {
        Some(DigitWidth::FullWidth)
    } else {
        None
    }
}

/// Maps a full-width digit to its ASCII form; other characters pass through.
pub fn fold_digit(c: char) -> char {
    match digit_width(c) {
        Some(DigitWidth::FullWidth) => char::from_digit(c as u32 - FULL_WIDTH_ZERO, 10).unwrap_or(c),
        _ => c,
    }
}

pub fn fold_digits(value: &str) -> String {
    value.chars().map(fold_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_digits() {
        assert_eq!(fold_digits("２０２５/０４/１８(金)"), "2025/04/18(金)");
        assert_eq!(fold_digits("１２:41"), "12:41");
        assert_eq!(fold_digits("内科"), "内科");
    }

    #[test]
    fn test_digit_width() {
        assert_eq!(digit_width('7'), Some(DigitWidth::Ascii));
        assert_eq!(digit_width('７'), Some(DigitWidth::FullWidth));
        assert_eq!(digit_width('七'), None);
        assert_eq!(digit_width(':'), None);
    }
}
