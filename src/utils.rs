use crate::{AgeOption, PageError};

/// Parse the value of the age control.
///
/// Accepts surrounding whitespace; anything non-numeric is `InvalidAge`, a
/// number outside `MIN_AGE..=MAX_AGE` is `AgeOutOfRange`.
pub fn parse_age(input: &str) -> Result<AgeOption, PageError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| PageError::InvalidAge(input.to_string()))?;
    AgeOption::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_age_accepts_bounds() {
        assert_eq!(parse_age("1").map(|a| a.value), Ok(1));
        let oldest = parse_age(" 99 ").unwrap();
        assert_eq!(oldest.value, 99);
        assert_eq!(oldest.label, "99");
    }

    #[test]
    fn parse_age_rejects_garbage_and_range() {
        assert_eq!(parse_age(""), Err(PageError::InvalidAge(String::new())));
        assert_eq!(parse_age("ten"), Err(PageError::InvalidAge("ten".into())));
        assert_eq!(parse_age("4.5"), Err(PageError::InvalidAge("4.5".into())));
        assert_eq!(parse_age("0"), Err(PageError::AgeOutOfRange(0)));
        assert_eq!(parse_age("100"), Err(PageError::AgeOutOfRange(100)));
    }
}
