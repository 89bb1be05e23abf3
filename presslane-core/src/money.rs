/// Round a fractional dollar-cents amount to whole cents, half away from zero.
pub fn round_cents(amount: f64) -> i64 {
    if amount >= 0.0 {
        (amount + 0.5) as i64
    } else {
        (amount - 0.5) as i64
    }
}

/// Round a cent amount to the nearest multiple of `increment_cents`.
///
/// An increment of 1 is a no-op. Used to land final prices on nickel or
/// dime boundaries when the shop configures it that way.
pub fn round_to_increment(cents: i64, increment_cents: i64) -> i64 {
    if increment_cents <= 1 {
        return cents;
    }
    let remainder = cents % increment_cents;
    if remainder * 2 >= increment_cents {
        cents + (increment_cents - remainder)
    } else {
        cents - remainder
    }
}

/// Format cents as a dollar string for logs and quote labels.
pub fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_up() {
        assert_eq!(round_cents(100.4), 100);
        assert_eq!(round_cents(100.5), 101);
        assert_eq!(round_cents(0.0), 0);
    }

    #[test]
    fn test_round_to_increment() {
        assert_eq!(round_to_increment(1234, 1), 1234);
        assert_eq!(round_to_increment(1234, 5), 1235);
        assert_eq!(round_to_increment(1232, 5), 1230);
        assert_eq!(round_to_increment(1234, 25), 1225);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(123456), "$1234.56");
        assert_eq!(format_cents(5), "$0.05");
    }
}
