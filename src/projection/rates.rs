//! Growth rate conversion between annual and monthly compounding

/// Monthly periods in a projection year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert an annual growth rate (in percent) to the effective monthly rate.
///
/// Uses compound conversion, `(1 + r)^(1/12) - 1`, so that twelve months at
/// the returned rate reproduce the annual rate. Simple division (`r / 12`)
/// would overshoot.
///
/// Rates at or below -100% are outside the domain.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    let annual_rate = annual_rate_percent / 100.0;
    (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
}

/// Growth factor after compounding `periodic_rate` for `periods` periods
pub fn compound(periodic_rate: f64, periods: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_growth_is_exactly_zero_monthly() {
        assert_eq!(monthly_rate(0.0), 0.0);
        assert_eq!(compound(monthly_rate(0.0), 12), 1.0);
    }

    #[test]
    fn test_twenty_percent_round_trip() {
        let rate = monthly_rate(20.0);
        assert!(rate < 20.0 / 1200.0, "compound conversion must be below simple division");
        assert_relative_eq!(compound(rate, 12), 1.20, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_growth_monthly_rate() {
        let rate = monthly_rate(-50.0);
        assert!(rate < 0.0);
        assert_relative_eq!(compound(rate, 12), 0.5, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_monthly_rate_round_trips_annual(r in -99.0f64..1_000.0) {
            let annual_factor = compound(monthly_rate(r), MONTHS_PER_YEAR);
            let expected = 1.0 + r / 100.0;
            prop_assert!(
                (annual_factor - expected).abs() <= 1e-12 * expected.abs().max(1.0),
                "r={} factor={} expected={}", r, annual_factor, expected
            );
        }
    }
}
