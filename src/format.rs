//! Display formatting for projection values
//!
//! Formatting is output-only: nothing here feeds back into a projection.

use crate::projection::{ProjectionInputs, ProjectionResult};

/// Ticker of the accumulated asset
pub const ASSET_SYMBOL: &str = "BTC";

/// Name of the asset's smallest denomination
pub const SUB_UNIT_NAME: &str = "sats";

/// Fiat currency every amount is quoted in
pub const FIAT_CODE: &str = "CAD";

const FIAT_SYMBOL: &str = "$";
const ASSET_MIN_DECIMALS: usize = 4;
const ASSET_MAX_DECIMALS: usize = 8;

/// Fiat amount with currency symbol, no decimals: `$1,234`
pub fn format_fiat(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // f64::round rounds half away from zero
    let rounded = value.abs().round();
    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, FIAT_SYMBOL, group_thousands(&format!("{:.0}", rounded)))
}

/// Asset quantity with 4 to 8 decimals: `0.1220`, `1,234.56789012`
pub fn format_asset(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", ASSET_MAX_DECIMALS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0');
    if frac.len() < ASSET_MIN_DECIMALS {
        frac = &frac_part[..ASSET_MIN_DECIMALS];
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(int_part), frac)
}

/// Whole sub-units with grouping: `12,200,000`
pub fn format_sub_units(sub_units: u64) -> String {
    group_thousands(&sub_units.to_string())
}

/// Growth rate as entered: `20%`, `12.5%`
pub fn format_percent(rate_percent: f64) -> String {
    format!("{}%", rate_percent)
}

/// One-line explanation of a projection
pub fn results_sentence(inputs: &ProjectionInputs, result: &ProjectionResult) -> String {
    format!(
        "Your DCA strategy of {} per month will accumulate {} {} over {} years assuming an annual growth rate of {}.",
        format_fiat(inputs.periodic_contribution),
        format_asset(result.total_asset_quantity),
        ASSET_SYMBOL,
        inputs.horizon_years,
        format_percent(inputs.annual_growth_rate_percent),
    )
}

/// Attribution line closing every shared post
pub const SHARE_ATTRIBUTION: &str = "Source: bitcoindca.ca @beaverbitcoin";

/// Short text for sharing a projection, attribution included
pub fn share_text(inputs: &ProjectionInputs, result: &ProjectionResult) -> String {
    format!(
        "Buying {}/mo of bitcoin for {} years accumulates {} {} worth {} {} \u{1F680}\n\n{}",
        format_fiat(inputs.periodic_contribution),
        inputs.horizon_years,
        format_sub_units(result.total_sub_units),
        SUB_UNIT_NAME,
        format_fiat(result.final_portfolio_value),
        FIAT_CODE,
        SHARE_ATTRIBUTION,
    )
}

/// Insert `,` every three digits of a plain digit string
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_format_fiat() {
        assert_eq!(format_fiat(0.0), "$0");
        assert_eq!(format_fiat(999.4), "$999");
        assert_eq!(format_fiat(999.5), "$1,000");
        assert_eq!(format_fiat(6_099.999_999_999_999), "$6,100");
        assert_eq!(format_fiat(1_234_567.0), "$1,234,567");
        assert_eq!(format_fiat(-2_500.0), "-$2,500");
        assert_eq!(format_fiat(-0.2), "$0");
    }

    #[test]
    fn test_format_asset() {
        assert_eq!(format_asset(0.0), "0.0000");
        assert_eq!(format_asset(0.122), "0.1220");
        assert_eq!(format_asset(0.12199999999999998), "0.1220");
        assert_eq!(format_asset(0.123_456_789), "0.12345679");
        assert_eq!(format_asset(1.5), "1.5000");
        assert_eq!(format_asset(1_234.000_01), "1,234.00001");
        assert_eq!(format_asset(-0.25), "-0.2500");
    }

    #[test]
    fn test_format_sub_units() {
        assert_eq!(format_sub_units(0), "0");
        assert_eq!(format_sub_units(999), "999");
        assert_eq!(format_sub_units(1_000), "1,000");
        assert_eq!(format_sub_units(12_200_000), "12,200,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(20.0), "20%");
        assert_eq!(format_percent(12.5), "12.5%");
    }

    #[test]
    fn test_sentences() {
        let inputs = ProjectionInputs::new(100.0, 500.0, 1, 0.0, 50_000.0);
        let engine = ProjectionEngine::new(ProjectionConfig::with_base_year(2026));
        let result = engine.project(&inputs);

        assert_eq!(
            results_sentence(&inputs, &result),
            "Your DCA strategy of $500 per month will accumulate 0.1220 BTC over 1 years assuming an annual growth rate of 0%."
        );
        assert_eq!(
            share_text(&inputs, &result),
            "Buying $500/mo of bitcoin for 1 years accumulates 12,200,000 sats worth $6,100 CAD \u{1F680}\n\nSource: bitcoindca.ca @beaverbitcoin"
        );
        assert!(share_text(&inputs, &result).ends_with(SHARE_ATTRIBUTION));
    }
}
