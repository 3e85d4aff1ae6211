//! Shareable URL query parameters
//!
//! Reads and writes the four keys a shared link carries: `initial`, `dca`,
//! `years` and `growth`. The starting price never travels in a link; it
//! always comes from the price source.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::projection::{
    ProjectionInputs, DEFAULT_ANNUAL_GROWTH_RATE_PERCENT, DEFAULT_HORIZON_YEARS,
    DEFAULT_INITIAL_INVESTMENT, DEFAULT_PERIODIC_CONTRIBUTION,
};

pub const KEY_INITIAL: &str = "initial";
pub const KEY_DCA: &str = "dca";
pub const KEY_YEARS: &str = "years";
pub const KEY_GROWTH: &str = "growth";

/// Manual starting price; read by the HTTP handler, never written to links
pub const KEY_PRICE: &str = "price";

/// Public address that shared links point at
pub const DEFAULT_SHARE_BASE_URL: &str = "https://bitcoindca.ca/";

/// Build inputs from a raw query string (with or without a leading `?`).
///
/// Missing or non-numeric entries fall back to their defaults; numeric
/// entries are taken as given, range checks are left to `validate`. When a
/// key repeats, the first occurrence wins.
pub fn from_query(query: &str) -> ProjectionInputs {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(Cow<str>, Cow<str>)> = form_urlencoded::parse(query.as_bytes()).collect();

    from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    })
}

/// Build inputs from any key lookup (already-decoded values)
pub fn from_lookup<'a, F>(lookup: F) -> ProjectionInputs
where
    F: Fn(&str) -> Option<&'a str>,
{
    let number = |key: &str, default: f64| {
        lookup(key)
            .and_then(parse_leading_number)
            .unwrap_or(default)
    };

    ProjectionInputs {
        initial_investment: number(KEY_INITIAL, DEFAULT_INITIAL_INVESTMENT),
        periodic_contribution: number(KEY_DCA, DEFAULT_PERIODIC_CONTRIBUTION),
        horizon_years: lookup(KEY_YEARS)
            .and_then(parse_leading_number)
            .map(whole_years)
            .unwrap_or(DEFAULT_HORIZON_YEARS),
        annual_growth_rate_percent: number(KEY_GROWTH, DEFAULT_ANNUAL_GROWTH_RATE_PERCENT),
        starting_price: 0.0,
    }
}

/// Encode the shareable parameters of `inputs` as a query string (no `?`)
pub fn to_query(inputs: &ProjectionInputs) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(KEY_INITIAL, &inputs.initial_investment.to_string())
        .append_pair(KEY_DCA, &inputs.periodic_contribution.to_string())
        .append_pair(KEY_YEARS, &inputs.horizon_years.to_string())
        .append_pair(KEY_GROWTH, &inputs.annual_growth_rate_percent.to_string())
        .finish()
}

/// Full shareable link for `inputs`
pub fn share_url(base: &str, inputs: &ProjectionInputs) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, to_query(inputs))
}

/// Parse the longest numeric prefix of `raw`, ignoring leading whitespace.
///
/// "12abc" gives 12, "  .5" gives 0.5, "1e3x" gives 1000. Returns None when
/// there is no numeric prefix or the value is not finite.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Caller-supplied starting price from a key lookup.
///
/// Absent gives `Ok(None)`. Present but unparseable or not positive is an
/// error, since a manual price has no sensible default.
pub fn price_override<'a, F>(lookup: F) -> Result<Option<f64>, String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    match lookup(KEY_PRICE) {
        None => Ok(None),
        Some(raw) => match parse_leading_number(raw) {
            Some(price) if price > 0.0 => Ok(Some(price)),
            _ => Err(format!("price must be a positive number, got {:?}", raw)),
        },
    }
}

/// Truncate toward zero; negatives become 0 and oversized values saturate
fn whole_years(value: f64) -> u32 {
    value.trunc().clamp(0.0, u32::MAX as f64) as u32
}
