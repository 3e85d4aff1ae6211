//! HTTP price providers

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{usable, PriceError, PriceProvider};

/// Beaver quotes above this are taken to be in cents
const BEAVER_CENTS_THRESHOLD: f64 = 1_000_000.0;

fn http_client(provider: &'static str, timeout: Duration) -> Result<Client, PriceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| PriceError::Http { provider, source })
}

async fn get_json(client: &Client, provider: &'static str, url: &str) -> Result<Value, PriceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| PriceError::Http { provider, source })?;

    if !response.status().is_success() {
        return Err(PriceError::Status {
            provider,
            status: response.status().as_u16(),
        });
    }

    response
        .json()
        .await
        .map_err(|source| PriceError::Http { provider, source })
}

/// Primary provider: Beaver Bitcoin price API
pub struct BeaverProvider {
    client: Client,
    url: String,
}

impl BeaverProvider {
    pub const NAME: &'static str = "beaver";

    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PriceError> {
        Ok(Self {
            client: http_client(Self::NAME, timeout)?,
            url: url.into(),
        })
    }
}

impl PriceProvider for BeaverProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self) -> Result<f64, PriceError> {
        let body = get_json(&self.client, Self::NAME, &self.url).await?;
        parse_beaver_price(&body)
    }
}

/// Read `{"price": ...}` from a Beaver response.
///
/// The price may be a number or a string with thousands separators. This
/// endpoint has been seen quoting in cents, so values above 1,000,000 are
/// divided by 100. The correction is specific to this provider.
pub fn parse_beaver_price(body: &Value) -> Result<f64, PriceError> {
    let provider = BeaverProvider::NAME;
    let missing = || PriceError::MissingField {
        provider,
        field: "price".to_string(),
    };

    let mut price = match body.get("price") {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(missing)?,
        Some(Value::String(s)) => s.replace(',', "").trim().parse::<f64>().map_err(|_| missing())?,
        _ => return Err(missing()),
    };

    if price > BEAVER_CENTS_THRESHOLD {
        price /= 100.0;
    }

    usable(provider, price)
}

/// Backup provider: mempool.space price API
pub struct MempoolProvider {
    client: Client,
    url: String,
    currency: String,
}

impl MempoolProvider {
    pub const NAME: &'static str = "mempool";

    pub fn new(
        url: impl Into<String>,
        currency: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            client: http_client(Self::NAME, timeout)?,
            url: url.into(),
            currency: currency.into(),
        })
    }
}

impl PriceProvider for MempoolProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self) -> Result<f64, PriceError> {
        let body = get_json(&self.client, Self::NAME, &self.url).await?;
        parse_mempool_price(&body, &self.currency)
    }
}

/// Read the price for `currency` from a mempool.space response such as
/// `{"time": 1700000000, "USD": 98000, "CAD": 135000}`
pub fn parse_mempool_price(body: &Value, currency: &str) -> Result<f64, PriceError> {
    let provider = MempoolProvider::NAME;
    let price = body
        .get(currency)
        .and_then(Value::as_f64)
        .ok_or_else(|| PriceError::MissingField {
            provider,
            field: currency.to_string(),
        })?;

    usable(provider, price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_beaver_numeric_price() {
        assert_eq!(parse_beaver_price(&json!({ "price": 134_250.5 })).unwrap(), 134_250.5);
    }

    #[test]
    fn test_beaver_string_price_with_commas() {
        assert_eq!(parse_beaver_price(&json!({ "price": "134,250.50" })).unwrap(), 134_250.5);
    }

    #[test]
    fn test_beaver_cents_correction() {
        assert_eq!(parse_beaver_price(&json!({ "price": 13_425_050 })).unwrap(), 134_250.5);
        // Exactly at the threshold is left alone
        assert_eq!(parse_beaver_price(&json!({ "price": 1_000_000 })).unwrap(), 1_000_000.0);
    }

    #[test]
    fn test_beaver_rejects_missing_and_zero() {
        assert!(matches!(
            parse_beaver_price(&json!({ "last": 1 })),
            Err(PriceError::MissingField { .. })
        ));
        assert!(matches!(
            parse_beaver_price(&json!({ "price": "n/a" })),
            Err(PriceError::MissingField { .. })
        ));
        assert!(matches!(
            parse_beaver_price(&json!({ "price": 0 })),
            Err(PriceError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_mempool_reads_currency() {
        let body = json!({ "time": 1_700_000_000, "USD": 98_000, "CAD": 135_000 });
        assert_eq!(parse_mempool_price(&body, "CAD").unwrap(), 135_000.0);
        assert_eq!(parse_mempool_price(&body, "USD").unwrap(), 98_000.0);
        assert!(matches!(
            parse_mempool_price(&body, "EUR"),
            Err(PriceError::MissingField { .. })
        ));
    }

    #[test]
    fn test_mempool_rejects_negative() {
        let body = json!({ "CAD": -1 });
        assert!(matches!(
            parse_mempool_price(&body, "CAD"),
            Err(PriceError::InvalidPrice { .. })
        ));
    }
}
