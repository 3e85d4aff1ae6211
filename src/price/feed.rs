//! Fallback policy across price providers

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::{
    BeaverProvider, MempoolProvider, PriceError, PriceFeedConfig, PriceOrigin, PriceProvider,
    PriceQuote,
};

/// Resolves a starting price: primary, then backup, then the last good
/// price, then a static constant. Never fails.
pub struct PriceFeed<P, B> {
    primary: P,
    backup: B,
    fallback_price: f64,
    last: Option<(PriceQuote, Instant)>,
}

impl PriceFeed<BeaverProvider, MempoolProvider> {
    /// Build the HTTP-backed feed from configuration
    pub fn from_config(config: &PriceFeedConfig) -> Result<Self, PriceError> {
        let primary = BeaverProvider::new(config.primary_url.clone(), config.timeout)?;
        let backup = MempoolProvider::new(
            config.backup_url.clone(),
            config.currency.clone(),
            config.timeout,
        )?;
        Ok(Self::new(primary, backup, config.fallback_price))
    }
}

impl<P: PriceProvider, B: PriceProvider> PriceFeed<P, B> {
    pub fn new(primary: P, backup: B, fallback_price: f64) -> Self {
        Self {
            primary,
            backup,
            fallback_price,
            last: None,
        }
    }

    /// Most recently resolved price, from any origin
    pub fn last_price(&self) -> Option<f64> {
        self.last.map(|(quote, _)| quote.price)
    }

    /// Reuse the last quote while it is younger than `max_age`, otherwise
    /// resolve again
    pub async fn resolve_if_stale(&mut self, max_age: Duration) -> PriceQuote {
        if let Some((quote, resolved_at)) = self.last {
            if resolved_at.elapsed() < max_age {
                debug!("reusing {:?} price {:.2}", quote.origin, quote.price);
                return quote;
            }
        }
        self.resolve().await
    }

    /// Resolve the current price
    pub async fn resolve(&mut self) -> PriceQuote {
        let quote = match self.primary.fetch().await {
            Ok(price) => PriceQuote { price, origin: PriceOrigin::Primary },
            Err(primary_err) => {
                warn!("primary price provider failed, trying backup: {}", primary_err);
                match self.backup.fetch().await {
                    Ok(price) => PriceQuote { price, origin: PriceOrigin::Backup },
                    Err(backup_err) => {
                        warn!("backup price provider failed: {}", backup_err);
                        self.without_providers()
                    }
                }
            }
        };

        info!(
            "resolved starting price {:.2} from {:?}",
            quote.price, quote.origin
        );
        self.last = Some((quote, Instant::now()));
        quote
    }

    fn without_providers(&self) -> PriceQuote {
        match self.last_price() {
            Some(price) => PriceQuote { price, origin: PriceOrigin::Previous },
            None => {
                warn!(
                    "all price providers failed, using static fallback {:.2}",
                    self.fallback_price
                );
                PriceQuote {
                    price: self.fallback_price,
                    origin: PriceOrigin::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays scripted results, repeating the last one
    struct Scripted {
        name: &'static str,
        results: Mutex<Vec<Option<f64>>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(name: &'static str, results: Vec<Option<f64>>) -> Self {
            Self {
                name,
                results: Mutex::new(results),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PriceProvider for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> Result<f64, PriceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = {
                let mut results = self.results.lock().unwrap();
                if results.len() > 1 {
                    results.remove(0)
                } else {
                    results[0]
                }
            };
            next.ok_or(PriceError::Status { provider: self.name, status: 503 })
        }
    }

    #[tokio::test]
    async fn test_primary_wins() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![Some(100.0)]),
            Scripted::new("b", vec![Some(200.0)]),
            300.0,
        );
        let quote = feed.resolve().await;

        assert_eq!(quote, PriceQuote { price: 100.0, origin: PriceOrigin::Primary });
        assert_eq!(feed.backup.calls(), 0);
    }

    #[tokio::test]
    async fn test_backup_after_primary_failure() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![None]),
            Scripted::new("b", vec![Some(200.0)]),
            300.0,
        );
        let quote = feed.resolve().await;

        assert_eq!(quote, PriceQuote { price: 200.0, origin: PriceOrigin::Backup });
        assert_eq!(feed.primary.calls(), 1);
    }

    #[tokio::test]
    async fn test_static_fallback_when_nothing_resolved() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![None]),
            Scripted::new("b", vec![None]),
            135_000.0,
        );
        let quote = feed.resolve().await;

        assert_eq!(quote, PriceQuote { price: 135_000.0, origin: PriceOrigin::Fallback });
        assert_eq!(feed.last_price(), Some(135_000.0));
    }

    #[tokio::test]
    async fn test_keeps_previous_price_on_later_failure() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![Some(101.0), None]),
            Scripted::new("b", vec![None]),
            135_000.0,
        );

        assert_eq!(feed.resolve().await.origin, PriceOrigin::Primary);
        let quote = feed.resolve().await;
        assert_eq!(quote, PriceQuote { price: 101.0, origin: PriceOrigin::Previous });
    }

    #[tokio::test]
    async fn test_fresh_quote_is_reused() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![Some(100.0), Some(105.0)]),
            Scripted::new("b", vec![Some(200.0)]),
            300.0,
        );
        let interval = Duration::from_secs(60);

        let first = feed.resolve_if_stale(interval).await;
        let second = feed.resolve_if_stale(interval).await;

        assert_eq!(first, PriceQuote { price: 100.0, origin: PriceOrigin::Primary });
        assert_eq!(second, first);
        assert_eq!(feed.primary.calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_quote_is_refreshed() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![Some(100.0), Some(105.0)]),
            Scripted::new("b", vec![Some(200.0)]),
            300.0,
        );

        feed.resolve_if_stale(Duration::ZERO).await;
        let quote = feed.resolve_if_stale(Duration::ZERO).await;

        assert_eq!(quote.price, 105.0);
        assert_eq!(feed.primary.calls(), 2);
    }

    #[tokio::test]
    async fn test_fallback_is_cached_while_fresh() {
        let mut feed = PriceFeed::new(
            Scripted::new("a", vec![None]),
            Scripted::new("b", vec![None]),
            135_000.0,
        );
        let interval = Duration::from_secs(60);

        assert_eq!(feed.resolve_if_stale(interval).await.origin, PriceOrigin::Fallback);
        assert_eq!(feed.resolve_if_stale(interval).await.origin, PriceOrigin::Fallback);
        assert_eq!(feed.primary.calls(), 1);
        assert_eq!(feed.backup.calls(), 1);
    }
}
