//! AWS Lambda handler for shareable projections
//!
//! Accepts the same query parameters as a shared link (`initial`, `dca`,
//! `years`, `growth`) plus an optional `price` override, and returns the
//! projection as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use dca_projection::{
    format::{share_text, FIAT_CODE},
    preset::{self, DEFAULT_SHARE_BASE_URL},
    price::{BeaverProvider, MempoolProvider},
    PriceFeed, PriceFeedConfig, PriceOrigin, PriceQuote, ProjectionEngine, ProjectionInputs,
    ProjectionResult, ProjectionSummary,
};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

type SharedFeed = Arc<Mutex<PriceFeed<BeaverProvider, MempoolProvider>>>;

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub inputs: ProjectionInputs,
    pub currency: &'static str,
    pub price_origin: PriceOrigin,
    pub projected_year: i32,
    pub summary: ProjectionSummary,
    pub result: ProjectionResult,
    pub share_text: String,
    pub share_url: String,
    pub execution_time_ms: u64,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(
    event: Request,
    feed: SharedFeed,
    poll_interval: Duration,
) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let params = event.query_string_parameters();
    let (inputs, manual_price) = match preset::from_request(|key| params.first(key)) {
        Ok(request) => request,
        Err(reason) => return error_response(400, &reason),
    };

    let quote = match manual_price {
        Some(price) => PriceQuote { price, origin: PriceOrigin::Manual },
        None => feed.lock().await.resolve_if_stale(poll_interval).await,
    };

    let inputs = inputs.with_price(quote.price);
    let engine = ProjectionEngine::default();
    let result = engine.project(&inputs);
    info!(
        "projected {} years at starting price {:.2} ({:?})",
        inputs.horizon_years,
        quote.price,
        quote.origin
    );

    let response = ProjectionResponse {
        currency: FIAT_CODE,
        price_origin: quote.origin,
        projected_year: engine.projected_year(&inputs),
        summary: result.summary(),
        share_text: share_text(&inputs, &result),
        share_url: preset::share_url(DEFAULT_SHARE_BASE_URL, &inputs),
        execution_time_ms: start.elapsed().as_millis() as u64,
        inputs,
        result,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = PriceFeedConfig::default();
    let poll_interval = config.poll_interval;
    let feed: SharedFeed = Arc::new(Mutex::new(PriceFeed::from_config(&config)?));

    run(service_fn(move |event: Request| {
        let feed = Arc::clone(&feed);
        async move { handler(event, feed, poll_interval).await }
    }))
    .await
}
