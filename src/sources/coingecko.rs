//! Crypto: CoinGecko simple-price API
//!
//! The only JSON source. Typed response, two decimals in the report.
//! A failed request or undecodable body is a whole-quote error; a
//! response without both price keys is "not found".

use super::{CryptoQuote, FieldValue};
use crate::config::SourceEntry;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct PriceEntry {
    usd: Option<f64>,
}

pub async fn fetch(http: &reqwest::Client, source: &SourceEntry) -> CryptoQuote {
    let response = match http.get(&source.url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("request to {} failed: {}", source.url, e);
            return CryptoQuote::all_error();
        }
    };
    if !response.status().is_success() {
        tracing::warn!("{} returned status {}", source.url, response.status());
        return CryptoQuote::all_error();
    }
    match response.json::<HashMap<String, PriceEntry>>().await {
        Ok(prices) => from_prices(&prices),
        Err(e) => {
            tracing::warn!("decoding CoinGecko response failed: {}", e);
            CryptoQuote::all_error()
        }
    }
}

fn from_prices(prices: &HashMap<String, PriceEntry>) -> CryptoQuote {
    let price_of = |id: &str| prices.get(id).and_then(|entry| entry.usd);
    match (price_of("bitcoin"), price_of("ethereum")) {
        (Some(btc), Some(eth)) => CryptoQuote {
            bitcoin: FieldValue::value(format!("{:.2}", btc)),
            ethereum: FieldValue::value(format!("{:.2}", eth)),
        },
        _ => CryptoQuote::all_not_found(),
    }
}

#[cfg(test)]
pub(crate) fn parse(body: &str) -> CryptoQuote {
    match serde_json::from_str::<HashMap<String, PriceEntry>>(body) {
        Ok(prices) => from_prices(&prices),
        Err(_) => CryptoQuote::all_error(),
    }
}
