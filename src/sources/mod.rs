//! Rate source extractors
//!
//! One submodule per upstream source. Every extractor exposes the same
//! shape: a pure `parse` over the fetched body (unit testable) and an
//! async `fetch` that performs the request and maps any network failure
//! to an all-error quote. No failure ever crosses an extractor boundary
//! as an `Err` or a panic; callers receive a fully populated quote and
//! render whatever is in it.

use crate::config::SourceEntry;
use std::fmt;

pub mod bulbank;
pub mod coingecko;
pub mod cursbanci;
pub mod kantor;
pub mod noi;
pub mod privatbank;

#[cfg(test)]
mod tests;

/// Outcome of extracting a single field from a source document.
///
/// Sentinels render as the literal report text, so a broken source is
/// visible to the reader instead of aborting the report.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Display-ready text (parsed and formatted, or passed through).
    Value(String),
    /// Expected markup or key was absent.
    NotFound,
    /// Network failure, non-2xx status, or a non-numeric value where a
    /// number was expected.
    Error,
    /// Zero usable rows in an averaging source.
    NoData,
}

impl FieldValue {
    pub fn value(text: impl Into<String>) -> Self {
        FieldValue::Value(text.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Value(text) => f.write_str(text),
            FieldValue::NotFound => f.write_str("Не найдено"),
            FieldValue::Error => f.write_str("Ошибка"),
            FieldValue::NoData => f.write_str("Нет данных"),
        }
    }
}

/// Buy/sell pairs for USD and EUR from one bank source. Fixed arity:
/// every extractor fills all four fields no matter what happened.
#[derive(Debug, Clone, PartialEq)]
pub struct BankQuote {
    pub usd_buy: FieldValue,
    pub usd_sell: FieldValue,
    pub eur_buy: FieldValue,
    pub eur_sell: FieldValue,
}

impl BankQuote {
    fn splat(field: FieldValue) -> Self {
        Self {
            usd_buy: field.clone(),
            usd_sell: field.clone(),
            eur_buy: field.clone(),
            eur_sell: field,
        }
    }

    pub fn all_error() -> Self {
        Self::splat(FieldValue::Error)
    }

    pub fn all_not_found() -> Self {
        Self::splat(FieldValue::NotFound)
    }

    pub fn all_no_data() -> Self {
        Self::splat(FieldValue::NoData)
    }
}

/// Spot prices for the two tracked crypto assets.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoQuote {
    pub bitcoin: FieldValue,
    pub ethereum: FieldValue,
}

impl CryptoQuote {
    pub fn all_error() -> Self {
        Self {
            bitcoin: FieldValue::Error,
            ethereum: FieldValue::Error,
        }
    }

    pub fn all_not_found() -> Self {
        Self {
            bitcoin: FieldValue::NotFound,
            ethereum: FieldValue::NotFound,
        }
    }
}

/// Parse a rate cell, tolerating the decimal comma some sources use.
pub(crate) fn parse_rate(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

/// Bank rates render with three decimals throughout the report.
pub(crate) fn format_rate(value: f64) -> String {
    format!("{:.3}", value)
}

/// GET the source document, returning `None` on any network failure or
/// non-success status. Callers turn `None` into their all-error quote.
pub(crate) async fn fetch_body(http: &reqwest::Client, source: &SourceEntry) -> Option<String> {
    let response = match http.get(&source.url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("request to {} failed: {}", source.url, e);
            return None;
        }
    };
    if !response.status().is_success() {
        tracing::warn!("{} returned status {}", source.url, response.status());
        return None;
    }
    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!("reading body from {} failed: {}", source.url, e);
            None
        }
    }
}
