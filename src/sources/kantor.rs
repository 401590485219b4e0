//! Poland: Kantor Stalowa Wola exchange-office table
//!
//! Rates are quoted in hundredths (grosz), so parsed values are divided
//! by the configured scale before formatting. Granularity is mixed:
//! a missing table or row collapses the whole quote to "not found",
//! while individual cells fail field by field.

use super::{fetch_body, format_rate, BankQuote, FieldValue};
use crate::config::SourceEntry;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

pub async fn fetch(http: &reqwest::Client, source: &SourceEntry) -> BankQuote {
    match fetch_body(http, source).await {
        Some(body) => parse(&body, source.scale_divisor.unwrap_or(100.0)),
        None => BankQuote::all_error(),
    }
}

pub(crate) fn parse(html: &str, scale_divisor: f64) -> BankQuote {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("#kursy > div > div > div > div > table").unwrap();
    let tbody_tr_sel = Selector::parse("tbody > tr").unwrap();
    let tr_sel = Selector::parse("tr").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    let table = match doc.select(&table_sel).next() {
        Some(table) => table,
        None => return BankQuote::all_not_found(),
    };

    let mut rows: Vec<ElementRef> = table.select(&tbody_tr_sel).collect();
    if rows.is_empty() {
        rows = table.select(&tr_sel).collect();
    }
    // USD sits in the first row, EUR in the fourth.
    if rows.len() < 4 {
        return BankQuote::all_not_found();
    }

    let cell_texts = |row: &ElementRef| -> Vec<String> {
        row.select(&td_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect()
    };

    let usd_cells = cell_texts(&rows[0]);
    if usd_cells.len() < 5 {
        return BankQuote::all_not_found();
    }
    let eur_cells = cell_texts(&rows[3]);
    if eur_cells.len() < 5 {
        return BankQuote::all_not_found();
    }

    let number = Regex::new(r"[\d.,]+").unwrap();
    let parse_cell = |text: &str| -> FieldValue {
        match number.find(text) {
            Some(m) => match m.as_str().replace(',', ".").parse::<f64>() {
                Ok(value) => FieldValue::value(format_rate(value / scale_divisor)),
                Err(_) => FieldValue::Error,
            },
            None => FieldValue::NotFound,
        }
    };

    BankQuote {
        usd_buy: parse_cell(&usd_cells[3]),
        usd_sell: parse_cell(&usd_cells[4]),
        eur_buy: parse_cell(&eur_cells[3]),
        eur_sell: parse_cell(&eur_cells[4]),
    }
}
