//! Moldova: noi.md exchange table
//!
//! A single fixed row holds both currencies; the cells already carry
//! display-formatted numbers, so the text is passed through unmodified.
//! Each cell degrades to "not found" on its own.

use super::{fetch_body, BankQuote, FieldValue};
use crate::config::SourceEntry;
use scraper::{Html, Selector};

pub async fn fetch(http: &reqwest::Client, source: &SourceEntry) -> BankQuote {
    match fetch_body(http, source).await {
        Some(body) => parse(&body),
        None => BankQuote::all_error(),
    }
}

pub(crate) fn parse(html: &str) -> BankQuote {
    let doc = Html::parse_document(html);
    let row_sel = Selector::parse("#exchange-table > tbody > tr:nth-child(2)").unwrap();

    let row = match doc.select(&row_sel).next() {
        Some(row) => row,
        None => return BankQuote::all_not_found(),
    };

    let cell = |selector: &str| -> FieldValue {
        let sel = Selector::parse(selector).unwrap();
        match row.select(&sel).next() {
            Some(el) => FieldValue::value(el.text().collect::<String>().trim().to_string()),
            None => FieldValue::NotFound,
        }
    };

    BankQuote {
        usd_buy: cell("td:nth-child(2) > span"),
        usd_sell: cell("td:nth-child(3)"),
        eur_buy: cell("td:nth-child(4) > span"),
        eur_sell: cell("td:nth-child(5)"),
    }
}
