//! Bulgaria: UniCredit Bulbank currency table
//!
//! Fixed row positions: EUR on the second row, USD on the third, with
//! buy/sell in the third and fourth columns. Failure granularity is per
//! currency row: a missing row marks both of its fields "not found", a
//! cell that will not parse marks both "error".

use super::{fetch_body, format_rate, parse_rate, BankQuote, FieldValue};
use crate::config::SourceEntry;
use scraper::{ElementRef, Html, Selector};

pub async fn fetch(http: &reqwest::Client, source: &SourceEntry) -> BankQuote {
    match fetch_body(http, source).await {
        Some(body) => parse(&body),
        None => BankQuote::all_error(),
    }
}

pub(crate) fn parse(html: &str) -> BankQuote {
    let doc = Html::parse_document(html);
    let tbody_sel = Selector::parse(
        "#main-id > div > div > div.index-currency-table > div > div > table > tbody",
    )
    .unwrap();

    let tbody = match doc.select(&tbody_sel).next() {
        Some(tbody) => tbody,
        None => return BankQuote::all_not_found(),
    };

    let (eur_buy, eur_sell) = row_pair(tbody, "tr:nth-child(2)");
    let (usd_buy, usd_sell) = row_pair(tbody, "tr:nth-child(3)");

    BankQuote {
        usd_buy,
        usd_sell,
        eur_buy,
        eur_sell,
    }
}

fn row_pair(tbody: ElementRef, row_selector: &str) -> (FieldValue, FieldValue) {
    let row_sel = Selector::parse(row_selector).unwrap();
    let buy_sel = Selector::parse("td:nth-child(3)").unwrap();
    let sell_sel = Selector::parse("td:nth-child(4)").unwrap();

    let row = match tbody.select(&row_sel).next() {
        Some(row) => row,
        None => return (FieldValue::NotFound, FieldValue::NotFound),
    };

    let cell_value = |sel: &Selector| -> Option<f64> {
        let text = row.select(sel).next()?.text().collect::<String>();
        parse_rate(&text)
    };

    match (cell_value(&buy_sel), cell_value(&sell_sel)) {
        (Some(buy), Some(sell)) => (
            FieldValue::value(format_rate(buy)),
            FieldValue::value(format_rate(sell)),
        ),
        // The row exists but a cell is missing or non-numeric; the pair
        // fails together, same as a half-broken row upstream.
        _ => (FieldValue::Error, FieldValue::Error),
    }
}
