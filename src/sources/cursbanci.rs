//! Romania: cursbanci.ro bank-rate table
//!
//! The page lists one row per bank with EUR and USD buy/sell columns.
//! We report the arithmetic mean across all banks whose row parses;
//! rows with header cells, too few columns, or non-numeric values are
//! skipped. If nothing parses the whole quote degrades to "no data"
//! rather than "not found" — the table was there, it was just empty.

use super::{fetch_body, format_rate, parse_rate, BankQuote, FieldValue};
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
    let row_sel = Selector::parse("#tablecurs > tbody > tr").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    let mut sums = [0.0f64; 4]; // eur_buy, eur_sell, usd_buy, usd_sell
    let mut count = 0u32;

    for row in doc.select(&row_sel) {
        if row.select(&th_sel).next().is_some() {
            continue;
        }
        let cells: Vec<String> = row
            .select(&td_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 5 {
            continue;
        }
        // EUR buy/sell in columns 1-2, USD buy/sell in 3-4. A row only
        // counts if all four parse; partial rows would skew the mean.
        let parsed: Option<Vec<f64>> = cells[1..5].iter().map(|c| parse_rate(c)).collect();
        match parsed {
            Some(values) => {
                for (sum, value) in sums.iter_mut().zip(values) {
                    *sum += value;
                }
                count += 1;
            }
            None => continue,
        }
    }

    if count == 0 {
        return BankQuote::all_no_data();
    }

    let avg = |sum: f64| FieldValue::value(format_rate(sum / count as f64));
    BankQuote {
        usd_buy: avg(sums[2]),
        usd_sell: avg(sums[3]),
        eur_buy: avg(sums[0]),
        eur_sell: avg(sums[1]),
    }
}
