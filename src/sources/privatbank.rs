//! Ukraine: PrivatBank rates page
//!
//! The page renders one `div.currency-pairs` block per currency with
//! named spans for the pair name and the purchase/sale values. Blocks
//! are scanned until both USD and EUR are found; values are already
//! formatted upstream and pass through unchanged. Missing either
//! currency collapses the whole quote to "not found".

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
    let pair_sel = Selector::parse("div.currency-pairs").unwrap();
    let name_sel = Selector::parse(".names span").unwrap();
    let purchase_sel = Selector::parse(".purchase span").unwrap();
    let sale_sel = Selector::parse(".sale span").unwrap();

    let mut pairs = doc.select(&pair_sel).peekable();
    if pairs.peek().is_none() {
        return BankQuote::all_not_found();
    }

    let mut usd: Option<(String, String)> = None;
    let mut eur: Option<(String, String)> = None;

    for pair in pairs {
        let text_of = |sel: &Selector| -> Option<String> {
            pair.select(sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        };
        let (name, buy, sell) = match (text_of(&name_sel), text_of(&purchase_sel), text_of(&sale_sel))
        {
            (Some(name), Some(buy), Some(sell)) => (name.to_uppercase(), buy, sell),
            _ => continue,
        };
        if name.contains("USD") {
            usd = Some((buy, sell));
        } else if name.contains("EUR") {
            eur = Some((buy, sell));
        }
    }

    match (usd, eur) {
        (Some((usd_buy, usd_sell)), Some((eur_buy, eur_sell))) => BankQuote {
            usd_buy: FieldValue::value(usd_buy),
            usd_sell: FieldValue::value(usd_sell),
            eur_buy: FieldValue::value(eur_buy),
            eur_sell: FieldValue::value(eur_sell),
        },
        _ => BankQuote::all_not_found(),
    }
}
