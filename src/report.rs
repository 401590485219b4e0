//! Report assembly
//!
//! Fetches all six sources and renders one HTML-formatted message. The
//! sources are mutually independent, so they are fetched concurrently;
//! the template alone fixes the section order. Sentinel fields render
//! exactly like real values, so a broken source shows up as literal
//! text instead of suppressing its section.

use crate::config::SourcesConfig;
use crate::sources::{bulbank, coingecko, cursbanci, kantor, noi, privatbank};
use crate::sources::{BankQuote, CryptoQuote};

/// All quotes for one report, in template order.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub romania: BankQuote,
    pub poland: BankQuote,
    pub bulgaria: BankQuote,
    pub moldova: BankQuote,
    pub ukraine: BankQuote,
    pub crypto: CryptoQuote,
}

/// Fetch every source. A failed source contributes its sentinel quote;
/// it never affects the other fetches.
pub async fn collect(http: &reqwest::Client, sources: &SourcesConfig) -> RateSnapshot {
    let (romania, poland, bulgaria, moldova, ukraine, crypto) = tokio::join!(
        cursbanci::fetch(http, &sources.cursbanci),
        kantor::fetch(http, &sources.kantor),
        bulbank::fetch(http, &sources.bulbank),
        noi::fetch(http, &sources.noi),
        privatbank::fetch(http, &sources.privatbank),
        coingecko::fetch(http, &sources.coingecko),
    );
    RateSnapshot {
        romania,
        poland,
        bulgaria,
        moldova,
        ukraine,
        crypto,
    }
}

/// Build the report text for a snapshot. Deterministic: the same
/// snapshot always renders byte-identical output.
pub fn render(snapshot: &RateSnapshot) -> String {
    let region = |flag: &str, name: &str, quote: &BankQuote| {
        format!(
            "<b>{flag} {name}</b>\n\
             💵 USD: <b>{}</b> / <b>{}</b>\n\
             💶 EUR: <b>{}</b> / <b>{}</b>\n\n",
            quote.usd_buy, quote.usd_sell, quote.eur_buy, quote.eur_sell,
        )
    };

    let mut text = String::new();
    text.push_str(&region("🇷🇴", "ROMANIA", &snapshot.romania));
    text.push_str(&region("🇵🇱", "POLAND", &snapshot.poland));
    text.push_str(&region("🇧🇬", "BULGARIA", &snapshot.bulgaria));
    text.push_str(&region("🇲🇩", "MOLDOVA", &snapshot.moldova));
    text.push_str(&region("🇺🇦", "UKRAINE", &snapshot.ukraine));
    text.push_str(&format!(
        "<b>🔗 Криптовалюты:</b>\n\
         🪙 <b>Bitcoin:</b> <b>{}</b> $\n\
         🔷 <b>Ethereum:</b> <b>{}</b> $",
        snapshot.crypto.bitcoin, snapshot.crypto.ethereum,
    ));
    text
}

/// Convenience for the delivery layer: fetch and render in one call.
pub async fn build(http: &reqwest::Client, sources: &SourcesConfig) -> String {
    render(&collect(http, sources).await)
}
