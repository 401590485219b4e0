//! Unit tests for the source extractors

use super::*;
use crate::config::SourceEntry;

fn entry(url: &str) -> SourceEntry {
    SourceEntry {
        url: url.to_string(),
        scale_divisor: None,
    }
}

/// Minimal HTTP server answering every request with 500.
async fn spawn_http_500() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut sock, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = sock.read(&mut buf).await;
                let _ = sock
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\n\
                          content-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            });
        }
    });
    format!("http://{}", addr)
}

#[test]
fn field_value_renders_sentinels() {
    assert_eq!(FieldValue::Error.to_string(), "Ошибка");
    assert_eq!(FieldValue::NotFound.to_string(), "Не найдено");
    assert_eq!(FieldValue::NoData.to_string(), "Нет данных");
    assert_eq!(FieldValue::value("19.45").to_string(), "19.45");
}

#[test]
fn parse_rate_accepts_decimal_comma() {
    assert_eq!(parse_rate("123,45"), Some(123.45));
    assert_eq!(parse_rate(" 4.9720 "), Some(4.972));
    assert_eq!(parse_rate("n/a"), None);
}

#[test]
fn cursbanci_averages_parsable_rows_only() {
    let html = r#"
        <table id="tablecurs"><tbody>
            <tr><th>Bank</th><th>EUR buy</th><th>EUR sell</th><th>USD buy</th><th>USD sell</th></tr>
            <tr><td>Bank A</td><td>4,95</td><td>5,05</td><td>4,55</td><td>4,65</td></tr>
            <tr><td>Bank B</td><td>4,97</td><td>5,07</td><td>4,57</td><td>4,67</td></tr>
            <tr><td>Bank C</td><td>closed</td><td>-</td><td>-</td><td>-</td></tr>
            <tr><td>Bank D</td><td>4,99</td></tr>
        </tbody></table>
    "#;
    let quote = cursbanci::parse(html);
    assert_eq!(quote.eur_buy, FieldValue::value("4.960"));
    assert_eq!(quote.eur_sell, FieldValue::value("5.060"));
    assert_eq!(quote.usd_buy, FieldValue::value("4.560"));
    assert_eq!(quote.usd_sell, FieldValue::value("4.660"));
}

#[test]
fn cursbanci_no_parsable_rows_is_no_data() {
    let html = r#"
        <table id="tablecurs"><tbody>
            <tr><th>Bank</th><th>EUR</th><th>EUR</th><th>USD</th><th>USD</th></tr>
            <tr><td>Bank A</td><td>n/a</td><td>n/a</td><td>n/a</td><td>n/a</td></tr>
        </tbody></table>
    "#;
    assert_eq!(cursbanci::parse(html), BankQuote::all_no_data());
}

#[test]
fn cursbanci_missing_table_is_no_data() {
    // Row-count-driven source: an absent table is just zero rows.
    assert_eq!(cursbanci::parse("<html></html>"), BankQuote::all_no_data());
}

fn kantor_html(usd_buy: &str, usd_sell: &str) -> String {
    format!(
        r#"<div id="kursy"><div><div><div><div><table><tbody>
            <tr><td>1</td><td>USD</td><td>dolar</td><td>{usd_buy}</td><td>{usd_sell}</td></tr>
            <tr><td>2</td><td>GBP</td><td>funt</td><td>501</td><td>512</td></tr>
            <tr><td>3</td><td>CHF</td><td>frank</td><td>441</td><td>452</td></tr>
            <tr><td>4</td><td>EUR</td><td>euro</td><td>426,5</td><td>436,5</td></tr>
        </tbody></table></div></div></div></div></div>"#
    )
}

#[test]
fn kantor_divides_by_scale() {
    let quote = kantor::parse(&kantor_html("35000", "410,5"), 100.0);
    assert_eq!(quote.usd_buy, FieldValue::value("350.000"));
    assert_eq!(quote.usd_sell, FieldValue::value("4.105"));
    assert_eq!(quote.eur_buy, FieldValue::value("4.265"));
    assert_eq!(quote.eur_sell, FieldValue::value("4.365"));
}

#[test]
fn kantor_field_level_failures() {
    // No digits at all -> not found; digits that do not form a number -> error.
    let quote = kantor::parse(&kantor_html("brak", "..,"), 100.0);
    assert_eq!(quote.usd_buy, FieldValue::NotFound);
    assert_eq!(quote.usd_sell, FieldValue::Error);
    assert_eq!(quote.eur_buy, FieldValue::value("4.265"));
}

#[test]
fn kantor_missing_table_is_not_found() {
    assert_eq!(
        kantor::parse("<div id=\"kursy\"></div>", 100.0),
        BankQuote::all_not_found()
    );
}

#[test]
fn kantor_too_few_rows_is_not_found() {
    let html = r#"<div id="kursy"><div><div><div><div><table><tbody>
        <tr><td>1</td><td>USD</td><td>d</td><td>400</td><td>410</td></tr>
    </tbody></table></div></div></div></div></div>"#;
    assert_eq!(kantor::parse(html, 100.0), BankQuote::all_not_found());
}

fn bulbank_html(eur_row: &str, usd_row: &str) -> String {
    format!(
        r#"<div id="main-id"><div><div><div class="index-currency-table"><div><div>
        <table><tbody>
            <tr><td>header</td><td>h</td><td>h</td><td>h</td></tr>
            {eur_row}
            {usd_row}
        </tbody></table>
        </div></div></div></div></div></div>"#
    )
}

#[test]
fn bulbank_parses_fixed_rows() {
    let html = bulbank_html(
        "<tr><td>EUR</td><td>1</td><td>1,9558</td><td>1,9559</td></tr>",
        "<tr><td>USD</td><td>1</td><td>1,79</td><td>1,81</td></tr>",
    );
    let quote = bulbank::parse(&html);
    assert_eq!(quote.usd_buy, FieldValue::value("1.790"));
    assert_eq!(quote.usd_sell, FieldValue::value("1.810"));
    assert_eq!(quote.eur_buy, FieldValue::value("1.956"));
    assert_eq!(quote.eur_sell, FieldValue::value("1.956"));
}

#[test]
fn bulbank_bad_cell_fails_the_currency_pair() {
    let html = bulbank_html(
        "<tr><td>EUR</td><td>1</td><td>n/a</td><td>1,9559</td></tr>",
        "<tr><td>USD</td><td>1</td><td>1,79</td><td>1,81</td></tr>",
    );
    let quote = bulbank::parse(&html);
    assert_eq!(quote.eur_buy, FieldValue::Error);
    assert_eq!(quote.eur_sell, FieldValue::Error);
    assert_eq!(quote.usd_buy, FieldValue::value("1.790"));
}

#[test]
fn bulbank_missing_usd_row_is_partial_not_found() {
    let html = bulbank_html(
        "<tr><td>EUR</td><td>1</td><td>1,9558</td><td>1,9559</td></tr>",
        "",
    );
    let quote = bulbank::parse(&html);
    assert_eq!(quote.usd_buy, FieldValue::NotFound);
    assert_eq!(quote.usd_sell, FieldValue::NotFound);
    assert_eq!(quote.eur_buy, FieldValue::value("1.956"));
}

#[test]
fn bulbank_missing_table_is_not_found() {
    assert_eq!(bulbank::parse("<html></html>"), BankQuote::all_not_found());
}

#[test]
fn noi_passes_cell_text_through() {
    let html = r#"
        <table id="exchange-table"><tbody>
            <tr><td>header</td></tr>
            <tr>
                <td>BNM</td>
                <td><span>17,25</span></td>
                <td>17,45</td>
                <td><span>18,90</span></td>
                <td>19,10</td>
            </tr>
        </tbody></table>
    "#;
    let quote = noi::parse(html);
    // Pre-formatted text passes through, decimal comma included.
    assert_eq!(quote.usd_buy, FieldValue::value("17,25"));
    assert_eq!(quote.usd_sell, FieldValue::value("17,45"));
    assert_eq!(quote.eur_buy, FieldValue::value("18,90"));
    assert_eq!(quote.eur_sell, FieldValue::value("19,10"));
}

#[test]
fn noi_missing_span_is_field_not_found() {
    let html = r#"
        <table id="exchange-table"><tbody>
            <tr><td>header</td></tr>
            <tr><td>BNM</td><td>17,25</td><td>17,45</td><td><span>18,90</span></td><td>19,10</td></tr>
        </tbody></table>
    "#;
    let quote = noi::parse(html);
    // usd_buy expects a span inside the cell.
    assert_eq!(quote.usd_buy, FieldValue::NotFound);
    assert_eq!(quote.usd_sell, FieldValue::value("17,45"));
}

#[test]
fn noi_missing_row_is_not_found() {
    assert_eq!(noi::parse("<html></html>"), BankQuote::all_not_found());
}

fn privat_pair(name: &str, buy: &str, sell: &str) -> String {
    format!(
        r#"<div class="currency-pairs">
            <div class="names"><span>{name}</span></div>
            <div class="purchase"><span>{buy}</span></div>
            <div class="sale"><span>{sell}</span></div>
        </div>"#
    )
}

#[test]
fn privatbank_picks_usd_and_eur_pairs() {
    let html = format!(
        "{}{}{}",
        privat_pair("usd/uah", "41.10", "41.60"),
        privat_pair("PLN/UAH", "10.20", "10.50"),
        privat_pair("EUR/UAH", "44.80", "45.40"),
    );
    let quote = privatbank::parse(&html);
    assert_eq!(quote.usd_buy, FieldValue::value("41.10"));
    assert_eq!(quote.usd_sell, FieldValue::value("41.60"));
    assert_eq!(quote.eur_buy, FieldValue::value("44.80"));
    assert_eq!(quote.eur_sell, FieldValue::value("45.40"));
}

#[test]
fn privatbank_missing_currency_is_not_found() {
    let html = privat_pair("USD/UAH", "41.10", "41.60");
    assert_eq!(privatbank::parse(&html), BankQuote::all_not_found());
}

#[test]
fn privatbank_no_pairs_is_not_found() {
    assert_eq!(
        privatbank::parse("<html></html>"),
        BankQuote::all_not_found()
    );
}

#[test]
fn coingecko_formats_two_decimals() {
    let body = r#"{"bitcoin":{"usd":65000.5},"ethereum":{"usd":3200.25}}"#;
    let quote = coingecko::parse(body);
    assert_eq!(quote.bitcoin, FieldValue::value("65000.50"));
    assert_eq!(quote.ethereum, FieldValue::value("3200.25"));
}

#[test]
fn coingecko_missing_asset_is_not_found() {
    let body = r#"{"bitcoin":{"usd":65000.5}}"#;
    assert_eq!(coingecko::parse(body), CryptoQuote::all_not_found());
}

#[test]
fn coingecko_bad_json_is_error() {
    assert_eq!(coingecko::parse("not json"), CryptoQuote::all_error());
}

#[tokio::test]
async fn bank_fetches_report_error_on_http_500() {
    let base = spawn_http_500().await;
    let http = reqwest::Client::new();
    let source = entry(&base);

    assert_eq!(cursbanci::fetch(&http, &source).await, BankQuote::all_error());
    assert_eq!(kantor::fetch(&http, &source).await, BankQuote::all_error());
    assert_eq!(bulbank::fetch(&http, &source).await, BankQuote::all_error());
    assert_eq!(noi::fetch(&http, &source).await, BankQuote::all_error());
    assert_eq!(
        privatbank::fetch(&http, &source).await,
        BankQuote::all_error()
    );
    assert_eq!(
        coingecko::fetch(&http, &source).await,
        CryptoQuote::all_error()
    );
}

#[tokio::test]
async fn fetches_report_error_on_connection_failure() {
    // Nothing listens on this address.
    let http = reqwest::Client::new();
    let source = entry("http://127.0.0.1:1/");

    assert_eq!(cursbanci::fetch(&http, &source).await, BankQuote::all_error());
    assert_eq!(
        coingecko::fetch(&http, &source).await,
        CryptoQuote::all_error()
    );
}
