//! Currency & Crypto Rates Telegram Bot
//!
//! Fetches exchange rates from five regional bank/exchange pages and
//! crypto prices from CoinGecko, renders them into one HTML-formatted
//! report, and delivers it over Telegram on demand or on a daily
//! schedule.
//!
//! ## Architecture
//!
//! ```text
//! Telegram (/rate) ─┐
//!                   ├─→ Report Builder ─→ Source Extractors (×6, concurrent)
//! Daily Scheduler ──┘         │
//!                             └─→ rendered HTML ─→ sendMessage
//! ```
//!
//! Extractors never fail outward: every network, markup, or parse
//! problem becomes a sentinel string inside the report.

pub mod config;
pub mod error;
pub mod notify;
pub mod report;
pub mod scheduler;
pub mod sources;
pub mod telegram;
