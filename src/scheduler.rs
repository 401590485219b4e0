//! Daily report schedule
//!
//! Sends the report to the configured chat once a day at a fixed local
//! wall-clock time. The next occurrence is computed in the configured
//! time zone, so DST transitions shift the send with the clock instead
//! of drifting by an hour.

use crate::config::{SourcesConfig, TelegramConfig};
use crate::error::{BotError, Result};
use crate::notify::Notifier;
use crate::report;
use chrono::{Duration as ChronoDuration, NaiveTime, Utc};
use chrono_tz::Tz;

/// Run the daily send loop forever. Only an invalid time zone or send
/// time in the config is an error; delivery failures are logged and the
/// loop keeps going.
pub async fn run_daily(
    telegram: &TelegramConfig,
    notifier: Notifier,
    http: reqwest::Client,
    sources: SourcesConfig,
) -> Result<()> {
    let tz: Tz = telegram
        .timezone
        .parse()
        .map_err(|_| BotError::UnknownTimeZone(telegram.timezone.clone()))?;
    let send_at = NaiveTime::from_hms_opt(telegram.daily_hour, telegram.daily_minute, 0)
        .ok_or_else(|| {
            BotError::UnknownTimeZone(format!(
                "invalid send time {}:{:02}",
                telegram.daily_hour, telegram.daily_minute
            ))
        })?;

    tracing::info!(
        "Daily report scheduled at {} {} to chat {}",
        send_at,
        tz,
        telegram.chat_id
    );

    loop {
        let wait = until_next(tz, send_at);
        tracing::debug!("Next daily report in {} seconds", wait.as_secs());
        tokio::time::sleep(wait).await;

        let text = report::build(&http, &sources).await;
        match notifier.send(&text).await {
            Ok(()) => tracing::info!("Daily report sent"),
            Err(e) => tracing::error!("Failed to send daily report: {}", e),
        }
    }
}

fn until_next(tz: Tz, send_at: NaiveTime) -> std::time::Duration {
    let now = Utc::now().with_timezone(&tz);
    let today = now.date_naive();
    let mut next = today.and_time(send_at);
    if next <= now.naive_local() {
        next += ChronoDuration::days(1);
    }
    // A DST gap can make the target time not exist locally; fall back
    // to one hour later in that case.
    let next_local = match next.and_local_timezone(tz) {
        chrono::LocalResult::Single(t) => t,
        chrono::LocalResult::Ambiguous(t, _) => t,
        chrono::LocalResult::None => {
            match (next + ChronoDuration::hours(1)).and_local_timezone(tz) {
                chrono::LocalResult::Single(t) | chrono::LocalResult::Ambiguous(t, _) => t,
                chrono::LocalResult::None => now + ChronoDuration::days(1),
            }
        }
    };
    (next_local - now)
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60))
}
