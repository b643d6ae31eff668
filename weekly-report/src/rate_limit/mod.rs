//! Rate limit throttling for the GitLab API.
//!
//! GitLab reports the remaining request budget in `RateLimit-*` response
//! headers. Paginated listings check it between pages and sleep until the
//! window resets when the budget runs low.

mod info;

pub use info::RateLimitInfo;

use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Reads rate limit information from GitLab response headers.
///
/// Returns `None` when the instance does not send the headers (rate limiting
/// disabled) or when they cannot be parsed.
#[must_use]
pub fn from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let read = |name: &str| headers.get(name)?.to_str().ok()?.trim().parse::<u64>().ok();

    Some(RateLimitInfo {
        remaining: u32::try_from(read("ratelimit-remaining")?).unwrap_or(u32::MAX),
        reset: read("ratelimit-reset")?,
        limit: read("ratelimit-limit")
            .and_then(|limit| u32::try_from(limit).ok())
            .unwrap_or(0),
    })
}

/// Waits if the rate limit is low, returning true if we waited.
///
/// This function proactively waits when remaining requests fall below
/// `MIN_REMAINING_THRESHOLD` to avoid hitting hard limits.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    if info.remaining >= MIN_REMAINING_THRESHOLD {
        return false;
    }

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    if info.reset <= now {
        return false;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    let actual_wait = wait_secs.min(MAX_WAIT_SECS);
    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = actual_wait,
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
    true
}
