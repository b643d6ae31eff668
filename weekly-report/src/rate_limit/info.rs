//! Rate limit information.

/// Request budget reported by GitLab for the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window, `0` when not reported.
    pub limit: u32,
}
