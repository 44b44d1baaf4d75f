//! HTTP client module
//!
//! Provides the Notion transport with retry, rate limiting, and backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: 409/5xx, timeouts and connection errors retry with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Retry-After**: HTTP 429 responses wait the server-provided delay
//! - **Notion errors**: Error bodies are parsed into `Error::Api`

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_BASE_URL,
    DEFAULT_NOTION_VERSION,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
