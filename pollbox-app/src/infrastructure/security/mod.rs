mod rate_limiter;

pub use rate_limiter::{InMemoryStore, RateLimitConfig, RateLimitStore, RateLimiter, WindowEntry};
