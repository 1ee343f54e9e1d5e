use dashmap::DashMap;
use pollbox_errors::AppError;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const DEFAULT_MAX_REQUESTS: u32 = 100;
const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WindowEntry {
    pub count: u32,
    pub window_end: Instant,
}

/// key -> (count, window end) map behind an interface, so the in-memory map
/// can be swapped for a shared cache in a multi-instance deployment.
pub trait RateLimitStore: Send + Sync {
    fn load(&self, key: IpAddr) -> Option<WindowEntry>;
    fn save(&self, key: IpAddr, entry: WindowEntry);
    fn evict_expired(&self, now: Instant);
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: DashMap<IpAddr, WindowEntry>,
}

impl RateLimitStore for InMemoryStore {
    fn load(&self, key: IpAddr) -> Option<WindowEntry> {
        self.entries.get(&key).map(|e| *e)
    }

    fn save(&self, key: IpAddr, entry: WindowEntry) {
        self.entries.insert(key, entry);
    }

    fn evict_expired(&self, now: Instant) {
        self.entries.retain(|_, e| e.window_end > now);
    }
}

/// Fixed-window request counter keyed by client address. Process-local and
/// best-effort: state is not shared across instances and resets on restart.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn RateLimitStore>,
    last_eviction: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::default()))
    }

    pub fn with_store(config: RateLimitConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self {
            config,
            store,
            last_eviction: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Count one request from `ip`; rejects with a retry-after hint once the
    /// window's budget is spent.
    pub fn check(&self, ip: IpAddr) -> Result<(), AppError> {
        let now = Instant::now();
        self.maybe_evict(now);

        let mut entry = self.store.load(ip).unwrap_or(WindowEntry {
            count: 0,
            window_end: now + self.config.window,
        });

        if now >= entry.window_end {
            entry.count = 0;
            entry.window_end = now + self.config.window;
        }

        entry.count += 1;
        self.store.save(ip, entry);

        if entry.count > self.config.max_requests {
            let retry_after = entry
                .window_end
                .saturating_duration_since(now)
                .as_secs()
                .max(1);
            tracing::warn!("Rate limit exceeded for {ip}, retry in {retry_after}s");
            return Err(AppError::RateLimitExceeded { retry_after });
        }

        Ok(())
    }

    // No background sweep; stale keys go on the next request that lands
    // after the eviction interval.
    fn maybe_evict(&self, now: Instant) {
        let mut last = self.last_eviction.lock().unwrap();
        if now.duration_since(*last) > self.config.window {
            self.store.evict_expired(now);
            *last = now;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
