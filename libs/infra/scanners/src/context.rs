//! Shared state every platform scanner call borrows (§5 "Shared
//! resources"): one HTTP client, a global outbound concurrency cap,
//! and a per-platform throttle.

use crate::throttle::PlatformThrottle;
use reqwest::Client;
use sentinel_domain_models::Platform;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

/// eBay's official search API credentials (§4.4 "Per-platform
/// notes"); when present the eBay scanner prefers the API path over
/// HTML scraping.
#[derive(Debug, Clone, Default)]
pub struct EbayCredentials {
    pub app_id: String,
    pub cert_id: String,
}

pub struct ScanContext {
    pub client: Client,
    /// Global outbound concurrency cap (§5, default 16).
    pub global_semaphore: Arc<Semaphore>,
    per_platform: HashMap<Platform, PlatformThrottle>,
    pub ebay_credentials: Option<EbayCredentials>,
}

impl ScanContext {
    pub fn new(global_concurrency: usize, ebay_credentials: Option<EbayCredentials>) -> ScanContext {
        let mut per_platform = HashMap::new();
        for platform in Platform::ALL {
            per_platform.insert(platform, PlatformThrottle::new(default_concurrency(platform), default_delay_ms(platform)));
        }
        ScanContext {
            client: crate::client::build_client(),
            global_semaphore: Arc::new(Semaphore::new(global_concurrency.max(1))),
            per_platform,
            ebay_credentials,
        }
    }

    pub fn throttle(&self, platform: Platform) -> &PlatformThrottle {
        self.per_platform.get(&platform).expect("every platform has a throttle entry")
    }

    /// Sleep for a jittered delay within the platform's current delay
    /// range (§5, widened by back-pressure if it has triggered).
    pub async fn pace(&self, platform: Platform) {
        let (low, high) = self.throttle(platform).delay_range();
        let high = high.max(low + 1);
        let millis = rand::Rng::gen_range(&mut rand::thread_rng(), low..high);
        sleep(Duration::from_millis(millis)).await;
    }
}

/// Per-host token bucket size (§5: 2-4 concurrent requests per
/// platform); AliExpress/Taobao run smaller to reduce block rates
/// (§4.4 "Per-platform notes").
fn default_concurrency(platform: Platform) -> usize {
    match platform {
        Platform::Aliexpress | Platform::Taobao => 2,
        _ => 4,
    }
}

/// Per-request delay range in milliseconds (§5: 2-4 seconds default).
fn default_delay_ms(platform: Platform) -> (u64, u64) {
    match platform {
        Platform::Aliexpress | Platform::Taobao => (4000, 7000),
        _ => (2000, 4000),
    }
}
