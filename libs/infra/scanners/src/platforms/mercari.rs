//! Mercari: search results only render via client-side JavaScript; see
//! [`super::headless_unavailable`].

use super::headless_unavailable::HeadlessUnavailableScanner;
use sentinel_domain_models::Platform;

pub fn build() -> HeadlessUnavailableScanner {
    HeadlessUnavailableScanner::new(Platform::Mercari)
}
