//! One scanner instance per platform, built once and shared across the
//! life of a run (§4.4: "the orchestrator holds one scanner instance
//! per platform, polymorphic over `PlatformScanner`").

use crate::platforms;
use crate::scanner::PlatformScanner;
use sentinel_domain_models::Platform;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

type Registry = HashMap<Platform, Arc<dyn PlatformScanner>>;

fn build_registry() -> Registry {
    let mut registry: Registry = HashMap::new();
    registry.insert(Platform::Ebay, Arc::new(platforms::ebay::build()));
    registry.insert(Platform::Craigslist, Arc::new(platforms::craigslist::build()));
    registry.insert(Platform::Olx, Arc::new(platforms::olx::build()));
    registry.insert(Platform::Marktplaats, Arc::new(platforms::marktplaats::build()));
    registry.insert(Platform::Mercadolibre, Arc::new(platforms::mercadolibre::build()));
    registry.insert(Platform::Gumtree, Arc::new(platforms::gumtree::build()));
    registry.insert(Platform::Avito, Arc::new(platforms::avito::build()));
    registry.insert(Platform::Aliexpress, Arc::new(platforms::aliexpress::build()));
    registry.insert(Platform::Taobao, Arc::new(platforms::taobao::build()));
    registry.insert(Platform::Mercari, Arc::new(platforms::mercari::build()));
    registry
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Look up the scanner for `platform`. Panics only if a variant is ever
/// added to [`Platform`] without a matching registry entry — a build
/// defect, not a runtime condition.
pub fn scanner_for(platform: Platform) -> Arc<dyn PlatformScanner> {
    REGISTRY
        .get_or_init(build_registry)
        .get(&platform)
        .cloned()
        .unwrap_or_else(|| panic!("no scanner registered for platform {platform}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_has_a_registered_scanner() {
        for platform in Platform::ALL {
            assert_eq!(scanner_for(platform).platform(), platform);
        }
    }
}
