//! Invocation configuration (§6 "Invocation surface"): CLI flags with
//! environment-variable fallbacks, resolved into the strongly-typed
//! values the engine operates on. A resolution failure is always a
//! `ConfigError`, which `main` maps to exit code 10.

use clap::Parser;
use sentinel_domain_models::{Platform, ThreatDomain};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),
    #[error("invalid --threat-domain value: {0:?} (expected wildlife or human_trafficking)")]
    InvalidDomain(String),
    #[error("invalid --platforms entry: {0:?}")]
    InvalidPlatform(String),
    #[error("--platforms resolved to an empty set")]
    EmptyPlatformSet,
    #[error("--group-id must be >= 1")]
    InvalidGroupId,
    #[error("--batch-size must be in 1..=200, got {0}")]
    InvalidBatchSize(u32),
    #[error("invalid --priority-platform value: {0:?}")]
    InvalidPriorityPlatform(String),
}

/// Raw command-line surface, every flag readable from an environment
/// variable so the CI/cron driver (§1, out of this crate's scope) can
/// configure a run without building an argv line.
#[derive(Parser, Debug)]
#[command(
    name = "sentinel-scan",
    version,
    about = "Single-invocation marketplace crawler: scans a keyword batch across the platform set, scores, and persists detections."
)]
pub struct Cli {
    /// Worker-group identity (disjoint keyword partitioning, §4.5).
    #[arg(long, env = "SENTINEL_GROUP_ID")]
    pub group_id: u32,

    /// Keywords to process this invocation, 1..=200. Defaults to a
    /// domain-specific value (50 for wildlife, 15 for human_trafficking)
    /// when omitted.
    #[arg(long, env = "SENTINEL_BATCH_SIZE")]
    pub batch_size: Option<u32>,

    /// Comma-separated platform tags, or "all".
    #[arg(long, env = "SENTINEL_PLATFORMS", default_value = "all")]
    pub platforms: String,

    /// wildlife | human_trafficking
    #[arg(long, env = "SENTINEL_THREAT_DOMAIN")]
    pub threat_domain: String,

    /// Wall-clock budget for this invocation, in seconds.
    #[arg(long, env = "SENTINEL_DURATION_SECONDS", default_value_t = 900)]
    pub duration_seconds: u64,

    /// A platform tag to drain first, or "auto" to leave queue order
    /// untouched.
    #[arg(long, env = "SENTINEL_PRIORITY_PLATFORM", default_value = "auto")]
    pub priority_platform: String,

    /// Days in the past a detection's observed_at may trail; >0 marks
    /// every Detection this invocation persists as backfill=true.
    #[arg(long, env = "SENTINEL_BACKFILL_DAYS", default_value_t = 0)]
    pub backfill_days: u32,

    /// Directory for the keyword cursor, dedupe snapshot, and run
    /// summary JSON documents (§6 "Persistent state layout").
    #[arg(long, env = "KEYWORD_STATE_DIR", default_value = ".")]
    pub state_dir: PathBuf,

    #[arg(long, env = "STORE_URL")]
    pub store_url: Option<String>,

    #[arg(long, env = "STORE_API_KEY")]
    pub store_api_key: Option<String>,

    #[arg(long, env = "PLATFORM_EBAY_APP_ID")]
    pub ebay_app_id: Option<String>,

    #[arg(long, env = "PLATFORM_EBAY_CERT_ID")]
    pub ebay_cert_id: Option<String>,
}

/// The validated, strongly-typed form of [`Cli`] the engine consumes.
pub struct RunConfig {
    pub group_id: u32,
    pub batch_size: u32,
    pub platforms: Vec<Platform>,
    pub threat_domain: ThreatDomain,
    pub duration_seconds: u64,
    pub priority_platform: Option<Platform>,
    /// Days in the past the Persistence Adapter accepts an
    /// `observed_at` for (§4.7); 0 disables backfill mode entirely.
    pub backfill_days: u32,
    pub state_dir: PathBuf,
    pub store_url: String,
    pub store_api_key: String,
    pub ebay_app_id: Option<String>,
    pub ebay_cert_id: Option<String>,
}

impl RunConfig {
    pub fn resolve(cli: Cli) -> Result<RunConfig, ConfigError> {
        if cli.group_id < 1 {
            return Err(ConfigError::InvalidGroupId);
        }

        let threat_domain =
            ThreatDomain::parse(&cli.threat_domain).ok_or_else(|| ConfigError::InvalidDomain(cli.threat_domain.clone()))?;

        let batch_size = cli.batch_size.unwrap_or(match threat_domain {
            ThreatDomain::Wildlife => 50,
            ThreatDomain::HumanTrafficking => 15,
        });
        if !(1..=200).contains(&batch_size) {
            return Err(ConfigError::InvalidBatchSize(batch_size));
        }

        let platforms = parse_platforms(&cli.platforms)?;

        // "auto" carries no resolvable signal in this deployment (no
        // platform-health feed to decide from) and is treated as "no
        // reordering" rather than guessed at.
        let priority_platform = match cli.priority_platform.trim() {
            "auto" => None,
            tag => Some(Platform::parse(tag).ok_or_else(|| ConfigError::InvalidPriorityPlatform(tag.to_string()))?),
        };

        let store_url = cli.store_url.ok_or(ConfigError::MissingCredential("STORE_URL"))?;
        let store_api_key = cli.store_api_key.ok_or(ConfigError::MissingCredential("STORE_API_KEY"))?;

        Ok(RunConfig {
            group_id: cli.group_id,
            batch_size,
            platforms,
            threat_domain,
            duration_seconds: cli.duration_seconds,
            priority_platform,
            backfill_days: cli.backfill_days,
            state_dir: cli.state_dir,
            store_url,
            store_api_key,
            ebay_app_id: cli.ebay_app_id,
            ebay_cert_id: cli.ebay_cert_id,
        })
    }
}

fn parse_platforms(raw: &str) -> Result<Vec<Platform>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(Platform::ALL.to_vec());
    }

    let mut platforms = Vec::new();
    for tag in trimmed.split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        platforms.push(Platform::parse(tag).ok_or_else(|| ConfigError::InvalidPlatform(tag.to_string()))?);
    }

    if platforms.is_empty() {
        return Err(ConfigError::EmptyPlatformSet);
    }
    Ok(platforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keyword_expands_to_the_closed_platform_set() {
        assert_eq!(parse_platforms("all").unwrap().len(), Platform::ALL.len());
    }

    #[test]
    fn csv_parses_and_trims_each_tag() {
        let platforms = parse_platforms(" ebay, craigslist ,olx").unwrap();
        assert_eq!(platforms, vec![Platform::Ebay, Platform::Craigslist, Platform::Olx]);
    }

    #[test]
    fn unknown_tag_is_a_config_error() {
        assert!(matches!(parse_platforms("ebay,zzz"), Err(ConfigError::InvalidPlatform(_))));
    }

    #[test]
    fn batch_size_defaults_by_domain_when_unset() {
        let cli = Cli {
            group_id: 1,
            batch_size: None,
            platforms: "all".into(),
            threat_domain: "human_trafficking".into(),
            duration_seconds: 60,
            priority_platform: "auto".into(),
            backfill_days: 0,
            state_dir: PathBuf::from("."),
            store_url: Some("https://store.example".into()),
            store_api_key: Some("key".into()),
            ebay_app_id: None,
            ebay_cert_id: None,
        };
        let resolved = RunConfig::resolve(cli).unwrap();
        assert_eq!(resolved.batch_size, 15);
    }

    #[test]
    fn auto_priority_platform_resolves_to_none() {
        let cli = Cli {
            group_id: 1,
            batch_size: Some(10),
            platforms: "all".into(),
            threat_domain: "wildlife".into(),
            duration_seconds: 60,
            priority_platform: "auto".into(),
            backfill_days: 0,
            state_dir: PathBuf::from("."),
            store_url: Some("https://store.example".into()),
            store_api_key: Some("key".into()),
            ebay_app_id: None,
            ebay_cert_id: None,
        };
        let resolved = RunConfig::resolve(cli).unwrap();
        assert!(resolved.priority_platform.is_none());
    }

    #[test]
    fn missing_store_credentials_is_a_config_error() {
        let cli = Cli {
            group_id: 1,
            batch_size: Some(10),
            platforms: "all".into(),
            threat_domain: "wildlife".into(),
            duration_seconds: 60,
            priority_platform: "auto".into(),
            backfill_days: 0,
            state_dir: PathBuf::from("."),
            store_url: None,
            store_api_key: Some("key".into()),
            ebay_app_id: None,
            ebay_cert_id: None,
        };
        assert!(matches!(RunConfig::resolve(cli), Err(ConfigError::MissingCredential("STORE_URL"))));
    }
}
