//! Policy Cache - demo driver
//!
//! Builds a cache from environment configuration, replays a read-through
//! workload of a small hot set mixed with a cold scan, and prints the
//! resulting statistics as JSON.

use std::env;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{Cache, Config};

/// Number of keys that are requested over and over
const HOT_KEYS: u64 = 8;

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let ops: u64 = env_or("DEMO_OPS", 10_000);
    let key_space: u64 = env_or("DEMO_KEYS", default_key_space(config.capacity));
    info!(
        "Configuration loaded: policy={}, capacity={}, ops={}, key_space={}",
        config.policy, config.capacity, ops, key_space
    );

    let cache: Cache<u64, String> =
        Cache::from_config(&config).context("failed to build cache from configuration")?;

    for i in 0..ops {
        // Three of every four requests hit the hot set, the rest walk the key space
        let key = if i % 4 == 0 {
            HOT_KEYS + i / 4 % key_space.max(1)
        } else {
            i % HOT_KEYS
        };
        if cache.lookup(&key).is_none() {
            cache.insert(key, format!("value-{key}"));
        }
    }

    let stats = cache.stats();
    info!(
        "Replay finished: hit_rate={:.3}, evictions={}",
        stats.hit_rate(),
        stats.evictions
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

/// Walks four times the cache's capacity, so the scan always overflows it.
fn default_key_space(capacity: usize) -> u64 {
    u64::try_from(capacity).unwrap_or(u64::MAX).saturating_mul(4)
}

fn env_or(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_space() {
        assert_eq!(default_key_space(1000), 4000);
        assert_eq!(default_key_space(usize::MAX), u64::MAX);
        assert_eq!(default_key_space(usize::MAX / 4 + 1), u64::MAX);
    }
}
