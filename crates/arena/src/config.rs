//! Arena configuration.

use crate::api::{ArenaError, Result};

/// Configuration shared across the arena orchestrator and its workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of long-lived workers (bounded parallelism).
    pub workers: usize,
    /// Matches allowed to wait in the queue; running matches do not count.
    pub max_queue_size: usize,
    /// Capacity of the lifecycle event broadcast channel.
    pub event_buffer_size: usize,
}

impl ArenaConfig {
    pub const DEFAULT_WORKERS: usize = 3;
    pub const DEFAULT_MAX_QUEUE_SIZE: usize = 100;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

    pub const ENV_WORKERS: &'static str = "ARENA_WORKERS";
    pub const ENV_MAX_QUEUE: &'static str = "ARENA_MAX_QUEUE";
    pub const ENV_EVENT_BUFFER: &'static str = "ARENA_EVENT_BUFFER";

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_queue_size(mut self, max_queue_size: usize) -> Self {
        self.max_queue_size = max_queue_size;
        self
    }

    /// Defaults overridden by `ARENA_WORKERS`, `ARENA_MAX_QUEUE` and
    /// `ARENA_EVENT_BUFFER` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &'static str, default: usize| -> Result<usize> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => match value.trim().parse::<usize>() {
                    Ok(parsed) if parsed > 0 => Ok(parsed),
                    _ => Err(ArenaError::InvalidConfig { key, value }),
                },
            }
        };

        Ok(Self {
            workers: read(Self::ENV_WORKERS, Self::DEFAULT_WORKERS)?,
            max_queue_size: read(Self::ENV_MAX_QUEUE, Self::DEFAULT_MAX_QUEUE_SIZE)?,
            event_buffer_size: read(Self::ENV_EVENT_BUFFER, Self::DEFAULT_EVENT_BUFFER_SIZE)?,
        })
    }

    /// Rejects zero-sized pools and buffers.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (Self::ENV_WORKERS, self.workers),
            (Self::ENV_MAX_QUEUE, self.max_queue_size),
            (Self::ENV_EVENT_BUFFER, self.event_buffer_size),
        ];
        for (key, value) in fields {
            if value == 0 {
                return Err(ArenaError::InvalidConfig {
                    key,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            workers: Self::DEFAULT_WORKERS,
            max_queue_size: Self::DEFAULT_MAX_QUEUE_SIZE,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        let config = ArenaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.workers, 3);
        assert_eq!(config.max_queue_size, 100);
    }

    #[test]
    fn reads_overrides() {
        let config =
            ArenaConfig::from_lookup(lookup(&[("ARENA_WORKERS", "8"), ("ARENA_MAX_QUEUE", " 5 ")]))
                .unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.max_queue_size, 5);
        assert_eq!(config.event_buffer_size, ArenaConfig::DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn rejects_unparsable_or_zero() {
        assert_eq!(
            ArenaConfig::from_lookup(lookup(&[("ARENA_WORKERS", "many")])),
            Err(ArenaError::InvalidConfig {
                key: "ARENA_WORKERS",
                value: "many".into(),
            })
        );
        assert!(ArenaConfig::from_lookup(lookup(&[("ARENA_EVENT_BUFFER", "0")])).is_err());
        assert!(ArenaConfig::default().with_workers(0).validate().is_err());
    }
}
