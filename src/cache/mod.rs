use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};

/// Thin JSON-over-Redis cache for the hot read path, the contractor
/// browse listing. Every caller treats cache failures as a miss and
/// falls back to the database.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Delete every key matching a glob pattern.
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let mut cmd = redis::cmd("DEL");
            for key in &keys {
                cmd.arg(key);
            }
            cmd.query_async::<_, ()>(&mut self.connection.clone()).await?;
        }
        Ok(())
    }
}

/// Drop every cached browse listing variant, whatever quality filter or
/// search term it was keyed under. Called on any land mutation and on
/// the contract transitions that flip `is_lended` — a lended parcel must
/// not linger in a filtered listing for the rest of its TTL.
pub async fn invalidate_browse(cache: &RedisCache) {
    if let Err(e) = cache.delete_pattern(keys::AVAILABLE_LANDS_PATTERN).await {
        tracing::warn!("Cache invalidation failed: {e}");
    }
}

/// Cache key builders, one place so invalidation can't drift from reads.
pub mod keys {
    /// Glob covering every browse listing variant.
    pub const AVAILABLE_LANDS_PATTERN: &str = "lands:available:*";

    /// The contractor browse listing for a given quality filter + search.
    pub fn available_lands(quality: Option<&str>, search: Option<&str>) -> String {
        format!(
            "lands:available:{}:{}",
            quality.unwrap_or("all"),
            search.unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::keys;

    #[test]
    fn browse_keys_distinguish_filters() {
        assert_eq!(keys::available_lands(None, None), "lands:available:all:");
        assert_eq!(
            keys::available_lands(Some("good"), None),
            "lands:available:good:"
        );
        assert_ne!(
            keys::available_lands(Some("good"), Some("wheat")),
            keys::available_lands(Some("good"), None)
        );
    }

    /// Invalidation uses the glob pattern, so every key the read path can
    /// produce — filtered or not — must fall under it. A filtered listing
    /// that escaped the pattern would keep serving lended parcels until
    /// its TTL ran out.
    #[test]
    fn browse_pattern_covers_every_filter_variant() {
        let prefix = keys::AVAILABLE_LANDS_PATTERN
            .strip_suffix('*')
            .expect("pattern must end in a glob");

        for key in [
            keys::available_lands(None, None),
            keys::available_lands(Some("good"), None),
            keys::available_lands(None, Some("wheat")),
            keys::available_lands(Some("poor"), Some("rice paddy")),
        ] {
            assert!(key.starts_with(prefix), "key {key} escapes invalidation");
        }
    }
}
