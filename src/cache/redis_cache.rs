use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::{self, Cmd, ErrorKind, FromRedisValue};
use deadpool_redis::{Config as RedisPoolConfig, Pool, PoolConfig, PoolError, Runtime, Timeouts};
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::{CacheBackend, CacheError, CacheResult};
use crate::config::CacheSettings;

/// Redis-backed cache over a lazily populated connection pool
///
/// Creating the pool never touches the network, so an unreachable server
/// only shows up as failed operations, not as a startup error.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    max_retries: usize,
}

impl RedisCache {
    pub fn new(settings: &CacheSettings) -> CacheResult<Self> {
        let mut cfg = RedisPoolConfig::from_url(settings.url());
        cfg.pool = Some(PoolConfig {
            max_size: settings.pool_size,
            timeouts: Timeouts {
                wait: Some(settings.connect_timeout),
                create: Some(settings.connect_timeout),
                recycle: Some(settings.connect_timeout),
            },
        });
        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;

        Ok(Self {
            pool,
            max_retries: settings.max_retries,
        })
    }

    /// Opens up to `min_idle` connections and returns them to the pool
    ///
    /// Returns the number of connections that were opened successfully.
    pub async fn warm_up(&self, min_idle: usize) -> usize {
        let target = min_idle.min(self.pool.status().max_size);
        let mut tasks = JoinSet::new();
        for _ in 0..target {
            let pool = self.pool.clone();
            tasks.spawn(async move { pool.get().await });
        }

        // Hold every connection until all are open so each task gets a distinct one.
        let mut held = Vec::with_capacity(target);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(conn)) => held.push(conn),
                Ok(Err(e)) => debug!(error = %e, "cache warm-up connection failed"),
                Err(e) => debug!(error = %e, "cache warm-up task failed"),
            }
        }

        let opened = held.len();
        drop(held);

        let status = self.pool.status();
        info!(opened, pooled = status.size, available = status.available, "cache pool warmed up");
        opened
    }

    async fn query<T>(&self, cmd: &Cmd) -> CacheResult<T>
    where
        T: FromRedisValue + Send,
    {
        let mut attempt = 0;
        loop {
            let result = match self.pool.get().await {
                Ok(mut conn) => cmd.query_async::<_, T>(&mut conn).await.map_err(CacheError::from),
                Err(e) => Err(CacheError::from(e)),
            };

            match result {
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    debug!(attempt, error = %e, "retrying cache command");
                    tokio::time::sleep(backoff(attempt)).await;
                }
                other => return other,
            }
        }
    }
}

/// Connection-level failures are worth retrying; server replies are not
fn is_retryable(err: &CacheError) -> bool {
    match err {
        CacheError::Pool(PoolError::Timeout(_)) | CacheError::Pool(PoolError::Backend(_)) => true,
        CacheError::Pool(_) | CacheError::CreatePool(_) => false,
        CacheError::Redis(e) => e.is_io_error() || e.kind() == ErrorKind::IoError,
    }
}

/// 8ms, 16ms, 32ms ... capped at 512ms
fn backoff(attempt: usize) -> Duration {
    let shift = attempt.saturating_sub(1).min(6) as u32;
    Duration::from_millis(8u64 << shift)
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query(&cmd).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("EX").arg(ttl.as_secs().max(1));
        self.query(&cmd).await
    }

    async fn ping(&self) -> CacheResult<()> {
        let cmd = redis::cmd("PING");
        let _: String = self.query(&cmd).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
