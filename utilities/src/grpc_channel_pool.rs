use std::{collections::HashMap, str::FromStr, sync::Arc, time::Duration};

use crate::{
    error::{DfsError, DfsResult},
    retry_policy::retry_with_backoff,
};
use tokio::sync::Mutex;
use tonic::transport::{Channel, Endpoint};
use tracing::{Instrument, Span, trace};

/// Bounds applied to every outbound call.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub connect_retries: u8,
    pub retry_base_delay: Duration,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            connect_retries: 3,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

impl ChannelSettings {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: timeout,
            request_timeout: timeout,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct GrpcChannelPool {
    store: Arc<Mutex<HashMap<String, Channel>>>,
    settings: ChannelSettings,
}

impl Default for GrpcChannelPool {
    fn default() -> Self {
        Self::new(ChannelSettings::default())
    }
}

impl GrpcChannelPool {
    pub fn new(settings: ChannelSettings) -> Self {
        Self {
            store: Arc::default(),
            settings,
        }
    }
    pub fn settings(&self) -> ChannelSettings {
        self.settings
    }
    fn endpoint(&self, addrs: &str) -> DfsResult<Endpoint> {
        Ok(Endpoint::from_str(addrs)
            .map_err(|e| {
                DfsError::InvalidArgument(format!(
                    "Error while creating an endpoint {e} for location {addrs}"
                ))
            })?
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout))
    }
    /// Cached channel for `addrs`, connecting (with retries) on first use.
    pub async fn get_channel(&self, addrs: &str) -> DfsResult<Channel> {
        if let Some(chnl) = self.store.lock().await.get(addrs) {
            trace!("Channel already present");
            return Ok(chnl.clone());
        }
        trace!("Creating endpoint for channel since channel is not present already");
        let endpoint = self.endpoint(addrs)?;
        let chnl = retry_with_backoff(
            || {
                async {
                    endpoint.connect().await.map_err(|e| {
                        DfsError::Unreachable(format!("Error while connecting to {addrs}: {e}"))
                    })
                }
                .instrument(Span::current())
            },
            self.settings.connect_retries,
            self.settings.retry_base_delay,
        )
        .await?;
        self.store
            .lock()
            .await
            .insert(addrs.to_owned(), chnl.clone());
        Ok(chnl)
    }
    /// Single connection attempt that bypasses the cache, used by liveness probes.
    pub async fn connect_fresh(&self, addrs: &str) -> DfsResult<Channel> {
        let endpoint = self.endpoint(addrs)?;
        endpoint
            .connect()
            .await
            .map_err(|e| DfsError::Unreachable(format!("Error while connecting to {addrs}: {e}")))
    }
    /// Drops the cached channel so the next call dials again.
    pub async fn evict(&self, addrs: &str) {
        if self.store.lock().await.remove(addrs).is_some() {
            trace!(%addrs, "Evicted channel");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_endpoint() {
        let pool = GrpcChannelPool::default();
        let result = pool.get_channel("not a uri").await;
        assert!(matches!(result, Err(DfsError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn unreachable_peer_is_reported_as_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let pool = GrpcChannelPool::new(ChannelSettings {
            connect_retries: 1,
            ..ChannelSettings::with_timeout(Duration::from_millis(500))
        });
        let result = pool.connect_fresh(&format!("http://127.0.0.1:{port}")).await;
        assert!(matches!(result, Err(DfsError::Unreachable(_))));
        let result = pool.get_channel(&format!("http://127.0.0.1:{port}")).await;
        assert!(matches!(result, Err(DfsError::Unreachable(_))));
    }
}
