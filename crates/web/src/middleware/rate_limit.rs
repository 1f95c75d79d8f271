//! Sliding-window request limiter keyed by client IP.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use tokio::task::JoinHandle;

use crate::config::RateLimitConfig;
use crate::error::WebError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Time until the oldest hit in the window expires.
    pub retry_after: Duration,
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    hits: Arc<DashMap<IpAddr, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            hits: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Records a hit for `key` unless the window is already full.
    pub fn check(&self, key: IpAddr, now: Instant) -> RateLimitResult {
        let window = self.config.window;
        let mut entry = self.hits.entry(key).or_default();
        let hits = entry.value_mut();

        while hits
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= window)
        {
            hits.pop_front();
        }

        let retry_after = |hits: &VecDeque<Instant>| {
            hits.front()
                .map(|t| window.saturating_sub(now.saturating_duration_since(*t)))
                .unwrap_or_default()
        };

        if hits.len() >= self.config.max_requests as usize {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                retry_after: retry_after(hits),
            };
        }

        hits.push_back(now);
        RateLimitResult {
            allowed: true,
            remaining: self.config.max_requests - hits.len() as u32,
            retry_after: retry_after(hits),
        }
    }

    /// Drops hits older than the window and forgets idle clients.
    pub fn prune(&self, now: Instant) {
        let window = self.config.window;
        self.hits.retain(|_, hits| {
            hits.retain(|t| now.saturating_duration_since(*t) < window);
            !hits.is_empty()
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }

    /// Prunes on a fixed interval for the life of the process.
    pub fn spawn_pruner(&self, every: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                limiter.prune(Instant::now());
                tracing::trace!(clients = limiter.tracked_clients(), "Pruned rate limiter");
            }
        })
    }
}

fn client_ip(req: &Request) -> IpAddr {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let ip = client_ip(&req);
    let result = limiter.check(ip, Instant::now());

    if !result.allowed {
        tracing::warn!(%ip, path = %req.uri().path(), "Rate limit exceeded");
        return Err(WebError::TooManyRequests {
            retry_after_secs: result.retry_after.as_secs().max(1),
        });
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(secs),
        })
    }

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = limiter(3, 60);
        let now = Instant::now();

        assert_eq!(limiter.check(IP, now).remaining, 2);
        assert_eq!(limiter.check(IP, now).remaining, 1);
        assert_eq!(limiter.check(IP, now).remaining, 0);

        let blocked = limiter.check(IP, now);
        assert!(!blocked.allowed);
        assert_eq!(blocked.retry_after, Duration::from_secs(60));
    }

    #[test]
    fn test_window_slides() {
        let limiter = limiter(2, 10);
        let start = Instant::now();

        assert!(limiter.check(IP, start).allowed);
        assert!(limiter.check(IP, start + Duration::from_secs(5)).allowed);
        assert!(!limiter.check(IP, start + Duration::from_secs(9)).allowed);

        // First hit has left the window, second has not.
        let later = limiter.check(IP, start + Duration::from_secs(10));
        assert!(later.allowed);
        assert_eq!(later.remaining, 0);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        let now = Instant::now();
        let other = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        assert!(limiter.check(IP, now).allowed);
        assert!(!limiter.check(IP, now).allowed);
        assert!(limiter.check(other, now).allowed);
    }

    #[test]
    fn test_rejected_hits_do_not_extend_window() {
        let limiter = limiter(1, 10);
        let start = Instant::now();

        assert!(limiter.check(IP, start).allowed);
        assert!(!limiter.check(IP, start + Duration::from_secs(9)).allowed);
        assert!(limiter.check(IP, start + Duration::from_secs(10)).allowed);
    }

    #[test]
    fn test_prune_forgets_idle_clients() {
        let limiter = limiter(5, 10);
        let start = Instant::now();
        limiter.check(IP, start);
        assert_eq!(limiter.tracked_clients(), 1);

        limiter.prune(start + Duration::from_secs(5));
        assert_eq!(limiter.tracked_clients(), 1);

        limiter.prune(start + Duration::from_secs(11));
        assert_eq!(limiter.tracked_clients(), 0);
    }
}
