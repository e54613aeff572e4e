//! Client for the remote rate-config store.
//!
//! Fetches per-service rate tables with retry, caches them in-process with a
//! TTL (the debounce window for rapid consecutive edits), and degrades
//! silently to the static fallback tables when the store is unreachable or
//! returns malformed data. A fetch failure is never surfaced to the caller
//! as an error; the salesperson keeps working offline from the store.

use anyhow::{Context, Result};
use backoff::ExponentialBackoffBuilder;
use futures::future::join_all;
use parking_lot::RwLock;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::domain::rates::RateBook;
use crate::domain::service::ServiceKind;

/// Where a service's rate table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Remote,
    Fallback,
}

pub type SourceMap = HashMap<ServiceKind, RateSource>;

#[derive(Debug, Clone)]
struct CachedBook {
    book: RateBook,
    sources: SourceMap,
    fetched_at: Instant,
    generation: u64,
}

/// Rate-store client with an in-process TTL cache.
#[derive(Clone)]
pub struct RatesClient {
    client: Client,
    base_url: String,
    ttl: Duration,
    cache: Arc<RwLock<Option<CachedBook>>>,
    // Monotonic fetch generation; a slow stale fetch can never overwrite a
    // newer one (last-write-wins).
    generation: Arc<AtomicU64>,
}

impl RatesClient {
    pub fn new(base_url: &str, timeout_seconds: u64, cache_ttl_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, "Rate store client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl: Duration::from_secs(cache_ttl_seconds),
            cache: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Client whose cache starts loaded with the fallback tables. Used when
    /// the store is known to be absent (offline demos, tests); the TTL still
    /// governs when a real fetch is attempted.
    pub fn preloaded(base_url: &str, cache_ttl_seconds: u64) -> Result<Self> {
        let client = Self::new(base_url, 1, cache_ttl_seconds)?;
        let sources: SourceMap = ServiceKind::ALL
            .into_iter()
            .map(|kind| (kind, RateSource::Fallback))
            .collect();
        *client.cache.write() = Some(CachedBook {
            book: RateBook::fallback(),
            sources,
            fetched_at: Instant::now(),
            generation: 0,
        });
        Ok(client)
    }

    /// Check rate store reachability.
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Rate store health check failed")?
            .error_for_status()
            .context("Rate store unhealthy")?;
        Ok(())
    }

    /// Current rate book: cached when fresh, refetched when the TTL lapsed.
    pub async fn rate_book(&self) -> (RateBook, SourceMap) {
        if let Some(cached) = self.cache.read().as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return (cached.book.clone(), cached.sources.clone());
            }
        }
        self.refresh().await
    }

    /// Fetch fresh tables for every service, falling back per service on
    /// failure, and install the result unless a newer fetch already landed.
    pub async fn refresh(&self) -> (RateBook, SourceMap) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetches = ServiceKind::ALL
            .into_iter()
            .map(|kind| async move { (kind, self.fetch_service(kind).await) });
        let responses = join_all(fetches).await;

        let mut book = RateBook::fallback();
        let mut sources = SourceMap::new();
        for (kind, response) in responses {
            let applied = response
                .map(|value| apply_table(&mut book, kind, value))
                .unwrap_or(false);
            let source = if applied {
                RateSource::Remote
            } else {
                RateSource::Fallback
            };
            sources.insert(kind, source);
        }

        let mut cache = self.cache.write();
        let stale = cache
            .as_ref()
            .map(|c| c.generation > generation)
            .unwrap_or(false);
        if !stale {
            *cache = Some(CachedBook {
                book: book.clone(),
                sources: sources.clone(),
                fetched_at: Instant::now(),
                generation,
            });
        } else {
            debug!(generation, "Discarding stale rate fetch");
        }

        (book, sources)
    }

    async fn fetch_service(&self, kind: ServiceKind) -> Option<Value> {
        let url = format!("{}/v1/rates/{}", self.base_url, kind.key());
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(200))
            .with_max_elapsed_time(Some(Duration::from_secs(3)))
            .build();

        let result = backoff::future::retry(backoff, || async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(backoff::Error::transient)?;
            response
                .error_for_status()
                .map_err(backoff::Error::transient)?
                .json::<Value>()
                .await
                .map_err(backoff::Error::permanent)
        })
        .await;

        match result {
            Ok(value) => {
                debug!(service = %kind, "Fetched rate table");
                Some(value)
            }
            Err(e) => {
                warn!(service = %kind, error = %e, "Rate fetch failed, using fallback table");
                None
            }
        }
    }
}

/// Deserialize a remote table into its slot. Malformed payloads leave the
/// fallback in place.
fn apply_table(book: &mut RateBook, kind: ServiceKind, value: Value) -> bool {
    fn set<T: serde::de::DeserializeOwned>(slot: &mut T, kind: ServiceKind, value: Value) -> bool {
        match serde_json::from_value(value) {
            Ok(table) => {
                *slot = table;
                true
            }
            Err(e) => {
                warn!(service = %kind, error = %e, "Malformed rate table, using fallback");
                false
            }
        }
    }

    match kind {
        ServiceKind::SaniClean => set(&mut book.sani_clean, kind, value),
        ServiceKind::SaniScrub => set(&mut book.sani_scrub, kind, value),
        ServiceKind::RpmWindows => set(&mut book.rpm_windows, kind, value),
        ServiceKind::PowerScrub => set(&mut book.power_scrub, kind, value),
        ServiceKind::Janitorial => set(&mut book.janitorial, kind, value),
        ServiceKind::Sanipod => set(&mut book.sanipod, kind, value),
        ServiceKind::FoamingDrain => set(&mut book.foaming_drain, kind, value),
        ServiceKind::CarpetClean => set(&mut book.carpet_clean, kind, value),
        ServiceKind::StripWax => set(&mut book.strip_wax, kind, value),
        ServiceKind::GreaseTrap => set(&mut book.grease_trap, kind, value),
        ServiceKind::Electrostatic => set(&mut book.electrostatic, kind, value),
        ServiceKind::Microfiber => set(&mut book.microfiber, kind, value),
    }
}
