//! Offline cache worker.
//!
//! The caching behavior of the service worker, modeled as an explicit
//! state machine over pluggable cache and network backends so every
//! lifecycle event can be driven in isolation. Install pre-populates
//! the shell bucket and activate garbage-collects stale buckets before
//! claiming open clients. Fetch answers cache-first, with the network
//! as fallback and the cached shell document as last resort.
//!
//! The wasm-side glue at the bottom only registers the worker script;
//! a missing registration is logged, never fatal.

use crate::config;
use crate::logging;

/// Lifecycle phase of the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerPhase {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    /// Install failed; a new worker generation must replace this one.
    Redundant,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorkerError {
    InvalidTransition,
    /// A shell resource could not be fetched during install.
    ShellFetch(String),
}

/// External messages a page can post to the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Skip the waiting phase and let the host promote this worker
    /// without waiting for older generations to release their pages.
    SkipWaiting,
}

/// Response classification as the platform reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response with a readable status.
    Basic,
    /// Cross-origin response; status and body are not inspectable.
    Opaque,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebRequest {
    pub method: String,
    pub url: String,
}

impl WebRequest {
    pub fn get(url: &str) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.to_string(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebResponse {
    pub status: u16,
    pub kind: ResponseKind,
    pub body: Vec<u8>,
}

impl WebResponse {
    /// Only plain 200 same-origin responses go into the cache.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

/// Named-bucket cache storage as the worker sees it.
pub trait CacheBackend {
    fn bucket_names(&self) -> Vec<String>;
    fn delete_bucket(&mut self, name: &str);
    fn put(&mut self, bucket: &str, url: &str, response: WebResponse);
    fn get(&self, bucket: &str, url: &str) -> Option<WebResponse>;
}

pub trait NetworkBackend {
    fn fetch(&mut self, request: &WebRequest) -> Result<WebResponse, String>;
}

/// How a fetch event was answered.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// Non-GET request; the worker does not respond at all.
    Passthrough,
    /// Served from the bucket.
    CacheHit(WebResponse),
    /// Fetched from the network and stored for next time.
    Network(WebResponse),
    /// Fetched but not cacheable (non-200 or opaque); passed through.
    NetworkUncached(WebResponse),
    /// Network down and nothing cached for the URL: the cached shell
    /// document if present, otherwise nothing to serve.
    OfflineShell(Option<WebResponse>),
}

pub struct CacheWorker {
    bucket: String,
    phase: WorkerPhase,
    skip_waiting: bool,
    clients_claimed: bool,
}

impl CacheWorker {
    pub fn new() -> Self {
        Self::with_bucket(config::CACHE_NAME)
    }

    pub fn with_bucket(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            phase: WorkerPhase::Parsed,
            skip_waiting: false,
            clients_claimed: false,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// Whether the host may promote this worker immediately.
    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed
    }

    fn transition(&mut self, to: WorkerPhase) -> Result<(), WorkerError> {
        if !is_valid_transition(self.phase, to) {
            return Err(WorkerError::InvalidTransition);
        }
        self.phase = to;
        Ok(())
    }

    /// Install: fetch and store every shell resource into the bucket,
    /// then request immediate promotion. A failed shell fetch marks
    /// the worker redundant.
    pub fn on_install(
        &mut self,
        network: &mut dyn NetworkBackend,
        cache: &mut dyn CacheBackend,
    ) -> Result<(), WorkerError> {
        self.transition(WorkerPhase::Installing)?;
        for url in config::SHELL_RESOURCES {
            match network.fetch(&WebRequest::get(url)) {
                Ok(response) => cache.put(&self.bucket, url, response),
                Err(e) => {
                    self.phase = WorkerPhase::Redundant;
                    return Err(WorkerError::ShellFetch(format!("{}: {}", url, e)));
                }
            }
        }
        self.skip_waiting = true;
        self.transition(WorkerPhase::Installed)
    }

    /// Activate: delete every bucket that is not ours, then take
    /// control of already-open pages.
    pub fn on_activate(&mut self, cache: &mut dyn CacheBackend) -> Result<(), WorkerError> {
        self.transition(WorkerPhase::Activating)?;
        for name in cache.bucket_names() {
            if name != self.bucket {
                cache.delete_bucket(&name);
            }
        }
        self.transition(WorkerPhase::Activated)?;
        self.clients_claimed = true;
        Ok(())
    }

    /// Fetch: cache-first, then network (caching plain 200 same-origin
    /// responses on the way out), then the offline shell.
    pub fn on_fetch(
        &mut self,
        request: &WebRequest,
        network: &mut dyn NetworkBackend,
        cache: &mut dyn CacheBackend,
    ) -> FetchOutcome {
        if !request.is_get() {
            return FetchOutcome::Passthrough;
        }
        if let Some(cached) = cache.get(&self.bucket, &request.url) {
            return FetchOutcome::CacheHit(cached);
        }
        match network.fetch(request) {
            Ok(response) if response.is_cacheable() => {
                cache.put(&self.bucket, &request.url, response.clone());
                FetchOutcome::Network(response)
            }
            Ok(response) => FetchOutcome::NetworkUncached(response),
            Err(_) => FetchOutcome::OfflineShell(cache.get(&self.bucket, config::OFFLINE_FALLBACK)),
        }
    }

    pub fn on_message(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::SkipWaiting => self.skip_waiting = true,
        }
    }
}

impl Default for CacheWorker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_valid_transition(from: WorkerPhase, to: WorkerPhase) -> bool {
    use WorkerPhase::*;
    matches!(
        (from, to),
        (Parsed, Installing)
            | (Installing, Installed)
            | (Installing, Redundant)
            | (Installed, Activating)
            | (Activating, Activated)
    )
}

/// Register the worker script with the browser. Fire and forget: the
/// app works without offline support, so failure only logs.
#[cfg(target_arch = "wasm32")]
pub fn register() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let container = window.navigator().service_worker();
    let promise = container.register("/service-worker.js");
    wasm_bindgen_futures::spawn_local(async move {
        match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(_) => logging::log("Service worker registrado"),
            Err(e) => logging::error(&format!("No se pudo registrar el service worker: {:?}", e)),
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn register() {
    logging::log("service worker registration skipped outside the browser");
}
