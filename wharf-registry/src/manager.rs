//! Background cache of registered gateways and providers.

use std::collections::HashMap;
use std::future::Future;
use std::mem;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use wharf_types::NodeId;

use crate::client::{RegistryClient, RegistrySource};
use crate::error::RegistryError;
use crate::records::{GatewayRecord, ProviderRecord, RegisteredNode};

/// Poll interval used when the config does not override it.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Settings for a [`RegistryManager`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry service.
    pub registry_url: String,
    /// This node's own id. Its gateway record, if any, never enters the
    /// cache.
    pub node_id: NodeId,
    /// Track the gateway role.
    pub track_gateways: bool,
    /// Track the provider role.
    pub track_providers: bool,
    /// Poll interval for the reconciliation loops.
    pub refresh_interval: Duration,
}

impl RegistryConfig {
    /// Config tracking both roles at [`DEFAULT_REFRESH_INTERVAL`].
    pub fn new(registry_url: impl Into<String>, node_id: NodeId) -> Self {
        Self {
            registry_url: registry_url.into(),
            node_id,
            track_gateways: true,
            track_providers: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

enum Lifecycle {
    NotStarted,
    Running(Running),
    Stopped,
}

struct Running {
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

struct RoleCache<R> {
    records: Arc<RwLock<HashMap<NodeId, R>>>,
    refresh: Arc<Notify>,
}

impl<R> RoleCache<R> {
    fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            refresh: Arc::new(Notify::new()),
        }
    }
}

/// Caches registry records and keeps them fresh in the background.
///
/// One reconciliation loop runs per tracked role, each polling the full
/// role list and folding it into a read-locked map. Lookups serve the
/// snapshot of the most recently completed pass; staleness is bounded by
/// the refresh interval.
///
/// The lifecycle is `NotStarted -> Running -> Stopped` and a stopped
/// manager stays stopped. Records are never evicted: a node absent from a
/// later fetch stays cached until a differing record supersedes it.
pub struct RegistryManager {
    config: RegistryConfig,
    source: Arc<dyn RegistrySource>,
    state: Mutex<Lifecycle>,
    gateways: Option<RoleCache<GatewayRecord>>,
    providers: Option<RoleCache<ProviderRecord>>,
}

impl RegistryManager {
    /// Build a manager backed by the production HTTP client.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let client = RegistryClient::new(config.registry_url.clone())?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Build a manager over any record source.
    pub fn with_source(config: RegistryConfig, source: Arc<dyn RegistrySource>) -> Self {
        let gateways = config.track_gateways.then(RoleCache::new);
        let providers = config.track_providers.then(RoleCache::new);
        Self {
            config,
            source,
            state: Mutex::new(Lifecycle::NotStarted),
            gateways,
            providers,
        }
    }

    /// Launch the reconciliation loops. Must be called within a Tokio
    /// runtime.
    ///
    /// Fails with [`RegistryError::AlreadyStarted`] unless the manager has
    /// never run; the loops of an earlier `start` are unaffected by the
    /// failed call.
    pub fn start(&self) -> Result<(), RegistryError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !matches!(*state, Lifecycle::NotStarted) {
            return Err(RegistryError::AlreadyStarted);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut tasks = Vec::new();

        if let Some(cache) = &self.gateways {
            let source = Arc::clone(&self.source);
            tasks.push(tokio::spawn(sync_loop(
                "gateway",
                Arc::clone(&cache.records),
                Arc::clone(&cache.refresh),
                shutdown_rx.clone(),
                self.config.refresh_interval,
                Some(self.config.node_id),
                move || {
                    let source = Arc::clone(&source);
                    async move { source.fetch_gateways().await }
                },
            )));
        }
        if let Some(cache) = &self.providers {
            let source = Arc::clone(&self.source);
            tasks.push(tokio::spawn(sync_loop(
                "provider",
                Arc::clone(&cache.records),
                Arc::clone(&cache.refresh),
                shutdown_rx.clone(),
                self.config.refresh_interval,
                None,
                move || {
                    let source = Arc::clone(&source);
                    async move { source.fetch_providers().await }
                },
            )));
        }

        debug!(loops = tasks.len(), "registry manager started");
        *state = Lifecycle::Running(Running { shutdown_tx, tasks });
        Ok(())
    }

    /// Stop the loops and wait for them to exit.
    ///
    /// Safe to call repeatedly and concurrently; only the first call on a
    /// running manager does any work. A manager that never started stays
    /// startable.
    pub async fn shutdown(&self) {
        let tasks = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            match mem::replace(&mut *state, Lifecycle::Stopped) {
                Lifecycle::Running(running) => {
                    let _ = running.shutdown_tx.send(true);
                    running.tasks
                }
                Lifecycle::NotStarted => {
                    // Never started: leave the manager startable.
                    *state = Lifecycle::NotStarted;
                    return;
                }
                Lifecycle::Stopped => return,
            }
        };
        for task in tasks {
            let _ = task.await;
        }
        debug!("registry manager stopped");
    }

    /// Ask every active loop to run a pass now instead of waiting for its
    /// timer. A signal, not a completion: lookups racing the pass may
    /// still see the old snapshot. No-op unless running.
    pub fn refresh(&self) {
        if !self.is_running() {
            return;
        }
        if let Some(cache) = &self.gateways {
            cache.refresh.notify_one();
        }
        if let Some(cache) = &self.providers {
            cache.refresh.notify_one();
        }
    }

    /// Look up a gateway by id.
    ///
    /// `None` means not found, whether the id is unknown, the role is not
    /// tracked, or the manager is not running. A miss is final; lookups
    /// never fetch.
    pub fn get_gateway(&self, id: &NodeId) -> Option<GatewayRecord> {
        if !self.is_running() {
            return None;
        }
        let cache = self.gateways.as_ref()?;
        let records = cache.records.read().unwrap_or_else(|e| e.into_inner());
        records.get(id).cloned()
    }

    /// Look up a provider by id. Miss semantics match
    /// [`get_gateway`](Self::get_gateway).
    pub fn get_provider(&self, id: &NodeId) -> Option<ProviderRecord> {
        if !self.is_running() {
            return None;
        }
        let cache = self.providers.as_ref()?;
        let records = cache.records.read().unwrap_or_else(|e| e.into_inner());
        records.get(id).cloned()
    }

    fn is_running(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        matches!(*state, Lifecycle::Running(_))
    }
}

async fn sync_loop<R, F, Fut>(
    role: &'static str,
    records: Arc<RwLock<HashMap<NodeId, R>>>,
    refresh: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
    interval: Duration,
    exclude: Option<NodeId>,
    mut fetch: F,
) where
    R: RegisteredNode + PartialEq + Send + Sync + 'static,
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<Vec<R>, RegistryError>> + Send,
{
    loop {
        match fetch().await {
            Ok(fetched) => {
                let (added, replaced) = reconcile(&records, fetched, exclude.as_ref());
                if added > 0 || replaced > 0 {
                    debug!(role, added, replaced, "registry cache updated");
                }
            }
            Err(err) => {
                // Keep serving the previous contents until a pass succeeds.
                warn!(role, error = %err, "registry fetch failed");
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.changed() => {
                debug!(role, "registry loop stopped");
                return;
            }
            _ = refresh.notified() => {}
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Fold a fetched role list into the cache. Returns `(added, replaced)`.
///
/// Identical records are skipped, differing ones replaced whole, unknown
/// ones inserted. Nothing is ever removed. The diff runs under a read
/// lock and the write lock is taken only when there is something to
/// apply; only the owning loop writes the map, so the diff stays valid
/// across the lock switch.
fn reconcile<R>(
    records: &RwLock<HashMap<NodeId, R>>,
    fetched: Vec<R>,
    exclude: Option<&NodeId>,
) -> (usize, usize)
where
    R: RegisteredNode + PartialEq,
{
    let mut added = 0;
    let mut replaced = 0;
    let mut changes = Vec::new();
    {
        let current = records.read().unwrap_or_else(|e| e.into_inner());
        for record in fetched {
            if exclude == Some(record.node_id()) {
                continue;
            }
            match current.get(record.node_id()) {
                Some(existing) if *existing == record => {}
                Some(_) => {
                    replaced += 1;
                    changes.push(record);
                }
                None => {
                    added += 1;
                    changes.push(record);
                }
            }
        }
    }
    if !changes.is_empty() {
        let mut current = records.write().unwrap_or_else(|e| e.into_inner());
        for record in changes {
            current.insert(*record.node_id(), record);
        }
    }
    (added, replaced)
}
