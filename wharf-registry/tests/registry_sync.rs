//! End-to-end scenarios for the registry cache manager.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;
use wharf_registry::{
    GatewayRecord, ProviderRecord, RegistryConfig, RegistryError, RegistryManager, RegistrySource,
};
use wharf_types::NodeId;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn node(hex: &str) -> NodeId {
    NodeId::from_hex(hex).expect("parse failed")
}

fn gateway(hex: &str, address: &str) -> GatewayRecord {
    GatewayRecord {
        node_id: node(hex),
        address: address.to_string(),
        root_signing_key: String::new(),
        signing_key: String::new(),
        region_code: String::new(),
        network_info_gateway: String::new(),
        network_info_provider: String::new(),
        network_info_client: String::new(),
        network_info_admin: String::new(),
    }
}

fn provider(hex: &str, address: &str) -> ProviderRecord {
    ProviderRecord {
        node_id: node(hex),
        address: address.to_string(),
        root_signing_key: String::new(),
        signing_key: String::new(),
        region_code: String::new(),
        network_info_gateway: String::new(),
        network_info_client: String::new(),
        network_info_admin: String::new(),
    }
}

#[derive(Default)]
struct ScriptedSource {
    gateways: Mutex<Vec<GatewayRecord>>,
    providers: Mutex<Vec<ProviderRecord>>,
    fail_gateways: AtomicBool,
    gateway_fetches: AtomicUsize,
}

impl ScriptedSource {
    fn with_gateways(records: Vec<GatewayRecord>) -> Self {
        Self {
            gateways: Mutex::new(records),
            ..Self::default()
        }
    }

    fn set_gateways(&self, records: Vec<GatewayRecord>) {
        *self.gateways.lock().expect("lock poisoned") = records;
    }

    fn fetch_count(&self) -> usize {
        self.gateway_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrySource for ScriptedSource {
    async fn fetch_gateways(&self) -> Result<Vec<GatewayRecord>, RegistryError> {
        self.gateway_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_gateways.load(Ordering::SeqCst) {
            return Err(RegistryError::Fetch {
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self.gateways.lock().expect("lock poisoned").clone())
    }

    async fn fetch_providers(&self) -> Result<Vec<ProviderRecord>, RegistryError> {
        Ok(self.providers.lock().expect("lock poisoned").clone())
    }
}

/// Config with a deliberately long timer so tests drive passes through
/// `refresh()` alone.
fn manual_config() -> RegistryConfig {
    RegistryConfig {
        registry_url: "http://registry.test".to_string(),
        node_id: node("7"),
        track_gateways: true,
        track_providers: true,
        refresh_interval: Duration::from_secs(3600),
    }
}

fn scenario_config() -> RegistryConfig {
    RegistryConfig {
        refresh_interval: Duration::from_millis(50),
        ..manual_config()
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool, what: &str) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {what}");
}

#[tokio::test]
async fn test_startup_pass_fills_the_cache() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let manager = RegistryManager::with_source(scenario_config(), source);
    manager.start().expect("start failed");

    wait_until(|| manager.get_gateway(&node("3")).is_some(), "gateway 3").await;
    let record = manager.get_gateway(&node("3")).expect("cached record");
    assert_eq!(record.address, "a1");

    // Unknown id misses without triggering any fetch.
    assert!(manager.get_gateway(&node("9")).is_none());

    // A second start fails and leaves the running loops undisturbed.
    assert!(matches!(
        manager.start(),
        Err(RegistryError::AlreadyStarted)
    ));
    assert!(manager.get_gateway(&node("3")).is_some());

    manager.shutdown().await;
}

#[tokio::test]
async fn test_refresh_applies_updates_and_additions() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let manager = RegistryManager::with_source(scenario_config(), Arc::clone(&source) as _);
    manager.start().expect("start failed");
    wait_until(|| manager.get_gateway(&node("3")).is_some(), "gateway 3").await;

    source.set_gateways(vec![
        gateway("3", "a2"),
        gateway("5", "b1"),
        gateway("7", "self"),
    ]);
    manager.refresh();

    wait_until(|| manager.get_gateway(&node("5")).is_some(), "gateway 5").await;
    let updated = manager.get_gateway(&node("3")).expect("cached record");
    assert_eq!(updated.address, "a2");

    // The manager's own gateway record never enters the cache.
    assert!(manager.get_gateway(&node("7")).is_none());

    manager.shutdown().await;
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_records() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let manager = RegistryManager::with_source(manual_config(), Arc::clone(&source) as _);
    manager.start().expect("start failed");
    wait_until(|| manager.get_gateway(&node("3")).is_some(), "gateway 3").await;

    let before = source.fetch_count();
    source.fail_gateways.store(true, Ordering::SeqCst);
    manager.refresh();
    wait_until(|| source.fetch_count() > before, "failing fetch").await;

    let record = manager.get_gateway(&node("3")).expect("stale record");
    assert_eq!(record.address, "a1");

    manager.shutdown().await;
}

#[tokio::test]
async fn test_absent_records_are_never_evicted() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let manager = RegistryManager::with_source(manual_config(), Arc::clone(&source) as _);
    manager.start().expect("start failed");
    wait_until(|| manager.get_gateway(&node("3")).is_some(), "gateway 3").await;

    let before = source.fetch_count();
    source.set_gateways(Vec::new());
    manager.refresh();
    wait_until(|| source.fetch_count() > before, "empty fetch").await;

    assert!(manager.get_gateway(&node("3")).is_some());

    manager.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_is_terminal() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let manager = RegistryManager::with_source(manual_config(), Arc::clone(&source) as _);
    manager.start().expect("start failed");
    wait_until(|| manager.get_gateway(&node("3")).is_some(), "gateway 3").await;
    manager.shutdown().await;

    // Lookups and refresh become no-ops, and the manager never restarts.
    assert!(manager.get_gateway(&node("3")).is_none());
    manager.refresh();
    assert!(matches!(
        manager.start(),
        Err(RegistryError::AlreadyStarted)
    ));
    manager.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_shutdowns_are_safe() {
    init_tracing();
    let source = Arc::new(ScriptedSource::default());
    let manager = Arc::new(RegistryManager::with_source(manual_config(), source));
    manager.start().expect("start failed");

    let first = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.shutdown().await }
    });
    let second = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.shutdown().await }
    });
    first.await.expect("shutdown task panicked");
    second.await.expect("shutdown task panicked");
}

#[tokio::test]
async fn test_disabled_role_never_answers() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    *source.providers.lock().expect("lock poisoned") = vec![provider("b", "p1")];

    let mut config = manual_config();
    config.track_gateways = false;
    let manager = RegistryManager::with_source(config, Arc::clone(&source) as _);
    manager.start().expect("start failed");

    wait_until(|| manager.get_provider(&node("b")).is_some(), "provider b").await;
    assert_eq!(
        manager.get_provider(&node("b")).expect("cached record").address,
        "p1"
    );

    // The gateway role was never tracked: no fetches, no answers.
    assert!(manager.get_gateway(&node("3")).is_none());
    assert_eq!(source.fetch_count(), 0);

    manager.shutdown().await;
}

#[tokio::test]
async fn test_timer_drives_repeated_passes() {
    init_tracing();
    let source = Arc::new(ScriptedSource::with_gateways(vec![gateway("3", "a1")]));
    let mut config = manual_config();
    config.refresh_interval = Duration::from_millis(30);
    let manager = RegistryManager::with_source(config, Arc::clone(&source) as _);
    manager.start().expect("start failed");

    wait_until(|| source.fetch_count() >= 3, "three polling passes").await;

    manager.shutdown().await;
}
