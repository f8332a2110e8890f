//! Integration Tests for ValueStore
//!
//! End-to-end workflows across loads, live wrappers, deletes, and the
//! page-storage fallback:
//! - reconcile defaults, then observe them from a second load
//! - write through a live wrapper and reload
//! - grant-dependent behavior of the same default set

use std::sync::{Arc, Mutex};

use script_values::{
    Defaults, Grant, GrantPolicy, GrantSet, SimHostStore, SimPageStore, StoreError, Value,
    ValueStore, Values, WriteSignal,
};

/// Route spans through the test-capture writer. Repeated init is a no-op,
/// so every construction path can call this unconditionally.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn granted(host: &SimHostStore) -> ValueStore {
    init_tracing();
    ValueStore::new(
        GrantPolicy::Full,
        Arc::new(host.clone()),
        Arc::new(SimPageStore::new()),
    )
}

// =============================================================================
// Load / reload workflows
// =============================================================================

#[tokio::test]
async fn test_load_then_reload_round_trip() {
    let host = SimHostStore::new();
    let store = granted(&host);

    let defaults = Defaults::from_iter([("greeting", "hi"), ("theme", "dark")]);
    let first = store
        .load_values(defaults.clone(), None, true)
        .await
        .unwrap();
    assert_eq!(first, defaults);

    // Host now holds both defaults; a reload with different defaults must
    // return what was persisted
    let second = store
        .load_values(
            Defaults::from_iter([("greeting", "bonjour"), ("theme", "light")]),
            None,
            true,
        )
        .await
        .unwrap();
    assert_eq!(second, first, "persisted values win over new defaults");
}

#[tokio::test]
async fn test_write_proxy_then_reload() {
    let host = SimHostStore::new();
    let store = granted(&host);

    let values = store
        .load_values(Defaults::from_iter([("theme", "dark")]), Some("ui"), true)
        .await
        .unwrap();

    let signals: Arc<Mutex<Vec<WriteSignal>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&signals);
    let mut live = store.write_proxy(
        values,
        Some("ui"),
        Some(Box::new(move |s| sink.lock().unwrap().push(s))),
    );

    live.set("theme", "light").unwrap();
    for signal in signals.lock().unwrap().drain(..).collect::<Vec<_>>() {
        signal.await.unwrap().unwrap();
    }

    let reloaded = store
        .load_values(Defaults::from_iter([("theme", "dark")]), Some("ui"), false)
        .await
        .unwrap();
    assert_eq!(
        reloaded.get("theme"),
        Some(&Value::from("light")),
        "mirrored write is visible to a later load"
    );
}

#[tokio::test]
async fn test_load_all_after_namespaced_loads() {
    let host = SimHostStore::new();
    let store = granted(&host);

    store
        .load_values(Defaults::from_iter([("greeting", "hi")]), Some("ns"), true)
        .await
        .unwrap();
    store
        .load_values(Defaults::from_iter([("theme", "dark")]), None, true)
        .await
        .unwrap();

    let everything = store.load_all_values().await.unwrap();
    assert_eq!(everything.len(), 2);
    assert_eq!(everything.get("ns.greeting"), Some(&Value::from("hi")));
    assert_eq!(everything.get("theme"), Some(&Value::from("dark")));
}

#[tokio::test]
async fn test_delete_then_reload_restores_default() {
    let host = SimHostStore::new();
    let store = granted(&host);

    let mut values = store
        .load_values(Defaults::from_iter([("k", "stored")]), None, true)
        .await
        .unwrap();

    store.delete_value(&mut values, "k", None).await.unwrap();
    assert!(values.is_empty());
    assert!(host.is_empty());

    let reloaded = store
        .load_values(Defaults::from_iter([("k", "default")]), None, true)
        .await
        .unwrap();
    assert_eq!(reloaded.get("k"), Some(&Value::from("default")));
}

// =============================================================================
// Grant-dependent behavior of one default set
// =============================================================================

#[tokio::test]
async fn test_numeric_default_rejected_without_grants_accepted_with() {
    init_tracing();
    let defaults = Defaults::from_iter([("count", Value::from(0i64))]);

    // No grants: page fallback, 0 is not a string
    let page = SimPageStore::new();
    let fallback = ValueStore::without_host(Arc::new(page.clone()));
    let err = fallback
        .load_values(defaults.clone(), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NonStringValue { .. }));
    assert!(page.is_empty(), "no storage write before the violation");

    // Full grants: same call resolves and persists
    let host = SimHostStore::new();
    let store = granted(&host);
    let values = store.load_values(defaults, None, true).await.unwrap();
    assert_eq!(values.get("count"), Some(&Value::Num(0.0)));
    assert_eq!(host.raw_get("count"), Some(Value::Num(0.0)));
}

#[tokio::test]
async fn test_partial_grants_keep_host_and_page_disjoint() {
    init_tracing();
    let host = SimHostStore::new();
    let page = SimPageStore::new();
    let store = ValueStore::new(
        GrantPolicy::Partial(GrantSet::empty().with(Grant::GetValue)),
        Arc::new(host.clone()),
        Arc::new(page.clone()),
    );

    host.seed("k", "from-host");
    let values = store
        .load_values(Defaults::from_iter([("k", "default"), ("m", "missing")]), None, false)
        .await
        .unwrap();

    // Reads came from the host, the write-back went to the page
    assert_eq!(values.get("k"), Some(&Value::from("from-host")));
    assert_eq!(values.get("m"), Some(&Value::from("missing")));
    assert_eq!(page.raw_get("m"), Some("missing".to_owned()));
    assert!(!host.contains("m"));
}

#[tokio::test]
async fn test_capability_queries_match_grant_policy() {
    init_tracing();
    let store = ValueStore::new(
        GrantPolicy::Partial(GrantSet::empty().with(Grant::GetValue).with(Grant::ListValues)),
        Arc::new(SimHostStore::new()),
        Arc::new(SimPageStore::new()),
    );

    assert!(store.has_capabilities(&[Grant::GetValue, Grant::ListValues]));
    assert!(!store.has_capabilities(&[Grant::SetValue]));
    assert!(!store.has_capabilities(&[Grant::DeleteValue]));
}

// =============================================================================
// Read-through over a shared backend
// =============================================================================

#[tokio::test]
async fn test_read_through_observes_external_writer() {
    let host = SimHostStore::new();
    let store = granted(&host);

    let values = store
        .load_values(Defaults::from_iter([("status", "idle")]), None, true)
        .await
        .unwrap();

    // A second store over the same host plays the external writer
    let other = granted(&host);
    let mut live = other.write_proxy(Values::from_iter([("status", "idle")]), None, None);
    live.set("status", "busy").unwrap();

    while host.raw_get("status") != Some(Value::from("busy")) {
        tokio::task::yield_now().await;
    }

    // Plain map still shows load-time state; read-through sees the update
    assert_eq!(values.get("status"), Some(&Value::from("idle")));
    let fresh = store.read_proxy(values, None);
    assert_eq!(fresh.get("status").await.unwrap(), Value::from("busy"));
}
