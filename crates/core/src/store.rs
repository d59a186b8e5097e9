//! Cart and customer persistence.
//!
//! State lives in an injected [`Storage`] (the browser storefront used
//! per-origin key-value storage; here the CLI uses [`FileStorage`] and tests
//! use [`MemoryStorage`]). The stores serialize state wholesale under fixed
//! keys and never surface corruption: a malformed payload is "no cart", not
//! an error.
//!
//! After every persisted mutation [`OrderStore`] notifies its subscribers so
//! other UI regions (an item-count badge, a totals panel) can refresh without
//! re-deriving state themselves. A write from *another* context arrives
//! through [`OrderStore::external_change`]; concurrent edits are last-write-
//! wins with no merge, an accepted race for a single-user cart.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::customer::Customer;
use crate::order::OrderState;

/// Storage key for the persisted cart.
pub const ORDER_KEY: &str = "mbarete_pedido_v1";
/// Storage key for the persisted customer data.
pub const CUSTOMER_KEY: &str = "mbarete_customer_v1";

/// String-keyed string-value storage, the shape of the browser's
/// `localStorage` the original cart persisted into.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Storage backed by a single JSON file holding the key→value map.
///
/// Matches the `localStorage` contract: writes are best-effort and never
/// surfaced to cart logic. An unreadable or malformed file reads as empty;
/// a failed write is logged and dropped.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), %err, "discarding malformed storage file");
            BTreeMap::new()
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) {
        let payload = match serde_json::to_string_pretty(map) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(%err, "failed to serialize storage map");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, payload) {
            tracing::error!(path = %self.path.display(), %err, "failed to write storage file");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map);
    }

    fn remove(&mut self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

/// Read a JSON payload under `key`, falling back to the default on absence or
/// corruption. Shared policy for both persisted shapes.
fn load_json<T, S>(storage: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: Storage,
{
    let Some(raw) = storage.get(key) else {
        return T::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(key, %err, "discarding corrupt persisted state");
        T::default()
    })
}

fn save_json<T, S>(storage: &mut S, key: &str, value: &T)
where
    T: Serialize,
    S: Storage,
{
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(err) => tracing::error!(key, %err, "failed to serialize state"),
    }
}

type Subscriber = Box<dyn Fn(&OrderState) + Send + Sync>;

/// Owns cart persistence and the state-changed notification channel.
pub struct OrderStore<S: Storage> {
    storage: S,
    subscribers: Vec<Subscriber>,
}

impl<S: Storage> OrderStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            subscribers: Vec::new(),
        }
    }

    /// Read the persisted cart; absent or corrupt data yields the default
    /// empty state, never an error.
    #[must_use]
    pub fn load(&self) -> OrderState {
        load_json(&self.storage, ORDER_KEY)
    }

    /// Persist `state` wholesale, then notify subscribers.
    pub fn save(&mut self, state: &OrderState) {
        save_json(&mut self.storage, ORDER_KEY, state);
        self.notify(state);
    }

    /// Remove all persisted cart data and notify with the empty state.
    pub fn clear(&mut self) {
        self.storage.remove(ORDER_KEY);
        self.notify(&OrderState::default());
    }

    /// Register an observer invoked after every persisted mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&OrderState) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// React to the backing storage being changed by another context.
    ///
    /// Returns the re-read state (and notifies subscribers) when `key` is the
    /// cart key; unrelated keys are ignored.
    pub fn external_change(&self, key: &str) -> Option<OrderState> {
        if key != ORDER_KEY {
            return None;
        }
        let state = self.load();
        self.notify(&state);
        Some(state)
    }

    fn notify(&self, state: &OrderState) {
        for subscriber in &self.subscribers {
            subscriber(state);
        }
    }
}

/// Customer data persistence; same corruption policy as the cart, separate
/// key and lifecycle, no notification channel (the checkout form is the only
/// consumer).
pub struct CustomerStore<S: Storage> {
    storage: S,
}

impl<S: Storage> CustomerStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn load(&self) -> Customer {
        load_json(&self.storage, CUSTOMER_KEY)
    }

    pub fn save(&mut self, customer: &Customer) {
        save_json(&mut self.storage, CUSTOMER_KEY, customer);
    }

    pub fn clear(&mut self) {
        self.storage.remove(CUSTOMER_KEY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::order::{ProductRef, TipoVenta};
    use crate::shipping::CityId;

    fn cable() -> ProductRef {
        ProductRef {
            slug: "cable-2.5".to_owned(),
            nombre: "Cable 2.5mm".to_owned(),
            precio_publico: 15_000,
            tipo_venta: TipoVenta::Metro,
        }
    }

    #[test]
    fn test_load_without_saved_state_is_empty() {
        let store = OrderStore::new(MemoryStorage::new());
        assert_eq!(store.load(), OrderState::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = OrderStore::new(MemoryStorage::new());
        let mut state = OrderState::default();
        state.add_item(&cable());
        state.city_id = Some(CityId::Nemby);
        state.payment = Some(crate::order::Payment::Tigo);

        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_payload_degrades_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(ORDER_KEY, "{not json");
        let store = OrderStore::new(storage);
        assert_eq!(store.load(), OrderState::default());

        let mut storage = MemoryStorage::new();
        storage.set(ORDER_KEY, r#"{"items":"nope"}"#);
        let store = OrderStore::new(storage);
        assert_eq!(store.load(), OrderState::default());
    }

    #[test]
    fn test_clear_removes_persisted_state() {
        let mut store = OrderStore::new(MemoryStorage::new());
        let mut state = OrderState::default();
        state.add_item(&cable());
        store.save(&state);
        store.clear();
        assert_eq!(store.load(), OrderState::default());
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let seen = Arc::new(AtomicU64::new(0));
        let mut store = OrderStore::new(MemoryStorage::new());
        let seen_by_badge = Arc::clone(&seen);
        store.subscribe(move |state| {
            seen_by_badge.store(state.item_count(), Ordering::SeqCst);
        });

        let mut state = OrderState::default();
        state.add_item(&cable());
        state.add_item(&cable());
        store.save(&state);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        store.clear();
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_external_change_rereads_matching_key_only() {
        let mut storage = MemoryStorage::new();
        let mut state = OrderState::default();
        state.add_item(&cable());
        storage.set(ORDER_KEY, &serde_json::to_string(&state).unwrap());

        let store = OrderStore::new(storage);
        assert_eq!(store.external_change("some_other_key"), None);
        assert_eq!(store.external_change(ORDER_KEY), Some(state));
    }

    #[test]
    fn test_customer_store_round_trip_and_corruption() {
        let mut store = CustomerStore::new(MemoryStorage::new());
        let customer = Customer {
            nombre: "Ana Benítez".to_owned(),
            doc: "4123456".to_owned(),
            direccion: String::new(),
        };
        store.save(&customer);
        assert_eq!(store.load(), customer);

        let mut storage = MemoryStorage::new();
        storage.set(CUSTOMER_KEY, "][");
        let store = CustomerStore::new(storage);
        assert_eq!(store.load(), Customer::default());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "mbarete-store-test-{}-{:?}.json",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = OrderStore::new(FileStorage::new(&path));
        let mut state = OrderState::default();
        state.add_item(&cable());
        store.save(&state);

        let reread = OrderStore::new(FileStorage::new(&path));
        assert_eq!(reread.load(), state);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let store = OrderStore::new(FileStorage::new("/definitely/not/a/real/path.json"));
        assert_eq!(store.load(), OrderState::default());
    }
}
