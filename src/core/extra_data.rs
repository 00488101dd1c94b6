//! Registry of callbacks that derive extra fields from a bound context
//!
//! Every emitted record asks each registered callback for a value using the
//! logger's bound [`Context`]. The registry is shared by all loggers of a
//! hub and may be modified while other threads are logging.

use super::context::Context;
use super::error::panic_message;
use super::field_value::FieldValue;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback deriving one named field from a context
///
/// Returning `None` leaves the field out of the record.
pub type ExtraDataCallback = Arc<dyn Fn(&Context) -> Option<FieldValue> + Send + Sync>;

/// Thread-safe map from field name to an optional callback
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```
/// use rust_context_logger::{Context, ExtraDataRegistry, FieldValue};
///
/// let registry = ExtraDataRegistry::new();
/// registry.register("opID", |ctx: &Context| {
///     ctx.value::<String>("opID").map(FieldValue::from)
/// });
///
/// let ctx = Context::background().with_value("opID", "OpId1".to_string());
/// let extras = registry.collect(&ctx);
/// assert_eq!(extras["opID"], FieldValue::from("OpId1"));
/// ```
#[derive(Clone, Default)]
pub struct ExtraDataRegistry {
    callbacks: Arc<RwLock<HashMap<String, Option<ExtraDataCallback>>>>,
}

impl ExtraDataRegistry {
    pub fn new() -> Self {
        Self {
            callbacks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a callback for `name`, replacing any previous entry
    pub fn register<K, F>(&self, name: K, callback: F)
    where
        K: Into<String>,
        F: Fn(&Context) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.register_optional(name, Some(Arc::new(callback)));
    }

    /// Register a possibly absent callback for `name`
    ///
    /// An absent entry is kept but never invoked, so it contributes nothing
    /// to the records.
    pub fn register_optional<K: Into<String>>(&self, name: K, callback: Option<ExtraDataCallback>) {
        self.callbacks.write().insert(name.into(), callback);
    }

    /// Register a callback copying the context value stored under `key`
    ///
    /// The field is omitted when the context has no value of type `T` there.
    pub fn register_context_value<T, K>(&self, name: K, key: impl Into<String>)
    where
        T: Any + Clone + Into<FieldValue>,
        K: Into<String>,
    {
        let key = key.into();
        self.register(name, move |ctx: &Context| {
            ctx.value::<T>(&key).cloned().map(Into::into)
        });
    }

    /// Remove the entry for `name`
    pub fn unregister(&self, name: &str) {
        self.callbacks.write().remove(name);
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.callbacks.write().clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callbacks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.read().is_empty()
    }

    /// Invoke every registered callback with `ctx`
    ///
    /// The entries are snapshotted under the read lock and the callbacks run
    /// after it is released, so a slow callback never blocks registration
    /// and a callback may itself log. Absent entries and `None` results are
    /// skipped. A panicking callback is reported and its field skipped.
    pub fn collect(&self, ctx: &Context) -> BTreeMap<String, FieldValue> {
        let snapshot: Vec<(String, ExtraDataCallback)> = {
            let callbacks = self.callbacks.read();
            if callbacks.is_empty() {
                return BTreeMap::new();
            }
            callbacks
                .iter()
                .filter_map(|(name, cb)| cb.as_ref().map(|cb| (name.clone(), Arc::clone(cb))))
                .collect()
        };

        let mut extras = BTreeMap::new();
        for (name, callback) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| callback(ctx))) {
                Ok(Some(value)) => {
                    extras.insert(name, value);
                }
                Ok(None) => {}
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER ERROR] Extra data callback '{}' panicked: {}. Field skipped.",
                        name,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
        extras
    }
}

impl std::fmt::Debug for ExtraDataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let callbacks = self.callbacks.read();
        let mut names: Vec<&String> = callbacks.keys().collect();
        names.sort();
        f.debug_struct("ExtraDataRegistry")
            .field("names", &names)
            .finish()
    }
}
