//! Execution context bound to a logger value
//!
//! A `Context` is an immutable chain of key/value pairs. Deriving a child
//! context with [`Context::with_value`] never changes the parent, so one
//! context can be shared freely across threads and bound to many loggers.
//! Registered extra-data callbacks read values out of it at emission time.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

struct Node {
    key: String,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// An empty context with no values
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Derive a child context that additionally carries `value` under `key`
    ///
    /// A later value for the same key shadows earlier ones.
    #[must_use]
    pub fn with_value<K, T>(&self, key: K, value: T) -> Self
    where
        K: Into<String>,
        T: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Node {
                key: key.into(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up the most recent value stored under `key`
    ///
    /// Returns `None` when the key is absent or holds a value of another type.
    pub fn value<T: Any>(&self, key: &str) -> Option<&T> {
        self.find(key)?.value.downcast_ref::<T>()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn find(&self, key: &str) -> Option<&Node> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if current.key == key {
                return Some(current);
            }
            node = current.parent.as_deref();
        }
        None
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            keys.push(current.key.as_str());
            node = current.parent.as_deref();
        }
        keys
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("keys", &self.keys()).finish()
    }
}
