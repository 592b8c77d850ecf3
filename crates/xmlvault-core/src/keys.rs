//! Object key generation.
//!
//! [`ObjectKeyGenerator`] mints keys of the form `xmlobject/<N>` from an owned
//! atomic counter. Keys are unique for the lifetime of the generator only;
//! nothing is persisted, so a restarted process starts again at `xmlobject/1`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix shared by every minted object key.
pub const KEY_PREFIX: &str = "xmlobject";

/// The identifier of a stored object within the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Wrap an existing key string, e.g. one supplied by a caller.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Thread-safe generator of strictly increasing object keys.
///
/// # Examples
///
/// ```
/// use xmlvault_core::ObjectKeyGenerator;
///
/// let keys = ObjectKeyGenerator::new();
/// assert_eq!(keys.next_key().as_str(), "xmlobject/1");
/// assert_eq!(keys.next_key().as_str(), "xmlobject/2");
/// ```
#[derive(Debug, Default)]
pub struct ObjectKeyGenerator {
    count: AtomicU64,
}

impl ObjectKeyGenerator {
    /// Create a generator whose first key is `xmlobject/1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Mint the next key.
    ///
    /// The increment is a single atomic read-modify-write, so concurrent
    /// callers never observe the same sequence number.
    #[must_use]
    pub fn next_key(&self) -> ObjectKey {
        let n = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        ObjectKey(format!("{KEY_PREFIX}/{n}"))
    }

    /// Number of keys minted so far.
    #[must_use]
    pub fn minted(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
