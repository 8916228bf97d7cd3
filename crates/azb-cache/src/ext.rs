//! Extension trait for [`CacheBucket`] with typed convenience methods.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Catalog payloads are serde structures; `get_json`/`set_json` handle the
/// JSON round-trip so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only need to handle raw bytes
/// - Callers get typed access via a blanket impl
///
/// # Example
///
/// ```
/// use azb_cache::{Cache, CacheBucketExt, NullCache};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Catalog { entries: Vec<String> }
///
/// let cache = NullCache;
/// let bucket = cache.bucket("catalog");
///
/// bucket.set_json("blocks", "rev1", &Catalog { entries: vec![] });
/// let catalog: Option<Catalog> = bucket.get_json("blocks", "rev1");
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, etag mismatch, or deserialization
    /// failure (a stale entry written by an incompatible schema reads as a
    /// miss, not an error).
    fn get_json<T: DeserializeOwned>(&self, key: &str, etag: &str) -> Option<T> {
        let bytes = self.get(key, etag)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, etag: &str, value: &T) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, etag, &bytes);
        }
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
