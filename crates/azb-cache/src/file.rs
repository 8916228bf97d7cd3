//! File-based cache implementation.
//!
//! [`FileCache`] stores cache entries as files on disk, organized into
//! buckets (subdirectories). Each entry is a single file with a binary
//! header followed by the data:
//!
//! ```text
//! [etag_len: u32 LE][etag bytes][data bytes]
//! ```
//!
//! On read, only the header is read first to validate the etag; the payload
//! is read only on a hit. On construction, [`FileCache`] validates a
//! `VERSION` file in the cache root and wipes the whole directory when the
//! version mismatches, so caches written by an older builder release are
//! never served.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{Cache, CacheBucket};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION            # contains the cache version string
/// +-- catalog/           # bucket "catalog"
/// |   +-- cms_elements_blocks
/// +-- styles/            # bucket "styles"
///     +-- ...
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a new file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` file inside `root` does not match `version`, the
    /// entire cache directory is removed and recreated with the new version.
    /// Errors during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str, etag: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(key);
        let mut file = File::open(&path).ok()?;

        let mut len_buf = [0u8; 4];
        file.read_exact(&mut len_buf).ok()?;
        let etag_len = u32::from_le_bytes(len_buf) as usize;

        let mut stored_etag = vec![0u8; etag_len];
        file.read_exact(&mut stored_etag).ok()?;

        // Empty etag on get skips validation
        if !etag.is_empty() && stored_etag != etag.as_bytes() {
            return None;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, etag: &str, value: &[u8]) {
        let path = self.dir.join(key);

        // Silently ignore errors — the cache is optional
        let Some(parent) = path.parent() else {
            return;
        };
        if fs::create_dir_all(parent).is_err() {
            return;
        }

        let etag_bytes = etag.as_bytes();
        let mut buf = Vec::with_capacity(4 + etag_bytes.len() + value.len());
        buf.extend_from_slice(&(etag_bytes.len() as u32).to_le_bytes());
        buf.extend_from_slice(etag_bytes);
        buf.extend_from_slice(value);

        let _ = fs::write(&path, &buf);
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.dir.join(key));
    }
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "cache version mismatch (stored={stored}, current={version}), wiping cache"
            );
        }
        Err(_) => {
            tracing::info!("no cache VERSION file found, initializing cache");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("catalog");

        bucket.set("cms_elements_blocks", "rev1", b"{\"list\":{}}");
        assert_eq!(
            bucket.get("cms_elements_blocks", "rev1"),
            Some(b"{\"list\":{}}".to_vec())
        );
    }

    #[test]
    fn test_etag_mismatch_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("catalog");

        bucket.set("key", "rev1", b"data");

        assert_eq!(bucket.get("key", "rev1"), Some(b"data".to_vec()));
        assert_eq!(bucket.get("key", "rev2"), None);
    }

    #[test]
    fn test_empty_etag_skips_validation() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("catalog");

        bucket.set("key", "some-etag", b"data");
        assert_eq!(bucket.get("key", ""), Some(b"data".to_vec()));
    }

    #[test]
    fn test_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("catalog");

        assert_eq!(bucket.get("nonexistent", "etag"), None);
    }

    #[test]
    fn test_remove_deletes_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("catalog");

        bucket.set("key", "rev1", b"data");
        bucket.remove("key");
        assert_eq!(bucket.get("key", "rev1"), None);

        // Removing again is a no-op
        bucket.remove("key");
    }

    #[test]
    fn test_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let catalog = cache.bucket("catalog");
        let styles = cache.bucket("styles");

        catalog.set("key", "etag", b"catalog-data");
        styles.set("key", "etag", b"styles-data");

        assert_eq!(catalog.get("key", "etag"), Some(b"catalog-data".to_vec()));
        assert_eq!(styles.get("key", "etag"), Some(b"styles-data".to_vec()));
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        let bucket = cache.bucket("catalog");
        bucket.set("key", "etag1", b"will-be-wiped");

        let cache2 = FileCache::new(root.clone(), "v2");
        let bucket2 = cache2.bucket("catalog");
        assert_eq!(bucket2.get("key", "etag1"), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v2");
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("catalog").set("key", "etag1", b"preserved");

        let cache2 = FileCache::new(root, "v1");
        assert_eq!(
            cache2.bucket("catalog").get("key", "etag1"),
            Some(b"preserved".to_vec())
        );
    }
}
