//! Request path context and token maps.

use crate::Replacements;

/// Sentinel token for the site base path.
pub const TOKEN_BASE_URL: &str = "-base-url-";
/// Sentinel token for the public files directory.
pub const TOKEN_FILES_DIR: &str = "-files-directory-";
/// Sentinel token for the private files directory.
pub const TOKEN_PRIVATE_FILES_DIR: &str = "-files-private-directory-";
/// Sentinel token for the builder module directory.
pub const TOKEN_MODULE_DIR: &str = "-module-directory-";

/// Path roots of the current request and deployment.
///
/// `base_url` is scheme + host + base path (no trailing slash); `base_path`
/// is the path component only (empty for a root-hosted site). Directory
/// paths are relative, without leading or trailing slashes. Backslashes
/// from Windows paths are normalized on construction.
#[derive(Debug, Clone)]
pub struct PathContext {
    base_url: String,
    base_path: String,
    public_files: String,
    private_files: String,
    module_dir: String,
}

impl PathContext {
    /// Create a path context, normalizing directory separators.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        base_path: impl Into<String>,
        public_files: impl Into<String>,
        private_files: impl Into<String>,
        module_dir: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            base_path: base_path.into(),
            public_files: public_files.into().replace('\\', "/"),
            private_files: private_files.into().replace('\\', "/"),
            module_dir: module_dir.into().replace('\\', "/"),
        }
    }

    /// Scheme + host + base path of the current request.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base path of the current request (empty for root-hosted sites).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Relative public files directory.
    #[must_use]
    pub fn public_files(&self) -> &str {
        &self.public_files
    }

    /// Relative private files directory.
    #[must_use]
    pub fn private_files(&self) -> &str {
        &self.private_files
    }

    /// Relative builder module directory.
    #[must_use]
    pub fn module_dir(&self) -> &str {
        &self.module_dir
    }

    /// Replace absolute paths with portable sentinel tokens for storage.
    ///
    /// Longer paths are replaced first, so a directory nested under another
    /// (e.g. a private files directory inside the public one) is tokenized
    /// before its parent could shadow it.
    #[must_use]
    pub fn insert_tokens(&self, content: &str) -> String {
        let mut pairs = [
            (self.base_path.as_str(), TOKEN_BASE_URL),
            (self.public_files.as_str(), TOKEN_FILES_DIR),
            (self.private_files.as_str(), TOKEN_PRIVATE_FILES_DIR),
            (self.module_dir.as_str(), TOKEN_MODULE_DIR),
        ];
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut replacements = Replacements::with_capacity(pairs.len());
        for (from, to) in pairs {
            replacements.add(from, to);
        }

        let mut out = content.to_owned();
        replacements.apply(&mut out);
        out
    }

    /// Expand sentinel tokens against the current request's paths.
    ///
    /// Compound forms run before the bare forms they contain: absolute-URL
    /// directory references collapse to base-path form before the bare base
    /// URL is rewritten, and attribute-anchored relative directory paths are
    /// prefixed with the base path after token expansion. One pass leaves no
    /// tokens behind, so a second pass is a no-op.
    #[must_use]
    pub fn restore_tokens(&self, content: &str) -> String {
        let prefixed_public = format!("{}/{}", self.base_path, self.public_files);
        let prefixed_private = format!("{}/{}", self.base_path, self.private_files);
        let prefixed_module = format!("{}/{}", self.base_path, self.module_dir);

        let mut replacements = Replacements::with_capacity(9);
        replacements.add(
            format!("{}/{}", self.base_url, self.public_files),
            prefixed_public.clone(),
        );
        replacements.add(
            format!("{}/{}", self.base_url, self.module_dir),
            prefixed_module,
        );
        replacements.add(TOKEN_BASE_URL, &self.base_path);
        replacements.add(TOKEN_FILES_DIR, &self.public_files);
        replacements.add(TOKEN_PRIVATE_FILES_DIR, &self.private_files);
        replacements.add(TOKEN_MODULE_DIR, &self.module_dir);
        replacements.add(
            format!("=\"{}", self.public_files),
            format!("=\"{prefixed_public}"),
        );
        replacements.add(
            format!("=\"{}", self.private_files),
            format!("=\"{prefixed_private}"),
        );
        replacements.add(&self.base_url, &self.base_path);

        let mut out = content.to_owned();
        replacements.apply(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context() -> PathContext {
        PathContext::new(
            "https://example.com/sub",
            "/sub",
            "sites/default/files",
            "sites/default/files-private",
            "modules/azbuilder",
        )
    }

    #[test]
    fn test_insert_then_restore_roundtrip() {
        let paths = context();
        let authored = r#"<img src="/sub/page.png"><a href="/sub/about">About</a>"#;

        let stored = paths.insert_tokens(authored);
        assert_eq!(
            stored,
            r#"<img src="-base-url-/page.png"><a href="-base-url-/about">About</a>"#
        );
        assert_eq!(paths.restore_tokens(&stored), authored);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let paths = context();
        let stored = r#"<img src="-files-directory-/hero.jpg"><a href="-base-url-/x">x</a>"#;

        let once = paths.restore_tokens(stored);
        let twice = paths.restore_tokens(&once);
        assert_eq!(once, twice);
        assert!(!twice.contains("-files-directory-"));
        assert!(!twice.contains("-base-url-"));
    }

    #[test]
    fn test_files_token_gets_base_path_prefix_in_attributes() {
        let paths = context();
        let stored = r#"<img src="-files-directory-/hero.jpg">"#;
        assert_eq!(
            paths.restore_tokens(stored),
            r#"<img src="/sub/sites/default/files/hero.jpg">"#
        );
    }

    #[test]
    fn test_private_files_token() {
        let paths = context();
        let stored = r#"<a href="-files-private-directory-/doc.pdf">doc</a>"#;
        assert_eq!(
            paths.restore_tokens(stored),
            r#"<a href="/sub/sites/default/files-private/doc.pdf">doc</a>"#
        );
    }

    #[test]
    fn test_longest_path_tokenized_first() {
        // The private directory nests under the public one; inserting the
        // public token first would corrupt private paths
        let paths = PathContext::new(
            "https://example.com",
            "",
            "sites/default/files",
            "sites/default/files/private",
            "modules/azbuilder",
        );
        let stored = paths.insert_tokens(r#"<a href="sites/default/files/private/x">x</a>"#);
        assert_eq!(stored, r#"<a href="-files-private-directory-/x">x</a>"#);
    }

    #[test]
    fn test_absolute_url_collapses_to_base_path() {
        let paths = context();
        let stored = r#"<a href="https://example.com/sub/sites/default/files/doc.pdf">doc</a>"#;
        assert_eq!(
            paths.restore_tokens(stored),
            r#"<a href="/sub/sites/default/files/doc.pdf">doc</a>"#
        );
    }

    #[test]
    fn test_restore_targets_current_request_paths() {
        // Stored under one deployment, restored under another
        let authoring = context();
        let stored = authoring.insert_tokens(r#"<img src="/sub/logo.png">"#);

        let serving = PathContext::new(
            "https://other.org",
            "",
            "sites/default/files",
            "sites/default/files-private",
            "modules/azbuilder",
        );
        assert_eq!(serving.restore_tokens(&stored), r#"<img src="/logo.png">"#);
    }

    #[test]
    fn test_windows_paths_normalized() {
        let paths = PathContext::new(
            "https://example.com",
            "",
            r"sites\default\files",
            r"sites\default\private",
            r"modules\azbuilder",
        );
        assert_eq!(paths.public_files(), "sites/default/files");
        assert_eq!(paths.module_dir(), "modules/azbuilder");
    }

    #[test]
    fn test_empty_base_path_never_matches() {
        let paths = PathContext::new(
            "https://example.com",
            "",
            "sites/default/files",
            "sites/default/files-private",
            "modules/azbuilder",
        );
        let content = "<p>plain content</p>";
        assert_eq!(paths.insert_tokens(content), content);
    }
}
