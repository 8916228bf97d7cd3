//! Ordered string replacement for token substitution.

/// Collects string replacements for ordered, sequential application.
///
/// Token substitution is order-sensitive: compound forms must be attempted
/// before the bare forms they contain, or a bare replacement corrupts the
/// longer match. Callers register replacements in precedence order and
/// [`apply()`](Self::apply) runs them sequentially in a single pass each.
///
/// Empty `from` patterns are skipped: a site hosted at the web root has an
/// empty base path, which must not match everywhere.
///
/// # Example
///
/// ```
/// use azb_tokens::Replacements;
///
/// let mut content = "-base-url-/about".to_string();
/// let mut replacements = Replacements::new();
/// replacements.add("-base-url-", "/sub");
/// replacements.apply(&mut content);
///
/// assert_eq!(content, "/sub/about");
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new replacements collector with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement: all occurrences of `from` become `to`.
    ///
    /// Replacements are applied in the order they are added.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    /// Apply all registered replacements in order.
    ///
    /// Consumes the collector to prevent accidental reuse.
    pub fn apply(self, content: &mut String) {
        for (from, to) in self.items {
            if !from.is_empty() && content.contains(&from) {
                *content = content.replace(&from, &to);
            }
        }
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
