//! Guarded view configuration

use std::sync::Arc;

use crate::schema::{Matcher, TypeCatalogue};

/// Options for a guarded view session.
///
/// Shared by every nested view created under one root wrap.
#[derive(Debug, Clone)]
pub struct GuardOptions {
    /// Whether rejected writes are silently ignored instead of reported.
    pub quiet: bool,
    /// Catalogue used to resolve tag schemas.
    pub catalogue: Arc<TypeCatalogue>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            quiet: false, // Rejections are reported unless asked otherwise
            catalogue: TypeCatalogue::shared(),
        }
    }
}

impl GuardOptions {
    /// Options that report rejected writes as errors.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Options that turn rejected writes into no-ops.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Resolve tags through a custom catalogue.
    pub fn with_catalogue(mut self, catalogue: Arc<TypeCatalogue>) -> Self {
        self.catalogue = catalogue;
        self
    }

    pub(crate) fn matcher(&self) -> Matcher {
        Matcher::new(Arc::clone(&self.catalogue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let options = GuardOptions::default();
        assert!(!options.quiet);
        assert!(!GuardOptions::strict().quiet);
        assert!(GuardOptions::quiet().quiet);
    }

    #[test]
    fn test_with_catalogue() {
        let mut catalogue = TypeCatalogue::builtin();
        catalogue.register("anything", |_| true);
        let options = GuardOptions::quiet().with_catalogue(Arc::new(catalogue));
        assert!(options.quiet);
        assert!(options.catalogue.contains("anything"));
        assert!(options.matcher().catalogue().contains("anything"));
    }
}
