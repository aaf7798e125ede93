//! Whitelist of models a gateway may forward to.
//!
//! ```rust
//! use pprovider::ModelRegistry;
//!
//! let registry = ModelRegistry::new("m1", ["m1", "m2"]);
//! assert!(registry.is_available("m2"));
//! assert!(!registry.is_available(""));
//! assert_eq!(registry.allowed_models(), vec!["m1", "m2"]);
//! ```

/// Default model plus the ordered set of allowed model names.
///
/// Built once from configuration and never mutated afterwards, so it can be
/// shared across concurrent requests without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    default_model: String,
    allowed_models: Vec<String>,
}

impl ModelRegistry {
    /// Blank entries are skipped and duplicates keep their first position.
    pub fn new<I, S>(default_model: impl Into<String>, allowed_models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique = Vec::new();
        for model in allowed_models {
            let model = model.into();
            if model.trim().is_empty() || unique.contains(&model) {
                continue;
            }

            unique.push(model);
        }

        Self {
            default_model: default_model.into(),
            allowed_models: unique,
        }
    }

    pub fn is_available(&self, model: &str) -> bool {
        !model.trim().is_empty() && self.allowed_models.iter().any(|allowed| allowed == model)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn allowed_models(&self) -> Vec<String> {
        self.allowed_models.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.allowed_models.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.allowed_models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry::new(
            "openai/gpt-3.5-turbo",
            ["openai/gpt-3.5-turbo", "openai/gpt-4", "anthropic/claude-3-haiku"],
        )
    }

    #[test]
    fn membership_is_exact() {
        let registry = registry();
        assert!(registry.is_available("openai/gpt-4"));
        assert!(!registry.is_available("openai/gpt-4 "));
        assert!(!registry.is_available("OPENAI/GPT-4"));
        assert!(!registry.is_available("invalid/model"));
    }

    #[test]
    fn blank_models_are_never_available() {
        let registry = registry();
        assert!(!registry.is_available(""));
        assert!(!registry.is_available("   "));
    }

    #[test]
    fn default_model_is_available_when_listed() {
        let registry = registry();
        assert!(registry.is_available(registry.default_model()));
    }

    #[test]
    fn listing_preserves_order_and_collapses_duplicates() {
        let registry = ModelRegistry::new("b", ["b", "a", "b", " ", "c"]);
        assert_eq!(registry.allowed_models(), vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn listing_returns_a_detached_copy() {
        let registry = registry();
        let mut listed = registry.allowed_models();
        listed.push("rogue/model".to_string());

        assert!(!registry.is_available("rogue/model"));
        assert_eq!(registry.allowed_models(), registry.allowed_models());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = ModelRegistry::new("m1", Vec::<String>::new());
        assert!(registry.is_empty());
        assert!(!registry.is_available("m1"));
    }
}
