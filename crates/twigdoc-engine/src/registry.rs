//! Registry of parsed templates, keyed by template id.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use twigdoc_core::TemplateId;

use crate::render::Template;

static GLOBAL: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::new);

/// A concurrent registry of parsed templates.
///
/// Ids are unique per parse, so concurrent registrations never collide.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: DashMap<TemplateId, Arc<Template>>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static TemplateRegistry {
        &GLOBAL
    }

    /// Register a template under its own id.
    pub fn register(&self, template: Template) -> Arc<Template> {
        let template = Arc::new(template);
        self.templates
            .insert(template.id().clone(), Arc::clone(&template));
        template
    }

    /// Get a template by id.
    pub fn get(&self, id: &TemplateId) -> Option<Arc<Template>> {
        self.templates.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    pub fn remove(&self, id: &TemplateId) -> Option<Arc<Template>> {
        self.templates.remove(id).map(|(_, template)| template)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Drop every registered template.
    pub fn clear(&self) {
        self.templates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twigdoc_parser::TokenGrammar;

    fn template(id: &str) -> Template {
        let grammar = TokenGrammar::structural().unwrap();
        Template::parse(&grammar, TemplateId::from(id), "{% block a %}x{% endblock %}").unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let registry = TemplateRegistry::new();
        assert!(registry.is_empty());

        registry.register(template("one"));
        registry.register(template("two"));
        assert_eq!(registry.len(), 2);

        let one = registry.get(&TemplateId::from("one")).unwrap();
        assert_eq!(one.block_names(), vec!["a"]);
        assert!(registry.get(&TemplateId::from("three")).is_none());
    }

    #[test]
    fn test_remove_and_clear() {
        let registry = TemplateRegistry::new();
        registry.register(template("one"));
        registry.register(template("two"));

        assert!(registry.remove(&TemplateId::from("one")).is_some());
        assert!(!registry.contains(&TemplateId::from("one")));
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }
}
