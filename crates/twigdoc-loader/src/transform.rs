//! Rewrites legacy component registration calls into plain default exports.
//!
//! Docgen only understands `export default { ... }` modules, while
//! administration components are declared through `Component.register(...)`
//! or `Component.extend(...)`. The rewrite is a text substitution over the
//! source; it does not parse JavaScript.

use once_cell::sync::Lazy;
use regex::Regex;

static REGISTER_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Component\.register\('(.*)',?.\{").expect("register pattern is valid")
});

static EXTEND_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Component\.extend\('(.*)',?.'(.*)',?.\{").expect("extend pattern is valid")
});

static CALL_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\n\}\);$").expect("close pattern is valid"));

/// How a component module declares its component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationType {
    Register,
    Extend,
    Override,
}

impl RegistrationType {
    /// Detect the registration call used in `source`.
    pub fn detect(source: &str) -> Option<Self> {
        if source.contains("Component.register") {
            Some(RegistrationType::Register)
        } else if source.contains("Component.extend") {
            Some(RegistrationType::Extend)
        } else if source.contains("Component.override") {
            Some(RegistrationType::Override)
        } else {
            None
        }
    }
}

/// Rewrite a registered or extended component into an `export default` object.
///
/// Overrides and modules without a registration call are returned unchanged.
pub fn transform_source(source: &str) -> String {
    let opened = match RegistrationType::detect(source) {
        Some(RegistrationType::Register) => {
            REGISTER_OPEN.replace(source, "export default { \n  name: '$1',")
        }
        Some(RegistrationType::Extend) => EXTEND_OPEN.replace(
            source,
            "export default { \n  name: '$1',\n  extends: '$2',",
        ),
        Some(RegistrationType::Override) | None => return source.to_string(),
    };
    CALL_CLOSE.replace_all(&opened, "\n};").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_registration_type() {
        assert_eq!(
            RegistrationType::detect("Component.register('sw-a', {});"),
            Some(RegistrationType::Register)
        );
        assert_eq!(
            RegistrationType::detect("Component.extend('sw-b', 'sw-a', {});"),
            Some(RegistrationType::Extend)
        );
        assert_eq!(
            RegistrationType::detect("Component.override('sw-a', {});"),
            Some(RegistrationType::Override)
        );
        assert_eq!(RegistrationType::detect("export default {};"), None);
    }

    #[test]
    fn test_register_becomes_default_export() {
        let source = "import template from './sw-a.html.twig';\n\nComponent.register('sw-a', {\n    template,\n});";
        assert_eq!(
            transform_source(source),
            "import template from './sw-a.html.twig';\n\nexport default { \n  name: 'sw-a',\n    template,\n};"
        );
    }

    #[test]
    fn test_extend_keeps_parent_name() {
        let source = "Component.extend('sw-b', 'sw-a', {\n    template,\n});";
        assert_eq!(
            transform_source(source),
            "export default { \n  name: 'sw-b',\n  extends: 'sw-a',\n    template,\n};"
        );
    }

    #[test]
    fn test_override_is_unchanged() {
        let source = "Component.override('sw-a', {\n    template,\n});";
        assert_eq!(transform_source(source), source);
    }

    #[test]
    fn test_only_line_final_closers_are_rewritten() {
        let source = "Component.register('sw-a', {\n    created() {\n        this.$on('x', () => {\n});  // keep\n    },\n});";
        let out = transform_source(source);
        assert!(out.contains("\n});  // keep"));
        assert!(out.ends_with("\n};"));
    }
}
