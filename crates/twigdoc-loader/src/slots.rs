//! `<slot>` descriptor extraction.
//!
//! Slots are found with a light pattern-matching pass over the template
//! text rather than an HTML parser. Consumers only see [`SlotScanner`], so
//! the scanner can be replaced without touching the merge step.

use once_cell::sync::Lazy;
use regex::Regex;
use twigdoc_core::SlotDescriptor;

/// An opening `<slot>` tag, possibly spanning several lines.
static SLOT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<slot(?:[\s/][^>]*)?>").expect("slot pattern is valid"));

static SLOT_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s?:?([\w|-]+)="([\w|-]+|\{.*\})""#).expect("slot attribute pattern is valid")
});

static BINDING_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s?").expect("binding separator pattern is valid"));

/// Finds the slots a template declares.
pub trait SlotScanner {
    /// One descriptor per `<slot>` tag, in source order.
    fn scan(&self, template: &str) -> Vec<SlotDescriptor>;
}

/// Regex based [`SlotScanner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSlotScanner;

impl SlotScanner for RegexSlotScanner {
    fn scan(&self, template: &str) -> Vec<SlotDescriptor> {
        SLOT_TAG
            .find_iter(template)
            .map(|tag| describe_slot(tag.as_str()))
            .collect()
    }
}

fn describe_slot(tag: &str) -> SlotDescriptor {
    let attributes = tag
        .strip_prefix("<slot")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or_default();

    let mut name = SlotDescriptor::DEFAULT_NAME.to_string();
    let mut variables = Vec::new();

    for caps in SLOT_ATTRIBUTE.captures_iter(attributes) {
        let (attribute, value) = (&caps[1], &caps[2]);
        match attribute {
            "name" => name = value.to_string(),
            "v-bind" => variables.extend(bindings(value)),
            _ => variables.push(attribute.to_string()),
        }
    }

    SlotDescriptor::new(name, variables)
}

/// Entries of a `v-bind="{ a, b }"` object.
fn bindings(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .unwrap_or(value);
    BINDING_SEPARATOR
        .split(inner)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(template: &str) -> Vec<SlotDescriptor> {
        RegexSlotScanner.scan(template)
    }

    #[test]
    fn test_named_scoped_slot() {
        assert_eq!(
            scan(r#"<slot name="foo" :bar="baz"></slot>"#),
            vec![SlotDescriptor {
                name: "foo".into(),
                is_default: false,
                is_scoped_slot: true,
                variables: vec!["bar".into()],
            }]
        );
    }

    #[test]
    fn test_default_slot() {
        assert_eq!(scan("<slot></slot>"), vec![SlotDescriptor::default_slot()]);
        assert_eq!(scan("<slot />"), vec![SlotDescriptor::default_slot()]);
    }

    #[test]
    fn test_v_bind_object() {
        let slots = scan(r#"<slot name="footer" v-bind="{ product, isLoading }"></slot>"#);
        assert_eq!(slots[0].name, "footer");
        assert_eq!(slots[0].variables, vec!["product", "isLoading"]);
        assert!(slots[0].is_scoped_slot);
    }

    #[test]
    fn test_multiline_slot_tag() {
        let template = "<div>\n    <slot\n        name=\"actions\"\n        :item=\"item\"\n    ></slot>\n</div>";
        let slots = scan(template);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].name, "actions");
        assert_eq!(slots[0].variables, vec!["item"]);
    }

    #[test]
    fn test_slots_in_source_order() {
        let template = r#"<slot name="a"></slot><div><slot></slot></div><slot name="b"/>"#;
        let names: Vec<_> = scan(template).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "default", "b"]);
    }

    #[test]
    fn test_similar_tags_are_not_slots() {
        assert!(scan("<slots></slots><sw-slot-wrapper></sw-slot-wrapper>").is_empty());
    }

    #[test]
    fn test_explicit_default_name() {
        let slots = scan(r#"<slot name="default" :row="row"></slot>"#);
        assert!(slots[0].is_default);
        assert!(slots[0].is_scoped_slot);
    }
}
