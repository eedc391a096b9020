//! Story metadata for documented components.
//!
//! Builds the default export and the individual stories of a component's
//! story module: title, argument controls and the template rendering the
//! component with its props.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use twigdoc_core::StoryError;

/// The parts of a component definition stories need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryComponent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Prop definitions keyed by prop name.
    pub props: IndexMap<String, Value>,
}

impl StoryComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn prop(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.props.insert(name.into(), definition);
        self
    }
}

/// Inputs of [`StoryBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryOptions {
    pub component: StoryComponent,
    pub title: Option<String>,
    pub additional_components: Vec<StoryComponent>,
    pub template: Option<String>,
    pub arg_types: Map<String, Value>,
    pub figma_url: Option<String>,
}

/// The default export of a story module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultStory {
    pub component: String,
    pub title: String,
    pub arg_types: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoryParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<Design>,
}

/// One story: its args, the template and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    pub args: Value,
    pub template: String,
    pub parameters: StoryParameters,
}

/// Builds story metadata for one component.
#[derive(Debug, Clone)]
pub struct StoryBuilder {
    options: StoryOptions,
    template: String,
}

impl StoryBuilder {
    /// Validate `options` and pick the story template.
    ///
    /// An extended component must be one of the additional components.
    pub fn new(options: StoryOptions) -> Result<Self, StoryError> {
        let name = &options.component.name;

        if let Some(parent) = options.component.extends.as_deref().filter(|p| !p.is_empty()) {
            let found = options
                .additional_components
                .iter()
                .any(|component| component.name == parent);
            if !found {
                let names: Vec<_> = options
                    .additional_components
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect();
                warn!(
                    "[twigdoc] Extended component {} not found in the additional components {:?}",
                    parent, names
                );
                return Err(StoryError::ExtendedComponentNotFound {
                    component: name.clone(),
                    extends: parent.to_string(),
                });
            }
        }

        let template = match options.template.as_deref() {
            Some(template) if !template.is_empty() => template.to_string(),
            _ => format!(r#"<{name} v-bind="$props"></{name}>"#),
        };

        Ok(Self { options, template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The main component followed by the additional ones.
    pub fn component_names(&self) -> Vec<&str> {
        std::iter::once(self.options.component.name.as_str())
            .chain(
                self.options
                    .additional_components
                    .iter()
                    .map(|c| c.name.as_str()),
            )
            .collect()
    }

    /// Title and argument controls. Props with `validValues` become radio controls.
    pub fn default_story(&self) -> DefaultStory {
        let mut arg_types = self.options.arg_types.clone();
        for (prop_name, prop) in &self.options.component.props {
            if let Some(valid_values) = prop.get("validValues") {
                arg_types.insert(
                    prop_name.clone(),
                    json!({"control": {"options": valid_values, "type": "radio"}}),
                );
            }
        }

        DefaultStory {
            component: self.options.component.name.clone(),
            title: self
                .options
                .title
                .clone()
                .unwrap_or_else(|| self.options.component.name.clone()),
            arg_types,
        }
    }

    pub fn parameters(&self) -> StoryParameters {
        let design = self
            .options
            .figma_url
            .as_ref()
            .filter(|url| !url.is_empty())
            .map(|url| Design {
                kind: "figma",
                url: url.clone(),
            });
        StoryParameters { design }
    }

    /// A story rendering the default template with `args`.
    pub fn story(&self, args: Value) -> Story {
        self.story_with_template(args, &self.template)
    }

    pub fn story_with_template(&self, args: Value, template: &str) -> Story {
        Story {
            args,
            template: template.to_string(),
            parameters: self.parameters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(component: StoryComponent) -> StoryOptions {
        StoryOptions {
            component,
            ..Default::default()
        }
    }

    fn builder_json(story: DefaultStory) -> Value {
        serde_json::to_value(story).unwrap()
    }

    #[test]
    fn test_default_template() {
        let builder = StoryBuilder::new(options(StoryComponent::new("sw-button"))).unwrap();
        assert_eq!(builder.template(), r#"<sw-button v-bind="$props"></sw-button>"#);

        let mut custom = options(StoryComponent::new("sw-button"));
        custom.template = Some("<sw-button>Go</sw-button>".into());
        assert_eq!(StoryBuilder::new(custom).unwrap().template(), "<sw-button>Go</sw-button>");
    }

    #[test]
    fn test_valid_values_become_radio_controls() {
        let component = StoryComponent::new("sw-button")
            .prop("variant", json!({"type": "String", "validValues": ["primary", "ghost"]}))
            .prop("label", json!({"type": "String"}));
        let mut opts = options(component);
        opts.arg_types.insert("onClick".into(), json!({"action": "clicked"}));

        let story = builder_json(StoryBuilder::new(opts).unwrap().default_story());
        assert_eq!(
            story,
            json!({
                "component": "sw-button",
                "title": "sw-button",
                "argTypes": {
                    "onClick": {"action": "clicked"},
                    "variant": {"control": {"options": ["primary", "ghost"], "type": "radio"}}
                }
            })
        );
    }

    #[test]
    fn test_figma_design_parameter() {
        let mut opts = options(StoryComponent::new("sw-card"));
        opts.figma_url = Some("https://www.figma.com/file/abc".into());
        let story = StoryBuilder::new(opts).unwrap().story(json!({"title": "Hi"}));
        assert_eq!(
            serde_json::to_value(story).unwrap(),
            json!({
                "args": {"title": "Hi"},
                "template": "<sw-card v-bind=\"$props\"></sw-card>",
                "parameters": {"design": {"type": "figma", "url": "https://www.figma.com/file/abc"}}
            })
        );
    }

    #[test]
    fn test_missing_extended_component() {
        let opts = options(StoryComponent::new("sw-b").extending("sw-a"));
        assert_eq!(
            StoryBuilder::new(opts).unwrap_err(),
            StoryError::ExtendedComponentNotFound {
                component: "sw-b".into(),
                extends: "sw-a".into()
            }
        );
    }

    #[test]
    fn test_extended_component_present() {
        let mut opts = options(StoryComponent::new("sw-b").extending("sw-a"));
        opts.additional_components.push(StoryComponent::new("sw-a"));
        opts.title = Some("Components/B".into());
        let builder = StoryBuilder::new(opts).unwrap();
        assert_eq!(builder.component_names(), vec!["sw-b", "sw-a"]);
        assert_eq!(builder.default_story().title, "Components/B");
    }

    #[test]
    fn test_options_from_json() {
        let opts: StoryOptions = serde_json::from_value(json!({
            "component": {"name": "sw-a", "props": {"size": {"validValues": ["s", "m"]}}},
            "figmaUrl": ""
        }))
        .unwrap();
        let builder = StoryBuilder::new(opts).unwrap();
        assert_eq!(builder.parameters(), StoryParameters::default());
        assert!(builder.default_story().arg_types.contains_key("size"));
    }
}
