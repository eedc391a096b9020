//! End-to-end loading of component modules from disk.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use twigdoc_loader::{ExportNameDocgen, Loader, LoaderOptions, StaticDocgen};

const WIDGET_MODULE: &str = "import template from './widget.html.twig';\n\nComponent.register('sw-widget', {\n    template,\n});";

fn component_dir(template: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("widget.html.twig"), template).unwrap();
    let module = dir.path().join("index.js");
    fs::write(&module, WIDGET_MODULE).unwrap();
    (dir, module)
}

/// The JSON assigned to the component in the loaded module.
fn injected_metadata(code: &str) -> Value {
    let line = code
        .lines()
        .find(|line| line.starts_with("__twigdocComponent.__docgenInfo = "))
        .unwrap();
    let json = line
        .trim_start_matches("__twigdocComponent.__docgenInfo = ")
        .trim_end_matches(';');
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_widget_blocks_are_injected() {
    let (_dir, module) = component_dir(
        "{% block header %}Hi{% endblock %}\n{% block footer %}{% endblock %}\n",
    );
    let loader = Loader::new(LoaderOptions::default(), ExportNameDocgen);

    let out = loader.load(WIDGET_MODULE, &module);
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);

    let metadata = injected_metadata(&out.code);
    assert_eq!(metadata["displayName"], json!("sw-widget"));
    assert_eq!(
        metadata["twigBlocks"],
        json!([{"name": "header", "code": "Hi"}, {"name": "footer", "code": ""}])
    );
    assert!(out.code.ends_with("export default __twigdocComponent;\n"));
}

#[test]
fn test_slots_and_ignored_descriptors() {
    let (_dir, module) = component_dir(
        r#"{% block widget %}<div><slot name="actions" :item="item"></slot><slot></slot></div>{% endblock %}"#,
    );
    let docgen = StaticDocgen::from_json(
        r#"{
            "displayName": "sw-widget",
            "exportName": "default",
            "props": [
                {"name": "title"},
                {"name": "internalState", "tags": {"ignore": [{"description": true}]}}
            ],
            "events": [{"name": "change"}, {"name": "debug", "tags": [{"title": "ignore"}]}]
        }"#,
    )
    .unwrap();
    let loader = Loader::new(LoaderOptions::default(), docgen);

    let out = loader.load(WIDGET_MODULE, &module);
    let metadata = injected_metadata(&out.code);
    assert_eq!(metadata["props"], json!([{"name": "title"}]));
    assert_eq!(metadata["events"], json!([{"name": "change"}]));
    assert_eq!(
        metadata["slots"],
        json!([
            {"name": "actions", "default": false},
            {"name": "default", "default": true}
        ])
    );
    assert_eq!(
        metadata["twigBlocks"][0]["code"],
        json!("<div>\n  <slot name=\"actions\" :item=\"item\"></slot>\n  <slot></slot>\n</div>")
    );
}

#[test]
fn test_unterminated_block_passes_content_through() {
    let (_dir, module) = component_dir("{% block header %}Hi");
    let loader = Loader::new(LoaderOptions::default(), ExportNameDocgen);

    let out = loader.load(WIDGET_MODULE, &module);
    assert_eq!(out.code, WIDGET_MODULE);
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].starts_with("[twigdoc-loader] failed to parse the component file "));
    assert!(out.warnings[0].contains("Block 'header' opened at line 1, column 1 is never closed"));
}

#[test]
fn test_missing_template_file_passes_content_through() {
    let dir = TempDir::new().unwrap();
    let module = dir.path().join("index.js");
    let loader = Loader::new(LoaderOptions::default(), ExportNameDocgen);

    let out = loader.load(WIDGET_MODULE, &module);
    assert_eq!(out.code, WIDGET_MODULE);
    assert!(out.warnings[0].contains("widget.html.twig"));
}
