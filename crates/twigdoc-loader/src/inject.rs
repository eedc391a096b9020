//! Attaches merged metadata to the component object of a module.

use once_cell::sync::Lazy;
use regex::Regex;
use twigdoc_core::{InjectError, MergedComponentMetadata};

/// Binding the default export is rebound to so metadata can be assigned to it.
pub const COMPONENT_BINDING: &str = "__twigdocComponent";

const DEFAULT_EXPORT: &str = "export default ";

static PROPERTY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("property name pattern is valid")
});

/// Append one `<component>.<inject_at> = <json>;` assignment per record.
///
/// A default-export record rebinds the first `export default ` to
/// [`COMPONENT_BINDING`] and re-exports it at the end of the module.
pub fn inject(
    source: &str,
    docs: &[MergedComponentMetadata],
    inject_at: &str,
) -> Result<String, InjectError> {
    if !PROPERTY_NAME.is_match(inject_at) {
        return Err(InjectError::InvalidProperty {
            inject_at: inject_at.to_string(),
        });
    }

    let mut code = source.to_string();
    let mut assignments = Vec::with_capacity(docs.len());
    let mut rebound = false;

    for doc in docs {
        let json = serde_json::to_string(doc)?;
        if doc.doc.is_default_export() {
            if !rebound {
                let at = code
                    .find(DEFAULT_EXPORT)
                    .ok_or_else(|| InjectError::MissingDefaultExport {
                        inject_at: inject_at.to_string(),
                    })?;
                code.replace_range(
                    at..at + DEFAULT_EXPORT.len(),
                    &format!("const {COMPONENT_BINDING} = "),
                );
                rebound = true;
            }
            assignments.push(format!("{COMPONENT_BINDING}.{inject_at} = {json};"));
        } else if let Some(export_name) = doc.doc.export_name.as_deref() {
            assignments.push(format!("{export_name}.{inject_at} = {json};"));
        }
    }

    if assignments.is_empty() {
        return Ok(code);
    }

    if !code.ends_with('\n') {
        code.push('\n');
    }
    code.push('\n');
    for assignment in assignments {
        code.push_str(&assignment);
        code.push('\n');
    }
    if rebound {
        code.push_str(&format!("export default {COMPONENT_BINDING};\n"));
    }
    Ok(code)
}
