//! Locates the template a component module imports.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use twigdoc_core::{ResolveError, TemplateDocument};

/// `import x from '...'`, `import { a } from "..."` and bare `import '...'`.
static IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:[\w$*{}\s,]+?\s+from\s+)?['"]([^'"]+)['"]"#)
        .expect("import pattern is valid")
});

/// Default extension of component templates.
pub const TEMPLATE_EXTENSION: &str = ".html.twig";

/// Import specifiers of one component module, relative to the module's directory.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    base_dir: PathBuf,
    imports: Vec<String>,
}

impl ImportResolver {
    /// Collect the import specifiers of `source` in source order.
    pub fn new(source: &str, source_path: &Path) -> Self {
        let imports = IMPORT
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        let base_dir = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { base_dir, imports }
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// The last import whose specifier contains `extension`, joined to the module directory.
    pub fn find_import(&self, extension: &str) -> Option<PathBuf> {
        self.imports
            .iter()
            .rev()
            .find(|specifier| specifier.contains(extension))
            .map(|specifier| self.base_dir.join(specifier))
    }

    /// Read the imported template, if the module imports one.
    pub fn read_template(&self, extension: &str) -> Result<Option<TemplateDocument>, ResolveError> {
        let Some(path) = self.find_import(extension) else {
            return Ok(None);
        };
        debug!("Reading template {}", path.display());
        let content = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some(TemplateDocument::new(path, content)))
    }
}
