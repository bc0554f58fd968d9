// Template resolution: configured override directory, then builtin
//
// An override file is named after the template with a `.tera` suffix,
// e.g. `estimate_team.txt.tera`.

use super::builtin;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a template was resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// File in the configured template directory
    Directory,
    /// Compiled into the binary
    Builtin,
}

#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub name: String,
    pub content: String,
    pub source: TemplateSource,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    override_dir: Option<PathBuf>,
}

impl TemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for overrides in `dir` before falling back to builtin templates
    pub fn with_override_dir(mut self, dir: &Path) -> Self {
        self.override_dir = Some(dir.to_path_buf());
        self
    }

    pub fn resolve(&self, name: &str) -> Result<ResolvedTemplate> {
        debug!("Resolving template: {}", name);

        if let Some(path) = self.override_path(name) {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template {}", path.display()))?;
                info!("Template '{}' resolved from {}", name, path.display());
                return Ok(ResolvedTemplate {
                    name: name.to_string(),
                    content,
                    source: TemplateSource::Directory,
                    path: Some(path),
                });
            }
        }

        match builtin::get_builtin_template(name) {
            Some(content) => {
                debug!("Template '{}' resolved from builtin templates", name);
                Ok(ResolvedTemplate {
                    name: name.to_string(),
                    content: content.to_string(),
                    source: TemplateSource::Builtin,
                    path: None,
                })
            }
            None => Err(anyhow!("Template '{}' not found in any location", name)),
        }
    }

    fn override_path(&self, name: &str) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.tera", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolves_builtin_without_override_dir() {
        let resolved = TemplateResolver::new()
            .resolve(builtin::ESTIMATE_TEAM_TEXT)
            .unwrap();
        assert_eq!(resolved.source, TemplateSource::Builtin);
        assert!(resolved.path.is_none());
        assert!(resolved.content.contains("NEW PROJECT ESTIMATE SUBMISSION"));
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("contact_client.txt.tera"),
            "Custom hello {{ name }}",
        )
        .unwrap();

        let resolver = TemplateResolver::new().with_override_dir(dir.path());
        let resolved = resolver.resolve(builtin::CONTACT_CLIENT_TEXT).unwrap();
        assert_eq!(resolved.source, TemplateSource::Directory);
        assert_eq!(resolved.content, "Custom hello {{ name }}");

        // templates without an override still come from builtin
        let other = resolver.resolve(builtin::CONTACT_TEAM_TEXT).unwrap();
        assert_eq!(other.source, TemplateSource::Builtin);
    }

    #[test]
    fn test_unknown_template_errors() {
        let err = TemplateResolver::new().resolve("missing.txt").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
