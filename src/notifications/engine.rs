// Template rendering engine using Tera

use super::builtin;
use super::resolver::TemplateResolver;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Format a whole-dollar amount as `$25,000`
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

/// Tera filter wrapping `format_usd`, for override templates
fn usd_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let amount = value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| tera::Error::msg(format!("usd filter expects a dollar amount, got {}", value)))?;
    Ok(Value::String(format_usd(amount)))
}

/// Compiled notification templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Compile every builtin template name, taking overrides from `resolver`
    pub fn load(resolver: &TemplateResolver) -> Result<Self> {
        let mut tera = Tera::default();
        tera.register_filter("usd", usd_filter);

        for name in builtin::list_builtin_templates() {
            let template = resolver.resolve(name)?;
            tera.add_raw_template(name, &template.content)
                .map_err(|e| anyhow!("Failed to add template '{}': {}", name, e))?;
        }

        Ok(Self { tera })
    }

    /// Builtin templates only
    pub fn builtin() -> Result<Self> {
        Self::load(&TemplateResolver::new())
    }

    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .map_err(|e| anyhow!("Failed to render template '{}': {:?}", template_name, e))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(5_000), "$5,000");
        assert_eq!(format_usd(25_000), "$25,000");
        assert_eq!(format_usd(150_000), "$150,000");
        assert_eq!(format_usd(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_builtin_engine_has_all_templates() {
        let engine = TemplateEngine::builtin().unwrap();
        for name in builtin::list_builtin_templates() {
            assert!(engine.has_template(name));
        }
    }

    #[test]
    fn test_override_can_use_usd_filter() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("estimate_client.txt.tera"),
            "From {{ low | usd }}",
        )
        .unwrap();

        let engine =
            TemplateEngine::load(&TemplateResolver::new().with_override_dir(dir.path())).unwrap();
        let mut context = Context::new();
        context.insert("low", &25_000u32);
        assert_eq!(
            engine.render(builtin::ESTIMATE_CLIENT_TEXT, &context).unwrap(),
            "From $25,000"
        );
    }

    #[test]
    fn test_invalid_override_fails_at_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("contact_team.txt.tera"), "{% if %}").unwrap();

        let result = TemplateEngine::load(&TemplateResolver::new().with_override_dir(dir.path()));
        let err = result.err().unwrap();
        assert!(err.to_string().contains("contact_team.txt"));
    }
}
