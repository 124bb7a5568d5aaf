//! Prompt template loading and rendering via `minijinja`.
//!
//! Templates are loaded from the filesystem (default: `templates/`
//! directory) so the game's writing can be tuned without recompiling.
//! Each generator has one template; missing templates are a startup
//! error rather than a per-call surprise.

use minijinja::Environment;
use serde_json::Value;

use crate::error::ContentError;

/// Every template the engine expects, as `<name>.j2` in the directory.
const TEMPLATE_NAMES: [&str; 10] = [
    "scenario",
    "lore",
    "name",
    "avatar",
    "avatar_edit",
    "boss",
    "background",
    "global_background",
    "supervisor",
    "friend",
];

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Create a new prompt engine loading all templates from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Template`] if any template is missing or
    /// fails to parse.
    pub fn new(dir: &str) -> Result<Self, ContentError> {
        let mut env = Environment::new();
        for name in TEMPLATE_NAMES {
            let source = load_template(dir, name)?;
            env.add_template_owned(name, source)
                .map_err(|e| ContentError::Template(format!("failed to add {name}: {e}")))?;
        }
        Ok(Self { env })
    }

    /// Render a template with the given JSON context.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Template`] if the template is unknown or
    /// rendering fails.
    pub fn render(&self, name: &str, context: &Value) -> Result<String, ContentError> {
        self.env
            .get_template(name)
            .map_err(|e| ContentError::Template(format!("missing template {name}: {e}")))?
            .render(context)
            .map_err(|e| ContentError::Template(format!("{name} render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, name: &str) -> Result<String, ContentError> {
    let path = format!("{dir}/{name}.j2");
    std::fs::read_to_string(&path)
        .map_err(|e| ContentError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_test_templates(dir: &std::path::Path) {
        for name in TEMPLATE_NAMES {
            let body = format!("[{name}] stage={{{{ stage }}}} style={{{{ style }}}}");
            std::fs::write(dir.join(format!("{name}.j2")), body).ok();
        }
    }

    #[test]
    fn loading_and_rendering_works() {
        let unique = format!(
            "babai_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        write_test_templates(&dir);

        let engine = PromptEngine::new(dir.to_str().unwrap_or(""));
        assert!(engine.is_ok(), "engine should load with all templates present");

        if let Ok(engine) = engine {
            let rendered = engine.render(
                "scenario",
                &json!({"stage": 7, "style": "post-soviet"}),
            );
            assert_eq!(
                rendered.ok(),
                Some(String::from("[scenario] stage=7 style=post-soviet"))
            );
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_is_a_startup_error() {
        let unique = format!(
            "babai_missing_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        // Write only one template; the rest are missing.
        std::fs::write(dir.join("scenario.j2"), "stub").ok();

        let result = PromptEngine::new(dir.to_str().unwrap_or(""));
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_template_name_errors_at_render() {
        let unique = format!(
            "babai_unknown_template_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        write_test_templates(&dir);

        if let Ok(engine) = PromptEngine::new(dir.to_str().unwrap_or("")) {
            assert!(engine.render("no_such_template", &json!({})).is_err());
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
