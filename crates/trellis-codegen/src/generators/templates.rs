//! Template engine for code generation.

use crate::error::{CodegenError, Result};
use crate::naming;
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, not HTML, so nothing is escaped.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);

        // Register custom helpers
        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register string-transform helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper("pascal_case", Box::new(string_helper(naming::pascal_case)));
        handlebars.register_helper("snake_case", Box::new(string_helper(naming::snake_case)));
        handlebars.register_helper("plural", Box::new(string_helper(naming::pluralize)));
        handlebars.register_helper("lower", Box::new(string_helper(|s: &str| s.to_lowercase())));
        handlebars.register_helper("upper", Box::new(string_helper(|s: &str| s.to_uppercase())));
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a `&str -> String` transform as a one-parameter helper.
fn string_helper<F>(transform: F) -> impl handlebars::HelperDef + Send + Sync + 'static
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    move |h: &handlebars::Helper,
          _r: &Handlebars,
          _ctx: &handlebars::Context,
          _rc: &mut handlebars::RenderContext,
          out: &mut dyn handlebars::Output|
          -> handlebars::HelperResult {
        let param = h
            .param(0)
            .and_then(|v| v.value().as_str())
            .unwrap_or("");
        out.write(&transform(param))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("hello", "Hello, {{name}}!")
            .unwrap();

        let result = engine.render("hello", &json!({"name": "World"})).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_no_html_escaping() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("const x = \"{{url}}\";", &json!({"url": "a&b<c>'"}))
            .unwrap();
        assert_eq!(result, "const x = \"a&b<c>'\";");
    }

    #[test]
    fn test_case_helpers() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string(
                "{{pascal_case name}} {{snake_case name}} {{lower name}} {{plural \"category\"}}",
                &json!({"name": "BlogPost"}),
            )
            .unwrap();
        assert_eq!(result, "BlogPost blog_post blogpost categories");
    }

    #[test]
    fn test_invalid_template_is_reported() {
        let mut engine = TemplateEngine::new();
        assert!(matches!(
            engine.register_template("broken", "{{#each items}}"),
            Err(CodegenError::InvalidTemplate(_))
        ));
    }
}
