//! Server-side views.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Auto-escaping follows the template's extension, so every `.html`
//! template escapes what it interpolates.

use minijinja::{Environment, Value, context, default_auto_escape_callback};
use tracing::error;

use crate::response::Response;
use crate::status::Status;

const HEADER: &str = "templates/header.html";
const FOOTER: &str = "templates/footer.html";
const NOT_FOUND: &str = "errors/404.html";

/// Renders a named template with a context.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

/// The embedded template set.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let source = match name {
        "templates/header.html" => include_str!("templates/header.html"),
        "templates/footer.html" => include_str!("templates/footer.html"),

        "news/index.html" => include_str!("templates/news/index.html"),
        "news/view.html" => include_str!("templates/news/view.html"),
        "news/create.html" => include_str!("templates/news/create.html"),
        "news/success.html" => include_str!("templates/news/success.html"),

        "pages/index.html" => include_str!("templates/pages/index.html"),
        "pages/home.html" => include_str!("templates/pages/home.html"),
        "pages/about.html" => include_str!("templates/pages/about.html"),

        "errors/404.html" => include_str!("templates/errors/404.html"),

        _ => return Ok(None),
    };
    Ok(Some(source.to_owned()))
}

/// Page composition on top of a [`TemplateEngine`].
pub struct Views {
    engine: Box<dyn TemplateEngine>,
}

impl Views {
    pub fn new(engine: impl TemplateEngine + 'static) -> Self {
        Self { engine: Box::new(engine) }
    }

    /// Renders header, `body_template` and footer with the same context.
    pub fn page(&self, body_template: &str, ctx: Value) -> Result<String, minijinja::Error> {
        let mut html = self.engine.render(HEADER, ctx.clone())?;
        html.push_str(&self.engine.render(body_template, ctx.clone())?);
        html.push_str(&self.engine.render(FOOTER, ctx)?);
        Ok(html)
    }

    /// A `404 Not Found` page carrying `message`.
    ///
    /// Falls back to a fixed body if the error template itself fails, so a
    /// missing resource never turns into a 500.
    pub fn not_found(&self, message: &str) -> Response {
        let ctx = context! { title => "404 - Page Not Found", message => message };
        let html = self.page(NOT_FOUND, ctx).unwrap_or_else(|e| {
            error!("failed to render 404 template: {e}");
            fallback_404_html(message)
        });
        Response::builder()
            .status(Status::NotFound)
            .header("cache-control", "no-store")
            .html(html)
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new(MiniJinjaEngine::new())
    }
}

fn fallback_404_html(message: &str) -> String {
    let message: String = message
        .chars()
        .map(|c| match c {
            '<' => "&lt;".to_owned(),
            '>' => "&gt;".to_owned(),
            '&' => "&amp;".to_owned(),
            '"' => "&quot;".to_owned(),
            c => c.to_string(),
        })
        .collect();
    format!(
        "<!DOCTYPE html>\n<html><head><title>404 - Page Not Found</title></head>\n\
         <body><h1>404 - Page Not Found</h1><p>{message}</p></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenEngine;

    impl TemplateEngine for BrokenEngine {
        fn render(&self, name: &str, _ctx: Value) -> Result<String, minijinja::Error> {
            Err(minijinja::Error::new(
                minijinja::ErrorKind::TemplateNotFound,
                format!("no template {name}"),
            ))
        }
    }

    #[test]
    fn every_embedded_template_compiles() {
        let engine = MiniJinjaEngine::new();
        for name in [
            HEADER, FOOTER, NOT_FOUND,
            "news/index.html", "news/view.html", "news/create.html", "news/success.html",
            "pages/index.html", "pages/home.html", "pages/about.html",
        ] {
            assert!(engine.env.get_template(name).is_ok(), "{name}");
        }
        assert!(engine.env.get_template("pages/missing.html").is_err());
    }

    #[test]
    fn page_wraps_body_in_header_and_footer() {
        let views = Views::default();
        let html = views.page("pages/about.html", context! { title => "About" }).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>About"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let views = Views::default();
        let html = views.page("pages/about.html", context! { title => "<script>" }).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn not_found_survives_broken_templates() {
        let views = Views::new(BrokenEngine);
        let res = views.not_found("Cannot find the news item: <x>");
        assert_eq!(res.status_code(), 404);
        let body = String::from_utf8_lossy(res.body());
        assert!(body.contains("Cannot find the news item: &lt;x&gt;"));
    }
}
