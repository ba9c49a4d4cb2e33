//! Rendering of the IDE bootstrap page.

use ide_core::ProfileName;
use serde::Serialize;
use serde_json::Value;

/// Errors produced while rendering a response body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("failed to encode render context: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Values handed to the renderer for one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext<'a> {
    pub architect_config: &'a Value,
    pub config_name: &'a ProfileName,
    pub packed: bool,
    pub version: Option<&'a str>,
}

/// Produces the HTML body for `GET /ide.html`.
pub trait Renderer: Send + Sync {
    /// # Errors
    /// Returns [`RenderError`] if the context cannot be rendered.
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Minimal page embedding the render context as `window.ideBootstrap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapPage;

impl Renderer for BootstrapPage {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError> {
        // Keep "</script>" inside string values from closing the tag.
        let payload = serde_json::to_string(context)?.replace("</", "<\\/");
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
             <body>\n<script>window.ideBootstrap = {payload};</script>\n</body>\n</html>\n",
            context.config_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_embeds_context() {
        let config = json!({"plugins": ["ace"]});
        let name = ProfileName::new("ether-camp-server");
        let context = RenderContext {
            architect_config: &config,
            config_name: &name,
            packed: true,
            version: Some("3.1.0"),
        };
        let html = match BootstrapPage.render(&context) {
            Ok(h) => h,
            Err(e) => panic!("render failed: {e}"),
        };
        assert!(html.contains("\"configName\":\"ether-camp-server\""), "missing config name");
        assert!(html.contains("\"architectConfig\":{\"plugins\":[\"ace\"]}"), "missing config");
        assert!(html.contains("\"packed\":true"), "missing packed flag");
        assert!(html.contains("\"version\":\"3.1.0\""), "missing version");
    }

    #[test]
    fn script_close_tags_are_escaped() {
        let config = json!({"x": "</script><script>alert(1)</script>"});
        let name = ProfileName::new("p");
        let context = RenderContext { architect_config: &config, config_name: &name, packed: false, version: None };
        let html = match BootstrapPage.render(&context) {
            Ok(h) => h,
            Err(e) => panic!("render failed: {e}"),
        };
        assert_eq!(html.matches("</script>").count(), 1, "only the real closing tag may remain");
    }
}
