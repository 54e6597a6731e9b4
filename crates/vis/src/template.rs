use serde::Serialize;

use tinytemplate::TinyTemplate;

use crate::error::Result;

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("template/index.html.tt");

const VIEW_TEMPLATE_NAME: &str = "view";
const VIEW_TEMPLATE: &str = include_str!("template/view.html.tt");

/// Renders the report pages from their HTML templates.
pub(crate) struct TemplateEngine<'a> {
    templates: TinyTemplate<'a>,
}

impl TemplateEngine<'_> {
    pub(crate) fn new() -> Result<Self> {
        let mut templates = TinyTemplate::new();
        templates.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        templates.add_template(VIEW_TEMPLATE_NAME, VIEW_TEMPLATE)?;

        Ok(Self { templates })
    }

    pub(crate) fn render_index<C>(&self, context: &C) -> Result<String>
    where
        C: Serialize,
    {
        let html = self.templates.render(INDEX_TEMPLATE_NAME, context)?;

        Ok(html)
    }

    pub(crate) fn render_view<C>(&self, context: &C) -> Result<String>
    where
        C: Serialize,
    {
        let html = self.templates.render(VIEW_TEMPLATE_NAME, context)?;

        Ok(html)
    }
}
