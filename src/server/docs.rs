//! HTML documentation page served at `/`

use handlebars::Handlebars;
use serde::Serialize;

use super::ServerError;
use crate::regions::{Region, RegionRegistry};

const DOCS_TEMPLATE: &str = include_str!("../../templates/docs.hbs");

#[derive(Debug, Serialize)]
struct RegionLink {
    code: &'static str,
    code_upper: String,
    name: &'static str,
}

impl From<&Region> for RegionLink {
    fn from(region: &Region) -> Self {
        Self {
            code: region.code,
            code_upper: region.code.to_uppercase(),
            name: region.name,
        }
    }
}

#[derive(Debug, Serialize)]
struct DocsTemplateData<'a> {
    developer: &'a str,
    regions: Vec<RegionLink>,
}

/// Render the documentation page for every region in `registry`
///
/// Interpolated values are HTML-escaped.
pub fn render_docs(registry: RegionRegistry, developer: &str) -> Result<String, ServerError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(|s| html_escape::encode_safe(s).into_owned());
    handlebars
        .register_template_string("docs", DOCS_TEMPLATE)
        .map_err(|e| ServerError::Init(format!("invalid docs template: {e}")))?;

    let data = DocsTemplateData {
        developer,
        regions: registry.list().iter().map(RegionLink::from).collect(),
    };

    handlebars
        .render("docs", &data)
        .map_err(|e| ServerError::Init(format!("failed to render docs page: {e}")))
}
