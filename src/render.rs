/// HTML planner rendering from the embedded template.
use std::sync::LazyLock;

use chrono::{DateTime, Local, SecondsFormat};
use regex::{Captures, Regex};

use crate::error::Result;
use crate::types::{AreaColor, Program};

const TEMPLATE: &str = include_str!("templates/planner.html");

/// Color of the `--OTRO` variable, used when an area has no variable of its own.
pub const DEFAULT_FALLBACK_COLOR: &str = "#9ca3af";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__(TITLE|AREA_VARS|COURSES_JSON|CODE_JSON|FALLBACK|GENERATED)__")
        .expect("valid placeholder pattern")
});

/// Page-level values that do not come from the workbook.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub fallback_color: String,
    pub generated_at: DateTime<Local>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
            generated_at: Local::now(),
        }
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that can sit inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// `--AREA-X:#rrggbb;` declarations for the `:root` block.
pub fn css_vars(areas: &[AreaColor]) -> String {
    areas
        .iter()
        .map(|a| format!("--{}:{};", a.var_name, a.color))
        .collect()
}

/// Fill the planner template for one program.
pub fn render_planner(program: &Program, areas: &[AreaColor], ctx: &RenderContext) -> Result<String> {
    let title = escape_html(&program.title);
    let vars = css_vars(areas);
    let courses = script_json(&program.courses)?;
    let code = script_json(&program.code)?;
    let generated = format!(
        "Generado por mallas {} el {}",
        env!("CARGO_PKG_VERSION"),
        ctx.generated_at.to_rfc3339_opts(SecondsFormat::Secs, false)
    );

    let page = PLACEHOLDER.replace_all(TEMPLATE, |caps: &Captures| match &caps[1] {
        "TITLE" => title.clone(),
        "AREA_VARS" => vars.clone(),
        "COURSES_JSON" => courses.clone(),
        "CODE_JSON" => code.clone(),
        "FALLBACK" => ctx.fallback_color.clone(),
        "GENERATED" => generated.clone(),
        other => format!("__{other}__"),
    });
    Ok(page.into_owned())
}
