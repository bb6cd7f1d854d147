//! Template loading and management

use api_forge_common::{ForgeError, Result};
use regex::Regex;
use std::collections::HashMap;
use tera::{Tera, Value};

/// Matches a `{param}` segment of an OpenAPI path
const PATH_PARAM_PATTERN: &str = r"\{[^}]*\}";

/// Route regex fragment that stands in for one path parameter
pub const ROUTE_PARAM_REGEX: &str = "[A-Za-z0-9_-]+";

/// Marker left in fixtures where a human must supply a value
pub const PLACEHOLDER: &str = "@@@@@";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    let path_param = Regex::new(PATH_PARAM_PATTERN)
        .map_err(|e| ForgeError::Generation(format!("Invalid path parameter pattern: {}", e)))?;

    // Register custom filters
    tera.register_filter("sql", sql_filter);
    tera.register_filter("md_cell", md_cell_filter);
    tera.register_filter(
        "route_regex",
        replace_params_filter(path_param.clone(), ROUTE_PARAM_REGEX),
    );
    tera.register_filter(
        "path_placeholder",
        replace_params_filter(path_param, PLACEHOLDER),
    );

    let templates = [
        ("api-list.md", include_str!("../templates/api-list.md.tera")),
        ("kongData.sql", include_str!("../templates/kongData.sql.tera")),
        ("aclData.sql", include_str!("../templates/aclData.sql.tera")),
        ("fixture.yaml", include_str!("../templates/fixture.yaml.tera")),
    ];

    for (name, content) in templates {
        tera.add_raw_template(name, content).map_err(|e| {
            ForgeError::Generation(format!("Failed to load {} template: {}", name, e))
        })?;
    }

    Ok(tera)
}

fn expect_str<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} filter expects a string", filter)))
}

/// Filter to escape a value for a single-quoted SQL literal
fn sql_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "sql")?;
    Ok(Value::String(s.replace('\'', "''")))
}

/// Filter to keep a value inside one markdown table cell
fn md_cell_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "md_cell")?;
    Ok(Value::String(s.replace('|', "\\|").replace('\n', " ")))
}

/// Filter that swaps every `{param}` path segment for `replacement`
fn replace_params_filter(
    pattern: Regex,
    replacement: &'static str,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync {
    move |value: &Value, _args: &HashMap<String, Value>| {
        let s = expect_str(value, "path")?;
        Ok(Value::String(
            pattern.replace_all(s, replacement).into_owned(),
        ))
    }
}
