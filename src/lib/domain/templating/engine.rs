//! Template execution engine
//!
//! A minimal action syntax: literal text plus `{{ ... }}` actions. An
//! action is either a field chain rooted at the data (`{{.FirstName}}`,
//! `{{.A.B}}`) or the name of a registered function. The only registered
//! function is `hora`, which renders the current wall-clock time as
//! `HH:MM`. There is no code-execution surface beyond that.

use chrono::Local;
use serde::Serialize;
use serde_json::Value;

use super::errors::RenderError;

const OPEN_DELIMITER: &str = "{{";
const CLOSE_DELIMITER: &str = "}}";

#[derive(Debug, PartialEq)]
enum Node {
    Text(String),
    Field(Vec<String>),
    Function(Function),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Function {
    Hora,
}

/// Renders `body` against `data`.
///
/// Fields are looked up by name on the serialized form of `data`.
/// Rendering is pure apart from the wall-clock read inside `hora`.
pub fn render<T: Serialize>(body: &str, data: &T) -> Result<String, RenderError> {
    let nodes = parse(body)?;
    let value = serde_json::to_value(data)?;
    execute(&nodes, &value)
}

fn parse(body: &str) -> Result<Vec<Node>, RenderError> {
    let mut nodes = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find(OPEN_DELIMITER) {
        if start > 0 {
            nodes.push(Node::Text(rest[..start].to_string()));
        }
        let after_open = &rest[start + OPEN_DELIMITER.len()..];
        let end = after_open
            .find(CLOSE_DELIMITER)
            .ok_or_else(|| RenderError::Parse("unclosed action".to_string()))?;
        nodes.push(parse_action(after_open[..end].trim())?);
        rest = &after_open[end + CLOSE_DELIMITER.len()..];
    }

    if !rest.is_empty() {
        nodes.push(Node::Text(rest.to_string()));
    }

    Ok(nodes)
}

fn parse_action(action: &str) -> Result<Node, RenderError> {
    if action.is_empty() {
        return Err(RenderError::Parse("empty action".to_string()));
    }

    if let Some(chain) = action.strip_prefix('.') {
        if chain.is_empty() {
            return Ok(Node::Field(Vec::new()));
        }
        let segments: Vec<String> = chain.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(RenderError::Parse(format!("bad field chain {action:?}")));
        }
        return Ok(Node::Field(segments));
    }

    match action {
        "hora" => Ok(Node::Function(Function::Hora)),
        name => Err(RenderError::Parse(format!("function {name:?} not defined"))),
    }
}

fn execute(nodes: &[Node], data: &Value) -> Result<String, RenderError> {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(chain) => out.push_str(&lookup(data, chain)?),
            Node::Function(Function::Hora) => out.push_str(&hora()),
        }
    }
    Ok(out)
}

fn lookup(data: &Value, chain: &[String]) -> Result<String, RenderError> {
    let mut current = data;
    for segment in chain {
        current = current
            .as_object()
            .and_then(|object| object.get(segment.as_str()))
            .ok_or_else(|| {
                RenderError::Execution(format!(
                    "can't evaluate field {segment} in template data"
                ))
            })?;
    }
    stringify(current)
}

fn stringify(value: &Value) -> Result<String, RenderError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(boolean) => Ok(boolean.to_string()),
        Value::Null => Ok("<no value>".to_string()),
        Value::Object(_) | Value::Array(_) => Err(RenderError::Execution(
            "can't print a non-scalar value".to_string(),
        )),
    }
}

fn hora() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_render_literal_text() -> TestResult {
        let out = render("no actions here", &json!({}))?;

        assert_eq!(out, "no actions here");

        Ok(())
    }

    #[test]
    fn test_render_substitutes_fields() -> TestResult {
        let data = json!({ "FirstName": "Foo", "LastName": "Bar" });

        let out = render("Hello {{.FirstName}} {{.LastName}}!", &data)?;

        assert_eq!(out, "Hello Foo Bar!");

        Ok(())
    }

    #[test]
    fn test_render_trims_action_whitespace() -> TestResult {
        let out = render("{{ .FirstName }}", &json!({ "FirstName": "Foo" }))?;

        assert_eq!(out, "Foo");

        Ok(())
    }

    #[test]
    fn test_render_nested_field_chain() -> TestResult {
        let data = json!({ "Outer": { "Inner": "value" } });

        let out = render("{{.Outer.Inner}}", &data)?;

        assert_eq!(out, "value");

        Ok(())
    }

    #[test]
    fn test_render_numbers_and_booleans() -> TestResult {
        let data = json!({ "Count": 3, "Active": true });

        let out = render("{{.Count}} {{.Active}}", &data)?;

        assert_eq!(out, "3 true");

        Ok(())
    }

    #[test]
    fn test_unclosed_action_is_a_parse_error() {
        let result = render("Hello {{.FirstName", &json!({}));

        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_unknown_function_is_a_parse_error() {
        let result = render("{{tiempo}}", &json!({}));

        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_empty_action_is_a_parse_error() {
        let result = render("{{}}", &json!({}));

        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_missing_field_is_an_execution_error() {
        let result = render("{{.Unknown}}", &json!({ "FirstName": "Foo" }));

        assert!(matches!(result, Err(RenderError::Execution(_))));
    }

    #[test]
    fn test_field_chain_through_scalar_is_an_execution_error() {
        let result = render("{{.FirstName.Inner}}", &json!({ "FirstName": "Foo" }));

        assert!(matches!(result, Err(RenderError::Execution(_))));
    }

    #[test]
    fn test_render_failure_is_deterministic() {
        let data = json!({ "FirstName": "Foo" });

        assert!(render("{{.Unknown}}", &data).is_err());
        assert!(render("{{.Unknown}}", &data).is_err());
    }

    #[test]
    fn test_hora_renders_a_wall_clock_time() -> TestResult {
        let out = render("{{hora}}", &json!({}))?;

        assert_eq!(out.len(), 5);
        let (hours, minutes) = (&out[..2], &out[3..]);
        assert_eq!(&out[2..3], ":");
        assert!(hours.chars().all(|ch| ch.is_ascii_digit()));
        assert!(minutes.chars().all(|ch| ch.is_ascii_digit()));

        Ok(())
    }
}
