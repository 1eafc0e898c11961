//! Template validation against a synthetic context

use super::context::{PhishingTemplateContext, Recipient, TemplateContext};
use super::engine;
use super::errors::TemplateValidationError;

/// Recipient identifier used for validation renders.
const VALIDATION_RID: &str = "validate123";

/// Context provider with fixed data, used only for validation renders.
#[derive(Clone, Debug)]
struct ValidationContext;

impl TemplateContext for ValidationContext {
    fn from_address(&self) -> String {
        "foo@bar.com".to_string()
    }

    fn base_url(&self) -> String {
        "http://example.com".to_string()
    }
}

/// Checks that `body` parses and only references variables and functions
/// the engine supports, by rendering it against a synthetic context.
///
/// Called by the persistence layer before accepting a template or landing
/// page; nothing is persisted here, and a body that fails once fails every
/// time for the same input.
pub fn validate_template(body: &str) -> Result<(), TemplateValidationError> {
    let recipient = Recipient {
        email: "foo@bar.com".to_string(),
        first_name: "Foo".to_string(),
        last_name: "Bar".to_string(),
        position: "Test".to_string(),
    };
    let context = PhishingTemplateContext::new(&ValidationContext, &recipient, VALIDATION_RID)?;
    engine::render(body, &context)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::super::errors::RenderError;
    use super::*;

    #[test]
    fn test_supported_variables_validate() -> TestResult {
        validate_template("{{.FirstName}}")?;
        validate_template("{{.From}} {{.URL}} {{.Tracker}} {{.TrackingURL}} {{.BaseURL}}")?;
        validate_template("{{hora}}")?;

        Ok(())
    }

    #[test]
    fn test_empty_body_validates() -> TestResult {
        validate_template("")?;

        Ok(())
    }

    #[test]
    fn test_unknown_variable_fails_with_an_execution_error() {
        let result = validate_template("{{.Unknown}}");

        assert!(matches!(
            result,
            Err(TemplateValidationError::Render(RenderError::Execution(_)))
        ));
    }

    #[test]
    fn test_unclosed_action_fails_with_a_parse_error() {
        let result = validate_template("Hello {{.FirstName");

        assert!(matches!(
            result,
            Err(TemplateValidationError::Render(RenderError::Parse(_)))
        ));
    }

    #[test]
    fn test_validation_failure_is_repeatable() {
        assert!(validate_template("{{.Unknown}}").is_err());
        assert!(validate_template("{{.Unknown}}").is_err());
    }

    #[test]
    fn test_validation_context_renders_the_documented_example() -> TestResult {
        let recipient = Recipient {
            email: "foo@bar.com".to_string(),
            first_name: "Foo".to_string(),
            last_name: "Bar".to_string(),
            position: "Test".to_string(),
        };
        let context =
            PhishingTemplateContext::new(&ValidationContext, &recipient, VALIDATION_RID)?;

        let rendered = engine::render("Hello {{.FirstName}}, click {{.URL}}", &context)?;

        assert_eq!(
            rendered,
            "Hello Foo, click http://example.com/?rid=validate123"
        );

        Ok(())
    }
}
