//! JSON session templates.
//!
//! A template is an ordered array of objects, each mapping a session name to
//! its working directory:
//!
//! ```json
//! [
//!     { "api": "~/src/api" },
//!     { "web": "~/src/web" }
//! ]
//! ```
//!
//! An object may hold several entries; they are taken in the order written.
//! The whole file is validated before any session is touched.

use crate::error::{Result, SessionupError};
use crate::orchestrator::SessionRequest;
use serde_json::Value;
use std::path::Path;

/// Parse template text into session requests, preserving order.
///
/// # Errors
///
/// - [`SessionupError::TemplateParse`] if the text is not valid JSON
/// - [`SessionupError::InvalidTemplate`] if the JSON does not have the
///   expected shape
pub fn parse_template(json: &str) -> Result<Vec<SessionRequest>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(entries) = value else {
        return Err(SessionupError::InvalidTemplate(
            "expected an array of {\"name\": \"path\"} objects".into(),
        ));
    };

    let mut requests = Vec::new();
    for (i, entry) in entries.into_iter().enumerate() {
        let Value::Object(map) = entry else {
            return Err(SessionupError::InvalidTemplate(format!(
                "entry {} is not an object",
                i
            )));
        };
        for (name, path) in map {
            match path {
                Value::String(path) => requests.push(SessionRequest::new(name, path)),
                other => {
                    return Err(SessionupError::InvalidTemplate(format!(
                        "path for session '{}' must be a string, found {}",
                        name, other
                    )));
                }
            }
        }
    }
    Ok(requests)
}

/// Read and parse a template file.
///
/// # Errors
///
/// - [`SessionupError::TemplateNotFound`] if the file doesn't exist
/// - [`SessionupError::IoError`] if reading fails
/// - any error from [`parse_template`]
pub fn load_template(path: &Path) -> Result<Vec<SessionRequest>> {
    if !path.exists() {
        return Err(SessionupError::TemplateNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let requests = parse_template(&contents)?;
    tracing::info!(path = %path.display(), sessions = requests.len(), "loaded template");
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let requests = parse_template(
            r#"[{"zeta": "/z"}, {"alpha": "/a", "beta": "~/b"}]"#,
        )
        .unwrap();
        let names: Vec<_> = requests.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "beta"]);
        assert_eq!(requests[2].working_directory, "~/b");
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_template(r#"[{"demo": "/tmp/x"}"#),
            Err(SessionupError::TemplateParse(_))
        ));
    }

    #[test]
    fn test_parse_wrong_shape() {
        assert!(matches!(
            parse_template(r#"{"demo": "/tmp/x"}"#),
            Err(SessionupError::InvalidTemplate(_))
        ));
        assert!(matches!(
            parse_template(r#"["demo"]"#),
            Err(SessionupError::InvalidTemplate(_))
        ));
        let err = parse_template(r#"[{"demo": 3}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid template: path for session 'demo' must be a string, found 3"
        );
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_template("[]").unwrap().is_empty());
    }
}
