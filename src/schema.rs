//! Audit submission schema and validation.
//!
//! The inbound boundary is an untyped JSON payload; the outbound boundary is
//! the fixed-shape [`AuditRecord`]. [`validate`] is the single translation
//! point between the two: it checks every declared rule, applies defaults for
//! absent optional fields, and ignores unknown fields so older frontends can
//! keep submitting after the form grows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated mini-audit submission from the website contact form.
///
/// After validation every field holds a concrete value: required fields are
/// guaranteed present and `processes` is always a sequence, empty when the
/// caller omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub company_name: String,
    pub contact_email: String,
    pub industry: Option<String>,
    pub team_size: Option<String>,
    #[serde(default)]
    pub processes: Vec<String>,
    pub pain_points: Option<String>,
    pub current_tools: Option<String>,
    pub budget_range: Option<String>,
    pub urgency: Option<String>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate an arbitrary JSON payload into an [`AuditRecord`].
///
/// All rule violations are collected and returned together rather than
/// stopping at the first one, so the frontend can highlight every offending
/// field at once.
pub fn validate(payload: &Value) -> Result<AuditRecord, Vec<FieldError>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![FieldError::new("payload", "must be a JSON object")]);
    };

    let mut errors = Vec::new();

    let company_name = match object.get("company_name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        Some(Value::String(_)) => {
            errors.push(FieldError::new("company_name", "must not be empty"));
            String::new()
        }
        Some(_) => {
            errors.push(FieldError::new("company_name", "must be a string"));
            String::new()
        }
        None => {
            errors.push(FieldError::new("company_name", "is required"));
            String::new()
        }
    };

    let contact_email = match object.get("contact_email") {
        Some(Value::String(address)) if is_valid_email(address) => address.clone(),
        Some(Value::String(_)) => {
            errors.push(FieldError::new(
                "contact_email",
                "must be a valid email address",
            ));
            String::new()
        }
        Some(_) => {
            errors.push(FieldError::new("contact_email", "must be a string"));
            String::new()
        }
        None => {
            errors.push(FieldError::new("contact_email", "is required"));
            String::new()
        }
    };

    let industry = optional_string(object, "industry").unwrap_or_else(|e| {
        errors.push(e);
        None
    });
    let team_size = optional_string(object, "team_size").unwrap_or_else(|e| {
        errors.push(e);
        None
    });
    let pain_points = optional_string(object, "pain_points").unwrap_or_else(|e| {
        errors.push(e);
        None
    });
    let current_tools = optional_string(object, "current_tools").unwrap_or_else(|e| {
        errors.push(e);
        None
    });
    let budget_range = optional_string(object, "budget_range").unwrap_or_else(|e| {
        errors.push(e);
        None
    });
    let urgency = optional_string(object, "urgency").unwrap_or_else(|e| {
        errors.push(e);
        None
    });

    let processes = string_sequence(object, "processes").unwrap_or_else(|e| {
        errors.push(e);
        Vec::new()
    });

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(AuditRecord {
        company_name,
        contact_email,
        industry,
        team_size,
        processes,
        pain_points,
        current_tools,
        budget_range,
        urgency,
    })
}

/// Optional string field: absence and JSON null both resolve to `None`.
fn optional_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, FieldError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(FieldError::new(field, "must be a string")),
    }
}

/// Optional sequence-of-strings field: absence resolves to an empty sequence.
fn string_sequence(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, FieldError> {
    match object.get(field) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(value) => Ok(value.clone()),
                _ => Err(FieldError::new(field, "must contain only strings")),
            })
            .collect(),
        Some(_) => Err(FieldError::new(field, "must be a sequence of strings")),
    }
}

/// Minimal email syntax check: a local part, an "@", and a domain containing
/// at least one dot, with no whitespace anywhere.
fn is_valid_email(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(errors: Vec<FieldError>) -> Vec<&'static str> {
        errors.into_iter().map(|e| e.field).collect()
    }

    #[test]
    fn minimal_payload_applies_defaults() {
        let record = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
        }))
        .unwrap();
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.contact_email, "a@b.com");
        assert_eq!(record.processes, Vec::<String>::new());
        assert_eq!(record.industry, None);
        assert_eq!(record.urgency, None);
    }

    #[test]
    fn full_payload_is_preserved() {
        let record = validate(&json!({
            "company_name": "Acme",
            "contact_email": "ops@acme.fr",
            "industry": "logistics",
            "team_size": "10-50",
            "processes": ["invoicing", "support"],
            "pain_points": "manual data entry",
            "current_tools": "spreadsheets",
            "budget_range": "5-10k",
            "urgency": "this quarter",
        }))
        .unwrap();
        assert_eq!(record.processes, vec!["invoicing", "support"]);
        assert_eq!(record.industry.as_deref(), Some("logistics"));
        assert_eq!(record.budget_range.as_deref(), Some("5-10k"));
    }

    #[test]
    fn empty_company_name_is_rejected() {
        let errors = validate(&json!({
            "company_name": "",
            "contact_email": "a@b.com",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["company_name"]);
    }

    #[test]
    fn missing_required_fields_are_both_reported() {
        let errors = validate(&json!({})).unwrap_err();
        assert_eq!(fields(errors), vec!["company_name", "contact_email"]);
    }

    #[test]
    fn company_name_must_be_a_string() {
        let errors = validate(&json!({
            "company_name": 42,
            "contact_email": "a@b.com",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["company_name"]);
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "not-an-email",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["contact_email"]);
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["contact_email"]);
    }

    #[test]
    fn email_with_whitespace_is_rejected() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a b@c.com",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["contact_email"]);
    }

    #[test]
    fn subdomain_and_plus_addresses_are_accepted() {
        for address in ["ops+leads@mail.acme.fr", "a.b@c.d.e"] {
            let result = validate(&json!({
                "company_name": "Acme",
                "contact_email": address,
            }));
            assert!(result.is_ok(), "{address} should be accepted");
        }
    }

    #[test]
    fn null_optional_fields_resolve_to_none() {
        let record = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
            "industry": null,
            "pain_points": null,
        }))
        .unwrap();
        assert_eq!(record.industry, None);
        assert_eq!(record.pain_points, None);
    }

    #[test]
    fn non_string_optional_field_is_rejected() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
            "team_size": 12,
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["team_size"]);
    }

    #[test]
    fn processes_with_non_string_element_is_rejected() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
            "processes": ["invoicing", 3],
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["processes"]);
    }

    #[test]
    fn processes_must_be_a_sequence() {
        let errors = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
            "processes": "invoicing",
        }))
        .unwrap_err();
        assert_eq!(fields(errors), vec!["processes"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = validate(&json!({
            "company_name": "Acme",
            "contact_email": "a@b.com",
            "utm_source": "newsletter",
            "honeypot": "",
        }))
        .unwrap();
        let document = serde_json::to_value(&record).unwrap();
        assert!(document.get("utm_source").is_none());
        assert!(document.get("honeypot").is_none());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let errors = validate(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(fields(errors), vec!["payload"]);
    }

    #[test]
    fn multiple_violations_are_collected() {
        let errors = validate(&json!({
            "company_name": "",
            "contact_email": "nope",
            "processes": 1,
        }))
        .unwrap_err();
        assert_eq!(
            fields(errors),
            vec!["company_name", "contact_email", "processes"]
        );
    }
}
