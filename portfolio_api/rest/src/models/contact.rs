use portfolio_models::contact::ContactSubmission;
use serde_json::{Map, Value};

/// Request body of the contact form.
///
/// Fields are accepted as arbitrary json values so that missing, `null` and
/// other falsy values can all be reported as a missing field. The body itself
/// must be a json object.
#[derive(Debug, Clone, Default)]
pub struct ApiContactSubmission {
    /// Full name of the submitter
    pub name: Option<Value>,
    /// Email address of the submitter
    pub email: Option<Value>,
    /// Content of the message
    pub message: Option<Value>,
}

impl From<Map<String, Value>> for ApiContactSubmission {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: body.remove("name"),
            email: body.remove("email"),
            message: body.remove("message"),
        }
    }
}

/// A required field that is missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl ApiContactSubmission {
    /// Checks the fields in order and returns the first one that is missing.
    pub fn validate(self) -> Result<ContactSubmission, MissingField> {
        Ok(ContactSubmission {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            message: required("message", self.message)?,
        })
    }
}

fn required<T: TryFrom<String>>(
    field: &'static str,
    value: Option<Value>,
) -> Result<T, MissingField> {
    value
        .and_then(into_text)
        .and_then(|text| T::try_from(text).ok())
        .ok_or(MissingField(field))
}

/// Converts a truthy json value into text. Falsy values (`null`, `false`,
/// `0`, `""`, `[]` and `{}`) yield `None`.
fn into_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(ref a) if a.is_empty() => None,
        Value::Object(ref o) if o.is_empty() => None,
        Value::String(s) => Some(s),
        value => Some(value.to_string()),
    }
}
