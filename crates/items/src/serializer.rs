//! Declarative field mapping between stored attributes and JSON.
//!
//! A [`Serializer`] is a list of [`FieldSpec`]s. It validates inbound payloads
//! (type coercion, required/blank/null/length checks) and renders stored
//! records back to JSON objects. Messages use the wording clients of the
//! original API already depend on.

use serde_json::{Map, Value};

use itemhub_core::{RecordId, ValidationErrors};

/// Stored attribute map of a record (everything except its identifier).
pub type Attributes = Map<String, Value>;

/// Name of the identifier field in the wire representation.
pub const ID_FIELD: &str = "id";

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_STRING: &str = "Not a valid string.";
const MSG_INTEGER: &str = "A valid integer is required.";
const MSG_BOOLEAN: &str = "Must be a valid boolean.";

const TRUE_VALUES: &[&str] = &["t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1"];
const FALSE_VALUES: &[&str] = &["f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    /// Short string; usually paired with `max_length`.
    Char,
    /// Unbounded string.
    Text,
    Boolean,
}

/// How absent fields are treated during validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationMode {
    /// New record: required fields must be present, defaults fill the rest.
    Create,
    /// Full update (PUT): same rules as `Create`.
    Replace,
    /// Partial update (PATCH): only supplied fields are validated.
    Partial,
}

/// Declaration of one wire field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    pub allow_blank: bool,
    pub allow_null: bool,
    pub max_length: Option<usize>,
    pub default: Option<Value>,
    pub trim_whitespace: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            read_only: false,
            allow_blank: false,
            allow_null: false,
            max_length: None,
            default: None,
            trim_whitespace: matches!(kind, FieldKind::Char | FieldKind::Text),
        }
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn char(name: &'static str, max_length: usize) -> Self {
        Self::new(name, FieldKind::Char).max_length(max_length)
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.required = false;
        self
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// A default makes the field optional.
    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self.required = false;
        self
    }

    pub fn keep_whitespace(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }

    /// Coerce and check a supplied, non-absent value.
    fn clean(&self, raw: &Value) -> Result<Value, String> {
        if raw.is_null() {
            return if self.allow_null { Ok(Value::Null) } else { Err(MSG_NULL.to_string()) };
        }
        match self.kind {
            FieldKind::Char | FieldKind::Text => self.clean_string(raw),
            FieldKind::Integer => clean_integer(raw),
            FieldKind::Boolean => clean_boolean(raw),
        }
    }

    fn clean_string(&self, raw: &Value) -> Result<Value, String> {
        let mut s = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(MSG_STRING.to_string()),
        };
        if self.trim_whitespace {
            s = s.trim().to_string();
        }
        if s.is_empty() && !self.allow_blank {
            return Err(MSG_BLANK.to_string());
        }
        if let Some(max) = self.max_length {
            if s.chars().count() > max {
                return Err(format!("Ensure this field has no more than {max} characters."));
            }
        }
        Ok(Value::String(s))
    }
}

fn clean_integer(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Value::from(f as i64)),
            _ => Err(MSG_INTEGER.to_string()),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| MSG_INTEGER.to_string()),
        _ => Err(MSG_INTEGER.to_string()),
    }
}

fn clean_boolean(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Bool(_) => Ok(raw.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(Value::Bool(true)),
            Some(0) => Ok(Value::Bool(false)),
            _ => Err(MSG_BOOLEAN.to_string()),
        },
        Value::String(s) if TRUE_VALUES.contains(&s.as_str()) => Ok(Value::Bool(true)),
        Value::String(s) if FALSE_VALUES.contains(&s.as_str()) => Ok(Value::Bool(false)),
        _ => Err(MSG_BOOLEAN.to_string()),
    }
}

/// Name of a JSON value's type as clients of the original API see it.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Ordered set of field declarations for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Serializer {
    fields: Vec<FieldSpec>,
}

impl Serializer {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate an inbound payload.
    ///
    /// Returns only the attributes that should be written: read-only and
    /// undeclared keys are dropped, and in `Partial` mode absent fields are
    /// left out entirely.
    pub fn validate(&self, payload: &Value, mode: ValidationMode) -> Result<Attributes, ValidationErrors> {
        let Value::Object(input) = payload else {
            return Err(ValidationErrors::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(payload)
            )));
        };

        let mut out = Attributes::new();
        let mut errors = ValidationErrors::new();

        for field in self.fields.iter().filter(|f| !f.read_only && f.name != ID_FIELD) {
            match input.get(field.name) {
                None if mode == ValidationMode::Partial => {}
                None if field.required => errors.add(field.name, MSG_REQUIRED),
                None => {
                    if let Some(default) = &field.default {
                        out.insert(field.name.to_string(), default.clone());
                    }
                }
                Some(raw) => match field.clean(raw) {
                    Ok(v) => {
                        out.insert(field.name.to_string(), v);
                    }
                    Err(msg) => errors.add(field.name, msg),
                },
            }
        }

        tracing::trace!(?mode, accepted = out.len(), rejected = errors.len(), "payload validated");
        errors.into_result().map(|()| out)
    }

    /// Render a stored record: `id` first, then declared fields in order.
    ///
    /// Declared fields missing from `attributes` render as their default, or
    /// `null` when there is none.
    pub fn to_representation(&self, id: RecordId, attributes: &Attributes) -> Value {
        let mut out = Map::new();
        out.insert(ID_FIELD.to_string(), Value::from(id.get()));
        for field in self.fields.iter().filter(|f| f.name != ID_FIELD) {
            let value = attributes
                .get(field.name)
                .cloned()
                .or_else(|| field.default.clone())
                .unwrap_or(Value::Null);
            out.insert(field.name.to_string(), value);
        }
        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn serializer() -> Serializer {
        Serializer::new(vec![
            FieldSpec::char("name", 10),
            FieldSpec::text("notes").allow_blank().default(json!("")),
            FieldSpec::integer("quantity").optional(),
            FieldSpec::boolean("active").default(json!(true)),
            FieldSpec::char("sku", 20).read_only(),
        ])
    }

    #[test]
    fn create_requires_required_fields() {
        let errors = serializer().validate(&json!({}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn create_fills_defaults_and_skips_optional_fields() {
        let attrs = serializer().validate(&json!({"name": "bolt"}), ValidationMode::Create).unwrap();
        assert_eq!(attrs.get("name"), Some(&json!("bolt")));
        assert_eq!(attrs.get("notes"), Some(&json!("")));
        assert_eq!(attrs.get("active"), Some(&json!(true)));
        assert!(!attrs.contains_key("quantity"));
    }

    #[test]
    fn read_only_and_undeclared_keys_are_dropped() {
        let attrs = serializer()
            .validate(&json!({"name": "bolt", "sku": "X-1", "id": 99, "colour": "red"}), ValidationMode::Create)
            .unwrap();
        assert!(!attrs.contains_key("sku"));
        assert!(!attrs.contains_key("id"));
        assert!(!attrs.contains_key("colour"));
    }

    #[test]
    fn partial_only_touches_supplied_fields() {
        let attrs = serializer().validate(&json!({"quantity": "7"}), ValidationMode::Partial).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("quantity"), Some(&json!(7)));
    }

    #[test]
    fn replace_behaves_like_create_for_missing_fields() {
        let errors = serializer().validate(&json!({"notes": "x"}), ValidationMode::Replace).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
    }

    #[test]
    fn string_rules_trim_blank_and_length() {
        let s = serializer();
        let attrs = s.validate(&json!({"name": "  nut  "}), ValidationMode::Create).unwrap();
        assert_eq!(attrs.get("name"), Some(&json!("nut")));

        let errors = s.validate(&json!({"name": "   "}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field may not be blank."]);

        let errors = s.validate(&json!({"name": "abcdefghijk"}), ValidationMode::Create).unwrap_err();
        assert_eq!(
            errors.get("name").unwrap(),
            ["Ensure this field has no more than 10 characters."]
        );
    }

    #[test]
    fn numbers_coerce_to_strings_but_objects_do_not() {
        let s = serializer();
        let attrs = s.validate(&json!({"name": 42}), ValidationMode::Create).unwrap();
        assert_eq!(attrs.get("name"), Some(&json!("42")));

        let errors = s.validate(&json!({"name": ["a"]}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["Not a valid string."]);
    }

    #[test]
    fn null_is_rejected_unless_allowed() {
        let errors = serializer()
            .validate(&json!({"name": null}), ValidationMode::Create)
            .unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["This field may not be null."]);

        let s = Serializer::new(vec![FieldSpec::text("memo").optional().allow_null()]);
        let attrs = s.validate(&json!({"memo": null}), ValidationMode::Create).unwrap();
        assert_eq!(attrs.get("memo"), Some(&Value::Null));
    }

    #[test]
    fn integer_and_boolean_coercion() {
        let s = serializer();
        let errors = s
            .validate(&json!({"name": "a", "quantity": 1.5, "active": "maybe"}), ValidationMode::Create)
            .unwrap_err();
        assert_eq!(errors.get("quantity").unwrap(), ["A valid integer is required."]);
        assert_eq!(errors.get("active").unwrap(), ["Must be a valid boolean."]);

        let attrs = s
            .validate(&json!({"name": "a", "quantity": 3.0, "active": "off"}), ValidationMode::Create)
            .unwrap();
        assert_eq!(attrs.get("quantity"), Some(&json!(3)));
        assert_eq!(attrs.get("active"), Some(&json!(false)));
    }

    #[test]
    fn non_object_payload_is_a_non_field_error() {
        let errors = serializer().validate(&json!([1, 2]), ValidationMode::Create).unwrap_err();
        assert_eq!(
            errors.get("non_field_errors").unwrap(),
            ["Invalid data. Expected a dictionary, but got list."]
        );
    }

    #[test]
    fn representation_puts_id_first_and_fills_missing_fields() {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), json!("bolt"));
        let rep = serializer().to_representation(RecordId::new(5).unwrap(), &attrs);

        let keys: Vec<_> = rep.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "name", "notes", "quantity", "active", "sku"]);
        assert_eq!(rep["id"], 5);
        assert_eq!(rep["notes"], "");
        assert_eq!(rep["quantity"], Value::Null);
        assert_eq!(rep["active"], true);
    }

    proptest! {
        /// Any string within the length limit survives validation, trimmed.
        #[test]
        fn short_names_are_accepted_trimmed(name in "[a-z]{1,10}", pad in 0usize..4) {
            let padded = format!("{}{}{}", " ".repeat(pad), name, " ".repeat(pad));
            let attrs = serializer()
                .validate(&json!({ "name": padded }), ValidationMode::Create)
                .unwrap();
            prop_assert_eq!(attrs.get("name"), Some(&json!(name)));
        }

        #[test]
        fn long_names_are_rejected(name in "[a-z]{11,40}") {
            let errors = serializer()
                .validate(&json!({ "name": name }), ValidationMode::Create)
                .unwrap_err();
            prop_assert!(errors.get("name").is_some());
        }
    }
}
