//! Field configuration loading and management

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ordered mapping of field name to its definition
///
/// Order matters: fields are formatted and validated in declaration order, so
/// error records come back in the same order the form declares its fields.
pub type Fields = IndexMap<String, FieldConfig>;

/// Condition gating whether a field takes part in validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    /// Name of the field the condition looks at
    pub field: String,

    /// Value that field must hold for this one to be validated
    pub value: String,
}

/// A validator rule as declared on a field
///
/// Either a bare name (`required`) or a parameterised rule:
///
/// ```yaml
/// validate:
///   - required
///   - type: minlength
///     arguments: 10
///   - type: required
///     group: contact
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidatorRule {
    Name(String),
    Spec {
        #[serde(rename = "type")]
        rule_type: String,

        #[serde(default, deserialize_with = "one_or_many")]
        arguments: Vec<Value>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
}

impl ValidatorRule {
    /// Bare rule referring to a named validator
    pub fn named(name: impl Into<String>) -> Self {
        ValidatorRule::Name(name.into())
    }

    /// Name of the validator this rule dispatches to
    pub fn rule_type(&self) -> &str {
        match self {
            ValidatorRule::Name(name) => name,
            ValidatorRule::Spec { rule_type, .. } => rule_type,
        }
    }

    pub fn arguments(&self) -> &[Value] {
        match self {
            ValidatorRule::Name(_) => &[],
            ValidatorRule::Spec { arguments, .. } => arguments,
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            ValidatorRule::Name(_) => None,
            ValidatorRule::Spec { group, .. } => group.as_deref(),
        }
    }
}

/// One entry of a field's `options` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Value(String),
    Labelled { value: String },
}

impl FieldOption {
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Value(value) => value,
            FieldOption::Labelled { value } => value,
        }
    }
}

/// Definition of a single form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Validator rules, run in order until the first failure
    #[serde(default, deserialize_with = "one_or_many")]
    pub validate: Vec<ValidatorRule>,

    /// Optional condition gating validation of this field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent: Option<Dependent>,

    /// Extra formatters applied after the default chain
    #[serde(default, deserialize_with = "one_or_many")]
    pub formatter: Vec<String>,

    /// Skip the default formatter chain for this field
    #[serde(default, rename = "ignore-defaults")]
    pub ignore_defaults: bool,

    /// Allowed values; adds an implicit `equal` rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldConfig {
    /// Field validated by the given rules
    pub fn with_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ValidatorRule>,
    {
        Self {
            validate: rules.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether a bare rule with this name is declared on the field
    pub fn has_rule(&self, name: &str) -> bool {
        self.validate
            .iter()
            .any(|rule| matches!(rule, ValidatorRule::Name(n) if n == name))
    }
}

/// Complete configuration of a form step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub fields: Fields,
}

impl FormConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

/// Accept either a single item or a list of items
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FORM_YAML: &str = r#"
fields:
  field:
    formatter: uppercase
    validate: required
  email:
    validate: [required, email]
  name:
    validate:
      - required
      - type: minlength
        arguments: [10]
      - type: maxlength
        arguments: 20
  is-thing-notes:
    validate: [required]
    dependent:
      field: is-thing
      value: "true"
  options:
    options: [one, { value: two }, three]
  dob: {}
"#;

    #[test]
    fn test_fields_keep_declaration_order() {
        let fields = FormConfig::from_yaml_str(FORM_YAML).unwrap().into_fields();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["field", "email", "name", "is-thing-notes", "options", "dob"]
        );
    }

    #[test]
    fn test_single_values_become_lists() {
        let fields = FormConfig::from_yaml_str(FORM_YAML).unwrap().into_fields();
        let field = &fields["field"];
        assert_eq!(field.formatter, vec!["uppercase".to_string()]);
        assert_eq!(field.validate, vec![ValidatorRule::named("required")]);
    }

    #[test]
    fn test_parameterised_rules() {
        let fields = FormConfig::from_yaml_str(FORM_YAML).unwrap().into_fields();
        let rules = &fields["name"].validate;
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[1].rule_type(), "minlength");
        assert_eq!(rules[1].arguments(), &[json!(10)]);
        assert_eq!(rules[2].rule_type(), "maxlength");
        assert_eq!(rules[2].arguments(), &[json!(20)]);
    }

    #[test]
    fn test_dependent_and_options() {
        let fields = FormConfig::from_yaml_str(FORM_YAML).unwrap().into_fields();
        assert_eq!(
            fields["is-thing-notes"].dependent,
            Some(Dependent {
                field: "is-thing".to_string(),
                value: "true".to_string(),
            })
        );
        let values: Vec<&str> = fields["options"].options.iter().map(FieldOption::value).collect();
        assert_eq!(values, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_field_definition() {
        let fields = FormConfig::from_yaml_str(FORM_YAML).unwrap().into_fields();
        assert_eq!(fields["dob"], FieldConfig::default());
    }

    #[test]
    fn test_has_rule_only_matches_bare_names() {
        let field = FieldConfig::with_rules(vec![ValidatorRule::Spec {
            rule_type: "required".to_string(),
            arguments: vec![],
            group: Some("contact".to_string()),
        }]);
        assert!(!field.has_rule("required"));
        assert!(FieldConfig::with_rules(vec![ValidatorRule::named("required")]).has_rule("required"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = FormConfig::from_yaml_str(FORM_YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = FormConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.fields, config.fields);
    }
}
