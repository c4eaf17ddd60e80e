//! Key conversion for nested mappings and sequences.
//!
//! The public entry points validate the top-level input once and then hand
//! off to infallible workers. Sequences at the top level are always walked;
//! nested sequences are only walked when deep transformation is enabled.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::key_case::KeyCase;

/// Something that maps an input key to an output key.
pub trait KeyTransform {
    fn transform_key(&self, key: &str) -> String;
}

impl<F> KeyTransform for F
where
    F: Fn(&str) -> String,
{
    fn transform_key(&self, key: &str) -> String {
        self(key)
    }
}

/// Shape of a value as seen by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Mapping,
    Sequence,
    Scalar,
    Nullish,
}

impl ValueKind {
    pub fn of<V: KeyTree>(value: &V) -> Self {
        value.kind()
    }
}

/// A value tree the converter can walk.
///
/// `map_entries` and `map_items` rebuild a mapping or sequence from the
/// converted children; on any other kind they return a clone.
pub trait KeyTree: Clone {
    fn kind(&self) -> ValueKind;

    /// `typeof`-style name used in validation messages.
    fn type_name(&self) -> &'static str;

    /// How the value is printed when it counts as missing input.
    fn missing_repr(&self) -> Option<String>;

    fn map_entries<F>(&self, f: F) -> Self
    where
        F: FnMut(&str, &Self) -> (String, Self);

    fn map_items<F>(&self, f: F) -> Self
    where
        F: FnMut(&Self) -> Self;
}

impl KeyTree for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Object(_) => ValueKind::Mapping,
            Value::Array(_) => ValueKind::Sequence,
            Value::Null => ValueKind::Nullish,
            _ => ValueKind::Scalar,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn missing_repr(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_string()),
            Value::Bool(false) => Some("false".to_string()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => Some(n.to_string()),
            Value::String(s) if s.is_empty() => Some(String::new()),
            _ => None,
        }
    }

    fn map_entries<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &Self) -> (String, Self),
    {
        match self {
            Value::Object(map) => {
                let converted: Map<String, Value> =
                    map.iter().map(|(key, value)| f(key.as_str(), value)).collect();
                Value::Object(converted)
            }
            other => other.clone(),
        }
    }

    fn map_items<F>(&self, f: F) -> Self
    where
        F: FnMut(&Self) -> Self,
    {
        match self {
            Value::Array(items) => Value::Array(items.iter().map(f).collect()),
            other => other.clone(),
        }
    }
}

fn validate_input<V: KeyTree>(input: &V) -> Result<()> {
    if let Some(received) = input.missing_repr() {
        return Err(Error::missing_input(received));
    }

    match input.kind() {
        ValueKind::Mapping | ValueKind::Sequence => Ok(()),
        ValueKind::Scalar | ValueKind::Nullish => Err(Error::invalid_input_type(input.type_name())),
    }
}

/// Converts mapping keys with a transformer.
///
/// ```
/// use keyconv::convert::KeyConverter;
/// use keyconv::KeyCase;
/// use serde_json::json;
///
/// let converter = KeyConverter::new(KeyCase::Snake).deep_transform(false);
/// let out = converter.convert(&json!({"userId": 1, "meta": {"createdAt": 2}})).unwrap();
/// assert_eq!(out, json!({"user_id": 1, "meta": {"createdAt": 2}}));
/// ```
#[derive(Debug, Clone)]
pub struct KeyConverter<T> {
    transformer: T,
    deep_transform: bool,
}

impl<T: KeyTransform> KeyConverter<T> {
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            deep_transform: true,
        }
    }

    pub fn deep_transform(mut self, deep_transform: bool) -> Self {
        self.deep_transform = deep_transform;
        self
    }

    pub fn is_deep(&self) -> bool {
        self.deep_transform
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Validate `input` and return a converted copy.
    pub fn convert<V: KeyTree>(&self, input: &V) -> Result<V> {
        validate_input(input)?;
        Ok(self.convert_top_level(input))
    }

    fn convert_top_level<V: KeyTree>(&self, input: &V) -> V {
        match input.kind() {
            ValueKind::Sequence => input.map_items(|item| self.convert_nested(item)),
            ValueKind::Mapping => self.convert_mapping(input),
            ValueKind::Scalar | ValueKind::Nullish => input.clone(),
        }
    }

    fn convert_nested<V: KeyTree>(&self, value: &V) -> V {
        match value.kind() {
            ValueKind::Sequence if self.deep_transform => {
                value.map_items(|item| self.convert_nested(item))
            }
            ValueKind::Mapping => self.convert_mapping(value),
            _ => value.clone(),
        }
    }

    fn convert_mapping<V: KeyTree>(&self, map: &V) -> V {
        map.map_entries(|key, value| {
            let value = match value.kind() {
                ValueKind::Mapping | ValueKind::Sequence if self.deep_transform => {
                    self.convert_nested(value)
                }
                _ => value.clone(),
            };
            (self.transformer.transform_key(key), value)
        })
    }
}

/// Convert the keys of `input` with a closure.
pub fn convert<F>(input: &Value, transformer: F, deep_transform: bool) -> Result<Value>
where
    F: Fn(&str) -> String,
{
    KeyConverter::new(transformer)
        .deep_transform(deep_transform)
        .convert(input)
}

/// Convert the keys of `input` with a transformer given as data.
///
/// The input is validated before the transformer, so a bad input is
/// reported even when the transformer is also invalid.
pub fn convert_with_spec(input: &Value, transformer: &Value, deep_transform: bool) -> Result<Value> {
    validate_input(input)?;
    let case = KeyCase::from_spec(transformer)?;
    Ok(KeyConverter::new(case)
        .deep_transform(deep_transform)
        .convert_top_level(input))
}

/// Serialize `input` and convert the keys of the result.
pub fn convert_serializable<S, F>(input: &S, transformer: F, deep_transform: bool) -> Result<Value>
where
    S: Serialize + ?Sized,
    F: Fn(&str) -> String,
{
    let value = serde_json::to_value(input)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize input".to_string())))?;
    convert(&value, transformer, deep_transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn lower(key: &str) -> String {
        key.to_lowercase()
    }

    fn object_input() -> Value {
        json!({
            "FOO": "foo",
            "BAR": { "BAZ": "baz" },
            "BLEP": [
                { "BEEP": "beep" },
                { "BOOP": "boop" }
            ]
        })
    }

    fn array_input() -> Value {
        json!([{
            "FOO": {
                "BAR": "bar",
                "BAZ": [
                    { "BEEP": "beep" },
                    { "BOOP": "boop" }
                ]
            }
        }])
    }

    #[test]
    fn converts_top_level_keys() {
        let out = convert(&object_input(), lower, true).unwrap();
        assert_eq!(out["foo"], "foo");
        assert!(out.get("FOO").is_none());
    }

    #[test]
    fn deep_transform_converts_every_level() {
        let out = convert(&object_input(), lower, true).unwrap();
        assert_eq!(
            out,
            json!({
                "foo": "foo",
                "bar": { "baz": "baz" },
                "blep": [{ "beep": "beep" }, { "boop": "boop" }]
            })
        );
    }

    #[test]
    fn shallow_transform_leaves_nested_keys() {
        let out = convert(&object_input(), lower, false).unwrap();
        assert_eq!(
            out,
            json!({
                "foo": "foo",
                "bar": { "BAZ": "baz" },
                "blep": [{ "BEEP": "beep" }, { "BOOP": "boop" }]
            })
        );
    }

    #[test]
    fn nested_mapping_scenarios() {
        let input = json!({"FOO": "foo", "BAR": {"BAZ": "baz"}});
        assert_eq!(
            convert(&input, lower, true).unwrap(),
            json!({"foo": "foo", "bar": {"baz": "baz"}})
        );
        assert_eq!(
            convert(&input, lower, false).unwrap(),
            json!({"foo": "foo", "bar": {"BAZ": "baz"}})
        );
    }

    #[test]
    fn top_level_sequence_with_deep_transform() {
        let out = convert(&array_input(), lower, true).unwrap();
        assert_eq!(
            out,
            json!([{
                "foo": {
                    "bar": "bar",
                    "baz": [{ "beep": "beep" }, { "boop": "boop" }]
                }
            }])
        );
    }

    #[test]
    fn top_level_sequence_elements_convert_when_shallow() {
        let out = convert(&array_input(), lower, false).unwrap();
        assert_eq!(
            out,
            json!([{
                "foo": {
                    "BAR": "bar",
                    "BAZ": [{ "BEEP": "beep" }, { "BOOP": "boop" }]
                }
            }])
        );
    }

    #[test]
    fn simple_sequence_scenario() {
        let out = convert(&json!([{"FOO": {"BAR": "bar"}}]), lower, true).unwrap();
        assert_eq!(out, json!([{"foo": {"bar": "bar"}}]));
    }

    #[test]
    fn nested_sequence_in_top_level_sequence_is_kept_when_shallow() {
        let input = json!([[{"A": 1}], {"B": [{"C": 2}]}]);
        let out = convert(&input, lower, false).unwrap();
        assert_eq!(out, json!([[{"A": 1}], {"b": [{"C": 2}]}]));

        let out = convert(&input, lower, true).unwrap();
        assert_eq!(out, json!([[{"a": 1}], {"b": [{"c": 2}]}]));
    }

    #[test]
    fn scalars_and_nulls_pass_through() {
        let input = json!({"A": null, "B": [null, "x", 3, true], "C": 1.5});
        let out = convert(&input, lower, true).unwrap();
        assert_eq!(out, json!({"a": null, "b": [null, "x", 3, true], "c": 1.5}));

        let out = convert(&json!(["text", null, 0]), lower, true).unwrap();
        assert_eq!(out, json!(["text", null, 0]));
    }

    #[test]
    fn identity_transformer_preserves_value() {
        let input = object_input();
        let out = convert(&input, |k| k.to_string(), true).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = object_input();
        let before = input.clone();
        let _ = convert(&input, lower, true).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn keeps_entry_order() {
        let input = json!({"Zeta": 1, "Alpha": 2, "Mid": 3});
        let out = convert(&input, lower, true).unwrap();
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn colliding_keys_keep_last_entry() {
        let input = json!({"Key": 1, "KEY": 2});
        let out = convert(&input, lower, true).unwrap();
        assert_eq!(out, json!({"key": 2}));
    }

    #[test]
    fn empty_containers_are_valid() {
        assert_eq!(convert(&json!({}), lower, true).unwrap(), json!({}));
        assert_eq!(convert(&json!([]), lower, true).unwrap(), json!([]));
    }

    #[test]
    fn null_input_is_missing() {
        let err = convert(&Value::Null, lower, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationMissingInput);
        assert_eq!(
            err.message,
            "Input is required and must be either an object or an array, received null"
        );
    }

    #[test]
    fn falsy_scalars_are_missing() {
        for input in [json!(false), json!(0), json!(0.0), json!("")] {
            let err = convert(&input, lower, true).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationMissingInput, "{}", input);
        }
    }

    #[test]
    fn truthy_scalars_are_invalid_type() {
        let err = convert(&json!("What's up?"), lower, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidInputType);
        assert_eq!(
            err.message,
            "Expected either an object or an array, received string"
        );

        let err = convert(&json!(7), lower, true).unwrap_err();
        assert!(err.message.ends_with("received number"));

        let err = convert(&json!(true), lower, true).unwrap_err();
        assert!(err.message.ends_with("received boolean"));
    }

    #[test]
    fn spec_transformer_resolves_key_case() {
        let out = convert_with_spec(&json!({"userId": {"firstName": "a"}}), &json!("snake"), true)
            .unwrap();
        assert_eq!(out, json!({"user_id": {"first_name": "a"}}));
    }

    #[test]
    fn spec_transformer_rejects_unknown_string() {
        let err = convert_with_spec(&json!({}), &json!("not a function"), true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidTransformer);
        assert!(err.message.contains("string"));
    }

    #[test]
    fn input_is_validated_before_transformer() {
        let err = convert_with_spec(&Value::Null, &json!(5), true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationMissingInput);
    }

    #[test]
    fn converter_builder_defaults_to_deep() {
        let converter = KeyConverter::new(KeyCase::Upper);
        assert!(converter.is_deep());
        let out = converter.convert(&json!({"a": {"b": 1}})).unwrap();
        assert_eq!(out, json!({"A": {"B": 1}}));
    }

    #[test]
    fn converter_accepts_annotated_closures() {
        let converter = KeyConverter::new(|k: &str| format!("x_{}", k));
        let out = converter.convert(&json!({"a": 1})).unwrap();
        assert_eq!(out, json!({"x_a": 1}));
    }

    #[test]
    fn serializable_input_is_converted() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Profile {
            display_name: String,
            login_count: u32,
        }

        let profile = Profile {
            display_name: "Ada".to_string(),
            login_count: 3,
        };
        let out = convert_serializable(&profile, |k| KeyCase::Snake.apply(k), true).unwrap();
        assert_eq!(out, json!({"display_name": "Ada", "login_count": 3}));
    }

    #[test]
    fn serializable_scalar_is_rejected() {
        let err = convert_serializable("plain", lower, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidInputType);
    }

    fn prefixed(key: &str) -> String {
        format!("x_{}", key)
    }

    #[test]
    fn top_level_sequence_elements_convert_once_when_shallow() {
        let out = convert(&json!([{"a": {"b": 1}}]), prefixed, false).unwrap();
        assert_eq!(out, json!([{"x_a": {"b": 1}}]));
    }

    #[test]
    fn top_level_sequence_elements_convert_once_when_deep() {
        let out = convert(&json!([{"a": {"b": 1}}]), prefixed, true).unwrap();
        assert_eq!(out, json!([{"x_a": {"x_b": 1}}]));
    }

    #[test]
    fn nested_keys_convert_once_at_every_depth() {
        let input = json!({"a": [{"b": {"c": [{"d": 1}]}}]});
        let out = convert(&input, prefixed, true).unwrap();
        assert_eq!(out, json!({"x_a": [{"x_b": {"x_c": [{"x_d": 1}]}}]}));
    }

    #[test]
    fn value_kind_classifies_variants() {
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Mapping);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Sequence);
        assert_eq!(ValueKind::of(&json!("s")), ValueKind::Scalar);
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Nullish);
    }
}
