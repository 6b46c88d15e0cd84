//! Schema inference and validation for JXON values.
//!
//! [`infer_schema`] derives a [`JxonType`] from a value; [`validate`] checks a
//! value against a schema. [`validate_filling`] additionally fills open slots
//! (`List(None)`, undetermined record fields) in place with inferred types,
//! mutating the schema argument.

use thiserror::Error;

use jxon_value::value::{Array, Value, ValueKind};
use jxon_value::{JxonType, SimpleKind};

/// Errors from schema inference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Inconsistent list element type")]
    InconsistentList,
    #[error("Not parseable as JXON type: {0}")]
    NotRepresentable(ValueKind),
}

/// Infers the schema of `value`.
///
/// `Null` has no schema of its own and yields `None`; inside containers it
/// leaves the corresponding slot undetermined. A non-empty array takes the
/// schema of its first non-null element and requires every other element to
/// validate against it.
pub fn infer_schema(value: &Value) -> Result<Option<JxonType>, SchemaError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(_) => Ok(Some(JxonType::Simple(SimpleKind::Boolean))),
        Value::Integer(_) => Ok(Some(JxonType::Simple(SimpleKind::Integer))),
        Value::Float(_) => Ok(Some(JxonType::Simple(SimpleKind::Float))),
        Value::String(_) => Ok(Some(JxonType::Simple(SimpleKind::String))),
        Value::Xml(_) => Ok(Some(JxonType::Simple(SimpleKind::Xml))),
        Value::Array(Array(items)) => {
            let mut element: Option<JxonType> = None;
            for item in items {
                match &element {
                    Some(ty) => {
                        if !validate(ty, item) {
                            return Err(SchemaError::InconsistentList);
                        }
                    }
                    None => element = infer_schema(item)?,
                }
            }
            Ok(Some(JxonType::List(element.map(Box::new))))
        }
        Value::Object(map) => {
            let mut fields = indexmap::IndexMap::new();
            for (key, value) in map.iter() {
                fields.insert(key.clone(), infer_schema(value)?);
            }
            Ok(Some(JxonType::Record(fields)))
        }
        Value::Schema(_) | Value::Module(_) => {
            Err(SchemaError::NotRepresentable(value.kind()))
        }
    }
}

/// Whether `value` validates against `schema`. `Null` matches any schema.
pub fn validate(schema: &JxonType, value: &Value) -> bool {
    if value.is_null() {
        return true;
    }
    match schema {
        JxonType::Simple(kind) => kind.matches(value),
        JxonType::List(of) => {
            let Value::Array(Array(items)) = value else {
                return false;
            };
            match of {
                None => true,
                Some(element) => items.iter().all(|item| validate(element, item)),
            }
        }
        JxonType::Record(fields) => {
            let Value::Object(map) = value else {
                return false;
            };
            if map.len() != fields.len() {
                return false;
            }
            fields.iter().all(|(key, field)| match map.get(key) {
                None => false,
                Some(member) => field.as_ref().is_none_or(|ty| validate(ty, member)),
            })
        }
        JxonType::Enum(members) => members.iter().any(|member| member.matches(value)),
    }
}

/// [`validate`], but open slots in the schema are filled in place from the
/// value being checked: an open list takes its first non-null element's
/// inferred type, an undetermined record field takes the matching member's.
/// Filling happens at the outermost open slot only; nested checks are pure.
pub fn validate_filling(schema: &mut JxonType, value: &Value) -> Result<bool, SchemaError> {
    if value.is_null() {
        return Ok(true);
    }
    match schema {
        JxonType::Simple(kind) => Ok(kind.matches(value)),
        JxonType::List(of) => {
            let Value::Array(Array(items)) = value else {
                return Ok(false);
            };
            if of.is_none() {
                // As in inference, leading nulls do not pick the element type.
                for item in items {
                    if let Some(element) = infer_schema(item)? {
                        *of = Some(Box::new(element));
                        break;
                    }
                }
            }
            match of {
                None => Ok(true),
                Some(element) => Ok(items.iter().all(|item| validate(element, item))),
            }
        }
        JxonType::Record(fields) => {
            let Value::Object(map) = value else {
                return Ok(false);
            };
            if map.len() != fields.len() || !fields.keys().all(|key| map.contains_key(key)) {
                return Ok(false);
            }
            for (key, field) in fields.iter_mut() {
                let Some(member) = map.get(key) else {
                    return Ok(false);
                };
                match field {
                    None => *field = infer_schema(member)?,
                    Some(ty) => {
                        if !validate(ty, member) {
                            return Ok(false);
                        }
                    }
                }
            }
            Ok(true)
        }
        JxonType::Enum(members) => Ok(members.iter().any(|member| member.matches(value))),
    }
}

/// Whether `value` has an inferable schema.
pub fn has_consistent_schema(value: &Value) -> bool {
    infer_schema(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use jxon_value::{EnumMember, Object};
    use num_bigint::BigInt;

    fn array(items: Vec<Value>) -> Value {
        Value::Array(Array(items))
    }

    #[test]
    fn infers_list_of_integers() {
        let schema = infer_schema(&array(vec![Value::from(1), Value::from(2)]))
            .unwrap()
            .unwrap();
        assert_eq!(
            schema,
            JxonType::List(Some(Box::new(JxonType::Simple(SimpleKind::Integer))))
        );
    }

    #[test]
    fn infers_open_list_from_empty_array() {
        let schema = infer_schema(&array(Vec::new())).unwrap().unwrap();
        assert_eq!(schema, JxonType::List(None));
    }

    #[test]
    fn leading_nulls_do_not_hide_the_element_type() {
        let schema = infer_schema(&array(vec![Value::Null, Value::from(1)]))
            .unwrap()
            .unwrap();
        assert_eq!(
            schema,
            JxonType::List(Some(Box::new(JxonType::Simple(SimpleKind::Integer))))
        );
    }

    #[test]
    fn mixed_list_is_inconsistent() {
        let err = infer_schema(&array(vec![Value::from(1), Value::from("x")])).unwrap_err();
        assert_eq!(err, SchemaError::InconsistentList);
        assert!(!has_consistent_schema(&array(vec![
            Value::from(1),
            Value::from("x"),
        ])));
    }

    #[test]
    fn record_inference_preserves_field_order_and_null_fields() {
        let object: Object = [
            ("b".to_string(), Value::from(true)),
            ("a".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();
        let schema = infer_schema(&Value::Object(object)).unwrap().unwrap();
        let JxonType::Record(fields) = &schema else {
            panic!("expected record");
        };
        let keys: Vec<&String> = fields.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(fields["a"], None);
    }

    #[test]
    fn inference_is_sound() {
        let value = Value::Object(
            [
                ("xs".to_string(), array(vec![Value::from(1), Value::Null])),
                ("name".to_string(), Value::from("jxon")),
            ]
            .into_iter()
            .collect::<Object>(),
        );
        let schema = infer_schema(&value).unwrap().unwrap();
        assert!(validate(&schema, &value));
    }

    #[test]
    fn null_matches_every_schema() {
        assert!(validate(&JxonType::Simple(SimpleKind::Integer), &Value::Null));
        assert!(validate(&JxonType::List(None), &Value::Null));
        assert!(validate(
            &JxonType::Record(IndexMap::new()),
            &Value::Null
        ));
    }

    #[test]
    fn record_requires_exact_key_set() {
        let schema = JxonType::Record(IndexMap::from([(
            "a".to_string(),
            Some(JxonType::Simple(SimpleKind::Integer)),
        )]));
        let missing = Value::Object(Object::new());
        let extra = Value::Object(
            [
                ("a".to_string(), Value::from(1)),
                ("b".to_string(), Value::from(2)),
            ]
            .into_iter()
            .collect::<Object>(),
        );
        let exact = Value::Object(
            [("a".to_string(), Value::from(1))]
                .into_iter()
                .collect::<Object>(),
        );
        assert!(!validate(&schema, &missing));
        assert!(!validate(&schema, &extra));
        assert!(validate(&schema, &exact));
    }

    #[test]
    fn enum_membership_is_closed() {
        let schema = JxonType::new_enum(vec![
            EnumMember::String("a".to_string()),
            EnumMember::String("b".to_string()),
        ])
        .unwrap();
        assert!(validate(&schema, &Value::from("a")));
        assert!(!validate(&schema, &Value::from("c")));
        assert!(!validate(&schema, &Value::from(1)));
    }

    #[test]
    fn enum_members_do_not_match_across_kinds() {
        let schema = JxonType::new_enum(vec![EnumMember::Integer(BigInt::from(1))]).unwrap();
        assert!(!validate(&schema, &Value::Float(1.0)));
    }

    #[test]
    fn filling_an_open_list_pins_the_element_type() {
        let mut schema = JxonType::List(None);
        let ok = validate_filling(&mut schema, &array(vec![Value::from(1), Value::from(2)]))
            .unwrap();
        assert!(ok);
        assert_eq!(
            schema,
            JxonType::List(Some(Box::new(JxonType::Simple(SimpleKind::Integer))))
        );
        // A later pure validation agrees with the filled schema.
        assert!(validate(&schema, &array(vec![Value::from(3)])));
        assert!(!validate(&schema, &array(vec![Value::from("x")])));
    }

    #[test]
    fn filling_skips_leading_nulls_when_pinning_the_element_type() {
        let mut schema = JxonType::List(None);
        let mixed = array(vec![Value::Null, Value::from(1), Value::from("x")]);
        assert!(!validate_filling(&mut schema, &mixed).unwrap());

        let mut schema = JxonType::List(None);
        let ints = array(vec![Value::Null, Value::from(1), Value::from(2)]);
        assert!(validate_filling(&mut schema, &ints).unwrap());
        assert_eq!(
            schema,
            JxonType::List(Some(Box::new(JxonType::Simple(SimpleKind::Integer))))
        );
        assert!(validate(&schema, &array(vec![Value::from(3), Value::Null])));
        assert!(!validate(&schema, &array(vec![Value::from("x")])));
    }

    #[test]
    fn filling_an_all_null_list_leaves_it_open() {
        let mut schema = JxonType::List(None);
        let nulls = array(vec![Value::Null, Value::Null]);
        assert!(validate_filling(&mut schema, &nulls).unwrap());
        assert_eq!(schema, JxonType::List(None));
    }

    #[test]
    fn filling_a_record_field_pins_its_type() {
        let mut schema = JxonType::Record(IndexMap::from([("a".to_string(), None)]));
        let value = Value::Object(
            [("a".to_string(), Value::from("text"))]
                .into_iter()
                .collect::<Object>(),
        );
        assert!(validate_filling(&mut schema, &value).unwrap());
        let JxonType::Record(fields) = &schema else {
            panic!("expected record");
        };
        assert_eq!(fields["a"], Some(JxonType::Simple(SimpleKind::String)));
    }

    #[test]
    fn pure_validation_does_not_mutate() {
        let schema = JxonType::List(None);
        assert!(validate(&schema, &array(vec![Value::from(1)])));
        assert_eq!(schema, JxonType::List(None));
    }
}
