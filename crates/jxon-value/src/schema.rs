use indexmap::IndexMap;
use num_bigint::BigInt;
use thiserror::Error;

use crate::value::{Value, ValueKind};

/// The five reserved simple-type keywords of JXSD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleKind {
    Integer,
    Float,
    String,
    Boolean,
    Xml,
}

impl SimpleKind {
    pub const ALL: [SimpleKind; 5] = [
        SimpleKind::Integer,
        SimpleKind::Float,
        SimpleKind::String,
        SimpleKind::Boolean,
        SimpleKind::Xml,
    ];

    /// The JXSD keyword naming this type.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Xml => "XML",
        }
    }

    /// Whether `value` is a non-null instance of this simple type.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value.kind()),
            (Self::Integer, ValueKind::Integer)
                | (Self::Float, ValueKind::Float)
                | (Self::String, ValueKind::String)
                | (Self::Boolean, ValueKind::Bool)
                | (Self::Xml, ValueKind::Xml)
        )
    }
}

impl core::fmt::Display for SimpleKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A member of a finite `Enum(...)` type.
///
/// All members of one enum share a single scalar kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumMember {
    Integer(BigInt),
    Float(f64),
    String(String),
}

impl EnumMember {
    pub fn scalar_kind(&self) -> SimpleKind {
        match self {
            Self::Integer(_) => SimpleKind::Integer,
            Self::Float(_) => SimpleKind::Float,
            Self::String(_) => SimpleKind::String,
        }
    }

    /// Converts a scalar value into a member; `None` for anything that is not
    /// an integer, float, or string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(Self::Integer(i.clone())),
            Value::Float(f) => Some(Self::Float(*f)),
            Value::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Integer(i) => Value::Integer(i.clone()),
            Self::Float(f) => Value::Float(*f),
            Self::String(s) => Value::String(s.clone()),
        }
    }

    /// Whether `value` is equal to this member.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Integer(a), Value::Integer(b)) => a == b,
            (Self::Float(a), Value::Float(b)) => a == b,
            (Self::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Errors rejected by the [`JxonType`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("Enum requires at least one member")]
    EmptyEnum,
    #[error("Inconsistent Enum member types")]
    MixedEnum,
}

/// A JXSD schema descriptor.
///
/// `List(None)` is the open list type produced by inferring an empty array;
/// a `None` record field is "present but undetermined". Both slots can be
/// filled in place by validation with fill-null semantics.
#[derive(Debug, Clone)]
pub enum JxonType {
    Simple(SimpleKind),
    List(Option<Box<JxonType>>),
    Record(IndexMap<String, Option<JxonType>>),
    /// Finite scalar set. Build through [`JxonType::new_enum`], which upholds
    /// the homogeneity and non-emptiness invariants.
    Enum(Vec<EnumMember>),
}

impl JxonType {
    /// Builds an enum type, rejecting empty and kind-mixed member lists.
    /// Duplicate members are dropped (set semantics).
    pub fn new_enum(members: Vec<EnumMember>) -> Result<Self, TypeError> {
        let Some(first) = members.first() else {
            return Err(TypeError::EmptyEnum);
        };
        let kind = first.scalar_kind();
        let mut set: Vec<EnumMember> = Vec::with_capacity(members.len());
        for member in members {
            if member.scalar_kind() != kind {
                return Err(TypeError::MixedEnum);
            }
            if !set.contains(&member) {
                set.push(member);
            }
        }
        Ok(JxonType::Enum(set))
    }
}

impl PartialEq for JxonType {
    /// Structural equality. Record fields compare order-insensitively and
    /// enum members compare as sets.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Simple(a), Self::Simple(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => {
                a.len() == b.len() && a.iter().all(|member| b.contains(member))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_rejects_mixed_kinds() {
        let members = vec![
            EnumMember::Integer(BigInt::from(1)),
            EnumMember::String("one".to_string()),
        ];
        assert_eq!(JxonType::new_enum(members), Err(TypeError::MixedEnum));
    }

    #[test]
    fn enum_rejects_empty() {
        assert_eq!(JxonType::new_enum(Vec::new()), Err(TypeError::EmptyEnum));
    }

    #[test]
    fn enum_deduplicates_members() {
        let ty = JxonType::new_enum(vec![
            EnumMember::String("a".to_string()),
            EnumMember::String("a".to_string()),
            EnumMember::String("b".to_string()),
        ])
        .unwrap();
        let JxonType::Enum(members) = &ty else {
            panic!("expected enum");
        };
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn enum_equality_ignores_member_order() {
        let a = JxonType::new_enum(vec![
            EnumMember::Integer(BigInt::from(1)),
            EnumMember::Integer(BigInt::from(2)),
        ])
        .unwrap();
        let b = JxonType::new_enum(vec![
            EnumMember::Integer(BigInt::from(2)),
            EnumMember::Integer(BigInt::from(1)),
        ])
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn record_equality_ignores_field_order() {
        let a = JxonType::Record(IndexMap::from([
            ("x".to_string(), Some(JxonType::Simple(SimpleKind::Integer))),
            ("y".to_string(), None),
        ]));
        let b = JxonType::Record(IndexMap::from([
            ("y".to_string(), None),
            ("x".to_string(), Some(JxonType::Simple(SimpleKind::Integer))),
        ]));
        assert_eq!(a, b);
    }
}
