//! Value types shared by every JXON component: the tagged value universe,
//! XML element trees, schema descriptors, and parsed modules.

/// A type-safe data-type of the JXON data-model.
pub mod value;

/// Insertion-ordered object map with unique string keys.
pub mod object;

/// XML element trees as first-class values.
pub mod xml;

/// Schema descriptors for the JXSD schema language.
pub mod schema;

/// Parsed modules usable as namespaces.
pub mod module;

pub use module::Module;
pub use object::Object;
pub use schema::{EnumMember, JxonType, SimpleKind, TypeError};
pub use value::{Array, Value, ValueKind};
pub use xml::XmlElement;
