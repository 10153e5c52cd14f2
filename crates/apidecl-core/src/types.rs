//! # Types Module
//!
//! The schema meta-model: data types, struct/union/alias declarations.
//!
//! Declarations are built with small by-value builders so that the
//! namespace files in `decls` read like the IDL they mirror.

use crate::{CATCH_ALL_TAG, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used on the wire unless a declaration says otherwise.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// =============================================================================
// DATA TYPES
// =============================================================================

/// Width and signedness of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntKind {
    Int32,
    Int64,
    UInt32,
    UInt64,
}

impl IntKind {
    /// Inclusive range representable by this kind.
    #[must_use]
    pub fn range(self) -> (i128, i128) {
        match self {
            Self::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
            Self::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
            Self::UInt32 => (0, i128::from(u32::MAX)),
            Self::UInt64 => (0, i128::from(u64::MAX)),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
        }
    }
}

/// A data type as it appears in a field, variant payload, alias or route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Void,
    Boolean,
    Bytes,
    String {
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<String>,
    },
    Integer {
        kind: IntKind,
        min: Option<i64>,
        max: Option<i64>,
    },
    Timestamp {
        format: String,
    },
    List {
        item: Box<DataType>,
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    Nullable(Box<DataType>),
    Named(TypeRef),
}

impl DataType {
    #[must_use]
    pub fn string() -> Self {
        Self::String {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// String with optional length bounds and pattern.
    #[must_use]
    pub fn string_with(min_length: Option<u64>, max_length: Option<u64>, pattern: Option<&str>) -> Self {
        Self::String {
            min_length,
            max_length,
            pattern: pattern.map(str::to_string),
        }
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    #[must_use]
    pub fn int(kind: IntKind) -> Self {
        Self::Integer {
            kind,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn int_bounded(kind: IntKind, min: Option<i64>, max: Option<i64>) -> Self {
        Self::Integer { kind, min, max }
    }

    #[must_use]
    pub fn timestamp() -> Self {
        Self::Timestamp {
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    #[must_use]
    pub fn list(item: DataType) -> Self {
        Self::List {
            item: Box::new(item),
            min_items: None,
            max_items: None,
        }
    }

    #[must_use]
    pub fn list_bounded(item: DataType, min_items: Option<u64>, max_items: Option<u64>) -> Self {
        Self::List {
            item: Box::new(item),
            min_items,
            max_items,
        }
    }

    /// Reference a named type, `ns.Name` or `Name`.
    #[must_use]
    pub fn named(path: &str) -> Self {
        Self::Named(TypeRef::parse(path))
    }

    /// Wrap in `Nullable`. Already-nullable types are returned unchanged.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// The type with one level of `Nullable` removed.
    #[must_use]
    pub fn strip_nullable(&self) -> &DataType {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    /// The named reference at the top of this type, looking through `Nullable`.
    #[must_use]
    pub fn as_named(&self) -> Option<&TypeRef> {
        match self.strip_nullable() {
            Self::Named(r) => Some(r),
            _ => None,
        }
    }

    /// Every named reference reachable inside this type, in declaration order.
    pub fn references(&self) -> Vec<&TypeRef> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a TypeRef>) {
        match self {
            Self::Named(r) => out.push(r),
            Self::List { item, .. } => item.collect_references(out),
            Self::Nullable(inner) => inner.collect_references(out),
            _ => {}
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "Void"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Bytes => write!(f, "Bytes"),
            Self::String {
                min_length,
                max_length,
                pattern,
            } => {
                let mut params = Vec::new();
                if let Some(min) = min_length {
                    params.push(format!("min_length={}", min));
                }
                if let Some(max) = max_length {
                    params.push(format!("max_length={}", max));
                }
                if let Some(p) = pattern {
                    params.push(format!("pattern=\"{}\"", p));
                }
                if params.is_empty() {
                    write!(f, "String")
                } else {
                    write!(f, "String({})", params.join(", "))
                }
            }
            Self::Integer { kind, min, max } => {
                let mut params = Vec::new();
                if let Some(min) = min {
                    params.push(format!("min_value={}", min));
                }
                if let Some(max) = max {
                    params.push(format!("max_value={}", max));
                }
                if params.is_empty() {
                    write!(f, "{}", kind.name())
                } else {
                    write!(f, "{}({})", kind.name(), params.join(", "))
                }
            }
            Self::Timestamp { format } => write!(f, "Timestamp(\"{}\")", format),
            Self::List {
                item,
                min_items,
                max_items,
            } => {
                let mut params = vec![item.to_string()];
                if let Some(min) = min_items {
                    params.push(format!("min_items={}", min));
                }
                if let Some(max) = max_items {
                    params.push(format!("max_items={}", max));
                }
                write!(f, "List({})", params.join(", "))
            }
            Self::Nullable(inner) => write!(f, "{}?", inner),
            Self::Named(r) => write!(f, "{}", r),
        }
    }
}

// =============================================================================
// DEFAULTS
// =============================================================================

/// A field default, restricted to what the IDL can express.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(String),
    /// A void tag of a union-typed field.
    Tag(String),
}

impl DefaultValue {
    /// The default as it appears on the wire.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::UInt(u) => serde_json::Value::from(*u),
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Tag(t) => {
                let mut map = serde_json::Map::new();
                map.insert(crate::TAG_KEY.to_string(), serde_json::Value::String(t.clone()));
                serde_json::Value::Object(map)
            }
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Str(s) => write!(f, "\"{}\"", s),
            Self::Tag(t) => write!(f, "{}", t),
        }
    }
}

// =============================================================================
// FIELDS AND VARIANTS
// =============================================================================

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub doc: String,
    pub default: Option<DefaultValue>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            doc: String::new(),
            default: None,
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// A field that may be omitted on the wire.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.data_type.is_nullable() || self.default.is_some()
    }
}

/// A union variant (tag). `payload == None` is a void tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub payload: Option<DataType>,
    pub doc: String,
}

impl Variant {
    /// A tag with no payload.
    #[must_use]
    pub fn void(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
            doc: String::new(),
        }
    }

    /// A tag carrying a value.
    #[must_use]
    pub fn with(name: impl Into<String>, payload: DataType) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
            doc: String::new(),
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.payload.as_ref().is_none_or(DataType::is_void)
    }

    /// The implicit catch-all of open unions.
    #[must_use]
    pub fn catch_all() -> Self {
        Self::void(CATCH_ALL_TAG)
    }
}

// =============================================================================
// DECLARATIONS
// =============================================================================

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub doc: String,
    pub extends: Option<TypeRef>,
    pub fields: Vec<Field>,
}

impl StructDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            extends: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: &str) -> Self {
        self.extends = Some(TypeRef::parse(parent));
        self
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Field declared directly on this struct (not inherited).
    #[must_use]
    pub fn own_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A union declaration.
///
/// Open unions (`closed == false`) accept any tag a newer server may add;
/// readers map unknown tags to the catch-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDef {
    pub name: String,
    pub doc: String,
    pub extends: Option<TypeRef>,
    pub variants: Vec<Variant>,
    pub closed: bool,
}

impl UnionDef {
    /// An extensible union with the implicit catch-all tag.
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            extends: None,
            variants: Vec::new(),
            closed: false,
        }
    }

    /// A union whose tag set is fixed.
    #[must_use]
    pub fn closed(name: impl Into<String>) -> Self {
        Self {
            closed: true,
            ..Self::open(name)
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: &str) -> Self {
        self.extends = Some(TypeRef::parse(parent));
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Shorthand for a run of void tags.
    #[must_use]
    pub fn tags(mut self, names: &[&str]) -> Self {
        self.variants.extend(names.iter().map(|n| Variant::void(*n)));
        self
    }

    #[must_use]
    pub fn own_variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// A named alias for another data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDef {
    pub name: String,
    pub doc: String,
    pub target: DataType,
}

impl AliasDef {
    #[must_use]
    pub fn new(name: impl Into<String>, target: DataType) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            target,
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

/// Any named type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDef {
    Struct(StructDef),
    Union(UnionDef),
    Alias(AliasDef),
}

impl TypeDef {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Union(u) => &u.name,
            Self::Alias(a) => &a.name,
        }
    }

    #[must_use]
    pub fn doc(&self) -> &str {
        match self {
            Self::Struct(s) => &s.doc,
            Self::Union(u) => &u.doc,
            Self::Alias(a) => &a.doc,
        }
    }

    #[must_use]
    pub fn extends(&self) -> Option<&TypeRef> {
        match self {
            Self::Struct(s) => s.extends.as_ref(),
            Self::Union(u) => u.extends.as_ref(),
            Self::Alias(_) => None,
        }
    }

    /// Kind name used in messages and rendering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Union(u) if u.closed => "union_closed",
            Self::Union(_) => "union",
            Self::Alias(_) => "alias",
        }
    }

    /// Every data type mentioned directly by this declaration.
    pub fn data_types(&self) -> Vec<&DataType> {
        match self {
            Self::Struct(s) => s.fields.iter().map(|f| &f.data_type).collect(),
            Self::Union(u) => u.variants.iter().filter_map(|v| v.payload.as_ref()).collect(),
            Self::Alias(a) => vec![&a.target],
        }
    }
}

impl From<StructDef> for TypeDef {
    fn from(def: StructDef) -> Self {
        Self::Struct(def)
    }
}

impl From<UnionDef> for TypeDef {
    fn from(def: UnionDef) -> Self {
        Self::Union(def)
    }
}

impl From<AliasDef> for TypeDef {
    fn from(def: AliasDef) -> Self {
        Self::Alias(def)
    }
}

// =============================================================================
// TESTS
// =============================================================================
