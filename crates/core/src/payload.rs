//! The "dimension"-tagged payload model.
//!
//! Legacy OCS tagged every response payload with an integer dimension
//! (0, 1, 2, 3 or `"dynamic"`) that told the XML writer how to walk the
//! data. Here the dimension is a closed union: each [`Payload`] variant
//! carries data already shaped for its walk, so a payload can never
//! disagree with its declared dimension.
//!
//! JSON output ignores all element-naming metadata and serializes the
//! payload's native structure; only the XML renderer looks at tags.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Leaf values
// ---------------------------------------------------------------------------

/// A leaf value: a single string or number.
///
/// Serializes as the bare value (`"de"`, `42`, `1.5`), never as a tagged
/// object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// The text content written into an XML element for this value.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

// ---------------------------------------------------------------------------
// Records (list-shaped payloads)
// ---------------------------------------------------------------------------

/// One field of a record: a scalar, or one level of nested mapping.
///
/// Nested mappings are the deepest structure list-shaped payloads allow;
/// anything deeper belongs in a [`Tree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Field {
    Value(Scalar),
    Nested(IndexMap<String, Scalar>),
}

impl<T: Into<Scalar>> From<T> for Field {
    fn from(value: T) -> Self {
        Field::Value(value.into())
    }
}

/// An ordered record, as carried by the list-shaped payload variants.
pub type Record = IndexMap<String, Field>;

/// Caller-chosen element name (and optional `details="…"` attribute value)
/// wrapped around each record of a list-shaped payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTag {
    pub name: String,
    pub details: Option<String>,
}

impl ItemTag {
    pub fn new(name: impl Into<String>) -> Self {
        ItemTag {
            name: name.into(),
            details: None,
        }
    }

    pub fn with_details(name: impl Into<String>, details: impl Into<String>) -> Self {
        ItemTag {
            name: name.into(),
            details: Some(details.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dynamic trees
// ---------------------------------------------------------------------------

/// An arbitrarily deep mapping/sequence tree, walked recursively by the
/// XML renderer. Payloads are tree-shaped data, never object graphs with
/// back-references, so no cycle detection is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tree {
    Leaf(Scalar),
    Map(IndexMap<String, Tree>),
    List(Vec<Tree>),
}

impl<T: Into<Scalar>> From<T> for Tree {
    fn from(value: T) -> Self {
        Tree::Leaf(value.into())
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The shape-tagged payload of an [`Envelope`](crate::envelope::Envelope).
///
/// Variants correspond to the legacy dimension tags:
///
/// | Variant           | Legacy tag  | XML `<data>` shape                      |
/// |-------------------|-------------|-----------------------------------------|
/// | `Scalar`          | `0`         | literal text content                    |
/// | `FlatMap`         | `1`         | one child element per field             |
/// | `EntryList`       | `2`         | one tagged element per record           |
/// | `TaggedEntryList` | `3`         | like `2`, nested fields wrapped in the  |
/// |                   |             | record's outer key                      |
/// | `DynamicTree`     | `"dynamic"` | recursive walk, numeric keys renamed    |
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single value, emitted as the text content of `<data>`.
    Scalar(Scalar),
    /// An ordered field-name -> scalar mapping.
    FlatMap(IndexMap<String, Scalar>),
    /// An ordered sequence of records, each wrapped in `tag`.
    EntryList { tag: ItemTag, entries: Vec<Record> },
    /// An ordered outer-key -> record mapping, each record wrapped in
    /// `tag`; nested fields are additionally wrapped in the outer key.
    TaggedEntryList {
        tag: ItemTag,
        entries: IndexMap<String, Record>,
    },
    /// An arbitrarily deep tree; `item_tag` replaces purely numeric keys
    /// (and names every sequence position) during the XML walk.
    DynamicTree { item_tag: String, root: Tree },
}

impl Payload {
    /// The payload used by error envelopes, where the legacy API left the
    /// dimension unspecified: an empty entry list. Renders as `<data/>` in
    /// XML and `[]` in JSON.
    pub fn empty() -> Self {
        Payload::EntryList {
            tag: ItemTag::new("element"),
            entries: Vec::new(),
        }
    }

    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Payload::Scalar(value.into())
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::empty()
    }
}

/// JSON sees only the data: element names and attributes (`ItemTag`,
/// `item_tag`) are XML concerns and are skipped entirely.
impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Scalar(value) => value.serialize(serializer),
            Payload::FlatMap(fields) => fields.serialize(serializer),
            Payload::EntryList { entries, .. } => entries.serialize(serializer),
            Payload::TaggedEntryList { entries, .. } => entries.serialize(serializer),
            Payload::DynamicTree { root, .. } => root.serialize(serializer),
        }
    }
}
