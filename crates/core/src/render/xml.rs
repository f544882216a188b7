//! The XML document generator.
//!
//! Output shape: a single XML declaration, one root `<ocs>` element,
//! 2-space indentation, trailing newline. `<meta>` always comes first
//! (`status`, `statuscode`, `message`, then the paging counters when
//! set), followed by a `<data>` region whose internal shape is driven by
//! the payload variant.
//!
//! The writer is deliberately small: elements, one optional attribute,
//! escaped text, self-closing empties. That is everything an OCS document
//! uses, and it keeps the output well-formed for every constructible
//! payload.

use crate::envelope::Envelope;
use crate::payload::{Field, ItemTag, Payload, Record, Tree};

/// Render a complete XML document for the envelope.
pub fn render(envelope: &Envelope) -> String {
    let mut writer = XmlWriter::new();

    writer.nested("ocs", |w| {
        w.nested("meta", |w| {
            w.element("status", envelope.status.as_str());
            w.element("statuscode", &envelope.statuscode.to_string());
            w.element("message", &envelope.message);
            if let Some(total) = envelope.total_items {
                w.element("totalitems", &total.to_string());
            }
            if let Some(per_page) = envelope.items_per_page {
                w.element("itemsperpage", &per_page.to_string());
            }
        });
        write_data(w, &envelope.payload);
    });

    writer.finish()
}

// ---------------------------------------------------------------------------
// Payload walks
// ---------------------------------------------------------------------------

/// Emit the `<data>` region for each payload shape.
fn write_data(w: &mut XmlWriter, payload: &Payload) {
    match payload {
        // A single value is the literal text content of <data>.
        Payload::Scalar(value) => w.element("data", &value.to_text()),

        // One child element per field, in insertion order.
        Payload::FlatMap(fields) => w.nested("data", |w| {
            for (key, value) in fields {
                w.element(key, &value.to_text());
            }
        }),

        // One tagged element per record.
        Payload::EntryList { tag, entries } => w.nested("data", |w| {
            for entry in entries {
                write_record(w, tag, entry, None);
            }
        }),

        // Like EntryList, but a nested-mapping field is wrapped in an
        // element named after the record's outer key.
        Payload::TaggedEntryList { tag, entries } => w.nested("data", |w| {
            for (entry_key, entry) in entries {
                write_record(w, tag, entry, Some(entry_key));
            }
        }),

        Payload::DynamicTree { item_tag, root } => write_node(w, "data", root, item_tag),
    }
}

/// One record of a list-shaped payload, wrapped in the caller's tag.
///
/// A scalar field becomes a leaf element named after the field. A nested
/// mapping is flattened into the record element, unless `wrap_key` is
/// given, in which case the nested fields are wrapped in an element of
/// that name.
fn write_record(w: &mut XmlWriter, tag: &ItemTag, entry: &Record, wrap_key: Option<&str>) {
    let attribute = tag
        .details
        .as_deref()
        .filter(|details| !details.is_empty())
        .map(|details| ("details", details));

    w.nested_attr(&tag.name, attribute, |w| {
        for (key, field) in entry {
            match field {
                Field::Value(value) => w.element(key, &value.to_text()),
                Field::Nested(nested) => match wrap_key {
                    Some(wrap_key) => w.nested(wrap_key, |w| {
                        for (k, v) in nested {
                            w.element(k, &v.to_text());
                        }
                    }),
                    None => {
                        for (k, v) in nested {
                            w.element(k, &v.to_text());
                        }
                    }
                },
            }
        }
    });
}

/// Recursive walk for the dynamic tree.
///
/// Purely numeric map keys are positional, not semantic, and are replaced
/// by `item_tag`; every sequence position gets `item_tag` too. Recursion
/// depth equals payload nesting depth; payloads are trees, so there are
/// no cycles to guard against.
fn write_node(w: &mut XmlWriter, name: &str, tree: &Tree, item_tag: &str) {
    match tree {
        Tree::Leaf(value) => w.element(name, &value.to_text()),
        Tree::Map(entries) => w.nested(name, |w| {
            for (key, child) in entries {
                let child_name = if is_index_key(key) { item_tag } else { key };
                write_node(w, child_name, child, item_tag);
            }
        }),
        Tree::List(items) => w.nested(name, |w| {
            for child in items {
                write_node(w, item_tag, child, item_tag);
            }
        }),
    }
}

/// Keys that are positional indices rather than field names.
fn is_index_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Minimal indenting XML writer.
///
/// `nested` takes the element body as a closure, so every opened element
/// is closed by construction and a childless element can be collapsed to
/// the self-closing form.
struct XmlWriter {
    out: String,
    depth: usize,
    /// An element tag has been started but its `>` is not written yet.
    tag_open: bool,
}

impl XmlWriter {
    fn new() -> Self {
        XmlWriter {
            out: String::from("<?xml version=\"1.0\"?>\n"),
            depth: 0,
            tag_open: false,
        }
    }

    /// A container element with children written by `body`.
    fn nested(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        self.nested_attr(name, None, body);
    }

    /// A container element carrying at most one attribute.
    fn nested_attr(
        &mut self,
        name: &str,
        attribute: Option<(&str, &str)>,
        body: impl FnOnce(&mut Self),
    ) {
        self.flush_open_tag();
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        if let Some((attr_name, attr_value)) = attribute {
            self.out.push(' ');
            self.out.push_str(attr_name);
            self.out.push_str("=\"");
            push_escaped(&mut self.out, attr_value, true);
            self.out.push('"');
        }
        self.tag_open = true;

        self.depth += 1;
        body(self);
        self.depth -= 1;

        if self.tag_open {
            // No children were written; collapse to the empty form.
            self.out.push_str("/>\n");
            self.tag_open = false;
        } else {
            self.indent();
            self.out.push_str("</");
            self.out.push_str(name);
            self.out.push_str(">\n");
        }
    }

    /// A leaf element; empty text self-closes.
    fn element(&mut self, name: &str, text: &str) {
        self.flush_open_tag();
        self.indent();
        self.out.push('<');
        self.out.push_str(name);
        if text.is_empty() {
            self.out.push_str("/>\n");
        } else {
            self.out.push('>');
            push_escaped(&mut self.out, text, false);
            self.out.push_str("</");
            self.out.push_str(name);
            self.out.push_str(">\n");
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn flush_open_tag(&mut self) {
        if self.tag_open {
            self.out.push_str(">\n");
            self.tag_open = false;
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }
}

/// Escape text for an XML text or attribute position.
fn push_escaped(out: &mut String, value: &str, in_attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Scalar;
    use indexmap::IndexMap;

    fn flat(pairs: &[(&str, &str)]) -> IndexMap<String, Scalar> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Scalar::from(*v)))
            .collect()
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Field::from(*v)))
            .collect()
    }

    fn data_region(doc: &str) -> &str {
        let start = doc.find("<data").expect("data region present");
        match doc.find("</data>") {
            Some(end) => &doc[start..end],
            None => {
                let end = doc[start..].find('\n').unwrap() + start;
                &doc[start..end]
            }
        }
    }

    // -- document shape ------------------------------------------------------

    #[test]
    fn scalar_payload_renders_the_canonical_document() {
        let doc = render(&Envelope::ok(Payload::scalar("hello")));
        let expected = r#"<?xml version="1.0"?>
<ocs>
  <meta>
    <status>ok</status>
    <statuscode>100</statuscode>
    <message/>
  </meta>
  <data>hello</data>
</ocs>
"#;
        assert_eq!(doc, expected);
    }

    #[test]
    fn flat_map_renders_one_child_per_field() {
        let payload = Payload::FlatMap(flat(&[("app", "files"), ("key", "lang")]));
        let doc = render(&Envelope::ok(payload));
        let expected = "  <data>\n    <app>files</app>\n    <key>lang</key>\n  </data>\n</ocs>\n";
        assert!(doc.ends_with(expected), "doc: {doc}");
    }

    #[test]
    fn entry_list_wraps_each_record_in_the_tag() {
        let payload = Payload::EntryList {
            tag: ItemTag::new("item"),
            entries: vec![record(&[("id", "1"), ("name", "a")]), record(&[("id", "2")])],
        };
        let doc = render(&Envelope::ok(payload));

        assert_eq!(doc.matches("<item>").count(), 2);
        assert!(doc.contains("      <id>1</id>\n      <name>a</name>"));
        assert!(doc.contains("<id>2</id>"));
    }

    #[test]
    fn entry_list_tag_attribute_is_emitted() {
        let payload = Payload::EntryList {
            tag: ItemTag::with_details("content", "summary"),
            entries: vec![record(&[("id", "7")])],
        };
        let doc = render(&Envelope::ok(payload));
        assert!(doc.contains("<content details=\"summary\">"));
    }

    #[test]
    fn empty_tag_attribute_is_omitted() {
        let payload = Payload::EntryList {
            tag: ItemTag::with_details("content", ""),
            entries: vec![record(&[("id", "7")])],
        };
        let doc = render(&Envelope::ok(payload));
        assert!(doc.contains("<content>"));
        assert!(!doc.contains("details"));
    }

    #[test]
    fn entry_list_flattens_nested_fields_into_the_record() {
        let mut entry = Record::new();
        entry.insert("id".to_owned(), Field::from("1"));
        entry.insert(
            "counts".to_owned(),
            Field::Nested(flat(&[("up", "3"), ("down", "1")])),
        );
        let payload = Payload::EntryList {
            tag: ItemTag::new("item"),
            entries: vec![entry],
        };
        let doc = render(&Envelope::ok(payload));

        // The nested field's own key never appears; its children are
        // direct children of the record element.
        assert!(!doc.contains("<counts>"));
        assert!(doc.contains("      <up>3</up>\n      <down>1</down>"));
    }

    #[test]
    fn tagged_entry_list_wraps_nested_fields_in_the_outer_key() {
        let mut entry = Record::new();
        entry.insert("id".to_owned(), Field::from("1"));
        entry.insert(
            "counts".to_owned(),
            Field::Nested(flat(&[("up", "3")])),
        );
        let mut entries = IndexMap::new();
        entries.insert("first".to_owned(), entry);
        let payload = Payload::TaggedEntryList {
            tag: ItemTag::new("item"),
            entries,
        };
        let doc = render(&Envelope::ok(payload));

        assert!(doc.contains("<item>"));
        assert!(doc.contains("      <first>\n        <up>3</up>\n      </first>"));
    }

    #[test]
    fn empty_payload_self_closes_data() {
        let doc = render(&Envelope::failed(999, "gone"));
        assert!(doc.contains("\n  <data/>\n"));
    }

    #[test]
    fn empty_scalar_self_closes_data() {
        let doc = render(&Envelope::ok(Payload::scalar("")));
        assert!(doc.contains("\n  <data/>\n"));
    }

    // -- meta ----------------------------------------------------------------

    #[test]
    fn paging_counters_appear_only_when_set() {
        let without = render(&Envelope::ok(Payload::scalar("x")));
        assert!(!without.contains("totalitems"));
        assert!(!without.contains("itemsperpage"));

        let with = render(
            &Envelope::ok(Payload::scalar("x"))
                .with_total_items(12)
                .with_items_per_page(4),
        );
        assert!(with.contains("    <totalitems>12</totalitems>\n"));
        assert!(with.contains("    <itemsperpage>4</itemsperpage>\n"));

        // Order inside <meta>: message, then totalitems, then itemsperpage.
        let message = with.find("<message").unwrap();
        let total = with.find("<totalitems>").unwrap();
        let per_page = with.find("<itemsperpage>").unwrap();
        assert!(message < total && total < per_page);
    }

    #[test]
    fn zero_counters_are_still_emitted() {
        let doc = render(&Envelope::ok(Payload::empty()).with_total_items(0));
        assert!(doc.contains("<totalitems>0</totalitems>"));
    }

    // -- escaping ------------------------------------------------------------

    #[test]
    fn text_content_is_escaped() {
        let doc = render(&Envelope::failed(999, "a<b>&c"));
        assert!(doc.contains("<message>a&lt;b&gt;&amp;c</message>"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let payload = Payload::EntryList {
            tag: ItemTag::with_details("item", "say \"hi\" & go"),
            entries: vec![record(&[("id", "1")])],
        };
        let doc = render(&Envelope::ok(payload));
        assert!(doc.contains("details=\"say &quot;hi&quot; &amp; go\""));
    }

    // -- dynamic walk --------------------------------------------------------

    #[test]
    fn dynamic_tree_replaces_list_positions_with_the_item_tag() {
        let mut inner = IndexMap::new();
        inner.insert("author".to_owned(), Tree::from("alice"));
        inner.insert("text".to_owned(), Tree::from("hi"));
        let root = Tree::List(vec![Tree::Map(inner)]);

        let doc = render(&Envelope::ok(Payload::DynamicTree {
            item_tag: "comment".to_owned(),
            root,
        }));

        assert!(doc.contains("    <comment>\n      <author>alice</author>\n      <text>hi</text>\n    </comment>"));
    }

    #[test]
    fn dynamic_tree_replaces_numeric_keys_at_every_level() {
        let mut replies = IndexMap::new();
        replies.insert("0".to_owned(), Tree::from("first"));
        replies.insert("1".to_owned(), Tree::from("second"));
        let mut root = IndexMap::new();
        root.insert("topic".to_owned(), Tree::from("general"));
        root.insert("replies".to_owned(), Tree::Map(replies));

        let doc = render(&Envelope::ok(Payload::DynamicTree {
            item_tag: "comment".to_owned(),
            root: Tree::Map(root),
        }));

        assert!(doc.contains("<topic>general</topic>"));
        assert!(doc.contains("<replies>\n      <comment>first</comment>\n      <comment>second</comment>\n    </replies>"));
    }

    #[test]
    fn dynamic_tree_keeps_mixed_alphanumeric_keys() {
        let mut root = IndexMap::new();
        root.insert("10x".to_owned(), Tree::from("kept"));
        let doc = render(&Envelope::ok(Payload::DynamicTree {
            item_tag: "item".to_owned(),
            root: Tree::Map(root),
        }));
        assert!(doc.contains("<10x>kept</10x>"));
    }

    #[test]
    fn dynamic_leaf_root_renders_as_data_text() {
        let doc = render(&Envelope::ok(Payload::DynamicTree {
            item_tag: "item".to_owned(),
            root: Tree::from("just text"),
        }));
        assert!(doc.contains("<data>just text</data>"));
    }

    #[test]
    fn index_key_detection() {
        assert!(is_index_key("0"));
        assert!(is_index_key("42"));
        assert!(!is_index_key(""));
        assert!(!is_index_key("4a"));
        assert!(!is_index_key("-1"));
        assert!(!is_index_key("name"));
    }

    #[test]
    fn flat_map_child_count_matches_field_count() {
        let payload = Payload::FlatMap(flat(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]));
        let doc = render(&Envelope::ok(payload));
        assert_eq!(data_region(&doc).matches("</").count(), 4);
    }
}
