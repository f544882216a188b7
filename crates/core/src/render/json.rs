//! The JSON document generator.
//!
//! One object, exactly six keys, fixed order: `status`, `statuscode`,
//! `message`, `totalitems`, `itemsperpage`, `data`. The paging keys are
//! always present and carry `""` when unset -- unlike XML, which omits
//! them. That asymmetry is part of the wire contract; see the renderer
//! tests that pin it.
//!
//! Element naming (`ItemTag`, `item_tag`) is an XML concern and is
//! ignored here entirely; `data` is the payload's native serialization.

use serde::{Serialize, Serializer};

use crate::envelope::Envelope;
use crate::error::CoreError;
use crate::payload::Payload;

/// The wire object. Struct field order is the serialization order.
#[derive(Serialize)]
struct JsonDocument<'a> {
    status: &'a str,
    statuscode: i32,
    message: &'a str,
    #[serde(serialize_with = "paging")]
    totalitems: Option<u64>,
    #[serde(serialize_with = "paging")]
    itemsperpage: Option<u64>,
    data: &'a Payload,
}

/// An unset paging counter serializes as the empty string, never as
/// `null` and never omitted.
fn paging<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(count) => serializer.serialize_u64(*count),
        None => serializer.serialize_str(""),
    }
}

/// Render a complete JSON document for the envelope.
pub fn render(envelope: &Envelope) -> Result<String, CoreError> {
    let document = JsonDocument {
        status: envelope.status.as_str(),
        statuscode: envelope.statuscode,
        message: &envelope.message,
        totalitems: envelope.total_items,
        itemsperpage: envelope.items_per_page,
        data: &envelope.payload,
    };
    Ok(serde_json::to_string(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Scalar;
    use indexmap::IndexMap;

    fn parse(envelope: &Envelope) -> serde_json::Value {
        serde_json::from_str(&render(envelope).unwrap()).unwrap()
    }

    #[test]
    fn document_has_exactly_six_keys_in_fixed_order() {
        let text = render(&Envelope::ok(Payload::scalar("hi"))).unwrap();
        assert_eq!(
            text,
            r#"{"status":"ok","statuscode":100,"message":"","totalitems":"","itemsperpage":"","data":"hi"}"#
        );
    }

    #[test]
    fn paging_counters_are_always_present() {
        // Unset counters are the empty string.
        let unset = parse(&Envelope::failed(999, "gone"));
        assert_eq!(unset["totalitems"], "");
        assert_eq!(unset["itemsperpage"], "");

        // Set counters are numbers.
        let set = parse(
            &Envelope::ok(Payload::empty())
                .with_total_items(12)
                .with_items_per_page(4),
        );
        assert_eq!(set["totalitems"], 12);
        assert_eq!(set["itemsperpage"], 4);
    }

    #[test]
    fn flat_map_data_is_a_flat_object() {
        let mut fields = IndexMap::new();
        fields.insert("app".to_owned(), Scalar::from("files"));
        fields.insert("key".to_owned(), Scalar::from("lang"));
        let json = parse(&Envelope::ok(Payload::FlatMap(fields)));

        assert_eq!(
            json["data"],
            serde_json::json!({"app": "files", "key": "lang"})
        );
    }

    #[test]
    fn list_payload_ignores_tag_metadata() {
        use crate::payload::{Field, ItemTag, Record};

        let mut entry = Record::new();
        entry.insert("id".to_owned(), Field::from("1"));
        let json = parse(&Envelope::ok(Payload::EntryList {
            tag: ItemTag::with_details("item", "full"),
            entries: vec![entry],
        }));

        // Neither the tag name nor the attribute appears anywhere.
        assert_eq!(json["data"], serde_json::json!([{"id": "1"}]));
    }

    #[test]
    fn empty_payload_is_an_empty_array() {
        let json = parse(&Envelope::failed(999, "gone"));
        assert_eq!(json["data"], serde_json::json!([]));
    }
}
