//! Snak and snak group encoding/decoding.

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::codec::DecodeContext;
use crate::codec::primitives::{ObjectReader, ObjectWriter, as_array};
use crate::codec::value::{decode_value, encode_value};
use crate::error::{DecodeError, EncodeError};
use crate::model::{PropertyIdValue, Snak, SnakDatatype, SnakGroup, SnakType, ValueSnak};

/// Decodes a snak: `{"snaktype", "property", "datatype", "datavalue"}`.
pub fn decode_snak(json: &Json, ctx: &DecodeContext) -> Result<Snak, DecodeError> {
    let reader = ObjectReader::new(json, "snak")?;

    let tag = reader.required_str("snaktype")?;
    let snak_type = SnakType::from_wire(tag).ok_or_else(|| DecodeError::UnknownTag {
        kind: "snaktype",
        value: tag.to_string(),
    })?;
    let property = PropertyIdValue::new(reader.required_str("property")?, ctx.site_iri())?;

    match snak_type {
        SnakType::Value => {
            let value = decode_value(reader.required("datavalue")?, ctx)?;
            let datatype = reader.optional_str("datatype")?.map(SnakDatatype::from_wire);
            Ok(Snak::Value(ValueSnak::new(property, value, datatype)))
        }
        SnakType::SomeValue => Ok(Snak::SomeValue(property)),
        SnakType::NoValue => Ok(Snak::NoValue(property)),
    }
}

/// Encodes a snak. Value snaks without a recorded datatype get the one
/// inferred from their value, if any.
pub fn encode_snak(snak: &Snak) -> Result<Json, EncodeError> {
    let mut writer = ObjectWriter::new();
    writer
        .put_str("snaktype", snak.snak_type().as_str())
        .put_str("property", snak.property_id().id());

    if let Snak::Value(value_snak) = snak {
        let datatype = value_snak
            .datatype()
            .cloned()
            .or_else(|| SnakDatatype::for_value(value_snak.value()));
        if let Some(datatype) = datatype {
            writer.put_str("datatype", datatype.as_str());
        }
        writer.put("datavalue", encode_value(value_snak.value())?);
    }
    Ok(writer.finish())
}

/// Decodes a property-keyed map of snak arrays into groups.
///
/// Groups follow `order` where given; properties missing from it follow in
/// document order. Empty arrays produce no group.
pub fn decode_snak_groups(
    entries: Vec<(&str, &Json)>,
    order: &[&str],
    ctx: &DecodeContext,
) -> Result<Vec<SnakGroup>, DecodeError> {
    let mut groups = Vec::with_capacity(entries.len());
    for (property, snaks) in order_entries(entries, order) {
        let snaks = as_array(snaks, "snaks", "snak group")?
            .iter()
            .map(|s| decode_snak(s, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        if snaks.is_empty() {
            debug!(property, "skipping empty snak group");
            continue;
        }
        groups.push(SnakGroup::new(snaks));
    }
    Ok(groups)
}

/// Reorders `entries` so keys listed in `order` come first, in that order.
pub(crate) fn order_entries<'a>(
    mut entries: Vec<(&'a str, &'a Json)>,
    order: &[&str],
) -> Vec<(&'a str, &'a Json)> {
    if order.is_empty() {
        return entries;
    }
    let mut ordered = Vec::with_capacity(entries.len());
    for key in order {
        if let Some(pos) = entries.iter().position(|(k, _)| k == key) {
            ordered.push(entries.remove(pos));
        }
    }
    ordered.extend(entries);
    ordered
}

/// Encodes snak groups as a property-keyed map plus the property order.
///
/// Groups sharing a property are merged under one key.
pub fn encode_snak_groups(groups: &[SnakGroup]) -> Result<(Json, Vec<String>), EncodeError> {
    let mut map = Map::new();
    let mut order = Vec::new();
    for group in groups {
        let key = group.property().id().to_string();
        let encoded = group.iter().map(encode_snak).collect::<Result<Vec<_>, _>>()?;
        match map.get_mut(&key) {
            Some(Json::Array(existing)) => existing.extend(encoded),
            _ => {
                order.push(key.clone());
                map.insert(key, Json::Array(encoded));
            }
        }
    }
    Ok((Json::Object(map), order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemIdValue, Value, WIKIDATA_SITE_IRI};
    use serde_json::json;

    fn ctx() -> DecodeContext {
        DecodeContext::wikidata()
    }

    fn p(id: &str) -> PropertyIdValue {
        PropertyIdValue::new(id, WIKIDATA_SITE_IRI).unwrap()
    }

    #[test]
    fn test_decode_value_snak() {
        let json = json!({
            "snaktype": "value",
            "property": "P31",
            "datatype": "wikibase-item",
            "datavalue": {"type": "wikibase-entityid", "value": {"id": "Q5", "entity-type": "item"}}
        });
        let snak = decode_snak(&json, &ctx()).unwrap();
        assert_eq!(snak.property_id(), &p("P31"));
        let expected = ItemIdValue::new("Q5", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(snak.value(), Some(&Value::ItemId(expected)));
    }

    #[test]
    fn test_some_and_no_value_snaks() {
        let some = decode_snak(&json!({"snaktype": "somevalue", "property": "P19"}), &ctx()).unwrap();
        assert_eq!(some, Snak::SomeValue(p("P19")));
        let none = decode_snak(&json!({"snaktype": "novalue", "property": "P40", "hash": "abc"}), &ctx()).unwrap();
        assert_eq!(none, Snak::NoValue(p("P40")));
        assert_eq!(encode_snak(&none).unwrap(), json!({"snaktype": "novalue", "property": "P40"}));
    }

    #[test]
    fn test_snak_decode_errors() {
        assert!(matches!(
            decode_snak(&json!({"snaktype": "maybe", "property": "P1"}), &ctx()),
            Err(DecodeError::UnknownTag { kind: "snaktype", .. })
        ));
        assert!(matches!(
            decode_snak(&json!({"snaktype": "value", "property": "P1"}), &ctx()),
            Err(DecodeError::MissingField { field: "datavalue", .. })
        ));
        assert!(matches!(
            decode_snak(&json!({"snaktype": "novalue"}), &ctx()),
            Err(DecodeError::MissingField { field: "property", .. })
        ));
    }

    #[test]
    fn test_unknown_datatype_preserved() {
        let json = json!({
            "snaktype": "value",
            "property": "P2534",
            "datatype": "math",
            "datavalue": {"value": "x^2", "type": "string"}
        });
        let snak = decode_snak(&json, &ctx()).unwrap();
        assert_eq!(encode_snak(&snak).unwrap(), json);
    }

    #[test]
    fn test_string_snak_without_datatype() {
        let snak = Snak::Value(ValueSnak::new(p("P1"), Value::String("x".into()), None));
        let json = encode_snak(&snak).unwrap();
        assert!(json.get("datatype").is_none());
        assert_eq!(decode_snak(&json, &ctx()).unwrap(), snak);
    }

    #[test]
    fn test_snak_groups_follow_order() {
        let json = json!({
            "P580": [{"snaktype": "somevalue", "property": "P580"}],
            "P582": [{"snaktype": "novalue", "property": "P582"}],
            "P1": []
        });
        let entries: Vec<(&str, &Json)> = json.as_object().unwrap().iter().map(|(k, v)| (k.as_str(), v)).collect();
        let groups = decode_snak_groups(entries.clone(), &["P582", "P580"], &ctx()).unwrap();
        let order: Vec<&str> = groups.iter().map(|g| g.property().id()).collect();
        assert_eq!(order, vec!["P582", "P580"]);

        let groups = decode_snak_groups(entries, &[], &ctx()).unwrap();
        let order: Vec<&str> = groups.iter().map(|g| g.property().id()).collect();
        assert_eq!(order, vec!["P580", "P582"]);
    }

    #[test]
    fn test_encode_snak_groups_merges_shared_property() {
        let groups = vec![
            SnakGroup::new(vec![Snak::SomeValue(p("P1"))]),
            SnakGroup::new(vec![Snak::NoValue(p("P2"))]),
            SnakGroup::new(vec![Snak::NoValue(p("P1"))]),
        ];
        let (map, order) = encode_snak_groups(&groups).unwrap();
        assert_eq!(order, vec!["P1".to_string(), "P2".to_string()]);
        assert_eq!(map["P1"].as_array().unwrap().len(), 2);
    }
}
