//! End-to-end tests: decoding real-shaped documents, factory construction,
//! and encode/decode round trips.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::json;
use wikibase_json::codec::{
    DecodeContext, decode_claim, decode_document, decode_item_document, decode_reference,
    decode_snak, decode_statement, decode_value, encode_claim, encode_document,
    encode_item_document, encode_reference, encode_statement, encode_value,
};
use wikibase_json::factory::*;
use wikibase_json::model::{
    EntityDocument, EntityIdValue, ItemDocumentBuilder, PLACEHOLDER_STATEMENT_ID,
    PropertyDocumentBuilder, Snak, SnakDatatype, StatementRank, TermedStatementDocument, Value,
    WIKIDATA_SITE_IRI,
};
use wikibase_json::{ConstructionError, Decimal, ItemIdValue, PropertyIdValue, TimeValue};

const Q42_JSON: &str = include_str!("fixtures/Q42.json");

fn ctx() -> DecodeContext {
    DecodeContext::wikidata()
}

fn q(id: &str) -> ItemIdValue {
    make_item_id_value(id, WIKIDATA_SITE_IRI).unwrap()
}

fn p(id: &str) -> PropertyIdValue {
    make_property_id_value(id, WIKIDATA_SITE_IRI).unwrap()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_decode_value_snak_with_site_context() {
    let json = json!({
        "snaktype": "value",
        "property": "P31",
        "datatype": "wikibase-item",
        "datavalue": {"type": "wikibase-entityid", "value": {"id": "Q5", "entity-type": "item"}}
    });
    let snak = decode_snak(&json, &DecodeContext::new("http://www.wikidata.org/entity/")).unwrap();

    match &snak {
        Snak::Value(value_snak) => {
            assert_eq!(value_snak.property().id(), "P31");
            assert_eq!(value_snak.property().site_iri(), "http://www.wikidata.org/entity/");
            match value_snak.value() {
                Value::ItemId(item) => {
                    assert_eq!(item.id(), "Q5");
                    assert_eq!(item.site_iri(), "http://www.wikidata.org/entity/");
                }
                other => panic!("Expected item id, got {:?}", other),
            }
            assert_eq!(value_snak.datatype(), Some(&SnakDatatype::Item));
        }
        other => panic!("Expected value snak, got {:?}", other),
    }

    assert_eq!(snak, make_value_snak(p("P31"), q("Q5").into()));
}

#[test]
fn test_make_claim_has_backing_statement() {
    let subject: EntityIdValue = q("Q42").into();
    let main_snak = make_value_snak(p("P31"), q("Q5").into());

    let statement = make_placeholder_statement(subject.clone(), main_snak.clone(), vec![]);
    assert!(!statement.id().is_empty());
    assert_eq!(statement.id(), PLACEHOLDER_STATEMENT_ID);
    assert_eq!(statement.rank(), StatementRank::Normal);
    assert!(statement.references().is_empty());

    let claim = make_claim(subject, main_snak, vec![]);
    assert_eq!(statement.claim(), &claim);
}

#[test]
fn test_item_document_roundtrip_with_qualifiers_and_reference() {
    let subject = q("Q42");
    let qualifier = make_snak_group(vec![make_value_snak(
        p("P580"),
        make_time_value(1979, 10, 12, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, TimeValue::CM_GREGORIAN_PRO)
            .unwrap()
            .into(),
    )])
    .unwrap();
    let reference = make_reference(vec![
        make_snak_group(vec![make_value_snak(p("P248"), q("Q36578").into())]).unwrap(),
    ]);
    let claim = make_claim(subject.clone().into(), make_value_snak(p("P31"), q("Q5").into()), vec![qualifier]);
    let statement = make_statement(claim, vec![reference], StatementRank::Normal, "Q42$abc");
    let group = make_statement_group(vec![statement]).unwrap();

    let doc = make_item_document(
        subject,
        vec![make_monolingual_text_value("Douglas Adams", "en")],
        vec![],
        vec![],
        vec![group],
        vec![],
        0,
    )
    .unwrap();

    let encoded = encode_item_document(&doc).unwrap();
    let decoded = decode_item_document(&encoded, &ctx()).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(hash_of(&decoded), hash_of(&doc));
}

#[test]
fn test_site_keys_must_be_unique_at_construction() {
    let duplicate = make_item_document(
        q("Q42"),
        vec![],
        vec![],
        vec![],
        vec![],
        vec![
            make_site_link("Douglas Adams", "enwiki", vec![]),
            make_site_link("Douglas Adams (writer)", "enwiki", vec![]),
        ],
        0,
    );
    assert_eq!(
        duplicate.unwrap_err(),
        ConstructionError::DuplicateSiteLink { site_key: "enwiki".to_string() }
    );

    let distinct = make_item_document(
        q("Q42"),
        vec![],
        vec![],
        vec![],
        vec![],
        vec![
            make_site_link("Douglas Adams", "enwiki", vec![]),
            make_site_link("Douglas Adams", "frwiki", vec![]),
        ],
        0,
    )
    .unwrap();
    assert_eq!(distinct.site_links().len(), 2);
    assert!(distinct.site_link("enwiki").is_some());
    assert!(distinct.site_link("frwiki").is_some());
}

#[test]
fn test_construction_is_strict_but_decode_is_lenient() {
    init_tracing();

    let strict = make_item_document(
        q("Q1"),
        vec![
            make_monolingual_text_value("universe", "en"),
            make_monolingual_text_value("cosmos", "en"),
        ],
        vec![],
        vec![],
        vec![],
        vec![],
        0,
    );
    assert_eq!(strict.unwrap_err(), ConstructionError::DuplicateLabel { language: "en".to_string() });

    let json = json!({
        "type": "item",
        "id": "Q1",
        "labels": {
            "en": {"language": "en", "value": "universe"},
            "en-gb": {"language": "en", "value": "cosmos"}
        },
        "descriptions": {
            "en": {"language": "en", "value": "totality of space"},
            "en-us": {"language": "en", "value": "all of space and time"}
        },
        "sitelinks": {
            "enwiki": {"site": "enwiki", "title": "Universe"},
            "enwiki-old": {"site": "enwiki", "title": "The Universe"}
        }
    });
    let lenient = decode_item_document(&json, &ctx()).unwrap();
    assert_eq!(lenient.label("en"), Some("cosmos"));
    assert_eq!(lenient.description("en"), Some("all of space and time"));
    assert_eq!(lenient.site_links().len(), 1);
    assert_eq!(lenient.site_link("enwiki").unwrap().title(), "The Universe");
}

#[test]
fn test_equal_across_construction_paths() {
    let built = ItemDocumentBuilder::new(q("Q64"))
        .label("Berlin", "de")
        .label("Berlin", "en")
        .description("Hauptstadt Deutschlands", "de")
        .alias("Spree-Athen", "de")
        .statement(p("P1082"), make_quantity_value(Decimal::parse("+3755251").unwrap(), None, None, None).into(), |s| {
            s.id("Q64$1").rank(StatementRank::Preferred)
        })
        .site_link("Berlin", "dewiki")
        .revision_id(42)
        .build()
        .unwrap();

    let json = json!({
        "id": "Q64",
        "lastrevid": 42,
        "sitelinks": {"dewiki": {"title": "Berlin", "site": "dewiki", "badges": []}},
        "claims": {"P1082": [{
            "rank": "preferred",
            "id": "Q64$1",
            "mainsnak": {
                "property": "P1082",
                "snaktype": "value",
                "datavalue": {"type": "quantity", "value": {"unit": "1", "amount": "+3755251"}}
            }
        }]},
        "aliases": {"de": [{"value": "Spree-Athen", "language": "de"}]},
        "descriptions": {"de": {"value": "Hauptstadt Deutschlands", "language": "de"}},
        "labels": {"en": {"value": "Berlin", "language": "en"}, "de": {"value": "Berlin", "language": "de"}}
    });
    let decoded = decode_item_document(&json, &ctx()).unwrap();

    assert_eq!(decoded, built);
    assert_eq!(hash_of(&decoded), hash_of(&built));

    let other = ItemDocumentBuilder::new(q("Q64")).label("Berlin", "de").build().unwrap();
    assert_ne!(other, built);
    assert_ne!(hash_of(&other), hash_of(&built));
}

#[test]
fn test_site_iri_is_part_of_identity() {
    let wikidata = decode_document(&json!({"id": "Q1"}), &ctx()).unwrap();
    let other = decode_document(&json!({"id": "Q1"}), &DecodeContext::new("http://example.org/entity/")).unwrap();
    assert_ne!(wikidata, other);
    assert_eq!(other.entity_id().iri(), "http://example.org/entity/Q1");
}

#[test]
fn test_wikidata_fixture() {
    let json: serde_json::Value = serde_json::from_str(Q42_JSON).unwrap();
    let doc = decode_item_document(&json, &ctx()).unwrap();

    assert_eq!(doc.revision_id(), 2071553411);
    assert_eq!(doc.labels().len(), 3);
    assert_eq!(doc.aliases_for("en").len(), 3);
    assert_eq!(doc.statement_groups().len(), 7);
    assert_eq!(doc.site_link("enwiki").unwrap().badges(), ["Q17437798".to_string()]);

    let p31 = doc.find_statement_group("P31").unwrap();
    let reference = &p31.statements()[0].references()[0];
    let order: Vec<&str> = reference.snak_groups().iter().map(|g| g.property().id()).collect();
    assert_eq!(order, vec!["P248", "P813"]);

    let birth = doc.find_statement_group("P569").unwrap();
    assert_eq!(birth.best_statements().len(), 1);
    match birth.statements()[0].value() {
        Some(Value::Time(time)) => assert_eq!((time.year(), time.month(), time.day()), (1952, 3, 11)),
        other => panic!("Expected time value, got {:?}", other),
    }

    let coordinates = doc.find_statement_group("P625").unwrap();
    assert!(coordinates.best_statements().is_empty());
    assert_eq!(coordinates.statements()[0].qualifiers().len(), 1);

    let viaf = &doc.find_statement_group("P214").unwrap().statements()[0];
    match viaf.main_snak() {
        Snak::Value(snak) => assert_eq!(snak.datatype(), Some(&SnakDatatype::ExternalId)),
        other => panic!("Expected value snak, got {:?}", other),
    }

    assert!(!doc.find_statement_group("P40").unwrap().statements()[0].has_value_snak());
}

#[test]
fn test_wikidata_fixture_roundtrip() {
    let json: serde_json::Value = serde_json::from_str(Q42_JSON).unwrap();
    let doc = decode_document(&json, &ctx()).unwrap();
    let encoded = encode_document(&doc).unwrap();

    assert_eq!(encoded["sitelinks"]["enwiki"], json["sitelinks"]["enwiki"]);
    assert_eq!(encoded["claims"]["P569"][0]["mainsnak"], json["claims"]["P569"][0]["mainsnak"]);
    assert_eq!(decode_document(&encoded, &ctx()).unwrap(), doc);
}

#[test]
fn test_statement_roundtrip_keeps_subject_from_caller() {
    let json: serde_json::Value = serde_json::from_str(Q42_JSON).unwrap();
    let subject: EntityIdValue = q("Q42").into();
    let statement = decode_statement(&json["claims"]["P31"][0], &subject, &ctx()).unwrap();
    let encoded = encode_statement(&statement).unwrap();
    assert_eq!(decode_statement(&encoded, &subject, &ctx()).unwrap(), statement);
}

#[test]
fn test_property_document_roundtrip() {
    let doc = PropertyDocumentBuilder::new(p("P569"), SnakDatatype::Time)
        .label("date of birth", "en")
        .description("date on which the subject was born", "en")
        .alias("born on", "en")
        .statement_with_snak(make_some_value_snak(p("P1629")), |s| s.id("P569$1"))
        .revision_id(7)
        .build()
        .unwrap();
    let document: EntityDocument = doc.into();

    let encoded = encode_document(&document).unwrap();
    assert_eq!(encoded["datatype"], "time");
    assert_eq!(decode_document(&encoded, &ctx()).unwrap(), document);
}

#[test]
fn test_datatype_inference_mapping() {
    let time = make_time_value(2000, 1, 1, 0, 0, 0, 11, 0, 0, 0, TimeValue::CM_GREGORIAN_PRO).unwrap();
    let coordinates = make_globe_coordinates_value(1.0, 1.0, 0.1, WIKIDATA_SITE_IRI).unwrap();
    let cases: Vec<(Value, Option<SnakDatatype>)> = vec![
        (time.into(), Some(SnakDatatype::Time)),
        (q("Q1").into(), Some(SnakDatatype::Item)),
        (p("P1").into(), Some(SnakDatatype::Property)),
        (coordinates.into(), Some(SnakDatatype::GlobeCoordinate)),
        (make_quantity_value(Decimal::from(1), None, None, None).into(), Some(SnakDatatype::Quantity)),
        (make_monolingual_text_value("a", "en").into(), Some(SnakDatatype::MonolingualText)),
        (make_string_value("a"), None),
    ];
    for (value, expected) in cases {
        match make_value_snak(p("P2"), value) {
            Snak::Value(snak) => assert_eq!(snak.datatype(), expected.as_ref()),
            other => panic!("Expected value snak, got {:?}", other),
        }
    }
}

#[test]
fn test_model_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityDocument>();
    assert_send_sync::<DecodeContext>();

    let json: serde_json::Value = serde_json::from_str(Q42_JSON).unwrap();
    let doc = std::sync::Arc::new(decode_document(&json, &ctx()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = std::sync::Arc::clone(&doc);
            std::thread::spawn(move || encode_document(&doc).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(decode_document(&handle.join().unwrap(), &ctx()).unwrap(), *doc);
    }
}

#[test]
fn test_repeated_group_properties_roundtrip() {
    let subject: EntityIdValue = q("Q42").into();
    let qualifiers = vec![
        make_snak_group(vec![make_some_value_snak(p("P1"))]).unwrap(),
        make_snak_group(vec![make_no_value_snak(p("P2"))]).unwrap(),
        make_snak_group(vec![make_no_value_snak(p("P1"))]).unwrap(),
    ];
    let claim = make_claim(subject.clone(), make_value_snak(p("P31"), q("Q5").into()), qualifiers);
    let decoded = decode_claim(&encode_claim(&claim).unwrap(), &subject, &ctx()).unwrap();
    assert_eq!(decoded, claim);

    let reference = make_reference(vec![
        make_snak_group(vec![make_value_snak(p("P248"), q("Q1").into())]).unwrap(),
        make_snak_group(vec![make_value_snak(p("P813"), make_string_value("x"))]).unwrap(),
        make_snak_group(vec![make_value_snak(p("P248"), q("Q2").into())]).unwrap(),
    ]);
    let decoded = decode_reference(&encode_reference(&reference).unwrap(), &ctx()).unwrap();
    assert_eq!(decoded, reference);
}

#[test]
fn test_extreme_years_roundtrip() {
    for year in [i64::MIN, i64::MAX, -13_798_000_000] {
        let value: Value =
            make_time_value(year, 0, 0, 0, 0, 0, TimeValue::PREC_1GY, 0, 0, 0, TimeValue::CM_GREGORIAN_PRO)
                .unwrap()
                .into();
        let decoded = decode_value(&encode_value(&value).unwrap(), &ctx()).unwrap();
        assert_eq!(decoded, value, "year {}", year);
    }
}
