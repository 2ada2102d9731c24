//! Benchmark for Wikibase JSON encoding and decoding.
//!
//! Builds a set of synthetic city items with the builder API, or loads
//! entities from a JSON dump (a top-level array, as in Wikidata's
//! `latest-all.json`), then times encode and decode passes over them.

use std::fs;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wikibase_json::factory::{
    make_globe_coordinates_value, make_item_id_value, make_property_id_value, make_quantity_value,
    make_time_value,
};
use wikibase_json::{
    DecodeContext, Decimal, EntityDocument, GlobeCoordinatesValue, ItemDocumentBuilder,
    PropertyIdValue, StatementRank, TermedStatementDocument, TimeValue, WIKIDATA_SITE_IRI,
    decode_document, encode_document,
};

const DEFAULT_COUNT: u64 = 50_000;
const DECODE_ITERS: u32 = 5;

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

/// Property ids used by the synthetic items.
mod props {
    pub const INSTANCE_OF: &str = "P31";
    pub const COUNTRY: &str = "P17";
    pub const POPULATION: &str = "P1082";
    pub const COORDINATES: &str = "P625";
    pub const INCEPTION: &str = "P571";
    pub const POINT_IN_TIME: &str = "P585";
    pub const STATED_IN: &str = "P248";
}

const CITY: &str = "Q515";
const COUNTRIES: [&str; 4] = ["Q183", "Q142", "Q38", "Q29"];

fn property(id: &str) -> PropertyIdValue {
    make_property_id_value(id, WIKIDATA_SITE_IRI).expect("valid property id")
}

fn make_city(n: u64) -> EntityDocument {
    let id = make_item_id_value(&format!("Q{}", 1_000_000 + n), WIKIDATA_SITE_IRI).expect("valid item id");
    let city = make_item_id_value(CITY, WIKIDATA_SITE_IRI).expect("valid item id");
    let country = make_item_id_value(COUNTRIES[(n % 4) as usize], WIKIDATA_SITE_IRI).expect("valid item id");
    let census = make_time_value(2011 + (n % 10) as i64, 0, 0, 0, 0, 0, TimeValue::PREC_YEAR, 0, 0, 0, TimeValue::CM_GREGORIAN_PRO)
        .expect("valid time");
    let founded = make_time_value(1000 + (n % 900) as i64, 1 + (n % 12) as u8, 1, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, TimeValue::CM_GREGORIAN_PRO)
        .expect("valid time");
    let population = make_quantity_value(Decimal::from(1000 + (n * 37 % 5_000_000) as i64), None, None, None);
    let lat = -60.0 + (n % 1200) as f64 / 10.0;
    let lon = -180.0 + (n % 3600) as f64 / 10.0;
    let location = make_globe_coordinates_value(lat, lon, GlobeCoordinatesValue::PREC_ARCSECOND, GlobeCoordinatesValue::GLOBE_EARTH)
        .expect("valid coordinates");

    let name = format!("City {}", n);
    ItemDocumentBuilder::new(id)
        .label(&name, "en")
        .label(&format!("Stadt {}", n), "de")
        .description("synthetic city", "en")
        .alias(&format!("C{}", n), "en")
        .statement(property(props::INSTANCE_OF), city.into(), |s| s)
        .statement(property(props::COUNTRY), country.into(), |s| s.rank(StatementRank::Preferred))
        .statement(property(props::POPULATION), population.into(), |s| {
            s.qualifier_value(property(props::POINT_IN_TIME), census.into())
                .reference(|r| {
                    r.value(
                        property(props::STATED_IN),
                        make_item_id_value("Q36578", WIKIDATA_SITE_IRI).expect("valid item id").into(),
                    )
                })
        })
        .statement(property(props::COORDINATES), location.into(), |s| s)
        .statement(property(props::INCEPTION), founded.into(), |s| s)
        .site_link(&name, "enwiki")
        .revision_id(n)
        .build()
        .expect("synthetic city is well formed")
        .into()
}

fn load_dump(path: &str, ctx: &DecodeContext) -> Vec<EntityDocument> {
    let text = fs::read_to_string(path).expect("Failed to read dump");
    let entities: Vec<serde_json::Value> = serde_json::from_str(&text).expect("Failed to parse dump");
    entities
        .iter()
        .filter_map(|json| match decode_document(json, ctx) {
            Ok(doc) => Some(doc),
            Err(err) => {
                info!(error = %err, "skipping entity");
                None
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ctx = DecodeContext::wikidata();
    let arg = std::env::args().nth(1);

    let load_start = Instant::now();
    let documents: Vec<EntityDocument> = match arg.as_deref().map(str::parse::<u64>) {
        Some(Ok(count)) => (0..count).map(make_city).collect(),
        Some(Err(_)) => load_dump(arg.as_deref().unwrap_or_default(), &ctx),
        None => (0..DEFAULT_COUNT).map(make_city).collect(),
    };
    let load_time = load_start.elapsed();

    let statement_count: usize = documents.iter().map(|d| d.all_statements().count()).sum();
    println!(
        "Prepared {} documents ({} statements) in {:?}",
        documents.len(),
        statement_count,
        load_time
    );

    // Encoding to JSON values
    let encode_start = Instant::now();
    let encoded: Vec<serde_json::Value> = documents
        .iter()
        .map(|d| encode_document(d).expect("Failed to encode"))
        .collect();
    let encode_time = encode_start.elapsed();

    let text = serde_json::to_string(&encoded).expect("Failed to serialize");
    println!("\nEncode: {} bytes of JSON in {:?}", text.len(), encode_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (text.len() as f64 / 1_000_000.0) / encode_time.as_secs_f64()
    );

    // Decoding, averaged over several passes
    let mut decoded = Vec::new();
    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        decoded = encoded
            .iter()
            .map(|json| decode_document(json, &ctx).expect("Failed to decode"))
            .collect();
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!("\nDecode: {:?} (avg of {} iterations)", decode_time, DECODE_ITERS);
    println!(
        "  Throughput: {:.2} MB/s",
        (text.len() as f64 / 1_000_000.0) / decode_time.as_secs_f64()
    );

    // Full text pass, including JSON parsing
    let parse_start = Instant::now();
    let reparsed: Vec<serde_json::Value> = serde_json::from_str(&text).expect("Failed to parse");
    let redecoded: Vec<EntityDocument> = reparsed
        .iter()
        .map(|json| decode_document(json, &ctx).expect("Failed to decode"))
        .collect();
    println!("\nParse + decode: {:?}", parse_start.elapsed());

    assert_eq!(decoded, documents, "decoded documents should equal the originals");
    assert_eq!(redecoded, documents, "text round trip should preserve documents");
    println!("\nRound trip verified for {} documents", documents.len());
}
