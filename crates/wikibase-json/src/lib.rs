//! Wikibase JSON: the Wikibase/Wikidata entity data model and its JSON codec.
//!
//! This crate provides immutable model types for items, properties and
//! their statements, a factory that is the only way to construct them
//! directly, and encoding/decoding for the JSON format served by Wikibase
//! (for example `Special:EntityData/Q42.json` on Wikidata).
//!
//! # Overview
//!
//! Data flows one way from wire JSON to values, snaks, statements and
//! documents, and symmetrically back out:
//! - **Values**: entity ids, strings, monolingual text, time, quantity and
//!   globe coordinates
//! - **Snaks**: a property with a value, an unknown value, or no value
//! - **Statements**: a ranked, referenced claim with an id
//! - **Documents**: labels, descriptions, aliases, statements and (for
//!   items) site links
//!
//! # Quick Start
//!
//! ```rust
//! use wikibase_json::codec::{DecodeContext, decode_document_str, encode_document_string};
//! use wikibase_json::model::TermedStatementDocument;
//!
//! let json = r#"{
//!     "type": "item",
//!     "id": "Q42",
//!     "labels": {"en": {"language": "en", "value": "Douglas Adams"}},
//!     "claims": {"P31": [{
//!         "mainsnak": {
//!             "snaktype": "value",
//!             "property": "P31",
//!             "datatype": "wikibase-item",
//!             "datavalue": {"type": "wikibase-entityid", "value": {"id": "Q5", "entity-type": "item"}}
//!         },
//!         "rank": "normal"
//!     }]}
//! }"#;
//!
//! let ctx = DecodeContext::wikidata();
//! let doc = decode_document_str(json, &ctx).unwrap();
//! assert_eq!(doc.label("en"), Some("Douglas Adams"));
//! assert_eq!(doc.find_statement_group("P31").unwrap().len(), 1);
//!
//! // Encode back and decode again
//! let text = encode_document_string(&doc).unwrap();
//! assert_eq!(decode_document_str(&text, &ctx).unwrap(), doc);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types, the factory and builders
//! - [`codec`]: JSON encoding/decoding
//! - [`render`]: Human-readable rendering
//! - [`util`]: Decimal numbers and timestamp strings
//! - [`error`]: Error types
//!
//! # Site IRIs
//!
//! The wire format only carries local ids such as `Q42`. The IRI of the
//! site owning them is part of every id in the model and is supplied through
//! [`DecodeContext`] when decoding.

pub mod codec;
pub mod error;
pub mod model;
pub mod render;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeContext, decode_document, decode_document_slice, decode_document_str, encode_document,
    encode_document_string, encode_document_string_pretty,
};
pub use error::{ConstructionError, DecodeError, EncodeError};
pub use model::factory;
pub use model::{
    Claim, EntityDocument, EntityIdValue, GlobeCoordinatesValue, ItemDocument, ItemDocumentBuilder,
    ItemIdValue, MonolingualTextValue, PropertyDocument, PropertyDocumentBuilder, PropertyIdValue,
    QuantityValue, Reference, ReferenceBuilder, SiteLink, Snak, SnakDatatype, SnakGroup, Statement,
    StatementBuilder, StatementGroup, StatementRank, TermedStatementDocument, TimeValue, Value,
    ValueVisitor, WIKIDATA_SITE_IRI,
};
pub use render::render_document;
pub use util::Decimal;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
