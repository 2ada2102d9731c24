//! JSON encoding/decoding for the Wikibase entity format.
//!
//! Every model type has a `decode_*` function taking a `serde_json::Value`
//! and a [`DecodeContext`], and an `encode_*` function producing one.
//! Unknown fields are ignored on decode.

pub mod document;
pub mod primitives;
pub mod snak;
pub mod statement;
pub mod value;

pub use document::{
    decode_document, decode_item_document, decode_property_document, decode_site_link, decode_term,
    encode_document, encode_item_document, encode_property_document, encode_site_link, encode_term,
};
pub use primitives::{ObjectReader, ObjectWriter};
pub use snak::{decode_snak, decode_snak_groups, encode_snak, encode_snak_groups};
pub use statement::{
    decode_claim, decode_reference, decode_statement, encode_claim, encode_reference,
    encode_statement,
};
pub use value::{decode_value, encode_value};

use crate::error::{DecodeError, EncodeError};
use crate::model::{EntityDocument, WIKIDATA_SITE_IRI};

/// Settings supplied by the caller when decoding.
///
/// The wire format carries local ids only, so the IRI of the site that owns
/// them has to come from here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodeContext {
    site_iri: String,
}

impl DecodeContext {
    pub fn new(site_iri: impl Into<String>) -> Self {
        Self { site_iri: site_iri.into() }
    }

    /// Context for data from Wikidata.
    pub fn wikidata() -> Self {
        Self::new(WIKIDATA_SITE_IRI)
    }

    pub fn site_iri(&self) -> &str {
        &self.site_iri
    }
}

impl Default for DecodeContext {
    fn default() -> Self {
        Self::wikidata()
    }
}

/// Parses JSON text and decodes the entity document it holds.
pub fn decode_document_str(input: &str, ctx: &DecodeContext) -> Result<EntityDocument, DecodeError> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    decode_document(&json, ctx)
}

/// Decodes an entity document from JSON bytes.
pub fn decode_document_slice(input: &[u8], ctx: &DecodeContext) -> Result<EntityDocument, DecodeError> {
    let json: serde_json::Value = serde_json::from_slice(input)?;
    decode_document(&json, ctx)
}

/// Encodes an entity document as compact JSON text.
pub fn encode_document_string(document: &EntityDocument) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&encode_document(document)?)?)
}

/// Encodes an entity document as indented JSON text.
pub fn encode_document_string_pretty(document: &EntityDocument) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(&encode_document(document)?)?)
}
