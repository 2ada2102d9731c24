//! Data model types for Wikibase entities.
//!
//! This module contains all the core types:
//! - Identifiers (items and properties, with their site IRI)
//! - Values (the payload of value snaks)
//! - Snaks, claims, references and statements
//! - Documents (items and properties)
//! - The factory and builders used to construct them

pub mod builder;
pub mod document;
pub mod factory;
pub mod id;
pub mod snak;
pub mod statement;
pub mod value;

pub use builder::{ItemDocumentBuilder, PropertyDocumentBuilder, ReferenceBuilder, StatementBuilder};
pub use document::{
    DocumentBody, EntityDocument, ItemDocument, PropertyDocument, SiteLink, TermedStatementDocument,
};
pub use id::{
    EntityIdValue, EntityKind, ItemIdValue, PLACEHOLDER_STATEMENT_ID, PropertyIdValue,
    WIKIDATA_SITE_IRI, new_statement_id,
};
pub use snak::{Snak, SnakDatatype, SnakGroup, SnakType, ValueSnak};
pub use statement::{Claim, Reference, Statement, StatementGroup, StatementRank};
pub use value::{
    GlobeCoordinatesValue, MonolingualTextValue, QuantityValue, TimeValue, Value, ValueType,
    ValueVisitor,
};
