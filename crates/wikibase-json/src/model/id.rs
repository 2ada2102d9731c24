//! Entity identifiers.
//!
//! An entity is identified by a local id (`Q42`, `P31`) together with the
//! IRI of the site that owns it. The wire format only carries the local id,
//! so the site IRI always comes from the caller.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::ConstructionError;

/// Site IRI of Wikidata entities.
pub const WIKIDATA_SITE_IRI: &str = "http://www.wikidata.org/entity/";

/// Statement id given to the statement synthesized around a bare claim.
pub const PLACEHOLDER_STATEMENT_ID: &str = "empty id 12345";

lazy_static! {
    static ref ITEM_ID: Regex = Regex::new(r"^Q[1-9][0-9]*$").expect("valid item id pattern");
    static ref PROPERTY_ID: Regex =
        Regex::new(r"^P[1-9][0-9]*$").expect("valid property id pattern");
}

/// The kinds of entity this model supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Item,
    Property,
}

impl EntityKind {
    /// Returns the `entity-type` wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Property => "property",
        }
    }

    /// Parses an `entity-type` wire string.
    pub fn from_wire(s: &str) -> Option<EntityKind> {
        match s {
            "item" => Some(EntityKind::Item),
            "property" => Some(EntityKind::Property),
            _ => None,
        }
    }

    /// Infers the kind from the id prefix (`Q` or `P`).
    pub fn infer(id: &str) -> Option<EntityKind> {
        match id.as_bytes().first() {
            Some(b'Q') => Some(EntityKind::Item),
            Some(b'P') => Some(EntityKind::Property),
            _ => None,
        }
    }

    /// Returns the id prefix letter.
    pub fn prefix(self) -> char {
        match self {
            EntityKind::Item => 'Q',
            EntityKind::Property => 'P',
        }
    }
}

fn numeric_part(id: &str) -> Option<u64> {
    id.get(1..)?.parse().ok()
}

/// Identifier of an item, e.g. `Q42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIdValue {
    id: String,
    site_iri: String,
}

impl ItemIdValue {
    /// Creates an item id, rejecting anything that is not `Q<n>`.
    pub fn new(id: impl Into<String>, site_iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let id = id.into();
        if !ITEM_ID.is_match(&id) {
            return Err(ConstructionError::InvalidEntityId { kind: "item", id });
        }
        Ok(Self { id, site_iri: site_iri.into() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn site_iri(&self) -> &str {
        &self.site_iri
    }

    /// Returns the full IRI (site IRI followed by the local id).
    pub fn iri(&self) -> String {
        format!("{}{}", self.site_iri, self.id)
    }

    /// Returns the number after the prefix, if it fits in a u64.
    pub fn numeric_id(&self) -> Option<u64> {
        numeric_part(&self.id)
    }
}

/// Identifier of a property, e.g. `P31`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyIdValue {
    id: String,
    site_iri: String,
}

impl PropertyIdValue {
    /// Creates a property id, rejecting anything that is not `P<n>`.
    pub fn new(id: impl Into<String>, site_iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let id = id.into();
        if !PROPERTY_ID.is_match(&id) {
            return Err(ConstructionError::InvalidEntityId { kind: "property", id });
        }
        Ok(Self { id, site_iri: site_iri.into() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn site_iri(&self) -> &str {
        &self.site_iri
    }

    /// Returns the full IRI (site IRI followed by the local id).
    pub fn iri(&self) -> String {
        format!("{}{}", self.site_iri, self.id)
    }

    /// Returns the number after the prefix, if it fits in a u64.
    pub fn numeric_id(&self) -> Option<u64> {
        numeric_part(&self.id)
    }
}

/// Identifier of any supported entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityIdValue {
    Item(ItemIdValue),
    Property(PropertyIdValue),
}

impl EntityIdValue {
    /// Creates an id of the given kind.
    pub fn new(
        kind: EntityKind,
        id: impl Into<String>,
        site_iri: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        match kind {
            EntityKind::Item => ItemIdValue::new(id, site_iri).map(EntityIdValue::Item),
            EntityKind::Property => PropertyIdValue::new(id, site_iri).map(EntityIdValue::Property),
        }
    }

    /// Creates an id whose kind is inferred from its prefix.
    pub fn infer(id: impl Into<String>, site_iri: impl Into<String>) -> Result<Self, ConstructionError> {
        let id = id.into();
        match EntityKind::infer(&id) {
            Some(kind) => Self::new(kind, id, site_iri),
            None => Err(ConstructionError::InvalidEntityId { kind: "entity", id }),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityIdValue::Item(_) => EntityKind::Item,
            EntityIdValue::Property(_) => EntityKind::Property,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityIdValue::Item(v) => v.id(),
            EntityIdValue::Property(v) => v.id(),
        }
    }

    pub fn site_iri(&self) -> &str {
        match self {
            EntityIdValue::Item(v) => v.site_iri(),
            EntityIdValue::Property(v) => v.site_iri(),
        }
    }

    pub fn iri(&self) -> String {
        format!("{}{}", self.site_iri(), self.id())
    }

    pub fn numeric_id(&self) -> Option<u64> {
        numeric_part(self.id())
    }
}

impl From<ItemIdValue> for EntityIdValue {
    fn from(v: ItemIdValue) -> Self {
        EntityIdValue::Item(v)
    }
}

impl From<PropertyIdValue> for EntityIdValue {
    fn from(v: PropertyIdValue) -> Self {
        EntityIdValue::Property(v)
    }
}

/// Generates a fresh statement id of the form `Q42$<UUID>`.
pub fn new_statement_id(subject: &EntityIdValue) -> String {
    format!("{}${}", subject.id(), Uuid::new_v4().to_string().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_validation() {
        assert!(ItemIdValue::new("Q42", WIKIDATA_SITE_IRI).is_ok());
        assert!(ItemIdValue::new("Q0", WIKIDATA_SITE_IRI).is_err());
        assert!(ItemIdValue::new("Q042", WIKIDATA_SITE_IRI).is_err());
        assert!(ItemIdValue::new("P42", WIKIDATA_SITE_IRI).is_err());
        assert!(ItemIdValue::new("Q", WIKIDATA_SITE_IRI).is_err());
        assert!(ItemIdValue::new("", WIKIDATA_SITE_IRI).is_err());
    }

    #[test]
    fn test_property_id_validation() {
        assert!(PropertyIdValue::new("P31", WIKIDATA_SITE_IRI).is_ok());
        assert!(PropertyIdValue::new("Q31", WIKIDATA_SITE_IRI).is_err());
        assert!(PropertyIdValue::new("P-1", WIKIDATA_SITE_IRI).is_err());
    }

    #[test]
    fn test_kind_inference() {
        let item = EntityIdValue::infer("Q5", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(item.kind(), EntityKind::Item);
        let prop = EntityIdValue::infer("P31", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(prop.kind(), EntityKind::Property);
        assert!(EntityIdValue::infer("L7", WIKIDATA_SITE_IRI).is_err());
    }

    #[test]
    fn test_iri_and_numeric_id() {
        let id = ItemIdValue::new("Q42", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(id.iri(), "http://www.wikidata.org/entity/Q42");
        assert_eq!(id.numeric_id(), Some(42));

        let huge = ItemIdValue::new("Q99999999999999999999999", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(huge.numeric_id(), None);
    }

    #[test]
    fn test_site_is_part_of_identity() {
        let a = ItemIdValue::new("Q1", WIKIDATA_SITE_IRI).unwrap();
        let b = ItemIdValue::new("Q1", "http://example.org/entity/").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_statement_id_shape() {
        let subject = EntityIdValue::infer("Q42", WIKIDATA_SITE_IRI).unwrap();
        let id1 = new_statement_id(&subject);
        let id2 = new_statement_id(&subject);
        assert!(id1.starts_with("Q42$"));
        assert_eq!(id1.len(), "Q42$".len() + 36);
        assert_eq!(id1, id1.to_uppercase());
        assert_ne!(id1, id2);
    }
}
