//! The canonical construction surface for model objects.
//!
//! Every function here either returns a fully valid object or fails with a
//! [`ConstructionError`]. Cross-field invariants (unique languages and site
//! keys, statement subjects matching their document, statement groups keyed
//! by their property) are enforced here and nowhere else.
//!
//! ```rust
//! use wikibase_json::factory;
//! use wikibase_json::model::WIKIDATA_SITE_IRI;
//!
//! let subject = factory::make_item_id_value("Q42", WIKIDATA_SITE_IRI).unwrap();
//! let p31 = factory::make_property_id_value("P31", WIKIDATA_SITE_IRI).unwrap();
//! let q5 = factory::make_item_id_value("Q5", WIKIDATA_SITE_IRI).unwrap();
//!
//! let snak = factory::make_value_snak(p31, q5.into());
//! let claim = factory::make_claim(subject.into(), snak, vec![]);
//! assert_eq!(claim.subject().id(), "Q42");
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::ConstructionError;
use crate::model::{
    Claim, DocumentBody, EntityIdValue, GlobeCoordinatesValue, ItemDocument, ItemIdValue,
    MonolingualTextValue, PLACEHOLDER_STATEMENT_ID, PropertyDocument, PropertyIdValue,
    QuantityValue, Reference, SiteLink, Snak, SnakDatatype, SnakGroup, Statement, StatementGroup,
    StatementRank, TimeValue, Value, ValueSnak,
};
use crate::util::Decimal;

// =============================================================================
// VALUES
// =============================================================================

pub fn make_item_id_value(id: &str, site_iri: &str) -> Result<ItemIdValue, ConstructionError> {
    ItemIdValue::new(id, site_iri)
}

pub fn make_property_id_value(id: &str, site_iri: &str) -> Result<PropertyIdValue, ConstructionError> {
    PropertyIdValue::new(id, site_iri)
}

/// Creates an entity id whose kind is inferred from the id prefix.
pub fn make_entity_id_value(id: &str, site_iri: &str) -> Result<EntityIdValue, ConstructionError> {
    EntityIdValue::infer(id, site_iri)
}

pub fn make_string_value(s: impl Into<String>) -> Value {
    Value::String(s.into())
}

pub fn make_monolingual_text_value(text: &str, language: &str) -> MonolingualTextValue {
    MonolingualTextValue::new(text, language)
}

#[allow(clippy::too_many_arguments)]
pub fn make_time_value(
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    precision: u8,
    before_tolerance: u32,
    after_tolerance: u32,
    timezone_offset: i32,
    calendar_model: &str,
) -> Result<TimeValue, ConstructionError> {
    TimeValue::new(
        year,
        month,
        day,
        hour,
        minute,
        second,
        precision,
        before_tolerance,
        after_tolerance,
        timezone_offset,
        calendar_model,
    )
}

/// Creates a quantity. A missing unit means dimensionless; missing bounds
/// stay missing.
pub fn make_quantity_value(
    amount: Decimal,
    lower_bound: Option<Decimal>,
    upper_bound: Option<Decimal>,
    unit: Option<&str>,
) -> QuantityValue {
    QuantityValue::new(
        amount,
        lower_bound,
        upper_bound,
        unit.unwrap_or(QuantityValue::DIMENSIONLESS),
    )
}

pub fn make_globe_coordinates_value(
    latitude: f64,
    longitude: f64,
    precision: f64,
    globe: &str,
) -> Result<GlobeCoordinatesValue, ConstructionError> {
    GlobeCoordinatesValue::new(latitude, longitude, precision, globe)
}

// =============================================================================
// SNAKS
// =============================================================================

/// Creates a value snak; the datatype is inferred from the value and left
/// unset for string values.
pub fn make_value_snak(property: PropertyIdValue, value: Value) -> Snak {
    let datatype = SnakDatatype::for_value(&value);
    Snak::Value(ValueSnak::new(property, value, datatype))
}

pub fn make_some_value_snak(property: PropertyIdValue) -> Snak {
    Snak::SomeValue(property)
}

pub fn make_no_value_snak(property: PropertyIdValue) -> Snak {
    Snak::NoValue(property)
}

pub fn make_snak_group(snaks: Vec<Snak>) -> Result<SnakGroup, ConstructionError> {
    if snaks.is_empty() {
        return Err(ConstructionError::EmptySnakGroup);
    }
    Ok(SnakGroup::new(snaks))
}

/// Groups snaks by property, groups ordered by first appearance.
pub fn group_snaks(snaks: impl IntoIterator<Item = Snak>) -> Vec<SnakGroup> {
    let mut groups: Vec<Vec<Snak>> = Vec::new();
    for snak in snaks {
        match groups.iter_mut().find(|g| g[0].property_id() == snak.property_id()) {
            Some(group) => group.push(snak),
            None => groups.push(vec![snak]),
        }
    }
    groups.into_iter().map(SnakGroup::new).collect()
}

// =============================================================================
// CLAIMS AND STATEMENTS
// =============================================================================

/// Creates a claim. Qualifier groups sharing a property are merged into
/// the first of them.
///
/// A claim cannot exist on its own, so this builds the backing statement
/// returned by [`make_placeholder_statement`] and hands back its claim.
pub fn make_claim(subject: EntityIdValue, main_snak: Snak, qualifiers: Vec<SnakGroup>) -> Claim {
    make_placeholder_statement(subject, main_snak, qualifiers).into_claim()
}

/// The statement [`make_claim`] wraps a bare claim in: id
/// [`PLACEHOLDER_STATEMENT_ID`], normal rank, no references.
pub fn make_placeholder_statement(
    subject: EntityIdValue,
    main_snak: Snak,
    qualifiers: Vec<SnakGroup>,
) -> Statement {
    Statement::new(
        PLACEHOLDER_STATEMENT_ID.to_string(),
        StatementRank::Normal,
        Claim::new(subject, main_snak, merge_snak_groups(qualifiers)),
        Vec::new(),
    )
}

/// Creates a reference. Groups sharing a property are merged, as in
/// [`make_claim`].
pub fn make_reference(snak_groups: Vec<SnakGroup>) -> Reference {
    Reference::new(merge_snak_groups(snak_groups))
}

/// Merges groups that share a property into the first of them, so there is
/// one group per property as on the wire.
fn merge_snak_groups(groups: Vec<SnakGroup>) -> Vec<SnakGroup> {
    let properties: Vec<_> = groups.iter().map(SnakGroup::property).collect();
    let repeated = properties.iter().enumerate().any(|(i, p)| properties[..i].contains(p));
    if !repeated {
        return groups;
    }
    group_snaks(groups.iter().flat_map(|g| g.snaks().iter().cloned()))
}

/// Wraps an existing claim with an id, rank and references. The claim is
/// taken as is.
pub fn make_statement(
    claim: Claim,
    references: Vec<Reference>,
    rank: StatementRank,
    id: impl Into<String>,
) -> Statement {
    Statement::new(id.into(), rank, claim, references)
}

/// Groups statements. Callers are responsible for them sharing a property.
pub fn make_statement_group(statements: Vec<Statement>) -> Result<StatementGroup, ConstructionError> {
    if statements.is_empty() {
        return Err(ConstructionError::EmptyStatementGroup);
    }
    Ok(StatementGroup::new(statements))
}

// =============================================================================
// DOCUMENTS
// =============================================================================

pub fn make_site_link(title: &str, site_key: &str, badges: Vec<String>) -> SiteLink {
    SiteLink::new(title, site_key, badges)
}

/// Creates an item document. Fails on a repeated label or description
/// language, a repeated site key, a repeated statement-group property, or a
/// statement that does not belong to this item.
#[allow(clippy::too_many_arguments)]
pub fn make_item_document(
    id: ItemIdValue,
    labels: Vec<MonolingualTextValue>,
    descriptions: Vec<MonolingualTextValue>,
    aliases: Vec<MonolingualTextValue>,
    statement_groups: Vec<StatementGroup>,
    site_links: Vec<SiteLink>,
    revision_id: u64,
) -> Result<ItemDocument, ConstructionError> {
    let entity = EntityIdValue::Item(id.clone());
    let body = make_document_body(&entity, labels, descriptions, aliases, statement_groups, revision_id)?;

    let mut links = BTreeMap::new();
    for link in site_links {
        match links.entry(link.site_key().to_string()) {
            Entry::Occupied(e) => {
                return Err(ConstructionError::DuplicateSiteLink { site_key: e.key().clone() });
            }
            Entry::Vacant(e) => {
                e.insert(link);
            }
        }
    }

    Ok(ItemDocument::new(id, body, links))
}

/// Creates a property document; same checks as [`make_item_document`].
pub fn make_property_document(
    id: PropertyIdValue,
    labels: Vec<MonolingualTextValue>,
    descriptions: Vec<MonolingualTextValue>,
    aliases: Vec<MonolingualTextValue>,
    statement_groups: Vec<StatementGroup>,
    datatype: SnakDatatype,
    revision_id: u64,
) -> Result<PropertyDocument, ConstructionError> {
    let entity = EntityIdValue::Property(id.clone());
    let body = make_document_body(&entity, labels, descriptions, aliases, statement_groups, revision_id)?;
    Ok(PropertyDocument::new(id, body, datatype))
}

fn make_document_body(
    entity: &EntityIdValue,
    labels: Vec<MonolingualTextValue>,
    descriptions: Vec<MonolingualTextValue>,
    aliases: Vec<MonolingualTextValue>,
    statement_groups: Vec<StatementGroup>,
    revision_id: u64,
) -> Result<DocumentBody, ConstructionError> {
    let labels = key_by_language(labels, |language| ConstructionError::DuplicateLabel { language })?;
    let descriptions =
        key_by_language(descriptions, |language| ConstructionError::DuplicateDescription { language })?;

    let mut alias_map: BTreeMap<String, Vec<MonolingualTextValue>> = BTreeMap::new();
    for alias in aliases {
        alias_map.entry(alias.language().to_string()).or_default().push(alias);
    }

    let mut groups = BTreeMap::new();
    for group in statement_groups {
        check_group_belongs_to(entity, &group)?;
        match groups.entry(group.property().id().to_string()) {
            Entry::Occupied(e) => {
                return Err(ConstructionError::DuplicateStatementGroup { property: e.key().clone() });
            }
            Entry::Vacant(e) => {
                e.insert(group);
            }
        }
    }

    Ok(DocumentBody {
        labels,
        descriptions,
        aliases: alias_map,
        statement_groups: groups,
        revision_id,
    })
}

fn key_by_language(
    terms: Vec<MonolingualTextValue>,
    duplicate: impl Fn(String) -> ConstructionError,
) -> Result<BTreeMap<String, MonolingualTextValue>, ConstructionError> {
    let mut map = BTreeMap::new();
    for term in terms {
        match map.entry(term.language().to_string()) {
            Entry::Occupied(e) => return Err(duplicate(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(term);
            }
        }
    }
    Ok(map)
}

fn check_group_belongs_to(entity: &EntityIdValue, group: &StatementGroup) -> Result<(), ConstructionError> {
    for statement in group {
        let property = statement.property();
        if property.site_iri() != entity.site_iri() {
            return Err(ConstructionError::SiteMismatch {
                id: property.id().to_string(),
                expected: entity.site_iri().to_string(),
                found: property.site_iri().to_string(),
            });
        }
        if statement.subject() != entity {
            return Err(ConstructionError::SubjectMismatch {
                expected: entity.id().to_string(),
                found: statement.subject().id().to_string(),
            });
        }
    }
    Ok(())
}
