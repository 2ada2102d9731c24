//! Entity document encoding/decoding.
//!
//! Decoding is lenient where the wire maps collide: when two terms claim
//! the same language, two site links the same site, or two statement
//! arrays the same property, the later one wins and a warning is logged.
//! Direct construction through the factory rejects the same input.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};
use tracing::{debug, warn};

use crate::codec::DecodeContext;
use crate::codec::primitives::{ObjectReader, ObjectWriter, as_array};
use crate::codec::statement::{decode_statement, encode_statement};
use crate::error::{ConstructionError, DecodeError, EncodeError};
use crate::model::{
    DocumentBody, EntityDocument, EntityIdValue, EntityKind, ItemDocument, ItemIdValue,
    MonolingualTextValue, PropertyDocument, PropertyIdValue, SiteLink, SnakDatatype,
    StatementGroup, TermedStatementDocument,
};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a term: `{"language", "value"}`. The map key stands in for a
/// missing `language`.
pub fn decode_term(json: &Json, key: &str) -> Result<MonolingualTextValue, DecodeError> {
    let reader = ObjectReader::new(json, "term")?;
    let language = reader.optional_str("language")?.unwrap_or(key);
    let value = reader.required_str("value")?;
    Ok(MonolingualTextValue::new(value, language))
}

/// Decodes a site link: `{"site", "title", "badges"}`. The map key stands in
/// for a missing `site`.
pub fn decode_site_link(json: &Json, key: &str) -> Result<SiteLink, DecodeError> {
    let reader = ObjectReader::new(json, "site link")?;
    let site = reader.optional_str("site")?.unwrap_or(key);
    let title = reader.required_str("title")?;
    let badges = reader.string_array("badges")?.into_iter().map(str::to_string).collect();
    Ok(SiteLink::new(title, site, badges))
}

/// Decodes an item or property document.
///
/// The kind comes from `type` when present, otherwise from the id prefix.
/// Every id in the document is owned by `ctx`'s site.
pub fn decode_document(json: &Json, ctx: &DecodeContext) -> Result<EntityDocument, DecodeError> {
    let reader = ObjectReader::new(json, "entity document")?;
    let id = reader.required_str("id")?;

    let kind = match reader.optional_str("type")? {
        Some(tag) => EntityKind::from_wire(tag).ok_or_else(|| DecodeError::UnknownTag {
            kind: "entity type",
            value: tag.to_string(),
        })?,
        None => EntityKind::infer(id).ok_or_else(|| ConstructionError::InvalidEntityId {
            kind: "entity",
            id: id.to_string(),
        })?,
    };

    let document: EntityDocument = match kind {
        EntityKind::Item => {
            let item_id = ItemIdValue::new(id, ctx.site_iri())?;
            let body = read_body(&reader, &EntityIdValue::Item(item_id.clone()), ctx)?;
            let site_links = read_site_links(&reader)?;
            ItemDocument::new(item_id, body, site_links).into()
        }
        EntityKind::Property => {
            let property_id = PropertyIdValue::new(id, ctx.site_iri())?;
            let body = read_body(&reader, &EntityIdValue::Property(property_id.clone()), ctx)?;
            let datatype = SnakDatatype::from_wire(reader.required_str("datatype")?);
            PropertyDocument::new(property_id, body, datatype).into()
        }
    };

    debug!(
        id,
        statements = document.all_statements().count(),
        revision = document.revision_id(),
        "decoded entity document"
    );
    Ok(document)
}

/// Decodes an item document, failing if the JSON holds another kind.
pub fn decode_item_document(json: &Json, ctx: &DecodeContext) -> Result<ItemDocument, DecodeError> {
    match decode_document(json, ctx)? {
        EntityDocument::Item(item) => Ok(item),
        EntityDocument::Property(_) => Err(DecodeError::UnknownTag {
            kind: "item document type",
            value: EntityKind::Property.as_str().to_string(),
        }),
    }
}

/// Decodes a property document, failing if the JSON holds another kind.
pub fn decode_property_document(json: &Json, ctx: &DecodeContext) -> Result<PropertyDocument, DecodeError> {
    match decode_document(json, ctx)? {
        EntityDocument::Property(property) => Ok(property),
        EntityDocument::Item(_) => Err(DecodeError::UnknownTag {
            kind: "property document type",
            value: EntityKind::Item.as_str().to_string(),
        }),
    }
}

fn read_body(
    reader: &ObjectReader<'_>,
    subject: &EntityIdValue,
    ctx: &DecodeContext,
) -> Result<DocumentBody, DecodeError> {
    Ok(DocumentBody {
        labels: read_terms(reader, "labels", subject)?,
        descriptions: read_terms(reader, "descriptions", subject)?,
        aliases: read_aliases(reader)?,
        statement_groups: read_statement_groups(reader, subject, ctx)?,
        revision_id: reader.u64_or("lastrevid", 0)?,
    })
}

fn read_terms(
    reader: &ObjectReader<'_>,
    field: &'static str,
    subject: &EntityIdValue,
) -> Result<BTreeMap<String, MonolingualTextValue>, DecodeError> {
    let mut terms = BTreeMap::new();
    for (key, json) in reader.entries(field)? {
        let term = decode_term(json, key)?;
        let language = term.language().to_string();
        if let Some(previous) = terms.insert(language, term) {
            warn!(
                entity = subject.id(),
                field,
                language = previous.language(),
                "duplicate term language, keeping the last one"
            );
        }
    }
    Ok(terms)
}

fn read_aliases(reader: &ObjectReader<'_>) -> Result<BTreeMap<String, Vec<MonolingualTextValue>>, DecodeError> {
    let mut aliases: BTreeMap<String, Vec<MonolingualTextValue>> = BTreeMap::new();
    for (key, json) in reader.entries("aliases")? {
        for item in as_array(json, "aliases", "entity document")? {
            let alias = decode_term(item, key)?;
            aliases.entry(alias.language().to_string()).or_default().push(alias);
        }
    }
    Ok(aliases)
}

fn read_statement_groups(
    reader: &ObjectReader<'_>,
    subject: &EntityIdValue,
    ctx: &DecodeContext,
) -> Result<BTreeMap<String, StatementGroup>, DecodeError> {
    let mut groups = BTreeMap::new();
    for (key, json) in reader.entries("claims")? {
        let statements = as_array(json, "claims", "entity document")?
            .iter()
            .map(|s| decode_statement(s, subject, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        if statements.is_empty() {
            debug!(entity = subject.id(), property = key, "skipping empty statement group");
            continue;
        }
        let group = StatementGroup::new(statements);
        let property = group.property().id().to_string();
        if groups.insert(property.clone(), group).is_some() {
            warn!(
                entity = subject.id(),
                property = property.as_str(),
                "duplicate statement group, keeping the last one"
            );
        }
    }
    Ok(groups)
}

fn read_site_links(reader: &ObjectReader<'_>) -> Result<BTreeMap<String, SiteLink>, DecodeError> {
    let mut links = BTreeMap::new();
    for (key, json) in reader.entries("sitelinks")? {
        let link = decode_site_link(json, key)?;
        let site = link.site_key().to_string();
        if let Some(previous) = links.insert(site, link) {
            warn!(site = previous.site_key(), "duplicate site link, keeping the last one");
        }
    }
    Ok(links)
}

// =============================================================================
// ENCODING
// =============================================================================

pub fn encode_term(term: &MonolingualTextValue) -> Json {
    let mut writer = ObjectWriter::new();
    writer.put_str("language", term.language()).put_str("value", term.text());
    writer.finish()
}

pub fn encode_site_link(link: &SiteLink) -> Json {
    let mut writer = ObjectWriter::new();
    writer
        .put_str("site", link.site_key())
        .put_str("title", link.title())
        .put("badges", link.badges().iter().cloned().map(Json::String).collect());
    writer.finish()
}

fn encode_terms(terms: &BTreeMap<String, MonolingualTextValue>) -> Json {
    let map: Map<String, Json> = terms.iter().map(|(lang, term)| (lang.clone(), encode_term(term))).collect();
    Json::Object(map)
}

fn encode_aliases(aliases: &BTreeMap<String, Vec<MonolingualTextValue>>) -> Json {
    let map: Map<String, Json> = aliases
        .iter()
        .map(|(lang, terms)| (lang.clone(), terms.iter().map(encode_term).collect()))
        .collect();
    Json::Object(map)
}

fn encode_statement_groups(groups: &BTreeMap<String, StatementGroup>) -> Result<Json, EncodeError> {
    let mut map = Map::new();
    for (property, group) in groups {
        let statements = group.iter().map(encode_statement).collect::<Result<Vec<_>, _>>()?;
        map.insert(property.clone(), Json::Array(statements));
    }
    Ok(Json::Object(map))
}

fn write_body(writer: &mut ObjectWriter, body: &DocumentBody) -> Result<(), EncodeError> {
    writer
        .put("labels", encode_terms(&body.labels))
        .put("descriptions", encode_terms(&body.descriptions))
        .put("aliases", encode_aliases(&body.aliases))
        .put("claims", encode_statement_groups(&body.statement_groups)?);
    Ok(())
}

pub fn encode_item_document(document: &ItemDocument) -> Result<Json, EncodeError> {
    let mut writer = ObjectWriter::new();
    writer
        .put_str("type", EntityKind::Item.as_str())
        .put_str("id", document.item_id().id());
    write_body(&mut writer, document.body())?;

    let site_links: Map<String, Json> = document
        .site_links()
        .iter()
        .map(|(site, link)| (site.clone(), encode_site_link(link)))
        .collect();
    writer
        .put("sitelinks", Json::Object(site_links))
        .put_u64("lastrevid", document.revision_id());

    debug!(id = document.item_id().id(), "encoded item document");
    Ok(writer.finish())
}

pub fn encode_property_document(document: &PropertyDocument) -> Result<Json, EncodeError> {
    let mut writer = ObjectWriter::new();
    writer
        .put_str("type", EntityKind::Property.as_str())
        .put_str("datatype", document.datatype().as_str())
        .put_str("id", document.property_id().id());
    write_body(&mut writer, document.body())?;
    writer.put_u64("lastrevid", document.revision_id());

    debug!(id = document.property_id().id(), "encoded property document");
    Ok(writer.finish())
}

pub fn encode_document(document: &EntityDocument) -> Result<Json, EncodeError> {
    match document {
        EntityDocument::Item(item) => encode_item_document(item),
        EntityDocument::Property(property) => encode_property_document(property),
    }
}
