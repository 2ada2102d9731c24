//! Entity documents: items and properties with their terms and statements.
//!
//! Maps are keyed by language code, site key or property id and only exposed
//! as shared references.

use std::collections::BTreeMap;

use crate::model::{
    EntityIdValue, ItemIdValue, MonolingualTextValue, PropertyIdValue, SnakDatatype, Statement,
    StatementGroup,
};

/// A link from an item to a page on another site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteLink {
    title: String,
    site_key: String,
    badges: Vec<String>,
}

impl SiteLink {
    pub fn new(title: impl Into<String>, site_key: impl Into<String>, badges: Vec<String>) -> Self {
        Self { title: title.into(), site_key: site_key.into(), badges }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site key, e.g. `enwiki`.
    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    /// Badge item ids, in order.
    pub fn badges(&self) -> &[String] {
        &self.badges
    }
}

/// Terms, statements and revision shared by every kind of document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocumentBody {
    pub(crate) labels: BTreeMap<String, MonolingualTextValue>,
    pub(crate) descriptions: BTreeMap<String, MonolingualTextValue>,
    pub(crate) aliases: BTreeMap<String, Vec<MonolingualTextValue>>,
    pub(crate) statement_groups: BTreeMap<String, StatementGroup>,
    pub(crate) revision_id: u64,
}

/// Read access common to item and property documents.
pub trait TermedStatementDocument {
    fn entity_id(&self) -> EntityIdValue;

    fn body(&self) -> &DocumentBody;

    /// Labels keyed by language code.
    fn labels(&self) -> &BTreeMap<String, MonolingualTextValue> {
        &self.body().labels
    }

    fn label(&self, language: &str) -> Option<&str> {
        self.body().labels.get(language).map(MonolingualTextValue::text)
    }

    /// Descriptions keyed by language code.
    fn descriptions(&self) -> &BTreeMap<String, MonolingualTextValue> {
        &self.body().descriptions
    }

    fn description(&self, language: &str) -> Option<&str> {
        self.body().descriptions.get(language).map(MonolingualTextValue::text)
    }

    /// Aliases keyed by language code, each list in its original order.
    fn aliases(&self) -> &BTreeMap<String, Vec<MonolingualTextValue>> {
        &self.body().aliases
    }

    fn aliases_for(&self, language: &str) -> &[MonolingualTextValue] {
        self.body().aliases.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Statement groups keyed by property id (e.g. `P31`).
    fn statement_groups(&self) -> &BTreeMap<String, StatementGroup> {
        &self.body().statement_groups
    }

    fn find_statement_group(&self, property_id: &str) -> Option<&StatementGroup> {
        self.body().statement_groups.get(property_id)
    }

    fn all_statements(&self) -> Box<dyn Iterator<Item = &Statement> + '_> {
        Box::new(self.body().statement_groups.values().flat_map(|g| g.iter()))
    }

    /// Last revision id, 0 if unknown.
    fn revision_id(&self) -> u64 {
        self.body().revision_id
    }
}

/// An item with its site links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDocument {
    id: ItemIdValue,
    body: DocumentBody,
    site_links: BTreeMap<String, SiteLink>,
}

impl ItemDocument {
    pub(crate) fn new(id: ItemIdValue, body: DocumentBody, site_links: BTreeMap<String, SiteLink>) -> Self {
        Self { id, body, site_links }
    }

    pub fn item_id(&self) -> &ItemIdValue {
        &self.id
    }

    /// Site links keyed by site key.
    pub fn site_links(&self) -> &BTreeMap<String, SiteLink> {
        &self.site_links
    }

    pub fn site_link(&self, site_key: &str) -> Option<&SiteLink> {
        self.site_links.get(site_key)
    }
}

impl TermedStatementDocument for ItemDocument {
    fn entity_id(&self) -> EntityIdValue {
        EntityIdValue::Item(self.id.clone())
    }

    fn body(&self) -> &DocumentBody {
        &self.body
    }
}

/// A property with its datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDocument {
    id: PropertyIdValue,
    body: DocumentBody,
    datatype: SnakDatatype,
}

impl PropertyDocument {
    pub(crate) fn new(id: PropertyIdValue, body: DocumentBody, datatype: SnakDatatype) -> Self {
        Self { id, body, datatype }
    }

    pub fn property_id(&self) -> &PropertyIdValue {
        &self.id
    }

    /// Datatype of the values this property takes.
    pub fn datatype(&self) -> &SnakDatatype {
        &self.datatype
    }
}

impl TermedStatementDocument for PropertyDocument {
    fn entity_id(&self) -> EntityIdValue {
        EntityIdValue::Property(self.id.clone())
    }

    fn body(&self) -> &DocumentBody {
        &self.body
    }
}

/// A document of any supported entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityDocument {
    Item(ItemDocument),
    Property(PropertyDocument),
}

impl EntityDocument {
    pub fn as_item(&self) -> Option<&ItemDocument> {
        match self {
            EntityDocument::Item(d) => Some(d),
            EntityDocument::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDocument> {
        match self {
            EntityDocument::Property(d) => Some(d),
            EntityDocument::Item(_) => None,
        }
    }
}

impl TermedStatementDocument for EntityDocument {
    fn entity_id(&self) -> EntityIdValue {
        match self {
            EntityDocument::Item(d) => d.entity_id(),
            EntityDocument::Property(d) => d.entity_id(),
        }
    }

    fn body(&self) -> &DocumentBody {
        match self {
            EntityDocument::Item(d) => d.body(),
            EntityDocument::Property(d) => d.body(),
        }
    }
}

impl From<ItemDocument> for EntityDocument {
    fn from(d: ItemDocument) -> Self {
        EntityDocument::Item(d)
    }
}

impl From<PropertyDocument> for EntityDocument {
    fn from(d: PropertyDocument) -> Self {
        EntityDocument::Property(d)
    }
}
