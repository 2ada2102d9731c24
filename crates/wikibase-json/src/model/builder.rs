//! Builder API for ergonomic document construction.
//!
//! Builders collect parts in any order and hand them to the [`factory`]
//! functions on `build`, so they enforce exactly the same invariants.
//!
//! # Example
//!
//! ```rust
//! use wikibase_json::model::builder::ItemDocumentBuilder;
//! use wikibase_json::model::{ItemIdValue, PropertyIdValue, StatementRank, WIKIDATA_SITE_IRI};
//! use wikibase_json::model::TermedStatementDocument;
//!
//! let q42 = ItemIdValue::new("Q42", WIKIDATA_SITE_IRI).unwrap();
//! let p31 = PropertyIdValue::new("P31", WIKIDATA_SITE_IRI).unwrap();
//! let q5 = ItemIdValue::new("Q5", WIKIDATA_SITE_IRI).unwrap();
//!
//! let doc = ItemDocumentBuilder::new(q42)
//!     .label("Douglas Adams", "en")
//!     .alias("DNA", "en")
//!     .statement(p31, q5.into(), |s| s.rank(StatementRank::Preferred))
//!     .site_link("Douglas Adams", "enwiki")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(doc.label("en"), Some("Douglas Adams"));
//! ```
//!
//! [`factory`]: crate::model::factory

use crate::error::ConstructionError;
use crate::model::factory::{self, group_snaks};
use crate::model::{
    EntityIdValue, ItemDocument, ItemIdValue, MonolingualTextValue, PropertyDocument,
    PropertyIdValue, Reference, SiteLink, Snak, SnakDatatype, Statement, StatementGroup,
    StatementRank, Value, new_statement_id,
};

/// Builder for a single statement about a known subject.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    subject: EntityIdValue,
    main_snak: Snak,
    id: Option<String>,
    rank: StatementRank,
    qualifiers: Vec<Snak>,
    references: Vec<Reference>,
}

impl StatementBuilder {
    /// Creates a normal-rank statement with no qualifiers or references.
    pub fn new(subject: EntityIdValue, main_snak: Snak) -> Self {
        Self {
            subject,
            main_snak,
            id: None,
            rank: StatementRank::Normal,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Sets the statement id. Without one, `build` generates a fresh id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn rank(mut self, rank: StatementRank) -> Self {
        self.rank = rank;
        self
    }

    /// Adds a qualifier snak. Qualifiers are grouped by property on build.
    pub fn qualifier(mut self, snak: Snak) -> Self {
        self.qualifiers.push(snak);
        self
    }

    /// Adds a qualifier value snak.
    pub fn qualifier_value(self, property: PropertyIdValue, value: Value) -> Self {
        self.qualifier(factory::make_value_snak(property, value))
    }

    /// Adds a reference using a builder function.
    pub fn reference<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ReferenceBuilder) -> ReferenceBuilder,
    {
        self.references.push(f(ReferenceBuilder::new()).build());
        self
    }

    pub fn build(self) -> Statement {
        let id = match self.id {
            Some(id) => id,
            None => new_statement_id(&self.subject),
        };
        let claim = factory::make_claim(self.subject, self.main_snak, group_snaks(self.qualifiers));
        factory::make_statement(claim, self.references, self.rank, id)
    }
}

/// Builder for a reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    snaks: Vec<Snak>,
}

impl ReferenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snak. Snaks are grouped by property on build.
    pub fn snak(mut self, snak: Snak) -> Self {
        self.snaks.push(snak);
        self
    }

    /// Adds a value snak.
    pub fn value(self, property: PropertyIdValue, value: Value) -> Self {
        self.snak(factory::make_value_snak(property, value))
    }

    pub fn build(self) -> Reference {
        factory::make_reference(group_snaks(self.snaks))
    }
}

/// Terms and statements collected by both document builders.
#[derive(Debug, Clone)]
struct TermsAndStatements {
    subject: EntityIdValue,
    labels: Vec<MonolingualTextValue>,
    descriptions: Vec<MonolingualTextValue>,
    aliases: Vec<MonolingualTextValue>,
    statements: Vec<Statement>,
    revision_id: u64,
}

impl TermsAndStatements {
    fn new(subject: EntityIdValue) -> Self {
        Self {
            subject,
            labels: Vec::new(),
            descriptions: Vec::new(),
            aliases: Vec::new(),
            statements: Vec::new(),
            revision_id: 0,
        }
    }

    fn add_statement<F>(&mut self, main_snak: Snak, f: F)
    where
        F: FnOnce(StatementBuilder) -> StatementBuilder,
    {
        let builder = f(StatementBuilder::new(self.subject.clone(), main_snak));
        self.statements.push(builder.build());
    }

    /// Groups the collected statements by main-snak property, in order of
    /// first appearance.
    fn statement_groups(statements: Vec<Statement>) -> Result<Vec<StatementGroup>, ConstructionError> {
        let mut grouped: Vec<Vec<Statement>> = Vec::new();
        for statement in statements {
            match grouped.iter_mut().find(|g| g[0].property() == statement.property()) {
                Some(group) => group.push(statement),
                None => grouped.push(vec![statement]),
            }
        }
        grouped.into_iter().map(factory::make_statement_group).collect()
    }
}

macro_rules! term_setters {
    () => {
        /// Adds a label. Two labels in one language fail the build.
        pub fn label(mut self, text: &str, language: &str) -> Self {
            self.inner.labels.push(MonolingualTextValue::new(text, language));
            self
        }

        /// Adds a description. Two descriptions in one language fail the build.
        pub fn description(mut self, text: &str, language: &str) -> Self {
            self.inner.descriptions.push(MonolingualTextValue::new(text, language));
            self
        }

        pub fn alias(mut self, text: &str, language: &str) -> Self {
            self.inner.aliases.push(MonolingualTextValue::new(text, language));
            self
        }

        pub fn revision_id(mut self, revision_id: u64) -> Self {
            self.inner.revision_id = revision_id;
            self
        }

        /// Adds a statement with a value main snak using a builder function.
        pub fn statement<F>(self, property: PropertyIdValue, value: Value, f: F) -> Self
        where
            F: FnOnce(StatementBuilder) -> StatementBuilder,
        {
            self.statement_with_snak(factory::make_value_snak(property, value), f)
        }

        /// Adds a statement with an arbitrary main snak using a builder function.
        pub fn statement_with_snak<F>(mut self, main_snak: Snak, f: F) -> Self
        where
            F: FnOnce(StatementBuilder) -> StatementBuilder,
        {
            self.inner.add_statement(main_snak, f);
            self
        }
    };
}

/// Builder for an [`ItemDocument`].
#[derive(Debug, Clone)]
pub struct ItemDocumentBuilder {
    id: ItemIdValue,
    inner: TermsAndStatements,
    site_links: Vec<SiteLink>,
}

impl ItemDocumentBuilder {
    pub fn new(id: ItemIdValue) -> Self {
        Self {
            inner: TermsAndStatements::new(EntityIdValue::Item(id.clone())),
            id,
            site_links: Vec::new(),
        }
    }

    term_setters!();

    /// Adds a site link without badges.
    pub fn site_link(self, title: &str, site_key: &str) -> Self {
        self.site_link_with_badges(title, site_key, Vec::new())
    }

    pub fn site_link_with_badges(mut self, title: &str, site_key: &str, badges: Vec<String>) -> Self {
        self.site_links.push(factory::make_site_link(title, site_key, badges));
        self
    }

    pub fn build(self) -> Result<ItemDocument, ConstructionError> {
        let inner = self.inner;
        factory::make_item_document(
            self.id,
            inner.labels,
            inner.descriptions,
            inner.aliases,
            TermsAndStatements::statement_groups(inner.statements)?,
            self.site_links,
            inner.revision_id,
        )
    }
}

/// Builder for a [`PropertyDocument`].
#[derive(Debug, Clone)]
pub struct PropertyDocumentBuilder {
    id: PropertyIdValue,
    datatype: SnakDatatype,
    inner: TermsAndStatements,
}

impl PropertyDocumentBuilder {
    pub fn new(id: PropertyIdValue, datatype: SnakDatatype) -> Self {
        Self {
            inner: TermsAndStatements::new(EntityIdValue::Property(id.clone())),
            id,
            datatype,
        }
    }

    term_setters!();

    pub fn build(self) -> Result<PropertyDocument, ConstructionError> {
        let inner = self.inner;
        factory::make_property_document(
            self.id,
            inner.labels,
            inner.descriptions,
            inner.aliases,
            TermsAndStatements::statement_groups(inner.statements)?,
            self.datatype,
            inner.revision_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TermedStatementDocument, WIKIDATA_SITE_IRI};

    fn q(id: &str) -> ItemIdValue {
        ItemIdValue::new(id, WIKIDATA_SITE_IRI).unwrap()
    }

    fn p(id: &str) -> PropertyIdValue {
        PropertyIdValue::new(id, WIKIDATA_SITE_IRI).unwrap()
    }

    #[test]
    fn test_item_builder_basic() {
        let doc = ItemDocumentBuilder::new(q("Q42"))
            .label("Douglas Adams", "en")
            .description("English writer", "en")
            .alias("DNA", "en")
            .alias("Douglas Noël Adams", "en")
            .statement(p("P31"), q("Q5").into(), |s| s.id("Q42$1"))
            .statement(p("P69"), q("Q691283").into(), |s| s)
            .statement(p("P31"), q("Q36180").into(), |s| s.rank(StatementRank::Preferred))
            .site_link("Douglas Adams", "enwiki")
            .revision_id(1234)
            .build()
            .unwrap();

        assert_eq!(doc.label("en"), Some("Douglas Adams"));
        assert_eq!(doc.description("en"), Some("English writer"));
        assert_eq!(doc.aliases_for("en").len(), 2);
        assert_eq!(doc.revision_id(), 1234);
        assert_eq!(doc.site_link("enwiki").unwrap().title(), "Douglas Adams");

        let p31 = doc.find_statement_group("P31").unwrap();
        assert_eq!(p31.len(), 2);
        assert_eq!(p31.statements()[0].id(), "Q42$1");
        assert_eq!(p31.best_statements().len(), 1);
        assert_eq!(doc.find_statement_group("P69").unwrap().len(), 1);
    }

    #[test]
    fn test_statement_builder_generates_ids() {
        let subject: EntityIdValue = q("Q42").into();
        let a = StatementBuilder::new(subject.clone(), Snak::SomeValue(p("P19"))).build();
        let b = StatementBuilder::new(subject, Snak::SomeValue(p("P19"))).build();
        assert!(a.id().starts_with("Q42$"));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.rank(), StatementRank::Normal);
    }

    #[test]
    fn test_statement_builder_groups_qualifiers_and_references() {
        let statement = StatementBuilder::new(q("Q42").into(), Snak::NoValue(p("P40")))
            .id("Q42$X")
            .qualifier_value(p("P580"), Value::String("a".into()))
            .qualifier(Snak::SomeValue(p("P582")))
            .qualifier_value(p("P580"), Value::String("b".into()))
            .reference(|r| r.value(p("P854"), Value::String("https://example.org".into())))
            .reference(|r| r.snak(Snak::SomeValue(p("P248"))).value(p("P813"), Value::String("x".into())))
            .build();

        let qualifiers = statement.qualifiers();
        assert_eq!(qualifiers.len(), 2);
        assert_eq!(qualifiers[0].property().id(), "P580");
        assert_eq!(qualifiers[0].len(), 2);
        assert_eq!(qualifiers[1].property().id(), "P582");

        assert_eq!(statement.references().len(), 2);
        assert_eq!(statement.references()[1].snak_groups().len(), 2);
    }

    #[test]
    fn test_builder_surfaces_construction_errors() {
        let err = ItemDocumentBuilder::new(q("Q42"))
            .site_link("A", "enwiki")
            .site_link("B", "enwiki")
            .build()
            .unwrap_err();
        assert_eq!(err, ConstructionError::DuplicateSiteLink { site_key: "enwiki".to_string() });
    }

    #[test]
    fn test_property_builder() {
        let doc = PropertyDocumentBuilder::new(p("P31"), SnakDatatype::Item)
            .label("instance of", "en")
            .statement_with_snak(Snak::SomeValue(p("P1647")), |s| s)
            .build()
            .unwrap();
        assert_eq!(doc.datatype(), &SnakDatatype::Item);
        assert_eq!(doc.label("en"), Some("instance of"));
        assert_eq!(doc.all_statements().count(), 1);
        assert_eq!(doc.all_statements().next().unwrap().subject().id(), "P31");
    }
}
