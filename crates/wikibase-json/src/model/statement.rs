//! Claims, references, statements and statement groups.

use crate::model::{EntityIdValue, PropertyIdValue, Snak, SnakGroup, Value};

/// Priority of a statement among statements for the same property.
///
/// Ordered so that `Preferred > Normal > Deprecated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementRank {
    Deprecated,
    Normal,
    Preferred,
}

impl StatementRank {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementRank::Deprecated => "deprecated",
            StatementRank::Normal => "normal",
            StatementRank::Preferred => "preferred",
        }
    }

    pub fn from_wire(s: &str) -> Option<StatementRank> {
        match s {
            "deprecated" => Some(StatementRank::Deprecated),
            "normal" => Some(StatementRank::Normal),
            "preferred" => Some(StatementRank::Preferred),
            _ => None,
        }
    }
}

/// Subject, main snak and qualifiers. Only ever exists inside a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Claim {
    subject: EntityIdValue,
    main_snak: Snak,
    qualifiers: Vec<SnakGroup>,
}

impl Claim {
    pub(crate) fn new(subject: EntityIdValue, main_snak: Snak, qualifiers: Vec<SnakGroup>) -> Self {
        Self { subject, main_snak, qualifiers }
    }

    pub fn subject(&self) -> &EntityIdValue {
        &self.subject
    }

    pub fn main_snak(&self) -> &Snak {
        &self.main_snak
    }

    pub fn qualifiers(&self) -> &[SnakGroup] {
        &self.qualifiers
    }

    /// All qualifier snaks, group by group.
    pub fn all_qualifiers(&self) -> impl Iterator<Item = &Snak> {
        self.qualifiers.iter().flat_map(|g| g.iter())
    }
}

/// Provenance of a statement: snak groups, no subject and no rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    snak_groups: Vec<SnakGroup>,
}

impl Reference {
    pub(crate) fn new(snak_groups: Vec<SnakGroup>) -> Self {
        Self { snak_groups }
    }

    pub fn snak_groups(&self) -> &[SnakGroup] {
        &self.snak_groups
    }

    pub fn all_snaks(&self) -> impl Iterator<Item = &Snak> {
        self.snak_groups.iter().flat_map(|g| g.iter())
    }
}

/// An identified, ranked and referenced claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    id: String,
    rank: StatementRank,
    claim: Claim,
    references: Vec<Reference>,
}

impl Statement {
    pub(crate) fn new(id: String, rank: StatementRank, claim: Claim, references: Vec<Reference>) -> Self {
        Self { id, rank, claim, references }
    }

    /// Statement id; empty for statements that were never saved.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rank(&self) -> StatementRank {
        self.rank
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn into_claim(self) -> Claim {
        self.claim
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn subject(&self) -> &EntityIdValue {
        self.claim.subject()
    }

    pub fn main_snak(&self) -> &Snak {
        self.claim.main_snak()
    }

    pub fn qualifiers(&self) -> &[SnakGroup] {
        self.claim.qualifiers()
    }

    /// Property of the main snak.
    pub fn property(&self) -> &PropertyIdValue {
        self.claim.main_snak().property_id()
    }

    /// Value of the main snak, if it is a value snak.
    pub fn value(&self) -> Option<&Value> {
        self.claim.main_snak().value()
    }

    pub fn has_value_snak(&self) -> bool {
        matches!(self.claim.main_snak(), Snak::Value(_))
    }
}

/// Statements sharing a main-snak property, in order. Never empty.
///
/// The shared property is not re-checked here; the first statement names the
/// group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementGroup {
    statements: Vec<Statement>,
}

impl StatementGroup {
    /// Callers guarantee `statements` is non-empty.
    pub(crate) fn new(statements: Vec<Statement>) -> Self {
        debug_assert!(!statements.is_empty());
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn property(&self) -> &PropertyIdValue {
        self.statements[0].property()
    }

    pub fn subject(&self) -> &EntityIdValue {
        self.statements[0].subject()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Preferred statements if there are any, otherwise the normal ones.
    /// Deprecated statements are never returned.
    pub fn best_statements(&self) -> Vec<&Statement> {
        let top = self
            .statements
            .iter()
            .map(Statement::rank)
            .filter(|r| *r != StatementRank::Deprecated)
            .max();
        match top {
            Some(rank) => self.statements.iter().filter(|s| s.rank() == rank).collect(),
            None => Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a StatementGroup {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
