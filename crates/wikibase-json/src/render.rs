//! Human-readable text rendering of model objects.
//!
//! `Display` output is meant for logs and debugging. It names ids, value
//! payloads, snak kinds and ranks, so unequal objects print differently in
//! ordinary cases. It is not a wire format; only the JSON codec is.

use std::fmt;

use crate::model::{
    Claim, EntityDocument, EntityIdValue, GlobeCoordinatesValue, ItemDocument, ItemIdValue,
    MonolingualTextValue, PropertyDocument, PropertyIdValue, QuantityValue, Reference, SiteLink,
    Snak, SnakDatatype, SnakGroup, Statement, StatementGroup, StatementRank, TermedStatementDocument,
    TimeValue, Value,
};
use crate::util::{Decimal, TimestampParts, format_timestamp, format_timezone_offset};

impl fmt::Display for ItemIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.site_iri())
    }
}

impl fmt::Display for PropertyIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.site_iri())
    }
}

impl fmt::Display for EntityIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdValue::Item(id) => fmt::Display::fmt(id, f),
            EntityIdValue::Property(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl fmt::Display for MonolingualTextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.text(), self.language())
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = format_timestamp(&TimestampParts {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
        });
        write!(
            f,
            "{} (precision {}, -{}/+{}, tz {}, calendar {})",
            timestamp,
            self.precision(),
            self.before_tolerance(),
            self.after_tolerance(),
            format_timezone_offset(self.timezone_offset()),
            self.calendar_model()
        )
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount().to_wire_string())?;
        if self.lower_bound().is_some() || self.upper_bound().is_some() {
            let bound = |b: Option<&Decimal>| b.map(|d| d.to_wire_string()).unwrap_or_default();
            write!(f, " [{}, {}]", bound(self.lower_bound()), bound(self.upper_bound()))?;
        }
        if !self.is_dimensionless() {
            write!(f, " {}", self.unit())?;
        }
        Ok(())
    }
}

impl fmt::Display for GlobeCoordinatesValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) ±{} on {}",
            self.latitude(),
            self.longitude(),
            self.precision(),
            self.globe()
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::ItemId(v) => fmt::Display::fmt(v, f),
            Value::PropertyId(v) => fmt::Display::fmt(v, f),
            Value::String(s) => write!(f, "{:?}", s),
            Value::MonolingualText(v) => fmt::Display::fmt(v, f),
            Value::Time(v) => fmt::Display::fmt(v, f),
            Value::Quantity(v) => fmt::Display::fmt(v, f),
            Value::GlobeCoordinates(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl fmt::Display for SnakDatatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StatementRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Snak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.property_id().id();
        match self {
            Snak::Value(snak) => write!(f, "{} = {}", property, snak.value()),
            Snak::SomeValue(_) => write!(f, "{} = <some value>", property),
            Snak::NoValue(_) => write!(f, "{} = <no value>", property),
        }
    }
}

fn write_snaks<'a>(f: &mut fmt::Formatter<'_>, snaks: impl Iterator<Item = &'a Snak>) -> fmt::Result {
    for (i, snak) in snaks.enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{}", snak)?;
    }
    Ok(())
}

impl fmt::Display for SnakGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_snaks(f, self.iter())?;
        f.write_str("}")
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject().id(), self.main_snak())?;
        if !self.qualifiers().is_empty() {
            f.write_str(" (")?;
            write_snaks(f, self.all_qualifiers())?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ref[")?;
        write_snaks(f, self.all_snaks())?;
        f.write_str("]")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.rank(), self.claim(), self.id())?;
        for reference in self.references() {
            write!(f, " {}", reference)?;
        }
        Ok(())
    }
}

impl fmt::Display for StatementGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.len();
        write!(f, "{}: {} statement{}", self.property().id(), n, if n == 1 { "" } else { "s" })
    }
}

impl fmt::Display for SiteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.site_key(), self.title())?;
        if !self.badges().is_empty() {
            write!(f, " [{}]", self.badges().join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for ItemDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document_line(f, "item", self)?;
        write!(f, ", {} site links", self.site_links().len())
    }
}

impl fmt::Display for PropertyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_document_line(f, "property", self)?;
        write!(f, ", datatype {}", self.datatype())
    }
}

impl fmt::Display for EntityDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityDocument::Item(d) => fmt::Display::fmt(d, f),
            EntityDocument::Property(d) => fmt::Display::fmt(d, f),
        }
    }
}

fn write_document_line(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    document: &impl TermedStatementDocument,
) -> fmt::Result {
    write!(
        f,
        "{} {} rev {}: {} labels, {} statements",
        kind,
        document.entity_id(),
        document.revision_id(),
        document.labels().len(),
        document.all_statements().count()
    )
}

/// Render a document as an indented multi-line summary.
///
/// ```text
/// Q42 (http://www.wikidata.org/entity/)  item  rev 1234
/// ─────────────────────────────────────────────────────
/// Labels:
///   en: Douglas Adams
/// Aliases:
///   en: DNA, Douglas Noël Adams
///
/// Statements:
///   P31: 1 statement
///     [normal] Q42: P31 = Q5 (http://www.wikidata.org/entity/) (Q42$...)
///
/// Site links:
///   enwiki: Douglas Adams
/// ```
pub fn render_document(document: &EntityDocument) -> String {
    let kind = match document {
        EntityDocument::Item(_) => "item".to_string(),
        EntityDocument::Property(p) => format!("property ({})", p.datatype()),
    };
    let header = format!("{}  {}  rev {}", document.entity_id(), kind, document.revision_id());
    let rule = "─".repeat(header.chars().count());
    let mut out = format!("{}\n{}\n", header, rule);

    let sections = [("Labels", document.labels()), ("Descriptions", document.descriptions())];
    for (title, terms) in sections {
        if terms.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", title));
        for (language, term) in terms {
            out.push_str(&format!("  {}: {}\n", language, term.text()));
        }
    }

    if !document.aliases().is_empty() {
        out.push_str("Aliases:\n");
        for (language, aliases) in document.aliases() {
            let texts: Vec<&str> = aliases.iter().map(MonolingualTextValue::text).collect();
            out.push_str(&format!("  {}: {}\n", language, texts.join(", ")));
        }
    }

    if !document.statement_groups().is_empty() {
        out.push_str("\nStatements:\n");
        for group in document.statement_groups().values() {
            out.push_str(&format!("  {}\n", group));
            for statement in group {
                out.push_str(&format!("    {}\n", statement));
            }
        }
    }

    if let EntityDocument::Item(item) = document {
        if !item.site_links().is_empty() {
            out.push_str("\nSite links:\n");
            for link in item.site_links().values() {
                out.push_str(&format!("  {}\n", link));
            }
        }
    }

    out
}
