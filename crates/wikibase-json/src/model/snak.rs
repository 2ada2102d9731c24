//! Snaks: a property paired with a value, an unknown value, or no value.

use std::hash::{Hash, Hasher};

use crate::model::{
    GlobeCoordinatesValue, ItemIdValue, MonolingualTextValue, PropertyIdValue, QuantityValue,
    TimeValue, Value, ValueVisitor,
};

/// Wire `datatype` of a value snak (the datatype of its property).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnakDatatype {
    Item,
    Property,
    Time,
    GlobeCoordinate,
    Quantity,
    MonolingualText,
    String,
    Url,
    ExternalId,
    CommonsMedia,
    /// Any datatype string without a dedicated variant, kept verbatim.
    Other(String),
}

impl SnakDatatype {
    /// Returns the wire string.
    pub fn as_str(&self) -> &str {
        match self {
            SnakDatatype::Item => "wikibase-item",
            SnakDatatype::Property => "wikibase-property",
            SnakDatatype::Time => "time",
            SnakDatatype::GlobeCoordinate => "globe-coordinate",
            SnakDatatype::Quantity => "quantity",
            SnakDatatype::MonolingualText => "monolingualtext",
            SnakDatatype::String => "string",
            SnakDatatype::Url => "url",
            SnakDatatype::ExternalId => "external-id",
            SnakDatatype::CommonsMedia => "commonsMedia",
            SnakDatatype::Other(s) => s,
        }
    }

    /// Parses a wire string; unknown strings become [`SnakDatatype::Other`].
    pub fn from_wire(s: &str) -> SnakDatatype {
        match s {
            "wikibase-item" => SnakDatatype::Item,
            "wikibase-property" => SnakDatatype::Property,
            "time" => SnakDatatype::Time,
            "globe-coordinate" => SnakDatatype::GlobeCoordinate,
            "quantity" => SnakDatatype::Quantity,
            "monolingualtext" => SnakDatatype::MonolingualText,
            "string" => SnakDatatype::String,
            "url" => SnakDatatype::Url,
            "external-id" => SnakDatatype::ExternalId,
            "commonsMedia" => SnakDatatype::CommonsMedia,
            other => SnakDatatype::Other(other.to_string()),
        }
    }

    /// Infers the datatype from a value.
    ///
    /// Returns `None` for string values: several datatypes (string, url,
    /// external-id, ...) share the string value type and the value alone
    /// cannot tell them apart.
    pub fn for_value(value: &Value) -> Option<SnakDatatype> {
        value.accept(&mut DatatypeInference)
    }
}

struct DatatypeInference;

impl ValueVisitor for DatatypeInference {
    type Output = Option<SnakDatatype>;

    fn visit_item_id(&mut self, _: &ItemIdValue) -> Self::Output {
        Some(SnakDatatype::Item)
    }

    fn visit_property_id(&mut self, _: &PropertyIdValue) -> Self::Output {
        Some(SnakDatatype::Property)
    }

    fn visit_string(&mut self, _: &str) -> Self::Output {
        None
    }

    fn visit_monolingual_text(&mut self, _: &MonolingualTextValue) -> Self::Output {
        Some(SnakDatatype::MonolingualText)
    }

    fn visit_time(&mut self, _: &TimeValue) -> Self::Output {
        Some(SnakDatatype::Time)
    }

    fn visit_quantity(&mut self, _: &QuantityValue) -> Self::Output {
        Some(SnakDatatype::Quantity)
    }

    fn visit_globe_coordinates(&mut self, _: &GlobeCoordinatesValue) -> Self::Output {
        Some(SnakDatatype::GlobeCoordinate)
    }
}

/// Wire `snaktype` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakType {
    Value,
    SomeValue,
    NoValue,
}

impl SnakType {
    pub fn as_str(self) -> &'static str {
        match self {
            SnakType::Value => "value",
            SnakType::SomeValue => "somevalue",
            SnakType::NoValue => "novalue",
        }
    }

    pub fn from_wire(s: &str) -> Option<SnakType> {
        match s {
            "value" => Some(SnakType::Value),
            "somevalue" => Some(SnakType::SomeValue),
            "novalue" => Some(SnakType::NoValue),
            _ => None,
        }
    }
}

/// A property with a concrete value.
///
/// The datatype is a wire hint and does not take part in equality: two
/// snaks giving the same value for the same property are equal.
#[derive(Debug, Clone)]
pub struct ValueSnak {
    property: PropertyIdValue,
    value: Value,
    datatype: Option<SnakDatatype>,
}

impl ValueSnak {
    pub(crate) fn new(property: PropertyIdValue, value: Value, datatype: Option<SnakDatatype>) -> Self {
        Self { property, value, datatype }
    }

    pub fn property(&self) -> &PropertyIdValue {
        &self.property
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The wire datatype, if known.
    pub fn datatype(&self) -> Option<&SnakDatatype> {
        self.datatype.as_ref()
    }
}

impl PartialEq for ValueSnak {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.value == other.value
    }
}

impl Eq for ValueSnak {}

impl Hash for ValueSnak {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.property.hash(state);
        self.value.hash(state);
    }
}

/// A property with a value, an unknown value, or no value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Snak {
    Value(ValueSnak),
    /// A value exists but is not recorded.
    SomeValue(PropertyIdValue),
    /// No value exists.
    NoValue(PropertyIdValue),
}

impl Snak {
    pub fn property_id(&self) -> &PropertyIdValue {
        match self {
            Snak::Value(s) => s.property(),
            Snak::SomeValue(p) | Snak::NoValue(p) => p,
        }
    }

    pub fn snak_type(&self) -> SnakType {
        match self {
            Snak::Value(_) => SnakType::Value,
            Snak::SomeValue(_) => SnakType::SomeValue,
            Snak::NoValue(_) => SnakType::NoValue,
        }
    }

    /// The value of a value snak.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Snak::Value(s) => Some(s.value()),
            _ => None,
        }
    }
}

/// Snaks sharing a property, in order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnakGroup {
    snaks: Vec<Snak>,
}

impl SnakGroup {
    /// Callers guarantee `snaks` is non-empty.
    pub(crate) fn new(snaks: Vec<Snak>) -> Self {
        debug_assert!(!snaks.is_empty());
        Self { snaks }
    }

    pub fn snaks(&self) -> &[Snak] {
        &self.snaks
    }

    /// Property of the first snak, which names the group.
    pub fn property(&self) -> &PropertyIdValue {
        self.snaks[0].property_id()
    }

    pub fn len(&self) -> usize {
        self.snaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snaks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snak> {
        self.snaks.iter()
    }
}

impl<'a> IntoIterator for &'a SnakGroup {
    type Item = &'a Snak;
    type IntoIter = std::slice::Iter<'a, Snak>;

    fn into_iter(self) -> Self::IntoIter {
        self.snaks.iter()
    }
}
