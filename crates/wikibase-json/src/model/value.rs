//! Value types carried by value snaks.
//!
//! Every value kind is a variant of [`Value`]. Consumers either match on it
//! directly or implement [`ValueVisitor`].

use std::hash::{Hash, Hasher};

use crate::error::ConstructionError;
use crate::model::{EntityIdValue, ItemIdValue, PropertyIdValue};
use crate::util::Decimal;

/// Datavalue `type` tags of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    EntityId,
    String,
    MonolingualText,
    Time,
    Quantity,
    GlobeCoordinates,
}

impl ValueType {
    /// Returns the wire `type` string.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::EntityId => "wikibase-entityid",
            ValueType::String => "string",
            ValueType::MonolingualText => "monolingualtext",
            ValueType::Time => "time",
            ValueType::Quantity => "quantity",
            ValueType::GlobeCoordinates => "globecoordinate",
        }
    }

    /// Parses a wire `type` string.
    pub fn from_wire(s: &str) -> Option<ValueType> {
        match s {
            "wikibase-entityid" => Some(ValueType::EntityId),
            "string" => Some(ValueType::String),
            "monolingualtext" => Some(ValueType::MonolingualText),
            "time" => Some(ValueType::Time),
            "quantity" => Some(ValueType::Quantity),
            "globecoordinate" => Some(ValueType::GlobeCoordinates),
            _ => None,
        }
    }
}

/// A value of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    ItemId(ItemIdValue),
    PropertyId(PropertyIdValue),
    String(String),
    MonolingualText(MonolingualTextValue),
    Time(TimeValue),
    Quantity(QuantityValue),
    GlobeCoordinates(GlobeCoordinatesValue),
}

impl Value {
    /// Returns the datavalue type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::ItemId(_) | Value::PropertyId(_) => ValueType::EntityId,
            Value::String(_) => ValueType::String,
            Value::MonolingualText(_) => ValueType::MonolingualText,
            Value::Time(_) => ValueType::Time,
            Value::Quantity(_) => ValueType::Quantity,
            Value::GlobeCoordinates(_) => ValueType::GlobeCoordinates,
        }
    }

    /// Dispatches to the visitor method for this variant.
    pub fn accept<V: ValueVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Value::ItemId(v) => visitor.visit_item_id(v),
            Value::PropertyId(v) => visitor.visit_property_id(v),
            Value::String(v) => visitor.visit_string(v),
            Value::MonolingualText(v) => visitor.visit_monolingual_text(v),
            Value::Time(v) => visitor.visit_time(v),
            Value::Quantity(v) => visitor.visit_quantity(v),
            Value::GlobeCoordinates(v) => visitor.visit_globe_coordinates(v),
        }
    }
}

impl From<ItemIdValue> for Value {
    fn from(v: ItemIdValue) -> Self {
        Value::ItemId(v)
    }
}

impl From<PropertyIdValue> for Value {
    fn from(v: PropertyIdValue) -> Self {
        Value::PropertyId(v)
    }
}

impl From<EntityIdValue> for Value {
    fn from(v: EntityIdValue) -> Self {
        match v {
            EntityIdValue::Item(id) => Value::ItemId(id),
            EntityIdValue::Property(id) => Value::PropertyId(id),
        }
    }
}

impl From<MonolingualTextValue> for Value {
    fn from(v: MonolingualTextValue) -> Self {
        Value::MonolingualText(v)
    }
}

impl From<TimeValue> for Value {
    fn from(v: TimeValue) -> Self {
        Value::Time(v)
    }
}

impl From<QuantityValue> for Value {
    fn from(v: QuantityValue) -> Self {
        Value::Quantity(v)
    }
}

impl From<GlobeCoordinatesValue> for Value {
    fn from(v: GlobeCoordinatesValue) -> Self {
        Value::GlobeCoordinates(v)
    }
}

/// Exhaustive, per-variant handling of a [`Value`].
pub trait ValueVisitor {
    type Output;

    fn visit_item_id(&mut self, value: &ItemIdValue) -> Self::Output;
    fn visit_property_id(&mut self, value: &PropertyIdValue) -> Self::Output;
    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_monolingual_text(&mut self, value: &MonolingualTextValue) -> Self::Output;
    fn visit_time(&mut self, value: &TimeValue) -> Self::Output;
    fn visit_quantity(&mut self, value: &QuantityValue) -> Self::Output;
    fn visit_globe_coordinates(&mut self, value: &GlobeCoordinatesValue) -> Self::Output;
}

/// Text in a specific language. Also used for labels, descriptions and aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonolingualTextValue {
    text: String,
    language: String,
}

impl MonolingualTextValue {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self { text: text.into(), language: language.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language code, e.g. `en` or `de-ch`.
    pub fn language(&self) -> &str {
        &self.language
    }
}

/// A point in time, asserted at a given precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
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
    calendar_model: String,
}

impl TimeValue {
    pub const PREC_1GY: u8 = 0;
    pub const PREC_100MY: u8 = 1;
    pub const PREC_10MY: u8 = 2;
    pub const PREC_1MY: u8 = 3;
    pub const PREC_100KY: u8 = 4;
    pub const PREC_10KY: u8 = 5;
    pub const PREC_MILLENNIUM: u8 = 6;
    pub const PREC_CENTURY: u8 = 7;
    pub const PREC_DECADE: u8 = 8;
    pub const PREC_YEAR: u8 = 9;
    pub const PREC_MONTH: u8 = 10;
    pub const PREC_DAY: u8 = 11;
    pub const PREC_HOUR: u8 = 12;
    pub const PREC_MINUTE: u8 = 13;
    pub const PREC_SECOND: u8 = 14;

    /// Proleptic Gregorian calendar.
    pub const CM_GREGORIAN_PRO: &'static str = "http://www.wikidata.org/entity/Q1985727";
    /// Proleptic Julian calendar.
    pub const CM_JULIAN_PRO: &'static str = "http://www.wikidata.org/entity/Q1985786";

    /// Creates a time value, checking every component against its range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
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
        calendar_model: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        check_range("month", month as i64, 0, 12)?;
        check_range("day", day as i64, 0, 31)?;
        check_range("hour", hour as i64, 0, 23)?;
        check_range("minute", minute as i64, 0, 59)?;
        check_range("second", second as i64, 0, 60)?;
        check_range("precision", precision as i64, 0, Self::PREC_SECOND as i64)?;
        check_range("timezone", timezone_offset as i64, -1440, 1440)?;

        Ok(Self {
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
            calendar_model: calendar_model.into(),
        })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    /// Month of year, 0 when unspecified.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 0 when unspecified.
    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// One of the `PREC_*` codes.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Tolerance before the value, in units of the precision.
    pub fn before_tolerance(&self) -> u32 {
        self.before_tolerance
    }

    /// Tolerance after the value, in units of the precision.
    pub fn after_tolerance(&self) -> u32 {
        self.after_tolerance
    }

    /// Offset from UTC in minutes.
    pub fn timezone_offset(&self) -> i32 {
        self.timezone_offset
    }

    /// IRI of the calendar model the value should be displayed in.
    pub fn calendar_model(&self) -> &str {
        &self.calendar_model
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConstructionError> {
    if value < min || value > max {
        return Err(ConstructionError::TimeComponentOutOfRange { field, value, min, max });
    }
    Ok(())
}

/// A numeric amount with optional bounds and a unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantityValue {
    amount: Decimal,
    lower_bound: Option<Decimal>,
    upper_bound: Option<Decimal>,
    unit: String,
}

impl QuantityValue {
    /// Unit marker of dimensionless quantities.
    pub const DIMENSIONLESS: &'static str = "1";

    /// Creates a quantity. Absent bounds stay absent.
    pub fn new(
        amount: Decimal,
        lower_bound: Option<Decimal>,
        upper_bound: Option<Decimal>,
        unit: impl Into<String>,
    ) -> Self {
        Self { amount, lower_bound, upper_bound, unit: unit.into() }
    }

    pub fn amount(&self) -> &Decimal {
        &self.amount
    }

    pub fn lower_bound(&self) -> Option<&Decimal> {
        self.lower_bound.as_ref()
    }

    pub fn upper_bound(&self) -> Option<&Decimal> {
        self.upper_bound.as_ref()
    }

    /// Unit IRI, or [`QuantityValue::DIMENSIONLESS`].
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit == Self::DIMENSIONLESS
    }
}

/// A position on a globe.
///
/// Floats compare and hash by bit pattern so that equality is reflexive and
/// consistent with hashing.
#[derive(Debug, Clone)]
pub struct GlobeCoordinatesValue {
    latitude: f64,
    longitude: f64,
    precision: f64,
    globe: String,
}

impl GlobeCoordinatesValue {
    /// The Earth.
    pub const GLOBE_EARTH: &'static str = "http://www.wikidata.org/entity/Q2";
    /// The Moon.
    pub const GLOBE_MOON: &'static str = "http://www.wikidata.org/entity/Q405";

    pub const PREC_DEGREE: f64 = 1.0;
    pub const PREC_ARCMINUTE: f64 = 1.0 / 60.0;
    pub const PREC_ARCSECOND: f64 = 1.0 / 3600.0;
    pub const PREC_MILLI_DEGREE: f64 = 0.001;
    pub const PREC_MICRO_DEGREE: f64 = 0.000_001;

    /// Creates coordinates; the precision must be strictly positive.
    pub fn new(
        latitude: f64,
        longitude: f64,
        precision: f64,
        globe: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        if !latitude.is_finite() {
            return Err(ConstructionError::NonFiniteCoordinate { field: "latitude", value: latitude });
        }
        if !longitude.is_finite() {
            return Err(ConstructionError::NonFiniteCoordinate { field: "longitude", value: longitude });
        }
        if !precision.is_finite() {
            return Err(ConstructionError::NonFiniteCoordinate { field: "precision", value: precision });
        }
        if precision <= 0.0 {
            return Err(ConstructionError::NonPositivePrecision { precision });
        }
        Ok(Self { latitude, longitude, precision, globe: globe.into() })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Precision in degrees, always > 0.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// IRI of the globe.
    pub fn globe(&self) -> &str {
        &self.globe
    }
}

impl PartialEq for GlobeCoordinatesValue {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
            && self.precision.to_bits() == other.precision.to_bits()
            && self.globe == other.globe
    }
}

impl Eq for GlobeCoordinatesValue {}

impl Hash for GlobeCoordinatesValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
        self.precision.to_bits().hash(state);
        self.globe.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WIKIDATA_SITE_IRI;

    #[test]
    fn test_coordinates_precision_must_be_positive() {
        let earth = GlobeCoordinatesValue::GLOBE_EARTH;
        assert!(GlobeCoordinatesValue::new(51.5, -0.1, 0.01, earth).is_ok());
        assert!(matches!(
            GlobeCoordinatesValue::new(51.5, -0.1, 0.0, earth),
            Err(ConstructionError::NonPositivePrecision { .. })
        ));
        assert!(GlobeCoordinatesValue::new(51.5, -0.1, -1.0, earth).is_err());
        assert!(GlobeCoordinatesValue::new(51.5, -0.1, f64::NAN, earth).is_err());
        assert!(GlobeCoordinatesValue::new(f64::INFINITY, -0.1, 1.0, earth).is_err());
    }

    #[test]
    fn test_coordinates_equality_by_bits() {
        let earth = GlobeCoordinatesValue::GLOBE_EARTH;
        let a = GlobeCoordinatesValue::new(0.0, 10.0, 1.0, earth).unwrap();
        let b = GlobeCoordinatesValue::new(-0.0, 10.0, 1.0, earth).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_time_ranges() {
        let cm = TimeValue::CM_GREGORIAN_PRO;
        assert!(TimeValue::new(2001, 1, 15, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).is_ok());
        assert!(TimeValue::new(1900, 0, 0, 0, 0, 0, TimeValue::PREC_YEAR, 0, 0, 0, cm).is_ok());
        assert!(TimeValue::new(2001, 13, 1, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 32, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 1, 24, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 1, 0, 60, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 1, 0, 0, 61, TimeValue::PREC_DAY, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 1, 0, 0, 0, 15, 0, 0, 0, cm).is_err());
        assert!(TimeValue::new(2001, 1, 1, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 1441, cm).is_err());

        let err = TimeValue::new(2001, 13, 1, 0, 0, 0, TimeValue::PREC_DAY, 0, 0, 0, cm).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::TimeComponentOutOfRange { field: "month", value: 13, min: 0, max: 12 }
        );
    }

    #[test]
    fn test_value_type_tags() {
        let item = ItemIdValue::new("Q5", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(Value::from(item).value_type(), ValueType::EntityId);
        assert_eq!(Value::String("x".into()).value_type().as_str(), "string");
        for tag in ["wikibase-entityid", "string", "monolingualtext", "time", "quantity", "globecoordinate"] {
            assert_eq!(ValueType::from_wire(tag).unwrap().as_str(), tag);
        }
        assert_eq!(ValueType::from_wire("wikibase-lexeme"), None);
    }

    struct KindName;

    impl ValueVisitor for KindName {
        type Output = &'static str;

        fn visit_item_id(&mut self, _: &ItemIdValue) -> &'static str {
            "item"
        }
        fn visit_property_id(&mut self, _: &PropertyIdValue) -> &'static str {
            "property"
        }
        fn visit_string(&mut self, _: &str) -> &'static str {
            "string"
        }
        fn visit_monolingual_text(&mut self, _: &MonolingualTextValue) -> &'static str {
            "text"
        }
        fn visit_time(&mut self, _: &TimeValue) -> &'static str {
            "time"
        }
        fn visit_quantity(&mut self, _: &QuantityValue) -> &'static str {
            "quantity"
        }
        fn visit_globe_coordinates(&mut self, _: &GlobeCoordinatesValue) -> &'static str {
            "coordinates"
        }
    }

    #[test]
    fn test_visitor_dispatch() {
        let quantity = QuantityValue::new(Decimal::from(3), None, None, QuantityValue::DIMENSIONLESS);
        assert!(quantity.is_dimensionless());
        assert_eq!(Value::from(quantity).accept(&mut KindName), "quantity");
        assert_eq!(Value::String("x".into()).accept(&mut KindName), "string");
        let text = MonolingualTextValue::new("Berlin", "de");
        assert_eq!(Value::from(text).accept(&mut KindName), "text");
    }

    #[test]
    fn test_entity_id_into_value() {
        let item = EntityIdValue::infer("Q5", WIKIDATA_SITE_IRI).unwrap();
        match Value::from(item) {
            Value::ItemId(id) => assert_eq!(id.id(), "Q5"),
            other => panic!("Expected item id, got {:?}", other),
        }
        let property = EntityIdValue::infer("P31", WIKIDATA_SITE_IRI).unwrap();
        assert_eq!(Value::from(property).value_type(), ValueType::EntityId);
    }
}
