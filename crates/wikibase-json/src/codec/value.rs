//! Datavalue encoding/decoding.
//!
//! A datavalue travels as `{"value": <payload>, "type": <tag>}`. Payload
//! shapes are declared once here, in the decode and encode function for
//! each value kind.

use serde_json::Value as Json;

use crate::codec::DecodeContext;
use crate::codec::primitives::{ObjectReader, ObjectWriter};
use crate::error::{ConstructionError, DecodeError, EncodeError};
use crate::model::{
    EntityIdValue, EntityKind, GlobeCoordinatesValue, ItemIdValue, MonolingualTextValue,
    PropertyIdValue, QuantityValue, TimeValue, Value, ValueType,
};
use crate::util::{Decimal, TimestampParts, format_timestamp, parse_timestamp};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a datavalue object.
pub fn decode_value(json: &Json, ctx: &DecodeContext) -> Result<Value, DecodeError> {
    let reader = ObjectReader::new(json, "datavalue")?;
    let tag = reader.required_str("type")?;
    let value_type = ValueType::from_wire(tag).ok_or_else(|| DecodeError::UnknownTag {
        kind: "datavalue type",
        value: tag.to_string(),
    })?;
    let payload = reader.required("value")?;

    match value_type {
        ValueType::EntityId => Ok(decode_entity_id(payload, ctx)?.into()),
        ValueType::String => payload
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or(DecodeError::InvalidType {
                field: "value",
                context: "string datavalue",
                expected: "a string",
            }),
        ValueType::MonolingualText => Ok(decode_monolingual_text(payload)?.into()),
        ValueType::Time => Ok(decode_time(payload)?.into()),
        ValueType::Quantity => Ok(decode_quantity(payload)?.into()),
        ValueType::GlobeCoordinates => Ok(decode_globe_coordinates(payload)?.into()),
    }
}

/// Decodes an entity id payload: `{"entity-type", "numeric-id", "id"}`.
///
/// Either `id` or `entity-type` with `numeric-id` must be present. Without
/// `entity-type` the kind is inferred from the id prefix.
pub fn decode_entity_id(json: &Json, ctx: &DecodeContext) -> Result<EntityIdValue, DecodeError> {
    let reader = ObjectReader::new(json, "entity id")?;

    let kind = match reader.optional_str("entity-type")? {
        Some(tag) => Some(EntityKind::from_wire(tag).ok_or_else(|| DecodeError::UnknownTag {
            kind: "entity-type",
            value: tag.to_string(),
        })?),
        None => None,
    };

    let id = match (reader.optional_str("id")?, kind) {
        (Some(id), _) => id.to_string(),
        (None, Some(kind)) => {
            let numeric = reader.get("numeric-id").ok_or(DecodeError::MissingField {
                field: "id",
                context: "entity id",
            })?;
            let numeric = numeric.as_u64().ok_or(DecodeError::InvalidType {
                field: "numeric-id",
                context: "entity id",
                expected: "a non-negative integer",
            })?;
            format!("{}{}", kind.prefix(), numeric)
        }
        (None, None) => {
            return Err(DecodeError::MissingField { field: "id", context: "entity id" });
        }
    };

    let value = match kind {
        Some(kind) => EntityIdValue::new(kind, id, ctx.site_iri())?,
        None => EntityIdValue::infer(id, ctx.site_iri())?,
    };
    Ok(value)
}

/// Decodes `{"text", "language"}`, the shape shared by monolingual text
/// values and document terms (which call the text `value`).
pub fn decode_monolingual_text(json: &Json) -> Result<MonolingualTextValue, DecodeError> {
    let reader = ObjectReader::new(json, "monolingual text")?;
    let text = reader.required_str("text")?;
    let language = reader.required_str("language")?;
    Ok(MonolingualTextValue::new(text, language))
}

/// Decodes a time payload. `timezone`, `before` and `after` default to 0.
pub fn decode_time(json: &Json) -> Result<TimeValue, DecodeError> {
    let reader = ObjectReader::new(json, "time")?;

    let time = reader.required_str("time")?;
    let parts = parse_timestamp(time).map_err(|e| DecodeError::InvalidTimestamp {
        value: time.to_string(),
        reason: e.message,
    })?;

    let timezone = reader.i64_or("timezone", 0)?;
    let timezone = i32::try_from(timezone).map_err(|_| out_of_range("timezone", timezone, -1440, 1440))?;
    let precision = reader.required_i64("precision")?;
    let precision = u8::try_from(precision)
        .map_err(|_| out_of_range("precision", precision, 0, TimeValue::PREC_SECOND as i64))?;
    let before = tolerance(&reader, "before")?;
    let after = tolerance(&reader, "after")?;
    let calendar_model = reader.required_str("calendarmodel")?;

    let value = TimeValue::new(
        parts.year,
        parts.month,
        parts.day,
        parts.hour,
        parts.minute,
        parts.second,
        precision,
        before,
        after,
        timezone,
        calendar_model,
    )?;
    Ok(value)
}

fn tolerance(reader: &ObjectReader<'_>, field: &'static str) -> Result<u32, DecodeError> {
    let raw = reader.u64_or(field, 0)?;
    u32::try_from(raw).map_err(|_| DecodeError::InvalidType {
        field,
        context: reader.context(),
        expected: "a 32-bit non-negative integer",
    })
}

fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> DecodeError {
    ConstructionError::TimeComponentOutOfRange { field, value, min, max }.into()
}

/// Decodes a quantity payload. A missing unit means dimensionless.
pub fn decode_quantity(json: &Json) -> Result<QuantityValue, DecodeError> {
    let reader = ObjectReader::new(json, "quantity")?;

    let amount = reader
        .optional_numeric_text("amount")?
        .ok_or(DecodeError::MissingField { field: "amount", context: "quantity" })?;
    let amount = Decimal::parse(&amount)?;
    let lower_bound = optional_decimal(&reader, "lowerBound")?;
    let upper_bound = optional_decimal(&reader, "upperBound")?;
    let unit = reader.optional_str("unit")?.unwrap_or(QuantityValue::DIMENSIONLESS);

    Ok(QuantityValue::new(amount, lower_bound, upper_bound, unit))
}

fn optional_decimal(reader: &ObjectReader<'_>, field: &'static str) -> Result<Option<Decimal>, DecodeError> {
    match reader.optional_numeric_text(field)? {
        Some(text) => Ok(Some(Decimal::parse(&text)?)),
        None => Ok(None),
    }
}

/// Decodes a globe coordinates payload. `altitude` is ignored; a missing
/// globe means the Earth.
pub fn decode_globe_coordinates(json: &Json) -> Result<GlobeCoordinatesValue, DecodeError> {
    let reader = ObjectReader::new(json, "globe coordinates")?;
    let latitude = reader.required_f64("latitude")?;
    let longitude = reader.required_f64("longitude")?;
    let precision = reader.required_f64("precision")?;
    let globe = reader.optional_str("globe")?.unwrap_or(GlobeCoordinatesValue::GLOBE_EARTH);
    Ok(GlobeCoordinatesValue::new(latitude, longitude, precision, globe)?)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value as a datavalue object.
pub fn encode_value(value: &Value) -> Result<Json, EncodeError> {
    let payload = match value {
        Value::ItemId(id) => encode_item_id(id),
        Value::PropertyId(id) => encode_property_id(id),
        Value::String(s) => Json::String(s.clone()),
        Value::MonolingualText(text) => encode_monolingual_text(text),
        Value::Time(time) => encode_time(time),
        Value::Quantity(quantity) => encode_quantity(quantity),
        Value::GlobeCoordinates(coordinates) => encode_globe_coordinates(coordinates)?,
    };

    let mut writer = ObjectWriter::new();
    writer.put("value", payload).put_str("type", value.value_type().as_str());
    Ok(writer.finish())
}

fn encode_entity_id(kind: EntityKind, id: &str, numeric_id: Option<u64>) -> Json {
    let mut writer = ObjectWriter::new();
    writer.put_str("entity-type", kind.as_str());
    if let Some(n) = numeric_id {
        writer.put_u64("numeric-id", n);
    }
    writer.put_str("id", id);
    writer.finish()
}

pub fn encode_item_id(id: &ItemIdValue) -> Json {
    encode_entity_id(EntityKind::Item, id.id(), id.numeric_id())
}

pub fn encode_property_id(id: &PropertyIdValue) -> Json {
    encode_entity_id(EntityKind::Property, id.id(), id.numeric_id())
}

pub fn encode_monolingual_text(text: &MonolingualTextValue) -> Json {
    let mut writer = ObjectWriter::new();
    writer.put_str("text", text.text()).put_str("language", text.language());
    writer.finish()
}

pub fn encode_time(time: &TimeValue) -> Json {
    let timestamp = format_timestamp(&TimestampParts {
        year: time.year(),
        month: time.month(),
        day: time.day(),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
    });

    let mut writer = ObjectWriter::new();
    writer
        .put_str("time", &timestamp)
        .put_i64("timezone", time.timezone_offset() as i64)
        .put_u64("before", time.before_tolerance() as u64)
        .put_u64("after", time.after_tolerance() as u64)
        .put_u64("precision", time.precision() as u64)
        .put_str("calendarmodel", time.calendar_model());
    writer.finish()
}

pub fn encode_quantity(quantity: &QuantityValue) -> Json {
    let mut writer = ObjectWriter::new();
    writer
        .put_str("amount", &quantity.amount().to_wire_string())
        .put_str("unit", quantity.unit());
    if let Some(upper) = quantity.upper_bound() {
        writer.put_str("upperBound", &upper.to_wire_string());
    }
    if let Some(lower) = quantity.lower_bound() {
        writer.put_str("lowerBound", &lower.to_wire_string());
    }
    writer.finish()
}

pub fn encode_globe_coordinates(coordinates: &GlobeCoordinatesValue) -> Result<Json, EncodeError> {
    let mut writer = ObjectWriter::new();
    writer
        .put_f64("latitude", coordinates.latitude())?
        .put_f64("longitude", coordinates.longitude())?
        .put("altitude", Json::Null)
        .put_f64("precision", coordinates.precision())?
        .put_str("globe", coordinates.globe());
    Ok(writer.finish())
}
