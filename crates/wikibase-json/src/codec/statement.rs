//! Claim, reference and statement encoding/decoding.
//!
//! Statements on the wire do not name their subject; the caller supplies it
//! (normally the id of the enclosing document).

use serde_json::Value as Json;

use crate::codec::DecodeContext;
use crate::codec::primitives::{ObjectReader, ObjectWriter};
use crate::codec::snak::{decode_snak, decode_snak_groups, encode_snak, encode_snak_groups};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Claim, EntityIdValue, Reference, Statement, StatementRank};

// =============================================================================
// DECODING
// =============================================================================

fn read_claim(reader: &ObjectReader<'_>, subject: &EntityIdValue, ctx: &DecodeContext) -> Result<Claim, DecodeError> {
    let main_snak = decode_snak(reader.required("mainsnak")?, ctx)?;
    let order = reader.string_array("qualifiers-order")?;
    let qualifiers = decode_snak_groups(reader.entries("qualifiers")?, &order, ctx)?;
    Ok(Claim::new(subject.clone(), main_snak, qualifiers))
}

/// Decodes the claim part of a statement object (`mainsnak`, `qualifiers`,
/// `qualifiers-order`).
pub fn decode_claim(json: &Json, subject: &EntityIdValue, ctx: &DecodeContext) -> Result<Claim, DecodeError> {
    let reader = ObjectReader::new(json, "claim")?;
    read_claim(&reader, subject, ctx)
}

/// Decodes `{"snaks", "snaks-order"}`.
pub fn decode_reference(json: &Json, ctx: &DecodeContext) -> Result<Reference, DecodeError> {
    let reader = ObjectReader::new(json, "reference")?;
    let order = reader.string_array("snaks-order")?;
    let snak_groups = decode_snak_groups(reader.entries("snaks")?, &order, ctx)?;
    Ok(Reference::new(snak_groups))
}

/// Decodes a statement about `subject`.
///
/// `rank` and `mainsnak` are required. A missing `id` decodes as the empty
/// id of a statement that was never saved.
pub fn decode_statement(
    json: &Json,
    subject: &EntityIdValue,
    ctx: &DecodeContext,
) -> Result<Statement, DecodeError> {
    let reader = ObjectReader::new(json, "statement")?;

    let id = reader.optional_str("id")?.unwrap_or_default().to_string();
    let tag = reader.required_str("rank")?;
    let rank = StatementRank::from_wire(tag).ok_or_else(|| DecodeError::UnknownTag {
        kind: "rank",
        value: tag.to_string(),
    })?;
    let claim = read_claim(&reader, subject, ctx)?;
    let references = reader
        .array("references")?
        .iter()
        .map(|r| decode_reference(r, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Statement::new(id, rank, claim, references))
}

// =============================================================================
// ENCODING
// =============================================================================

fn write_qualifiers(writer: &mut ObjectWriter, claim: &Claim) -> Result<(), EncodeError> {
    if claim.qualifiers().is_empty() {
        return Ok(());
    }
    let (qualifiers, order) = encode_snak_groups(claim.qualifiers())?;
    writer
        .put("qualifiers", qualifiers)
        .put("qualifiers-order", order.into_iter().map(Json::String).collect());
    Ok(())
}

/// Encodes the claim part of a statement.
pub fn encode_claim(claim: &Claim) -> Result<Json, EncodeError> {
    let mut writer = ObjectWriter::new();
    writer.put("mainsnak", encode_snak(claim.main_snak())?);
    write_qualifiers(&mut writer, claim)?;
    Ok(writer.finish())
}

pub fn encode_reference(reference: &Reference) -> Result<Json, EncodeError> {
    let (snaks, order) = encode_snak_groups(reference.snak_groups())?;
    let mut writer = ObjectWriter::new();
    writer
        .put("snaks", snaks)
        .put("snaks-order", order.into_iter().map(Json::String).collect());
    Ok(writer.finish())
}

/// Encodes a statement. Empty ids, qualifiers and references are left out.
pub fn encode_statement(statement: &Statement) -> Result<Json, EncodeError> {
    let claim = statement.claim();
    let mut writer = ObjectWriter::new();
    writer
        .put("mainsnak", encode_snak(claim.main_snak())?)
        .put_str("type", "statement");
    write_qualifiers(&mut writer, claim)?;
    if !statement.id().is_empty() {
        writer.put_str("id", statement.id());
    }
    writer.put_str("rank", statement.rank().as_str());
    if !statement.references().is_empty() {
        let references = statement
            .references()
            .iter()
            .map(encode_reference)
            .collect::<Result<Vec<_>, _>>()?;
        writer.put("references", Json::Array(references));
    }
    Ok(writer.finish())
}
