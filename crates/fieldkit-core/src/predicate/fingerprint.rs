//! Deterministic SHA-256 digest of predicate structure.
//!
//! The digest covers what a translator sees: field identity, predicate
//! types, operands, inclusion and negation. Closures never contribute, so
//! two predicates built the same way always share a fingerprint.

use crate::{
    field::FieldInfo,
    predicate::{FieldPredicate, Operand, Predicate},
    value::{Value, f32_bits, f64_bits},
};
use sha2::{Digest, Sha256};

/// Fingerprint one predicate tree.
pub(crate) fn fingerprint<E>(predicate: &Predicate<E>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hash_predicate(&mut hasher, predicate);

    hasher.finalize().into()
}

/// Fingerprint a single field predicate.
pub(crate) fn fingerprint_field<E>(predicate: &FieldPredicate<E>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hash_field_predicate(&mut hasher, predicate);

    hasher.finalize().into()
}

fn hash_predicate<E>(hasher: &mut Sha256, predicate: &Predicate<E>) {
    match predicate {
        Predicate::Field(field) => hash_field_predicate(hasher, field),
        Predicate::And(children) => {
            write_tag(hasher, 0x23);
            write_len_u32(hasher, children.len());
            for child in children {
                hash_predicate(hasher, child);
            }
        }
        Predicate::Or(children) => {
            write_tag(hasher, 0x24);
            write_len_u32(hasher, children.len());
            for child in children {
                hash_predicate(hasher, child);
            }
        }
    }
}

fn hash_field_predicate<E>(hasher: &mut Sha256, predicate: &FieldPredicate<E>) {
    write_tag(hasher, 0x26);
    hash_field_info(hasher, predicate.field());
    write_tag(hasher, predicate.base_type().tag());
    write_tag(hasher, u8::from(predicate.is_negated()));
    write_tag(hasher, predicate.inclusion().map_or(0, |i| i.tag()));

    write_len_u32(hasher, predicate.operands().len());
    for operand in predicate.operands() {
        match operand {
            Operand::Value(value) => {
                write_tag(hasher, 0x30);
                write_value(hasher, value);
            }
            Operand::Field(field) => {
                write_tag(hasher, 0x31);
                hash_field_info(hasher, field);
            }
        }
    }
}

fn hash_field_info(hasher: &mut Sha256, field: &FieldInfo) {
    let id = &field.identifier;
    match id.schema() {
        Some(schema) => {
            write_tag(hasher, 1);
            write_str(hasher, schema);
        }
        None => write_tag(hasher, 0),
    }
    write_str(hasher, id.table());
    write_str(hasher, id.column());
    write_str(hasher, &field.kind.to_string());
    write_tag(hasher, u8::from(field.unique));
}

///
/// Encode one value: canonical tag, then a fixed-width or length-prefixed
/// payload.
///

fn write_value(hasher: &mut Sha256, value: &Value) {
    write_tag(hasher, value.tag().to_u8());

    match value {
        Value::Null => {}
        Value::Bool(v) => write_tag(hasher, u8::from(*v)),
        Value::Byte(v) => hasher.update(v.to_be_bytes()),
        Value::Short(v) => hasher.update(v.to_be_bytes()),
        Value::Char(v) => write_u32(hasher, u32::from(*v)),
        Value::Int(v) => hasher.update(v.to_be_bytes()),
        Value::Long(v) => hasher.update(v.to_be_bytes()),
        Value::Float(v) => write_u32(hasher, f32_bits(*v)),
        Value::Double(v) => hasher.update(f64_bits(*v).to_be_bytes()),
        Value::Decimal(v) => hasher.update(v.normalize().serialize()),
        Value::Text(v) => write_str(hasher, v),
        Value::Enum(v) => {
            write_str(hasher, &v.path);
            write_str(hasher, &v.name);
            write_u32(hasher, v.ordinal);
        }
        Value::Blob(bytes) => {
            write_len_u32(hasher, bytes.len());
            hasher.update(bytes);
        }
        Value::List(items) => {
            write_len_u32(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
    }
}

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    write_u32(hasher, len);
}

fn write_u32(hasher: &mut Sha256, value: u32) {
    hasher.update(value.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}
