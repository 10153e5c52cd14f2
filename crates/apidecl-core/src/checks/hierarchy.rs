//! Union supersets and effective struct fields.

use super::{Finding, Rule, type_subject};
use crate::cache::compile_anchored;
use crate::types::{DataType, DefaultValue, Field, TypeDef};
use crate::{CATCH_ALL_TAG, Registry, TypeRef};
use std::collections::BTreeSet;

// =============================================================================
// UNIONS
// =============================================================================

pub(super) fn union_supersets(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, def) in registry.types() {
        let TypeDef::Union(union) = def else {
            continue;
        };
        let subject = type_subject(&ns.name, def);

        let mut own = BTreeSet::new();
        for variant in &union.variants {
            if !own.insert(variant.name.as_str()) {
                out.push(Finding::new(
                    Rule::UnionSuperset,
                    subject.clone(),
                    format!("tag '{}' is declared twice", variant.name),
                ));
            }
            if !union.closed && variant.name == CATCH_ALL_TAG {
                out.push(Finding::new(
                    Rule::UnionSuperset,
                    subject.clone(),
                    format!("tag '{}' is reserved for the catch-all of open unions", CATCH_ALL_TAG),
                ));
            }
        }

        let Some(parent_ref) = &union.extends else {
            continue;
        };
        let Ok(parent) = registry.resolve_union(&ns.name, parent_ref) else {
            continue;
        };
        let parent_name = TypeRef::qualified(parent.namespace, &parent.item.name);
        let Ok(parent_shape) = registry.union_shape(parent.namespace, &TypeRef::local(&parent.item.name)) else {
            continue;
        };

        for variant in &union.variants {
            if parent_shape.find(&variant.name).is_some() {
                out.push(Finding::new(
                    Rule::UnionSuperset,
                    subject.clone(),
                    format!("redeclares tag '{}' inherited from '{}'", variant.name, parent_name),
                ));
            }
        }

        if !parent_shape.closed && union.closed {
            out.push(Finding::new(
                Rule::UnionSuperset,
                subject,
                format!(
                    "is closed but extends open union '{}'; its values could not carry the parent's catch-all",
                    parent_name
                ),
            ));
        }
    }
}

// =============================================================================
// STRUCTS
// =============================================================================

pub(super) fn struct_fields(registry: &Registry, out: &mut Vec<Finding>) {
    for (ns, def) in registry.types() {
        let TypeDef::Struct(strukt) = def else {
            continue;
        };
        let subject = type_subject(&ns.name, def);

        // Cycles and unresolved parents are reported elsewhere.
        let Ok(fields) = registry.struct_fields(&ns.name, &TypeRef::local(&strukt.name)) else {
            continue;
        };
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.item.name.as_str()) {
                out.push(Finding::new(
                    Rule::StructFields,
                    subject.clone(),
                    format!("field '{}' is declared more than once over the extends chain", field.item.name),
                ));
            }
        }

        for field in &strukt.fields {
            if let Err(message) = check_default(registry, &ns.name, field) {
                out.push(Finding::new(Rule::StructFields, subject.clone(), message));
            }
        }
    }
}

fn check_default(registry: &Registry, namespace: &str, field: &Field) -> Result<(), String> {
    let Some(default) = &field.default else {
        return Ok(());
    };
    if field.data_type.is_nullable() {
        return Err(format!(
            "field '{}' is nullable and also has a default",
            field.name
        ));
    }
    let Ok((scope, base)) = registry.unalias(namespace, &field.data_type) else {
        return Ok(());
    };
    default_fits(registry, scope, base, default)
        .map_err(|reason| format!("default {} of field '{}' {}", default, field.name, reason))
}

/// Whether `default` is a valid value of `base`.
fn default_fits(
    registry: &Registry,
    scope: &str,
    base: &DataType,
    default: &DefaultValue,
) -> Result<(), String> {
    match (base, default) {
        (DataType::Boolean, DefaultValue::Bool(_)) => Ok(()),
        (DataType::Integer { kind, min, max }, DefaultValue::Int(_) | DefaultValue::UInt(_)) => {
            let value = match default {
                DefaultValue::Int(i) => i128::from(*i),
                DefaultValue::UInt(u) => i128::from(*u),
                _ => return Err("is not an integer".to_string()),
            };
            let (lo, hi) = kind.range();
            let lo = min.map_or(lo, |m| lo.max(i128::from(m)));
            let hi = max.map_or(hi, |m| hi.min(i128::from(m)));
            if value < lo || value > hi {
                Err(format!("is outside {}..={}", lo, hi))
            } else {
                Ok(())
            }
        }
        (
            DataType::String {
                min_length,
                max_length,
                pattern,
            },
            DefaultValue::Str(s),
        ) => {
            let len = s.chars().count() as u64;
            if min_length.is_some_and(|m| len < m) || max_length.is_some_and(|m| len > m) {
                return Err("violates the length bounds".to_string());
            }
            if let Some(p) = pattern {
                let re = compile_anchored(p).map_err(|e| format!("cannot be checked: {}", e))?;
                if !re.is_match(s) {
                    return Err(format!("does not match pattern \"{}\"", p));
                }
            }
            Ok(())
        }
        (DataType::Named(reference), DefaultValue::Tag(tag)) => {
            let shape = registry
                .union_shape(scope, reference)
                .map_err(|_| "names a tag but the field is not a union".to_string())?;
            match shape.find(tag) {
                Some(v) if v.item.is_void() => Ok(()),
                Some(_) => Err(format!("names tag '{}', which carries a payload", tag)),
                None => Err(format!("names unknown tag '{}'", tag)),
            }
        }
        _ => Err(format!("does not fit type {}", base)),
    }
}

// =============================================================================
// TESTS
// =============================================================================
