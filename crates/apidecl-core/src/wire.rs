//! # Wire Validation
//!
//! Validates JSON payloads against declared types and returns them in
//! normalized form.
//!
//! Wire conventions:
//! - a struct is an object; fields missing on input are filled from their
//!   default, or set to `null` when nullable; unknown fields are dropped
//! - a union value is `{".tag": t}`; a struct payload is inlined next to the
//!   tag, any other payload sits under the key `t`
//! - a void tag may be sent as the bare string `"t"`
//! - an unknown tag of an open union becomes `{".tag": "other"}`
//! - timestamps are strings in the declared format
//!
//! Errors carry the JSON path of the offending value (`$.members[2].email`).

use crate::cache::{CacheStats, PatternCache, compile_anchored, pattern_cache};
use crate::registry::Scoped;
use crate::route::Route;
use crate::types::{DataType, TypeDef, Variant};
use crate::{CATCH_ALL_TAG, DeclError, MAX_WIRE_DEPTH, Registry, TAG_KEY, TypeRef};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireErrorKind {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("null is not allowed here")]
    NullNotAllowed,

    #[error("union value has no '.tag'")]
    MissingTag,

    #[error("unknown tag '{tag}' for closed union (expected one of: {})", .expected.join(", "))]
    UnknownTag { tag: String, expected: Vec<String> },

    #[error("integer {value} is outside {min}..={max}")]
    OutOfRange { value: i128, min: i128, max: i128 },

    #[error("length {len} is outside the declared bounds")]
    Length { len: u64 },

    #[error("'{value}' does not match pattern \"{pattern}\"")]
    PatternMismatch { value: String, pattern: String },

    #[error("declared pattern \"{pattern}\" is invalid: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("'{value}' is not a timestamp in format \"{format}\"")]
    InvalidTimestamp { value: String, format: String },

    #[error("value is nested deeper than {} levels", MAX_WIRE_DEPTH)]
    TooDeep,

    #[error(transparent)]
    Declaration(#[from] DeclError),
}

/// A validation failure and where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct WireError {
    pub path: String,
    pub kind: WireErrorKind,
}

impl WireError {
    fn at(path: &str, kind: WireErrorKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &str, expected: impl Into<String>, value: &Value) -> WireError {
    WireError::at(
        path,
        WireErrorKind::TypeMismatch {
            expected: expected.into(),
            found: json_kind(value),
        },
    )
}

// =============================================================================
// ROUTE PARTS
// =============================================================================

/// Which of a route's three types a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePart {
    Arg,
    Result,
    Error,
}

impl RoutePart {
    #[must_use]
    pub fn of<'a>(&self, route: &'a Route) -> &'a DataType {
        match self {
            Self::Arg => &route.arg,
            Self::Result => &route.result,
            Self::Error => &route.error,
        }
    }
}

impl fmt::Display for RoutePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg => write!(f, "arg"),
            Self::Result => write!(f, "result"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl FromStr for RoutePart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arg" => Ok(Self::Arg),
            "result" => Ok(Self::Result),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown route part '{}' (arg, result, error)", other)),
        }
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

const ROOT: &str = "$";

/// Validates values against the declarations of one registry.
///
/// Compiled string patterns are cached across calls.
#[derive(Debug)]
pub struct Validator<'r> {
    registry: &'r Registry,
    patterns: PatternCache,
}

impl<'r> Validator<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            patterns: pattern_cache(),
        }
    }

    /// Validate `value` against `data_type` as written in `namespace`.
    pub fn validate(
        &mut self,
        namespace: &str,
        data_type: &DataType,
        value: &Value,
    ) -> Result<Value, WireError> {
        self.walk(namespace, data_type, Some(value), ROOT, 0)
    }

    /// Validate against a named type, `ns.Name`.
    pub fn validate_type(&mut self, path: &str, value: &Value) -> Result<Value, WireError> {
        let reference = TypeRef::parse(path);
        if reference.namespace.is_none() {
            return Err(WireError::at(ROOT, DeclError::Unresolved(reference).into()));
        }
        self.validate("", &DataType::Named(reference), value)
    }

    /// Validate the arg, result or error payload of `ns/route[:v]`.
    pub fn validate_route(
        &mut self,
        route_path: &str,
        part: RoutePart,
        value: &Value,
    ) -> Result<Value, WireError> {
        let registry = self.registry;
        let (ns, route) = registry
            .route(route_path)
            .map_err(|e| WireError::at(ROOT, e.into()))?;
        self.validate(&ns.name, part.of(route), value)
    }

    #[must_use]
    pub fn pattern_stats(&self) -> CacheStats {
        self.patterns.stats()
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// `value` is `None` when a field or payload is absent.
    fn walk(
        &mut self,
        scope: &str,
        data_type: &DataType,
        value: Option<&Value>,
        path: &str,
        depth: usize,
    ) -> Result<Value, WireError> {
        if depth > MAX_WIRE_DEPTH {
            return Err(WireError::at(path, WireErrorKind::TooDeep));
        }
        let present = value.filter(|v| !v.is_null());

        if let DataType::Nullable(inner) = data_type {
            return match present {
                None => Ok(Value::Null),
                Some(v) => self.walk(scope, inner, Some(v), path, depth),
            };
        }
        if data_type.is_void() {
            return match present {
                None => Ok(Value::Null),
                Some(v) => Err(mismatch(path, "null", v)),
            };
        }
        let Some(value) = present else {
            return Err(WireError::at(path, WireErrorKind::NullNotAllowed));
        };

        match data_type {
            DataType::Boolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                other => Err(mismatch(path, "boolean", other)),
            },
            DataType::Bytes => match value {
                Value::String(_) => Ok(value.clone()),
                other => Err(mismatch(path, "bytes as string", other)),
            },
            DataType::String {
                min_length,
                max_length,
                pattern,
            } => {
                let Value::String(s) = value else {
                    return Err(mismatch(path, "string", value));
                };
                let len = s.chars().count() as u64;
                if min_length.is_some_and(|m| len < m) || max_length.is_some_and(|m| len > m) {
                    return Err(WireError::at(path, WireErrorKind::Length { len }));
                }
                if let Some(p) = pattern {
                    self.match_pattern(p, s, path)?;
                }
                Ok(value.clone())
            }
            DataType::Integer { kind, min, max } => {
                let number = match value {
                    Value::Number(n) => n
                        .as_i64()
                        .map(i128::from)
                        .or_else(|| n.as_u64().map(i128::from)),
                    _ => None,
                };
                let Some(number) = number else {
                    return Err(mismatch(path, kind.name(), value));
                };
                let (lo, hi) = kind.range();
                let lo = min.map_or(lo, |m| lo.max(i128::from(m)));
                let hi = max.map_or(hi, |m| hi.min(i128::from(m)));
                if number < lo || number > hi {
                    return Err(WireError::at(
                        path,
                        WireErrorKind::OutOfRange {
                            value: number,
                            min: lo,
                            max: hi,
                        },
                    ));
                }
                Ok(value.clone())
            }
            DataType::Timestamp { format } => {
                let Value::String(s) = value else {
                    return Err(mismatch(path, "timestamp string", value));
                };
                NaiveDateTime::parse_from_str(s, format).map_err(|_| {
                    WireError::at(
                        path,
                        WireErrorKind::InvalidTimestamp {
                            value: s.clone(),
                            format: format.clone(),
                        },
                    )
                })?;
                Ok(value.clone())
            }
            DataType::List {
                item,
                min_items,
                max_items,
            } => {
                let Value::Array(items) = value else {
                    return Err(mismatch(path, "array", value));
                };
                let len = items.len() as u64;
                if min_items.is_some_and(|m| len < m) || max_items.is_some_and(|m| len > m) {
                    return Err(WireError::at(path, WireErrorKind::Length { len }));
                }
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        let item_path = format!("{}[{}]", path, i);
                        self.walk(scope, item, Some(v), &item_path, depth.saturating_add(1))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            DataType::Named(reference) => self.walk_named(scope, reference, value, path, depth),
            // Handled above.
            DataType::Void | DataType::Nullable(_) => Ok(Value::Null),
        }
    }

    fn walk_named(
        &mut self,
        scope: &str,
        reference: &TypeRef,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Value, WireError> {
        let registry = self.registry;
        let resolved = registry
            .resolve(scope, reference)
            .map_err(|e| WireError::at(path, e.into()))?;
        let next = depth.saturating_add(1);
        match resolved.item {
            TypeDef::Alias(alias) => {
                let (target_scope, target) = registry
                    .unalias(resolved.namespace, &alias.target)
                    .map_err(|e| WireError::at(path, e.into()))?;
                self.walk(target_scope, target, Some(value), path, next)
            }
            TypeDef::Struct(s) => {
                let Value::Object(object) = value else {
                    return Err(mismatch(path, format!("object ({})", s.name), value));
                };
                let own = TypeRef::qualified(resolved.namespace, &s.name);
                let fields = self.walk_struct(&own, object, path, next)?;
                Ok(Value::Object(fields))
            }
            TypeDef::Union(u) => {
                let own = TypeRef::qualified(resolved.namespace, &u.name);
                self.walk_union(&own, value, path, next)
            }
        }
    }

    fn walk_struct(
        &mut self,
        reference: &TypeRef,
        object: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<Map<String, Value>, WireError> {
        let registry = self.registry;
        let fields = registry
            .struct_fields("", reference)
            .map_err(|e| WireError::at(path, e.into()))?;

        let mut out = Map::new();
        for field in fields {
            let name = &field.item.name;
            let field_path = format!("{}.{}", path, name);
            let given = object.get(name).filter(|v| !v.is_null());
            let normalized = match (given, &field.item.default) {
                (Some(v), _) => {
                    self.walk(field.namespace, &field.item.data_type, Some(v), &field_path, depth)?
                }
                (None, Some(default)) => default.to_json(),
                (None, None) if field.item.data_type.is_nullable() => Value::Null,
                (None, None) => {
                    let kind = if object.contains_key(name) {
                        WireErrorKind::NullNotAllowed
                    } else {
                        WireErrorKind::MissingField(name.clone())
                    };
                    let at = if object.contains_key(name) { &field_path } else { path };
                    return Err(WireError::at(at, kind));
                }
            };
            out.insert(name.clone(), normalized);
        }
        Ok(out)
    }

    fn walk_union(
        &mut self,
        reference: &TypeRef,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Value, WireError> {
        let (tag, object) = match value {
            Value::String(tag) => (tag.as_str(), None),
            Value::Object(object) => match object.get(TAG_KEY) {
                Some(Value::String(tag)) => (tag.as_str(), Some(object)),
                Some(other) => return Err(mismatch(&format!("{}.{}", path, TAG_KEY), "string", other)),
                None => return Err(WireError::at(path, WireErrorKind::MissingTag)),
            },
            other => return Err(mismatch(path, format!("union ({})", reference), other)),
        };

        let registry = self.registry;
        let shape = registry
            .union_shape("", reference)
            .map_err(|e| WireError::at(path, e.into()))?;

        let mut out = Map::new();
        let Some(variant) = shape.find(tag) else {
            if shape.closed {
                return Err(WireError::at(
                    path,
                    WireErrorKind::UnknownTag {
                        tag: tag.to_string(),
                        expected: shape.tag_names().iter().map(|t| t.to_string()).collect(),
                    },
                ));
            }
            out.insert(TAG_KEY.to_string(), Value::String(CATCH_ALL_TAG.to_string()));
            return Ok(Value::Object(out));
        };

        out.insert(TAG_KEY.to_string(), Value::String(tag.to_string()));
        self.walk_payload(variant, object, &mut out, path, depth)?;
        Ok(Value::Object(out))
    }

    fn walk_payload(
        &mut self,
        variant: Scoped<'_, Variant>,
        object: Option<&Map<String, Value>>,
        out: &mut Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<(), WireError> {
        let tag = &variant.item.name;
        let payload = match &variant.item.payload {
            Some(p) if !p.is_void() => p,
            _ => return Ok(()),
        };

        if let Some(strukt) = self.inlined_struct(variant.namespace, payload, path)? {
            let empty = Map::new();
            let fields = object.unwrap_or(&empty);
            let carries_payload = fields.keys().any(|k| k != TAG_KEY);
            if payload.is_nullable() && !carries_payload {
                return Ok(());
            }
            let inlined = self.walk_struct(&strukt, fields, path, depth)?;
            out.extend(inlined);
            return Ok(());
        }

        let given = object.and_then(|o| o.get(tag.as_str()));
        let tag_path = format!("{}.{}", path, tag);
        match given.filter(|v| !v.is_null()) {
            Some(v) => {
                let normalized = self.walk(variant.namespace, payload, Some(v), &tag_path, depth)?;
                out.insert(tag.clone(), normalized);
            }
            None if payload.is_nullable() => {}
            None => return Err(WireError::at(path, WireErrorKind::MissingField(tag.clone()))),
        }
        Ok(())
    }

    /// The struct a payload denotes, if any. Struct payloads are inlined.
    fn inlined_struct(
        &self,
        scope: &str,
        payload: &DataType,
        path: &str,
    ) -> Result<Option<TypeRef>, WireError> {
        let registry = self.registry;
        let (scope, base) = registry
            .unalias(scope, payload.strip_nullable())
            .map_err(|e| WireError::at(path, e.into()))?;
        let DataType::Named(reference) = base else {
            return Ok(None);
        };
        let resolved = registry
            .resolve(scope, reference)
            .map_err(|e| WireError::at(path, e.into()))?;
        Ok(match resolved.item {
            TypeDef::Struct(s) => Some(TypeRef::qualified(resolved.namespace, &s.name)),
            _ => None,
        })
    }

    fn match_pattern(&mut self, pattern: &str, value: &str, path: &str) -> Result<(), WireError> {
        let regex = self
            .patterns
            .get_or_try_insert(pattern.to_string(), || compile_anchored(pattern))
            .map_err(|e| {
                WireError::at(
                    path,
                    WireErrorKind::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: e.to_string(),
                    },
                )
            })?;
        if regex.is_match(value) {
            Ok(())
        } else {
            Err(WireError::at(
                path,
                WireErrorKind::PatternMismatch {
                    value: value.to_string(),
                    pattern: pattern.to_string(),
                },
            ))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::standard_registry;
    use serde_json::json;

    fn registry() -> Registry {
        standard_registry().expect("declarations build")
    }

    #[test]
    fn defaults_and_nullables_are_filled() {
        let r = registry();
        let mut v = Validator::new(&r);
        let out = v
            .validate_type("team.TeamFolderArchiveArg", &json!({"team_folder_id": "123"}))
            .expect("valid");
        assert_eq!(out, json!({"team_folder_id": "123", "force_async_off": false}));

        let out = v
            .validate_type("team.TeamFolderCreateArg", &json!({"name": "Docs", "extra": 1}))
            .expect("valid");
        assert_eq!(out, json!({"name": "Docs", "sync_setting": null}));
    }

    #[test]
    fn missing_required_field_reports_path() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_type("team.TeamFolderRenameArg", &json!({"team_folder_id": "1"}))
            .expect_err("name is required");
        assert_eq!(err.path, "$");
        assert_eq!(err.kind, WireErrorKind::MissingField("name".to_string()));
    }

    #[test]
    fn void_shorthand_is_expanded() {
        let r = registry();
        let mut v = Validator::new(&r);
        let out = v.validate_type("files.SyncSetting", &json!("not_synced")).expect("valid");
        assert_eq!(out, json!({".tag": "not_synced"}));
    }

    #[test]
    fn unknown_tag_of_open_union_becomes_other() {
        let r = registry();
        let mut v = Validator::new(&r);
        let out = v
            .validate_type("team.TeamFolderStatus", &json!({".tag": "frozen"}))
            .expect("open union");
        assert_eq!(out, json!({".tag": "other"}));
    }

    #[test]
    fn unknown_tag_of_closed_union_is_rejected() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_type("paper.FolderSharingPolicyType", &json!("public"))
            .expect_err("closed union");
        assert!(matches!(err.kind, WireErrorKind::UnknownTag { .. }));
    }

    #[test]
    fn struct_payload_is_inlined() {
        let r = registry();
        let mut v = Validator::new(&r);
        let value = json!({
            ".tag": "complete",
            "team_folder_id": "123",
            "name": "Docs",
            "status": "active",
            "is_team_shared_dropbox": false,
            "sync_setting": {".tag": "default"},
            "content_sync_settings": []
        });
        let out = v
            .validate_route("team/team_folder/archive/check", RoutePart::Result, &value)
            .expect("valid");
        assert_eq!(out[".tag"], "complete");
        assert_eq!(out["status"], json!({".tag": "active"}));
        assert_eq!(out["sync_setting"], json!({".tag": "default"}));
    }

    #[test]
    fn primitive_payload_sits_under_tag() {
        let r = registry();
        let mut v = Validator::new(&r);
        let launch = json!({".tag": "async_job_id", "async_job_id": "dbjid:1"});
        let out = v
            .validate_route("team/team_folder/archive", RoutePart::Result, &launch)
            .expect("valid");
        assert_eq!(out, launch);
    }

    #[test]
    fn inherited_error_tags_are_accepted() {
        let r = registry();
        let mut v = Validator::new(&r);
        let out = v
            .validate_route("paper/docs/update", RoutePart::Error, &json!("insufficient_permissions"))
            .expect("inherited from PaperApiBaseError");
        assert_eq!(out, json!({".tag": "insufficient_permissions"}));
    }

    #[test]
    fn list_errors_carry_index() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_type("team.TeamFolderIdListArg", &json!({"team_folder_ids": ["1", "bad id"]}))
            .expect_err("pattern mismatch");
        assert_eq!(err.path, "$.team_folder_ids[1]");
        assert!(matches!(err.kind, WireErrorKind::PatternMismatch { .. }));
    }

    #[test]
    fn list_bounds_are_checked() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_type("team.TeamFolderIdListArg", &json!({"team_folder_ids": []}))
            .expect_err("min_items = 1");
        assert_eq!(err.kind, WireErrorKind::Length { len: 0 });
    }

    #[test]
    fn integer_bounds_and_floats() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_type("team.TeamFolderListArg", &json!({"limit": 5000}))
            .expect_err("limit <= 1000");
        assert_eq!(err.path, "$.limit");
        assert!(matches!(err.kind, WireErrorKind::OutOfRange { max: 1000, .. }));

        let err = v
            .validate_type("team.TeamFolderListArg", &json!({"limit": 1.5}))
            .expect_err("floats are not integers");
        assert!(matches!(err.kind, WireErrorKind::TypeMismatch { found: "float", .. }));

        let out = v.validate_type("team.TeamFolderListArg", &json!({})).expect("default");
        assert_eq!(out, json!({"limit": 1000}));
    }

    #[test]
    fn timestamps_follow_declared_format() {
        let r = registry();
        let mut v = Validator::new(&r);
        let ok = json!({"deadline": "2026-03-01T12:00:00Z"});
        let out = v.validate_type("file_requests.FileRequestDeadline", &ok).expect("valid");
        assert_eq!(out["allow_late_uploads"], Value::Null);

        let err = v
            .validate_type("file_requests.FileRequestDeadline", &json!({"deadline": "March 1st"}))
            .expect_err("bad timestamp");
        assert_eq!(err.path, "$.deadline");
    }

    #[test]
    fn tag_default_is_written_as_object() {
        let r = registry();
        let mut v = Validator::new(&r);
        let out = v
            .validate_type("file_requests.UpdateFileRequestArgs", &json!({"id": "abc"}))
            .expect("valid");
        assert_eq!(out["deadline"], json!({".tag": "no_update"}));
        assert_eq!(out["title"], Value::Null);
    }

    #[test]
    fn nested_union_payload_path() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_route(
                "paper/docs/users/add",
                RoutePart::Arg,
                &json!({
                    "doc_id": "d1",
                    "members": [{"member": {".tag": "email", "email": "not an email"}}]
                }),
            )
            .expect_err("bad email");
        assert_eq!(err.path, "$.members[0].member.email");
    }

    #[test]
    fn void_route_arg_accepts_null_only() {
        let r = registry();
        let mut v = Validator::new(&r);
        assert_eq!(
            v.validate_route("file_requests/count", RoutePart::Arg, &Value::Null)
                .expect("void"),
            Value::Null
        );
        assert!(v.validate_route("file_requests/count", RoutePart::Arg, &json!({"x": 1})).is_err());
    }

    #[test]
    fn unknown_route_is_a_declaration_error() {
        let r = registry();
        let mut v = Validator::new(&r);
        let err = v
            .validate_route("team/nope", RoutePart::Arg, &Value::Null)
            .expect_err("unknown");
        assert!(matches!(err.kind, WireErrorKind::Declaration(DeclError::UnknownRoute(_))));
    }

    #[test]
    fn patterns_are_compiled_once() {
        let r = registry();
        let mut v = Validator::new(&r);
        for id in ["a", "b", "c"] {
            v.validate_type("team.TeamFolderIdArg", &json!({"team_folder_id": id}))
                .expect("valid");
        }
        let stats = v.pattern_stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn route_part_parsing() {
        assert_eq!("error".parse::<RoutePart>(), Ok(RoutePart::Error));
        assert!("body".parse::<RoutePart>().is_err());
        assert_eq!(RoutePart::Result.to_string(), "result");
    }
}
