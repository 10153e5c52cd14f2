//! # Typed Models
//!
//! Hand-written serde bindings for the principal entities of each namespace.
//!
//! The bindings follow the wire conventions of [`crate::wire`]: unions are
//! internally tagged on `.tag`, open unions deserialize unknown tags into an
//! `Other` variant, nullable fields serialize as explicit `null`. A value
//! serialized from these types validates against the matching declaration
//! and comes back from [`crate::Validator`] unchanged.
//!
//! [`Endpoint`] ties a binding to the route it belongs to, [`Paginated`]
//! exposes the cursor/`has_more` pair of list results.

/// Declares a marker type implementing [`Endpoint`] for a route of the
/// calling module's `NAMESPACE`.
macro_rules! endpoint {
    ($(#[$doc:meta])* $name:ident, $route:literal, $arg:ty, $result:ty, $error:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl Endpoint for $name {
            const NAMESPACE: &'static str = NAMESPACE;
            const ROUTE: &'static str = $route;
            type Arg = $arg;
            type Result = $result;
            type Error = $error;
        }
    };
}

pub mod async_job;
pub mod file_requests;
pub mod paper;
pub mod team_folders;

use serde::Serialize;
use serde::de::DeserializeOwned;

// =============================================================================
// TRAITS
// =============================================================================

/// A declared route with typed arg, result and error.
pub trait Endpoint {
    /// Namespace that declares the route.
    const NAMESPACE: &'static str;
    /// Route key inside the namespace, `name` or `name:version`.
    const ROUTE: &'static str;

    type Arg: Serialize + DeserializeOwned;
    type Result: Serialize + DeserializeOwned;
    type Error: Serialize + DeserializeOwned;

    /// Registry path of the route, `ns/name[:version]`.
    fn path() -> String {
        format!("{}/{}", Self::NAMESPACE, Self::ROUTE)
    }
}

/// A page of a cursor-paginated listing.
pub trait Paginated {
    type Item;

    fn items(&self) -> &[Self::Item];

    /// Opaque token for the matching `.../continue` route.
    fn cursor(&self) -> &str;

    fn has_more(&self) -> bool;
}

/// Marker for the void arg of routes that take none. Serializes as `null`.
pub type NoArg = ();

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Serde adapter for `Timestamp("%Y-%m-%dT%H:%M:%SZ")` fields.
pub mod timestamp {
    use crate::types::DEFAULT_TIMESTAMP_FORMAT;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(DEFAULT_TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }

    pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(text, DEFAULT_TIMESTAMP_FORMAT).map(|n| n.and_utc())
    }

    /// The same adapter for nullable timestamps.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| super::parse(&text).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

#[cfg(test)]
pub(crate) mod conformance {
    use super::Endpoint;
    use crate::decls::standard_registry;
    use crate::wire::{RoutePart, Validator};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use std::fmt::Debug;

    /// Serialize `value`, validate it as `part` of `E`, and check that the
    /// normalized form equals the serialized form and deserializes back.
    #[allow(clippy::panic)]
    pub(crate) fn assert_conforms<E, T>(part: RoutePart, value: &T)
    where
        E: Endpoint,
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        let registry = standard_registry().expect("declarations build");
        let mut validator = Validator::new(&registry);
        let json = serde_json::to_value(value).expect("serializes");
        let normalized = validator
            .validate_route(&E::path(), part, &json)
            .unwrap_or_else(|e| panic!("{} {}: {}\n{}", E::path(), part, e, json));
        assert_eq!(normalized, json, "{} {} normalizes differently", E::path(), part);
        let back: T = serde_json::from_value(normalized).expect("deserializes");
        assert_eq!(&back, value);
    }
}
