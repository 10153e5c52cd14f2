//! # Route Module
//!
//! Route declarations: a request type, a success type and an error type,
//! plus informative attributes (auth, host, style, scope).
//!
//! Attributes are carried as data only. Nothing in this crate enforces them.

use crate::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum AuthMode {
    #[default]
    User,
    Team,
    App,
    NoAuth,
}

/// Which host serves a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Host {
    #[default]
    Api,
    Content,
    Notify,
}

/// How the request and response bodies travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RouteStyle {
    /// Arguments and result in the body.
    #[default]
    Rpc,
    /// Arguments in a header, raw content in the body.
    Upload,
    /// Arguments in a header, raw content in the response body.
    Download,
}

macro_rules! attr_display {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match self {
                    $(Self::$variant => $text,)+
                };
                f.write_str(text)
            }
        }
    };
}

attr_display!(AuthMode { User => "user", Team => "team", App => "app", NoAuth => "noauth" });
attr_display!(Host { Api => "api", Content => "content", Notify => "notify" });
attr_display!(RouteStyle { Rpc => "rpc", Upload => "upload", Download => "download" });

/// Informative route attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteAttrs {
    pub auth: AuthMode,
    pub host: Host,
    pub style: RouteStyle,
    /// Permission scope required by the caller.
    pub scope: Option<String>,
    /// Team or product area owning the route.
    pub owner: Option<String>,
    /// Admin mode required for team-authenticated routes.
    pub select_admin_mode: Option<String>,
    pub is_preview: bool,
}

/// Deprecation marker. `by` names the replacing route, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    pub by: Option<String>,
}

/// A declared remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Slash-separated name, e.g. `team_folder/list/continue`.
    pub name: String,
    pub version: u32,
    pub doc: String,
    pub arg: DataType,
    pub result: DataType,
    pub error: DataType,
    pub attrs: RouteAttrs,
    pub deprecated: Option<Deprecation>,
}

impl Route {
    /// A version 1 RPC route with default attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, arg: DataType, result: DataType, error: DataType) -> Self {
        Self {
            name: name.into(),
            version: 1,
            doc: String::new(),
            arg,
            result,
            error,
            attrs: RouteAttrs::default(),
            deprecated: None,
        }
    }

    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.version = version.max(1);
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.attrs.auth = auth;
        self
    }

    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.attrs.host = host;
        self
    }

    #[must_use]
    pub fn style(mut self, style: RouteStyle) -> Self {
        self.attrs.style = style;
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.attrs.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.attrs.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn admin_mode(mut self, mode: impl Into<String>) -> Self {
        self.attrs.select_admin_mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn preview(mut self) -> Self {
        self.attrs.is_preview = true;
        self
    }

    #[must_use]
    pub fn deprecated_by(mut self, by: Option<&str>) -> Self {
        self.deprecated = Some(Deprecation {
            by: by.map(str::to_string),
        });
        self
    }

    /// Route key inside its namespace: `name` or `name:version`.
    #[must_use]
    pub fn id(&self) -> String {
        route_key(&self.name, self.version)
    }

    /// HTTP path the route is published under.
    #[must_use]
    pub fn endpoint_path(&self, namespace: &str) -> String {
        if self.version > 1 {
            format!("/2/{}/{}_v{}", namespace, self.name, self.version)
        } else {
            format!("/2/{}/{}", namespace, self.name)
        }
    }

    /// `X/continue` routes resume a listing started by `X`.
    #[must_use]
    pub fn continuation_of(&self) -> Option<&str> {
        self.name.strip_suffix("/continue")
    }

    /// `X/check` routes poll a job launched by `X`.
    #[must_use]
    pub fn poll_of(&self) -> Option<&str> {
        self.name.strip_suffix("/check")
    }

    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }
}

/// Build the namespace-local key of a route.
#[must_use]
pub fn route_key(name: &str, version: u32) -> String {
    if version > 1 {
        format!("{}:{}", name, version)
    } else {
        name.to_string()
    }
}

/// Split `name[:version]` into its parts. A missing or malformed version is 1.
#[must_use]
pub fn split_route_key(key: &str) -> (&str, u32) {
    match key.rsplit_once(':') {
        Some((name, v)) => match v.parse::<u32>() {
            Ok(version) => (name, version.max(1)),
            Err(_) => (key, 1),
        },
        None => (key, 1),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn list_route() -> Route {
        Route::new(
            "list",
            DataType::named("ListFileRequestsArg"),
            DataType::named("ListFileRequestsV2Result"),
            DataType::named("ListFileRequestsError"),
        )
    }

    #[test]
    fn versioned_route_id_and_path() {
        let v2 = list_route().version(2);
        assert_eq!(v2.id(), "list:2");
        assert_eq!(v2.endpoint_path("file_requests"), "/2/file_requests/list_v2");

        let v1 = list_route();
        assert_eq!(v1.id(), "list");
        assert_eq!(v1.endpoint_path("file_requests"), "/2/file_requests/list");
    }

    #[test]
    fn version_zero_is_clamped() {
        assert_eq!(list_route().version(0).version, 1);
    }

    #[test]
    fn continuation_and_poll_names() {
        let cont = Route::new(
            "team_folder/list/continue",
            DataType::Void,
            DataType::Void,
            DataType::Void,
        );
        assert_eq!(cont.continuation_of(), Some("team_folder/list"));
        assert_eq!(cont.poll_of(), None);

        let poll = Route::new(
            "team_folder/archive/check",
            DataType::Void,
            DataType::Void,
            DataType::Void,
        );
        assert_eq!(poll.poll_of(), Some("team_folder/archive"));
    }

    #[test]
    fn route_key_roundtrip() {
        assert_eq!(split_route_key("docs/list"), ("docs/list", 1));
        assert_eq!(split_route_key("list:2"), ("list", 2));
        assert_eq!(split_route_key("odd:name"), ("odd:name", 1));
        assert_eq!(route_key("list", 2), "list:2");
    }

    #[test]
    fn attribute_display() {
        assert_eq!(AuthMode::Team.to_string(), "team");
        assert_eq!(RouteStyle::Download.to_string(), "download");
        assert_eq!(Host::Content.to_string(), "content");
    }
}
