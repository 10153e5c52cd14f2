//! # CLI Module
//!
//! Command line interface for apidecl.
//!
//! Each subcommand maps to a `cmd_*` function that takes the loaded registry
//! and returns the text to print on stdout. `main.rs` owns printing, logging
//! setup and the exit code.

use crate::config::Settings;
use apidecl_core::formats::{
    BUNDLE_MAGIC, FormatError, decode_bundle, encode_bundle, registry_from_json, registry_to_json,
    snapshot,
};
use apidecl_core::render::{render_namespace, render_registry, render_route, render_type};
use apidecl_core::wire::RoutePart;
use apidecl_core::{DeclError, Registry, TypeRef, Validator, WireError, run_checks};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "apidecl",
    version,
    about = "Inspect, check and export the declared team folder, file request and Paper API surface"
)]
pub struct Cli {
    /// Load the registry from a canonical bundle instead of the built-in declarations
    #[arg(long, global = true)]
    pub bundle: Option<PathBuf>,

    /// Log filter (e.g. "info", "apidecl=debug"); falls back to APIDECL_LOG, then "warn"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List declared namespaces
    Namespaces {
        #[arg(long)]
        json: bool,
    },

    /// List routes, optionally for one namespace
    Routes {
        #[arg(long)]
        namespace: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Show a namespace (`ns`), a type (`ns.Type`) or a route (`ns/route[:v]`)
    Show {
        target: String,
        #[arg(long)]
        json: bool,
    },

    /// Run the structural checks
    Check {
        #[arg(long)]
        json: bool,
        /// Fail on warnings too
        #[arg(long)]
        strict: bool,
    },

    /// Write the registry to a file
    Export {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Canonical)]
        format: ExportFormat,
        /// Export a single namespace
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Verify a canonical bundle (or JSON export) and re-run the checks on it
    Import {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// Validate a JSON payload against a route's arg, result or error type
    Validate {
        /// Route path, `ns/route[:v]`
        #[arg(long)]
        route: String,
        #[arg(long, default_value = "arg")]
        part: RoutePart,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },

    /// List the types a type depends on
    Deps {
        /// Qualified type name, `ns.Type`
        type_path: String,
        #[arg(long, default_value_t = 3)]
        depth: usize,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty JSON of the declarations
    Json,
    /// Checksummed binary bundle, loadable with --bundle
    Canonical,
    /// IDL text
    Stone,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Canonical => write!(f, "canonical"),
            Self::Stone => write!(f, "stone"),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Declaration(#[from] DeclError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("invalid payload at {0}")]
    Wire(#[from] WireError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// The checks ran; `report` holds their rendered output.
    #[error("checks failed: {errors} error(s), {warnings} warning(s)")]
    CheckFailed {
        errors: usize,
        warnings: usize,
        report: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the parsed command and return what it prints.
pub fn run(cli: &Cli, settings: &Settings) -> Result<String, CliError> {
    if let Commands::Import { input, json } = &cli.command {
        return cmd_import(input, *json);
    }

    let registry = settings.load_registry()?;
    debug!(
        namespaces = registry.namespaces().count(),
        types = registry.type_count(),
        routes = registry.route_count(),
        "registry loaded"
    );

    match &cli.command {
        Commands::Namespaces { json } => cmd_namespaces(&registry, *json),
        Commands::Routes { namespace, json } => cmd_routes(&registry, namespace.as_deref(), *json),
        Commands::Show { target, json } => cmd_show(&registry, target, *json),
        Commands::Check { json, strict } => cmd_check(&registry, *json, *strict),
        Commands::Export {
            output,
            format,
            namespace,
        } => cmd_export(&registry, output, *format, namespace.as_deref()),
        Commands::Validate {
            route,
            part,
            input,
            json,
        } => cmd_validate(&registry, route, *part, input, *json),
        Commands::Deps {
            type_path,
            depth,
            json,
        } => cmd_deps(&registry, type_path, *depth, *json),
        Commands::Import { input, json } => cmd_import(input, *json),
    }
}

// =============================================================================
// INSPECTION
// =============================================================================

pub fn cmd_namespaces(registry: &Registry, json: bool) -> Result<String, CliError> {
    if json {
        let items: Vec<Value> = registry
            .namespaces()
            .map(|ns| {
                json!({
                    "name": ns.name,
                    "doc": ns.doc,
                    "types": ns.type_count(),
                    "routes": ns.route_count(),
                })
            })
            .collect();
        return pretty(&Value::Array(items));
    }

    let mut out = String::new();
    for ns in registry.namespaces() {
        out.push_str(&format!(
            "{:<16} {:>3} types {:>3} routes\n",
            ns.name,
            ns.type_count(),
            ns.route_count()
        ));
    }
    Ok(out)
}

pub fn cmd_routes(registry: &Registry, namespace: Option<&str>, json: bool) -> Result<String, CliError> {
    if let Some(name) = namespace {
        if registry.namespace(name).is_none() {
            return Err(DeclError::UnknownNamespace(name.to_string()).into());
        }
    }
    let routes: Vec<_> = registry
        .routes()
        .filter(|(ns, _)| namespace.is_none_or(|n| ns.name == n))
        .collect();

    if json {
        let items: Vec<Value> = routes
            .iter()
            .map(|(ns, route)| {
                json!({
                    "namespace": ns.name,
                    "route": route.id(),
                    "path": route.endpoint_path(&ns.name),
                    "arg": route.arg.to_string(),
                    "result": route.result.to_string(),
                    "error": route.error.to_string(),
                    "auth": route.attrs.auth.to_string(),
                    "deprecated": route.is_deprecated(),
                })
            })
            .collect();
        return pretty(&Value::Array(items));
    }

    let mut out = String::new();
    for (ns, route) in routes {
        let key = format!("{}/{}", ns.name, route.id());
        out.push_str(&format!("{:<48} {}", key, route.endpoint_path(&ns.name)));
        if route.is_deprecated() {
            out.push_str("  (deprecated)");
        }
        out.push('\n');
    }
    Ok(out)
}

pub fn cmd_show(registry: &Registry, target: &str, json: bool) -> Result<String, CliError> {
    if target.contains('/') {
        let (ns, route) = registry.route(target)?;
        debug!(namespace = %ns.name, route = %route.id(), "showing route");
        return if json {
            pretty(&serde_json::to_value(route)?)
        } else {
            Ok(render_route(route))
        };
    }

    if target.contains('.') {
        let scoped = registry.resolve_path(target)?;
        return if json {
            pretty(&serde_json::to_value(scoped.item)?)
        } else {
            Ok(render_type(scoped.item))
        };
    }

    let ns = registry
        .namespace(target)
        .ok_or_else(|| DeclError::UnknownNamespace(target.to_string()))?;
    if json {
        pretty(&serde_json::to_value(ns)?)
    } else {
        Ok(render_namespace(ns))
    }
}

pub fn cmd_deps(registry: &Registry, type_path: &str, depth: usize, json: bool) -> Result<String, CliError> {
    let reference = TypeRef::parse(type_path);
    if reference.namespace.is_none() {
        return Err(CliError::InvalidArgument(format!(
            "'{}' is not qualified, expected ns.Type",
            type_path
        )));
    }
    let deps = registry.dependencies("", &reference, depth)?;
    let names: Vec<String> = deps.iter().map(ToString::to_string).collect();
    if json {
        return pretty(&json!({ "type": type_path, "depth": depth, "dependencies": names }));
    }
    let mut out = String::new();
    for name in names {
        out.push_str(&name);
        out.push('\n');
    }
    Ok(out)
}

// =============================================================================
// CHECKS
// =============================================================================

pub fn cmd_check(registry: &Registry, json: bool, strict: bool) -> Result<String, CliError> {
    let report = run_checks(registry);
    let errors = report.errors().count();
    let warnings = report.warnings().count();
    info!(errors, warnings, strict, "checks complete");

    let text = if json {
        pretty(&serde_json::to_value(&report)?)?
    } else {
        report.to_text()
    };

    if report.passes(strict) {
        Ok(text)
    } else {
        Err(CliError::CheckFailed {
            errors,
            warnings,
            report: text,
        })
    }
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

pub fn cmd_export(
    registry: &Registry,
    output: &Path,
    format: ExportFormat,
    namespace: Option<&str>,
) -> Result<String, CliError> {
    let sr = snapshot(registry, namespace)?;
    let bytes = match format {
        ExportFormat::Canonical => encode_bundle(&sr)?,
        ExportFormat::Json => registry_to_json(&sr)?.into_bytes(),
        ExportFormat::Stone => match namespace.and_then(|name| registry.namespace(name)) {
            Some(ns) => render_namespace(ns).into_bytes(),
            None => render_registry(registry).into_bytes(),
        },
    };
    if namespace.is_some() && format != ExportFormat::Stone {
        warn!("single-namespace export may reference types it does not contain");
    }

    std::fs::write(output, &bytes)?;
    info!(path = %output.display(), %format, bytes = bytes.len(), "export written");
    Ok(format!(
        "wrote {} bytes ({}) to {}\n",
        bytes.len(),
        format,
        output.display()
    ))
}

/// Read a canonical bundle, or a JSON export when the magic is absent, then
/// re-run the checks on what was loaded.
pub fn cmd_import(input: &Path, json: bool) -> Result<String, CliError> {
    let bytes = std::fs::read(input)?;
    let registry = if bytes.starts_with(&BUNDLE_MAGIC) {
        debug!("input is a canonical bundle");
        decode_bundle(&bytes)?
    } else {
        debug!("input is not a bundle, reading as JSON");
        let text = String::from_utf8(bytes)
            .map_err(|_| CliError::InvalidArgument(format!("{} is neither a bundle nor UTF-8 JSON", input.display())))?;
        registry_from_json(&text)?
    };

    let report = run_checks(&registry);
    let namespaces = registry.namespaces().count();
    info!(namespaces, types = registry.type_count(), routes = registry.route_count(), "import verified");

    let text = if json {
        pretty(&json!({
            "namespaces": namespaces,
            "types": registry.type_count(),
            "routes": registry.route_count(),
            "report": report,
        }))?
    } else {
        format!(
            "verified {}: {} namespace(s), {} type(s), {} route(s)\n{}",
            input.display(),
            namespaces,
            registry.type_count(),
            registry.route_count(),
            report.to_text()
        )
    };

    if report.is_clean() {
        Ok(text)
    } else {
        Err(CliError::CheckFailed {
            errors: report.errors().count(),
            warnings: report.warnings().count(),
            report: text,
        })
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

pub fn cmd_validate(
    registry: &Registry,
    route: &str,
    part: RoutePart,
    input: &Path,
    json: bool,
) -> Result<String, CliError> {
    let text = std::fs::read_to_string(input)?;
    let value: Value = serde_json::from_str(&text)?;

    let mut validator = Validator::new(registry);
    let normalized = validator.validate_route(route, part, &value)?;
    info!(route, %part, "payload valid");

    if json {
        let mut out = serde_json::to_string(&normalized)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(format!("valid {} for {}\n{}", part, route, pretty(&normalized)?))
    }
}

fn pretty(value: &Value) -> Result<String, CliError> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
