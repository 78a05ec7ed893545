//! Porting block assembler
//!
//! Produces one self-contained `PortingFragment` per resolved service. The
//! shape of each injected variable and the call expression come from the
//! service's `PortingConvention`; there is no per-service branching here.

use serde_json::Value;

use crate::domain::entities::{PayloadSet, Row};
use crate::domain::services::catalog::ServiceCatalog;
use crate::domain::services::python_literal::{python_str, to_python_literal};
use crate::domain::value_objects::{Injection, InjectionShape, ServiceId};
use crate::error::GenerationError;

/// Cell text that stands for "no data" in tracker exports
const EMPTY_SENTINELS: [&str; 3] = ["nan", "none", "null"];

/// Generated code for one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortingFragment {
    pub service: ServiceId,
    /// API package imported for this service
    pub package: &'static str,
    /// Statement loading the service's default dataset
    pub default_load: String,
    /// Import lines the service needs beyond its package
    pub aux_imports: &'static [&'static str],
    /// Injected variable assignments (with a comment line each)
    pub injections: Vec<String>,
    /// Opaque porting body, escaped when the artifact is rendered
    pub body: String,
    /// Alias lines emitted after the body
    pub pre_call: &'static [&'static str],
    /// Literal call expression
    pub call: &'static str,
}

/// Strictly parse an initial-db field
///
/// Blank text and the sentinels `nan`/`none`/`null` mean an empty object.
pub fn parse_initial_db(field: &str, raw: Option<&str>) -> Result<Value, GenerationError> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() || EMPTY_SENTINELS.contains(&text.to_lowercase().as_str()) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(text).map_err(|e| GenerationError::MalformedJson {
        field: field.to_string(),
        detail: e.to_string(),
    })
}

/// Canonical JSON text of a parsed value (compact, key order preserved)
pub fn canonical_json(value: &Value) -> String {
    value.to_string()
}

fn injection_lines(injection: &Injection, value: &Value) -> [String; 2] {
    match injection.shape {
        InjectionShape::Native => [
            format!("# {} from {} (dict)", injection.variable, injection.field),
            format!("{} = {}", injection.variable, to_python_literal(value)),
        ],
        InjectionShape::JsonText => [
            format!("# {} from {} (JSON string)", injection.variable, injection.field),
            format!(
                "{} = {}",
                injection.variable,
                python_str(&canonical_json(value))
            ),
        ],
    }
}

/// Assemble the porting fragment for one service
pub fn assemble(
    service: ServiceId,
    row: &Row,
    catalog: &ServiceCatalog,
    payloads: &PayloadSet,
) -> Result<PortingFragment, GenerationError> {
    let spec = catalog.spec(service);
    let convention = &spec.convention;

    let mut injections = Vec::with_capacity(convention.injections.len() * 2);
    for injection in convention.injections {
        let value = parse_initial_db(injection.field, row.get(injection.field))?;
        injections.extend(injection_lines(injection, &value));
    }

    let body = payloads
        .porting_body(service)
        .ok_or(GenerationError::MissingPayload { service })?
        .to_string();

    Ok(PortingFragment {
        service,
        package: spec.package,
        default_load: spec.default_load_statement(),
        aux_imports: convention.aux_imports,
        injections,
        body,
        pre_call: convention.pre_call,
        call: convention.call,
    })
}
