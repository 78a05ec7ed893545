//! Service resolver
//!
//! Turns a free-text services field ("Google Calendar | WhatsApp, email")
//! into an ordered, duplicate-free, dependency-closed set of `ServiceId`s.

use crate::config::nearest;
use crate::domain::services::catalog::ServiceCatalog;
use crate::domain::value_objects::ServiceId;
use crate::error::GenerationError;

/// Longest implicit-dependency chain accepted during expansion
pub const MAX_DEPENDENCY_DEPTH: usize = 4;

/// Ordered, duplicate-free set of services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedServiceSet(Vec<ServiceId>);

impl ResolvedServiceSet {
    pub fn as_slice(&self) -> &[ServiceId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, id: ServiceId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_unique(&mut self, id: ServiceId) -> bool {
        if self.0.contains(&id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Canonical names joined with ` | `
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(ServiceId::as_str)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl IntoIterator for ResolvedServiceSet {
    type Item = ServiceId;
    type IntoIter = std::vec::IntoIter<ServiceId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Split a services field into trimmed, non-empty tokens
pub fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split(['|', ',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Normalise a token: lower-case, `/ & - _` to spaces, collapse whitespace
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .replace(['/', '&', '-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map one token to a service
///
/// Exact synonym match first. Otherwise every synonym contained in the
/// normalised token is collected; they must all name the same service, or
/// the token is ambiguous.
pub fn resolve_token(token: &str, catalog: &ServiceCatalog) -> Result<ServiceId, GenerationError> {
    let normalized = normalize_token(token);

    if let Some(id) = exact(&normalized, catalog) {
        return Ok(id);
    }

    let mut candidates: Vec<ServiceId> = Vec::new();
    for (syn, id) in catalog.synonyms() {
        if normalized.contains(*syn) && !candidates.contains(id) {
            candidates.push(*id);
        }
    }
    match candidates.len() {
        0 => Err(GenerationError::UnknownService {
            token: token.to_string(),
            suggestion: suggest(&normalized, catalog),
        }),
        1 => {
            let id = candidates[0];
            tracing::debug!(token, service = %id, "resolved by substring");
            Ok(id)
        }
        _ => Err(GenerationError::AmbiguousService {
            token: token.to_string(),
            candidates,
        }),
    }
}

fn exact(normalized: &str, catalog: &ServiceCatalog) -> Option<ServiceId> {
    catalog
        .synonyms()
        .iter()
        .find(|(syn, _)| *syn == normalized)
        .map(|(_, id)| *id)
}

fn suggest(normalized: &str, catalog: &ServiceCatalog) -> Option<String> {
    let names: Vec<&str> = catalog.synonyms().iter().map(|(syn, _)| *syn).collect();
    nearest(normalized, &names, 2).map(str::to_string)
}

/// Split a token on `&`, `/` and the word "and"
///
/// Parts whose rejoined form is a synonym ("notes and lists") stay together.
fn split_conjunctions(token: &str, catalog: &ServiceCatalog) -> Vec<String> {
    let joined = normalize_token(&token.replace(['&', '/'], " and "));
    let mut parts: Vec<String> = Vec::new();
    for part in joined.split(" and ").map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(last) = parts.last_mut() {
            let merged = format!("{} and {}", last, part);
            if exact(&merged, catalog).is_some() {
                *last = merged;
                continue;
            }
        }
        parts.push(part.to_string());
    }
    parts
}

/// Resolve one field token, which may name several services
fn resolve_compound(token: &str, catalog: &ServiceCatalog) -> Result<Vec<ServiceId>, GenerationError> {
    if let Some(id) = exact(&normalize_token(token), catalog) {
        return Ok(vec![id]);
    }
    let parts = split_conjunctions(token, catalog);
    if parts.len() <= 1 {
        return resolve_token(token, catalog).map(|id| vec![id]);
    }
    parts
        .iter()
        .map(|part| resolve_token(part, catalog))
        .collect()
}

/// Resolve a free-text services field
pub fn resolve(raw: &str, catalog: &ServiceCatalog) -> Result<ResolvedServiceSet, GenerationError> {
    let mut set = ResolvedServiceSet::default();
    for token in split_tokens(raw) {
        for id in resolve_compound(token, catalog)? {
            set.push_unique(id);
        }
    }
    expand_dependencies(set, catalog)
}

/// Append implicit dependencies after the explicit services
///
/// Walks the growing sequence once, so dependencies of dependencies are
/// expanded too. Each appended service records the depth of the chain that
/// introduced it; exceeding `MAX_DEPENDENCY_DEPTH` is an error.
pub fn expand_dependencies(
    set: ResolvedServiceSet,
    catalog: &ServiceCatalog,
) -> Result<ResolvedServiceSet, GenerationError> {
    let mut set = set;
    let mut depths: Vec<usize> = vec![0; set.len()];
    let mut i = 0;
    while i < set.len() {
        let id = set.0[i];
        let depth = depths[i];
        for dep in catalog.spec(id).requires {
            if set.contains(*dep) {
                continue;
            }
            if depth + 1 > MAX_DEPENDENCY_DEPTH {
                return Err(GenerationError::DependencyTooDeep {
                    service: *dep,
                    limit: MAX_DEPENDENCY_DEPTH,
                });
            }
            set.push_unique(*dep);
            depths.push(depth + 1);
        }
        i += 1;
    }
    Ok(set)
}
