//! Identifier derivation shared by the synthesizer and both emitters.
//!
//! Every generated name (component, API function, controller method, domain
//! module) comes from here so that the front-end and back-end trees agree on
//! spelling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FerryError;

/// Fallback identifier for inputs with no alphanumeric content.
const EMPTY_NAME: &str = "Page";

/// Split on every non-alphanumeric character, dropping empty segments.
fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// PascalCase identifier for a path stem.
///
/// `applicant-info` → `ApplicantInfo`, `lease_review` → `LeaseReview`.
/// Only the first character of each segment changes case. Total: the result
/// is always a valid identifier (`Page` when nothing survives, `Page`-prefixed
/// when the first character is a digit).
pub fn pascal_case(raw: &str) -> String {
    let joined: String = segments(raw).map(capitalize).collect();
    if joined.is_empty() {
        EMPTY_NAME.to_string()
    } else if joined.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", EMPTY_NAME, joined)
    } else {
        joined
    }
}

/// camelCase identifier: [`pascal_case`] with a lowercase first character.
pub fn camel_case(raw: &str) -> String {
    let pascal = pascal_case(raw);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// Remove a trailing handler extension (`/applicant-info.do` → `/applicant-info`).
///
/// Only a suffix at the very end is removed; an empty suffix is a no-op.
pub fn strip_handler_suffix<'a>(path: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return path;
    }
    path.strip_suffix(suffix).unwrap_or(path)
}

/// Component name for a view template path: PascalCase of the file stem.
pub fn component_name_for_view(path: &str) -> String {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(0) | None => file,
        Some(idx) => &file[..idx],
    };
    pascal_case(stem)
}

/// Component name for an action path, after the handler extension is removed.
pub fn component_name_for_action(path: &str, suffix: &str) -> String {
    pascal_case(strip_handler_suffix(path, suffix))
}

// ── Collision handling ──────────────────────────────────────────────────────

/// What to do when two distinct sources derive the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append a stable numeric suffix (`Welcome2`) to later sources.
    #[default]
    Suffix,
    /// Fail with [`FerryError::NameCollision`].
    Reject,
}

/// Result of one [`NameAllocator::allocate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub name: String,
    /// Source that already owned the requested name, when a suffix was applied.
    pub collided_with: Option<String>,
}

/// Hands out unique identifiers in call order.
///
/// Callers feed sources in a deterministic order (sorted by path), so the
/// suffixes are stable across runs.
#[derive(Debug)]
pub struct NameAllocator {
    policy: CollisionPolicy,
    owners: HashMap<String, String>,
}

impl NameAllocator {
    pub fn new(policy: CollisionPolicy) -> Self {
        NameAllocator {
            policy,
            owners: HashMap::new(),
        }
    }

    /// Reserve `name` for `source`. Asking again for the same source returns
    /// the same name.
    pub fn allocate(&mut self, name: &str, source: &str) -> Result<Allocation, FerryError> {
        if self.policy == CollisionPolicy::Reject {
            if let Some(owner) = self.owners.get(name).filter(|owner| *owner != source) {
                return Err(FerryError::NameCollision {
                    name: name.to_string(),
                    sources: vec![owner.clone(), source.to_string()],
                });
            }
        }
        Ok(self.allocate_suffixed(name, source))
    }

    /// Reserve `name` for `source`, appending `2`, `3`, ... on collision
    /// regardless of the configured policy.
    pub fn allocate_suffixed(&mut self, name: &str, source: &str) -> Allocation {
        let owner = match self.owners.get(name) {
            None => {
                self.owners.insert(name.to_string(), source.to_string());
                return Allocation {
                    name: name.to_string(),
                    collided_with: None,
                };
            }
            Some(owner) if owner == source => {
                return Allocation {
                    name: name.to_string(),
                    collided_with: None,
                };
            }
            Some(owner) => owner.clone(),
        };

        let mut n = 2;
        let candidate = loop {
            let candidate = format!("{}{}", name, n);
            if !self.owners.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.owners.insert(candidate.clone(), source.to_string());
        Allocation {
            name: candidate,
            collided_with: Some(owner),
        }
    }
}
