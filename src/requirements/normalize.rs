//! Dependency name normalization.
//!
//! Splits every declared name into a base name and an optional extras suffix
//! and attaches the declared version. A declared name is valid when it has
//! the shape `pkg` or `pkg[extra1,extra2]`: any text without `[`, optionally
//! followed by one bracketed suffix that runs to the end of the name.

use super::{Dependency, DependencyMap};
use crate::core::{Category, ReqcompileError};
use crate::manifest::DependencyDeclaration;
use regex::Regex;
use std::sync::OnceLock;

/// Captures the base name and the optional `[...]` extras suffix.
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^\[]*)(\[.*\])?$").expect("dependency name pattern is a valid regex")
    })
}

/// Split a declared name into `(base, extras)`.
///
/// # Errors
///
/// [`ReqcompileError::InvalidDependencyName`] when the name does not match
/// `pkg` or `pkg[...]`, e.g. `a[b]c` or `a[`.
pub fn split_name(name: &str) -> Result<(&str, Option<&str>), ReqcompileError> {
    let captures =
        name_pattern().captures(name).ok_or_else(|| ReqcompileError::InvalidDependencyName {
            name: name.to_string(),
        })?;

    let base = captures.get(1).map_or("", |m| m.as_str());
    let extras = captures.get(2).map(|m| m.as_str());
    Ok((base, extras))
}

/// Normalize a category's declarations into a map keyed by base name.
///
/// Declarations are processed in order. When two declarations share a base
/// name the later one wins but the entry keeps the position of the first.
///
/// # Errors
///
/// - [`ReqcompileError::DirectUrl`] for a declaration carrying its own url
/// - [`ReqcompileError::InvalidDependencyName`] for a malformed name
pub fn normalize(
    declarations: &[DependencyDeclaration],
    category: Category,
) -> Result<DependencyMap, ReqcompileError> {
    let mut dependencies = DependencyMap::with_capacity(declarations.len());

    for declaration in declarations {
        if declaration.url().is_some() {
            return Err(ReqcompileError::DirectUrl {
                name: declaration.name().to_string(),
                via: category.registration_via().to_string(),
            });
        }

        let (base, extras) = split_name(declaration.name())?;
        let dependency = Dependency::new(
            base,
            extras.map(str::to_string),
            declaration.version().map(str::to_string),
        );

        if dependencies.insert(base.to_string(), dependency).is_some() {
            tracing::debug!("{category} dependency '{base}' declared more than once, keeping the last");
        }
    }

    Ok(dependencies)
}
