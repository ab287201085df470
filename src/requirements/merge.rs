//! Build and plugin dependency merging.

use super::base_name;
use crate::manifest::DependencyDeclaration;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Union of build dependencies and plugin dependencies.
///
/// All build dependencies come first, unchanged and in order. Plugin
/// dependencies follow in their own declaration order, skipping any whose
/// base name is already a build dependency. A build declaration therefore
/// shadows a plugin declaration of the same package, whatever its version.
/// Plugin declarations sharing a base name collapse to the last one.
///
/// # Examples
///
/// ```rust
/// use reqcompile::manifest::DependencyDeclaration;
/// use reqcompile::requirements::merge_build_dependencies;
///
/// let build = vec![DependencyDeclaration::new("pytest", None)];
/// let plugins = vec![
///     DependencyDeclaration::new("pytest", Some(">=7")),
///     DependencyDeclaration::new("pip-tools", Some(">=1.7.0")),
/// ];
///
/// let merged = merge_build_dependencies(&build, &plugins);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].version(), None);
/// assert_eq!(merged[1].name(), "pip-tools");
/// ```
#[must_use]
pub fn merge_build_dependencies(
    build: &[DependencyDeclaration],
    plugins: &[DependencyDeclaration],
) -> Vec<DependencyDeclaration> {
    let declared: HashSet<&str> = build.iter().map(|d| base_name(d.name())).collect();

    let mut extra: IndexMap<&str, &DependencyDeclaration> = IndexMap::new();
    for plugin in plugins {
        let name = base_name(plugin.name());
        if declared.contains(name) {
            tracing::debug!("Plugin dependency '{name}' shadowed by build dependency");
            continue;
        }
        extra.insert(name, plugin);
    }

    build.iter().cloned().chain(extra.into_values().cloned()).collect()
}
