//! Override url resolution.
//!
//! An override url replaces the release of one declared dependency with a
//! source location, e.g. a git checkout. The dependency it replaces is named
//! by the `egg` parameter of the url fragment, `#egg=<name>-<version>`:
//!
//! ```text
//! git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0
//! -e file:///home/me/src/my-pkg#egg=my-pkg-1.0
//! ```
//!
//! The name is everything before the last `-` of the egg value, so names may
//! themselves contain dashes. The version part is required but otherwise
//! unchecked; pip ignores it.

use super::DependencyMap;
use crate::constants::EDITABLE_PREFIX;
use crate::core::{Category, ReqcompileError};
use url::Url;

/// A validated override url and the package it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideUrl {
    url: String,
    name: String,
    egg_version: String,
}

impl OverrideUrl {
    /// Parse a raw override url.
    ///
    /// Surrounding whitespace and a leading `-e` are removed first; the
    /// remainder is what gets stored and what errors quote.
    ///
    /// # Errors
    ///
    /// - [`ReqcompileError::UrlMissingScheme`] if the url has no `scheme://` part
    /// - [`ReqcompileError::UrlMissingEgg`] if the fragment has no non-empty `egg`
    /// - [`ReqcompileError::EggMissingVersion`] if the egg value has no `-`
    pub fn parse(raw: &str) -> Result<Self, ReqcompileError> {
        let url = strip_editable(raw);

        let fragment = match Url::parse(url) {
            Ok(parsed) => parsed.fragment().map(str::to_string),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(ReqcompileError::UrlMissingScheme {
                    url: url.to_string(),
                });
            }
            // Has a scheme but is otherwise malformed (bad host, bad port...).
            // pip decides what to do with it; only the fragment matters here.
            Err(e) => {
                tracing::debug!("Override url '{url}' is not a well-formed url: {e}");
                url.split_once('#').map(|(_, fragment)| fragment.to_string())
            }
        };

        let egg = fragment.as_deref().and_then(egg_parameter).ok_or_else(|| {
            ReqcompileError::UrlMissingEgg {
                url: url.to_string(),
            }
        })?;

        let (name, egg_version) =
            egg.rsplit_once('-').ok_or_else(|| ReqcompileError::EggMissingVersion {
                url: url.to_string(),
            })?;

        Ok(Self {
            url: url.to_string(),
            name: name.to_string(),
            egg_version: egg_version.to_string(),
        })
    }

    /// The url without whitespace or `-e` prefix.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the dependency this url overrides.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version part of the egg parameter.
    #[must_use]
    pub fn egg_version(&self) -> &str {
        &self.egg_version
    }
}

/// Trim and drop a leading `-e` marker.
fn strip_editable(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix(EDITABLE_PREFIX).map_or(trimmed, str::trim)
}

/// First non-empty `egg` value of a url fragment, percent-decoded.
fn egg_parameter(fragment: &str) -> Option<String> {
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, value)| key == "egg" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Apply a category's override urls to its normalized dependencies.
///
/// Urls are processed in order; when several urls target the same dependency
/// the last one wins. The stored url is the cleaned url followed by the
/// dependency's extras and version.
///
/// # Errors
///
/// Any [`OverrideUrl::parse`] error, or
/// [`ReqcompileError::UnregisteredOverride`] when the egg name is not a
/// dependency of `category`. The first failing url aborts resolution.
pub fn apply_overrides(
    mut dependencies: DependencyMap,
    urls: &[String],
    category: Category,
) -> Result<DependencyMap, ReqcompileError> {
    for raw in urls {
        let target = OverrideUrl::parse(raw)?;

        let Some(dependency) = dependencies.get_mut(target.name()) else {
            return Err(ReqcompileError::UnregisteredOverride {
                name: target.name().to_string(),
                via: category.registration_via().to_string(),
            });
        };

        tracing::debug!("Overriding {category} dependency '{}' with {}", target.name(), target.url());
        *dependency = dependency.clone().with_url(target.url());
    }

    Ok(dependencies)
}
