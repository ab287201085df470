//! Dependency declaration types.
//!
//! A declaration is what the user wrote in `reqcompile.toml`, before any
//! validation. Two formats are accepted:
//!
//! ```toml
//! [runtime]
//! dependencies = [
//!     "cubicweb-celery",                               # name only
//!     { name = "pybuilder", version = "==0.11.5" },    # detailed
//!     { name = "pkg[extra1,extra2]", version = ">=1" },
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// A dependency declaration supporting a bare-name and a detailed format.
///
/// The enum uses Serde's `untagged` attribute so the variant is picked from
/// the TOML value's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyDeclaration {
    /// Name only, e.g. `"pkg"` or `"pkg[extra]"`. No version constraint.
    Simple(String),

    /// Name plus optional version constraint and url.
    Detailed(DetailedDeclaration),
}

/// Detailed dependency declaration.
///
/// `version` is kept verbatim (e.g. `==1.2.3`, `>=1,<2`) and is never parsed.
/// `url` is only accepted so that it can be rejected with a helpful message:
/// urls belong in the category's `urls` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedDeclaration {
    /// Package name, optionally followed by a bracketed extras list
    pub name: String,

    /// Version constraint, appended as-is after the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Direct url on the declaration (rejected during normalization)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DependencyDeclaration {
    /// Create a declaration from a name and optional version.
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        match version {
            None => Self::Simple(name.into()),
            Some(version) => Self::Detailed(DetailedDeclaration {
                name: name.into(),
                version: Some(version.to_string()),
                url: None,
            }),
        }
    }

    /// The declared name, including any extras suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(name) => name,
            Self::Detailed(detailed) => &detailed.name,
        }
    }

    /// The declared version constraint, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Simple(_) => None,
            Self::Detailed(detailed) => detailed.version.as_deref(),
        }
    }

    /// The direct url set on the declaration, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Simple(_) => None,
            Self::Detailed(detailed) => detailed.url.as_deref(),
        }
    }
}
