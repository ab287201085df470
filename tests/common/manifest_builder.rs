//! Fluent builder for creating reqcompile.toml manifests in tests
//!
//! ```rust,ignore
//! use crate::common::ManifestBuilder;
//!
//! let manifest = ManifestBuilder::new()
//!     .runtime_dependency("fpkg", None)
//!     .runtime_dependency("pybuilder", Some("==0.11.5"))
//!     .runtime_url("git+https://github.com/pybuilder/pybuilder.git#egg=pybuilder-0")
//!     .build_dependency("pytest-mock", None)
//!     .build();
//! ```

/// Builder for creating test manifests
#[derive(Default, Debug)]
pub struct ManifestBuilder {
    project_name: Option<String>,
    runtime: Vec<DependencyEntry>,
    runtime_urls: Vec<String>,
    build: Vec<DependencyEntry>,
    plugins: Vec<DependencyEntry>,
    build_urls: Vec<String>,
    implicit_plugins: Option<bool>,
}

/// One entry of a dependencies array
#[derive(Debug, Clone)]
struct DependencyEntry {
    name: String,
    version: Option<String>,
    url: Option<String>,
}

impl DependencyEntry {
    fn new(name: &str, version: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            version: version.map(str::to_string),
            url: None,
        }
    }

    fn to_toml(&self) -> String {
        match (&self.version, &self.url) {
            (None, None) => format!("{:?}", self.name),
            _ => {
                let mut fields = vec![format!("name = {:?}", self.name)];
                if let Some(version) = &self.version {
                    fields.push(format!("version = {version:?}"));
                }
                if let Some(url) = &self.url {
                    fields.push(format!("url = {url:?}"));
                }
                format!("{{ {} }}", fields.join(", "))
            }
        }
    }
}

fn array<T, F>(items: &[T], render: F) -> String
where
    F: Fn(&T) -> String,
{
    if items.is_empty() {
        return "[]".to_string();
    }
    let body: Vec<String> = items.iter().map(|item| format!("    {},", render(item))).collect();
    format!("[\n{}\n]", body.join("\n"))
}

impl ManifestBuilder {
    /// Create an empty manifest builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `[project] name`
    pub fn project_name(mut self, name: &str) -> Self {
        self.project_name = Some(name.to_string());
        self
    }

    /// Append to `[runtime] dependencies`
    pub fn runtime_dependency(mut self, name: &str, version: Option<&str>) -> Self {
        self.runtime.push(DependencyEntry::new(name, version));
        self
    }

    /// Append a declaration carrying its own url to `[runtime] dependencies`
    pub fn runtime_dependency_with_url(mut self, name: &str, url: &str) -> Self {
        let mut entry = DependencyEntry::new(name, None);
        entry.url = Some(url.to_string());
        self.runtime.push(entry);
        self
    }

    /// Append to `[runtime] urls`
    pub fn runtime_url(mut self, url: &str) -> Self {
        self.runtime_urls.push(url.to_string());
        self
    }

    /// Append to `[build] dependencies`
    pub fn build_dependency(mut self, name: &str, version: Option<&str>) -> Self {
        self.build.push(DependencyEntry::new(name, version));
        self
    }

    /// Append to `[build] plugin-dependencies`
    pub fn plugin_dependency(mut self, name: &str, version: Option<&str>) -> Self {
        self.plugins.push(DependencyEntry::new(name, version));
        self
    }

    /// Append to `[build] urls`
    pub fn build_url(mut self, url: &str) -> Self {
        self.build_urls.push(url.to_string());
        self
    }

    /// Set `[tools] implicit-plugin-dependencies`
    pub fn implicit_plugin_dependencies(mut self, enabled: bool) -> Self {
        self.implicit_plugins = Some(enabled);
        self
    }

    /// Render the manifest as TOML
    pub fn build(self) -> String {
        let mut toml = String::new();

        if let Some(name) = &self.project_name {
            toml.push_str(&format!("[project]\nname = {name:?}\n\n"));
        }

        toml.push_str("[runtime]\n");
        toml.push_str(&format!("dependencies = {}\n", array(&self.runtime, DependencyEntry::to_toml)));
        toml.push_str(&format!("urls = {}\n\n", array(&self.runtime_urls, |u| format!("{u:?}"))));

        toml.push_str("[build]\n");
        toml.push_str(&format!("dependencies = {}\n", array(&self.build, DependencyEntry::to_toml)));
        toml.push_str(&format!(
            "plugin-dependencies = {}\n",
            array(&self.plugins, DependencyEntry::to_toml)
        ));
        toml.push_str(&format!("urls = {}\n", array(&self.build_urls, |u| format!("{u:?}"))));

        if let Some(enabled) = self.implicit_plugins {
            toml.push_str(&format!("\n[tools]\nimplicit-plugin-dependencies = {enabled}\n"));
        }

        toml
    }
}
