//! Package manifest (`package.json`) computation.
//!
//! The packaged template carries the union of everything either target
//! needs. [`apply_target_profile`] strips what the chosen target does not
//! use, [`apply_identity`] fills in the project's own fields, and
//! [`order_keys`] puts the result into canonical order.

use serde_json::{Map, Value};

use super::{DomainError, Project, TargetKind};

/// Manifest entries that exist only for some targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalField {
    BuildScript,
    StartScript,
    PrepareScript,
    WebpackEnvTypes,
    TsconfigPreset,
    WebpackConfigPreset,
    TsLoader,
    Webpack,
    WebpackCli,
    WebpackDevServer,
}

impl OptionalField {
    pub const ALL: [Self; 10] = [
        Self::BuildScript,
        Self::StartScript,
        Self::PrepareScript,
        Self::WebpackEnvTypes,
        Self::TsconfigPreset,
        Self::WebpackConfigPreset,
        Self::TsLoader,
        Self::Webpack,
        Self::WebpackCli,
        Self::WebpackDevServer,
    ];

    /// `(section, key)` inside the manifest.
    pub const fn location(&self) -> (&'static str, &'static str) {
        match self {
            Self::BuildScript => ("scripts", "build"),
            Self::StartScript => ("scripts", "start"),
            Self::PrepareScript => ("scripts", "prepare"),
            Self::WebpackEnvTypes => ("dependencies", "@types/webpack-env"),
            Self::TsconfigPreset => ("devDependencies", "@softwareventures/tsconfig"),
            Self::WebpackConfigPreset => ("devDependencies", "@softwareventures/webpack-config"),
            Self::TsLoader => ("devDependencies", "ts-loader"),
            Self::Webpack => ("devDependencies", "webpack"),
            Self::WebpackCli => ("devDependencies", "webpack-cli"),
            Self::WebpackDevServer => ("devDependencies", "webpack-dev-server"),
        }
    }
}

/// The optional fields one target keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    pub target: TargetKind,
    pub keeps: &'static [OptionalField],
}

impl TargetProfile {
    pub const NPM: Self = Self {
        target: TargetKind::Npm,
        keeps: &[OptionalField::PrepareScript, OptionalField::TsconfigPreset],
    };

    pub const WEBAPP: Self = Self {
        target: TargetKind::Webapp,
        keeps: &[
            OptionalField::BuildScript,
            OptionalField::StartScript,
            OptionalField::WebpackEnvTypes,
            OptionalField::WebpackConfigPreset,
            OptionalField::TsLoader,
            OptionalField::Webpack,
            OptionalField::WebpackCli,
            OptionalField::WebpackDevServer,
        ],
    };

    pub const fn for_target(target: TargetKind) -> Self {
        match target {
            TargetKind::Npm => Self::NPM,
            TargetKind::Webapp => Self::WEBAPP,
        }
    }

    pub fn keeps(&self, field: OptionalField) -> bool {
        self.keeps.contains(&field)
    }
}

/// Remove every optional field the target's profile does not keep.
///
/// Fields absent from the manifest stay absent; nothing else is touched.
pub fn apply_target_profile(mut manifest: Value, target: TargetKind) -> Value {
    let profile = TargetProfile::for_target(target);
    if let Some(object) = manifest.as_object_mut() {
        for field in OptionalField::ALL {
            if profile.keeps(field) {
                continue;
            }
            let (section, key) = field.location();
            if let Some(Value::Object(entries)) = object.get_mut(section) {
                entries.retain(|k, _| k != key);
            }
        }
    }
    manifest
}

/// Write the project's identity into the manifest.
///
/// `homepage`, `bugs` and `repository` are removed when the project has no
/// recognized git host. `author` and `license` are only overwritten when the
/// project knows them. `engines.node` always follows the project's supported
/// Node.js lines; other engines are kept.
pub fn apply_identity(mut manifest: Value, project: &Project) -> Result<Value, DomainError> {
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| DomainError::InvalidDocument {
            document: "package.json".into(),
            reason: "top level is not an object".into(),
        })?;

    object.insert(
        "name".into(),
        Value::String(project.npm_package.full_name()),
    );

    let host = project.git_host.as_ref();
    set_or_remove(object, "homepage", host.and_then(|h| h.homepage_url()));
    set_or_remove(object, "bugs", host.and_then(|h| h.bugs_url()));
    set_or_remove(
        object,
        "repository",
        host.and_then(|h| h.repository_shortcut()),
    );

    if let Some(author) = project.author.to_manifest_string() {
        object.insert("author".into(), Value::String(author));
    }
    if let Some(spdx) = &project.license.spdx {
        object.insert("license".into(), Value::String(spdx.clone()));
    }

    let engines = object
        .entry("engines")
        .or_insert_with(|| Value::Object(Map::new()));
    if !engines.is_object() {
        *engines = Value::Object(Map::new());
    }
    if let Some(engines) = engines.as_object_mut() {
        engines.insert("node".into(), Value::String(project.node.engines_range()));
    }

    Ok(manifest)
}

fn set_or_remove(object: &mut Map<String, Value>, key: &str, value: Option<String>) {
    match value {
        Some(value) => {
            object.insert(key.into(), Value::String(value));
        }
        None => object.retain(|k, _| k != key),
    }
}

/// Canonical top-level key order for package manifests.
pub const KEY_ORDER: &[&str] = &[
    "private",
    "name",
    "version",
    "description",
    "keywords",
    "author",
    "maintainers",
    "contributors",
    "homepage",
    "bugs",
    "repository",
    "license",
    "scripts",
    "main",
    "module",
    "browser",
    "man",
    "preferGlobal",
    "bin",
    "files",
    "directories",
    "sideEffects",
    "types",
    "typings",
    "dependencies",
    "optionalDependencies",
    "bundleDependencies",
    "bundledDependencies",
    "peerDependencies",
    "devDependencies",
    "engines",
    "engine-strict",
    "engineStrict",
    "os",
    "cpu",
    "eslintConfig",
    "prettier",
    "config",
    "ava",
    "release",
];

const SORTED_SECTIONS: &[&str] = &[
    "dependencies",
    "optionalDependencies",
    "peerDependencies",
    "devDependencies",
];

/// Reorder top-level keys per [`KEY_ORDER`].
///
/// Unknown keys follow in their original order. Dependency sections are
/// sorted by package name.
pub fn order_keys(manifest: Value) -> Value {
    let Value::Object(object) = manifest else {
        return manifest;
    };

    let rank = |key: &str| {
        KEY_ORDER
            .iter()
            .position(|known| *known == key)
            .unwrap_or(KEY_ORDER.len())
    };
    let mut entries: Vec<_> = object.into_iter().collect();
    entries.sort_by_key(|(key, _)| rank(key));
    let mut ordered: Map<String, Value> = entries.into_iter().collect();

    for section in SORTED_SECTIONS {
        if let Some(Value::Object(entries)) = ordered.get_mut(*section) {
            let mut sorted: Vec<_> = std::mem::take(entries).into_iter().collect();
            sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
            entries.extend(sorted);
        }
    }

    Value::Object(ordered)
}

/// Full manifest computation from the packaged template.
pub fn compute_manifest(template: Value, project: &Project) -> Result<Value, DomainError> {
    let manifest = apply_identity(template, project)?;
    Ok(order_keys(apply_target_profile(manifest, project.target)))
}
