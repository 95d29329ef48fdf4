//! The project descriptor consumed by generators.
//!
//! A [`Project`] is built once, either fresh from [`ProjectOptions`] or read
//! back from an existing package manifest, and is immutable afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CopyrightHolders, DomainError, GitHost, NodeVersions, spdx};

const MAX_PACKAGE_NAME_LEN: usize = 214;

/// Which kind of project is being generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A library published to a package registry.
    #[default]
    Npm,
    /// A bundled browser application.
    Webapp,
}

impl TargetKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Webapp => "webapp",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" | "lib" | "library" => Ok(Self::Npm),
            "webapp" | "web" => Ok(Self::Webapp),
            _ => Err(format!("unknown target kind: {s}")),
        }
    }
}

/// Package identity: optional scope plus name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmPackage {
    pub scope: Option<String>,
    pub name: String,
}

impl NpmPackage {
    /// Validated constructor for new packages.
    pub fn new(scope: Option<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if let Some(reason) = name_problem(&name) {
            return Err(DomainError::InvalidPackageName { name, reason });
        }
        if let Some(scope) = &scope {
            if let Some(reason) = name_problem(scope) {
                return Err(DomainError::InvalidScope {
                    scope: scope.clone(),
                    reason,
                });
            }
        }

        let package = Self { scope, name };
        if package.full_name().len() > MAX_PACKAGE_NAME_LEN {
            return Err(DomainError::InvalidPackageName {
                name: package.full_name(),
                reason: format!("longer than {MAX_PACKAGE_NAME_LEN} characters"),
            });
        }
        Ok(package)
    }

    /// Split a manifest `name` such as `@scope/name`. No validation: an
    /// existing project is taken as it is.
    pub fn parse(full_name: &str) -> Self {
        match full_name
            .strip_prefix('@')
            .and_then(|rest| rest.split_once('/'))
        {
            Some((scope, name)) => Self {
                scope: Some(scope.to_string()),
                name: name.to_string(),
            },
            None => Self {
                scope: None,
                name: full_name.to_string(),
            },
        }
    }

    /// `@scope/name` or `name`.
    pub fn full_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("@{}/{}", scope, self.name),
            None => self.name.clone(),
        }
    }
}

fn name_problem(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("name cannot be empty".into());
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Some("name cannot start with '.' or '_'".into());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("name cannot contain uppercase letters".into());
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(*c)))
    {
        return Some(format!("name cannot contain '{bad}'"));
    }
    None
}

/// Author identity; both parts are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Author {
    /// Parse `Name <email>`; either part may be missing.
    pub fn parse(raw: &str) -> Self {
        static AUTHOR: OnceLock<Regex> = OnceLock::new();
        let author = AUTHOR.get_or_init(|| {
            Regex::new(r"^\s*(.*?)(?:\s*<\s*(.*?)\s*>)?\s*$").expect("author pattern is valid")
        });

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        match author.captures(raw) {
            Some(captures) => Self {
                name: captures.get(1).and_then(|m| non_empty(m.as_str())),
                email: captures.get(2).and_then(|m| non_empty(m.as_str())),
            },
            None => Self::default(),
        }
    }

    /// Manifest form: `Name <email>`, `Name`, `<email>`, or nothing.
    pub fn to_manifest_string(&self) -> Option<String> {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => Some(format!("{name} <{email}>")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(email)) => Some(format!("<{email}>")),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Licensing details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// SPDX license expression, e.g. `ISC` or `MIT OR Apache-2.0`.
    pub spdx: Option<String>,
    pub year: i32,
    pub copyright_holder: Option<String>,
}

/// Everything generators need to know about the project being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub path: PathBuf,
    pub npm_package: NpmPackage,
    pub git_host: Option<GitHost>,
    pub node: NodeVersions,
    pub target: TargetKind,
    pub author: Author,
    pub license: License,
}

/// User-supplied choices; anything left out is derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    pub path: PathBuf,
    pub scope: Option<String>,
    pub name: Option<String>,
    pub github_owner: Option<String>,
    pub github_project: Option<String>,
    /// Owner to fall back on when neither `github_owner` nor `scope` is set.
    pub default_github_owner: Option<String>,
    pub target: Option<TargetKind>,
    pub author: Author,
    pub spdx_license: Option<String>,
    pub copyright_holder: Option<String>,
}

impl Project {
    /// Build a fresh descriptor as of `today`.
    ///
    /// The copyright year and the supported Node.js lines both follow
    /// `today`. An explicit license must be a valid SPDX expression.
    pub fn create(
        options: ProjectOptions,
        today: NaiveDate,
        holders: &CopyrightHolders,
    ) -> Result<Self, DomainError> {
        if let Some(expression) = &options.spdx_license {
            spdx::check_expression(expression)?;
        }

        let name = match options.name {
            Some(name) => name,
            None => basename(&options.path)?,
        };
        let npm_package = NpmPackage::new(options.scope, name)?;

        let owner = options
            .github_owner
            .or_else(|| npm_package.scope.clone())
            .or(options.default_github_owner);
        let git_host = owner.map(|user| {
            GitHost::github(
                user,
                options
                    .github_project
                    .unwrap_or_else(|| npm_package.name.clone()),
            )
        });

        let copyright_holder = holders.guess(
            options.copyright_holder.as_deref(),
            npm_package.scope.as_deref(),
            git_host.as_ref().and_then(GitHost::user),
            options.author.name.as_deref(),
        );

        Ok(Self {
            path: options.path,
            npm_package,
            git_host,
            node: NodeVersions::for_date(today),
            target: options.target.unwrap_or_default(),
            author: options.author,
            license: License {
                spdx: options.spdx_license,
                year: today.year(),
                copyright_holder,
            },
        })
    }

    /// Reconstruct a descriptor from an existing `package.json`.
    ///
    /// `webapp` says whether a bundler configuration was found next to it.
    /// Node.js lines come from `engines.node`, or from `today` when the
    /// manifest does not name any.
    pub fn from_manifest(
        path: PathBuf,
        manifest: &Value,
        webapp: bool,
        today: NaiveDate,
        holders: &CopyrightHolders,
    ) -> Result<Self, DomainError> {
        let object = manifest
            .as_object()
            .ok_or_else(|| DomainError::InvalidDocument {
                document: "package.json".into(),
                reason: "top level is not an object".into(),
            })?;

        let npm_package = NpmPackage::parse(object.get("name").and_then(Value::as_str).unwrap_or(""));

        let git_host = match object.get("repository") {
            Some(Value::String(url)) => Some(GitHost::from_url(url)),
            Some(Value::Object(repo)) => repo
                .get("url")
                .and_then(Value::as_str)
                .map(GitHost::from_url),
            _ => None,
        };

        let author = match object.get("author") {
            Some(Value::String(raw)) => Author::parse(raw),
            Some(Value::Object(fields)) => Author {
                name: fields.get("name").and_then(Value::as_str).map(str::to_string),
                email: fields.get("email").and_then(Value::as_str).map(str::to_string),
            },
            _ => Author::default(),
        };

        let spdx = object
            .get("license")
            .and_then(Value::as_str)
            .map(str::to_string);

        let node = object
            .get("engines")
            .and_then(|engines| engines.get("node"))
            .and_then(Value::as_str)
            .and_then(NodeVersions::from_engines)
            .unwrap_or_else(|| NodeVersions::for_date(today));

        let copyright_holder = holders.guess(
            None,
            npm_package.scope.as_deref(),
            git_host.as_ref().and_then(GitHost::user),
            author.name.as_deref(),
        );

        Ok(Self {
            path,
            npm_package,
            git_host,
            node,
            target: if webapp {
                TargetKind::Webapp
            } else {
                TargetKind::Npm
            },
            author,
            license: License {
                spdx,
                year: today.year(),
                copyright_holder,
            },
        })
    }
}

fn basename(path: &Path) -> Result<String, DomainError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| DomainError::UnnamedDestination {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn options(path: &str) -> ProjectOptions {
        ProjectOptions {
            path: PathBuf::from(path),
            ..ProjectOptions::default()
        }
    }

    #[test]
    fn name_defaults_to_destination_basename() {
        let project = Project::create(options("/work/my-lib"), today(), &CopyrightHolders::new())
            .unwrap();
        assert_eq!(project.npm_package.name, "my-lib");
        assert_eq!(project.npm_package.scope, None);
        assert_eq!(project.target, TargetKind::Npm);
        assert_eq!(project.git_host, None);
        assert_eq!(project.license.year, 2026);
        assert_eq!(project.node.engines_range(), "^20 || ^22 || >=24");
    }

    #[test]
    fn malformed_license_is_rejected() {
        let err = Project::create(
            ProjectOptions {
                spdx_license: Some("MIT OR".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidLicense { ref expression, .. } if expression == "MIT OR"));
        assert_eq!(err.category(), crate::error::ErrorCategory::Validation);
    }

    #[test]
    fn license_expression_is_kept_as_given() {
        let project = Project::create(
            ProjectOptions {
                spdx_license: Some("(MIT OR Apache-2.0)".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();
        assert_eq!(project.license.spdx.as_deref(), Some("(MIT OR Apache-2.0)"));
    }

    #[test]
    fn invalid_derived_name_is_rejected() {
        let err = Project::create(options("/work/My Lib"), today(), &CopyrightHolders::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPackageName { .. }));
    }

    #[test]
    fn scope_becomes_github_owner() {
        let project = Project::create(
            ProjectOptions {
                scope: Some("acme".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();
        assert_eq!(project.npm_package.full_name(), "@acme/widget");
        assert_eq!(project.git_host, Some(GitHost::github("acme", "widget")));
    }

    #[test]
    fn explicit_github_identity_wins() {
        let project = Project::create(
            ProjectOptions {
                scope: Some("acme".into()),
                github_owner: Some("someone".into()),
                github_project: Some("fork".into()),
                default_github_owner: Some("fallback".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();
        assert_eq!(project.git_host, Some(GitHost::github("someone", "fork")));
    }

    #[test]
    fn default_owner_used_last() {
        let project = Project::create(
            ProjectOptions {
                default_github_owner: Some("fallback".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();
        assert_eq!(project.git_host, Some(GitHost::github("fallback", "widget")));
    }

    #[test]
    fn copyright_holder_comes_from_table() {
        let project = Project::create(
            ProjectOptions {
                scope: Some("softwareventures".into()),
                ..options("/work/widget")
            },
            today(),
            &CopyrightHolders::builtin(),
        )
        .unwrap();
        assert_eq!(
            project.license.copyright_holder.as_deref(),
            Some("Software Ventures Limited")
        );
    }

    #[test]
    fn package_name_rules() {
        assert!(NpmPackage::new(None, "ok-name.js").is_ok());
        assert!(NpmPackage::new(None, "").is_err());
        assert!(NpmPackage::new(None, ".hidden").is_err());
        assert!(NpmPackage::new(None, "Upper").is_err());
        assert!(NpmPackage::new(None, "has space").is_err());
        assert!(NpmPackage::new(Some("Bad".into()), "fine").is_err());
        assert!(NpmPackage::new(None, "x".repeat(215)).is_err());
    }

    #[test]
    fn parse_splits_scope() {
        assert_eq!(
            NpmPackage::parse("@acme/widget"),
            NpmPackage {
                scope: Some("acme".into()),
                name: "widget".into()
            }
        );
        assert_eq!(NpmPackage::parse("widget").scope, None);
    }

    #[test]
    fn author_string_forms() {
        assert_eq!(
            Author::parse("Ada Lovelace <ada@example.com>"),
            Author {
                name: Some("Ada Lovelace".into()),
                email: Some("ada@example.com".into())
            }
        );
        assert_eq!(
            Author::parse("  Ada  "),
            Author {
                name: Some("Ada".into()),
                email: None
            }
        );
        assert!(Author::parse("").is_empty());
    }

    #[test]
    fn author_manifest_string() {
        let author = Author {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
        };
        assert_eq!(
            author.to_manifest_string().as_deref(),
            Some("Ada <ada@example.com>")
        );
        assert_eq!(Author::default().to_manifest_string(), None);
    }

    #[test]
    fn reads_descriptor_back_from_manifest() {
        let manifest = json!({
            "name": "@acme/widget",
            "repository": "github:acme/widget",
            "author": {"name": "Ada", "email": "ada@example.com"},
            "license": "ISC",
            "engines": {"node": "^18 || >=20"}
        });
        let project = Project::from_manifest(
            PathBuf::from("/work/widget"),
            &manifest,
            true,
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();

        assert_eq!(project.npm_package.full_name(), "@acme/widget");
        assert_eq!(project.git_host, Some(GitHost::github("acme", "widget")));
        assert_eq!(project.target, TargetKind::Webapp);
        assert_eq!(project.author.email.as_deref(), Some("ada@example.com"));
        assert_eq!(project.license.spdx.as_deref(), Some("ISC"));
        assert_eq!(project.license.copyright_holder.as_deref(), Some("Ada"));
        assert_eq!(project.node.majors(), &[18, 20]);
    }

    #[test]
    fn repository_object_form_is_understood() {
        let manifest = json!({
            "name": "widget",
            "repository": {"type": "git", "url": "https://gitlab.com/acme/widget.git"}
        });
        let project = Project::from_manifest(
            PathBuf::from("/w"),
            &manifest,
            false,
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap();
        assert_eq!(
            project.git_host,
            Some(GitHost::Unknown {
                url: "https://gitlab.com/acme/widget.git".into()
            })
        );
        assert_eq!(project.target, TargetKind::Npm);
        assert_eq!(project.node, NodeVersions::for_date(today()));
    }

    #[test]
    fn non_object_manifest_is_invalid() {
        let err = Project::from_manifest(
            PathBuf::from("/w"),
            &json!([1, 2]),
            false,
            today(),
            &CopyrightHolders::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDocument { .. }));
    }

    #[test]
    fn target_kind_parses() {
        assert_eq!("webapp".parse::<TargetKind>(), Ok(TargetKind::Webapp));
        assert_eq!("NPM".parse::<TargetKind>(), Ok(TargetKind::Npm));
        assert!("desktop".parse::<TargetKind>().is_err());
    }
}
