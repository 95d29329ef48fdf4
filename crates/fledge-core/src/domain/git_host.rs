use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Where the project's git repository is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "lowercase")]
pub enum GitHost {
    Github { user: String, project: String },
    Unknown { url: String },
}

impl GitHost {
    pub fn github(user: impl Into<String>, project: impl Into<String>) -> Self {
        Self::Github {
            user: user.into(),
            project: project.into(),
        }
    }

    /// Recognize a repository URL or shortcut.
    ///
    /// Accepts `github:user/project`, `user/project`,
    /// `https://github.com/user/project(.git)`, `git+https://…`,
    /// `git://github.com/…` and `git@github.com:user/project.git`.
    /// Anything else becomes [`GitHost::Unknown`] carrying the raw url.
    pub fn from_url(url: &str) -> Self {
        static GITHUB: OnceLock<Regex> = OnceLock::new();
        let github = GITHUB.get_or_init(|| {
            Regex::new(
                r"^(?:github:|(?:git\+)?(?:https?|ssh|git)://(?:[^@/]+@)?(?:www\.)?github\.com/|git@github\.com:)?([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9._-]+?)(?:\.git)?/?(?:#.*)?$",
            )
            .expect("github url pattern is valid")
        });

        let trimmed = url.trim();
        match github.captures(trimmed) {
            Some(captures) => Self::github(&captures[1], &captures[2]),
            None => Self::Unknown {
                url: trimmed.to_string(),
            },
        }
    }

    /// Browsable project page, e.g. `https://github.com/user/project`.
    pub fn homepage_url(&self) -> Option<String> {
        match self {
            Self::Github { user, project } => Some(format!("https://github.com/{user}/{project}")),
            Self::Unknown { .. } => None,
        }
    }

    /// Issue tracker page.
    pub fn bugs_url(&self) -> Option<String> {
        self.homepage_url().map(|home| format!("{home}/issues"))
    }

    /// Short repository reference for package manifests.
    pub fn repository_shortcut(&self) -> Option<String> {
        match self {
            Self::Github { user, project } => Some(format!("github:{user}/{project}")),
            Self::Unknown { .. } => None,
        }
    }

    /// Owning user or organisation, when known.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Github { user, .. } => Some(user),
            Self::Unknown { .. } => None,
        }
    }
}
