use std::collections::BTreeMap;

/// Lookup table from account names (npm scope or git-host owner) to the
/// legal name of the copyright holder.
///
/// Passed into project construction explicitly; nothing reads a global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyrightHolders {
    by_account: BTreeMap<String, String>,
}

impl CopyrightHolders {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with Fledge.
    pub fn builtin() -> Self {
        Self::new()
            .with("softwareventures", "Software Ventures Limited")
            .with("eccosolutions", "ecco solutions ltd")
    }

    pub fn with(mut self, account: impl Into<String>, holder: impl Into<String>) -> Self {
        self.by_account.insert(account.into(), holder.into());
        self
    }

    /// Add or override entries.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.by_account.extend(entries);
    }

    pub fn get(&self, account: &str) -> Option<&str> {
        self.by_account.get(account).map(String::as_str)
    }

    /// Best guess at the copyright holder.
    ///
    /// Explicit holder first, then the scope, then the git-host owner, and
    /// finally the author's own name.
    pub fn guess(
        &self,
        explicit: Option<&str>,
        scope: Option<&str>,
        git_user: Option<&str>,
        author_name: Option<&str>,
    ) -> Option<String> {
        explicit
            .or_else(|| scope.and_then(|s| self.get(s)))
            .or_else(|| git_user.and_then(|u| self.get(u)))
            .or(author_name)
            .map(str::to_string)
    }
}
