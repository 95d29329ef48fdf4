//! Template provider adapters.

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;
pub use memory::MemoryTemplates;

/// Names below `dir/`, relative to it and sorted.
fn list_below<'a>(names: impl IntoIterator<Item = &'a str>, dir: &str) -> Vec<String> {
    let prefix = format!("{}/", dir.trim_end_matches('/'));
    let mut listed: Vec<String> = names
        .into_iter()
        .filter_map(|name| name.strip_prefix(prefix.as_str()))
        .map(str::to_string)
        .collect();
    listed.sort();
    listed
}
