//! Filesystem-backed suggestions for `folders` / `filepaths` templates.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::spec::Template;
use crate::core::suggestion::{Suggestion, SuggestionKind};

/// List entries next to the word being typed.
///
/// The directory part of `current` (up to and including the last `/`) is
/// kept verbatim in every suggestion so the shell can replace the whole
/// word. `~` is expanded only for the lookup. Unreadable directories yield
/// nothing.
pub fn expand(
    template: Template,
    current: &str,
) -> Vec<Suggestion> {
    let (dir_part, file_prefix) = match current.rfind('/') {
        Some(idx) => current.split_at(idx + 1),
        None => ("", current),
    };

    let lookup = if dir_part.is_empty() { ".".to_string() } else { shellexpand::tilde(dir_part).into_owned() };

    let entries = match fs::read_dir(Path::new(&lookup)) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %lookup, error = %err, "template lookup failed");
            return Vec::new();
        }
    };

    let show_dotfiles = file_prefix.starts_with('.');
    let mut out: Vec<Suggestion> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry
                .file_name()
                .to_string_lossy()
                .into_owned();
            if name.starts_with('.') && !show_dotfiles {
                return None;
            }
            // Follows symlinks, so a link to a directory counts as a folder.
            let is_dir = entry
                .path()
                .is_dir();
            match (template, is_dir) {
                (_, true) => Some(Suggestion::new(format!("{dir_part}{name}/"), SuggestionKind::Folder)),
                (Template::Filepaths, false) => Some(Suggestion::new(format!("{dir_part}{name}"), SuggestionKind::File)),
                (Template::Folders, false) => None,
            }
        })
        .collect();

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().expect("tempdir");
        fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
        fs::create_dir_all(tmp.path().join(".git")).expect("mkdir");
        fs::write(tmp.path().join("README.md"), "x").expect("write");
        tmp
    }

    fn names(items: &[Suggestion]) -> Vec<&str> {
        items
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    }

    #[test]
    fn folders_skip_files_and_dotdirs() {
        let tmp = fixture();
        let base = format!("{}/", tmp.path().display());

        let out = expand(Template::Folders, &base);
        assert_eq!(names(&out), [format!("{base}src/")]);
        assert_eq!(out[0].kind, SuggestionKind::Folder);
    }

    #[test]
    fn filepaths_include_files() {
        let tmp = fixture();
        let base = format!("{}/", tmp.path().display());

        let out = expand(Template::Filepaths, &base);
        assert_eq!(names(&out), [format!("{base}README.md"), format!("{base}src/")]);
    }

    #[test]
    fn dot_prefix_reveals_dotfiles() {
        let tmp = fixture();
        let current = format!("{}/.", tmp.path().display());

        let out = expand(Template::Folders, &current);
        assert!(out
            .iter()
            .any(|s| s.name.ends_with(".git/")));
    }

    #[test]
    fn missing_directory_yields_nothing() {
        assert!(expand(Template::Folders, "/definitely/not/here/").is_empty());
    }
}
