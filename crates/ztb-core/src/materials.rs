use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

/// Fixed manifest of bundled media the bot cannot run without.
const MANIFEST: &[(&str, &[&str])] = &[
    (
        "Animation",
        &["after_subscribe.mp4", "bad.mp4", "start.mp4", "subscribe.mp4"],
    ),
    ("Photo", &["share.jpg"]),
    ("Text", &["blacklist_strings.txt"]),
];

pub const DEFAULT_ROOT: &str = "Data/Materials";

/// Independent checks for a single manifest entry, as shown by the
/// `materials` CLI command.
#[derive(Clone, Debug)]
pub struct FileStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub filled: bool,
}

impl FileStatus {
    pub fn ok(&self) -> bool {
        self.exists && self.filled
    }
}

/// Validator for the material-asset manifest.
///
/// Purely read-only: missing or unreadable files are reported as failed
/// checks, never as errors.
#[derive(Clone, Debug)]
pub struct MaterialsValidator {
    root: PathBuf,
}

impl Default for MaterialsValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl MaterialsValidator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static str> {
        MANIFEST.iter().map(|(category, _)| *category)
    }

    fn category_files(category: &str) -> &'static [&'static str] {
        MANIFEST
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, files)| *files)
            .unwrap_or(&[])
    }

    fn path_for(&self, category: &str, filename: &str) -> PathBuf {
        self.root.join(category).join(filename)
    }

    /// Paths from `category` that are absent on disk.
    pub fn missing_files(&self, category: &str) -> Vec<PathBuf> {
        Self::category_files(category)
            .iter()
            .map(|filename| self.path_for(category, filename))
            .filter(|path| !path.exists())
            .collect()
    }

    /// Paths from `category` whose content is empty (or unreadable).
    pub fn empty_files(&self, category: &str) -> Vec<PathBuf> {
        Self::category_files(category)
            .iter()
            .map(|filename| self.path_for(category, filename))
            .filter(|path| !is_file_filled(path))
            .collect()
    }

    /// True iff every file of `category` exists at its derived path.
    pub fn files_exist(&self, category: &str) -> bool {
        let missing = self.missing_files(category);
        for path in &missing {
            warn!(category, path = %path.display(), "required material is missing");
        }
        missing.is_empty()
    }

    /// True iff every file of `category` has content. A missing file counts
    /// as not filled.
    pub fn files_filled(&self, category: &str) -> bool {
        let empty = self.empty_files(category);
        for path in &empty {
            warn!(category, path = %path.display(), "required material is empty");
        }
        empty.is_empty()
    }

    /// Runs the existence pass and then the filled pass over every category.
    /// Every category is evaluated even after an earlier failure so a full
    /// report can be produced.
    pub fn validate(&self) -> bool {
        let mut status = true;
        for category in self.categories() {
            status &= self.files_exist(category);
        }
        for category in self.categories() {
            status &= self.files_filled(category);
        }
        status
    }

    /// Per-file status for every manifest entry, in manifest order.
    pub fn statuses(&self) -> Vec<(&'static str, Vec<FileStatus>)> {
        MANIFEST
            .iter()
            .map(|(category, files)| {
                let entries = files
                    .iter()
                    .map(|filename| {
                        let path = self.path_for(category, filename);
                        FileStatus {
                            exists: path.exists(),
                            filled: is_file_filled(&path),
                            path,
                        }
                    })
                    .collect();
                (*category, entries)
            })
            .collect()
    }
}

/// Text files are filled iff their trimmed content is non-empty; everything
/// else iff the byte length is non-zero. Missing files are not filled.
fn is_file_filled(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    if is_text {
        fs::read_to_string(path)
            .map(|content| !content.trim().is_empty())
            .unwrap_or(false)
    } else {
        fs::metadata(path).map(|md| md.len() > 0).unwrap_or(false)
    }
}
