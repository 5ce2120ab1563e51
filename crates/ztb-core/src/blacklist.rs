use std::path::Path;

pub const DEFAULT_PATH: &str = "Data/Materials/Text/blacklist_strings.txt";

/// Exact-line blacklist loaded from the Text material.
///
/// A message matches when any of its lines equals a blacklist line. Lines
/// are trimmed on load; blank lines are ignored. A missing file yields an
/// empty blacklist, not an error.
#[derive(Clone, Debug, Default)]
pub struct Blacklist {
    lines: Vec<String>,
}

impl Blacklist {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let lines = std::fs::read_to_string(path)
            .map(|content| {
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn matches(&self, message: &str) -> bool {
        message
            .lines()
            .any(|line| self.lines.iter().any(|blocked| blocked == line))
    }
}
