use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, Result};

/// Backtracking budget for a single match attempt. fancy-regex counts
/// backtracking steps rather than wall-clock time; a match that overruns the
/// budget aborts, and callers treat that one record as "does not match".
const BACKTRACK_LIMIT: usize = 1_000_000;

/// Append-only map from raw pattern strings to their compiled,
/// case-insensitive form. Entries live until [`clear`](Self::clear); a
/// compile race between two threads is benign since both sides produce
/// equivalent regexes (last insert wins).
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: DashMap<String, Arc<fancy_regex::Regex>>,
}

impl PatternCache {
    /// Fetch the compiled regex for `pattern`, compiling it on first use.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<fancy_regex::Regex>> {
        if let Some(entry) = self.compiled.get(pattern) {
            return Ok(Arc::clone(entry.value()));
        }

        let regex = fancy_regex::RegexBuilder::new(&format!("(?i){}", pattern))
            .backtrack_limit(BACKTRACK_LIMIT)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_owned(),
                source: Box::new(source),
            })?;

        let regex = Arc::new(regex);
        self.compiled
            .insert(pattern.to_owned(), Arc::clone(&regex));
        Ok(regex)
    }

    pub fn clear(&self) {
        self.compiled.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }
}
