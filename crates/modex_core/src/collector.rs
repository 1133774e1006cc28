use std::collections::BTreeMap;

use modex_logging::modex_debug;
use url::Url;

/// Shown when nothing usable was entered.
pub const MISSING_URL_MESSAGE: &str = "Please enter at least one URL";
/// Shown for a non-blank row that is not an absolute URL.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";

/// One editable URL row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub index: usize,
    pub text: String,
}

/// Per-row validation messages keyed by row index.
///
/// Keys always point at existing rows: row removal and insertion move the
/// keys along with the rows they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    by_row: BTreeMap<usize, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.by_row.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_row.is_empty()
    }

    /// Errors in ascending row order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.by_row.iter().map(|(row, msg)| (*row, msg.as_str()))
    }

    pub(crate) fn insert(&mut self, index: usize, message: impl Into<String>) {
        self.by_row.insert(index, message.into());
    }

    pub(crate) fn clear_row(&mut self, index: usize) -> bool {
        self.by_row.remove(&index).is_some()
    }

    /// Drops the error at `index` and moves every later error up one row.
    pub(crate) fn remove_row(&mut self, index: usize) {
        let tail = self.by_row.split_off(&index);
        for (row, message) in tail {
            if row > index {
                self.by_row.insert(row - 1, message);
            }
        }
    }

    /// Moves every error at or after `index` down by `count` rows.
    pub(crate) fn insert_rows(&mut self, index: usize, count: usize) {
        let tail = self.by_row.split_off(&index);
        for (row, message) in tail {
            self.by_row.insert(row + count, message);
        }
    }
}

/// Ordered list of URL rows plus their validation errors.
///
/// There is always at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCollector {
    rows: Vec<String>,
    errors: ValidationErrors,
}

impl Default for UrlCollector {
    fn default() -> Self {
        Self {
            rows: vec![String::new()],
            errors: ValidationErrors::new(),
        }
    }
}

impl UrlCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collector with one row per item. An empty iterator still
    /// yields a single blank row.
    pub fn with_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        if rows.is_empty() {
            return Self::default();
        }
        Self {
            rows,
            errors: ValidationErrors::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn entries(&self) -> Vec<UrlEntry> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, text)| UrlEntry {
                index,
                text: text.clone(),
            })
            .collect()
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, index: usize) -> Option<&str> {
        self.errors.get(index)
    }

    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Replaces the text of a row and clears its error. Errors are only
    /// recomputed on submit. Returns `false` for an unknown row.
    pub fn update_entry(&mut self, index: usize, text: impl Into<String>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        *row = text.into();
        self.errors.clear_row(index);
        true
    }

    pub fn add_entry(&mut self) {
        self.rows.push(String::new());
    }

    /// Removes a row. Refuses to remove the last remaining row.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        self.errors.remove_row(index);
        true
    }

    /// Spreads a multi-line paste over rows: the first non-blank line
    /// replaces row `index`, the others become new rows right after it.
    /// Returns the number of rows written.
    pub fn paste_lines(&mut self, index: usize, raw: &str) -> usize {
        if index >= self.rows.len() {
            return 0;
        }
        let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty());
        let Some(first) = lines.next() else {
            return 0;
        };
        let rest: Vec<String> = lines.map(ToOwned::to_owned).collect();

        self.rows[index] = first.to_owned();
        self.errors.clear_row(index);

        let at = index + 1;
        self.errors.insert_rows(at, rest.len());
        let written = 1 + rest.len();
        for (offset, line) in rest.into_iter().enumerate() {
            self.rows.insert(at + offset, line);
        }
        written
    }

    /// Validates every row in one pass.
    ///
    /// Blank rows are skipped unless the collector has a single row. Any
    /// error blocks the whole submission; on success the error map is
    /// cleared and the trimmed URLs are returned in row order.
    pub fn submit(&mut self) -> Result<Vec<String>, ValidationErrors> {
        let only_row = self.rows.len() == 1;
        let mut errors = ValidationErrors::new();
        let mut urls = Vec::with_capacity(self.rows.len());

        for (index, raw) in self.rows.iter().enumerate() {
            let text = raw.trim();
            if text.is_empty() {
                if only_row {
                    errors.insert(index, MISSING_URL_MESSAGE);
                }
            } else if !is_absolute_url(text) {
                errors.insert(index, INVALID_URL_MESSAGE);
            } else {
                urls.push(text.to_owned());
            }
        }

        if errors.is_empty() && urls.is_empty() {
            errors.insert(0, MISSING_URL_MESSAGE);
        }

        if !errors.is_empty() {
            modex_debug!(
                "Submission rejected: {} of {} row(s) invalid",
                errors.len(),
                self.rows.len()
            );
            self.errors = errors.clone();
            return Err(errors);
        }

        modex_debug!("Submission accepted: {} url(s)", urls.len());
        self.errors = ValidationErrors::new();
        Ok(urls)
    }
}

/// True when `text` parses as an absolute URL with an authority part.
pub fn is_absolute_url(text: &str) -> bool {
    Url::parse(text).map(|url| url.has_host()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(pairs: &[(usize, &str)]) -> ValidationErrors {
        let mut map = ValidationErrors::new();
        for (row, msg) in pairs {
            map.insert(*row, *msg);
        }
        map
    }

    #[test]
    fn remove_row_shifts_later_keys_only() {
        let mut map = errors(&[(0, "a"), (2, "b"), (3, "c"), (5, "d")]);
        map.remove_row(2);
        let keys: Vec<_> = map.iter().collect();
        assert_eq!(keys, vec![(0, "a"), (2, "c"), (4, "d")]);
    }

    #[test]
    fn insert_rows_moves_keys_at_and_after_index() {
        let mut map = errors(&[(0, "a"), (1, "b"), (2, "c")]);
        map.insert_rows(1, 2);
        let keys: Vec<_> = map.iter().collect();
        assert_eq!(keys, vec![(0, "a"), (3, "b"), (4, "c")]);
    }

    #[test]
    fn absolute_url_requires_scheme_and_host() {
        assert!(is_absolute_url("https://a.com"));
        assert!(is_absolute_url("http://localhost:8000/docs"));
        assert!(!is_absolute_url("not-a-url"));
        assert!(!is_absolute_url("a.com/docs"));
        assert!(!is_absolute_url("mailto:someone@example.com"));
        assert!(!is_absolute_url("https://"));
    }
}
