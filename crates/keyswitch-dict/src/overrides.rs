// Per-language allow / deny lists

use std::path::Path;

use hashbrown::HashSet;

use crate::normalize_word;

/// Words forced valid (`allow`) or forced invalid (`deny`) regardless of
/// the dictionary. Deny wins when a word is on both lists.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    allow: HashSet<String>,
    deny: HashSet<String>,
}

impl Overrides {
    pub fn new<A, D>(allow: A, deny: D) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            allow: normalized_set(allow),
            deny: normalized_set(deny),
        }
    }

    /// Load both lists. A missing file is an empty list; any other I/O
    /// error is returned.
    pub fn load(allow_path: &Path, deny_path: &Path) -> std::io::Result<Self> {
        let allow = read_list(allow_path)?;
        let deny = read_list(deny_path)?;
        Ok(Self::new(allow.lines(), deny.lines()))
    }

    pub fn is_allowed(&self, word: &str) -> bool {
        self.allow.contains(word)
    }

    pub fn is_denied(&self, word: &str) -> bool {
        self.deny.contains(word)
    }

    /// Allow-listed words, in no particular order.
    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.allow.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }

    /// Add words at runtime.
    pub fn allow<S: AsRef<str>>(&mut self, word: S) {
        if let Some(w) = normalize_word(word.as_ref()) {
            self.allow.insert(w);
        }
    }

    pub fn deny<S: AsRef<str>>(&mut self, word: S) {
        if let Some(w) = normalize_word(word.as_ref()) {
            self.deny.insert(w);
        }
    }
}

fn normalized_set<I>(lines: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|l| normalize_word(l.as_ref()))
        .collect()
}

fn read_list(path: &Path) -> std::io::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}
