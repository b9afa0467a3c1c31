// Splitting typed tokens into punctuation affixes and a word core

/// A token split into leading punctuation, the word core, and trailing
/// punctuation. Concatenating the three parts yields the original token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affixes<'a> {
    pub prefix: &'a str,
    pub core: &'a str,
    pub suffix: &'a str,
}

impl<'a> Affixes<'a> {
    /// Split `token` on its leading and trailing non-alphanumeric characters.
    ///
    /// A token with no alphanumeric characters at all is returned entirely
    /// as prefix with an empty core.
    pub fn split(token: &'a str) -> Self {
        let Some(start) = token.find(char::is_alphanumeric) else {
            return Self {
                prefix: token,
                core: "",
                suffix: "",
            };
        };
        // `start` found a match, so a last alphanumeric exists too.
        let end = token
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_alphanumeric())
            .map_or(token.len(), |(i, c)| i + c.len_utf8());
        Self {
            prefix: &token[..start],
            core: &token[start..end],
            suffix: &token[end..],
        }
    }

    /// Rebuild a token around a replacement core.
    pub fn rejoin(&self, core: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + core.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(core);
        out.push_str(self.suffix);
        out
    }
}

/// Split trailing non-alphanumeric characters off a buffered word.
///
/// Returns `(core, trailing)`; the trailing part becomes boundary text.
pub fn split_trailing_boundary(word: &[char]) -> (&[char], &[char]) {
    let end = word
        .iter()
        .rposition(|c| c.is_alphanumeric())
        .map_or(0, |i| i + 1);
    word.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn split_plain_word() {
        let a = Affixes::split("привет");
        assert_eq!(a.prefix, "");
        assert_eq!(a.core, "привет");
        assert_eq!(a.suffix, "");
    }

    #[test]
    fn split_with_affixes() {
        let a = Affixes::split("«Тест»!");
        assert_eq!(a.prefix, "«");
        assert_eq!(a.core, "Тест");
        assert_eq!(a.suffix, "»!");
        assert_eq!(a.rejoin("Test"), "«Test»!");
    }

    #[test]
    fn split_keeps_inner_punctuation() {
        let a = Affixes::split("(j,tl)");
        assert_eq!(a.core, "j,tl");
        assert_eq!(a.prefix, "(");
        assert_eq!(a.suffix, ")");
    }

    #[test]
    fn split_without_alphanumerics() {
        let a = Affixes::split("?!");
        assert_eq!(a.prefix, "?!");
        assert_eq!(a.core, "");
        assert_eq!(a.suffix, "");
    }

    #[test]
    fn trailing_boundary_is_split_off() {
        let word = chars("ghbdtn,.");
        let (core, trailing) = split_trailing_boundary(&word);
        assert_eq!(core.iter().collect::<String>(), "ghbdtn");
        assert_eq!(trailing.iter().collect::<String>(), ",.");
    }

    #[test]
    fn trailing_boundary_on_punctuation_only() {
        let word = chars("...");
        let (core, trailing) = split_trailing_boundary(&word);
        assert!(core.is_empty());
        assert_eq!(trailing.len(), 3);
    }
}
