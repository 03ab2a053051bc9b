use std::collections::HashSet;
use stop_words::{LANGUAGE, get};

/// Pronouns, particles and generic nouns that show up as noise on the site
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "こと", "の", "よう", "私", "ここ", "ため", "もの", "これ", "それぞれ", "的", "方", "https",
    "検索", "結果", "さん", "たち", "ところ", "そこ", "それ", "こちら",
];

/// Words excluded from the word cloud regardless of how often they occur.
///
/// Lookups are case-insensitive. The set is only consulted when counting
/// words for the cloud; the tokenizer never sees it.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Built-in English list unioned with `extra`
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::builtin();
        set.extend(extra);
        set
    }

    /// The built-in list only
    pub fn builtin() -> Self {
        let words = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        Self { words }
    }

    /// An empty set (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add words to the set
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.words.insert(word.as_ref().to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
