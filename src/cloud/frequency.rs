use crate::filter::StopwordSet;
use regex::Regex;
use std::collections::HashMap;

/// A distinct word and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counts the words matched by `pattern`, ignoring stopwords and pure numbers.
///
/// Words are merged case-insensitively and keep the casing they were first
/// seen with. A trailing `'s` is dropped. The result is ordered by count,
/// most frequent first, ties broken by first occurrence.
pub fn count_words(text: &str, pattern: &Regex, stopwords: &StopwordSet) -> Vec<WordCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for m in pattern.find_iter(text) {
        let word = m.as_str();
        let word = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("'S"))
            .unwrap_or(word);

        if word.is_empty() || word.chars().all(|c| c.is_numeric()) || stopwords.contains(word) {
            continue;
        }

        let key = word.to_lowercase();
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
