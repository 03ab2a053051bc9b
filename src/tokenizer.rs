use lindera::{DictionaryConfig, DictionaryKind, DictionaryLoader, Mode, Tokenizer};
use thiserror::Error;

/// Part-of-speech prefix IPADIC uses for nouns
const NOUN_TAG: &str = "名詞";

/// Position of the base form in IPADIC token details
const BASE_FORM_INDEX: usize = 6;

/// Details lindera reports for words missing from the dictionary
const UNKNOWN_TAG: &str = "UNK";

#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("morphological analysis failed: {0}")]
    Analysis(String),
}

/// Japanese morphological tokenizer that keeps only nouns
pub struct NounTokenizer {
    tokenizer: Tokenizer,
}

impl NounTokenizer {
    /// Create a tokenizer backed by the embedded IPADIC dictionary
    pub fn new() -> Result<Self, TokenizeError> {
        let dictionary = DictionaryLoader::load_dictionary_from_config(DictionaryConfig {
            kind: Some(DictionaryKind::IPADIC),
            path: None,
        })
        .map_err(|e| TokenizeError::Analysis(e.to_string()))?;
        Ok(Self {
            tokenizer: Tokenizer::new(dictionary, None, Mode::Normal),
        })
    }

    /// Returns the base forms of the nouns in `text`, space-joined in order.
    ///
    /// Text without nouns yields an empty string.
    pub fn tokenize(&self, text: &str) -> Result<String, TokenizeError> {
        let mut tokens = self
            .tokenizer
            .tokenize(text)
            .map_err(|e| TokenizeError::Analysis(e.to_string()))?;

        let mut nouns = Vec::new();
        for token in tokens.iter_mut() {
            let surface = token.text.to_string();
            let Some(details) = token.get_details() else {
                continue;
            };
            if let Some(noun) = noun_base_form(&surface, &details) {
                nouns.push(noun);
            }
        }

        ::log::debug!("Kept {} nouns out of {} tokens", nouns.len(), tokens.len());
        Ok(nouns.join(" "))
    }
}

/// Base form of a noun token, or `None` for any other part of speech.
/// Unknown words have no base form and fall back to their surface text.
fn noun_base_form(surface: &str, details: &[&str]) -> Option<String> {
    let pos = details.first()?;
    if *pos == UNKNOWN_TAG {
        return is_unknown_noun(surface).then(|| surface.to_string());
    }
    if !pos.starts_with(NOUN_TAG) {
        return None;
    }
    match details.get(BASE_FORM_INDEX) {
        Some(base) if *base != "*" && !base.is_empty() => Some(base.to_string()),
        _ => Some(surface.to_string()),
    }
}

/// Unknown runs of letters, digits, katakana or kanji are treated as nouns,
/// as IPADIC's unknown-word definitions do. Hiragana, whitespace and
/// punctuation runs are not.
fn is_unknown_noun(surface: &str) -> bool {
    !surface.is_empty()
        && surface
            .chars()
            .all(|c| c.is_alphanumeric() && !is_hiragana(c))
}

fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{309f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_nouns() {
        let tokenizer = NounTokenizer::new().unwrap();
        assert_eq!(tokenizer.tokenize("猫が速く走る").unwrap(), "猫");
    }

    #[test]
    fn test_nouns_keep_original_order() {
        let tokenizer = NounTokenizer::new().unwrap();
        let result = tokenizer.tokenize("猫と犬").unwrap();
        assert_eq!(result, "猫 犬");
    }

    #[test]
    fn test_no_nouns_is_empty_string() {
        let tokenizer = NounTokenizer::new().unwrap();
        assert_eq!(tokenizer.tokenize("速く走る").unwrap(), "");
        assert_eq!(tokenizer.tokenize("").unwrap(), "");
    }

    #[test]
    fn test_noun_base_form_selection() {
        let noun = ["名詞", "一般", "*", "*", "*", "*", "猫", "ネコ", "ネコ"];
        assert_eq!(noun_base_form("猫", &noun), Some("猫".to_string()));

        let verb = ["動詞", "自立", "*", "*", "五段・ラ行", "基本形", "走る", "ハシル", "ハシル"];
        assert_eq!(noun_base_form("走る", &verb), None);

        let unknown = ["名詞", "一般", "*", "*", "*", "*", "*"];
        assert_eq!(noun_base_form("スクラムサイン", &unknown), Some("スクラムサイン".to_string()));

        let short = ["名詞", "固有名詞"];
        assert_eq!(noun_base_form("ABC", &short), Some("ABC".to_string()));

        assert_eq!(noun_base_form("x", &[]), None);
    }

    #[test]
    fn test_unknown_words_classified_by_characters() {
        let unk = ["UNK"];
        assert_eq!(noun_base_form("Scrum", &unk), Some("Scrum".to_string()));
        assert_eq!(noun_base_form("スクラムサイン", &unk), Some("スクラムサイン".to_string()));
        assert_eq!(noun_base_form("2024", &unk), Some("2024".to_string()));
        assert_eq!(noun_base_form("Ωμέγα", &unk), Some("Ωμέγα".to_string()));
        assert_eq!(noun_base_form("ぴよ", &unk), None);
        assert_eq!(noun_base_form("。", &unk), None);
        assert_eq!(noun_base_form("  ", &unk), None);
        assert_eq!(noun_base_form("", &unk), None);
    }

    #[test]
    fn test_unknown_latin_words_survive() {
        let tokenizer = NounTokenizer::new().unwrap();
        let result = tokenizer.tokenize("Scrumとスクラムサインを使う").unwrap();
        let words: Vec<&str> = result.split(' ').collect();
        assert!(words.contains(&"Scrum"), "{:?}", words);
        assert!(words.iter().any(|w| w.starts_with("スクラム")), "{:?}", words);
        assert!(!words.contains(&"を"));
        assert!(!words.contains(&"使う"));
    }
}
