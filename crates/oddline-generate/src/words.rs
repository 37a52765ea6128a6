use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use oddline_core::{GenerationError, RandomSource, Result, WordLine, Xorshift32, validate_count};

pub const DEFAULT_LINES: usize = 10;
pub const DEFAULT_SEED: u32 = 2024;
/// Rhyming words per line; the odd word makes the line one longer.
pub const RHYME_WORDS_PER_LINE: usize = 5;
pub const WORD_LINE_LENGTH: usize = RHYME_WORDS_PER_LINE + 1;

const BUILTIN_FAMILIES: &[(&str, &[&str])] = &[
    ("at", &["cat", "bat", "hat", "mat", "sat", "rat"]),
    ("an", &["fan", "man", "pan", "ran", "tan", "van"]),
    ("it", &["fit", "hit", "kit", "lit", "pit", "sit"]),
    ("ot", &["cot", "dot", "hot", "lot", "pot", "tot"]),
];

const BUILTIN_ODD_WORDS: &[&str] = &["tree", "book", "sun", "desk", "shoe", "lake", "bird"];

/// Words sharing one phonetic ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeFamily {
    pub key: String,
    pub words: Vec<String>,
}

/// Rhyme families plus the pool odd words are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeDictionary {
    pub families: Vec<RhymeFamily>,
    pub odd_words: Vec<String>,
}

impl RhymeDictionary {
    /// The consonant-vowel-consonant dictionary the word game ships with.
    pub fn builtin() -> Self {
        let families = BUILTIN_FAMILIES
            .iter()
            .map(|(key, words)| RhymeFamily {
                key: (*key).to_string(),
                words: words.iter().map(|word| (*word).to_string()).collect(),
            })
            .collect();
        let odd_words = BUILTIN_ODD_WORDS
            .iter()
            .map(|word| (*word).to_string())
            .collect();
        Self {
            families,
            odd_words,
        }
    }

    /// Check that every line drawn from this dictionary has a unique odd word.
    ///
    /// This checks:
    /// - at least one family and one odd word
    /// - each family has enough distinct words for one line
    /// - no odd word also belongs to a family
    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            return Err(GenerationError::InvalidDictionary(
                "dictionary has no rhyme families".to_string(),
            ));
        }
        if self.odd_words.is_empty() {
            return Err(GenerationError::InvalidDictionary(
                "dictionary has no odd words".to_string(),
            ));
        }

        let mut rhyming = BTreeSet::new();
        for family in &self.families {
            let distinct: BTreeSet<&str> = family.words.iter().map(String::as_str).collect();
            if distinct.len() != family.words.len() {
                return Err(GenerationError::InvalidDictionary(format!(
                    "family '{}' repeats a word",
                    family.key
                )));
            }
            if distinct.len() < RHYME_WORDS_PER_LINE {
                return Err(GenerationError::InvalidDictionary(format!(
                    "family '{}' has {} words, need at least {}",
                    family.key,
                    distinct.len(),
                    RHYME_WORDS_PER_LINE
                )));
            }
            rhyming.extend(distinct);
        }

        if let Some(word) = self
            .odd_words
            .iter()
            .find(|word| rhyming.contains(word.as_str()))
        {
            return Err(GenerationError::InvalidDictionary(format!(
                "odd word '{word}' also appears in a rhyme family"
            )));
        }
        Ok(())
    }
}

impl Default for RhymeDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSetConfig {
    pub lines: usize,
    pub seed: u32,
}

impl Default for WordSetConfig {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES,
            seed: DEFAULT_SEED,
        }
    }
}

/// Rhyme-set lines with one non-rhyming word spliced in.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSetGenerator;

impl WordSetGenerator {
    pub const ID: &'static str = "categorical.rhyme";

    pub fn generate(dictionary: &RhymeDictionary, config: &WordSetConfig) -> Result<Vec<WordLine>> {
        validate_count(config.lines)?;
        dictionary.validate()?;

        let mut rng = Xorshift32::new(config.seed);
        let lines: Vec<WordLine> = (0..config.lines)
            .map(|_| {
                let family = &dictionary.families[rng.pick_index(dictionary.families.len())];
                let mut items = sample_distinct(&family.words, RHYME_WORDS_PER_LINE, &mut rng);
                let odd = dictionary.odd_words[rng.pick_index(dictionary.odd_words.len())].clone();
                let odd_index = rng.pick_index(WORD_LINE_LENGTH);
                items.insert(odd_index, odd);
                WordLine {
                    items,
                    odd_index,
                    rhyme: family.key.clone(),
                }
            })
            .collect();

        debug!(
            generator = Self::ID,
            lines = lines.len(),
            families = dictionary.families.len(),
            seed = config.seed,
            "lines generated"
        );
        Ok(lines)
    }
}

/// Partial Fisher-Yates over indices: `count` distinct words in draw order.
fn sample_distinct(pool: &[String], count: usize, rng: &mut impl RandomSource) -> Vec<String> {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    for slot in 0..count {
        let swap_with = rng.pick_between(slot, order.len() - 1);
        order.swap(slot, swap_with);
    }
    order[..count]
        .iter()
        .map(|index| pool[*index].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn matches_reference_batch_for_seed_7() {
        let config = WordSetConfig { lines: 3, seed: 7 };
        let lines =
            WordSetGenerator::generate(&RhymeDictionary::builtin(), &config).expect("valid config");

        assert_eq!(lines[0].items, words(&["cat", "tree", "rat", "sat", "hat", "mat"]));
        assert_eq!((lines[0].odd_index, lines[0].rhyme.as_str()), (1, "at"));
        assert_eq!(lines[1].items, words(&["fan", "van", "pan", "tan", "sun", "man"]));
        assert_eq!((lines[1].odd_index, lines[1].rhyme.as_str()), (4, "an"));
        assert_eq!(lines[2].items, words(&["sit", "lit", "hit", "kit", "bird", "fit"]));
        assert_eq!((lines[2].odd_index, lines[2].rhyme.as_str()), (4, "it"));
    }

    #[test]
    fn builtin_dictionary_is_valid() {
        assert_eq!(RhymeDictionary::builtin().validate(), Ok(()));
    }

    #[test]
    fn rejects_odd_word_that_rhymes() {
        let mut dictionary = RhymeDictionary::builtin();
        dictionary.odd_words.push("hat".to_string());
        assert!(matches!(
            dictionary.validate(),
            Err(GenerationError::InvalidDictionary(_))
        ));
    }

    #[test]
    fn rejects_small_or_repeating_families() {
        let mut dictionary = RhymeDictionary::builtin();
        dictionary.families[0].words.truncate(4);
        assert!(matches!(
            dictionary.validate(),
            Err(GenerationError::InvalidDictionary(_))
        ));

        let mut dictionary = RhymeDictionary::builtin();
        dictionary.families[1].words[0] = "man".to_string();
        assert!(matches!(
            dictionary.validate(),
            Err(GenerationError::InvalidDictionary(_))
        ));
    }

    #[test]
    fn sampling_exactly_the_pool_size_uses_every_word() {
        let pool = words(&["a", "b", "c", "d", "e"]);
        let mut rng = Xorshift32::new(11);
        let mut sample = sample_distinct(&pool, 5, &mut rng);
        sample.sort();
        assert_eq!(sample, pool);
    }
}
