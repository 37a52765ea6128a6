use std::collections::BTreeSet;

use oddline_core::GenerationError;
use oddline_generate::{RhymeDictionary, WordSetConfig, WordSetGenerator};

#[test]
fn odd_word_appears_exactly_once_per_line() {
    let dictionary = RhymeDictionary::builtin();
    for seed in 0..100 {
        let config = WordSetConfig { lines: 6, seed };
        for line in WordSetGenerator::generate(&dictionary, &config).expect("valid config") {
            assert_eq!(line.items.len(), 6);

            let odd = &line.items[line.odd_index];
            assert_eq!(line.items.iter().filter(|word| *word == odd).count(), 1);
            assert!(dictionary.odd_words.contains(odd));

            let family = dictionary
                .families
                .iter()
                .find(|family| family.key == line.rhyme)
                .expect("rhyme family exists");
            let rhyming: BTreeSet<&String> = line
                .items
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != line.odd_index)
                .map(|(_, word)| word)
                .collect();
            assert_eq!(rhyming.len(), 5, "rhyming words must be distinct");
            assert!(rhyming.iter().all(|word| family.words.contains(word)));
        }
    }
}

#[test]
fn is_deterministic_with_the_same_seed() {
    let dictionary = RhymeDictionary::builtin();
    let config = WordSetConfig { lines: 4, seed: 7 };
    let a = WordSetGenerator::generate(&dictionary, &config).expect("run a");
    let b = WordSetGenerator::generate(&dictionary, &config).expect("run b");
    assert_eq!(a, b);
}

#[test]
fn custom_dictionary_is_used() {
    let dictionary: RhymeDictionary = serde_json::from_str(
        r#"{
            "families": [{"key": "ig", "words": ["big", "dig", "fig", "pig", "wig"]}],
            "odd_words": ["moon"]
        }"#,
    )
    .expect("parse dictionary");
    let config = WordSetConfig { lines: 3, seed: 5 };

    for line in WordSetGenerator::generate(&dictionary, &config).expect("valid config") {
        assert_eq!(line.rhyme, "ig");
        assert_eq!(line.items[line.odd_index], "moon");
        let mut rhyming: Vec<&str> = line
            .items
            .iter()
            .filter(|word| *word != "moon")
            .map(String::as_str)
            .collect();
        rhyming.sort_unstable();
        assert_eq!(rhyming, vec!["big", "dig", "fig", "pig", "wig"]);
    }
}

#[test]
fn rejects_zero_lines_before_checking_dictionary() {
    let empty = RhymeDictionary {
        families: Vec::new(),
        odd_words: Vec::new(),
    };
    assert_eq!(
        WordSetGenerator::generate(&empty, &WordSetConfig { lines: 0, seed: 1 }),
        Err(GenerationError::NonPositiveCount(0))
    );
    assert!(matches!(
        WordSetGenerator::generate(&empty, &WordSetConfig::default()),
        Err(GenerationError::InvalidDictionary(_))
    ));
}
