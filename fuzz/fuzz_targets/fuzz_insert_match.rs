#![no_main]

use arbitrary::Arbitrary;
use colcomplete::trie::Trie;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    words: Vec<String>,
    query: String,
    case_sensitive: bool,
}

fuzz_target!(|input: Input| {
    let trie = Trie::from_words(&input.words);
    let found = trie.matches(&input.query, input.case_sensitive);

    // Every suggestion is a stored word, listed once
    for word in &found {
        assert!(trie.contains(word), "suggested {word:?} was never inserted");
    }
    assert!(found.windows(2).all(|w| w[0] < w[1]));

    // Insertion order does not change the answer
    let reversed = Trie::from_words(input.words.iter().rev());
    assert_eq!(found, reversed.matches(&input.query, input.case_sensitive));
});
