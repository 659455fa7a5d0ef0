// Behavioral checks of the public matching API, independent of any file I/O

use glyphmatch::{
    match_by_permutation, match_exact, tokenize, Arrangements, CharacterInventory, Dictionary,
    PermutationMatcher, PermutationOutcome,
};

#[test]
fn test_tokenize_contract() {
    assert_eq!(tokenize("a.b c-d{e}").collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(tokenize(".-{} \t}").count(), 0);
    assert!(tokenize("  ..x--  {y}  ").all(|token| !token.is_empty()));
}

#[test]
fn test_inventory_contract() {
    let inventory = CharacterInventory::collect(["ab", "ba"]);
    assert_eq!(inventory.iter().collect::<Vec<_>>(), vec!['a', 'b']);
    assert!(CharacterInventory::collect(["  ", "\t"]).is_empty());
    assert!(CharacterInventory::collect(Vec::<String>::new()).is_empty());
}

#[test]
fn test_exact_match_contract() {
    let dictionary = Dictionary::from_lines("english", ["cat", "dog"]);
    let events: Vec<_> = match_exact(["cat", "fish"], &dictionary, 1).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source_token, "cat");
}

#[test]
fn test_permutation_contract() {
    let dictionary = Dictionary::from_lines("latin", ["ba"]);
    assert_eq!(match_by_permutation("ab", &dictionary), Some("ba".to_string()));

    let dictionary = Dictionary::from_lines("latin", ["aaaaa"]);
    assert!(matches!(
        PermutationMatcher::new().match_token("aaaaa", &dictionary),
        PermutationOutcome::Matched { length: 5, .. }
    ));

    let dictionary = Dictionary::from_lines("latin", ["qokedy"]);
    assert_eq!(match_by_permutation("qokedy", &dictionary), None);
}

/// Long tokens stay bounded by the length cap and budget
#[test]
fn test_pathological_token_with_budget() {
    let token: String = ('a'..='z').chain('A'..='Z').collect();
    let dictionary = Dictionary::from_lines("latin", ["0"]);
    let matcher = PermutationMatcher::new().with_candidate_budget(Some(250_000));

    let outcome = matcher.match_token(&token, &dictionary);
    assert_eq!(outcome, PermutationOutcome::Aborted { candidates_tested: 250_000 });
}

#[test]
fn test_arrangements_are_lazy() {
    let alphabet: Vec<char> = ('a'..='z').collect();
    let mut arrangements = Arrangements::new(&alphabet, 5);
    assert_eq!(arrangements.total(), Some(26u64.pow(5)));
    assert_eq!(arrangements.next_candidate(), Some("aaaaa"));
    assert_eq!(arrangements.next_candidate(), Some("aaaab"));
    // index 26 is the first wrap of the last position
    assert_eq!(arrangements.nth(24), Some("aaaba".to_string()));
}
