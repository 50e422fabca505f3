//! Fuzzy "did you mean" suggestion over candidate names.
//!
//! Exact substring search lives on the book itself
//! ([`AddressBook::find_record`](crate::book::AddressBook::find_record));
//! this module ranks candidates by Levenshtein edit distance when the user's
//! query doesn't match anything exactly.

use crate::book::RecordId;
use crate::error::{Result, RolodexError};
use crate::model::Record;

/// Levenshtein edit distance: the minimum number of single-character
/// insertions, deletions, and substitutions turning `a` into `b`.
/// Two-row dynamic programming over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// The candidate whose name is closest to `query` by edit distance.
/// Ties break toward the earliest candidate (stable argmin). An empty
/// candidate list has no minimum and fails with
/// [`RolodexError::NoCandidates`].
pub fn suggest_closest<'a>(
    query: &str,
    candidates: &[(RecordId, &'a Record)],
) -> Result<&'a Record> {
    let mut best: Option<(usize, &'a Record)> = None;
    for &(_, record) in candidates {
        let distance = levenshtein(query, record.name().as_str());
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, record)),
        }
    }
    best.map(|(_, record)| record)
        .ok_or(RolodexError::NoCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Name;

    fn record(name: &str) -> Record {
        Record::new(Name::new(name).unwrap(), None)
    }

    // --- Distance ---

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_is_symmetric() {
        assert_eq!(
            levenshtein("Anna Kowalska", "Ana Kowalska"),
            levenshtein("Ana Kowalska", "Anna Kowalska")
        );
        assert_eq!(levenshtein("Anna Kowalska", "Ana Kowalska"), 1);
    }

    #[test]
    fn test_levenshtein_multibyte_chars_count_as_one() {
        assert_eq!(levenshtein("Łukasz", "Lukasz"), 1);
        assert_eq!(levenshtein("zażółć", "zażółć"), 0);
    }

    // --- Suggestion ---

    #[test]
    fn test_suggests_closest_name() {
        let anna = record("Anna Kowalska");
        let jan = record("Jan Nowak");
        let candidates = vec![(1, &anna), (2, &jan)];

        let suggested = suggest_closest("Ana Kowalska", &candidates).unwrap();
        assert_eq!(suggested.name().as_str(), "Anna Kowalska");
    }

    #[test]
    fn test_tie_breaks_to_first_candidate() {
        // Both names are distance 1 from the query.
        let first = record("Anka");
        let second = record("Ania");
        let candidates = vec![(7, &first), (8, &second)];
        let distance_first = levenshtein("Anna", first.name().as_str());
        let distance_second = levenshtein("Anna", second.name().as_str());
        assert_eq!(distance_first, distance_second);

        let suggested = suggest_closest("Anna", &candidates).unwrap();
        assert_eq!(suggested.name().as_str(), "Anka");
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        match suggest_closest("Anna", &[]) {
            Err(RolodexError::NoCandidates) => {}
            other => panic!("Expected NoCandidates, got {:?}", other),
        }
    }
}
