/*
    This module holds the set machinery shared by the FIRST, FOLLOW and
    PREDICT engines: named-set initialization, step recording, and FIRST
    of a single symbol or a symbol sequence
*/

mod first;
mod follow;
mod predict;

pub use first::compute_first_sets;
pub use follow::compute_follow_sets;
pub use predict::compute_predict_sets;

use itertools::Itertools;

use crate::grammar::{is_terminal, SetMap, StepRecord, SymbolSet, EPSILON, EPSILON_KEYWORD};

// Maps each key to an empty set, preserving key order
pub fn initialize_empty_sets<I>(keys: I) -> SetMap
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    keys.into_iter().map(|key| (key.into(), SymbolSet::new())).collect()
}

// Appends one step. The snapshot is cloned state captured by the caller;
// later mutation of the live sets never changes a recorded step.
pub fn record_step(description: String, snapshot: SetMap, steps: &mut Vec<StepRecord>, line: usize) {
    steps.push(StepRecord {
        description,
        partial_result: snapshot,
        pseudocode_line: line,
    });
}

// Renders a set the way step descriptions show it, e.g. {'a', ε}
pub fn display_set(set: &SymbolSet) -> String {
    format!("{{{}}}", set.iter().join(", "))
}

// FIRST of a single symbol: a terminal is its own FIRST, the epsilon
// keyword yields {ε}, and a non-terminal looks up its current FIRST set
pub fn first_of_symbol(symbol: &str, first_sets: &SetMap) -> SymbolSet {
    if is_terminal(symbol) {
        std::iter::once(symbol.to_string()).collect()
    } else if symbol == EPSILON_KEYWORD {
        std::iter::once(EPSILON.to_string()).collect()
    } else {
        first_sets.get(symbol).cloned().unwrap_or_default()
    }
}

// FIRST of a symbol sequence α with left-to-right ε-propagation: each
// symbol contributes its FIRST; iteration continues past a symbol only if
// that symbol's FIRST contains ε, and ε survives into the result only if
// every symbol of α derives it
pub fn first_of_alpha(alpha: &[&str], first_sets: &SetMap) -> SymbolSet {
    if alpha.is_empty() {
        return std::iter::once(EPSILON.to_string()).collect();
    }

    let mut result = SymbolSet::new();
    for (i, symbol) in alpha.iter().enumerate() {
        let first = first_of_symbol(symbol, first_sets);
        result.extend(first.iter().cloned());

        if !first.contains(EPSILON) {
            break;
        }
        if i < alpha.len() - 1 {
            result.shift_remove(EPSILON);
        }
    }
    return result;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::grammar::SetMap;

    fn symbol_set(symbols: &[&str]) -> SymbolSet {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn first_sets(entries: &[(&str, &[&str])]) -> SetMap {
        entries
            .iter()
            .map(|(key, symbols)| (key.to_string(), symbol_set(symbols)))
            .collect()
    }

    #[test]
    fn initialize_maps_every_key_to_an_empty_set() {
        let sets = initialize_empty_sets(["S", "A"]);
        assert_eq!(sets.len(), 2);
        assert!(sets["S"].is_empty());
        assert!(sets["A"].is_empty());
    }

    #[test]
    fn recorded_snapshots_are_independent() {
        let mut live = first_sets(&[("S", &[])]);
        let mut steps = Vec::new();

        record_step("before".to_string(), live.clone(), &mut steps, 0);
        live.get_mut("S").unwrap().insert("'a'".to_string());
        record_step("after".to_string(), live.clone(), &mut steps, 1);

        assert!(steps[0].partial_result["S"].is_empty());
        assert_eq!(steps[1].partial_result["S"], symbol_set(&["'a'"]));
    }

    #[test]
    fn first_of_symbol_cases() {
        let sets = first_sets(&[("A", &["'x'", "ε"])]);

        assert_eq!(first_of_symbol("'a'", &sets), symbol_set(&["'a'"]));
        assert_eq!(first_of_symbol("epsilon", &sets), symbol_set(&["ε"]));
        assert_eq!(first_of_symbol("A", &sets), symbol_set(&["'x'", "ε"]));
        assert_eq!(first_of_symbol("Unknown", &sets), symbol_set(&[]));
    }

    #[test]
    fn first_of_alpha_stops_at_non_nullable_symbol() {
        let sets = first_sets(&[("A", &["'a'"]), ("B", &["'b'"])]);
        assert_eq!(
            first_of_alpha(&["A", "B"], &sets),
            symbol_set(&["'a'"])
        );
    }

    #[test]
    fn first_of_alpha_propagates_epsilon() {
        let sets = first_sets(&[("A", &["ε"]), ("B", &["'b'"])]);
        assert_eq!(
            first_of_alpha(&["A", "'c'"], &sets),
            symbol_set(&["'c'"])
        );
        assert_eq!(
            first_of_alpha(&["A", "B"], &sets),
            symbol_set(&["'b'"])
        );
    }

    #[test]
    fn first_of_alpha_keeps_epsilon_when_all_nullable() {
        let sets = first_sets(&[("A", &["'a'", "ε"]), ("B", &["ε"])]);
        assert_eq!(
            first_of_alpha(&["A", "B"], &sets),
            symbol_set(&["'a'", "ε"])
        );
        assert_eq!(first_of_alpha(&[], &sets), symbol_set(&["ε"]));
    }

    #[test]
    fn display_set_formatting() {
        assert_eq!(display_set(&symbol_set(&["'a'", "ε"])), "{'a', ε}");
        assert_eq!(display_set(&symbol_set(&[])), "{}");
    }
}
