use super::{display_set, first_of_symbol, initialize_empty_sets, record_step};
use crate::grammar::{ProductionRules, SetMap, StepRecord, SymbolSet, EPSILON, EPSILON_KEYWORD};

// Computes FIRST(A) for every non-terminal by least-fixed-point iteration:
// full passes over all productions until one pass changes nothing. Sets
// only grow and are bounded by the terminal alphabet plus ε, so the loop
// terminates. Every micro-decision lands in the step trace.
pub fn compute_first_sets(rules: &ProductionRules) -> (SetMap, Vec<StepRecord>) {
    let mut first_sets = initialize_empty_sets(rules.keys().cloned());
    let mut steps = Vec::new();

    record_step(
        "Initialize FIRST sets = ∅".to_string(),
        first_sets.clone(),
        &mut steps,
        0,
    );

    loop {
        let mut changed = false;

        for (non_terminal, productions) in rules {
            for production in productions {
                let before = first_sets.clone();
                process_production(non_terminal, production, rules, &mut first_sets, &mut steps);
                if first_sets != before {
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    record_step(
        "FIRST sets stabilized".to_string(),
        first_sets.clone(),
        &mut steps,
        15,
    );

    return (first_sets, steps);
}

// Applies one production A -> body to the running FIRST sets
fn process_production(
    non_terminal: &str,
    production: &str,
    rules: &ProductionRules,
    first_sets: &mut SetMap,
    steps: &mut Vec<StepRecord>,
) {
    // ε-production contributes exactly {ε}
    if production == EPSILON_KEYWORD {
        first_sets
            .get_mut(non_terminal)
            .unwrap()
            .insert(EPSILON.to_string());
        record_step(
            format!(
                "Step 1: Production is ε, so FIRST({}) gains ε",
                non_terminal
            ),
            first_sets.clone(),
            steps,
            1,
        );
        return;
    }

    let symbols: Vec<&str> = production.split_whitespace().collect();
    let leading = symbols[0];

    // Leading terminal contributes itself and nothing else
    if !rules.contains_key(leading) {
        first_sets
            .get_mut(non_terminal)
            .unwrap()
            .insert(leading.to_string());
        record_step(
            format!(
                "Step 2: Production starts with terminal {}, so FIRST({}) gains {}",
                leading, non_terminal, leading
            ),
            first_sets.clone(),
            steps,
            2,
        );
        return;
    }

    record_step(
        format!(
            "Step 3: Production starts with non-terminal {}; walk the body left to right",
            leading
        ),
        first_sets.clone(),
        steps,
        3,
    );

    let mut accumulated = SymbolSet::new();
    record_step(
        "Step 4: Initialize accumulator = ∅".to_string(),
        first_sets.clone(),
        steps,
        4,
    );

    // Left-to-right ε-propagation over the body: move past a symbol only
    // while its FIRST derives ε; ε survives only if every symbol does
    for (i, symbol) in symbols.iter().enumerate() {
        let first = first_of_symbol(symbol, first_sets);
        accumulated.extend(first.iter().cloned());
        record_step(
            format!(
                "Step 7: Add FIRST({}) = {} to the accumulator",
                symbol,
                display_set(&first)
            ),
            first_sets.clone(),
            steps,
            7,
        );

        if !first.contains(EPSILON) {
            break;
        }
        if i < symbols.len() - 1 {
            accumulated.shift_remove(EPSILON);
            record_step(
                format!(
                    "Step 10: ε ∈ FIRST({}); drop ε and continue with the next symbol",
                    symbol
                ),
                first_sets.clone(),
                steps,
                10,
            );
        }
    }

    let updated = {
        let target = first_sets.get_mut(non_terminal).unwrap();
        let before_len = target.len();
        target.extend(accumulated);
        target.len() > before_len
    };

    if updated {
        record_step(
            format!(
                "Step 13: Update FIRST({}) = {}",
                non_terminal,
                display_set(&first_sets[non_terminal])
            ),
            first_sets.clone(),
            steps,
            13,
        );
    }

    record_step(
        format!(
            "Step 14: End processing production {} -> {}",
            non_terminal, production
        ),
        first_sets.clone(),
        steps,
        14,
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::parse_grammar;

    fn symbol_set(symbols: &[&str]) -> SymbolSet {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn epsilon_production_yields_epsilon() {
        let rules = parse_grammar("S -> epsilon").unwrap();
        let (first_sets, _) = compute_first_sets(&rules);
        assert_eq!(first_sets["S"], symbol_set(&["ε"]));
    }

    #[test]
    fn nullable_prefix_is_skipped() {
        let rules = parse_grammar("S -> A 'b'\nA -> epsilon").unwrap();
        let (first_sets, _) = compute_first_sets(&rules);

        assert_eq!(first_sets["S"], symbol_set(&["'b'"]));
        assert_eq!(first_sets["A"], symbol_set(&["ε"]));
    }

    #[test]
    fn epsilon_survives_only_a_fully_nullable_body() {
        let rules = parse_grammar("S -> A B\nA -> 'a' | epsilon\nB -> epsilon").unwrap();
        let (first_sets, _) = compute_first_sets(&rules);
        assert_eq!(first_sets["S"], symbol_set(&["'a'", "ε"]));
    }

    #[test]
    fn expression_grammar_first_sets() {
        let rules = parse_grammar(
            "E -> T E'\n\
             E' -> '+' T E' | epsilon\n\
             T -> F T'\n\
             T' -> '*' F T' | epsilon\n\
             F -> '(' E ')' | 'id'",
        )
        .unwrap();
        let (first_sets, _) = compute_first_sets(&rules);

        assert_eq!(first_sets["E"], symbol_set(&["'('", "'id'"]));
        assert_eq!(first_sets["E'"], symbol_set(&["'+'", "ε"]));
        assert_eq!(first_sets["T"], symbol_set(&["'('", "'id'"]));
        assert_eq!(first_sets["T'"], symbol_set(&["'*'", "ε"]));
        assert_eq!(first_sets["F"], symbol_set(&["'('", "'id'"]));
    }

    #[test]
    fn recorded_sets_only_grow() {
        let rules = parse_grammar(
            "S -> A 'b' | B\nA -> epsilon | 'a'\nB -> A S | 'c'",
        )
        .unwrap();
        let (_, steps) = compute_first_sets(&rules);

        for window in steps.windows(2) {
            for (key, earlier) in &window[0].partial_result {
                let later = &window[1].partial_result[key];
                assert!(
                    earlier.is_subset(later),
                    "FIRST({}) shrank between steps",
                    key
                );
            }
        }
    }

    #[test]
    fn trace_starts_at_init_and_ends_stable() {
        let rules = parse_grammar("S -> 'a'").unwrap();
        let (first_sets, steps) = compute_first_sets(&rules);

        assert_eq!(steps.first().unwrap().pseudocode_line, 0);
        assert_eq!(steps.last().unwrap().pseudocode_line, 15);
        assert_eq!(steps.last().unwrap().partial_result, first_sets);
    }
}
