use super::{display_set, first_of_alpha, record_step};
use crate::grammar::{ProductionRules, SetMap, StepRecord, EPSILON, EPSILON_KEYWORD};

// Computes PREDICT(A -> α) for every production: FIRST(α) when α cannot
// vanish, otherwise (FIRST(α) \ {ε}) ∪ FOLLOW(A). Keys are the stable
// "A -> α" production strings. One pass suffices; no fixed point needed.
pub fn compute_predict_sets(
    rules: &ProductionRules,
    first_sets: &SetMap,
    follow_sets: &SetMap,
) -> (SetMap, Vec<StepRecord>) {
    let mut predict_sets = SetMap::new();
    let mut steps = Vec::new();

    record_step(
        "Line 0: Start computing PREDICT sets".to_string(),
        predict_sets.clone(),
        &mut steps,
        0,
    );

    for (non_terminal, productions) in rules {
        for production in productions {
            let key = format!("{} -> {}", non_terminal, production);

            record_step(
                format!("Line 1: Compute FIRST(α) for {}", key),
                predict_sets.clone(),
                &mut steps,
                1,
            );

            // A body of exactly `epsilon` is the one-symbol sequence [ε]
            let alpha: Vec<&str> = if production == EPSILON_KEYWORD {
                vec![EPSILON_KEYWORD]
            } else {
                production.split_whitespace().collect()
            };
            let first_alpha = first_of_alpha(&alpha, first_sets);

            if first_alpha.contains(EPSILON) {
                record_step(
                    "Line 2: ε ∈ FIRST(α), do sub-steps 2a, 2b".to_string(),
                    predict_sets.clone(),
                    &mut steps,
                    2,
                );

                let mut without_epsilon = first_alpha.clone();
                without_epsilon.shift_remove(EPSILON);
                record_step(
                    format!(
                        "Line 2a: (FIRST(α) \\ {{ε}}) = {}",
                        display_set(&without_epsilon)
                    ),
                    predict_sets.clone(),
                    &mut steps,
                    2,
                );

                let mut combined = without_epsilon;
                combined.extend(follow_sets[non_terminal].iter().cloned());
                record_step(
                    format!(
                        "Line 2b: PREDICT({}) = {} = (FIRST(α) \\ {{ε}}) ∪ FOLLOW({})",
                        key,
                        display_set(&combined),
                        non_terminal
                    ),
                    predict_sets.clone(),
                    &mut steps,
                    2,
                );

                predict_sets.insert(key, combined);
            } else {
                record_step(
                    format!(
                        "Line 3: ε ∉ FIRST(α) ⇒ PREDICT({}) = {}",
                        key,
                        display_set(&first_alpha)
                    ),
                    predict_sets.clone(),
                    &mut steps,
                    3,
                );
                predict_sets.insert(key, first_alpha);
            }
        }
    }

    record_step(
        "Line 4: Done computing PREDICT sets".to_string(),
        predict_sets.clone(),
        &mut steps,
        4,
    );

    return (predict_sets, steps);
}
