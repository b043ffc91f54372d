use super::{display_set, first_of_alpha, initialize_empty_sets, record_step};
use crate::grammar::{ProductionRules, SetMap, StepRecord, END_MARKER, EPSILON};

// Computes FOLLOW(A) for every non-terminal. FOLLOW(start) is seeded with
// the end-marker $, then full passes over all productions run until a pass
// changes nothing. For each occurrence of a non-terminal B in a body, the
// suffix β after it contributes FIRST(β)\{ε}, and FOLLOW(lhs) flows in
// when β is empty or nullable.
pub fn compute_follow_sets(
    rules: &ProductionRules,
    first_sets: &SetMap,
    start_symbol: &str,
) -> (SetMap, Vec<StepRecord>) {
    let mut follow_sets = initialize_empty_sets(rules.keys().cloned());
    let mut steps = Vec::new();

    record_step(
        "Line 1: FOLLOW(A) = ∅ for all A (Initialize)".to_string(),
        follow_sets.clone(),
        &mut steps,
        1,
    );

    follow_sets
        .get_mut(start_symbol)
        .unwrap()
        .insert(END_MARKER.to_string());
    record_step(
        "Line 2: if A = S then".to_string(),
        follow_sets.clone(),
        &mut steps,
        2,
    );
    record_step(
        format!("Line 3: FLW({}) ← {{ $ }}", start_symbol),
        follow_sets.clone(),
        &mut steps,
        3,
    );
    record_step(
        "Line 4: end if".to_string(),
        follow_sets.clone(),
        &mut steps,
        4,
    );

    let mut pass = 0;
    loop {
        pass += 1;
        record_step(
            format!("Line 5: (Iteration #{}) Repeat until no changes", pass),
            follow_sets.clone(),
            &mut steps,
            5,
        );

        let mut changed = false;
        for (lhs, productions) in rules {
            for production in productions {
                let symbols: Vec<&str> = production.split_whitespace().collect();
                for (i, current) in symbols.iter().enumerate() {
                    // Terminals and the epsilon keyword have no FOLLOW set
                    if !follow_sets.contains_key(*current) {
                        continue;
                    }

                    if i + 1 < symbols.len() {
                        let beta = &symbols[i + 1..];
                        let first_beta = first_of_alpha(beta, first_sets);
                        record_step(
                            format!(
                                "Line 6: Compute FIRST(β) for β = {} ⇒ {}",
                                beta.join(" "),
                                display_set(&first_beta)
                            ),
                            follow_sets.clone(),
                            &mut steps,
                            6,
                        );

                        let mut without_epsilon = first_beta.clone();
                        without_epsilon.shift_remove(EPSILON);
                        if !without_epsilon.is_empty() {
                            let target = follow_sets.get_mut(*current).unwrap();
                            let before_len = target.len();
                            target.extend(without_epsilon.iter().cloned());
                            if target.len() > before_len {
                                changed = true;
                                record_step(
                                    format!(
                                        "Line 7: FLW({}) ← FLW({}) ∪ (FIRST(β) \\ {{ε}}) ⇒ {}",
                                        current,
                                        current,
                                        display_set(&without_epsilon)
                                    ),
                                    follow_sets.clone(),
                                    &mut steps,
                                    7,
                                );
                            }
                        }

                        record_step(
                            "Line 8: if ε ∈ FIRST(β) then".to_string(),
                            follow_sets.clone(),
                            &mut steps,
                            8,
                        );
                        if first_beta.contains(EPSILON) {
                            changed |=
                                add_follow_of_lhs(lhs, *current, &mut follow_sets, &mut steps);
                        }
                        record_step(
                            "Line 10: end if".to_string(),
                            follow_sets.clone(),
                            &mut steps,
                            10,
                        );
                    } else {
                        record_step(
                            format!(
                                "Line 8: if {} is last in the production (B → α A) then",
                                current
                            ),
                            follow_sets.clone(),
                            &mut steps,
                            8,
                        );
                        changed |= add_follow_of_lhs(lhs, *current, &mut follow_sets, &mut steps);
                        record_step(
                            "Line 10: end if".to_string(),
                            follow_sets.clone(),
                            &mut steps,
                            10,
                        );
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }

    record_step(
        "Line 11: FOLLOW sets stabilized".to_string(),
        follow_sets.clone(),
        &mut steps,
        11,
    );

    return (follow_sets, steps);
}

// FOLLOW(current) ∪= FOLLOW(lhs); true if anything was added
fn add_follow_of_lhs(
    lhs: &str,
    current: &str,
    follow_sets: &mut SetMap,
    steps: &mut Vec<StepRecord>,
) -> bool {
    let lhs_follow = follow_sets[lhs].clone();

    let target = follow_sets.get_mut(current).unwrap();
    let before_len = target.len();
    target.extend(lhs_follow.iter().cloned());
    let updated = target.len() > before_len;

    if updated {
        record_step(
            format!(
                "Line 9: FLW({}) ← FLW({}) ∪ FOLLOW({}) ⇒ {}",
                current,
                current,
                lhs,
                display_set(&lhs_follow)
            ),
            follow_sets.clone(),
            steps,
            9,
        );
    }
    return updated;
}
