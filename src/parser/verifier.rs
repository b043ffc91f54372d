use itertools::Itertools;

use crate::error_handling::{AnalysisError, Result};
use crate::grammar::{is_terminal, ProductionRules, EPSILON_KEYWORD};

// Grammar operators are not symbol references
fn is_operator(symbol: &str) -> bool {
    symbol == "|" || symbol == "->"
}

// Checks that every non-terminal used in a production body is defined as
// a key of the production map. Quoted terminals and the epsilon keyword
// are never references.
pub fn verify_references(rules: &ProductionRules) -> Result<()> {
    let undefined: Vec<&str> = rules
        .values()
        .flatten()
        .flat_map(|body| body.split_whitespace())
        .filter(|symbol| {
            !is_terminal(symbol) && *symbol != EPSILON_KEYWORD && !is_operator(symbol)
        })
        .filter(|symbol| !rules.contains_key(*symbol))
        .unique()
        .collect();

    if undefined.is_empty() {
        return Ok(());
    }

    return Err(AnalysisError::Syntax(format!(
        "undefined non-terminal(s): {}",
        undefined.iter().join(", ")
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ProductionRules;

    fn rules(entries: &[(&str, &[&str])]) -> ProductionRules {
        entries
            .iter()
            .map(|(lhs, bodies)| {
                (
                    lhs.to_string(),
                    bodies.iter().map(|b| b.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn all_references_defined() {
        let rules = rules(&[("S", &["A 'b'", "epsilon"]), ("A", &["'a'"])]);
        assert_eq!(verify_references(&rules), Ok(()));
    }

    #[test]
    fn undefined_reference_is_named() {
        let rules = rules(&[("S", &["A"])]);
        assert_eq!(
            verify_references(&rules),
            Err(AnalysisError::Syntax(
                "undefined non-terminal(s): A".to_string()
            ))
        );
    }

    #[test]
    fn each_undefined_symbol_listed_once() {
        let rules = rules(&[("S", &["A B", "A"]), ("X", &["B"])]);
        assert_eq!(
            verify_references(&rules),
            Err(AnalysisError::Syntax(
                "undefined non-terminal(s): A, B".to_string()
            ))
        );
    }
}
