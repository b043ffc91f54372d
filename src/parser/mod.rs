/*
    This module parses BNF grammar text into production rules
*/

mod verifier;

use crate::ebnf::EbnfTransformer;
use crate::error_handling::{AnalysisError, Result};
use crate::grammar::{is_valid_nonterminal, ProductionRules, EPSILON_KEYWORD};
use verifier::verify_references;

// Accepted shorthand escapes for the grammar operators
fn normalize_escapes(input: &str) -> String {
    input
        .replace("\\eps", "epsilon")
        .replace("\\to", "->")
        .replace("\\mid", "|")
}

fn contains_ebnf_sugar(input: &str) -> bool {
    input.contains('{') || input.contains('[') || input.contains('(')
}

// Parses grammar text into an ordered map of non-terminal -> production
// bodies. EBNF sugar is expanded first when present. Key insertion order
// is preserved: the first key is the start symbol.
pub fn parse_grammar(input: &str) -> Result<ProductionRules> {
    let input = if contains_ebnf_sugar(input) {
        EbnfTransformer::transform(input)?
    } else {
        input.to_string()
    };
    let input = normalize_escapes(&input);

    let mut rules = ProductionRules::new();
    for line in input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        parse_rule_line(line, &mut rules)?;
    }

    verify_references(&rules)?;
    return Ok(rules);
}

fn parse_rule_line(line: &str, rules: &mut ProductionRules) -> Result<()> {
    let parts: Vec<&str> = line.split("->").collect();
    match parts.len() {
        1 => {
            return Err(AnalysisError::Syntax(format!(
                "each rule must contain '->'. Rule: {}",
                line
            )))
        }
        2 => {}
        _ => {
            return Err(AnalysisError::Syntax(format!(
                "exactly one '->' expected in each rule. Rule: {}",
                line
            )))
        }
    }

    let non_terminal = parts[0].trim();
    if !is_valid_nonterminal(non_terminal) {
        return Err(AnalysisError::Syntax(format!(
            "left-hand side of the rule must be a valid non-terminal (e.g. A, S', Expr). Rule: {}",
            line
        )));
    }

    let alternatives = rules.entry(non_terminal.to_string()).or_default();
    for alternative in parts[1].split('|') {
        let trimmed = alternative.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::Syntax(
                "empty alternative is not allowed; use 'epsilon' explicitly if needed".to_string(),
            ));
        }
        // A body is either the single literal epsilon or a sequence of
        // symbols; epsilon mixed into a longer body is meaningless
        if trimmed != EPSILON_KEYWORD
            && trimmed
                .split_whitespace()
                .any(|symbol| symbol == EPSILON_KEYWORD)
        {
            return Err(AnalysisError::Syntax(format!(
                "'epsilon' must stand alone as a production body. Rule: {}",
                line
            )));
        }
        // Identical alternatives collapse so "LHS -> body" keys stay unique
        if !alternatives.iter().any(|existing| existing == trimmed) {
            alternatives.push(trimmed.to_string());
        }
    }

    return Ok(());
}
