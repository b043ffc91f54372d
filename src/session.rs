/*
    This module runs the full analysis pipeline and answers step queries
*/

use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::error_handling::{AnalysisError, Result};
use crate::grammar::{Grammar, Ll1Table, SetMap};
use crate::parser::parse_grammar;
use crate::sets::{compute_first_sets, compute_follow_sets, compute_predict_sets};
use crate::table::build_ll1_table;

// The replayable analyses a step can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    First,
    Follow,
    Predict,
    Ll1,
}

impl FromStr for AnalysisType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FIRST" => Ok(AnalysisType::First),
            "FOLLOW" => Ok(AnalysisType::Follow),
            "PREDICT" => Ok(AnalysisType::Predict),
            "LL1" => Ok(AnalysisType::Ll1),
            _ => Err(AnalysisError::UnknownAnalysisType(s.to_string())),
        }
    }
}

// One step of a trace, or the LL(1) table as a single-step result
#[derive(Debug, Clone, PartialEq)]
pub enum StepView {
    Trace {
        description: String,
        partial_result: SetMap,
        pseudocode_line: usize,
        step_index: usize,
        total_steps: usize,
    },
    Table {
        table: Ll1Table,
        ll1: bool,
        details: String,
    },
}

// Owns the single "current grammar" slot that step queries read from.
// Analysis is synchronous and single-threaded; a session must not be
// shared between concurrent callers without external synchronization,
// and even then callers sharing one session can overwrite each other's
// current grammar between analyze and get_step.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    current: Option<Grammar>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        AnalysisSession { current: None }
    }

    // Runs parse -> FIRST -> FOLLOW -> PREDICT -> LL(1) table. On success
    // the result becomes the current grammar; on failure the previous
    // current grammar is left untouched.
    pub fn analyze(&mut self, grammar_text: &str) -> Result<&Grammar> {
        let grammar = run_pipeline(grammar_text)?;
        self.current = Some(grammar);
        return Ok(self.current.as_ref().unwrap());
    }

    pub fn current(&self) -> Option<&Grammar> {
        self.current.as_ref()
    }

    // Fetches one step of the requested analysis. Out-of-range indices
    // clamp to the last step instead of failing; LL1 always answers with
    // the whole table as its only step.
    pub fn get_step(&self, analysis_type: AnalysisType, step_index: usize) -> Result<StepView> {
        let grammar = self.current.as_ref().ok_or(AnalysisError::NotInitialized)?;

        let steps = match analysis_type {
            AnalysisType::Ll1 => {
                return Ok(StepView::Table {
                    table: grammar.ll1_table.clone(),
                    ll1: grammar.ll1,
                    details: grammar.ll1_description.clone(),
                })
            }
            AnalysisType::First => &grammar.first_steps,
            AnalysisType::Follow => &grammar.follow_steps,
            AnalysisType::Predict => &grammar.predict_steps,
        };

        let index = step_index.min(steps.len().saturating_sub(1));
        let step = &steps[index];
        return Ok(StepView::Trace {
            description: step.description.clone(),
            partial_result: step.partial_result.clone(),
            pseudocode_line: step.pseudocode_line,
            step_index: index,
            total_steps: steps.len(),
        });
    }
}

fn run_pipeline(grammar_text: &str) -> Result<Grammar> {
    let production_rules = parse_grammar(grammar_text)?;

    let start_symbol = production_rules
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| AnalysisError::Syntax("grammar contains no rules".to_string()))?;

    // Number productions in first-seen order; R<n> labels come from here
    let mut production_rule_list = Vec::new();
    let mut production_rule_numbers = IndexMap::new();
    for (lhs, bodies) in &production_rules {
        for body in bodies {
            let rule = format!("{} -> {}", lhs, body);
            production_rule_numbers.insert(rule.clone(), production_rule_list.len() + 1);
            production_rule_list.push(rule);
        }
    }

    let transformed_grammar = production_rules
        .iter()
        .map(|(lhs, bodies)| format!("{} -> {}", lhs, bodies.iter().join(" | ")))
        .join("\n");

    let (first_sets, first_steps) = compute_first_sets(&production_rules);
    let (follow_sets, follow_steps) =
        compute_follow_sets(&production_rules, &first_sets, &start_symbol);
    let (predict_sets, predict_steps) =
        compute_predict_sets(&production_rules, &first_sets, &follow_sets);
    let table = build_ll1_table(&production_rules, &predict_sets, &production_rule_numbers);

    return Ok(Grammar {
        production_rules,
        first_sets,
        follow_sets,
        predict_sets,
        first_steps,
        follow_steps,
        predict_steps,
        ll1_table: table.table,
        ll1: table.ll1,
        ll1_description: table.description,
        production_rule_list,
        production_rule_numbers,
        transformed_grammar,
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const EXPR_GRAMMAR: &str = "E -> T E'\n\
                                E' -> '+' T E' | epsilon\n\
                                T -> F T'\n\
                                T' -> '*' F T' | epsilon\n\
                                F -> '(' E ')' | 'id'";

    #[test]
    fn step_query_before_analyze_fails() {
        let session = AnalysisSession::new();
        assert_eq!(
            session.get_step(AnalysisType::First, 0),
            Err(AnalysisError::NotInitialized)
        );
    }

    #[test]
    fn analysis_type_parsing() {
        assert_eq!("first".parse::<AnalysisType>(), Ok(AnalysisType::First));
        assert_eq!("FOLLOW".parse::<AnalysisType>(), Ok(AnalysisType::Follow));
        assert_eq!("Predict".parse::<AnalysisType>(), Ok(AnalysisType::Predict));
        assert_eq!("ll1".parse::<AnalysisType>(), Ok(AnalysisType::Ll1));
        assert_eq!(
            "SLR".parse::<AnalysisType>(),
            Err(AnalysisError::UnknownAnalysisType("SLR".to_string()))
        );
    }

    #[test]
    fn analyze_populates_every_result() {
        let mut session = AnalysisSession::new();
        let grammar = session.analyze(EXPR_GRAMMAR).unwrap();

        assert_eq!(grammar.start_symbol(), "E");
        assert!(grammar.ll1);
        assert_eq!(grammar.production_rule_list.len(), 8);
        assert_eq!(grammar.production_rule_numbers["F -> 'id'"], 8);
        assert!(!grammar.first_steps.is_empty());
        assert!(!grammar.follow_steps.is_empty());
        assert!(!grammar.predict_steps.is_empty());
    }

    #[test]
    fn step_queries_are_idempotent() {
        let mut session = AnalysisSession::new();
        session.analyze(EXPR_GRAMMAR).unwrap();

        let once = session.get_step(AnalysisType::Follow, 3).unwrap();
        let twice = session.get_step(AnalysisType::Follow, 3).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn out_of_range_index_clamps_to_the_last_step() {
        let mut session = AnalysisSession::new();
        let total = session.analyze(EXPR_GRAMMAR).unwrap().first_steps.len();

        let last = session.get_step(AnalysisType::First, total - 1).unwrap();
        let beyond = session.get_step(AnalysisType::First, total + 1000).unwrap();
        assert_eq!(beyond, last);

        let StepView::Trace {
            step_index,
            total_steps,
            ..
        } = beyond
        else {
            panic!("expected a trace step");
        };
        assert_eq!(step_index, total - 1);
        assert_eq!(total_steps, total);
    }

    #[test]
    fn ll1_step_is_the_whole_table() {
        let mut session = AnalysisSession::new();
        session.analyze(EXPR_GRAMMAR).unwrap();

        let StepView::Table { table, ll1, details } =
            session.get_step(AnalysisType::Ll1, 7).unwrap()
        else {
            panic!("expected the table view");
        };
        assert!(ll1);
        assert_eq!(table["E"]["'id'"], "R1");
        assert!(details.starts_with("LL(1) table is built"));
    }

    #[test]
    fn conflicting_grammar_is_flagged() {
        let mut session = AnalysisSession::new();
        let grammar = session.analyze("S -> 'a' | 'a' 'b'").unwrap();

        assert!(!grammar.ll1);
        assert_eq!(grammar.ll1_table["S"]["'a'"], "R1, R2");
    }

    #[test]
    fn failed_analyze_keeps_the_previous_grammar() {
        let mut session = AnalysisSession::new();
        session.analyze("S -> 'a'").unwrap();

        assert!(session.analyze("S -> Undefined").is_err());

        let grammar = session.current().unwrap();
        assert_eq!(grammar.start_symbol(), "S");
        assert!(session.get_step(AnalysisType::First, 0).is_ok());
    }

    #[test]
    fn ebnf_round_trips_through_the_transformed_text() {
        let mut session = AnalysisSession::new();
        let rules = session.analyze("S -> [ 'a' ]").unwrap().production_rules.clone();
        let transformed = session.current().unwrap().transformed_grammar.clone();

        assert_eq!(transformed, "S -> _opt1\n_opt1 -> 'a' | epsilon");
        assert_eq!(parse_grammar(&transformed).unwrap(), rules);
    }

    #[test]
    fn epsilon_inside_a_longer_body_is_rejected_not_a_crash() {
        // epsilon next to other symbols used to slip through parsing,
        // reach the table builder as a phantom terminal with no column,
        // and abort the whole analysis
        let mut session = AnalysisSession::new();
        let result = session.analyze("T -> B S\nB -> epsilon | 'b'\nS -> epsilon 'a'");

        assert!(matches!(result, Err(AnalysisError::Syntax(_))));
        assert!(session.current().is_none());
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut session = AnalysisSession::new();
        assert!(matches!(
            session.analyze(""),
            Err(AnalysisError::Syntax(_))
        ));
        assert!(session.current().is_none());
    }
}
