/*
    This module is for storing grammars and their analysis results
*/

use indexmap::{IndexMap, IndexSet};

// The empty-string marker as it appears in computed sets
pub const EPSILON: &str = "ε";

// The keyword users write in production bodies to mean ε
pub const EPSILON_KEYWORD: &str = "epsilon";

// The end-of-input marker seeded into FOLLOW(start)
pub const END_MARKER: &str = "$";

// A set of terminal symbols (plus possibly ε or $), insertion-ordered
pub type SymbolSet = IndexSet<String>;

// Named symbol sets: FIRST/FOLLOW are keyed by non-terminal,
// PREDICT by the "LHS -> body" production key
pub type SetMap = IndexMap<String, SymbolSet>;

// Non-terminal -> ordered list of production bodies. The first key is
// the start symbol, so insertion order is meaningful.
pub type ProductionRules = IndexMap<String, Vec<String>>;

// Non-terminal row -> terminal column -> comma-joined rule labels
// (empty string means no rule)
pub type Ll1Table = IndexMap<String, IndexMap<String, String>>;

// One recorded micro-step of an analysis, replayable by index.
// The snapshot is taken at record time and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub description: String,
    pub partial_result: SetMap,
    pub pseudocode_line: usize,
}

// A symbol is a terminal iff it is wrapped in single quotes
pub fn is_terminal(symbol: &str) -> bool {
    symbol.len() >= 2 && symbol.starts_with('\'') && symbol.ends_with('\'')
}

// Non-terminal names follow identifier syntax: [A-Za-z_][A-Za-z0-9_']*
pub fn is_valid_nonterminal(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
}

// The full result of analyzing one grammar
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub production_rules: ProductionRules,

    pub first_sets: SetMap,
    pub follow_sets: SetMap,
    pub predict_sets: SetMap,

    pub first_steps: Vec<StepRecord>,
    pub follow_steps: Vec<StepRecord>,
    pub predict_steps: Vec<StepRecord>,

    pub ll1_table: Ll1Table,
    pub ll1: bool,
    pub ll1_description: String,

    // "LHS -> body" strings in first-seen order
    pub production_rule_list: Vec<String>,
    // "LHS -> body" -> 1-based rule number, used for R<n> labels
    pub production_rule_numbers: IndexMap<String, usize>,

    // Canonical BNF rendering of the grammar after EBNF expansion
    pub transformed_grammar: String,
}

impl Grammar {
    pub fn start_symbol(&self) -> &str {
        self.production_rules
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn non_terminals(&self) -> IndexSet<String> {
        self.production_rules.keys().cloned().collect()
    }
}
