use itertools::Itertools;

use super::parser::{EbnfNode, EbnfParser};
use crate::error_handling::Result;
use crate::grammar::EPSILON_KEYWORD;

// A synthesized BNF production for an Alternative/Optional/Repetition node
#[derive(Debug, PartialEq, Clone)]
pub struct EbnfProduction {
    pub lhs: String,
    pub rhs: String,
}

// Rewrites EBNF rules into flat BNF, synthesizing helper non-terminals.
// The counter is shared across all node kinds within one transform call,
// so generated names are unique for the whole run.
pub struct EbnfTransformer {
    counter: u32,
    synthesized: Vec<EbnfProduction>,
}

impl EbnfTransformer {
    // Transforms a full grammar text. Lines without `->` pass through
    // unchanged; blank lines are dropped. All synthesized productions are
    // appended after the rewritten rules.
    pub fn transform(input: &str) -> Result<String> {
        let mut transformer = EbnfTransformer {
            counter: 0,
            synthesized: Vec::new(),
        };

        let mut output = String::new();
        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let Some(arrow) = line.find("->") else {
                output.push_str(line);
                output.push('\n');
                continue;
            };

            let lhs = line[..arrow].trim();
            let rhs = line[arrow + 2..].trim();

            let node = EbnfParser::new(rhs).parse_expression()?;
            let bnf_rhs = transformer.transform_node(&node);
            output.push_str(&format!("{} -> {}\n", lhs, bnf_rhs));
        }

        for production in &transformer.synthesized {
            output.push_str(&format!("{} -> {}\n", production.lhs, production.rhs));
        }

        return Ok(output);
    }

    fn fresh_nonterminal(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("_{}{}", prefix, self.counter)
    }

    // Returns the BNF string standing in for the node, appending any
    // helper productions along the way
    fn transform_node(&mut self, node: &EbnfNode) -> String {
        match node {
            EbnfNode::Terminal(text) => text.clone(),
            EbnfNode::NonTerminal(name) => name.clone(),
            EbnfNode::Sequence(elements) => elements
                .iter()
                .map(|child| self.transform_node(child))
                .join(" "),
            EbnfNode::Alternative(alternatives) => {
                let name = self.fresh_nonterminal("alt");
                let rhs = alternatives
                    .iter()
                    .map(|child| self.transform_node(child))
                    .join(" | ");
                self.synthesized.push(EbnfProduction {
                    lhs: name.clone(),
                    rhs,
                });
                name
            }
            EbnfNode::Optional(inner) => {
                let name = self.fresh_nonterminal("opt");
                let inner = self.transform_node(inner);
                self.synthesized.push(EbnfProduction {
                    lhs: name.clone(),
                    rhs: format!("{} | {}", inner, EPSILON_KEYWORD),
                });
                name
            }
            EbnfNode::Repetition(inner) => {
                let name = self.fresh_nonterminal("rep");
                let inner = self.transform_node(inner);
                // Right-recursive expansion keeps the grammar LL-friendly
                self.synthesized.push(EbnfProduction {
                    lhs: name.clone(),
                    rhs: format!("{} {} | {}", inner, name, EPSILON_KEYWORD),
                });
                name
            }
        }
    }
}
