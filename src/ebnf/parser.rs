use super::lexer::{tokenize, Token};
use crate::error_handling::{AnalysisError, Result};

// One node of the parsed EBNF right-hand side. Built once per input line,
// consumed once by the transformer, then discarded.
#[derive(Debug, PartialEq, Clone)]
pub enum EbnfNode {
    Terminal(String),
    NonTerminal(String),
    Sequence(Vec<EbnfNode>),
    Alternative(Vec<EbnfNode>),
    Optional(Box<EbnfNode>),
    Repetition(Box<EbnfNode>),
}

// Recursive-descent parser over the token stream:
//   expression := term ('|' term)*
//   term       := factor*           (until a closing delimiter, '|' or end)
//   factor     := IDENTIFIER | '(' expression ')'
//               | '[' expression ']' | '{' expression '}'
pub struct EbnfParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl EbnfParser {
    pub fn new(input: &str) -> Self {
        EbnfParser {
            tokens: tokenize(input),
            pos: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::End)
    }

    fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        self.pos += 1;
        return token;
    }

    // Consumes the current token if it equals the expected one
    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.consume();
            return true;
        }
        return false;
    }

    // An Alternative node is built only if at least one '|' is present;
    // a lone term is returned unwrapped
    pub fn parse_expression(&mut self) -> Result<EbnfNode> {
        let left = self.parse_term()?;

        if *self.peek() != Token::Pipe {
            return Ok(left);
        }

        let mut alternatives = vec![left];
        while self.eat(&Token::Pipe) {
            alternatives.push(self.parse_term()?);
        }
        return Ok(EbnfNode::Alternative(alternatives));
    }

    // A sequence of exactly one factor collapses to that factor
    fn parse_term(&mut self) -> Result<EbnfNode> {
        let mut elements = Vec::new();

        while !matches!(
            self.peek(),
            Token::RParen | Token::RBracket | Token::RBrace | Token::Pipe | Token::End
        ) {
            elements.push(self.parse_factor()?);
        }

        if elements.len() == 1 {
            return Ok(elements.remove(0));
        }
        return Ok(EbnfNode::Sequence(elements));
    }

    fn parse_factor(&mut self) -> Result<EbnfNode> {
        match self.peek().clone() {
            Token::Identifier(text) => {
                self.consume();
                if text.starts_with('\'') {
                    Ok(EbnfNode::Terminal(text))
                } else {
                    Ok(EbnfNode::NonTerminal(text))
                }
            }
            Token::LParen => {
                self.consume();
                let node = self.parse_expression()?;
                if !self.eat(&Token::RParen) {
                    return Err(AnalysisError::Syntax("expected ')' token".to_string()));
                }
                Ok(node)
            }
            Token::LBracket => {
                self.consume();
                let node = self.parse_expression()?;
                if !self.eat(&Token::RBracket) {
                    return Err(AnalysisError::Syntax("expected ']' token".to_string()));
                }
                Ok(EbnfNode::Optional(Box::new(node)))
            }
            Token::LBrace => {
                self.consume();
                let node = self.parse_expression()?;
                if !self.eat(&Token::RBrace) {
                    return Err(AnalysisError::Syntax("expected '}' token".to_string()));
                }
                Ok(EbnfNode::Repetition(Box::new(node)))
            }
            token => Err(AnalysisError::Syntax(format!(
                "unexpected token: {:?}",
                token
            ))),
        }
    }
}
