use itertools::{Itertools, PeekingNext};

// Characters with their own token besides acting as identifier separators
const SPECIALS: &str = "()[]{}|";

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Pipe,
    // Either a quoted terminal literal (quotes kept) or a plain name
    Identifier(String),
    End,
}

// Consumes a quoted literal, keeping the quotes in the token text so the
// parser can tell terminals from non-terminal names. An unterminated
// literal consumes to end of input; the malformedness surfaces later as
// a parse error, not here.
fn lex_literal(chars: &mut impl PeekingNext<Item = char>) -> Token {
    chars.next(); // Consume open quote
    let literal: String = chars.peeking_take_while(|&c| c != '\'').collect();
    chars.next(); // Consume close quote if present

    Token::Identifier(format!("'{}'", literal))
}

// Consumes a maximal run of non-whitespace, non-special characters
fn lex_identifier(chars: &mut impl PeekingNext<Item = char>) -> Token {
    let text: String = chars
        .peeking_take_while(|&c| !c.is_whitespace() && !SPECIALS.contains(c))
        .collect();

    Token::Identifier(text)
}

// Tokenizes one EBNF right-hand side. Whitespace separates tokens and is
// never emitted; the stream always ends with a single End token. Any
// character sequence tokenizes, so this never fails.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        let single = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '|' => Some(Token::Pipe),
            _ => None,
        };

        if let Some(token) = single {
            chars.next();
            tokens.push(token);
        } else if c == '\'' {
            tokens.push(lex_literal(&mut chars));
        } else if !c.is_whitespace() {
            tokens.push(lex_identifier(&mut chars));
        } else {
            chars.next();
        }
    }

    tokens.push(Token::End);
    return tokens;
}
