/*
    This module turns EBNF sugar ( ), [ ], { }, | into flat BNF
*/

pub mod lexer;
pub mod parser;
pub mod transformer;

pub use parser::{EbnfNode, EbnfParser};
pub use transformer::{EbnfProduction, EbnfTransformer};
