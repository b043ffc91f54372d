/*
    gramlab analyzes context-free grammars the way a compiler-construction
    course does: FIRST, FOLLOW and PREDICT sets, an LL(1) parse table, and
    a replayable trace of every intermediate step of each algorithm.

    The two entry points are AnalysisSession::analyze, which runs the full
    pipeline over BNF text (EBNF sugar is expanded first), and
    AnalysisSession::get_step, which replays one recorded step.
*/

pub mod ebnf;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod session;
pub mod sets;
pub mod table;

pub use error_handling::AnalysisError;
pub use grammar::{Grammar, StepRecord};
pub use session::{AnalysisSession, AnalysisType, StepView};
