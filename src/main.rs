mod cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use gramlab::grammar::SetMap;
use gramlab::sets::display_set;
use gramlab::table::format_table;
use gramlab::{AnalysisSession, AnalysisType, StepView};

fn print_set_map(title: &str, sets: &SetMap) {
    println!("{}", title);
    for (key, set) in sets {
        println!("  {} : {}", key, display_set(set));
    }
    println!();
}

fn print_step(view: &StepView) {
    match view {
        StepView::Trace {
            description,
            partial_result,
            pseudocode_line,
            step_index,
            total_steps,
        } => {
            println!(
                "[{}/{}] (line {}) {}",
                step_index + 1,
                total_steps,
                pseudocode_line,
                description
            );
            for (key, set) in partial_result {
                println!("    {} : {}", key, display_set(set));
            }
        }
        StepView::Table { table, ll1, details } => {
            println!("{}", details);
            print!("{}", format_table(table));
            println!("LL(1): {}", if *ll1 { "yes" } else { "no" });
        }
    }
}

fn replay_trace(session: &AnalysisSession, analysis: AnalysisType, step: Option<usize>) {
    match step {
        Some(index) => print_step(&session.get_step(analysis, index).unwrap()),
        None => {
            // Walk the whole trace; the first query tells us its length
            let first = session.get_step(analysis, 0).unwrap();
            let total = match &first {
                StepView::Trace { total_steps, .. } => *total_steps,
                StepView::Table { .. } => 1,
            };
            print_step(&first);
            for index in 1..total {
                print_step(&session.get_step(analysis, index).unwrap());
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let text = match fs::read_to_string(&cli.file) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("{}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let mut session = AnalysisSession::new();
    if let Err(error) = session.analyze(&text) {
        eprintln!("{}", error);
        return ExitCode::FAILURE;
    }

    if let Some(trace) = &cli.trace {
        let analysis: AnalysisType = match trace.parse() {
            Ok(analysis) => analysis,
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        };
        replay_trace(&session, analysis, cli.step);
        return ExitCode::SUCCESS;
    }

    let grammar = session.current().unwrap();
    println!("{}\n", grammar.transformed_grammar);
    print_set_map("FIRST sets:", &grammar.first_sets);
    print_set_map("FOLLOW sets:", &grammar.follow_sets);
    print_set_map("PREDICT sets:", &grammar.predict_sets);
    print!("{}", format_table(&grammar.ll1_table));
    println!("\nLL(1): {}", if grammar.ll1 { "yes" } else { "no" });

    return ExitCode::SUCCESS;
}
