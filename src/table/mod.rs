/*
    This module builds the LL(1) parse table from the PREDICT sets
*/

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::grammar::{is_terminal, Ll1Table, ProductionRules, SetMap, END_MARKER};
use crate::sets::display_set;

// Table plus the compliance verdict and the fill log shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Ll1Build {
    pub table: Ll1Table,
    pub ll1: bool,
    pub description: String,
}

// Every quoted terminal appearing anywhere in the grammar, in first-seen
// order. The epsilon keyword is not a terminal.
pub fn extract_terminals(rules: &ProductionRules) -> IndexSet<String> {
    rules
        .values()
        .flatten()
        .flat_map(|body| body.split_whitespace())
        .filter(|symbol| is_terminal(symbol))
        .map(str::to_string)
        .collect()
}

// Rows for each non-terminal, columns for each terminal plus the $
// end-marker, all cells initially empty
pub fn initialize_ll1_table(rules: &ProductionRules) -> Ll1Table {
    let mut terminals = extract_terminals(rules);
    terminals.insert(END_MARKER.to_string());

    rules
        .keys()
        .map(|non_terminal| {
            let row: IndexMap<String, String> = terminals
                .iter()
                .map(|terminal| (terminal.clone(), String::new()))
                .collect();
            (non_terminal.clone(), row)
        })
        .collect()
}

// Writes each production's R<n> label into the cells named by its PREDICT
// set. A cell that already holds a label gets the new one appended after
// a comma, and any such multi-label cell makes the grammar non-LL(1).
pub fn build_ll1_table(
    rules: &ProductionRules,
    predict_sets: &SetMap,
    rule_numbers: &IndexMap<String, usize>,
) -> Ll1Build {
    let mut table = initialize_ll1_table(rules);
    let mut ll1 = true;
    let mut description = String::from("LL(1) table is built using PREDICT sets:\n\n");

    for (non_terminal, productions) in rules {
        description.push_str(&format!("For non-terminal {}:\n", non_terminal));

        for production in productions {
            let rule = format!("{} -> {}", non_terminal, production);
            let label = format!("R{}", rule_numbers[&rule]);
            let predict = &predict_sets[&rule];

            description.push_str(&format!(
                "  {}: {}, PREDICT = {}\n",
                label,
                rule,
                display_set(predict)
            ));

            for terminal in predict {
                let cell = table
                    .get_mut(non_terminal)
                    .unwrap()
                    .get_mut(terminal)
                    .unwrap();
                if cell.is_empty() {
                    *cell = label.clone();
                } else {
                    ll1 = false;
                    *cell = format!("{}, {}", cell, label);
                }
            }
        }
        description.push('\n');
    }

    return Ll1Build {
        table,
        ll1,
        description,
    };
}

// Renders the table as aligned text for terminal output
pub fn format_table(table: &Ll1Table) -> String {
    let columns: Vec<&String> = table
        .values()
        .next()
        .map(|row| row.keys().collect())
        .unwrap_or_default();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let mut row_header_width = 0;
    for (non_terminal, row) in table {
        row_header_width = row_header_width.max(non_terminal.len());
        for (i, cell) in row.values().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{:width$}", column, width = widths[i]))
        .join("  ");
    let mut output = format!("{:width$}  {}\n", "", header, width = row_header_width);

    for (non_terminal, row) in table {
        let cells = row
            .values()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths[i]))
            .join("  ");
        output.push_str(&format!(
            "{:width$}  {}\n",
            non_terminal,
            cells,
            width = row_header_width
        ));
    }
    return output;
}
