//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use expertise_filter::{Category, FilterToken, PersonRecord};
use expertise_graph::GraphView;
pub use expertise_highlight::{dim, header, subheader, success, warning};
use expertise_highlight::highlight_ansi;
use serde::Serialize;

/// Related-node columns of the results table, in display order.
const RESULT_COLUMNS: [Category; 8] = [
    Category::Interest,
    Category::Institute,
    Category::Faculty,
    Category::Department,
    Category::Role,
    Category::Offered,
    Category::Wanted,
    Category::Advisor,
];

/// JSON output for `search` and `filter`.
///
/// The document can be fed back to `filter --input`.
#[derive(Serialize)]
pub struct JsonResults<'a> {
    /// Search phrases.
    pub search: Vec<String>,
    /// Filter token ids.
    pub filters: Vec<String>,
    /// Result count before filtering.
    pub total: usize,
    /// Filtered rows.
    pub persons: Vec<&'a PersonRecord>,
}

/// Serializes `value` as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the results table with `phrases` highlighted in every cell.
pub fn results_table(persons: &[&PersonRecord], phrases: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut heading = vec!["Name", "Email"];
    heading.extend(RESULT_COLUMNS.iter().map(|category| category.group_label()));
    table.set_header(heading);

    for person in persons {
        let mut row = vec![
            Cell::new(highlight_ansi(&person.display_name(), phrases)),
            Cell::new(person.person.email.as_deref().unwrap_or_default()),
        ];
        row.extend(RESULT_COLUMNS.iter().map(|category| {
            Cell::new(highlight_ansi(&person.joined_names(*category), phrases))
        }));
        table.add_row(row);
    }
    table
}

/// Prints filtered results, or a note when nothing passed the filters.
pub fn print_results(persons: &[&PersonRecord], phrases: &[String]) {
    if persons.is_empty() {
        println!("{}", dim("No results match the selected filters."));
        return;
    }
    println!("{}", results_table(persons, phrases));
    println!("{}", dim(&format!("{} shown", persons.len())));
}

/// Describes a selection as `Group: id` items.
pub fn describe_tokens(tokens: &[FilterToken]) -> String {
    tokens
        .iter()
        .map(|token| {
            let category = token.category();
            if category.shows_group() {
                format!("{}: {}", category.group_label(), token.id())
            } else if token.is_search() {
                format!("\"{}\"", token.id())
            } else {
                token.id().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints a graph view as node and edge tables.
pub fn print_graph(view: &GraphView) {
    let mut nodes = Table::new();
    nodes
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Id", "Label", "Category", "Color"]);
    for node in &view.nodes {
        let id = if node.style.border_width.is_some() {
            header(&node.id)
        } else {
            node.id.clone()
        };
        nodes.add_row(vec![
            Cell::new(id),
            Cell::new(&node.label),
            Cell::new(node.category.map_or("-", |category| category.label())),
            Cell::new(node.style.color.map_or("-", |color| color.background)),
        ]);
    }

    println!("{}", subheader("Nodes:"));
    println!("{nodes}");

    if view.edges.is_empty() {
        return;
    }

    let mut edges = Table::new();
    edges
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["From", "Relation", "To", "Routing"]);
    for edge in &view.edges {
        let routing = edge.routing.map_or_else(String::new, |routing| {
            format!("{:?} {:.1}", routing.curve, routing.roundness)
        });
        edges.add_row(vec![
            Cell::new(node_label(view, &edge.source)),
            Cell::new(&edge.display_label),
            Cell::new(node_label(view, &edge.target)),
            Cell::new(routing),
        ]);
    }

    println!("{}", subheader("Edges:"));
    println!("{edges}");
}

/// Single-line label of a node, falling back to its id.
fn node_label(view: &GraphView, id: &str) -> String {
    view.node(id)
        .map_or_else(|| id.to_string(), |node| node.label.replace('\n', " "))
}
