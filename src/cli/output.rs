//! Output formatting for CLI reports

use crate::{
    Result,
    identifiers::NodeId,
    pipeline::{AggregatedMetrics, RunReport},
    search::{SearchTree, Stage},
    utils::max_ties,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn print_aggregated(title: &str, metrics: &AggregatedMetrics) {
    print_subsection(title);
    print_kv("Mean", &format!("{:.2}", metrics.mean));
    print_kv("Std", &format!("{:.2}", metrics.std));
    print_kv("Max", &format!("{:.2}", metrics.max));
    print_kv("Min", &format!("{:.2}", metrics.min));
}

/// Print the summary of an episode run
pub fn print_run_report(report: &RunReport) {
    print_section(&format!("Run Summary: {}", report.policy));
    print_kv("Episodes", &format_number(report.episodes.len()));
    print_kv("Max steps", &format_number(report.config.max_steps));
    print_kv(
        "Success rate",
        &format!("{:.1}%", report.success_rate * 100.0),
    );
    print_aggregated("Cumulative reward", &report.rewards);
    print_aggregated("Episode length", &report.steps);
}

/// Print diagnostics of a single traversed search tree
pub fn print_tree_summary(tree: &SearchTree, stage: Stage) -> Result<()> {
    let root_state = tree.root_node().state().unwrap_or_default();
    print_section(&format!("Search from state {root_state}"));
    print_kv("Stage", stage.name());
    print_kv("Max depth", &tree.max_depth().to_string());
    print_kv("Tree nodes", &format_number(tree.decision_node_count()));
    print_kv("Visited nodes", &format_number(tree.visited_count()));
    print_kv(
        "Distinct states",
        &format_number(tree.visited_states().len()),
    );

    match tree.winning_node() {
        Some(winner) => {
            let node = tree.node(winner)?;
            print_subsection("Winning node");
            print_kv("Path", &tree.full_path(winner)?);
            print_kv("Actions", &format_actions(tree, winner)?);
            print_kv(
                "Cumulative reward",
                &format!("{:.1}", node.cumulative_reward()),
            );
        }
        None => {
            print_subsection("No goal in reach; best deepest nodes");
            let scored = tree
                .deepest_frontier()
                .iter()
                .filter_map(|&id| tree.node(id).ok().map(|node| (id, node.cumulative_reward())));
            for id in max_ties(scored) {
                let node = tree.node(id)?;
                print_kv(
                    &tree.full_path(id)?,
                    &format!(
                        "reward {:.1} -> state {}",
                        node.cumulative_reward(),
                        node.state().unwrap_or_default()
                    ),
                );
            }
            print_kv(
                "Deepest nodes",
                &format_number(tree.deepest_frontier().len()),
            );
        }
    }
    Ok(())
}

fn format_actions(tree: &SearchTree, id: NodeId) -> Result<String> {
    Ok(tree
        .action_sequence(id)?
        .iter()
        .map(|action| action.name())
        .collect::<Vec<_>>()
        .join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5), "5");
        assert_eq!(format_number(1_953_124), "1,953,124");
    }
}
