//! Search command - Build and traverse a single search tree

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_tree_summary},
    ports::Environment,
    search::{DEFAULT_SEARCH_DEPTH, SearchTree, Stage, TreeTraversal},
    taxi::TaxiEnv,
};

#[derive(Parser, Debug)]
#[command(about = "Search a single decision from a given state")]
pub struct SearchArgs {
    /// State index to search from (0-499)
    #[arg(long, short = 's')]
    pub state: usize,

    /// Depth of the search tree
    #[arg(long, short = 'd', default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,

    /// Stage to search for (pick or drop); derived from the state if omitted
    #[arg(long)]
    pub stage: Option<String>,

    /// Also print the map of the starting state
    #[arg(long)]
    pub render: bool,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let mut env = TaxiEnv::from_state(args.state)?;
    let stage = match &args.stage {
        Some(name) => name.parse::<Stage>()?,
        None => Stage::for_state(&env, args.state),
    };
    if stage == Stage::Done {
        return Err(anyhow!(
            "state {} already has the passenger delivered; nothing to search",
            args.state
        ));
    }

    if args.render {
        println!("{}", env.render());
    }

    let observation = env.observation_of(args.state)?;
    let mut tree = SearchTree::for_stage(args.state, observation, stage, args.depth)
        .context("failed to build the search tree")?;
    TreeTraversal::new(stage).run(&mut tree, &mut env)?;

    print_tree_summary(&tree, stage)?;
    if let Some(winner) = tree.winning_node() {
        let step = tree.ancestor_at_depth_one(winner)?;
        if let Some(action) = tree.node(step)?.action() {
            print_kv("Next action", action.name());
        }
    }
    Ok(())
}
