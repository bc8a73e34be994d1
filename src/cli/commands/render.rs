//! Render command - Print the map of a state

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::print_kv,
    taxi::{TaxiState, render_state},
};

#[derive(Parser, Debug)]
#[command(about = "Render a state of the taxi world")]
pub struct RenderArgs {
    /// State index to render (0-499)
    pub state: usize,

    /// Also print the legality mask of the state
    #[arg(long)]
    pub mask: bool,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let state = TaxiState::decode(args.state)?;
    println!("{}", render_state(&state));
    print_kv("State", &state.to_string());
    if args.mask {
        print_kv("Action mask", &state.action_mask().to_string());
    }
    Ok(())
}
