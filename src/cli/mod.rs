//! CLI infrastructure for the taxi driver
//!
//! This module provides the command-line interface for running policies over
//! episodes, inspecting single search trees and rendering states.

pub mod commands;
pub mod output;
