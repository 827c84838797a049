//! Console chat adapter.
//!
//! Each stdin line is posted to the pipeline as a message from a human
//! author in the chosen channel. Entry point: `loop_runner::run_console`.

pub mod loop_runner;
pub mod renderer;

pub use loop_runner::run_console;
