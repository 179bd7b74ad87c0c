mod args;
mod display;
mod prompt;

pub use args::Cli;
pub use display::render_table;
pub use prompt::{prompt_report_choice, prompt_urls};
