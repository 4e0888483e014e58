#![forbid(unsafe_code)]

//! # spin
//!
//! Spin a prize wheel in the terminal.
//!
//! ```bash
//! spin Ann Bo Cat Dee
//! ```

use spinwheel_cli::{Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_level());
    spinwheel_cli::run(&cli)
}
