// Copyright (c) 2026 devip Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Command line schema.
//!
//! The single source of truth for the binary's flags and help text. There
//! is only one operation (generate the report), so there are no
//! subcommands; the flags select which of the report's two outputs is
//! printed and how chatty the logs are.

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "devip")]
#[command(about = "Summarize local interfaces, addresses and default routes.")]
pub struct CommandLine {
    /// Print only the discovered IPv4 addresses, one per line
    #[arg(long = "ipv4")]
    pub ipv4: bool,

    /// Increase logging detail (-v: debug logs, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
