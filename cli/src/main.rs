// Copyright (c) 2026 devip Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Devip CLI Entry Point
//!
//! The binary entry point for devip.
//!
//! This module bootstraps the process and keeps the command-line layer
//! apart from the core library:
//!
//! 1.  **Global State Setup**: Initializes the `tracing` subscriber from
//!     the verbosity flag.
//! 2.  **Dispatch**: Generates the report and prints whichever of its two
//!     outputs was requested.
//! 3.  **Error Boundary**: Any error propagated up from the invoked
//!     commands is caught here, logged to the error stream, and converted
//!     into a non-zero `ExitCode`.

mod commands;
mod logging;

use std::process::ExitCode;

use tracing::error;

use crate::commands::CommandLine;

fn main() -> ExitCode {
    let command_line = CommandLine::parse_args();
    logging::init(command_line.verbosity);

    match run(&command_line) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command_line: &CommandLine) -> anyhow::Result<()> {
    let report = devip_core::report::build_report()?;

    if command_line.ipv4 {
        println!("{}", report.ipv4_joined());
    } else {
        println!("{}", report.text);
    }

    Ok(())
}
