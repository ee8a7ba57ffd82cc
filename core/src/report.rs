// Copyright (c) 2026 devip Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Report assembly: address blocks, default routes, timestamp.

use anyhow::Result;
use chrono::Local;

use crate::command::IpCommand;
use crate::scan;

const ROUTE_HEADER: &str = "<b>default routes:</b>";
const ROUTE_UNDERLINE: &str = "----------------<br/>";

/// One generated report. Nothing here outlives the generation that
/// produced it.
#[derive(Debug)]
pub struct Report {
    /// Newline-joined HTML-formatted fragments, ready for display.
    pub text: String,
    /// Discovered IPv4 addresses, in the same order their `<u>` fragments
    /// appear in `text`.
    pub ipv4_addrs: Vec<String>,
}

impl Report {
    /// The IPv4 addresses joined by newlines, the form handed to an
    /// embedding UI host alongside `text`.
    pub fn ipv4_joined(&self) -> String {
        self.ipv4_addrs.join("\n")
    }
}

/// Generates a report from the live system: `ip addr`, then
/// `ip route show table all`, then the current wall-clock time.
///
/// Either command failing propagates as-is; there is no partial result.
pub fn build_report() -> Result<Report> {
    let ip = IpCommand::resolve();
    let addr_output = ip.addresses()?;
    let route_output = ip.routes()?;
    let stamp = Local::now().format("%H:%M:%S").to_string();
    Ok(assemble(&addr_output, &route_output, &stamp))
}

/// Pure assembly step, split out from [`build_report`] so the full
/// document shape is testable without spawning anything.
pub fn assemble(addr_output: &str, route_output: &str, stamp: &str) -> Report {
    let (mut fragments, ipv4_addrs) = scan::render_addresses(addr_output);

    fragments.push(ROUTE_HEADER.to_string());
    fragments.push(ROUTE_UNDERLINE.to_string());
    fragments.extend(scan::render_routes(route_output));
    fragments.push(format!("<br/>Device IP @ {stamp}"));

    Report {
        text: fragments.join("\n"),
        ipv4_addrs,
    }
}
