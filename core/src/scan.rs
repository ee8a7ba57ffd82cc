// Copyright (c) 2026 devip Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Line classification and rendering for `ip` output.
//!
//! `ip addr` output is scanned in a single forward pass. Three anchored
//! patterns classify each line as an interface header, a link-layer line,
//! or an address line; everything else is ignored. The scan carries a
//! small pending state: an interface name and a MAC address are held back
//! until the first address line of their block arrives, and an interface
//! that never shows an address is never rendered.
//!
//! Rendering produces lightly HTML-formatted fragments for a small UI
//! panel: `<b>` for interface names, `<i>` for MAC addresses, `<u>` for
//! IPv4 addresses. Nothing is HTML-escaped; callers embedding the result
//! must not assume sanitized output.

use std::sync::LazyLock;

use regex::Regex;

static IFACE_UP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\s+(\S+?):.*[<,]UP[,>]").unwrap());
static ETHER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+link/ether\s+(\S+)").unwrap());
static INET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+inet(6?)\s+(\S+)").unwrap());
static DEFAULT_ROUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^default\s+via\s+(\S+).*\s+dev\s+(\S+)").unwrap());

/// One classified line of `ip addr` output.
#[derive(Debug, PartialEq, Eq)]
pub enum AddrLine {
    /// An `inet`/`inet6` address line. The family marker is the literal
    /// optional `6` in the output, not inferred from address syntax.
    Inet { v6: bool, addr: String },
    /// An interface header whose flag list contains `UP`.
    IfaceUp { name: String },
    /// A `link/ether` line carrying the MAC address.
    LinkEther { mac: String },
}

/// Classifies one line, or `None` for anything unrecognized.
pub fn classify(line: &str) -> Option<AddrLine> {
    if let Some(caps) = INET_RE.captures(line) {
        return Some(AddrLine::Inet {
            v6: &caps[1] == "6",
            addr: caps[2].to_string(),
        });
    }
    if let Some(caps) = IFACE_UP_RE.captures(line) {
        return Some(AddrLine::IfaceUp {
            name: caps[1].to_string(),
        });
    }
    if let Some(caps) = ETHER_RE.captures(line) {
        return Some(AddrLine::LinkEther {
            mac: caps[1].to_string(),
        });
    }
    None
}

/// Pending state carried across the address scan.
///
/// At most one interface/ether pair is held at a time. Both are flushed
/// by the next address line; a new interface header overwrites the
/// pending name and discards any stale pending MAC.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanState {
    pending_iface: Option<String>,
    pending_ether: Option<String>,
}

impl ScanState {
    /// Applies one classified line, appending rendered fragments and
    /// collected IPv4 addresses as a side effect.
    pub fn step(&mut self, line: AddrLine, fragments: &mut Vec<String>, ipv4s: &mut Vec<String>) {
        match line {
            AddrLine::Inet { v6, addr } => {
                if let Some(iface) = self.pending_iface.take() {
                    // Separator between interface blocks, skipped for the
                    // very first block.
                    if !fragments.is_empty() {
                        fragments.push("<br/>".to_string());
                    }
                    fragments.push(format!("<b>{iface}</b><br/>"));
                }
                if let Some(ether) = self.pending_ether.take() {
                    fragments.push(format!("<i>{ether}</i><br/>"));
                }
                if v6 {
                    fragments.push(format!("{addr}<br/>"));
                } else {
                    fragments.push(format!("<u>{addr}</u><br/>"));
                    ipv4s.push(addr);
                }
            }
            AddrLine::IfaceUp { name } => {
                self.pending_iface = Some(name);
                self.pending_ether = None;
            }
            AddrLine::LinkEther { mac } => {
                self.pending_ether = Some(mac);
            }
        }
    }
}

/// Scans `ip addr` output and returns the rendered fragments plus the
/// IPv4 addresses in the order they appear in the fragments.
pub fn render_addresses(output: &str) -> (Vec<String>, Vec<String>) {
    let mut state = ScanState::default();
    let mut fragments = Vec::new();
    let mut ipv4s = Vec::new();

    for line in output.lines() {
        if let Some(parsed) = classify(line) {
            state.step(parsed, &mut fragments, &mut ipv4s);
        }
    }

    (fragments, ipv4s)
}

/// Scans `ip route show table all` output and renders one
/// `{iface}: {gateway}<br/>` fragment per default route, in command
/// output order. Non-default routes contribute nothing; duplicates
/// across routing tables are kept as-is.
pub fn render_routes(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| DEFAULT_ROUTE_RE.captures(line))
        .map(|caps| format!("{}: {}<br/>", &caps[2], &caps[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_IFACE_FIXTURE: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN
    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP
    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
    inet 192.168.1.5/24 brd 192.168.1.255 scope global eth0
3: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc noqueue state UP
    link/ether 11:22:33:44:55:66 brd ff:ff:ff:ff:ff:ff
    inet 192.168.1.6/24 brd 192.168.1.255 scope global wlan0
    inet6 fe80::1/64 scope link
";

    #[test]
    fn classify_recognizes_interface_header_with_up_flag() {
        let line = "2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500";
        assert_eq!(
            classify(line),
            Some(AddrLine::IfaceUp {
                name: "eth0".to_string()
            })
        );
    }

    #[test]
    fn classify_rejects_interface_header_without_up_flag() {
        let line = "4: eth1: <BROADCAST,MULTICAST> mtu 1500 state DOWN";
        assert_eq!(classify(line), None);
    }

    #[test]
    fn classify_does_not_mistake_lower_up_for_up() {
        // UP must be delimited by < or , on the left and , or > on the
        // right; LOWER_UP alone does not qualify.
        let line = "4: eth1: <BROADCAST,LOWER_UP> mtu 1500";
        assert_eq!(classify(line), None);
    }

    #[test]
    fn classify_reads_family_marker_not_address_syntax() {
        assert_eq!(
            classify("    inet 10.0.0.1/8 scope global"),
            Some(AddrLine::Inet {
                v6: false,
                addr: "10.0.0.1/8".to_string()
            })
        );
        assert_eq!(
            classify("    inet6 fe80::1/64 scope link"),
            Some(AddrLine::Inet {
                v6: true,
                addr: "fe80::1/64".to_string()
            })
        );
    }

    #[test]
    fn classify_requires_leading_whitespace_on_inet_and_ether() {
        assert_eq!(classify("inet 10.0.0.1/8"), None);
        assert_eq!(classify("link/ether aa:bb:cc:dd:ee:ff"), None);
    }

    #[test]
    fn ipv4_list_matches_underlined_fragments_in_order() {
        let (fragments, ipv4s) = render_addresses(TWO_IFACE_FIXTURE);

        let underlined: Vec<&str> = fragments
            .iter()
            .filter(|f| f.starts_with("<u>"))
            .map(|f| f.as_str())
            .collect();
        assert_eq!(underlined.len(), ipv4s.len());
        for (frag, addr) in underlined.iter().zip(&ipv4s) {
            assert_eq!(*frag, format!("<u>{addr}</u><br/>"));
        }
    }

    #[test]
    fn two_interface_fixture_collects_both_ipv4s_in_order() {
        let (fragments, ipv4s) = render_addresses(TWO_IFACE_FIXTURE);

        assert_eq!(ipv4s, vec!["192.168.1.5/24", "192.168.1.6/24"]);

        let expected = vec![
            "<b>eth0</b><br/>".to_string(),
            "<i>aa:bb:cc:dd:ee:ff</i><br/>".to_string(),
            "<u>192.168.1.5/24</u><br/>".to_string(),
            "<br/>".to_string(),
            "<b>wlan0</b><br/>".to_string(),
            "<i>11:22:33:44:55:66</i><br/>".to_string(),
            "<u>192.168.1.6/24</u><br/>".to_string(),
            "fe80::1/64<br/>".to_string(),
        ];
        assert_eq!(fragments, expected);
    }

    #[test]
    fn interface_without_address_is_never_rendered() {
        let output = "\
2: eth0: <BROADCAST,UP> mtu 1500
    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
3: wlan0: <BROADCAST,UP> mtu 1500
    inet 10.0.0.2/24 scope global wlan0
";
        let (fragments, ipv4s) = render_addresses(output);
        let text = fragments.join("\n");

        assert!(!text.contains("eth0"));
        assert!(!text.contains("aa:bb:cc:dd:ee:ff"));
        assert_eq!(ipv4s, vec!["10.0.0.2/24"]);
    }

    #[test]
    fn new_interface_header_discards_stale_pending_mac() {
        // The MAC belongs to eth0 which never shows an address; wlan0's
        // block must not inherit it.
        let output = "\
2: eth0: <BROADCAST,UP> mtu 1500
    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
3: wlan0: <BROADCAST,UP> mtu 1500
    inet 10.0.0.2/24 scope global wlan0
";
        let (fragments, _) = render_addresses(output);
        assert!(!fragments.iter().any(|f| f.contains("<i>")));
    }

    #[test]
    fn ipv6_is_not_underlined_and_not_collected() {
        let output = "\
2: eth0: <BROADCAST,UP> mtu 1500
    inet6 2001:db8::1/64 scope global
";
        let (fragments, ipv4s) = render_addresses(output);

        assert_eq!(
            fragments,
            vec!["<b>eth0</b><br/>".to_string(), "2001:db8::1/64<br/>".to_string()]
        );
        assert!(ipv4s.is_empty());
    }

    #[test]
    fn first_block_has_no_leading_separator() {
        let output = "\
2: eth0: <BROADCAST,UP> mtu 1500
    inet 10.0.0.1/24 scope global
";
        let (fragments, _) = render_addresses(output);
        assert_eq!(fragments.first().map(String::as_str), Some("<b>eth0</b><br/>"));
    }

    #[test]
    fn block_renders_iface_then_mac_then_address() {
        let output = "\
2: eth0: <BROADCAST,UP> mtu 1500
    link/ether aa:bb:cc:dd:ee:ff brd ff:ff:ff:ff:ff:ff
    inet 10.0.0.1/24 scope global
";
        let (fragments, _) = render_addresses(output);
        assert_eq!(
            fragments,
            vec![
                "<b>eth0</b><br/>".to_string(),
                "<i>aa:bb:cc:dd:ee:ff</i><br/>".to_string(),
                "<u>10.0.0.1/24</u><br/>".to_string(),
            ]
        );
    }

    #[test]
    fn default_route_renders_iface_then_gateway() {
        let bare = "default via 10.0.0.1 dev eth0\n";
        assert_eq!(render_routes(bare), vec!["eth0: 10.0.0.1<br/>".to_string()]);

        let with_attrs = "default via 10.0.0.1 dev eth0 proto dhcp metric 100\n";
        assert_eq!(render_routes(with_attrs), vec!["eth0: 10.0.0.1<br/>".to_string()]);
    }

    #[test]
    fn non_default_routes_are_ignored() {
        let output = "\
10.0.0.0/24 dev eth0 proto kernel scope link src 10.0.0.5
broadcast 10.0.0.255 dev eth0 table local proto kernel scope link
local 10.0.0.5 dev eth0 table local proto kernel scope host
";
        assert!(render_routes(output).is_empty());
    }

    #[test]
    fn routes_keep_command_output_order_across_tables() {
        let output = "\
default via 10.0.0.1 dev eth0 proto dhcp metric 100
default via 192.168.1.1 dev wlan0 table 1000 proto static
";
        assert_eq!(
            render_routes(output),
            vec![
                "eth0: 10.0.0.1<br/>".to_string(),
                "wlan0: 192.168.1.1<br/>".to_string(),
            ]
        );
    }

    #[test]
    fn route_pattern_requires_leading_default_token() {
        let output = "not-default via 10.0.0.1 dev eth0\n";
        assert!(render_routes(output).is_empty());
    }
}
