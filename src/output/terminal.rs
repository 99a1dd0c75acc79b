//! Terminal output with colors.

use crate::models::{SubnetDescriptor, VlsmAllocation, VlsmRequirement};
use colored::Colorize;

/// Right-align a value in a field of `width` characters.
///
/// Values longer than the field are returned untouched.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

/// Label/value lines describing one subnet.
pub fn subnet_details(s: &SubnetDescriptor) -> Vec<String> {
    let rows: [(&str, String); 13] = [
        ("Network", s.network.to_string()),
        ("Network (binary)", s.network_binary.clone()),
        ("Broadcast", s.broadcast.to_string()),
        ("Broadcast (binary)", s.broadcast_binary.clone()),
        ("First Usable", s.first_usable.to_string()),
        ("Last Usable", s.last_usable.to_string()),
        ("Usable Hosts", s.usable_hosts.to_string()),
        ("Total Hosts", s.total_hosts.to_string()),
        ("Subnet Mask", s.mask.to_string()),
        ("Wildcard Mask", s.wildcard_mask.to_string()),
        ("CIDR", s.cidr.to_string()),
        ("Mask Bits", format!("/{}", s.mask_bits)),
        ("IP Class", s.ip_class.to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{}: {}", format_field(label, 18).as_str().bold(), value))
        .collect()
}

const SPLIT_WIDTHS: [usize; 6] = [4, 18, 15, 15, 15, 12];

/// Aligned table for an equal split.
pub fn split_table(subnets: &[SubnetDescriptor]) -> Vec<String> {
    let header = [
        "#",
        "CIDR",
        "First Usable",
        "Last Usable",
        "Broadcast",
        "Usable Hosts",
    ];
    let mut lines = vec![table_line(&header, &SPLIT_WIDTHS).as_str().bold().to_string()];
    for (i, s) in subnets.iter().enumerate() {
        let cells = [
            (i + 1).to_string(),
            s.cidr.to_string(),
            s.first_usable.to_string(),
            s.last_usable.to_string(),
            s.broadcast.to_string(),
            s.usable_hosts.to_string(),
        ];
        lines.push(table_line(&cells, &SPLIT_WIDTHS));
    }
    lines
}

const VLSM_WIDTHS: [usize; 8] = [16, 8, 18, 15, 15, 15, 15, 8];

/// Aligned table for a VLSM run.
///
/// The usable host count is green when it covers the demand, red otherwise.
pub fn vlsm_table(allocations: &[VlsmAllocation]) -> Vec<String> {
    let header = [
        "Name",
        "Needed",
        "CIDR",
        "Mask",
        "First Usable",
        "Last Usable",
        "Broadcast",
        "Usable",
    ];
    let mut lines = vec![table_line(&header, &VLSM_WIDTHS).as_str().bold().to_string()];
    for a in allocations {
        let s = &a.subnet;
        let cells = [
            a.name.clone(),
            a.hosts_needed.to_string(),
            s.cidr.to_string(),
            s.mask.to_string(),
            s.first_usable.to_string(),
            s.last_usable.to_string(),
            s.broadcast.to_string(),
        ];
        let count = format_field(s.usable_hosts, VLSM_WIDTHS[7]);
        let usable = if a.is_satisfied() {
            count.as_str().green()
        } else {
            count.as_str().red()
        };
        lines.push(format!("{} {}", table_line(&cells, &VLSM_WIDTHS[..7]), usable));
    }
    lines
}

/// One line per requirement the VLSM run could not place.
pub fn unplaced_lines(unplaced: &[&VlsmRequirement]) -> Vec<String> {
    unplaced
        .iter()
        .map(|r| {
            format!(
                "#{}# '{}' ({} hosts) does not fit",
                "NOTE".on_red(),
                r.name,
                r.hosts_needed
            )
        })
        .collect()
}

fn table_line<T: ToString>(cells: &[T], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format_field(cell.to_string(), *width))
        .collect::<Vec<String>>()
        .join(" ")
}
