//! CSV export for calculator, split and VLSM results.

use crate::models::{SubnetDescriptor, VlsmAllocation};
use chrono::{DateTime, TimeZone};
use std::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Quote a field if it holds a comma or a double quote.
///
/// Quotes inside the field are doubled. No padding, excel does not like
/// spaces after the comma between fields.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

fn row<T: Display>(fields: &[T]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_csv_field(&f.to_string()))
        .collect::<Vec<String>>()
        .join(",");
    line.push('\n');
    line
}

/// One subnet as `Property,Value` rows.
pub fn subnet_csv(subnet: &SubnetDescriptor) -> String {
    let mut csv = String::from("Property,Value\n");
    let rows: [(&str, String); 10] = [
        ("Network", subnet.network.to_string()),
        ("Broadcast", subnet.broadcast.to_string()),
        ("Mask", subnet.mask.to_string()),
        ("CIDR", subnet.cidr.to_string()),
        ("First Usable", subnet.first_usable.to_string()),
        ("Last Usable", subnet.last_usable.to_string()),
        ("Usable Hosts", subnet.usable_hosts.to_string()),
        ("Total Hosts", subnet.total_hosts.to_string()),
        ("Wildcard Mask", subnet.wildcard_mask.to_string()),
        ("IP Class", subnet.ip_class.to_string()),
    ];
    for (property, value) in rows {
        csv.push_str(&row(&[property, value.as_str()]));
    }
    csv
}

/// Equal split result, one numbered row per subnet.
pub fn split_csv(subnets: &[SubnetDescriptor]) -> String {
    let mut csv =
        String::from("Subnet,Network,Broadcast,Mask,First Usable,Last Usable,Usable Hosts\n");
    for (i, s) in subnets.iter().enumerate() {
        csv.push_str(&row(&[
            (i + 1).to_string(),
            s.network.to_string(),
            s.broadcast.to_string(),
            s.mask.to_string(),
            s.first_usable.to_string(),
            s.last_usable.to_string(),
            s.usable_hosts.to_string(),
        ]));
    }
    csv
}

/// VLSM result in placement order.
pub fn vlsm_csv(allocations: &[VlsmAllocation]) -> String {
    let mut csv = String::from(
        "Name,Hosts Needed,Network,Mask,CIDR,First Usable,Last Usable,Broadcast,Usable Hosts\n",
    );
    for a in allocations {
        let s = &a.subnet;
        csv.push_str(&row(&[
            a.name.clone(),
            a.hosts_needed.to_string(),
            s.network.to_string(),
            s.mask.to_string(),
            s.cidr.to_string(),
            s.first_usable.to_string(),
            s.last_usable.to_string(),
            s.broadcast.to_string(),
            s.usable_hosts.to_string(),
        ]));
    }
    csv
}

/// Export file name, `subnet-<mode>-<timestamp>.csv`.
pub fn export_file_name<Tz: TimeZone>(mode: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("subnet-{mode}-{}.csv", now.format("%Y-%m-%dT%H%M%S"))
}

/// Write CSV text into `dir` under [`export_file_name`], returning the path.
pub fn write_export<Tz: TimeZone>(
    dir: &Path,
    mode: &str,
    now: &DateTime<Tz>,
    csv: &str,
) -> Result<PathBuf, Box<dyn Error>>
where
    Tz::Offset: Display,
{
    let path = dir.join(export_file_name(mode, now));
    std::fs::write(&path, csv)
        .map_err(|e| format!("Error writing CSV file {}: {e}", path.display()))?;
    log::info!("Wrote CSV export: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VlsmRequirement;
    use crate::processing::{allocate_vlsm, compute_subnet, split_equally};
    use chrono::Utc;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_subnet_csv() {
        let s = compute_subnet("192.168.1.0", 24).unwrap();
        let csv = subnet_csv(&s);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Property,Value");
        assert_eq!(lines[1], "Network,192.168.1.0");
        assert_eq!(lines[4], "CIDR,192.168.1.0/24");
        assert_eq!(lines[7], "Usable Hosts,254");
        assert_eq!(lines[10], "IP Class,C");
    }

    #[test]
    fn test_split_csv() {
        let csv = split_csv(&split_equally("10.0.0.0", 24, 2));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "2,10.0.0.128,10.0.0.255,255.255.255.128,10.0.0.129,10.0.0.254,126"
        );
    }

    #[test]
    fn test_vlsm_csv_quotes_names() {
        let reqs = vec![VlsmRequirement::new("Sales, floor 2", 10)];
        let csv = vlsm_csv(&allocate_vlsm("10.0.0.0", 24, &reqs));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[1],
            "\"Sales, floor 2\",10,10.0.0.0,255.255.255.240,10.0.0.0/28,10.0.0.1,10.0.0.14,10.0.0.15,14"
        );
    }

    #[test]
    fn test_export_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            export_file_name("vlsm", &now),
            "subnet-vlsm-2024-03-09T070501.csv"
        );
    }

    #[test]
    fn test_write_export() {
        let dir = std::env::temp_dir();
        let now = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();
        let path = write_export(&dir, "test-split", &now, "a,b\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
        std::fs::remove_file(path).unwrap();
    }
}
