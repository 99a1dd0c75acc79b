//! IPv4 subnet calculator.
//!
//! Network/broadcast/usable-range arithmetic for a CIDR block, equal splits
//! into N subnets and VLSM allocation for a list of named host demands.

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

pub use models::{parse_cidr_notation, Cidr, SubnetDescriptor, VlsmAllocation, VlsmRequirement};
pub use processing::{allocate_vlsm, compute_subnet, split_equally};

use chrono::Utc;
use cli::Command;
use colored::Colorize;
use config::{Config, OutputFormat};
use std::error::Error;

/// Result of one command, ready to be rendered.
#[derive(Debug)]
pub enum Report {
    Subnet(SubnetDescriptor),
    Split(Vec<SubnetDescriptor>),
    Vlsm {
        allocations: Vec<VlsmAllocation>,
        unplaced: Vec<VlsmRequirement>,
    },
}

/// Run a command against the core.
///
/// Empty split and VLSM results are errors here, the core functions only
/// return empty lists.
pub fn execute(command: &Command, config: &Config) -> Result<Report, Box<dyn Error>> {
    log::info!("#Start execute({})", command.mode());
    match command {
        Command::Calc(network) => {
            let subnet = processing::describe(network.addr, network.prefix)
                .map_err(|e| format!("Failed to calculate subnet: {e}"))?;
            Ok(Report::Subnet(subnet))
        }
        Command::Split(network, count) => {
            if *count > config.max_subnets {
                return Err(format!(
                    "Refusing to list {count} subnets, the limit is {}",
                    config.max_subnets
                )
                .into());
            }
            let subnets = split_equally(&network.addr.to_string(), network.prefix, *count);
            if subnets.is_empty() {
                return Err(
                    "Failed to split network. Try a smaller number of subnets or larger network."
                        .into(),
                );
            }
            Ok(Report::Split(subnets))
        }
        Command::Vlsm(network, requirements) => {
            let allocations =
                allocate_vlsm(&network.addr.to_string(), network.prefix, requirements);
            if allocations.is_empty() {
                return Err("Failed to calculate VLSM. Check network size and requirements.".into());
            }
            let unplaced = processing::unplaced_requirements(requirements, &allocations)
                .into_iter()
                .cloned()
                .collect();
            Ok(Report::Vlsm {
                allocations,
                unplaced,
            })
        }
    }
}

/// CSV text for a report.
pub fn report_csv(report: &Report) -> String {
    match report {
        Report::Subnet(subnet) => output::subnet_csv(subnet),
        Report::Split(subnets) => output::split_csv(subnets),
        Report::Vlsm { allocations, .. } => output::vlsm_csv(allocations),
    }
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let text = match format {
        OutputFormat::Csv => report_csv(report),
        OutputFormat::Json => match report {
            Report::Subnet(subnet) => output::to_json(subnet)?,
            Report::Split(subnets) => output::to_json(subnets)?,
            Report::Vlsm { allocations, .. } => output::to_json(allocations)?,
        },
        OutputFormat::Table => {
            let mut lines = match report {
                Report::Subnet(subnet) => output::subnet_details(subnet),
                Report::Split(subnets) => output::split_table(subnets),
                Report::Vlsm {
                    allocations,
                    unplaced,
                } => {
                    let mut lines = output::vlsm_table(allocations);
                    let unplaced: Vec<&VlsmRequirement> = unplaced.iter().collect();
                    lines.extend(output::unplaced_lines(&unplaced));
                    lines
                }
            };
            lines.push(String::new());
            lines.join("\n")
        }
    };
    Ok(text)
}

/// Parse, execute and print one command line, exporting CSV when configured.
pub fn run<S: AsRef<str>>(args: &[S], config: &Config) -> Result<(), Box<dyn Error>> {
    let args = cli::parse_args(args)?;
    let format = args.output.unwrap_or(config.output);
    let report = execute(&args.command, config)?;

    if let Report::Vlsm { unplaced, .. } = &report {
        for req in unplaced {
            log::warn!(
                "{} '{}' ({} hosts) was not allocated",
                "dropped".on_red(),
                req.name,
                req.hosts_needed
            );
        }
    }

    print!("{}", render(&report, format)?);

    if let Some(dir) = &config.export_dir {
        let now = Utc::now().with_timezone(&config.timezone);
        let path = output::write_export(dir, args.command.mode(), &now, &report_csv(&report))?;
        eprintln!("CSV written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Command {
        cli::parse_args(args).unwrap().command
    }

    #[test]
    fn test_execute_calc() {
        let report = execute(&command(&["calc", "192.168.1.77/24"]), &Config::default()).unwrap();
        match report {
            Report::Subnet(s) => assert_eq!(s.cidr.to_string(), "192.168.1.0/24"),
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn test_execute_split_errors() {
        let config = Config::default();
        let err = execute(&command(&["split", "192.168.1.0/30", "8"]), &config).unwrap_err();
        assert!(err.to_string().starts_with("Failed to split network"));

        let config = Config {
            max_subnets: 2,
            ..Config::default()
        };
        assert!(execute(&command(&["split", "10.0.0.0/8", "3"]), &config).is_err());
    }

    #[test]
    fn test_execute_vlsm_reports_unplaced() {
        let report = execute(
            &command(&["vlsm", "192.168.1.0/26", "A:50", "B:25"]),
            &Config::default(),
        )
        .unwrap();
        match report {
            Report::Vlsm {
                allocations,
                unplaced,
            } => {
                assert_eq!(allocations.len(), 1);
                assert_eq!(unplaced, vec![VlsmRequirement::new("B", 25)]);
            }
            other => panic!("unexpected report {other:?}"),
        }
        assert!(execute(&command(&["vlsm", "10.0.0.0/30", "A:50"]), &Config::default()).is_err());
    }

    #[test]
    fn test_render_formats() {
        colored::control::set_override(false);
        let report = execute(&command(&["split", "192.168.1.0/24", "4"]), &Config::default())
            .unwrap();
        let csv = render(&report, OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 5);
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        let table = render(&report, OutputFormat::Table).unwrap();
        assert!(table.contains("192.168.1.64/26"));
    }

    #[test]
    fn test_render_vlsm_table_lists_unplaced() {
        colored::control::set_override(false);
        let report = execute(
            &command(&["vlsm", "192.168.1.0/26", "A:50", "B:25"]),
            &Config::default(),
        )
        .unwrap();
        let table = render(&report, OutputFormat::Table).unwrap();
        assert!(table.contains("'B' (25 hosts) does not fit"));
    }
}
