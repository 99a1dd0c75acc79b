//! Command line parsing.
//!
//! ```text
//! subnet-calculator [--output table|csv|json] calc  <a.b.c.d/p>
//! subnet-calculator [--output table|csv|json] split <a.b.c.d/p> <count>
//! subnet-calculator [--output table|csv|json] vlsm  <a.b.c.d/p> <name:hosts>... | --file <reqs.json>
//! ```

use crate::config::OutputFormat;
use crate::models::{parse_cidr_notation, Cidr, VlsmRequirement};
use regex::Regex;
use std::error::Error;
use std::path::Path;
use std::sync::OnceLock;

pub const USAGE: &str = "usage: subnet-calculator [--output table|csv|json] <command>
  calc  <a.b.c.d/p>                  describe one network
  split <a.b.c.d/p> <count>          split into <count> equal subnets
  vlsm  <a.b.c.d/p> <name:hosts>...  allocate subnets for host demands
  vlsm  <a.b.c.d/p> --file <reqs.json>";

/// Regex for one `name:hosts` requirement, the name may contain spaces.
static REQUIREMENT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_requirement_regex() -> &'static Regex {
    REQUIREMENT_REGEX.get_or_init(|| {
        Regex::new(r"^\s*(?P<name>[^:]*[^:\s])\s*:\s*(?P<hosts>\d+)\s*$").expect("Invalid Regex")
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calc(Cidr),
    Split(Cidr, u64),
    Vlsm(Cidr, Vec<VlsmRequirement>),
}

impl Command {
    /// Mode name used in export file names.
    pub fn mode(&self) -> &'static str {
        match self {
            Command::Calc(_) => "calculator",
            Command::Split(..) => "splitter",
            Command::Vlsm(..) => "vlsm",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    /// `--output` flag, overrides the configured format.
    pub output: Option<OutputFormat>,
}

/// Parse one `name:hosts` argument.
pub fn parse_requirement(arg: &str) -> Result<VlsmRequirement, Box<dyn Error>> {
    let caps = get_requirement_regex()
        .captures(arg)
        .ok_or_else(|| format!("Invalid requirement '{arg}', expected name:hosts"))?;
    let hosts_needed: u64 = caps["hosts"]
        .parse()
        .map_err(|e| format!("Invalid host count in '{arg}': {e}"))?;
    Ok(VlsmRequirement::new(caps["name"].trim(), hosts_needed))
}

/// Parse a JSON list of requirements, errors carry the JSON path.
pub fn parse_requirements_json(json: &str) -> Result<Vec<VlsmRequirement>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let requirements: Vec<VlsmRequirement> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing requirements: path={} error={}", e.path(), e))?;
    Ok(requirements)
}

pub fn read_requirements_file(path: &Path) -> Result<Vec<VlsmRequirement>, Box<dyn Error>> {
    log::info!("Reading requirements from {}", path.display());
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    parse_requirements_json(&json)
}

/// Parse the arguments after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Args, Box<dyn Error>> {
    let mut output = None;
    let mut rest: Vec<&str> = Vec::new();
    let mut iter = args.iter().map(|a| a.as_ref());
    while let Some(arg) = iter.next() {
        match arg {
            "--output" | "-o" => {
                let value = iter.next().ok_or("--output needs a value")?;
                output = Some(value.parse::<OutputFormat>()?);
            }
            _ => rest.push(arg),
        }
    }

    let (name, params) = rest.split_first().ok_or(USAGE)?;
    let network = params
        .first()
        .ok_or_else(|| format!("{name}: missing network (a.b.c.d/p)"))
        .and_then(|text| parse_cidr_notation(text).map_err(|e| format!("{e}")))?;

    let command = match *name {
        "calc" => {
            if params.len() != 1 {
                return Err(format!("calc takes one network\n{USAGE}").into());
            }
            Command::Calc(network)
        }
        "split" => {
            let count = match params {
                [_, count] => count
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid subnet count '{count}'"))?,
                _ => return Err(format!("split takes a network and a count\n{USAGE}").into()),
            };
            if count < 1 {
                return Err("Number of subnets must be at least 1".into());
            }
            Command::Split(network, count)
        }
        "vlsm" => {
            let requirements = match &params[1..] {
                ["--file", path] => read_requirements_file(Path::new(path))?,
                [] => return Err(format!("vlsm needs at least one requirement\n{USAGE}").into()),
                reqs => reqs
                    .iter()
                    .map(|r| parse_requirement(r))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            Command::Vlsm(network, requirements)
        }
        other => return Err(format!("Unknown command '{other}'\n{USAGE}").into()),
    };

    Ok(Args { command, output })
}
