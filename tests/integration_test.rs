//! Integration tests for subnet-calculator
//!
//! These tests drive the public API end to end: calculator, equal split and
//! VLSM allocation, plus the exported CSV.

use std::net::Ipv4Addr;
use subnet_calculator::{
    allocate_vlsm, compute_subnet,
    config::{Config, OutputFormat},
    execute, models, parse_cidr_notation, render, split_equally, VlsmRequirement,
};

#[test]
fn test_calculator_example() {
    let s = compute_subnet("192.168.1.0", 24).expect("valid network");
    assert_eq!(s.network.to_string(), "192.168.1.0");
    assert_eq!(s.broadcast.to_string(), "192.168.1.255");
    assert_eq!(s.first_usable.to_string(), "192.168.1.1");
    assert_eq!(s.last_usable.to_string(), "192.168.1.254");
    assert_eq!(s.usable_hosts, 254);
    assert_eq!(s.total_hosts, 256);
    assert_eq!(s.mask.to_string(), "255.255.255.0");
    assert_eq!(s.wildcard_mask.to_string(), "0.0.0.255");
    assert_eq!(s.ip_class.to_string(), "C");
}

#[test]
fn test_cidr_round_trip() {
    let samples = ["10.9.8.7", "192.168.1.0", "172.16.254.3", "255.255.255.255", "0.0.0.0"];
    for address in samples {
        for prefix in 0..=32u8 {
            let s = compute_subnet(address, prefix).expect("valid network");
            let parsed = parse_cidr_notation(&s.cidr.to_string()).expect("valid cidr");
            assert_eq!(parsed.addr, s.network);
            assert_eq!(parsed.prefix, prefix);
        }
    }
}

#[test]
fn test_boundaries() {
    let s = compute_subnet("8.8.8.8", 32).unwrap();
    assert_eq!(s.first_usable, s.network);
    assert_eq!(s.last_usable, s.network);

    let s = compute_subnet("8.8.8.8", 0).unwrap();
    assert_eq!(s.total_hosts, 4294967296);
    assert_eq!(s.usable_hosts, 4294967294);
    assert_eq!(s.broadcast, Ipv4Addr::BROADCAST);
}

#[test]
fn test_invalid_input_gives_no_result() {
    assert!(compute_subnet("192.168.1.0", 33).is_err());
    assert!(compute_subnet("1.2.3", 8).is_err());
    assert!(parse_cidr_notation("192.168.1.0/").is_err());
    assert!(parse_cidr_notation("abc/24").is_err());
}

#[test]
fn test_high_bit_round_trip() {
    let bits = models::address_to_int("192.168.1.0").unwrap();
    assert_eq!(bits, 3232235776);
    assert_eq!(models::int_to_address(bits).to_string(), "192.168.1.0");
}

#[test]
fn test_split_example_and_contiguity() {
    let subnets = split_equally("192.168.1.0", 24, 4);
    let cidrs: Vec<String> = subnets.iter().map(|s| s.cidr.to_string()).collect();
    assert_eq!(
        cidrs,
        [
            "192.168.1.0/26",
            "192.168.1.64/26",
            "192.168.1.128/26",
            "192.168.1.192/26"
        ]
    );
    assert!(subnets.iter().all(|s| s.usable_hosts == 62));

    for count in [1u64, 2, 3, 7, 16, 100] {
        let subnets = split_equally("10.0.0.0", 16, count);
        assert_eq!(subnets.len() as u64, count);
        for pair in subnets.windows(2) {
            assert_eq!(pair[0].total_hosts, pair[1].total_hosts);
            assert_eq!(
                u32::from(pair[0].broadcast) as u64 + 1,
                u32::from(pair[1].network) as u64
            );
        }
    }
    assert!(split_equally("10.0.0.0", 28, 32).is_empty());
}

#[test]
fn test_vlsm_example() {
    let reqs = vec![VlsmRequirement::new("A", 50), VlsmRequirement::new("B", 25)];
    let result = allocate_vlsm("192.168.1.0", 24, &reqs);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].name, "A");
    assert_eq!(result[0].subnet.cidr.to_string(), "192.168.1.0/26");
    assert_eq!(result[0].subnet.usable_hosts, 62);
    assert_eq!(result[1].name, "B");
    assert_eq!(result[1].subnet.cidr.to_string(), "192.168.1.64/27");
    assert_eq!(result[1].subnet.usable_hosts, 30);
}

#[test]
fn test_vlsm_properties() {
    let reqs: Vec<VlsmRequirement> = [3u64, 500, 12, 1, 250, 40, 2, 90, 7, 1000]
        .iter()
        .enumerate()
        .map(|(i, hosts)| VlsmRequirement::new(&format!("net{i}"), *hosts))
        .collect();
    let base: models::Cidr = "10.20.0.0/21".parse().unwrap();
    let result = allocate_vlsm("10.20.0.0", 21, &reqs);
    assert!(!result.is_empty());

    for (i, a) in result.iter().enumerate() {
        assert!(a.subnet.usable_hosts >= a.hosts_needed);
        assert!(base.contains(a.subnet.network));
        assert!(base.contains(a.subnet.broadcast));
        for b in &result[i + 1..] {
            assert!(!a.subnet.cidr.overlaps(&b.subnet.cidr));
            assert!(a.hosts_needed >= b.hosts_needed);
        }
    }
}

#[test]
fn test_execute_and_render_csv() {
    let args = subnet_calculator::cli::parse_args(&["vlsm", "192.168.1.0/24", "A:50", "B:25"])
        .expect("valid args");
    let report = execute(&args.command, &Config::default()).expect("allocations");
    let csv = render(&report, OutputFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            "Name,Hosts Needed,Network,Mask,CIDR,First Usable,Last Usable,Broadcast,Usable Hosts",
            "A,50,192.168.1.0,255.255.255.192,192.168.1.0/26,192.168.1.1,192.168.1.62,192.168.1.63,62",
            "B,25,192.168.1.64,255.255.255.224,192.168.1.64/27,192.168.1.65,192.168.1.94,192.168.1.95,30",
        ]
    );
}
