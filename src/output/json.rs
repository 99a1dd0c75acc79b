//! JSON payload of a result, as copied to the clipboard.

use serde::Serialize;
use std::error::Error;

/// Pretty printed JSON for any result value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Error serializing JSON: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VlsmRequirement;
    use crate::processing::{allocate_vlsm, compute_subnet};

    #[test]
    fn test_subnet_json() {
        let json = to_json(&compute_subnet("192.168.1.0", 24).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["network"], "192.168.1.0");
        assert_eq!(value["cidr"], "192.168.1.0/24");
        assert_eq!(value["usable_hosts"], 254);
        assert_eq!(value["ip_class"], "C");
        assert_eq!(value["wildcard_mask"], "0.0.0.255");
    }

    #[test]
    fn test_vlsm_json_is_flat() {
        let reqs = vec![VlsmRequirement::new("A", 50)];
        let json = to_json(&allocate_vlsm("192.168.1.0", 24, &reqs)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[0]["hosts_needed"], 50);
        assert_eq!(value[0]["cidr"], "192.168.1.0/26");
        assert!(value[0].get("subnet").is_none());
    }
}
