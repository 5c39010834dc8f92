//! Settings data model (mirrors the JSON the infrastructure hands to the agent).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Networks = BTreeMap<String, Network>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub agent_id: String,
    pub mbus: String,
    pub vm: VmSettings,
    pub disks: Disks,
    pub networks: Networks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmSettings {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disks {
    pub system: Option<String>,
    /// Absent when the VM has no ephemeral disk.
    pub ephemeral: Option<String>,
    /// Persistent disk id -> device path.
    pub persistent: BTreeMap<String, String>,
}

impl Disks {
    pub fn persistent_device(&self, disk_cid: &str) -> Option<&str> {
        self.persistent.get(disk_cid).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub ip: String,
    pub netmask: String,
    pub gateway: String,
    pub dns: Vec<String>,
    /// Categories ("dns", "gateway") this network is the default for.
    pub default: Vec<String>,
    pub mac: String,
}

impl Network {
    pub fn is_default_for(&self, category: &str) -> bool {
        self.default.iter().any(|c| c == category)
    }
}

/// Returns the network that is the default for `category`.
///
/// A single configured network is the default for everything.
pub fn default_network_for<'a>(networks: &'a Networks, category: &str) -> Option<&'a Network> {
    if networks.len() == 1 {
        return networks.values().next();
    }
    networks.values().find(|n| n.is_default_for(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(dns: &[&str], default: &[&str]) -> Network {
        Network {
            dns: dns.iter().map(|s| s.to_string()).collect(),
            default: default.iter().map(|s| s.to_string()).collect(),
            ..Network::default()
        }
    }

    #[test]
    fn parses_full_settings_document() {
        let raw = r#"{
            "agent_id": "agent-1",
            "mbus": "nats://127.0.0.1:4222",
            "vm": {"name": "vm-123"},
            "disks": {
                "system": "/dev/sda",
                "ephemeral": "/dev/sdb",
                "persistent": {"vol-1": "/dev/sdc"}
            },
            "networks": {
                "default": {"ip": "10.0.0.5", "dns": ["8.8.8.8"], "default": ["dns", "gateway"]}
            },
            "env": {"ignored": true}
        }"#;

        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.agent_id, "agent-1");
        assert_eq!(settings.vm.name, "vm-123");
        assert_eq!(settings.disks.persistent_device("vol-1"), Some("/dev/sdc"));
        assert_eq!(settings.disks.ephemeral.as_deref(), Some("/dev/sdb"));
        assert_eq!(settings.networks["default"].ip, "10.0.0.5");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.disks.persistent.is_empty());
        assert_eq!(settings.disks.system, None);
        assert_eq!(settings.disks.ephemeral, None);
        assert!(settings.networks.is_empty());
    }

    #[test]
    fn persistent_lookup_is_exact_match() {
        let mut disks = Disks::default();
        disks
            .persistent
            .insert("vol-1".to_string(), "/dev/sdb".to_string());

        assert_eq!(disks.persistent_device("vol-1"), Some("/dev/sdb"));
        assert_eq!(disks.persistent_device("vol-10"), None);
        assert_eq!(disks.persistent_device("VOL-1"), None);
    }

    #[test]
    fn default_network_prefers_flagged_network() {
        let mut networks = Networks::new();
        networks.insert("a".to_string(), network(&["1.1.1.1"], &["gateway"]));
        networks.insert("b".to_string(), network(&["9.9.9.9"], &["dns"]));

        let net = default_network_for(&networks, "dns").unwrap();
        assert_eq!(net.dns, vec!["9.9.9.9".to_string()]);
    }

    #[test]
    fn single_network_is_default_for_everything() {
        let mut networks = Networks::new();
        networks.insert("only".to_string(), network(&["1.1.1.1"], &[]));

        assert!(default_network_for(&networks, "dns").is_some());
        assert!(default_network_for(&Networks::new(), "dns").is_none());
    }
}
