//! Registry of Chronicle log types accepted by the log import endpoint.
//!
//! # What this module handles:
//! - The static table of known log type identifiers and their descriptions
//! - Exact-match validation and substring search over the table
//!
//! The table is a curated subset of the types Chronicle accepts, covering
//! common cloud, identity, endpoint and network sources.
//!
//! # What this module does NOT handle:
//! - Fetching the live log type list from the API. Unknown types can still be
//!   ingested by setting `force_log_type` on [`crate::models::IngestLogParams`].

/// A known Chronicle log type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogType {
    /// Identifier used in the import URL, e.g. `OKTA`.
    pub id: &'static str,
    /// Human readable product description.
    pub description: &'static str,
}

const fn log_type(id: &'static str, description: &'static str) -> LogType {
    LogType { id, description }
}

static LOG_TYPES: &[LogType] = &[
    log_type("AWS_CLOUDTRAIL", "AWS CloudTrail"),
    log_type("AWS_GUARDDUTY", "AWS GuardDuty"),
    log_type("AWS_VPC_FLOW", "AWS VPC Flow Logs"),
    log_type("AWS_WAF", "AWS Web Application Firewall"),
    log_type("AZURE_ACTIVITY", "Microsoft Azure Activity"),
    log_type("AZURE_AD", "Azure Active Directory"),
    log_type("AZURE_AD_AUDIT", "Azure Active Directory Audit"),
    log_type("AZURE_FIREWALL", "Azure Firewall"),
    log_type("BIND_DNS", "BIND DNS Server"),
    log_type("CHROME_MANAGEMENT", "Google Chrome Management"),
    log_type("CISCO_ASA_FIREWALL", "Cisco ASA Firewall"),
    log_type("CISCO_UMBRELLA", "Cisco Umbrella DNS"),
    log_type("CLOUDFLARE", "Cloudflare"),
    log_type("CS_DETECTS", "CrowdStrike Falcon Detections"),
    log_type("CS_EDR", "CrowdStrike Falcon EDR"),
    log_type("DUO_AUTH", "Duo Authentication"),
    log_type("FORTINET_FIREWALL", "Fortinet FortiGate Firewall"),
    log_type("GCP_CLOUDAUDIT", "Google Cloud Audit Logs"),
    log_type("GCP_DNS", "Google Cloud DNS"),
    log_type("GCP_FIREWALL", "Google Cloud Firewall"),
    log_type("GCP_LOADBALANCING", "Google Cloud Load Balancing"),
    log_type("GCP_VPC_FLOW", "Google Cloud VPC Flow Logs"),
    log_type("GITHUB", "GitHub Audit"),
    log_type("GSUITE", "Google Workspace Activity"),
    log_type("INFOBLOX_DNS", "Infoblox DNS"),
    log_type("JUNIPER_FIREWALL", "Juniper Firewall"),
    log_type("KUBERNETES_NODE", "Kubernetes Node"),
    log_type("LINUX_SYSMON", "Linux Sysmon"),
    log_type("MCAFEE_EPO", "McAfee ePolicy Orchestrator"),
    log_type("MICROSOFT_DEFENDER_ENDPOINT", "Microsoft Defender for Endpoint"),
    log_type("MICROSOFT_GRAPH_ALERT", "Microsoft Graph Security Alerts"),
    log_type("NGINX", "NGINX"),
    log_type("NIX_SYSTEM", "Unix System"),
    log_type("O365", "Office 365"),
    log_type("OKTA", "Okta Identity Management"),
    log_type("PAN_FIREWALL", "Palo Alto Networks Firewall"),
    log_type("POWERSHELL", "Windows PowerShell"),
    log_type("PROOFPOINT_MAIL", "Proofpoint Email Protection"),
    log_type("SENTINEL_EDR", "SentinelOne EDR"),
    log_type("SQUID_PROXY", "Squid Web Proxy"),
    log_type("SURICATA_EVE", "Suricata EVE JSON"),
    log_type("SYMANTEC_EP", "Symantec Endpoint Protection"),
    log_type("WINDOWS_DEFENDER_AV", "Windows Defender AntiVirus"),
    log_type("WINDOWS_DHCP", "Windows DHCP"),
    log_type("WINDOWS_DNS", "Windows DNS"),
    log_type("WINDOWS_SYSMON", "Microsoft Sysmon"),
    log_type("WINEVTLOG", "Windows Event Log"),
    log_type("WORKSPACE_ACTIVITY", "Google Workspace Activity Events"),
    log_type("WORKSPACE_ALERTS", "Google Workspace Alerts"),
    log_type("ZEEK", "Zeek JSON"),
    log_type("ZSCALER_WEBPROXY", "Zscaler Web Proxy"),
];

/// Check whether `log_type` is a known log type identifier.
///
/// The match is exact and case-sensitive.
pub fn is_valid_log_type(log_type: &str) -> bool {
    LOG_TYPES.iter().any(|t| t.id == log_type)
}

/// All known log types, sorted by identifier.
pub fn get_all_log_types() -> &'static [LogType] {
    LOG_TYPES
}

/// Search log types by substring.
///
/// Matches against the identifier, and also the description when
/// `search_in_description` is set.
///
/// # Examples
///
/// ```
/// use secops_client::log_types::search_log_types;
///
/// let hits = search_log_types("windows", false, true);
/// assert!(hits.iter().any(|t| t.id == "WINEVTLOG"));
/// ```
pub fn search_log_types(
    term: &str,
    case_sensitive: bool,
    search_in_description: bool,
) -> Vec<&'static LogType> {
    let normalize = |s: &str| {
        if case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    };
    let needle = normalize(term);

    LOG_TYPES
        .iter()
        .filter(|t| {
            normalize(t.id).contains(&needle)
                || (search_in_description && normalize(t.description).contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_are_valid() {
        assert!(is_valid_log_type("OKTA"));
        assert!(is_valid_log_type("WINEVTLOG"));
        assert!(is_valid_log_type("WINDOWS_DNS"));
        assert!(is_valid_log_type("WORKSPACE_ACTIVITY"));
        assert!(!is_valid_log_type("okta"));
        assert!(!is_valid_log_type("MY_CUSTOM_TYPE"));
        assert!(!is_valid_log_type(""));
    }

    #[test]
    fn test_registry_is_sorted_and_unique() {
        let ids: Vec<&str> = get_all_log_types().iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search_case_insensitive_by_id() {
        let hits = search_log_types("aws", false, false);
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|t| t.id.starts_with("AWS_")));
    }

    #[test]
    fn test_search_case_sensitive() {
        assert!(search_log_types("aws", true, false).is_empty());
        assert_eq!(search_log_types("AWS", true, false).len(), 4);
    }

    #[test]
    fn test_search_in_description() {
        assert!(search_log_types("crowdstrike", false, false).is_empty());
        let hits = search_log_types("crowdstrike", false, true);
        let ids: Vec<&str> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["CS_DETECTS", "CS_EDR"]);
    }
}
