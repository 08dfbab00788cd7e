//! Endpoint catalogue
//!
//! Every collection the client talks to, with its path under the API root,
//! its JSON:API type and the fields it may be filtered on.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use std::fmt;

/// A remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Routers,
    Subscriptions,
    PrivateCellularNetworks,
    PrivateCellularCores,
    PrivateCellularRadios,
    PrivateCellularRadioGroups,
    PrivateCellularSims,
    PrivateCellularRadioStatuses,
    PublicSimMgmtAssets,
    PublicSimMgmtRatePlans,
    ExchangeSites,
    ExchangeResources,
}

impl Resource {
    /// All resources, in catalogue order
    pub const ALL: [Resource; 13] = [
        Resource::Users,
        Resource::Routers,
        Resource::Subscriptions,
        Resource::PrivateCellularNetworks,
        Resource::PrivateCellularCores,
        Resource::PrivateCellularRadios,
        Resource::PrivateCellularRadioGroups,
        Resource::PrivateCellularSims,
        Resource::PrivateCellularRadioStatuses,
        Resource::PublicSimMgmtAssets,
        Resource::PublicSimMgmtRatePlans,
        Resource::ExchangeSites,
        Resource::ExchangeResources,
    ];

    /// Path relative to the API root
    pub fn path(self) -> &'static str {
        match self {
            Resource::Users => "beta/users",
            Resource::Routers => "asset_endpoints",
            Resource::Subscriptions => "subscriptions",
            Resource::PrivateCellularNetworks => "beta/private_cellular_networks",
            Resource::PrivateCellularCores => "beta/private_cellular_cores",
            Resource::PrivateCellularRadios => "beta/private_cellular_radios",
            Resource::PrivateCellularRadioGroups => "beta/private_cellular_radio_groups",
            Resource::PrivateCellularSims => "beta/private_cellular_sims",
            Resource::PrivateCellularRadioStatuses => "beta/private_cellular_radio_statuses",
            Resource::PublicSimMgmtAssets => "beta/public_sim_mgmt_assets",
            Resource::PublicSimMgmtRatePlans => "beta/public_sim_mgmt_rate_plans",
            Resource::ExchangeSites => "beta/exchange_sites",
            Resource::ExchangeResources => "beta/exchange_resources",
        }
    }

    /// Path of one member of the collection
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Human-readable name used in log events
    pub fn label(self) -> &'static str {
        match self {
            Resource::Users => "Users",
            Resource::Routers => "Routers",
            Resource::Subscriptions => "Subscriptions",
            Resource::PrivateCellularNetworks => "Private Cellular Networks",
            Resource::PrivateCellularCores => "Private Cellular Cores",
            Resource::PrivateCellularRadios => "Private Cellular Radios",
            Resource::PrivateCellularRadioGroups => "Private Cellular Radio Groups",
            Resource::PrivateCellularSims => "Private Cellular SIMs",
            Resource::PrivateCellularRadioStatuses => "Private Cellular Radio Statuses",
            Resource::PublicSimMgmtAssets => "Public SIM Management Assets",
            Resource::PublicSimMgmtRatePlans => "Public SIM Management Rate Plans",
            Resource::ExchangeSites => "Exchange Sites",
            Resource::ExchangeResources => "Exchange Resources",
        }
    }

    /// JSON:API `type` of records written to this collection
    ///
    /// Exchange sites and resources have per-record subtypes; this is the
    /// type used when one is referenced from a relationship.
    pub fn json_type(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Routers => "routers",
            Resource::Subscriptions => "subscriptions",
            Resource::PrivateCellularNetworks => "private_cellular_networks",
            Resource::PrivateCellularCores => "private_cellular_cores",
            Resource::PrivateCellularRadios => "private_cellular_radios",
            Resource::PrivateCellularRadioGroups => "private_cellular_radio_groups",
            Resource::PrivateCellularSims => "private_cellular_sims",
            Resource::PrivateCellularRadioStatuses => "private_cellular_radio_statuses",
            Resource::PublicSimMgmtAssets => "public_sim_mgmt_assets",
            Resource::PublicSimMgmtRatePlans => "public_sim_mgmt_rate_plans",
            Resource::ExchangeSites => "exchange_sites",
            Resource::ExchangeResources => "exchange_resources",
        }
    }

    /// Fields that may appear in `filter[...]` or `search[...]`
    pub fn filters(self) -> &'static [&'static str] {
        match self {
            Resource::Users => &[
                "email",
                "first_name",
                "id",
                "is_active",
                "last_login",
                "last_name",
                "pending_email",
            ],
            Resource::Routers => &[
                "hardware_series",
                "hardware_series_key",
                "id",
                "mac_address",
                "serial_number",
            ],
            Resource::Subscriptions => &[
                "end_time",
                "id",
                "name",
                "quantity",
                "start_time",
                "tenant",
                "type",
            ],
            Resource::PrivateCellularNetworks => &[
                "core_ip",
                "created_at",
                "ha_enabled",
                "id",
                "mobility_gateway_virtual_ip",
                "mobility_gateways",
                "name",
                "segw_ip",
                "state",
                "status",
                "tac",
                "type",
                "updated_at",
            ],
            Resource::PrivateCellularCores => &[
                "created_at",
                "id",
                "management_ip",
                "network",
                "router",
                "status",
                "type",
                "updated_at",
                "url",
            ],
            Resource::PrivateCellularRadios => RADIO_FIELDS,
            Resource::PrivateCellularRadioGroups => &[
                "created_at",
                "description",
                "id",
                "name",
                "network",
                "type",
                "updated_at",
            ],
            Resource::PrivateCellularSims => &[
                "created_at",
                "iccid",
                "id",
                "imsi",
                "last_contact_at",
                "name",
                "network",
                "state",
                "state_updated_at",
                "type",
            ],
            Resource::PrivateCellularRadioStatuses => &[
                "admin_state",
                "boot_time",
                "cbrs_sas_status",
                "cell",
                "connected_ues",
                "ethernet_status",
                "id",
                "ipsec_status",
                "ipv4_address",
                "last_update_time",
                "online_status",
                "operating_tx_power",
                "operational_status",
                "s1_status",
                "time_synchronization",
                "type",
            ],
            Resource::PublicSimMgmtAssets => &[
                "assigned_imei",
                "carrier",
                "detected_imei",
                "device_status",
                "iccid",
                "is_licensed",
                "type",
            ],
            Resource::PublicSimMgmtRatePlans => &["carrier", "name", "status"],
            Resource::ExchangeSites => &["exchange_network", "id", "name"],
            Resource::ExchangeResources => &["exchange_network", "exchange_site", "id", "name"],
        }
    }

    /// Check a query against this collection's filter allowlist
    pub fn validate(self, query: &QueryParams) -> Result<()> {
        query.validate(self.filters())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const RADIO_FIELDS: &[&str] = &[
    "admin_state",
    "antenna_azimuth",
    "antenna_beamwidth",
    "antenna_downtilt",
    "antenna_gain",
    "bandwidth",
    "category",
    "cpi_id",
    "cpi_name",
    "cpi_signature",
    "created_at",
    "description",
    "fccid",
    "height",
    "height_type",
    "id",
    "indoor_deployment",
    "latitude",
    "location",
    "longitude",
    "mac",
    "name",
    "network",
    "serial_number",
    "tdd_mode",
    "tx_power",
    "type",
    "updated_at",
];

/// Selects a single record for update or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(String),
    Name(String),
    Iccid(String),
    Imsi(String),
}

impl Lookup {
    /// Field the lookup filters on
    pub fn field(&self) -> &'static str {
        match self {
            Lookup::Id(_) => "id",
            Lookup::Name(_) => "name",
            Lookup::Iccid(_) => "iccid",
            Lookup::Imsi(_) => "imsi",
        }
    }

    /// Value to match
    pub fn value(&self) -> &str {
        match self {
            Lookup::Id(v) | Lookup::Name(v) | Lookup::Iccid(v) | Lookup::Imsi(v) => v,
        }
    }

    /// Query selecting the record
    pub fn to_query(&self) -> Result<QueryParams> {
        if self.value().is_empty() {
            return Err(Error::missing_argument(format!(
                "lookup by {} needs a value",
                self.field()
            )));
        }
        Ok(QueryParams::new().filter(self.field(), self.value()))
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field(), self.value())
    }
}

/// Which exchange resources to list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExchangeScope {
    /// Every resource the account can see
    #[default]
    Any,
    /// Resources of one site
    Site(String),
    /// Resources of every site in one exchange network
    Network(String),
}

impl ExchangeScope {
    /// Add the scope's filter to a query
    pub fn apply(&self, query: QueryParams) -> QueryParams {
        match self {
            ExchangeScope::Any => query,
            ExchangeScope::Site(id) => query.filter("exchange_site", id),
            ExchangeScope::Network(id) => query.filter("exchange_network", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_paths_are_relative_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for resource in Resource::ALL {
            assert!(!resource.path().starts_with('/'), "{resource}");
            assert!(seen.insert(resource.path()), "duplicate path for {resource}");
        }
    }

    #[test_case(Resource::Users, "beta/users")]
    #[test_case(Resource::Routers, "asset_endpoints")]
    #[test_case(Resource::PublicSimMgmtRatePlans, "beta/public_sim_mgmt_rate_plans")]
    #[test_case(Resource::PrivateCellularRadioGroups, "beta/private_cellular_radio_groups")]
    fn test_path(resource: Resource, path: &str) {
        assert_eq!(resource.path(), path);
    }

    #[test]
    fn test_item_path() {
        assert_eq!(Resource::ExchangeSites.item_path("7"), "beta/exchange_sites/7");
    }

    #[test]
    fn test_validate_uses_allowlist() {
        let ok = QueryParams::new()
            .filter_op("last_login", crate::query::FilterOp::Gte, "2024-01-01")
            .search("first_name", "nat");
        assert!(Resource::Users.validate(&ok).is_ok());

        let bad = QueryParams::new().filter("serial_number", "X");
        assert!(Resource::Users.validate(&bad).is_err());
        assert!(Resource::Routers.validate(&bad).is_ok());
    }

    #[test]
    fn test_lookup_query() {
        let query = Lookup::Iccid("8901".into()).to_query().unwrap();
        assert_eq!(query.get("filter[iccid]"), Some("8901"));
        assert_eq!(Lookup::Name("lab".into()).to_string(), "name=lab");

        let err = Lookup::Id(String::new()).to_query().unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));
    }

    #[test]
    fn test_exchange_scope() {
        let site = ExchangeScope::Site("s1".into()).apply(QueryParams::new());
        assert_eq!(site.get("filter[exchange_site]"), Some("s1"));

        let network = ExchangeScope::Network("n1".into()).apply(QueryParams::new());
        assert_eq!(network.get("filter[exchange_network]"), Some("n1"));

        assert!(ExchangeScope::Any.apply(QueryParams::new()).is_empty());
    }
}
