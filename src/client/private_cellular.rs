//! Private cellular networks, cores, radios, radio groups, SIMs and radio
//! statuses

use super::{check_attributes, NcmClient};
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::record::{relationship, Record};
use crate::resources::{Lookup, Resource};
use crate::types::{JsonObject, JsonValue, Limit};

const NETWORK_UPDATE_FIELDS: &[&str] = &[
    "core_ip",
    "ha_enabled",
    "id",
    "mobility_gateways",
    "mobility_gateway_virtual_ip",
    "name",
    "state",
    "status",
    "tac",
    "type",
];

const RADIO_UPDATE_FIELDS: &[&str] = &[
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
    "longitude",
    "mac",
    "name",
    "serial_number",
    "tdd_mode",
    "tx_power",
];

const GROUP_UPDATE_FIELDS: &[&str] = &["name", "description"];

const SIM_UPDATE_FIELDS: &[&str] = &["name", "state"];

/// A private cellular network to create
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewNetwork {
    pub name: String,
    /// Address the core is reached on
    pub core_ip: String,
    pub ha_enabled: bool,
    /// Virtual address of the core when HA is enabled
    pub mobility_gateway_virtual_ip: Option<String>,
    /// IDs of `private_cellular_cores` acting as mobility gateways
    pub mobility_gateways: Vec<String>,
}

impl NewNetwork {
    pub fn new(name: impl Into<String>, core_ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            core_ip: core_ip.into(),
            ..Default::default()
        }
    }

    fn into_record(self) -> Record {
        let virtual_ip = self
            .mobility_gateway_virtual_ip
            .map_or(JsonValue::Null, JsonValue::from);

        let mut record = Record::new(Resource::PrivateCellularNetworks.json_type())
            .with_attribute("name", self.name)
            .with_attribute("core_ip", self.core_ip)
            .with_attribute("ha_enabled", self.ha_enabled)
            .with_attribute("mobility_gateway_virtual_ip", virtual_ip);

        if !self.mobility_gateways.is_empty() {
            record.set_relationship(
                "mobility_gateways",
                relationship::many(
                    Resource::PrivateCellularCores.json_type(),
                    &self.mobility_gateways,
                ),
            );
        }
        record
    }
}

/// A radio group to create
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewRadioGroup {
    pub name: String,
    pub description: String,
    /// Network the group belongs to
    pub network: Option<String>,
}

impl NewRadioGroup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            network: None,
        }
    }

    #[must_use]
    pub fn in_network(mut self, network_id: impl Into<String>) -> Self {
        self.network = Some(network_id.into());
        self
    }
}

/// Changes to a radio
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadioUpdate {
    /// Move the radio to this network
    pub network: Option<String>,
    /// Move the radio to this radio group
    pub location: Option<String>,
    pub attributes: JsonObject,
}

/// Changes to a radio group
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupUpdate {
    /// Move the group to this network
    pub network: Option<String>,
    pub attributes: JsonObject,
}

/// Changes to a SIM
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimUpdate {
    /// Move the SIM to this network
    pub network: Option<String>,
    pub attributes: JsonObject,
}

impl NcmClient {
    // ========================================================================
    // Networks
    // ========================================================================

    pub async fn get_private_cellular_networks(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularNetworks, query, limit)
            .await
    }

    pub async fn get_private_cellular_network(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularNetworks, id).await
    }

    pub async fn create_private_cellular_network(&self, network: NewNetwork) -> Result<Record> {
        self.create(Resource::PrivateCellularNetworks, &network.into_record())
            .await
    }

    /// Change attributes of the network matching `lookup` (by ID or name)
    pub async fn update_private_cellular_network(
        &self,
        lookup: &Lookup,
        attributes: JsonObject,
    ) -> Result<Record> {
        check_attributes(&attributes, NETWORK_UPDATE_FIELDS)?;
        let query = lookup_query(lookup, &["id", "name"])?;
        self.modify(Resource::PrivateCellularNetworks, &query, |network| {
            network.merge_attributes(attributes);
        })
        .await
    }

    pub async fn delete_private_cellular_network(&self, id: &str) -> Result<()> {
        self.remove(Resource::PrivateCellularNetworks, id).await
    }

    // ========================================================================
    // Cores
    // ========================================================================

    pub async fn get_private_cellular_cores(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularCores, query, limit)
            .await
    }

    pub async fn get_private_cellular_core(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularCores, id).await
    }

    // ========================================================================
    // Radios
    // ========================================================================

    pub async fn get_private_cellular_radios(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularRadios, query, limit)
            .await
    }

    pub async fn get_private_cellular_radio(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularRadios, id).await
    }

    /// Update the radio matching `lookup` (by ID or name)
    ///
    /// `network` and `location` are written as relationships to a network and
    /// a radio group.
    pub async fn update_private_cellular_radio(
        &self,
        lookup: &Lookup,
        update: RadioUpdate,
    ) -> Result<Record> {
        check_attributes(&update.attributes, RADIO_UPDATE_FIELDS)?;
        let query = lookup_query(lookup, &["id", "name"])?;
        self.modify(Resource::PrivateCellularRadios, &query, |radio| {
            if let Some(network) = &update.network {
                radio.set_relationship("network", network_relationship(network));
            }
            if let Some(group) = &update.location {
                radio.set_relationship(
                    "location",
                    relationship::one(Resource::PrivateCellularRadioGroups.json_type(), group),
                );
            }
            radio.merge_attributes(update.attributes);
        })
        .await
    }

    // ========================================================================
    // Radio groups
    // ========================================================================

    pub async fn get_private_cellular_radio_groups(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularRadioGroups, query, limit)
            .await
    }

    pub async fn get_private_cellular_radio_group(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularRadioGroups, id).await
    }

    pub async fn create_private_cellular_radio_group(&self, group: NewRadioGroup) -> Result<Record> {
        let mut record = Record::new(Resource::PrivateCellularRadioGroups.json_type())
            .with_attribute("name", group.name)
            .with_attribute("description", group.description);
        if let Some(network) = &group.network {
            record.set_relationship("network", network_relationship(network));
        }
        self.create(Resource::PrivateCellularRadioGroups, &record)
            .await
    }

    /// Update the radio group matching `lookup` (by ID or name)
    pub async fn update_private_cellular_radio_group(
        &self,
        lookup: &Lookup,
        update: GroupUpdate,
    ) -> Result<Record> {
        check_attributes(&update.attributes, GROUP_UPDATE_FIELDS)?;
        let query = lookup_query(lookup, &["id", "name"])?;
        self.modify(Resource::PrivateCellularRadioGroups, &query, |group| {
            if let Some(network) = &update.network {
                group.set_relationship("network", network_relationship(network));
            }
            group.merge_attributes(update.attributes);
        })
        .await
    }

    pub async fn delete_private_cellular_radio_group(&self, id: &str) -> Result<()> {
        self.remove(Resource::PrivateCellularRadioGroups, id).await
    }

    // ========================================================================
    // SIMs
    // ========================================================================

    pub async fn get_private_cellular_sims(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularSims, query, limit).await
    }

    pub async fn get_private_cellular_sim(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularSims, id).await
    }

    /// Update the SIM matching `lookup` (by ID, ICCID or IMSI)
    pub async fn update_private_cellular_sim(
        &self,
        lookup: &Lookup,
        update: SimUpdate,
    ) -> Result<Record> {
        check_attributes(&update.attributes, SIM_UPDATE_FIELDS)?;
        let query = lookup_query(lookup, &["id", "iccid", "imsi"])?;
        self.modify(Resource::PrivateCellularSims, &query, |sim| {
            if let Some(network) = &update.network {
                sim.set_relationship("network", network_relationship(network));
            }
            sim.merge_attributes(update.attributes);
        })
        .await
    }

    // ========================================================================
    // Radio statuses
    // ========================================================================

    pub async fn get_private_cellular_radio_statuses(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PrivateCellularRadioStatuses, query, limit)
            .await
    }

    pub async fn get_private_cellular_radio_status(&self, id: &str) -> Result<Record> {
        self.get(Resource::PrivateCellularRadioStatuses, id).await
    }
}

fn network_relationship(network_id: &str) -> JsonValue {
    relationship::one(Resource::PrivateCellularNetworks.json_type(), network_id)
}

/// Query for `lookup`, provided it filters on one of `accepted`
fn lookup_query(lookup: &Lookup, accepted: &[&str]) -> Result<QueryParams> {
    if !accepted.contains(&lookup.field()) {
        return Err(Error::invalid_params([format!(
            "cannot look up by {}",
            lookup.field()
        )]));
    }
    lookup.to_query()
}
