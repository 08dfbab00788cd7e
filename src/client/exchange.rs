//! Secure Connect exchange sites and resources

use super::{check_attributes, NcmClient};
use crate::error::Result;
use crate::query::QueryParams;
use crate::record::{relationship, Record};
use crate::resources::{ExchangeScope, Resource};
use crate::types::{JsonObject, JsonValue, Limit};

/// Record type of sites created through the API
const USER_MANAGED_SITE_TYPE: &str = "exchange_user_managed_sites";

const SITE_UPDATE_FIELDS: &[&str] = &[
    "name",
    "primary_dns",
    "secondary_dns",
    "lan_as_dns",
    "local_domain",
];

const RESOURCE_FIELDS: &[&str] = &[
    "name",
    "protocols",
    "tags",
    "domain",
    "ip",
    "static_prime_ip",
    "port_ranges",
];

/// An exchange site to create
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewExchangeSite {
    pub name: String,
    pub exchange_network_id: String,
    /// Router that hosts the site
    pub router_id: String,
    pub local_domain: Option<String>,
    pub primary_dns: Option<String>,
    pub secondary_dns: Option<String>,
    pub lan_as_dns: bool,
}

impl NewExchangeSite {
    pub fn new(
        name: impl Into<String>,
        exchange_network_id: impl Into<String>,
        router_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            exchange_network_id: exchange_network_id.into(),
            router_id: router_id.into(),
            ..Default::default()
        }
    }

    fn into_record(self) -> Record {
        Record::new(USER_MANAGED_SITE_TYPE)
            .with_attribute("name", self.name)
            .with_attribute("primary_dns", optional(self.primary_dns))
            .with_attribute("secondary_dns", optional(self.secondary_dns))
            .with_attribute("lan_as_dns", self.lan_as_dns)
            .with_attribute("local_domain", optional(self.local_domain))
            .with_relationship(
                "exchange_network",
                relationship::one("exchange_networks", &self.exchange_network_id),
            )
            .with_relationship("endpoints", relationship::many("endpoints", [&self.router_id]))
    }
}

/// Kind of exchange resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeResourceKind {
    /// A single host name
    Fqdn,
    /// A wildcard domain such as `*.example.com`
    WildcardFqdn,
    /// An IP subnet
    IpSubnet,
}

impl ExchangeResourceKind {
    pub fn json_type(self) -> &'static str {
        match self {
            ExchangeResourceKind::Fqdn => "exchange_fqdn_resources",
            ExchangeResourceKind::WildcardFqdn => "exchange_wildcard_fqdn_resources",
            ExchangeResourceKind::IpSubnet => "exchange_ipsubnet_resources",
        }
    }
}

/// An exchange resource to create
#[derive(Debug, Clone, PartialEq)]
pub struct NewExchangeResource {
    pub name: String,
    pub kind: ExchangeResourceKind,
    /// `protocols`, `tags`, `domain`, `ip`, `static_prime_ip`, `port_ranges`
    pub attributes: JsonObject,
}

impl NewExchangeResource {
    pub fn new(name: impl Into<String>, kind: ExchangeResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: JsonObject::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl NcmClient {
    // ========================================================================
    // Sites
    // ========================================================================

    pub async fn get_exchange_sites(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::ExchangeSites, query, limit).await
    }

    pub async fn get_exchange_site(&self, id: &str) -> Result<Record> {
        self.get(Resource::ExchangeSites, id).await
    }

    pub async fn create_exchange_site(&self, site: NewExchangeSite) -> Result<Record> {
        self.create(Resource::ExchangeSites, &site.into_record())
            .await
    }

    /// Change attributes of a site, keeping its network and router
    pub async fn update_exchange_site(&self, id: &str, attributes: JsonObject) -> Result<Record> {
        check_attributes(&attributes, SITE_UPDATE_FIELDS)?;
        let mut site = self.get(Resource::ExchangeSites, id).await?;
        site.merge_attributes(attributes);
        self.replace(Resource::ExchangeSites, id, &site).await
    }

    pub async fn delete_exchange_site(&self, id: &str) -> Result<()> {
        self.remove(Resource::ExchangeSites, id).await
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// List exchange resources, optionally narrowed to a site or network
    pub async fn get_exchange_resources(
        &self,
        scope: &ExchangeScope,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        let query = scope.apply(query.clone());
        self.list(Resource::ExchangeResources, &query, limit).await
    }

    /// Create a resource on a site
    pub async fn create_exchange_resource(
        &self,
        site_id: &str,
        resource: NewExchangeResource,
    ) -> Result<Record> {
        check_attributes(&resource.attributes, RESOURCE_FIELDS)?;

        let mut record = Record::new(resource.kind.json_type());
        record.merge_attributes(resource.attributes);
        record.set_attribute("name", resource.name);
        record.set_relationship(
            "exchange_site",
            relationship::one(Resource::ExchangeSites.json_type(), site_id),
        );

        self.create(Resource::ExchangeResources, &record).await
    }

    /// Change attributes of a resource, keeping its type and site
    pub async fn update_exchange_resource(
        &self,
        id: &str,
        attributes: JsonObject,
    ) -> Result<Record> {
        check_attributes(&attributes, RESOURCE_FIELDS)?;
        let mut resource = self.get(Resource::ExchangeResources, id).await?;
        resource.merge_attributes(attributes);
        self.replace(Resource::ExchangeResources, id, &resource)
            .await
    }

    pub async fn delete_exchange_resource(&self, id: &str) -> Result<()> {
        self.remove(Resource::ExchangeResources, id).await
    }
}

fn optional(value: Option<String>) -> JsonValue {
    value.map_or(JsonValue::Null, JsonValue::from)
}
