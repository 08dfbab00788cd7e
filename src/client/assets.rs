//! Routers, subscriptions and public SIM management

use super::NcmClient;
use crate::error::Result;
use crate::query::QueryParams;
use crate::record::Record;
use crate::resources::Resource;
use crate::types::Limit;

impl NcmClient {
    /// List routers (`asset_endpoints`)
    pub async fn get_routers(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::Routers, query, limit).await
    }

    /// List subscriptions
    pub async fn get_subscriptions(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::Subscriptions, query, limit).await
    }

    /// List SIM assets under public SIM management
    pub async fn get_public_sim_mgmt_assets(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PublicSimMgmtAssets, query, limit).await
    }

    /// List carrier rate plans
    pub async fn get_public_sim_mgmt_rate_plans(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::PublicSimMgmtRatePlans, query, limit)
            .await
    }
}
