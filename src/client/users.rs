//! User accounts

use super::{check_attributes, NcmClient};
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::record::Record;
use crate::resources::Resource;
use crate::types::{JsonObject, JsonValue, Limit};
use serde_json::json;

/// Optional attributes accepted when creating a user
const CREATE_FIELDS: &[&str] = &["is_active", "last_login", "pending_email"];

/// Attributes that may be changed on an existing user
const UPDATE_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "is_active",
    "user_id",
    "last_login",
    "pending_email",
];

/// A user to create
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Extra attributes (`is_active`, `last_login`, `pending_email`)
    pub attributes: JsonObject,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
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
    /// List users
    pub async fn get_users(
        &self,
        query: &QueryParams,
        limit: impl Into<Limit>,
    ) -> Result<Vec<Record>> {
        self.list(Resource::Users, query, limit).await
    }

    /// Create a user in the account's tenant
    ///
    /// The tenant is read from the first subscription the account can see.
    pub async fn create_user(&self, user: NewUser) -> Result<Record> {
        check_attributes(&user.attributes, CREATE_FIELDS)?;

        let subscription = self
            .find_one(Resource::Subscriptions, &QueryParams::new())
            .await?;
        let tenant = subscription
            .relationship("tenants")
            .and_then(|tenants| tenants.get("data"))
            .cloned()
            .ok_or_else(|| Error::not_found("tenant", "first subscription"))?;

        let mut record = Record::new(Resource::Users.json_type())
            .with_attribute("email", user.email)
            .with_attribute("first_name", user.first_name)
            .with_attribute("last_name", user.last_name)
            .with_relationship("tenant", json!({ "data": [tenant] }));
        record.merge_attributes(user.attributes);

        self.create(Resource::Users, &record).await
    }

    /// Change attributes of the user with this email
    pub async fn update_user(&self, email: &str, attributes: JsonObject) -> Result<Record> {
        check_attributes(&attributes, UPDATE_FIELDS)?;
        self.modify(Resource::Users, &by_email(email)?, |user| {
            user.merge_attributes(attributes);
        })
        .await
    }

    /// Delete the user with this email
    pub async fn delete_user(&self, email: &str) -> Result<()> {
        let user = self.find_one(Resource::Users, &by_email(email)?).await?;
        let id = user
            .id
            .ok_or_else(|| Error::malformed("user record has no id"))?;
        self.remove(Resource::Users, &id).await
    }
}

fn by_email(email: &str) -> Result<QueryParams> {
    if email.is_empty() {
        return Err(Error::missing_argument("an email address is required"));
    }
    Ok(QueryParams::new().filter("email", email))
}
