//! Payload rendering.
//!
//! The renderer turns a machine, its license and environment into the JSON
//! document that gets encrypted or encoded into the machine file. Only the
//! relations named by the resolved [`IncludeSet`] are embedded; the issuance
//! metadata is always present. The license key is never rendered.

use chrono::{DateTime, SecondsFormat, Utc};
use licensor_types::{
    Component, Entitlement, Environment, Group, License, Machine, Policy, Product, User,
};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::include::{Include, IncludeSet};

/// Errors from a payload renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A renderer-specific failure.
    #[error("{0}")]
    Failed(String),
}

/// Issuance metadata embedded in every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssuanceMeta {
    #[serde(serialize_with = "rfc3339_millis")]
    pub issued: DateTime<Utc>,
    #[serde(serialize_with = "rfc3339_millis_opt")]
    pub expiry: Option<DateTime<Utc>>,
    /// TTL in seconds.
    pub ttl: Option<u64>,
}

/// Everything a renderer may read.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub machine: &'a Machine,
    pub license: &'a License,
    pub environment: Option<&'a Environment>,
    pub meta: &'a IssuanceMeta,
    pub includes: &'a IncludeSet,
}

/// Turns a checkout's record graph into a serializable payload.
///
/// Implementations must be deterministic and embed nothing beyond what the
/// include set reaches.
pub trait PayloadRenderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<Value, RenderError>;
}

/// Renders a JSON:API style document:
/// `{ "data": <machine>, "included": [...], "meta": {issued, expiry, ttl} }`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonApiRenderer;

impl PayloadRenderer for JsonApiRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<Value, RenderError> {
        let mut included = Included::default();

        for include in ctx.includes.iter() {
            match include {
                Include::License => included.push(license_resource(ctx.license)),
                Include::LicenseEntitlements => {
                    ctx.license
                        .entitlements
                        .iter()
                        .for_each(|e| included.push(entitlement_resource(e)));
                }
                Include::LicenseProduct => {
                    if let Some(product) = &ctx.license.product {
                        included.push(product_resource(product));
                    }
                }
                Include::LicensePolicy => {
                    if let Some(policy) = &ctx.license.policy {
                        included.push(policy_resource(policy));
                    }
                }
                Include::LicenseOwner => {
                    if let Some(owner) = &ctx.license.owner {
                        included.push(user_resource(owner));
                    }
                }
                Include::LicenseUsers => {
                    ctx.license
                        .users
                        .iter()
                        .for_each(|u| included.push(user_resource(u)));
                }
                Include::Components => {
                    ctx.machine
                        .components
                        .iter()
                        .for_each(|c| included.push(component_resource(c)));
                }
                Include::Environment => {
                    if let Some(environment) = ctx.environment {
                        included.push(environment_resource(environment));
                    }
                }
                Include::Group => {
                    if let Some(group) = &ctx.machine.group {
                        included.push(group_resource(group));
                    }
                }
                Include::Owner => {
                    if let Some(owner) = &ctx.machine.owner {
                        included.push(user_resource(owner));
                    }
                }
            }
        }

        let data = machine_resource(ctx.machine, ctx.license, ctx.environment);
        let meta = serde_json::to_value(ctx.meta)?;

        Ok(json!({
            "data": data,
            "included": included.into_vec(),
            "meta": meta,
        }))
    }
}

/// Included resources, deduplicated by `(type, id)` in insertion order.
#[derive(Default)]
struct Included {
    seen: HashSet<(String, String)>,
    resources: Vec<Value>,
}

impl Included {
    fn push(&mut self, resource: Value) {
        let key = (
            resource["type"].as_str().unwrap_or_default().to_string(),
            resource["id"].as_str().unwrap_or_default().to_string(),
        );
        if self.seen.insert(key) {
            self.resources.push(resource);
        }
    }

    fn into_vec(self) -> Vec<Value> {
        self.resources
    }
}

fn linkage(kind: &str, id: Option<String>) -> Value {
    json!({ "data": id.map(|id| json!({ "type": kind, "id": id })) })
}

fn machine_resource(
    machine: &Machine,
    license: &License,
    environment: Option<&Environment>,
) -> Value {
    let components: Vec<Value> = machine
        .components
        .iter()
        .map(|c| json!({ "type": "components", "id": c.id.to_string() }))
        .collect();

    json!({
        "type": "machines",
        "id": machine.id.to_string(),
        "attributes": {
            "fingerprint": machine.fingerprint,
            "name": machine.name,
            "platform": machine.platform,
            "hostname": machine.hostname,
            "cores": machine.cores,
        },
        "relationships": {
            "account": linkage("accounts", Some(license.account_id.to_string())),
            "environment": linkage("environments", environment.map(|e| e.id.to_string())),
            "license": linkage("licenses", Some(license.id.to_string())),
            "group": linkage("groups", machine.group.as_ref().map(|g| g.id.to_string())),
            "owner": linkage("users", machine.owner.as_ref().map(|u| u.id.to_string())),
            "components": { "data": components },
        },
    })
}

fn license_resource(license: &License) -> Value {
    json!({
        "type": "licenses",
        "id": license.id.to_string(),
        "attributes": {
            "name": license.name,
            "scheme": license.scheme.as_ref().map(|s| s.as_str()),
            "expiry": license.expiry.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        },
        "relationships": {
            "product": linkage("products", license.product.as_ref().map(|p| p.id.to_string())),
            "policy": linkage("policies", license.policy.as_ref().map(|p| p.id.to_string())),
            "owner": linkage("users", license.owner.as_ref().map(|u| u.id.to_string())),
        },
    })
}

fn product_resource(product: &Product) -> Value {
    json!({
        "type": "products",
        "id": product.id.to_string(),
        "attributes": { "name": product.name },
    })
}

fn policy_resource(policy: &Policy) -> Value {
    json!({
        "type": "policies",
        "id": policy.id.to_string(),
        "attributes": { "name": policy.name, "floating": policy.floating },
    })
}

fn user_resource(user: &User) -> Value {
    json!({
        "type": "users",
        "id": user.id.to_string(),
        "attributes": {
            "email": user.email,
            "firstName": user.first_name,
            "lastName": user.last_name,
        },
    })
}

fn entitlement_resource(entitlement: &Entitlement) -> Value {
    json!({
        "type": "entitlements",
        "id": entitlement.id.to_string(),
        "attributes": { "code": entitlement.code, "name": entitlement.name },
    })
}

fn component_resource(component: &Component) -> Value {
    json!({
        "type": "components",
        "id": component.id.to_string(),
        "attributes": { "fingerprint": component.fingerprint, "name": component.name },
    })
}

fn environment_resource(environment: &Environment) -> Value {
    json!({
        "type": "environments",
        "id": environment.id.to_string(),
        "attributes": { "code": environment.code, "name": environment.name },
    })
}

fn group_resource(group: &Group) -> Value {
    json!({
        "type": "groups",
        "id": group.id.to_string(),
        "attributes": { "name": group.name },
    })
}

fn rfc3339_millis<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn rfc3339_millis_opt<S: Serializer>(t: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match t {
        Some(t) => rfc3339_millis(t, s),
        None => s.serialize_none(),
    }
}
