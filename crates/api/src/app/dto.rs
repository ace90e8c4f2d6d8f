use serde::Serialize;
use serde_json::{Map, Value};

use crate::app::services::RegisteredResource;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct AdminModelEntry {
    pub model: &'static str,
    pub verbose_name_plural: &'static str,
    pub count: usize,
    pub api_url: String,
}

#[derive(Debug, Serialize)]
pub struct AdminIndex {
    pub site_header: &'static str,
    pub models: Vec<AdminModelEntry>,
}

// -------------------------
// Mapping helpers
// -------------------------

/// Collection path of a registered resource, relative to the host.
pub fn collection_path(resource: &dyn RegisteredResource) -> String {
    format!("/api/{}/", resource.collection())
}

/// API root body: `{ "<collection>": "<absolute url>" }` per registered resource.
pub fn api_root(base_url: &str, resources: &[std::sync::Arc<dyn RegisteredResource>]) -> Value {
    let mut out = Map::new();
    for r in resources {
        out.insert(
            r.collection().to_string(),
            Value::String(format!("{}{}", base_url, collection_path(r.as_ref()))),
        );
    }
    Value::Object(out)
}

pub fn admin_index(resources: &[std::sync::Arc<dyn RegisteredResource>]) -> AdminIndex {
    AdminIndex {
        site_header: "itemhub administration",
        models: resources
            .iter()
            .map(|r| AdminModelEntry {
                model: r.model_name(),
                verbose_name_plural: r.collection(),
                count: r.count(),
                api_url: collection_path(r.as_ref()),
            })
            .collect(),
    }
}
