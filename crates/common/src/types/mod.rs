use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self { Self { status: "ok" } }
}

/// Fixed confirmation string returned by the per-resource liveness endpoints.
pub fn liveness_message(resource: &str) -> String {
    format!("{resource} service is running")
}
