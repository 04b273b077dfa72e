use chrono::Utc;

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

/// Build the event stream identifier for an aggregate owned by a tenant.
pub fn stream_id(kind: &str, tenant_id: &str, id: &str) -> String {
    format!("{kind}-{tenant_id}-{id}")
}

pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
