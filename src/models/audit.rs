use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entities::audit_log_entity as audit_logs;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AuditLogQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogResponse {
    pub id: i64,
    pub actor_id: i64,
    pub store_id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<audit_logs::Model> for AuditLogResponse {
    fn from(m: audit_logs::Model) -> Self {
        AuditLogResponse {
            id: m.id,
            actor_id: m.actor_id,
            store_id: m.store_id,
            action: m.action,
            entity_type: m.entity_type,
            entity_id: m.entity_id,
            old_value: m.old_value,
            new_value: m.new_value,
            created_at: m.created_at,
        }
    }
}
