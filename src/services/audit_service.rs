use crate::entities::audit_log_entity as audit_logs;
use crate::error::AppResult;
use crate::models::{AuditLogQuery, AuditLogResponse, PaginatedResponse, PaginationParams};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde_json::Value;

/// 一条审计记录
#[derive(Debug, Clone)]
pub struct AuditEntry<'a> {
    pub actor_id: i64,
    pub store_id: i64,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: i64,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

#[cfg_attr(not(test), derive(Clone))]
pub struct AuditService {
    pool: DatabaseConnection,
}

impl AuditService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 在调用方的事务内写入审计记录，随业务一起提交或回滚
    pub async fn record<C: ConnectionTrait>(conn: &C, entry: AuditEntry<'_>) -> AppResult<()> {
        audit_logs::Entity::insert(audit_logs::ActiveModel {
            actor_id: Set(entry.actor_id),
            store_id: Set(entry.store_id),
            action: Set(entry.action.to_string()),
            entity_type: Set(entry.entity_type.to_string()),
            entity_id: Set(entry.entity_id),
            old_value: Set(entry.old_value),
            new_value: Set(entry.new_value),
            ..Default::default()
        })
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    /// 门店审计记录（分页，倒序）
    pub async fn list(
        &self,
        store_id: i64,
        query: &AuditLogQuery,
    ) -> AppResult<PaginatedResponse<AuditLogResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let base_query =
            audit_logs::Entity::find().filter(audit_logs::Column::StoreId.eq(store_id));
        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(AuditLogResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }
}
