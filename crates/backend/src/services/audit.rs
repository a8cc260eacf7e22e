use async_trait::async_trait;
use contracts::workflow::AuditRecord;

use crate::shared::logger;
use crate::workflow::ports::AuditPort;

/// Журнал аудита переходов поверх системного лога
pub struct DbAuditLog;

#[async_trait]
impl AuditPort for DbAuditLog {
    async fn record(&self, record: AuditRecord) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&record)?;
        logger::repository::log_event("server", "audit", &payload).await
    }
}
