use async_trait::async_trait;
use contracts::workflow::NotificationEvent;

use crate::shared::logger;
use crate::workflow::ports::NotificationPort;

/// Сервис уведомлений
///
/// Уведомление кладётся в системный лог как JSON; внешние каналы
/// (почта, мессенджеры) читают лог или заменяют реализацию порта.
pub struct NotificationService;

#[async_trait]
impl NotificationPort for NotificationService {
    async fn send(&self, event: NotificationEvent) -> anyhow::Result<()> {
        let recipients: Vec<&str> = event.recipients.iter().map(|r| r.code()).collect();
        tracing::info!(
            event_type = %event.event_type,
            sale_id = %event.sale_id,
            recipients = ?recipients,
            "notification sent"
        );
        let payload = serde_json::to_string(&event)?;
        logger::repository::log_event("server", "notification", &payload).await
    }
}
