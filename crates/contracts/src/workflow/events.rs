use crate::enums::SaleStatus;
use crate::workflow::side_effects::StakeholderRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Событие успешного перехода статуса
///
/// Неизменяемо после создания: одно и то же событие читают
/// независимые потребители (аудит, уведомления).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionEvent {
    #[serde(rename = "saleId")]
    pub sale_id: Uuid,
    #[serde(rename = "fromStatus")]
    pub from: SaleStatus,
    #[serde(rename = "toStatus")]
    pub to: SaleStatus,
    pub reason: Option<String>,
    #[serde(rename = "actorId")]
    pub actor_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl TransitionEvent {
    pub fn new(
        sale_id: Uuid,
        from: SaleStatus,
        to: SaleStatus,
        reason: Option<String>,
        actor_id: String,
    ) -> Self {
        Self {
            sale_id,
            from,
            to,
            reason,
            actor_id,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Снимок статуса для аудита
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: SaleStatus,
}

/// Запись аудита перехода
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub action: String,
    #[serde(rename = "saleId")]
    pub sale_id: Uuid,
    pub before: StatusSnapshot,
    pub after: StatusSnapshot,
    pub reason: Option<String>,
    #[serde(rename = "actorId")]
    pub actor_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AuditRecord {
    /// Запись аудита для события перехода
    pub fn status_change(event: &TransitionEvent) -> Self {
        Self {
            action: "STATUS_CHANGE".to_string(),
            sale_id: event.sale_id,
            before: StatusSnapshot { status: event.from },
            after: StatusSnapshot { status: event.to },
            reason: event.reason.clone(),
            actor_id: event.actor_id.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Доменное уведомление для внешних получателей
///
/// Доставка fire-and-forget, подтверждение не требуется.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "saleId")]
    pub sale_id: Uuid,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub recipients: Vec<StakeholderRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_record_carries_before_and_after_status() {
        let event = TransitionEvent::new(
            Uuid::new_v4(),
            SaleStatus::Draft,
            SaleStatus::Pending,
            Some("готово к подтверждению".into()),
            "user-1".into(),
        );
        let record = AuditRecord::status_change(&event);
        assert_eq!(record.action, "STATUS_CHANGE");
        assert_eq!(record.before.status, SaleStatus::Draft);
        assert_eq!(record.after.status, SaleStatus::Pending);
        assert_eq!(record.sale_id, event.sale_id);
        assert_eq!(record.reason.as_deref(), Some("готово к подтверждению"));
    }

    #[test]
    fn transition_event_serializes_with_camel_case_keys() {
        let event = TransitionEvent::new(
            Uuid::new_v4(),
            SaleStatus::Invoiced,
            SaleStatus::Paid,
            None,
            "finance-1".into(),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["fromStatus"], "invoiced");
        assert_eq!(json["toStatus"], "paid");
        assert!(json.get("saleId").is_some());
    }
}
