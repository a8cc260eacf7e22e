pub mod repository;

use repository::log_event_internal;

/// Логирование события на сервере
///
/// # Примеры
/// ```ignore
/// logger::log("workflow", "Продажа PS-001 переведена в статус 'confirmed'");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
