use serde::{Deserialize, Serialize};

/// Ошибка по одному элементу массовой операции
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemError {
    pub id: String,
    pub error: String,
}

/// Итог массовой операции
///
/// Частичный неуспех — штатный исход, а не ошибка самой операции:
/// счётчики и список ошибок по элементам всегда заполнены полностью.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOperationResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<BulkItemError>,
}

impl BulkOperationResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, id: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(BulkItemError {
            id: id.into(),
            error: error.into(),
        });
    }

    /// Все элементы обработаны
    pub fn is_complete(&self) -> bool {
        self.succeeded + self.failed == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_add_up() {
        let mut result = BulkOperationResult::new(3);
        result.record_success();
        result.record_failure("id-2", "InvalidTransition");
        result.record_success();
        assert!(result.is_complete());
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].id, "id-2");
    }
}
