use serde::{Deserialize, Serialize};

/// Роль пользователя в системе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Sales,
    Finance,
    Warehouse,
}

impl UserRole {
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Sales => "sales",
            UserRole::Finance => "finance",
            UserRole::Warehouse => "warehouse",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(UserRole::Admin),
            "manager" => Some(UserRole::Manager),
            "sales" => Some(UserRole::Sales),
            "finance" => Some(UserRole::Finance),
            "warehouse" => Some(UserRole::Warehouse),
            _ => None,
        }
    }
}

/// Инициатор операции workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Системный инициатор для доверенных внутренних вызовов
    pub fn system() -> Self {
        Self {
            user_id: "system".to_string(),
            role: UserRole::Admin,
        }
    }
}

/// DTO инициатора в запросах API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorDto {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: String,
}

impl ActorDto {
    /// Преобразовать в Actor; неизвестная роль — ошибка, а не умолчание
    pub fn into_actor(self) -> Result<Actor, String> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| format!("Unknown role: {}", self.role))?;
        Ok(Actor {
            user_id: self.user_id,
            role,
        })
    }
}
