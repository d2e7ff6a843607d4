// Data Transfer Objects: requêtes entrantes et réponses structurées
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{task, users};
use crate::utils::datetime::format_datetime;

// ---------------------------------------------------------------------------
// Sorties
// ---------------------------------------------------------------------------

/// Utilisateur tel qu'exposé par l'API (sans le hash du mot de passe)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOutput {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub created_at: String,
}

impl From<users::Model> for UserOutput {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            role: user.role,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// Relation aplatie en {id, name}
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub due_date: String, // "" si pas d'échéance
    pub status: String,
    pub assigned_to: Option<UserRef>,
    pub created_by: Option<UserRef>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl TaskOutput {
    /// `user_names` doit contenir les noms de l'assignee et du créateur (id -> name)
    pub fn new(task: task::Model, user_names: &HashMap<i32, String>) -> Self {
        let user_ref = |id: i32| UserRef {
            id,
            name: user_names.get(&id).cloned().unwrap_or_default(),
        };

        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date.as_ref().map(format_datetime).unwrap_or_default(),
            status: task.status,
            assigned_to: task.assigned_to_id.map(user_ref),
            created_by: task.created_by_id.map(user_ref),
            created_at: format_datetime(&task.created_at),
            updated_at: task.updated_at.as_ref().map(format_datetime),
        }
    }
}

/// Une ressource sérialisable, emballée sous sa clé nommée ("user" / "task")
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    User(UserOutput),
    Task(TaskOutput),
}

impl Output {
    pub fn key(&self) -> &'static str {
        match self {
            Output::User(_) => "user",
            Output::Task(_) => "task",
        }
    }

    pub fn envelope(self) -> serde_json::Value {
        let key = self.key();
        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), serde_json::to_value(self).unwrap_or_default());
        serde_json::Value::Object(body)
    }
}

impl From<UserOutput> for Output {
    fn from(user: UserOutput) -> Self {
        Output::User(user)
    }
}

impl From<TaskOutput> for Output {
    fn from(task: TaskOutput) -> Self {
        Output::Task(task)
    }
}

/// Infos utilisateur renvoyées après login/inscription
#[derive(Debug, Serialize)]
pub struct AuthUserInfo {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&users::Model> for AuthUserInfo {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: AuthUserInfo,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Entrées
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(required(message = "title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<i32>,
}

/// Mise à jour partielle: seuls les champs présents sont appliqués
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
    pub assigned_to: Option<i32>,
}

impl UpdateTaskRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "email is required"))]
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// POST /api/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "username is required"))]
    pub username: Option<String>,
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct EmailLoginRequest {
    #[validate(required(message = "email is required"))]
    pub email: Option<String>,
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required(message = "email is required"))]
    pub email: Option<String>,
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "username is required"))]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyTokenRequest {
    #[validate(required(message = "token is required"))]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_task() -> task::Model {
        let created = NaiveDate::from_ymd_opt(2025, 10, 21)
            .unwrap()
            .and_hms_opt(13, 51, 8)
            .unwrap();

        task::Model {
            id: 3,
            title: "Réunion de planification".to_string(),
            description: "Sprint".to_string(),
            due_date: None,
            status: "à faire".to_string(),
            assigned_to_id: Some(2),
            created_by_id: Some(1),
            created_at: created,
            updated_at: None,
        }
    }

    #[test]
    fn task_output_flattens_relations() {
        let names = HashMap::from([(1, "Admin User".to_string()), (2, "John Doe".to_string())]);
        let output = TaskOutput::new(sample_task(), &names);

        assert_eq!(output.assigned_to, Some(UserRef { id: 2, name: "John Doe".into() }));
        assert_eq!(output.created_by, Some(UserRef { id: 1, name: "Admin User".into() }));
        assert_eq!(output.due_date, "");
        assert_eq!(output.created_at, "2025-10-21 13:51:08");
        assert!(output.updated_at.is_none());
    }

    #[test]
    fn task_output_serializes_camel_case() {
        let output = TaskOutput::new(sample_task(), &HashMap::new());
        let json = serde_json::to_value(Output::from(output).envelope()).unwrap();

        let task = &json["task"];
        assert_eq!(task["id"], 3);
        assert_eq!(task["dueDate"], "");
        assert_eq!(task["assignedTo"]["name"], "");
        assert!(task["updatedAt"].is_null());
        assert!(task.get("assigned_to_id").is_none());
    }

    #[test]
    fn user_output_hides_password_hash() {
        let user = users::Model {
            id: 1,
            name: "Admin User".into(),
            username: "admin".into(),
            email: "admin@example.com".into(),
            password_hash: Some("pbkdf2:sha256:1000$abc$def".into()),
            role: "ROLE_ADMIN".into(),
            avatar: "admin.png".into(),
            created_at: "2025-10-21 13:51:08".into(),
        };

        let json = Output::from(UserOutput::from(user)).envelope();
        assert_eq!(json["user"]["username"], "admin");
        assert_eq!(json["user"]["createdAt"], "2025-10-21 13:51:08");
        assert!(!json.to_string().contains("pbkdf2"));
    }

    #[test]
    fn update_requests_detect_empty_body() {
        assert!(UpdateTaskRequest::default().is_empty());
        assert!(UpdateUserRequest::default().is_empty());

        let partial: UpdateTaskRequest = serde_json::from_str(r#"{"status":"en cours"}"#).unwrap();
        assert!(!partial.is_empty());
    }

    #[test]
    fn create_task_requires_title() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"description":"sans titre"}"#).unwrap();
        assert!(request.validate().is_err());

        let request: CreateTaskRequest = serde_json::from_str(r#"{"title":"ok"}"#).unwrap();
        assert!(request.validate().is_ok());
    }
}
