use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

pub const DEFAULT_ROLE: &str = "ROLE_USER";
pub const DEFAULT_AVATAR: &str = "default.png";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)] // Ne jamais exposer le hash en JSON
    pub password_hash: Option<String>, // Format: pbkdf2:sha256:iterations$salt$hash
    pub role: String,   // 'ROLE_USER', 'ROLE_ADMIN' (texte libre)
    pub avatar: String, // nom de fichier
    pub created_at: String, // "Y-m-d H:i:s", pas un vrai TIMESTAMP
}

// Les tâches pointent vers users deux fois (assignee + créateur):
// les jointures partent de task::Relation
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
