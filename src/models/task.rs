use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

/// Statut posé à la création si le client n'en fournit pas
pub const DEFAULT_STATUS: &str = "TODO";

/// Seule valeur exclue des requêtes "urgent" / "en retard".
/// Le statut reste du texte libre ("à faire", "en cours", "COMPLETED" coexistent)
pub const COMPLETED_STATUS: &str = "COMPLETED";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: Option<DateTime>,
    pub status: String,
    pub assigned_to_id: Option<i32>,
    pub created_by_id: Option<i32>,
    pub created_at: DateTime,         // posé une seule fois
    pub updated_at: Option<DateTime>, // NULL tant que la tâche n'a pas été modifiée
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedToId",
        to = "super::users::Column::Id"
    )]
    AssignedTo,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
}

impl ActiveModelBehavior for ActiveModel {}
