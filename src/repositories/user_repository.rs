use std::collections::HashMap;

use sea_orm::*;

use crate::models::{task, users};
use crate::utils::datetime;

pub struct UserRepository;

impl UserRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id).one(db).await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await
    }

    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Recherche par nom (sous-chaîne), triée par nom
    pub async fn search_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Name.contains(name))
            .order_by_asc(users::Column::Name)
            .all(db)
            .await
    }

    /// Utilisateurs ayant au moins une tâche assignée échue et non "COMPLETED"
    pub async fn find_users_with_overdue_tasks(
        db: &DatabaseConnection,
    ) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .join_rev(JoinType::InnerJoin, task::Relation::AssignedTo.def())
            .filter(task::Column::DueDate.lt(datetime::now()))
            .filter(task::Column::Status.ne(task::COMPLETED_STATUS))
            .distinct()
            .order_by_asc(users::Column::Name)
            .all(db)
            .await
    }

    /// Noms des utilisateurs demandés, en UNE SEULE query (id -> name)
    pub async fn find_names_by_ids(
        db: &DatabaseConnection,
        user_ids: Vec<i32>,
    ) -> Result<HashMap<i32, String>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(db)
            .await?;

        Ok(found.into_iter().map(|u| (u.id, u.name)).collect())
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        users::Entity::find().count(db).await
    }
}
