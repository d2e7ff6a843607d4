use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDateTime};
use sea_orm::*;

use crate::models::dto::TaskOutput;
use crate::models::task;
use crate::repositories::UserRepository;
use crate::utils::datetime;

pub struct TaskRepository;

impl TaskRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        task_id: i32,
    ) -> Result<Option<task::Model>, DbErr> {
        task::Entity::find_by_id(task_id).one(db).await
    }

    pub async fn find_all_sorted_by_due_date(
        db: &DatabaseConnection,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .order_by_asc(task::Column::DueDate)
            .all(db)
            .await
    }

    /// Égalité stricte sur le statut, triée par échéance
    pub async fn find_by_status(
        db: &DatabaseConnection,
        status: &str,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::Status.eq(status))
            .order_by_asc(task::Column::DueDate)
            .all(db)
            .await
    }

    pub async fn find_by_assigned_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::AssignedToId.eq(user_id))
            .order_by_asc(task::Column::DueDate)
            .all(db)
            .await
    }

    fn due_between(start: NaiveDateTime, end: NaiveDateTime) -> Select<task::Entity> {
        task::Entity::find()
            .filter(task::Column::DueDate.gte(start))
            .filter(task::Column::DueDate.lte(end))
            .order_by_asc(task::Column::DueDate)
    }

    /// Échéance dans [start, end], bornes incluses
    pub async fn find_by_due_date_range(
        db: &DatabaseConnection,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<task::Model>, DbErr> {
        Self::due_between(start, end).all(db).await
    }

    /// Fin de la fenêtre "urgent", None au-delà de l'an 9999 (format stocké "YYYY-...")
    pub fn urgent_deadline(from: NaiveDateTime, days: u32) -> Option<NaiveDateTime> {
        Duration::try_days(i64::from(days))
            .and_then(|window| from.checked_add_signed(window))
            .filter(|deadline| deadline.year() <= 9999)
    }

    /// Tâches à rendre dans les `days` prochains jours, hors "COMPLETED"
    pub async fn find_urgent_tasks(
        db: &DatabaseConnection,
        days: u32,
    ) -> Result<Vec<task::Model>, DbErr> {
        let now = datetime::now();
        let deadline = Self::urgent_deadline(now, days).unwrap_or(NaiveDateTime::MAX);

        Self::due_between(now, deadline)
            .filter(task::Column::Status.ne(task::COMPLETED_STATUS))
            .all(db)
            .await
    }

    /// Mot clé dans le titre OU la description
    pub async fn search_by_keyword(
        db: &DatabaseConnection,
        keyword: &str,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(
                Condition::any()
                    .add(task::Column::Title.contains(keyword))
                    .add(task::Column::Description.contains(keyword)),
            )
            .order_by_asc(task::Column::DueDate)
            .all(db)
            .await
    }

    /// Convertit les tâches en DTO, relations résolues en une requête
    pub async fn to_outputs(
        db: &DatabaseConnection,
        tasks: Vec<task::Model>,
    ) -> Result<Vec<TaskOutput>, DbErr> {
        let user_ids: Vec<i32> = tasks
            .iter()
            .flat_map(|t| [t.assigned_to_id, t.created_by_id])
            .flatten()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let names = UserRepository::find_names_by_ids(db, user_ids).await?;

        Ok(tasks
            .into_iter()
            .map(|t| TaskOutput::new(t, &names))
            .collect())
    }

    pub async fn to_output(
        db: &DatabaseConnection,
        task: task::Model,
    ) -> Result<TaskOutput, DbErr> {
        let mut outputs = Self::to_outputs(db, vec![task]).await?;
        outputs
            .pop()
            .ok_or_else(|| DbErr::Custom("Task conversion produced no output".to_string()))
    }
}
