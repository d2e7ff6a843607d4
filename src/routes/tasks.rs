use actix_web::{delete, get, http::StatusCode, post, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, ModelTrait, Set};
use tracing::{info, warn};
use validator::Validate;

use crate::errors::{ApiError, ApiResult, StatusBody};
use crate::middleware::AuthUser;
use crate::models::dto::{CreateTaskRequest, Output, TaskOutput, UpdateTaskRequest};
use crate::models::task::{self, ActiveModel as TaskActiveModel};
use crate::repositories::{TaskRepository, UserRepository};
use crate::utils::datetime;

const DEFAULT_URGENT_DAYS: u32 = 3;

fn task_not_found(task_id: i32) -> ApiError {
    ApiError::NotFound(format!("Task with ID {} not found", task_id))
}

/// Date d'échéance illisible: ignorée, comme le faisait l'ancien service
fn parse_due_date_lenient(raw: &str) -> Option<chrono::NaiveDateTime> {
    let parsed = datetime::parse_due_date(raw);
    if parsed.is_none() {
        warn!("Ignoring unparseable due date `{}`", raw);
    }
    parsed
}

/// L'utilisateur assigné doit exister
async fn ensure_user_exists(db: &DatabaseConnection, user_id: i32) -> ApiResult<()> {
    match UserRepository::find_by_id(db, user_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(format!("User with ID {} not found", user_id))),
    }
}

async fn task_list(
    db: &DatabaseConnection,
    tasks: Vec<task::Model>,
) -> ApiResult<Vec<TaskOutput>> {
    Ok(TaskRepository::to_outputs(db, tasks).await?)
}

/// GET /api/tasks - Liste toutes les tâches
#[get("")]
pub async fn list_tasks(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let tasks = TaskRepository::find_all(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "tasks": task_list(db.get_ref(), tasks).await?
    })))
}

/// GET /api/tasks/{id}
#[get("/{id:\\d+}")]
pub async fn get_task(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let task_id = path.into_inner();
    let task = TaskRepository::find_by_id(db.get_ref(), task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    let output = TaskRepository::to_output(db.get_ref(), task).await?;
    Ok(HttpResponse::Ok().json(Output::from(output).envelope()))
}

/// POST /api/tasks - Créer une tâche (title obligatoire)
/// Si un token valide est fourni, son utilisateur devient le créateur
#[post("")]
pub async fn create_task(
    auth_user: Option<AuthUser>,
    body: web::Json<CreateTaskRequest>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let request = body.into_inner();

    if let Some(user_id) = request.assigned_to {
        ensure_user_exists(db.get_ref(), user_id).await?;
    }

    // Le compte du token peut avoir été supprimé depuis
    let created_by = match auth_user {
        Some(auth_user) => UserRepository::find_by_id(db.get_ref(), auth_user.user_id)
            .await?
            .map(|user| user.id),
        None => None,
    };

    let new_task = TaskActiveModel {
        title: Set(request.title.unwrap_or_default()),
        description: Set(request.description.unwrap_or_default()),
        due_date: Set(request.due_date.as_deref().and_then(parse_due_date_lenient)),
        status: Set(request.status.unwrap_or_else(|| task::DEFAULT_STATUS.to_string())),
        assigned_to_id: Set(request.assigned_to),
        created_by_id: Set(created_by),
        created_at: Set(datetime::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let task = new_task.insert(db.get_ref()).await?;
    info!("Task {} created", task.id);

    let output = TaskRepository::to_output(db.get_ref(), task).await?;
    Ok(HttpResponse::Created().json(Output::from(output).envelope()))
}

/// PUT /api/tasks/{id} - Mise à jour partielle, pose updatedAt
#[put("/{id:\\d+}")]
pub async fn update_task(
    path: web::Path<i32>,
    body: web::Json<UpdateTaskRequest>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let task_id = path.into_inner();
    let task = TaskRepository::find_by_id(db.get_ref(), task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    let request = body.into_inner();
    if request.is_empty() {
        return Err(ApiError::BadRequest("Invalid data".to_string()));
    }

    let mut active_model: TaskActiveModel = task.into();

    if let Some(title) = request.title {
        active_model.title = Set(title);
    }

    if let Some(description) = request.description {
        active_model.description = Set(description);
    }

    if let Some(due_date) = request.due_date.as_deref().and_then(parse_due_date_lenient) {
        active_model.due_date = Set(Some(due_date));
    }

    if let Some(status) = request.status {
        active_model.status = Set(status);
    }

    if let Some(user_id) = request.assigned_to {
        ensure_user_exists(db.get_ref(), user_id).await?;
        active_model.assigned_to_id = Set(Some(user_id));
    }

    active_model.updated_at = Set(Some(datetime::now()));

    let task = active_model.update(db.get_ref()).await?;
    info!("Task {} updated", task.id);

    let output = TaskRepository::to_output(db.get_ref(), task).await?;
    Ok(HttpResponse::Ok().json(Output::from(output).envelope()))
}

/// DELETE /api/tasks/{id}
#[delete("/{id:\\d+}")]
pub async fn delete_task(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let task_id = path.into_inner();
    let task = TaskRepository::find_by_id(db.get_ref(), task_id)
        .await?
        .ok_or_else(|| task_not_found(task_id))?;

    task.delete(db.get_ref()).await?;
    info!("Task {} deleted", task_id);

    Ok(HttpResponse::Ok().json(StatusBody::new(
        StatusCode::OK,
        format!("Task with ID {} deleted successfully", task_id),
    )))
}

/// GET /api/tasks/status/{status}
#[get("/status/{status}")]
pub async fn tasks_by_status(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let status = path.into_inner();
    let tasks = TaskRepository::find_by_status(db.get_ref(), &status).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "tasks": task_list(db.get_ref(), tasks).await?
    })))
}

/// GET /api/tasks/sort/due-date
#[get("/sort/due-date")]
pub async fn tasks_sorted_by_due_date(
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let tasks = TaskRepository::find_all_sorted_by_due_date(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "tasks": task_list(db.get_ref(), tasks).await?
    })))
}

/// GET /api/tasks/user/{userId} - Tâches assignées à un utilisateur
#[get("/user/{user_id:\\d+}")]
pub async fn tasks_by_user(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    let tasks = TaskRepository::find_by_assigned_user(db.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "userId": user_id,
        "tasks": task_list(db.get_ref(), tasks).await?
    })))
}

async fn urgent_tasks(db: &DatabaseConnection, days: u32) -> ApiResult<HttpResponse> {
    if TaskRepository::urgent_deadline(datetime::now(), days).is_none() {
        return Err(ApiError::BadRequest(format!("Invalid number of days: {}", days)));
    }

    let tasks = TaskRepository::find_urgent_tasks(db, days).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "days": days,
        "tasks": task_list(db, tasks).await?
    })))
}

/// GET /api/tasks/urgent - Échéance dans les 3 prochains jours
#[get("/urgent")]
pub async fn urgent_tasks_default(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    urgent_tasks(db.get_ref(), DEFAULT_URGENT_DAYS).await
}

/// GET /api/tasks/urgent/{days}
#[get("/urgent/{days:\\d+}")]
pub async fn urgent_tasks_within(
    path: web::Path<u32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    urgent_tasks(db.get_ref(), path.into_inner()).await
}

/// GET /api/tasks/search/{keyword} - Recherche dans le titre et la description
#[get("/search/{keyword}")]
pub async fn search_tasks(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let keyword = path.into_inner();
    let tasks = TaskRepository::search_by_keyword(db.get_ref(), &keyword).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "keyword": keyword,
        "tasks": task_list(db.get_ref(), tasks).await?
    })))
}

pub fn tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .service(list_tasks)
            .service(create_task)
            .service(tasks_by_status)
            .service(tasks_sorted_by_due_date)
            .service(tasks_by_user)
            .service(urgent_tasks_default)
            .service(urgent_tasks_within)
            .service(search_tasks)
            .service(get_task)
            .service(update_task)
            .service(delete_task),
    );
}
