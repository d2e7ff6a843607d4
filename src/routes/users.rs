use actix_web::{delete, get, http::StatusCode, post, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, ModelTrait, Set};
use tracing::info;
use validator::Validate;

use crate::errors::{ApiError, ApiResult, StatusBody};
use crate::models::dto::{CreateUserRequest, Output, UpdateUserRequest, UserOutput};
use crate::models::users::{self, ActiveModel as UserActiveModel};
use crate::repositories::UserRepository;
use crate::utils::datetime;
use crate::utils::jwt::AuthSettings;
use crate::utils::password;

fn user_not_found(user_id: i32) -> ApiError {
    ApiError::NotFound(format!("User with ID {} not found", user_id))
}

fn to_outputs(users: Vec<users::Model>) -> Vec<UserOutput> {
    users.into_iter().map(UserOutput::from).collect()
}

/// GET /api/users - Liste tous les utilisateurs
#[get("")]
pub async fn list_users(db: web::Data<DatabaseConnection>) -> ApiResult<HttpResponse> {
    let users = UserRepository::find_all(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "users": to_outputs(users)
    })))
}

/// GET /api/users/{id}
#[get("/{id:\\d+}")]
pub async fn get_user(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = UserRepository::find_by_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    Ok(HttpResponse::Ok().json(Output::from(UserOutput::from(user)).envelope()))
}

/// POST /api/users - Créer un utilisateur (name + email obligatoires)
#[post("")]
pub async fn create_user(
    body: web::Json<CreateUserRequest>,
    settings: web::Data<AuthSettings>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;
    let request = body.into_inner();
    let name = request.name.unwrap_or_default();
    let email = request.email.unwrap_or_default();

    // 1. Vérifier si l'email existe déjà
    if UserRepository::find_by_email(db.get_ref(), &email).await?.is_some() {
        return Err(ApiError::Conflict("A user with this email already exists".to_string()));
    }

    // 2. Hash du mot de passe s'il est fourni (sinon le compte ne peut pas se connecter)
    let password_hash = request
        .password
        .map(|plain| password::hash_password(&plain, settings.password_iterations))
        .transpose()
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;

    // 3. Créer l'utilisateur
    let new_user = UserActiveModel {
        username: Set(request.username.unwrap_or_else(|| name.clone())),
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(request.role.unwrap_or_else(|| users::DEFAULT_ROLE.to_string())),
        avatar: Set(request.avatar.unwrap_or_else(|| users::DEFAULT_AVATAR.to_string())),
        created_at: Set(datetime::timestamp()),
        ..Default::default()
    };

    let user = new_user.insert(db.get_ref()).await?;
    info!("User {} created", user.id);

    Ok(HttpResponse::Created().json(Output::from(UserOutput::from(user)).envelope()))
}

/// PUT /api/users/{id} - Mise à jour partielle (name, email)
#[put("/{id:\\d+}")]
pub async fn update_user(
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = UserRepository::find_by_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    let request = body.into_inner();
    if request.is_empty() {
        return Err(ApiError::BadRequest("Invalid data".to_string()));
    }

    let mut active_model: UserActiveModel = user.into();

    if let Some(name) = request.name {
        active_model.name = Set(name);
    }

    if let Some(email) = request.email {
        // L'email ne doit pas appartenir à un autre utilisateur
        let existing = UserRepository::find_by_email(db.get_ref(), &email).await?;
        if existing.is_some_and(|other| other.id != user_id) {
            return Err(ApiError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        active_model.email = Set(email);
    }

    let user = active_model.update(db.get_ref()).await?;
    info!("User {} updated", user.id);

    Ok(HttpResponse::Ok().json(Output::from(UserOutput::from(user)).envelope()))
}

/// DELETE /api/users/{id} - Suppression définitive
#[delete("/{id:\\d+}")]
pub async fn delete_user(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = UserRepository::find_by_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    // Refusé par la FK si des tâches pointent encore vers lui (-> 409)
    user.delete(db.get_ref()).await?;
    info!("User {} deleted", user_id);

    Ok(HttpResponse::Ok().json(StatusBody::new(
        StatusCode::OK,
        format!("User with ID {} deleted successfully", user_id),
    )))
}

/// GET /api/users/search/{name}
#[get("/search/{name}")]
pub async fn search_users(
    path: web::Path<String>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let users = UserRepository::search_by_name(db.get_ref(), &name).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "name": name,
        "users": to_outputs(users)
    })))
}

/// GET /api/users/overdue-tasks - Utilisateurs avec des tâches en retard
#[get("/overdue-tasks")]
pub async fn users_with_overdue_tasks(
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    let users = UserRepository::find_users_with_overdue_tasks(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "users": to_outputs(users)
    })))
}

pub fn users_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(list_users)
            .service(create_user)
            .service(users_with_overdue_tasks)
            .service(search_users)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    );
}
