use actix_web::{HttpRequest, HttpResponse};

use crate::errors::{ApiError, ApiResult};

/// GET /api - Documentation statique de l'API
pub async fn api_docs() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Task management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/users": "List users",
            "POST /api/users": "Create a user",
            "GET|PUT|DELETE /api/users/{id}": "Read, update or delete a user",
            "GET /api/users/search/{name}": "Search users by name",
            "GET /api/users/overdue-tasks": "Users with overdue tasks",
            "GET /api/tasks": "List tasks",
            "POST /api/tasks": "Create a task",
            "GET|PUT|DELETE /api/tasks/{id}": "Read, update or delete a task",
            "GET /api/tasks/status/{status}": "Tasks with a given status",
            "GET /api/tasks/sort/due-date": "Tasks sorted by due date",
            "GET /api/tasks/user/{userId}": "Tasks assigned to a user",
            "GET /api/tasks/urgent/{days}": "Tasks due within the next days (default 3)",
            "GET /api/tasks/search/{keyword}": "Search tasks by keyword",
            "POST /api/login": "Log in with username and password",
            "POST /api/check-token": "Check the bearer token",
            "POST /api/auth/login": "Log in with email and password",
            "POST /api/auth/verify": "Verify a token",
            "POST /api/auth/register": "Create an account",
            "GET /api/health": "Health check"
        }
    }))
}

/// Toute route inconnue -> 404 structuré
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiError::resource_not_found(req.path()))
}
