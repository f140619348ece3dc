use crate::{auth::AuthenticatedUserId, error::AppError, models::TaskInput, services::Services};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks, grouped into `completed` and
/// `pending` arrays.
#[get("")]
pub async fn list_tasks(
    services: web::Data<Services>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let listing = services.tasks.list_tasks(user.0).await?;

    Ok(HttpResponse::Ok().json(listing))
}

/// Creates a new task owned by the authenticated user.
///
/// Status defaults to "pending" when omitted.
#[post("")]
pub async fn create_task(
    services: web::Data<Services>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = services
        .tasks
        .create_task(user.0, task_data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id. A task owned by another user responds
/// with 404, indistinguishable from a missing one.
#[get("/{id}")]
pub async fn get_task(
    services: web::Data<Services>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = services.tasks.get_task(user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task the authenticated user owns.
#[put("/{id}")]
pub async fn update_task(
    services: web::Data<Services>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = services
        .tasks
        .update_task(user.0, task_id.into_inner(), task_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the authenticated user owns.
#[delete("/{id}")]
pub async fn delete_task(
    services: web::Data<Services>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    services
        .tasks
        .delete_task(user.0, task_id.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
