use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::args::VideoArgs;
use crate::api::shared::ErrorResponse;
use crate::db::models::{NewVideo, Video, VideoChanges};
use crate::db::VideoStore;
use crate::error::{AppError, Result};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/videos/{video_id}")
            .route(web::get().to(get_video))
            .route(web::put().to(put_video))
            .route(web::patch().to(patch_video))
            .route(web::delete().to(delete_video)),
    );
}

/// Fetch a single video.
#[utoipa::path(
    get,
    path = "/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video found", body = Video),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    path: web::Path<i32>,
    store: web::Data<dyn VideoStore>,
) -> Result<HttpResponse> {
    let video_id = path.into_inner();
    let video = store
        .find(video_id)
        .await?
        .ok_or(AppError::NotFound(video_id))?;

    Ok(HttpResponse::Ok().json(video))
}

/// Create a video under the given id.
#[utoipa::path(
    put,
    path = "/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Id for the new video")),
    request_body = NewVideo,
    responses(
        (status = 201, description = "Video created", body = Video),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "A video with this id already exists", body = ErrorResponse)
    )
)]
pub async fn put_video(
    path: web::Path<i32>,
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn VideoStore>,
) -> Result<HttpResponse> {
    let video_id = path.into_inner();
    let new_video = VideoArgs::from_request(&req, &body)?.into_new_video()?;

    let video = store.insert(new_video.with_id(video_id)).await?;
    log::debug!("Created video {}", video.id);

    Ok(HttpResponse::Created().json(video))
}

/// Update some fields of an existing video.
#[utoipa::path(
    patch,
    path = "/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Video id")),
    request_body = VideoChanges,
    responses(
        (status = 200, description = "Video updated", body = Video),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn patch_video(
    path: web::Path<i32>,
    req: HttpRequest,
    body: web::Bytes,
    store: web::Data<dyn VideoStore>,
) -> Result<HttpResponse> {
    let video_id = path.into_inner();
    let changes = VideoArgs::from_request(&req, &body)?.into_changes()?;

    let video = store
        .update(video_id, changes)
        .await?
        .ok_or(AppError::NotFound(video_id))?;
    log::debug!("Updated video {}", video_id);

    Ok(HttpResponse::Ok().json(video))
}

/// Remove a video.
#[utoipa::path(
    delete,
    path = "/videos/{video_id}",
    tag = "videos",
    params(("video_id" = i32, Path, description = "Video id")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn delete_video(
    path: web::Path<i32>,
    store: web::Data<dyn VideoStore>,
) -> Result<HttpResponse> {
    let video_id = path.into_inner();
    if !store.delete(video_id).await? {
        return Err(AppError::NotFound(video_id));
    }
    log::debug!("Deleted video {}", video_id);

    Ok(HttpResponse::NoContent().finish())
}
