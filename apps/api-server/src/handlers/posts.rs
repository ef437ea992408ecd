//! Post handlers - request parsing, validation and response shaping around the
//! post repository.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{DEFAULT_PAGE_SIZE, Filter, Page, Post, TenantId};
use quill_shared::dto::{CreatePostRequest, ListPostsQuery, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TenantPath {
    tenant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PostPath {
    tenant_id: String,
    slug: String,
}

/// POST /tenant/{tenant_id}/posts
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<TenantPath>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let tenant = TenantId::parse(path.into_inner().tenant_id)?;
    let req = body.into_inner();

    if req.title.is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let post = Post::new(
        state.author_id.as_str(),
        req.title,
        req.abstract_text,
        req.content_raw,
    );
    let created = state
        .posts
        .create(&tenant, post)
        .await
        .map_err(AppError::rejected("could not store post"))?;

    tracing::info!(tenant = %tenant, slug = %created.slug, post_id = %created.id, "Post created");
    Ok(HttpResponse::Ok().json(created))
}

/// GET /tenant/{tenant_id}/posts/{slug}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let PostPath { tenant_id, slug } = path.into_inner();
    let tenant = TenantId::parse(tenant_id)?;

    let post = state.posts.get_by_slug(&tenant, &slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /tenant/{tenant_id}/posts/{slug}
///
/// The post is looked up before the body is decoded, so an unknown slug is a
/// 404 whatever the payload. Read-then-write without a transaction: a
/// concurrent change between the two is overwritten.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let PostPath { tenant_id, slug } = path.into_inner();
    let tenant = TenantId::parse(tenant_id)?;

    let mut post = state.posts.get_by_slug(&tenant, &slug).await?;
    let req: UpdatePostRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed JSON body: {e}")))?;
    post.update_content(req.body, state.author_id.as_str());
    state.posts.save(&tenant, &post).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /tenant/{tenant_id}/posts/{slug}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let PostPath { tenant_id, slug } = path.into_inner();
    let tenant = TenantId::parse(tenant_id)?;

    let post = state.posts.get_by_slug(&tenant, &slug).await?;
    state.posts.delete_by_id(&tenant, post.id).await?;

    tracing::info!(tenant = %tenant, slug = %slug, post_id = %post.id, "Post deleted");
    Ok(HttpResponse::Ok().finish())
}

/// PUT /tenant/{tenant_id}/posts/{slug}/publish
pub async fn publish(
    state: web::Data<AppState>,
    path: web::Path<PostPath>,
) -> AppResult<HttpResponse> {
    let PostPath { tenant_id, slug } = path.into_inner();
    let tenant = TenantId::parse(tenant_id)?;

    let mut post = state.posts.get_by_slug(&tenant, &slug).await?;
    if !post.publish() {
        return Ok(HttpResponse::Ok().json(post));
    }
    state.posts.save(&tenant, &post).await?;

    tracing::info!(tenant = %tenant, slug = %slug, "Post published");
    Ok(HttpResponse::Ok().json(post))
}

/// GET /tenant/{tenant_id}/posts?from=&size=&showDrafts=
pub async fn list(
    state: web::Data<AppState>,
    path: web::Path<TenantPath>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let tenant = TenantId::parse(path.into_inner().tenant_id)?;
    let query = query.into_inner();

    let from = parse_int("from", query.from.as_deref(), 0)?;
    let size = parse_int("size", query.size.as_deref(), DEFAULT_PAGE_SIZE as i64)?;
    let page = Page::new(from, size)?;

    let filter = if query.show_drafts.as_deref().is_some_and(parse_flag) {
        Filter::authored_by(&state.author_id)
    } else {
        Filter::published_only()
    };

    let posts = state
        .posts
        .list(&tenant, page, &filter)
        .await
        .map_err(AppError::rejected("could not list posts"))?;
    Ok(HttpResponse::Ok().json(posts))
}

fn parse_int(name: &str, raw: Option<&str>, default: i64) -> AppResult<i64> {
    match raw {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid {name} {value:?}: not an integer"))),
    }
}

/// Boolean flag; anything unrecognised reads as false.
fn parse_flag(raw: &str) -> bool {
    matches!(raw, "1" | "t" | "T" | "TRUE" | "true" | "True")
}
