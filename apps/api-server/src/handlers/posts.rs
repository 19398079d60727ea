//! Post handlers: public reads and admin-only writes.

use actix_web::{HttpResponse, web};

use mindblog_core::domain::{NewPost, Page, PostChanges, PostId, PostInput, PostStatus, mask_email};
use mindblog_shared::dto::{MessageResponse, PageQuery, PostListResponse, PostPageResponse, PostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Map the wire body onto core input. An empty status string counts as absent.
fn to_input(req: PostRequest) -> AppResult<PostInput> {
    let status = req
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<PostStatus>)
        .transpose()?;

    Ok(PostInput {
        title: req.title,
        slug: req.slug,
        content: req.content.unwrap_or_default(),
        cover_image: req.cover_image.unwrap_or_default(),
        mood: req.mood.unwrap_or_default(),
        tags: req.tags.unwrap_or_default(),
        status,
    })
}

/// GET /api/posts?page=&limit=
pub async fn list_published(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::new(query.page, query.limit);
    let result = state.posts.list_published(page).await?;

    Ok(HttpResponse::Ok().json(PostPageResponse {
        posts: result.posts,
        total: result.total,
        page: page.page,
        limit: page.limit,
    }))
}

/// GET /api/posts/random
pub async fn random(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_random()
        .await?
        .ok_or_else(|| AppError::NotFound("no posts found".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/{slug} - drafts are not visible here.
pub async fn by_slug(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or_else(AppError::post_not_found)?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/all - Protected route
pub async fn list_all(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    Ok(HttpResponse::Ok().json(PostListResponse { posts }))
}

/// POST /api/posts - Protected route
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = NewPost::from_input(to_input(body.into_inner())?)?;
    let post = state.posts.create(new_post).await?;

    tracing::info!(
        id = %post.id,
        slug = %post.slug,
        by = %mask_email(&identity.email),
        "Post created"
    );
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id} - Protected route
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&id)?;
    let changes = PostChanges::from_input(to_input(body.into_inner())?)?;
    let post = state.posts.update(&id, changes).await?;

    tracing::info!(%id, by = %mask_email(&identity.email), "Post updated");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id} - Protected route
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&id)?;
    state.posts.delete(&id).await?;

    tracing::info!(%id, by = %mask_email(&identity.email), "Post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("deleted")))
}

/// PATCH /api/posts/{id}/publish - Protected route
pub async fn toggle_publish(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::parse(&id)?;
    let post = state.posts.toggle_publish(&id).await?;

    tracing::info!(
        %id,
        status = %post.status,
        by = %mask_email(&identity.email),
        "Post publish status toggled"
    );
    Ok(HttpResponse::Ok().json(post))
}
