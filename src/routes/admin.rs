use axum::{
    Json,
    extract::{Path, Query, State},
};

use http::StatusCode;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        BatchPagesRequest, BatchPagesResponse, CoverUploadRequest, GiftLink, GiftLinkRequest,
        ImageUploadUrl, PageFileUpload, PageUploadUrls, Post, PostRequest,
        ProductImageUrlRequest, ProductImageUrlResponse, ProductRequest, ProductResponse,
        SecretBook, SecretBookRequest, SubscriberQuery, SubscriberSearchResponse,
    },
    queries::{
        admin_queries, gift_link_queries, post_queries, product_queries, secret_book_queries,
        subscriber_queries,
    },
    services::{
        image_url_service::{delete_objects_by_prefix, delete_single_object, put_object_url},
        pairing,
    },
    utils::validate_unlock_key,
};

const UPLOAD_URL_TTL_SECS: u64 = 900;

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

//PRODUCT ROUTES
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    if payload.name.is_none() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let slug = payload
        .slug
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("slug is required".to_string()))?;

    if payload.price.is_none() {
        return Err(AppError::BadRequest("price is required".to_string()));
    }

    if product_queries::find_by_slug(&state.db, slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Product with slug {} already exists",
            slug
        )));
    }

    let product = admin_queries::create_product(&state.db, &payload).await?;

    Ok(Json(ProductResponse {
        product,
        image_urls: Vec::new(),
    }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let product = admin_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    let images = product_queries::find_images_by_product_id(&state.db, product.id).await?;

    let env_prefix = state.environment.prefix("products");
    let image_urls = images
        .iter()
        .map(|img| {
            format!(
                "{}/{}/{}/{}.{}",
                state.assets_url, env_prefix, product.id, img.image_uuid, img.extension
            )
        })
        .collect();

    Ok(Json(ProductResponse {
        product,
        image_urls,
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let env_prefix = state.environment.prefix("products");
    let s3_prefix = format!("{}/{}/", env_prefix, id);

    delete_objects_by_prefix(&state.s3_client, &state.s3_bucket, &s3_prefix)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete images from S3: {}", e)))?;

    admin_queries::delete_product(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate_product_image_urls(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductImageUrlRequest>,
) -> Result<Json<ProductImageUrlResponse>> {
    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    let env_prefix = state.environment.prefix("products");
    let mut responses = Vec::new();

    for req in payload.images {
        let image_uuid = Uuid::new_v4();
        let extension = extension_for(&req.content_type);

        let key = format!("{}/{}/{}.{}", env_prefix, id, image_uuid, extension);

        let upload_url = put_object_url(
            &state.s3_client,
            &state.s3_bucket,
            &key,
            &req.content_type,
            UPLOAD_URL_TTL_SECS,
        )
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

        let public_url = format!("{}/{}", state.assets_url, key);

        admin_queries::add_product_image(&state.db, id, image_uuid, extension, req.is_primary)
            .await?;

        responses.push(ImageUploadUrl {
            image_uuid,
            upload_url,
            public_url,
        });
    }

    Ok(Json(ProductImageUrlResponse { images: responses }))
}

pub async fn delete_product_image(
    State(state): State<AppState>,
    Path((id, image_uuid)): Path<(i32, Uuid)>,
) -> Result<StatusCode> {
    let image = admin_queries::delete_product_image(&state.db, id, image_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let env_prefix = state.environment.prefix("products");
    let key = format!("{}/{}/{}.{}", env_prefix, id, image.image_uuid, image.extension);

    delete_single_object(&state.s3_client, &state.s3_bucket, &key)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete image from S3: {}", e)))?;

    Ok(StatusCode::NO_CONTENT)
}

//POST ROUTES
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<PostRequest>,
) -> Result<Json<Post>> {
    if payload.title.is_none() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let slug = payload
        .slug
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("slug is required".to_string()))?;

    if payload.body.is_none() {
        return Err(AppError::BadRequest("body is required".to_string()));
    }

    if post_queries::find_by_slug(&state.db, slug).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Post with slug {} already exists",
            slug
        )));
    }

    let post = post_queries::create_post(&state.db, &payload).await?;

    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PostRequest>,
) -> Result<Json<Post>> {
    let post = post_queries::update_post(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if post_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let env_prefix = state.environment.prefix("posts");
    let s3_prefix = format!("{}/{}/", env_prefix, id);

    delete_objects_by_prefix(&state.s3_client, &state.s3_bucket, &s3_prefix)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete cover from S3: {}", e)))?;

    post_queries::delete_post(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_post_cover(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CoverUploadRequest>,
) -> Result<Json<ImageUploadUrl>> {
    if post_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let image_uuid = Uuid::new_v4();
    let extension = extension_for(&payload.content_type);

    let env_prefix = state.environment.prefix("posts");
    let key = format!("{}/{}/{}.{}", env_prefix, id, image_uuid, extension);

    let upload_url = put_object_url(
        &state.s3_client,
        &state.s3_bucket,
        &key,
        &payload.content_type,
        UPLOAD_URL_TTL_SECS,
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

    post_queries::set_cover(&state.db, id, image_uuid, extension).await?;

    Ok(Json(ImageUploadUrl {
        image_uuid,
        upload_url,
        public_url: format!("{}/{}", state.assets_url, key),
    }))
}

//SECRET BOOK ROUTES
pub async fn create_secret_book(
    State(state): State<AppState>,
    Json(mut payload): Json<SecretBookRequest>,
) -> Result<Json<SecretBook>> {
    if payload.title.is_none() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let slug = payload
        .slug
        .clone()
        .ok_or_else(|| AppError::BadRequest("slug is required".to_string()))?;

    let key = payload
        .unlock_key
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("unlock_key is required".to_string()))?
        .trim()
        .to_uppercase();
    validate_unlock_key(&key)?;
    payload.unlock_key = Some(key);

    if secret_book_queries::find_by_slug(&state.db, &slug)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Secret book with slug {} already exists",
            slug
        )));
    }

    let book = secret_book_queries::create_book(&state.db, &payload).await?;

    Ok(Json(book))
}

pub async fn update_secret_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut payload): Json<SecretBookRequest>,
) -> Result<Json<SecretBook>> {
    if let Some(ref key) = payload.unlock_key {
        let key = key.trim().to_uppercase();
        validate_unlock_key(&key)?;
        payload.unlock_key = Some(key);
    }

    let book = secret_book_queries::update_book(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Secret book with id {} not found", id)))?;

    Ok(Json(book))
}

pub async fn delete_secret_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if secret_book_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Secret book not found".to_string()));
    }

    let env_prefix = state.environment.prefix("secret");
    let s3_prefix = format!("{}/{}/", env_prefix, id);

    delete_objects_by_prefix(&state.s3_client, &state.s3_bucket, &s3_prefix)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to delete pages from S3: {}", e)))?;

    secret_book_queries::delete_book(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Takes the line-art and colored exports of a book, pairs the files by
/// the number in each filename, and hands back an upload URL per file.
/// Page rows are created up front; the client then PUTs the scans.
pub async fn batch_upload_pages(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BatchPagesRequest>,
) -> Result<Json<BatchPagesResponse>> {
    if secret_book_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Secret book not found".to_string()));
    }

    let pairs = pairing::pair_page_files(&payload.line_files, &payload.colored_files)?;
    let extension = extension_for(&payload.content_type);

    let env_prefix = state.environment.prefix("secret");
    let mut page_number = secret_book_queries::next_page_number(&state.db, id).await?;
    let mut pages = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let line_uuid = Uuid::new_v4();
        let colored_uuid = Uuid::new_v4();

        secret_book_queries::create_page(
            &state.db,
            id,
            page_number,
            line_uuid,
            extension,
            colored_uuid,
            extension,
        )
        .await?;

        let line_key = format!("{}/{}/{}.{}", env_prefix, id, line_uuid, extension);
        let colored_key = format!("{}/{}/{}.{}", env_prefix, id, colored_uuid, extension);

        let line_upload = put_object_url(
            &state.s3_client,
            &state.s3_bucket,
            &line_key,
            &payload.content_type,
            UPLOAD_URL_TTL_SECS,
        )
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

        let colored_upload = put_object_url(
            &state.s3_client,
            &state.s3_bucket,
            &colored_key,
            &payload.content_type,
            UPLOAD_URL_TTL_SECS,
        )
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to generate presigned URL: {}", e)))?;

        pages.push(PageUploadUrls {
            page_number,
            line: PageFileUpload {
                file: pair.line,
                image_uuid: line_uuid,
                upload_url: line_upload,
                public_url: format!("{}/{}", state.assets_url, line_key),
            },
            colored: PageFileUpload {
                file: pair.colored,
                image_uuid: colored_uuid,
                upload_url: colored_upload,
                public_url: format!("{}/{}", state.assets_url, colored_key),
            },
        });

        page_number += 1;
    }

    tracing::info!("Added {} page pairs to secret book {}", pages.len(), id);

    Ok(Json(BatchPagesResponse { pages }))
}

pub async fn delete_secret_page(
    State(state): State<AppState>,
    Path((book_id, page_id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    let page = secret_book_queries::delete_page(&state.db, book_id, page_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    let env_prefix = state.environment.prefix("secret");

    for (uuid, ext) in [
        (page.line_uuid, &page.line_extension),
        (page.colored_uuid, &page.colored_extension),
    ] {
        let key = format!("{}/{}/{}.{}", env_prefix, book_id, uuid, ext);
        delete_single_object(&state.s3_client, &state.s3_bucket, &key)
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Failed to delete page from S3: {}", e))
            })?;
    }

    Ok(StatusCode::NO_CONTENT)
}

//GIFT LINK ROUTES
pub async fn list_gift_links(State(state): State<AppState>) -> Result<Json<Vec<GiftLink>>> {
    let links = gift_link_queries::get_all(&state.db, false).await?;

    Ok(Json(links))
}

pub async fn create_gift_link(
    State(state): State<AppState>,
    Json(payload): Json<GiftLinkRequest>,
) -> Result<Json<GiftLink>> {
    if payload.title.is_none() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    if payload.url.is_none() {
        return Err(AppError::BadRequest("url is required".to_string()));
    }

    let link = gift_link_queries::create_link(&state.db, &payload).await?;

    Ok(Json(link))
}

pub async fn update_gift_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GiftLinkRequest>,
) -> Result<Json<GiftLink>> {
    let link = gift_link_queries::update_link(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gift link with id {} not found", id)))?;

    Ok(Json(link))
}

pub async fn delete_gift_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if !gift_link_queries::delete_link(&state.db, id).await? {
        return Err(AppError::NotFound("Gift link not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

//SUBSCRIBER ROUTES
pub async fn list_subscribers(
    State(state): State<AppState>,
    Query(params): Query<SubscriberQuery>,
) -> Result<Json<SubscriberSearchResponse>> {
    let response = subscriber_queries::search_subscribers(&state.db, &params).await?;

    Ok(Json(response))
}
