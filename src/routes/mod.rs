mod admin;
mod gift_links;
mod health;
mod login;
mod posts;
mod products;
mod secret_books;
mod send_code;
mod subscribers;

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let protected = Router::new()
        .route("/products", post(admin::create_product))
        .route(
            "/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route(
            "/products/{id}/images",
            post(admin::generate_product_image_urls),
        )
        .route(
            "/products/{id}/images/{image_uuid}",
            delete(admin::delete_product_image),
        )
        .route("/posts", post(admin::create_post))
        .route(
            "/posts/{id}",
            put(admin::update_post).delete(admin::delete_post),
        )
        .route("/posts/{id}/cover", post(admin::upload_post_cover))
        .route("/secret-books", post(admin::create_secret_book))
        .route(
            "/secret-books/{id}",
            put(admin::update_secret_book).delete(admin::delete_secret_book),
        )
        .route(
            "/secret-books/{id}/pages/batch",
            post(admin::batch_upload_pages),
        )
        .route(
            "/secret-books/{id}/pages/{page_id}",
            delete(admin::delete_secret_page),
        )
        .route(
            "/gift-links",
            get(admin::list_gift_links).post(admin::create_gift_link),
        )
        .route(
            "/gift-links/{id}",
            put(admin::update_gift_link).delete(admin::delete_gift_link),
        )
        .route("/subscribers", get(admin::list_subscribers))
        .layer(from_fn(crate::middleware::admin_middleware));

    let admin_routes = Router::new()
        .route("/login", post(login::login_admin))
        .merge(protected);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/send-code", post(send_code::send_verification_code))
        .route(
            "/subscribers",
            post(subscribers::subscribe).get(subscribers::subscription_status),
        )
        .route("/subscribers/downloads", post(subscribers::record_download))
        .route("/gift-links", get(gift_links::list_gift_links))
        .route("/products", get(products::list_products))
        .route("/products/{slug}", get(products::get_product))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{slug}", get(posts::get_post))
        .route("/secret-books", get(secret_books::list_secret_books))
        .route(
            "/secret-books/{slug}/unlock",
            post(secret_books::unlock_secret_book),
        )
        .nest("/admin", admin_routes)
}
