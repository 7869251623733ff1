use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};

use townboard_be::AppState;
use townboard_be::config;
use townboard_be::handlers::file_handlers::get_upload_url;
use townboard_be::handlers::post_handlers::{create_post, list_posts};
use townboard_be::handlers::profile_handlers::{me, update_me};
use townboard_be::middleware::session::SessionConfig;
use townboard_be::services::image_service::ImageService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };

    let session_secret = match config::get_session_secret() {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState { pg_pool });
    let session_data = web::Data::new(SessionConfig::new(session_secret));
    let image_data = web::Data::new(ImageService::new_from_env());

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(session_data.clone())
            .app_data(image_data.clone())
            .service(
                web::scope("/api")
                    .service(create_post) // POST /api/posts
                    .service(list_posts) // GET  /api/posts
                    .service(get_upload_url) // GET  /api/files
                    .service(me) // GET  /api/users/me
                    .service(update_me), // POST /api/users/me
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
