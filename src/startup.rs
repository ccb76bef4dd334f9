use crate::configuration::Settings;
use crate::db::FeedbackStore;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn FeedbackStore>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let auth_cache_ttl = Duration::from_secs(settings.auth_cache_ttl_secs);
    let settings = web::Data::new(settings);
    let store = web::Data::from(store);

    let auth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let auth_http_client = web::Data::new(auth_http_client);

    let auth_cache = web::Data::new(middleware::authentication::AuthCache::new(auth_cache_ttl));

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{},\"column\":{},\"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .route("/health_check", web::get().to(routes::health_check))
            .service(
                web::scope("/v1/feedback")
                    .wrap(middleware::authentication::Manager::new())
                    .service(routes::feedback::add_handler)
                    .service(routes::feedback::list_handler)
                    .service(routes::feedback::moderate_handler),
            )
            .app_data(json_config.clone())
            .app_data(store.clone())
            .app_data(settings.clone())
            .app_data(auth_http_client.clone())
            .app_data(auth_cache.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
