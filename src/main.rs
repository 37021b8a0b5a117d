use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web_secure_headers::{
    CspExtensions, CspMiddleware, CspReportingMiddleware, SecurityConfig,
};

async fn index(req: HttpRequest) -> HttpResponse {
    let Some(nonce) = req.csp_nonce() else {
        return HttpResponse::InternalServerError().finish();
    };

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta name="csp-nonce" content="{nonce}">
    <style nonce="{nonce}">body {{ font-family: system-ui, sans-serif; }}</style>
</head>
<body>
    <h1>Secure headers demo</h1>
</body>
</html>"#
    );

    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = SecurityConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    log::info!("listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .wrap(CspMiddleware::new(config.clone()))
            .wrap(CspReportingMiddleware::logging())
            .route("/", web::get().to(index))
    })
    .bind(bind)?
    .run()
    .await
}
