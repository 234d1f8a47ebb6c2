use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use readquest_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    graphql::{create_schema, graphiql_playground, graphql_entry},
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("RUST_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        std::io::Error::other(format!("failed to initialize application state: {}", e))
    })?;
    let schema = create_schema(state.clone());

    log::info!("Starting HTTP server at http://{}:{}", host, port);
    log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&state.config.cors_allowed_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new((*state.jwt_service).clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::public_routes)
            .service(graphql_entry)
            .service(graphiql_playground)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(handlers::protected_routes),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
