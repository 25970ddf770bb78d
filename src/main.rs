use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use albus_server::{app_state::AppState, auth::AuthMiddleware, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let state = AppState::new(config.clone())
        .await
        .expect("failed to initialise application state");

    log::info!(
        "starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::from(state.auth_manager.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            // The login route is whitelisted: it sits outside the guarded scope.
            .service(handlers::login)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware)
                    .service(handlers::list_environments)
                    .service(handlers::list_courses)
                    .service(handlers::list_exams)
                    .service(handlers::get_exam)
                    .service(handlers::start_exam)
                    .service(handlers::complete_exam)
                    .service(handlers::start_exam_as_student)
                    .service(handlers::complete_exam_as_student)
                    .service(handlers::report_exam_violation)
                    .service(handlers::get_assignment)
                    .service(handlers::submit)
                    .service(handlers::list_submissions)
                    .service(handlers::get_exam_results)
                    .service(handlers::list_all_submissions)
                    .service(handlers::get_submission)
                    .service(handlers::get_submission_allowance),
            )
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
