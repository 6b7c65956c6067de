//! Application state and factory
//!
//! Builds the actix-web application over a set of command/query
//! handlers. The factory is generic over the repository and transaction
//! manager implementations so integration tests can run the full route
//! tree against in-memory mocks.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use account_core::errors::PresentationError;
use account_core::repositories::{UserQueryRepository, UserRepository};
use account_core::transaction::TransactionManager;
use account_core::use_cases::users::{CreateUserHandler, GetAllUsersHandler};

use crate::handlers::error::RaisedError;
use crate::middleware::{create_cors, ErrorNormalizer};
use crate::routes::users::{create_user, list_users};

/// Shared handlers for the route tree.
pub struct AppState<R, M, Q>
where
    M: TransactionManager,
    R: UserRepository<Conn = M::Handle>,
    Q: UserQueryRepository,
{
    pub create_user: CreateUserHandler<R, M>,
    pub get_all_users: GetAllUsersHandler<Q>,
}

impl<R, M, Q> AppState<R, M, Q>
where
    M: TransactionManager + 'static,
    R: UserRepository<Conn = M::Handle> + 'static,
    Q: UserQueryRepository + 'static,
{
    pub fn new(repository: Arc<R>, tx_manager: Arc<M>, query_repository: Arc<Q>) -> Self {
        Self {
            create_user: CreateUserHandler::new(repository, tx_manager),
            get_all_users: GetAllUsersHandler::new(query_repository),
        }
    }
}

/// Create and configure the application with all dependencies.
pub fn create_app<R, M, Q>(
    app_state: web::Data<AppState<R, M, Q>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    M: TransactionManager + 'static,
    R: UserRepository<Conn = M::Handle> + 'static,
    Q: UserQueryRepository + 'static,
{
    App::new()
        .app_data(app_state)
        // Wrapping order matters: the normalizer is registered last so
        // it runs outermost and sees failures from everything inside.
        .wrap(TracingLogger::default())
        .wrap(create_cors())
        .wrap(ErrorNormalizer)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/users")
                .route("/samples", web::post().to(create_user::<R, M, Q>))
                .route("", web::get().to(list_users::<R, M, Q>)),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "account-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Unmatched routes fail through the normalizer like everything else.
async fn not_found() -> Result<HttpResponse, RaisedError> {
    Err(RaisedError(PresentationError::not_found(
        "the requested resource was not found",
    )))
}
