//! Handler for POST /users/samples

use actix_web::{web, HttpResponse};
use validator::Validate;

use account_core::repositories::UserRepository;
use account_core::transaction::TransactionManager;
use account_core::use_cases::users::CreateUserCommand;

use crate::app::AppState;
use crate::dto::user::{validation_fault, CreateUserRequest};
use crate::handlers::error::RaisedError;

/// Creates a user from the request body. The insert runs inside a
/// transaction; on success the response is `201 Created` with an empty
/// body.
pub async fn create_user<R, M, Q>(
    state: web::Data<AppState<R, M, Q>>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, RaisedError>
where
    M: TransactionManager + 'static,
    R: UserRepository<Conn = M::Handle> + 'static,
    Q: account_core::repositories::UserQueryRepository + 'static,
{
    let request = request.into_inner();
    request.validate().map_err(|errors| RaisedError(validation_fault(&errors)))?;

    let command = CreateUserCommand {
        name: request.name,
        email: request.email,
        password: request.password,
    };

    state.create_user.execute(command).await.map_err(RaisedError)?;

    Ok(HttpResponse::Created().finish())
}
