//! Handler for GET /users

use actix_web::{web, HttpResponse};

use account_core::repositories::{UserQueryRepository, UserRepository};
use account_core::transaction::TransactionManager;
use account_core::use_cases::users::GetAllUsersQuery;

use crate::app::AppState;
use crate::dto::user::{ListUsersParams, UserResponse};
use crate::handlers::error::RaisedError;

/// Returns a page of users ordered by id. `page` and `limit` default to
/// the first page of ten.
pub async fn list_users<R, M, Q>(
    state: web::Data<AppState<R, M, Q>>,
    params: web::Query<ListUsersParams>,
) -> Result<HttpResponse, RaisedError>
where
    M: TransactionManager + 'static,
    R: UserRepository<Conn = M::Handle> + 'static,
    Q: UserQueryRepository + 'static,
{
    let query = GetAllUsersQuery {
        pagination: params.pagination(),
    };

    let users = state.get_all_users.execute(query).await.map_err(RaisedError)?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(body))
}
