pub mod schema;

pub use schema::{create_schema, MutationRoot, QueryRoot, Schema};

use actix_web::{get, http::header::AUTHORIZATION, post, web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{app_state::AppState, auth::Claims};

fn claims_from_request(req: &HttpRequest, state: &AppState) -> Option<Claims> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    state.jwt_service.validate_token(token).ok()
}

/// The GraphQL endpoint itself is public; operations that need a user
/// pull claims out of the request data and fail with UNAUTHORIZED.
#[post("/graphql")]
pub async fn graphql_entry(
    schema: web::Data<Schema>,
    state: web::Data<AppState>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(claims) = claims_from_request(&http_req, &state) {
        request = request.data(claims);
    }
    schema.execute(request).await.into()
}

#[get("/graphiql")]
pub async fn graphiql_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
