use actix_web::{body::to_bytes, ResponseError};

use readquest_server::{
    errors::AppError,
    models::{
        domain::{User, UserRole},
        dto::response::{AuthResponse, Dashboard, FamilyDashboard},
    },
};

#[actix_web::test]
async fn quota_errors_surface_the_code_clients_switch_on() {
    let err = AppError::QuotaExceeded("monthly attempt limit reached".to_string());

    let response = err.error_response();
    assert_eq!(response.status().as_u16(), 403);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["code"], "QUOTA_EXCEEDED");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("monthly attempt limit reached"));
}

#[test]
fn auth_response_never_leaks_the_password_hash() {
    let user = User::new(
        "Jane",
        "Reader",
        "janereader",
        "jane@example.com",
        "$argon2id$v=19$m=4096,t=3,p=1$c2FsdA$aGFzaA",
        UserRole::Reader,
    );

    let response = AuthResponse {
        token: "access.jwt.token".to_string(),
        refresh_token: "refresh.jwt.token".to_string(),
        user: user.into(),
    };

    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains("\"token\""));
    assert!(json.contains("\"refresh_token\""));
    assert!(json.contains("janereader"));
    assert!(!json.contains("argon2"));
    assert!(!json.contains("password"));
}

#[test]
fn dashboards_are_tagged_for_the_client() {
    let dashboard = Dashboard::Family(FamilyDashboard { children: vec![] });
    let json = serde_json::to_value(&dashboard).unwrap();

    assert_eq!(json["view"], "family");
    assert!(json["children"].as_array().unwrap().is_empty());
}
