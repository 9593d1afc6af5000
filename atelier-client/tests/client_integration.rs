// atelier-client/tests/client_integration.rs
// Integration tests against an in-process stub backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use atelier_client::{
    AtelierClient, AuthApi, ClientConfig, ClientError, CustomerApi, ModeleApi, OrderApi,
    TransactionApi, UploadFile, UserApi,
};
use axum::extract::{Multipart, Path, Query};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::{
    CustomerCreate, LoginRequest, ModeleCreate, OrderStatus, TransactionFilters,
};

async fn spawn(api: Router) -> AtelierClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().nest("/api", api);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    AtelierClient::new(&ClientConfig::new(format!("http://{addr}/api"))).unwrap()
}

fn user_json(id: i64, user_name: &str) -> Value {
    json!({
        "id": id,
        "name": "Awa Diop",
        "userName": user_name,
        "email": "awa@atelier.sn",
        "role": "Admin",
        "status": true
    })
}

#[tokio::test]
async fn test_login_returns_session_user() {
    let api = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["emailOrUsername"], "awa");
            assert_eq!(body["password"], "secret");
            Json(json!({ "success": true, "message": "ok", "user": user_json(7, "awa") }))
        }),
    );
    let client = spawn(api).await;

    let user = client
        .login(&LoginRequest {
            email_or_username: "awa".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(user.id, 7);
    assert!(user.is_admin());
}

#[tokio::test]
async fn test_login_rejection_carries_server_message() {
    let api = Router::new().route(
        "/auth/login",
        post(|| async { Json(json!({ "success": false, "message": "Identifiants invalides" })) }),
    );
    let client = spawn(api).await;

    let err = client
        .login(&LoginRequest {
            email_or_username: "awa".into(),
            password: "mauvais".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.root(), ClientError::Rejected { .. }));
    assert_eq!(err.user_message(), "Identifiants invalides");
}

#[tokio::test]
async fn test_error_status_uses_body_message_or_fallback() {
    let api = Router::new()
        .route(
            "/customers/{id}",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "message": "Aucun client avec cet identifiant" })),
                )
            }),
        )
        .route(
            "/customers",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let client = spawn(api).await;

    let err = client.get_customer(99).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Aucun client avec cet identifiant");

    let err = client.list_customers().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "Erreur lors de la récupération des clients");
}

#[tokio::test]
async fn test_missing_measures_are_not_an_error() {
    let api = Router::new().route(
        "/customers/{id}/measures",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "message": "Mesures non trouvées" }))) }),
    );
    let client = spawn(api).await;

    assert_eq!(client.get_measures(3).await.unwrap(), None);
}

#[tokio::test]
async fn test_create_customer_sends_multipart_fields() {
    let seen = Arc::new(Mutex::new(Vec::<(String, Option<String>)>::new()));
    let sink = seen.clone();
    let api = Router::new().route(
        "/customers",
        post(move |mut multipart: Multipart| {
            let sink = sink.clone();
            async move {
                let mut name = String::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let field_name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let data = field.bytes().await.unwrap();
                    if field_name == "Name" {
                        name = String::from_utf8(data.to_vec()).unwrap();
                    }
                    sink.lock().unwrap().push((field_name, file_name));
                }
                Json(json!({
                    "id": 1,
                    "name": name,
                    "phoneNumber": "77 123 45 67",
                    "photoUrl": "/uploads/1.png",
                    "createdAt": "2024-01-05T10:00:00",
                    "updatedAt": "2024-01-05T10:00:00",
                    "measure": null
                }))
            }
        }),
    );
    let client = spawn(api).await;

    let photo = UploadFile::new("awa.png", "image/png", vec![1, 2, 3]);
    let customer = client
        .create_customer(
            CustomerCreate {
                name: "Awa".into(),
                phone_number: "77 123 45 67".into(),
            },
            Some(photo),
        )
        .await
        .unwrap();
    assert_eq!(customer.name, "Awa");

    let seen = seen.lock().unwrap();
    let names: Vec<&str> = seen.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Name", "PhoneNumber", "PhotoFile"]);
    assert_eq!(seen[2].1.as_deref(), Some("awa.png"));
}

#[tokio::test]
async fn test_oversized_image_never_leaves_the_client() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();
    let api = Router::new().route(
        "/modeles",
        post(move || {
            let flag = flag.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
                StatusCode::OK
            }
        }),
    );
    let client = spawn(api).await;

    let image = UploadFile::new("grand.jpg", "image/jpeg", vec![0; 10 * 1024 * 1024 + 1]);
    let err = client
        .create_modele(
            ModeleCreate {
                price: Decimal::from(5000),
            },
            image,
        )
        .await
        .unwrap_err();
    assert!(matches!(err.root(), ClientError::Validation(_)));
    assert_eq!(err.user_message(), "La taille du fichier ne doit pas dépasser 10MB");
    assert!(!called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_status_path_and_patch_body() {
    let patched = Arc::new(Mutex::new(None::<Value>));
    let sink = patched.clone();
    let api = Router::new()
        .route(
            "/orders/status/{status}",
            get(|Path(status): Path<String>| async move {
                assert_eq!(status, "En cours");
                Json(json!([]))
            }),
        )
        .route(
            "/orders/{id}/status",
            patch(move |Path(id): Path<i64>, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    assert_eq!(id, 12);
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({ "success": true, "message": "Statut mis à jour" }))
                }
            }),
        );
    let client = spawn(api).await;

    assert!(client.orders_by_status(OrderStatus::EnCours).await.unwrap().is_empty());
    client.update_order_status(12, OrderStatus::Livre).await.unwrap();
    assert_eq!(patched.lock().unwrap().clone(), Some(json!({ "status": "Livré" })));
}

#[tokio::test]
async fn test_transaction_filters_become_query_parameters() {
    let api = Router::new().route(
        "/transactions",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            assert_eq!(query.get("page").map(String::as_str), Some("1"));
            assert_eq!(query.get("pageSize").map(String::as_str), Some("20"));
            assert_eq!(query.get("orderBy").map(String::as_str), Some("dateTransaction"));
            assert_eq!(query.get("orderDirection").map(String::as_str), Some("desc"));
            assert!(!query.contains_key("type"));
            Json(json!([]))
        }),
    );
    let client = spawn(api).await;

    let list = client
        .list_transactions(&TransactionFilters::cash_screen())
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let api = Router::new().route("/modeles/{id}", delete(|| async { StatusCode::NO_CONTENT }));
    let client = spawn(api).await;

    client.delete_modele(4).await.unwrap();
}

#[tokio::test]
async fn test_identity_checks_and_profile() {
    let api = Router::new()
        .route(
            "/users/check-email/{email}",
            get(|Path(email): Path<String>| async move {
                Json(json!({ "exists": email == "awa@atelier.sn" }))
            }),
        )
        .route(
            "/users/me",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query.get("userId").map(String::as_str), Some("7"));
                Json(json!({ "success": true, "user": user_json(7, "awa") }))
            }),
        );
    let client = spawn(api).await;

    assert!(client.email_exists("awa@atelier.sn").await.unwrap());
    assert!(!client.email_exists("autre@atelier.sn").await.unwrap());
    assert_eq!(client.current_user(7).await.unwrap().user_name, "awa");
}

#[tokio::test]
async fn test_unreachable_server_reads_as_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        AtelierClient::new(&ClientConfig::new(format!("http://{addr}/api"))).unwrap();
    let err = client.list_modeles().await.unwrap_err();
    assert!(matches!(err.root(), ClientError::Http(_)));
    assert_eq!(err.user_message(), "Erreur de connexion au serveur");
}
