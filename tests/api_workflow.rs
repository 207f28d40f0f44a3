//! End-to-end tests driving the real router: registration/login, catalog
//! CRUD, the order placement + delivery negotiation workflow and the bulk
//! clear endpoints.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pharmacy_server::{Config, ServerState, build_app};

struct TestServer {
    _dir: tempfile::TempDir,
    app: Router,
}

fn test_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let state = ServerState::initialize(&config).unwrap();
    TestServer {
        _dir: dir,
        app: build_app(state),
    }
}

async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_user(app: &Router, username: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/register",
        Some(json!({
            "username": username,
            "password": "secret",
            "address": "Giza",
            "location": { "latitude": 30.0444, "longitude": 31.2357 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn add_medicine(app: &Router, name: &str, quantity: u32) -> u64 {
    let (status, body) = send(
        app,
        "POST",
        "/medicines",
        Some(json!({ "name": name, "price": 25.0, "quantity": quantity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["medicine"]["id"].as_u64().unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = test_server();
    let (status, body) = send(&server.app, "GET", "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is running 🚀");
}

#[tokio::test]
async fn admin_can_login_out_of_the_box() {
    let server = test_server();
    let (status, body) = send(
        &server.app,
        "POST",
        "/login",
        Some(json!({ "username": "Ayman_Mamdouh", "password": "ASMA#" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "Ayman_Mamdouh");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn wrong_password_is_rejected_with_localized_message() {
    let server = test_server();
    let (status, body) = send(
        &server.app,
        "POST",
        "/login",
        Some(json!({ "username": "Ayman_Mamdouh", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "اسم المستخدم او كلمة المرور غير صحيحة");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let server = test_server();
    register_user(&server.app, "mona").await;

    let (status, body) = send(
        &server.app,
        "POST",
        "/register",
        Some(json!({ "username": "mona", "password": "x", "address": "y" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "اسم المستخدم موجود بالفعل");
}

#[tokio::test]
async fn registered_user_can_login_and_sees_location() {
    let server = test_server();
    register_user(&server.app, "mona").await;

    let (status, body) = send(
        &server.app,
        "POST",
        "/login",
        Some(json!({ "username": "mona", "password": "secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["location"]["latitude"], 30.0444);
}

#[tokio::test]
async fn medicine_crud_round_trip() {
    let server = test_server();
    let id = add_medicine(&server.app, "Panadol", 5).await;

    let (status, list) = send(&server.app, "GET", "/medicines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["addedBy"], "admin");
    assert_eq!(list[0]["image"], "/Images/placeholder.jpg");

    let (status, body) = send(
        &server.app,
        "PUT",
        &format!("/medicines/{id}"),
        Some(json!({ "price": 30.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["medicine"]["price"], 30.0);
    assert_eq!(body["medicine"]["name"], "Panadol");

    let (status, body) = send(&server.app, "DELETE", &format!("/medicines/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم حذف الدواء بنجاح");

    let (status, body) = send(
        &server.app,
        "PUT",
        &format!("/medicines/{id}"),
        Some(json!({ "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "الدواء غير موجود");
}

#[tokio::test]
async fn medicine_ids_are_not_reused_after_deletion() {
    let server = test_server();
    let _first = add_medicine(&server.app, "Panadol", 5).await;
    let second = add_medicine(&server.app, "Brufen", 5).await;

    let (status, _) = send(&server.app, "DELETE", &format!("/medicines/{second}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let third = add_medicine(&server.app, "Cataflam", 5).await;
    assert_eq!(third, 3);
}

#[tokio::test]
async fn order_lifecycle_with_negotiation() {
    let server = test_server();
    register_user(&server.app, "mona").await;
    let medicine_id = add_medicine(&server.app, "Panadol", 5).await;

    // Place: 3 of 5 in stock
    let (status, body) = send(
        &server.app,
        "POST",
        "/orders",
        Some(json!({
            "medicines": [{ "id": medicine_id, "quantity": 3 }],
            "address": "Giza",
            "user": "mona",
            "phoneNumber": "0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "تم ارسال الطلب بنجاح");
    let order_id = body["orderId"].as_u64().unwrap();
    assert_eq!(order_id, 1);

    // Stock decremented and persisted
    let (_, list) = send(&server.app, "GET", "/medicines", None).await;
    assert_eq!(list[0]["quantity"], 2);

    // Fresh order: pending, no confirmation field yet, location inherited
    // from registration, one unread new_order notification
    let (_, orders) = send(&server.app, "GET", "/orders", None).await;
    let order = &orders[0];
    assert_eq!(order["status"], "pending");
    assert!(order.get("deliveryConfirmed").is_none());
    assert_eq!(order["location"]["latitude"], 30.0444);
    assert!(order["mapImage"].as_str().unwrap().contains("maps.googleapis.com"));
    assert_eq!(order["notifications"][0]["type"], "new_order");
    assert_eq!(order["notifications"][0]["read"], false);

    // Asking for more than remains fails wholesale
    let (status, body) = send(
        &server.app,
        "POST",
        "/orders",
        Some(json!({
            "medicines": [{ "id": medicine_id, "quantity": 5 }],
            "address": "Giza",
            "user": "mona",
            "phoneNumber": "0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "الكمية المتوفرة من أحد الأدوية غير كافية");

    let (_, list) = send(&server.app, "GET", "/medicines", None).await;
    assert_eq!(list[0]["quantity"], 2);
    let (_, orders) = send(&server.app, "GET", "/orders", None).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    // Admin quotes: processing + price opens the customer decision (null)
    let (status, body) = send(
        &server.app,
        "PUT",
        &format!("/orders/{order_id}/delivery-time"),
        Some(json!({ "deliveryTime": "18:00", "status": "processing", "deliveryPrice": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "processing");
    assert_eq!(body["order"]["deliveryTime"], "18:00");
    assert_eq!(body["order"]["deliveryConfirmed"], Value::Null);

    // An unrelated second update must not reset the pending decision
    let (_, body) = send(
        &server.app,
        "PUT",
        &format!("/orders/{order_id}/delivery-time"),
        Some(json!({ "deliveryTime": "19:00" })),
    )
    .await;
    assert_eq!(body["order"]["deliveryConfirmed"], Value::Null);

    // Customer rejects: order reopens, price stays visible
    let (status, body) = send(
        &server.app,
        "PUT",
        &format!("/orders/{order_id}/confirm-delivery"),
        Some(json!({ "confirmed": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم رفض الطلب");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["deliveryConfirmed"], false);
    assert_eq!(body["order"]["deliveryPrice"], 50.0);

    // Admin re-quotes, customer accepts; status stays processing
    let (_, _) = send(
        &server.app,
        "PUT",
        &format!("/orders/{order_id}/delivery-time"),
        Some(json!({ "status": "processing", "deliveryPrice": 40 })),
    )
    .await;
    let (status, body) = send(
        &server.app,
        "PUT",
        &format!("/orders/{order_id}/confirm-delivery"),
        Some(json!({ "confirmed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم تأكيد الطلب");
    assert_eq!(body["order"]["status"], "processing");
    assert_eq!(body["order"]["deliveryConfirmed"], true);
}

#[tokio::test]
async fn order_repeating_one_medicine_is_checked_against_the_total() {
    let server = test_server();
    let medicine_id = add_medicine(&server.app, "Panadol", 5).await;

    // Two lines of 3 each: individually fine, together over stock
    let (status, body) = send(
        &server.app,
        "POST",
        "/orders",
        Some(json!({
            "medicines": [
                { "id": medicine_id, "quantity": 3 },
                { "id": medicine_id, "quantity": 3 }
            ],
            "address": "Giza",
            "user": "mona",
            "phoneNumber": "0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "الكمية المتوفرة من أحد الأدوية غير كافية");

    let (_, list) = send(&server.app, "GET", "/medicines", None).await;
    assert_eq!(list[0]["quantity"], 5);
    let (_, orders) = send(&server.app, "GET", "/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_updates_on_unknown_order_return_404() {
    let server = test_server();
    let (status, body) = send(
        &server.app,
        "PUT",
        "/orders/42/delivery-time",
        Some(json!({ "status": "processing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "الطلب غير موجود");

    let (status, _) = send(
        &server.app,
        "PUT",
        "/orders/42/confirm-delivery",
        Some(json!({ "confirmed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_endpoints_reset_orders_and_non_admin_users() {
    let server = test_server();
    register_user(&server.app, "mona").await;
    let medicine_id = add_medicine(&server.app, "Panadol", 5).await;
    let (_, _) = send(
        &server.app,
        "POST",
        "/orders",
        Some(json!({
            "medicines": [{ "id": medicine_id, "quantity": 1 }],
            "address": "Giza",
            "user": "mona",
            "phoneNumber": "0100"
        })),
    )
    .await;

    let (status, body) = send(&server.app, "POST", "/clear-orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم مسح جميع الطلبات بنجاح");
    let (_, orders) = send(&server.app, "GET", "/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());

    let (status, body) = send(&server.app, "POST", "/clear-users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم مسح جميع الحسابات بنجاح");

    // Admin survives, the registered user is gone
    let (status, _) = send(
        &server.app,
        "POST",
        "/login",
        Some(json!({ "username": "Ayman_Mamdouh", "password": "ASMA#" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &server.app,
        "POST",
        "/login",
        Some(json!({ "username": "mona", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn clear_notifications_is_an_acknowledged_no_op() {
    let server = test_server();
    register_user(&server.app, "mona").await;
    let medicine_id = add_medicine(&server.app, "Panadol", 5).await;
    let (_, _) = send(
        &server.app,
        "POST",
        "/orders",
        Some(json!({
            "medicines": [{ "id": medicine_id, "quantity": 1 }],
            "address": "Giza",
            "user": "mona",
            "phoneNumber": "0100"
        })),
    )
    .await;

    let (status, body) = send(
        &server.app,
        "POST",
        "/clear-notifications",
        Some(json!({ "username": "mona" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "تم مسح الإشعارات بنجاح");

    // The embedded notification is untouched
    let (_, orders) = send(&server.app, "GET", "/orders", None).await;
    assert_eq!(orders[0]["notifications"][0]["read"], false);
}

#[tokio::test]
async fn unknown_routes_fall_back_to_index_html() {
    let server = test_server();
    std::fs::write(
        server._dir.path().join("index.html"),
        "<html>pharmacy</html>",
    )
    .unwrap();
    std::fs::write(server._dir.path().join("admin.html"), "<html>admin</html>").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/some/client/route")
        .body(Body::empty())
        .unwrap();
    let response = server.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), b"<html>pharmacy</html>");

    // Case-insensitive page match, with the /pages/ prefix
    let request = Request::builder()
        .method("GET")
        .uri("/pages/Admin.html")
        .body(Body::empty())
        .unwrap();
    let response = server.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), b"<html>admin</html>");
}

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    {
        let state = ServerState::initialize(&config).unwrap();
        let app = build_app(state);
        add_medicine(&app, "Panadol", 5).await;
    }

    // Fresh process over the same work dir
    let state = ServerState::initialize(&config).unwrap();
    let app = build_app(state);
    let (_, list) = send(&app, "GET", "/medicines", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Panadol");

    // Restart never duplicates the admin seed
    let (_, login) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "Ayman_Mamdouh", "password": "ASMA#" })),
    )
    .await;
    assert_eq!(login["success"], true);
}
