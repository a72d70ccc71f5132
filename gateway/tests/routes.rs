use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use chrono::Duration as ChronoDuration;
use codeconnect_accounts::models::{freelancer_profile, user};
use codeconnect_accounts::{ensure_schema, AppState, SessionCfg};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, EntityTrait, PaginatorTrait,
    QueryFilter,
};
use tower::ServiceExt;

const ALICE: &str = "username=alice&email=alice%40example.com&password1=Str0ng!Pass99&password2=Str0ng!Pass99&hourly_rate=75.00";

async fn test_state() -> AppState {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt).await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await.unwrap();
    ensure_schema(&db).await.unwrap();

    let cfg = SessionCfg {
        session_ttl: ChronoDuration::seconds(1_209_600),
        cookie_secure: false,
        cookie_domain: None,
        cookie_name: "codeconnect_session".into(),
    };
    AppState::new(db, "test-session-secret", cfg)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_redirects_unauthenticated_traffic_to_login() {
    let app = gateway::app(test_state().await);

    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/accounts/login/");
}

#[tokio::test]
async fn signup_form_renders_with_the_default_rate() {
    let app = gateway::app(test_state().await);

    let resp = app.oneshot(get("/accounts/signup/freelancer/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("value=\"50.00\""));
    assert!(page.contains("name=\"password2\""));
}

#[tokio::test]
async fn freelancer_signup_signs_in_and_lands_on_the_dashboard_route() {
    let state = test_state().await;
    let app = gateway::app(state.clone());

    let resp = app
        .clone()
        .oneshot(form_post("/accounts/signup/freelancer/", ALICE))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("codeconnect_session="));
    let session_pair = cookie.split(';').next().unwrap().to_string();

    // the dispatcher now recognizes the session
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &session_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/projects/dashboard/");

    // which is a stub until the projects app lands
    let resp = app.clone().oneshot(get("/projects/dashboard/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

    // exactly one user/profile pair exists, with the submitted rate
    let alice = user::Entity::find()
        .filter(user::Column::Email.eq("alice@example.com"))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(alice.is_freelancer);
    assert!(!alice.is_client);

    let profile = freelancer_profile::Entity::find_by_id(alice.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.hourly_rate, Decimal::new(7500, 2));

    assert_eq!(user::Entity::find().count(&state.db).await.unwrap(), 1);
    assert_eq!(
        freelancer_profile::Entity::find().count(&state.db).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn duplicate_signup_is_a_field_error_with_no_second_account() {
    let state = test_state().await;
    let app = gateway::app(state.clone());

    app.clone()
        .oneshot(form_post("/accounts/signup/freelancer/", ALICE))
        .await
        .unwrap();

    // same email, different username
    let resp = app
        .clone()
        .oneshot(form_post(
            "/accounts/signup/freelancer/",
            "username=alice2&email=alice%40example.com&password1=Str0ng!Pass99&password2=Str0ng!Pass99&hourly_rate=60.00",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_string(resp).await;
    assert!(page.contains("A user with that email address already exists."));

    assert_eq!(user::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn out_of_range_rates_never_reach_storage() {
    let state = test_state().await;
    let app = gateway::app(state.clone());

    for rate in ["0", "-10", "12.345"] {
        let body = format!(
            "username=alice&email=alice%40example.com&password1=Str0ng!Pass99&password2=Str0ng!Pass99&hourly_rate={rate}"
        );
        let resp = app
            .clone()
            .oneshot(form_post("/accounts/signup/freelancer/", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "rate {rate}");
    }
    assert_eq!(user::Entity::find().count(&state.db).await.unwrap(), 0);

    // the boundary itself is accepted
    let resp = app
        .clone()
        .oneshot(form_post(
            "/accounts/signup/freelancer/",
            "username=alice&email=alice%40example.com&password1=Str0ng!Pass99&password2=Str0ng!Pass99&hourly_rate=0.01",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn login_rejects_bad_credentials_and_accepts_good_ones() {
    let state = test_state().await;
    let app = gateway::app(state.clone());

    app.clone()
        .oneshot(form_post("/accounts/signup/freelancer/", ALICE))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(form_post(
            "/accounts/login/",
            "email=alice%40example.com&password=wrong-password",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_string(resp).await;
    assert!(page.contains("Please enter a correct email address and password."));

    let resp = app
        .clone()
        .oneshot(form_post(
            "/accounts/login/",
            "email=alice%40example.com&password=Str0ng!Pass99",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");
    assert!(resp.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .starts_with("codeconnect_session="));

    let alice = user::Entity::find()
        .filter(user::Column::Email.eq("alice@example.com"))
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(alice.last_login.is_some());
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = gateway::app(test_state().await);

    let resp = app.oneshot(form_post("/accounts/logout/", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/accounts/login/");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("codeconnect_session=;"));
}
