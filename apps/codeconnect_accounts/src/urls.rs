use axum::{
    routing::{get, post},
    Router,
};

use crate::views::{session, signup};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/signup/freelancer/",
            get(signup::signup_page).post(signup::signup),
        )
        .route("/login/", get(session::login_page).post(session::login))
        .route("/logout/", post(session::logout))
}
