use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    routing::get,
    Router,
};

use codeconnect_accounts::views::session::session_from_headers;
use codeconnect_accounts::{templates, urls, AppState};

/// Project-level routing: the dispatcher at `/`, the accounts app under
/// `/accounts`, and a stub where the projects app will eventually mount.
/// The admin UI is delegated and not mounted here.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_view))
        .route("/projects/dashboard/", get(projects_dashboard))
        .nest("/accounts", urls::router())
        .with_state(state)
}

/// The home page is pure routing policy: authenticated traffic goes to the
/// project dashboard, everyone else to login.
async fn dashboard_view(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if session_from_headers(&state, &headers).is_some() {
        Redirect::to("/projects/dashboard/")
    } else {
        Redirect::to("/accounts/login/")
    }
}

async fn projects_dashboard() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Html(templates::unbuilt_page("The project dashboard")),
    )
}
