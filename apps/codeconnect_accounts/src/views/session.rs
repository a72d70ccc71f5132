use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};
use uuid::Uuid;

use crate::models::user::{self, Column as UserCol, Entity as User};
use crate::serializers::accounts::{FormErrors, LoginForm, SessionClaims};
use crate::templates;
use crate::AppState;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm as ArgonAlgorithm, Argon2, Params, Version,
};

use super::internal;

const SESSION_ISSUER: &str = "codeconnect";
const SESSION_AUDIENCE: &str = "codeconnect-web";

// ---------- handlers ----------

pub async fn login_page() -> Html<String> {
    Html(templates::login_page("", &FormErrors::default()))
}

pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginForm>,
) -> Result<(HeaderMap, Redirect), (StatusCode, Html<String>)> {
    let email = req.email.trim();

    let Some(found) = User::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.db)
        .await
        .map_err(internal)?
    else {
        return Err(invalid_login(email));
    };

    if !found.is_active || !verify_password(&found.password_hash, &req.password).map_err(internal)? {
        return Err(invalid_login(email));
    }

    // stamp last_login the way the auth framework would
    let mut am = found.clone().into_active_model();
    am.last_login = Set(Some(Utc::now()));
    am.update(&state.db).await.map_err(internal)?;

    let headers = session_headers(&found, &state).map_err(internal)?;
    Ok((headers, Redirect::to("/")))
}

pub async fn logout(State(state): State<AppState>) -> (HeaderMap, Redirect) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        clear_session_cookie(&state.session_cfg.cookie_name, &state)
            .parse()
            .unwrap(),
    );
    (headers, Redirect::to("/accounts/login/"))
}

fn invalid_login(email: &str) -> (StatusCode, Html<String>) {
    let mut errors = FormErrors::default();
    errors.add(
        FormErrors::NON_FIELD,
        "Please enter a correct email address and password.",
    );
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(templates::login_page(email, &errors)),
    )
}

// ---------- password hashing ----------

pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    // Argon2id with explicit params (~19MB mem, 2 iters)
    let salt = SaltString::generate(&mut OsRng);
    let params = Params::new(19456, 2, 1, None)?;
    let argon = Argon2::new(ArgonAlgorithm::Argon2id, Version::V0x13, params);
    Ok(argon.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(phc: &str, password: &str) -> Result<bool, anyhow::Error> {
    let parsed = PasswordHash::new(phc)?;
    let params = Params::new(19456, 2, 1, None)?;
    let argon = Argon2::new(ArgonAlgorithm::Argon2id, Version::V0x13, params);
    Ok(argon.verify_password(password.as_bytes(), &parsed).is_ok())
}

// ---------- session helpers ----------

/// Set-Cookie headers that open an authenticated session for `user`.
pub fn session_headers(user: &user::Model, state: &AppState) -> Result<HeaderMap, anyhow::Error> {
    let token = issue_session_jwt(user.id, &user.username, state)?;
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&state.session_cfg.cookie_name, &token, state).parse()?,
    );
    Ok(headers)
}

fn issue_session_jwt(user_id: i64, username: &str, state: &AppState) -> Result<String, anyhow::Error> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id,
        username: username.to_string(),
        sid: Uuid::new_v4(),
        iat: now.timestamp(),
        exp: (now + state.session_cfg.session_ttl).timestamp(),
        iss: SESSION_ISSUER.into(),
        aud: SESSION_AUDIENCE.into(),
    };
    Ok(jsonwebtoken::encode(
        &JwtHeader::new(Algorithm::HS256),
        &claims,
        &state.session_enc,
    )?)
}

pub fn decode_session(
    token: &str,
    state: &AppState,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut v = Validation::new(Algorithm::HS256);
    v.validate_exp = true;
    v.set_audience(&[SESSION_AUDIENCE]);
    v.set_issuer(&[SESSION_ISSUER]);
    jsonwebtoken::decode::<SessionClaims>(token, &state.session_dec, &v).map(|d| d.claims)
}

/// Pull the session out of the request's Cookie header, if one is present
/// and its signature and expiry still hold.
pub fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<SessionClaims> {
    let raw = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    let name = &state.session_cfg.cookie_name;
    let token = raw
        .split(';')
        .find_map(|kv| kv.trim().strip_prefix(&format!("{name}=")))?;
    decode_session(token, state).ok()
}

// ---------- cookies ----------

fn session_cookie(name: &str, value: &str, state: &AppState) -> String {
    let mut c = Cookie::build((name.to_string(), value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(
            state.session_cfg.session_ttl.num_seconds(),
        ))
        .build();

    if state.session_cfg.cookie_secure {
        c.set_secure(true);
    }
    if let Some(ref d) = state.session_cfg.cookie_domain {
        c.set_domain(d.clone());
    }

    c.to_string()
}

fn clear_session_cookie(name: &str, state: &AppState) -> String {
    let mut c = Cookie::build((name.to_string(), "".to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build();
    if state.session_cfg.cookie_secure {
        c.set_secure(true);
    }
    if let Some(ref d) = state.session_cfg.cookie_domain {
        c.set_domain(d.clone());
    }
    c.to_string()
}
