use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    Form,
};
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};

use crate::models::freelancer_profile::{self, SubscriptionTier};
use crate::models::user::{self, Column as UserCol, Entity as User};
use crate::serializers::accounts::{FormErrors, FreelancerSignupForm, ValidatedSignup};
use crate::templates;
use crate::AppState;

use super::internal;
use super::session::{self, hash_password};

/// What the rendered form pre-fills the rate field with. A UI default only;
/// an empty submission is still a validation error.
pub const DEFAULT_HOURLY_RATE: &str = "50.00";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("a user with that email address already exists")]
    EmailTaken,
    #[error("a user with that username already exists")]
    UsernameTaken,
    #[error("password hashing failed: {0}")]
    Hash(#[source] anyhow::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// The one correctness-critical write in the system: the User row and its
/// FreelancerProfile row go in as a single transaction, so a profile failure
/// takes the user row down with it. A partial signup is never observable.
pub async fn register_freelancer(
    db: &DatabaseConnection,
    data: &ValidatedSignup,
) -> Result<user::Model, RegistrationError> {
    // known duplicates are reported before any write is attempted
    if User::find()
        .filter(UserCol::Email.eq(&data.email))
        .one(db)
        .await?
        .is_some()
    {
        return Err(RegistrationError::EmailTaken);
    }
    if User::find()
        .filter(UserCol::Username.eq(&data.username))
        .one(db)
        .await?
        .is_some()
    {
        return Err(RegistrationError::UsernameTaken);
    }

    let now = Utc::now();
    let hash = hash_password(&data.password).map_err(RegistrationError::Hash)?;

    let txn = db.begin().await?;

    let created = user::ActiveModel {
        id: NotSet,
        username: Set(data.username.clone()),
        email: Set(data.email.clone()),
        password_hash: Set(hash),
        is_freelancer: Set(true),
        is_client: Set(false),
        is_active: Set(true),
        last_login: Set(Some(now)), // signup logs the user straight in
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(classify_unique)?;

    freelancer_profile::ActiveModel {
        user_id: Set(created.id),
        subscription_tier: Set(SubscriptionTier::Free),
        hourly_rate: Set(data.hourly_rate),
    }
    .insert(&txn)
    .await?; // an error here drops txn, rolling the user row back too

    txn.commit().await?;
    Ok(created)
}

/// Two racing submissions can both pass the pre-checks; the storage layer's
/// unique constraints then let exactly one commit, and the loser gets the
/// same field error a validation-time duplicate produces.
fn classify_unique(err: DbErr) -> RegistrationError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
            RegistrationError::EmailTaken
        }
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("username") => {
            RegistrationError::UsernameTaken
        }
        _ => RegistrationError::Db(err),
    }
}

// ---------- handlers ----------

pub async fn signup_page() -> Html<String> {
    Html(templates::signup_page(
        "",
        "",
        DEFAULT_HOURLY_RATE,
        &FormErrors::default(),
    ))
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<FreelancerSignupForm>,
) -> Result<(HeaderMap, Redirect), (StatusCode, Html<String>)> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => return Err(rerender(&form, errors)),
    };

    match register_freelancer(&state.db, &data).await {
        Ok(created) => {
            let headers = session::session_headers(&created, &state).map_err(internal)?;
            Ok((headers, Redirect::to("/")))
        }
        Err(RegistrationError::EmailTaken) => {
            let mut errors = FormErrors::default();
            errors.add("email", "A user with that email address already exists.");
            Err(rerender(&form, errors))
        }
        Err(RegistrationError::UsernameTaken) => {
            let mut errors = FormErrors::default();
            errors.add("username", "A user with that username already exists.");
            Err(rerender(&form, errors))
        }
        Err(err) => Err(internal(err)),
    }
}

fn rerender(form: &FreelancerSignupForm, errors: FormErrors) -> (StatusCode, Html<String>) {
    // passwords are never echoed back into the page
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(templates::signup_page(
            &form.username,
            &form.email,
            form.hourly_rate.as_deref().unwrap_or(""),
            &errors,
        )),
    )
}
