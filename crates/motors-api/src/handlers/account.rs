//! Account handlers: register, login, logout, account home and updates.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::{error, info, warn};

use motors_auth::rbac::enforcer::require_owner;
use motors_auth::{AccountClaims, RequestIdentity};
use motors_core::error::ErrorKind;
use motors_entity::account::{AccountProfile, NewAccount, UpdateAccount};

use crate::dto::account::EMAIL_EXISTS;
use crate::dto::{
    AccountUpdateForm, FieldError, LoginForm, PasswordChangeForm, RegisterForm, validate_form,
};
use crate::error::ApiResult;
use crate::extractors::{CurrentAccount, Identity, parse_id};
use crate::middleware::identity::{PERMISSION_NOTICE, login_redirect};
use crate::state::AppState;
use crate::views::{AccountFormValues, Page};

use super::{page_context, render};

/// Shown for an unknown email and for a wrong password alike.
pub const CREDENTIALS_NOTICE: &str = "Please check your credentials and try again.";

const UPDATE_TITLE: &str = "Update Account Information";

fn has_error(errors: &[FieldError], field: &str) -> bool {
    errors.iter().any(|e| e.field == field)
}

async fn show_login(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    email: &str,
    notice: Option<String>,
    errors: Vec<FieldError>,
) -> ApiResult<Response> {
    let (jar, mut ctx) = page_context(state, identity, jar, "Login").await?;
    if notice.is_some() {
        ctx.notice = notice;
    }
    let ctx = ctx.with_errors(errors);
    let page = Page::Login {
        email: email.to_string(),
    };
    Ok(render(state, status, jar, &page, &ctx))
}

async fn show_register(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    form: &RegisterForm,
    notice: Option<&str>,
    errors: Vec<FieldError>,
) -> ApiResult<Response> {
    let (jar, mut ctx) = page_context(state, identity, jar, "Register").await?;
    if let Some(notice) = notice {
        ctx.notice = Some(notice.to_string());
    }
    let ctx = ctx.with_errors(errors);
    let page = Page::Register {
        first_name: form.account_firstname.clone(),
        last_name: form.account_lastname.clone(),
        email: form.account_email.clone(),
    };
    Ok(render(state, status, jar, &page, &ctx))
}

async fn show_update(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    values: AccountFormValues,
    notice: Option<&str>,
    errors: Vec<FieldError>,
) -> ApiResult<Response> {
    let (jar, mut ctx) = page_context(state, identity, jar, UPDATE_TITLE).await?;
    if let Some(notice) = notice {
        ctx.notice = Some(notice.to_string());
    }
    let ctx = ctx.with_errors(errors);
    Ok(render(state, status, jar, &Page::AccountUpdate(values), &ctx))
}

/// GET /account/login
pub async fn login_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    show_login(&state, identity, jar, StatusCode::OK, "", None, Vec::new()).await
}

/// POST /account/login
pub async fn login(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    let errors = validate_form(&form);
    if !errors.is_empty() {
        return show_login(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            &form.account_email,
            None,
            errors,
        )
        .await;
    }

    let verified = match state.accounts.find_by_email(&form.account_email).await? {
        Some(account) => {
            let matches = state
                .hasher
                .verify(form.account_password, account.password_hash.clone())
                .await?;
            matches.then_some(account)
        }
        None => {
            state.hasher.verify_decoy(form.account_password).await?;
            None
        }
    };

    let Some(account) = verified else {
        info!("Login rejected: unknown email or wrong password");
        return show_login(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            &form.account_email,
            Some(CREDENTIALS_NOTICE.to_string()),
            Vec::new(),
        )
        .await;
    };

    let profile = account.into_profile();
    let token = state.issuer.issue(&profile)?;
    info!(account_id = profile.id, role = %profile.account_type, "Login succeeded");

    let jar = state.cookies.set_token(jar, token);
    Ok((jar, Redirect::to("/account/")).into_response())
}

/// GET /account/register
pub async fn register_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    show_register(
        &state,
        identity,
        jar,
        StatusCode::OK,
        &RegisterForm::default(),
        None,
        Vec::new(),
    )
    .await
}

/// POST /account/register
pub async fn register(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    let mut errors = validate_form(&form);
    if !has_error(&errors, "account_email")
        && state
            .accounts
            .find_by_email(&form.account_email)
            .await?
            .is_some()
    {
        errors.push(FieldError::new("account_email", EMAIL_EXISTS));
        errors.sort_by(|a, b| a.field.cmp(&b.field));
    }
    if !errors.is_empty() {
        return show_register(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            &form,
            None,
            errors,
        )
        .await;
    }

    let password_hash = match state.hasher.hash(form.account_password.clone()).await {
        Ok(digest) => digest,
        Err(err) => {
            error!(error = %err, "Password hashing failed during registration");
            return show_register(
                &state,
                identity,
                jar,
                StatusCode::INTERNAL_SERVER_ERROR,
                &form,
                Some("Sorry, there was an error processing the registration."),
                Vec::new(),
            )
            .await;
        }
    };

    let new_account = NewAccount {
        first_name: form.account_firstname.clone(),
        last_name: form.account_lastname.clone(),
        email: form.account_email.clone(),
        password_hash,
    };

    match state.accounts.register(&new_account).await {
        Ok(account) => {
            info!(account_id = account.id, "Account registered");
            show_login(
                &state,
                identity,
                jar,
                StatusCode::CREATED,
                "",
                Some(format!(
                    "Congratulations, you're registered {}. Please log in.",
                    account.first_name
                )),
                Vec::new(),
            )
            .await
        }
        Err(err) => {
            warn!(kind = %err.kind, error = %err.message, "Registration failed");
            show_register(
                &state,
                identity,
                jar,
                StatusCode::NOT_IMPLEMENTED,
                &form,
                Some("Sorry, the registration failed."),
                Vec::new(),
            )
            .await
        }
    }
}

/// GET /account/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = state.cookies.clear_all(jar);
    (jar, Redirect::to("/")).into_response()
}

/// GET /account/
pub async fn account_home(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    let (jar, ctx) = page_context(&state, identity, jar, "Account Management").await?;
    Ok(render(&state, StatusCode::OK, jar, &Page::AccountHome, &ctx))
}

/// GET /account/update/{account_id}
pub async fn update_view(
    State(state): State<AppState>,
    CurrentAccount(claims): CurrentAccount,
    Identity(identity): Identity,
    jar: CookieJar,
    Path(account_id): Path<String>,
) -> ApiResult<Response> {
    let account_id = parse_id(&account_id)?;
    if let Err(err) = require_owner(&claims, account_id) {
        info!(reason = %err.message, "Account update view denied");
        return Ok(login_redirect(&state, jar, PERMISSION_NOTICE));
    }

    let Some(account) = state.accounts.find_by_id(account_id).await? else {
        let jar = state.cookies.set_flash(jar, "Account not found.");
        return Ok((jar, Redirect::to("/account/")).into_response());
    };

    let values = AccountFormValues::from(&account.into_profile());
    show_update(&state, identity, jar, StatusCode::OK, values, None, Vec::new()).await
}

/// POST /account/update-info
///
/// On success the session token is re-issued so the greeting and the
/// claims follow the new name and email.
pub async fn update_info(
    State(state): State<AppState>,
    CurrentAccount(claims): CurrentAccount,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<AccountUpdateForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    if let Err(err) = require_owner(&claims, form.account_id) {
        info!(reason = %err.message, "Account update denied");
        return Ok(login_redirect(&state, jar, PERMISSION_NOTICE));
    }

    let values = AccountFormValues {
        account_id: form.account_id,
        first_name: form.account_firstname.clone(),
        last_name: form.account_lastname.clone(),
        email: form.account_email.clone(),
    };

    let mut errors = validate_form(&form);
    if !has_error(&errors, "account_email") {
        let taken = state
            .accounts
            .find_by_email(&form.account_email)
            .await?
            .is_some_and(|existing| existing.id != form.account_id);
        if taken {
            errors.push(FieldError::new("account_email", EMAIL_EXISTS));
            errors.sort_by(|a, b| a.field.cmp(&b.field));
        }
    }
    if !errors.is_empty() {
        return show_update(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            values,
            None,
            errors,
        )
        .await;
    }

    let update = UpdateAccount {
        id: form.account_id,
        first_name: form.account_firstname.clone(),
        last_name: form.account_lastname.clone(),
        email: form.account_email.clone(),
    };

    match state.accounts.update_profile(&update).await {
        Ok(true) => {
            let profile = AccountProfile {
                id: update.id,
                first_name: update.first_name,
                last_name: update.last_name,
                email: update.email,
                account_type: claims.account_type,
            };
            let fresh = AccountClaims::from_profile(
                &profile,
                Utc::now().timestamp(),
                state.issuer.ttl_seconds(),
            );
            let token = state.issuer.sign(&fresh)?;
            let jar = state.cookies.set_token(jar, token);
            info!(account_id = profile.id, "Account profile updated");

            show_update(
                &state,
                RequestIdentity::Authenticated(fresh),
                jar,
                StatusCode::OK,
                values,
                Some("Your account information was successfully updated."),
                Vec::new(),
            )
            .await
        }
        Ok(false) => {
            show_update(
                &state,
                identity,
                jar,
                StatusCode::NOT_FOUND,
                values,
                Some("Sorry, the update failed."),
                Vec::new(),
            )
            .await
        }
        Err(err) if err.kind == ErrorKind::Conflict => {
            show_update(
                &state,
                identity,
                jar,
                StatusCode::BAD_REQUEST,
                values,
                None,
                vec![FieldError::new("account_email", EMAIL_EXISTS)],
            )
            .await
        }
        Err(err) => {
            error!(kind = %err.kind, error = %err.message, "Account update failed");
            show_update(
                &state,
                identity,
                jar,
                StatusCode::INTERNAL_SERVER_ERROR,
                values,
                Some("Sorry, the update failed."),
                Vec::new(),
            )
            .await
        }
    }
}

/// POST /account/change-password
///
/// The session token is left as is; tokens issued before the change stay
/// valid until they expire.
pub async fn change_password(
    State(state): State<AppState>,
    CurrentAccount(claims): CurrentAccount,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<PasswordChangeForm>,
) -> ApiResult<Response> {
    if let Err(err) = require_owner(&claims, form.account_id) {
        info!(reason = %err.message, "Password change denied");
        return Ok(login_redirect(&state, jar, PERMISSION_NOTICE));
    }

    let Some(account) = state.accounts.find_by_id(form.account_id).await? else {
        let jar = state.cookies.set_flash(jar, "Account not found.");
        return Ok((jar, Redirect::to("/account/")).into_response());
    };
    let values = AccountFormValues::from(&account.into_profile());

    let errors = validate_form(&form);
    if !errors.is_empty() {
        return show_update(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            values,
            None,
            errors,
        )
        .await;
    }

    let digest = match state.hasher.hash(form.account_password).await {
        Ok(digest) => digest,
        Err(err) => {
            error!(error = %err, "Password hashing failed during password change");
            return show_update(
                &state,
                identity,
                jar,
                StatusCode::INTERNAL_SERVER_ERROR,
                values,
                Some("Error updating password."),
                Vec::new(),
            )
            .await;
        }
    };

    let (status, notice) = match state.accounts.update_password(form.account_id, &digest).await {
        Ok(true) => {
            info!(account_id = form.account_id, "Password changed");
            (StatusCode::OK, "Password updated successfully.")
        }
        Ok(false) => (StatusCode::NOT_FOUND, "Password update failed."),
        Err(err) => {
            error!(kind = %err.kind, error = %err.message, "Password update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Password update failed.")
        }
    };
    show_update(&state, identity, jar, status, values, Some(notice), Vec::new()).await
}
