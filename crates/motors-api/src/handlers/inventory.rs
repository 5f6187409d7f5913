//! Inventory handlers: public browsing and staff management.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, warn};

use motors_auth::RequestIdentity;
use motors_core::error::{AppError, ErrorKind};
use motors_core::result::AppResult;
use motors_entity::inventory::Vehicle;

use crate::dto::{
    ClassificationForm, DeleteVehicleForm, FieldError, VehicleForm, validate_form,
};
use crate::error::{ApiResult, NOT_FOUND_MESSAGE};
use crate::extractors::{Identity, parse_id};
use crate::state::AppState;
use crate::views::{ClassificationGroup, Page, VehicleFormMode};

use super::{page_context, render};

const MANAGEMENT_TITLE: &str = "Vehicle Management";
const ADD_CLASSIFICATION_TITLE: &str = "Add New Classification";
const ADD_VEHICLE_TITLE: &str = "Add New Vehicle";

async fn find_vehicle(state: &AppState, raw_id: &str) -> AppResult<Vehicle> {
    let id = parse_id(raw_id)?;
    state
        .inventory
        .find_vehicle(id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle not found"))
}

async fn show_management(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    notice: Option<String>,
) -> ApiResult<Response> {
    let (jar, mut ctx) = page_context(state, identity, jar, MANAGEMENT_TITLE).await?;
    if notice.is_some() {
        ctx.notice = notice;
    }

    let mut groups = Vec::with_capacity(ctx.nav.len());
    for classification in &ctx.nav {
        let vehicles = state
            .inventory
            .vehicles_by_classification(classification.id)
            .await?;
        groups.push(ClassificationGroup {
            classification: classification.clone(),
            vehicles,
        });
    }

    Ok(render(state, status, jar, &Page::Management { groups }, &ctx))
}

async fn show_add_classification(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    name: &str,
    errors: Vec<FieldError>,
) -> ApiResult<Response> {
    let (jar, ctx) = page_context(state, identity, jar, ADD_CLASSIFICATION_TITLE).await?;
    let ctx = ctx.with_errors(errors);
    let page = Page::AddClassification {
        name: name.to_string(),
    };
    Ok(render(state, status, jar, &page, &ctx))
}

#[allow(clippy::too_many_arguments)]
async fn show_vehicle_form(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    status: StatusCode,
    title: String,
    mode: VehicleFormMode,
    form: VehicleForm,
    notice: Option<&str>,
    errors: Vec<FieldError>,
) -> ApiResult<Response> {
    let (jar, mut ctx) = page_context(state, identity, jar, title).await?;
    if let Some(notice) = notice {
        ctx.notice = Some(notice.to_string());
    }
    let ctx = ctx.with_errors(errors);
    let page = Page::VehicleForm {
        mode,
        form,
        classifications: ctx.nav.clone(),
    };
    Ok(render(state, status, jar, &page, &ctx))
}

fn edit_title(form: &VehicleForm) -> String {
    format!("Edit {} {}", form.inv_make, form.inv_model)
}

/// GET /inv/type/{classification_id}
pub async fn by_classification(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Path(classification_id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&classification_id)?;
    let classification = state
        .inventory
        .find_classification(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;
    let vehicles = state.inventory.vehicles_by_classification(id).await?;

    let title = format!("{} vehicles", classification.name);
    let (jar, ctx) = page_context(&state, identity, jar, title).await?;
    Ok(render(
        &state,
        StatusCode::OK,
        jar,
        &Page::Classification { vehicles },
        &ctx,
    ))
}

/// GET /inv/detail/{inv_id}
pub async fn detail(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Path(inv_id): Path<String>,
) -> ApiResult<Response> {
    let vehicle = find_vehicle(&state, &inv_id).await?;
    let title = format!("{} {}", vehicle.year, vehicle.display_name());
    let (jar, ctx) = page_context(&state, identity, jar, title).await?;
    Ok(render(
        &state,
        StatusCode::OK,
        jar,
        &Page::VehicleDetail(vehicle),
        &ctx,
    ))
}

/// GET /inv/
pub async fn management(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    show_management(&state, identity, jar, StatusCode::OK, None).await
}

/// GET /inv/add-classification
pub async fn add_classification_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    show_add_classification(&state, identity, jar, StatusCode::OK, "", Vec::new()).await
}

/// POST /inv/add-classification
pub async fn add_classification(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<ClassificationForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    let errors = validate_form(&form);
    if !errors.is_empty() {
        return show_add_classification(
            &state,
            identity,
            jar,
            StatusCode::BAD_REQUEST,
            &form.classification_name,
            errors,
        )
        .await;
    }

    match state
        .inventory
        .add_classification(&form.classification_name)
        .await
    {
        Ok(classification) => {
            info!(classification_id = classification.id, name = %classification.name, "Classification added");
            show_management(
                &state,
                identity,
                jar,
                StatusCode::CREATED,
                Some(format!(
                    "The {} classification was successfully added.",
                    classification.name
                )),
            )
            .await
        }
        Err(err) if err.kind == ErrorKind::Conflict => {
            show_add_classification(
                &state,
                identity,
                jar,
                StatusCode::CONFLICT,
                &form.classification_name,
                vec![FieldError::new(
                    "classification_name",
                    "That classification already exists.",
                )],
            )
            .await
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /inv/add-inventory
pub async fn add_inventory_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    show_vehicle_form(
        &state,
        identity,
        jar,
        StatusCode::OK,
        ADD_VEHICLE_TITLE.to_string(),
        VehicleFormMode::Add,
        VehicleForm::default(),
        None,
        Vec::new(),
    )
    .await
}

/// POST /inv/add-inventory
pub async fn add_inventory(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<VehicleForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    let errors = validate_form(&form);
    let new_vehicle = match form.to_new_vehicle() {
        Some(data) if errors.is_empty() => data,
        _ => {
            return show_vehicle_form(
                &state,
                identity,
                jar,
                StatusCode::BAD_REQUEST,
                ADD_VEHICLE_TITLE.to_string(),
                VehicleFormMode::Add,
                form,
                None,
                errors,
            )
            .await;
        }
    };

    match state.inventory.add_vehicle(&new_vehicle).await {
        Ok(vehicle) => {
            info!(inv_id = vehicle.id, "Vehicle added");
            show_management(
                &state,
                identity,
                jar,
                StatusCode::CREATED,
                Some(format!(
                    "The {} was successfully added.",
                    vehicle.display_name()
                )),
            )
            .await
        }
        Err(err) if err.kind == ErrorKind::Validation => {
            show_vehicle_form(
                &state,
                identity,
                jar,
                StatusCode::BAD_REQUEST,
                ADD_VEHICLE_TITLE.to_string(),
                VehicleFormMode::Add,
                form,
                None,
                vec![FieldError::new("classification_id", err.message)],
            )
            .await
        }
        Err(err) => {
            error!(kind = %err.kind, error = %err.message, "Vehicle insert failed");
            show_vehicle_form(
                &state,
                identity,
                jar,
                StatusCode::NOT_IMPLEMENTED,
                ADD_VEHICLE_TITLE.to_string(),
                VehicleFormMode::Add,
                form,
                Some("Sorry, the addition failed."),
                Vec::new(),
            )
            .await
        }
    }
}

/// GET /inv/edit/{inv_id}
pub async fn edit_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Path(inv_id): Path<String>,
) -> ApiResult<Response> {
    let vehicle = find_vehicle(&state, &inv_id).await?;
    let form = VehicleForm::from_vehicle(&vehicle);
    show_vehicle_form(
        &state,
        identity,
        jar,
        StatusCode::OK,
        edit_title(&form),
        VehicleFormMode::Edit,
        form,
        None,
        Vec::new(),
    )
    .await
}

/// POST /inv/update
pub async fn update(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Form(form): Form<VehicleForm>,
) -> ApiResult<Response> {
    let form = form.normalized();
    let Some(inv_id) = form.inv_id else {
        return Err(AppError::not_found("Vehicle not found").into());
    };

    let errors = validate_form(&form);
    let data = match form.to_new_vehicle() {
        Some(data) if errors.is_empty() => data,
        _ => {
            return show_vehicle_form(
                &state,
                identity,
                jar,
                StatusCode::BAD_REQUEST,
                edit_title(&form),
                VehicleFormMode::Edit,
                form,
                None,
                errors,
            )
            .await;
        }
    };

    match state.inventory.update_vehicle(inv_id, &data).await {
        Ok(Some(vehicle)) => {
            info!(inv_id, "Vehicle updated");
            let notice = format!("The {} was successfully updated.", vehicle.display_name());
            let jar = state.cookies.set_flash(jar, &notice);
            Ok((jar, Redirect::to("/inv/")).into_response())
        }
        Ok(None) => Err(AppError::not_found("Vehicle not found").into()),
        Err(err) if err.kind == ErrorKind::Validation => {
            show_vehicle_form(
                &state,
                identity,
                jar,
                StatusCode::BAD_REQUEST,
                edit_title(&form),
                VehicleFormMode::Edit,
                form,
                None,
                vec![FieldError::new("classification_id", err.message)],
            )
            .await
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /inv/delete/{inv_id}
pub async fn delete_view(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
    Path(inv_id): Path<String>,
) -> ApiResult<Response> {
    let vehicle = find_vehicle(&state, &inv_id).await?;
    let title = format!("Delete {}", vehicle.display_name());
    let (jar, ctx) = page_context(&state, identity, jar, title).await?;
    Ok(render(
        &state,
        StatusCode::OK,
        jar,
        &Page::DeleteVehicle(vehicle),
        &ctx,
    ))
}

/// POST /inv/delete
pub async fn delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<DeleteVehicleForm>,
) -> ApiResult<Response> {
    if state.inventory.delete_vehicle(form.inv_id).await? {
        info!(inv_id = form.inv_id, "Vehicle deleted");
        let jar = state.cookies.set_flash(jar, "The deletion was successful.");
        Ok((jar, Redirect::to("/inv/")).into_response())
    } else {
        warn!(inv_id = form.inv_id, "Vehicle delete matched no row");
        let jar = state.cookies.set_flash(jar, "Sorry, the delete failed.");
        Ok((jar, Redirect::to(&format!("/inv/delete/{}", form.inv_id))).into_response())
    }
}
