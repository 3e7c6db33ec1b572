//! Profile handlers for the authenticated customer routes.
//!
//! Retrieval resolves the identity's `customer_id`; update and delete take
//! the target id from the path. The update is a multipart form carrying any
//! of the text fields plus an optional image file, applied as one
//! single-record save after the optional upload succeeds.

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use patron_cloudinary::CloudinaryClient;
use patron_postgres::PgClient;
use patron_postgres::model::UpdateCustomer;
use patron_postgres::query::CustomerRepository;
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Path};
use crate::handler::request::UpdateProfile;
use crate::handler::response::{
    Customer, DeleteProfileResponse, GetProfileResponse, UpdateProfileResponse,
};
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthHasher, ServiceState};

/// Tracing target for profile operations.
const TRACING_TARGET: &str = "patron_server::handler::accounts";

/// Folder tag under which profile images are hosted.
const IMAGE_FOLDER: &str = "customer_profiles";

/// Maximum accepted profile image size: 5MB.
const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Retrieves the authenticated customer's profile.
#[tracing::instrument(skip_all)]
async fn get_profile(
    State(pg_client): State<PgClient>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<GetProfileResponse>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        customer_id = %auth_claims.customer_id,
        "retrieving profile"
    );

    let mut conn = pg_client.get_connection().await?;
    let Some(customer) = conn.find_customer_by_id(auth_claims.customer_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Customer not found")
            .with_resource("customer")
            .with_context(format!("Customer ID: {}", auth_claims.customer_id)));
    };

    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %customer.id,
        username = %customer.username,
        "profile retrieved"
    );

    let response = GetProfileResponse {
        customer: Customer::from_model(customer),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// The parts collected from the update multipart form.
#[derive(Debug, Default)]
struct UpdateForm {
    patch: UpdateProfile,
    image: Option<Vec<u8>>,
}

/// Reads the multipart form of a profile update.
///
/// Text parts fill the patch; the `image` file part is read chunk-by-chunk
/// with a size cap so an oversized upload cannot exhaust memory.
async fn read_update_form(mut multipart: Multipart) -> Result<UpdateForm> {
    let mut form = UpdateForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to read multipart field");
        ErrorKind::BadRequest
            .with_message("Invalid multipart data")
            .with_context(format!("Failed to parse multipart form: {}", err))
    })? {
        let Some(name) = field.name().map(str::to_owned) else {
            tracing::debug!(target: TRACING_TARGET, "skipping unnamed multipart field");
            continue;
        };

        match name.as_str() {
            "image" => {
                let mut data = Vec::new();
                let mut stream = field;

                while let Some(chunk) = stream.chunk().await.map_err(|err| {
                    tracing::error!(target: TRACING_TARGET, error = %err, "failed to read image chunk");
                    ErrorKind::BadRequest
                        .with_message("Failed to read image data")
                        .with_context(format!("Could not read image upload: {}", err))
                })? {
                    if data.len() + chunk.len() > MAX_IMAGE_SIZE {
                        return Err(ErrorKind::BadRequest
                            .with_message("Image too large")
                            .with_context(format!(
                                "Profile images are limited to {} MB",
                                MAX_IMAGE_SIZE / (1024 * 1024)
                            )));
                    }
                    data.extend_from_slice(&chunk);
                }

                form.image = Some(data);
            }
            "username" | "email" | "phone" | "password" => {
                let value = field.text().await.map_err(|err| {
                    ErrorKind::BadRequest
                        .with_message("Invalid multipart data")
                        .with_context(format!("Failed to read field '{}': {}", name, err))
                })?;

                match name.as_str() {
                    "username" => form.patch.username = Some(value),
                    "email" => form.patch.email = Some(value),
                    "phone" => form.patch.phone = Some(value),
                    "password" => form.patch.password = Some(value),
                    _ => unreachable!(),
                }
            }
            other => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    field = %other,
                    "ignoring unknown multipart field"
                );
            }
        }
    }

    form.patch.validate()?;
    Ok(form)
}

/// Updates a customer profile from a multipart form.
///
/// If image bytes are supplied, the upload happens before the save so the
/// whole update either applies together or not at all; a failed upload
/// never drops the other edits silently.
#[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
async fn update_profile(
    State(pg_client): State<PgClient>,
    State(image_client): State<CloudinaryClient>,
    State(auth_hasher): State<AuthHasher>,
    AuthState(_): AuthState,
    Path(customer_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UpdateProfileResponse>)> {
    let form = read_update_form(multipart).await?;

    tracing::trace!(
        target: TRACING_TARGET,
        has_username = form.patch.username.is_some(),
        has_email = form.patch.email.is_some(),
        has_phone = form.patch.phone.is_some(),
        has_password = form.patch.password.is_some(),
        has_image = form.image.is_some(),
        "updating profile"
    );

    let password_hash = match form.patch.password.as_deref() {
        Some(password) => Some(auth_hasher.hash_password(password)?),
        None => None,
    };

    // Upload before touching the store so the record is saved exactly once,
    // with the hosted URL included.
    let avatar_url = match form.image {
        Some(image) => {
            let uploaded = image_client.upload_image(image, IMAGE_FOLDER).await?;
            Some(uploaded.secure_url)
        }
        None => None,
    };

    let updates = UpdateCustomer {
        username: form.patch.username,
        email_address: form.patch.email,
        password_hash,
        phone_number: form.patch.phone,
        avatar_url,
    };

    let mut conn = pg_client.get_connection().await?;

    // An all-empty form still has to report on a missing customer.
    let customer = if updates.is_empty() {
        conn.find_customer_by_id(customer_id).await?
    } else {
        conn.update_customer(customer_id, updates).await?
    };

    let Some(customer) = customer else {
        return Err(ErrorKind::NotFound
            .with_message("Customer not found")
            .with_resource("customer")
            .with_context(format!("Customer ID: {}", customer_id)));
    };

    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %customer.id,
        "profile updated"
    );

    let response = UpdateProfileResponse {
        message: "profile updated".to_owned(),
        customer: Customer::from_model(customer),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Deletes a customer profile.
///
/// Deleting an id that does not exist answers 404, so a repeated delete of
/// the same profile fails the same way instead of crashing.
#[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
async fn delete_profile(
    State(pg_client): State<PgClient>,
    AuthState(_): AuthState,
    Path(customer_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeleteProfileResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let Some(customer) = conn.delete_customer(customer_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message("Customer not found")
            .with_resource("customer")
            .with_context(format!("Customer ID: {}", customer_id)));
    };

    tracing::info!(
        target: TRACING_TARGET,
        customer_id = %customer.id,
        "profile deleted"
    );

    let response = DeleteProfileResponse {
        message: "profile deleted".to_owned(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/{id}", put(update_profile).delete(delete_profile))
}
