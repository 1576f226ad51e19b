//! Handlers for the `/users` resource: profiles, ustaz discovery and
//! student-to-ustaz connection requests.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use muraja_core::connection::{validate_decision, validate_transition};
use muraja_core::error::CoreError;
use muraja_core::presence::Presence;
use muraja_core::profile::PhotoPair;
use muraja_core::roles::ROLE_USTAZ;
use muraja_core::types::DbId;
use muraja_db::models::connection::{Connection, PendingRequest};
use muraja_db::models::user::{
    Contact, PublicUstazCard, UpdateProfile, User, UserResponse, UstazCard,
};
use muraja_db::repositories::{ConnectionRepo, UserRepo};
use muraja_events::{event_types, PlatformEvent};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireStudent, RequireUstaz};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;
use crate::uploads::MultipartForm;

/// Multipart part carrying a new avatar.
const PHOTO_FIELD: &str = "photo";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/request-ustaz`.
#[derive(Debug, Deserialize)]
pub struct RequestUstaz {
    pub ustaz_id: DbId,
}

/// Request body for `PUT /users/handle-request`.
#[derive(Debug, Deserialize)]
pub struct HandleRequest {
    pub connection_id: DbId,
    pub status: String,
}

/// An accepted counterpart with their current presence.
#[derive(Debug, Serialize)]
pub struct ContactView {
    #[serde(flatten)]
    pub contact: Contact,
    pub presence: Presence,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        let presence = Presence::from_last_seen(contact.last_seen_at, Utc::now());
        Self { contact, presence }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = load_user(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/users/profile
///
/// Multipart form with optional text fields `name`, `location`,
/// `education_level`, `bio`, `phone_number`, `photo_url`, and an optional
/// `photo` file. A new photo pushes the current one into `previous_photo_url`.
///
/// The photo is checked and stored before anything is written; the fields
/// and both photo columns then go out in one update.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let form = MultipartForm::read(multipart, PHOTO_FIELD).await?;
    let user = load_user(&state, auth.user_id).await?;
    let before = PhotoPair::new(user.photo_url, user.previous_photo_url);

    let (incoming, saved) = match &form.file {
        Some(file) => {
            let url = state.uploads.save(file).await?;
            (Some(url.clone()), Some(url))
        }
        None => {
            let linked = form.text("photo_url");
            if let Some(url) = linked.as_deref() {
                before.check_linked_url(url)?;
            }
            (linked, None)
        }
    };

    let after = before.clone().replace_with(incoming);
    let input = UpdateProfile {
        name: form.text("name"),
        location: form.text("location"),
        education_level: form.text("education_level"),
        bio: form.text("bio"),
        phone_number: form.text("phone_number"),
        photos: (after != before).then(|| after.clone()),
    };

    let written = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await
        .map_err(AppError::from)
        .and_then(|row| {
            row.ok_or(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id,
            }))
        });
    let user = match written {
        Ok(user) => user,
        Err(e) => {
            if let Some(url) = saved.as_deref() {
                state.uploads.remove(url).await;
            }
            return Err(e);
        }
    };

    // The photo that fell off the end of the history is unreachable now.
    if input.photos.is_some() {
        if let Some(dropped) = before.previous.as_deref() {
            if after.current.as_deref() != Some(dropped)
                && after.previous.as_deref() != Some(dropped)
            {
                state.uploads.remove(dropped).await;
            }
        }
    }

    tracing::info!(user_id = auth.user_id, "Profile updated");
    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/users/profile/revert-photo
///
/// Swap the current and previous photo.
pub async fn revert_photo(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = load_user(&state, auth.user_id).await?;
    let reverted = PhotoPair::new(user.photo_url, user.previous_photo_url).revert()?;
    let user = store_photos(&state, auth.user_id, &reverted).await?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// GET /api/users/ustaz
pub async fn list_ustaz(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<UstazCard>>>> {
    let ustaz = UserRepo::list_ustaz(&state.pool).await?;
    Ok(Json(DataResponse { data: ustaz }))
}

/// GET /api/users/public-ustazs
///
/// Unauthenticated listing for the landing page.
pub async fn list_public_ustaz(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PublicUstazCard>>>> {
    let ustaz = UserRepo::list_public_ustaz(&state.pool).await?;
    Ok(Json(DataResponse { data: ustaz }))
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// POST /api/users/request-ustaz
///
/// A student asks an ustaz to take them on. Returns 201 with the pending
/// connection; a second request to the same ustaz is a 409.
pub async fn request_ustaz(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
    Json(input): Json<RequestUstaz>,
) -> AppResult<Created<Connection>> {
    let ustaz = load_user(&state, input.ustaz_id).await?;
    if ustaz.role != ROLE_USTAZ {
        return Err(AppError::Core(CoreError::Validation(
            "Requests can only be sent to an ustaz".into(),
        )));
    }

    if ConnectionRepo::find_by_pair(&state.pool, auth.user_id, ustaz.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Request already sent".into(),
        )));
    }

    let connection = ConnectionRepo::create_request(&state.pool, auth.user_id, ustaz.id).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::CONNECTION_REQUESTED)
            .with_source("connection", connection.id)
            .with_actor(auth.user_id)
            .with_recipients([ustaz.id])
            .with_data(&connection),
    );

    tracing::info!(
        connection_id = connection.id,
        student_id = auth.user_id,
        ustaz_id = ustaz.id,
        "Connection requested"
    );
    Ok(created(connection))
}

/// GET /api/users/pending-requests
pub async fn pending_requests(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
) -> AppResult<Json<DataResponse<Vec<PendingRequest>>>> {
    let pending = ConnectionRepo::list_pending_for_ustaz(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: pending }))
}

/// PUT /api/users/handle-request
///
/// Accept or reject a pending request addressed to the calling ustaz.
pub async fn handle_request(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
    Json(input): Json<HandleRequest>,
) -> AppResult<Json<DataResponse<Connection>>> {
    validate_decision(&input.status)?;

    let connection = ConnectionRepo::find_by_id(&state.pool, input.connection_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Connection",
            id: input.connection_id,
        }))?;

    if connection.ustaz_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "This request is not addressed to you".into(),
        )));
    }
    validate_transition(&connection.status, &input.status)?;

    let updated = ConnectionRepo::decide(&state.pool, connection.id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Request was already handled".into()))
        })?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::CONNECTION_UPDATED)
            .with_source("connection", updated.id)
            .with_actor(auth.user_id)
            .with_recipients([updated.student_id])
            .with_data(&updated),
    );

    tracing::info!(
        connection_id = updated.id,
        status = %updated.status,
        "Connection request handled"
    );
    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/users/my-students
pub async fn my_students(
    State(state): State<AppState>,
    RequireUstaz(auth): RequireUstaz,
) -> AppResult<Json<DataResponse<Vec<ContactView>>>> {
    let students = UserRepo::list_students_of(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: students.into_iter().map(ContactView::from).collect(),
    }))
}

/// GET /api/users/my-ustazs
pub async fn my_ustaz(
    State(state): State<AppState>,
    RequireStudent(auth): RequireStudent,
) -> AppResult<Json<DataResponse<Vec<ContactView>>>> {
    let ustaz = UserRepo::list_ustaz_of(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: ustaz.into_iter().map(ContactView::from).collect(),
    }))
}

/// GET /api/users/my-connections
///
/// Every request the caller sent as a student, in any status.
pub async fn my_connections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Connection>>>> {
    let connections = ConnectionRepo::list_for_student(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: connections }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

async fn store_photos(state: &AppState, id: DbId, photos: &PhotoPair) -> AppResult<User> {
    UserRepo::set_photos(
        &state.pool,
        id,
        photos.current.as_deref(),
        photos.previous.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
