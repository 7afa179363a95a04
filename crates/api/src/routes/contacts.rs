//! Contact routes.

use axum::{Json, extract::State};

use super::extract::{ApiJson, ApiPath, ApiQuery, contact_id};
use super::{DataResponse, OK, PagedResponse, data};
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::Contact;
use crate::services::{ContactRequest, ContactService, SearchContactsQuery};
use crate::state::AppState;

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<Json<DataResponse<Contact>>> {
    let contact = ContactService::new(state.pool())
        .create(&user, request)
        .await?;
    Ok(data(contact))
}

/// GET /api/contacts/{contact_id}
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<DataResponse<Contact>>> {
    let id = contact_id(&id)?;
    let contact = ContactService::new(state.pool()).get(&user, id).await?;
    Ok(data(contact))
}

/// PUT /api/contacts/{contact_id}
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<ContactRequest>,
) -> Result<Json<DataResponse<Contact>>> {
    let id = contact_id(&id)?;
    let contact = ContactService::new(state.pool())
        .update(&user, id, request)
        .await?;
    Ok(data(contact))
}

/// DELETE /api/contacts/{contact_id}
///
/// Also deletes every address of the contact.
pub async fn delete(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<DataResponse<&'static str>>> {
    let id = contact_id(&id)?;
    ContactService::new(state.pool()).delete(&user, id).await?;
    Ok(data(OK))
}

/// Search the caller's contacts.
///
/// GET /api/contacts?name=&email=&phone=&page=&size=
pub async fn search(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiQuery(query): ApiQuery<SearchContactsQuery>,
) -> Result<Json<PagedResponse<Contact>>> {
    let (contacts, paging) = ContactService::new(state.pool())
        .search(&user, &query)
        .await?;
    Ok(Json(PagedResponse {
        data: contacts,
        paging,
    }))
}
