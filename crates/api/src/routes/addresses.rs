//! Address routes, nested under a contact.

use axum::{Json, extract::State};

use super::extract::{ApiJson, ApiPath, address_id, contact_id};
use super::{DataResponse, OK, data};
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::Address;
use crate::services::{AddressRequest, AddressService};
use crate::state::AppState;

/// POST /api/contacts/{contact_id}/addresses
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(contact): ApiPath<String>,
    ApiJson(request): ApiJson<AddressRequest>,
) -> Result<Json<DataResponse<Address>>> {
    let contact = contact_id(&contact)?;
    let address = AddressService::new(state.pool())
        .create(&user, contact, request)
        .await?;
    Ok(data(address))
}

/// GET /api/contacts/{contact_id}/addresses
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(contact): ApiPath<String>,
) -> Result<Json<DataResponse<Vec<Address>>>> {
    let contact = contact_id(&contact)?;
    let addresses = AddressService::new(state.pool())
        .list(&user, contact)
        .await?;
    Ok(data(addresses))
}

/// GET /api/contacts/{contact_id}/addresses/{address_id}
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath((contact, address)): ApiPath<(String, String)>,
) -> Result<Json<DataResponse<Address>>> {
    let (contact, address) = (contact_id(&contact)?, address_id(&address)?);
    let address = AddressService::new(state.pool())
        .get(&user, contact, address)
        .await?;
    Ok(data(address))
}

/// PUT /api/contacts/{contact_id}/addresses/{address_id}
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath((contact, address)): ApiPath<(String, String)>,
    ApiJson(request): ApiJson<AddressRequest>,
) -> Result<Json<DataResponse<Address>>> {
    let (contact, address) = (contact_id(&contact)?, address_id(&address)?);
    let address = AddressService::new(state.pool())
        .update(&user, contact, address, request)
        .await?;
    Ok(data(address))
}

/// DELETE /api/contacts/{contact_id}/addresses/{address_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath((contact, address)): ApiPath<(String, String)>,
) -> Result<Json<DataResponse<&'static str>>> {
    let (contact, address) = (contact_id(&contact)?, address_id(&address)?);
    AddressService::new(state.pool())
        .delete(&user, contact, address)
        .await?;
    Ok(data(OK))
}
