//! Route handlers.

use axum::async_trait;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use community_listings::ListingDraft;
use community_service::{NewListing, ServiceError};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::views;

/// JSON body of `POST /listings`.
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub classified_listing: ListingParams,
}

/// Listing fields as submitted by an API client.
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub title: String,
    pub classified_listing_category_id: Uuid,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub tag_list: Option<String>,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

impl From<ListingParams> for NewListing {
    fn from(params: ListingParams) -> Self {
        NewListing {
            draft: ListingDraft {
                title: params.title,
                category_id: params.classified_listing_category_id,
                body_markdown: params.body_markdown,
                tag_list: params.tag_list,
            },
            organization_id: params.organization_id,
        }
    }
}

/// Form body of `POST /listings`, as rendered by `/listings/new`.
#[derive(Debug, Deserialize)]
pub struct ListingForm {
    #[serde(rename = "classified_listing[title]", default)]
    pub title: String,
    #[serde(rename = "classified_listing[classified_listing_category_id]")]
    pub category_id: Uuid,
    #[serde(rename = "classified_listing[body_markdown]", default)]
    pub body_markdown: String,
    #[serde(rename = "classified_listing[tag_list]", default)]
    pub tag_list: Option<String>,
    /// Empty when posting for oneself
    #[serde(rename = "classified_listing[organization_id]", default)]
    pub organization_id: Option<String>,
}

impl TryFrom<ListingForm> for NewListing {
    type Error = ServiceError;

    fn try_from(form: ListingForm) -> Result<Self, Self::Error> {
        let organization_id = match form.organization_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                ServiceError::Validation(format!("organization_id is not a valid id: {raw}"))
            })?),
        };

        Ok(NewListing {
            draft: ListingDraft {
                title: form.title,
                category_id: form.category_id,
                body_markdown: form.body_markdown,
                tag_list: form.tag_list,
            },
            organization_id,
        })
    }
}

/// A listing submission read from either body format.
///
/// Unreadable bodies are rejected with the JSON error envelope.
#[derive(Debug)]
pub enum ListingSubmission {
    /// `application/json`, answered with the created listing
    Api(NewListing),
    /// `application/x-www-form-urlencoded`, answered with a redirect
    Form(NewListing),
}

#[async_trait]
impl FromRequest<AppState> for ListingSubmission {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(form) = Form::<ListingForm>::from_request(req, state).await?;
            Ok(ListingSubmission::Form(form.try_into()?))
        } else {
            let Json(request) = Json::<CreateListingRequest>::from_request(req, state).await?;
            Ok(ListingSubmission::Api(request.classified_listing.into()))
        }
    }
}

pub async fn health() -> &'static str {
    "OK"
}

/// `GET /listings`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let board = state.listings.browse(None).await?;
    Ok(Html(views::board_page(&board)))
}

/// `GET /listings/:category_slug`
pub async fn category(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    let board = state.listings.browse(Some(&category_slug)).await?;
    Ok(Html(views::board_page(&board)))
}

/// `GET /listings/new`
pub async fn new_listing(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Html<String>, ApiError> {
    let categories = state
        .repos
        .categories
        .list_categories()
        .await
        .map_err(ServiceError::from)?;

    let organizations = match user {
        Some(user) => Some(state.listings.postable_organizations(user.user_id).await?),
        None => None,
    };
    Ok(Html(views::new_listing_page(
        &categories,
        organizations.as_deref(),
    )))
}

/// `POST /listings`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    submission: ListingSubmission,
) -> Result<Response, ApiError> {
    match submission {
        ListingSubmission::Api(new) => {
            let listing = state.listings.create_listing(user.user_id, new).await?;
            Ok((StatusCode::CREATED, Json(listing)).into_response())
        }
        ListingSubmission::Form(new) => {
            state.listings.create_listing(user.user_id, new).await?;
            Ok(Redirect::to("/listings").into_response())
        }
    }
}
