//! The "get private data" routes: per-user preference records.

use axum::extract::{Path, Request, State};
use axum::routing::get;
use axum::Router;

use ocshub_core::envelope::Envelope;
use ocshub_core::params::{ParamReader, ParamSource, ParamType};
use ocshub_core::payload::{ItemTag, Payload};
use ocshub_core::prefs::private_data;
use ocshub_core::render::Format;

use crate::error::AppResult;
use crate::request::read_request;
use crate::response::OcsResponse;
use crate::state::AppState;

/// GET /ocs/v1.php/privatedata/getattribute
async fn get_all(state: State<AppState>, request: Request) -> AppResult<OcsResponse> {
    attributes(state, request, String::new(), String::new()).await
}

/// GET /ocs/v1.php/privatedata/getattribute/{app}
async fn get_app(
    state: State<AppState>,
    Path(app): Path<String>,
    request: Request,
) -> AppResult<OcsResponse> {
    attributes(state, request, app, String::new()).await
}

/// GET /ocs/v1.php/privatedata/getattribute/{app}/{key}
async fn get_key(
    state: State<AppState>,
    Path((app, key)): Path<(String, String)>,
    request: Request,
) -> AppResult<OcsResponse> {
    attributes(state, request, app, key).await
}

/// Shared assembly for the three scopes.
///
/// `user` is required; without it the read fails and the client gets the
/// canonical 400 envelope before any lookup happens. An empty `app`
/// means all apps, an empty `key` all keys of each selected app. Records
/// are wrapped in `<element>` with `totalitems` set to the record count.
async fn attributes(
    State(state): State<AppState>,
    request: Request,
    app: String,
    key: String,
) -> AppResult<OcsResponse> {
    let ocs_request = read_request(request).await?;
    let reader = ParamReader::new(&ocs_request, state.sanitizer.as_ref());

    let user = reader
        .read(ParamSource::Get, "user", ParamType::Text, None)?
        .into_text();
    let format = Format::from_param(&reader.read_text(ParamSource::Get, "format", Some(""))?);

    let records = private_data(state.prefs.as_ref(), &user, &app, &key);
    let total = records.len() as u64;

    let envelope = Envelope::ok(Payload::EntryList {
        tag: ItemTag::new("element"),
        entries: records,
    })
    .with_total_items(total);

    Ok(OcsResponse::new(format, envelope))
}

/// Mount the privatedata routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/privatedata/getattribute", get(get_all))
        .route("/privatedata/getattribute/{app}", get(get_app))
        .route("/privatedata/getattribute/{app}/{key}", get(get_key))
}
