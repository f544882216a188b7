//! The discovery document: the flat endpoint OCS clients probe before
//! anything else.

use axum::extract::{Request, State};
use axum::http::header;
use axum::routing::get;
use axum::Router;
use indexmap::IndexMap;

use ocshub_core::envelope::Envelope;
use ocshub_core::params::{ParamReader, ParamSource};
use ocshub_core::payload::{Payload, Scalar};
use ocshub_core::render::Format;

use crate::error::AppResult;
use crate::request::read_request;
use crate::response::OcsResponse;
use crate::state::AppState;

/// OCS API level implemented by this service.
const OCS_VERSION: &str = "1.7";

/// GET /ocs/v1.php/config
///
/// An `ok`/100 envelope whose payload is the flat mapping
/// `version`/`website`/`host`/`contact`/`ssl`. `host` reflects the Host
/// header of the request; `website` and `contact` come from server
/// configuration.
async fn get_config(State(state): State<AppState>, request: Request) -> AppResult<OcsResponse> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let ocs_request = read_request(request).await?;
    let reader = ParamReader::new(&ocs_request, state.sanitizer.as_ref());
    let format = Format::from_param(&reader.read_text(ParamSource::Get, "format", Some(""))?);

    let mut fields = IndexMap::new();
    fields.insert("version".to_owned(), Scalar::from(OCS_VERSION));
    fields.insert(
        "website".to_owned(),
        Scalar::from(state.config.ocs_website.as_str()),
    );
    fields.insert("host".to_owned(), Scalar::from(host));
    fields.insert(
        "contact".to_owned(),
        Scalar::from(state.config.ocs_contact.as_str()),
    );
    fields.insert("ssl".to_owned(), Scalar::from("false"));

    Ok(OcsResponse::new(
        format,
        Envelope::ok(Payload::FlatMap(fields)),
    ))
}

/// Mount the discovery route.
pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(get_config))
}
