//! The canonical "no route matched" answer.
//!
//! Every request the router cannot place lands here and is answered with
//! a `failed`/999 envelope carrying a diagnostic dump of the raw request,
//! in the format the request asked for. Verbs the OCS layer does not
//! understand bypass the envelope machinery entirely and get the legacy
//! plain-text line instead (mapped in [`crate::error`]).

use axum::extract::{Request, State};

use ocshub_core::debug::debug_output;
use ocshub_core::envelope::{Envelope, STATUSCODE_NOT_FOUND};
use ocshub_core::params::{ParamReader, ParamSource};
use ocshub_core::render::Format;

use crate::error::AppResult;
use crate::request::read_request;
use crate::response::OcsResponse;
use crate::state::AppState;

/// The static half of the fallback message; the debug dump follows.
const INVALID_QUERY: &str = "Invalid query, please check the syntax. \
    API specifications are here: \
    http://www.freedesktop.org/wiki/Specifications/open-collaboration-services. \
    DEBUG OUTPUT:\n";

/// Router fallback for unmatched routes.
pub async fn not_found(State(state): State<AppState>, request: Request) -> AppResult<OcsResponse> {
    // The verb gate comes first: an unsupported verb fails before the
    // body or any parameter is touched.
    let source = ParamSource::from_method(request.method().as_str())?;
    let ocs_request = read_request(request).await?;

    let reader = ParamReader::new(&ocs_request, state.sanitizer.as_ref());
    let format = Format::from_param(&reader.read_text(source, "format", Some(""))?);

    let message = format!("{INVALID_QUERY}{}", debug_output(&ocs_request));
    Ok(OcsResponse::new(
        format,
        Envelope::failed(STATUSCODE_NOT_FOUND, message),
    ))
}
