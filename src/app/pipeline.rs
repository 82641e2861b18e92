//! Shared pipeline logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest/resolve -> request -> three-way classification -> normalized result
//!
//! The CLI can then focus on presentation (reports, plots, exports). Both
//! pipelines turn non-success outcomes into user-facing errors here, so no
//! partial result ever escapes: callers either get a complete result or an
//! error, and any previously displayed result stays untouched.

use crate::data::{
    ApiClient, CurveRequest, FitRequest, MALFORMED_GUIDANCE, Outcome, TIMEOUT_GUIDANCE,
    TransportError,
};
use crate::domain::{
    CurveResponse, CurveSettings, FitOutput, FitSettings, ParamVector, Sample, SampleWindow,
};
use crate::error::AppError;

/// Run a full fit: build the request, call the service, classify, and
/// augment the success with the observed arrays it was fitted from.
pub fn run_fit(
    client: &ApiClient,
    samples: &[Sample],
    settings: FitSettings,
    guess: Option<ParamVector>,
) -> Result<FitOutput, AppError> {
    let request = FitRequest::new(samples, settings, guess);
    let response = into_result(client.fit(&request)?)?;
    Ok(FitOutput {
        response,
        t_obs: request.tempos,
        temp_obs: request.temperaturas,
    })
}

/// Run a curve sampling over the resolved window.
///
/// `params` is already validated (9 finite components) by construction of
/// `ParamVector`; incomplete vectors never reach this point.
pub fn run_curve(
    client: &ApiClient,
    params: ParamVector,
    settings: CurveSettings,
    window: SampleWindow,
) -> Result<CurveResponse, AppError> {
    let request = CurveRequest::new(params, settings, window);
    into_result(client.curve(&request)?)
}

fn into_result<T>(outcome: Outcome<T>) -> Result<T, AppError> {
    match outcome {
        Outcome::Success(value) => Ok(value),
        Outcome::ServiceError(message) => Err(AppError::service(message)),
        Outcome::Transport(TransportError::Timeout) => Err(AppError::service(TIMEOUT_GUIDANCE)),
        Outcome::Transport(TransportError::Malformed) => Err(AppError::service(MALFORMED_GUIDANCE)),
    }
}
