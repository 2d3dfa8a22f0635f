use log::debug;

use crate::error::HandlerError;
use crate::types::{EnvSnapshot, Event, InvocationContext, Response, ResponseBody};

pub const STATUS_OK: u16 = 200;

/// Describes one invocation: echoes the event, reports the context metadata
/// and dumps the given environment snapshot.
///
/// Fails without building a partial response when the context lacks
/// `requestId` or `memoryLimitMb`.
pub fn handle(
    event: &Event,
    context: &InvocationContext,
    envs: &EnvSnapshot,
) -> Result<Response, HandlerError> {
    let request_id = context
        .request_id
        .as_deref()
        .ok_or(HandlerError::MissingAttribute("requestId"))?;
    let memory_limit_mb = context
        .memory_limit_mb
        .ok_or(HandlerError::MissingAttribute("memoryLimitMb"))?;

    let body = ResponseBody {
        event_data: event.data.clone(),
        event_type: event.type_tag.clone(),
        context_type: context.context_type.clone(),
        request_id: request_id.to_string(),
        memory_limit_mb,
        envs: envs.clone(),
    };
    debug!("{request_id}: describing {} env vars", envs.len());

    Ok(Response {
        status_code: STATUS_OK,
        body: serde_json::to_string(&body)?,
    })
}

/// Same as [`handle`], reading the environment of the current process.
pub fn handle_with_process_env(
    event: &Event,
    context: &InvocationContext,
) -> Result<Response, HandlerError> {
    let envs = EnvSnapshot::capture()?;
    handle(event, context, &envs)
}
