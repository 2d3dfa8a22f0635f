use lambda_runtime::{Error, LambdaEvent};
use log::{error, info};
use serde_json::Value;

use crate::handler::handle_with_process_env;
use crate::settings::Settings;
use crate::types::{Event, InvocationContext, Response};

/// Adapts one runtime event to the handler and logs its outcome.
pub async fn dispatch(event: LambdaEvent<Value>, settings: Settings) -> Result<Response, Error> {
    let (payload, lambda_context) = event.into_parts();
    let context = InvocationContext::from_lambda(&lambda_context, &settings.context_type);
    let event = Event::inferred(payload, settings.type_tag_style);

    info!(
        "invocation {} of {} with {} event",
        lambda_context.request_id,
        context.function_name.as_deref().unwrap_or("<unknown>"),
        event.type_tag
    );

    match handle_with_process_env(&event, &context) {
        Ok(response) => Ok(response),
        Err(err) => {
            error!("invocation {} failed: {err}", lambda_context.request_id);
            Err(err.into())
        }
    }
}
