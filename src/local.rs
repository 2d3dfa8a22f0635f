//! Runs the handler once against an event file, without the hosting runtime.

use anyhow::{Context as _, Result};
use chrono::Utc;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::handler::handle;
use crate::settings::Settings;
use crate::types::{EnvSnapshot, Event, InvocationContext, Response};

pub fn local_context(settings: &Settings) -> InvocationContext {
    let request_id = settings
        .local_request_id
        .clone()
        .unwrap_or_else(|| format!("local-{}", Utc::now().timestamp_millis()));

    InvocationContext::new(settings.context_type.as_str())
        .with_request_id(request_id)
        .with_memory_limit_mb(settings.memory_limit_mb)
}

pub fn invoke_from_file(path: &Path, settings: &Settings, envs: &EnvSnapshot) -> Result<Response> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read event file {}", path.display()))?;
    let data: Value = serde_json::from_str(&raw)
        .with_context(|| format!("event file {} is not valid JSON", path.display()))?;

    let event = Event::inferred(data, settings.type_tag_style);
    let context = local_context(settings);
    info!(
        "local invocation {} with {} event from {}",
        context.request_id.as_deref().unwrap_or_default(),
        event.type_tag,
        path.display()
    );

    let response = handle(&event, &context, envs)?;
    Ok(response)
}
