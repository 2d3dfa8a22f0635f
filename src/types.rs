use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;

use crate::error::HandlerError;

/// Tag reported as `contextType` when nothing else is configured.
pub const DEFAULT_CONTEXT_TYPE: &str = "LambdaContext";

/// Naming scheme used when an event's type tag is inferred from its JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTagStyle {
    /// Names a Python runtime reports for decoded JSON (`dict`, `list`, ...).
    #[default]
    Python,
    /// Plain JSON names (`object`, `array`, ...).
    Json,
}

impl TypeTagStyle {
    pub fn tag(self, value: &Value) -> &'static str {
        match self {
            TypeTagStyle::Python => match value {
                Value::Object(_) => "dict",
                Value::Array(_) => "list",
                Value::String(_) => "str",
                Value::Number(number) if number.is_f64() => "float",
                Value::Number(_) => "int",
                Value::Bool(_) => "bool",
                Value::Null => "NoneType",
            },
            TypeTagStyle::Json => match value {
                Value::Object(_) => "object",
                Value::Array(_) => "array",
                Value::String(_) => "string",
                Value::Number(_) => "number",
                Value::Bool(_) => "boolean",
                Value::Null => "null",
            },
        }
    }
}

/// The triggering payload together with the tag reported as `eventType`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub data: Value,
    pub type_tag: String,
}

impl Event {
    pub fn tagged(data: Value, type_tag: impl Into<String>) -> Self {
        Event {
            data,
            type_tag: type_tag.into(),
        }
    }

    pub fn inferred(data: Value, style: TypeTagStyle) -> Self {
        let type_tag = style.tag(&data);
        Self::tagged(data, type_tag)
    }
}

/// Metadata the hosting runtime hands over for a single invocation.
///
/// `request_id` and `memory_limit_mb` stay optional so that a runtime which
/// does not provide them is reported as a missing attribute by the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub request_id: Option<String>,
    pub memory_limit_mb: Option<i64>,
    pub function_name: Option<String>,
    pub context_type: String,
}

impl InvocationContext {
    pub fn new(context_type: impl Into<String>) -> Self {
        InvocationContext {
            request_id: None,
            memory_limit_mb: None,
            function_name: None,
            context_type: context_type.into(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_memory_limit_mb(mut self, memory_limit_mb: i64) -> Self {
        self.memory_limit_mb = Some(memory_limit_mb);
        self
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Reads the runtime context. Empty ids and non-positive memory limits count as absent.
    pub fn from_lambda(context: &lambda_runtime::Context, context_type: &str) -> Self {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());

        InvocationContext {
            request_id: non_empty(&context.request_id),
            memory_limit_mb: Some(i64::from(context.env_config.memory)).filter(|mb| *mb > 0),
            function_name: non_empty(&context.env_config.function_name),
            context_type: context_type.to_string(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_TYPE)
    }
}

/// Environment variables visible to the process, captured once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvSnapshot(BTreeMap<String, String>);

impl EnvSnapshot {
    pub fn capture() -> Result<Self, HandlerError> {
        let mut vars = BTreeMap::new();
        for (key, value) in env::vars_os() {
            let key = key
                .into_string()
                .map_err(|raw| HandlerError::NonUnicodeEnv(raw.to_string_lossy().into_owned()))?;
            let value = value
                .into_string()
                .map_err(|_| HandlerError::NonUnicodeEnv(key.clone()))?;
            vars.insert(key, value);
        }
        Ok(EnvSnapshot(vars))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        EnvSnapshot(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// What the hosting runtime receives back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// JSON document carried in [`Response::body`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub event_data: Value,
    pub event_type: String,
    pub context_type: String,
    pub request_id: String,
    pub memory_limit_mb: i64,
    pub envs: EnvSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn python_tags_follow_json_shape() {
        let style = TypeTagStyle::Python;
        assert_eq!(style.tag(&json!({"a": 1})), "dict");
        assert_eq!(style.tag(&json!([1, 2])), "list");
        assert_eq!(style.tag(&json!("text")), "str");
        assert_eq!(style.tag(&json!(3)), "int");
        assert_eq!(style.tag(&json!(-3)), "int");
        assert_eq!(style.tag(&json!(1.5)), "float");
        assert_eq!(style.tag(&json!(true)), "bool");
        assert_eq!(style.tag(&Value::Null), "NoneType");
    }

    #[test]
    fn json_tags_follow_json_shape() {
        let style = TypeTagStyle::Json;
        assert_eq!(style.tag(&json!({})), "object");
        assert_eq!(style.tag(&json!([])), "array");
        assert_eq!(style.tag(&json!("")), "string");
        assert_eq!(style.tag(&json!(1.5)), "number");
        assert_eq!(style.tag(&json!(false)), "boolean");
        assert_eq!(style.tag(&Value::Null), "null");
    }

    #[test]
    fn explicit_tag_is_kept() {
        let event = Event::tagged(json!({"a": 1}), "ScheduledEvent");
        assert_eq!(event.type_tag, "ScheduledEvent");

        let inferred = Event::inferred(json!({"a": 1}), TypeTagStyle::Python);
        assert_eq!(inferred.type_tag, "dict");
    }

    #[test]
    fn lambda_context_maps_request_id_and_memory() {
        let mut config = lambda_runtime::Config::default();
        config.memory = 256;
        config.function_name = "introspection".to_string();

        let mut lambda_context = lambda_runtime::Context::default();
        lambda_context.request_id = "abc-123".to_string();
        lambda_context.env_config = Arc::new(config);

        let context = InvocationContext::from_lambda(&lambda_context, "FCContext");
        assert_eq!(context.request_id.as_deref(), Some("abc-123"));
        assert_eq!(context.memory_limit_mb, Some(256));
        assert_eq!(context.function_name.as_deref(), Some("introspection"));
        assert_eq!(context.context_type, "FCContext");
    }

    #[test]
    fn empty_lambda_context_has_no_required_attributes() {
        let context =
            InvocationContext::from_lambda(&lambda_runtime::Context::default(), DEFAULT_CONTEXT_TYPE);
        assert_eq!(context.request_id, None);
        assert_eq!(context.memory_limit_mb, None);
        assert_eq!(context.function_name, None);
    }

    #[test]
    fn captured_env_contains_process_vars() {
        let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var("INTROSPECTION_TEST_CAPTURE", "present");
        let snapshot = EnvSnapshot::capture().unwrap();
        assert_eq!(snapshot.get("INTROSPECTION_TEST_CAPTURE"), Some("present"));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_env_value_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        env::set_var("INTROSPECTION_TEST_BINARY", OsStr::from_bytes(&[0x66, 0x6f, 0xff]));
        let result = EnvSnapshot::capture();
        env::remove_var("INTROSPECTION_TEST_BINARY");

        match result {
            Err(HandlerError::NonUnicodeEnv(name)) => assert_eq!(name, "INTROSPECTION_TEST_BINARY"),
            other => panic!("expected NonUnicodeEnv, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_serializes_as_flat_map() {
        let snapshot: EnvSnapshot = [("FOO", "bar")].into_iter().collect();
        assert_eq!(serde_json::to_value(&snapshot).unwrap(), json!({"FOO": "bar"}));
    }
}
