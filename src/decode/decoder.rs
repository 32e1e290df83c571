//! Check definition decoding.
//!
//! Coordinates the decode of one document:
//! 1. Overlay parse (both dialects, raw duration slots)
//! 2. Dialect resolution
//! 3. Duration normalization
//! 4. Canonical record assembly
//!
//! The check identifier is never defaulted here; see
//! [`crate::views::to_health_check`].

use serde_json::Value;

use crate::decode::document::RawDocument;
use crate::decode::fields::Slot;
use crate::decode::overlay::Overlay;
use crate::decode::value::SlotValue;
use crate::definition::{CheckDefinition, CheckId};
use crate::error::{CheckDefinitionError, Result};
use crate::logging::structured::LogContext;

/// Decode a check definition from a parsed JSON document.
///
/// # Examples
/// ```
/// use checkdef_core::decode;
/// use serde_json::json;
///
/// let def = decode(&json!({"Name": "web", "interval": "10s", "script_args": ["a", "b"]})).unwrap();
/// assert_eq!(def.script_args, vec!["a", "b"]);
/// assert_eq!(def.interval.num_seconds(), 10);
/// assert!(def.id.is_empty());
/// ```
pub fn decode(document: &Value) -> Result<CheckDefinition> {
    decode_with_context(document, &LogContext::default())
}

/// Decode with an explicit logging context (e.g. the source file name).
pub fn decode_with_context(document: &Value, ctx: &LogContext) -> Result<CheckDefinition> {
    log_rejection(decode_document(document, ctx), ctx)
}

/// Decode a document read by [`RawDocument`], where repeated top-level keys
/// are still present in the order written.
pub fn decode_raw(document: &RawDocument, ctx: &LogContext) -> Result<CheckDefinition> {
    let result = match document {
        RawDocument::Object(entries) => decode_entries(entries.iter().map(|(k, v)| (k, v)), ctx),
        RawDocument::Other(value) => decode_document(value, ctx),
    };
    log_rejection(result, ctx)
}

/// Parse JSON text and decode it. When a key repeats, the last occurrence
/// in the text wins.
pub fn decode_str(json: &str) -> Result<CheckDefinition> {
    let document: RawDocument = serde_json::from_str(json)?;
    decode_raw(&document, &LogContext::default())
}

fn log_rejection(result: Result<CheckDefinition>, ctx: &LogContext) -> Result<CheckDefinition> {
    if let Err(e) = &result {
        crate::log_debug!(ctx, "DECODE_REJECTED", error = e.to_string());
    }
    result
}

fn decode_document(document: &Value, ctx: &LogContext) -> Result<CheckDefinition> {
    let object = document
        .as_object()
        .ok_or_else(|| CheckDefinitionError::malformed("$", document, "expected a JSON object"))?;

    decode_entries(object.iter(), ctx)
}

/// Tag `ctx` with the check name, however the document spelled the key.
fn check_context(overlay: &Overlay, ctx: &LogContext) -> LogContext {
    match overlay.get(Slot::Name).map(|entry| &entry.value) {
        Some(SlotValue::Str(name)) if !name.is_empty() => ctx.with_check(name),
        _ => ctx.clone(),
    }
}

fn decode_entries<'a, I>(entries: I, ctx: &LogContext) -> Result<CheckDefinition>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut overlay = Overlay::from_entries(entries)?;

    let ctx = check_context(&overlay, ctx);
    overlay.resolve_dialect(&ctx);
    let alternate_keys = overlay.alternate_count();

    let definition = CheckDefinition {
        id: CheckId::from(overlay.take_string(Slot::Id)),
        name: overlay.take_string(Slot::Name),
        notes: overlay.take_string(Slot::Notes),
        service_id: overlay.take_string(Slot::ServiceId),
        token: overlay.take_string(Slot::Token),
        status: overlay.take_string(Slot::Status),
        script_args: overlay.take_string_list(Slot::ScriptArgs),
        http: overlay.take_string(Slot::Http),
        header: overlay.take_header(Slot::Header),
        method: overlay.take_string(Slot::Method),
        tcp: overlay.take_string(Slot::Tcp),
        interval: overlay.take_duration(Slot::Interval, &ctx)?,
        docker_container_id: overlay.take_string(Slot::DockerContainerId),
        shell: overlay.take_string(Slot::Shell),
        grpc: overlay.take_string(Slot::Grpc),
        grpc_use_tls: overlay.take_bool(Slot::GrpcUseTls),
        tls_skip_verify: overlay.take_bool(Slot::TlsSkipVerify),
        alias_node: overlay.take_string(Slot::AliasNode),
        alias_service: overlay.take_string(Slot::AliasService),
        timeout: overlay.take_duration(Slot::Timeout, &ctx)?,
        ttl: overlay.take_duration(Slot::Ttl, &ctx)?,
        success_before_passing: overlay.take_int(Slot::SuccessBeforePassing),
        failures_before_critical: overlay.take_int(Slot::FailuresBeforeCritical),
        deregister_critical_service_after: overlay
            .take_duration(Slot::DeregisterCriticalServiceAfter, &ctx)?,
        output_max_size: overlay.take_int(Slot::OutputMaxSize),
    };

    crate::log_debug!(
        ctx,
        "DECODE_COMPLETE",
        id = definition.id.as_str(),
        alternate_keys = alternate_keys,
    );

    Ok(definition)
}

/// Decode a document holding either one definition or an array of them.
///
/// Array elements are decoded in order; the first failure aborts the whole
/// call and reports the element index.
pub fn decode_all(document: &Value, ctx: &LogContext) -> Result<Vec<CheckDefinition>> {
    match document {
        Value::Array(items) => {
            let definitions = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    decode_with_context(item, &ctx.with_index(index)).map_err(|e| {
                        CheckDefinitionError::Entry {
                            index,
                            source: Box::new(e),
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            crate::log_info!(ctx, "DECODE_BATCH_COMPLETE", definitions = definitions.len());
            Ok(definitions)
        }
        _ => decode_with_context(document, ctx).map(|definition| vec![definition]),
    }
}
