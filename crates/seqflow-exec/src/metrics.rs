//! Metrics/tracing hooks.
//!
//! This module purposefully avoids pulling heavy telemetry stacks.
//! Wire these up to a subscriber in the binary layer.

#[cfg(feature = "tracing")]
pub fn emit_event(event: &'static str, fields: &[(&'static str, usize)]) {
    let span = tracing::trace_span!("seqflow", event);
    let _entered = span.enter();
    for (key, value) in fields {
        tracing::trace!(event, key = *key, value = *value, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_event(_event: &'static str, _fields: &[(&'static str, usize)]) { /* no-op */
}
