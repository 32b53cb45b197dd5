//! Tracing utilities for phrase parsing observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level event with the input phrase and the resolved datatype phrase.
///
/// ```ignore
/// armored_trace_phrase!(phrase, &parsed.dtype);
/// ```
#[macro_export]
macro_rules! armored_trace_phrase {
    ($phrase:expr, $dtype:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(phrase = %$phrase, dtype = %$dtype, "armored.phrase");
        #[cfg(not(feature = "tracing"))]
        let _ = (&$phrase, &$dtype);
    };
}

/// Emit a warn-level event when a type name falls back to `base`.
#[macro_export]
macro_rules! armored_trace_fallback {
    ($type_name:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(type_name = %$type_name, "armored.dtype.fallback");
        #[cfg(not(feature = "tracing"))]
        let _ = &$type_name;
    };
}

/// Emit an info-level event when validation silently corrects a field.
///
/// ```ignore
/// armored_trace_correction!(&fields.name, "nullable");
/// ```
#[macro_export]
macro_rules! armored_trace_correction {
    ($column:expr, $field:literal) => {
        #[cfg(feature = "tracing")]
        tracing::info!(column = %$column, field = $field, "armored.column.corrected");
        #[cfg(not(feature = "tracing"))]
        let _ = &$column;
    };
}
