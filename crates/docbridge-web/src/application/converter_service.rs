//! Form submission logic for the three tools.
//!
//! Each `apply_*` function takes the submitted form and the client's session
//! record, runs the matching core operation and writes the outcome back into
//! the session.  They have no I/O side effects, know nothing about cookies or
//! HTTP, and never fail: a conversion error is data to be shown on the next
//! page render, not a reason to abort the request.
//!
//! # State written per tool
//!
//! ```text
//! success:  output = result.trim(),  error = ""
//! failure:  output = "",             error = err.to_string()
//! ```
//!
//! The submitted input (trimmed) and the selected formats/operation are
//! stored in both cases so the form comes back pre-filled.

use docbridge_core::text_codec::{base64_decode, base64_encode, url_decode, url_encode};
use docbridge_core::{convert_named, Operation};
use tracing::debug;

use crate::domain::{ConverterForm, ConverterState, TextToolForm, TextToolState};

// ── Converter ─────────────────────────────────────────────────────────────────

/// Converts `form.input` from `form.from_lang` to `form.to_lang` and records
/// the result in `state`.
///
/// # Example
///
/// ```rust
/// use docbridge_web::application::apply_conversion;
/// use docbridge_web::domain::{ConverterForm, ConverterState};
///
/// let mut state = ConverterState::default();
/// let form = ConverterForm {
///     input: r#"{"name": "Ada"}"#.to_string(),
///     from_lang: "json".to_string(),
///     to_lang: "yaml".to_string(),
/// };
///
/// apply_conversion(&mut state, &form);
///
/// assert_eq!(state.output, "name: Ada");
/// assert!(state.error.is_empty());
/// ```
pub fn apply_conversion(state: &mut ConverterState, form: &ConverterForm) {
    state.from_lang = form.from_lang.clone();
    state.to_lang = form.to_lang.clone();
    state.input = form.input.trim().to_string();

    match convert_named(&form.input, &form.from_lang, &form.to_lang) {
        Ok(output) => {
            state.output = output.trim().to_string();
            state.error.clear();
        }
        Err(e) => {
            debug!(from = %form.from_lang, to = %form.to_lang, "conversion failed: {e}");
            state.output.clear();
            state.error = e.to_string();
        }
    }
}

// ── Text tools ────────────────────────────────────────────────────────────────

/// Runs the Base64 tool (URL-safe alphabet, padded) and records the result.
pub fn apply_base64(state: &mut TextToolState, form: &TextToolForm) {
    apply_text_tool(state, form, |op, input| match op {
        Operation::Encode => Ok(base64_encode(input)),
        Operation::Decode => base64_decode(input).map_err(|e| e.to_string()),
    });
}

/// Runs the URL encode/decode tool and records the result.
pub fn apply_url_codec(state: &mut TextToolState, form: &TextToolForm) {
    apply_text_tool(state, form, |op, input| match op {
        Operation::Encode => Ok(url_encode(input)),
        Operation::Decode => url_decode(input).map_err(|e| e.to_string()),
    });
}

/// Shared bookkeeping for the two-way text tools.
fn apply_text_tool<F>(state: &mut TextToolState, form: &TextToolForm, run: F)
where
    F: FnOnce(Operation, &str) -> Result<String, String>,
{
    state.operation = form.operation.clone();
    state.input = form.input.trim().to_string();

    let result = form
        .operation
        .parse::<Operation>()
        .map_err(|e| e.to_string())
        .and_then(|op| run(op, &state.input));

    match result {
        Ok(output) => {
            state.output = output.trim().to_string();
            state.error.clear();
        }
        Err(message) => {
            state.output.clear();
            state.error = message;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
