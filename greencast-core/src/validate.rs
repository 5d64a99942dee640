use crate::GreencastError;
use crate::types::ParamKind;

/// Check a user-entered value for `kind` against its bounds.
///
/// `raw` is parsed as a base-10 integer after trimming surrounding whitespace;
/// a leading `+` or `-` is allowed, anything else that is not a digit is not.
/// Accepted ranges: history days `7..=365`, forecast weeks `1..=12`.
///
/// # Errors
/// Returns `ParameterRejected` for empty, non-numeric, or out-of-range input.
/// Callers holding state must leave it untouched on error.
pub fn validate(kind: ParamKind, raw: &str) -> Result<u32, GreencastError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| GreencastError::parameter_rejected(kind, raw))?;
    u32::try_from(value)
        .ok()
        .filter(|v| kind.accepts(*v))
        .ok_or_else(|| GreencastError::parameter_rejected(kind, raw))
}
