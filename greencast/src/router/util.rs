use greencast_core::{Capability, GreencastError};

/// Collapse a set of provider errors into a uniform `GreencastError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - A single remaining error is returned as-is.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    mut errors: Vec<GreencastError>,
    not_found_what: Option<String>,
) -> GreencastError {
    if !attempted_any {
        return GreencastError::unsupported(capability.as_str());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GreencastError::ProviderTimeout { .. }))
    {
        return GreencastError::AllProvidersTimedOut {
            capability: capability.as_str(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GreencastError::NotFound { .. }))
    {
        return GreencastError::not_found(what);
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    GreencastError::AllProvidersFailed(errors)
}
