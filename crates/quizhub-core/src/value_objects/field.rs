//! Non-overwriting profile field merge policy
//!
//! The same policy is applied everywhere two user representations exchange
//! profile fields: a non-empty source value wins, an empty source never
//! erases an existing value, and equal values (after trimming) are left
//! untouched so no spurious write is issued.

/// Merge `source` into `target` under the non-overwriting policy.
///
/// Returns `true` if `target` was changed.
pub fn merge_field(target: &mut Option<String>, source: Option<&str>) -> bool {
    let src = match source.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        // Empty never overwrites non-empty.
        _ => return false,
    };

    match target.as_deref().map(str::trim) {
        Some(existing) if existing == src => false,
        _ => {
            *target = Some(src.to_string());
            true
        }
    }
}
