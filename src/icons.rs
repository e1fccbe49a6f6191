//! Icon Reconciler
//!
//! Maps a confirmed membership flag onto the control's icon. Only called
//! after a successful toggle response.

use crate::dom::IconElement;
use crate::models::SetKind;

pub const HEART_FILLED: &str = "bi-heart-fill";
pub const HEART_OUTLINE: &str = "bi-heart";
pub const COMPARE_CHECKED: &str = "bi bi-check-square-fill";
pub const COMPARE_ADD: &str = "bi bi-plus-square";

pub fn reconcile_icon(icon: &dyn IconElement, kind: SetKind, is_member: bool) {
    match kind {
        SetKind::Favorite => {
            let (on, off) = if is_member {
                (HEART_FILLED, HEART_OUTLINE)
            } else {
                (HEART_OUTLINE, HEART_FILLED)
            };
            icon.add_class(on);
            icon.remove_class(off);
        }
        // Whole-attribute swap so nothing stale survives repeated toggles
        SetKind::Comparison => {
            icon.set_class_name(if is_member { COMPARE_CHECKED } else { COMPARE_ADD });
        }
    }
}
