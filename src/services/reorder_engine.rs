//! Pure reordering functions behind drag-and-drop.
//!
//! Two concerns: stable list reorder (drag a category onto another) and the
//! two-column grid interleave used only at render time. Neither touches the
//! store; callers persist or discard the result as their ordering rules
//! dictate (category order is persisted, bookmark display order is not).

/// Column count for grid view.
pub const GRID_COLUMNS: usize = 2;

/// Removes the element at `source` and reinserts it at `target`, where both
/// indices refer to positions in the list as it was before the move.
/// Elements other than the moved one keep their relative order. Equal or
/// out-of-range indices are a no-op.
pub fn move_item<T>(items: &mut Vec<T>, source: usize, target: usize) -> bool {
    if source == target || source >= items.len() || target >= items.len() {
        return false;
    }
    let moved = items.remove(source);
    // target was computed before removal and stays valid after it:
    // removing one element leaves len() >= target.
    items.insert(target, moved);
    true
}

/// ID-addressed variant of [`move_item`] used when a drag gesture reports
/// element IDs rather than indices. Unknown IDs are a no-op. Returns whether
/// the list changed.
pub fn reorder_by_ids<T, F>(items: &mut Vec<T>, source_id: &str, target_id: &str, id_of: F) -> bool
where
    F: Fn(&T) -> &str,
{
    if source_id == target_id {
        return false;
    }
    let source = items.iter().position(|item| id_of(item) == source_id);
    let target = items.iter().position(|item| id_of(item) == target_id);
    match (source, target) {
        (Some(source), Some(target)) => move_item(items, source, target),
        _ => false,
    }
}

/// Rearranges an already-sorted list for a `columns`-column grid layout.
///
/// The input is split into `columns` contiguous blocks of `ceil(n / columns)`
/// elements; the output emits one element per block per row, skipping blocks
/// that ran out early. For `[a, b, c, d, e]` with two columns the blocks are
/// `[a, b, c]` and `[d, e]` and the display order is `[a, d, b, e, c]`.
///
/// Presentation-only: the result must never be written back to the store.
pub fn grid_interleave<T: Clone>(items: &[T], columns: usize) -> Vec<T> {
    if columns <= 1 || items.len() <= 1 {
        return items.to_vec();
    }
    let rows = items.len().div_ceil(columns);
    let mut display = Vec::with_capacity(items.len());
    for row in 0..rows {
        for col in 0..columns {
            let index = col * rows + row;
            if index < items.len() {
                display.push(items[index].clone());
            }
        }
    }
    display
}

/// Inverse of [`grid_interleave`]: recovers the sorted order from a
/// display-ordered list.
pub fn grid_deinterleave<T: Clone>(items: &[T], columns: usize) -> Vec<T> {
    if columns <= 1 || items.len() <= 1 {
        return items.to_vec();
    }
    let rows = items.len().div_ceil(columns);
    let mut natural: Vec<Option<T>> = vec![None; items.len()];
    let mut cursor = 0;
    for row in 0..rows {
        for col in 0..columns {
            let index = col * rows + row;
            if index < items.len() {
                natural[index] = Some(items[cursor].clone());
                cursor += 1;
            }
        }
    }
    natural.into_iter().flatten().collect()
}
