//! Depth ordering for the painter's algorithm.
//!
//! The visible list is short (a few hundred entries at most) and is sorted
//! in place once per frame, so a quadratic selection sort without any extra
//! allocation is the right tool here. Ties keep no particular order.

/// Sort `items` in place so that `depth` is non-increasing (furthest first).
///
/// Time complexity: O(n²)
/// Space complexity: O(1)
pub fn selection_sort_by_depth_descending<T, F>(items: &mut [T], depth: F)
where
    F: Fn(&T) -> i32,
{
    let len = items.len();
    for i in 0..len.saturating_sub(1) {
        for j in i + 1..len {
            if depth(&items[i]) < depth(&items[j]) {
                items.swap(i, j);
            }
        }
    }
}
