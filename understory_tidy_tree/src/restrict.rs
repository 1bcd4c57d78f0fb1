// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breadth clamping for horizontal trees.

/// Replacement breadth offset for a node under bounded-height layout.
///
/// `siblings` is the number of visible children of the node's parent,
/// `index` the node's position among them, `depth` its level (`>= 1`),
/// `parent_x` the parent's already adjusted breadth, and `h` the node
/// height. Returns `None` when the node keeps its computed position, which
/// is always the case for five or more siblings.
///
/// The parent comparisons are exact float equality: they only recognize
/// parents that were themselves placed by this table.
///
/// ```rust
/// use understory_tidy_tree::restricted_offset;
///
/// assert_eq!(restricted_offset(1, 0, 1, 0.0, 100.0), Some(-50.0));
/// assert_eq!(restricted_offset(3, 2, 2, 0.0, 100.0), Some(50.0));
/// assert_eq!(restricted_offset(5, 0, 2, 0.0, 100.0), None);
/// ```
#[allow(
    clippy::float_cmp,
    reason = "parents are recognized by the exact values this table produces"
)]
pub fn restricted_offset(
    siblings: usize,
    index: usize,
    depth: u32,
    parent_x: f64,
    h: f64,
) -> Option<f64> {
    let i = index as f64;
    match siblings {
        1 if depth == 1 => Some(-h / 2.0),
        1 => Some(parent_x),
        2 => {
            let x = i * h - h / 2.0;
            if parent_x == -1.5 * h {
                Some(x - h)
            } else if parent_x == 1.5 * h {
                Some(x + h)
            } else {
                Some(x)
            }
        }
        3 => {
            let x = i * h - 1.5 * h;
            if parent_x == h / 2.0 || parent_x == 1.5 * h {
                Some(x + h)
            } else {
                Some(x)
            }
        }
        4 => Some(i * h - 1.5 * h),
        _ => None,
    }
}
