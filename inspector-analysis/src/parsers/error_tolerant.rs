//! Error-tolerant parsing: trees with ERROR nodes are still lowered.

use tree_sitter::Node;

use super::types::Range;

/// Count ERROR and MISSING nodes in a tree-sitter tree.
///
/// Uses an explicit stack so deeply nested expressions cannot exhaust the
/// thread stack.
pub fn count_errors(root: Node) -> (u32, Vec<Range>) {
    let mut count = 0u32;
    let mut ranges = Vec::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if node.is_error() || node.is_missing() {
            count += 1;
            ranges.push(Range::from_ts_node(&node));
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        pending.extend(children.into_iter().rev());
    }
    (count, ranges)
}
