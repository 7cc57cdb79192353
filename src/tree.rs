//! Three-dimensional k-d tree over palette entries in CIE-Lab space.
//!
//! The tree is built once from the full palette and never mutated: each node
//! owns its [`NamedColor`] and up to two children, split axes cycle
//! L -> a -> b by depth, and every level is balanced by a median split, so
//! depth stays logarithmic in the palette size.
//!
//! Search threads its running best through the recursion instead of keeping
//! it on the tree, so any number of threads can query a shared tree
//! concurrently.

use crate::color::{Lab, NamedColor};

/// Number of split axes the tree cycles through (L, a, b).
const AXES: usize = 3;

/// One node of the spatial index: a palette entry plus its two subtrees.
///
/// Invariant: for a node at depth `d`, every entry in the left subtree has a
/// Lab coordinate on axis `d % 3` less than or equal to this node's, and
/// every entry in the right subtree one greater than or equal to it. Ties
/// may land on either side; both sides stay reachable during search.
#[derive(Debug, Clone)]
pub struct KdNode {
    color: NamedColor,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

/// Running best match for one query, threaded through the traversal.
///
/// Distances are kept squared; the pruning test compares the squared
/// split-plane offset directly against this value.
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    color: Option<&'a NamedColor>,
    distance_sq: f32,
}

impl<'a> Nearest<'a> {
    const fn none() -> Self {
        Self {
            color: None,
            distance_sq: f32::INFINITY,
        }
    }

    /// The matched palette entry, if the tree was non-empty.
    #[must_use]
    pub const fn color(&self) -> Option<&'a NamedColor> {
        self.color
    }

    /// Squared Euclidean Lab distance from the query to the match.
    #[must_use]
    pub const fn distance_sq(&self) -> f32 {
        self.distance_sq
    }

    /// Euclidean Lab distance from the query to the match.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance_sq.sqrt()
    }
}

impl KdNode {
    /// Build a balanced tree from a palette snapshot.
    ///
    /// Consumes the vector (entries move into the nodes), sorting each
    /// partition by the Lab coordinate of the current depth's axis and
    /// placing the median at the node. An empty input produces `None`.
    ///
    /// Sorting uses [`f32::total_cmp`], so a given input order always yields
    /// the same tree; callers should not rely on any particular tie order
    /// beyond the node invariant.
    #[must_use]
    pub fn build(mut colors: Vec<NamedColor>, depth: usize) -> Option<Box<Self>> {
        if colors.is_empty() {
            return None;
        }

        let axis = depth % AXES;
        colors.sort_by(|x, y| x.lab().get(axis).total_cmp(&y.lab().get(axis)));

        let mid = colors.len() / 2;
        let upper = colors.split_off(mid + 1);
        let color = colors.pop().expect("median remains after split");

        Some(Box::new(Self {
            color,
            left: Self::build(colors, depth + 1),
            right: Self::build(upper, depth + 1),
        }))
    }

    /// The palette entry stored at this node.
    #[must_use]
    pub const fn color(&self) -> &NamedColor {
        &self.color
    }

    /// Left ("less than or equal") subtree.
    #[must_use]
    pub fn left(&self) -> Option<&KdNode> {
        self.left.as_deref()
    }

    /// Right ("greater than or equal") subtree.
    #[must_use]
    pub fn right(&self) -> Option<&KdNode> {
        self.right.as_deref()
    }

    /// Find the palette entry nearest to `query`.
    ///
    /// Fresh search state is created per call; the tree itself is never
    /// written to, so concurrent calls on a shared tree are safe.
    #[must_use]
    pub fn nearest(&self, query: Lab) -> Nearest<'_> {
        let mut best = Nearest::none();
        self.search(query, 0, &mut best);
        best
    }

    /// Find the palette entry nearest to `query`, dropping the distance.
    #[must_use]
    pub fn nearest_color(&self, query: Lab) -> &NamedColor {
        self.nearest(query)
            .color()
            .expect("search over a non-empty tree always finds a node")
    }

    fn search<'a>(&'a self, query: Lab, depth: usize, best: &mut Nearest<'a>) {
        let axis = depth % AXES;
        let lab = self.color.lab();

        // Signed offset from the node's split plane decides which child is
        // the near side; the full three-axis distance decides the best match.
        let dim = query.get(axis) - lab.get(axis);
        let distance_sq = query.distance_sq(lab);

        // Strict less-than: the first node found at a given distance wins,
        // so ties resolve by traversal order (pre-order, near side first).
        if distance_sq < best.distance_sq {
            best.distance_sq = distance_sq;
            best.color = Some(&self.color);
        }

        // A query exactly on the split plane descends left.
        let (near, far) = if dim <= 0.0 {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(child) = near {
            child.search(query, depth + 1, best);
        }

        // The far subtree can only hold a closer entry if the split plane
        // itself is closer than the current best.
        if dim * dim < best.distance_sq
            && let Some(child) = far
        {
            child.search(query, depth + 1, best);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::cast_possible_truncation)]

    use super::*;
    use crate::convert::rgb_to_lab;

    fn small_palette() -> Vec<NamedColor> {
        vec![
            NamedColor::new("red", 255, 0, 0),
            NamedColor::new("black", 0, 0, 0),
            NamedColor::new("white", 255, 255, 255),
        ]
    }

    /// Check the partition invariant on every axis at every depth.
    fn assert_invariant(node: &KdNode, depth: usize) {
        let axis = depth % AXES;
        let pivot = node.color().lab().get(axis);

        if let Some(left) = node.left() {
            assert_subtree_le(left, axis, pivot);
            assert_invariant(left, depth + 1);
        }
        if let Some(right) = node.right() {
            assert_subtree_ge(right, axis, pivot);
            assert_invariant(right, depth + 1);
        }
    }

    fn assert_subtree_le(node: &KdNode, axis: usize, pivot: f32) {
        assert!(node.color().lab().get(axis) <= pivot);
        if let Some(left) = node.left() {
            assert_subtree_le(left, axis, pivot);
        }
        if let Some(right) = node.right() {
            assert_subtree_le(right, axis, pivot);
        }
    }

    fn assert_subtree_ge(node: &KdNode, axis: usize, pivot: f32) {
        assert!(node.color().lab().get(axis) >= pivot);
        if let Some(left) = node.left() {
            assert_subtree_ge(left, axis, pivot);
        }
        if let Some(right) = node.right() {
            assert_subtree_ge(right, axis, pivot);
        }
    }

    fn count(node: &KdNode) -> usize {
        1 + node.left().map_or(0, count) + node.right().map_or(0, count)
    }

    fn depth(node: &KdNode) -> usize {
        1 + node
            .left()
            .map_or(0, depth)
            .max(node.right().map_or(0, depth))
    }

    #[test]
    fn test_build_empty() {
        assert!(KdNode::build(Vec::new(), 0).is_none());
    }

    #[test]
    fn test_build_single() {
        let root = KdNode::build(vec![NamedColor::new("only", 1, 2, 3)], 0).unwrap();
        assert_eq!(root.color().name(), "only");
        assert!(root.left().is_none());
        assert!(root.right().is_none());
    }

    #[test]
    fn test_build_keeps_every_entry() {
        let root = KdNode::build(small_palette(), 0).unwrap();
        assert_eq!(count(&root), 3);
    }

    #[test]
    fn test_build_invariant_small() {
        let root = KdNode::build(small_palette(), 0).unwrap();
        assert_invariant(&root, 0);
    }

    #[test]
    fn test_build_is_balanced() {
        // 127 entries fill a tree of depth exactly 7 when perfectly balanced.
        let colors: Vec<NamedColor> = (0..127)
            .map(|i| {
                let v = (i * 2) as u8;
                NamedColor::new(format!("c{i}"), v, v.wrapping_mul(3), v.wrapping_add(11))
            })
            .collect();
        let root = KdNode::build(colors, 0).unwrap();
        assert_eq!(count(&root), 127);
        assert_eq!(depth(&root), 7);
        assert_invariant(&root, 0);
    }

    #[test]
    fn test_nearest_exact_match() {
        let root = KdNode::build(small_palette(), 0).unwrap();
        let found = root.nearest(rgb_to_lab(255, 0, 0));
        assert_eq!(found.color().unwrap().name(), "red");
        assert_eq!(found.distance_sq(), 0.0);
    }

    #[test]
    fn test_nearest_scenario() {
        let root = KdNode::build(small_palette(), 0).unwrap();
        assert_eq!(root.nearest_color(rgb_to_lab(250, 10, 10)).name(), "red");
        assert_eq!(root.nearest_color(rgb_to_lab(10, 10, 10)).name(), "black");
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let colors: Vec<NamedColor> = (0u32..120)
            .map(|i| {
                let r = (i * 37 % 256) as u8;
                let g = (i * 101 % 256) as u8;
                let b = (i * 17 % 256) as u8;
                NamedColor::new(format!("c{i}"), r, g, b)
            })
            .collect();
        let root = KdNode::build(colors.clone(), 0).unwrap();

        for q in 0u32..64 {
            let query = rgb_to_lab((q * 11 % 256) as u8, (q * 29 % 256) as u8, (q * 7 % 256) as u8);
            let found = root.nearest(query);
            let brute = colors
                .iter()
                .map(|c| query.distance_sq(c.lab()))
                .fold(f32::INFINITY, f32::min);
            assert_eq!(found.distance_sq(), brute, "query {query}");
        }
    }

    #[test]
    fn test_duplicate_coordinates_return_one_entry() {
        let colors = vec![
            NamedColor::new("gray", 128, 128, 128),
            NamedColor::new("grey", 128, 128, 128),
        ];
        let root = KdNode::build(colors, 0).unwrap();
        let found = root.nearest(rgb_to_lab(128, 128, 128));
        assert_eq!(found.distance_sq(), 0.0);
        let name = found.color().unwrap().name();
        assert!(name == "gray" || name == "grey");
    }

    #[test]
    fn test_deterministic_across_input_orders() {
        let mut colors = small_palette();
        let root_a = KdNode::build(colors.clone(), 0).unwrap();
        colors.reverse();
        let root_b = KdNode::build(colors, 0).unwrap();

        for v in (0..=255).step_by(3) {
            let query = rgb_to_lab(v as u8, 40, 200);
            assert_eq!(
                root_a.nearest_color(query).name(),
                root_b.nearest_color(query).name()
            );
        }
    }
}
