//! Quad-tree spatial partitioning structure
//!
//! Divides the horizontal (X/Z) plane into hierarchical quadrants for the
//! collision broad phase. The tree is built once from static geometry and
//! is read-only afterwards.
//!
//! A leaf splits exactly once, when it holds more than
//! [`QuadTreeConfig::split_threshold`] entries. Entries that straddle a
//! quadrant boundary stay resident at the node where they were inserted,
//! so a query always returns every resident entry of each visited node.

use crate::foundation::math::Vec2;
use crate::physics::collision::Aabb;

/// Configuration for quad-tree behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadTreeConfig {
    /// Maximum entries a leaf holds before it splits
    pub split_threshold: usize,

    /// Maximum subdivision depth (root is depth 0)
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            split_threshold: 4,
            max_depth: 16,
        }
    }
}

/// Bounds of a static collider tagged with its arena index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadEntry {
    /// Horizontal bounds of the collider
    pub bounds: Aabb,
    /// Index of the collider in the owning arena
    pub index: usize,
}

impl QuadEntry {
    /// Create a new entry
    pub fn new(bounds: Aabb, index: usize) -> Self {
        Self { bounds, index }
    }
}

/// Quadrant layout:
/// 0: -X, -Z
/// 1: +X, -Z
/// 2: +X, +Z
/// 3: -X, +Z
fn quadrant_bounds(bounds: &Aabb, quadrant: usize) -> Aabb {
    let (min, max) = (bounds.min, bounds.max);
    let half = bounds.size() * 0.5;
    match quadrant {
        0 => Aabb::new(min, min + half),
        1 => Aabb::new(
            Vec2::new(min.x + half.x, min.y),
            Vec2::new(max.x, min.y + half.y),
        ),
        2 => Aabb::new(min + half, max),
        _ => Aabb::new(
            Vec2::new(min.x, min.y + half.y),
            Vec2::new(min.x + half.x, max.y),
        ),
    }
}

/// Quadrant that fully contains `rect`, or `None` if it straddles a midline
fn containing_quadrant(rect: &Aabb, bounds: &Aabb) -> Option<usize> {
    let mid = bounds.center();
    if rect.max.y < mid.y {
        if rect.max.x < mid.x {
            return Some(0);
        }
        if rect.min.x > mid.x {
            return Some(1);
        }
    } else if rect.min.y > mid.y {
        if rect.min.x > mid.x {
            return Some(2);
        }
        if rect.max.x < mid.x {
            return Some(3);
        }
    }
    None
}

/// Single node in the quad-tree hierarchy.
///
/// Nodes do not store their own bounds; they are derived from the root
/// while descending.
#[derive(Debug, Clone, Default)]
pub struct QuadNode {
    /// Entries resident at this node
    entries: Vec<QuadEntry>,

    /// Child nodes (4 quadrants), None if this is a leaf
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Entries resident at this node
    pub fn entries(&self) -> &[QuadEntry] {
        &self.entries
    }

    /// Child quadrants, if split
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }

    fn insert(&mut self, entry: QuadEntry, bounds: &Aabb, depth: u32, config: &QuadTreeConfig) {
        if let Some(children) = self.children.as_mut() {
            match containing_quadrant(&entry.bounds, bounds) {
                Some(quadrant) => children[quadrant].insert(
                    entry,
                    &quadrant_bounds(bounds, quadrant),
                    depth + 1,
                    config,
                ),
                None => self.entries.push(entry),
            }
            return;
        }

        self.entries.push(entry);
        if self.entries.len() > config.split_threshold && depth < config.max_depth {
            self.split(bounds, depth, config);
        }
    }

    /// Split this leaf into 4 quadrants and push contained entries down
    fn split(&mut self, bounds: &Aabb, depth: u32, config: &QuadTreeConfig) {
        let residents = std::mem::take(&mut self.entries);
        let children = self
            .children
            .insert(Box::new(std::array::from_fn(|_| QuadNode::default())));

        for entry in residents {
            match containing_quadrant(&entry.bounds, bounds) {
                Some(quadrant) => children[quadrant].insert(
                    entry,
                    &quadrant_bounds(bounds, quadrant),
                    depth + 1,
                    config,
                ),
                None => self.entries.push(entry),
            }
        }
    }

    fn query(&self, rect: &Aabb, bounds: &Aabb, results: &mut Vec<usize>) {
        results.extend(self.entries.iter().map(|entry| entry.index));

        let Some(children) = self.children.as_deref() else {
            return;
        };

        let mid = bounds.center();
        let mut visit = |quadrant: usize| {
            children[quadrant].query(rect, &quadrant_bounds(bounds, quadrant), results);
        };

        if rect.min.y < mid.y {
            if rect.min.x < mid.x {
                visit(0);
            }
            if rect.max.x > mid.x {
                visit(1);
            }
        }
        if rect.max.y > mid.y {
            if rect.min.x < mid.x {
                visit(3);
            }
            if rect.max.x > mid.x {
                visit(2);
            }
        }
    }

    fn count_entries(&self) -> usize {
        self.entries.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(QuadNode::count_entries).sum())
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(QuadNode::count_nodes).sum())
    }

    fn height(&self) -> u32 {
        self.children().map_or(0, |children| {
            1 + children.iter().map(QuadNode::height).max().unwrap_or(0)
        })
    }

    fn log_structure(&self, bounds: &Aabb, depth: u32, label: &str) {
        log::trace!(
            "{:indent$}{} [{:.2}, {:.2}]..[{:.2}, {:.2}] entries={:?}",
            "",
            label,
            bounds.min.x,
            bounds.min.y,
            bounds.max.x,
            bounds.max.y,
            self.entries.iter().map(|entry| entry.index).collect::<Vec<_>>(),
            indent = depth as usize * 2,
        );
        if let Some(children) = self.children() {
            for (quadrant, child) in children.iter().enumerate() {
                child.log_structure(
                    &quadrant_bounds(bounds, quadrant),
                    depth + 1,
                    &format!("q{quadrant}"),
                );
            }
        }
    }
}

/// Quad-tree spatial index over a fixed world rectangle
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadNode,
    bounds: Aabb,
    config: QuadTreeConfig,
}

impl QuadTree {
    /// Create an empty tree covering `world_bounds`
    pub fn new(world_bounds: Aabb, config: QuadTreeConfig) -> Self {
        Self {
            root: QuadNode::default(),
            bounds: world_bounds,
            config,
        }
    }

    /// Insert an entry.
    ///
    /// Entries outside the world bounds are still stored; they simply end up
    /// in whichever quadrant the midline tests route them to.
    pub fn insert(&mut self, entry: QuadEntry) {
        self.root.insert(entry, &self.bounds, 0, &self.config);
    }

    /// Collect indices of every entry that may overlap `rect`.
    ///
    /// The result is a superset of the true overlaps, sorted ascending.
    pub fn query(&self, rect: &Aabb) -> Vec<usize> {
        let mut results = Vec::new();
        self.root.query(rect, &self.bounds, &mut results);
        results.sort_unstable();
        results
    }

    /// World bounds covered by the root
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Configuration used for splitting
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Root node
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    /// Total number of stored entries
    pub fn entry_count(&self) -> usize {
        self.root.count_entries()
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Number of split levels below the root
    pub fn depth(&self) -> u32 {
        self.root.height()
    }

    /// Dump the node hierarchy at trace level
    pub fn log_structure(&self) {
        if log::log_enabled!(log::Level::Trace) {
            self.root.log_structure(&self.bounds, 0, "root");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Aabb {
        Aabb::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0))
    }

    fn square(x: f32, y: f32, half: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec2::new(x, y), Vec2::new(half, half))
    }

    /// Small deterministic generator so the property tests are reproducible
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self) -> f32 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
        }

        fn range(&mut self, min: f32, max: f32) -> f32 {
            min + (max - min) * self.next_f32()
        }
    }

    fn random_rects(seed: u64, count: usize) -> Vec<Aabb> {
        let mut rng = Lcg(seed);
        (0..count)
            .map(|_| {
                let center = Vec2::new(rng.range(-110.0, 110.0), rng.range(-110.0, 110.0));
                let half = Vec2::new(rng.range(0.0, 8.0), rng.range(0.0, 8.0));
                Aabb::from_center_half_extents(center, half)
            })
            .collect()
    }

    #[test]
    fn test_quadtree_basic_insertion() {
        let mut tree = QuadTree::new(world(), QuadTreeConfig::default());
        tree.insert(QuadEntry::new(square(10.0, 10.0, 1.0), 0));
        tree.insert(QuadEntry::new(square(-10.0, 10.0, 1.0), 1));

        assert_eq!(tree.entry_count(), 2);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.query(&square(10.0, 10.0, 0.5)), vec![0, 1]);
    }

    #[test]
    fn test_split_after_threshold() {
        let mut tree = QuadTree::new(world(), QuadTreeConfig::default());
        let centers = [(-50.0, -50.0), (50.0, -50.0), (50.0, 50.0), (-50.0, 50.0)];
        for (index, (x, y)) in centers.iter().enumerate() {
            tree.insert(QuadEntry::new(square(*x, *y, 1.0), index));
        }
        assert!(tree.root().is_leaf(), "four entries fit in one leaf");

        tree.insert(QuadEntry::new(square(-60.0, -60.0, 1.0), 4));
        let children = tree.root().children().expect("fifth entry splits the root");

        assert!(tree.root().entries().is_empty());
        let indices = |quadrant: usize| -> Vec<usize> {
            children[quadrant].entries().iter().map(|e| e.index).collect()
        };
        assert_eq!(indices(0), vec![0, 4]);
        assert_eq!(indices(1), vec![1]);
        assert_eq!(indices(2), vec![2]);
        assert_eq!(indices(3), vec![3]);
        assert_eq!(tree.node_count(), 5);

        assert_eq!(tree.query(&square(-55.0, -55.0, 10.0)), vec![0, 4]);
        assert_eq!(tree.query(&square(50.0, 50.0, 2.0)), vec![2]);
    }

    #[test]
    fn test_straddlers_stay_resident() {
        let mut tree = QuadTree::new(world(), QuadTreeConfig::default());
        // Crosses the X midline
        tree.insert(QuadEntry::new(square(0.0, -50.0, 5.0), 0));
        for index in 1..5 {
            tree.insert(QuadEntry::new(square(50.0, 50.0, 1.0), index));
        }

        let root = tree.root();
        assert!(!root.is_leaf());
        assert_eq!(root.entries().len(), 1);
        assert_eq!(root.entries()[0].index, 0);

        // Resident entries are returned for any query that reaches the node
        assert_eq!(tree.query(&square(50.0, 50.0, 0.5)), vec![0, 1, 2, 3, 4]);

        // Later straddlers stay at the split node too
        tree.insert(QuadEntry::new(square(0.0, 0.0, 1.0), 5));
        assert_eq!(tree.root().entries().len(), 2);
    }

    #[test]
    fn test_nested_split_is_bounded_by_max_depth() {
        let config = QuadTreeConfig {
            split_threshold: 4,
            max_depth: 3,
        };
        let mut tree = QuadTree::new(world(), config);
        for index in 0..50 {
            tree.insert(QuadEntry::new(square(-99.0, -99.0, 0.01), index));
        }

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.entry_count(), 50);
        assert_eq!(tree.query(&square(-99.0, -99.0, 0.1)).len(), 50);
    }

    #[test]
    fn test_query_has_no_false_negatives() {
        let rects = random_rects(0x5eed, 400);
        let mut tree = QuadTree::new(world(), QuadTreeConfig::default());
        for (index, rect) in rects.iter().enumerate() {
            tree.insert(QuadEntry::new(*rect, index));
        }
        assert_eq!(tree.entry_count(), rects.len());

        for query in random_rects(0xfeed, 200) {
            let found = tree.query(&query);
            assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
            for (index, rect) in rects.iter().enumerate() {
                if rect.overlaps(&query) {
                    assert!(
                        found.binary_search(&index).is_ok(),
                        "entry {index} overlaps the query but was not returned"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rebuild_yields_equivalent_coverage() {
        let rects = random_rects(42, 150);
        let build = || {
            let mut tree = QuadTree::new(world(), QuadTreeConfig::default());
            for (index, rect) in rects.iter().enumerate() {
                tree.insert(QuadEntry::new(*rect, index));
            }
            tree
        };
        let first = build();
        let second = build();

        assert_eq!(first.node_count(), second.node_count());
        for query in random_rects(7, 50) {
            assert_eq!(first.query(&query), second.query(&query));
        }
    }

    #[test]
    fn test_quadrant_bounds_tile_parent() {
        let parent = Aabb::new(Vec2::new(-100.0, -150.0), Vec2::new(100.0, 50.0));
        let quadrants: Vec<Aabb> = (0..4).map(|q| quadrant_bounds(&parent, q)).collect();

        assert_eq!(quadrants[0], Aabb::new(Vec2::new(-100.0, -150.0), Vec2::new(0.0, -50.0)));
        assert_eq!(quadrants[1], Aabb::new(Vec2::new(0.0, -150.0), Vec2::new(100.0, -50.0)));
        assert_eq!(quadrants[2], Aabb::new(Vec2::new(0.0, -50.0), Vec2::new(100.0, 50.0)));
        assert_eq!(quadrants[3], Aabb::new(Vec2::new(-100.0, -50.0), Vec2::new(0.0, 50.0)));
        for quadrant in &quadrants {
            assert!(parent.contains(quadrant));
        }
    }
}
