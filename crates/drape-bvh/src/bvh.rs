//! BVH construction, refit, and spatial queries.

use drape_math::{Aabb, Vec3};
use drape_types::constants::LEAF_MARGIN;
use drape_types::{ParticleId, Scalar};

/// Index into the flat node array. The root is always index 0.
type NodeIndex = u32;

/// A node in the hierarchy.
///
/// Internal nodes carry up to two children and no payload; leaves carry
/// exactly one payload and no children. Every node's box encloses all
/// descendant leaf boxes. Absent children are `None`, never a sentinel
/// index that could alias the root.
#[derive(Debug, Clone)]
pub struct Node {
    aabb: Aabb,
    children: [Option<NodeIndex>; 2],
    payload: Option<ParticleId>,
}

impl Node {
    /// The node's current bounding box.
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Child node indices (absent children are `None`).
    pub fn children(&self) -> [Option<u32>; 2] {
        self.children
    }

    /// The particle this leaf wraps, or `None` for internal nodes.
    pub fn payload(&self) -> Option<ParticleId> {
        self.payload
    }

    /// True iff this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.payload.is_some()
    }
}

/// A build-time wrapper pairing a particle with its leaf box.
struct BuildItem {
    id: ParticleId,
    aabb: Aabb,
}

/// Binary bounding volume hierarchy with fixed topology.
pub struct Bvh {
    /// All nodes; index 0 is the root (when any nodes exist).
    nodes: Vec<Node>,
}

impl Bvh {
    /// Builds a tree over `positions`, one leaf per entry.
    ///
    /// Leaf `k` carries `ParticleId(k)` and a box of the position
    /// inflated by [`LEAF_MARGIN`] on each side. An empty slice yields
    /// a tree with no nodes; a single position yields a tree whose
    /// root is itself the leaf.
    pub fn build(positions: &[Vec3]) -> Self {
        let items: Vec<BuildItem> = positions
            .iter()
            .enumerate()
            .map(|(k, &pos)| BuildItem {
                id: ParticleId(k as u32),
                aabb: Aabb::from_point(pos, LEAF_MARGIN),
            })
            .collect();

        let mut bvh = Self { nodes: Vec::new() };
        if items.is_empty() {
            return bvh;
        }

        let group: Vec<u32> = (0..items.len() as u32).collect();
        let mut bounds = Aabb::empty();
        for item in &items {
            bounds.enclose(&item.aabb);
        }

        if items.len() == 1 {
            bvh.nodes.push(Node {
                aabb: bounds,
                children: [None, None],
                payload: Some(items[0].id),
            });
            return bvh;
        }

        bvh.nodes.push(Node {
            aabb: bounds,
            children: [None, None],
            payload: None,
        });
        bvh.partition(0, &items, group);
        bvh
    }

    /// Recursively partitions `group` under `node`.
    ///
    /// Groups of more than two items are split at the spatial median of
    /// the largest box axis (ties resolved x before y before z); each
    /// item goes left or right by comparing its box centroid against
    /// the midpoint, so size-unbalanced partitions are expected. Groups
    /// of one or two items become this node's leaf children directly.
    fn partition(&mut self, node: NodeIndex, items: &[BuildItem], group: Vec<u32>) {
        if group.len() > 2 {
            let bounds = self.nodes[node as usize].aabb;

            let mut split_axis = 0;
            let mut axis_size: Scalar = 0.0;
            for axis in 0..3 {
                let size = bounds.extent(axis);
                if size > axis_size {
                    axis_size = size;
                    split_axis = axis;
                }
            }
            let midpoint = bounds.min[split_axis] + 0.5 * bounds.extent(split_axis);

            let mut left = Vec::new();
            let mut right = Vec::new();
            for &item in &group {
                if items[item as usize].aabb.center()[split_axis] <= midpoint {
                    left.push(item);
                } else {
                    right.push(item);
                }
            }

            // A cluster of coincident points has zero extent, so every
            // centroid lands on one side. Split by count to terminate.
            if left.is_empty() || right.is_empty() {
                let mut all = if left.is_empty() { right } else { left };
                right = all.split_off(all.len() / 2);
                left = all;
            }

            for (slot, side) in [left, right].into_iter().enumerate() {
                let mut bounds = Aabb::empty();
                for &item in &side {
                    bounds.enclose(&items[item as usize].aabb);
                }
                let child = self.nodes.len() as NodeIndex;
                self.nodes.push(Node {
                    aabb: bounds,
                    children: [None, None],
                    payload: None,
                });
                self.nodes[node as usize].children[slot] = Some(child);
                self.partition(child, items, side);
            }
        } else {
            for (slot, &item) in group.iter().enumerate() {
                let child = self.nodes.len() as NodeIndex;
                self.nodes.push(Node {
                    aabb: items[item as usize].aabb,
                    children: [None, None],
                    payload: Some(items[item as usize].id),
                });
                self.nodes[node as usize].children[slot] = Some(child);
            }
        }
    }

    /// Recomputes all node boxes bottom-up from current positions.
    ///
    /// Must be called after any batch of position changes, before the
    /// next query. Topology is untouched. `positions` is indexed by
    /// `ParticleId` and must cover every leaf payload.
    pub fn refit(&mut self, positions: &[Vec3]) {
        if !self.nodes.is_empty() {
            self.refit_node(0, positions);
        }
    }

    fn refit_node(&mut self, node: NodeIndex, positions: &[Vec3]) {
        if let Some(id) = self.nodes[node as usize].payload {
            self.nodes[node as usize].aabb = Aabb::from_point(positions[id.index()], LEAF_MARGIN);
            return;
        }

        let children = self.nodes[node as usize].children;
        let mut bounds = Aabb::empty();
        for child in children.into_iter().flatten() {
            self.refit_node(child, positions);
            bounds.enclose(&self.nodes[child as usize].aabb);
        }
        self.nodes[node as usize].aabb = bounds;
    }

    /// All particles whose leaf box overlaps `query`, in DFS discovery
    /// order (the order carries no meaning).
    pub fn find_within_box(&self, query: &Aabb) -> Vec<ParticleId> {
        let mut found = Vec::new();
        if !self.nodes.is_empty() {
            self.collect_in_box(0, query, &mut found);
        }
        found
    }

    fn collect_in_box(&self, node: NodeIndex, query: &Aabb, found: &mut Vec<ParticleId>) {
        let n = &self.nodes[node as usize];
        if !n.aabb.intersects(query) {
            return;
        }
        if let Some(id) = n.payload {
            found.push(id);
            return;
        }
        for child in n.children.into_iter().flatten() {
            self.collect_in_box(child, query, found);
        }
    }

    /// All particles whose leaf box overlaps the sphere at `center`
    /// with `radius`.
    pub fn find_within_sphere(&self, center: Vec3, radius: Scalar) -> Vec<ParticleId> {
        let mut found = Vec::new();
        if !self.nodes.is_empty() {
            self.collect_in_sphere(0, center, radius, &mut found);
        }
        found
    }

    fn collect_in_sphere(
        &self,
        node: NodeIndex,
        center: Vec3,
        radius: Scalar,
        found: &mut Vec<ParticleId>,
    ) {
        let n = &self.nodes[node as usize];
        if !n.aabb.intersects_sphere(center, radius) {
            return;
        }
        if let Some(id) = n.payload {
            found.push(id);
            return;
        }
        for child in n.children.into_iter().flatten() {
            self.collect_in_sphere(child, center, radius, found);
        }
    }

    /// Number of nodes (internal + leaf).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True iff the tree was built from an empty point set.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read access to the node array (root first). Exposed for
    /// invariant checks and debug visualization.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
