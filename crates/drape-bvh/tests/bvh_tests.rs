//! Integration tests for drape-bvh.
//!
//! Property-style checks run over deterministic pseudo-random point
//! sets and cross-check every query against a brute-force scan of the
//! leaf boxes.

use drape_bvh::Bvh;
use drape_math::{Aabb, Vec3};
use drape_types::constants::LEAF_MARGIN;
use drape_types::ParticleId;

/// Small deterministic LCG so test inputs are reproducible without
/// pulling in a random number crate.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }

    fn next_in(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = self.next_u32() as f32 / (u32::MAX as f32 + 1.0);
        lo + unit * (hi - lo)
    }

    fn next_point(&mut self, lo: f32, hi: f32) -> Vec3 {
        Vec3::new(
            self.next_in(lo, hi),
            self.next_in(lo, hi),
            self.next_in(lo, hi),
        )
    }
}

fn random_points(rng: &mut Lcg, n: usize) -> Vec<Vec3> {
    (0..n).map(|_| rng.next_point(-5.0, 5.0)).collect()
}

fn sorted_ids(mut ids: Vec<ParticleId>) -> Vec<ParticleId> {
    ids.sort();
    ids
}

/// Brute-force reference for box queries over current leaf boxes.
fn brute_force_box(positions: &[Vec3], query: &Aabb) -> Vec<ParticleId> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, &p)| Aabb::from_point(p, LEAF_MARGIN).intersects(query))
        .map(|(k, _)| ParticleId(k as u32))
        .collect()
}

/// Brute-force reference for sphere queries over current leaf boxes.
fn brute_force_sphere(positions: &[Vec3], center: Vec3, radius: f32) -> Vec<ParticleId> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, &p)| Aabb::from_point(p, LEAF_MARGIN).intersects_sphere(center, radius))
        .map(|(k, _)| ParticleId(k as u32))
        .collect()
}

/// Walks the tree asserting every internal node's box encloses its
/// children's boxes and that each particle appears in exactly one leaf.
fn assert_tree_invariants(bvh: &Bvh, particle_count: usize) {
    let nodes = bvh.nodes();
    let mut leaf_ids = Vec::new();

    for (k, node) in nodes.iter().enumerate() {
        if let Some(id) = node.payload() {
            assert!(node.is_leaf());
            assert_eq!(node.children(), [None, None], "leaf {k} has children");
            leaf_ids.push(id);
        } else {
            let children: Vec<u32> = node.children().into_iter().flatten().collect();
            assert!(!children.is_empty(), "internal node {k} has no children");
            for child in children {
                let child_box = nodes[child as usize].aabb();
                assert!(
                    child_box.fits_entirely_within(node.aabb()),
                    "node {k} does not enclose child {child}"
                );
            }
        }
    }

    leaf_ids.sort();
    leaf_ids.dedup();
    assert_eq!(leaf_ids.len(), particle_count, "leaves do not cover all particles");
}

// ─── Construction ─────────────────────────────────────────────

#[test]
fn empty_tree() {
    let bvh = Bvh::build(&[]);
    assert!(bvh.is_empty());
    assert_eq!(bvh.node_count(), 0);
    let query = Aabb::new(Vec3::splat(-100.0), Vec3::splat(100.0));
    assert!(bvh.find_within_box(&query).is_empty());
    assert!(bvh.find_within_sphere(Vec3::ZERO, 100.0).is_empty());
}

#[test]
fn single_point_root_is_leaf() {
    let bvh = Bvh::build(&[Vec3::new(1.0, 2.0, 3.0)]);
    assert_eq!(bvh.node_count(), 1);
    assert!(bvh.nodes()[0].is_leaf());

    let hit = Aabb::from_point(Vec3::new(1.0, 2.0, 3.0), 0.1);
    assert_eq!(bvh.find_within_box(&hit), vec![ParticleId(0)]);

    let miss = Aabb::from_point(Vec3::new(9.0, 9.0, 9.0), 0.1);
    assert!(bvh.find_within_box(&miss).is_empty());
}

#[test]
fn two_points_share_the_root() {
    let bvh = Bvh::build(&[Vec3::ZERO, Vec3::splat(4.0)]);
    assert_eq!(bvh.node_count(), 3);
    let root = &bvh.nodes()[0];
    assert!(!root.is_leaf());
    assert_eq!(root.children().into_iter().flatten().count(), 2);
}

#[test]
fn containment_invariant_over_random_sets() {
    let mut rng = Lcg::new(0xC10_75);
    for n in [1, 3, 10, 64, 333, 1000] {
        let points = random_points(&mut rng, n);
        let bvh = Bvh::build(&points);
        assert_tree_invariants(&bvh, n);
    }
}

#[test]
fn coincident_points_terminate_and_are_found() {
    // Zero-extent clusters cannot be split spatially; construction
    // must still terminate and keep every leaf reachable.
    let points = vec![Vec3::new(0.5, -1.0, 2.0); 7];
    let bvh = Bvh::build(&points);
    assert_tree_invariants(&bvh, 7);

    let query = Aabb::from_point(Vec3::new(0.5, -1.0, 2.0), 0.01);
    assert_eq!(bvh.find_within_box(&query).len(), 7);
}

// ─── Queries vs Brute Force ───────────────────────────────────

#[test]
fn box_queries_match_brute_force() {
    let mut rng = Lcg::new(0xB0B);
    for n in [1, 7, 50, 200] {
        let points = random_points(&mut rng, n);
        let bvh = Bvh::build(&points);

        for _ in 0..20 {
            let center = rng.next_point(-5.0, 5.0);
            let half = rng.next_in(0.1, 3.0);
            let query = Aabb::from_point(center, half);

            let got = sorted_ids(bvh.find_within_box(&query));
            let want = brute_force_box(&points, &query);
            assert_eq!(got, want, "box query mismatch for n={n}");
        }
    }
}

#[test]
fn sphere_queries_match_brute_force() {
    let mut rng = Lcg::new(0x5EED);
    for n in [1, 7, 50, 200] {
        let points = random_points(&mut rng, n);
        let bvh = Bvh::build(&points);

        for _ in 0..20 {
            let center = rng.next_point(-5.0, 5.0);
            let radius = rng.next_in(0.1, 4.0);

            let got = sorted_ids(bvh.find_within_sphere(center, radius));
            let want = brute_force_sphere(&points, center, radius);
            assert_eq!(got, want, "sphere query mismatch for n={n}");
        }
    }
}

#[test]
fn query_touching_leaf_margin_is_a_hit() {
    let p = Vec3::ZERO;
    let bvh = Bvh::build(&[p]);
    // Query box whose face exactly touches the inflated leaf box.
    let query = Aabb::new(Vec3::new(LEAF_MARGIN, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(bvh.find_within_box(&query), vec![ParticleId(0)]);
}

// ─── Refit ────────────────────────────────────────────────────

#[test]
fn refit_is_idempotent() {
    let mut rng = Lcg::new(0xF17);
    let points = random_points(&mut rng, 128);
    let mut bvh = Bvh::build(&points);

    bvh.refit(&points);
    let first: Vec<Aabb> = bvh.nodes().iter().map(|n| *n.aabb()).collect();
    bvh.refit(&points);
    let second: Vec<Aabb> = bvh.nodes().iter().map(|n| *n.aabb()).collect();

    assert_eq!(first, second);
}

#[test]
fn refit_tracks_moved_points() {
    let mut rng = Lcg::new(0xDE1);
    let mut points = random_points(&mut rng, 100);
    let mut bvh = Bvh::build(&points);

    // Scatter every point somewhere new; topology must not matter.
    for p in &mut points {
        *p += rng.next_point(-2.0, 2.0);
    }
    bvh.refit(&points);
    assert_tree_invariants(&bvh, points.len());

    for _ in 0..20 {
        let center = rng.next_point(-7.0, 7.0);
        let query = Aabb::from_point(center, rng.next_in(0.5, 3.0));
        let got = sorted_ids(bvh.find_within_box(&query));
        let want = brute_force_box(&points, &query);
        assert_eq!(got, want);
    }
}

#[test]
fn refit_on_empty_tree_is_a_no_op() {
    let mut bvh = Bvh::build(&[]);
    bvh.refit(&[]);
    assert!(bvh.is_empty());
}
