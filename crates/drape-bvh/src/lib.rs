//! # drape-bvh
//!
//! Binary bounding volume hierarchy over a fixed particle set.
//!
//! The tree is built once by recursive spatial-median partitioning and
//! then only *refit*: node boxes are recomputed bottom-up from current
//! particle positions while the topology stays fixed. Queries return
//! the particles whose leaf boxes overlap an axis-aligned box or a
//! sphere, pruning whole subtrees whose boxes miss the query volume.
//!
//! Particles are referenced by [`ParticleId`](drape_types::ParticleId),
//! an index into the caller's position array; the BVH never stores
//! positions itself.

pub mod bvh;

pub use bvh::{Bvh, Node};
