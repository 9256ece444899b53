//! Render topology for the particle grid.
//!
//! Two triangles per grid quad, plus the vertex-to-triangle adjacency
//! needed to derive smooth per-vertex normals for a renderer. Built
//! once at construction; only the positions fed into
//! [`GridTopology::vertex_normals`] change.

use drape_math::Vec3;

/// Fixed triangle topology over an x-major particle grid
/// (`index = x * rows + y`).
#[derive(Debug, Clone)]
pub struct GridTopology {
    triangles: Vec<[u32; 3]>,
    vertex_triangles: Vec<Vec<u32>>,
}

impl GridTopology {
    /// Builds the triangle list for a `cols` x `rows` grid.
    pub fn build(cols: usize, rows: usize) -> Self {
        let mut triangles = Vec::with_capacity(2 * cols.saturating_sub(1) * rows.saturating_sub(1));
        let mut vertex_triangles = vec![Vec::new(); cols * rows];

        let mut push = |tri: [usize; 3], triangles: &mut Vec<[u32; 3]>| {
            let index = triangles.len() as u32;
            triangles.push([tri[0] as u32, tri[1] as u32, tri[2] as u32]);
            for &v in &tri {
                vertex_triangles[v].push(index);
            }
        };

        let mut current = 0usize;
        for x in 0..cols {
            for y in 0..rows {
                if x > 0 && y > 0 {
                    let left = current - rows;
                    let up = current - 1;
                    push([left, up, current], &mut triangles);
                }
                if x < cols - 1 && y < rows - 1 {
                    let right = current + rows;
                    let down = current + 1;
                    push([right, down, current], &mut triangles);
                }
                current += 1;
            }
        }

        Self {
            triangles,
            vertex_triangles,
        }
    }

    /// Triangles as vertex-index triples.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Flat index buffer for renderers.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Per-vertex normals from adjacent-triangle winding.
    ///
    /// Each vertex averages the cross products of its adjacent
    /// triangles' edge vectors and normalizes the result. Vertices
    /// whose fan degenerates to zero area get a zero normal.
    pub fn vertex_normals(&self, positions: &[Vec3]) -> Vec<Vec3> {
        let mut normals = Vec::with_capacity(positions.len());

        for adjacent in &self.vertex_triangles {
            let mut normal = Vec3::ZERO;
            for &tri in adjacent {
                let [a, b, c] = self.triangles[tri as usize];
                let u = positions[b as usize] - positions[a as usize];
                let v = positions[c as usize] - positions[a as usize];
                normal += u.cross(v);
            }

            let length = normal.length();
            if length > 1e-10 {
                normal /= length;
            } else {
                normal = Vec3::ZERO;
            }
            normals.push(normal);
        }

        normals
    }
}
