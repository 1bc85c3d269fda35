//! Triangle-list mesh assembly

/// One mesh vertex, tightly packed for GL upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

// Plain #[repr(C)] floats, safe to byte-cast for buffer upload.
unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

/// A triangle list ready for upload, three vertices per triangle.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Flat vertex list.
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Shading model for a quad strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Every vertex of a quad takes the normal current when the quad closed.
    Flat,
    /// Each vertex keeps the normal current when it was emitted.
    Smooth,
}

#[derive(Clone, Copy)]
struct StripPair {
    even: Vertex,
    odd: Vertex,
}

struct Strip {
    shading: Shading,
    prev: Option<StripPair>,
}

/// Builds triangle lists in the emission order of the fixed-function quad
/// and quad-strip primitives the gear tessellation is phrased in.
///
/// The builder keeps a current normal that applies to emitted vertices until
/// changed, like the GL state machine, with [`Shading`] deciding whether a
/// strip quad is flattened onto its closing normal.
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    normal: [f32; 3],
    strip: Option<Strip>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normal: [0.0, 0.0, 1.0],
            strip: None,
        }
    }

    /// Set the normal applied to subsequently emitted vertices.
    pub fn normal(&mut self, normal: [f32; 3]) {
        self.normal = normal;
    }

    /// Emit one standalone quad `(a, b, c, d)` as two triangles with the
    /// current normal, ending any strip in progress.
    pub fn quad(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3]) {
        self.strip = None;
        let normal = self.normal;
        self.push_tri(a, b, c, normal);
        self.push_tri(a, c, d, normal);
    }

    /// Begin a new quad strip, discarding any strip in progress.
    pub fn begin_strip(&mut self, shading: Shading) {
        self.strip = Some(Strip {
            shading,
            prev: None,
        });
    }

    /// Add a vertex pair to the current strip; once two pairs exist, each
    /// new pair closes a quad `(prev.even, prev.odd, pair.odd, pair.even)`,
    /// matching `GL_QUAD_STRIP` ordering.
    ///
    /// Without a preceding [`begin_strip`](Self::begin_strip) a flat strip
    /// is started.
    pub fn strip_pair(&mut self, even: [f32; 3], odd: [f32; 3]) {
        let pair = StripPair {
            even: Vertex { position: even, normal: self.normal },
            odd: Vertex { position: odd, normal: self.normal },
        };

        let (shading, prev) = match &mut self.strip {
            Some(strip) => (strip.shading, strip.prev.replace(pair)),
            None => {
                self.strip = Some(Strip {
                    shading: Shading::Flat,
                    prev: Some(pair),
                });
                return;
            }
        };

        let Some(prev) = prev else { return };
        match shading {
            Shading::Flat => {
                let normal = self.normal;
                self.push_tri(prev.even.position, prev.odd.position, pair.odd.position, normal);
                self.push_tri(prev.even.position, pair.odd.position, pair.even.position, normal);
            }
            Shading::Smooth => {
                for vertex in [prev.even, prev.odd, pair.odd, prev.even, pair.odd, pair.even] {
                    self.vertices.push(vertex);
                }
            }
        }
    }

    /// Finish the mesh.
    pub fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
        }
    }

    fn push_tri(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3], normal: [f32; 3]) {
        for position in [a, b, c] {
            self.vertices.push(Vertex { position, normal });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_emits_two_triangles_with_current_normal() {
        let mut builder = MeshBuilder::new();
        builder.normal([0.0, 1.0, 0.0]);
        builder.quad(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        );
        let mesh = builder.build();

        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_strip_closes_one_quad_per_pair_after_the_first() {
        let mut builder = MeshBuilder::new();
        builder.begin_strip(Shading::Flat);
        for i in 0..5 {
            let x = i as f32;
            builder.strip_pair([x, 0.0, 0.0], [x, 1.0, 0.0]);
        }
        let mesh = builder.build();

        // 5 pairs -> 4 quads -> 8 triangles.
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_flat_strip_uses_closing_normal_for_whole_quad() {
        let mut builder = MeshBuilder::new();
        builder.begin_strip(Shading::Flat);
        builder.normal([1.0, 0.0, 0.0]);
        builder.strip_pair([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        builder.normal([0.0, 0.0, 1.0]);
        builder.strip_pair([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        let mesh = builder.build();

        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_smooth_strip_keeps_per_vertex_normals() {
        let mut builder = MeshBuilder::new();
        builder.begin_strip(Shading::Smooth);
        builder.normal([1.0, 0.0, 0.0]);
        builder.strip_pair([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        builder.normal([0.0, 0.0, 1.0]);
        builder.strip_pair([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        let mesh = builder.build();

        let first_pair_normals = mesh
            .vertices
            .iter()
            .filter(|v| v.position[0] == 0.0)
            .all(|v| v.normal == [1.0, 0.0, 0.0]);
        let second_pair_normals = mesh
            .vertices
            .iter()
            .filter(|v| v.position[0] == 1.0)
            .all(|v| v.normal == [0.0, 0.0, 1.0]);
        assert!(first_pair_normals);
        assert!(second_pair_normals);
    }

    #[test]
    fn test_quad_ends_strip() {
        let mut builder = MeshBuilder::new();
        builder.begin_strip(Shading::Flat);
        builder.strip_pair([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        builder.quad(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        );
        // The dangling strip pair must not combine with later pairs.
        builder.begin_strip(Shading::Flat);
        builder.strip_pair([2.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        let mesh = builder.build();

        assert_eq!(mesh.triangle_count(), 2);
    }
}
