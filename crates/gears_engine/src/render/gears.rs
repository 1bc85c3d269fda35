//! Classic gear tessellation and the three-gear scene

use std::f32::consts::PI;

use super::mesh::{Mesh, MeshBuilder, Shading};

/// Shape parameters for one gear.
#[derive(Debug, Clone, Copy)]
pub struct GearSpec {
    /// Radius of the center bore.
    pub inner_radius: f32,
    /// Radius at the pitch circle, halfway up the teeth.
    pub outer_radius: f32,
    /// Thickness along z.
    pub width: f32,
    /// Number of teeth.
    pub teeth: u32,
    /// Radial height of a tooth.
    pub tooth_depth: f32,
}

/// One gear of the scene: shape, color, placement, and rotation relative to
/// the shared scene angle.
#[derive(Debug, Clone, Copy)]
pub struct SceneGear {
    /// Gear shape.
    pub spec: GearSpec,
    /// Diffuse color.
    pub color: [f32; 3],
    /// Position in the scene's xy plane.
    pub position: [f32; 2],
    /// Multiplier applied to the shared angle; meshing gears counter-rotate.
    pub rate: f32,
    /// Fixed phase offset in degrees that aligns the teeth.
    pub phase_deg: f32,
}

/// The three gears of the classic scene: a large red one meshing with a
/// small green one, and a blue one meshing from above.
pub fn scene() -> Vec<SceneGear> {
    vec![
        SceneGear {
            spec: GearSpec {
                inner_radius: 1.0,
                outer_radius: 4.0,
                width: 1.0,
                teeth: 20,
                tooth_depth: 0.7,
            },
            color: [0.8, 0.1, 0.0],
            position: [-3.0, -2.0],
            rate: 1.0,
            phase_deg: 0.0,
        },
        SceneGear {
            spec: GearSpec {
                inner_radius: 0.5,
                outer_radius: 2.0,
                width: 2.0,
                teeth: 10,
                tooth_depth: 0.7,
            },
            color: [0.0, 0.8, 0.2],
            position: [3.1, -2.0],
            rate: -2.0,
            phase_deg: -9.0,
        },
        SceneGear {
            spec: GearSpec {
                inner_radius: 1.3,
                outer_radius: 2.0,
                width: 0.5,
                teeth: 10,
                tooth_depth: 0.7,
            },
            color: [0.2, 0.2, 1.0],
            position: [-3.1, 4.2],
            rate: -2.0,
            phase_deg: -25.0,
        },
    ]
}

/// Tessellate a gear into a triangle list.
///
/// The geometry follows the classic gears demo: annular front and back
/// faces, the front/back faces of each tooth, the outward rim with its four
/// facets per tooth, and the bore cylinder. Everything is flat shaded except
/// the bore, which gets smooth per-vertex normals.
pub fn gear(spec: &GearSpec) -> Mesh {
    let r0 = spec.inner_radius;
    let r1 = spec.outer_radius - spec.tooth_depth / 2.0;
    let r2 = spec.outer_radius + spec.tooth_depth / 2.0;
    let teeth = spec.teeth;
    let half_width = spec.width * 0.5;

    // Quarter of the angular pitch: teeth rise, top, and fall over 3 of the
    // 4 quarters, the valley fills the rest.
    let da = 2.0 * PI / teeth as f32 / 4.0;
    let pitch = |i: u32| i as f32 * 2.0 * PI / teeth as f32;

    let mut mb = MeshBuilder::new();

    // Front face.
    mb.normal([0.0, 0.0, 1.0]);
    mb.begin_strip(Shading::Flat);
    for i in 0..=teeth {
        let angle = pitch(i);
        mb.strip_pair(ring(r0, angle, half_width), ring(r1, angle, half_width));
        if i < teeth {
            mb.strip_pair(
                ring(r0, angle, half_width),
                ring(r1, angle + 3.0 * da, half_width),
            );
        }
    }

    // Front faces of the teeth.
    for i in 0..teeth {
        let angle = pitch(i);
        mb.quad(
            ring(r1, angle, half_width),
            ring(r2, angle + da, half_width),
            ring(r2, angle + 2.0 * da, half_width),
            ring(r1, angle + 3.0 * da, half_width),
        );
    }

    // Back face.
    mb.normal([0.0, 0.0, -1.0]);
    mb.begin_strip(Shading::Flat);
    for i in 0..=teeth {
        let angle = pitch(i);
        mb.strip_pair(ring(r1, angle, -half_width), ring(r0, angle, -half_width));
        if i < teeth {
            mb.strip_pair(
                ring(r1, angle + 3.0 * da, -half_width),
                ring(r0, angle, -half_width),
            );
        }
    }

    // Back faces of the teeth.
    for i in 0..teeth {
        let angle = pitch(i);
        mb.quad(
            ring(r1, angle + 3.0 * da, -half_width),
            ring(r2, angle + 2.0 * da, -half_width),
            ring(r2, angle + da, -half_width),
            ring(r1, angle, -half_width),
        );
    }

    // Outward rim: rise, top, fall, valley per tooth. Facet normals change
    // ahead of the pair that closes their quad.
    mb.begin_strip(Shading::Flat);
    for i in 0..teeth {
        let angle = pitch(i);

        mb.strip_pair(ring(r1, angle, half_width), ring(r1, angle, -half_width));

        let (u, v) = edge_direction(r1, angle, r2, angle + da);
        mb.normal([v, -u, 0.0]);
        mb.strip_pair(
            ring(r2, angle + da, half_width),
            ring(r2, angle + da, -half_width),
        );

        mb.normal([angle.cos(), angle.sin(), 0.0]);
        mb.strip_pair(
            ring(r2, angle + 2.0 * da, half_width),
            ring(r2, angle + 2.0 * da, -half_width),
        );

        let (u, v) = edge_direction(r2, angle + 2.0 * da, r1, angle + 3.0 * da);
        mb.normal([v, -u, 0.0]);
        mb.strip_pair(
            ring(r1, angle + 3.0 * da, half_width),
            ring(r1, angle + 3.0 * da, -half_width),
        );

        mb.normal([angle.cos(), angle.sin(), 0.0]);
    }
    mb.strip_pair(ring(r1, 0.0, half_width), ring(r1, 0.0, -half_width));

    // Bore cylinder, smooth shaded with inward normals.
    mb.begin_strip(Shading::Smooth);
    for i in 0..=teeth {
        let angle = pitch(i);
        mb.normal([-angle.cos(), -angle.sin(), 0.0]);
        mb.strip_pair(ring(r0, angle, -half_width), ring(r0, angle, half_width));
    }

    mb.build()
}

fn ring(radius: f32, angle: f32, z: f32) -> [f32; 3] {
    [radius * angle.cos(), radius * angle.sin(), z]
}

/// Unit direction in the xy plane from `(ra, aa)` to `(rb, ab)`, used to
/// derive the outward normal of a tooth flank.
fn edge_direction(ra: f32, aa: f32, rb: f32, ab: f32) -> (f32, f32) {
    let u = rb * ab.cos() - ra * aa.cos();
    let v = rb * ab.sin() - ra * aa.sin();
    let len = (u * u + v * v).sqrt();
    (u / len, v / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn classic_spec() -> GearSpec {
        GearSpec {
            inner_radius: 1.0,
            outer_radius: 4.0,
            width: 1.0,
            teeth: 20,
            tooth_depth: 0.7,
        }
    }

    #[test]
    fn test_triangle_count_scales_with_teeth() {
        // Front/back faces 4T each, tooth faces 2T each, rim 8T, bore 2T.
        for teeth in [10_u32, 20] {
            let mut spec = classic_spec();
            spec.teeth = teeth;
            let mesh = gear(&spec);
            assert_eq!(mesh.triangle_count(), 22 * teeth as usize);
        }
    }

    #[test]
    fn test_vertices_stay_within_radial_bounds() {
        let spec = classic_spec();
        let mesh = gear(&spec);
        let min_r = spec.inner_radius - 1e-4;
        let max_r = spec.outer_radius + spec.tooth_depth / 2.0 + 1e-4;

        for vertex in &mesh.vertices {
            let r = (vertex.position[0].powi(2) + vertex.position[1].powi(2)).sqrt();
            assert!(r >= min_r && r <= max_r, "radius {r} out of [{min_r}, {max_r}]");
        }
    }

    #[test]
    fn test_vertices_sit_on_the_two_faces() {
        let spec = classic_spec();
        let mesh = gear(&spec);
        let half_width = spec.width * 0.5;

        for vertex in &mesh.vertices {
            assert_relative_eq!(vertex.position[2].abs(), half_width, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = gear(&classic_spec());
        for vertex in &mesh.vertices {
            let len = (vertex.normal[0].powi(2)
                + vertex.normal[1].powi(2)
                + vertex.normal[2].powi(2))
            .sqrt();
            assert_relative_eq!(len, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_scene_is_the_classic_three_gear_layout() {
        let scene = scene();
        assert_eq!(scene.len(), 3);

        // Large red driver, small green and blue followers at double rate.
        assert_eq!(scene[0].spec.teeth, 20);
        assert_eq!(scene[1].spec.teeth, 10);
        assert_eq!(scene[2].spec.teeth, 10);
        assert_eq!(scene[0].rate, 1.0);
        assert_eq!(scene[1].rate, -2.0);
        assert_eq!(scene[2].rate, -2.0);
    }
}
