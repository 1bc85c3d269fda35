//! OpenGL renderer for the gears scene

use std::ffi::CStr;
use std::mem;
use std::ptr;

use gl::types::{GLenum, GLint, GLsizei, GLuint};
use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use thiserror::Error;

use super::gears::{self, SceneGear};
use super::mesh::{Mesh, Vertex};
use crate::foundation::math;

/// GPU pipeline setup errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shader stage failed to compile.
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    /// The shader program failed to link.
    #[error("shader program link failed: {0}")]
    ProgramLink(String),
}

const VERTEX_SHADER: &str = r#"
#version 330 core

layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;

uniform mat4 u_mvp;
uniform mat3 u_normal;

out vec3 v_normal;

void main() {
    v_normal = u_normal * normal;
    gl_Position = u_mvp * vec4(position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 330 core

in vec3 v_normal;

uniform vec3 u_color;
uniform vec3 u_light_dir;

out vec4 frag_color;

void main() {
    float diffuse = max(dot(normalize(v_normal), u_light_dir), 0.0);
    frag_color = vec4(u_color * (0.2 + 0.8 * diffuse), 1.0);
}
"#;

/// Degrees of driver-gear rotation per second.
const SPIN_RATE: f32 = 70.0;

/// Fixed scene tilt, in degrees.
const VIEW_ROT_X: f32 = 20.0;
const VIEW_ROT_Y: f32 = 30.0;

/// Camera pull-back along z.
const VIEW_DISTANCE: f32 = 40.0;

struct GpuMesh {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
}

struct GpuState {
    program: GLuint,
    u_mvp: GLint,
    u_normal: GLint,
    u_color: GLint,
    u_light_dir: GLint,
    meshes: Vec<GpuMesh>,
}

impl Drop for GpuState {
    fn drop(&mut self) {
        if !gl::DeleteProgram::is_loaded() {
            return;
        }
        unsafe {
            for mesh in &self.meshes {
                gl::DeleteVertexArrays(1, &mesh.vao);
                gl::DeleteBuffers(1, &mesh.vbo);
            }
            gl::DeleteProgram(self.program);
        }
    }
}

/// Renders the rotating gears scene.
///
/// CPU-side geometry is tessellated once at construction; all GL objects
/// live in a per-context state that [`rebuild`](Self::rebuild) recreates,
/// since replacing the display invalidates container objects like vertex
/// arrays.
pub struct GearsRenderer {
    models: Vec<(SceneGear, Mesh)>,
    gpu: Option<GpuState>,
    projection: Matrix4<f32>,
    angle: f32,
}

impl Default for GearsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GearsRenderer {
    /// Tessellate the scene. No GL calls happen until
    /// [`rebuild`](Self::rebuild).
    pub fn new() -> Self {
        let models = gears::scene()
            .into_iter()
            .map(|scene_gear| {
                let mesh = gears::gear(&scene_gear.spec);
                log::debug!(
                    "tessellated gear: {} teeth, {} triangles",
                    scene_gear.spec.teeth,
                    mesh.triangle_count()
                );
                (scene_gear, mesh)
            })
            .collect();

        Self {
            models,
            gpu: None,
            projection: Matrix4::identity(),
            angle: 0.0,
        }
    }

    /// (Re)create all GPU state on the current context.
    ///
    /// Must run after every context creation and before the first frame on
    /// it. Any previous state is released first.
    pub fn rebuild(&mut self) -> Result<(), RenderError> {
        self.gpu = None;

        let program = link_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let meshes = self.models.iter().map(|(_, mesh)| upload_mesh(mesh)).collect();

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
        }

        self.gpu = Some(GpuState {
            program,
            u_mvp: uniform_location(program, c"u_mvp"),
            u_normal: uniform_location(program, c"u_normal"),
            u_color: uniform_location(program, c"u_color"),
            u_light_dir: uniform_location(program, c"u_light_dir"),
            meshes,
        });
        log::info!("GL scene state rebuilt");
        Ok(())
    }

    /// Resize the viewport and recompute the projection.
    ///
    /// Safe to call repeatedly with the same size; no other state changes.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
        let h = height as f32 / width as f32;
        self.projection = math::frustum(-1.0, 1.0, -h, h, 5.0, 60.0);
    }

    /// Draw one frame, advancing the shared gear angle by `dt` seconds.
    pub fn render_frame(&mut self, dt: f32) {
        self.angle = (self.angle + SPIN_RATE * dt) % 360.0;

        let Some(gpu) = &self.gpu else {
            debug_assert!(false, "render_frame before rebuild");
            return;
        };

        let light_dir = Vector3::new(5.0_f32, 5.0, 10.0).normalize();
        let view = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -VIEW_DISTANCE))
            * rotation_x(VIEW_ROT_X.to_radians())
            * rotation_y(VIEW_ROT_Y.to_radians());

        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            gl::UseProgram(gpu.program);
            gl::Uniform3fv(gpu.u_light_dir, 1, light_dir.as_slice().as_ptr());
        }

        for ((scene_gear, _), gpu_mesh) in self.models.iter().zip(&gpu.meshes) {
            let spin = (scene_gear.rate * self.angle + scene_gear.phase_deg).to_radians();
            let model = Matrix4::new_translation(&Vector3::new(
                scene_gear.position[0],
                scene_gear.position[1],
                0.0,
            )) * rotation_z(spin);
            let modelview = view * model;
            let mvp = self.projection * modelview;
            // Rotation-and-translation only, so the upper 3x3 is already the
            // correct normal transform.
            let normal_matrix: Matrix3<f32> = modelview.fixed_view::<3, 3>(0, 0).into_owned();

            unsafe {
                gl::UniformMatrix4fv(gpu.u_mvp, 1, gl::FALSE, mvp.as_slice().as_ptr());
                gl::UniformMatrix3fv(gpu.u_normal, 1, gl::FALSE, normal_matrix.as_slice().as_ptr());
                gl::Uniform3fv(gpu.u_color, 1, scene_gear.color.as_ptr());
                gl::BindVertexArray(gpu_mesh.vao);
                gl::DrawArrays(gl::TRIANGLES, 0, gpu_mesh.vertex_count);
            }
        }

        unsafe {
            gl::BindVertexArray(0);
        }
    }
}

fn rotation_x(angle: f32) -> Matrix4<f32> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle).to_homogeneous()
}

fn rotation_y(angle: f32) -> Matrix4<f32> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).to_homogeneous()
}

fn rotation_z(angle: f32) -> Matrix4<f32> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).to_homogeneous()
}

fn upload_mesh(mesh: &Mesh) -> GpuMesh {
    let mut vao = 0;
    let mut vbo = 0;
    unsafe {
        gl::GenVertexArrays(1, &mut vao);
        gl::GenBuffers(1, &mut vbo);
        gl::BindVertexArray(vao);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            bytes.len() as isize,
            bytes.as_ptr().cast(),
            gl::STATIC_DRAW,
        );

        let stride = mem::size_of::<Vertex>() as GLsizei;
        gl::EnableVertexAttribArray(0);
        gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, ptr::null());
        gl::EnableVertexAttribArray(1);
        gl::VertexAttribPointer(
            1,
            3,
            gl::FLOAT,
            gl::FALSE,
            stride,
            (3 * mem::size_of::<f32>()) as *const _,
        );
        gl::BindVertexArray(0);
    }
    GpuMesh {
        vao,
        vbo,
        vertex_count: mesh.vertices.len() as GLsizei,
    }
}

fn uniform_location(program: GLuint, name: &CStr) -> GLint {
    unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
}

fn link_program(vertex_src: &str, fragment_src: &str) -> Result<GLuint, RenderError> {
    let vertex = compile_shader(gl::VERTEX_SHADER, vertex_src)?;
    let fragment = match compile_shader(gl::FRAGMENT_SHADER, fragment_src) {
        Ok(shader) => shader,
        Err(err) => {
            unsafe { gl::DeleteShader(vertex) };
            return Err(err);
        }
    };

    unsafe {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vertex);
        gl::AttachShader(program, fragment);
        gl::LinkProgram(program);
        gl::DeleteShader(vertex);
        gl::DeleteShader(fragment);

        let mut status = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        if status == GLint::from(gl::TRUE) {
            Ok(program)
        } else {
            let info_log = program_info_log(program);
            gl::DeleteProgram(program);
            Err(RenderError::ProgramLink(info_log))
        }
    }
}

fn compile_shader(kind: GLenum, source: &str) -> Result<GLuint, RenderError> {
    unsafe {
        let shader = gl::CreateShader(kind);
        let source_ptr = source.as_ptr().cast();
        let source_len = source.len() as GLint;
        gl::ShaderSource(shader, 1, &source_ptr, &source_len);
        gl::CompileShader(shader);

        let mut status = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        if status == GLint::from(gl::TRUE) {
            Ok(shader)
        } else {
            let info_log = shader_info_log(shader);
            gl::DeleteShader(shader);
            Err(RenderError::ShaderCompile(info_log))
        }
    }
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe {
        gl::GetShaderInfoLog(shader, len, &mut written, buf.as_mut_ptr().cast());
    }
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe {
        gl::GetProgramInfoLog(program, len, &mut written, buf.as_mut_ptr().cast());
    }
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}
