//! Camera, projection and the damped orbit controller.
//!
//! The camera always looks at the controller's target. The controller keeps
//! the camera on a sphere around that target and integrates pending rotation
//! and zoom once per frame, so motion continues to ease out after the input
//! stops.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const EPS: f32 = 0.000001;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P, target: P) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }
}

/// Perspective projection; only the aspect ratio changes at runtime.
#[derive(Debug, Clone)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Rad<f32> {
        self.fovy
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Rotates and zooms the camera around a target with exponential damping.
#[derive(Debug, Clone)]
pub struct OrbitController {
    pub target: Point3<f32>,
    damping_factor: f32,
    enable_zoom: bool,
    rotate_speed: f32,
    zoom_speed: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
    dragging: bool,
    cursor: Option<(f64, f64)>,
    viewport_height: f32,
}

impl OrbitController {
    pub fn new(config: &CameraConfig, viewport_height: u32) -> Self {
        Self {
            target: Point3::new(0.0, 0.0, 0.0),
            damping_factor: config.damping_factor,
            enable_zoom: config.enable_zoom,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
            dragging: false,
            cursor: None,
            viewport_height: viewport_height.max(1) as f32,
        }
    }

    /// Queue a rotation for a pointer drag of `dx`/`dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let full_turn = 2.0 * std::f32::consts::PI * self.rotate_speed / self.viewport_height;
        self.theta_delta -= dx * full_turn;
        self.phi_delta -= dy * full_turn;
    }

    /// Queue a zoom; positive steps move the camera closer.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enable_zoom || steps == 0.0 {
            return;
        }
        let zoom_scale = 0.95f32.powf(self.zoom_speed);
        if steps > 0.0 {
            self.scale *= zoom_scale;
        } else {
            self.scale /= zoom_scale;
        }
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized(size) => self.viewport_height = size.height.max(1) as f32,
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((x, y))) = (self.dragging, self.cursor) {
                    self.rotate((position.x - x) as f32, (position.y - y) as f32);
                }
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.zoom(*y),
                MouseScrollDelta::PixelDelta(pos) => self.zoom(pos.y as f32),
            },
            _ => (),
        }
    }

    /// Advance the damping integration by one frame.
    ///
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.position - self.target;
        let mut radius = offset.magnitude();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        theta += self.theta_delta * self.damping_factor;
        phi += self.phi_delta * self.damping_factor;
        phi = phi.clamp(EPS, std::f32::consts::PI - EPS);
        radius = (radius * self.scale).max(EPS);

        let sin_phi_radius = phi.sin() * radius;
        let new_offset = Vector3::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        );
        let moved = (new_offset - offset).magnitude2() > EPS * EPS;
        camera.position = self.target + new_offset;
        camera.target = self.target;

        self.theta_delta *= 1.0 - self.damping_factor;
        self.phi_delta *= 1.0 - self.damping_factor;
        self.scale = 1.0;
        moved
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view = camera.calc_matrix().into();
        self.proj = projection.calc_matrix().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
