//! Room geometry and the camera orbit.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::section::Section;

pub mod palette {
    pub const WALL: &str = "#F9F8F6";
    pub const FLOOR: &str = "#EBE5DF";
    pub const WOOD_LIGHT: &str = "#D9C5B2";
    pub const WOOD_DARK: &str = "#8B7355";
    pub const FABRIC_WHITE: &str = "#FAFAFA";
    pub const FABRIC_SAGE: &str = "#A9B3A7";
    pub const BLACK: &str = "#2C2B2A";
    pub const CANVAS: &str = "#EAE6E1";
    pub const SCREEN: &str = "#E0E0E0";
    pub const SCREEN_BASE: &str = "#D0D0D0";
    pub const KEYS: &str = "#FFFFFF";
    pub const BOOKS: [&str; 4] = ["#CDBDA7", "#97A096", "#E2DCD3", "#8C7A6B"];
}

/// Whole room is lowered so the floor sits below the camera target.
pub const ROOM_OFFSET: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const LABEL_HEIGHT: f32 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Sphere { radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPart {
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Vec3,
    pub color: &'static str,
}

impl MeshPart {
    fn cuboid(size: [f32; 3], position: [f32; 3], color: &'static str) -> Self {
        Self {
            shape: Shape::Cuboid {
                size: Vec3::from_array(size),
            },
            position: Vec3::from_array(position),
            rotation: Vec3::ZERO,
            color,
        }
    }

    fn sphere(radius: f32, position: [f32; 3], color: &'static str) -> Self {
        Self {
            shape: Shape::Sphere { radius },
            position: Vec3::from_array(position),
            rotation: Vec3::ZERO,
            color,
        }
    }

    fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = Vec3::from_array(rotation);
        self
    }
}

/// A selectable piece of furniture bound to one section.
#[derive(Clone, Copy)]
pub struct InteractiveObject {
    pub section: Section,
    pub label: &'static str,
    pub base_position: Vec3,
    pub base_rotation: Vec3,
    pub geometry: fn() -> Vec<MeshPart>,
}

pub fn interactive_objects() -> [InteractiveObject; 4] {
    [
        InteractiveObject {
            section: Section::About,
            label: Section::About.label(),
            base_position: Vec3::new(-2.0, 0.0, -1.0),
            base_rotation: Vec3::new(0.0, 0.2, 0.0),
            geometry: bed,
        },
        InteractiveObject {
            section: Section::Works,
            label: Section::Works.label(),
            base_position: Vec3::new(2.0, 0.0, 0.0),
            base_rotation: Vec3::new(0.0, -0.3, 0.0),
            geometry: desk,
        },
        InteractiveObject {
            section: Section::Skills,
            label: Section::Skills.label(),
            base_position: Vec3::new(-3.0, 0.0, 2.0),
            base_rotation: Vec3::new(0.0, PI / 2.5, 0.0),
            geometry: bookshelf,
        },
        InteractiveObject {
            section: Section::Vision,
            label: Section::Vision.label(),
            base_position: Vec3::new(0.0, 2.5, -2.8),
            base_rotation: Vec3::ZERO,
            geometry: painting,
        },
    ]
}

pub fn walls() -> Vec<MeshPart> {
    vec![
        MeshPart::cuboid([10.0, 6.0, 0.2], [0.0, 2.0, -3.0], palette::WALL),
        MeshPart::cuboid([6.0, 6.0, 0.2], [-4.0, 2.0, 0.0], palette::WALL).rotated([0.0, FRAC_PI_2, 0.0]),
        MeshPart::cuboid([9.0, 0.05, 8.0], [0.5, -0.025, 1.0], palette::FLOOR),
    ]
}

fn bed() -> Vec<MeshPart> {
    vec![
        MeshPart::cuboid([2.2, 0.2, 3.2], [0.0, 0.3, 0.0], palette::WOOD_LIGHT),
        MeshPart::cuboid([2.2, 1.0, 0.2], [0.0, 0.8, -1.5], palette::WOOD_LIGHT),
        MeshPart::cuboid([2.0, 0.3, 2.8], [0.0, 0.5, 0.1], palette::FABRIC_WHITE),
        MeshPart::cuboid([2.05, 0.31, 1.8], [0.0, 0.52, 0.6], palette::FABRIC_SAGE),
        MeshPart::cuboid([0.7, 0.15, 0.5], [-0.5, 0.7, -1.1], palette::FABRIC_WHITE).rotated([0.2, 0.0, 0.0]),
        MeshPart::cuboid([0.7, 0.15, 0.5], [0.5, 0.7, -1.1], palette::FABRIC_WHITE).rotated([0.2, 0.0, 0.0]),
    ]
}

fn desk() -> Vec<MeshPart> {
    let mut parts = vec![MeshPart::cuboid([2.5, 0.1, 1.2], [0.0, 1.3, 0.0], palette::WOOD_DARK)];
    for (x, z) in [(-1.1, -0.4), (1.1, -0.4), (-1.1, 0.4), (1.1, 0.4)] {
        parts.push(MeshPart::cuboid([0.1, 1.3, 0.1], [x, 0.65, z], palette::BLACK));
    }
    parts.extend([
        MeshPart::cuboid([0.9, 0.6, 0.05], [0.0, 1.5, -0.2], palette::SCREEN).rotated([0.1, 0.0, 0.0]),
        MeshPart::cuboid([0.3, 0.1, 0.2], [0.0, 1.35, -0.3], palette::SCREEN_BASE),
        MeshPart::cuboid([0.6, 0.02, 0.2], [0.0, 1.36, 0.2], palette::KEYS),
        MeshPart::cuboid([0.1, 0.02, 0.15], [0.5, 1.36, 0.2], palette::KEYS),
    ]);
    parts
}

fn bookshelf() -> Vec<MeshPart> {
    let mut parts = vec![
        MeshPart::cuboid([1.5, 3.0, 0.5], [0.0, 1.5, 0.0], palette::WOOD_LIGHT),
        MeshPart::cuboid([1.3, 2.8, 0.4], [0.0, 1.5, 0.1], palette::WOOD_DARK),
    ];
    for y in [0.8, 1.5, 2.2] {
        parts.push(MeshPart::cuboid([1.3, 0.05, 0.4], [0.0, y, 0.1], palette::WOOD_LIGHT));
    }
    parts.extend([
        MeshPart::cuboid([0.15, 0.35, 0.25], [-0.4, 1.0, 0.1], palette::BOOKS[0]),
        MeshPart::cuboid([0.1, 0.4, 0.25], [-0.2, 1.0, 0.1], palette::BOOKS[1]),
        MeshPart::cuboid([0.1, 0.35, 0.25], [0.3, 1.7, 0.1], palette::BOOKS[2]).rotated([0.0, 0.0, 0.2]),
        MeshPart::cuboid([0.12, 0.3, 0.25], [0.45, 2.35, 0.1], palette::BOOKS[3]),
    ]);
    parts
}

fn painting() -> Vec<MeshPart> {
    vec![
        MeshPart::cuboid([1.8, 2.2, 0.1], [0.0, 0.0, 0.0], palette::BLACK),
        MeshPart::cuboid([1.6, 2.0, 0.02], [0.0, 0.0, 0.06], palette::CANVAS),
        MeshPart::sphere(0.4, [0.0, -0.3, 0.08], palette::WOOD_DARK),
        MeshPart::cuboid([0.5, 0.5, 0.02], [0.2, 0.4, 0.08], palette::FABRIC_SAGE),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConstraints {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub damping: f32,
}

impl Default for OrbitConstraints {
    fn default() -> Self {
        Self {
            min_polar: FRAC_PI_4,
            max_polar: FRAC_PI_2 - 0.1,
            min_azimuth: -FRAC_PI_4,
            max_azimuth: FRAC_PI_4,
            damping: 0.05,
        }
    }
}

/// Radians of rotation per pixel dragged.
const ORBIT_DRAG_SPEED: f32 = 0.005;
const ORBIT_VELOCITY_EPSILON: f32 = 1.0e-5;

/// Camera orbit around the room centre with damped drag rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    velocity_polar: f32,
    velocity_azimuth: f32,
    constraints: OrbitConstraints,
}

impl Orbit {
    pub fn from_camera_position(position: Vec3, constraints: OrbitConstraints) -> Self {
        let radius = position.length().max(1.0e-3);
        let polar = (position.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = position.x.atan2(position.z);
        Self {
            radius,
            polar: polar.clamp(constraints.min_polar, constraints.max_polar),
            azimuth: azimuth.clamp(constraints.min_azimuth, constraints.max_azimuth),
            velocity_polar: 0.0,
            velocity_azimuth: 0.0,
            constraints,
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * sin_polar * sin_azimuth,
            self.radius * cos_polar,
            self.radius * sin_polar * cos_azimuth,
        )
    }

    /// Feeds a pointer drag; dragging right swings the camera left around the room.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.velocity_azimuth -= dx * ORBIT_DRAG_SPEED;
        self.velocity_polar -= dy * ORBIT_DRAG_SPEED;
    }

    /// Returns `true` while the camera is still moving.
    pub fn tick(&mut self) -> bool {
        if self.velocity_azimuth.abs() < ORBIT_VELOCITY_EPSILON
            && self.velocity_polar.abs() < ORBIT_VELOCITY_EPSILON
        {
            self.velocity_azimuth = 0.0;
            self.velocity_polar = 0.0;
            return false;
        }

        let damping = self.constraints.damping;
        let azimuth_step = self.velocity_azimuth * damping;
        let polar_step = self.velocity_polar * damping;
        self.azimuth = (self.azimuth + azimuth_step)
            .clamp(self.constraints.min_azimuth, self.constraints.max_azimuth);
        self.polar = (self.polar + polar_step).clamp(self.constraints.min_polar, self.constraints.max_polar);
        self.velocity_azimuth -= azimuth_step;
        self.velocity_polar -= polar_step;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_exactly_one_object() {
        let objects = interactive_objects();
        for section in Section::ALL {
            assert_eq!(objects.iter().filter(|object| object.section == section).count(), 1);
        }
    }

    #[test]
    fn object_geometry_is_not_empty() {
        for object in interactive_objects() {
            assert!(!(object.geometry)().is_empty(), "{} has no parts", object.section);
        }
    }

    #[test]
    fn reference_camera_is_inside_orbit_limits() {
        let constraints = OrbitConstraints::default();
        let orbit = Orbit::from_camera_position(Vec3::new(0.0, 4.0, 8.0), constraints);
        let position = orbit.camera_position();

        assert!((position - Vec3::new(0.0, 4.0, 8.0)).length() < 1e-3);
        assert!(orbit.polar >= constraints.min_polar && orbit.polar <= constraints.max_polar);
    }

    #[test]
    fn drag_never_leaves_the_frontal_cone() {
        let constraints = OrbitConstraints::default();
        let mut orbit = Orbit::from_camera_position(Vec3::new(0.0, 4.0, 8.0), constraints);
        orbit.drag(-100_000.0, 100_000.0);
        for _ in 0..2_000 {
            orbit.tick();
        }

        assert!((orbit.azimuth - constraints.max_azimuth).abs() < 1e-6);
        assert!((orbit.polar - constraints.min_polar).abs() < 1e-6);
    }

    #[test]
    fn drag_velocity_decays_to_rest() {
        let mut orbit = Orbit::from_camera_position(Vec3::new(0.0, 4.0, 8.0), OrbitConstraints::default());
        orbit.drag(4.0, 0.0);
        let mut frames = 0;
        while orbit.tick() {
            frames += 1;
            assert!(frames < 10_000);
        }
        assert!(orbit.azimuth < 0.0);
    }
}
