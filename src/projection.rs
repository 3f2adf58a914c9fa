//! Flat-shaded perspective projection of the room into 2D primitives that the
//! front end draws as SVG. Faces are back-face culled and ordered back to
//! front (painter's algorithm); each selectable object stays one group so
//! pointer events can attach to it as a whole.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::motion::ObjectTransform;
use crate::scene::{self, InteractiveObject, MeshPart, Shape, LABEL_HEIGHT, ROOM_OFFSET};
use crate::section::Section;

const AMBIENT: f32 = 0.62;
const DIFFUSE: f32 = 0.42;
const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 8.0, 3.0);

// corner index order: x bit 0, y bit 1, z bit 2 over a unit cube centred at 0
const CUBOID_FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn looking_at_origin(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            fov_y: 40.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Polygon { points: Vec<Vec2> },
    Circle { center: Vec2, radius: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub primitive: Primitive,
    pub fill: String,
    pub depth: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedGroup {
    pub owner: Option<Section>,
    pub faces: Vec<Face>,
    pub depth: f32,
    pub label_anchor: Option<Vec2>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedScene {
    pub backdrop: ProjectedGroup,
    /// Far to near.
    pub objects: Vec<ProjectedGroup>,
}

struct Projector {
    view: Mat4,
    view_projection: Mat4,
    viewport: Viewport,
    eye: Vec3,
    near: f32,
    focal: f32,
    light_dir: Vec3,
}

impl Projector {
    fn new(camera: &Camera, viewport: Viewport) -> Self {
        let width = viewport.width.max(1.0);
        let height = viewport.height.max(1.0);
        let view = Mat4::look_at_rh(camera.eye, camera.target, Vec3::Y);
        let projection = Mat4::perspective_rh(camera.fov_y, width / height, camera.near, camera.far);
        Self {
            view,
            view_projection: projection * view,
            viewport: Viewport { width, height },
            eye: camera.eye,
            near: camera.near,
            focal: (height * 0.5) / (camera.fov_y * 0.5).tan(),
            light_dir: LIGHT_POSITION.normalize(),
        }
    }

    /// Screen position and view depth, or `None` when behind the near plane.
    fn project(&self, point: Vec3) -> Option<(Vec2, f32)> {
        let clip = self.view_projection * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let screen = Vec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.width,
            (1.0 - ndc_y) * 0.5 * self.viewport.height,
        );
        Some((screen, self.view_depth(point)))
    }

    fn view_depth(&self, point: Vec3) -> f32 {
        -self.view.transform_point3(point).z
    }

    fn shade(&self, color: &str, normal: Vec3) -> String {
        let lambert = normal.dot(self.light_dir).max(0.0);
        shade_hex(color, AMBIENT + DIFFUSE * lambert)
    }

    fn project_part(&self, parent: &Mat4, part: &MeshPart, faces: &mut Vec<Face>) {
        let rotation = Quat::from_euler(EulerRot::XYZ, part.rotation.x, part.rotation.y, part.rotation.z);
        match part.shape {
            Shape::Cuboid { size } => {
                let local = Mat4::from_scale_rotation_translation(size, rotation, part.position);
                let world = *parent * local;
                let corners: [Vec3; 8] = std::array::from_fn(|index| {
                    let x = if index & 1 == 0 { -0.5 } else { 0.5 };
                    let y = if index & 2 == 0 { -0.5 } else { 0.5 };
                    let z = if index & 4 == 0 { -0.5 } else { 0.5 };
                    world.transform_point3(Vec3::new(x, y, z))
                });
                for face in CUBOID_FACES {
                    self.project_quad(&corners, face, part.color, faces);
                }
            }
            Shape::Sphere { radius } => {
                let world = *parent * Mat4::from_rotation_translation(rotation, part.position);
                let center = world.transform_point3(Vec3::ZERO);
                let world_radius = radius * world.x_axis.truncate().length();
                let Some((screen, depth)) = self.project(center) else {
                    return;
                };
                let toward_eye = (self.eye - center).normalize_or_zero();
                faces.push(Face {
                    primitive: Primitive::Circle {
                        center: screen,
                        radius: world_radius * self.focal / depth.max(self.near),
                    },
                    fill: self.shade(part.color, toward_eye),
                    depth,
                });
            }
        }
    }

    fn project_quad(&self, corners: &[Vec3; 8], face: [usize; 4], color: &str, faces: &mut Vec<Face>) {
        let quad = face.map(|index| corners[index]);
        let normal = (quad[1] - quad[0]).cross(quad[3] - quad[0]).normalize_or_zero();
        let center = (quad[0] + quad[1] + quad[2] + quad[3]) * 0.25;
        if normal.dot(self.eye - center) <= 0.0 {
            return;
        }

        let mut points = Vec::with_capacity(4);
        for corner in quad {
            let Some((screen, _)) = self.project(corner) else {
                return;
            };
            points.push(screen);
        }

        faces.push(Face {
            primitive: Primitive::Polygon { points },
            fill: self.shade(color, normal),
            depth: self.view_depth(center),
        });
    }
}

fn sort_far_to_near(faces: &mut [Face]) {
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Projects the backdrop and every object posed by its current transform.
pub fn project_scene(
    camera: &Camera,
    viewport: Viewport,
    objects: &[(InteractiveObject, ObjectTransform)],
) -> ProjectedScene {
    let projector = Projector::new(camera, viewport);
    let room = Mat4::from_translation(ROOM_OFFSET);

    let mut backdrop_faces = Vec::new();
    for part in scene::walls() {
        projector.project_part(&room, &part, &mut backdrop_faces);
    }
    sort_far_to_near(&mut backdrop_faces);

    let mut groups: Vec<ProjectedGroup> = objects
        .iter()
        .map(|(object, transform)| {
            let origin = Vec3::new(object.base_position.x, transform.y, object.base_position.z);
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                object.base_rotation.x,
                object.base_rotation.y,
                object.base_rotation.z,
            );
            let world = room
                * Mat4::from_scale_rotation_translation(Vec3::splat(transform.scale), rotation, origin);

            let mut faces = Vec::new();
            for part in (object.geometry)() {
                projector.project_part(&world, &part, &mut faces);
            }
            sort_far_to_near(&mut faces);

            let world_origin = world.transform_point3(Vec3::ZERO);
            let label_anchor = projector
                .project(world.transform_point3(Vec3::new(0.0, LABEL_HEIGHT, 0.0)))
                .map(|(screen, _)| screen);

            ProjectedGroup {
                owner: Some(object.section),
                faces,
                depth: projector.view_depth(world_origin),
                label_anchor,
            }
        })
        .collect();
    groups.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    ProjectedScene {
        backdrop: ProjectedGroup {
            owner: None,
            faces: backdrop_faces,
            depth: f32::INFINITY,
            label_anchor: None,
        },
        objects: groups,
    }
}

/// Scales an `#RRGGBB` colour by `factor`, clamped to the displayable range.
/// Unparseable colours pass through unchanged.
pub fn shade_hex(color: &str, factor: f32) -> String {
    let Some(hex) = color.strip_prefix('#').filter(|hex| hex.len() == 6 && hex.is_ascii()) else {
        return color.to_string();
    };
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    let (Some(r), Some(g), Some(b)) = (channel(0..2), channel(2..4), channel(4..6)) else {
        return color.to_string();
    };
    let scale = |value: u8| (f32::from(value) * factor).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}

impl Primitive {
    /// SVG `points` attribute for polygons.
    pub fn svg_points(&self) -> Option<String> {
        match self {
            Self::Polygon { points } => Some(
                points
                    .iter()
                    .map(|point| format!("{:.1},{:.1}", point.x, point.y))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Self::Circle { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::interactive_objects;

    fn viewport() -> Viewport {
        Viewport {
            width: 1200.0,
            height: 800.0,
        }
    }

    fn at_rest() -> Vec<(InteractiveObject, ObjectTransform)> {
        interactive_objects()
            .into_iter()
            .map(|object| (object, ObjectTransform::at_rest(object.base_position.y)))
            .collect()
    }

    #[test]
    fn target_projects_to_viewport_centre() {
        let projector = Projector::new(&Camera::looking_at_origin(Vec3::new(0.0, 4.0, 8.0)), viewport());
        let (screen, depth) = projector.project(Vec3::ZERO).expect("origin in front of camera");

        assert!((screen.x - 600.0).abs() < 1e-3);
        assert!((screen.y - 400.0).abs() < 1e-3);
        assert!((depth - Vec3::new(0.0, 4.0, 8.0).length()).abs() < 1e-3);
    }

    #[test]
    fn points_behind_the_camera_are_dropped() {
        let projector = Projector::new(&Camera::looking_at_origin(Vec3::new(0.0, 0.0, 8.0)), viewport());
        assert!(projector.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn a_cube_shows_at_most_three_faces() {
        let projector = Projector::new(&Camera::looking_at_origin(Vec3::new(3.0, 4.0, 8.0)), viewport());
        let part = MeshPart {
            shape: Shape::Cuboid { size: Vec3::ONE },
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            color: "#808080",
        };
        let mut faces = Vec::new();
        projector.project_part(&Mat4::IDENTITY, &part, &mut faces);

        assert_eq!(faces.len(), 3);
    }

    #[test]
    fn every_object_produces_a_group_sorted_far_to_near() {
        let scene = project_scene(
            &Camera::looking_at_origin(Vec3::new(0.0, 4.0, 8.0)),
            viewport(),
            &at_rest(),
        );

        assert_eq!(scene.objects.len(), 4);
        assert!(!scene.backdrop.faces.is_empty());
        for pair in scene.objects.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
        }
        for group in &scene.objects {
            assert!(!group.faces.is_empty());
            assert!(group.label_anchor.is_some());
            for pair in group.faces.windows(2) {
                assert!(pair[0].depth >= pair[1].depth);
            }
        }
        // the painting hangs on the back wall, the bookshelf stands up front
        assert_eq!(scene.objects[0].owner, Some(Section::Vision));
        assert_eq!(scene.objects[3].owner, Some(Section::Skills));
    }

    #[test]
    fn lifting_an_object_moves_its_label_up_the_screen() {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 4.0, 8.0));
        let mut objects = at_rest();
        let resting = project_scene(&camera, viewport(), &objects);
        objects[1].1.y += 0.1;
        let lifted = project_scene(&camera, viewport(), &objects);

        let anchor = |scene: &ProjectedScene| {
            scene
                .objects
                .iter()
                .find(|group| group.owner == Some(Section::Works))
                .and_then(|group| group.label_anchor)
                .expect("works label")
        };
        assert!(anchor(&lifted).y < anchor(&resting).y);
    }

    #[test]
    fn shade_hex_scales_and_clamps() {
        assert_eq!(shade_hex("#808080", 0.5), "#404040");
        assert_eq!(shade_hex("#F0F0F0", 2.0), "#ffffff");
        assert_eq!(shade_hex("tomato", 0.5), "tomato");
        assert_eq!(shade_hex("#a€aa", 0.5), "#a€aa");
    }

    #[test]
    fn polygon_points_format_for_svg() {
        let primitive = Primitive::Polygon {
            points: vec![Vec2::new(1.0, 2.0), Vec2::new(3.26, 4.5)],
        };
        assert_eq!(primitive.svg_points().as_deref(), Some("1.0,2.0 3.3,4.5"));
    }
}
