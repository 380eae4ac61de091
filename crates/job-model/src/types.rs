use mesh_kernel::{Transform, Vec3};
use serde::{Deserialize, Serialize};
use stl_format::{StlFormat, DEFAULT_SOLID_NAME};
use uuid::Uuid;

use crate::errors::ParseError;

/// Orientation applied to a template after scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    Identity,
    /// Rotations in degrees about the fixed X, Y and Z axes, applied in that order.
    Euler { degrees: Vec3 },
    /// Rotation in degrees about an arbitrary axis through the template origin.
    AxisAngle { axis: Vec3, degrees: f64 },
}

impl Rotation {
    pub fn is_identity(&self) -> bool {
        match self {
            Rotation::Identity => true,
            Rotation::Euler { degrees } => *degrees == Vec3::ZERO,
            Rotation::AxisAngle { degrees, .. } => *degrees == 0.0,
        }
    }

    /// Rotation as a matrix. A zero-length axis yields the identity.
    pub fn to_transform(&self) -> Transform {
        match self {
            Rotation::Identity => Transform::identity(),
            Rotation::Euler { degrees } => Transform::rotation_x(degrees.x.to_radians())
                .then(&Transform::rotation_y(degrees.y.to_radians()))
                .then(&Transform::rotation_z(degrees.z.to_radians())),
            Rotation::AxisAngle { axis, degrees } => {
                Transform::rotation_axis_angle(*axis, degrees.to_radians())
                    .unwrap_or_else(Transform::identity)
            }
        }
    }
}

/// One template instance inside a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Catalog key of the template.
    pub template: String,
    pub offset: Vec3,
    /// Per-axis scale about the template origin; every component is >= 0.
    pub scale: Vec3,
    pub rotation: Rotation,
}

impl Placement {
    /// Placement at the origin with unit scale and no rotation.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            offset: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Rotation::Identity,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Scale, then rotate, then translate.
    pub fn transform(&self) -> Transform {
        Transform::from_scale_vec(self.scale)
            .then(&self.rotation.to_transform())
            .then(&Transform::from_translation_vec(self.offset))
    }

    pub fn is_identity(&self) -> bool {
        self.offset == Vec3::ZERO && self.scale == Vec3::ONE && self.rotation.is_identity()
    }

    pub fn has_uniform_scale(&self) -> bool {
        self.scale.x == self.scale.y && self.scale.y == self.scale.z
    }
}

/// A parsed layout request. Built once, consumed once by assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    id: String,
    name: String,
    format: StlFormat,
    placements: Vec<Placement>,
}

impl JobDescriptor {
    /// Job with a fresh random id, the default solid name and ASCII output.
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_SOLID_NAME.to_string(),
            format: StlFormat::default(),
            placements,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = stl_format::solid_name(name);
        self
    }

    pub fn with_format(mut self, format: StlFormat) -> Self {
        self.format = format;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> StlFormat {
        self.format
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

/// Parser output: the job plus any soft failures that were absorbed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedJob {
    pub job: JobDescriptor,
    pub warnings: Vec<ParseError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mesh_kernel::Point3;

    fn assert_close(a: Point3, b: Point3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn default_placement_is_identity() {
        let p = Placement::new("panel");
        assert!(p.is_identity());
        assert!(p.transform().is_identity());
    }

    #[test]
    fn transform_order_is_scale_rotate_translate() {
        let p = Placement::new("panel")
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_rotation(Rotation::Euler {
                degrees: Vec3::new(0.0, 0.0, 90.0),
            })
            .with_offset(Vec3::new(10.0, 0.0, 0.0));
        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (10,2,0)
        let out = p.transform().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_close(out, Point3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn euler_applies_x_then_z() {
        let r = Rotation::Euler {
            degrees: Vec3::new(90.0, 0.0, 90.0),
        };
        // Y axis: about X by 90 -> Z; about Z by 90 leaves Z alone.
        let out = r.to_transform().transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_close(out, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn axis_angle_about_z() {
        let r = Rotation::AxisAngle {
            axis: Vec3::new(0.0, 0.0, 5.0),
            degrees: 180.0,
        };
        let out = r.to_transform().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_close(out, Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn uniform_scale_detection() {
        assert!(Placement::new("a").has_uniform_scale());
        assert!(!Placement::new("a")
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .has_uniform_scale());
    }

    #[test]
    fn job_defaults() {
        let a = JobDescriptor::new(vec![]);
        let b = JobDescriptor::new(vec![]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), DEFAULT_SOLID_NAME);
        assert_eq!(a.format(), StlFormat::Ascii);
        assert_eq!(a.with_name("two words").name(), "two_words");
    }
}
