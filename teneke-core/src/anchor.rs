//! Face Anchors
//!
//! Where each container's "head" region sits on the 0-100 canvas. The match
//! is exhaustive, so adding a container without an anchor does not compile.

use serde::Serialize;

use crate::traits::ContainerVariant;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnchor {
    pub eye_y: f64,
    pub mouth_y: f64,
    pub left_eye_x: f64,
    pub right_eye_x: f64,
    pub scale: f64,
}

impl FaceAnchor {
    const fn new(eye_y: f64, mouth_y: f64, left_eye_x: f64, right_eye_x: f64, scale: f64) -> Self {
        Self {
            eye_y,
            mouth_y,
            left_eye_x,
            right_eye_x,
            scale,
        }
    }

    /// Horizontal center between the eyes; mouths are centered here.
    pub fn center_x(&self) -> f64 {
        (self.left_eye_x + self.right_eye_x) / 2.0
    }
}

pub fn anchor_for(container: ContainerVariant) -> FaceAnchor {
    match container {
        ContainerVariant::Classic => FaceAnchor::new(44.0, 62.0, 40.0, 60.0, 1.0),
        ContainerVariant::Crushed => FaceAnchor::new(52.0, 67.0, 40.0, 60.0, 0.9),
        ContainerVariant::TallEnergy => FaceAnchor::new(36.0, 52.0, 43.5, 56.5, 0.75),
        ContainerVariant::Vintage => FaceAnchor::new(48.0, 63.0, 40.0, 60.0, 0.95),
        ContainerVariant::Handled => FaceAnchor::new(52.0, 69.0, 38.0, 62.0, 1.05),
        ContainerVariant::Aerosol => FaceAnchor::new(46.0, 62.0, 42.5, 57.5, 0.8),
        ContainerVariant::Barrel => FaceAnchor::new(49.0, 66.0, 39.0, 61.0, 1.0),
        ContainerVariant::FlatTin => FaceAnchor::new(56.0, 67.0, 38.0, 62.0, 0.8),
        ContainerVariant::Bucket => FaceAnchor::new(50.0, 66.0, 39.5, 60.5, 0.95),
        ContainerVariant::Labeled => FaceAnchor::new(47.0, 62.0, 41.0, 59.0, 0.85),
        ContainerVariant::Rounded => FaceAnchor::new(52.0, 68.0, 39.0, 61.0, 1.0),
        ContainerVariant::Bottle => FaceAnchor::new(53.0, 67.0, 42.0, 58.0, 0.8),
    }
}
