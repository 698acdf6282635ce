//! Pose landmark schema.
//!
//! Frames follow the MediaPipe 33-point pose layout. Raw detector indices are
//! converted to [`JointLabel`] once, when a [`PoseFrame`] is built; everything
//! downstream looks joints up by label.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ImageSize, Point};

/// Number of landmarks in the MediaPipe pose layout.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// MediaPipe pose landmark labels, in detector output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JointLabel {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl JointLabel {
    /// All labels in schema order.
    pub const ALL: [JointLabel; POSE_LANDMARK_COUNT] = [
        JointLabel::Nose,
        JointLabel::LeftEyeInner,
        JointLabel::LeftEye,
        JointLabel::LeftEyeOuter,
        JointLabel::RightEyeInner,
        JointLabel::RightEye,
        JointLabel::RightEyeOuter,
        JointLabel::LeftEar,
        JointLabel::RightEar,
        JointLabel::MouthLeft,
        JointLabel::MouthRight,
        JointLabel::LeftShoulder,
        JointLabel::RightShoulder,
        JointLabel::LeftElbow,
        JointLabel::RightElbow,
        JointLabel::LeftWrist,
        JointLabel::RightWrist,
        JointLabel::LeftPinky,
        JointLabel::RightPinky,
        JointLabel::LeftIndex,
        JointLabel::RightIndex,
        JointLabel::LeftThumb,
        JointLabel::RightThumb,
        JointLabel::LeftHip,
        JointLabel::RightHip,
        JointLabel::LeftKnee,
        JointLabel::RightKnee,
        JointLabel::LeftAnkle,
        JointLabel::RightAnkle,
        JointLabel::LeftHeel,
        JointLabel::RightHeel,
        JointLabel::LeftFootIndex,
        JointLabel::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for JointLabel {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        JointLabel::ALL.get(value).copied().ok_or_else(|| {
            Error::InvalidFrame(format!(
                "landmark index {} outside the {}-point schema",
                value, POSE_LANDMARK_COUNT
            ))
        })
    }
}

/// A raw landmark as emitted by the pose detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }
}

/// A labeled landmark in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Joint {
    pub label: JointLabel,
    pub position: Point,
    /// Detector visibility/confidence in [0, 1].
    pub visibility: f64,
}

impl Joint {
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility > threshold
    }
}

/// All joints detected for one subject in one image.
///
/// Joints are stored in schema order, so the joint for a label lives at the
/// label's index when present. A frame may hold fewer than
/// [`POSE_LANDMARK_COUNT`] joints; such a frame is incomplete and never passes
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoseFrame", into = "RawPoseFrame")]
pub struct PoseFrame {
    image: ImageSize,
    joints: Vec<Joint>,
}

impl PoseFrame {
    /// Build a frame from detector landmarks given in schema order.
    pub fn from_landmarks(landmarks: &[Landmark], image: ImageSize) -> Result<Self> {
        if image.width == 0 || image.height == 0 {
            return Err(Error::InvalidFrame(format!(
                "image size {}x{} has no area",
                image.width, image.height
            )));
        }

        let joints = landmarks
            .iter()
            .enumerate()
            .map(|(i, lm)| {
                Ok(Joint {
                    label: JointLabel::try_from(i)?,
                    position: Point::new(lm.x, lm.y),
                    visibility: lm.visibility,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { image, joints })
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// True when every landmark of the schema is present.
    pub fn is_complete(&self) -> bool {
        self.joints.len() == POSE_LANDMARK_COUNT
    }

    pub fn get(&self, label: JointLabel) -> Option<&Joint> {
        self.joints.get(label.index())
    }

    /// Normalized position of a joint.
    pub fn position(&self, label: JointLabel) -> Option<Point> {
        self.get(label).map(|j| j.position)
    }

    /// Normalized position of a joint the caller cannot do without.
    pub fn require(&self, label: JointLabel) -> Result<Point> {
        self.position(label).ok_or(Error::MissingLandmark(label))
    }

    /// Pixel positions of every joint in schema order, for drawing overlays.
    pub fn pixel_positions(&self) -> Vec<(JointLabel, Point)> {
        self.joints
            .iter()
            .map(|j| (j.label, self.image.to_pixels(j.position)))
            .collect()
    }

    /// Whether a joint is present and its visibility exceeds `threshold`.
    pub fn is_visible(&self, label: JointLabel, threshold: f64) -> bool {
        self.get(label).is_some_and(|j| j.is_visible(threshold))
    }

    /// Normalized midpoint of two required joints.
    pub fn midpoint(&self, a: JointLabel, b: JointLabel) -> Result<Point> {
        Ok(self.require(a)?.midpoint(&self.require(b)?))
    }
}

#[derive(Serialize, Deserialize)]
struct RawPoseFrame {
    image: ImageSize,
    landmarks: Vec<Landmark>,
}

impl From<PoseFrame> for RawPoseFrame {
    fn from(frame: PoseFrame) -> Self {
        let landmarks = frame
            .joints
            .iter()
            .map(|j| Landmark::new(j.position.x, j.position.y, j.visibility))
            .collect();
        Self {
            image: frame.image,
            landmarks,
        }
    }
}

impl TryFrom<RawPoseFrame> for PoseFrame {
    type Error = Error;

    fn try_from(raw: RawPoseFrame) -> Result<Self> {
        PoseFrame::from_landmarks(&raw.landmarks, raw.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_index_round_trip() {
        for (i, label) in JointLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(JointLabel::try_from(i).unwrap(), *label);
        }
        assert!(JointLabel::try_from(POSE_LANDMARK_COUNT).is_err());
    }

    #[test]
    fn too_many_landmarks_is_rejected() {
        let landmarks = vec![Landmark::new(0.5, 0.5, 1.0); POSE_LANDMARK_COUNT + 1];
        let result = PoseFrame::from_landmarks(&landmarks, ImageSize::new(100, 100));
        assert!(matches!(result, Err(Error::InvalidFrame(_))));
    }

    #[test]
    fn empty_image_is_rejected() {
        let landmarks = vec![Landmark::new(0.5, 0.5, 1.0); POSE_LANDMARK_COUNT];
        let result = PoseFrame::from_landmarks(&landmarks, ImageSize::new(0, 100));
        assert!(matches!(result, Err(Error::InvalidFrame(_))));
    }

    #[test]
    fn short_frame_lookups_do_not_panic() {
        let landmarks = vec![Landmark::new(0.5, 0.5, 1.0); 12];
        let frame = PoseFrame::from_landmarks(&landmarks, ImageSize::new(100, 100)).unwrap();

        assert!(!frame.is_complete());
        assert!(frame.get(JointLabel::RightShoulder).is_none());
        assert!(frame.get(JointLabel::LeftShoulder).is_some());
        assert!(!frame.is_visible(JointLabel::LeftAnkle, 0.6));
        assert!(matches!(
            frame.midpoint(JointLabel::LeftShoulder, JointLabel::RightShoulder),
            Err(Error::MissingLandmark(JointLabel::RightShoulder))
        ));
    }

    #[test]
    fn pixel_positions_scale_by_image_size() {
        let mut landmarks = vec![Landmark::new(0.0, 0.0, 1.0); POSE_LANDMARK_COUNT];
        landmarks[JointLabel::Nose.index()] = Landmark::new(0.5, 0.25, 1.0);
        let frame = PoseFrame::from_landmarks(&landmarks, ImageSize::new(640, 480)).unwrap();

        let pixels = frame.pixel_positions();
        assert_eq!(pixels.len(), POSE_LANDMARK_COUNT);
        assert_eq!(
            pixels[JointLabel::Nose.index()],
            (JointLabel::Nose, Point::new(320.0, 120.0))
        );
    }

    #[test]
    fn deserializes_detector_dump() {
        let landmarks: Vec<_> = (0..POSE_LANDMARK_COUNT)
            .map(|_| r#"{"x": 0.5, "y": 0.5, "visibility": 0.9}"#)
            .collect();
        let json = format!(
            r#"{{"image": {{"width": 720, "height": 1280}}, "landmarks": [{}]}}"#,
            landmarks.join(",")
        );

        let frame: PoseFrame = serde_json::from_str(&json).unwrap();
        assert!(frame.is_complete());
        assert_eq!(frame.image(), ImageSize::new(720, 1280));
        assert!(frame.is_visible(JointLabel::RightFootIndex, 0.6));
    }
}
