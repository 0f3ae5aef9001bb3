//! Geometry for the full-roster effect: where each of the five cards sits,
//! how big it is and how it moves in every stage.
//!
//! Units are logical pixels; renderers scale them
//! down to whatever grid they draw on.

use crate::FullRosterStage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn classify(width: u16, narrow_below: u16) -> Self {
        if width < narrow_below {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    pub fn base_offset(self) -> f32 {
        match self {
            ViewportClass::Narrow => 80.0,
            ViewportClass::Wide => 140.0,
        }
    }

    pub fn container_scale(self) -> f32 {
        match self {
            ViewportClass::Narrow => 0.5,
            ViewportClass::Wide => 0.75,
        }
    }
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const STANDARD: Self = Self::new(0.4, 0.0, 0.2, 1.0);
    pub const OVERSHOOT: Self = Self::new(0.34, 1.56, 0.64, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased value for linear progress `t`. `x1`/`x2` stay in `0..=1`, so the
    /// x curve is monotonic and bisection is enough.
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..32 {
            let mid = (lo + hi) * 0.5;
            if bezier_coord(self.x1, self.x2, mid) < t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        bezier_coord(self.y1, self.y2, (lo + hi) * 0.5)
    }
}

fn bezier_coord(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl CardPose {
    pub const HIDDEN: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 0.0,
        opacity: 0.0,
    };

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0
    }

    fn lerp(from: Self, to: Self, k: f32) -> Self {
        let mix = |a: f32, b: f32| a * (1.0 - k) + b * k;
        Self {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            scale: mix(from.scale, to.scale).max(0.0),
            opacity: mix(from.opacity, to.opacity).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration_ms: u64,
    pub easing: CubicBezier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullRosterLayout {
    pub viewport: ViewportClass,
}

impl FullRosterLayout {
    pub fn new(viewport: ViewportClass) -> Self {
        Self { viewport }
    }

    pub fn container_scale(&self) -> f32 {
        self.viewport.container_scale()
    }

    /// Spread position of slot `0..5`, centered on slot 2.
    pub fn rest_pose(&self, slot: usize) -> CardPose {
        let offset = self.viewport.base_offset();
        CardPose {
            x: (slot as f32 - 2.0) * offset,
            y: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    pub fn target_pose(&self, stage: FullRosterStage, slot: usize) -> CardPose {
        match stage {
            FullRosterStage::Merging => CardPose {
                x: 0.0,
                y: 0.0,
                scale: 0.3,
                opacity: 0.0,
            },
            FullRosterStage::Flash | FullRosterStage::Champion => CardPose::HIDDEN,
            FullRosterStage::Initial
            | FullRosterStage::Splitting
            | FullRosterStage::Upgraded
            | FullRosterStage::Done => self.rest_pose(slot),
        }
    }

    pub fn transition(stage: FullRosterStage) -> Option<Transition> {
        match stage {
            FullRosterStage::Merging => Some(Transition {
                duration_ms: 1200,
                easing: CubicBezier::STANDARD,
            }),
            FullRosterStage::Splitting => Some(Transition {
                duration_ms: 1000,
                easing: CubicBezier::OVERSHOOT,
            }),
            _ => None,
        }
    }

    /// Pose `elapsed_ms` after entering `stage`, animating from the previous
    /// stage's resting pose when the stage has a transition.
    pub fn pose_at(&self, stage: FullRosterStage, slot: usize, elapsed_ms: u64) -> CardPose {
        let target = self.target_pose(stage, slot);
        let Some(transition) = Self::transition(stage) else {
            return target;
        };
        let from = match stage.previous() {
            Some(previous) => self.target_pose(previous, slot),
            None => target,
        };
        let linear = if transition.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f32 / transition.duration_ms as f32).clamp(0.0, 1.0)
        };
        CardPose::lerp(from, target, transition.easing.sample(linear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_width_threshold() {
        assert_eq!(ViewportClass::classify(99, 100), ViewportClass::Narrow);
        assert_eq!(ViewportClass::classify(100, 100), ViewportClass::Wide);
    }

    #[test]
    fn rest_poses_spread_symmetrically() {
        let wide = FullRosterLayout::new(ViewportClass::Wide);
        let xs: Vec<f32> = (0..5).map(|slot| wide.rest_pose(slot).x).collect();
        assert_eq!(xs, vec![-280.0, -140.0, 0.0, 140.0, 280.0]);
        let narrow = FullRosterLayout::new(ViewportClass::Narrow);
        assert_eq!(narrow.rest_pose(0).x, -160.0);
        assert_eq!(narrow.container_scale(), 0.5);
    }

    #[test]
    fn easing_hits_endpoints() {
        for curve in [CubicBezier::STANDARD, CubicBezier::OVERSHOOT] {
            assert_eq!(curve.sample(0.0), 0.0);
            assert_eq!(curve.sample(1.0), 1.0);
        }
        let mid = CubicBezier::STANDARD.sample(0.5);
        assert!(mid > 0.5 && mid < 1.0, "standard easing front-loads motion: {mid}");
    }

    #[test]
    fn overshoot_passes_the_target() {
        let peak = (1..100)
            .map(|step| CubicBezier::OVERSHOOT.sample(step as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0, "peak {peak}");
    }

    #[test]
    fn merging_moves_from_rest_to_center() {
        let layout = FullRosterLayout::new(ViewportClass::Wide);
        let start = layout.pose_at(FullRosterStage::Merging, 0, 0);
        assert_eq!(start, layout.rest_pose(0));
        let end = layout.pose_at(FullRosterStage::Merging, 0, 1200);
        assert_eq!(end.x, 0.0);
        assert_eq!(end.scale, 0.3);
        assert_eq!(end.opacity, 0.0);
        assert!(!end.is_visible());
    }

    #[test]
    fn hidden_while_the_champion_frame_shows() {
        let layout = FullRosterLayout::new(ViewportClass::Wide);
        for slot in 0..5 {
            assert!(!layout.pose_at(FullRosterStage::Flash, slot, 100).is_visible());
            assert!(!layout.pose_at(FullRosterStage::Champion, slot, 100).is_visible());
        }
    }

    #[test]
    fn splitting_settles_on_rest_pose() {
        let layout = FullRosterLayout::new(ViewportClass::Narrow);
        assert!(!layout.pose_at(FullRosterStage::Splitting, 4, 0).is_visible());
        assert_eq!(
            layout.pose_at(FullRosterStage::Splitting, 4, 1000),
            layout.rest_pose(4)
        );
        assert_eq!(
            layout.pose_at(FullRosterStage::Upgraded, 4, 0),
            layout.rest_pose(4)
        );
    }
}
