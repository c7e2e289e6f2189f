use serde::{Deserialize, Serialize};

/// Physical goal we can aim at.
///
/// Both goals are hollow rectangular frames 62 in wide; they differ only in
/// height, so the width/height ratio tells them apart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetClass {
    High,
    #[default]
    Middle,
}

impl TargetClass {
    pub const ALL: [TargetClass; 2] = [TargetClass::High, TargetClass::Middle];

    /// Template long/short side ratio of the goal frame.
    #[inline]
    pub fn ideal_aspect_ratio(self) -> f64 {
        match self {
            TargetClass::High => 62.0 / 20.0,
            TargetClass::Middle => 62.0 / 29.0,
        }
    }
}

impl std::fmt::Display for TargetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetClass::High => f.write_str("high"),
            TargetClass::Middle => f.write_str("middle"),
        }
    }
}
