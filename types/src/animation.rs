/// The only light on an Echo Button.
pub const BUTTON_LIGHT: &str = "1";

/// One entry of a `GadgetController.SetLight` animation list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationStep {
    /// Number of times the sequence is played.
    repeat: u32,

    /// Lights of the gadget the sequence applies to.
    target_lights: Vec<String>,

    /// Frames played in order on every repetition.
    sequence: Vec<AnimationFrame>,
}

impl AnimationStep {
    pub fn new(repeat: u32, sequence: Vec<AnimationFrame>) -> Self {
        Self {
            repeat,
            target_lights: vec![BUTTON_LIGHT.to_string()],
            sequence,
        }
    }

    pub fn with_target_lights(mut self, target_lights: Vec<String>) -> Self {
        self.target_lights = target_lights;
        self
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn target_lights(&self) -> &[String] {
        &self.target_lights
    }

    pub fn sequence(&self) -> &[AnimationFrame] {
        &self.sequence
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationFrame {
    duration_ms: u32,

    /// Blend from the previous frame's color instead of switching immediately.
    blend: bool,

    /// 6-digit hex color, without a marker.
    color: String,
}

impl AnimationFrame {
    pub fn new(duration_ms: u32, blend: bool, color: impl Into<String>) -> Self {
        Self {
            duration_ms,
            blend,
            color: color.into(),
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn blend(&self) -> bool {
        self.blend
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}
