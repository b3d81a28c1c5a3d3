use super::color::{InvalidColor, Rgb};
use super::constants::{MAX_PARTICLES, MAX_SNOW, SCALE_EXPLODE, SCALE_SHRINK};

/// Every tunable or displayed setting of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    EnableGestureControl,
    GestureStatus,
    ParticleCount,
    GlobalSize,
    TreeColor,
    OrnamentColor,
    LightColor,
    RotationSpeed,
    TwinkleSpeed,
    SnowSpeed,
    SnowDensity,
    BloomStrength,
    BloomRadius,
    BloomThreshold,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Color(Rgb),
    Flag(bool),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Slider { min: f32, max: f32, step: f32 },
    Color,
    Toggle,
    Readonly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Folder {
    Interaction,
    Visuals,
    Motion,
    PostProcess,
}

impl Folder {
    pub const ALL: [Folder; 4] = [
        Folder::Interaction,
        Folder::Visuals,
        Folder::Motion,
        Folder::PostProcess,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Folder::Interaction => "Interactive (Webcam)",
            Folder::Visuals => "Visuals",
            Folder::Motion => "Motion",
            Folder::PostProcess => "Post-Process",
        }
    }
}

/// Panel descriptor for one parameter.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub label: &'static str,
    pub folder: Folder,
    pub control: Control,
    /// Refreshed from `Params` every frame because something other than the panel writes it.
    pub listen: bool,
}

const fn slider(min: f32, max: f32, step: f32) -> Control {
    Control::Slider { min, max, step }
}

pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec {
        key: ParamKey::EnableGestureControl,
        label: "Enable Hand Control",
        folder: Folder::Interaction,
        control: Control::Toggle,
        listen: false,
    },
    ParamSpec {
        key: ParamKey::GestureStatus,
        label: "Status",
        folder: Folder::Interaction,
        control: Control::Readonly,
        listen: true,
    },
    ParamSpec {
        key: ParamKey::ParticleCount,
        label: "Tree Density",
        folder: Folder::Visuals,
        control: slider(100.0, MAX_PARTICLES as f32, 1.0),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::GlobalSize,
        label: "Particle Size",
        folder: Folder::Visuals,
        control: slider(0.1, 5.0, 0.01),
        listen: true,
    },
    ParamSpec {
        key: ParamKey::TreeColor,
        label: "Tree Color",
        folder: Folder::Visuals,
        control: Control::Color,
        listen: false,
    },
    ParamSpec {
        key: ParamKey::OrnamentColor,
        label: "Ornaments",
        folder: Folder::Visuals,
        control: Control::Color,
        listen: false,
    },
    ParamSpec {
        key: ParamKey::LightColor,
        label: "Lights / Star",
        folder: Folder::Visuals,
        control: Control::Color,
        listen: false,
    },
    ParamSpec {
        key: ParamKey::RotationSpeed,
        label: "Spin Speed",
        folder: Folder::Motion,
        control: slider(0.0, 1.0, 0.01),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::TwinkleSpeed,
        label: "Twinkle Hz",
        folder: Folder::Motion,
        control: slider(0.0, 10.0, 0.1),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::SnowSpeed,
        label: "Snow Storm",
        folder: Folder::Motion,
        control: slider(0.0, 5.0, 0.1),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::SnowDensity,
        label: "Snow Amount",
        folder: Folder::Motion,
        control: slider(0.0, MAX_SNOW as f32, 1.0),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::BloomStrength,
        label: "bloomStrength",
        folder: Folder::PostProcess,
        control: slider(0.0, 5.0, 0.01),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::BloomRadius,
        label: "bloomRadius",
        folder: Folder::PostProcess,
        control: slider(0.0, 1.5, 0.01),
        listen: false,
    },
    ParamSpec {
        key: ParamKey::BloomThreshold,
        label: "bloomThreshold",
        folder: Folder::PostProcess,
        control: slider(0.0, 1.0, 0.01),
        listen: false,
    },
];

pub fn spec_for(key: ParamKey) -> &'static ParamSpec {
    // PARAM_SPECS lists every key exactly once
    PARAM_SPECS
        .iter()
        .find(|s| s.key == key)
        .unwrap_or(&PARAM_SPECS[0])
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error(transparent)]
    Color(#[from] InvalidColor),
    #[error("{0:?} must be a finite number")]
    NotFinite(ParamKey),
    #[error("{key:?} expects a {expected} value")]
    WrongType {
        key: ParamKey,
        expected: &'static str,
    },
    #[error("{0:?} is read-only")]
    ReadOnly(ParamKey),
    #[error("cannot parse {raw:?} for {key:?}")]
    Parse { key: ParamKey, raw: String },
}

/// Side effect a parameter change requires beyond storing the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneChange {
    /// Value is read every tick; nothing else to do.
    None,
    TreeDrawRange(usize),
    SnowDrawRange(usize),
    /// Size uniform and gesture target both follow the new value.
    SizeScale(f32),
    Recolor,
    /// Recolor plus star and glow material colors.
    RecolorWithStar,
    Twinkle(f32),
    Bloom,
    GestureControl(bool),
}

/// The scene's single parameter set.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub particle_count: usize,
    pub rotation_speed: f32,
    pub twinkle_speed: f32,
    pub global_size: f32,

    pub tree_color: Rgb,
    pub ornament_color: Rgb,
    pub light_color: Rgb,

    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,

    pub snow_speed: f32,
    pub snow_density: usize,

    pub enable_gesture_control: bool,
    pub gesture_status: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            particle_count: 3500,
            rotation_speed: 0.1,
            twinkle_speed: 3.0,
            global_size: 1.0,
            tree_color: Rgb::from_srgb8(0x00, 0xff, 0x41),
            ornament_color: Rgb::from_srgb8(0xff, 0x00, 0x33),
            light_color: Rgb::from_srgb8(0xff, 0xd7, 0x00),
            bloom_strength: 2.0,
            bloom_radius: 0.5,
            bloom_threshold: 0.7,
            snow_speed: 1.0,
            snow_density: 1000,
            enable_gesture_control: false,
            gesture_status: "OFFLINE".to_string(),
        }
    }
}

impl Params {
    pub fn get(&self, key: ParamKey) -> ParamValue {
        use ParamValue::*;
        match key {
            ParamKey::EnableGestureControl => Flag(self.enable_gesture_control),
            ParamKey::GestureStatus => Text(self.gesture_status.clone()),
            ParamKey::ParticleCount => Number(self.particle_count as f32),
            ParamKey::GlobalSize => Number(self.global_size),
            ParamKey::TreeColor => Color(self.tree_color),
            ParamKey::OrnamentColor => Color(self.ornament_color),
            ParamKey::LightColor => Color(self.light_color),
            ParamKey::RotationSpeed => Number(self.rotation_speed),
            ParamKey::TwinkleSpeed => Number(self.twinkle_speed),
            ParamKey::SnowSpeed => Number(self.snow_speed),
            ParamKey::SnowDensity => Number(self.snow_density as f32),
            ParamKey::BloomStrength => Number(self.bloom_strength),
            ParamKey::BloomRadius => Number(self.bloom_radius),
            ParamKey::BloomThreshold => Number(self.bloom_threshold),
        }
    }

    /// Store a value coming from the panel and report the side effect it needs.
    ///
    /// Numbers are clamped to the slider range of their control; counts are
    /// rounded to whole entries.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> Result<SceneChange, ParamError> {
        let spec = spec_for(key);
        match (spec.control, value) {
            (Control::Readonly, _) => Err(ParamError::ReadOnly(key)),
            (Control::Toggle, ParamValue::Flag(on)) => {
                self.enable_gesture_control = on;
                Ok(SceneChange::GestureControl(on))
            }
            (Control::Color, ParamValue::Color(c)) => Ok(self.set_color(key, c)),
            (Control::Slider { min, max, .. }, ParamValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(ParamError::NotFinite(key));
                }
                Ok(self.set_number(key, v.clamp(min, max)))
            }
            (control, _) => Err(ParamError::WrongType {
                key,
                expected: match control {
                    Control::Slider { .. } => "number",
                    Control::Color => "color",
                    Control::Toggle => "boolean",
                    Control::Readonly => "text",
                },
            }),
        }
    }

    fn set_color(&mut self, key: ParamKey, c: Rgb) -> SceneChange {
        match key {
            ParamKey::TreeColor => {
                self.tree_color = c;
                SceneChange::Recolor
            }
            ParamKey::OrnamentColor => {
                self.ornament_color = c;
                SceneChange::Recolor
            }
            _ => {
                self.light_color = c;
                SceneChange::RecolorWithStar
            }
        }
    }

    fn set_number(&mut self, key: ParamKey, v: f32) -> SceneChange {
        match key {
            ParamKey::ParticleCount => {
                self.particle_count = v.round() as usize;
                SceneChange::TreeDrawRange(self.particle_count)
            }
            ParamKey::GlobalSize => {
                self.global_size = v;
                SceneChange::SizeScale(v)
            }
            ParamKey::RotationSpeed => {
                self.rotation_speed = v;
                SceneChange::None
            }
            ParamKey::TwinkleSpeed => {
                self.twinkle_speed = v;
                SceneChange::Twinkle(v)
            }
            ParamKey::SnowSpeed => {
                self.snow_speed = v;
                SceneChange::None
            }
            ParamKey::SnowDensity => {
                self.snow_density = v.round() as usize;
                SceneChange::SnowDrawRange(self.snow_density)
            }
            ParamKey::BloomStrength => {
                self.bloom_strength = v;
                SceneChange::Bloom
            }
            ParamKey::BloomRadius => {
                self.bloom_radius = v;
                SceneChange::Bloom
            }
            _ => {
                self.bloom_threshold = v;
                SceneChange::Bloom
            }
        }
    }

    /// Mirror of the smoothed gesture size. Bypasses the slider range, which
    /// does not reach the shrink target.
    pub fn mirror_global_size(&mut self, v: f32) {
        self.global_size = v.clamp(SCALE_SHRINK, SCALE_EXPLODE);
    }

    pub fn set_gesture_status(&mut self, status: &str) {
        if self.gesture_status != status {
            self.gesture_status.clear();
            self.gesture_status.push_str(status);
        }
    }
}

impl Control {
    /// Parse the raw string an HTML input reports for this control.
    pub fn parse_input(&self, key: ParamKey, raw: &str) -> Result<ParamValue, ParamError> {
        match self {
            Control::Slider { .. } => raw
                .trim()
                .parse::<f32>()
                .map(ParamValue::Number)
                .map_err(|_| ParamError::Parse {
                    key,
                    raw: raw.to_string(),
                }),
            Control::Color => Ok(ParamValue::Color(Rgb::from_hex(raw)?)),
            Control::Toggle => match raw {
                "true" | "on" | "1" => Ok(ParamValue::Flag(true)),
                "false" | "off" | "0" | "" => Ok(ParamValue::Flag(false)),
                _ => Err(ParamError::Parse {
                    key,
                    raw: raw.to_string(),
                }),
            },
            Control::Readonly => Err(ParamError::ReadOnly(key)),
        }
    }
}

/// Text shown next to a control for the current value.
pub fn display_value(value: &ParamValue, control: &Control) -> String {
    match (value, control) {
        (ParamValue::Number(v), Control::Slider { step, .. }) if *step >= 1.0 => {
            format!("{}", v.round() as i64)
        }
        (ParamValue::Number(v), _) => format!("{:.2}", v),
        (ParamValue::Color(c), _) => c.to_hex(),
        (ParamValue::Flag(b), _) => b.to_string(),
        (ParamValue::Text(s), _) => s.clone(),
    }
}
