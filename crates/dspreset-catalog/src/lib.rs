//! Catalog of the effects understood by the DecentSampler plugin.
//!
//! This crate is the single source of truth for mapping a logical effect name
//! (what a user picks, e.g. "Wave Folder") to the wire `type` string written
//! in a `.dspreset` file (e.g. `wave_folder`), together with each effect's
//! parameter schema. Both the importer and the exporter consult it.
//!
//! # Features
//!
//! - **Effect Discovery**: List all effects with their category and parameters
//! - **Reverse Lookup**: Resolve a wire `type` back to its logical effect
//! - **Binding Lookup**: Resolve a DecentSampler binding parameter
//!   (`FX_REVERB_WET_LEVEL`, `FX_MIX`, ...) to the effect attribute it drives
//! - **Simple/Advanced Views**: Parameter subsets for basic and expert editing
//!
//! # Example
//!
//! ```rust
//! use dspreset_catalog::{EffectsCatalog, EffectCategory};
//!
//! let catalog = EffectsCatalog::new();
//!
//! let reverb = catalog.get("Reverb").unwrap();
//! assert_eq!(reverb.wire_type, "reverb");
//!
//! // Reverse lookup, as done while importing
//! let delay = catalog.by_wire_type("delay").unwrap();
//! assert_eq!(delay.name, "Delay");
//!
//! for effect in catalog.effects_in_category(EffectCategory::Filter) {
//!     println!("filter effect: {}", effect.name);
//! }
//! ```

/// Category of effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Time-based effects (delay, reverb)
    TimeBased,
    /// Modulation effects (chorus, phaser)
    Modulation,
    /// Filter effects (lowpass, highpass, notch, ...)
    Filter,
    /// Utility effects (gain)
    Utility,
    /// Distortion and waveshaping effects
    Distortion,
    /// Impulse-response convolution
    Convolution,
}

impl EffectCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::TimeBased => "Time-Based",
            EffectCategory::Modulation => "Modulation",
            EffectCategory::Filter => "Filter",
            EffectCategory::Utility => "Utility",
            EffectCategory::Distortion => "Distortion",
            EffectCategory::Convolution => "Convolution",
        }
    }
}

/// Value domain of an effect parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Continuous numeric range.
    Range {
        /// Minimum value.
        min: f64,
        /// Maximum value.
        max: f64,
        /// Default value.
        default: f64,
    },
    /// One of a fixed set of string options.
    Choice {
        /// Allowed option strings.
        options: &'static [&'static str],
        /// Default option.
        default: &'static str,
    },
    /// Path to an external file (impulse responses).
    File,
    /// Boolean switch.
    Toggle {
        /// Default state.
        default: bool,
    },
}

/// Describes one parameter of an effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Attribute name on the `<effect>` element (e.g. `wetLevel`).
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Value domain.
    pub kind: ParamKind,
    /// DecentSampler binding parameter that drives this attribute, if any.
    pub ds_param: Option<&'static str>,
    /// Whether the parameter is shown in the simple view.
    pub simple: bool,
}

impl ParamSpec {
    const fn range(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Range { min, max, default },
            ds_param: None,
            simple: false,
        }
    }

    const fn bound_to(mut self, ds_param: &'static str) -> Self {
        self.ds_param = Some(ds_param);
        self
    }

    const fn simple(mut self) -> Self {
        self.simple = true;
        self
    }

    /// Returns the default value formatted the way it is written to XML.
    ///
    /// File parameters default to the empty string.
    pub fn default_value_string(&self) -> String {
        match self.kind {
            ParamKind::Range { default, .. } => default.to_string(),
            ParamKind::Choice { default, .. } => default.to_string(),
            ParamKind::File => String::new(),
            ParamKind::Toggle { default } => default.to_string(),
        }
    }

    /// Returns the numeric bounds for range parameters.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.kind {
            ParamKind::Range { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }
}

/// Describes an effect in the catalog.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Logical name shown to users (e.g. "Wave Folder").
    pub name: &'static str,
    /// Wire `type` attribute value (e.g. `wave_folder`).
    pub wire_type: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Full (advanced) parameter list.
    pub params: &'static [ParamSpec],
}

impl EffectDescriptor {
    /// Parameters shown in the simple view.
    pub fn simple_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| p.simple)
    }

    /// All parameters (advanced view).
    pub fn advanced_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter()
    }

    /// Find a parameter by attribute name (case-insensitive).
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Default attribute values for every parameter, in schema order.
    ///
    /// File parameters are left out since an empty path is not meaningful.
    pub fn default_attributes(&self) -> Vec<(&'static str, String)> {
        self.params
            .iter()
            .filter(|p| !matches!(p.kind, ParamKind::File))
            .map(|p| (p.name, p.default_value_string()))
            .collect()
    }
}

const REVERB_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("wetLevel", "Wet Level", 0.0, 1.0, 0.5)
        .bound_to("FX_REVERB_WET_LEVEL")
        .simple(),
    ParamSpec::range("roomSize", "Room Size", 0.0, 1.0, 0.7)
        .bound_to("FX_REVERB_ROOM_SIZE"),
    ParamSpec::range("damping", "Damping", 0.0, 1.0, 0.3).bound_to("FX_REVERB_DAMPING"),
];

const DELAY_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("wetLevel", "Wet Level", 0.0, 1.0, 0.5).simple(),
    ParamSpec::range("delayTime", "Delay Time (s)", 0.0, 20.0, 0.7).bound_to("FX_DELAY_TIME"),
    ParamSpec::range("feedback", "Feedback", 0.0, 1.0, 0.2).bound_to("FX_FEEDBACK"),
    ParamSpec::range("stereoOffset", "Stereo Offset", -10.0, 10.0, 0.0)
        .bound_to("FX_STEREO_OFFSET"),
    ParamSpec {
        name: "delayTimeFormat",
        label: "Time Format",
        kind: ParamKind::Choice {
            options: &["seconds", "musical_time"],
            default: "seconds",
        },
        ds_param: None,
        simple: false,
    },
];

const CHORUS_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("mix", "Mix", 0.0, 1.0, 0.5).bound_to("FX_MIX").simple(),
    ParamSpec::range("modDepth", "Mod Depth", 0.0, 1.0, 0.2).bound_to("FX_MOD_DEPTH"),
    ParamSpec::range("modRate", "Mod Rate (Hz)", 0.0, 10.0, 0.2).bound_to("FX_MOD_RATE"),
];

const PHASER_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("mix", "Mix", 0.0, 1.0, 0.5).simple(),
    ParamSpec::range("modDepth", "Mod Depth", 0.0, 1.0, 0.2),
    ParamSpec::range("modRate", "Mod Rate (Hz)", 0.0, 10.0, 0.2),
    ParamSpec::range("centerFrequency", "Center Freq (Hz)", 0.0, 22000.0, 400.0)
        .bound_to("FX_CENTER_FREQUENCY"),
    ParamSpec::range("feedback", "Feedback", -1.0, 1.0, 0.7),
];

const CONVOLUTION_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("mix", "Mix", 0.0, 1.0, 0.5).simple(),
    ParamSpec {
        name: "irFile",
        label: "Impulse Response File",
        kind: ParamKind::File,
        ds_param: None,
        simple: false,
    },
];

const LOWPASS_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("frequency", "Cutoff", 0.0, 22000.0, 22000.0)
        .bound_to("FX_FILTER_FREQUENCY")
        .simple(),
    ParamSpec::range("resonance", "Resonance", 0.0, 1.0, 0.7).bound_to("FX_FILTER_RESONANCE"),
];

const HIGHPASS_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("frequency", "Cutoff", 0.0, 22000.0, 22000.0).simple(),
    ParamSpec::range("resonance", "Resonance", 0.0, 1.0, 0.7),
];

const BANDPASS_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("frequency", "Center Freq", 0.0, 22000.0, 22000.0).simple(),
    ParamSpec::range("resonance", "Resonance", 0.0, 1.0, 0.7),
];

const NOTCH_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("frequency", "Freq", 60.0, 22000.0, 10000.0).simple(),
    ParamSpec::range("q", "Q", 0.01, 18.0, 0.7),
];

const PEAK_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("frequency", "Freq", 60.0, 22000.0, 10000.0).simple(),
    ParamSpec::range("q", "Q", 0.01, 18.0, 0.7),
    ParamSpec::range("gain", "Gain", 0.0, 10.0, 1.0),
];

const GAIN_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("level", "Level (dB)", -99.0, 24.0, 0.0).bound_to("FX_GAIN").simple(),
];

const WAVE_FOLDER_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("drive", "Drive", 1.0, 100.0, 1.0).bound_to("FX_DRIVE").simple(),
    ParamSpec::range("threshold", "Threshold", 0.0, 10.0, 0.25).bound_to("FX_THRESHOLD"),
];

const WAVE_SHAPER_PARAMS: &[ParamSpec] = &[
    ParamSpec::range("drive", "Drive", 1.0, 1000.0, 1.0).simple(),
    ParamSpec::range("driveBoost", "Drive Boost", 0.0, 1.0, 1.0).bound_to("FX_DRIVE_BOOST"),
    ParamSpec::range("outputLevel", "Output Level", 0.0, 1.0, 0.1).bound_to("FX_OUTPUT_LEVEL"),
    ParamSpec {
        name: "highQuality",
        label: "High Quality",
        kind: ParamKind::Toggle { default: true },
        ds_param: None,
        simple: false,
    },
];

/// Catalog of all effects the exporter can emit.
///
/// Lookups are linear scans over a small, fixed list; registration order is
/// also the listing order.
pub struct EffectsCatalog {
    entries: Vec<EffectDescriptor>,
}

impl Default for EffectsCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectsCatalog {
    /// Create a catalog with every built-in effect registered.
    pub fn new() -> Self {
        let mut catalog = Self {
            entries: Vec::with_capacity(13),
        };
        catalog.register_builtin_effects();
        catalog
    }

    fn register_builtin_effects(&mut self) {
        self.register("Reverb", "reverb", EffectCategory::TimeBased, REVERB_PARAMS);
        self.register("Delay", "delay", EffectCategory::TimeBased, DELAY_PARAMS);
        self.register("Chorus", "chorus", EffectCategory::Modulation, CHORUS_PARAMS);
        self.register("Phaser", "phaser", EffectCategory::Modulation, PHASER_PARAMS);
        self.register(
            "Convolution",
            "convolution",
            EffectCategory::Convolution,
            CONVOLUTION_PARAMS,
        );
        self.register("Lowpass", "lowpass", EffectCategory::Filter, LOWPASS_PARAMS);
        self.register("Highpass", "highpass", EffectCategory::Filter, HIGHPASS_PARAMS);
        self.register("Bandpass", "bandpass", EffectCategory::Filter, BANDPASS_PARAMS);
        self.register("Notch", "notch", EffectCategory::Filter, NOTCH_PARAMS);
        self.register("Peak", "peak", EffectCategory::Filter, PEAK_PARAMS);
        self.register("Gain", "gain", EffectCategory::Utility, GAIN_PARAMS);
        self.register(
            "Wave Folder",
            "wave_folder",
            EffectCategory::Distortion,
            WAVE_FOLDER_PARAMS,
        );
        self.register(
            "Wave Shaper",
            "wave_shaper",
            EffectCategory::Distortion,
            WAVE_SHAPER_PARAMS,
        );
    }

    fn register(
        &mut self,
        name: &'static str,
        wire_type: &'static str,
        category: EffectCategory,
        params: &'static [ParamSpec],
    ) {
        self.entries.push(EffectDescriptor {
            name,
            wire_type,
            category,
            params,
        });
    }

    /// Returns descriptors for all effects, in registration order.
    pub fn all_effects(&self) -> Vec<&EffectDescriptor> {
        self.entries.iter().collect()
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(&self, category: EffectCategory) -> Vec<&EffectDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Get a descriptor by logical name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&EffectDescriptor> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Reverse lookup: find the effect whose wire `type` matches.
    pub fn by_wire_type(&self, wire_type: &str) -> Option<&EffectDescriptor> {
        self.entries.iter().find(|e| e.wire_type == wire_type)
    }

    /// Resolve either a logical name or a wire type.
    pub fn resolve(&self, name_or_type: &str) -> Option<&EffectDescriptor> {
        self.get(name_or_type)
            .or_else(|| self.by_wire_type(name_or_type))
    }

    /// Find the effect and parameter driven by a DecentSampler binding
    /// parameter such as `FX_REVERB_WET_LEVEL`.
    ///
    /// Generic parameters (`FX_MIX`) are shared by several effects; the first
    /// registered owner wins.
    pub fn find_ds_param(&self, ds_param: &str) -> Option<(&EffectDescriptor, &ParamSpec)> {
        self.entries.iter().find_map(|e| {
            e.params
                .iter()
                .find(|p| p.ds_param.is_some_and(|d| d.eq_ignore_ascii_case(ds_param)))
                .map(|p| (e, p))
        })
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
