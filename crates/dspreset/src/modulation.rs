//! LFOs and the routes that connect them to parameters.

use serde::{Deserialize, Serialize};

use crate::wire::wire_enum;

wire_enum! {
    /// LFO waveform.
    pub enum Waveform {
        /// Sine wave.
        #[default]
        Sine => "sine",
        /// Triangle wave.
        Triangle => "triangle",
        /// Rising sawtooth.
        Sawtooth => "sawtooth",
        /// Square wave.
        Square => "square",
        /// Sample and hold.
        SampleAndHold => "s&h",
        /// Envelope follower on the instrument output.
        EnvelopeFollower => "envelope_follower",
    }
}

wire_enum! {
    /// LFO clock source.
    pub enum LfoSync {
        /// Runs at `frequency`.
        #[default]
        Free => "free",
        /// Locked to host tempo via `sync_length`.
        Tempo => "tempo",
    }
}

wire_enum! {
    /// What kind of parameter a modulation route drives.
    pub enum TargetType {
        /// Amplitude envelope or volume.
        #[default]
        Amp => "amp",
        /// An effect parameter.
        Effect => "effect",
        /// Any other engine parameter.
        General => "general",
    }
}

wire_enum! {
    /// Scope a modulation target lives at.
    pub enum TargetLevel {
        /// Whole instrument.
        #[default]
        Instrument => "instrument",
        /// A single group.
        Group => "group",
        /// All groups carrying a tag.
        Tag => "tag",
    }
}

/// Low-frequency oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lfo {
    /// Unique name, referenced by [`ModulationRoute::modulator_name`].
    pub name: String,
    /// Rate in Hz, ignored when synced to tempo.
    pub frequency: f64,
    /// Waveform.
    pub waveform: Waveform,
    /// Output scale.
    pub amplitude: f64,
    /// Output offset.
    pub offset: f64,
    /// Start phase in degrees.
    pub phase: f64,
    /// Clock source.
    pub sync: LfoSync,
    /// Musical length when tempo-synced, e.g. `"1/8"`.
    pub sync_length: String,
    /// Restart the cycle on each note.
    pub retrigger: bool,
}

impl Lfo {
    /// Create an LFO with default shape and rate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frequency: 1.0,
            waveform: Waveform::Sine,
            amplitude: 1.0,
            offset: 0.0,
            phase: 0.0,
            sync: LfoSync::Free,
            sync_length: "1".to_string(),
            retrigger: false,
        }
    }

    /// Set the free-running rate.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the waveform.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Lock to tempo with the given musical length.
    pub fn synced(mut self, length: impl Into<String>) -> Self {
        self.sync = LfoSync::Tempo;
        self.sync_length = length.into();
        self
    }
}

/// Destination of a modulation route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulatorTarget {
    /// Parameter family.
    pub target_type: TargetType,
    /// Symbolic parameter name, e.g. `ENV_ATTACK` or `FX_MIX`.
    pub parameter: String,
    /// Scope.
    pub level: TargetLevel,
    /// Index at instrument level.
    pub position: u32,
    /// Group the target lives in, for group-level targets.
    pub group_index: Option<u32>,
    /// Effect the target lives in, for effect targets.
    pub effect_index: Option<u32>,
}

impl ModulatorTarget {
    /// Instrument-level target with no indices.
    pub fn new(target_type: TargetType, parameter: impl Into<String>) -> Self {
        Self {
            target_type,
            parameter: parameter.into(),
            level: TargetLevel::Instrument,
            position: 0,
            group_index: None,
            effect_index: None,
        }
    }
}

/// Connection from a named LFO to a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationRoute {
    /// Name of the driving LFO.
    pub modulator_name: String,
    /// Destination.
    pub target: ModulatorTarget,
    /// Signed modulation depth.
    pub amount: f64,
    /// Invert the modulator output.
    pub invert: bool,
}

impl ModulationRoute {
    /// Route with full positive depth.
    pub fn new(modulator_name: impl Into<String>, target: ModulatorTarget) -> Self {
        Self {
            modulator_name: modulator_name.into(),
            target,
            amount: 1.0,
            invert: false,
        }
    }

    /// Set the depth.
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}
