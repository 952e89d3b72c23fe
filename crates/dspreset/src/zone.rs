//! Sample zones, groups and the legacy flat mapping types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::params::EffectParams;
use crate::preset::GroupEnvelope;
use crate::wire::wire_enum;

/// Full MIDI velocity range.
pub const FULL_VELOCITY: (u8, u8) = (0, 127);

wire_enum! {
    /// How zones covering the same key are chosen on successive note-ons.
    pub enum SeqMode {
        /// Cycle through zones in `seq_position` order.
        #[default]
        RoundRobin => "round_robin",
        /// Random choice, avoiding immediate repeats.
        Random => "random",
        /// Unconstrained random choice.
        TrueRandom => "true_random",
        /// Every zone always plays.
        Always => "always",
    }
}

wire_enum! {
    /// Loop playback direction.
    pub enum LoopMode {
        /// Play the loop forwards.
        #[default]
        Forward => "forward",
        /// Play the loop backwards.
        Backward => "backward",
        /// Alternate direction on each pass.
        Bidirectional => "bidirectional",
    }
}

/// One physical sample assigned to a key/velocity region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleZone {
    /// Sample file path, as referenced by the preset.
    pub path: PathBuf,
    /// Note at which the sample plays at its recorded pitch.
    pub root_note: u8,
    /// Lowest note covered.
    pub lo_note: u8,
    /// Highest note covered.
    pub hi_note: u8,
    /// Inclusive velocity range.
    pub velocity_range: (u8, u8),
    /// Sequencing behaviour among overlapping zones.
    pub seq_mode: SeqMode,
    /// Position in the round-robin cycle (1-based).
    pub seq_position: u32,
    /// Volume offset in dB.
    pub volume: f64,
    /// Pan position, -1 (left) to 1 (right).
    pub pan: f64,
    /// Tuning offset in cents.
    pub tune: f64,
    /// First sample frame to play.
    pub start: u64,
    /// Last sample frame to play; `None` plays to the end of the file.
    pub end: Option<u64>,
    /// Whether the loop region is active.
    pub loop_enabled: bool,
    /// Loop start frame.
    pub loop_start: Option<u64>,
    /// Loop end frame.
    pub loop_end: Option<u64>,
    /// Crossfade length at the loop seam, in seconds.
    pub loop_crossfade: f64,
    /// Loop direction.
    pub loop_mode: LoopMode,
    /// Free-form tags for blend and cut-group behaviour.
    pub tags: Vec<String>,
}

impl SampleZone {
    /// Create a zone with every optional field at its default.
    pub fn new(path: impl Into<PathBuf>, root_note: u8, lo_note: u8, hi_note: u8) -> Self {
        Self {
            path: path.into(),
            root_note,
            lo_note,
            hi_note,
            velocity_range: FULL_VELOCITY,
            seq_mode: SeqMode::RoundRobin,
            seq_position: 1,
            volume: 0.0,
            pan: 0.0,
            tune: 0.0,
            start: 0,
            end: None,
            loop_enabled: false,
            loop_start: None,
            loop_end: None,
            loop_crossfade: 0.0,
            loop_mode: LoopMode::Forward,
            tags: Vec::new(),
        }
    }

    /// Set the velocity range.
    pub fn with_velocity_range(mut self, lo: u8, hi: u8) -> Self {
        self.velocity_range = (lo, hi);
        self
    }

    /// Set sequencing mode and position.
    pub fn with_sequence(mut self, mode: SeqMode, position: u32) -> Self {
        self.seq_mode = mode;
        self.seq_position = position;
        self
    }

    /// Enable a loop between two frames.
    pub fn with_loop(mut self, start: u64, end: u64) -> Self {
        self.loop_enabled = true;
        self.loop_start = Some(start);
        self.loop_end = Some(end);
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether the zone covers a note.
    pub fn contains_note(&self, note: u8) -> bool {
        self.lo_note <= note && note <= self.hi_note
    }

    /// File name of the sample, if it has one.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// An effect placed inside a single group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEffect {
    /// Logical effect name (catalog name) or raw wire type.
    pub kind: String,
    /// Effect attributes.
    #[serde(default)]
    pub params: EffectParams,
}

impl GroupEffect {
    /// Create a group effect with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: EffectParams::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<crate::ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A named collection of zones sharing group-level behaviour.
///
/// The envelope override is all-or-nothing: once any of `attack`, `decay`,
/// `sustain` or `release` is set, the group's ADSR fully replaces the
/// instrument envelope, with unset stages taken from the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGroup {
    /// Group name.
    pub name: String,
    /// Whether the group plays.
    pub enabled: bool,
    /// Volume offset in dB.
    pub volume: f64,
    /// Pan position.
    pub pan: f64,
    /// Attack override, seconds.
    pub attack: Option<f64>,
    /// Decay override, seconds.
    pub decay: Option<f64>,
    /// Sustain override, level 0..1.
    pub sustain: Option<f64>,
    /// Release override, seconds.
    pub release: Option<f64>,
    /// Group tags.
    pub tags: Vec<String>,
    /// Effects local to this group.
    pub group_fx: Vec<GroupEffect>,
    /// Zones in this group.
    pub samples: Vec<SampleZone>,
}

impl SampleGroup {
    /// Create an empty, enabled group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            volume: 0.0,
            pan: 0.0,
            attack: None,
            decay: None,
            sustain: None,
            release: None,
            tags: Vec::new(),
            group_fx: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Set the group volume in dB.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Set the group pan.
    pub fn with_pan(mut self, pan: f64) -> Self {
        self.pan = pan;
        self
    }

    /// Add a zone.
    pub fn add_sample(&mut self, zone: SampleZone) {
        self.samples.push(zone);
    }

    /// Add a zone, builder style.
    pub fn with_sample(mut self, zone: SampleZone) -> Self {
        self.samples.push(zone);
        self
    }

    /// Whether the group has no zones.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether any envelope stage is overridden.
    pub fn has_envelope_override(&self) -> bool {
        self.attack.is_some() || self.decay.is_some() || self.sustain.is_some() || self.release.is_some()
    }

    /// The envelope this group plays with, given the instrument envelope.
    pub fn effective_envelope(&self, instrument: &GroupEnvelope) -> GroupEnvelope {
        GroupEnvelope {
            attack: self.attack.unwrap_or(instrument.attack),
            decay: self.decay.unwrap_or(instrument.decay),
            sustain: self.sustain.unwrap_or(instrument.sustain),
            release: self.release.unwrap_or(instrument.release),
        }
    }

    /// Override the whole envelope.
    pub fn set_envelope(&mut self, envelope: GroupEnvelope) {
        self.attack = Some(envelope.attack);
        self.decay = Some(envelope.decay);
        self.sustain = Some(envelope.sustain);
        self.release = Some(envelope.release);
    }
}

/// Legacy flat mapping: a path and its key range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMapping {
    /// Sample file path.
    pub path: PathBuf,
    /// Lowest note.
    pub lo: u8,
    /// Highest note.
    pub hi: u8,
    /// Root note.
    pub root: u8,
}

impl SampleMapping {
    /// Create a mapping.
    pub fn new(path: impl Into<PathBuf>, lo: u8, hi: u8, root: u8) -> Self {
        Self {
            path: path.into(),
            lo,
            hi,
            root,
        }
    }

    /// Promote to a full zone with default playback settings.
    pub fn to_zone(&self) -> SampleZone {
        SampleZone::new(&self.path, self.root, self.lo, self.hi)
    }

    /// Path of the mapped sample.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flat zone list used before groups existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleManager {
    /// Zones in insertion order.
    pub zones: Vec<SampleZone>,
}

impl SampleManager {
    /// Add a zone.
    pub fn add_zone(&mut self, zone: SampleZone) {
        self.zones.push(zone);
    }

    /// Whether no zones are held.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WireValue;

    #[test]
    fn test_zone_defaults() {
        let zone = SampleZone::new("piano/C4.wav", 60, 59, 61);
        assert_eq!(zone.velocity_range, (0, 127));
        assert_eq!(zone.seq_mode, SeqMode::RoundRobin);
        assert_eq!(zone.seq_position, 1);
        assert!(zone.end.is_none());
        assert!(!zone.loop_enabled);
        assert_eq!(zone.loop_mode, LoopMode::Forward);
        assert_eq!(zone.file_name(), Some("C4.wav"));
        assert!(zone.contains_note(61));
        assert!(!zone.contains_note(62));
    }

    #[test]
    fn test_seq_mode_wire_names() {
        assert_eq!(SeqMode::TrueRandom.as_wire(), "true_random");
        assert_eq!(SeqMode::from_wire("always"), Some(SeqMode::Always));
        assert_eq!(LoopMode::from_wire("bidirectional"), Some(LoopMode::Bidirectional));
    }

    #[test]
    fn test_group_envelope_override_is_all_or_nothing() {
        let instrument = GroupEnvelope::default();
        let mut group = SampleGroup::new("Pads");
        assert!(!group.has_envelope_override());
        assert_eq!(group.effective_envelope(&instrument), instrument);

        group.release = Some(3.0);
        assert!(group.has_envelope_override());
        let env = group.effective_envelope(&instrument);
        assert_eq!(env.release, 3.0);
        assert_eq!(env.attack, instrument.attack);
    }

    #[test]
    fn test_mapping_to_zone() {
        let zone = SampleMapping::new("a.wav", 21, 23, 22).to_zone();
        assert_eq!((zone.lo_note, zone.hi_note, zone.root_note), (21, 23, 22));
        assert_eq!(zone.path, PathBuf::from("a.wav"));
    }

    #[test]
    fn test_group_builders() {
        let group = SampleGroup::new("Close")
            .with_volume(-6.0)
            .with_pan(0.2)
            .with_sample(SampleZone::new("C4_Close.wav", 60, 59, 61).with_tag("mic_close"));
        assert_eq!(group.len(), 1);
        assert!(group.enabled);
        assert_eq!(group.samples[0].tags, vec!["mic_close"]);
    }
}
