//! The instrument preset root and its instrument-level envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::control::{Binding, BindingType, UIElement, UiSection};
use crate::modulation::{Lfo, ModulationRoute};
use crate::params::EffectParams;
use crate::wire::wire_enum;
use crate::zone::{SampleGroup, SampleManager, SampleMapping, SampleZone};

/// Default UI canvas width.
pub const DEFAULT_UI_WIDTH: u32 = 812;
/// Default UI canvas height.
pub const DEFAULT_UI_HEIGHT: u32 = 375;
/// Default base note for the auto-mapper (A0).
pub const DEFAULT_START_NOTE: u8 = 21;

wire_enum! {
    /// How UI coordinates are interpreted.
    pub enum LayoutMode {
        /// Coordinates scale with the window.
        #[default]
        Relative => "relative",
        /// Fixed pixel coordinates.
        Absolute => "absolute",
    }
}

wire_enum! {
    /// Background image placement.
    pub enum BackgroundMode {
        /// Anchored at the top-left corner.
        #[default]
        TopLeft => "top_left",
        /// Centred.
        Center => "center",
        /// Stretched to fill.
        Stretch => "stretch",
    }
}

wire_enum! {
    /// Release behaviour of voices silenced by a cut group.
    pub enum SilencingMode {
        /// Voices release with their envelope.
        #[default]
        Normal => "normal",
        /// Voices are cut off quickly.
        Fast => "fast",
    }
}

/// Amplitude envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupEnvelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level, 0..1.
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for GroupEnvelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 1.0,
            sustain: 1.0,
            release: 0.43,
        }
    }
}

/// A sampled instrument: zones, groups, envelope, modulation, effects and UI.
///
/// When `sample_groups` is non-empty it is authoritative; `mappings` and
/// `sample_manager` are the legacy flat representations used only when no
/// groups exist.
///
/// # Example
///
/// ```rust
/// use dspreset::{InstrumentPreset, SampleGroup, SampleZone, UIElement};
///
/// let mut preset = InstrumentPreset::new("Felt Piano");
/// preset.sample_groups.push(
///     SampleGroup::new("Main").with_sample(SampleZone::new("C4.wav", 60, 0, 127)),
/// );
/// preset.ui.push(UIElement::knob("Attack", "ENV_ATTACK", 0.0, 10.0));
///
/// assert!(preset.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPreset {
    /// Preset name shown by the plugin.
    pub name: String,
    /// UI canvas width.
    pub width: u32,
    /// UI canvas height.
    pub height: u32,
    /// Background image path.
    pub bg_image: Option<String>,
    /// Background colour, 8-digit ARGB hex with optional `#`.
    pub bg_color: Option<String>,
    /// Coordinate interpretation.
    pub layout_mode: LayoutMode,
    /// Background image placement.
    pub background_mode: BackgroundMode,
    /// Legacy flat mappings.
    pub mappings: Vec<SampleMapping>,
    /// Legacy flat zone list.
    pub sample_manager: SampleManager,
    /// Base note for [`InstrumentPreset::auto_map`].
    pub start_note: u8,
    /// Offer an attack control.
    pub have_attack: bool,
    /// Offer a decay control.
    pub have_decay: bool,
    /// Offer a sustain control.
    pub have_sustain: bool,
    /// Offer a release control.
    pub have_release: bool,
    /// Use the plugin's built-in tone control.
    pub have_tone: bool,
    /// Use the plugin's built-in chorus control.
    pub have_chorus: bool,
    /// Use the plugin's built-in reverb control.
    pub have_reverb: bool,
    /// Use the plugin's built-in mod wheel control.
    pub have_midicc1: bool,
    /// Hide the plugin's attack control.
    pub no_attack: bool,
    /// Hide the plugin's decay control.
    pub no_decay: bool,
    /// Every group silences every other group.
    pub cut_all_by_all: bool,
    /// How cut voices are silenced.
    pub silencing_mode: SilencingMode,
    /// UI controls.
    pub ui: UiSection,
    /// Instrument-level envelope.
    pub envelope: GroupEnvelope,
    /// Global effects keyed by logical effect name.
    pub effects: BTreeMap<String, EffectParams>,
    /// Modulators.
    pub lfos: Vec<Lfo>,
    /// Modulator routes.
    pub modulation_routes: Vec<ModulationRoute>,
    /// Sample groups.
    pub sample_groups: Vec<SampleGroup>,
    /// Directory of the imported file, used to resolve relative sample paths.
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

impl Default for InstrumentPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl InstrumentPreset {
    /// Create a blank preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_UI_WIDTH,
            height: DEFAULT_UI_HEIGHT,
            bg_image: None,
            bg_color: None,
            layout_mode: LayoutMode::Relative,
            background_mode: BackgroundMode::TopLeft,
            mappings: Vec::new(),
            sample_manager: SampleManager::default(),
            start_note: DEFAULT_START_NOTE,
            have_attack: true,
            have_decay: true,
            have_sustain: true,
            have_release: true,
            have_tone: false,
            have_chorus: false,
            have_reverb: false,
            have_midicc1: false,
            no_attack: false,
            no_decay: false,
            cut_all_by_all: false,
            silencing_mode: SilencingMode::Normal,
            ui: UiSection::default(),
            envelope: GroupEnvelope::default(),
            effects: BTreeMap::new(),
            lfos: Vec::new(),
            modulation_routes: Vec::new(),
            sample_groups: Vec::new(),
            source_dir: None,
        }
    }

    /// Zones from the legacy representations: the sample manager if it has
    /// any, otherwise zones synthesized from `mappings`.
    pub fn legacy_zones(&self) -> Vec<SampleZone> {
        if self.sample_manager.is_empty() {
            self.mappings.iter().map(SampleMapping::to_zone).collect()
        } else {
            self.sample_manager.zones.clone()
        }
    }

    /// Every zone the exporter would consider, from the authoritative source.
    pub fn all_zones(&self) -> Vec<SampleZone> {
        if self.sample_groups.is_empty() {
            self.legacy_zones()
        } else {
            self.sample_groups
                .iter()
                .flat_map(|g| g.samples.iter().cloned())
                .collect()
        }
    }

    /// Look up an LFO by name.
    pub fn lfo(&self, name: &str) -> Option<&Lfo> {
        self.lfos.iter().find(|lfo| lfo.name == name)
    }

    /// Add the default ADSR knobs for every enabled `have_*` flag whose
    /// label is not already on the UI. Returns how many were added.
    pub fn add_envelope_controls(&mut self) -> usize {
        let stages = [
            (self.have_attack, "Attack", "ENV_ATTACK", 10.0, self.envelope.attack),
            (self.have_decay, "Decay", "ENV_DECAY", 25.0, self.envelope.decay),
            (self.have_sustain, "Sustain", "ENV_SUSTAIN", 1.0, self.envelope.sustain),
            (self.have_release, "Release", "ENV_RELEASE", 25.0, self.envelope.release),
        ];

        let mut added = 0;
        for (enabled, label, parameter, max, value) in stages {
            if !enabled || self.ui.has_label(label) {
                continue;
            }
            let offset = i32::try_from(added).unwrap_or(0) * 70;
            let knob = UIElement::knob(label, parameter, 0.0, max)
                .at(200 + offset, 75)
                .with_value(value)
                .with_binding(Binding::new(BindingType::Amp, parameter));
            self.ui.push(knob);
            added += 1;
        }
        added
    }

    /// Write the 0/1 range defaults back onto knobs and sliders that lack
    /// them.
    pub fn fill_control_defaults(&mut self) {
        for el in &mut self.ui.elements {
            if el.is_value_control() {
                let (min, max) = el.range();
                el.min_val = Some(min);
                el.max_val = Some(max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlKind;

    #[test]
    fn test_blank_preset_defaults() {
        let preset = InstrumentPreset::default();
        assert_eq!(preset.name, "Untitled");
        assert_eq!((preset.width, preset.height), (812, 375));
        assert_eq!(preset.start_note, 21);
        assert!(preset.have_attack && preset.have_release);
        assert!(!preset.have_reverb && !preset.cut_all_by_all);
        assert_eq!(preset.silencing_mode, SilencingMode::Normal);
        assert_eq!(preset.envelope, GroupEnvelope::default());
    }

    #[test]
    fn test_envelope_defaults() {
        let env = GroupEnvelope::default();
        assert_eq!((env.attack, env.decay, env.sustain, env.release), (0.01, 1.0, 1.0, 0.43));
    }

    #[test]
    fn test_groups_are_authoritative() {
        let mut preset = InstrumentPreset::new("p");
        preset.mappings.push(SampleMapping::new("legacy.wav", 60, 60, 60));
        assert_eq!(preset.all_zones().len(), 1);

        preset
            .sample_groups
            .push(SampleGroup::new("g").with_sample(SampleZone::new("a.wav", 40, 40, 40)));
        preset
            .sample_groups
            .push(SampleGroup::new("g2").with_sample(SampleZone::new("b.wav", 41, 41, 41)));
        let zones = preset.all_zones();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].path, PathBuf::from("a.wav"));
    }

    #[test]
    fn test_sample_manager_before_mappings() {
        let mut preset = InstrumentPreset::new("p");
        preset.mappings.push(SampleMapping::new("m.wav", 60, 60, 60));
        preset
            .sample_manager
            .add_zone(SampleZone::new("z.wav", 62, 62, 62));
        let zones = preset.legacy_zones();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].root_note, 62);
    }

    #[test]
    fn test_add_envelope_controls_skips_existing_labels() {
        let mut preset = InstrumentPreset::new("p");
        preset.have_sustain = false;
        preset
            .ui
            .push(UIElement::knob("Release", "ENV_RELEASE", 0.0, 5.0));

        let added = preset.add_envelope_controls();
        assert_eq!(added, 2);

        let labels: Vec<_> = preset.ui.elements.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Release", "Attack", "Decay"]);

        let attack = &preset.ui.elements[1];
        assert_eq!(attack.kind(), ControlKind::Knob);
        assert_eq!(attack.range(), (0.0, 10.0));
        assert_eq!(attack.value, Some(0.01));
        assert_eq!((attack.x, attack.y), (200, 75));
        assert_eq!(preset.ui.elements[2].x, 270);
        assert_eq!(attack.bindings[0].binding_type, BindingType::Amp);
    }

    #[test]
    fn test_fill_control_defaults() {
        let mut preset = InstrumentPreset::new("p");
        let mut knob = UIElement::new("knob", "Drive");
        knob.target = Some("FX_DRIVE".into());
        preset.ui.push(knob);
        preset.ui.push(UIElement::new("label", "Title"));

        preset.fill_control_defaults();
        assert_eq!(preset.ui.elements[0].min_val, Some(0.0));
        assert_eq!(preset.ui.elements[0].max_val, Some(1.0));
        assert_eq!(preset.ui.elements[1].min_val, None);
    }
}
