//! Reading `.dspreset` documents into an [`InstrumentPreset`].
//!
//! Every optional attribute has a default; a missing attribute is never an
//! error. A present attribute whose value cannot be read as the expected
//! number is reported as [`ParseError::InvalidAttribute`]. Semantic checks
//! (key ranges, missing targets) are left to validation.

use std::path::Path;
use std::str::FromStr;

use dspreset_catalog::EffectsCatalog;
use tracing::{debug, info, warn};

use crate::control::{Binding, KeyboardColorRange, MenuOption, UIElement};
use crate::error::ParseError;
use crate::modulation::{Lfo, ModulationRoute, ModulatorTarget};
use crate::params::{EffectParams, ParamValue};
use crate::preset::{DEFAULT_UI_HEIGHT, DEFAULT_UI_WIDTH, GroupEnvelope, InstrumentPreset};
use crate::wire::WireValue;
use crate::xml::{self, Element};
use crate::zone::{GroupEffect, SampleGroup, SampleZone};

/// Tag shared by every group when `cut_all_by_all` is set.
pub(crate) const CUT_GROUP_TAG: &str = "cutgroup0";

impl InstrumentPreset {
    /// Import a preset from a `.dspreset` file.
    ///
    /// Relative sample paths are later resolved against the file's directory.
    pub fn from_dspreset(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ParseError::read_file(path, e))?;
        let mut preset = Self::from_xml_str(&content)?;
        preset.source_dir = path.parent().map(Path::to_path_buf);

        info!(
            path = %path.display(),
            groups = preset.sample_groups.len(),
            controls = preset.ui.len(),
            "imported preset"
        );
        Ok(preset)
    }

    /// Import a preset from an in-memory document.
    pub fn from_xml_str(document: &str) -> Result<Self, ParseError> {
        let root = xml::parse_document(document)?;
        if root.name != "DecentSampler" {
            warn!(root = %root.name, "unexpected root element, reading it anyway");
        }

        let mut preset = InstrumentPreset::new(root.attr("presetName").unwrap_or("Untitled"));

        if let Some(ui) = root.find("ui") {
            read_ui(&mut preset, ui)?;
        }
        if let Some(modulators) = root.find("modulators") {
            read_modulators(&mut preset, modulators)?;
        }
        if let Some(groups) = root.find("groups") {
            read_groups(&mut preset, groups)?;
        }

        let catalog = EffectsCatalog::new();
        if let Some(effects) = root.child("effects") {
            for effect in effects.children_named("effect") {
                let (kind, params) = read_effect(&catalog, effect);
                preset.effects.entry(kind).or_default().extend(params);
            }
        }
        if let Some(midi) = root.child("midi") {
            read_midi(&mut preset, midi)?;
        }

        Ok(preset)
    }
}

// --- attribute helpers ---

fn parse_attr<T: FromStr>(el: &Element, key: &str) -> Result<Option<T>, ParseError> {
    el.attr(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ParseError::invalid_attribute(&el.name, key, raw))
        })
        .transpose()
}

fn attr_or<T: FromStr>(el: &Element, key: &str, default: T) -> Result<T, ParseError> {
    Ok(parse_attr(el, key)?.unwrap_or(default))
}

fn string_attr(el: &Element, key: &str) -> Option<String> {
    el.attr(key).map(str::to_string)
}

/// `true` only for a case-insensitive `"true"` literal.
fn literal_flag(el: &Element, key: &str) -> bool {
    el.attr(key).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn bool_attr(el: &Element, key: &str) -> Result<Option<bool>, ParseError> {
    el.attr(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ParseError::invalid_attribute(&el.name, key, raw)),
        })
        .transpose()
}

fn wire_attr<T: WireValue>(el: &Element, key: &str) -> T {
    match el.attr(key) {
        None => T::default(),
        Some(raw) => T::from_wire(raw.trim()).unwrap_or_else(|| {
            warn!(element = %el.name, attribute = key, value = raw, "unknown value, using default");
            T::default()
        }),
    }
}

/// Volume in dB, written either as `"-3dB"` or as a plain number.
fn db_attr(el: &Element, key: &str) -> Result<Option<f64>, ParseError> {
    el.attr(key)
        .map(|raw| {
            let trimmed = raw.trim();
            let number = trimmed
                .strip_suffix("dB")
                .or_else(|| trimmed.strip_suffix("db"))
                .unwrap_or(trimmed);
            number
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseError::invalid_attribute(&el.name, key, raw))
        })
        .transpose()
}

fn tags_attr(el: &Element) -> Vec<String> {
    el.attr("tags")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a `"lo,hi"` velocity range.
pub(crate) fn parse_velocity_range(raw: &str) -> Option<(u8, u8)> {
    let (lo, hi) = raw.split_once(',')?;
    Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?))
}

// --- sections ---

fn read_ui(preset: &mut InstrumentPreset, ui: &Element) -> Result<(), ParseError> {
    preset.width = attr_or(ui, "width", DEFAULT_UI_WIDTH)?;
    preset.height = attr_or(ui, "height", DEFAULT_UI_HEIGHT)?;
    preset.bg_image = string_attr(ui, "bgImage");
    preset.bg_color = string_attr(ui, "bgColor");
    preset.layout_mode = wire_attr(ui, "layoutMode");
    preset.background_mode = wire_attr(ui, "bgMode");

    preset.have_reverb = literal_flag(ui, "haveReverb");
    preset.have_tone = literal_flag(ui, "haveTone");
    preset.have_chorus = literal_flag(ui, "haveChorus");
    preset.have_midicc1 = literal_flag(ui, "haveMidicc1");
    preset.no_attack = literal_flag(ui, "noAttack");
    preset.no_decay = literal_flag(ui, "noDecay");

    for tab in ui.children_named("tab") {
        for el in &tab.children {
            preset.ui.push(read_control(el)?);
        }
    }

    if let Some(keyboard) = ui.child("keyboard") {
        let ranges = keyboard
            .children_named("color")
            .map(read_color_range)
            .collect::<Result<Vec<_>, _>>()?;
        preset.ui.push(UIElement::keyboard(ranges));
    }

    debug!(controls = preset.ui.len(), "read ui section");
    Ok(())
}

fn read_control(el: &Element) -> Result<UIElement, ParseError> {
    let label = el
        .attr("label")
        .or_else(|| el.attr("parameterName"))
        .unwrap_or(&el.name);

    let mut control = UIElement::new(el.name.as_str(), label);
    control.x = attr_or(el, "x", 0)?;
    control.y = attr_or(el, "y", 0)?;
    control.width = attr_or(el, "width", 64)?;
    control.height = attr_or(el, "height", 64)?;
    control.skin = string_attr(el, "skin");
    control.widget_type = string_attr(el, "widgetType");
    control.min_val = parse_attr(el, "minValue")?;
    control.max_val = parse_attr(el, "maxValue")?;
    control.value = parse_attr(el, "value")?;
    control.default_value = parse_attr(el, "defaultValue")?;
    control.style = string_attr(el, "style");
    control.orientation = string_attr(el, "orientation");
    control.text_color = string_attr(el, "textColor");
    control.text_size = parse_attr(el, "textSize")?;
    control.track_foreground_color = string_attr(el, "trackForegroundColor");
    control.track_background_color = string_attr(el, "trackBackgroundColor");
    control.show_label = bool_attr(el, "showLabel")?;

    control.bindings = el
        .children_named("binding")
        .map(read_binding)
        .collect::<Result<Vec<_>, _>>()?;
    control.target = control
        .bindings
        .first()
        .map(|b| b.parameter.clone())
        .filter(|p| !p.is_empty());

    for option in el.children_named("option") {
        let mut entry = MenuOption::new(option.attr("name").unwrap_or_default());
        entry.bindings = option
            .children_named("binding")
            .map(read_binding)
            .collect::<Result<Vec<_>, _>>()?;
        control.options.push(entry);
    }

    control.color_ranges = el
        .children_named("color")
        .map(read_color_range)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(control)
}

fn read_binding(el: &Element) -> Result<Binding, ParseError> {
    Ok(Binding {
        binding_type: wire_attr(el, "type"),
        level: wire_attr(el, "level"),
        parameter: el.attr("parameter").unwrap_or_default().to_string(),
        position: attr_or(el, "position", 0)?,
        group_index: parse_attr(el, "groupIndex")?,
        effect_index: parse_attr(el, "effectIndex")?,
        effect_type: string_attr(el, "effectType"),
        translation: string_attr(el, "translation"),
        translation_table: string_attr(el, "translationTable"),
        translation_output_min: parse_attr(el, "translationOutputMin")?,
        translation_output_max: parse_attr(el, "translationOutputMax")?,
    })
}

fn read_color_range(el: &Element) -> Result<KeyboardColorRange, ParseError> {
    let defaults = KeyboardColorRange::default();
    Ok(KeyboardColorRange {
        lo_note: attr_or(el, "loNote", defaults.lo_note)?,
        hi_note: attr_or(el, "hiNote", defaults.hi_note)?,
        color: string_attr(el, "color").unwrap_or(defaults.color),
        pressed_color: string_attr(el, "pressedColor").unwrap_or(defaults.pressed_color),
    })
}

fn read_modulators(preset: &mut InstrumentPreset, modulators: &Element) -> Result<(), ParseError> {
    for (index, el) in modulators.children_named("lfo").enumerate() {
        let mut lfo = Lfo::new(
            el.attr("name")
                .map_or_else(|| format!("lfo{}", index + 1), str::to_string),
        );
        lfo.frequency = attr_or(el, "frequency", lfo.frequency)?;
        lfo.waveform = wire_attr(el, "waveform");
        lfo.amplitude = attr_or(el, "amplitude", lfo.amplitude)?;
        lfo.offset = attr_or(el, "offset", lfo.offset)?;
        lfo.phase = attr_or(el, "phase", lfo.phase)?;
        lfo.sync = wire_attr(el, "sync");
        if let Some(length) = el.attr("syncLength") {
            lfo.sync_length = length.to_string();
        }
        lfo.retrigger = bool_attr(el, "retrigger")?.unwrap_or(false);

        for binding in el.children_named("binding") {
            let target = ModulatorTarget {
                target_type: wire_attr(binding, "type"),
                parameter: binding.attr("parameter").unwrap_or_default().to_string(),
                level: wire_attr(binding, "level"),
                position: attr_or(binding, "position", 0)?,
                group_index: parse_attr(binding, "groupIndex")?,
                effect_index: parse_attr(binding, "effectIndex")?,
            };
            let mut route = ModulationRoute::new(lfo.name.as_str(), target);
            route.amount = attr_or(binding, "amount", route.amount)?;
            route.invert = bool_attr(binding, "invert")?.unwrap_or(false);
            preset.modulation_routes.push(route);
        }

        preset.lfos.push(lfo);
    }
    Ok(())
}

fn read_envelope(el: &Element, base: GroupEnvelope) -> Result<GroupEnvelope, ParseError> {
    Ok(GroupEnvelope {
        attack: attr_or(el, "attack", base.attack)?,
        decay: attr_or(el, "decay", base.decay)?,
        sustain: attr_or(el, "sustain", base.sustain)?,
        release: attr_or(el, "release", base.release)?,
    })
}

fn read_groups(preset: &mut InstrumentPreset, groups: &Element) -> Result<(), ParseError> {
    preset.envelope = read_envelope(groups, preset.envelope)?;

    let catalog = EffectsCatalog::new();
    let mut legacy_envelope_seen = false;

    for group_el in groups.children_named("group") {
        // Legacy files carry the instrument envelope as a child of a group.
        if !legacy_envelope_seen && let Some(env) = group_el.child("envelope") {
            preset.envelope = read_envelope(env, GroupEnvelope::default())?;
            legacy_envelope_seen = true;
        }

        let mut group = SampleGroup::new(group_el.attr("name").unwrap_or_default());
        group.enabled = bool_attr(group_el, "enabled")?.unwrap_or(true);
        group.volume = db_attr(group_el, "volume")?.unwrap_or(0.0);
        group.pan = attr_or(group_el, "pan", 0.0)?;
        group.attack = parse_attr(group_el, "attack")?;
        group.decay = parse_attr(group_el, "decay")?;
        group.sustain = parse_attr(group_el, "sustain")?;
        group.release = parse_attr(group_el, "release")?;
        group.tags = tags_attr(group_el);

        if group_el.attr("silencedByTags") == Some(CUT_GROUP_TAG) {
            preset.cut_all_by_all = true;
            preset.silencing_mode = wire_attr(group_el, "silencingMode");
            group.tags.retain(|t| t != CUT_GROUP_TAG);
        }

        if let Some(effects) = group_el.child("effects") {
            for effect in effects.children_named("effect") {
                let (kind, params) = read_effect(&catalog, effect);
                group.group_fx.push(GroupEffect { kind, params });
            }
        }

        for sample in group_el.children_named("sample") {
            group.add_sample(read_zone(sample)?);
        }

        debug!(group = %group.name, zones = group.len(), "read group");
        preset.sample_groups.push(group);
    }
    Ok(())
}

fn read_zone(el: &Element) -> Result<SampleZone, ParseError> {
    let mut zone = SampleZone::new(
        el.attr("path").unwrap_or_default(),
        attr_or(el, "rootNote", 60)?,
        attr_or(el, "loNote", 0)?,
        attr_or(el, "hiNote", 127)?,
    );

    zone.velocity_range = match el.attr("velocityRange") {
        Some(raw) => parse_velocity_range(raw)
            .ok_or_else(|| ParseError::invalid_attribute(&el.name, "velocityRange", raw))?,
        None => (attr_or(el, "loVel", 0)?, attr_or(el, "hiVel", 127)?),
    };
    zone.seq_mode = wire_attr(el, "seqMode");
    zone.seq_position = attr_or(el, "seqPosition", 1)?;
    zone.volume = db_attr(el, "volume")?.unwrap_or(0.0);
    zone.pan = attr_or(el, "pan", 0.0)?;
    zone.tune = attr_or(el, "tune", 0.0)?;
    zone.start = attr_or(el, "start", 0)?;
    zone.end = parse_attr(el, "end")?;
    zone.loop_enabled = bool_attr(el, "loopEnabled")?.unwrap_or(false);
    zone.loop_start = parse_attr(el, "loopStart")?;
    zone.loop_end = parse_attr(el, "loopEnd")?;
    zone.loop_crossfade = attr_or(el, "loopCrossfade", 0.0)?;
    zone.loop_mode = wire_attr(el, "loopMode");
    zone.tags = tags_attr(el);
    Ok(zone)
}

/// Logical effect name plus every non-`type` attribute.
fn read_effect(catalog: &EffectsCatalog, el: &Element) -> (String, EffectParams) {
    let wire_type = el.attr("type").unwrap_or_default();
    let kind = catalog
        .by_wire_type(wire_type)
        .map_or_else(|| wire_type.to_string(), |d| d.name.to_string());

    let params = el
        .attrs
        .iter()
        .filter(|(k, _)| k != "type")
        .map(|(k, v)| (k.clone(), ParamValue::from_raw(v)))
        .collect();
    (kind, params)
}

fn read_midi(preset: &mut InstrumentPreset, midi: &Element) -> Result<(), ParseError> {
    for cc in midi.children_named("cc") {
        let Some(number) = parse_attr::<u8>(cc, "number")? else {
            continue;
        };
        for binding in cc.children_named("binding") {
            let position: usize = attr_or(binding, "position", 0)?;
            match preset.ui.elements.get_mut(position) {
                Some(control) => control.midi_cc = Some(number),
                None => warn!(cc = number, position, "MIDI binding points past the last control"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{BindingType, ControlKind};
    use crate::modulation::{LfoSync, TargetType, Waveform};
    use crate::preset::{BackgroundMode, LayoutMode, SilencingMode};
    use crate::zone::{LoopMode, SeqMode};

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DecentSampler minVersion="1.0.2" presetName="Felt Piano">
  <ui width="900" height="400" bgColor="FF101010" bgImage="bg.png" layoutMode="absolute" bgMode="stretch"
      haveReverb="TRUE" haveTone="false" haveChorus="yes" noDecay="true">
    <tab name="main">
      <labeled-knob x="10" y="20" label="Cutoff" minValue="0" maxValue="1" value="0.5" textSize="14">
        <binding type="effect" level="instrument" position="0" parameter="FX_FILTER_FREQUENCY"/>
      </labeled-knob>
      <control parameterName="Volume" style="linear_vertical" orientation="vertical">
        <binding type="amp" level="instrument" parameter="AMP_VOLUME"/>
      </control>
      <menu x="5">
        <option name="Close"><binding type="group" level="instrument" position="0" parameter="ENABLED"/></option>
        <option name="Far"/>
      </menu>
    </tab>
    <keyboard>
      <color loNote="36" hiNote="72" color="FF00AAFF"/>
    </keyboard>
  </ui>
  <modulators>
    <lfo name="wobble" frequency="2.5" waveform="s&amp;h" sync="tempo" syncLength="1/8" retrigger="true">
      <binding type="effect" level="instrument" parameter="FX_MIX" effectIndex="1" amount="-0.5"/>
    </lfo>
  </modulators>
  <groups attack="0.2" decay="2" sustain="0.5" release="1" volume="-3dB">
    <group name="Main" volume="-6dB" pan="0.25" tags="soft,close" release="3.5"
           silencedByTags="cutgroup0" silencingMode="fast">
      <sample path="samples/C4.wav" rootNote="60" loNote="59" hiNote="61" velocityRange="10,100"
              seqMode="random" seqPosition="2" volume="-1.5dB" tune="12" start="100" end="48000"
              loopEnabled="true" loopStart="200" loopEnd="40000" loopCrossfade="0.05" loopMode="bidirectional"/>
      <sample path="samples/D4.wav" rootNote="62" loVel="64" hiVel="127"/>
      <effects><effect type="lowpass" frequency="8000"/></effects>
    </group>
    <group enabled="false"/>
  </groups>
  <effects>
    <effect type="reverb" wetLevel="0.4" roomSize="0.8"/>
    <effect type="mystery" amount="3dB"/>
  </effects>
  <midi>
    <cc number="1"><binding level="ui" type="control" parameter="VALUE" position="1"/></cc>
  </midi>
</DecentSampler>"#;

    #[test]
    fn test_minimal_document_defaults() {
        let preset = InstrumentPreset::from_xml_str("<DecentSampler/>").unwrap();
        assert_eq!(preset.name, "Untitled");
        assert_eq!((preset.width, preset.height), (812, 375));
        assert_eq!(preset.layout_mode, LayoutMode::Relative);
        assert_eq!(preset.background_mode, BackgroundMode::TopLeft);
        assert!(!preset.have_reverb);
        assert!(preset.ui.is_empty());
        assert!(preset.sample_groups.is_empty());
        assert_eq!(preset.envelope, GroupEnvelope::default());
    }

    #[test]
    fn test_ui_section() {
        let preset = InstrumentPreset::from_xml_str(FULL).unwrap();
        assert_eq!(preset.name, "Felt Piano");
        assert_eq!((preset.width, preset.height), (900, 400));
        assert_eq!(preset.bg_color.as_deref(), Some("FF101010"));
        assert_eq!(preset.bg_image.as_deref(), Some("bg.png"));
        assert_eq!(preset.layout_mode, LayoutMode::Absolute);
        assert_eq!(preset.background_mode, BackgroundMode::Stretch);
        assert!(preset.have_reverb);
        assert!(!preset.have_chorus, "only a literal 'true' enables a flag");
        assert!(preset.no_decay);

        let labels: Vec<_> = preset.ui.elements.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Cutoff", "Volume", "menu", "keyboard"]);

        let cutoff = &preset.ui.elements[0];
        assert_eq!(cutoff.kind(), ControlKind::Knob);
        assert_eq!((cutoff.x, cutoff.y, cutoff.width, cutoff.height), (10, 20, 64, 64));
        assert_eq!(cutoff.target.as_deref(), Some("FX_FILTER_FREQUENCY"));
        assert_eq!(cutoff.bindings[0].binding_type, BindingType::Effect);
        assert_eq!(cutoff.value, Some(0.5));
        assert_eq!(cutoff.text_size, Some(14));

        let volume = &preset.ui.elements[1];
        assert_eq!(volume.kind(), ControlKind::Slider);
        assert_eq!(volume.midi_cc, Some(1));
        assert_eq!(volume.min_val, None);

        let menu = &preset.ui.elements[2];
        assert_eq!(menu.kind(), ControlKind::Menu);
        assert_eq!(menu.options.len(), 2);
        assert_eq!(menu.options[0].bindings[0].parameter, "ENABLED");

        let keyboard = preset.ui.keyboard().unwrap();
        assert_eq!(keyboard.color_ranges[0].lo_note, 36);
        assert_eq!(keyboard.color_ranges[0].pressed_color, "FF888888");
    }

    #[test]
    fn test_modulators() {
        let preset = InstrumentPreset::from_xml_str(FULL).unwrap();
        let lfo = preset.lfo("wobble").unwrap();
        assert_eq!(lfo.frequency, 2.5);
        assert_eq!(lfo.waveform, Waveform::SampleAndHold);
        assert_eq!(lfo.sync, LfoSync::Tempo);
        assert_eq!(lfo.sync_length, "1/8");
        assert!(lfo.retrigger);

        assert_eq!(preset.modulation_routes.len(), 1);
        let route = &preset.modulation_routes[0];
        assert_eq!(route.modulator_name, "wobble");
        assert_eq!(route.target.target_type, TargetType::Effect);
        assert_eq!(route.target.effect_index, Some(1));
        assert_eq!(route.target.group_index, None);
        assert_eq!(route.amount, -0.5);
    }

    #[test]
    fn test_groups_and_zones() {
        let preset = InstrumentPreset::from_xml_str(FULL).unwrap();
        assert_eq!(preset.envelope.attack, 0.2);
        assert_eq!(preset.envelope.release, 1.0);
        assert!(preset.cut_all_by_all);
        assert_eq!(preset.silencing_mode, SilencingMode::Fast);

        assert_eq!(preset.sample_groups.len(), 2);
        let main = &preset.sample_groups[0];
        assert_eq!(main.name, "Main");
        assert_eq!(main.volume, -6.0);
        assert_eq!(main.pan, 0.25);
        assert_eq!(main.tags, vec!["soft", "close"]);
        assert_eq!(main.release, Some(3.5));
        assert_eq!(main.attack, None);
        assert_eq!(main.group_fx[0].kind, "Lowpass");
        assert_eq!(main.group_fx[0].params["frequency"], ParamValue::Number(8000.0));

        let zone = &main.samples[0];
        assert_eq!((zone.root_note, zone.lo_note, zone.hi_note), (60, 59, 61));
        assert_eq!(zone.velocity_range, (10, 100));
        assert_eq!(zone.seq_mode, SeqMode::Random);
        assert_eq!(zone.seq_position, 2);
        assert_eq!(zone.volume, -1.5);
        assert_eq!(zone.tune, 12.0);
        assert_eq!((zone.start, zone.end), (100, Some(48000)));
        assert!(zone.loop_enabled);
        assert_eq!((zone.loop_start, zone.loop_end), (Some(200), Some(40000)));
        assert_eq!(zone.loop_mode, LoopMode::Bidirectional);

        let second = &main.samples[1];
        assert_eq!(second.velocity_range, (64, 127));
        assert_eq!((second.lo_note, second.hi_note), (0, 127));

        let disabled = &preset.sample_groups[1];
        assert!(!disabled.enabled);
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_global_effects_keep_raw_values() {
        let preset = InstrumentPreset::from_xml_str(FULL).unwrap();
        let reverb = &preset.effects["Reverb"];
        assert_eq!(reverb["wetLevel"], ParamValue::Number(0.4));
        assert_eq!(reverb["roomSize"], ParamValue::Number(0.8));

        let unknown = &preset.effects["mystery"];
        assert_eq!(unknown["amount"], ParamValue::Text("3dB".to_string()));
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let doc = r#"<DecentSampler><groups><group><sample path="a.wav" rootNote="C4"/></group></groups></DecentSampler>"#;
        let err = InstrumentPreset::from_xml_str(doc).unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidAttribute { ref attribute, ref value, .. } if attribute == "rootNote" && value == "C4"),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_unexpected_root_is_not_fatal() {
        let preset = InstrumentPreset::from_xml_str(r#"<Instrument presetName="x"/>"#).unwrap();
        assert_eq!(preset.name, "x");
    }

    #[test]
    fn test_malformed_xml() {
        let err = InstrumentPreset::from_xml_str("<DecentSampler><ui></DecentSampler>").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }), "got: {err:?}");
    }

    #[test]
    fn test_velocity_range_parse() {
        assert_eq!(parse_velocity_range("10,100"), Some((10, 100)));
        assert_eq!(parse_velocity_range(" 0 , 127 "), Some((0, 127)));
        assert_eq!(parse_velocity_range("10"), None);
        assert_eq!(parse_velocity_range("a,b"), None);
    }

    #[test]
    fn test_unknown_enum_value_defaults() {
        let doc = r#"<DecentSampler><groups><group><sample path="a.wav" seqMode="shuffle"/></group></groups></DecentSampler>"#;
        let preset = InstrumentPreset::from_xml_str(doc).unwrap();
        assert_eq!(preset.sample_groups[0].samples[0].seq_mode, SeqMode::RoundRobin);
    }
}
