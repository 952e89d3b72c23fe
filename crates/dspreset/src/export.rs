//! Writing an [`InstrumentPreset`] as a `.dspreset` document.
//!
//! An export runs in a fixed order: validate, render the whole document in
//! memory while planning every sample copy, copy the samples, then write the
//! document. Validation failures and missing samples abort before anything
//! is written.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use dspreset_catalog::{EffectDescriptor, EffectsCatalog, ParamSpec};
use tracing::{debug, info, warn};

use crate::control::{Binding, BindingLevel, BindingType, ControlKind, UIElement};
use crate::error::ExportError;
use crate::import::CUT_GROUP_TAG;
use crate::params::EffectParams;
use crate::preset::InstrumentPreset;
use crate::samples::{CopyPolicy, SamplePlan};
use crate::validation::validate_preset;
use crate::wire::WireValue;
use crate::xml::{self, Element};
use crate::zone::{FULL_VELOCITY, LoopMode, SampleGroup, SampleZone, SeqMode};

/// Minimum plugin version declared on the root element.
pub const MIN_VERSION: &str = "1.0.2";
/// Background colour used when none (or an invalid one) is set.
pub const DEFAULT_BG_COLOR: &str = "FF222222";

const ENVELOPE_TARGETS: [&str; 4] = ["ENV_ATTACK", "ENV_DECAY", "ENV_SUSTAIN", "ENV_RELEASE"];

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Directory, relative to the output file, that samples are copied into.
    pub samples_dir: String,
    /// Overwrite behaviour for existing sample copies.
    pub copy_policy: CopyPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            samples_dir: "samples".to_string(),
            copy_policy: CopyPolicy::IfStale,
        }
    }
}

/// What an export did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Path of the written document.
    pub output: PathBuf,
    /// Generated unique name of each exported knob or slider, keyed by its
    /// index in the UI element list.
    pub control_names: Vec<(usize, String)>,
    /// Sample files copied.
    pub copied: usize,
    /// Sample files already up to date.
    pub skipped: usize,
    /// Modulator names of routes dropped because no such LFO exists.
    pub dropped_routes: Vec<String>,
}

/// Give every label a unique name: the label itself, or on collision the
/// label followed by `_1`, `_2`, ... in encounter order.
pub fn unique_control_names<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    labels
        .into_iter()
        .map(|label| {
            let mut name = label.to_string();
            let mut n = 1;
            while used.contains(&name) {
                name = format!("{label}_{n}");
                n += 1;
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

/// The `bgColor` to write: 8 hex digits after an optional `#`, else the
/// default.
pub fn normalized_bg_color(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .map(|c| c.strip_prefix('#').unwrap_or(c))
        .filter(|c| c.len() == 8 && c.chars().all(|ch| ch.is_ascii_hexdigit()))
        .unwrap_or(DEFAULT_BG_COLOR)
        .to_string()
}

fn num(value: f64) -> String {
    format!("{value}")
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl InstrumentPreset {
    /// Export with default options.
    ///
    /// The preset itself is not modified: defaults filled in for the
    /// document, such as the background color, are not written back.
    pub fn to_dspreset(&self, path: impl AsRef<Path>) -> Result<ExportReport, ExportError> {
        self.to_dspreset_with(path, &ExportOptions::default())
    }

    /// Export the preset to `path`, copying samples next to it.
    ///
    /// The preset is left unchanged, as with [`InstrumentPreset::to_dspreset`].
    pub fn to_dspreset_with(
        &self,
        path: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<ExportReport, ExportError> {
        let path = path.as_ref();
        validate_preset(self).map_err(ExportError::Validation)?;

        let out_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut plan = SamplePlan::new(out_dir, &options.samples_dir);
        for zone in self.all_zones() {
            plan.reserve_in_place(&zone.path, self.source_dir.as_deref());
        }
        let mut report = ExportReport {
            output: path.to_path_buf(),
            ..ExportReport::default()
        };

        let root = Renderer::new(self, &mut plan, &mut report).render()?;
        let document = xml::write_document(&root)?;

        let stats = plan.execute(options.copy_policy)?;
        report.copied = stats.copied;
        report.skipped = stats.skipped;

        if !out_dir.exists() {
            std::fs::create_dir_all(out_dir).map_err(|e| ExportError::create_dir(out_dir, e))?;
        }
        std::fs::write(path, document).map_err(|e| ExportError::write_file(path, e))?;

        info!(
            path = %path.display(),
            controls = report.control_names.len(),
            copied = report.copied,
            skipped = report.skipped,
            "exported preset"
        );
        Ok(report)
    }
}

/// Builds the document tree for one export.
struct Renderer<'a> {
    preset: &'a InstrumentPreset,
    plan: &'a mut SamplePlan,
    report: &'a mut ExportReport,
    catalog: EffectsCatalog,
}

/// A control as it appears in the `<tab>`.
struct Emitted<'a> {
    element: &'a UIElement,
    name: Option<String>,
}

impl<'a> Renderer<'a> {
    fn new(preset: &'a InstrumentPreset, plan: &'a mut SamplePlan, report: &'a mut ExportReport) -> Self {
        Self {
            preset,
            plan,
            report,
            catalog: EffectsCatalog::new(),
        }
    }

    fn render(mut self) -> Result<Element, ExportError> {
        let preset = self.preset;
        let emitted = self.emitted_controls();

        let mut root = Element::new("DecentSampler")
            .with_attr("minVersion", MIN_VERSION)
            .with_attr("presetName", &preset.name);

        root.push(self.render_ui(&emitted));
        if let Some(modulators) = self.render_modulators() {
            root.push(modulators);
        }
        if let Some(effects) = self.render_effects(&emitted) {
            root.push(effects);
        }
        root.push(self.render_groups()?);
        if let Some(midi) = render_midi(&emitted) {
            root.push(midi);
        }
        for block in self.render_global_blocks(&emitted) {
            root.push(block);
        }
        Ok(root)
    }

    /// Menus plus every knob or slider with a label and target, in UI order.
    fn emitted_controls(&mut self) -> Vec<Emitted<'a>> {
        let preset = self.preset;
        let value_controls: Vec<(usize, &UIElement)> = preset
            .ui
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.is_value_control() && el.is_exportable())
            .collect();
        let names = unique_control_names(value_controls.iter().map(|(_, el)| el.label.as_str()));
        self.report.control_names = value_controls
            .iter()
            .map(|(index, _)| *index)
            .zip(names)
            .collect();

        let mut named = self.report.control_names.iter();
        let mut emitted = Vec::new();
        for (index, el) in preset.ui.elements.iter().enumerate() {
            match el.kind() {
                ControlKind::Menu => emitted.push(Emitted { element: el, name: None }),
                ControlKind::Knob | ControlKind::Slider if el.is_exportable() => {
                    let name = named
                        .next()
                        .filter(|(i, _)| *i == index)
                        .map(|(_, name)| name.clone());
                    emitted.push(Emitted { element: el, name });
                }
                kind => debug!(label = %el.label, ?kind, "control not written to tab"),
            }
        }
        emitted
    }

    fn render_ui(&self, emitted: &[Emitted<'_>]) -> Element {
        let preset = self.preset;
        let ui_flag = |enabled: bool, label: &str| flag(enabled && !preset.ui.has_label(label));

        let mut ui = Element::new("ui")
            .with_attr("width", preset.width)
            .with_attr("height", preset.height)
            .with_attr("bgColor", normalized_bg_color(preset.bg_color.as_deref()))
            .with_attr("layoutMode", preset.layout_mode.as_wire())
            .with_attr("bgMode", preset.background_mode.as_wire());
        if let Some(image) = &preset.bg_image {
            ui.set_attr("bgImage", image);
        }
        ui.set_attr("haveReverb", ui_flag(preset.have_reverb, "Reverb"));
        ui.set_attr("haveTone", ui_flag(preset.have_tone, "Tone"));
        ui.set_attr("haveChorus", ui_flag(preset.have_chorus, "Chorus"));
        ui.set_attr("haveMidicc1", ui_flag(preset.have_midicc1, "MIDI CC1"));
        ui.set_attr("noAttack", flag(preset.no_attack));
        ui.set_attr("noDecay", flag(preset.no_decay));

        let mut tab = Element::new("tab").with_attr("name", "main");
        for control in emitted {
            tab.push(match &control.name {
                Some(name) => render_value_control(control.element, name),
                None => render_menu(control.element),
            });
        }
        ui.push(tab);

        if let Some(keyboard) = preset.ui.keyboard() {
            let mut kb = Element::new("keyboard");
            for range in &keyboard.color_ranges {
                kb.push(
                    Element::new("color")
                        .with_attr("loNote", range.lo_note)
                        .with_attr("hiNote", range.hi_note)
                        .with_attr("color", &range.color)
                        .with_attr("pressedColor", &range.pressed_color),
                );
            }
            ui.push(kb);
        }
        ui
    }

    fn render_modulators(&mut self) -> Option<Element> {
        let preset = self.preset;
        for route in &preset.modulation_routes {
            if preset.lfo(&route.modulator_name).is_none() {
                warn!(
                    modulator = %route.modulator_name,
                    parameter = %route.target.parameter,
                    "dropping modulation route to unknown LFO"
                );
                self.report.dropped_routes.push(route.modulator_name.clone());
            }
        }

        if preset.lfos.is_empty() {
            return None;
        }

        let mut modulators = Element::new("modulators");
        for lfo in &preset.lfos {
            let mut el = Element::new("lfo")
                .with_attr("name", &lfo.name)
                .with_attr("frequency", num(lfo.frequency))
                .with_attr("waveform", lfo.waveform.as_wire())
                .with_attr("amplitude", num(lfo.amplitude))
                .with_attr("offset", num(lfo.offset))
                .with_attr("phase", num(lfo.phase))
                .with_attr("sync", lfo.sync.as_wire())
                .with_attr("syncLength", &lfo.sync_length)
                .with_attr("retrigger", flag(lfo.retrigger));

            for route in preset
                .modulation_routes
                .iter()
                .filter(|r| r.modulator_name == lfo.name)
            {
                let target = &route.target;
                let mut binding = Element::new("binding")
                    .with_attr("type", target.target_type.as_wire())
                    .with_attr("level", target.level.as_wire())
                    .with_attr("position", target.position)
                    .with_attr("parameter", &target.parameter);
                if let Some(group) = target.group_index {
                    binding.set_attr("groupIndex", group);
                }
                if let Some(effect) = target.effect_index {
                    binding.set_attr("effectIndex", effect);
                }
                binding.set_attr("amount", num(route.amount));
                binding.set_attr("invert", flag(route.invert));
                el.push(binding);
            }
            modulators.push(el);
        }
        Some(modulators)
    }

    /// Wire type and attribute name an effect binding writes to.
    fn effect_slot(&self, binding: &Binding) -> Option<(String, String)> {
        let owner = binding
            .effect_type
            .as_deref()
            .and_then(|t| self.catalog.resolve(t));
        let owned_param = owner.and_then(|d| find_bound_param(d, &binding.parameter));

        let (descriptor, param) = match (owner, owned_param) {
            (Some(d), p) => (Some(d), p),
            (None, _) => match self.catalog.find_ds_param(&binding.parameter) {
                Some((d, p)) => (Some(d), Some(p)),
                None => (None, None),
            },
        };

        let wire_type = descriptor
            .map(|d| d.wire_type.to_string())
            .or_else(|| binding.effect_type.clone())?;
        let attribute = param.map_or_else(|| binding.parameter.clone(), |p| p.name.to_string());
        Some((wire_type, attribute))
    }

    fn render_effects(&self, emitted: &[Emitted<'_>]) -> Option<Element> {
        let mut blocks = EffectBlocks::default();

        for (name, params) in &self.preset.effects {
            let wire_type = self
                .catalog
                .resolve(name)
                .map_or(name.as_str(), |d| d.wire_type);
            let block = blocks.block(wire_type);
            for (key, value) in params {
                set_pair(block, key, value.to_wire());
            }
        }

        for control in emitted.iter().filter(|c| c.name.is_some()) {
            let value = num(control.element.export_value());
            for binding in control.element.effective_bindings() {
                if binding.binding_type != BindingType::Effect {
                    continue;
                }
                match self.effect_slot(&binding) {
                    Some((wire_type, attribute)) => {
                        set_pair(blocks.block(&wire_type), &attribute, value.clone());
                    }
                    None => debug!(parameter = %binding.parameter, "effect binding without a known effect"),
                }
            }
        }

        if blocks.0.is_empty() {
            return None;
        }
        let mut effects = Element::new("effects");
        for (wire_type, attrs) in blocks.0 {
            let mut el = Element::new("effect").with_attr("type", &wire_type);
            for (key, value) in attrs {
                el.set_attr(key, value);
            }
            effects.push(el);
        }
        Some(effects)
    }

    fn render_groups(&mut self) -> Result<Element, ExportError> {
        let preset = self.preset;
        let env = preset.envelope;
        let mut groups = Element::new("groups")
            .with_attr("volume", "-3dB")
            .with_attr("attack", num(env.attack))
            .with_attr("decay", num(env.decay))
            .with_attr("sustain", num(env.sustain))
            .with_attr("release", num(env.release));

        if preset.sample_groups.is_empty() {
            for zone in preset.legacy_zones() {
                let mut group = self.group_shell(&SampleGroup::new(""));
                group.push(self.render_zone(&zone)?);
                groups.push(group);
            }
            return Ok(groups);
        }

        for group in &preset.sample_groups {
            if group.is_empty() {
                debug!(group = %group.name, "skipping empty group");
                continue;
            }
            let mut el = self.group_shell(group);
            for zone in &group.samples {
                el.push(self.render_zone(zone)?);
            }
            if !group.group_fx.is_empty() {
                let mut effects = Element::new("effects");
                for fx in &group.group_fx {
                    effects.push(self.render_group_effect(&fx.kind, &fx.params));
                }
                el.push(effects);
            }
            groups.push(el);
        }
        Ok(groups)
    }

    /// A `<group>` with its attributes but no children.
    fn group_shell(&self, group: &SampleGroup) -> Element {
        let preset = self.preset;
        let mut el = Element::new("group");
        if !group.name.is_empty() {
            el.set_attr("name", &group.name);
        }
        el.set_attr("enabled", flag(group.enabled));
        if group.volume != 0.0 {
            el.set_attr("volume", format!("{}dB", num(group.volume)));
        }
        if group.pan != 0.0 {
            el.set_attr("pan", num(group.pan));
        }

        let mut tags = group.tags.clone();
        if preset.cut_all_by_all && !tags.iter().any(|t| t == CUT_GROUP_TAG) {
            tags.push(CUT_GROUP_TAG.to_string());
        }
        if !tags.is_empty() {
            el.set_attr("tags", tags.join(","));
        }

        if group.has_envelope_override() {
            let env = group.effective_envelope(&preset.envelope);
            el.set_attr("attack", num(env.attack));
            el.set_attr("decay", num(env.decay));
            el.set_attr("sustain", num(env.sustain));
            el.set_attr("release", num(env.release));
        }

        if preset.cut_all_by_all {
            el.set_attr("silencedByTags", CUT_GROUP_TAG);
            el.set_attr("silencingMode", preset.silencing_mode.as_wire());
        }
        el
    }

    fn render_group_effect(&self, kind: &str, params: &EffectParams) -> Element {
        let wire_type = self.catalog.resolve(kind).map_or(kind, |d| d.wire_type);
        let mut el = Element::new("effect").with_attr("type", wire_type);
        for (key, value) in params {
            el.set_attr(key.as_str(), value.to_wire());
        }
        el
    }

    fn render_zone(&mut self, zone: &SampleZone) -> Result<Element, ExportError> {
        let relative = self
            .plan
            .add(&zone.path, self.preset.source_dir.as_deref())?;

        let mut el = Element::new("sample")
            .with_attr("path", relative)
            .with_attr("rootNote", zone.root_note)
            .with_attr("loNote", zone.lo_note)
            .with_attr("hiNote", zone.hi_note);

        if zone.velocity_range != FULL_VELOCITY {
            let (lo, hi) = zone.velocity_range;
            el.set_attr("velocityRange", format!("{lo},{hi}"));
        }
        if !zone.tags.is_empty() {
            el.set_attr("tags", zone.tags.join(","));
        }
        if zone.seq_mode != SeqMode::RoundRobin {
            el.set_attr("seqMode", zone.seq_mode.as_wire());
        }
        if zone.seq_position != 1 {
            el.set_attr("seqPosition", zone.seq_position);
        }
        if zone.volume != 0.0 {
            el.set_attr("volume", format!("{}dB", num(zone.volume)));
        }
        if zone.pan != 0.0 {
            el.set_attr("pan", num(zone.pan));
        }
        if zone.tune != 0.0 {
            el.set_attr("tune", num(zone.tune));
        }
        if zone.start != 0 {
            el.set_attr("start", zone.start);
        }
        if let Some(end) = zone.end {
            el.set_attr("end", end);
        }
        if zone.loop_enabled {
            el.set_attr("loopEnabled", "true");
            if let Some(start) = zone.loop_start {
                el.set_attr("loopStart", start);
            }
            if let Some(end) = zone.loop_end {
                el.set_attr("loopEnd", end);
            }
            if zone.loop_crossfade != 0.0 {
                el.set_attr("loopCrossfade", num(zone.loop_crossfade));
            }
            if zone.loop_mode != LoopMode::Forward {
                el.set_attr("loopMode", zone.loop_mode.as_wire());
            }
        }
        Ok(el)
    }

    fn render_global_blocks(&self, emitted: &[Emitted<'_>]) -> Vec<Element> {
        let preset = self.preset;
        let targets: Vec<String> = emitted
            .iter()
            .filter(|c| c.name.is_some())
            .filter_map(|c| c.element.target_name())
            .map(str::to_ascii_uppercase)
            .collect();
        let targets_any = |needle: &str| targets.iter().any(|t| t.contains(needle));

        let mut blocks = Vec::new();
        if targets.iter().any(|t| ENVELOPE_TARGETS.contains(&t.as_str())) {
            blocks.push(
                Element::new("ampeg")
                    .with_attr("attack", "0")
                    .with_attr("decay", "25")
                    .with_attr("sustain", "1")
                    .with_attr("release", "0.43"),
            );
        }
        if targets_any("REVERB_") || preset.have_reverb {
            blocks.extend(self.default_block("reverb", "Reverb", false));
        }
        if targets_any("CHORUS_") || preset.have_chorus {
            blocks.extend(self.default_block("chorus", "Chorus", false));
        }
        if targets_any("FILTER_") || preset.have_tone {
            blocks.extend(self.default_block("filter", "Lowpass", true));
        }
        blocks
    }

    /// An element carrying a catalog effect's default parameter values.
    fn default_block(&self, tag: &str, effect: &str, with_type: bool) -> Option<Element> {
        let descriptor = self.catalog.get(effect)?;
        let mut el = Element::new(tag);
        if with_type {
            el.set_attr("type", descriptor.wire_type);
        }
        for (key, value) in descriptor.default_attributes() {
            el.set_attr(key, value);
        }
        Some(el)
    }
}

/// Global effect attributes keyed by wire type, in first-seen order.
#[derive(Default)]
struct EffectBlocks(Vec<(String, Vec<(String, String)>)>);

impl EffectBlocks {
    fn block(&mut self, wire_type: &str) -> &mut Vec<(String, String)> {
        let index = match self.0.iter().position(|(t, _)| t == wire_type) {
            Some(i) => i,
            None => {
                self.0.push((wire_type.to_string(), Vec::new()));
                self.0.len() - 1
            }
        };
        &mut self.0[index].1
    }
}

fn set_pair(attrs: &mut Vec<(String, String)>, key: &str, value: String) {
    match attrs.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value,
        None => attrs.push((key.to_string(), value)),
    }
}

fn find_bound_param<'d>(descriptor: &'d EffectDescriptor, ds_param: &str) -> Option<&'d ParamSpec> {
    descriptor
        .params
        .iter()
        .find(|p| p.ds_param.is_some_and(|d| d.eq_ignore_ascii_case(ds_param)))
}

fn render_binding(binding: &Binding) -> Element {
    let mut el = Element::new("binding")
        .with_attr("type", binding.binding_type.as_wire())
        .with_attr("level", binding.level.as_wire())
        .with_attr("position", binding.position)
        .with_attr("parameter", &binding.parameter);
    if let Some(group) = binding.group_index {
        el.set_attr("groupIndex", group);
    }
    if let Some(effect) = binding.effect_index {
        el.set_attr("effectIndex", effect);
    }
    if let Some(effect_type) = &binding.effect_type {
        el.set_attr("effectType", effect_type);
    }
    if let Some(translation) = &binding.translation {
        el.set_attr("translation", translation);
    }
    if let Some(table) = &binding.translation_table {
        el.set_attr("translationTable", table);
    }
    if let Some(min) = binding.translation_output_min {
        el.set_attr("translationOutputMin", num(min));
    }
    if let Some(max) = binding.translation_output_max {
        el.set_attr("translationOutputMax", num(max));
    }
    el
}

fn geometry(tag: &str, control: &UIElement) -> Element {
    let mut el = Element::new(tag)
        .with_attr("x", control.x)
        .with_attr("y", control.y)
        .with_attr("width", control.width)
        .with_attr("height", control.height);
    if let Some(skin) = &control.skin {
        el.set_attr("skin", skin);
    }
    el
}

fn render_value_control(control: &UIElement, name: &str) -> Element {
    let (min, max) = control.range();
    let mut el = if control.kind() == ControlKind::Slider {
        let style = control
            .style
            .clone()
            .filter(|s| s.to_ascii_lowercase().starts_with("linear_"))
            .unwrap_or_else(|| match control.orientation.as_deref() {
                Some(o) if o.eq_ignore_ascii_case("horizontal") => "linear_horizontal".to_string(),
                _ => "linear_vertical".to_string(),
            });
        geometry("control", control).with_attr("style", style)
    } else {
        let mut knob = geometry("labeled-knob", control);
        if let Some(style) = &control.style {
            knob.set_attr("style", style);
        }
        knob
    };

    el.set_attr("label", name);
    el.set_attr("parameterName", name);
    el.set_attr("minValue", num(min));
    el.set_attr("maxValue", num(max));
    el.set_attr("value", num(control.export_value()));
    el.set_attr("textColor", control.text_color.as_deref().unwrap_or("AA000000"));
    el.set_attr("textSize", control.text_size.unwrap_or(16));
    if let Some(orientation) = &control.orientation {
        el.set_attr("orientation", orientation);
    }
    if let Some(color) = &control.track_foreground_color {
        el.set_attr("trackForegroundColor", color);
    }
    if let Some(color) = &control.track_background_color {
        el.set_attr("trackBackgroundColor", color);
    }
    if let Some(show) = control.show_label {
        el.set_attr("showLabel", flag(show));
    }
    if let Some(default) = control.default_value {
        el.set_attr("defaultValue", num(default));
    }

    for binding in control.effective_bindings() {
        el.push(render_binding(&binding));
    }
    el
}

fn render_menu(control: &UIElement) -> Element {
    let mut el = geometry("menu", control);
    if !control.label.is_empty() {
        el.set_attr("label", &control.label);
    }
    if let Some(value) = control.value {
        el.set_attr("value", num(value));
    }
    for option in &control.options {
        let mut opt = Element::new("option").with_attr("name", &option.name);
        for binding in &option.bindings {
            opt.push(render_binding(binding));
        }
        el.push(opt);
    }
    el
}

/// `<midi>` block for every control driven by a CC, grouped by CC number.
fn render_midi(emitted: &[Emitted<'_>]) -> Option<Element> {
    let mut by_cc: BTreeMap<u8, Vec<(usize, &UIElement)>> = BTreeMap::new();
    for (position, control) in emitted.iter().enumerate() {
        if let Some(cc) = control.element.midi_cc {
            by_cc.entry(cc).or_default().push((position, control.element));
        }
    }
    if by_cc.is_empty() {
        return None;
    }

    let mut midi = Element::new("midi");
    for (number, controls) in by_cc {
        let mut cc = Element::new("cc").with_attr("number", number);
        for (position, control) in controls {
            let (min, max) = control.range();
            let binding = Binding::new(BindingType::Control, "VALUE")
                .at_level(BindingLevel::Ui, u32::try_from(position).unwrap_or(u32::MAX))
                .with_linear_translation(min, max);
            cc.push(render_binding(&binding));
        }
        midi.push(cc);
    }
    Some(midi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names_in_encounter_order() {
        let names = unique_control_names(["Cutoff", "Cutoff", "Gain", "Cutoff"]);
        assert_eq!(names, vec!["Cutoff", "Cutoff_1", "Gain", "Cutoff_2"]);
    }

    #[test]
    fn test_unique_names_avoid_existing_suffixes() {
        let names = unique_control_names(["A_1", "A", "A"]);
        assert_eq!(names, vec!["A_1", "A", "A_2"]);
    }

    #[test]
    fn test_bg_color() {
        assert_eq!(normalized_bg_color(None), "FF222222");
        assert_eq!(normalized_bg_color(Some("#12AABBCC")), "12AABBCC");
        assert_eq!(normalized_bg_color(Some("12aabbcc")), "12aabbcc");
        assert_eq!(normalized_bg_color(Some("#FFF")), "FF222222");
        assert_eq!(normalized_bg_color(Some("GG000000")), "FF222222");
    }

    #[test]
    fn test_numbers_are_compact() {
        assert_eq!(num(25.0), "25");
        assert_eq!(num(0.43), "0.43");
        assert_eq!(num(-3.0), "-3");
    }

    #[test]
    fn test_slider_style_from_orientation() {
        let mut slider = UIElement::slider("Pan", "AMP_PAN", -1.0, 1.0);
        slider.style = None;
        slider.orientation = Some("horizontal".into());
        let el = render_value_control(&slider, "Pan");
        assert_eq!(el.name, "control");
        assert_eq!(el.attr("style"), Some("linear_horizontal"));
        assert_eq!(el.attr("minValue"), Some("-1"));
        assert_eq!(el.attr("value"), Some("-1"));
    }

    #[test]
    fn test_knob_gets_inferred_binding() {
        let knob = UIElement::knob("Mix", "FX_MIX", 0.0, 1.0).with_value(0.3);
        let el = render_value_control(&knob, "Mix_1");
        assert_eq!(el.name, "labeled-knob");
        assert_eq!(el.attr("label"), Some("Mix_1"));
        assert_eq!(el.attr("parameterName"), Some("Mix_1"));
        assert_eq!(el.attr("textSize"), Some("16"));
        let binding = el.child("binding").unwrap();
        assert_eq!(binding.attr("type"), Some("effect"));
        assert_eq!(binding.attr("parameter"), Some("FX_MIX"));
        assert_eq!(binding.attr("level"), Some("instrument"));
    }
}
