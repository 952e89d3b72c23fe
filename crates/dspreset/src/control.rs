//! UI controls, their bindings and the keyboard colour map.

use serde::{Deserialize, Serialize};

use crate::wire::wire_enum;

wire_enum! {
    /// Parameter family a binding drives.
    pub enum BindingType {
        /// Amplitude envelope or volume.
        #[default]
        Amp => "amp",
        /// Effect parameter.
        Effect => "effect",
        /// Another UI control.
        Control => "control",
        /// Engine parameter without a more specific family.
        General => "general",
        /// Group-level parameter such as enable state.
        Group => "group",
    }
}

wire_enum! {
    /// Scope a binding addresses.
    pub enum BindingLevel {
        /// Whole instrument.
        #[default]
        Instrument => "instrument",
        /// One group, selected by `group_index`.
        Group => "group",
        /// All groups carrying a tag.
        Tag => "tag",
        /// A UI control, selected by `position`.
        Ui => "ui",
    }
}

/// Link from a control (or menu option) to an engine parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Parameter family.
    pub binding_type: BindingType,
    /// Scope.
    pub level: BindingLevel,
    /// Symbolic parameter, e.g. `ENV_ATTACK` or `FX_FILTER_FREQUENCY`.
    pub parameter: String,
    /// Index of the addressed item at `level`.
    pub position: u32,
    /// Target group, if any.
    pub group_index: Option<u32>,
    /// Target effect, if any.
    pub effect_index: Option<u32>,
    /// Effect wire type the parameter belongs to.
    pub effect_type: Option<String>,
    /// Value translation mode (`linear`, `table`, ...).
    pub translation: Option<String>,
    /// Lookup table for `translation="table"`.
    pub translation_table: Option<String>,
    /// Lower bound of a linear translation.
    pub translation_output_min: Option<f64>,
    /// Upper bound of a linear translation.
    pub translation_output_max: Option<f64>,
}

impl Binding {
    /// Instrument-level binding at position 0.
    pub fn new(binding_type: BindingType, parameter: impl Into<String>) -> Self {
        Self {
            binding_type,
            level: BindingLevel::Instrument,
            parameter: parameter.into(),
            position: 0,
            group_index: None,
            effect_index: None,
            effect_type: None,
            translation: None,
            translation_table: None,
            translation_output_min: None,
            translation_output_max: None,
        }
    }

    /// Infer a binding from a bare target parameter name.
    ///
    /// `ENV_*` and `AMP_*` drive the amplifier, `FX_*` an effect, anything
    /// else is a general engine parameter.
    pub fn for_target(target: &str) -> Self {
        let upper = target.to_ascii_uppercase();
        let binding_type = if upper.starts_with("ENV_") || upper.starts_with("AMP_") {
            BindingType::Amp
        } else if upper.starts_with("FX_") {
            BindingType::Effect
        } else {
            BindingType::General
        };
        Self::new(binding_type, target)
    }

    /// Set the scope.
    pub fn at_level(mut self, level: BindingLevel, position: u32) -> Self {
        self.level = level;
        self.position = position;
        self
    }

    /// Set the effect type.
    pub fn with_effect_type(mut self, effect_type: impl Into<String>) -> Self {
        self.effect_type = Some(effect_type.into());
        self
    }

    /// Use a linear translation into `min..max`.
    pub fn with_linear_translation(mut self, min: f64, max: f64) -> Self {
        self.translation = Some("linear".to_string());
        self.translation_output_min = Some(min);
        self.translation_output_max = Some(max);
        self
    }
}

/// An entry of a `<menu>` control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Text shown for the option.
    pub name: String,
    /// Bindings applied when the option is selected.
    pub bindings: Vec<Binding>,
}

impl MenuOption {
    /// Option with no bindings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Add a binding.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }
}

/// Colouring of a span of keys on the on-screen keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardColorRange {
    /// First key.
    pub lo_note: u8,
    /// Last key.
    pub hi_note: u8,
    /// Idle colour, 8-digit ARGB hex.
    pub color: String,
    /// Pressed colour, 8-digit ARGB hex.
    pub pressed_color: String,
}

impl Default for KeyboardColorRange {
    fn default() -> Self {
        Self {
            lo_note: 0,
            hi_note: 127,
            color: "FF444444".to_string(),
            pressed_color: "FF888888".to_string(),
        }
    }
}

impl KeyboardColorRange {
    /// Colour a span of keys.
    pub fn new(lo_note: u8, hi_note: u8, color: impl Into<String>) -> Self {
        Self {
            lo_note,
            hi_note,
            color: color.into(),
            ..Self::default()
        }
    }
}

/// What a [`UIElement`] is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Rotary control, exported as `<labeled-knob>`.
    Knob,
    /// Linear control, exported as `<control style="linear_*">`.
    Slider,
    /// Drop-down, exported as `<menu>`.
    Menu,
    /// On-screen keyboard.
    Keyboard,
    /// Anything the exporter does not write.
    Other,
}

/// A control descriptor placed on the instrument UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UIElement {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Visible label.
    pub label: String,
    /// Skin image path.
    pub skin: Option<String>,
    /// Source element name, e.g. `labeled-knob` or `keyboard`.
    pub tag: String,
    /// Editor widget type, e.g. `knob`, `slider` or `menu`.
    pub widget_type: Option<String>,
    /// Parameter this control drives.
    pub target: Option<String>,
    /// Lower bound.
    pub min_val: Option<f64>,
    /// Upper bound.
    pub max_val: Option<f64>,
    /// Current value.
    pub value: Option<f64>,
    /// Value restored on reset.
    pub default_value: Option<f64>,
    /// Control style, e.g. `rotary` or `linear_vertical`.
    pub style: Option<String>,
    /// Slider orientation.
    pub orientation: Option<String>,
    /// Label colour.
    pub text_color: Option<String>,
    /// Label font size.
    pub text_size: Option<u32>,
    /// Filled track colour.
    pub track_foreground_color: Option<String>,
    /// Empty track colour.
    pub track_background_color: Option<String>,
    /// Whether the label is drawn.
    pub show_label: Option<bool>,
    /// Explicit bindings; empty means one is inferred from `target`.
    pub bindings: Vec<Binding>,
    /// Menu entries.
    pub options: Vec<MenuOption>,
    /// MIDI CC that drives this control.
    pub midi_cc: Option<u8>,
    /// Keyboard colour spans.
    pub color_ranges: Vec<KeyboardColorRange>,
}

impl UIElement {
    /// Bare element at the origin with the default 64x64 size.
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
            label: label.into(),
            skin: None,
            tag: tag.into(),
            widget_type: None,
            target: None,
            min_val: None,
            max_val: None,
            value: None,
            default_value: None,
            style: None,
            orientation: None,
            text_color: None,
            text_size: None,
            track_foreground_color: None,
            track_background_color: None,
            show_label: None,
            bindings: Vec::new(),
            options: Vec::new(),
            midi_cc: None,
            color_ranges: Vec::new(),
        }
    }

    /// Rotary knob driving `target`.
    pub fn knob(label: impl Into<String>, target: impl Into<String>, min: f64, max: f64) -> Self {
        let mut el = Self::new("labeled-knob", label);
        el.widget_type = Some("knob".to_string());
        el.target = Some(target.into());
        el.min_val = Some(min);
        el.max_val = Some(max);
        el
    }

    /// Vertical slider driving `target`.
    pub fn slider(label: impl Into<String>, target: impl Into<String>, min: f64, max: f64) -> Self {
        let mut el = Self::new("control", label);
        el.widget_type = Some("slider".to_string());
        el.style = Some("linear_vertical".to_string());
        el.width = 30;
        el.height = 90;
        el.target = Some(target.into());
        el.min_val = Some(min);
        el.max_val = Some(max);
        el
    }

    /// Drop-down menu.
    pub fn menu(label: impl Into<String>) -> Self {
        let mut el = Self::new("menu", label);
        el.widget_type = Some("menu".to_string());
        el.width = 150;
        el.height = 25;
        el
    }

    /// On-screen keyboard with the given colour spans.
    pub fn keyboard(color_ranges: Vec<KeyboardColorRange>) -> Self {
        let mut el = Self::new("keyboard", "keyboard");
        el.color_ranges = color_ranges;
        el
    }

    /// Move the element.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the current value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Add an explicit binding.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Add a menu option.
    pub fn with_option(mut self, option: MenuOption) -> Self {
        self.options.push(option);
        self
    }

    /// Drive this control from a MIDI CC.
    pub fn with_midi_cc(mut self, cc: u8) -> Self {
        self.midi_cc = Some(cc);
        self
    }

    /// Classify the element.
    pub fn kind(&self) -> ControlKind {
        let tag = self.tag.to_ascii_lowercase();
        let widget = self
            .widget_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let linear_style = self
            .style
            .as_deref()
            .is_some_and(|s| s.to_ascii_lowercase().starts_with("linear_"));

        if tag == "menu" || widget == "menu" {
            ControlKind::Menu
        } else if tag == "keyboard" {
            ControlKind::Keyboard
        } else if tag == "slider" || widget == "slider" || (tag == "control" && linear_style) {
            ControlKind::Slider
        } else if is_knob_name(&tag) || is_knob_name(&widget) {
            ControlKind::Knob
        } else {
            ControlKind::Other
        }
    }

    /// Whether the element is a knob or slider.
    pub fn is_value_control(&self) -> bool {
        matches!(self.kind(), ControlKind::Knob | ControlKind::Slider)
    }

    /// The target, if non-empty.
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether the element has both a label and a target.
    pub fn is_exportable(&self) -> bool {
        !self.label.is_empty() && self.target_name().is_some()
    }

    /// `(min, max)` with missing bounds resolved to 0 and 1.
    pub fn range(&self) -> (f64, f64) {
        (self.min_val.unwrap_or(0.0), self.max_val.unwrap_or(1.0))
    }

    /// The value written on export: the current value, else the minimum.
    pub fn export_value(&self) -> f64 {
        self.value.unwrap_or_else(|| self.range().0)
    }

    /// Bindings as exported: the explicit list, or one inferred from `target`.
    pub fn effective_bindings(&self) -> Vec<Binding> {
        if !self.bindings.is_empty() {
            return self.bindings.clone();
        }
        self.target_name()
            .map(|t| vec![Binding::for_target(t)])
            .unwrap_or_default()
    }
}

fn is_knob_name(name: &str) -> bool {
    matches!(name, "knob" | "labeled-knob" | "control")
}

/// The controls on the instrument UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// Elements in canvas order.
    pub elements: Vec<UIElement>,
}

impl UiSection {
    /// Add an element.
    pub fn push(&mut self, element: UIElement) {
        self.elements.push(element);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether any element carries this exact label.
    pub fn has_label(&self, label: &str) -> bool {
        self.elements.iter().any(|el| el.label == label)
    }

    /// The first keyboard element.
    pub fn keyboard(&self) -> Option<&UIElement> {
        self.elements
            .iter()
            .find(|el| el.kind() == ControlKind::Keyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(UIElement::knob("Cutoff", "FX_FILTER_FREQUENCY", 0.0, 1.0).kind(), ControlKind::Knob);
        assert_eq!(UIElement::slider("Vol", "AMP_VOLUME", 0.0, 1.0).kind(), ControlKind::Slider);
        assert_eq!(UIElement::menu("Mic").kind(), ControlKind::Menu);
        assert_eq!(UIElement::keyboard(vec![]).kind(), ControlKind::Keyboard);
        assert_eq!(UIElement::new("label", "Title").kind(), ControlKind::Other);
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let mut el = UIElement::new("button", "Mode");
        el.widget_type = Some("Menu".to_string());
        assert_eq!(el.kind(), ControlKind::Menu);

        let mut el = UIElement::new("Control", "Level");
        el.style = Some("LINEAR_HORIZONTAL".to_string());
        assert_eq!(el.kind(), ControlKind::Slider);

        let mut el = UIElement::new("control", "Level");
        el.style = Some("rotary".to_string());
        assert_eq!(el.kind(), ControlKind::Knob);
    }

    #[test]
    fn test_range_and_export_value() {
        let mut el = UIElement::new("knob", "Gain");
        assert_eq!(el.range(), (0.0, 1.0));
        assert_eq!(el.export_value(), 0.0);

        el.min_val = Some(-12.0);
        assert_eq!(el.export_value(), -12.0);

        el.value = Some(3.0);
        assert_eq!(el.export_value(), 3.0);
    }

    #[test]
    fn test_exportable_requires_label_and_target() {
        let mut el = UIElement::knob("Attack", "ENV_ATTACK", 0.0, 10.0);
        assert!(el.is_exportable());
        el.target = Some(String::new());
        assert!(!el.is_exportable());
        el.target = Some("ENV_ATTACK".into());
        el.label.clear();
        assert!(!el.is_exportable());
    }

    #[test]
    fn test_binding_inferred_from_target() {
        assert_eq!(Binding::for_target("ENV_RELEASE").binding_type, BindingType::Amp);
        assert_eq!(Binding::for_target("AMP_VOLUME").binding_type, BindingType::Amp);
        assert_eq!(Binding::for_target("FX_MIX").binding_type, BindingType::Effect);
        assert_eq!(Binding::for_target("GROUP_ENABLED").binding_type, BindingType::General);

        let el = UIElement::knob("Mix", "FX_MIX", 0.0, 1.0);
        let bindings = el.effective_bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].parameter, "FX_MIX");
        assert_eq!(bindings[0].level, BindingLevel::Instrument);
    }

    #[test]
    fn test_explicit_bindings_win() {
        let el = UIElement::knob("Tone", "FX_FILTER_FREQUENCY", 0.0, 1.0).with_binding(
            Binding::new(BindingType::Effect, "FX_FILTER_FREQUENCY")
                .with_effect_type("lowpass")
                .at_level(BindingLevel::Instrument, 2),
        );
        let bindings = el.effective_bindings();
        assert_eq!(bindings[0].position, 2);
        assert_eq!(bindings[0].effect_type.as_deref(), Some("lowpass"));
    }

    #[test]
    fn test_ui_section_lookup() {
        let mut ui = UiSection::default();
        ui.push(UIElement::knob("Reverb", "FX_REVERB_WET_LEVEL", 0.0, 1.0));
        ui.push(UIElement::keyboard(vec![KeyboardColorRange::new(36, 72, "FF00AAFF")]));
        assert!(ui.has_label("Reverb"));
        assert!(!ui.has_label("reverb"));
        assert_eq!(ui.keyboard().map(|k| k.color_ranges.len()), Some(1));
    }
}
