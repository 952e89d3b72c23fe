//! Instrument preset model for DecentSampler `.dspreset` files.
//!
//! This crate reads, validates, builds and writes DecentSampler instruments:
//! sample groups and zones, UI controls with their parameter bindings, LFO
//! modulation, per-group effect chains and MIDI CC assignments.
//!
//! # Features
//!
//! - **Import**: Parse a `.dspreset` document into an [`InstrumentPreset`]
//! - **Validation**: Collect every reason a preset cannot be exported
//! - **Export**: Render the document and copy samples next to it
//! - **Auto-mapping**: Sequential or note-name based mapping of a sample folder
//! - **Settings**: Persistent user settings and platform paths
//!
//! # Example
//!
//! ```rust,no_run
//! use dspreset::{InstrumentPreset, SampleGroup, SampleZone, UIElement};
//!
//! let mut preset = InstrumentPreset::new("Felt Piano");
//! preset.sample_groups.push(
//!     SampleGroup::new("Main")
//!         .with_sample(SampleZone::new("samples/C4.wav", 60, 0, 127)),
//! );
//! preset.ui.push(UIElement::knob("Tone", "FX_FILTER_FREQUENCY", 60.0, 22000.0));
//!
//! let report = preset.to_dspreset("out/Felt Piano.dspreset").unwrap();
//! println!("copied {} samples", report.copied);
//!
//! let reloaded = InstrumentPreset::from_dspreset(&report.output).unwrap();
//! assert_eq!(reloaded.sample_groups.len(), 1);
//! ```

mod control;
mod error;
mod export;
mod import;
mod modulation;
mod params;
mod preset;
mod samples;
mod settings;
mod wire;
mod zone;

mod automap;

/// Filename analysis and note-name based mapping.
pub mod mapping;

/// Platform-specific paths for settings and preset discovery.
pub mod paths;

/// Pre-export validation.
pub mod validation;

/// Owned XML element tree used by the importer and exporter.
pub mod xml;

pub use automap::list_wav_files;
pub use control::{
    Binding, BindingLevel, BindingType, ControlKind, KeyboardColorRange, MenuOption, UIElement,
    UiSection,
};
pub use error::{ConfigError, ExportError, MapError, ParseError};
pub use export::{
    DEFAULT_BG_COLOR, ExportOptions, ExportReport, MIN_VERSION, normalized_bg_color,
    unique_control_names,
};
pub use mapping::{NoteRange, smart_map};
pub use modulation::{
    Lfo, LfoSync, ModulationRoute, ModulatorTarget, TargetLevel, TargetType, Waveform,
};
pub use params::{EffectParams, ParamValue, parse_param_value};
pub use preset::{
    BackgroundMode, DEFAULT_START_NOTE, DEFAULT_UI_HEIGHT, DEFAULT_UI_WIDTH, GroupEnvelope,
    InstrumentPreset, LayoutMode, SilencingMode,
};
pub use samples::{CopyPolicy, CopyStats, PlannedCopy, SamplePlan};
pub use settings::{MAX_RECENT_FILES, Settings};
pub use validation::{ValidationError, validate_preset};
pub use wire::WireValue;
pub use zone::{
    FULL_VELOCITY, GroupEffect, LoopMode, SampleGroup, SampleManager, SampleMapping, SampleZone,
    SeqMode,
};

/// Re-export the effects catalog.
pub use dspreset_catalog::{EffectCategory, EffectDescriptor, EffectsCatalog, ParamKind, ParamSpec};
