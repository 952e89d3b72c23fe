//! Pre-export validation.
//!
//! Every rule is checked independently and all failures are returned
//! together, so a caller can show the complete list at once.

use std::path::PathBuf;
use thiserror::Error;

use crate::export::unique_control_names;
use crate::preset::InstrumentPreset;
use crate::zone::SampleZone;

/// Highest valid MIDI note or velocity.
const MIDI_MAX: u8 = 127;

/// A reason the preset cannot be exported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No zone exists in groups, the sample manager or legacy mappings
    #[error("no samples: add at least one sample zone")]
    NoSamples,

    /// No knob or slider exists
    #[error("no controls: add at least one knob or slider")]
    NoControls,

    /// A knob or slider has an empty label
    #[error("control #{index} has no label")]
    ControlMissingLabel {
        /// Index of the control in the UI element list.
        index: usize,
    },

    /// A knob or slider has no target parameter
    #[error("control '{label}' has no target parameter")]
    ControlMissingTarget {
        /// Control label.
        label: String,
    },

    /// A knob or slider has an unusable value range
    #[error("control '{label}' has an invalid range {min}..{max}")]
    ControlMissingRange {
        /// Control label.
        label: String,
        /// Resolved minimum.
        min: f64,
        /// Resolved maximum.
        max: f64,
    },

    /// Exported controls and generated names are out of step
    #[error("{controls} exportable controls but {names} generated names")]
    ControlModulatorMismatch {
        /// Number of exportable controls.
        controls: usize,
        /// Number of unique names generated for them.
        names: usize,
    },

    /// A zone's key range is inverted or outside 0-127
    #[error("sample '{}' has invalid key range {lo}..{hi} (root {root})", .path.display())]
    InvalidKeyRange {
        /// Sample path.
        path: PathBuf,
        /// Lowest note.
        lo: u8,
        /// Highest note.
        hi: u8,
        /// Root note.
        root: u8,
    },

    /// A zone's velocity range is inverted or outside 0-127
    #[error("sample '{}' has invalid velocity range {lo}..{hi}", .path.display())]
    InvalidVelocityRange {
        /// Sample path.
        path: PathBuf,
        /// Lowest velocity.
        lo: u8,
        /// Highest velocity.
        hi: u8,
    },
}

fn validate_zone(zone: &SampleZone, errors: &mut Vec<ValidationError>) {
    let (lo, hi, root) = (zone.lo_note, zone.hi_note, zone.root_note);
    if lo > hi || hi > MIDI_MAX || root > MIDI_MAX {
        errors.push(ValidationError::InvalidKeyRange {
            path: zone.path.clone(),
            lo,
            hi,
            root,
        });
    }

    let (vlo, vhi) = zone.velocity_range;
    if vlo > vhi || vhi > MIDI_MAX {
        errors.push(ValidationError::InvalidVelocityRange {
            path: zone.path.clone(),
            lo: vlo,
            hi: vhi,
        });
    }
}

/// Check a preset against every export rule.
///
/// Missing control bounds are treated as 0 and 1, the same resolution the
/// exporter uses; nothing is written back. Use
/// [`InstrumentPreset::fill_control_defaults`] to persist those defaults.
pub fn validate_preset(preset: &InstrumentPreset) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let zones = preset.all_zones();
    if zones.is_empty() {
        errors.push(ValidationError::NoSamples);
    }
    for zone in &zones {
        validate_zone(zone, &mut errors);
    }

    let mut value_controls = 0;
    for (index, el) in preset.ui.elements.iter().enumerate() {
        if !el.is_value_control() {
            continue;
        }
        value_controls += 1;

        if el.label.is_empty() {
            errors.push(ValidationError::ControlMissingLabel { index });
        }
        if el.target_name().is_none() {
            errors.push(ValidationError::ControlMissingTarget {
                label: el.label.clone(),
            });
        }
        let (min, max) = el.range();
        if !min.is_finite() || !max.is_finite() || min > max {
            errors.push(ValidationError::ControlMissingRange {
                label: el.label.clone(),
                min,
                max,
            });
        }
    }
    if value_controls == 0 {
        errors.push(ValidationError::NoControls);
    }

    let exportable: Vec<&str> = preset
        .ui
        .elements
        .iter()
        .filter(|el| el.is_value_control() && el.is_exportable())
        .map(|el| el.label.as_str())
        .collect();
    let names = unique_control_names(exportable.iter().copied());
    let distinct: std::collections::HashSet<&String> = names.iter().collect();
    if names.len() != exportable.len() || distinct.len() != names.len() {
        errors.push(ValidationError::ControlModulatorMismatch {
            controls: exportable.len(),
            names: distinct.len(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl InstrumentPreset {
    /// Check this preset against every export rule.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_preset(self)
    }
}
