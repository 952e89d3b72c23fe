//! Filename analysis: note names, variation tags and key/velocity splits.
//!
//! [`smart_map`] combines these into a ready-to-use [`SampleGroup`] from a
//! folder of samples named like `Piano_C4_soft_rr1.wav`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::automap::list_wav_files;
use crate::error::MapError;
use crate::preset::DEFAULT_START_NOTE;
use crate::zone::{SampleGroup, SampleZone, SeqMode};

static NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])([a-g])(sharp|flat|#|s|b)?(-1|\d)(?:[^0-9]|$)")
        .unwrap_or_else(|e| unreachable!("note pattern is valid: {e}"))
});

/// Tag assigned when any of its keywords occurs in the file name.
const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    ("mic_close", &["close", "dry", "direct", "near"]),
    ("mic_distant", &["distant", "far", "wet", "reverb", "room", "hall"]),
    ("velocity_soft", &["soft", "pp", "pianissimo", "light"]),
    ("velocity_medium", &["medium", "mp", "mezzopiano", "normal"]),
    ("velocity_loud", &["loud", "ff", "fortissimo", "hard"]),
    ("articulation_muted", &["muted", "mute"]),
    ("articulation_open", &["open"]),
    ("articulation_sustain", &["sustain", "sus"]),
    ("articulation_staccato", &["staccato", "stacc"]),
    ("round_robin_1", &["rr1", "take1", "var1"]),
    ("round_robin_2", &["rr2", "take2", "var2"]),
    ("round_robin_3", &["rr3", "take3", "var3"]),
    ("round_robin_4", &["rr4", "take4", "var4"]),
];

/// A key span around a root note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRange {
    /// Root note.
    pub root: u8,
    /// Lowest note.
    pub lo: u8,
    /// Highest note.
    pub hi: u8,
}

fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// MIDI note of the first note name in a file name, e.g. `C4` (60), `F#3`,
/// `Bb2`, `Csharp4`, `Dflat3` or `Cs4`.
///
/// The note letter must not follow another letter, so `Bass_A1` yields A1
/// rather than a note inside `Bass`.
pub fn detect_note(filename: &str) -> Option<u8> {
    let stem = file_stem(filename);
    for caps in NOTE_RE.captures_iter(stem) {
        let letter = caps.get(1)?.as_str().to_ascii_uppercase();
        let base: i32 = match letter.as_str() {
            "C" => 0,
            "D" => 2,
            "E" => 4,
            "F" => 5,
            "G" => 7,
            "A" => 9,
            "B" => 11,
            _ => continue,
        };
        let shift = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(acc) if matches!(acc.as_str(), "#" | "s" | "sharp") => 1,
            Some(acc) if matches!(acc.as_str(), "b" | "flat") => -1,
            _ => 0,
        };
        let Ok(octave) = caps.get(3)?.as_str().parse::<i32>() else {
            continue;
        };

        let midi = base + shift + (octave + 1) * 12;
        if let Ok(note) = u8::try_from(midi)
            && note <= 127
        {
            return Some(note);
        }
    }
    None
}

/// Variation tags suggested by a file name, in table order.
pub fn detect_tags(filename: &str) -> Vec<String> {
    let lower = file_stem(filename).to_ascii_lowercase();
    TAG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tag, _)| (*tag).to_string())
        .collect()
}

/// Key spans that fill the keyboard between neighbouring root notes.
///
/// Each note extends halfway towards its neighbours; the first extends down
/// and the last up by half the gap to its only neighbour. A single note
/// covers the whole keyboard. Input order and duplicates do not matter.
pub fn adjacent_ranges(notes: &[u8]) -> Vec<NoteRange> {
    let mut sorted: Vec<u8> = notes.iter().copied().filter(|n| *n <= 127).collect();
    sorted.sort_unstable();
    sorted.dedup();

    if let [only] = sorted.as_slice() {
        return vec![NoteRange {
            root: *only,
            lo: 0,
            hi: 127,
        }];
    }

    let mut ranges: Vec<NoteRange> = Vec::with_capacity(sorted.len());
    for (i, &note) in sorted.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| sorted[p]);
        let next = sorted.get(i + 1).copied();

        let lo = match (ranges.last(), next) {
            (Some(previous), _) => previous.hi + 1,
            (None, Some(next)) => note.saturating_sub((next - note) / 2),
            (None, None) => 0,
        };
        let hi = match (next, prev) {
            (Some(next), _) => note + (next - note) / 2,
            (None, Some(prev)) => note.saturating_add((note - prev) / 2).min(127),
            (None, None) => 127,
        };
        ranges.push(NoteRange { root: note, lo, hi });
    }
    ranges
}

/// Split velocities 0-127 into `layers` contiguous spans of near-equal size.
///
/// Three layers give 0-42, 43-84 and 85-127. More than 128 layers are
/// clamped to 128.
pub fn velocity_layers(layers: usize) -> Vec<(u8, u8)> {
    let n = layers.min(128);
    let bound = |i: usize| (i * 128 + n / 2) / n;
    (0..n)
        .filter_map(|i| {
            let lo = u8::try_from(bound(i)).ok()?;
            let hi = u8::try_from(bound(i + 1) - 1).ok()?;
            Some((lo, hi))
        })
        .collect()
}

/// Build a group from a folder by reading note names out of file names.
///
/// Files with a detected note are spread with [`adjacent_ranges`]; several
/// files on the same note become a round robin. Files without a note are
/// placed one key each above the highest detected note. Every zone carries
/// the tags from [`detect_tags`].
pub fn smart_map(folder: impl AsRef<Path>) -> Result<SampleGroup, MapError> {
    let folder = folder.as_ref();
    let files = list_wav_files(folder)?;

    let mut by_note: BTreeMap<u8, Vec<PathBuf>> = BTreeMap::new();
    let mut orphans = Vec::new();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match detect_note(&name) {
            Some(note) => by_note.entry(note).or_default().push(path),
            None => orphans.push(path),
        }
    }

    let name = folder
        .file_name()
        .map_or_else(|| "Samples".to_string(), |n| n.to_string_lossy().into_owned());
    let mut group = SampleGroup::new(name);

    let notes: Vec<u8> = by_note.keys().copied().collect();
    let mut ranges = adjacent_ranges(&notes);
    if !orphans.is_empty()
        && let Some(last) = ranges.last_mut()
    {
        last.hi = last.root;
    }

    for range in &ranges {
        let Some(paths) = by_note.get(&range.root) else {
            continue;
        };
        for (k, path) in paths.iter().enumerate() {
            let position = u32::try_from(k + 1).unwrap_or(u32::MAX);
            let mut zone = SampleZone::new(path, range.root, range.lo, range.hi)
                .with_sequence(SeqMode::RoundRobin, position);
            zone.tags = tag_path(path);
            group.add_sample(zone);
        }
    }

    let mut next = notes.last().map_or(Some(DEFAULT_START_NOTE), |n| n.checked_add(1));
    for path in orphans {
        let Some(note) = next.filter(|n| *n <= 127) else {
            warn!(path = %path.display(), "no key left for sample, skipping");
            continue;
        };
        let mut zone = SampleZone::new(&path, note, note, note);
        zone.tags = tag_path(&path);
        group.add_sample(zone);
        next = note.checked_add(1);
    }

    debug!(group = %group.name, zones = group.len(), notes = notes.len(), "smart-mapped folder");
    Ok(group)
}

fn tag_path(path: &Path) -> Vec<String> {
    path.file_name()
        .map(|n| detect_tags(&n.to_string_lossy()))
        .unwrap_or_default()
}
