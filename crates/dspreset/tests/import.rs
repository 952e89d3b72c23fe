//! Importing hand-written documents, including older layouts.

use dspreset::{InstrumentPreset, ParseError, SilencingMode};

#[test]
fn legacy_envelope_inside_first_group() {
    let doc = r#"<DecentSampler>
  <groups>
    <group>
      <envelope attack="0.5" release="2"/>
      <sample path="a.wav" rootNote="60"/>
    </group>
    <group>
      <envelope attack="9"/>
      <sample path="b.wav" rootNote="62"/>
    </group>
  </groups>
</DecentSampler>"#;

    let preset = InstrumentPreset::from_xml_str(doc).unwrap();
    assert_eq!(preset.envelope.attack, 0.5);
    assert_eq!(preset.envelope.release, 2.0);
    assert_eq!(preset.envelope.decay, 1.0);
    assert_eq!(preset.sample_groups.len(), 2);
    assert_eq!(preset.sample_groups[1].attack, None);
}

#[test]
fn velocity_attributes() {
    let doc = r#"<DecentSampler>
  <groups>
    <group>
      <sample path="a.wav" velocityRange="10, 90" loVel="1" hiVel="2"/>
      <sample path="b.wav" loVel="64"/>
      <sample path="c.wav"/>
    </group>
  </groups>
</DecentSampler>"#;

    let preset = InstrumentPreset::from_xml_str(doc).unwrap();
    let ranges: Vec<_> = preset.sample_groups[0]
        .samples
        .iter()
        .map(|z| z.velocity_range)
        .collect();
    assert_eq!(ranges, vec![(10, 90), (64, 127), (0, 127)]);
}

#[test]
fn bad_velocity_range_is_an_error() {
    let doc = r#"<DecentSampler><groups><group><sample path="a.wav" velocityRange="loud"/></group></groups></DecentSampler>"#;
    let err = InstrumentPreset::from_xml_str(doc).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidAttribute { ref attribute, .. } if attribute == "velocityRange"
    ));
}

#[test]
fn cut_group_is_lifted_to_instrument() {
    let doc = r#"<DecentSampler>
  <groups>
    <group name="Open" tags="hat,cutgroup0" silencedByTags="cutgroup0" silencingMode="fast">
      <sample path="open.wav"/>
    </group>
  </groups>
</DecentSampler>"#;

    let preset = InstrumentPreset::from_xml_str(doc).unwrap();
    assert!(preset.cut_all_by_all);
    assert_eq!(preset.silencing_mode, SilencingMode::Fast);
    assert_eq!(preset.sample_groups[0].tags, vec!["hat"]);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = InstrumentPreset::from_dspreset("/no/such/file.dspreset").unwrap_err();
    assert!(matches!(err, ParseError::ReadFile { .. }));
}

#[test]
fn source_dir_is_recorded() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("p.dspreset");
    std::fs::write(&path, "<DecentSampler/>").unwrap();

    let preset = InstrumentPreset::from_dspreset(&path).unwrap();
    assert_eq!(preset.source_dir.as_deref(), Some(temp.path()));
    assert_eq!(preset.name, "Untitled");
}
