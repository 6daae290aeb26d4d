//! Registry behaviour on synthesized XM and SymMOD files

use fox_tracker::{
    DecodeError, Module, ModuleFormat, NoTrace, ParseOptions, TraceEvent, TracingSink,
    decoder_names, parse, parse_with,
};

fn write_fixed_str<const N: usize>(out: &mut Vec<u8>, s: &str) {
    let mut buf = [0u8; N];
    let bytes = s.as_bytes();
    let copy_len = bytes.len().min(N);
    buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
    out.extend_from_slice(&buf);
}

/// One-pattern, one-instrument XM with a 4-frame 8-bit sample
fn minimal_xm(marker: u8) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"Extended Module: ");
    write_fixed_str::<20>(&mut out, "Registry Test");
    out.push(marker);
    write_fixed_str::<20>(&mut out, "FastTracker v2.00");
    out.extend_from_slice(&0x0104u16.to_le_bytes());
    out.extend_from_slice(&276u32.to_le_bytes());
    for value in [1u16, 0, 4, 1, 1, 1, 6, 125] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&[0u8; 256]);

    // Pattern: 2 rows x 4 channels, all empty
    out.extend_from_slice(&9u32.to_le_bytes());
    out.push(0);
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&8u16.to_le_bytes());
    out.extend_from_slice(&[0x80; 8]);

    // Instrument with one sample
    out.extend_from_slice(&263u32.to_le_bytes());
    write_fixed_str::<22>(&mut out, "Square");
    out.push(0);
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 96 + 48 + 48 + 14]);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&[0u8; 22]);

    out.extend_from_slice(&4u32.to_le_bytes()); // length
    out.extend_from_slice(&0u32.to_le_bytes()); // loop start
    out.extend_from_slice(&0u32.to_le_bytes()); // loop length
    out.extend_from_slice(&[64, 0, 0, 128, 0, 0]);
    write_fixed_str::<22>(&mut out, "square");
    out.extend_from_slice(&[64, 0, 0x80, 0]);
    out
}

fn symmod_record(out: &mut Vec<u8>, tag: i32, value: &[u8]) {
    out.extend_from_slice(&tag.to_be_bytes());
    out.extend_from_slice(value);
}

/// SymMOD with one 1x1 pattern and one named, sampled instrument
fn minimal_symmod() -> Vec<u8> {
    let mut out = b"SymM".to_vec();
    out.extend_from_slice(&1i32.to_be_bytes());
    symmod_record(&mut out, -1, &1i32.to_be_bytes());
    symmod_record(&mut out, -2, &1i32.to_be_bytes());
    symmod_record(&mut out, -4, &1i32.to_be_bytes());

    let mut names = vec![0u8; 256];
    names[..4].copy_from_slice(b"pad1");
    let mut block = (names.len() as i32).to_be_bytes().to_vec();
    block.extend_from_slice(&names);
    symmod_record(&mut out, -14, &block);

    symmod_record(&mut out, -11, &[0, 0, 0, 2, 10, 246]);
    symmod_record(&mut out, -13, &[0, 0, 0, 4, 0, 255, 0, 0]);
    symmod_record(&mut out, -16, &[0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']);
    symmod_record(&mut out, 0, &[]);
    out
}

#[test]
fn test_registry_order_is_documented() {
    assert_eq!(decoder_names(), vec!["XM", "SymMOD"]);
}

#[test]
fn test_parse_xm() {
    let module = parse(&minimal_xm(0x1A)).unwrap();

    assert_eq!(module.format(), ModuleFormat::Xm);
    assert_eq!(module.title(), "Registry Test");
    assert_eq!(module.num_channels(), 4);
    assert_eq!(module.num_patterns(), 1);
    assert_eq!(module.num_instruments(), 1);

    let xm = module.as_xm().unwrap();
    let sample = &xm.instruments[0].samples()[0];
    assert_eq!(sample.name, "square");
    assert_eq!(sample.data.len(), 4);
    assert_eq!(sample.data.get(2), Some(-64));
}

#[test]
fn test_symmod_found_after_xm_mismatch() {
    let mut events = Vec::new();
    let mut sink = |event: &TraceEvent<'_>| events.push(event.record.to_string());
    let module = parse_with(&minimal_symmod(), &ParseOptions::default(), &mut sink).unwrap();

    assert_eq!(module.format(), ModuleFormat::SymMod);
    assert_eq!(module.title(), "hello");
    assert_eq!(module.num_channels(), 1);
    assert_eq!(module.num_patterns(), 1);
    assert_eq!(module.num_instruments(), 1);

    let sym = module.as_symmod().unwrap();
    assert_eq!(sym.instruments[0].name.as_deref(), Some("pad1"));
    assert_eq!(sym.instruments[0].data, Some(vec![10, -10]));
    assert!(sym.patterns[0].channels[0][0].is_empty);

    // Only the SymMOD decoder got far enough to report anything
    assert_eq!(events.first().map(String::as_str), Some("version"));
    assert_eq!(events.last().map(String::as_str), Some("eof"));
}

#[test]
fn test_fatal_xm_error_stops_search() {
    let result = parse(&minimal_xm(0x00));
    assert!(
        matches!(result, Err(DecodeError::InvalidModule { offset: 37, .. })),
        "{result:?}"
    );
}

#[test]
fn test_fatal_symmod_error_is_surfaced() {
    let mut data = minimal_symmod();
    data.truncate(data.len() - 4);
    data.extend_from_slice(&(-30i32).to_be_bytes());

    assert!(matches!(
        parse(&data),
        Err(DecodeError::UnknownTag { tag: -30, .. })
    ));
}

#[test]
fn test_unrecognized_format() {
    assert_eq!(parse(b""), Err(DecodeError::UnrecognizedFormat));
    assert_eq!(
        parse(b"IMPM this is an impulse tracker file"),
        Err(DecodeError::UnrecognizedFormat)
    );
    assert_eq!(
        DecodeError::UnrecognizedFormat.to_string(),
        "no decoder recognizes this data"
    );
}

#[test]
fn test_parse_is_deterministic() {
    for data in [minimal_xm(0x1A), minimal_symmod()] {
        let first: Module = parse(&data).unwrap();
        let second: Module = parse(&data).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_size_limit() {
    let data = minimal_xm(0x1A);
    let options = ParseOptions {
        max_input_len: Some(data.len() - 1),
    };

    assert_eq!(
        parse_with(&data, &options, &mut NoTrace),
        Err(DecodeError::InputTooLarge {
            len: data.len(),
            limit: data.len() - 1,
        })
    );
    assert!(parse_with(&data, &ParseOptions::unbounded(), &mut NoTrace).is_ok());
}

#[test]
fn test_options_from_toml() {
    let options: ParseOptions = toml::from_str("max_input_len = 64").unwrap();
    assert!(matches!(
        parse_with(&minimal_symmod(), &options, &mut NoTrace),
        Err(DecodeError::InputTooLarge { limit: 64, .. })
    ));
}

#[test]
fn test_tracing_sink_under_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();

    let module = parse_with(&minimal_xm(0x1A), &ParseOptions::default(), &mut TracingSink);
    assert!(module.is_ok());
}
