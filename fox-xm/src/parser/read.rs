//! XM header parsing and decode entry points

use std::fmt;

use fox_core::{ByteCursor, DecodeContext, DecodeError, Decoded, FormatDecoder, NoTrace};

use super::instrument::parse_instrument;
use super::pattern::parse_pattern;
use crate::module::XmModule;
use crate::{
    MAX_CHANNELS, MAX_INSTRUMENTS, MAX_PATTERNS, MAX_SONG_LENGTH, MIN_SONG_LENGTH, XM_MAGIC,
    XM_MARKER, XM_PREAMBLE_SIZE,
};

/// Stateless XM decoder for use in a format registry
#[derive(Debug, Clone, Copy, Default)]
pub struct XmDecoder;

impl FormatDecoder for XmDecoder {
    type Module = XmModule;

    fn name(&self) -> &'static str {
        "XM"
    }

    fn decode(
        &self,
        data: &[u8],
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Decoded<XmModule>, DecodeError> {
        Decoded::from_result(parse_xm_with(data, ctx))
    }
}

/// Parse an XM file into an XmModule
///
/// Data that does not start with the XM signature fails with
/// [`DecodeError::FormatMismatch`].
///
/// # Example
/// ```ignore
/// let xm_data = std::fs::read("song.xm")?;
/// let module = parse_xm(&xm_data)?;
/// println!("Loaded: {}", module.title);
/// ```
pub fn parse_xm(data: &[u8]) -> Result<XmModule, DecodeError> {
    let mut sink = NoTrace;
    parse_xm_with(data, &mut DecodeContext::new(&mut sink))
}

/// Parse an XM file, reporting every decoded item to the context's trace sink
pub fn parse_xm_with(data: &[u8], ctx: &mut DecodeContext<'_>) -> Result<XmModule, DecodeError> {
    let mut cursor = ByteCursor::new(data);

    // Signature (17 bytes, any letter case)
    let mismatch = DecodeError::FormatMismatch { format: "XM" };
    let magic = cursor.read_bytes(XM_MAGIC.len()).map_err(|_| mismatch.clone())?;
    if !magic.eq_ignore_ascii_case(XM_MAGIC) {
        return Err(mismatch);
    }

    // Module title (20 bytes)
    let title = field(&mut cursor, ctx, "title", |c| c.read_text(20))?;

    // 0x1A marker (1 byte)
    let marker_offset = cursor.offset();
    let marker = cursor.read_u8()?;
    if marker != XM_MARKER {
        return Err(DecodeError::invalid(
            marker_offset,
            format!("expected marker {XM_MARKER:#04x}, found {marker:#04x}"),
        ));
    }

    // Tracker name (20 bytes)
    let tracker_name = field(&mut cursor, ctx, "tracker_name", |c| c.read_text(20))?;

    // Version (2 bytes)
    let version = field(&mut cursor, ctx, "version", ByteCursor::read_u16_le)?;

    // Header size (4 bytes), measured from the start of this field
    let header_size = field(&mut cursor, ctx, "header_size", ByteCursor::read_u32_le)?;

    let song_length_offset = cursor.offset();
    let song_length = field(&mut cursor, ctx, "song_length", ByteCursor::read_u16_le)?;
    if !(MIN_SONG_LENGTH..=MAX_SONG_LENGTH).contains(&song_length) {
        return Err(DecodeError::invalid(
            song_length_offset,
            format!("song length {song_length} outside {MIN_SONG_LENGTH}..={MAX_SONG_LENGTH}"),
        ));
    }

    let restart_position = field(&mut cursor, ctx, "restart_position", ByteCursor::read_u16_le)?;

    let channels_offset = cursor.offset();
    let num_channels = field(&mut cursor, ctx, "number_of_channels", ByteCursor::read_u16_le)?;
    if num_channels > MAX_CHANNELS {
        return Err(DecodeError::invalid(
            channels_offset,
            format!("{num_channels} channels exceeds the maximum of {MAX_CHANNELS}"),
        ));
    }

    let patterns_offset = cursor.offset();
    let num_patterns = field(&mut cursor, ctx, "number_of_patterns", ByteCursor::read_u16_le)?;
    if num_patterns > MAX_PATTERNS {
        return Err(DecodeError::invalid(
            patterns_offset,
            format!("{num_patterns} patterns exceeds the maximum of {MAX_PATTERNS}"),
        ));
    }

    let instruments_offset = cursor.offset();
    let num_instruments =
        field(&mut cursor, ctx, "number_of_instruments", ByteCursor::read_u16_le)?;
    if num_instruments > MAX_INSTRUMENTS {
        return Err(DecodeError::invalid(
            instruments_offset,
            format!("{num_instruments} instruments exceeds the maximum of {MAX_INSTRUMENTS}"),
        ));
    }

    let flags = field(&mut cursor, ctx, "flags", ByteCursor::read_u16_le)?;
    let default_tempo = field(&mut cursor, ctx, "default_tempo", ByteCursor::read_u16_le)?;
    let default_bpm = field(&mut cursor, ctx, "default_bpm", ByteCursor::read_u16_le)?;

    // Pattern order table (song_length bytes)
    let order_table = field(&mut cursor, ctx, "pattern_order", |c| {
        c.read_bytes(song_length as usize).map(<[u8]>::to_vec)
    })?;

    // Patterns start right after the declared header
    cursor.seek((header_size as usize).saturating_add(XM_PREAMBLE_SIZE))?;

    let mut patterns = Vec::with_capacity(num_patterns as usize);
    for _ in 0..num_patterns {
        patterns.push(parse_pattern(&mut cursor, num_channels, ctx)?);
    }

    let mut instruments = Vec::with_capacity(num_instruments as usize);
    for _ in 0..num_instruments {
        instruments.push(parse_instrument(&mut cursor, ctx)?);
    }

    tracing::debug!(
        title = %title,
        channels = num_channels,
        patterns = num_patterns,
        instruments = num_instruments,
        "decoded XM module"
    );

    Ok(XmModule {
        title,
        tracker_name,
        version,
        header_size,
        song_length,
        restart_position,
        num_channels,
        num_patterns,
        num_instruments,
        flags,
        default_tempo,
        default_bpm,
        order_table,
        patterns,
        instruments,
    })
}

/// Read one header field and report it to the trace sink
fn field<'a, T: fmt::Debug>(
    cursor: &mut ByteCursor<'a>,
    ctx: &mut DecodeContext<'_>,
    record: &str,
    read: impl FnOnce(&mut ByteCursor<'a>) -> Result<T, DecodeError>,
) -> Result<T, DecodeError> {
    let offset = cursor.offset();
    let value = read(cursor)?;
    ctx.trace(offset, record, &value);
    Ok(value)
}
