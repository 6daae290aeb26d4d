//! Pattern records and the packed note codec

use fox_core::{ByteCursor, DecodeContext, DecodeError};

use crate::module::{XmNote, XmPattern};
use crate::{MAX_PATTERN_ROWS, MIN_PATTERN_ROWS};

/// Parse one pattern record: a 9-byte header followed by `packed_size` bytes
/// of note data
pub(crate) fn parse_pattern(
    cursor: &mut ByteCursor<'_>,
    num_channels: u16,
    ctx: &mut DecodeContext<'_>,
) -> Result<XmPattern, DecodeError> {
    let start = cursor.offset();

    // Pattern header length (4 bytes), informational only
    let header_size = cursor.read_u32_le()?;

    // Packing type (1 byte) - always 0
    let packing_type = cursor.read_u8()?;

    // Number of rows (2 bytes)
    let rows_offset = cursor.offset();
    let num_rows = cursor.read_u16_le()?;
    if !(MIN_PATTERN_ROWS..=MAX_PATTERN_ROWS).contains(&num_rows) {
        return Err(DecodeError::invalid(
            rows_offset,
            format!("pattern row count {num_rows} outside {MIN_PATTERN_ROWS}..={MAX_PATTERN_ROWS}"),
        ));
    }

    // Packed pattern data size (2 bytes)
    let packed_size = cursor.read_u16_le()?;
    ctx.trace(start, "pattern", &(num_rows, packed_size));

    let mut packed = cursor.sub_cursor(packed_size as usize)?;
    let channels = if packed_size == 0 {
        // Blank pattern: the note stream is omitted entirely
        vec![vec![XmNote::default(); num_rows as usize]; num_channels as usize]
    } else {
        unpack_channels(&mut packed, num_channels, num_rows)?
    };

    Ok(XmPattern {
        header_size,
        packing_type,
        num_rows,
        packed_size,
        channels,
    })
}

/// Decode a row-major note stream into one note sequence per channel
pub(crate) fn unpack_channels(
    cursor: &mut ByteCursor<'_>,
    num_channels: u16,
    num_rows: u16,
) -> Result<Vec<Vec<XmNote>>, DecodeError> {
    let mut channels = vec![Vec::with_capacity(num_rows as usize); num_channels as usize];

    for _ in 0..num_rows {
        for channel in channels.iter_mut() {
            channel.push(unpack_note(cursor)?);
        }
    }

    Ok(channels)
}

/// Unpack a single note from the pattern data
pub(crate) fn unpack_note(cursor: &mut ByteCursor<'_>) -> Result<XmNote, DecodeError> {
    let first_byte = cursor.read_u8()?;

    // Check if this is a packed note (high bit set)
    if first_byte & 0x80 != 0 {
        // Packed format - low five bits gate the fields that follow
        let mut note = XmNote::default();

        if first_byte & 0x01 != 0 {
            note.note = cursor.read_u8()?;
        }
        if first_byte & 0x02 != 0 {
            note.instrument = cursor.read_u8()?;
        }
        if first_byte & 0x04 != 0 {
            note.volume = cursor.read_u8()?;
        }
        if first_byte & 0x08 != 0 {
            note.effect_type = cursor.read_u8()?;
        }
        if first_byte & 0x10 != 0 {
            note.effect_param = cursor.read_u8()?;
        }

        Ok(note)
    } else {
        // Unpacked format - the first byte is the note, four more follow
        let [instrument, volume, effect_type, effect_param] = cursor.read_array()?;

        Ok(XmNote {
            note: first_byte,
            instrument,
            volume,
            effect_type,
            effect_param,
        })
    }
}
