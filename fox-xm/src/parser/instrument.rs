//! Instrument records, sample headers and sample payloads

use fox_core::{ByteCursor, DecodeContext, DecodeError, SampleData, delta_decode};

use crate::module::{
    EnvelopeFlags, XmEnvelope, XmInstrument, XmInstrumentDetail, XmSample, bit_depth,
};
use crate::{ENVELOPE_VALUES, KEYMAP_SIZE, PACKING_ADPCM, SAMPLE_HEADER_SIZE, ZERO_SAMPLE_REALIGNMENT};

/// Parse a single instrument, its sample headers and its sample data
pub(crate) fn parse_instrument(
    cursor: &mut ByteCursor<'_>,
    ctx: &mut DecodeContext<'_>,
) -> Result<XmInstrument, DecodeError> {
    let start = cursor.offset();

    // Instrument header size (4 bytes)
    let header_size = cursor.read_u32_le()?;

    // Instrument name (22 bytes)
    let name = cursor.read_text(22)?;

    // Instrument type (1 byte) - always 0
    let instrument_type = cursor.read_u8()?;

    // Number of samples (2 bytes)
    let num_samples = cursor.read_u16_le()?;
    ctx.trace(start, "instrument", &(&name, num_samples));

    if num_samples == 0 {
        cursor.rewind(ZERO_SAMPLE_REALIGNMENT)?;
        return Ok(XmInstrument {
            header_size,
            name,
            instrument_type,
            num_samples,
            detail: None,
        });
    }

    // Sample header size (4 bytes)
    let sample_header_size = cursor.read_u32_le()?;

    // Sample number for all notes (96 bytes)
    let keymap = cursor.read_array::<KEYMAP_SIZE>()?;

    // Envelope tables (48 bytes each)
    let volume_values = read_envelope_values(cursor)?;
    let panning_values = read_envelope_values(cursor)?;

    // Envelope control points, envelope types and auto-vibrato (14 bytes)
    let [
        vol_points,
        pan_points,
        vol_sustain,
        vol_loop_start,
        vol_loop_end,
        pan_sustain,
        pan_loop_start,
        pan_loop_end,
        vol_type,
        pan_type,
        vibrato_type,
        vibrato_sweep,
        vibrato_depth,
        vibrato_rate,
    ] = cursor.read_array::<14>()?;

    // Volume fadeout (2 bytes)
    let volume_fadeout = cursor.read_u16_le()?;

    // Reserved (22 bytes)
    let mut reserved = [0u16; 11];
    for word in reserved.iter_mut() {
        *word = cursor.read_u16_le()?;
    }

    let samples = parse_samples(cursor, num_samples, sample_header_size, ctx)?;

    Ok(XmInstrument {
        header_size,
        name,
        instrument_type,
        num_samples,
        detail: Some(XmInstrumentDetail {
            sample_header_size,
            keymap,
            volume_envelope: XmEnvelope {
                values: volume_values,
                num_points: vol_points,
                sustain_point: vol_sustain,
                loop_start: vol_loop_start,
                loop_end: vol_loop_end,
                flags: EnvelopeFlags(vol_type),
            },
            panning_envelope: XmEnvelope {
                values: panning_values,
                num_points: pan_points,
                sustain_point: pan_sustain,
                loop_start: pan_loop_start,
                loop_end: pan_loop_end,
                flags: EnvelopeFlags(pan_type),
            },
            vibrato_type,
            vibrato_sweep,
            vibrato_depth,
            vibrato_rate,
            volume_fadeout,
            reserved,
            samples,
        }),
    })
}

fn read_envelope_values(
    cursor: &mut ByteCursor<'_>,
) -> Result<[u16; ENVELOPE_VALUES], DecodeError> {
    let mut values = [0u16; ENVELOPE_VALUES];
    for value in values.iter_mut() {
        *value = cursor.read_u16_le()?;
    }
    Ok(values)
}

/// Read all sample headers, then every payload in header order
fn parse_samples(
    cursor: &mut ByteCursor<'_>,
    num_samples: u16,
    sample_header_size: u32,
    ctx: &mut DecodeContext<'_>,
) -> Result<Vec<XmSample>, DecodeError> {
    let capacity = (num_samples as usize).min(cursor.remaining() / SAMPLE_HEADER_SIZE);
    let mut samples = Vec::with_capacity(capacity);

    for _ in 0..num_samples {
        let start = cursor.offset();
        let sample = parse_sample_header(cursor)?;

        let consumed = cursor.offset() - start;
        if consumed as u64 != u64::from(sample_header_size) {
            return Err(DecodeError::Consistency {
                offset: start,
                what: "sample header size",
                expected: u64::from(sample_header_size),
                found: consumed as u64,
            });
        }

        ctx.trace(start, "sample", &sample);
        samples.push(sample);
    }

    for sample in samples.iter_mut() {
        let start = cursor.offset();
        sample.data = read_sample_data(cursor, sample)?;
        ctx.trace(start, "sample_data", &sample.data);
    }

    Ok(samples)
}

/// Parse a 40-byte sample header; the audio is filled in afterwards
fn parse_sample_header(cursor: &mut ByteCursor<'_>) -> Result<XmSample, DecodeError> {
    let length = cursor.read_u32_le()?;
    let loop_start = cursor.read_u32_le()?;
    let loop_length = cursor.read_u32_le()?;
    let volume = cursor.read_u8()?;
    let finetune = cursor.read_i8()?;
    let sample_type = cursor.read_u8()?;
    let panning = cursor.read_u8()?;
    let relative_note = cursor.read_i8()?;
    let packing_type = cursor.read_u8()?;
    let name = cursor.read_text(22)?;

    Ok(XmSample {
        length,
        loop_start,
        loop_length,
        volume,
        finetune,
        sample_type,
        panning,
        relative_note,
        packing_type,
        name,
        data: SampleData::I8(Vec::new()),
    })
}

/// Read `length` bytes of delta-encoded audio and reconstruct the amplitudes
fn read_sample_data(
    cursor: &mut ByteCursor<'_>,
    sample: &XmSample,
) -> Result<SampleData, DecodeError> {
    if sample.packing_type == PACKING_ADPCM {
        return Err(DecodeError::Unsupported {
            feature: "XM ADPCM sample packing",
        });
    }

    let raw = cursor.read_bytes(sample.length as usize)?;

    Ok(match bit_depth(sample.sample_type) {
        16 => {
            // An odd trailing byte is not part of any frame
            let deltas: Vec<i16> = raw
                .chunks_exact(2)
                .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            SampleData::I16(delta_decode(&deltas))
        }
        _ => {
            let deltas: Vec<i8> = raw.iter().map(|&b| b as i8).collect();
            SampleData::I8(delta_decode(&deltas))
        }
    })
}
