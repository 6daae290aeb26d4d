//! SymMOD record loop and decode entry points

use std::ops::ControlFlow;

use fox_core::{
    ByteCursor, DecodeContext, DecodeError, Decoded, FormatDecoder, NoTrace, nul_terminated_text,
    trim_text,
};

use super::pattern::decode_patterns;
use crate::module::{SymInstrument, SymInstrumentInfo, SymModule};
use crate::tags::{BlockField, LongField, RecordKind};
use crate::{SAMPLE_NAME_MAX_LEN, SAMPLE_NAME_RECORD_SIZE, SYMMOD_MAGIC, SYMMOD_VERSION};

/// Stateless SymMOD decoder for use in a format registry
#[derive(Debug, Clone, Copy, Default)]
pub struct SymModDecoder;

impl FormatDecoder for SymModDecoder {
    type Module = SymModule;

    fn name(&self) -> &'static str {
        "SymMOD"
    }

    fn decode(
        &self,
        data: &[u8],
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Decoded<SymModule>, DecodeError> {
        Decoded::from_result(parse_symmod_with(data, ctx))
    }
}

/// Parse a SymMOD file into a SymModule
///
/// Data that does not start with `SymM` fails with
/// [`DecodeError::FormatMismatch`].
pub fn parse_symmod(data: &[u8]) -> Result<SymModule, DecodeError> {
    let mut sink = NoTrace;
    parse_symmod_with(data, &mut DecodeContext::new(&mut sink))
}

/// Parse a SymMOD file, reporting every record to the context's trace sink
pub fn parse_symmod_with(
    data: &[u8],
    ctx: &mut DecodeContext<'_>,
) -> Result<SymModule, DecodeError> {
    let mut cursor = ByteCursor::new(data);

    let mismatch = DecodeError::FormatMismatch { format: "SymMOD" };
    let magic = cursor
        .read_bytes(SYMMOD_MAGIC.len())
        .map_err(|_| mismatch.clone())?;
    if magic != SYMMOD_MAGIC {
        return Err(mismatch);
    }

    let version_offset = cursor.offset();
    let version = cursor.read_i32_be()?;
    ctx.trace(version_offset, "version", &version);
    if version != SYMMOD_VERSION {
        return Err(DecodeError::invalid(
            version_offset,
            format!("SymMOD version is {version}, expected {SYMMOD_VERSION}"),
        ));
    }

    let mut state = DecodeState::new(version);

    // The stream ends with an EOF record or with the data itself
    while !cursor.is_empty() {
        let tag_offset = cursor.offset();
        let tag = cursor.read_i32_be()?;
        let kind = RecordKind::from_tag(tag).ok_or(DecodeError::UnknownTag {
            tag,
            offset: tag_offset,
        })?;

        if state.read_record(kind, tag_offset, &mut cursor, ctx)?.is_break() {
            ctx.trace(tag_offset, "eof", &tag);
            break;
        }
    }

    state.finish()
}

/// Mutable state of one decode call
struct DecodeState<'a> {
    module: SymModule,
    /// Next instrument slot to receive a sample payload
    current_instrument: usize,
    /// Note data payload and its file offset, decoded after the loop
    note_data: Option<(usize, &'a [u8])>,
}

impl<'a> DecodeState<'a> {
    fn new(version: i32) -> Self {
        Self {
            module: SymModule {
                version,
                ..Default::default()
            },
            current_instrument: 0,
            note_data: None,
        }
    }

    fn read_record(
        &mut self,
        kind: RecordKind,
        offset: usize,
        cursor: &mut ByteCursor<'a>,
        ctx: &mut DecodeContext<'_>,
    ) -> Result<ControlFlow<()>, DecodeError> {
        match kind {
            RecordKind::Long(field) => {
                let value = cursor.read_i32_be()?;
                ctx.trace(offset, field.name(), &value);
                self.set_long(field, value);
            }
            RecordKind::PatternNumb => {
                let value = cursor.read_u32_be()?;
                let patterns = (value >> 16) as u16;
                let positions = (value & 0xFFFF) as u16;
                ctx.trace(offset, "number_of_patterns", &patterns);
                ctx.trace(offset, "number_of_positions", &positions);
                self.module.number_of_patterns = Some(patterns);
                self.module.number_of_positions = Some(positions);
            }
            RecordKind::Block(field) => {
                let (start, bytes) = read_block(cursor)?;
                ctx.trace(offset, field.name(), &bytes.len());
                self.set_block(field, start, bytes);
            }
            RecordKind::Sample => {
                let (_, bytes) = read_block(cursor)?;
                let payload = bytes.iter().map(|&b| b as i8).collect();
                let slot = self.fill_next_slot(Some(payload));
                ctx.trace(offset, "sample", &(slot, bytes.len()));
            }
            RecordKind::EmptySample => {
                let slot = self.fill_next_slot(None);
                ctx.trace(offset, "empty_sample", &slot);
            }
            RecordKind::SampleNames => self.read_sample_names(offset, cursor, ctx)?,
            RecordKind::DeltaSample8 => {
                return Err(DecodeError::Unsupported {
                    feature: "SymMOD 8-bit delta sample",
                });
            }
            RecordKind::DeltaSample16 => {
                return Err(DecodeError::Unsupported {
                    feature: "SymMOD 16-bit delta sample",
                });
            }
            RecordKind::Eof => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }

    fn set_long(&mut self, field: LongField, value: i32) {
        let module = &mut self.module;
        let slot = match field {
            LongField::NumberOfChannels => &mut module.number_of_channels,
            LongField::NumberOfRows => &mut module.number_of_rows,
            LongField::NumberOfInstruments => &mut module.number_of_instruments,
            LongField::NoteSize => &mut module.note_size,
            LongField::SystemSpeed => &mut module.system_speed,
            LongField::IsSong => &mut module.is_song,
            LongField::SampleBoost => &mut module.sample_boost,
            LongField::PitchDiff => &mut module.pitch_diff,
            LongField::SampleDiff => &mut module.sample_diff,
        };
        *slot = Some(value);
    }

    fn set_block(&mut self, field: BlockField, start: usize, bytes: &'a [u8]) {
        let module = &mut self.module;
        match field {
            BlockField::NoteData => self.note_data = Some((start, bytes)),
            BlockField::InfoText => module.info_text = Some(trim_text(bytes)),
            BlockField::SongData => module.song_data = Some(bytes.to_vec()),
            BlockField::Sequence => module.sequence = Some(bytes.to_vec()),
            BlockField::InfoType => module.info_type = Some(bytes.to_vec()),
            BlockField::InfoObject => module.info_object = Some(bytes.to_vec()),
            BlockField::InfoString => module.info_string = Some(bytes.to_vec()),
        }
    }

    /// Read the sample name table into the first `number_of_instruments` slots
    ///
    /// Names and settings merge into existing slots, so payloads that arrived
    /// earlier are kept. A trailing partial record is ignored.
    fn read_sample_names(
        &mut self,
        offset: usize,
        cursor: &mut ByteCursor<'a>,
        ctx: &mut DecodeContext<'_>,
    ) -> Result<(), DecodeError> {
        let count = self.module.number_of_instruments.ok_or_else(|| {
            DecodeError::invalid(offset, "sample name table before number_of_instruments")
        })?;
        let count = usize::try_from(count).unwrap_or(0);

        let (start, table) = read_block(cursor)?;
        let mut records = ByteCursor::new(table);

        for index in 0..count {
            if records.remaining() < SAMPLE_NAME_RECORD_SIZE {
                break;
            }
            let record_offset = start + records.offset();
            let record = records.read_array::<SAMPLE_NAME_RECORD_SIZE>()?;

            let name = nul_terminated_text(&record[..SAMPLE_NAME_MAX_LEN]);
            let slot = self.slot_mut(index);
            slot.name = (!name.is_empty()).then_some(name);
            slot.info = Some(SymInstrumentInfo::from_record(&record));
            ctx.trace(record_offset, "sample_name", &slot.name);
        }

        Ok(())
    }

    fn slot_mut(&mut self, index: usize) -> &mut SymInstrument {
        let instruments = &mut self.module.instruments;
        if instruments.len() <= index {
            instruments.resize_with(index + 1, SymInstrument::default);
        }
        &mut instruments[index]
    }

    /// Store a sample payload in the next slot and return that slot's index
    fn fill_next_slot(&mut self, data: Option<Vec<i8>>) -> usize {
        let index = self.current_instrument;
        self.slot_mut(index).data = data;
        self.current_instrument += 1;
        index
    }

    fn finish(self) -> Result<SymModule, DecodeError> {
        let mut module = self.module;

        if let Some((offset, data)) = self.note_data.filter(|(_, data)| !data.is_empty()) {
            module.patterns =
                decode_patterns(offset, data, module.number_of_channels, module.number_of_rows)?;
        }

        tracing::debug!(
            channels = ?module.number_of_channels,
            patterns = module.patterns.len(),
            instruments = module.instruments.len(),
            "decoded SymMOD module"
        );

        Ok(module)
    }
}

/// Read a length-prefixed block, returning the payload and its offset
fn read_block<'a>(cursor: &mut ByteCursor<'a>) -> Result<(usize, &'a [u8]), DecodeError> {
    let length_offset = cursor.offset();
    let length = cursor.read_i32_be()?;
    let length = usize::try_from(length).map_err(|_| {
        DecodeError::invalid(length_offset, format!("negative block length {length}"))
    })?;

    let start = cursor.offset();
    Ok((start, cursor.read_bytes(length)?))
}
