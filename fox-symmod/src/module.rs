//! SymMOD module data structures

use std::fmt;

use crate::fx::{NoteFx, NoteType, VolumeFx};
use crate::{EMPTY_NOTE, NOTE_SIZE, SAMPLE_NAME_MAX_LEN, SAMPLE_NAME_RECORD_SIZE};

/// Decoded SymMOD module
///
/// Header values are optional because each one arrives in its own record
/// and a file may leave any of them out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymModule {
    /// Format version (always 1)
    pub version: i32,
    pub number_of_channels: Option<i32>,
    /// Rows per pattern ("track length")
    pub number_of_rows: Option<i32>,
    pub number_of_patterns: Option<u16>,
    /// Length of the position list
    pub number_of_positions: Option<u16>,
    pub number_of_instruments: Option<i32>,
    pub note_size: Option<i32>,
    pub system_speed: Option<i32>,
    pub is_song: Option<i32>,
    pub sample_boost: Option<i32>,
    pub pitch_diff: Option<i32>,
    pub sample_diff: Option<i32>,
    /// Song info text (NUL and space padding removed)
    pub info_text: Option<String>,
    pub song_data: Option<Vec<u8>>,
    pub sequence: Option<Vec<u8>>,
    pub info_type: Option<Vec<u8>>,
    pub info_object: Option<Vec<u8>>,
    pub info_string: Option<Vec<u8>>,
    /// Patterns cut from the note data block
    pub patterns: Vec<SymPattern>,
    /// Instrument slots in file order
    pub instruments: Vec<SymInstrument>,
}

impl SymModule {
    /// Channel count, treating a missing or negative value as zero
    pub fn channel_count(&self) -> usize {
        self.number_of_channels
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0)
    }

    /// Instruments that carry a name or a sample payload
    pub fn used_instruments(&self) -> impl Iterator<Item = (usize, &SymInstrument)> {
        self.instruments
            .iter()
            .enumerate()
            .filter(|(_, instr)| !instr.is_empty())
    }
}

/// One pattern: a note sequence per channel, all of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymPattern {
    /// Note data: `[channel][row]`
    pub channels: Vec<Vec<SymNote>>,
}

impl SymPattern {
    pub fn num_rows(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn get_note(&self, row: usize, channel: usize) -> Option<&SymNote> {
        self.channels.get(channel)?.get(row)
    }
}

/// A 4-byte note cell with its decoded classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymNote {
    /// Raw type byte
    pub fx: u8,
    pub note: u8,
    /// Volume level, or a command when 200 or above
    pub volume: u8,
    pub instrument: u8,
    pub note_type: NoteType,
    pub volume_fx: Option<VolumeFx>,
    pub note_fx: Option<NoteFx>,
    /// The cell holds the untouched-cell sentinel
    pub is_empty: bool,
}

impl SymNote {
    pub fn from_bytes(bytes: [u8; NOTE_SIZE]) -> Self {
        let [fx, note, volume, instrument] = bytes;
        Self {
            fx,
            note,
            volume,
            instrument,
            note_type: NoteType::from_code(fx),
            volume_fx: VolumeFx::from_code(volume),
            note_fx: NoteFx::from_code(fx),
            is_empty: bytes == EMPTY_NOTE,
        }
    }
}

/// Instrument slot
///
/// A slot is filled from two directions: the sample name table supplies
/// `name` and `info`, sample records supply `data`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SymInstrument {
    pub name: Option<String>,
    pub info: Option<SymInstrumentInfo>,
    /// Raw signed 8-bit sample payload
    pub data: Option<Vec<i8>>,
}

impl SymInstrument {
    /// Neither a name nor a payload
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }
}

impl fmt::Debug for SymInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymInstrument")
            .field("name", &self.name)
            .field("info", &self.info)
            .field("data", &self.data.as_ref().map(|d| format!("{} bytes", d.len())))
            .finish()
    }
}

/// Per-instrument settings stored after the name in a sample name record
///
/// Single-byte fields are signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymInstrumentInfo {
    /// 0 = no instrument
    pub instrument_type: i8,
    /// Loop start in percent
    pub loop_start: i8,
    /// Loop length in percent
    pub loop_length: i8,
    /// 0 = endless, otherwise the repeat count
    pub loop_number: i8,
    /// 0 = mono
    pub multi: i8,
    pub auto_maximize: i8,
    /// 0 = unchanged, otherwise percent (1-200)
    pub volume: i8,
    pub relation: i8,
    pub child_number: i8,
    /// 0 = raw, 1 = IFF
    pub sample_type: i8,
    pub finetune: i8,
    /// Semitones (-24..=24)
    pub tune: i8,
    pub line_sample_flags: i8,
    pub filter: i8,
    pub play_flag: i8,
    pub downsample: i8,
    pub resonance: i8,
    pub load_flags: i8,
    pub info: i8,
    pub range_start: i8,
    pub range_length: i8,
    /// Low-order loop start word
    pub loop_start_low: u16,
    /// Low-order loop length word
    pub loop_length_low: u16,
    pub reso_filter_flags: i8,
    /// Points in use in `reso_filter`
    pub reso_filter_points: i8,
    pub reso_filter: [i8; 8],
    pub fade_status: i8,
    pub fade_start: i8,
    pub fade_end: i8,
}

impl SymInstrumentInfo {
    /// Decode the settings block of a sample name record
    pub fn from_record(record: &[u8; SAMPLE_NAME_RECORD_SIZE]) -> Self {
        let byte = |offset: usize| record[offset] as i8;
        let word = |offset: usize| u16::from_be_bytes([record[offset], record[offset + 1]]);

        Self {
            instrument_type: byte(SAMPLE_NAME_MAX_LEN),
            loop_start: byte(129),
            loop_length: byte(130),
            loop_number: byte(131),
            multi: byte(132),
            auto_maximize: byte(133),
            volume: byte(134),
            relation: byte(135),
            child_number: byte(136),
            sample_type: byte(137),
            finetune: byte(138),
            tune: byte(139),
            line_sample_flags: byte(140),
            filter: byte(141),
            play_flag: byte(142),
            downsample: byte(143),
            resonance: byte(144),
            load_flags: byte(145),
            info: byte(146),
            range_start: byte(147),
            range_length: byte(148),
            loop_start_low: word(150),
            loop_length_low: word(152),
            reso_filter_flags: byte(160),
            reso_filter_points: byte(161),
            reso_filter: std::array::from_fn(|i| byte(162 + i)),
            fade_status: byte(170),
            fade_start: byte(171),
            fade_end: byte(172),
        }
    }
}
