//! XM module data structures

use fox_core::SampleData;

/// Decoded XM module
#[derive(Debug, Clone, PartialEq)]
pub struct XmModule {
    /// Module title (max 20 chars)
    pub title: String,
    /// Name of the tracker that wrote the file
    pub tracker_name: String,
    /// Format version (0x0104 for FastTracker II)
    pub version: u16,
    /// Declared header size, counted from the header-size field
    pub header_size: u32,
    /// Song length in pattern order entries (1-256)
    pub song_length: u16,
    /// Restart position for looping
    pub restart_position: u16,
    /// Number of channels
    pub num_channels: u16,
    /// Number of patterns
    pub num_patterns: u16,
    /// Number of instruments
    pub num_instruments: u16,
    /// Header flags (bit 0: linear frequency table)
    pub flags: u16,
    /// Default tempo (ticks per row)
    pub default_tempo: u16,
    /// Default BPM
    pub default_bpm: u16,
    /// Pattern order table, `song_length` entries
    pub order_table: Vec<u8>,
    /// Pattern data
    pub patterns: Vec<XmPattern>,
    /// Instruments with their samples
    pub instruments: Vec<XmInstrument>,
}

impl XmModule {
    /// Get the pattern at the given order position
    pub fn pattern_at_order(&self, order: u16) -> Option<&XmPattern> {
        let pattern_idx = *self.order_table.get(order as usize)? as usize;
        self.patterns.get(pattern_idx)
    }

    /// Use linear frequency table (vs Amiga)
    #[inline]
    pub fn linear_frequency_table(&self) -> bool {
        self.flags & 1 != 0
    }

    /// Instrument names in file order
    pub fn instrument_names(&self) -> Vec<&str> {
        self.instruments.iter().map(|i| i.name.as_str()).collect()
    }
}

/// XM pattern: one note sequence per channel
#[derive(Debug, Clone, PartialEq)]
pub struct XmPattern {
    /// Pattern header length as declared in the file
    pub header_size: u32,
    /// Packing type (always 0 in practice)
    pub packing_type: u8,
    /// Number of rows in this pattern (1-256)
    pub num_rows: u16,
    /// Size of the packed note stream in bytes
    pub packed_size: u16,
    /// Unpacked note data: `[channel][row]`
    pub channels: Vec<Vec<XmNote>>,
}

impl XmPattern {
    /// Get note at specific row and channel
    pub fn get_note(&self, row: u16, channel: u16) -> Option<&XmNote> {
        self.channels.get(channel as usize)?.get(row as usize)
    }

    /// Number of channels in this pattern
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }
}

/// Single note/command in a pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmNote {
    /// Note value: 0=none, 1-96=C-0..B-7, 97=note-off
    pub note: u8,
    /// Instrument number: 0=none, 1-128=instrument
    pub instrument: u8,
    /// Volume column: 0=none, 0x10-0x50=set volume, others=effects
    pub volume: u8,
    /// Effect command
    pub effect_type: u8,
    /// Effect parameter
    pub effect_param: u8,
}

impl XmNote {
    /// Check if this is a note-off
    #[inline]
    pub fn is_note_off(&self) -> bool {
        self.note == crate::NOTE_OFF
    }

    /// Check if this note triggers a new note
    #[inline]
    pub fn has_note(&self) -> bool {
        self.note >= crate::NOTE_MIN && self.note <= crate::NOTE_MAX
    }

    /// Check if this sets an instrument
    #[inline]
    pub fn has_instrument(&self) -> bool {
        self.instrument > 0
    }

    /// Check if there's an effect
    #[inline]
    pub fn has_effect(&self) -> bool {
        self.effect_type != 0 || self.effect_param != 0
    }

    /// Volume value if the volume column contains set-volume (0x10-0x50)
    #[inline]
    pub fn set_volume(&self) -> Option<u8> {
        if (0x10..=0x50).contains(&self.volume) {
            Some(self.volume - 0x10)
        } else {
            None
        }
    }
}

/// XM instrument
///
/// The second part of the record only exists when the instrument declares
/// at least one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct XmInstrument {
    /// Instrument header size as declared in the file
    pub header_size: u32,
    /// Instrument name (max 22 chars)
    pub name: String,
    /// Instrument type (always 0 in practice)
    pub instrument_type: u8,
    /// Number of samples
    pub num_samples: u16,
    /// Envelopes, vibrato and samples; `None` for sample-less instruments
    pub detail: Option<XmInstrumentDetail>,
}

impl XmInstrument {
    /// Samples owned by this instrument
    pub fn samples(&self) -> &[XmSample] {
        self.detail.as_ref().map_or(&[], |d| d.samples.as_slice())
    }
}

/// Second part of an XM instrument record
#[derive(Debug, Clone, PartialEq)]
pub struct XmInstrumentDetail {
    /// Size of each sample header
    pub sample_header_size: u32,
    /// Sample number for every note (96 entries)
    pub keymap: [u8; crate::KEYMAP_SIZE],
    /// Volume envelope
    pub volume_envelope: XmEnvelope,
    /// Panning envelope
    pub panning_envelope: XmEnvelope,
    /// Auto-vibrato type (0=sine, 1=square, 2=ramp down, 3=ramp up)
    pub vibrato_type: u8,
    /// Auto-vibrato sweep
    pub vibrato_sweep: u8,
    /// Auto-vibrato depth
    pub vibrato_depth: u8,
    /// Auto-vibrato rate
    pub vibrato_rate: u8,
    /// Volume fadeout value (0-4095)
    pub volume_fadeout: u16,
    /// Reserved block (11 words)
    pub reserved: [u16; 11],
    /// Samples in header order
    pub samples: Vec<XmSample>,
}

/// Volume/panning envelope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmEnvelope {
    /// Raw table of 24 words, alternating x (tick) and y (value)
    pub values: [u16; crate::ENVELOPE_VALUES],
    /// Number of points in use
    pub num_points: u8,
    /// Sustain point index
    pub sustain_point: u8,
    /// Loop start point index
    pub loop_start: u8,
    /// Loop end point index
    pub loop_end: u8,
    /// Envelope type flags
    pub flags: EnvelopeFlags,
}

impl XmEnvelope {
    /// Points in use as (tick, value) pairs
    pub fn points(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.values
            .chunks_exact(2)
            .take(self.num_points as usize)
            .map(|pair| (pair[0], pair[1]))
    }

    /// Get the tick value at the sustain point
    pub fn sustain_tick(&self) -> Option<u16> {
        if self.flags.has_sustain() {
            self.points().nth(self.sustain_point as usize).map(|(x, _)| x)
        } else {
            None
        }
    }

    /// Get the tick range for the loop
    pub fn loop_range(&self) -> Option<(u16, u16)> {
        if self.flags.has_loop() {
            let start = self.points().nth(self.loop_start as usize)?.0;
            let end = self.points().nth(self.loop_end as usize)?.0;
            Some((start, end))
        } else {
            None
        }
    }
}

/// Envelope type byte (bit 0: on, bit 1: sustain, bit 2: loop)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvelopeFlags(pub u8);

impl EnvelopeFlags {
    pub const ENABLED: u8 = 0x01;
    pub const SUSTAIN: u8 = 0x02;
    pub const LOOP: u8 = 0x04;

    #[inline]
    pub fn is_enabled(self) -> bool {
        self.0 & Self::ENABLED != 0
    }

    #[inline]
    pub fn has_sustain(self) -> bool {
        self.0 & Self::SUSTAIN != 0
    }

    #[inline]
    pub fn has_loop(self) -> bool {
        self.0 & Self::LOOP != 0
    }
}

/// Sample loop type, from the low 2 bits of the sample type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopType {
    None,
    Forward,
    PingPong,
    /// Bit pattern 3, not assigned by the format
    Unknown,
}

impl LoopType {
    pub fn from_type_byte(sample_type: u8) -> Self {
        match sample_type & 0b11 {
            0 => Self::None,
            1 => Self::Forward,
            2 => Self::PingPong,
            _ => Self::Unknown,
        }
    }
}

/// XM sample header plus decoded audio
#[derive(Debug, Clone, PartialEq)]
pub struct XmSample {
    /// Sample data length in bytes
    pub length: u32,
    /// Loop start (in bytes)
    pub loop_start: u32,
    /// Loop length (in bytes, 0 = not looping)
    pub loop_length: u32,
    /// Default volume (0-64)
    pub volume: u8,
    /// Finetune (-128 to 127)
    pub finetune: i8,
    /// Type byte: loop type in bits 0-1, 16-bit flag in bit 3
    pub sample_type: u8,
    /// Panning (0-255)
    pub panning: u8,
    /// Relative note (semitones from C-4)
    pub relative_note: i8,
    /// Packing type (0 = delta, 0xAD = ADPCM)
    pub packing_type: u8,
    /// Sample name (max 22 chars)
    pub name: String,
    /// Decoded amplitudes; `Debug` shows only the frame count
    pub data: SampleData,
}

impl XmSample {
    /// Bit depth from the type byte (8 or 16)
    #[inline]
    pub fn bit_depth(&self) -> u8 {
        bit_depth(self.sample_type)
    }

    #[inline]
    pub fn loop_type(&self) -> LoopType {
        LoopType::from_type_byte(self.sample_type)
    }

    /// A sample loops whenever it declares a loop length
    #[inline]
    pub fn is_looping(&self) -> bool {
        self.loop_length != 0
    }

    /// Get the sample loop end position
    #[inline]
    pub fn loop_end(&self) -> u32 {
        self.loop_start.saturating_add(self.loop_length)
    }

    /// Number of decoded frames
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.data.len()
    }
}

/// Bit depth encoded in a sample type byte
#[inline]
pub(crate) fn bit_depth(sample_type: u8) -> u8 {
    if sample_type & 0b1000 != 0 { 16 } else { 8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sample_type: u8, loop_start: u32, loop_length: u32) -> XmSample {
        XmSample {
            length: 4,
            loop_start,
            loop_length,
            volume: 64,
            finetune: 0,
            sample_type,
            panning: 128,
            relative_note: 0,
            packing_type: 0,
            name: "kick".to_string(),
            data: SampleData::I8(vec![0, 1, 2, 3]),
        }
    }

    #[test]
    fn test_xm_note_methods() {
        let note_off = XmNote {
            note: 97,
            ..Default::default()
        };
        assert!(note_off.is_note_off());
        assert!(!note_off.has_note());

        let note_c4 = XmNote {
            note: 49,
            instrument: 1,
            ..Default::default()
        };
        assert!(!note_c4.is_note_off());
        assert!(note_c4.has_note());
        assert!(note_c4.has_instrument());
        assert!(!note_c4.has_effect());

        let vol_set = XmNote {
            volume: 0x30,
            ..Default::default()
        };
        assert_eq!(vol_set.set_volume(), Some(0x20));
        assert_eq!(XmNote::default().set_volume(), None);

        let speed = XmNote {
            effect_type: 0x0F,
            effect_param: 6,
            ..Default::default()
        };
        assert!(speed.has_effect());
    }

    #[test]
    fn test_sample_type_byte() {
        assert_eq!(sample(0x00, 0, 0).bit_depth(), 8);
        assert_eq!(sample(0x08, 0, 0).bit_depth(), 16);
        assert_eq!(sample(0x10, 0, 0).bit_depth(), 8);

        assert_eq!(sample(0x00, 0, 0).loop_type(), LoopType::None);
        assert_eq!(sample(0x09, 0, 0).loop_type(), LoopType::Forward);
        assert_eq!(sample(0x02, 0, 0).loop_type(), LoopType::PingPong);
        assert_eq!(sample(0x03, 0, 0).loop_type(), LoopType::Unknown);
    }

    #[test]
    fn test_sample_loop() {
        let plain = sample(0, 0, 0);
        assert!(!plain.is_looping());

        let looped = sample(1, 100, 500);
        assert!(looped.is_looping());
        assert_eq!(looped.loop_end(), 600);
        assert_eq!(looped.frame_count(), 4);
    }

    #[test]
    fn test_sample_debug_omits_audio() {
        let rendered = format!("{:?}", sample(0, 0, 0));
        assert!(rendered.contains("name: \"kick\""));
        assert!(rendered.contains("I8(4 frames)"));
        assert!(!rendered.contains("[0, 1, 2, 3]"));
    }

    #[test]
    fn test_envelope_points() {
        let mut values = [0u16; crate::ENVELOPE_VALUES];
        values[..6].copy_from_slice(&[0, 64, 10, 32, 20, 0]);
        let env = XmEnvelope {
            values,
            num_points: 3,
            sustain_point: 1,
            loop_start: 0,
            loop_end: 2,
            flags: EnvelopeFlags(EnvelopeFlags::ENABLED | EnvelopeFlags::SUSTAIN),
        };

        assert_eq!(env.points().collect::<Vec<_>>(), vec![(0, 64), (10, 32), (20, 0)]);
        assert!(env.flags.is_enabled());
        assert_eq!(env.sustain_tick(), Some(10));
        assert_eq!(env.loop_range(), None);

        let looping = XmEnvelope {
            flags: EnvelopeFlags(EnvelopeFlags::LOOP),
            ..env
        };
        assert_eq!(looping.loop_range(), Some((0, 20)));
    }

    #[test]
    fn test_envelope_point_count_is_capped() {
        let env = XmEnvelope {
            num_points: 40,
            ..Default::default()
        };
        assert_eq!(env.points().count(), 12);
    }

    #[test]
    fn test_instrument_without_samples() {
        let instr = XmInstrument {
            header_size: 29,
            name: "empty".to_string(),
            instrument_type: 0,
            num_samples: 0,
            detail: None,
        };
        assert!(instr.samples().is_empty());
    }
}
