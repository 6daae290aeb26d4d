//! Record tag table

/// Layout selected by a record tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordKind {
    /// One big-endian 32-bit value
    Long(LongField),
    /// Pattern count (high word) and position count (low word)
    PatternNumb,
    /// Length-prefixed byte block
    Block(BlockField),
    /// Length-prefixed raw 8-bit sample
    Sample,
    /// Sample slot with no payload
    EmptySample,
    /// Length-prefixed table of 256-byte name records
    SampleNames,
    /// Delta-packed 8-bit sample
    DeltaSample8,
    /// Delta-packed 16-bit sample
    DeltaSample16,
    /// End of the record stream
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LongField {
    NumberOfChannels,
    NumberOfRows,
    NumberOfInstruments,
    NoteSize,
    SystemSpeed,
    IsSong,
    SampleBoost,
    PitchDiff,
    SampleDiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockField {
    SongData,
    NoteData,
    Sequence,
    InfoText,
    InfoType,
    InfoObject,
    InfoString,
}

impl RecordKind {
    pub(crate) fn from_tag(tag: i32) -> Option<Self> {
        use BlockField::*;
        use LongField::*;

        Some(match tag {
            -1 => Self::Long(NumberOfChannels),
            -2 => Self::Long(NumberOfRows),
            -3 => Self::PatternNumb,
            -4 => Self::Long(NumberOfInstruments),
            -5 => Self::Long(NoteSize),
            -6 => Self::Long(SystemSpeed),
            -7 => Self::Long(IsSong),
            -10 => Self::Block(SongData),
            -11 => Self::Sample,
            -12 => Self::EmptySample,
            -13 => Self::Block(NoteData),
            -14 => Self::SampleNames,
            -15 => Self::Block(Sequence),
            -16 => Self::Block(InfoText),
            -17 => Self::DeltaSample8,
            -18 => Self::DeltaSample16,
            -19 => Self::Block(InfoType),
            -20 => Self::Block(InfoObject),
            -21 => Self::Block(InfoString),
            0 => Self::Eof,
            10 => Self::Long(SampleBoost),
            11 => Self::Long(PitchDiff),
            12 => Self::Long(SampleDiff),
            _ => return None,
        })
    }
}

impl LongField {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::NumberOfChannels => "number_of_channels",
            Self::NumberOfRows => "number_of_rows",
            Self::NumberOfInstruments => "number_of_instruments",
            Self::NoteSize => "note_size",
            Self::SystemSpeed => "system_speed",
            Self::IsSong => "is_song",
            Self::SampleBoost => "sample_boost",
            Self::PitchDiff => "pitch_diff",
            Self::SampleDiff => "sample_diff",
        }
    }
}

impl BlockField {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::SongData => "song_data",
            Self::NoteData => "note_data",
            Self::Sequence => "sequence",
            Self::InfoText => "info_text",
            Self::InfoType => "info_type",
            Self::InfoObject => "info_object",
            Self::InfoString => "info_string",
        }
    }
}
