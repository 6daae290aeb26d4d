//! Note type, volume command and effect command tables

use crate::VOLUME_FX_THRESHOLD;

/// Kind of a note cell, from its type byte
///
/// Type bytes 0 to 3 index a fixed table; any other byte is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    /// Cell without a command
    None,
    /// Plain note trigger
    NoteOn,
    SimpleFx,
    ComplexFx,
    /// Type byte outside the table
    Raw(u8),
}

impl NoteType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::None,
            1 => Self::NoteOn,
            2 => Self::SimpleFx,
            3 => Self::ComplexFx,
            other => Self::Raw(other),
        }
    }
}

/// Command stored in the volume column (codes 242-254)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeFx {
    PitchDown3,
    PitchUp3,
    PitchDown2,
    PitchUp2,
    PitchDown,
    PitchUp,
    SetPitch,
    SpeedUp,
    SpeedDown,
    KeyOff,
    StartSample,
    ContinueSample,
    StopSample,
}

impl VolumeFx {
    /// Look up a volume column value; levels and unassigned codes give `None`
    pub fn from_code(volume: u8) -> Option<Self> {
        if volume < VOLUME_FX_THRESHOLD {
            return None;
        }
        Some(match volume {
            242 => Self::PitchDown3,
            243 => Self::PitchUp3,
            244 => Self::PitchDown2,
            245 => Self::PitchUp2,
            246 => Self::PitchDown,
            247 => Self::PitchUp,
            248 => Self::SetPitch,
            249 => Self::SpeedUp,
            250 => Self::SpeedDown,
            251 => Self::KeyOff,
            252 => Self::StartSample,
            253 => Self::ContinueSample,
            254 => Self::StopSample,
            _ => return None,
        })
    }
}

/// Effect selected by a note type byte in 1..=25
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteFx {
    VolumeSlideUp,
    VolumeSlideDown,
    PitchSlideUp,
    PitchSlideDown,
    ReplayFrom,
    FromAndPitch,
    SetFromAdd,
    FromAdd,
    SetSpeed,
    AddPitch,
    AddVolume,
    Tremolo,
    Vibrato,
    SampleVibrato,
    PitchSlideTo,
    Retrigger,
    Emphasis,
    AddHalftone,
    Cv,
    CvAdd,
    Filter,
    DspEcho,
    DspDelay,
}

impl NoteFx {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::VolumeSlideUp,
            2 => Self::VolumeSlideDown,
            3 => Self::PitchSlideUp,
            4 => Self::PitchSlideDown,
            5 => Self::ReplayFrom,
            6 => Self::FromAndPitch,
            7 => Self::SetFromAdd,
            8 => Self::FromAdd,
            9 => Self::SetSpeed,
            10 => Self::AddPitch,
            11 => Self::AddVolume,
            12 => Self::Tremolo,
            13 => Self::Vibrato,
            14 => Self::SampleVibrato,
            15 => Self::PitchSlideTo,
            16 => Self::Retrigger,
            17 => Self::Emphasis,
            18 => Self::AddHalftone,
            19 => Self::Cv,
            20 => Self::CvAdd,
            // 21 and 22 are unassigned
            23 => Self::Filter,
            24 => Self::DspEcho,
            25 => Self::DspDelay,
            _ => return None,
        })
    }
}
