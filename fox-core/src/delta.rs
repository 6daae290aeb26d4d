//! Delta compression of sample amplitudes
//!
//! Tracker formats store sample audio as a stream of differences:
//! - Each stored value is the difference from the previous amplitude
//! - The first value is the difference from zero
//!
//! Decoding is a running sum. Arithmetic wraps in the sample's own width,
//! which is how the 8-bit and 16-bit streams are produced in the first place.

/// Integer type usable as a delta-coded sample frame
pub trait DeltaSample: Copy + Default {
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
}

impl DeltaSample for i8 {
    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        i8::wrapping_add(self, rhs)
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        i8::wrapping_sub(self, rhs)
    }
}

impl DeltaSample for i16 {
    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        i16::wrapping_add(self, rhs)
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        i16::wrapping_sub(self, rhs)
    }
}

/// Reconstruct absolute amplitudes from a delta stream
pub fn delta_decode<T: DeltaSample>(deltas: &[T]) -> Vec<T> {
    let mut old = T::default();
    deltas
        .iter()
        .map(|&delta| {
            old = old.wrapping_add(delta);
            old
        })
        .collect()
}

/// Produce the delta stream for a sequence of amplitudes
pub fn delta_encode<T: DeltaSample>(samples: &[T]) -> Vec<T> {
    let mut old = T::default();
    samples
        .iter()
        .map(|&sample| {
            let delta = sample.wrapping_sub(old);
            old = sample;
            delta
        })
        .collect()
}

/// Decoded sample amplitudes in their native bit depth
#[derive(Clone, PartialEq, Eq)]
pub enum SampleData {
    /// 8-bit signed frames
    I8(Vec<i8>),
    /// 16-bit signed frames
    I16(Vec<i16>),
}

impl SampleData {
    /// Number of frames
    pub fn len(&self) -> usize {
        match self {
            Self::I8(frames) => frames.len(),
            Self::I16(frames) => frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit depth of the frames (8 or 16)
    pub fn bit_depth(&self) -> u8 {
        match self {
            Self::I8(_) => 8,
            Self::I16(_) => 16,
        }
    }

    /// Frame at `index`, widened to i16 without rescaling
    pub fn get(&self, index: usize) -> Option<i16> {
        match self {
            Self::I8(frames) => frames.get(index).map(|&v| v as i16),
            Self::I16(frames) => frames.get(index).copied(),
        }
    }
}

// Audio payloads can be megabytes long; only their shape is printed.
impl std::fmt::Debug for SampleData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::I8(frames) => write!(f, "I8({} frames)", frames.len()),
            Self::I16(frames) => write!(f, "I16({} frames)", frames.len()),
        }
    }
}
