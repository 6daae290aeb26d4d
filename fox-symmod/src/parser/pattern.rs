//! Note data decoding

use fox_core::DecodeError;

use crate::NOTE_SIZE;
use crate::module::{SymNote, SymPattern};

/// Cut the note data block into patterns of `channels x rows` notes
///
/// `offset` is where the block's payload starts in the file.
pub(crate) fn decode_patterns(
    offset: usize,
    data: &[u8],
    num_channels: Option<i32>,
    num_rows: Option<i32>,
) -> Result<Vec<SymPattern>, DecodeError> {
    let channels = positive(num_channels).ok_or_else(|| {
        DecodeError::invalid(offset, "note data without a positive channel count")
    })?;
    let rows = positive(num_rows)
        .ok_or_else(|| DecodeError::invalid(offset, "note data without a positive row count"))?;

    let overflow = || DecodeError::invalid(offset, "pattern size overflows");
    let row_size = channels.checked_mul(NOTE_SIZE).ok_or_else(overflow)?;
    let pattern_size = row_size.checked_mul(rows).ok_or_else(overflow)?;

    let trailing = data.len() % pattern_size;
    if trailing != 0 {
        return Err(DecodeError::Consistency {
            offset: offset + data.len() - trailing,
            what: "trailing note data bytes",
            expected: 0,
            found: trailing as u64,
        });
    }

    Ok(data
        .chunks_exact(pattern_size)
        .map(|chunk| decode_pattern(chunk, row_size, channels, rows))
        .collect())
}

/// Transpose one row-major chunk into channel-major note sequences
fn decode_pattern(chunk: &[u8], row_size: usize, channels: usize, rows: usize) -> SymPattern {
    let mut grid = vec![Vec::with_capacity(rows); channels];

    for row in chunk.chunks_exact(row_size) {
        for (channel, cell) in grid.iter_mut().zip(row.chunks_exact(NOTE_SIZE)) {
            channel.push(SymNote::from_bytes([cell[0], cell[1], cell[2], cell[3]]));
        }
    }

    SymPattern { channels: grid }
}

fn positive(value: Option<i32>) -> Option<usize> {
    value
        .and_then(|v| usize::try_from(v).ok())
        .filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMPTY_NOTE;

    #[test]
    fn test_transpose_to_channels() {
        // 2 channels, 2 rows: row 0 = [A, B], row 1 = [C, D]
        let data = [
            0, 1, 10, 1, /* A */ 0, 2, 10, 2, /* B */
            0, 3, 10, 1, /* C */ 0, 4, 10, 2, /* D */
        ];
        let patterns = decode_patterns(0, &data, Some(2), Some(2)).unwrap();

        assert_eq!(patterns.len(), 1);
        let notes: Vec<Vec<u8>> = patterns[0]
            .channels
            .iter()
            .map(|c| c.iter().map(|n| n.note).collect())
            .collect();
        assert_eq!(notes, vec![vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn test_multiple_patterns() {
        let data: Vec<u8> = EMPTY_NOTE.repeat(3 * 4 * 2);
        let patterns = decode_patterns(0, &data, Some(3), Some(4)).unwrap();

        assert_eq!(patterns.len(), 2);
        for pattern in &patterns {
            assert_eq!(pattern.channels.len(), 3);
            assert!(pattern.channels.iter().all(|c| c.len() == 4));
            assert!(pattern.channels.iter().flatten().all(|n| n.is_empty));
        }
    }

    #[test]
    fn test_partial_pattern_is_rejected() {
        let data = [0u8; 2 * 4 * 2 + 4];
        assert_eq!(
            decode_patterns(100, &data, Some(2), Some(2)),
            Err(DecodeError::Consistency {
                offset: 116,
                what: "trailing note data bytes",
                expected: 0,
                found: 4,
            })
        );
    }

    #[test]
    fn test_missing_dimensions() {
        let data = [0u8; 8];
        for (channels, rows) in [(None, Some(1)), (Some(2), None), (Some(0), Some(1)), (Some(2), Some(-1))] {
            assert!(matches!(
                decode_patterns(0, &data, channels, rows),
                Err(DecodeError::InvalidModule { .. })
            ));
        }
    }

    #[test]
    fn test_huge_dimensions_fail_cleanly() {
        let data = EMPTY_NOTE.repeat(4);
        let result = decode_patterns(0, &data, Some(i32::MAX), Some(i32::MAX));
        assert!(
            matches!(
                result,
                Err(DecodeError::InvalidModule { .. } | DecodeError::Consistency { .. })
            ),
            "{result:?}"
        );
    }
}
