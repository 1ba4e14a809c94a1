//! Pure chunking arithmetic for multipart uploads.
//!
//! No I/O operations - just the math the session loop relies on.

/// Length of the next chunk given the bytes still to upload.
///
/// The final chunk of a file is usually shorter than `chunk_size`.
pub fn next_chunk_len(bytes_remaining: u64, chunk_size: u64) -> u64 {
    std::cmp::min(chunk_size, bytes_remaining)
}

/// Number of parts a source of `size` bytes produces with `chunk_size` chunks.
///
/// A zero-byte source produces zero parts; completion is still issued for it
/// with an empty part list.
pub fn expected_part_count(size: u64, chunk_size: u64) -> usize {
    if chunk_size == 0 || size == 0 {
        return 0;
    }
    size.div_ceil(chunk_size) as usize
}

/// Percent of the source uploaded, rounded to two decimal places.
///
/// A zero-byte source reports 100.0 since nothing remains to transfer.
pub fn percent_complete(bytes_uploaded: u64, bytes_total: u64) -> f64 {
    if bytes_total == 0 {
        return 100.0;
    }
    let raw = (bytes_uploaded as f64 / bytes_total as f64) * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Estimated seconds remaining from observed average throughput.
///
/// Returns None until at least one byte is acknowledged and measurable time
/// has elapsed, so callers never see NaN or infinity.
pub fn estimate_seconds_remaining(
    bytes_uploaded: u64,
    bytes_total: u64,
    elapsed_secs: f64,
) -> Option<u64> {
    const EPSILON: f64 = 1e-6;

    if bytes_uploaded == 0 || elapsed_secs < EPSILON {
        return None;
    }

    let speed = bytes_uploaded as f64 / elapsed_secs;
    let remaining = bytes_total.saturating_sub(bytes_uploaded) as f64;
    Some((remaining / speed).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_CHUNK_SIZE;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_next_chunk_len() {
        assert_eq!(next_chunk_len(12 * MIB, 5 * MIB), 5 * MIB);
        assert_eq!(next_chunk_len(2 * MIB, 5 * MIB), 2 * MIB);
        assert_eq!(next_chunk_len(0, 5 * MIB), 0);
    }

    #[test]
    fn test_expected_part_count() {
        assert_eq!(expected_part_count(12 * MIB, 5 * MIB), 3);
        assert_eq!(expected_part_count(10 * MIB, 5 * MIB), 2);
        assert_eq!(expected_part_count(1, DEFAULT_CHUNK_SIZE), 1);
        assert_eq!(expected_part_count(0, DEFAULT_CHUNK_SIZE), 0);
    }

    #[test]
    fn test_chunk_lengths_sum_to_size() {
        let size = 12 * MIB;
        let chunk_size = 5 * MIB;

        let mut remaining = size;
        let mut lengths = Vec::new();
        while remaining > 0 {
            let len = next_chunk_len(remaining, chunk_size);
            lengths.push(len);
            remaining -= len;
        }

        assert_eq!(lengths, vec![5 * MIB, 5 * MIB, 2 * MIB]);
        assert_eq!(lengths.iter().sum::<u64>(), size);
        assert_eq!(lengths.len(), expected_part_count(size, chunk_size));
    }

    #[test]
    fn test_percent_complete_rounding() {
        assert_eq!(percent_complete(1, 3), 33.33);
        assert_eq!(percent_complete(2, 3), 66.67);
        assert_eq!(percent_complete(3, 3), 100.0);
        assert_eq!(percent_complete(0, 100), 0.0);
    }

    #[test]
    fn test_percent_complete_zero_total() {
        assert_eq!(percent_complete(0, 0), 100.0);
    }

    #[test]
    fn test_eta_unknown_without_data() {
        assert_eq!(estimate_seconds_remaining(0, 100, 10.0), None);
        assert_eq!(estimate_seconds_remaining(50, 100, 0.0), None);
    }

    #[test]
    fn test_eta_from_throughput() {
        // 50 bytes in 5s = 10 bytes/s, 50 bytes left = 5s
        assert_eq!(estimate_seconds_remaining(50, 100, 5.0), Some(5));
        // finished
        assert_eq!(estimate_seconds_remaining(100, 100, 5.0), Some(0));
    }
}
