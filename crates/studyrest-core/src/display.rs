//! Text helpers for renderers.

use crate::sequencer::Phase;

/// `M:SS`, minutes unpadded.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `Section 2 (Rest)` for a 0-based index.
pub fn phase_label(section_index: usize, phase: Phase) -> String {
    format!("Section {} ({})", section_index + 1, phase.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3661), "61:01");
    }

    #[test]
    fn label_is_one_based() {
        assert_eq!(phase_label(0, Phase::Study), "Section 1 (Study)");
        assert_eq!(phase_label(2, Phase::Rest), "Section 3 (Rest)");
    }
}
