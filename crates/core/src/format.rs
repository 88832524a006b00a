use crate::types::TranscriptSegment;

const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Concatenate transcript segments in chronological order, one space apart
pub fn join_transcript_segments(segments: &[TranscriptSegment]) -> String {
    let mut ordered: Vec<&TranscriptSegment> = segments.iter().collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

    ordered
        .into_iter()
        .map(|seg| seg.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace characters that are not allowed in file names with `-`
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect()
}

pub fn memo_filename(title: &str) -> String {
    format!("{}_memo.md", sanitize_filename(title))
}
