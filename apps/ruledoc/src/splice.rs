//! Marker-delimited splicing of generated blocks into existing documents.
//!
//! Documents are treated as a sequence of lines. Only the generated region
//! is touched; everything outside it is kept byte for byte.

use crate::error::SpliceError;

pub const END_RULE_HEADER_MARKER: &str = "<!-- end auto-generated rule header -->";
pub const BEGIN_RULE_LIST_MARKER: &str = "<!-- begin auto-generated rules list -->";
pub const END_RULE_LIST_MARKER: &str = "<!-- end auto-generated rules list -->";
pub const BEGIN_CONFIG_LIST_MARKER: &str = "<!-- begin auto-generated configs list -->";
pub const END_CONFIG_LIST_MARKER: &str = "<!-- end auto-generated configs list -->";

fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == marker
}

/// Replace everything up to and including `marker` with `block`.
///
/// Without a marker the block is prepended; a leading `# ` title line is
/// dropped first so a hand-written title is not duplicated, and a blank line
/// separates the new header from the body.
pub fn replace_or_create_header(lines: &[String], block: &[String], marker: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(block.len() + lines.len() + 1);
    out.extend(block.iter().cloned());
    if let Some(idx) = lines.iter().position(|l| is_marker(l, marker)) {
        out.extend(lines[idx + 1..].iter().cloned());
        return out;
    }
    let rest = match lines.first() {
        Some(first) if first.starts_with("# ") => &lines[1..],
        _ => lines,
    };
    if rest.first().is_some_and(|l| !l.trim().is_empty()) {
        out.push(String::new());
    }
    out.extend(rest.iter().cloned());
    out
}

/// String form of [`replace_or_create_header`].
pub fn splice_header(contents: &str, block: &[String], marker: &str) -> String {
    let lines = split_lines(contents);
    replace_or_create_header(&lines, block, marker).join("\n")
}

/// Replace the region from `begin` through `end` (both marker lines
/// included) with `block`, which should carry the markers itself.
pub fn replace_between_markers(
    contents: &str,
    begin: &str,
    end: &str,
    block: &[String],
) -> Result<String, SpliceError> {
    let lines = split_lines(contents);
    let b = find_marker(&lines, begin).ok_or_else(|| SpliceError::MissingMarker(begin.into()))?;
    let e = find_marker(&lines, end).ok_or_else(|| SpliceError::MissingMarker(end.into()))?;
    if e < b {
        return Err(SpliceError::MarkersOutOfOrder {
            begin: begin.into(),
            end: end.into(),
        });
    }
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + block.len());
    out.extend(lines[..b].iter().cloned());
    out.extend(block.iter().cloned());
    out.extend(lines[e + 1..].iter().cloned());
    Ok(out.join("\n"))
}

pub fn has_marker(contents: &str, marker: &str) -> bool {
    contents.lines().any(|l| is_marker(l, marker))
}

/// Line index of `marker`, if present.
pub fn find_marker(lines: &[String], marker: &str) -> Option<usize> {
    lines.iter().position(|l| is_marker(l, marker))
}

pub fn split_lines(contents: &str) -> Vec<String> {
    contents.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Vec<String> {
        vec![
            "# New title".to_string(),
            String::new(),
            END_RULE_HEADER_MARKER.to_string(),
        ]
    }

    #[test]
    fn test_replaces_existing_header_and_keeps_body() {
        let doc = format!("# Old\n\nold notice\n\n{}\n\n## Details\nbody\n", END_RULE_HEADER_MARKER);
        let out = splice_header(&doc, &block(), END_RULE_HEADER_MARKER);
        assert_eq!(
            out,
            format!("# New title\n\n{}\n\n## Details\nbody\n", END_RULE_HEADER_MARKER)
        );
    }

    #[test]
    fn test_leading_title_dropped_when_marker_missing() {
        let out = splice_header("# Legacy title\n\nBody.", &block(), END_RULE_HEADER_MARKER);
        assert_eq!(out, format!("# New title\n\n{}\n\nBody.", END_RULE_HEADER_MARKER));
    }

    #[test]
    fn test_prepends_when_no_marker_and_no_title() {
        let out = splice_header("Body.\n", &block(), END_RULE_HEADER_MARKER);
        assert_eq!(out, format!("# New title\n\n{}\n\nBody.\n", END_RULE_HEADER_MARKER));
        // `##` is not a top-level title.
        let out = splice_header("## Sub\n", &block(), END_RULE_HEADER_MARKER);
        assert!(out.ends_with(&format!("{}\n\n## Sub\n", END_RULE_HEADER_MARKER)));
        // An existing blank line is not doubled.
        let out = splice_header("# Legacy\n\nBody.", &block(), END_RULE_HEADER_MARKER);
        assert!(out.ends_with(&format!("{}\n\nBody.", END_RULE_HEADER_MARKER)));
    }

    #[test]
    fn test_empty_document_gets_header_and_trailing_newline() {
        let out = splice_header("", &block(), END_RULE_HEADER_MARKER);
        assert_eq!(out, format!("# New title\n\n{}\n", END_RULE_HEADER_MARKER));
    }

    #[test]
    fn test_header_splice_is_idempotent() {
        for doc in ["# Legacy\n\nBody.", "Body only", "", "# T\n<!-- end auto-generated rule header -->\nx"] {
            let once = splice_header(doc, &block(), END_RULE_HEADER_MARKER);
            let twice = splice_header(&once, &block(), END_RULE_HEADER_MARKER);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_replace_between_markers() {
        let doc = format!(
            "# Plugin\n\n## Rules\n\n{}\nstale\n{}\n\n## License\n",
            BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER
        );
        let new_block = vec![
            BEGIN_RULE_LIST_MARKER.to_string(),
            "fresh".to_string(),
            END_RULE_LIST_MARKER.to_string(),
        ];
        let out =
            replace_between_markers(&doc, BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER, &new_block)
                .unwrap();
        assert_eq!(
            out,
            format!(
                "# Plugin\n\n## Rules\n\n{}\nfresh\n{}\n\n## License\n",
                BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER
            )
        );
    }

    #[test]
    fn test_replace_between_markers_errors() {
        let err = replace_between_markers("nothing", BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER, &[])
            .unwrap_err();
        assert_eq!(err, SpliceError::MissingMarker(BEGIN_RULE_LIST_MARKER.into()));
        let swapped = format!("{}\n{}", END_RULE_LIST_MARKER, BEGIN_RULE_LIST_MARKER);
        assert!(matches!(
            replace_between_markers(&swapped, BEGIN_RULE_LIST_MARKER, END_RULE_LIST_MARKER, &[]),
            Err(SpliceError::MarkersOutOfOrder { .. })
        ));
    }
}
