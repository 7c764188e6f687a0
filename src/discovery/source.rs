//! Candidate links handed over by the discovery layer.
//!
//! One JSON object per line:
//! `{"url": "...", "title": "...", "user": "...", "kind": "direct" | "inspectable"}`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::media::CandidateLink;

/// Open a candidate stream; `-` reads standard input.
pub fn open_source(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| Error::Input {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<CandidateLink>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let link: CandidateLink =
        serde_json::from_str(line).map_err(|e| Error::InvalidCandidate {
            line: line_number,
            message: e.to_string(),
        })?;

    if link.url.trim().is_empty() {
        return Err(Error::InvalidCandidate {
            line: line_number,
            message: "empty url".to_string(),
        });
    }

    Ok(Some(link))
}

/// Read up to `max` candidates. Malformed lines are logged and skipped.
pub fn read_candidates<R: BufRead>(reader: R, max: Option<usize>) -> Result<Vec<CandidateLink>> {
    let limit = max.unwrap_or(usize::MAX);
    let mut candidates = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        if candidates.len() >= limit {
            tracing::info!("Reached maximum of {} candidate link(s)", limit);
            break;
        }

        let line_number = index + 1;
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Skipping candidate on line {}: {}", line_number, e);
                continue;
            }
        };

        match parse_line(line_number, &line) {
            Ok(Some(link)) => candidates.push(link),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping candidate: {}", e),
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::LinkKind;
    use std::io::Cursor;

    const INPUT: &str = r#"
{"url": "https://i.redd.it/a.jpg", "title": "First", "user": "one"}

{"url": "https://i.imgur.com/b.gifv", "kind": "inspectable"}
this is not json
{"url": "   "}
{"url": "https://i.redd.it/c.png"}
"#;

    #[test]
    fn test_reads_valid_lines_and_skips_bad_ones() {
        let links = read_candidates(Cursor::new(INPUT), None).unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].title.as_deref(), Some("First"));
        assert_eq!(links[1].kind, LinkKind::Inspectable);
        assert_eq!(links[2].url, "https://i.redd.it/c.png");
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let input: &[u8] = b"{\"url\": \"https://i.redd.it/a.jpg\"}\n\xff\xfe garbage\n{\"url\": \"https://i.redd.it/b.jpg\"}\r\n";

        let links = read_candidates(Cursor::new(input), None).unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[1].url, "https://i.redd.it/b.jpg");
    }

    #[test]
    fn test_max_caps_candidates() {
        let links = read_candidates(Cursor::new(INPUT), Some(2)).unwrap();
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_parse_line_errors_carry_line_number() {
        let err = parse_line(7, "{oops").unwrap_err();
        assert!(matches!(err, Error::InvalidCandidate { line: 7, .. }));
        assert!(parse_line(1, "   ").unwrap().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_source(Path::new("/no/such/links.jsonl")).err().unwrap();
        assert!(matches!(err, Error::Input { .. }));
    }
}
