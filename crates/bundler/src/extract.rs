//! Delimiter-based section extraction. The scanner locates a loose opening
//! tag and hands the remainder of the file to a per-section trimming step;
//! there is no nesting awareness and a file may contain at most one
//! instance of each section tag.

use crate::error::{BundleError, BundleErrorKind, BundleResult};
use crate::util::{normalize, NormalizeOps};
use crate::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Template,
    Script,
    Style,
}

impl SectionKind {
    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Template => "template",
            SectionKind::Script => "script",
            SectionKind::Style => "style",
        }
    }
}

/// Find the first opening tag for `tag`, tolerating stray whitespace and
/// attributes inside the angle brackets. Returns the byte offsets of the
/// `<` and of the first position after the closing `>`.
fn find_opening(source: &str, tag: &str) -> Option<(usize, usize)> {
    let bytes = source.as_bytes();
    let mut from = 0;
    while let Some(rel) = source[from..].find('<') {
        let lt = from + rel;
        let mut at = lt + 1;
        while at < bytes.len() && bytes[at].is_ascii_whitespace() {
            at += 1;
        }
        if source[at..].starts_with(tag) {
            let after = at + tag.len();
            let bounded = bytes
                .get(after)
                .map_or(false, |b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
            if bounded {
                if let Some(gt) = source[after..].find('>') {
                    return Some((lt, after + gt + 1));
                }
            }
        }
        from = lt + 1;
    }
    None
}

/// Cut the remainder at the first loose closing tag, if one exists.
fn cut_at_closing<'a>(rest: &'a str, tag: &str) -> &'a str {
    let bytes = rest.as_bytes();
    let mut from = 0;
    while let Some(rel) = rest[from..].find("</") {
        let start = from + rel;
        let mut at = start + 2;
        while at < bytes.len() && bytes[at].is_ascii_whitespace() {
            at += 1;
        }
        if rest[at..].starts_with(tag) {
            return &rest[..start];
        }
        from = start + 2;
    }
    rest
}

fn section_remainder(source: &str, kind: SectionKind) -> BundleResult<(SourceLocation, &str)> {
    let tag = kind.tag();
    let (tag_start, content_start) = find_opening(source, tag).ok_or_else(|| {
        BundleError::new(BundleErrorKind::MissingSection).with_additional_message(tag.to_owned())
    })?;
    let loc = SourceLocation::from_span(source, tag_start, content_start);
    Ok((loc, &source[content_start..]))
}

pub fn extract_template(source: &str) -> BundleResult<String> {
    let (_, rest) = section_remainder(source, SectionKind::Template)?;
    let rest = cut_at_closing(rest, SectionKind::Template.tag());
    Ok(normalize(rest, NormalizeOps::TEMPLATE))
}

pub fn extract_style(source: &str) -> BundleResult<String> {
    let (_, rest) = section_remainder(source, SectionKind::Style)?;
    let rest = cut_at_closing(rest, SectionKind::Style.tag());
    Ok(normalize(rest, NormalizeOps::STRIP_ALL))
}

/// The script path never looks for a closing tag: the remainder runs to
/// end of file and the brace slice below trims `</script>` together with
/// any trailing content.
pub fn extract_script(source: &str) -> BundleResult<String> {
    let (loc, rest) = section_remainder(source, SectionKind::Script)?;
    let flat = normalize(rest, NormalizeOps::STRIP_ALL);
    let open = flat.find('{');
    let close = flat.rfind('}');
    match (open, close) {
        (Some(open), Some(close)) if open < close => Ok(flat[open + 1..close].to_owned()),
        _ => Err(BundleError::new(BundleErrorKind::MalformedSection).with_location(loc)),
    }
}
