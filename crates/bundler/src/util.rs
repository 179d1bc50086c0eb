use bitflags::bitflags;

bitflags! {
    /// Represents whitespace removal applied to an extracted section.
    /// All ops are idempotent: running them on already-normalized text
    /// yields the same text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NormalizeOps: u8 {
        /// remove newline characters outright
        const STRIP_NEWLINES      = 1 << 0;
        /// delete every run of two or more spaces; single spaces survive
        const COLLAPSE_SPACE_RUNS = 1 << 1;
        /// delete every whitespace character
        const STRIP_ALL           = 1 << 2;
        /// markup keeps single spaces between attributes
        const TEMPLATE = Self::STRIP_NEWLINES.bits() | Self::COLLAPSE_SPACE_RUNS.bits();
    }
}

/// Aggressive, lossy minification of a section body. There is no
/// round-trip back to the original formatting.
pub fn normalize(s: &str, ops: NormalizeOps) -> String {
    if ops.contains(NormalizeOps::STRIP_ALL) {
        return s.chars().filter(|c| !c.is_whitespace()).collect();
    }
    let mut out = String::with_capacity(s.len());
    let mut spaces = 0usize;
    for c in s.chars() {
        match c {
            '\n' | '\r' if ops.contains(NormalizeOps::STRIP_NEWLINES) => continue,
            ' ' if ops.contains(NormalizeOps::COLLAPSE_SPACE_RUNS) => spaces += 1,
            _ => {
                if spaces == 1 {
                    out.push(' ');
                }
                spaces = 0;
                out.push(c);
            }
        }
    }
    if spaces == 1 {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_ops_drop_newlines_and_space_runs() {
        let cases = [
            ("\n  <div>Hi</div>\n", "<div>Hi</div>"),
            ("<div class=\"a\">x</div>", "<div class=\"a\">x</div>"),
            ("<a>\n\n</a>", "<a></a>"),
            ("a  b   c", "abc"),
            ("a b", "a b"),
            ("trailing ", "trailing "),
        ];
        for (src, expected) in cases {
            assert_eq!(normalize(src, NormalizeOps::TEMPLATE), expected);
        }
    }

    #[test]
    fn strip_all_removes_every_whitespace_kind() {
        let flat = normalize(" {\n data() {\treturn {} } }\n", NormalizeOps::STRIP_ALL);
        assert_eq!(flat, "{data(){return{}}}");
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = [
            ("\n  <main>  <p>x</p> </main>\n", NormalizeOps::TEMPLATE),
            (" a { b: c; }\n", NormalizeOps::STRIP_ALL),
        ];
        for (src, ops) in cases {
            let once = normalize(src, ops);
            assert_eq!(normalize(&once, ops), once);
        }
    }
}
