// file: src/manifest/line.rs
// description: md5 manifest line grammar and basename convention
// reference: GNU md5sum output (`<digest>  <path>`, `*` marks binary mode)

const DIGEST_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine<'a> {
    /// Blank, whitespace-only or `#` comment line.
    Skip,
    Entry { md5: String, path: &'a str },
    Malformed(&'static str),
}

pub fn parse_line(line: &str) -> ManifestLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return ManifestLine::Skip;
    }

    let mut tokens = trimmed.split_whitespace();
    let (Some(first), second, rest) = (tokens.next(), tokens.next(), tokens.next()) else {
        return ManifestLine::Skip;
    };

    if !is_digest(first) {
        return ManifestLine::Malformed("line does not start with a 32 character hex digest");
    }
    let Some(path) = second else {
        return ManifestLine::Malformed("digest has no path");
    };
    if rest.is_some() {
        return ManifestLine::Malformed("path contains whitespace or trailing fields");
    }

    let path = path.strip_prefix('*').unwrap_or(path);
    if path.is_empty() {
        return ManifestLine::Malformed("digest has no path");
    }

    ManifestLine::Entry {
        md5: first.to_ascii_lowercase(),
        path,
    }
}

fn is_digest(token: &str) -> bool {
    token.len() == DIGEST_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Final component after the last `/`. Backslashes are ordinary characters,
/// so manifests are read the same way on every platform.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
