use crate::consts::NUMERIC_RE;
use crate::error::TemplateError;
use crate::key::TemplateKey;

/// Split a filename into its literal skeleton and its numeric tokens.
///
/// The name is split at the last `.`; numbers are only searched for in the
/// part before it. Tokens keep their exact text, so `007` stays `007`.
pub fn tokenize(filename: &str) -> Result<(TemplateKey, Vec<String>), TemplateError> {
    let (stem, ext) = filename
        .rsplit_once('.')
        .ok_or_else(|| TemplateError::MalformedName {
            name: filename.to_string(),
        })?;

    let mut segments = Vec::new();
    let mut values = Vec::new();
    let mut last = 0;
    for m in NUMERIC_RE.find_iter(stem) {
        segments.push(stem[last..m.start()].to_string());
        values.push(m.as_str().to_string());
        last = m.end();
    }
    segments.push(format!("{}.{ext}", &stem[last..]));
    tracing::trace!(filename, slots = values.len());

    Ok((TemplateKey::new(segments), values))
}

/// Interleave `key`'s segments with `values`: `k0 + v0 + k1 + ... + kn`.
/// Extra values are ignored and missing ones leave their slot empty; callers
/// check lengths beforehand.
pub fn build_name(key: &TemplateKey, values: &[String]) -> String {
    let segments = key.segments();
    let mut name = segments[0].clone();
    for (i, segment) in segments[1..].iter().enumerate() {
        if let Some(value) = values.get(i) {
            name.push_str(value);
        }
        name.push_str(segment);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tokenize_basic() {
        let (key, values) = tokenize("img_1080_001.png").unwrap();
        assert_eq!(key.segments(), strings(&["img_", "_", ".png"]));
        assert_eq!(values, strings(&["1080", "001"]));
    }

    #[test]
    fn tokenize_keeps_decimals_together() {
        let (key, values) = tokenize("take 2.5 final.wav").unwrap();
        assert_eq!(key.segments(), strings(&["take ", " final.wav"]));
        assert_eq!(values, strings(&["2.5"]));
    }

    #[test]
    fn lone_dots_are_literal() {
        let (key, values) = tokenize("v1.x.2..tar.gz").unwrap();
        assert_eq!(values, strings(&["1", "2"]));
        assert_eq!(key.segments(), strings(&["v", ".x.", "..tar.gz"]));

        let (key, values) = tokenize("1.2.3.txt").unwrap();
        assert_eq!(values, strings(&["1.2", "3"]));
        assert_eq!(key.segments(), strings(&["", ".", ".txt"]));
    }

    #[test]
    fn only_ascii_digits_are_tokens() {
        let (key, values) = tokenize("ep\u{0663}.mp4").unwrap();
        assert!(values.is_empty());
        assert_eq!(key.segments(), strings(&["ep\u{0663}.mp4"]));
    }

    #[test]
    fn digits_in_extension_are_not_tokens() {
        let (key, values) = tokenize("clip.mp4").unwrap();
        assert!(values.is_empty());
        assert_eq!(key.segments(), strings(&["clip.mp4"]));
    }

    #[test]
    fn tokenize_rejects_names_without_extension() {
        assert_eq!(
            tokenize("Makefile"),
            Err(TemplateError::MalformedName {
                name: "Makefile".to_string()
            })
        );
    }

    #[test]
    fn build_name_inverts_tokenize() {
        for name in ["ep1.mp4", "007.jpg", ".hidden", "a1b2c3.d4", "2024-01-05 12.30.log"] {
            let (key, values) = tokenize(name).unwrap();
            assert_eq!(build_name(&key, &values), name);
        }
    }

    #[test]
    fn build_name_with_new_key() {
        let key = TemplateKey::new(strings(&["episode_", ".mp4"]));
        assert_eq!(build_name(&key, &strings(&["4"])), "episode_4.mp4");
    }
}
