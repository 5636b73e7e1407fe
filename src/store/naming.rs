//! Node name normalization and collision-free name generation

use std::sync::LazyLock;

use regex::Regex;

const AUTO_NAME_PREFIX: &str = "node-";

static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("INVALID_NAME_CHARS regex is invalid"));

/// Render an arbitrary label as a node name: lowercase ASCII letters,
/// digits and single dashes, without leading or trailing dashes.
///
/// A handful of common Latin letters are transliterated first so that
/// "Über uns" becomes "ueber-uns" rather than "ber-uns".
pub fn render_valid_node_name(desired: &str) -> String {
    let mut transliterated = String::with_capacity(desired.len());
    for c in desired.trim().chars().flat_map(char::to_lowercase) {
        match c {
            'ä' => transliterated.push_str("ae"),
            'ö' => transliterated.push_str("oe"),
            'ü' => transliterated.push_str("ue"),
            'ß' => transliterated.push_str("ss"),
            'à' | 'á' | 'â' | 'ã' | 'å' => transliterated.push('a'),
            'è' | 'é' | 'ê' | 'ë' => transliterated.push('e'),
            'ì' | 'í' | 'î' | 'ï' => transliterated.push('i'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ø' => transliterated.push('o'),
            'ù' | 'ú' | 'û' => transliterated.push('u'),
            'ç' => transliterated.push('c'),
            'ñ' => transliterated.push('n'),
            other => transliterated.push(other),
        }
    }
    INVALID_NAME_CHARS
        .replace_all(&transliterated, "-")
        .trim_matches('-')
        .to_string()
}

/// Random name used when no usable name was requested or the requested one is taken.
pub fn auto_generated_node_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", AUTO_NAME_PREFIX, &id[..13])
}

/// Pick a name that `is_taken` rejects for none of the candidates returned.
///
/// The desired name is tried first (after normalization); afterwards random
/// names are drawn until one is free.
pub fn generate_unique_name<F>(desired: Option<&str>, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut candidate = desired
        .map(render_valid_node_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(auto_generated_node_name);
    while is_taken(&candidate) {
        tracing::debug!("node name \"{}\" is taken, generating another", candidate);
        candidate = auto_generated_node_name();
    }
    candidate
}
