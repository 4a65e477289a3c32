// src/catalog/class_name.rs

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Marker word that precedes the class number in course file names.
pub const DEFAULT_MARKER: &str = "Clase";
/// Topics shorter than this are replaced by the fallback table entry.
const MIN_TOPIC_LEN: usize = 3;

lazy_static! {
    static ref DEFAULT_PATTERN: ClassPattern =
        ClassPattern::new(DEFAULT_MARKER).expect("default class marker is a valid pattern");
    static ref LEADING_SEPARATORS: Regex = Regex::new(r"^[\s\-\.]+").unwrap();
}

/// Class number and remaining descriptive text parsed from a file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassToken {
    /// Normalized to at least two digits ("7" -> "07").
    pub number: String,
    /// Text after the number and its separators, `None` when too short.
    pub topic: Option<String>,
}

impl ClassToken {
    pub fn numeric(&self) -> Option<u32> {
        self.number.parse().ok()
    }
}

/// Compiled form of "marker word, optional whitespace, digits".
#[derive(Debug, Clone)]
pub struct ClassPattern {
    marker: String,
    number: Regex,
    with_topic: Regex,
}

impl ClassPattern {
    pub fn new(marker: &str) -> Result<Self, String> {
        let escaped = regex::escape(marker);
        let build = |pattern: String| {
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| format!("Invalid class marker '{}': {}", marker, e))
        };
        Ok(Self {
            marker: marker.to_string(),
            number: build(format!(r"{}\s*(\d+)", escaped))?,
            with_topic: build(format!(r"^{}\s*(\d+)[\s\-\.]*(\D.*)?$", escaped))?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Class number found anywhere in `file_name`, normalized to two digits.
    pub fn class_number(&self, file_name: &str) -> Option<String> {
        self.number
            .captures(file_name)
            .and_then(|c| c.get(1))
            .map(|m| normalize_number(m.as_str()))
    }

    /// Number and topic of a stem that starts with the marker.
    pub fn parse(&self, stem: &str) -> Option<ClassToken> {
        if !self.starts_with_marker(stem) {
            return None;
        }
        let number = self.class_number(stem)?;
        let topic = self
            .with_topic
            .captures(stem)
            .and_then(|c| c.get(2))
            .map(|m| LEADING_SEPARATORS.replace(m.as_str().trim(), "").trim().to_string())
            .filter(|t| t.chars().count() >= MIN_TOPIC_LEN);
        Some(ClassToken { number, topic })
    }

    /// "Clase NN: topic", falling back to the topic table; stems that do not
    /// start with the marker are returned unchanged.
    pub fn display_name(&self, stem: &str) -> String {
        match self.parse(stem) {
            Some(token) => {
                let topic = token
                    .topic
                    .clone()
                    .unwrap_or_else(|| default_topic(&token.number));
                format!("{} {}: {}", self.marker, token.number, topic)
            }
            None => stem.to_string(),
        }
    }

    fn starts_with_marker(&self, stem: &str) -> bool {
        stem.get(..self.marker.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(&self.marker))
    }
}

impl Default for ClassPattern {
    fn default() -> Self {
        DEFAULT_PATTERN.clone()
    }
}

pub fn normalize_number(digits: &str) -> String {
    format!("{:0>2}", digits)
}

/// Fallback topic for a class number, `Tema N` when the table has no entry.
pub fn default_topic(number: &str) -> String {
    let topic = match normalize_number(number).as_str() {
        "01" => "Señales Analógicas y Muestreo",
        "02" => "Muestreo y Aliasing",
        "03" => "Espectro de Señales",
        "04" => "Filtros Antialias",
        "05" => "Reconstrucción de Señales",
        "06" => "Cuantización",
        "07" => "Sistemas LTI",
        "08" => "Respuesta al Impulso",
        "09" => "Causalidad y Estabilidad",
        "10" => "Convolución",
        "11" => "Transformada Z",
        "12" => "DFT",
        "13" => "Filtros FIR",
        "14" => "Filtros IIR",
        _ => return format!("Tema {}", number),
    };
    topic.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_is_found_anywhere_and_normalized() {
        let pattern = ClassPattern::default();
        assert_eq!(pattern.class_number("Clase 7- Sistemas.py"), Some("07".into()));
        assert_eq!(pattern.class_number("notas clase07.pdf"), Some("07".into()));
        assert_eq!(pattern.class_number("CLASE 12.pdf"), Some("12".into()));
        assert_eq!(pattern.class_number("utils.py"), None);
    }

    #[test]
    fn topic_after_separators() {
        let pattern = ClassPattern::default();
        assert_eq!(
            pattern.display_name("Clase 01- Señales analógicas y muestreo"),
            "Clase 01: Señales analógicas y muestreo"
        );
        assert_eq!(
            pattern.display_name("Clase 13 - . zero padding"),
            "Clase 13: zero padding"
        );
    }

    #[test]
    fn short_or_missing_topic_uses_table() {
        let pattern = ClassPattern::default();
        assert_eq!(pattern.display_name("Clase 07"), "Clase 07: Sistemas LTI");
        assert_eq!(pattern.display_name("Clase 07-"), "Clase 07: Sistemas LTI");
        assert_eq!(pattern.display_name("Clase 3 ab"), "Clase 03: Espectro de Señales");
        assert_eq!(pattern.display_name("Clase 42"), "Clase 42: Tema 42");
        assert_eq!(pattern.display_name("Clase 1234"), "Clase 1234: Tema 1234");
    }

    #[test]
    fn stems_without_leading_marker_are_kept() {
        let pattern = ClassPattern::default();
        assert_eq!(pattern.display_name("Apuntes Clase 05"), "Apuntes Clase 05");
        assert!(pattern.parse("Apuntes Clase 05").is_none());
    }

    #[test]
    fn two_digit_round_trip() {
        let pattern = ClassPattern::default();
        for n in 0..100u32 {
            for name in [format!("Clase {:02}- tema", n), format!("Clase{} tema.py", n)] {
                let number = pattern.class_number(&name).unwrap();
                assert_eq!(number, format!("{:02}", n));
            }
        }
    }

    #[test]
    fn custom_marker_is_escaped() {
        let pattern = ClassPattern::new("Lec.").unwrap();
        assert_eq!(pattern.class_number("Lec. 4 intro"), Some("04".into()));
        assert_eq!(pattern.class_number("Lecx 4 intro"), None);
    }
}
