//! Number format types

/// Number format for cell display
///
/// Date and time patterns share this slot with numeric patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format code
    Custom(String),
}

const BUILTIN_CODES: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (49, "@"),
];

impl NumberFormat {
    /// Build a format from its code, recognising `General` and built-in codes
    pub fn from_code(code: &str) -> Self {
        if code.is_empty() || code.eq_ignore_ascii_case("general") {
            return NumberFormat::General;
        }
        BUILTIN_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(id, _)| NumberFormat::BuiltIn(*id))
            .unwrap_or_else(|| NumberFormat::Custom(code.to_string()))
    }

    /// Get the format code
    pub fn format_code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => BUILTIN_CODES
                .iter()
                .find(|(i, _)| i == id)
                .map_or("General", |(_, c)| c),
            NumberFormat::Custom(s) => s,
        }
    }

    /// Check if this is the general format
    pub fn is_general(&self) -> bool {
        self.format_code() == "General"
    }

    /// Check if this is a date/time format
    ///
    /// Quoted literals, escaped characters and bracketed sections are ignored
    /// when looking for date/time tokens.
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22),
            NumberFormat::Custom(code) => {
                let mut in_quote = false;
                let mut in_bracket = false;
                let mut escaped = false;
                for c in code.chars() {
                    if escaped {
                        escaped = false;
                        continue;
                    }
                    match c {
                        '\\' => escaped = true,
                        '"' => in_quote = !in_quote,
                        '[' if !in_quote => in_bracket = true,
                        ']' if !in_quote => in_bracket = false,
                        'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S'
                            if !in_quote && !in_bracket =>
                        {
                            return true
                        }
                        _ => {}
                    }
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(NumberFormat::from_code("General"), NumberFormat::General);
        assert_eq!(NumberFormat::from_code(""), NumberFormat::General);
        assert_eq!(NumberFormat::from_code("0.00%"), NumberFormat::BuiltIn(10));
        assert_eq!(
            NumberFormat::from_code("yyyy-mm-dd"),
            NumberFormat::Custom("yyyy-mm-dd".into())
        );
        assert_eq!(NumberFormat::BuiltIn(4).format_code(), "#,##0.00");
    }

    #[test]
    fn test_is_date_format() {
        assert!(NumberFormat::BuiltIn(14).is_date_format());
        assert!(NumberFormat::from_code("dd/mm/yyyy").is_date_format());
        assert!(!NumberFormat::from_code("#,##0.00").is_date_format());
        assert!(!NumberFormat::from_code("0.0\" days\"").is_date_format());
        assert!(!NumberFormat::from_code("[Red]0").is_date_format());
    }
}
