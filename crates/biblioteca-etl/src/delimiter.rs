use std::fmt;

/// Field separator of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Semicolon,
    Pipe,
    Tab,
    Comma,
}

impl Delimiter {
    /// Pick the separator for `line`: the first of `;`, `|`, tab that occurs
    /// anywhere in it, otherwise comma.
    #[must_use]
    pub fn detect(line: &str) -> Self {
        [Self::Semicolon, Self::Pipe, Self::Tab]
            .into_iter()
            .find(|d| line.contains(d.as_char()))
            .unwrap_or(Self::Comma)
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Semicolon => ';',
            Self::Pipe => '|',
            Self::Tab => '\t',
            Self::Comma => ',',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_priority() {
        assert_eq!(Delimiter::detect("a;b|c\td,e"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("a|b\tc,d"), Delimiter::Pipe);
        assert_eq!(Delimiter::detect("a\tb,c"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("a,b"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("nessun separatore"), Delimiter::Comma);
    }

    #[test]
    fn test_display() {
        assert_eq!(Delimiter::Pipe.to_string(), "|");
        assert_eq!(Delimiter::Tab.to_string(), "\t");
    }
}
