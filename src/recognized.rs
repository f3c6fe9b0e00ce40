use std::fmt;

/// Either a value we have a typed variant for, or the raw form it was found in.
///
/// Collection names come from file names and CLI arguments, and the set of
/// collections on disk is open. Names outside the known table are carried
/// through as `Unknown` so they can still be loaded and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recognized<T, Raw = String> {
    Known(T),
    Unknown(Raw),
}

impl<T: Copy, Raw: Copy> Copy for Recognized<T, Raw> {}

impl<T, Raw> Recognized<T, Raw> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recognized::Known(t) => Some(t),
            Recognized::Unknown(_) => None,
        }
    }

    pub fn unknown(&self) -> Option<&Raw> {
        match self {
            Recognized::Known(_) => None,
            Recognized::Unknown(raw) => Some(raw),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Recognized::Known(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Recognized<U, Raw> {
        match self {
            Recognized::Known(t) => Recognized::Known(f(t)),
            Recognized::Unknown(raw) => Recognized::Unknown(raw),
        }
    }
}

impl<T, Raw> From<T> for Recognized<T, Raw> {
    fn from(value: T) -> Self {
        Recognized::Known(value)
    }
}

impl<T: fmt::Display, Raw: fmt::Display> fmt::Display for Recognized<T, Raw> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognized::Known(t) => t.fmt(f),
            Recognized::Unknown(raw) => raw.fmt(f),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn map_keeps_unknown_raw() {
        let known: Recognized<u8> = Recognized::Known(2);
        let unknown: Recognized<u8> = Recognized::Unknown("Ability".to_string());

        assert_eq!(known.map(|v| v * 2).known(), Some(&4));
        let mapped = unknown.map(|v| v * 2);
        assert!(!mapped.is_known());
        assert_eq!(mapped.unknown().map(String::as_str), Some("Ability"));
        assert_eq!(mapped.to_string(), "Ability");
    }
}
