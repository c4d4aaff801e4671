//! Z-machine version and its rounding-unit mapping.

/// Target Z-machine version. Drives the packed-string rounding unit
/// and whether a custom
/// alphabet is honored by interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZVersion {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
}

impl ZVersion {
    /// Parse a CLI digit (`-v1` .. `-v8`) into a version.
    pub fn from_digit(d: u8) -> Option<Self> {
        match d {
            1 => Some(ZVersion::V1),
            2 => Some(ZVersion::V2),
            3 => Some(ZVersion::V3),
            4 => Some(ZVersion::V4),
            5 => Some(ZVersion::V5),
            6 => Some(ZVersion::V6),
            7 => Some(ZVersion::V7),
            8 => Some(ZVersion::V8),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            ZVersion::V1 => 1,
            ZVersion::V2 => 2,
            ZVersion::V3 => 3,
            ZVersion::V4 => 4,
            ZVersion::V5 => 5,
            ZVersion::V6 => 6,
            ZVersion::V7 => 7,
            ZVersion::V8 => 8,
        }
    }

    /// Rounding unit `R` for *packed* strings under this version.
    /// Inline strings always use `R = 3` regardless of
    /// version — see [`crate::corpus::StringRecord::rounding_unit`].
    pub fn packed_rounding_unit(self) -> u32 {
        match self {
            ZVersion::V1 | ZVersion::V2 | ZVersion::V3 => 3,
            ZVersion::V4 | ZVersion::V5 | ZVersion::V6 | ZVersion::V7 => 6,
            ZVersion::V8 => 12,
        }
    }

    /// Custom alphabets require z5+; interpreters for
    /// earlier versions need not honor one.
    pub fn supports_custom_alphabet(self) -> bool {
        self.as_u8() >= 5
    }
}

impl std::fmt::Display for ZVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rounding_unit_follows_version_tier() {
        for v in [ZVersion::V1, ZVersion::V2, ZVersion::V3] {
            assert_eq!(v.packed_rounding_unit(), 3);
        }
        for v in [ZVersion::V4, ZVersion::V5, ZVersion::V6, ZVersion::V7] {
            assert_eq!(v.packed_rounding_unit(), 6);
        }
        assert_eq!(ZVersion::V8.packed_rounding_unit(), 12);
    }

    #[test]
    fn custom_alphabet_requires_v5_plus() {
        assert!(!ZVersion::V4.supports_custom_alphabet());
        assert!(ZVersion::V5.supports_custom_alphabet());
        assert!(ZVersion::V8.supports_custom_alphabet());
    }

    #[test]
    fn from_digit_round_trips() {
        for d in 1..=8u8 {
            assert_eq!(ZVersion::from_digit(d).unwrap().as_u8(), d);
        }
        assert_eq!(ZVersion::from_digit(0), None);
        assert_eq!(ZVersion::from_digit(9), None);
    }
}
