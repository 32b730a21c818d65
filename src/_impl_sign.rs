use crate::NetworkError;
use crate::Sign::{self, Negative, Positive};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};
use std::ops::{Add, Not};

impl Sign {
    /// Returns `true` if this is an activation.
    pub fn is_positive(self) -> bool {
        self == Positive
    }

    /// Returns `true` if this is an inhibition.
    pub fn is_negative(self) -> bool {
        self == Negative
    }

    /// Apply the sign to a Boolean value: inhibitions invert it, activations keep it.
    pub fn apply(self, value: bool) -> bool {
        match self {
            Positive => value,
            Negative => !value,
        }
    }
}

/// Sign of a path composed of two signed segments.
impl Add for Sign {
    type Output = Sign;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Positive, Positive) => Positive,
            (Negative, Negative) => Positive,
            (Positive, Negative) => Negative,
            (Negative, Positive) => Negative,
        }
    }
}

impl Not for Sign {
    type Output = Sign;

    fn not(self) -> Self::Output {
        match self {
            Positive => Negative,
            Negative => Positive,
        }
    }
}

/// Signs can be written as `+`/`1` (activation) or `-`/`-1` (inhibition).
impl TryFrom<&str> for Sign {
    type Error = NetworkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "+" | "1" => Ok(Positive),
            "-" | "-1" => Ok(Negative),
            _ => Err(NetworkError::InvalidSign {
                token: value.to_string(),
            }),
        }
    }
}

impl TryFrom<i64> for Sign {
    type Error = NetworkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Positive),
            -1 => Ok(Negative),
            _ => Err(NetworkError::InvalidSign {
                token: value.to_string(),
            }),
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Positive => write!(f, "+"),
            Negative => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Sign::{Negative, Positive};
    use crate::{NetworkError, Sign};
    use std::convert::TryFrom;

    #[test]
    fn sign_tokens() {
        assert_eq!(Sign::try_from("+").unwrap(), Positive);
        assert_eq!(Sign::try_from("1").unwrap(), Positive);
        assert_eq!(Sign::try_from(" - ").unwrap(), Negative);
        assert_eq!(Sign::try_from("-1").unwrap(), Negative);
        assert_eq!(Sign::try_from(1i64).unwrap(), Positive);
        assert_eq!(Sign::try_from(-1i64).unwrap(), Negative);

        assert_eq!(
            Sign::try_from("activates"),
            Err(NetworkError::InvalidSign {
                token: "activates".to_string()
            })
        );
        assert!(Sign::try_from("").is_err());
        assert!(Sign::try_from(0i64).is_err());
        assert!(Sign::try_from(2i64).is_err());
    }

    #[test]
    fn sign_arithmetic() {
        assert_eq!(Positive + Positive, Positive);
        assert_eq!(Negative + Negative, Positive);
        assert_eq!(Negative + Positive, Negative);
        assert_eq!(!Negative, Positive);
        assert!(Positive.apply(true));
        assert!(Negative.apply(false));
        assert!(!Negative.apply(true));
        assert_eq!(Positive.to_string(), "+");
        assert_eq!(Negative.to_string(), "-");
    }
}
