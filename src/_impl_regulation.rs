use crate::{Regulation, Sign, VariableId};
use regex::Regex;

lazy_static! {
    /// Matches a regulation string of the form `regulator -> target` or `regulator -| target`.
    static ref REGULATION_REGEX: Regex =
        Regex::new(r"^\s*([a-zA-Z0-9_.:\-]+)\s+-([>|])\s+([a-zA-Z0-9_.:\-]+)\s*$").unwrap();
}

impl Regulation {
    pub fn get_regulator(&self) -> VariableId {
        self.regulator
    }

    pub fn get_target(&self) -> VariableId {
        self.target
    }

    pub fn get_sign(&self) -> Sign {
        self.sign
    }

    pub fn is_self_loop(&self) -> bool {
        self.regulator == self.target
    }

    /// **(internal)** Parse a regulation string into its regulator name, sign and target name.
    pub(crate) fn try_from_string(regulation: &str) -> Option<(String, Sign, String)> {
        REGULATION_REGEX.captures(regulation).map(|captures| {
            let sign = if &captures[2] == ">" {
                Sign::Positive
            } else {
                Sign::Negative
            };
            (captures[1].to_string(), sign, captures[3].to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Regulation;
    use crate::Sign::{Negative, Positive};

    #[test]
    fn parse_regulation_valid() {
        assert_eq!(
            Regulation::try_from_string("  abc -> 123 "),
            Some(("abc".to_string(), Positive, "123".to_string()))
        );
        assert_eq!(
            Regulation::try_from_string("hello_world -| world_hello_123"),
            Some((
                "hello_world".to_string(),
                Negative,
                "world_hello_123".to_string()
            ))
        );
        assert_eq!(
            Regulation::try_from_string("x -> x"),
            Some(("x".to_string(), Positive, "x".to_string()))
        );
    }

    #[test]
    fn parse_regulation_invalid() {
        assert!(Regulation::try_from_string("").is_none());
        assert!(Regulation::try_from_string("var1 var2 -> var3").is_none());
        assert!(Regulation::try_from_string("var -| v?r").is_none());
        assert!(Regulation::try_from_string(" -> foo").is_none());
        assert!(Regulation::try_from_string("a ->? b").is_none());
        assert!(Regulation::try_from_string("a - > b").is_none());
    }
}
