use thiserror::Error;

use crate::model::WorldPos;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GotoParseError {
    #[error("expected two comma-separated coordinates")]
    WrongArity,
    #[error("'{0}' is not an integer coordinate")]
    NotAnInteger(String),
}

/// Parses `"x, y"` into a world position.
pub fn parse_goto(input: &str) -> Result<WorldPos, GotoParseError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let [x, y] = parts.as_slice() else {
        return Err(GotoParseError::WrongArity);
    };
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| GotoParseError::NotAnInteger(s.to_string()))
    };
    Ok(WorldPos::new(parse(*x)?, parse(*y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_pairs() {
        assert_eq!(parse_goto("100, -50"), Ok(WorldPos::new(100, -50)));
        assert_eq!(parse_goto("  7,8 "), Ok(WorldPos::new(7, 8)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_goto(""), Err(GotoParseError::WrongArity));
        assert_eq!(parse_goto("1, 2, 3"), Err(GotoParseError::WrongArity));
        assert_eq!(
            parse_goto("12, abc"),
            Err(GotoParseError::NotAnInteger("abc".into()))
        );
        assert!(parse_goto("1.5, 2").is_err());
        assert!(parse_goto(", 2").is_err());
    }
}
