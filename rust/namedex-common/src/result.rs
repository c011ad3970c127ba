pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns early with an `InvalidArgument` error unless the condition holds.
///
/// `verify_arg!(offset, offset >= 0)` reports the stringified condition;
/// a trailing format string replaces it with a readable message.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $cond:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                stringify!($cond),
            ));
        }
    };
    ($name:ident, $cond:expr, $($fmt:tt)+) => {
        if !$cond {
            return Err($crate::error::Error::invalid_arg(
                stringify!($name),
                format!($($fmt)+),
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_page(offset: i64, limit: i64) -> crate::Result<()> {
        verify_arg!(offset, offset >= 0);
        verify_arg!(limit, (1..=100).contains(&limit), "must be between 1 and {}", 100);
        Ok(())
    }

    fn rejected(result: crate::Result<()>) -> (String, String) {
        match result.unwrap_err().into_kind() {
            ErrorKind::InvalidArgument { name, message } => (name, message),
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_verify_arg() {
        assert!(check_page(0, 1).is_ok());
        assert_eq!(
            rejected(check_page(-1, 10)),
            ("offset".to_string(), "offset >= 0".to_string())
        );
        assert_eq!(
            rejected(check_page(0, 0)),
            ("limit".to_string(), "must be between 1 and 100".to_string())
        );
    }
}
