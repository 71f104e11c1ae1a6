use thiserror::Error;

pub type SlResult<T> = Result<T, SlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Out of range: {what} (value={value}, expected {expected})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_the_bound() {
        let err = SlError::OutOfRange {
            what: "efficiency",
            value: 1.5,
            expected: "[0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("efficiency"));
        assert!(msg.contains("[0, 1]"));
    }
}
