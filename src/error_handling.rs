use std::fmt::Display;

// Every way an analysis request can fail. All of these are terminal for
// the request that triggered them; nothing is retried or auto-corrected.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    // Malformed grammar text: bad EBNF grouping, missing or repeated `->`,
    // invalid non-terminal name, empty alternative, undefined reference
    Syntax(String),
    // A step was requested before any successful analyze call
    NotInitialized,
    // A step was requested for something other than FIRST/FOLLOW/PREDICT/LL1
    UnknownAnalysisType(String),
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Syntax(message) => write!(f, "Syntax error: {}", message),
            AnalysisError::NotInitialized => {
                write!(f, "No grammar has been analyzed yet")
            }
            AnalysisError::UnknownAnalysisType(kind) => {
                write!(f, "Unknown analysis type `{}`", kind)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let cases = vec![
            (
                AnalysisError::Syntax("missing '->'".to_string()),
                "Syntax error: missing '->'",
            ),
            (
                AnalysisError::NotInitialized,
                "No grammar has been analyzed yet",
            ),
            (
                AnalysisError::UnknownAnalysisType("LR0".to_string()),
                "Unknown analysis type `LR0`",
            ),
        ];

        for (error, message) in cases {
            assert_eq!(error.to_string(), message);
        }
    }
}
