use thiserror::Error;

use crate::render::RenderError;

/// CLI-level error categories mapped to exit codes.
///
/// Bad date input never shows up here; the prompt loop re-asks instead.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickpair_core::ValidationError),

    #[error(transparent)]
    Source(#[from] tickpair_core::SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Render(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let errors = [
            CliError::Validation(tickpair_core::ValidationError::EmptySymbol),
            CliError::Source(tickpair_core::SourceError::not_found("no rows")),
            CliError::Render(RenderError::Drawing(String::from("boom"))),
            CliError::Io(std::io::Error::other("closed")),
        ];
        let codes: Vec<u8> = errors.iter().map(CliError::exit_code).collect();

        assert_eq!(codes, vec![2, 3, 4, 10]);
    }

    #[test]
    fn source_errors_keep_their_code_in_the_message() {
        let error = CliError::from(tickpair_core::SourceError::not_found("no rows for 'PG'"));
        assert_eq!(error.to_string(), "no rows for 'PG' (source.not_found)");
    }
}
