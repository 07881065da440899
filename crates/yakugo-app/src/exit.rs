use std::process::ExitCode;

use yakugo_core::Error;
use yakugo_types::TypeError;

const INVALID_INPUT: u8 = 2;
const NOT_FOUND: u8 = 4;
const ALREADY_EXISTS: u8 = 5;

/// Exit status of a failed command, looked up through any added context
pub fn exit_code(error: &anyhow::Error) -> ExitCode {
    ExitCode::from(status(error))
}

fn status(error: &anyhow::Error) -> u8 {
    if let Some(e) = error.downcast_ref::<Error>() {
        return match e {
            Error::TranslationNotFound => NOT_FOUND,
            Error::TranslationAlreadyExists => ALREADY_EXISTS,
            Error::InvalidArgument(_) | Error::InvalidLanguageCode(_) => INVALID_INPUT,
            _ => 1,
        };
    }
    if error.downcast_ref::<TypeError>().is_some() {
        return INVALID_INPUT;
    }
    1
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn maps_core_errors() {
        assert_eq!(status(&Error::TranslationNotFound.into()), NOT_FOUND);
        assert_eq!(status(&Error::TranslationAlreadyExists.into()), ALREADY_EXISTS);
        assert_eq!(
            status(&Error::InvalidArgument("text is required".into()).into()),
            INVALID_INPUT
        );
        assert_eq!(status(&Error::Cancelled.into()), 1);
    }

    #[test]
    fn sees_through_context() {
        let error = Err::<(), _>(TypeError::InvalidLanguageCode("xx".into()))
            .context("unsupported YAKUGO_TO_LANG")
            .unwrap_err();
        assert_eq!(status(&error), INVALID_INPUT);

        let error = Err::<(), _>(Error::TranslationNotFound)
            .context("admin find")
            .unwrap_err();
        assert_eq!(status(&error), NOT_FOUND);
    }

    #[test]
    fn unknown_errors_are_generic_failures() {
        assert_eq!(status(&anyhow::anyhow!("disk on fire")), 1);
    }
}
