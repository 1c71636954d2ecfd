//! Internal error handling mechanisms

/// Cold path hint, causes compiler to better optimize unlikely error paths.
#[cold]
pub(crate) fn cold_path() {}

/// Version of stdlib `debug_assert` that uses `log_or_panic` in order to get logging.
macro_rules! log_or_panic_assert {
    ($check:expr, $($msg:expr),*) => {
        if !$check {
            $crate::error_handling::log_or_panic!($($msg),*);
        }
    };
}

/// Panic on debug builds only
///
/// Use this when an error indicates a bug in the runtime or in component code (a component
/// borrowed twice, a listener outliving its component, a node missing from the document) and
/// release builds can recover by skipping the failed update.
///
/// Errors that can be caused by end user input must use `Option`/`Result` instead.
macro_rules! log_or_panic {
    ($($msg:expr),*) => {
        $crate::error_handling::cold_path();

        ::log::error!($($msg),*);
        if cfg!(debug_assertions) {
            panic!($($msg),*);
        }
    };
}

pub(crate) use {log_or_panic, log_or_panic_assert};

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "Error in release mode")]
    fn test_debug_assert() {
        log_or_panic_assert!(1 > 2, "Error in release mode");
    }

    #[test]
    #[should_panic(expected = "This won't panic in release")]
    fn test_debug_panic() {
        log_or_panic!("This won't panic in release");
    }

    #[test]
    fn passing_assert_is_silent() {
        log_or_panic_assert!(1 < 2, "Math broke");
    }
}
