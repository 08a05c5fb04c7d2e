// src/constants.rs
//
// Application-wide constants shared by the gateway, the parser and the CLI.

/// Header carrying the bearer token on every protected request.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Service root used when neither the CLI nor the config file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Overrides the configured service root.
///
/// Used in: `cli/args.rs`
pub const SERVER_ENV_VAR: &str = "SMARTNOTES_SERVER";

/// Supplies a bearer token directly, bypassing the session file.
///
/// Used in: `lib.rs`
pub const TOKEN_ENV_VAR: &str = "SMARTNOTES_TOKEN";

/// Supplies the password for `login` and `register` without putting it on the command line.
pub const PASSWORD_ENV_VAR: &str = "SMARTNOTES_PASSWORD";

/// Directory name used under the config and runtime directories.
pub const APP_DIR_NAME: &str = "smartnotes";

/// An unlabeled line only counts as an answer when it is longer than this
/// many characters after its bullet marker is removed.
///
/// Used in: `infrastructure/flashcard_parser.rs`
pub const MIN_FALLBACK_ANSWER_CHARS: usize = 5;

/// Number of trailing id digits shown in short labels such as `Summary #1234`.
pub const SHORT_ID_DIGITS: usize = 4;
