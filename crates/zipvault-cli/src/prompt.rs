//! Interactive password prompting.

use anyhow::Result;
use std::io::IsTerminal;
use zeroize::Zeroize;
use zeroize::Zeroizing;

/// Reads a password, returning `None` when the user cancels.
///
/// On a terminal this prompts with echo disabled; EOF counts as
/// cancellation. With piped stdin it reads one candidate per line so
/// scripted callers and tests can drive the prompt, and EOF cancels. The
/// returned buffer is zeroized on drop.
pub fn read_password(prompt_text: &str) -> Result<Option<Zeroizing<String>>> {
    if std::io::stdin().is_terminal() {
        match rpassword::prompt_password(prompt_text) {
            Ok(secret) => Ok(Some(Zeroizing::new(secret))),
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err.into()),
        }
    } else {
        read_password_line()
    }
}

/// Reads one line from piped stdin as a password candidate.
fn read_password_line() -> Result<Option<Zeroizing<String>>> {
    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    let secret = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_owned());
    line.zeroize();
    Ok(Some(secret))
}
