//! Key scripts for the `eval` command

use addcalc::core::Key;
use addcalc::keypad::Keypad;
use addcalc::request::{IdSource, Method};
use addcalc::service::ArithmeticService;
use addcalc::session::{Pressed, Session};

use crate::error::{CliError, CliResult};
use crate::output::Reporter;

/// Maps one script character to a key
#[must_use]
pub fn script_key(c: char) -> Option<Key> {
    match c {
        '<' => Some(Key::Backspace),
        'C' | 'c' => Some(Key::Clear),
        _ => Keypad::key_to_action(c.encode_utf8(&mut [0; 4])),
    }
}

/// Parses a key script, skipping whitespace
pub fn parse_script(script: &str) -> CliResult<Vec<Key>> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, key)| script_key(key).ok_or(CliError::UnknownKey { key, position }))
        .collect()
}

/// Feeds `keys` into `session`, sending a request with `method` each time
/// `=` opens the menu. Returns the number of requests sent.
pub async fn replay<A, S>(
    session: &mut Session,
    keys: &[Key],
    method: Method,
    service: &A,
    ids: &mut S,
    reporter: &Reporter,
) -> CliResult<usize>
where
    A: ArithmeticService + ?Sized,
    S: IdSource + ?Sized,
{
    let mut sent = 0;
    for key in keys {
        if session.press(*key) != Pressed::MenuOpened {
            continue;
        }
        let available = session.menu().is_some_and(|menu| menu.is_enabled(method));
        if !available {
            return Err(CliError::invalid_argument(format!(
                "method '{method}' needs exactly two operands, equation has {}",
                session.state().committed_operators() + 1
            )));
        }

        let pending = session.begin(method, ids)?;
        let spinner = reporter.start_loading(pending.equation());
        let outcome = service.add(pending.request()).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        session.finish(&pending, outcome);
        sent += 1;
    }
    Ok(sent)
}
