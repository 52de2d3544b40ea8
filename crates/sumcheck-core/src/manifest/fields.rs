//! Field splitting for one manifest line.
//!
//! Fields are separated by spaces; spaces at the start of a field are skipped,
//! so runs of spaces collapse. A field may be wrapped in double quotes to hold
//! spaces, with `""` inside quotes standing for a literal quote. A trailing
//! space starts one more (empty) field.

/// Quoted field still open at end of line.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct UnterminatedQuote;

#[derive(Clone, Copy)]
enum State {
    StartField,
    InField,
    InQuoted,
    QuoteInQuoted,
}

/// Split `line` into fields. Empty fields are kept so the caller can reject them.
pub(super) fn split_fields(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = State::StartField;

    for c in line.chars() {
        state = match (state, c) {
            (State::StartField, ' ') => State::StartField,
            (State::StartField, '"') => State::InQuoted,
            (State::InField, ' ') | (State::QuoteInQuoted, ' ') => {
                fields.push(std::mem::take(&mut field));
                State::StartField
            }
            (State::InQuoted, '"') => State::QuoteInQuoted,
            (State::InQuoted, c) => {
                field.push(c);
                State::InQuoted
            }
            (State::QuoteInQuoted, '"') => {
                field.push('"');
                State::InQuoted
            }
            (_, c) => {
                field.push(c);
                State::InField
            }
        };
    }

    match state {
        State::InQuoted => Err(UnterminatedQuote),
        _ => {
            fields.push(field);
            Ok(fields)
        }
    }
}
