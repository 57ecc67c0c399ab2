//! Text normalization

/// Title-case a location term.
///
/// Every run of letters gets an upper-case first letter and lower-case rest;
/// any non-letter character ends the run.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}
