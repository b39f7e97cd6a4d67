//! Line-oriented stdin prompts that re-ask until the input is usable.

use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line. EOF is an error so menu
/// loops terminate instead of spinning.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let read = io::stdin().lock().read_line(&mut buf)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(buf.trim().to_string())
}

/// Parse a float and check it against an inclusive range.
pub fn parse_float_in_range(input: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| format!("'{input}' is not a valid number"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if value > max {
        return Err(format!("value must be at most {max}"));
    }
    Ok(value)
}

/// Check string length bounds.
pub fn check_string(input: &str, max_length: usize) -> Result<(), String> {
    if input.is_empty() {
        return Err("input cannot be empty".into());
    }
    if input.len() > max_length {
        return Err(format!("input must be at most {max_length} character(s)"));
    }
    Ok(())
}

/// Re-ask until the line is non-empty and within `max_length`.
pub fn prompt_string(prompt: &str, max_length: usize) -> io::Result<String> {
    loop {
        let input = read_line(prompt)?;
        match check_string(&input, max_length) {
            Ok(()) => return Ok(input),
            Err(msg) => println!("Error: {msg}. Please try again."),
        }
    }
}

/// Like `prompt_string`, but an empty line means "skip".
pub fn prompt_optional_string(prompt: &str, max_length: usize) -> io::Result<Option<String>> {
    loop {
        let input = read_line(prompt)?;
        if input.is_empty() {
            return Ok(None);
        }
        match check_string(&input, max_length) {
            Ok(()) => return Ok(Some(input)),
            Err(msg) => println!("Error: {msg}. Please try again."),
        }
    }
}

/// Re-ask until the line parses as a float inside `[min, max]`.
pub fn prompt_float(prompt: &str, min: f64, max: f64) -> io::Result<f64> {
    loop {
        let input = read_line(prompt)?;
        if input.is_empty() {
            println!("Error: input cannot be empty. Please enter a number.");
            continue;
        }
        match parse_float_in_range(&input, min, max) {
            Ok(value) => return Ok(value),
            Err(msg) => println!("Error: {msg}. Please try again."),
        }
    }
}

/// Like `prompt_float`, but an empty line means "skip".
pub fn prompt_optional_float(prompt: &str, min: f64, max: f64) -> io::Result<Option<f64>> {
    loop {
        let input = read_line(prompt)?;
        if input.is_empty() {
            return Ok(None);
        }
        match parse_float_in_range(&input, min, max) {
            Ok(value) => return Ok(Some(value)),
            Err(msg) => println!("Error: {msg}. Please try again."),
        }
    }
}
