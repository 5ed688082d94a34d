use anyhow::Result;
use std::io::{self, BufRead, Write};

pub fn question(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

/// `y` / `yes` (any case) is yes; everything else, including EOF, is no.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(is_yes(&question(&format!("{} (y/n): ", prompt))?))
}

fn read_answer(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
