use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub type InputLines = Lines<BufReader<Stdin>>;

pub fn input_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Prompts and waits for the next line, `None` once stdin is closed.
pub async fn input(lines: &mut InputLines, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    lines.next_line().await
}
