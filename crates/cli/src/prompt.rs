//! Interactive confirmation for mutating live calls.

use std::io::{self, BufRead, Write};

/// Whether an answer counts as a confirmation. Anything other than an
/// explicit yes aborts.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "yes" | "y")
}

/// Ask the operator a yes/no question on stdout/stdin. Defaults to no.
pub fn confirm(question: &str) -> io::Result<bool> {
    println!("{question}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}
