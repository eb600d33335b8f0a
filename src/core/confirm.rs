use crate::domain::models::ConfirmAnswer;
use anyhow::Result;
use std::io::{BufRead, Write};

fn parse_answer(line: &str) -> Option<ConfirmAnswer> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(ConfirmAnswer::Yes),
        "n" | "no" => Some(ConfirmAnswer::No),
        "a" | "all" => Some(ConfirmAnswer::All),
        "q" | "quit" => Some(ConfirmAnswer::Quit),
        _ => None,
    }
}

/// Prompts for one entry and reads answers until a recognized one arrives.
///
/// End of input counts as `quit`: when stdin is closed there is no way to
/// confirm anything further, so the run winds down cleanly.
pub fn ask(
    name: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<ConfirmAnswer> {
    loop {
        write!(output, "delete '{name}'? [yes/no/all/quit] ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(ConfirmAnswer::Quit);
        }

        match parse_answer(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(output, "Please answer yes, no, all or quit.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_answer_accepts_words_and_shorthands() {
        assert_eq!(parse_answer("yes\n"), Some(ConfirmAnswer::Yes));
        assert_eq!(parse_answer("y"), Some(ConfirmAnswer::Yes));
        assert_eq!(parse_answer("  NO "), Some(ConfirmAnswer::No));
        assert_eq!(parse_answer("All"), Some(ConfirmAnswer::All));
        assert_eq!(parse_answer("q\n"), Some(ConfirmAnswer::Quit));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn test_ask_reprompts_on_unrecognized_input() {
        let mut input = Cursor::new(b"what\nyes\n".to_vec());
        let mut output = Vec::new();

        let answer = ask("victim.txt", &mut input, &mut output).unwrap();

        assert_eq!(answer, ConfirmAnswer::Yes);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("delete 'victim.txt'?").count(), 2);
        assert!(text.contains("Please answer yes, no, all or quit."));
    }

    #[test]
    fn test_ask_treats_eof_as_quit() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();

        let answer = ask("victim.txt", &mut input, &mut output).unwrap();

        assert_eq!(answer, ConfirmAnswer::Quit);
    }
}
