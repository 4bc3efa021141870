/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    True,
    False,
    /// 0-based option index; typed 1-based.
    Option(usize),
    Next,
    Previous,
    Finish,
    Restart,
    Quit,
    Help,
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "t" | "true" => Self::True,
            "f" | "false" => Self::False,
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "finish" | "done" => Self::Finish,
            "r" | "restart" => Self::Restart,
            "q" | "quit" | "exit" => Self::Quit,
            "?" | "h" | "help" => Self::Help,
            other => {
                let number = other.parse::<usize>().ok()?;
                return number.checked_sub(1).map(Self::Option);
            }
        };
        Some(command)
    }
}

pub const HELP: &str = "\
Commands:
  t / f        answer true or false
  1, 2, ...    pick an option
  n / p        next or previous question
  finish       finish once every question is answered
  restart      start a new assessment
  q            quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_words_case_insensitively() {
        assert_eq!(Command::parse(" T "), Some(Command::True));
        assert_eq!(Command::parse("False"), Some(Command::False));
        assert_eq!(Command::parse("NEXT"), Some(Command::Next));
        assert_eq!(Command::parse("finish"), Some(Command::Finish));
    }

    #[test]
    fn options_are_one_based() {
        assert_eq!(Command::parse("1"), Some(Command::Option(0)));
        assert_eq!(Command::parse("4"), Some(Command::Option(3)));
        assert_eq!(Command::parse("0"), None);
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("maybe"), None);
        assert_eq!(Command::parse("-1"), None);
    }
}
