use std::{
    io::{self, BufRead, Write},
    path::Path,
};

use tracing::{debug, error};

/// Answers accepted as "yes", compared after trimming and lowercasing
const AFFIRMATIVE: [&str; 3] = ["y", "yes", "н"];

pub fn is_affirmative(answer: &str) -> bool {
    AFFIRMATIVE.contains(&answer.trim().to_lowercase().as_str())
}

/// Ask on stdout and read the answer from stdin
///
/// Empty input, EOF or a read error all count as "no"
pub fn ask_for_overwrite(path: &Path) -> bool {
    debug!("{} already exists", path.display());
    let stdin = io::stdin();
    prompt_overwrite(&mut stdin.lock(), &mut io::stdout())
}

pub fn prompt_overwrite(input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if let Err(e) = write!(output, "Файл вже існує. Перезаписати? (y/n): ").and_then(|_| output.flush())
    {
        error!("Unable to write prompt: {}", e);
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(e) => {
            error!("Unable to read answer: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{is_affirmative, prompt_overwrite};

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y", "yes", "YES\n", "  yes  ", "н", "Н\r\n"] {
            assert!(is_affirmative(answer), "{answer:?} should be accepted");
        }
        for answer in ["", "\n", "n", "no", "yep", "так", "y y"] {
            assert!(!is_affirmative(answer), "{answer:?} should be refused");
        }
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut out = vec![];
        assert!(prompt_overwrite(&mut Cursor::new("y\nn\n"), &mut out));
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Файл вже існує. Перезаписати? (y/n): "
        );

        assert!(!prompt_overwrite(&mut Cursor::new("n\n"), &mut vec![]));
        assert!(!prompt_overwrite(&mut Cursor::new(""), &mut vec![]));
    }
}
