//! Subcommand bodies. Each one writes to the given sink and returns an exit code,
//! `Err` is reserved for failures outside the definition itself (I/O, serialization).

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quintuple::{DELIMITER, Dfa, ParseError};
use tracing::{debug, info};

use crate::config::RunOptions;
use crate::exit_codes;

/// Reads and validates a definition file. The inner result separates a bad definition
/// from a file that could not be read.
pub fn load(path: &Path) -> Result<Result<Dfa, ParseError>> {
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = json.len(), "Loaded definition");
    Ok(Dfa::from_json(&json))
}

fn report_invalid(out: &mut impl Write, path: &Path, error: &ParseError) -> Result<i32> {
    match error.kind() {
        Some(kind) => writeln!(out, "{}: invalid ({kind}): {error}", path.display())?,
        None => writeln!(out, "{}: invalid: {error}", path.display())?,
    }
    Ok(exit_codes::INVALID)
}

/// `quintuple check`: validates and prints a summary of the 5-tuple.
pub fn check(path: &Path, out: &mut impl Write) -> Result<i32> {
    let dfa = match load(path)? {
        Ok(dfa) => dfa,
        Err(error) => return report_invalid(out, path, &error),
    };

    let states: Vec<&str> = dfa.states().collect();
    let finals: Vec<&str> = dfa.final_states().collect();
    writeln!(out, "{}: ok", path.display())?;
    writeln!(out, "  states:   {{{}}}", states.join(", "))?;
    writeln!(out, "  alphabet: {}", dfa.alphabet())?;
    writeln!(out, "  initial:  {}", dfa.initial_state())?;
    writeln!(out, "  final:    {{{}}}", finals.join(", "))?;
    Ok(exit_codes::OK)
}

/// `quintuple export`: prints the validated definition back as pretty JSON, deduplicated
/// and with the alphabet sorted.
pub fn export(path: &Path, out: &mut impl Write) -> Result<i32> {
    let dfa = match load(path)? {
        Ok(dfa) => dfa,
        Err(error) => return report_invalid(out, path, &error),
    };
    let json = serde_json::to_string_pretty(&dfa).context("serialize definition")?;
    writeln!(out, "{json}")?;
    Ok(exit_codes::OK)
}

/// `quintuple run`: decides every word, taken from `words` or, when empty, one per line of `input`.
pub fn run(
    path: &Path,
    words: &[String],
    options: RunOptions,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<i32> {
    let dfa = match load(path)? {
        Ok(dfa) => dfa,
        Err(error) => return report_invalid(out, path, &error),
    };

    let mut verdicts = Vec::new();
    if words.is_empty() {
        for line in input.lines() {
            let line = line.context("read word from stdin")?;
            verdicts.push(decide_word(&dfa, line.trim_end_matches('\r'), options, out)?);
        }
    } else {
        for word in words {
            verdicts.push(decide_word(&dfa, word, options, out)?);
        }
    }

    let code = if verdicts.contains(&None) {
        exit_codes::INVALID
    } else if verdicts.contains(&Some(false)) {
        exit_codes::REJECTED
    } else {
        exit_codes::OK
    };
    info!(code, "Finished run");
    Ok(code)
}

/// `Some(accepted)`, or `None` for an invalid word.
fn decide_word(
    dfa: &Dfa,
    word: &str,
    options: RunOptions,
    out: &mut impl Write,
) -> Result<Option<bool>> {
    let shown = if word.is_empty() { "ε" } else { word };

    let accepted = match dfa.accepts(word) {
        Ok(accepted) => accepted,
        Err(error) => {
            if !options.quiet {
                writeln!(out, "invalid\t{shown}\t{error}")?;
            }
            return Ok(None);
        }
    };

    if options.trace && !options.quiet {
        trace_word(dfa, word, out)?;
    }
    if !options.quiet {
        let verdict = if accepted { "accept" } else { "reject" };
        writeln!(out, "{verdict}\t{shown}")?;
    }
    Ok(Some(accepted))
}

fn trace_word(dfa: &Dfa, word: &str, out: &mut impl Write) -> Result<()> {
    let mut runner = dfa.runner();
    writeln!(out, "  start {}", runner.current_state())?;
    if word.is_empty() {
        return Ok(());
    }

    for symbol in word.split(DELIMITER) {
        let from = runner.current_state();
        let to = runner.consume(symbol)?;
        let mark = if runner.is_in_final_state() { " *" } else { "" };
        writeln!(out, "  {from} --{symbol}--> {to}{mark}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const BINARY: &str = r#"{
        "alphabet": ["0", "1"],
        "states": ["q0", "q1", "q2"],
        "delta": {
            "q0": { "0": "q1", "1": null },
            "q1": { "0": "q1", "1": "q2" },
            "q2": { "0": "q1", "1": "q2" }
        },
        "initialState": "q0",
        "finalStates": ["q2"]
    }"#;

    fn write_definition(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    fn run_words(file: &NamedTempFile, given: &[&str]) -> (i32, String) {
        let mut out = Vec::new();
        let options = RunOptions::default();
        let code = run(file.path(), &words(given), options, Cursor::new(""), &mut out).unwrap();
        (code, output(out))
    }

    #[test]
    fn test_check_ok() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        assert_eq!(check(file.path(), &mut out).unwrap(), exit_codes::OK);
        let out = output(out);
        assert!(out.contains(": ok"));
        assert!(out.contains("states:   {q0, q1, q2}"));
        assert!(out.contains("alphabet: {0, 1}"));
        assert!(out.contains("initial:  q0"));
        assert!(out.contains("final:    {q2}"));
    }

    #[test]
    fn test_check_invalid() {
        let file = write_definition(&BINARY.replace(r#""1": null"#, r#""1": "q7""#));
        let mut out = Vec::new();
        assert_eq!(check(file.path(), &mut out).unwrap(), exit_codes::INVALID);
        assert!(output(out).contains("(InvalidTargetState)"));
    }

    #[test]
    fn test_check_malformed() {
        let file = write_definition("not json");
        let mut out = Vec::new();
        assert_eq!(check(file.path(), &mut out).unwrap(), exit_codes::INVALID);
        assert!(output(out).contains("malformed definition"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut out = Vec::new();
        let err = check(Path::new("/definitely/not/here.json"), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("read /definitely/not/here.json"));
    }

    #[test]
    fn test_run_words() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        let code = run(
            file.path(),
            &words(&["0,1", "0,0,0,0,1,1,1,1"]),
            RunOptions::default(),
            Cursor::new(""),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, exit_codes::OK);
        assert_eq!(output(out), "accept\t0,1\naccept\t0,0,0,0,1,1,1,1\n");
    }

    #[test]
    fn test_run_rejected_and_invalid() {
        let file = write_definition(BINARY);

        let (code, out) = run_words(&file, &["0,1", "1,0"]);
        assert_eq!(code, exit_codes::REJECTED);
        assert_eq!(out, "accept\t0,1\nreject\t1,0\n");

        let (code, out) = run_words(&file, &["1,0", "0,,1"]);
        assert_eq!(code, exit_codes::INVALID);
        assert!(out.contains("invalid\t0,,1"));
    }

    #[test]
    fn test_run_reads_stdin() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        let stdin = Cursor::new("0,1\n\n0\n");
        let code = run(file.path(), &[], RunOptions::default(), stdin, &mut out).unwrap();
        assert_eq!(code, exit_codes::REJECTED);
        assert_eq!(output(out), "accept\t0,1\nreject\tε\nreject\t0\n");
    }

    #[test]
    fn test_run_trace() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        let options = RunOptions { trace: true, quiet: false };
        run(file.path(), &words(&["0,1", "1,0"]), options, Cursor::new(""), &mut out).unwrap();
        let out = output(out);
        assert!(out.contains("  start q0\n  q0 --0--> q1\n  q1 --1--> q2 *\naccept\t0,1\n"));
        assert!(out.contains("  q0 --1--> ∅\n  ∅ --0--> ∅\nreject\t1,0\n"));
    }

    #[test]
    fn test_run_quiet() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        let options = RunOptions { trace: true, quiet: true };
        let code = run(file.path(), &words(&["1"]), options, Cursor::new(""), &mut out).unwrap();
        assert_eq!(code, exit_codes::REJECTED);
        assert!(out.is_empty());
    }

    #[test]
    fn test_export() {
        let file = write_definition(BINARY);
        let mut out = Vec::new();
        assert_eq!(export(file.path(), &mut out).unwrap(), exit_codes::OK);
        let exported = Dfa::from_json(&output(out)).unwrap();
        assert!(exported.accepts("0,1").unwrap());
        assert_eq!(exported.initial_state(), "q0");
    }
}
