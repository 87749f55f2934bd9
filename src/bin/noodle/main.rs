//! Noodle CLI: find a literal in a file with the anchor scanner.
//!
//! The scanner only checks one or two anchor bytes; this binary plays the
//! enclosing engine and confirms the full literal for every candidate.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use memmap2::Mmap;
use noodle::{scan, MatchAction, ScanError, ScanKey, NATIVE_WIDTH};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "noodle")]
#[command(about = "Vectorized literal scanner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the start offset of every occurrence of a literal
    Scan(ScanArgs),
    /// Show the lane width this build scans with
    Info,
}

#[derive(Debug, Parser)]
struct ScanArgs {
    /// Literal to search for (escapes: \n \t \\ \xHH)
    #[arg(value_parser = parse_literal)]
    literal: Literal,

    /// File to scan
    file: PathBuf,

    /// Match ASCII letters case-insensitively
    #[arg(short = 'i', long)]
    nocase: bool,

    /// Only print the number of matches
    #[arg(short, long)]
    count: bool,

    /// Stop after this many matches
    #[arg(short = 'm', long)]
    limit: Option<usize>,
}

/// Literal bytes from the command line.
#[derive(Debug, Clone)]
struct Literal(Vec<u8>);

/// Parse a literal with `\n`, `\t`, `\\` and `\xHH` escapes.
fn parse_literal(s: &str) -> Result<Literal, String> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b't') => out.push(b'\t'),
            Some(b'\\') => out.push(b'\\'),
            Some(b'x') => {
                let hex: Vec<u8> = bytes.by_ref().take(2).collect();
                let hex = std::str::from_utf8(&hex).map_err(|e| e.to_string())?;
                let value = u8::from_str_radix(hex, 16)
                    .map_err(|_| format!("Invalid hex escape: '\\x{}'", hex))?;
                out.push(value);
            }
            Some(other) => return Err(format!("Unknown escape: '\\{}'", other as char)),
            None => return Err("Trailing backslash in literal".to_string()),
        }
    }
    if out.is_empty() {
        return Err("Literal must not be empty".to_string());
    }
    Ok(Literal(out))
}

/// Start offsets of `literal` in `haystack`, confirmed byte for byte.
fn find_all(
    literal: &[u8],
    haystack: &[u8],
    nocase: bool,
    limit: Option<usize>,
) -> Result<Vec<usize>> {
    let Some(key) = ScanKey::from_literal(literal, nocase) else {
        bail!("empty literal");
    };
    let back = key.anchor_offset();
    let mut found = Vec::new();

    let outcome = scan(&key, haystack, 0, &mut |offset: usize, needs_validation: bool| {
        let start = offset - back;
        let window = &haystack[start..start + literal.len()];
        let confirmed = !needs_validation
            || if nocase {
                window.eq_ignore_ascii_case(literal)
            } else {
                window == literal
            };
        if confirmed {
            found.push(start);
            if limit.is_some_and(|limit| found.len() >= limit) {
                return MatchAction::Halt;
            }
        }
        MatchAction::Continue
    });

    match outcome {
        Ok(_) => Ok(found),
        // The literal is longer than the file.
        Err(ScanError::StartOutOfBounds { .. }) => Ok(Vec::new()),
        Err(e) => Err(e).context("scan failed"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => {
            if args.limit == Some(0) {
                bail!("--limit must be at least 1");
            }
            let file = File::open(&args.file)
                .with_context(|| format!("Failed to open {}", args.file.display()))?;
            let len = file.metadata()?.len();
            let matches = if len == 0 {
                Vec::new()
            } else {
                // SAFETY: the file is only read; concurrent truncation by another
                // process is outside what this tool guards against.
                let mmap = unsafe { Mmap::map(&file) }
                    .with_context(|| format!("Failed to map {}", args.file.display()))?;
                find_all(&args.literal.0, &mmap, args.nocase, args.limit)?
            };

            if args.count {
                println!("{}", matches.len());
            } else {
                for offset in matches {
                    println!("{}", offset);
                }
            }
            Ok(())
        }
        Command::Info => {
            println!("lane width: {} bytes", NATIVE_WIDTH);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("abc").unwrap().0, b"abc");
        assert_eq!(parse_literal(r"a\nb").unwrap().0, b"a\nb");
        assert_eq!(parse_literal(r"\t\\").unwrap().0, b"\t\\");
        assert_eq!(parse_literal(r"\x00\xff").unwrap().0, [0x00, 0xFF]);

        assert!(parse_literal("").is_err());
        assert!(parse_literal(r"\q").is_err());
        assert!(parse_literal(r"\xZZ").is_err());
        assert!(parse_literal("abc\\").is_err());
    }

    #[test]
    fn test_find_all() {
        let haystack = b"GET /index GET /a get /b";
        assert_eq!(find_all(b"GET /", haystack, false, None).unwrap(), [0, 11]);
        assert_eq!(
            find_all(b"GET /", haystack, true, None).unwrap(),
            [0, 11, 18]
        );
        assert_eq!(find_all(b"GET /", haystack, true, Some(2)).unwrap(), [0, 11]);
    }

    #[test]
    fn test_find_all_single_byte_and_overlaps() {
        assert_eq!(find_all(b"a", b"banana", false, None).unwrap(), [1, 3, 5]);
        assert_eq!(find_all(b"ana", b"banana", false, None).unwrap(), [1, 3]);
        assert_eq!(find_all(b"aa", b"aaaa", false, None).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_find_all_literal_longer_than_input() {
        assert!(find_all(b"longer", b"long", false, None).unwrap().is_empty());
    }
}
