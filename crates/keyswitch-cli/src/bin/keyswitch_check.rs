// keyswitch-check: Validate words from stdin against one language.
//
// Reads words from stdin (one per line) and reports:
//   C: word    (valid)
//   W: word    (not valid)
//   S: word    (accepted as a near miss of this dictionary word)
//
// Usage:
//   keyswitch-check -l LANG [-d DICT_PATH] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH   Dictionary directory
//   -c, --config PATH      TOML settings file
//   -l, --language CODE    Language to check against (en, uk, ru)
//   -s, --suggest          Accept near misses and print the correction
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use keyswitch_engine::WordValidator;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = keyswitch_cli::parse_dict_path(&args);
    let (config_path, args) = keyswitch_cli::parse_config_path(&args);
    let (language, args) = keyswitch_cli::parse_option(&args, "language", "-l");

    if keyswitch_cli::wants_help(&args) {
        println!("keyswitch-check: Validate words from stdin against one language.");
        println!();
        println!("Usage: keyswitch-check -l LANG [-d DICT_PATH] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (valid)");
        println!("  W: word    (not valid)");
        println!("  S: word    (correction for a near miss, with --suggest)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary directory");
        println!("  -c, --config PATH      TOML settings file");
        println!("  -l, --language CODE    Language to check against (en, uk, ru)");
        println!("  -s, --suggest          Accept near misses and print the correction");
        println!("  -h, --help             Print this help");
        return;
    }

    keyswitch_cli::init_logging();

    let Some(language) = language else {
        keyswitch_cli::fatal("missing --language");
    };
    let language = keyswitch_cli::parse_language(&language);
    let suggest = args.iter().any(|a| a == "-s" || a == "--suggest");

    let settings = keyswitch_cli::load_settings(config_path.as_deref())
        .unwrap_or_else(|e| keyswitch_cli::fatal(&e));
    let repository = keyswitch_cli::load_repository(dict_path.as_deref(), settings.dictionary)
        .unwrap_or_else(|e| keyswitch_cli::fatal(&e));
    let validator = WordValidator::new(repository);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let validation = validator.validate(word, language, suggest);
        if !validation.is_valid {
            let _ = writeln!(out, "W: {word}");
            continue;
        }
        let _ = writeln!(out, "C: {word}");
        if let Some(corrected) = validation.corrected {
            let _ = writeln!(out, "S: {corrected}");
        }
    }
}
