// keyswitch-detect: Replay text from stdin through the layout detector.
//
// Each line is typed character by character. Whitespace ends a word. Every
// correction is printed as:
//   en->ru: ghbdtn => привет [switch]
//
// With --apply the text is printed with corrections applied instead.
//
// Usage:
//   keyswitch-detect [-d DICT_PATH] [-c CONFIG] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH   Dictionary directory
//   -c, --config PATH      TOML settings file
//   -l, --layout CODE      Active layout while typing (en, uk, ru; default en)
//   --apply                Print corrected text instead of corrections
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use keyswitch_core::Language;
use keyswitch_engine::{DetectionResult, LayoutDetector};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = keyswitch_cli::parse_dict_path(&args);
    let (config_path, args) = keyswitch_cli::parse_config_path(&args);
    let (layout, args) = keyswitch_cli::parse_option(&args, "layout", "-l");

    if keyswitch_cli::wants_help(&args) {
        println!("keyswitch-detect: Replay text from stdin through the layout detector.");
        println!();
        println!("Usage: keyswitch-detect [-d DICT_PATH] [-c CONFIG] [OPTIONS]");
        println!();
        println!("Prints one line per correction:");
        println!("  en->ru: ghbdtn => привет [switch]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary directory");
        println!("  -c, --config PATH      TOML settings file");
        println!("  -l, --layout CODE      Active layout while typing (en, uk, ru; default en)");
        println!("  --apply                Print corrected text instead of corrections");
        println!("  -h, --help             Print this help");
        return;
    }

    keyswitch_cli::init_logging();

    let apply = args.iter().any(|a| a == "--apply");
    let layout = layout
        .as_deref()
        .map(keyswitch_cli::parse_language)
        .unwrap_or(Language::English);

    let settings = keyswitch_cli::load_settings(config_path.as_deref())
        .unwrap_or_else(|e| keyswitch_cli::fatal(&e));
    let repository = keyswitch_cli::load_repository(dict_path.as_deref(), settings.dictionary)
        .unwrap_or_else(|e| keyswitch_cli::fatal(&e));

    let mut detector = LayoutDetector::new(repository, settings.detector);
    detector.set_current_layout(layout);

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

        let mut text = String::with_capacity(line.len());
        for c in line.chars() {
            if c.is_whitespace() {
                if let Some(result) = detector.flush_buffer(Some(c.to_string().as_str())) {
                    record(&mut out, &mut text, &result, apply);
                }
                text.push(c);
            } else {
                detector.add_character(c);
                text.push(c);
            }
        }
        if let Some(result) = detector.flush_buffer(Some("\n")) {
            record(&mut out, &mut text, &result, apply);
        }

        if apply {
            let _ = writeln!(out, "{text}");
        }
    }
}

/// Print a correction, or splice it into `text` when applying.
///
/// At flush time `text` ends with the original word plus any trailing
/// punctuation, so the last occurrence of the original is the one to
/// replace.
fn record(out: &mut impl Write, text: &mut String, result: &DetectionResult, apply: bool) {
    if apply {
        if let Some(pos) = text.rfind(&result.original) {
            text.replace_range(pos..pos + result.original.len(), &result.corrected);
        }
        return;
    }
    let switch = if result.should_switch_layout { " [switch]" } else { "" };
    let _ = writeln!(
        out,
        "{}->{}: {} => {}{switch}",
        result.source, result.target, result.original, result.corrected
    );
}
