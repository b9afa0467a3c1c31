// keyswitch-convert: Retype text as if it had been typed under another layout.
//
// Converts the arguments, or each line of stdin when there are none.
//
// Usage:
//   keyswitch-convert -f FROM [-t TO] [OPTIONS] [TEXT...]
//
// Options:
//   -f, --from CODE        Layout the text was typed under (en, uk, ru)
//   -t, --to CODE          Target layout; omit to print every alternative
//   --uk-from VARIANT      Ukrainian variant of the source (standard, legacy)
//   --uk-to VARIANT        Ukrainian variant of the target (standard, legacy)
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use keyswitch_core::{Language, UkVariant};
use keyswitch_engine::mapper;

struct Request {
    from: Language,
    to: Option<Language>,
    uk_from: UkVariant,
    uk_to: UkVariant,
}

impl Request {
    fn write(&self, out: &mut impl Write, text: &str) {
        match self.to {
            Some(to) => {
                let converted = mapper::convert(text, self.from, to, self.uk_from, self.uk_to);
                let _ = writeln!(out, "{converted}");
            }
            None => {
                for (target, converted) in
                    mapper::convert_to_alternatives(text, self.from, self.uk_from, self.uk_to)
                {
                    let _ = writeln!(out, "{target}: {converted}");
                }
            }
        }
    }
}

fn variant(value: Option<String>) -> UkVariant {
    value
        .as_deref()
        .map(|v| keyswitch_cli::parse_variant(v).unwrap_or_else(|e| keyswitch_cli::fatal(&e)))
        .unwrap_or_default()
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (from, args) = keyswitch_cli::parse_option(&args, "from", "-f");
    let (to, args) = keyswitch_cli::parse_option(&args, "to", "-t");
    let (uk_from, args) = keyswitch_cli::parse_option(&args, "uk-from", "--uk-from");
    let (uk_to, args) = keyswitch_cli::parse_option(&args, "uk-to", "--uk-to");

    if keyswitch_cli::wants_help(&args) {
        println!("keyswitch-convert: Retype text as if it had been typed under another layout.");
        println!();
        println!("Usage: keyswitch-convert -f FROM [-t TO] [OPTIONS] [TEXT...]");
        println!();
        println!("Converts the arguments, or each line of stdin when there are none.");
        println!();
        println!("Options:");
        println!("  -f, --from CODE        Layout the text was typed under (en, uk, ru)");
        println!("  -t, --to CODE          Target layout; omit to print every alternative");
        println!("  --uk-from VARIANT      Ukrainian variant of the source (standard, legacy)");
        println!("  --uk-to VARIANT        Ukrainian variant of the target (standard, legacy)");
        println!("  -h, --help             Print this help");
        return;
    }

    keyswitch_cli::init_logging();

    let Some(from) = from else {
        keyswitch_cli::fatal("missing --from layout");
    };
    let request = Request {
        from: keyswitch_cli::parse_language(&from),
        to: to.as_deref().map(keyswitch_cli::parse_language),
        uk_from: variant(uk_from),
        uk_to: variant(uk_to),
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if !args.is_empty() {
        request.write(&mut out, &args.join(" "));
        return;
    }

    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) => request.write(&mut out, &line),
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        }
    }
}
