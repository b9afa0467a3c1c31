// keyswitch-compile: Build a binary dictionary from one or more word lists.
//
// Each word list has one word per line. Words are trimmed, lowercased and
// normalised; blank lines and lines starting with '#' are skipped. Phrases,
// entries with digits or letters of another script, and words shorter than
// three letters are dropped. Several lists are merged into their union.
//
// Usage:
//   keyswitch-compile [OPTIONS] INPUT... OUTPUT
//
// Options:
//   -l, --language CODE    Language of the word lists (default: from OUTPUT's name)
//   --fp-rate RATE         Target false-positive rate of the filter
//   -h, --help             Print help

use std::time::Instant;

use keyswitch_dict::DictionaryIndex;
use keyswitch_dict::filter::DEFAULT_FALSE_POSITIVE_RATE;
use keyswitch_dict::wordlist::{self, WordList};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (fp_rate, args) = keyswitch_cli::parse_option(&args, "fp-rate", "--fp-rate");
    let (language, args) = keyswitch_cli::parse_option(&args, "language", "-l");

    if keyswitch_cli::wants_help(&args) || args.len() < 2 {
        println!("keyswitch-compile: Build a binary dictionary from one or more word lists.");
        println!();
        println!("Usage: keyswitch-compile [OPTIONS] INPUT... OUTPUT");
        println!();
        println!("Options:");
        println!("  -l, --language CODE    Language of the word lists (default: from OUTPUT's name)");
        println!("  --fp-rate RATE         Target false-positive rate of the filter (default {DEFAULT_FALSE_POSITIVE_RATE})");
        println!("  -h, --help             Print this help");
        return;
    }

    keyswitch_cli::init_logging();

    let fp_rate = match fp_rate {
        Some(rate) => match rate.parse::<f64>() {
            Ok(r) if r > 0.0 && r < 1.0 => r,
            _ => keyswitch_cli::fatal(&format!("invalid false-positive rate: {rate}")),
        },
        None => DEFAULT_FALSE_POSITIVE_RATE,
    };
    let (output, inputs) = match args.split_last() {
        Some(split) => split,
        None => keyswitch_cli::fatal("missing OUTPUT"),
    };
    let language = match language {
        Some(code) => keyswitch_cli::parse_language(&code),
        None => keyswitch_cli::language_from_path(output).unwrap_or_else(|| {
            keyswitch_cli::fatal(&format!("cannot tell the language of {output}; pass --language"))
        }),
    };

    let started = Instant::now();
    let lists: Vec<WordList> = inputs
        .iter()
        .map(|input| {
            let text = std::fs::read_to_string(input)
                .unwrap_or_else(|e| keyswitch_cli::fatal(&format!("failed to read {input}: {e}")));
            let list = WordList::parse(&text, language);
            let s = list.stats();
            eprintln!(
                "{input}: {} lines, {} empty, {} phrases, {} invalid, {} too short, {} words",
                s.lines, s.empty, s.phrases, s.invalid, s.too_short, s.words
            );
            list
        })
        .collect();

    let (words, report) = wordlist::merge(&lists);
    if lists.len() > 1 {
        let unique = report
            .unique
            .iter()
            .zip(inputs)
            .map(|(n, input)| format!("{n} only in {input}"))
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("merged: {} words, {} in every list, {unique}", report.merged, report.common);
    }

    let index = DictionaryIndex::from_words(words, fp_rate);
    let bytes = index
        .to_bytes()
        .unwrap_or_else(|e| keyswitch_cli::fatal(&format!("failed to encode dictionary: {e}")));
    std::fs::write(output, &bytes)
        .unwrap_or_else(|e| keyswitch_cli::fatal(&format!("failed to write {output}: {e}")));

    let filter_bits = index.filter().map_or(0, |f| f.bit_count());
    eprintln!(
        "{output}: {language} dictionary, {} words, {} bytes, filter {filter_bits} bits ({} ms)",
        index.len(),
        bytes.len(),
        started.elapsed().as_millis()
    );
}
