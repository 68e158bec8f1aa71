// Command-line interface for the lesson toolchain
//
// This binary extracts structured lesson records from marked-up course
// documents and emits them for the ingestion pipeline.
//
// The heavy lifting lives in the lesson-extract crate; this layer reads
// files, wires configuration into the extractor, and serializes the results.
// Two output targets are supported: a JSON report for inspection and a seed
// SQL script for the lessons table.
//
// Usage:
//  lessons extract <input> --track <pre-med|med> [--lessons N]
//                  [--format json|sql] [--output FILE]
//  lessons seed [--output FILE]   - process every configured track document
//
// Global flags: --config <PATH> layers a TOML file over the embedded
// defaults; --seed <N> fixes the synthesis rng for reproducible output;
// --lenient switches the splitter to bullet-only extraction.

mod emit;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use lesson_config::{LessonsConfig, Loader};
use lesson_extract::{LessonExtractor, LessonRecord, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

fn build_cli() -> Command {
    Command::new("lessons")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract structured lesson records from marked-up course documents")
        .long_about(
            "lessons is a command-line tool for turning rich-text course\n\
            documents into structured lesson records with synthesized\n\
            practice questions.\n\n\
            Commands:\n  \
            - extract: process one document for one track\n  \
            - seed:    process every configured track document into one\n             \
            seed SQL script\n\n\
            Examples:\n  \
            lessons extract pre-med.rtf --track pre-med       # JSON to stdout\n  \
            lessons extract med.rtf --track med --format sql  # SQL to stdout\n  \
            lessons seed -o seed.sql                          # all tracks",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a lessons.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed the synthesis rng for reproducible output")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Use lenient section boundaries (bullet extraction only)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract lessons from one track document")
                .arg(
                    Arg::new("input")
                        .help("Input document path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("track")
                        .long("track")
                        .help("Course track the document belongs to")
                        .required(true)
                        .value_parser(clap::builder::PossibleValuesParser::new(["pre-med", "med"])),
                )
                .arg(
                    Arg::new("lessons")
                        .long("lessons")
                        .value_name("N")
                        .help("Number of lesson ordinals to scan (defaults to the track's configured count)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format")
                        .default_value("json")
                        .value_parser(clap::builder::PossibleValuesParser::new(["json", "sql"])),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Process every configured track document into one seed SQL script")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    pretty_env_logger::init();

    let matches = build_cli().get_matches();
    let config = load_cli_config(&matches);

    match matches.subcommand() {
        Some(("extract", sub_matches)) => handle_extract_command(sub_matches, &config),
        Some(("seed", sub_matches)) => handle_seed_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Layer the embedded defaults, an optional user file, and CLI overrides.
fn load_cli_config(matches: &ArgMatches) -> LessonsConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("lenient") {
        loader = loader
            .set_override("pipeline.lenient", true)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {e}");
                std::process::exit(1);
            });
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        loader = loader
            .set_override("pipeline.seed", *seed)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {e}");
                std::process::exit(1);
            });
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_extraction(
    path: &str,
    track: Track,
    count: usize,
    config: &LessonsConfig,
    rng: &mut StdRng,
) -> Vec<LessonRecord> {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });
    let extractor = LessonExtractor::new((&config.pipeline).into());
    extractor
        .extract_all(&source, track, count, rng)
        .unwrap_or_else(|e| {
            eprintln!("Extraction error in '{path}': {e}");
            std::process::exit(1);
        })
}

fn write_output(output: Option<&String>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the extract command
fn handle_extract_command(sub_matches: &ArgMatches, config: &LessonsConfig) {
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");
    let track = match sub_matches
        .get_one::<String>("track")
        .expect("track is required")
        .as_str()
    {
        "med" => Track::Med,
        _ => Track::PreMed,
    };
    let count = sub_matches
        .get_one::<usize>("lessons")
        .copied()
        .unwrap_or(config.tracks.for_track(track).lessons);

    let mut rng = make_rng(config.pipeline.seed);
    let records = run_extraction(input, track, count, config, &mut rng);

    let format = sub_matches
        .get_one::<String>("format")
        .expect("format has a default");
    let text = match format.as_str() {
        "sql" => emit::seed_sql(&records),
        _ => emit::json_report(&records),
    };
    write_output(sub_matches.get_one::<String>("output"), &text);
}

/// Handle the seed command: all configured tracks, one combined script.
fn handle_seed_command(sub_matches: &ArgMatches, config: &LessonsConfig) {
    let mut rng = make_rng(config.pipeline.seed);
    let mut records = Vec::new();
    for (track, track_config) in config.tracks.all() {
        records.extend(run_extraction(
            &track_config.file,
            track,
            track_config.lessons,
            config,
            &mut rng,
        ));
    }
    write_output(
        sub_matches.get_one::<String>("output"),
        &emit::seed_sql(&records),
    );
}
