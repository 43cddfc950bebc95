//! Pack JavaScript into a self-decoding bootstrap, or unpack one.

extern crate clap;
extern crate jspack;
extern crate log;
extern crate pretty_env_logger;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use jspack::{PackOptions, Packer, Strategy, UnpackOptions, Unpacker};
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

fn read_input(matches: &ArgMatches) -> io::Result<String> {
    match matches.value_of("input") {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(matches: &ArgMatches, text: &str) -> io::Result<()> {
    match matches.value_of("output") {
        Some(path) => fs::write(path, text),
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())?;
            out.write_all(b"\n")
        }
    }
}

fn io_args<'a, 'b>() -> [Arg<'a, 'b>; 2] {
    [
        Arg::with_name("input")
            .long("input")
            .short("i")
            .takes_value(true)
            .help("File to read. Defaults to stdin."),
        Arg::with_name("output")
            .long("output")
            .short("o")
            .takes_value(true)
            .help("File to write. Defaults to stdout."),
    ]
}

fn pack(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = PackOptions {
        cleanup: !matches.is_present("no-cleanup"),
    };
    let source = read_input(matches)?;
    let (packed, report) = Packer::new(options).pack_with_report(&source)?;
    write_output(matches, &packed)?;
    if !matches.is_present("quiet") {
        eprintln!("Packed successfully: {}", report);
    }
    Ok(())
}

fn unpack(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let strategy = match matches.value_of("strategy") {
        Some("descending") => Strategy::Descending,
        _ => Strategy::SinglePass,
    };
    let packed = read_input(matches)?;
    let source = Unpacker::new(UnpackOptions { strategy }).unpack(&packed)?;
    write_output(matches, &source)?;
    Ok(())
}

fn main() {
    pretty_env_logger::init();

    let matches = App::new("jspack")
        .about("Pack JavaScript with the Dean Edwards packer format, or unpack packed code.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("pack")
                .about("Pack JavaScript into an eval(function(p,a,c,k,e,d){...}) bootstrap.")
                .args(&io_args())
                .args(&[
                    Arg::with_name("no-cleanup")
                        .long("no-cleanup")
                        .help("Keep comments and whitespace."),
                    Arg::with_name("quiet")
                        .long("quiet")
                        .short("q")
                        .help("Do not print the size report."),
                ]),
        )
        .subcommand(
            SubCommand::with_name("unpack")
                .about("Recover the source of a packed bootstrap.")
                .args(&io_args())
                .arg(
                    Arg::with_name("strategy")
                        .long("strategy")
                        .takes_value(true)
                        .possible_values(&["single-pass", "descending"])
                        .help("How symbols are substituted back. Defaults to single-pass."),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("pack", Some(sub)) => pack(sub),
        ("unpack", Some(sub)) => unpack(sub),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
