//! This is the main entry point for the boot record translator.
//!
//! Run as `main mbr` or `main fat`, the program reads a single record from the
//! terminal, prints its field breakdown and exits with a status telling whether the
//! record could be decoded. Run without a mode, it provides an interactive shell
//! where records are decoded one command at a time.
//!
//! Every `-v` flag raises the log verbosity by one level.

use boot_record_translator::PTEntry;
use boot_record_translator::commands::Command;
use boot_record_translator::constants::{EXIT_DECODE_ERROR, FAT_MIN_LEN};
use boot_record_translator::filesystem::fat::{prepare_record, write_staged};
use boot_record_translator::filesystem::fat_error::FATError;
use boot_record_translator::traits::LayoutDisplay;
use log::error;
use std::io::{self, Write};
use std::process::ExitCode;

/// Represents the runtime state of the interactive shell.
struct RunState {
    /// Pad short FAT records without asking
    auto_pad: bool,
    /// Indentation of the printed reports
    indent: u8,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().filter(|arg| arg.as_str() == "-v").count();

    if let Err(err) = stderrlog::new()
        .module(module_path!())
        .module("boot_record_translator")
        .verbosity(1 + verbose)
        .init()
    {
        eprintln!("Failed to initialize logging: {err}");
    }

    let mut run_state = RunState {
        auto_pad: false,
        indent: 0,
    };

    match args.iter().find(|arg| !arg.starts_with('-')).map(String::as_str) {
        None => {
            run_state.indent = 2;
            shell(&mut run_state);
            ExitCode::SUCCESS
        }
        Some("mbr") => translate_mbr(&run_state),
        Some("fat") => translate_fat(&run_state),
        Some(other) => {
            error!("Unknown mode: {other:?}. Expected 'mbr' or 'fat'.");
            ExitCode::from(EXIT_DECODE_ERROR)
        }
    }
}

/// Prints `msg` and reads one line from the terminal.
///
/// Returns `None` on end of input.
fn prompt(msg: &str) -> io::Result<Option<String>> {
    print!("{msg}");
    io::stdout().flush()?;

    let mut s = String::new();
    match io::stdin().read_line(&mut s)? {
        0 => Ok(None),
        _ => Ok(Some(s)),
    }
}

/// Asks the operator whether a short FAT record should be zero-padded.
fn confirm_padding(len: usize) -> bool {
    println!(
        "The input data is {len} bytes long, less than {FAT_MIN_LEN} bytes, \
         which is the minimal size of a FAT boot record"
    );

    match prompt("Would you like to analyze this incomplete record? [y/N]: ") {
        Ok(Some(answer)) => answer.trim().eq_ignore_ascii_case("y"),
        Ok(None) => false,
        Err(err) => {
            error!("Failed to read answer: {err}");
            false
        }
    }
}

/// Decodes a FAT boot record and prints it, asking before padding a short record.
///
/// The common Bpb is printed even when the rest of the record cannot be decoded.
fn decode_fat(input: &str, run_state: &RunState) -> Result<(), FATError> {
    let (record, padded) = match prepare_record(input, run_state.auto_pad) {
        Err(FATError::InsufficientLength(len)) if confirm_padding(len) => {
            prepare_record(input, true)?
        }
        other => other?,
    };

    write_staged(&mut io::stdout(), &record, padded, run_state.indent)?;
    Ok(())
}

fn translate_mbr(run_state: &RunState) -> ExitCode {
    let input = match prompt("MBR Partition Record: ") {
        Ok(Some(input)) => input,
        Ok(None) => {
            error!("No record given");
            return ExitCode::from(EXIT_DECODE_ERROR);
        }
        Err(err) => {
            error!("Failed to read record: {err}");
            return ExitCode::from(EXIT_DECODE_ERROR);
        }
    };

    match PTEntry::from_hex(&input) {
        Ok(entry) => {
            print!("{}", entry.display_layout(run_state.indent));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_status())
        }
    }
}

fn translate_fat(run_state: &RunState) -> ExitCode {
    let input = match prompt("FAT Partition Record: ") {
        Ok(Some(input)) => input,
        Ok(None) => {
            error!("No record given");
            return ExitCode::from(EXIT_DECODE_ERROR);
        }
        Err(err) => {
            error!("Failed to read record: {err}");
            return ExitCode::from(EXIT_DECODE_ERROR);
        }
    };

    match decode_fat(&input, run_state) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            if let FATError::InsufficientLength(_) = err {
                println!("Exiting");
            }
            ExitCode::from(err.exit_status())
        }
    }
}

fn shell(run_state: &mut RunState) {
    loop {
        let s = match prompt("> ") {
            Ok(Some(s)) => s,
            Ok(None) => break,
            Err(err) => {
                error!("Failed to read command: {err}");
                break;
            }
        };

        match Command::from_string(&s) {
            Command::Quit => break,
            Command::Mbr(hex) => match PTEntry::from_hex(&hex) {
                Ok(entry) => print!("{}", entry.display_layout(run_state.indent)),
                Err(err) => error!("{err}"),
            },
            Command::Fat(hex) => {
                if let Err(err) = decode_fat(&hex, run_state) {
                    error!("{err}");
                }
            }
            Command::Pad => {
                run_state.auto_pad = !run_state.auto_pad;
                println!(
                    "Automatic zero-padding of short FAT records {}",
                    if run_state.auto_pad { "enabled" } else { "disabled" }
                );
            }
            Command::Unknown(s) => error!("Unknown command: {s:?}"),
            Command::Invalid(s) => error!("{s}"),
            Command::Empty => {}
        }
    }
}
