//! This module defines the `Command` enum and its associated methods for parsing
//! and handling user commands in the boot record translator shell.
//!
//! The `Command` enum represents the commands the user can input, such as
//! decoding a record, toggling zero-padding, quitting the program, or handling
//! invalid or unknown commands.

/// Represents a user command in the boot record translator shell.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Command to quit the program.
    Quit,
    /// Decode an MBR partition table entry, encapsulating the hex record.
    Mbr(String),
    /// Decode a FAT boot record, encapsulating the hex record.
    Fat(String),
    /// Toggle the automatic zero-padding of short FAT records.
    Pad,
    /// Command for an unknown input, encapsulating the raw input as a `String`.
    Unknown(String),
    /// Command for invalid input, encapsulating an error message as a `String`.
    Invalid(String),
    /// Command for an empty input.
    Empty,
}

impl Command {
    /// Parses a string into a `Command` instance.
    ///
    /// # Parameters
    /// - `s`: A string slice representing the user input.
    ///
    /// # Returns
    /// - `Command::Quit` if the input is "quit".
    /// - `Command::Mbr` with the rest of the line if the input starts with "mbr".
    /// - `Command::Fat` with the rest of the line if the input starts with "fat".
    /// - `Command::Pad` if the input is "pad".
    /// - `Command::Unknown` if the input does not match any known command.
    /// - `Command::Invalid` if "mbr" or "fat" is given without a record.
    /// - `Command::Empty` if the input is empty or contains only whitespace.
    pub fn from_string(s: &str) -> Self {
        let s = s.trim();
        let (name, args) = match s.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (s, ""),
        };

        match name {
            "quit" => Command::Quit,
            "mbr" | "fat" if args.is_empty() => Command::Invalid(format!(
                "Missing arg: '{name}' expects the record as hex digits."
            )),
            "mbr" => Command::Mbr(args.to_string()),
            "fat" => Command::Fat(args.to_string()),
            "pad" => Command::Pad,
            "" => Command::Empty,
            other => Command::Unknown(other.to_string()),
        }
    }
}
