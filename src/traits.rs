//! Declaration of traits reused across the code.

use std::fmt::Display;

/// Implementation of the LayoutDisplay trait.
/// It is used to display the field breakdown of a decoded record, shifted right by
/// `indent` spaces so that nested records line up under their parent.
pub trait LayoutDisplay: Display {
    fn display_layout(&self, indent: u8) -> String {
        let indent = " ".repeat(indent.into());
        self.to_string()
            .lines()
            .map(|line| {
                if line.is_empty() {
                    String::from("\n")
                } else {
                    format!("{indent}{line}\n")
                }
            })
            .collect()
    }
}
