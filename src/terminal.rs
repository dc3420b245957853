mod list_printer;

pub use list_printer::{LineWriter, ListPrinter, StdoutLineWriter};

#[cfg(test)]
pub use list_printer::testutils;
