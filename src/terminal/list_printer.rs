const INDENT: &str = "\t";

/// Prints a list of items, nested levels indented by tabs.
pub struct ListPrinter<W: LineWriter + Clone> {
    writer: W,
    nesting: usize,
}

impl<W: LineWriter + Clone> ListPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, nesting: 0 }
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        let indent = INDENT.repeat(self.nesting);
        self.writer.write_line(&format!("{}{}", indent, message));
    }

    pub fn indent(&self) -> Self {
        Self {
            writer: self.writer.clone(),
            nesting: self.nesting + 1,
        }
    }
}

impl ListPrinter<StdoutLineWriter> {
    pub fn new_stdout() -> Self {
        Self::new(StdoutLineWriter)
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        if let Err(err) = console::Term::stdout().write_line(line) {
            log::error!("Failed to write to stdout: {err}");
        }
    }
}

#[cfg(test)]
pub mod testutils {
    use std::{cell::RefCell, rc::Rc};

    use super::LineWriter;

    /// Keeps all written lines in memory
    #[derive(Clone, Default)]
    pub struct RecordingLineWriter {
        lines: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingLineWriter {
        pub fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }
    }

    impl LineWriter for RecordingLineWriter {
        fn write_line(&self, line: &str) {
            self.lines.borrow_mut().push(line.to_string());
        }
    }
}
