//! Command framing for generator output
//!
//! Generators print device commands separated by ETX (0x03) or newlines.
//! Each segment is trimmed; blank segments are dropped. A command can
//! therefore never carry a newline, an ETX, or surrounding whitespace.

/// End-of-text byte used by the plotter as a command terminator
pub const ETX: u8 = 0x03;

/// Lazy splitter turning a byte stream into trimmed command strings
pub struct CommandFramer<I> {
    bytes: I,
    buffer: String,
    done: bool,
}

impl<I> CommandFramer<I>
where
    I: Iterator<Item = u8>,
{
    pub fn new(bytes: impl IntoIterator<IntoIter = I, Item = u8>) -> Self {
        Self {
            bytes: bytes.into_iter(),
            buffer: String::new(),
            done: false,
        }
    }

    /// Takes the buffered segment if it holds anything besides whitespace
    fn take_segment(&mut self) -> Option<String> {
        let command = self.buffer.trim();
        let command = (!command.is_empty()).then(|| command.to_string());
        self.buffer.clear();
        command
    }
}

impl<I> Iterator for CommandFramer<I>
where
    I: Iterator<Item = u8>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        while let Some(byte) = self.bytes.next() {
            if byte == ETX || byte == b'\n' {
                if let Some(command) = self.take_segment() {
                    return Some(command);
                }
            } else {
                // Bytes map one-to-one onto chars (Latin-1)
                self.buffer.push(char::from(byte));
            }
        }

        self.done = true;
        self.take_segment()
    }
}

/// Frames a complete output buffer
pub fn frame_commands(output: &[u8]) -> CommandFramer<std::iter::Copied<std::slice::Iter<'_, u8>>> {
    CommandFramer::new(output.iter().copied())
}
