//! Input collaborator boundary.
//!
//! The platform pushes [`InputEvent`]s between ticks; the first pipeline
//! stage drains them exactly once per tick.

use std::sync::mpsc;

use horde_core::input::{InputBuffer, InputEvent, InputFrame};

/// One-shot input buffer, drained once per tick.
pub trait InputSource {
    fn drain(&mut self) -> InputFrame;
}

/// Input source for headless runs: nothing is ever pressed.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn drain(&mut self) -> InputFrame {
        InputFrame::default()
    }
}

/// Events arrive over an `mpsc` channel and are folded into a buffer on drain.
///
/// A disconnected sender simply means no more input.
pub struct ChannelInput {
    rx: mpsc::Receiver<InputEvent>,
    buffer: InputBuffer,
}

impl ChannelInput {
    pub fn new(rx: mpsc::Receiver<InputEvent>) -> Self {
        Self {
            rx,
            buffer: InputBuffer::new(),
        }
    }

    /// A connected sender/source pair.
    pub fn channel() -> (mpsc::Sender<InputEvent>, ChannelInput) {
        let (tx, rx) = mpsc::channel();
        (tx, ChannelInput::new(rx))
    }
}

impl InputSource for ChannelInput {
    fn drain(&mut self) -> InputFrame {
        while let Ok(event) = self.rx.try_recv() {
            self.buffer.push(event);
        }
        self.buffer.drain()
    }
}
