//! Frame emitter: stamps, numbers and collects frames in execution order.

use std::mem;

use crate::clock::Clock;
use crate::frame::{Action, ActionFrame};

pub(crate) struct FrameEmitter {
    frames: Vec<ActionFrame>,
    clock: Clock,
    /// Line of the most recent frame emitted for a real node.
    last_line: u32,
    /// Highest line of any frame emitted since the innermost open block
    /// began, closing frames included.
    block_high: u32,
}

impl FrameEmitter {
    pub(crate) fn new(clock: Clock) -> Self {
        FrameEmitter {
            frames: Vec::new(),
            clock,
            last_line: 0,
            block_high: 0,
        }
    }

    /// The node's own line, or the last executed one when it has none.
    #[inline]
    pub(crate) fn resolve_line(&self, line: Option<u32>) -> u32 {
        line.unwrap_or(self.last_line)
    }

    /// Emit a frame for a node at `line`.
    pub(crate) fn emit(&mut self, line: Option<u32>, action: Action) {
        let stamp = self.clock.now();
        let line = self.resolve_line(line);
        self.emit_stamped(line, stamp, action);
    }

    /// Emit a frame with a timestamp taken earlier via [`Self::stamp`].
    pub(crate) fn emit_stamped(&mut self, line: u32, stamp: u64, action: Action) {
        self.last_line = line;
        self.push(ActionFrame::new(line, action, stamp));
    }

    /// Start a block that will be closed by a synthesized terminator.
    ///
    /// Returns the enclosing block's mark, to hand back to
    /// [`Self::close_block`].
    pub(crate) fn open_block(&mut self) -> u32 {
        mem::take(&mut self.block_high)
    }

    /// Emit the terminator one line past the highest line emitted inside
    /// the block, then fold that line into the enclosing block.
    ///
    /// Terminators do not move `last_line`: they have no source node.
    pub(crate) fn close_block(&mut self, outer: u32, action: Action) {
        let stamp = self.clock.now();
        let line = self.block_high.saturating_add(1);
        self.push(ActionFrame::new(line, action, stamp));
        self.block_high = outer.max(line);
    }

    #[inline]
    pub(crate) fn stamp(&mut self) -> u64 {
        self.clock.now()
    }

    /// Redirect emission into a fresh list; returns the list to restore.
    pub(crate) fn begin_nested(&mut self) -> Vec<ActionFrame> {
        mem::take(&mut self.frames)
    }

    /// Restore `outer` and return the frames collected since
    /// [`Self::begin_nested`].
    pub(crate) fn end_nested(&mut self, outer: Vec<ActionFrame>) -> Vec<ActionFrame> {
        mem::replace(&mut self.frames, outer)
    }

    pub(crate) fn finish(self) -> Vec<ActionFrame> {
        self.frames
    }

    fn push(&mut self, frame: ActionFrame) {
        self.block_high = self.block_high.max(frame.line);
        tracing::trace!(
            operation = frame.operation(),
            line = frame.line,
            timestamp = frame.timestamp,
            "frame"
        );
        self.frames.push(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_fall_back_to_last_executed() {
        let mut emitter = FrameEmitter::new(Clock::steps(0, 1));
        emitter.emit(Some(3), Action::Endif);
        emitter.emit(None, Action::Endif);
        let frames = emitter.finish();
        assert_eq!(frames[0].line, 3);
        assert_eq!(frames[1].line, 3);
        assert_eq!(frames[1].timestamp, 1);
    }

    #[test]
    fn closing_frames_do_not_move_last_line() {
        let mut emitter = FrameEmitter::new(Clock::steps(0, 1));
        let outer = emitter.open_block();
        emitter.emit(Some(4), Action::Endif);
        emitter.close_block(outer, Action::Endif);
        assert_eq!(emitter.resolve_line(None), 4);
        let frames = emitter.finish();
        assert_eq!(frames[1].line, 5);
    }

    #[test]
    fn closing_line_follows_highest_line_in_block() {
        let mut emitter = FrameEmitter::new(Clock::steps(0, 1));
        let outer = emitter.open_block();
        emitter.emit(Some(2), Action::Endif);

        let inner = emitter.open_block();
        emitter.emit(Some(3), Action::Endif);
        emitter.emit(Some(5), Action::Endif);
        // A loop's final check sits back on its header line.
        emitter.emit(Some(3), Action::Endif);
        emitter.close_block(inner, Action::Endif);

        emitter.close_block(outer, Action::Endif);
        let lines: Vec<u32> = emitter.finish().iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3, 5, 3, 6, 7]);
    }

    #[test]
    fn nested_frames_are_collected_separately() {
        let mut emitter = FrameEmitter::new(Clock::steps(0, 1));
        emitter.emit(Some(1), Action::Endif);
        let outer = emitter.begin_nested();
        emitter.emit(Some(2), Action::Endif);
        let nested = emitter.end_nested(outer);
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].line, 2);
        assert_eq!(emitter.finish().len(), 1);
    }
}
