//! Diagnostic trace channel for decoders
//!
//! Decoders report what they read (offset, record kind, decoded value)
//! through a [`TraceSink`] carried in the [`DecodeContext`]. Sinks only
//! observe; they never change what gets decoded.

use std::fmt;

/// One decoded item as seen by a trace sink
#[derive(Clone, Copy)]
pub struct TraceEvent<'a> {
    /// Offset where the item started
    pub offset: usize,
    /// Record or field kind, e.g. `"pattern"` or `"number_of_channels"`
    pub record: &'a str,
    /// Decoded value
    pub value: &'a dyn fmt::Debug,
}

impl fmt::Debug for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:08x}] {} = {:?}", self.offset, self.record, self.value)
    }
}

/// Receiver of decoder trace events
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent<'_>);
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    #[inline]
    fn record(&mut self, _event: &TraceEvent<'_>) {}
}

/// Sink that forwards events to `tracing` at TRACE level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&mut self, event: &TraceEvent<'_>) {
        tracing::trace!(
            offset = event.offset,
            record = event.record,
            value = ?event.value,
            "decoded"
        );
    }
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceEvent<'_>),
{
    fn record(&mut self, event: &TraceEvent<'_>) {
        self(event)
    }
}

/// Mutable per-call decoding state shared by all decode steps
pub struct DecodeContext<'s> {
    sink: &'s mut dyn TraceSink,
}

impl<'s> DecodeContext<'s> {
    pub fn new(sink: &'s mut dyn TraceSink) -> Self {
        Self { sink }
    }

    /// Report a decoded item
    #[inline]
    pub fn trace(&mut self, offset: usize, record: &str, value: &dyn fmt::Debug) {
        self.sink.record(&TraceEvent {
            offset,
            record,
            value,
        });
    }
}

impl fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeContext").finish_non_exhaustive()
    }
}
