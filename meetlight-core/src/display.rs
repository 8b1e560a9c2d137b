//! Display sinks and the adapter mapping a status onto them.
//!
//! A sink is whatever receives colour and brightness: an LED strip, or
//! nothing at all when running headless.

use tracing::{debug, info, warn};

use crate::error::CoreResult;
use crate::status::{Colour, Status};

/// Default brightness of the indicator
pub const DEFAULT_BRIGHTNESS: f32 = 0.2;

/// Output device for the status colour.
pub trait DisplaySink {
    /// Set every pixel to the same colour and brightness (0.0 - 1.0).
    fn set_all(&mut self, r: u8, g: u8, b: u8, brightness: f32) -> CoreResult<()>;

    /// Flush pending pixel data to the device.
    fn show(&mut self) -> CoreResult<()>;

    /// Whether the device should be cleared when the sink is dropped.
    fn set_clear_on_exit(&mut self, _clear: bool) {}

    fn name(&self) -> &'static str;
}

/// Sink used when no hardware is attached.
#[derive(Debug, Default)]
pub struct NoopSink;

impl DisplaySink for NoopSink {
    fn set_all(&mut self, r: u8, g: u8, b: u8, brightness: f32) -> CoreResult<()> {
        debug!(r, g, b, brightness, "No display attached, ignoring colour");
        Ok(())
    }

    fn show(&mut self) -> CoreResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Maps statuses to colours and pushes them to a sink.
pub struct DisplayAdapter {
    sink: Box<dyn DisplaySink>,
}

impl DisplayAdapter {
    pub fn new(mut sink: Box<dyn DisplaySink>) -> Self {
        sink.set_clear_on_exit(true);
        DisplayAdapter { sink }
    }

    pub fn headless() -> Self {
        Self::new(Box::new(NoopSink))
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Show `status` on the sink.
    ///
    /// Sink failures are logged and swallowed: losing the indicator must not
    /// stop status evaluation.
    pub fn set_status(&mut self, status: Status, brightness: f32) {
        let colour = status.colour();
        let brightness = clamp_brightness(brightness);

        if let Err(e) = self.push(colour, brightness) {
            let sink = self.sink.name();
            warn!(sink, "Failed to update display: {}", e);
        }
    }

    fn push(&mut self, colour: Colour, brightness: f32) -> CoreResult<()> {
        let sink = self.sink.name();
        info!(sink, "Setting display to: {}", colour);
        self.sink.set_all(colour.r, colour.g, colour.b, brightness)?;
        self.sink.show()
    }
}

fn clamp_brightness(brightness: f32) -> f32 {
    if brightness.is_nan() {
        DEFAULT_BRIGHTNESS
    } else {
        brightness.clamp(0.0, 1.0)
    }
}
