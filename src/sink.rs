//! Picks the display sink once at startup.

use meetlight_core::display::{DisplaySink, NoopSink};
use tracing::warn;

/// The Blinkt! LED strip when compiled in and reachable, otherwise a no-op sink.
pub fn detect() -> Box<dyn DisplaySink> {
    #[cfg(feature = "blinkt")]
    {
        match blinkt_sink::BlinktSink::new() {
            Ok(sink) => return Box::new(sink),
            Err(e) => warn!("Blinkt! not available ({}), running without a display", e),
        }
    }

    #[cfg(not(feature = "blinkt"))]
    warn!("Built without LED support, running without a display");

    Box::new(NoopSink)
}

#[cfg(feature = "blinkt")]
mod blinkt_sink {
    use blinkt::Blinkt;
    use meetlight_core::display::DisplaySink;
    use meetlight_core::{CoreError, CoreResult};

    pub struct BlinktSink {
        blinkt: Blinkt,
    }

    impl BlinktSink {
        pub fn new() -> blinkt::Result<Self> {
            Ok(BlinktSink {
                blinkt: Blinkt::new()?,
            })
        }
    }

    impl DisplaySink for BlinktSink {
        fn set_all(&mut self, r: u8, g: u8, b: u8, brightness: f32) -> CoreResult<()> {
            self.blinkt.set_all_pixels(r, g, b);
            self.blinkt.set_all_pixels_brightness(brightness);
            Ok(())
        }

        fn show(&mut self) -> CoreResult<()> {
            self.blinkt
                .show()
                .map_err(|e| CoreError::Display(e.to_string()))
        }

        fn set_clear_on_exit(&mut self, clear: bool) {
            self.blinkt.set_clear_on_drop(clear);
        }

        fn name(&self) -> &'static str {
            "blinkt"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetlight_core::Status;
    use meetlight_core::display::DisplayAdapter;

    #[cfg(not(feature = "blinkt"))]
    #[test]
    fn test_detect_without_hardware_support_is_headless() {
        assert_eq!(detect().name(), "none");
    }

    #[test]
    fn test_detected_sink_accepts_every_status() {
        let mut adapter = DisplayAdapter::new(detect());
        for status in [Status::OutOfOffice, Status::Busy, Status::Free] {
            adapter.set_status(status, 0.2);
        }
    }
}
