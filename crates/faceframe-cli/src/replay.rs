//! JSON lines replay loop.
//!
//! Each non-blank input line is one [`ObservationTick`]. Each tick produces
//! one output line. When a capture is requested the photo crop is computed
//! against that tick's frame size and reported on its own line, after which
//! the tracker is restarted so the replay can continue.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use faceframe_models::{Containment, ObservationTick, Rect, TrackingConfig};
use faceframe_tracking::{CaptureCrop, ContainmentObserver, FaceTracker, TickOutput};
use serde::Serialize;
use tracing::{info, warn};

/// Options for a replay run.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Tracker configuration
    pub config: TrackingConfig,
    /// Write JSON lines instead of a readable summary
    pub json: bool,
}

/// Counts gathered over a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub ticks: usize,
    /// Every change reported to containment observers, including the
    /// reset to `none` when a capture ends the session
    pub containment_changes: usize,
    pub captures: usize,
}

/// Counts containment changes as observers see them.
#[derive(Debug, Clone, Default)]
struct ChangeCounter(Arc<AtomicUsize>);

impl ChangeCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl ContainmentObserver for ChangeCounter {
    fn containment_did_change(&mut self, _containment: Containment) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReplayEvent<'a> {
    Tick(&'a TickOutput),
    Capture(&'a CaptureCrop),
}

/// Replay every tick from `reader`, writing results to `writer`.
///
/// Blank lines are skipped. A malformed line aborts the replay with an
/// error naming its line number.
pub fn run<R: BufRead, W: Write>(reader: R, mut writer: W, options: &ReplayOptions) -> Result<ReplaySummary> {
    let mut tracker = FaceTracker::new(options.config.clone()).context("Invalid tracking configuration")?;
    let changes = ChangeCounter::default();
    tracker.add_observer(Box::new(changes.clone()));
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;
        if line.trim().is_empty() {
            continue;
        }

        let tick: ObservationTick = serde_json::from_str(&line)
            .with_context(|| format!("Malformed observation on line {}", line_number))?;

        let output = tracker.process_tick(&tick);
        summary.ticks += 1;
        write_event(&mut writer, ReplayEvent::Tick(&output), options.json)?;

        if output.capture_requested {
            match tracker.finish_capture(tick.capture_size) {
                Ok(crop) => {
                    summary.captures += 1;
                    write_event(&mut writer, ReplayEvent::Capture(&crop), options.json)?;
                }
                Err(e) => {
                    warn!("Capture on line {} failed: {}", line_number, e);
                    tracker.cancel_capture();
                }
            }
            tracker.start();
        }
    }

    writer.flush()?;
    summary.containment_changes = changes.count();
    info!(
        ticks = summary.ticks,
        containment_changes = summary.containment_changes,
        captures = summary.captures,
        "Replay finished"
    );
    Ok(summary)
}

fn write_event<W: Write>(writer: &mut W, event: ReplayEvent<'_>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *writer, &event)?;
        writeln!(writer)?;
        return Ok(());
    }

    match event {
        ReplayEvent::Tick(out) => {
            write!(
                writer,
                "t={:.3} state={} containment={}",
                out.timestamp,
                out.state.as_str(),
                out.containment
            )?;
            if let Some(crop) = &out.crop_rect {
                write!(writer, " crop={}", format_rect(crop))?;
            }
            if out.capture_requested {
                write!(writer, " capture_requested")?;
            }
            writeln!(writer)?;
        }
        ReplayEvent::Capture(crop) => {
            writeln!(
                writer,
                "capture pixels={} source={}{}",
                format_rect(&crop.pixels_top_left()),
                if crop.used_face_crop { "face" } else { "viewport" },
                if crop.mirrored { " mirrored" } else { "" }
            )?;
        }
    }
    Ok(())
}

fn format_rect(rect: &Rect) -> String {
    format!(
        "({:.1}, {:.1}, {:.1}x{:.1})",
        rect.x, rect.y, rect.width, rect.height
    )
}
