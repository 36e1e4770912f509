use contagion_core::{Color, DrawSurface};
use log::{debug, warn};
use serde::Serialize;
use spin_sleep::SpinSleeper;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

// --- Error Type ---
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary serialization failed: {0}")]
    Binary(#[from] bincode::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// --- Frames ---

/// One primitive issued through the [`DrawSurface`] during a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Ellipse { x: f32, y: f32, width: f32, height: f32, color: Color },
    Rectangle { x: f32, y: f32, width: f32, height: f32, color: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Text {
        x: f32,
        y: f32,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<u32>,
    },
}

/// Everything drawn between two presents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub index: u64,
    pub frame_rate: u32,
    pub commands: Vec<DrawCommand>,
}

// --- Traits ---
/// Turns a frame into one line of text for a [`Sender`].
pub trait Serializer {
    fn serialize(&self, frame: &Frame) -> Result<String, TransportError>;
}

/// Sends serialized data to a destination.
pub trait Sender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

/// Frames as JSON objects.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, frame: &Frame) -> Result<String, TransportError> {
        Ok(serde_json::to_string(frame)?)
    }
}

/// Frames as bincode, base64 encoded so each one still fits on a line.
pub struct BinarySerializer;

impl Serializer for BinarySerializer {
    fn serialize(&self, frame: &Frame) -> Result<String, TransportError> {
        let bytes = bincode::serialize(frame)?;
        Ok(base64::encode(bytes))
    }
}

/// Sends data to standard output, one frame per line.
pub struct StdioSender {
    stdout: io::Stdout,
}

impl StdioSender {
    pub fn new() -> Self {
        StdioSender { stdout: io::stdout() }
    }
}

impl Sender for StdioSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut out = self.stdout.lock();
        out.write_all(data)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl Default for StdioSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends frames to a file, one per line.
pub struct FileSender {
    writer: BufWriter<File>,
}

impl FileSender {
    pub fn create(path: &Path) -> Result<Self, TransportError> {
        let file = File::create(path)?;
        Ok(FileSender { writer: BufWriter::new(file) })
    }
}

impl Sender for FileSender {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(data)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Discards frames; headless runs.
#[derive(Debug, Default)]
pub struct NullSender {
    sent: u64,
}

impl NullSender {
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl Sender for NullSender {
    fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        self.sent += 1;
        Ok(())
    }
}

// --- Surface ---

/// A [`DrawSurface`] that buffers draw calls and ships each finished frame
/// through a serializer and sender.
///
/// The surface counts as destroyed once a send fails or once the shared
/// close flag is raised (the runner raises it from its Ctrl+C handler).
pub struct StreamSurface {
    serializer: Box<dyn Serializer>,
    sender: Box<dyn Sender>,
    commands: Vec<DrawCommand>,
    frames_sent: u64,
    failed: bool,
    closed: Arc<AtomicBool>,
    pacing: bool,
    sleeper: SpinSleeper,
    last_present: Option<Instant>,
}

impl StreamSurface {
    pub fn new(serializer: Box<dyn Serializer>, sender: Box<dyn Sender>) -> Self {
        StreamSurface {
            serializer,
            sender,
            commands: Vec::new(),
            frames_sent: 0,
            failed: false,
            closed: Arc::new(AtomicBool::new(false)),
            pacing: true,
            sleeper: SpinSleeper::default(),
            last_present: None,
        }
    }

    /// Present frames as fast as they are produced.
    pub fn without_pacing(mut self) -> Self {
        self.pacing = false;
        self
    }

    /// Flag that destroys the surface when set, from any thread.
    pub fn close_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    fn ship(&mut self, frame_rate: u32) -> Result<(), TransportError> {
        let frame = Frame {
            index: self.frames_sent,
            frame_rate,
            commands: std::mem::take(&mut self.commands),
        };
        let line = self.serializer.serialize(&frame)?;
        self.sender.send(line.as_bytes())?;
        self.frames_sent += 1;
        Ok(())
    }

    fn pace(&mut self, frame_rate: u32) {
        if !self.pacing || frame_rate == 0 {
            return;
        }
        let budget = Duration::from_secs_f64(1.0 / frame_rate as f64);
        if let Some(last) = self.last_present {
            let elapsed = last.elapsed();
            if elapsed < budget {
                self.sleeper.sleep(budget - elapsed);
            } else if frame_rate > 10 {
                debug!("Frame time exceeded budget: {:?} > {:?}", elapsed, budget);
            }
        }
        self.last_present = Some(Instant::now());
    }
}

impl DrawSurface for StreamSurface {
    fn ellipse(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Ellipse { x, y, width, height, color });
    }

    fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rectangle { x, y, width, height, color });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: Option<Color>, size: Option<u32>) {
        self.commands.push(DrawCommand::Text { x, y, text: text.to_string(), color, size });
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn present_frame(&mut self, target_frame_rate: u32) {
        if self.is_destroyed() {
            self.commands.clear();
            return;
        }
        if let Err(e) = self.ship(target_frame_rate) {
            warn!("Dropping output surface after failed send: {}", e);
            self.failed = true;
            return;
        }
        self.pace(target_frame_rate);
    }

    fn is_destroyed(&self) -> bool {
        self.failed || self.closed.load(Ordering::SeqCst)
    }
}
