//! Frame source backed by an FFmpeg raw-video pipe.
//!
//! FFmpeg decodes the file and writes packed `rgb24` frames to stdout. A
//! reader thread slices the byte stream into frames and hands them to the
//! render loop through a small bounded channel.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use super::probe::{probe, VideoInfo};
use super::source::{spawn_error, DecodeError, FrameSource};
use super::{Frame, FrameFormat};

/// Frames buffered between the reader thread and the render loop.
const CHANNEL_CAPACITY: usize = 4;

type FrameResult = Result<Vec<u8>, DecodeError>;

/// Decoded frames from a video file, in presentation order.
pub struct FfmpegSource {
    child: Option<Child>,
    receiver: Option<Receiver<FrameResult>>,
    reader_thread: Option<JoinHandle<()>>,
    stderr_thread: Option<JoinHandle<Vec<String>>>,
    info: VideoInfo,
    width: u32,
    height: u32,
    finished: bool,
}

impl FfmpegSource {
    /// Probe `path` and start decoding it.
    ///
    /// Frames wider than `max_width` are scaled down by FFmpeg (area
    /// filter, aspect preserved) to keep pipe bandwidth proportional to
    /// what a terminal can show. The rasterizer resamples again to the
    /// exact grid size.
    pub fn open(path: &Path, max_width: u32) -> Result<Self, DecodeError> {
        let info = probe(path)?;
        let (width, height) = decode_size(info.width, info.height, max_width);
        log::info!(
            "Decoding {} ({}x{} @ {:.3} fps) as {}x{} rgb24",
            path.display(),
            info.width,
            info.height,
            info.fps,
            width,
            height
        );

        let mut child = Command::new("ffmpeg")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-nostdin")
            .arg("-i")
            .arg(path)
            .arg("-an")
            .arg("-f")
            .arg("rawvideo")
            .arg("-pix_fmt")
            .arg("rgb24")
            .arg("-s")
            .arg(format!("{}x{}", width, height))
            .arg("-sws_flags")
            .arg("area")
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error("ffmpeg", e))?;

        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let reader = BufReader::new(stderr);
                let mut lines = Vec::new();
                for line in reader.lines() {
                    match line {
                        Ok(l) => {
                            log::debug!("[ffmpeg] {}", l);
                            lines.push(l);
                        }
                        Err(_) => break,
                    }
                }
                lines
            })
        });

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DecodeError::Io(std::io::Error::new(
                    ErrorKind::BrokenPipe,
                    "failed to capture ffmpeg stdout",
                )));
            }
        };

        let frame_size = Frame::byte_len(width, height, FrameFormat::Rgb);
        let (sender, receiver) = mpsc::sync_channel(CHANNEL_CAPACITY);
        let reader_thread = thread::Builder::new()
            .name("termtube-decoder".to_owned())
            .spawn(move || read_frames(stdout, frame_size, sender));

        let reader_thread = match reader_thread {
            Ok(handle) => handle,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DecodeError::Io(e));
            }
        };

        Ok(Self {
            child: Some(child),
            receiver: Some(receiver),
            reader_thread: Some(reader_thread),
            stderr_thread,
            info,
            width,
            height,
            finished: false,
        })
    }

    /// Metadata of the source file as reported by ffprobe.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Size of the frames this source yields.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reap the decoder after its output ended and report how it exited.
    fn finish(&mut self) -> Result<Option<Frame>, DecodeError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };
        let status = child.wait()?;
        if status.success() {
            return Ok(None);
        }

        let stderr = self
            .stderr_thread
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
            .join("\n");
        Err(DecodeError::ProcessFailed {
            exit_code: status.code(),
            stderr,
        })
    }
}

impl FrameSource for FfmpegSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        if self.finished {
            return Ok(None);
        }
        let Some(receiver) = self.receiver.as_ref() else {
            return Ok(None);
        };

        match receiver.recv() {
            Ok(Ok(data)) => Ok(Some(Frame::rgb(self.width, self.height, data))),
            Ok(Err(e)) => {
                self.finished = true;
                Err(e)
            }
            Err(_) => {
                // Reader thread hung up: the pipe reached a clean frame boundary
                self.finished = true;
                self.finish()
            }
        }
    }

    fn native_frame_rate(&self) -> f64 {
        self.info.fps
    }

    fn close(&mut self) {
        self.finished = true;
        if let Some(mut child) = self.child.take() {
            if matches!(child.try_wait(), Ok(None)) {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
        // Drop the receiver first so a reader blocked on a full channel wakes up
        self.receiver = None;
        if let Some(handle) = self.reader_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.stderr_thread.take() {
            let _ = handle.join();
        }
        log::debug!("Frame source closed");
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.close();
    }
}

/// Output size for decoding: native size, or scaled to `max_width` with
/// the aspect ratio preserved.
pub fn decode_size(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if max_width == 0 || width <= max_width {
        return (width, height);
    }
    let scaled_height = (height as f64 * max_width as f64 / width as f64).round() as u32;
    (max_width, scaled_height.max(1))
}

fn read_frames(mut stdout: ChildStdout, frame_size: usize, sender: SyncSender<FrameResult>) {
    loop {
        let mut buffer = vec![0u8; frame_size];
        let message = match read_full(&mut stdout, &mut buffer) {
            Ok(0) => break,
            Ok(n) if n == frame_size => Ok(buffer),
            Ok(n) => Err(DecodeError::TruncatedFrame {
                got: n,
                expected: frame_size,
            }),
            Err(e) => Err(DecodeError::Io(e)),
        };

        let stop = message.is_err();
        if sender.send(message).is_err() || stop {
            break;
        }
    }
}

/// Fill `buf` from `reader`, returning how many bytes were read before EOF.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_size_keeps_small_frames() {
        assert_eq!(decode_size(320, 240, 640), (320, 240));
        assert_eq!(decode_size(1920, 1080, 0), (1920, 1080));
    }

    #[test]
    fn test_decode_size_scales_wide_frames() {
        assert_eq!(decode_size(1920, 1080, 320), (320, 180));
        assert_eq!(decode_size(1000, 1, 10), (10, 1));
    }

    #[test]
    fn test_read_full_exact_and_short() {
        let mut cursor = Cursor::new(vec![1u8; 10]);
        let mut buf = [0u8; 4];
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 4);
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 4);
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 2);
        assert_eq!(read_full(&mut cursor, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_file_fails() {
        // Works whether or not ffprobe is installed: either it is missing or the probe fails
        let result = FfmpegSource::open(Path::new("/nonexistent/termtube-test.mp4"), 320);
        assert!(result.is_err());
    }
}
