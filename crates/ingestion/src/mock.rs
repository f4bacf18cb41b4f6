//! Mock pose source
//!
//! Synthetic skeleton generator for detector-free environments. Frames are
//! deterministic functions of the frame index, so tests and demos get
//! reproducible trajectories.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use contracts::{
    DropoutConfig, Landmark, PoseCallback, PoseFrame, PoseSource, LANDMARK_COUNT,
};
use tracing::debug;

/// Mock pose source configuration
#[derive(Debug, Clone)]
pub struct MockSourceConfig {
    /// Source ID
    pub source_id: String,

    /// Frame rate (Hz)
    pub frequency_hz: f64,

    /// Frame width in pixels
    pub frame_width: u32,

    /// Frame height in pixels
    pub frame_height: u32,

    /// Stop after this many frames (None = until stopped)
    pub max_frames: Option<u64>,

    /// Periodic landmark dropout
    pub dropout: Option<DropoutConfig>,

    /// Pace frame production at `frequency_hz` wall-clock. Tests disable
    /// this to run the full sequence immediately.
    pub realtime: bool,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            source_id: "mock_pose".to_string(),
            frequency_hz: 30.0,
            frame_width: 640,
            frame_height: 480,
            max_frames: None,
            dropout: None,
            realtime: true,
        }
    }
}

/// Mock pose source
///
/// Produces a full 33-landmark skeleton whose arms and legs swing
/// sinusoidally. Timestamps are `frame_idx / frequency_hz` rounded to
/// 3 decimals, independent of wall-clock, so the alignment pass sees the
/// same grid every run.
pub struct MockPoseSource {
    config: MockSourceConfig,
    listening: Arc<AtomicBool>,
}

impl MockPoseSource {
    /// Create a new mock source
    pub fn new(config: MockSourceConfig) -> Self {
        Self {
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mock source producing a fixed number of frames as fast as possible
    pub fn burst(source_id: &str, frequency_hz: f64, max_frames: u64) -> Self {
        Self::new(MockSourceConfig {
            source_id: source_id.to_string(),
            frequency_hz,
            max_frames: Some(max_frames),
            realtime: false,
            ..Default::default()
        })
    }

    /// The synthetic frame for one frame index.
    pub fn frame_at(config: &MockSourceConfig, frame_idx: u64) -> PoseFrame {
        let timestamp = quantize_ms(frame_idx as f64 / config.frequency_hz);
        // Slow full-body swing, one cycle every 4 seconds
        let phase = timestamp * std::f64::consts::TAU / 4.0;

        let width = config.frame_width as f64;
        let height = config.frame_height as f64;

        let dropped: &[u32] = match &config.dropout {
            Some(d) if d.every_nth_frame > 0 && (frame_idx + 1) % d.every_nth_frame == 0 => {
                &d.landmark_ids
            }
            _ => &[],
        };

        let landmarks = (0..LANDMARK_COUNT)
            .filter(|id| !dropped.contains(id))
            .map(|id| {
                let (base_x, base_y) = base_position(id);
                let (amp_x, amp_y) = swing_amplitude(id);

                Landmark {
                    id,
                    x: (base_x + amp_x * phase.sin()) * width,
                    y: (base_y + amp_y * phase.cos()) * height,
                    z: -0.05 - 0.01 * (id as f64 / LANDMARK_COUNT as f64),
                    visibility: 0.99 - 0.1 * (base_y - 0.5).abs(),
                }
            });

        PoseFrame::from_landmarks(timestamp, landmarks)
    }
}

impl PoseSource for MockPoseSource {
    fn source_id(&self) -> &str {
        &self.config.source_id
    }

    fn listen(&self, callback: PoseCallback) {
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let config = self.config.clone();
        let listening = self.listening.clone();

        debug!(
            source_id = %config.source_id,
            frequency_hz = config.frequency_hz,
            max_frames = ?config.max_frames,
            "mock pose source started"
        );

        std::thread::spawn(move || {
            let interval = Duration::from_secs_f64(1.0 / config.frequency_hz);
            let mut frame_idx: u64 = 0;

            while listening.load(Ordering::Relaxed) {
                if let Some(max) = config.max_frames {
                    if frame_idx >= max {
                        break;
                    }
                }

                callback(MockPoseSource::frame_at(&config, frame_idx));
                frame_idx += 1;

                if config.realtime {
                    std::thread::sleep(interval);
                }
            }

            listening.store(false, Ordering::SeqCst);
            debug!(source_id = %config.source_id, frames = frame_idx, "mock pose source stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

#[inline]
fn quantize_ms(t: f64) -> f64 {
    (t * 1000.0).round() / 1000.0
}

/// Resting position of a landmark in normalized [0, 1] image coordinates.
fn base_position(id: u32) -> (f64, f64) {
    use contracts::landmark_ids::*;

    match id {
        // Face cluster
        0..=10 => (0.5 + 0.01 * (id as f64 - 5.0), 0.12),
        LEFT_SHOULDER => (0.42, 0.28),
        RIGHT_SHOULDER => (0.58, 0.28),
        LEFT_ELBOW => (0.38, 0.42),
        RIGHT_ELBOW => (0.62, 0.42),
        LEFT_WRIST => (0.35, 0.55),
        RIGHT_WRIST => (0.65, 0.55),
        // Hands track the wrists
        17 | 19 | 21 => (0.34, 0.58),
        18 | 20 | 22 => (0.66, 0.58),
        LEFT_HIP => (0.45, 0.55),
        RIGHT_HIP => (0.55, 0.55),
        LEFT_KNEE => (0.44, 0.72),
        RIGHT_KNEE => (0.56, 0.72),
        LEFT_ANKLE => (0.44, 0.88),
        RIGHT_ANKLE => (0.56, 0.88),
        // Feet track the ankles
        29 | 31 => (0.43, 0.92),
        _ => (0.57, 0.92),
    }
}

/// Swing amplitude per landmark (normalized units); torso stays planted.
fn swing_amplitude(id: u32) -> (f64, f64) {
    use contracts::landmark_ids::*;

    match id {
        LEFT_ELBOW | RIGHT_ELBOW => (0.03, 0.02),
        LEFT_WRIST | RIGHT_WRIST | 17..=22 => (0.08, 0.05),
        LEFT_KNEE | RIGHT_KNEE => (0.02, 0.01),
        LEFT_ANKLE | RIGHT_ANKLE | 29..=32 => (0.04, 0.02),
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_frames_are_deterministic() {
        let config = MockSourceConfig::default();
        let a = MockPoseSource::frame_at(&config, 42);
        let b = MockPoseSource::frame_at(&config, 42);

        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.len(), LANDMARK_COUNT as usize);
        for (id, lm) in &a.landmarks {
            assert_eq!(lm.x, b.get(*id).unwrap().x);
        }
    }

    #[test]
    fn test_timestamps_on_millisecond_grid() {
        let config = MockSourceConfig {
            frequency_hz: 30.0,
            ..Default::default()
        };

        for idx in 0..100 {
            let t = MockPoseSource::frame_at(&config, idx).timestamp;
            assert_eq!(t, quantize_ms(t));
        }
    }

    #[test]
    fn test_dropout_removes_landmarks() {
        let config = MockSourceConfig {
            dropout: Some(DropoutConfig {
                every_nth_frame: 2,
                landmark_ids: vec![15, 16],
            }),
            ..Default::default()
        };

        // Second frame (idx 1) drops the wrists
        let dropped = MockPoseSource::frame_at(&config, 1);
        assert!(dropped.get(15).is_none());
        assert!(dropped.get(16).is_none());
        assert_eq!(dropped.len(), LANDMARK_COUNT as usize - 2);

        let intact = MockPoseSource::frame_at(&config, 0);
        assert!(intact.get(15).is_some());
    }

    #[test]
    fn test_burst_source_stops_at_max_frames() {
        let source = MockPoseSource::burst("burst", 30.0, 10);
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = received.clone();
        source.listen(Arc::new(move |frame| {
            sink.lock().unwrap().push(frame.timestamp);
        }));

        // Burst mode finishes quickly; poll until the worker exits
        for _ in 0..100 {
            if !source.is_listening() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        let timestamps = received.lock().unwrap();
        assert_eq!(timestamps.len(), 10);
        assert_eq!(timestamps[0], 0.0);
        assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
    }
}
