//! Per-landmark displacement between two frames.

use contracts::{KeypointDiff, PoseFrame};

use crate::angle::round_to;

/// Displacements for every landmark present in BOTH frames, ascending id.
///
/// Landmarks missing from either side are skipped silently - partial
/// detections are routine, not errors. `dx`/`dy` are rounded to 2
/// decimals, `dz` to 4; the asymmetric precision matches the planar/depth
/// precision of the exported keypoints.
pub fn diff_frames(start: &PoseFrame, end: &PoseFrame) -> Vec<KeypointDiff> {
    start
        .landmarks
        .iter()
        .filter_map(|(&id, lm_start)| {
            let lm_end = end.get(id)?;
            Some(KeypointDiff {
                keypoint_id: id,
                from_timestamp: start.timestamp,
                to_timestamp: end.timestamp,
                start_pos: lm_start.position(),
                end_pos: lm_end.position(),
                diff: [
                    round_to(lm_end.x - lm_start.x, 2),
                    round_to(lm_end.y - lm_start.y, 2),
                    round_to(lm_end.z - lm_start.z, 4),
                ],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Landmark;

    fn lm(id: u32, x: f64, y: f64, z: f64) -> Landmark {
        Landmark {
            id,
            x,
            y,
            z,
            visibility: 1.0,
        }
    }

    #[test]
    fn test_basic_displacement() {
        let start = PoseFrame::from_landmarks(0.0, vec![lm(0, 10.0, 10.0, 0.0)]);
        let end = PoseFrame::from_landmarks(5.0, vec![lm(0, 13.0, 14.0, 0.0)]);

        let diffs = diff_frames(&start, &end);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].keypoint_id, 0);
        assert_eq!(diffs[0].from_timestamp, 0.0);
        assert_eq!(diffs[0].to_timestamp, 5.0);
        assert_eq!(diffs[0].diff, [3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_intersection_only() {
        let start = PoseFrame::from_landmarks(
            0.0,
            vec![lm(0, 0.0, 0.0, 0.0), lm(1, 1.0, 1.0, 0.0), lm(3, 3.0, 3.0, 0.0)],
        );
        let end = PoseFrame::from_landmarks(
            5.0,
            vec![lm(1, 2.0, 2.0, 0.0), lm(2, 9.0, 9.0, 0.0), lm(3, 4.0, 4.0, 0.0)],
        );

        let diffs = diff_frames(&start, &end);
        let ids: Vec<u32> = diffs.iter().map(|d| d.keypoint_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_self_diff_is_zero() {
        let frame = PoseFrame::from_landmarks(
            2.0,
            vec![lm(0, 120.5, 88.25, -0.1234), lm(5, 300.0, 12.0, 0.5)],
        );

        let diffs = diff_frames(&frame, &frame);
        assert_eq!(diffs.len(), 2);
        for diff in diffs {
            assert_eq!(diff.diff, [0.0, 0.0, 0.0]);
            assert_eq!(diff.start_pos, diff.end_pos);
        }
    }

    #[test]
    fn test_precision_split() {
        let start = PoseFrame::from_landmarks(0.0, vec![lm(7, 0.0, 0.0, 0.0)]);
        let end = PoseFrame::from_landmarks(5.0, vec![lm(7, 1.2344, 2.3456, 0.12342)]);

        let diffs = diff_frames(&start, &end);
        assert_eq!(diffs[0].diff[0], 1.23);
        assert_eq!(diffs[0].diff[1], 2.35);
        assert_eq!(diffs[0].diff[2], 0.1234);
    }

    #[test]
    fn test_disjoint_frames_empty() {
        let start = PoseFrame::from_landmarks(0.0, vec![lm(0, 0.0, 0.0, 0.0)]);
        let end = PoseFrame::from_landmarks(5.0, vec![lm(1, 0.0, 0.0, 0.0)]);
        assert!(diff_frames(&start, &end).is_empty());
    }
}
