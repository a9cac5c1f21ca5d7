//! Frames handed to the dataset writer

use serde::{Deserialize, Serialize};

use crate::samples::TrajectoryRecord;

/// Reconstructed trajectory of one recorded episode together with the time window covered by
/// the video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub video_time_begin: f64,
    pub video_time_end: f64,
    pub records: Vec<TrajectoryRecord>,
}

/// Training sample: what was observed and what the arm was commanded to do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub episode_index: usize,
    pub frame_index: usize,
    /// Position across all episodes.
    pub index: usize,
    /// Seconds since the start of the video.
    pub timestamp: f64,
    pub observation: Vec<f64>,
    pub action: Vec<f64>,
}

impl Episode {
    /// Frames of the records within the video window (inclusive), timestamps relative to its
    /// start. `first_index` is the global index of the first frame.
    pub fn frames(&self, episode_index: usize, first_index: usize) -> Vec<Frame> {
        self.records
            .iter()
            .filter(|r| self.video_time_begin <= r.timestamp && r.timestamp <= self.video_time_end)
            .enumerate()
            .map(|(frame_index, r)| Frame {
                episode_index,
                frame_index,
                index: first_index + frame_index,
                timestamp: r.timestamp - self.video_time_begin,
                observation: r.state.clone(),
                action: r.goal.clone(),
            })
            .collect()
    }
}

/// Frames of several episodes, numbered consecutively.
pub fn dataset_frames(episodes: &[Episode]) -> Vec<Frame> {
    let mut frames = Vec::new();
    for (episode_index, episode) in episodes.iter().enumerate() {
        let next = episode.frames(episode_index, frames.len());
        frames.extend(next);
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(begin: f64, end: f64, timestamps: &[f64]) -> Episode {
        Episode {
            video_time_begin: begin,
            video_time_end: end,
            records: timestamps
                .iter()
                .map(|&t| TrajectoryRecord { timestamp: t, state: vec![t], goal: vec![t + 1.0] })
                .collect(),
        }
    }

    #[test]
    fn test_window_and_rebase() {
        let frames = episode(10.0, 10.5, &[9.5, 10.0, 10.25, 10.5, 11.0]).frames(0, 0);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].timestamp, 0.0);
        assert_eq!(frames[1].timestamp, 0.25);
        assert_eq!(frames[2].timestamp, 0.5);
        assert_eq!(frames[1].observation, vec![10.25]);
        assert_eq!(frames[1].action, vec![11.25]);
        assert_eq!(frames[2].frame_index, 2);
    }

    #[test]
    fn test_dataset_numbering() {
        let episodes = [episode(0.0, 1.0, &[0.0, 0.5, 1.0]), episode(5.0, 6.0, &[5.0, 6.0])];
        let frames = dataset_frames(&episodes);
        assert_eq!(frames.len(), 5);
        assert_eq!(frames.iter().map(|f| f.index).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
        assert_eq!(frames[3].episode_index, 1);
        assert_eq!(frames[3].frame_index, 0);
        assert_eq!(frames[4].timestamp, 1.0);
    }
}
