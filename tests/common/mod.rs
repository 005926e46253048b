pub mod fixtures;
pub mod mock_gitlab;
pub mod recording_progress;
