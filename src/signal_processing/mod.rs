pub mod derivative;
pub mod moving_average;
pub mod peak_detector;

pub use derivative::{find_candidates, first_difference};
pub use moving_average::{reflect_pad, smooth, window_size_for};
pub use peak_detector::{min_peak_distance, select_peaks};
