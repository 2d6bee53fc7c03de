//! Data transformations used ahead of model fitting.
//!
//! # Example
//!
//! ```
//! use kpi_forecast::transform::{normalize, sliding_windows};
//!
//! let series = vec![4.0, 8.0, 6.0, 10.0, 12.0];
//!
//! // Min-max scale into [0, 1]
//! let (scaled, scaler) = normalize(&series).unwrap();
//! assert_eq!(scaler.denormalize(scaled[1]), 8.0);
//!
//! // Supervised pairs with a lookback of 3
//! let windows = sliding_windows(&scaled, 3);
//! assert_eq!(windows.len(), 2);
//! ```

pub mod scale;
pub mod window;

pub use scale::{normalize, MinMaxScaler};
pub use window::{latest_window, sliding_windows, Window};
