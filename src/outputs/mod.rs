//! Output generation and table I/O.
//!
//! # Submodules
//!
//! - [`corpus`]: Reads and writes the CSV corpus tables shared by both pipelines
//! - [`json`]: Writes analyzer results as pretty-printed JSON
//!
//! # Output Structure
//!
//! ```text
//! us_think_tank_data.csv                    # collector, think-tank partition
//! us_mainstream_media_data.csv              # collector, media partition
//!
//! analysis_output_dir/
//! ├── sentiment_evolution.json              # monthly sentiment, media + think tank
//! ├── expert_sentiment_distribution.json    # histogram + mean
//! ├── network_think_tank.json
//! ├── network_expert.json
//! └── network_media.json
//! ```

pub mod corpus;
pub mod json;
