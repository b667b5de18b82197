//! # IntelliCage Performance
//! Performance curves, group summaries and intervisit statistics for
//! IntelliCage behavioral recordings.
//!
//! The usual pipeline is:
//! - Load a dataset ([`load_dataset`]) and a timeline ([`IniTimeline`]).
//! - Resolve the phases of interest ([`TimelineSource::phases`]).
//! - Build a [`PerformanceMatrix`] ([`compute_matrix`] or [`measure_matrix`]).
//! - Reduce it across subjects ([`summarize`]).
//!
//! [`load_dataset`]: crate::utilities::loading::dataset_file::load_dataset
//! [`IniTimeline`]: crate::utilities::loading::timeline_ini::IniTimeline
//! [`TimelineSource::phases`]: crate::api::traits::timeline_source::TimelineSource::phases
//! [`PerformanceMatrix`]: crate::structs::performance_matrix::PerformanceMatrix
//! [`compute_matrix`]: crate::implementation::performance::compute_matrix
//! [`measure_matrix`]: crate::implementation::performance::measure_matrix
//! [`summarize`]: crate::implementation::summary::summarize

/// Public High Level API
pub mod api {
    pub mod config;
    pub mod errors;

    pub mod enums {
        pub mod error_bar;
        pub mod performance_measure;
    }

    /// Seams to the data and timeline sources.
    pub mod traits {
        pub mod dataset_source;
        pub mod timeline_source;
    }
}

/// Read-only views over the recorded data and the aggregates derived from it.
pub mod structs {
    pub mod performance_matrix;
    pub mod phase;
    pub mod visit;
}

/// The computations themselves.
pub mod implementation {
    pub mod intervals;
    pub mod performance;
    pub mod side_counts;
    pub mod summary;
}

pub mod utilities {

    pub mod loading {
        /// Datasets stored as JSON, optionally ZStandard compressed.
        pub mod dataset_file;

        /// Timelines stored as INI files, one section per phase.
        pub mod timeline_ini;
    }

    pub mod log_bins;
    pub mod math;
    pub mod maybe_sync;
    pub mod time;
}

pub mod prelude {
    pub use crate::api::config::*;
    pub use crate::api::enums::error_bar::*;
    pub use crate::api::enums::performance_measure::*;
    pub use crate::api::errors::*;
    pub use crate::api::traits::dataset_source::*;
    pub use crate::api::traits::timeline_source::*;
    pub use crate::implementation::intervals::*;
    pub use crate::implementation::performance::*;
    pub use crate::implementation::side_counts::*;
    pub use crate::implementation::summary::*;
    pub use crate::structs::performance_matrix::*;
    pub use crate::structs::phase::*;
    pub use crate::structs::visit::*;
    pub use crate::utilities::loading::dataset_file::*;
    pub use crate::utilities::loading::timeline_ini::*;
    pub use crate::utilities::log_bins::*;
    pub use crate::utilities::time::*;
}
