//! Pipeline components: context, walk loop, metadata workers, error slot.

pub mod context;
pub mod error_handler;
pub mod metadata;
pub mod orchestrator;
pub mod walk;

pub use context::{PipelineChannels, PipelineContext, PipelineHandles, create_pipeline_channels};
pub use error_handler::{FirstError, check_for_first_error};
pub use metadata::{path_to_entry, spawn_metadata_workers};
pub use orchestrator::{collect_entries, run_pipeline, shutdown_pipeline_handles};
pub use walk::{WalkOutcome, run_walk_loop, spawn_walk_thread, to_outcome_jwalk, to_outcome_walkdir};
