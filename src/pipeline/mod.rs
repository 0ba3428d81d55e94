//! Pipeline components: enumeration, job runner, worker pool, ordered merge, line stage.

pub mod context;
pub mod enumerate;
pub mod line_stage;
pub mod merger;
pub mod orchestrator;
pub mod runner;
pub mod workers;

pub use context::{PipelineChannels, PipelineTuning, create_pipeline_channels};
pub use enumerate::enumerate_work;
pub use line_stage::{ByteFilter, LineStage};
pub use merger::{Merger, merge_in_order};
pub use orchestrator::{run_ocr, shutdown_workers};
pub use runner::{JobRunner, Recognize, Tesseract, ToolFailure};
pub use workers::spawn_recognize_workers;
