use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Demo suites, one per script family
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// Chat completions: basic text, structured output, JSON mode, strict
    /// schema, tool calling
    Chat,
    /// Reasoning models: effort configuration and summary extraction
    Reasoning,
    /// Multimodal: PDF text analysis, PDF visual analysis, image analysis
    Multimodal,
    /// Sequential timed comparison between model classes
    Timed,
}

/// LLM completion workbench
#[derive(Debug, Parser)]
#[command(name = "quill", about = "Workbench for an OpenAI-compatible completion API")]
pub struct Args {
    /// Suite to run; all suites when omitted
    #[arg(value_enum)]
    pub suite: Option<Suite>,

    /// Write demo output to this file instead of stdout
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// PDF document for the multimodal suite
    #[arg(long, default_value = "data/sample.pdf", env = "QUILL_PDF")]
    pub pdf: PathBuf,

    /// Image for the multimodal suite
    #[arg(long, default_value = "data/sample.png", env = "QUILL_IMAGE")]
    pub image: PathBuf,
}
