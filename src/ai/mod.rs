// src/ai/mod.rs
pub mod client;

pub use client::{
    build_client_from_config, DisabledClient, DynGenerationClient, FailingClient,
    GeminiProvider, GenerationClient, GenerationRequest, StubClient,
};
