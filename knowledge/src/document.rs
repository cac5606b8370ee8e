//! The knowledge document served by the chat endpoint.

/// The profile text every answer is grounded in.
///
/// Created once at compile time and never mutated. Editing this string is
/// the only way the service's knowledge changes; the retrieval index is
/// rebuilt from it on every request, so no invalidation step is needed.
pub const ABOUT_ME: &str = "I am a Full-Stack developer with experience in \
GenAI & LLM integration based in Barcelona Spain. Skills: React, Node.js, \
LangChain.js, Docker, MongoDB, PyTorch...";
