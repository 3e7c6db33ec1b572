//! Request extractors with rejection-to-error conversion.

mod enhanced_json;
mod enhanced_path;
mod validated_json;

pub use enhanced_json::Json;
pub use enhanced_path::Path;
pub use validated_json::ValidateJson;
