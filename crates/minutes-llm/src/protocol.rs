//! Wire format types for each backend's JSON API
//!
//! Pure serde structs used only at the HTTP boundary.

pub mod google;
pub mod ollama;
pub mod watsonx;
