//! Stable result codes. A `code` is a short snake_case discriminator.

// Codes: layout.shape
pub const CODE_SHAPE_MISMATCH: &str = "shape_mismatch";
pub const CODE_MALFORMED_DATA: &str = "malformed_data";
pub const CODE_EMPTY_DATA: &str = "empty_data";

// Codes: tool.runtime
pub const CODE_LAYOUT_UNAVAILABLE: &str = "layout_unavailable";
pub const CODE_MALFORMED_LAYOUT: &str = "malformed_layout";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
