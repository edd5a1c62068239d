//! User-facing strings

pub const IDLE_LABEL: &str = "Generate Video";
pub const BUSY_LABEL: &str = "Generating... Please Wait";

pub const EMPTY_SCRIPT: &str = "Please enter a script.";
pub const SENDING: &str = "Sending request... This can take up to a minute.";
pub const GENERATED: &str = "Video generated! Starting download...";
pub const DOWNLOAD_STARTED: &str = "Download started successfully!";
pub const GENERATION_FAILED: &str = "Failed to generate video.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please check the console.";

pub const DEFAULT_FILENAME: &str = "ai_generated_video.mp4";

/// Status text for a rejected request
pub fn server_error(detail: Option<&str>) -> String {
    format!("Error: {}", detail.unwrap_or(GENERATION_FAILED))
}
