/// Shared by the run verdict and per-file outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFile {
    pub path: String,
    pub status: RenderableStatus,
    pub code: Option<String>,
    pub message: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub pass: u32,
    pub fail: u32,
    pub skip: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableStatus,
    pub module: String,
    pub layout: String,
    pub counts: RenderableCounts,
    pub files: Vec<RenderableFile>,
    /// Runtime error that aborted the run, if any.
    pub error: Option<String>,
}
