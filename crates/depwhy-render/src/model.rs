#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableExplanation {
    pub text: String,
    pub why: String,
    pub fix: String,
    pub from_service: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableIssue {
    pub severity: RenderableSeverity,
    pub check_id: String,
    pub message: String,
    pub packages: Vec<String>,
    pub line: Option<u32>,
    pub explanation: Option<RenderableExplanation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub records_parsed: u32,
    pub explanations_from_service: u32,
    pub explanations_from_fallback: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub all_clear: bool,
    pub issues: Vec<RenderableIssue>,
    pub data: RenderableData,
}
