use serde::Serialize;

/// Where a resolved field's value ultimately came from, in increasing
/// precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLayer {
    Default,
    Global,
    Repo,
    Env,
    Flag,
}

impl SourceLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLayer::Default => "default",
            SourceLayer::Global => "global",
            SourceLayer::Repo => "repo",
            SourceLayer::Env => "env",
            SourceLayer::Flag => "flag",
        }
    }
}
