//! Error types for Stagehand
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Stagehand 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Plugin 관련
    // ========================================================================
    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Plugin not found: {0}")]
    NotFound(String),

    // ========================================================================
    // Stage 관련
    // ========================================================================
    #[error("Stage error: {stage} - {message}")]
    Stage { stage: String, message: String },

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::InvalidInput(_))
    }

    /// Stage 에러 생성 헬퍼
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing() {
        assert!(Error::NotFound("Warewulf".into()).is_user_facing());
        assert!(!Error::Internal("boom".into()).is_user_facing());
    }

    #[test]
    fn test_stage_helper() {
        let err = Error::stage("Warewulf", "node image missing");
        assert_eq!(
            err.to_string(),
            "Stage error: Warewulf - node image missing"
        );
    }
}
