//! Plugin traits - 핵심 Stage 플러그인 인터페이스

use crate::error::Result;
use crate::options::{OptionsFormatter, OptionsMap};
use async_trait::async_trait;
use std::any::Any;
use std::io::{self, Write};

// ============================================================================
// StageKind - 파이프라인 단계 열거
// ============================================================================

/// 테스트 파이프라인의 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// 클러스터 노드 프로비저닝
    Provision,

    /// 테스트 소스 획득
    TestGet,

    /// 테스트 빌드
    TestBuild,

    /// 테스트 실행
    TestRun,

    /// 결과 리포팅
    Reporter,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provision => write!(f, "provision"),
            Self::TestGet => write!(f, "test_get"),
            Self::TestBuild => write!(f, "test_build"),
            Self::TestRun => write!(f, "test_run"),
            Self::Reporter => write!(f, "reporter"),
        }
    }
}

// ============================================================================
// StagePlugin Trait - 모든 Stage 플러그인이 구현해야 하는 인터페이스
// ============================================================================

/// Stage 플러그인 트레이트
///
/// 파이프라인의 각 단계는 이 트레이트의 구현체로 제공됩니다.
/// 라이프사이클 훅(`on_activate`/`on_deactivate`)은 기본 구현이 있으므로
/// 특별한 준비 작업이 없는 플러그인은 오버라이드하지 않습니다.
#[async_trait]
pub trait StagePlugin: Send + Sync {
    /// 플러그인 이름 (레지스트리 키)
    fn name(&self) -> &str;

    /// 담당하는 파이프라인 단계
    fn stage(&self) -> StageKind;

    /// 플러그인 옵션 맵
    fn options(&self) -> &OptionsMap;

    /// 플러그인 활성화 시 호출
    async fn on_activate(&self) -> Result<()> {
        Ok(())
    }

    /// 플러그인 비활성화 시 호출
    async fn on_deactivate(&self) -> Result<()> {
        Ok(())
    }

    /// 옵션을 렌더링하여 writer로 출력
    ///
    /// testDef가 돌려준 라인 순서 그대로, 각 라인 앞에 prefix를 붙입니다.
    fn write_options(
        &self,
        test_def: &dyn OptionsFormatter,
        prefix: &str,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        for line in test_def.print_options(self.options()) {
            writeln!(out, "{prefix}{line}")?;
        }
        Ok(())
    }

    /// 옵션을 표준 출력으로 렌더링
    fn print_options(&self, test_def: &dyn OptionsFormatter, prefix: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_options(test_def, prefix, &mut out)?;
        Ok(())
    }

    /// 타입 캐스팅을 위한 헬퍼 (다운캐스팅 지원)
    fn as_any(&self) -> &dyn Any;
}

// ============================================================================
// PluginStatus - 플러그인 상태
// ============================================================================

/// 플러그인 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    /// 등록됨 (아직 활성화 안됨)
    Loaded,

    /// 활성화됨
    Active,

    /// 비활성화됨
    Inactive,

    /// 오류 상태
    Error,
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Error => write!(f, "error"),
        }
    }
}
