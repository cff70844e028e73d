//! # stagehand
//!
//! Stagehand 테스트 오케스트레이션 프레임워크의 Stage 플러그인 시스템
//!
//! 클러스터 테스트 파이프라인의 각 단계(provisioning, test build, test run 등)는
//! 플러그인으로 구현됩니다. 이 크레이트는 플러그인 계약과 호스트 측 관리 계층을
//! 제공합니다:
//!
//! - `plugin`: `StagePlugin` 트레이트, 레지스트리, 매니저, 이벤트 버스
//! - `options`: 옵션 맵과 testDef 기반 옵션 렌더링
//! - `stages`: 이름 -> 생성자 테이블과 내장 Stage 플러그인들
//! - `error`: 중앙 에러 타입
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     StageManager                        │
//! │  ┌───────────────────────────────────────────────────┐  │
//! │  │                  StageRegistry                    │  │
//! │  │  ┌──────────────┬──────────────┬──────────────┐  │  │
//! │  │  │ Warewulf     │ (future)     │ (future)     │  │  │
//! │  │  │ (provision)  │              │              │  │  │
//! │  │  └──────────────┴──────────────┴──────────────┘  │  │
//! │  └───────────────────────────────────────────────────┘  │
//! │                          │                              │
//! │                      EventBus                           │
//! │           (registered / activated / ...)                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용 예시
//!
//! ```ignore
//! use stagehand::{StageManager, TestDef};
//!
//! let manager = StageManager::new();
//! manager.register_builtins().await?;
//!
//! manager.activate("Warewulf").await?;
//!
//! // 옵션을 표준 출력으로 렌더링
//! let test_def = TestDef::new();
//! manager.print_options("Warewulf", &test_def, "  ").await?;
//!
//! manager.deactivate("Warewulf").await?;
//! ```

pub mod error;
pub mod options;
pub mod plugin;
pub mod stages;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Options (testDef 렌더링)
// ============================================================================
pub use options::{OptionsFormatter, OptionsMap, TestDef};

// ============================================================================
// Plugin 시스템
// ============================================================================
pub use plugin::{
    EventBus, EventType, PluginEvent, PluginInfo, PluginStatus, StageKind, StageManager,
    StageManagerConfig, StagePlugin, StageRegistry, StageSummary,
};

// ============================================================================
// 내장 Stage 플러그인
// ============================================================================
pub use stages::provision::WarewulfPlugin;
pub use stages::{builtin_constructors, instantiate, PluginConstructor};
