//! # Stage Plugin System
//!
//! 파이프라인 단계를 플러그인으로 확장하는 시스템
//!
//! ## 구성
//!
//! - `traits`: `StagePlugin` 트레이트와 상태/단계 열거
//! - `registry`: 이름 -> 플러그인 저장소
//! - `manager`: 등록과 라이프사이클(활성화/비활성화) 구동
//! - `events`: 라이프사이클 이벤트 버스
//!
//! ## 예시
//!
//! ```ignore
//! // 플러그인 정의
//! struct MyPlugin { options: OptionsMap }
//!
//! #[async_trait]
//! impl StagePlugin for MyPlugin {
//!     fn name(&self) -> &str { "MyPlugin" }
//!     fn stage(&self) -> StageKind { StageKind::Provision }
//!     fn options(&self) -> &OptionsMap { &self.options }
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//!
//! // 플러그인 등록 및 활성화
//! let manager = StageManager::new();
//! manager.register(Arc::new(MyPlugin::new())).await?;
//! manager.activate("MyPlugin").await?;
//! ```

mod events;
mod manager;
mod registry;
mod traits;

pub use events::{EventBus, EventType, PluginEvent};
pub use manager::{StageManager, StageManagerConfig, StageSummary};
pub use registry::{PluginInfo, StageRegistry};
pub use traits::{PluginStatus, StageKind, StagePlugin};
