//! Warewulf provisioning 플러그인
//!
//! Warewulf 기반 클러스터를 대상으로 하는 provisioning 단계 자리.
//! 현재는 의도적으로 비어있는 최소 플러그인으로, 실제 provisioning 동작은
//! 수행하지 않습니다. 옵션 맵도 기본값 없이 비어있습니다.

use crate::options::OptionsMap;
use crate::plugin::{StageKind, StagePlugin};
use async_trait::async_trait;
use std::any::Any;

/// Warewulf provisioning 플러그인 (stub)
pub struct WarewulfPlugin {
    /// 플러그인 옵션
    options: OptionsMap,
}

impl WarewulfPlugin {
    /// 새 플러그인 생성 - 옵션은 비어있는 상태로 시작
    pub fn new() -> Self {
        Self {
            options: OptionsMap::new(),
        }
    }
}

impl Default for WarewulfPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StagePlugin for WarewulfPlugin {
    fn name(&self) -> &str {
        "Warewulf"
    }

    fn stage(&self) -> StageKind {
        StageKind::Provision
    }

    fn options(&self) -> &OptionsMap {
        &self.options
    }

    // on_activate/on_deactivate는 기본 구현 사용

    fn as_any(&self) -> &dyn Any {
        self
    }
}
