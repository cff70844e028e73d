//! Stage Manager - 플러그인 라이프사이클 관리
//!
//! 레지스트리와 이벤트 버스를 묶어 플러그인 등록과 활성화/비활성화를
//! 한 곳에서 처리합니다.

use super::events::{EventBus, EventType, PluginEvent};
use super::registry::StageRegistry;
use super::traits::{PluginStatus, StagePlugin};
use crate::error::{Error, Result};
use crate::options::OptionsFormatter;
use crate::stages;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Stage 매니저 설정
#[derive(Debug, Clone)]
pub struct StageManagerConfig {
    /// 내장 플러그인 등록 실패 시 계속 진행
    pub continue_on_error: bool,
}

impl Default for StageManagerConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
        }
    }
}

/// Stage 매니저 - 전체 플러그인 시스템 관리
pub struct StageManager {
    /// 플러그인 레지스트리
    registry: Arc<StageRegistry>,

    /// 이벤트 버스
    event_bus: Arc<EventBus>,

    /// 설정
    config: StageManagerConfig,
}

impl StageManager {
    /// 새 매니저 생성
    pub fn new() -> Self {
        Self::with_config(StageManagerConfig::default())
    }

    /// 설정으로 생성
    pub fn with_config(config: StageManagerConfig) -> Self {
        Self {
            registry: Arc::new(StageRegistry::new()),
            event_bus: Arc::new(EventBus::new()),
            config,
        }
    }

    // ========================================================================
    // 플러그인 등록/해제
    // ========================================================================

    /// 플러그인 등록
    pub async fn register(&self, plugin: Arc<dyn StagePlugin>) -> Result<()> {
        let name = plugin.name().to_string();

        if name.is_empty() {
            return Err(Error::InvalidInput("plugin name must not be empty".into()));
        }

        if !self.registry.register(plugin).await {
            return Err(Error::Plugin(format!("Plugin {} is already registered", name)));
        }

        self.event_bus
            .publish(PluginEvent::new(
                EventType::PluginRegistered,
                serde_json::json!({ "plugin": name }),
                "stage_manager",
            ))
            .await;

        Ok(())
    }

    /// 내장 플러그인 일괄 등록
    pub async fn register_builtins(&self) -> Result<usize> {
        let mut registered = 0;

        for (name, constructor) in stages::builtin_constructors() {
            if let Err(e) = self.register(constructor()).await {
                if self.config.continue_on_error {
                    warn!("Skipping builtin plugin {}: {}", name, e);
                } else {
                    return Err(e);
                }
            } else {
                registered += 1;
            }
        }

        info!("Registered {} builtin plugin(s)", registered);
        Ok(registered)
    }

    /// 플러그인 등록 해제
    pub async fn unregister(&self, name: &str) -> Result<()> {
        let plugin = self
            .registry
            .get(name)
            .await
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        // 활성 상태면 먼저 비활성화 훅 호출
        if self.registry.status(name).await == Some(PluginStatus::Active) {
            if let Err(e) = plugin.on_deactivate().await {
                warn!("Plugin {} on_deactivate failed: {}", name, e);
                // 계속 진행
            }
        }

        self.registry.unregister(name).await;

        self.event_bus
            .publish(PluginEvent::new(
                EventType::PluginUnregistered,
                serde_json::json!({ "plugin": name }),
                "stage_manager",
            ))
            .await;

        Ok(())
    }

    // ========================================================================
    // 플러그인 활성화/비활성화
    // ========================================================================

    /// 플러그인 활성화
    pub async fn activate(&self, name: &str) -> Result<()> {
        let plugin = self
            .registry
            .get(name)
            .await
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        if let Err(e) = plugin.on_activate().await {
            error!("Plugin {} failed to activate: {}", name, e);
            self.registry.set_status(name, PluginStatus::Error).await;
            return Err(e);
        }

        self.registry.set_enabled(name, true).await;
        info!("Plugin {} activated", name);

        self.event_bus
            .publish(PluginEvent::new(
                EventType::PluginActivated,
                serde_json::json!({ "plugin": name }),
                "stage_manager",
            ))
            .await;

        Ok(())
    }

    /// 플러그인 비활성화
    pub async fn deactivate(&self, name: &str) -> Result<()> {
        let plugin = self
            .registry
            .get(name)
            .await
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        if let Err(e) = plugin.on_deactivate().await {
            error!("Plugin {} failed to deactivate: {}", name, e);
            self.registry.set_status(name, PluginStatus::Error).await;
            return Err(e);
        }

        self.registry.set_enabled(name, false).await;
        info!("Plugin {} deactivated", name);

        self.event_bus
            .publish(PluginEvent::new(
                EventType::PluginDeactivated,
                serde_json::json!({ "plugin": name }),
                "stage_manager",
            ))
            .await;

        Ok(())
    }

    // ========================================================================
    // 옵션 표시
    // ========================================================================

    /// 플러그인 옵션을 표준 출력으로 렌더링
    pub async fn print_options(
        &self,
        name: &str,
        test_def: &dyn OptionsFormatter,
        prefix: &str,
    ) -> Result<()> {
        let plugin = self
            .registry
            .get(name)
            .await
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        plugin.print_options(test_def, prefix)
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    /// 플러그인 레지스트리 접근
    pub fn registry(&self) -> &Arc<StageRegistry> {
        &self.registry
    }

    /// 이벤트 버스 접근
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    // ========================================================================
    // 유틸리티
    // ========================================================================

    /// 등록된 플러그인 수
    pub async fn plugin_count(&self) -> usize {
        self.registry.len().await
    }

    /// 플러그인 시스템 요약
    pub async fn summary(&self) -> StageSummary {
        let total = self.registry.len().await;
        let enabled = self.registry.list_enabled().await.len();

        StageSummary {
            total,
            enabled,
            disabled: total - enabled,
        }
    }
}

impl Default for StageManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 플러그인 시스템 요약
#[derive(Debug, Clone)]
pub struct StageSummary {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsMap;
    use crate::plugin::traits::StageKind;
    use async_trait::async_trait;
    use std::any::Any;

    struct TestPlugin {
        name: &'static str,
        options: OptionsMap,
        fail_activate: bool,
    }

    impl TestPlugin {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                options: OptionsMap::new(),
                fail_activate: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                options: OptionsMap::new(),
                fail_activate: true,
            }
        }
    }

    #[async_trait]
    impl StagePlugin for TestPlugin {
        fn name(&self) -> &str {
            self.name
        }

        fn stage(&self) -> StageKind {
            StageKind::Provision
        }

        fn options(&self) -> &OptionsMap {
            &self.options
        }

        async fn on_activate(&self) -> Result<()> {
            if self.fail_activate {
                Err(Error::stage(self.name, "activation refused"))
            } else {
                Ok(())
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[tokio::test]
    async fn test_register_and_activate() {
        let manager = StageManager::new();
        manager.register(Arc::new(TestPlugin::new("Warewulf"))).await.unwrap();

        manager.activate("Warewulf").await.unwrap();
        assert_eq!(
            manager.registry().status("Warewulf").await,
            Some(PluginStatus::Active)
        );

        manager.deactivate("Warewulf").await.unwrap();
        assert_eq!(
            manager.registry().status("Warewulf").await,
            Some(PluginStatus::Inactive)
        );
    }

    #[tokio::test]
    async fn test_activate_unknown_plugin() {
        let manager = StageManager::new();

        let err = manager.activate("Nope").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_register_fails() {
        let manager = StageManager::new();
        manager.register(Arc::new(TestPlugin::new("Warewulf"))).await.unwrap();

        let err = manager
            .register(Arc::new(TestPlugin::new("Warewulf")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Plugin(_)));
    }

    #[tokio::test]
    async fn test_activation_failure_marks_error() {
        let manager = StageManager::new();
        manager
            .register(Arc::new(TestPlugin::failing("Broken")))
            .await
            .unwrap();

        assert!(manager.activate("Broken").await.is_err());
        assert_eq!(
            manager.registry().status("Broken").await,
            Some(PluginStatus::Error)
        );
    }

    #[tokio::test]
    async fn test_register_builtins() {
        let manager = StageManager::new();
        let registered = manager.register_builtins().await.unwrap();

        assert_eq!(registered, 1);
        assert!(manager.registry().contains("Warewulf").await);
    }

    #[tokio::test]
    async fn test_lifecycle_events_published() {
        let manager = StageManager::new();
        manager.register(Arc::new(TestPlugin::new("Warewulf"))).await.unwrap();
        manager.activate("Warewulf").await.unwrap();
        manager.unregister("Warewulf").await.unwrap();

        let history = manager.event_bus().history().await;
        let types: Vec<EventType> = history.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                EventType::PluginRegistered,
                EventType::PluginActivated,
                EventType::PluginUnregistered,
            ]
        );
    }

    #[tokio::test]
    async fn test_summary() {
        let manager = StageManager::new();
        manager.register(Arc::new(TestPlugin::new("Warewulf"))).await.unwrap();
        manager.register(Arc::new(TestPlugin::new("Other"))).await.unwrap();
        manager.activate("Warewulf").await.unwrap();

        let summary = manager.summary().await;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.enabled, 1);
        assert_eq!(summary.disabled, 1);
    }
}
