//! Stage Registry - 플러그인 저장소

use super::traits::{PluginStatus, StagePlugin};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// 플러그인 정보
pub struct PluginInfo {
    /// 플러그인 인스턴스
    pub plugin: Arc<dyn StagePlugin>,

    /// 현재 상태
    pub status: PluginStatus,

    /// 활성화 여부
    pub enabled: bool,

    /// 등록 순서
    pub load_order: usize,
}

/// Stage 레지스트리 - 등록된 모든 플러그인 관리
pub struct StageRegistry {
    /// 플러그인 저장소 (이름 -> PluginInfo)
    plugins: RwLock<HashMap<String, PluginInfo>>,

    /// 등록 카운터
    load_counter: RwLock<usize>,
}

impl StageRegistry {
    /// 새 레지스트리 생성
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
            load_counter: RwLock::new(0),
        }
    }

    /// 플러그인 등록
    pub async fn register(&self, plugin: Arc<dyn StagePlugin>) -> bool {
        let name = plugin.name().to_string();
        let stage = plugin.stage();

        let mut plugins = self.plugins.write().await;

        if plugins.contains_key(&name) {
            warn!("Plugin {} is already registered", name);
            return false;
        }

        let mut counter = self.load_counter.write().await;
        *counter += 1;
        let load_order = *counter;

        plugins.insert(
            name.clone(),
            PluginInfo {
                plugin,
                status: PluginStatus::Loaded,
                enabled: false,
                load_order,
            },
        );

        info!("Registered plugin: {} (stage: {})", name, stage);
        true
    }

    /// 플러그인 등록 해제
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn StagePlugin>> {
        let mut plugins = self.plugins.write().await;

        if let Some(info) = plugins.remove(name) {
            info!("Unregistered plugin: {}", name);
            Some(info.plugin)
        } else {
            None
        }
    }

    /// 플러그인 조회
    pub async fn get(&self, name: &str) -> Option<Arc<dyn StagePlugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(name).map(|info| Arc::clone(&info.plugin))
    }

    /// 플러그인 상태 조회
    pub async fn status(&self, name: &str) -> Option<PluginStatus> {
        let plugins = self.plugins.read().await;
        plugins.get(name).map(|info| info.status)
    }

    /// 플러그인 상태 설정
    pub async fn set_status(&self, name: &str, status: PluginStatus) -> bool {
        let mut plugins = self.plugins.write().await;
        if let Some(info) = plugins.get_mut(name) {
            info.status = status;
            debug!("Set plugin {} status to {}", name, status);
            true
        } else {
            false
        }
    }

    /// 플러그인 활성화/비활성화
    pub async fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        let mut plugins = self.plugins.write().await;
        if let Some(info) = plugins.get_mut(name) {
            info.enabled = enabled;
            info.status = if enabled {
                PluginStatus::Active
            } else {
                PluginStatus::Inactive
            };
            debug!("Set plugin {} enabled = {}", name, enabled);
            true
        } else {
            false
        }
    }

    /// 모든 플러그인 이름 목록 (등록 순서대로)
    pub async fn list(&self) -> Vec<String> {
        let plugins = self.plugins.read().await;
        let mut ordered: Vec<_> = plugins.iter().collect();
        ordered.sort_by_key(|(_, info)| info.load_order);
        ordered.into_iter().map(|(name, _)| name.clone()).collect()
    }

    /// 활성화된 플러그인 목록 (등록 순서대로)
    pub async fn list_enabled(&self) -> Vec<Arc<dyn StagePlugin>> {
        let plugins = self.plugins.read().await;
        let mut enabled: Vec<_> = plugins.values().filter(|info| info.enabled).collect();

        enabled.sort_by_key(|info| info.load_order);
        enabled.iter().map(|info| Arc::clone(&info.plugin)).collect()
    }

    /// 특정 단계를 담당하는 플러그인 목록
    pub async fn list_for_stage(&self, stage: super::traits::StageKind) -> Vec<Arc<dyn StagePlugin>> {
        let plugins = self.plugins.read().await;
        let mut matched: Vec<_> = plugins
            .values()
            .filter(|info| info.plugin.stage() == stage)
            .collect();

        matched.sort_by_key(|info| info.load_order);
        matched.iter().map(|info| Arc::clone(&info.plugin)).collect()
    }

    /// 플러그인 존재 여부 확인
    pub async fn contains(&self, name: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.contains_key(name)
    }

    /// 플러그인 수
    pub async fn len(&self) -> usize {
        let plugins = self.plugins.read().await;
        plugins.len()
    }

    /// 비어있는지 확인
    pub async fn is_empty(&self) -> bool {
        let plugins = self.plugins.read().await;
        plugins.is_empty()
    }

    /// 모든 플러그인 클리어
    pub async fn clear(&self) {
        let mut plugins = self.plugins.write().await;
        plugins.clear();
        *self.load_counter.write().await = 0;
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsMap;
    use crate::plugin::traits::StageKind;
    use async_trait::async_trait;
    use std::any::Any;

    struct TestPlugin {
        name: String,
        options: OptionsMap,
    }

    impl TestPlugin {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                options: OptionsMap::new(),
            }
        }
    }

    #[async_trait]
    impl StagePlugin for TestPlugin {
        fn name(&self) -> &str {
            &self.name
        }

        fn stage(&self) -> StageKind {
            StageKind::Provision
        }

        fn options(&self) -> &OptionsMap {
            &self.options
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[tokio::test]
    async fn test_register_plugin() {
        let registry = StageRegistry::new();

        assert!(registry.register(Arc::new(TestPlugin::new("Warewulf"))).await);
        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.status("Warewulf").await, Some(PluginStatus::Loaded));
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let registry = StageRegistry::new();

        assert!(registry.register(Arc::new(TestPlugin::new("Warewulf"))).await);
        assert!(!registry.register(Arc::new(TestPlugin::new("Warewulf"))).await); // Should fail
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_enable_disable() {
        let registry = StageRegistry::new();
        registry.register(Arc::new(TestPlugin::new("Warewulf"))).await;

        // 등록 직후에는 비활성 상태
        assert_eq!(registry.list_enabled().await.len(), 0);

        registry.set_enabled("Warewulf", true).await;
        assert_eq!(registry.list_enabled().await.len(), 1);
        assert_eq!(registry.status("Warewulf").await, Some(PluginStatus::Active));

        registry.set_enabled("Warewulf", false).await;
        assert_eq!(registry.list_enabled().await.len(), 0);
        assert_eq!(
            registry.status("Warewulf").await,
            Some(PluginStatus::Inactive)
        );
    }

    #[tokio::test]
    async fn test_list_preserves_load_order() {
        let registry = StageRegistry::new();
        registry.register(Arc::new(TestPlugin::new("Warewulf"))).await;
        registry.register(Arc::new(TestPlugin::new("Another"))).await;

        assert_eq!(registry.list().await, vec!["Warewulf", "Another"]);
    }

    #[tokio::test]
    async fn test_list_for_stage() {
        let registry = StageRegistry::new();
        registry.register(Arc::new(TestPlugin::new("Warewulf"))).await;

        let provision = registry.list_for_stage(StageKind::Provision).await;
        assert_eq!(provision.len(), 1);

        let reporters = registry.list_for_stage(StageKind::Reporter).await;
        assert!(reporters.is_empty());
    }

    #[tokio::test]
    async fn test_unregister() {
        let registry = StageRegistry::new();
        registry.register(Arc::new(TestPlugin::new("Warewulf"))).await;

        assert!(registry.unregister("Warewulf").await.is_some());
        assert!(registry.is_empty().await);
        assert!(registry.unregister("Warewulf").await.is_none());
    }
}
