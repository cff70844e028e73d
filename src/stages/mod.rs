//! 내장 Stage 플러그인
//!
//! 이름 -> 생성자 테이블을 통해 플러그인을 이름으로 인스턴스화합니다.

pub mod provision;

use crate::plugin::StagePlugin;
use std::collections::HashMap;
use std::sync::Arc;

/// 플러그인 생성자
pub type PluginConstructor = fn() -> Arc<dyn StagePlugin>;

fn warewulf() -> Arc<dyn StagePlugin> {
    Arc::new(provision::WarewulfPlugin::new())
}

/// 내장 플러그인 생성자 테이블 (이름 -> 생성자)
pub fn builtin_constructors() -> HashMap<&'static str, PluginConstructor> {
    let mut table: HashMap<&'static str, PluginConstructor> = HashMap::new();
    table.insert("Warewulf", warewulf);
    table
}

/// 이름으로 내장 플러그인 인스턴스화
pub fn instantiate(name: &str) -> Option<Arc<dyn StagePlugin>> {
    builtin_constructors().get(name).map(|ctor| ctor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_contains_warewulf() {
        let table = builtin_constructors();
        assert!(table.contains_key("Warewulf"));
    }

    #[test]
    fn test_instantiate_by_name() {
        let plugin = instantiate("Warewulf").unwrap();
        assert_eq!(plugin.name(), "Warewulf");

        assert!(instantiate("Unknown").is_none());
    }
}
