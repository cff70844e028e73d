//! Options - 플러그인 옵션 맵과 testDef 렌더링
//!
//! 각 Stage 플러그인은 자신의 설정을 옵션 맵으로 보유합니다. 옵션을 화면에
//! 보여주는 포맷팅은 플러그인이 아니라 testDef 쪽의 책임이며, 플러그인은
//! 렌더링된 라인을 받아 출력만 담당합니다.

use serde_json::Value;
use std::collections::HashMap;

/// 플러그인 옵션 맵 (키 -> 값)
pub type OptionsMap = HashMap<String, Value>;

// ============================================================================
// OptionsFormatter - 옵션 렌더링 트레이트
// ============================================================================

/// 옵션 맵을 표시용 라인 시퀀스로 렌더링하는 트레이트
///
/// 테스트에서는 스텁 구현으로 교체할 수 있습니다.
pub trait OptionsFormatter: Send + Sync {
    /// 옵션 맵을 라인 목록으로 변환
    fn print_options(&self, options: &OptionsMap) -> Vec<String>;
}

// ============================================================================
// TestDef - 기본 포맷터
// ============================================================================

/// 테스트 정의 컨텍스트 - 옵션 표시를 담당하는 기본 포맷터
///
/// 키를 정렬하고 `key = value` 형태로 정렬된 컬럼에 맞춰 렌더링합니다.
pub struct TestDef {
    /// 키 컬럼 최소 폭
    min_key_width: usize,
}

impl TestDef {
    /// 새 testDef 생성
    pub fn new() -> Self {
        Self { min_key_width: 0 }
    }

    /// 키 컬럼 최소 폭 지정
    pub fn with_min_key_width(mut self, width: usize) -> Self {
        self.min_key_width = width;
        self
    }
}

impl Default for TestDef {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsFormatter for TestDef {
    fn print_options(&self, options: &OptionsMap) -> Vec<String> {
        let mut keys: Vec<&String> = options.keys().collect();
        keys.sort();

        let width = keys
            .iter()
            .map(|k| k.len())
            .max()
            .unwrap_or(0)
            .max(self.min_key_width);

        keys.into_iter()
            .map(|key| format!("{:width$} = {}", key, render_value(&options[key])))
            .collect()
    }
}

/// 값 렌더링 - 문자열은 따옴표 없이, 나머지는 JSON 표기
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
