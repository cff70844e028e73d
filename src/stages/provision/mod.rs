//! Provisioning Stage 플러그인
//!
//! 테스트 실행 전에 클러스터 노드를 준비하는 단계입니다.

mod warewulf;

pub use warewulf::WarewulfPlugin;
