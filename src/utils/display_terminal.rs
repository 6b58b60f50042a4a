//! 부팅 로그 포맷팅 유틸리티
//!
//! 레지스트리 초기화와 인덱스 생성 과정을 로그에 단계별로 남깁니다.
//! 모든 출력은 `log::info!`를 거치므로 `RUST_LOG`로 끌 수 있습니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태의 제목 세 줄을 만듭니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║         🔄 INITIALIZING SERVICE REGISTRY         ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn boxed_title_lines(title: &str) -> [String; 3] {
    let border = "═".repeat(BOX_WIDTH);

    [
        format!("╔{}╗", border),
        format!("║{:^width$}║", title, width = BOX_WIDTH - 1),
        format!("╚{}╝", border),
    ]
}

pub fn print_boxed_title(title: &str) {
    for line in boxed_title_lines(title) {
        log::info!("{}", line);
    }
}

pub fn print_step_start(step: u8, description: &str) {
    log::info!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    log::info!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    log::info!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 요약
pub fn print_final_summary(repos: usize) {
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    log::info!("   📦 Repositories: {}", repos);
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    log::info!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}
