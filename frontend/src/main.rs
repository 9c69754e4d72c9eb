//! Trunk 构建入口：挂载 `App` 到 `<body>`

use leptos::prelude::*;
use tenant_manager_frontend::App;

// WASM 下使用 lol_alloc 作为全局分配器以减小体积
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: lol_alloc::AssumeSingleThreaded<lol_alloc::FreeListAllocator> =
    unsafe { lol_alloc::AssumeSingleThreaded::new(lol_alloc::FreeListAllocator::new()) };

fn main() {
    // panic 信息输出到浏览器控制台
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
