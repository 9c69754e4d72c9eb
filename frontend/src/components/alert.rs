//! 可关闭的提示框
//!
//! 消息保存在调用方的 `RwSignal<Option<String>>` 中，关闭即写回 `None`。

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    fn class(&self) -> &'static str {
        match self {
            AlertKind::Success => "alert alert-success text-sm py-2",
            AlertKind::Error => "alert alert-error text-sm py-2",
        }
    }
}

#[component]
pub fn Alert(message: RwSignal<Option<String>>, kind: AlertKind) -> impl IntoView {
    view! {
        <Show when=move || message.with(|m| m.is_some())>
            <div role="alert" class=kind.class()>
                <span class="flex-1">{move || message.get().unwrap_or_default()}</span>
                <button
                    type="button"
                    class="btn btn-ghost btn-xs"
                    aria-label="Dismiss"
                    on:click=move |_| message.set(None)
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}
