//! 带图标与错误提示的输入框

use leptos::prelude::*;

use super::icons::{Eye, EyeClosed};

fn frame_class(has_error: bool) -> &'static str {
    if has_error {
        "input input-bordered flex items-center gap-2 w-full input-error"
    } else {
        "input input-bordered flex items-center gap-2 w-full"
    }
}

/// 单行输入框，`children` 为前置图标
#[component]
pub fn FormField(
    #[prop(into)] placeholder: String,
    value: RwSignal<String>,
    /// 当前字段的错误文案
    error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class=move || frame_class(error.with(Option::is_some))>
                {children()}
                <input
                    type=input_type
                    class="grow"
                    placeholder=placeholder
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=move || value.get()
                />
            </label>
            <p class="text-sm font-semibold text-error mt-1">{move || error.get()}</p>
        </div>
    }
}

/// 密码输入框，可切换明文显示
#[component]
pub fn PasswordField(
    value: RwSignal<String>,
    error: Signal<Option<String>>,
    children: Children,
) -> impl IntoView {
    let show = RwSignal::new(false);

    view! {
        <div class="form-control">
            <label class=move || frame_class(error.with(Option::is_some))>
                {children()}
                <input
                    type=move || if show.get() { "text" } else { "password" }
                    class="grow"
                    placeholder="Password"
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=move || value.get()
                />
                <button
                    type="button"
                    class="btn btn-ghost btn-xs btn-circle"
                    on:click=move |_| show.update(|s| *s = !*s)
                >
                    {move || if show.get() {
                        view! { <Eye attr:class="h-4 w-4" /> }.into_any()
                    } else {
                        view! { <EyeClosed attr:class="h-4 w-4" /> }.into_any()
                    }}
                </button>
            </label>
            <p class="text-sm font-semibold text-error mt-1">{move || error.get()}</p>
        </div>
    }
}
